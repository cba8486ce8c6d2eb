//! File loader pipeline.
//!
//! Validates the container, extracts the record and decodes the program in
//! one call, collecting every non-fatal warning on the way.

use crate::config::DecoderConfig;
use crate::container::{self, ContainerKind};
use crate::error::{DecodeWarning, PrgError, Result};
use crate::frame::{self, DeviceVariant};
use crate::program::{decode_program, Program};
use crate::wavetable::{DwgsTable, WaveNameResolver};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// A program together with what was learned about its file.
#[derive(Debug, Clone, Serialize)]
pub struct DecodedProgram {
    /// The decoded program.
    pub program: Program,
    /// Device revision that produced the dump.
    pub variant: DeviceVariant,
    /// Container the dump came in.
    pub container: ContainerKind,
    /// Non-fatal findings, in the order they were found.
    pub warnings: Vec<DecodeWarning>,
}

/// Loads PRG / SYX program dumps.
///
/// The name table is only read, so one loader can be shared across threads.
#[derive(Debug, Clone)]
pub struct ProgramLoader<R = DwgsTable> {
    names: R,
    config: DecoderConfig,
}

impl ProgramLoader<DwgsTable> {
    /// Loader with the built-in wavetable names and default configuration.
    pub fn new() -> Self {
        Self::with_names(DwgsTable::builtin())
    }
}

impl Default for ProgramLoader<DwgsTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: WaveNameResolver> ProgramLoader<R> {
    /// Loader with a custom wavetable name resolver.
    pub fn with_names(names: R) -> Self {
        Self {
            names,
            config: DecoderConfig::default(),
        }
    }

    /// Replace the decoder configuration.
    pub fn config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn decoder_config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Load a program from disk. The container is chosen by the extension.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DecodedProgram> {
        let path = path.as_ref();
        let container = ContainerKind::from_path(path)?;
        let data = fs::read(path)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        self.load_from_bytes(&data, container)
    }

    /// Load a program from bytes whose file name is known, as delivered by an
    /// upload or drop.
    pub fn load_named_bytes(&self, file_name: &str, data: &[u8]) -> Result<DecodedProgram> {
        let container = ContainerKind::from_path(Path::new(file_name))?;
        self.load_from_bytes(data, container)
    }

    /// Load a program from in-memory bytes of the given container.
    pub fn load_from_bytes(&self, data: &[u8], container: ContainerKind) -> Result<DecodedProgram> {
        container::validate_size(container, data.len())?;

        let extraction = frame::extract(data, container)?;
        let mut warnings = extraction.warnings;
        if self.config.strict_end_marker {
            if let Some(offset) = warnings.iter().find_map(|warning| match warning {
                DecodeWarning::MissingSysexEnd { offset, .. } => Some(*offset),
                _ => None,
            }) {
                return Err(PrgError::MissingSysexEnd { offset });
            }
        }

        let (program, decode_warnings) =
            decode_program(&extraction.record, &self.names, &self.config)?;
        warnings.extend(decode_warnings);

        log::debug!(
            "decoded '{}' ({}, {}) with {} warning(s)",
            program.name(),
            program.voice_mode(),
            extraction.variant,
            warnings.len()
        );

        Ok(DecodedProgram {
            program,
            variant: extraction.variant,
            container: extraction.container,
            warnings,
        })
    }
}

/// Convenience function to load a program file with default settings.
pub fn load_file(path: impl AsRef<Path>) -> Result<DecodedProgram> {
    ProgramLoader::new().load(path)
}

/// Convenience function to decode in-memory bytes with default settings.
pub fn load_bytes(data: &[u8], container: ContainerKind) -> Result<DecodedProgram> {
    ProgramLoader::new().load_from_bytes(data, container)
}
