//! Container kinds and the pre-decode validation gate.
//!
//! Two containers are recognized:
//! - `.prg`: the editor's wrapped container, a 23-byte vendor header followed
//!   by the SysEx message (326 bytes for a microKORG, 328 for a microKORG S)
//! - `.syx`: a bare single-program SysEx dump (297 bytes)

use crate::error::{PrgError, Result};
use crate::frame::DeviceVariant;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Size of a wrapped classic-device file.
pub const WRAPPED_CLASSIC_SIZE: usize = 326;
/// Size of a wrapped newer-revision file.
pub const WRAPPED_NEWER_SIZE: usize = 328;
/// Size of a bare single-program SysEx file.
pub const BARE_SIZE: usize = 297;

/// Container holding the SysEx message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Editor file with a vendor header (`.prg`).
    Wrapped,
    /// Bare SysEx single-program dump (`.syx`).
    Bare,
}

impl ContainerKind {
    /// Map a file extension (case-insensitive, without the dot) to a container.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "prg" => Ok(ContainerKind::Wrapped),
            "syx" => Ok(ContainerKind::Bare),
            _ => Err(PrgError::UnsupportedExtension {
                extension: extension.to_string(),
            }),
        }
    }

    /// Container for a file path, judged by its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&extension)
    }

    /// Index at which the SysEx start byte must appear.
    pub const fn sysex_start_offset(self) -> usize {
        match self {
            ContainerKind::Wrapped => 23,
            ContainerKind::Bare => 0,
        }
    }

    /// Vendor header bytes between the start byte and the manufacturer id.
    pub(crate) const fn header_padding(self) -> usize {
        match self {
            ContainerKind::Wrapped => 2,
            ContainerKind::Bare => 0,
        }
    }

    /// Cursor position expected once every chunk has been unpacked.
    pub const fn terminal_offset(self, variant: DeviceVariant) -> usize {
        match (self, variant) {
            (ContainerKind::Wrapped, DeviceVariant::Classic) => 318,
            (ContainerKind::Wrapped, DeviceVariant::NewerRevision) => 320,
            (ContainerKind::Bare, _) => 293,
        }
    }

    /// Exact file size of a dump from `variant` in this container.
    pub const fn expected_size(self, variant: DeviceVariant) -> usize {
        match (self, variant) {
            (ContainerKind::Wrapped, DeviceVariant::Classic) => WRAPPED_CLASSIC_SIZE,
            (ContainerKind::Wrapped, DeviceVariant::NewerRevision) => WRAPPED_NEWER_SIZE,
            (ContainerKind::Bare, _) => BARE_SIZE,
        }
    }

    /// File sizes accepted for this container.
    pub const fn valid_sizes(self) -> &'static [usize] {
        match self {
            ContainerKind::Wrapped => &[WRAPPED_CLASSIC_SIZE, WRAPPED_NEWER_SIZE],
            ContainerKind::Bare => &[BARE_SIZE],
        }
    }

    /// Short lowercase name (`prg` / `syx`).
    pub const fn as_str(self) -> &'static str {
        match self {
            ContainerKind::Wrapped => "prg",
            ContainerKind::Bare => "syx",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// Reject files whose size cannot be a single program of the given container.
///
/// Runs before any byte is inspected. Oversized bare files get their own
/// error so callers can say "multi-program dumps are not supported".
pub fn validate_size(container: ContainerKind, size: usize) -> Result<()> {
    if container == ContainerKind::Bare && size > BARE_SIZE {
        return Err(PrgError::MultiProgramSyx { size });
    }
    if !container.valid_sizes().contains(&size) {
        return Err(PrgError::UnsupportedFileSize { container, size });
    }
    Ok(())
}
