//! Decoder configuration.

use crate::error::{PrgError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How keyboard octave shift bytes outside the known table are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OctaveShiftPolicy {
    /// Fail the decode with [`PrgError::UnknownOctaveShift`](crate::PrgError::UnknownOctaveShift).
    #[default]
    Reject,
    /// Read the byte as signed and clamp it to -3..=3, with a warning.
    Clamp,
}

/// Decoder options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Handling of unknown octave shift bytes.
    pub octave_shift: OctaveShiftPolicy,
    /// Treat a missing SysEx end byte as a fatal error instead of a warning.
    pub strict_end_marker: bool,
}

impl DecoderConfig {
    /// Set the octave shift policy.
    pub fn octave_shift(mut self, policy: OctaveShiftPolicy) -> Self {
        self.octave_shift = policy;
        self
    }

    /// Escalate a missing end byte to an error.
    pub fn strict_end_marker(mut self, enabled: bool) -> Self {
        self.strict_end_marker = enabled;
        self
    }

    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| PrgError::Config(err.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::debug!(
            "loaded decoder config from {}: {config:?}",
            path.as_ref().display()
        );
        Ok(config)
    }
}
