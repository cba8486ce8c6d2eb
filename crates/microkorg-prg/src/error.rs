//! Error and warning types for PRG/SYX decoding.

use crate::container::ContainerKind;
use crate::frame::DeviceVariant;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Convenient result alias for decoding operations.
pub type Result<T> = std::result::Result<T, PrgError>;

/// Coarse category of a [`PrgError`], used by callers that only need to know
/// which stage rejected the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// File rejected before decoding (extension or size).
    Validation,
    /// SysEx framing not where the container says it should be.
    Format,
    /// Device identification bytes not recognized.
    UnsupportedDevice,
    /// Dump is not a "current program" dump.
    CorruptDump,
    /// Unpacking did not end where the container layout requires.
    Integrity,
    /// Record bytes that cannot be turned into a program.
    Decode,
    /// Invalid decoder configuration or wavetable table.
    Config,
    /// Filesystem failure.
    Io,
}

impl ErrorKind {
    /// Short snake_case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Format => "format",
            ErrorKind::UnsupportedDevice => "unsupported_device",
            ErrorKind::CorruptDump => "corrupt_dump",
            ErrorKind::Integrity => "integrity",
            ErrorKind::Decode => "decode",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort a decode. No partial program is ever returned alongside one.
#[derive(Debug, Error)]
pub enum PrgError {
    /// File extension is neither `prg` nor `syx`.
    #[error("unsupported file extension '{extension}' (expected .prg or .syx)")]
    UnsupportedExtension {
        /// Extension as given by the caller (may be empty).
        extension: String,
    },
    /// File size does not match any known layout for its container.
    #[error("unsupported file size: {size} bytes is not a valid {container} file")]
    UnsupportedFileSize {
        /// Container kind derived from the extension.
        container: ContainerKind,
        /// Actual size in bytes.
        size: usize,
    },
    /// Bare SysEx file larger than a single program dump.
    #[error("multiple-program SYX files are not supported ({size} bytes)")]
    MultiProgramSyx {
        /// Actual size in bytes.
        size: usize,
    },
    /// SysEx start byte missing or misplaced.
    #[error("failed to find start of SysEx (0xF0) at index {expected}: {}", describe_found(.found))]
    SysexStartNotFound {
        /// Index required by the container.
        expected: usize,
        /// Index of the first 0xF0 in the file, if any.
        found: Option<usize>,
    },
    /// Vendor flag or device marker not recognized.
    #[error("file is not from a supported device (unrecognized id bytes at offset {offset})")]
    UnsupportedDevice {
        /// Offset of the first id byte that did not match.
        offset: usize,
    },
    /// The "current program data dump" marker (0x40) is missing.
    #[error(
        "not a single program dump: expected 0x40 at offset {offset}, found 0x{found:02X}"
    )]
    NotCurrentProgramDump {
        /// Offset of the marker byte.
        offset: usize,
        /// Byte found at that offset.
        found: u8,
    },
    /// Cursor did not land on the terminal offset after unpacking all chunks.
    #[error("program data extraction failed: expected cursor at {expected}, actual {actual}")]
    CursorMismatch {
        /// Terminal offset required for the container/device pair.
        expected: usize,
        /// Cursor position after unpacking.
        actual: usize,
    },
    /// File size belongs to the other device revision.
    #[error("file size {actual} does not match a {variant} dump ({expected} bytes expected)")]
    VariantSizeMismatch {
        /// Device revision read from the id bytes.
        variant: DeviceVariant,
        /// Size of a dump from that device.
        expected: usize,
        /// Actual size in bytes.
        actual: usize,
    },
    /// SysEx end byte missing and the configuration treats that as fatal.
    #[error("missing SysEx end byte (0xF7) at offset {offset}")]
    MissingSysexEnd {
        /// Offset where the end byte was expected.
        offset: usize,
    },
    /// Input ended before a required byte.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof {
        /// Offset that could not be read.
        offset: usize,
    },
    /// Voice mode bits hold the reserved value.
    #[error("invalid voice mode index {index} (raw byte 0x{raw:02X})")]
    InvalidVoiceMode {
        /// Two-bit voice mode index.
        index: u8,
        /// Raw general byte 16.
        raw: u8,
    },
    /// Keyboard octave shift byte outside the known table.
    #[error("unknown keyboard octave shift byte {raw}")]
    UnknownOctaveShift {
        /// Raw general byte 37.
        raw: u8,
    },
    /// Decoded voices do not agree with the voice mode.
    #[error("voice mode {voice_mode} does not match the decoded {voices} sections")]
    VoiceModeMismatch {
        /// Voice mode from the general region.
        voice_mode: crate::VoiceMode,
        /// Shape of the voices that were supplied.
        voices: &'static str,
    },
    /// Wavetable name table could not be loaded.
    #[error("invalid wavetable name table: {0}")]
    WaveNames(String),
    /// Decoder configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Wavetable name table could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error from the filesystem.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_found(found: &Option<usize>) -> String {
    match found {
        Some(index) => format!("found at index {index}, not a valid PRG or SYX file"),
        None => "no start byte in file".to_string(),
    }
}

impl PrgError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedExtension { .. }
            | Self::UnsupportedFileSize { .. }
            | Self::MultiProgramSyx { .. } => ErrorKind::Validation,
            Self::SysexStartNotFound { .. } => ErrorKind::Format,
            Self::UnsupportedDevice { .. } => ErrorKind::UnsupportedDevice,
            Self::NotCurrentProgramDump { .. } => ErrorKind::CorruptDump,
            Self::CursorMismatch { .. }
            | Self::VariantSizeMismatch { .. }
            | Self::MissingSysexEnd { .. }
            | Self::UnexpectedEof { .. } => ErrorKind::Integrity,
            Self::InvalidVoiceMode { .. }
            | Self::UnknownOctaveShift { .. }
            | Self::VoiceModeMismatch { .. } => ErrorKind::Decode,
            Self::WaveNames(_) | Self::Config(_) | Self::Json(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Non-fatal findings. The program is still decoded and delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// The byte three positions past the terminal offset is not 0xF7.
    #[error(
        "failed to detect correct ending byte (0xF7) at offset {offset}; \
         decoding continued, but the data may contain errors"
    )]
    MissingSysexEnd {
        /// Offset where the end byte was expected.
        offset: usize,
        /// Byte found there, if the file was long enough.
        found: Option<u8>,
    },
    /// Octave shift byte outside the known table, clamped by configuration.
    #[error("keyboard octave shift byte {raw} is not a known value; clamped to {clamped}")]
    OctaveShiftClamped {
        /// Raw general byte 37.
        raw: u8,
        /// Value used instead.
        clamped: i8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_variants() {
        assert_eq!(
            PrgError::MultiProgramSyx { size: 298 }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            PrgError::SysexStartNotFound {
                expected: 23,
                found: None
            }
            .kind(),
            ErrorKind::Format
        );
        assert_eq!(
            PrgError::CursorMismatch {
                expected: 318,
                actual: 317
            }
            .kind(),
            ErrorKind::Integrity
        );
        assert_eq!(
            PrgError::InvalidVoiceMode { index: 1, raw: 0x10 }.kind(),
            ErrorKind::Decode
        );
    }

    #[test]
    fn start_byte_message_mentions_both_indexes() {
        let err = PrgError::SysexStartNotFound {
            expected: 23,
            found: Some(4),
        };
        let msg = err.to_string();
        assert!(msg.contains("index 23"), "{msg}");
        assert!(msg.contains("index 4"), "{msg}");
    }

    #[test]
    fn multi_program_message_is_distinct() {
        let msg = PrgError::MultiProgramSyx { size: 298 }.to_string();
        assert!(msg.starts_with("multiple-program SYX files are not supported"));
    }
}
