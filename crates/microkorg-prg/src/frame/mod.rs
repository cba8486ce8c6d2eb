//! SysEx frame extraction.
//!
//! Walks the container from the SysEx start byte through the device id,
//! unpacks the 36 MIDI chunks into a [`RawProgramRecord`] and checks the
//! frame ends where the container layout says it must.

pub mod chunk;
mod reader;

pub use chunk::{pack_chunk, unpack_chunk, CHUNK_DATA_LEN, CHUNK_LEN};

use crate::container::ContainerKind;
use crate::error::{DecodeWarning, PrgError, Result};
use crate::record::{RawProgramRecord, CHUNK_COUNT, RECORD_LEN};
use reader::ByteReader;
use serde::Serialize;
use std::fmt;

/// SysEx start byte.
pub const SYSEX_START: u8 = 0xF0;
/// SysEx end byte.
pub const SYSEX_END: u8 = 0xF7;
/// Manufacturer id (Korg).
pub const VENDOR_ID: u8 = 0x42;
/// Device marker of the classic microKORG.
pub const CLASSIC_MARKER: u8 = 0x58;
/// Device marker sequence of the microKORG S.
pub const NEWER_REVISION_MARKER: [u8; 3] = [0x00, 0x01, 0x40];
/// Function code of a "current program data dump".
pub const CURRENT_PROGRAM_MARKER: u8 = 0x40;

/// Distance from the terminal offset to the SysEx end byte.
const END_BYTE_DISTANCE: usize = 3;

/// Hardware revision that produced the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceVariant {
    /// microKORG.
    Classic,
    /// microKORG S.
    NewerRevision,
}

impl DeviceVariant {
    /// Product name.
    pub const fn name(self) -> &'static str {
        match self {
            DeviceVariant::Classic => "microKORG",
            DeviceVariant::NewerRevision => "microKORG S",
        }
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Unpacked program bytes.
    pub record: RawProgramRecord,
    /// Device revision detected from the id bytes.
    pub variant: DeviceVariant,
    /// Container the frame was read from.
    pub container: ContainerKind,
    /// Non-fatal findings (missing end byte).
    pub warnings: Vec<DecodeWarning>,
}

/// Extract the program record from a size-validated file.
///
/// The cursor lives inside this call only; each step either advances it or
/// returns an error.
pub fn extract(data: &[u8], container: ContainerKind) -> Result<Extraction> {
    let start = find_sysex_start(data, container)?;
    let mut reader = ByteReader::new(data, start + 1);
    reader.skip(container.header_padding())?;

    let variant = read_device_id(&mut reader)?;
    log::debug!(
        "detected {} dump in {} container",
        variant.name(),
        container
    );

    let marker_offset = reader.position();
    let marker = reader.read_u8()?;
    if marker != CURRENT_PROGRAM_MARKER {
        return Err(PrgError::NotCurrentProgramDump {
            offset: marker_offset,
            found: marker,
        });
    }

    let record = unpack_record(&mut reader)?;

    let expected = container.terminal_offset(variant);
    if reader.position() != expected {
        return Err(PrgError::CursorMismatch {
            expected,
            actual: reader.position(),
        });
    }

    let expected_size = container.expected_size(variant);
    if data.len() != expected_size {
        return Err(PrgError::VariantSizeMismatch {
            variant,
            expected: expected_size,
            actual: data.len(),
        });
    }

    let mut warnings = Vec::new();
    let end_offset = expected + END_BYTE_DISTANCE;
    let end_byte = data.get(end_offset).copied();
    if end_byte != Some(SYSEX_END) {
        let warning = DecodeWarning::MissingSysexEnd {
            offset: end_offset,
            found: end_byte,
        };
        log::warn!("{warning}");
        warnings.push(warning);
    }

    Ok(Extraction {
        record,
        variant,
        container,
        warnings,
    })
}

fn find_sysex_start(data: &[u8], container: ContainerKind) -> Result<usize> {
    let expected = container.sysex_start_offset();
    let found = data.iter().position(|&b| b == SYSEX_START);
    match found {
        Some(index) if index == expected => Ok(index),
        _ => Err(PrgError::SysexStartNotFound { expected, found }),
    }
}

/// Vendor flag, channel filler, then one of the two device markers.
fn read_device_id(reader: &mut ByteReader<'_>) -> Result<DeviceVariant> {
    let vendor_offset = reader.position();
    if reader.read_u8()? != VENDOR_ID {
        return Err(PrgError::UnsupportedDevice {
            offset: vendor_offset,
        });
    }
    // MIDI channel
    reader.skip(1)?;

    let marker_offset = reader.position();
    if reader.peek(1) == Some(&[CLASSIC_MARKER][..]) {
        reader.skip(1)?;
        return Ok(DeviceVariant::Classic);
    }
    if reader.peek(NEWER_REVISION_MARKER.len()) == Some(&NEWER_REVISION_MARKER[..]) {
        reader.skip(NEWER_REVISION_MARKER.len())?;
        return Ok(DeviceVariant::NewerRevision);
    }
    Err(PrgError::UnsupportedDevice {
        offset: marker_offset,
    })
}

fn unpack_record(reader: &mut ByteReader<'_>) -> Result<RawProgramRecord> {
    let mut bytes = [0u8; RECORD_LEN];
    for out in bytes.chunks_exact_mut(CHUNK_DATA_LEN).take(CHUNK_COUNT) {
        let carrier = reader.read_u8()?;
        let payload = reader.read_array::<CHUNK_DATA_LEN>()?;
        out.copy_from_slice(&unpack_chunk(carrier, &payload));
    }
    Ok(RawProgramRecord::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Builds a frame around `record`, mirroring the device layout.
    fn build(
        container: ContainerKind,
        variant: DeviceVariant,
        record: &[u8; RECORD_LEN],
    ) -> Vec<u8> {
        let mut data = Vec::new();
        if container == ContainerKind::Wrapped {
            data.resize(23, 0x20);
        }
        data.push(SYSEX_START);
        data.extend_from_slice(&[0u8; 2][..container.header_padding()]);
        data.push(VENDOR_ID);
        data.push(0x30);
        match variant {
            DeviceVariant::Classic => data.push(CLASSIC_MARKER),
            DeviceVariant::NewerRevision => data.extend_from_slice(&NEWER_REVISION_MARKER),
        }
        data.push(CURRENT_PROGRAM_MARKER);
        for block in record.chunks_exact(CHUNK_DATA_LEN) {
            let block: [u8; CHUNK_DATA_LEN] = block.try_into().unwrap();
            data.extend_from_slice(&pack_chunk(&block));
        }
        data.extend_from_slice(&[0, 0, 0, SYSEX_END]);
        data.resize(container.expected_size(variant), 0);
        data
    }

    fn sample_record() -> [u8; RECORD_LEN] {
        let mut record = [0u8; RECORD_LEN];
        for (i, byte) in record.iter_mut().enumerate() {
            *byte = (i * 7) as u8;
        }
        record
    }

    #[test]
    fn classic_wrapped_frame() {
        let record = sample_record();
        let data = build(ContainerKind::Wrapped, DeviceVariant::Classic, &record);
        assert_eq!(data.len(), 326);
        let extraction = extract(&data, ContainerKind::Wrapped).unwrap();
        assert_eq!(extraction.variant, DeviceVariant::Classic);
        assert_eq!(extraction.record.as_bytes(), &record);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn wrapped_size_must_match_the_device() {
        let mut padded = build(ContainerKind::Wrapped, DeviceVariant::Classic, &sample_record());
        padded.extend_from_slice(&[0, 0]);
        let err = extract(&padded, ContainerKind::Wrapped).unwrap_err();
        assert!(matches!(
            err,
            PrgError::VariantSizeMismatch {
                variant: DeviceVariant::Classic,
                expected: 326,
                actual: 328
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Integrity);

        let mut cut = build(
            ContainerKind::Wrapped,
            DeviceVariant::NewerRevision,
            &sample_record(),
        );
        cut.truncate(326);
        let err = extract(&cut, ContainerKind::Wrapped).unwrap_err();
        assert!(matches!(
            err,
            PrgError::VariantSizeMismatch {
                variant: DeviceVariant::NewerRevision,
                expected: 328,
                actual: 326
            }
        ));
    }

    #[test]
    fn newer_revision_wrapped_frame() {
        let record = sample_record();
        let data = build(ContainerKind::Wrapped, DeviceVariant::NewerRevision, &record);
        let extraction = extract(&data, ContainerKind::Wrapped).unwrap();
        assert_eq!(extraction.variant, DeviceVariant::NewerRevision);
        assert_eq!(extraction.record.as_bytes(), &record);
        assert!(extraction.warnings.is_empty());
    }

    #[test]
    fn bare_classic_frame() {
        let record = sample_record();
        let data = build(ContainerKind::Bare, DeviceVariant::Classic, &record);
        assert_eq!(data[296], SYSEX_END);
        let extraction = extract(&data, ContainerKind::Bare).unwrap();
        assert_eq!(extraction.container, ContainerKind::Bare);
        assert_eq!(extraction.record.as_bytes(), &record);
    }

    #[test]
    fn bare_newer_revision_misses_terminal_offset() {
        let mut data = build(
            ContainerKind::Bare,
            DeviceVariant::NewerRevision,
            &sample_record(),
        );
        data.resize(300, 0);
        let err = extract(&data, ContainerKind::Bare).unwrap_err();
        assert!(matches!(
            err,
            PrgError::CursorMismatch {
                expected: 293,
                actual: 295
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }

    #[test]
    fn misplaced_start_byte() {
        let mut data = build(ContainerKind::Wrapped, DeviceVariant::Classic, &sample_record());
        data[4] = SYSEX_START;
        let err = extract(&data, ContainerKind::Wrapped).unwrap_err();
        assert!(matches!(
            err,
            PrgError::SysexStartNotFound {
                expected: 23,
                found: Some(4)
            }
        ));
    }

    #[test]
    fn wrong_vendor_is_unsupported() {
        let mut data = build(ContainerKind::Wrapped, DeviceVariant::Classic, &sample_record());
        data[26] = 0x41;
        let err = extract(&data, ContainerKind::Wrapped).unwrap_err();
        assert!(matches!(err, PrgError::UnsupportedDevice { offset: 26 }));
    }

    #[test]
    fn unknown_device_marker() {
        let mut data = build(ContainerKind::Bare, DeviceVariant::Classic, &sample_record());
        data[3] = 0x57;
        let err = extract(&data, ContainerKind::Bare).unwrap_err();
        assert!(matches!(err, PrgError::UnsupportedDevice { offset: 3 }));
        assert_eq!(err.kind(), ErrorKind::UnsupportedDevice);
    }

    #[test]
    fn missing_program_marker() {
        let mut data = build(ContainerKind::Wrapped, DeviceVariant::Classic, &sample_record());
        data[29] = 0x4C;
        let err = extract(&data, ContainerKind::Wrapped).unwrap_err();
        assert!(matches!(
            err,
            PrgError::NotCurrentProgramDump {
                offset: 29,
                found: 0x4C
            }
        ));
        assert_eq!(err.kind(), ErrorKind::CorruptDump);
    }

    #[test]
    fn missing_end_byte_is_a_warning() {
        let mut data = build(ContainerKind::Wrapped, DeviceVariant::Classic, &sample_record());
        data[321] = 0x00;
        let extraction = extract(&data, ContainerKind::Wrapped).unwrap();
        assert_eq!(
            extraction.warnings,
            vec![DecodeWarning::MissingSysexEnd {
                offset: 321,
                found: Some(0x00)
            }]
        );
    }

    #[test]
    fn truncated_input_is_eof() {
        let data = build(ContainerKind::Bare, DeviceVariant::Classic, &sample_record());
        let err = extract(&data[..100], ContainerKind::Bare).unwrap_err();
        assert!(matches!(err, PrgError::UnexpectedEof { .. }));
    }
}
