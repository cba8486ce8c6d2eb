//! The flat program record produced by the frame extractor.

use std::ops::Range;

/// Number of 7-bit chunks carried by a single-program dump.
pub const CHUNK_COUNT: usize = 36;

/// Logical length of a program record.
pub const RECORD_LEN: usize = CHUNK_COUNT * crate::frame::CHUNK_DATA_LEN;

/// Bytes shared by every voice mode.
pub const GENERAL_REGION: Range<usize> = 0..38;
/// First synth timbre.
pub const TIMBRE1_REGION: Range<usize> = 38..146;
/// Second synth timbre (Layer programs). Its nominal end lies past the
/// record; [`RawProgramRecord::region`] clips it.
pub const TIMBRE2_REGION: Range<usize> = 146..254;
/// Vocoder parameters.
pub const VOCODER_REGION: Range<usize> = 38..142;

/// Unpacked program bytes. Offsets are record-local, never file offsets.
#[derive(Clone, PartialEq, Eq)]
pub struct RawProgramRecord {
    bytes: [u8; RECORD_LEN],
}

impl RawProgramRecord {
    /// Wrap already-unpacked bytes.
    pub fn new(bytes: [u8; RECORD_LEN]) -> Self {
        Self { bytes }
    }

    /// All record bytes.
    pub fn as_bytes(&self) -> &[u8; RECORD_LEN] {
        &self.bytes
    }

    /// Byte view of a region, clipped to the record length.
    pub fn region(&self, range: Range<usize>) -> &[u8] {
        let end = range.end.min(RECORD_LEN);
        let start = range.start.min(end);
        &self.bytes[start..end]
    }

    /// General region (bytes 0-37).
    pub fn general(&self) -> &[u8] {
        self.region(GENERAL_REGION)
    }

    /// Timbre 1 region.
    pub fn timbre1(&self) -> &[u8] {
        self.region(TIMBRE1_REGION)
    }

    /// Timbre 2 region, clipped to the record end.
    pub fn timbre2(&self) -> &[u8] {
        self.region(TIMBRE2_REGION)
    }

    /// Vocoder region.
    pub fn vocoder(&self) -> &[u8] {
        self.region(VOCODER_REGION)
    }
}

impl std::fmt::Debug for RawProgramRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawProgramRecord")
            .field("len", &RECORD_LEN)
            .field("name_bytes", &&self.bytes[..12])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_lengths() {
        let record = RawProgramRecord::new([0; RECORD_LEN]);
        assert_eq!(RECORD_LEN, 252);
        assert_eq!(record.general().len(), 38);
        assert_eq!(record.timbre1().len(), 108);
        assert_eq!(record.vocoder().len(), 104);
        assert_eq!(record.timbre2().len(), 106);
    }

    #[test]
    fn regions_are_record_local() {
        let mut bytes = [0u8; RECORD_LEN];
        bytes[38] = 0xAA;
        bytes[146] = 0xBB;
        let record = RawProgramRecord::new(bytes);
        assert_eq!(record.timbre1()[0], 0xAA);
        assert_eq!(record.vocoder()[0], 0xAA);
        assert_eq!(record.timbre2()[0], 0xBB);
    }
}
