//! Dump builders shared by the integration tests.

#![allow(dead_code)]

use microkorg_prg::frame::{pack_chunk, CHUNK_DATA_LEN};
use microkorg_prg::record::RECORD_LEN;

pub const VOICE_SINGLE: u8 = 0x00;
pub const VOICE_LAYER: u8 = 0x20;
pub const VOICE_VOCODER: u8 = 0x30;

/// Record of the factory "INIT PROG": every byte zero apart from the name.
pub fn init_record() -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    record[..12].copy_from_slice(b"INIT PROG   ");
    record
}

/// Record with every byte at the normalization zero point (64).
pub fn centered_record(name: &str, voice_byte: u8) -> [u8; RECORD_LEN] {
    let mut record = [64u8; RECORD_LEN];
    record[..12].copy_from_slice(format!("{name:<12}").as_bytes());
    record[16] = voice_byte;
    record[37] = 0;
    record
}

fn packed_chunks(record: &[u8; RECORD_LEN]) -> Vec<u8> {
    record
        .chunks_exact(CHUNK_DATA_LEN)
        .flat_map(|block| {
            let block: &[u8; CHUNK_DATA_LEN] = block.try_into().unwrap();
            pack_chunk(block)
        })
        .collect()
}

/// Bare `.syx` dump (297 bytes).
pub fn bare_dump(record: &[u8; RECORD_LEN]) -> Vec<u8> {
    let mut data = vec![0xF0, 0x42, 0x30, 0x58, 0x40];
    data.extend(packed_chunks(record));
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0xF7]);
    assert_eq!(data.len(), 297);
    data
}

/// Wrapped `.prg` file of a classic microKORG (326 bytes).
pub fn wrapped_classic(record: &[u8; RECORD_LEN]) -> Vec<u8> {
    let mut data = vec![0u8; 23];
    data.extend_from_slice(&[0xF0, 0x00, 0x00, 0x42, 0x30, 0x58, 0x40]);
    data.extend(packed_chunks(record));
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0xF7, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(data.len(), 326);
    data
}

/// Wrapped `.prg` file of a microKORG S (328 bytes).
pub fn wrapped_newer(record: &[u8; RECORD_LEN]) -> Vec<u8> {
    let mut data = vec![0u8; 23];
    data.extend_from_slice(&[0xF0, 0x00, 0x00, 0x42, 0x30, 0x00, 0x01, 0x40, 0x40]);
    data.extend(packed_chunks(record));
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0xF7, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(data.len(), 328);
    data
}
