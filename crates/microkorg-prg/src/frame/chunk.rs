//! 7-bit MIDI chunk codec.
//!
//! SysEx data bytes only carry 7 bits, so the device sends every 7 bytes of
//! program data as 8 bytes: a carrier byte holding the high bits (bit `i`
//! belongs to data byte `i`) followed by the 7 data bytes with their high
//! bit cleared.

/// Data bytes per chunk.
pub const CHUNK_DATA_LEN: usize = 7;

/// Encoded bytes per chunk (carrier + data).
pub const CHUNK_LEN: usize = CHUNK_DATA_LEN + 1;

const HIGH_BIT: u8 = 0x80;

/// Restore 7 bytes of 8-bit data from a carrier byte and its 7-bit payload.
pub fn unpack_chunk(carrier: u8, payload: &[u8; CHUNK_DATA_LEN]) -> [u8; CHUNK_DATA_LEN] {
    let mut restored = [0u8; CHUNK_DATA_LEN];
    for (i, (out, &byte)) in restored.iter_mut().zip(payload).enumerate() {
        let high = if (carrier >> i) & 0x01 != 0 { HIGH_BIT } else { 0 };
        *out = high | byte;
    }
    restored
}

/// Encode 7 bytes of 8-bit data as one chunk (`[carrier, payload...]`).
pub fn pack_chunk(data: &[u8; CHUNK_DATA_LEN]) -> [u8; CHUNK_LEN] {
    let mut chunk = [0u8; CHUNK_LEN];
    for (i, &byte) in data.iter().enumerate() {
        if byte & HIGH_BIT != 0 {
            chunk[0] |= 1 << i;
        }
        chunk[i + 1] = byte & !HIGH_BIT;
    }
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_sets_high_bits_from_carrier() {
        let payload = [0x00, 0x7F, 0x10, 0x00, 0x00, 0x00, 0x01];
        let restored = unpack_chunk(0b0100_0101, &payload);
        assert_eq!(restored, [0x80, 0x7F, 0x90, 0x00, 0x00, 0x00, 0x81]);
    }

    #[test]
    fn every_byte_survives_at_every_position() {
        for position in 0..CHUNK_DATA_LEN {
            for value in 0..=u8::MAX {
                let mut data = [0x55u8; CHUNK_DATA_LEN];
                data[position] = value;
                let chunk = pack_chunk(&data);
                assert!(chunk[1..].iter().all(|b| b & HIGH_BIT == 0));
                let payload: [u8; CHUNK_DATA_LEN] = chunk[1..].try_into().unwrap();
                assert_eq!(unpack_chunk(chunk[0], &payload), data, "byte {value} at {position}");
            }
        }
    }

    #[test]
    fn pack_then_unpack_restores_data() {
        let samples: [[u8; 7]; 4] = [
            [0x00, 0x01, 0x7F, 0x80, 0xFF, 0x40, 0xC0],
            [0xFD, 0xFE, 0xFF, 0x00, 0x01, 0x02, 0x03],
            [b'I', b'N', b'I', b'T', b' ', b'P', b'R'],
            [0x80; 7],
        ];
        for data in samples {
            let chunk = pack_chunk(&data);
            assert!(chunk[1..].iter().all(|b| b & 0x80 == 0));
            let payload: [u8; 7] = chunk[1..].try_into().unwrap();
            assert_eq!(unpack_chunk(chunk[0], &payload), data);
        }
    }
}
