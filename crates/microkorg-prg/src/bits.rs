//! Byte-field primitives shared by the frame extractor and the section decoders.
//!
//! Everything here is pure arithmetic on single bytes; nothing allocates
//! except [`ascii_trimmed`].

/// Centre value of bipolar parameters (`64` means zero).
pub const ZERO_POINT: i32 = 64;

/// Default absolute limit used by [`normalize`].
pub const DEFAULT_LIMIT: i32 = 63;

/// Mask applied to a byte before its value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitmask {
    /// Most significant bit (`0x80`).
    Msb,
    /// Least significant bit (`0x01`).
    Lsb,
    /// Arbitrary mask.
    Bits(u8),
}

impl Bitmask {
    /// Numeric value of the mask.
    #[inline]
    pub const fn value(self) -> u8 {
        match self {
            Bitmask::Msb => 0x80,
            Bitmask::Lsb => 0x01,
            Bitmask::Bits(mask) => mask,
        }
    }
}

impl From<u8> for Bitmask {
    fn from(mask: u8) -> Self {
        Bitmask::Bits(mask)
    }
}

/// Apply `mask` to `byte`.
#[inline]
pub const fn extract(byte: u8, mask: Bitmask) -> u8 {
    byte & mask.value()
}

/// Shift `byte` by a signed magnitude: positive shifts left, negative shifts
/// right, zero returns the byte unchanged.
///
/// The result is widened so left shifts never lose bits.
#[inline]
pub const fn bitshift(byte: u8, magnitude: i8) -> u16 {
    let value = byte as u16;
    if magnitude > 0 {
        value << (magnitude as u32)
    } else if magnitude < 0 {
        value >> (magnitude.unsigned_abs() as u32)
    } else {
        value
    }
}

/// Shift then mask, returning the resulting index.
#[inline]
pub const fn field(byte: u8, mask: Bitmask, shift: i8) -> u8 {
    // Narrowing keeps the low byte, which is all any mask can select.
    (bitshift(byte, shift) as u8) & mask.value()
}

/// Pick an entry of `options` using a (optionally pre-shifted) masked index.
///
/// Returns `None` if the index falls outside the table.
pub fn select_option<T>(byte: u8, options: &[T], mask: Bitmask, shift: i8) -> Option<&T> {
    options.get(field(byte, mask, shift) as usize)
}

/// Boolean view of a masked byte, optionally inverted.
#[inline]
pub const fn is_set(byte: u8, mask: Bitmask, inverted: bool) -> bool {
    (extract(byte, mask) != 0) != inverted
}

/// Centre a raw byte at 64 and clamp it to `±limit`.
///
/// `normalize(0, 63) == -63`, `normalize(64, 63) == 0`, `normalize(127, 63) == 63`.
pub fn normalize(raw: u8, limit: i32) -> i32 {
    let offset = raw as i32 - ZERO_POINT;
    if offset == 0 {
        return 0;
    }
    if offset > 0 {
        offset.min(limit)
    } else {
        offset.max(-limit)
    }
}

/// [`normalize`] with the default limit of 63.
#[inline]
pub fn normalize_default(raw: u8) -> i32 {
    normalize(raw, DEFAULT_LIMIT)
}

/// Stand-in for bytes outside the ASCII range.
pub const NON_ASCII_PLACEHOLDER: char = '?';

/// Decode bytes as ASCII text with surrounding whitespace removed.
///
/// Bytes at or above 0x80 become [`NON_ASCII_PLACEHOLDER`].
pub fn ascii_trimmed(bytes: &[u8]) -> String {
    let text: String = bytes
        .iter()
        .map(|&b| {
            if b.is_ascii() {
                char::from(b)
            } else {
                NON_ASCII_PLACEHOLDER
            }
        })
        .collect();
    text.trim().to_string()
}
