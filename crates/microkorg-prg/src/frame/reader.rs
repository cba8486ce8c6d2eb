//! Forward-only byte reader with bounds-checked access.

use crate::error::{PrgError, Result};

/// Owns the extraction cursor. Every read either advances past the bytes it
/// returns or fails with [`PrgError::UnexpectedEof`] without moving.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(PrgError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.peek(N).ok_or(PrgError::UnexpectedEof {
            offset: self.pos.min(self.data.len()),
        })?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos += N;
        Ok(out)
    }

    /// Bytes at the cursor without consuming them.
    pub(crate) fn peek(&self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        self.data.get(self.pos..end)
    }

    /// Advance without reading. Skipping to exactly the end is allowed.
    pub(crate) fn skip(&mut self, count: usize) -> Result<()> {
        let target = self
            .pos
            .checked_add(count)
            .filter(|&target| target <= self.data.len())
            .ok_or(PrgError::UnexpectedEof {
                offset: self.data.len(),
            })?;
        self.pos = target;
        Ok(())
    }
}
