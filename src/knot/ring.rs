//! Circular mark buffer and the twist step.
//!
//! A twist reverses `len` marks starting at the cursor position, wrapping
//! past the end of the buffer, then advances the position by `len + skip`
//! and the skip by one. Reversal swaps mirrored index pairs modulo the ring
//! size, so the buffer is never rotated.

use super::RING_SIZE;
use crate::error::KnotError;

/// Largest ring whose marks `0..size` still fit in a byte.
pub const MAX_RING_SIZE: usize = 256;

/// Where the next twist starts and how far it advances afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub position: usize,
    pub skip: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnotRing {
    marks: Vec<u8>,
    cursor: Cursor,
}

impl KnotRing {
    /// Ring of `size` marks numbered `0..size`, cursor at the origin.
    pub fn new(size: usize) -> Result<Self, KnotError> {
        if size == 0 || size > MAX_RING_SIZE {
            return Err(KnotError::InvalidRingSize { size });
        }
        Ok(Self {
            marks: (0..size).map(|m| m as u8).collect(),
            cursor: Cursor::default(),
        })
    }

    /// The 256-mark ring used by the full hash.
    pub fn standard() -> Self {
        Self {
            marks: (0..=u8::MAX).collect(),
            cursor: Cursor::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[inline]
    pub fn marks(&self) -> &[u8] {
        &self.marks
    }

    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Apply one pass over `lengths`.
    ///
    /// Every length is checked before the ring is touched, so an error leaves
    /// the marks and cursor unchanged.
    pub fn round(&mut self, lengths: &[usize]) -> Result<(), KnotError> {
        let size = self.len();
        if let Some(&length) = lengths.iter().find(|&&len| len > size) {
            return Err(KnotError::LengthExceedsRing { length, size });
        }
        for &len in lengths {
            self.twist(len);
        }
        Ok(())
    }

    /// Apply `rounds` passes over `lengths`, carrying the cursor between them.
    pub fn rounds(&mut self, lengths: &[usize], rounds: usize) -> Result<(), KnotError> {
        if rounds == 0 {
            return Err(KnotError::ZeroRounds);
        }
        for _ in 0..rounds {
            self.round(lengths)?;
        }
        Ok(())
    }

    /// One pass over byte lengths on a full-size ring.
    pub(super) fn round_bytes(&mut self, lengths: &[u8]) {
        debug_assert_eq!(self.len(), RING_SIZE);
        for &len in lengths {
            self.twist(len as usize);
        }
    }

    #[inline]
    fn twist(&mut self, len: usize) {
        let size = self.marks.len();
        debug_assert!(len <= size);
        let start = self.cursor.position;
        for i in 0..len / 2 {
            let a = (start + i) % size;
            let b = (start + len - 1 - i) % size;
            self.marks.swap(a, b);
        }
        self.cursor.position = (start + len + self.cursor.skip) % size;
        self.cursor.skip = (self.cursor.skip + 1) % size;
    }
}

/// Run `rounds` passes of `lengths` over a fresh ring of `size` marks.
pub fn twist(size: usize, lengths: &[usize], rounds: usize) -> Result<KnotRing, KnotError> {
    let mut ring = KnotRing::new(size)?;
    ring.rounds(lengths, rounds)?;
    Ok(ring)
}
