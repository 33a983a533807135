//! Reduction of a sparse hash into its 16-byte dense form.

use std::fmt;

use super::RING_SIZE;
use crate::error::KnotError;

/// Marks folded into each dense byte.
pub const BLOCK_SIZE: usize = 16;

/// Bytes in a dense hash.
pub const DENSE_LEN: usize = RING_SIZE / BLOCK_SIZE;

/// XOR-fold consecutive 16-mark blocks into one byte each.
pub fn xor_fold(sparse: &[u8]) -> Result<Vec<u8>, KnotError> {
    if sparse.is_empty() || sparse.len() % BLOCK_SIZE != 0 {
        return Err(KnotError::SparseNotBlockAligned {
            len: sparse.len(),
            block: BLOCK_SIZE,
        });
    }
    Ok(sparse
        .chunks_exact(BLOCK_SIZE)
        .map(|block| block.iter().fold(0u8, |acc, &m| acc ^ m))
        .collect())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DenseHash([u8; DENSE_LEN]);

impl DenseHash {
    /// Reduce a 256-mark sparse hash.
    pub fn from_sparse(sparse: &[u8]) -> Result<Self, KnotError> {
        if sparse.len() != RING_SIZE {
            return Err(KnotError::SparseLength {
                expected: RING_SIZE,
                actual: sparse.len(),
            });
        }
        Ok(Self::from_marks(sparse))
    }

    #[inline]
    pub(super) fn from_marks(sparse: &[u8]) -> Self {
        debug_assert_eq!(sparse.len(), RING_SIZE);
        let mut out = [0u8; DENSE_LEN];
        for (byte, block) in out.iter_mut().zip(sparse.chunks_exact(BLOCK_SIZE)) {
            *byte = block.iter().fold(0u8, |acc, &m| acc ^ m);
        }
        Self(out)
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; DENSE_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; DENSE_LEN] {
        &self.0
    }

    /// All 128 bits, byte 0 bit 7 in the most significant position.
    #[inline]
    pub fn to_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.to_u128().count_ones()
    }
}

impl fmt::LowerHex for DenseHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DenseHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}
