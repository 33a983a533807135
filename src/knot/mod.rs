//! Knot hash: circular twist rounds followed by block-wise XOR reduction.

mod dense;
mod ring;

pub use dense::{BLOCK_SIZE, DENSE_LEN, DenseHash, xor_fold};
pub use ring::{Cursor, KnotRing, MAX_RING_SIZE, twist};

use crate::error::KnotError;

/// Number of marks on the ring used by the full hash.
pub const RING_SIZE: usize = 256;

/// Rounds of the full length sequence applied per hash.
pub const STANDARD_ROUNDS: usize = 64;

/// Lengths appended after the input bytes.
pub const LENGTH_SUFFIX: [u8; 5] = [17, 31, 73, 47, 23];

/// Round count and trailing length suffix for a knot hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KnotParams {
    rounds: usize,
    suffix: &'static [u8],
}

impl KnotParams {
    pub const STANDARD: Self = Self {
        rounds: STANDARD_ROUNDS,
        suffix: &LENGTH_SUFFIX,
    };

    pub fn new(rounds: usize, suffix: &'static [u8]) -> Result<Self, KnotError> {
        if rounds == 0 {
            return Err(KnotError::ZeroRounds);
        }
        Ok(Self { rounds, suffix })
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    #[inline]
    pub fn suffix(&self) -> &'static [u8] {
        self.suffix
    }

    /// The input bytes followed by the suffix.
    pub fn lengths_for(&self, input: &[u8]) -> Vec<u8> {
        let mut lengths = Vec::with_capacity(input.len() + self.suffix.len());
        lengths.extend_from_slice(input);
        lengths.extend_from_slice(self.suffix);
        lengths
    }
}

impl Default for KnotParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Knot hash of `input` with the standard 64 rounds and suffix.
pub fn knot_hash(input: &[u8]) -> DenseHash {
    knot_hash_with(input, &KnotParams::STANDARD)
}

/// Knot hash of `input` with explicit parameters.
///
/// Lengths are bytes and the ring has 256 marks, so every length is in range.
pub fn knot_hash_with(input: &[u8], params: &KnotParams) -> DenseHash {
    let lengths = params.lengths_for(input);
    let mut ring = KnotRing::standard();
    for _ in 0..params.rounds {
        ring.round_bytes(&lengths);
    }
    DenseHash::from_marks(ring.marks())
}

#[cfg(test)]
mod tests {
    use super::{KnotParams, LENGTH_SUFFIX, knot_hash, knot_hash_with};
    use crate::error::KnotError;

    #[test]
    fn lengths_append_suffix() {
        let lengths = KnotParams::STANDARD.lengths_for(b"1,2,3");
        assert_eq!(lengths, vec![49, 44, 50, 44, 51, 17, 31, 73, 47, 23]);
    }

    #[test]
    fn zero_rounds_rejected() {
        assert!(matches!(
            KnotParams::new(0, &LENGTH_SUFFIX),
            Err(KnotError::ZeroRounds)
        ));
    }

    #[test]
    fn reference_hashes() {
        assert_eq!(knot_hash(b"").to_string(), "a2582a3a0e66e6e86e3812dcb672a272");
        assert_eq!(
            knot_hash(b"AoC 2017").to_string(),
            "33efeb34ea91902bb2f59c9920caa6cd"
        );
        assert_eq!(knot_hash(b"1,2,3").to_string(), "3efbe78a8d82f29979031a4aa0b16a9d");
        assert_eq!(knot_hash(b"1,2,4").to_string(), "63960835bcdc130f0b66d7ff4f6a5a8e");
    }

    #[test]
    fn round_count_changes_digest() {
        let one = KnotParams::new(1, &LENGTH_SUFFIX).unwrap();
        assert_ne!(knot_hash_with(b"flqrgnkx-0", &one), knot_hash(b"flqrgnkx-0"));
    }
}
