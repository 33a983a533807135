//! Error type shared by the knot hash and grid builder.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnotError {
    #[error("length {length} exceeds ring size {size}")]
    LengthExceedsRing { length: usize, size: usize },

    /// Marks are bytes, so a ring holds between 1 and 256 of them.
    #[error("ring size {size} is outside 1..=256")]
    InvalidRingSize { size: usize },

    #[error("round count must be positive")]
    ZeroRounds,

    #[error("sparse hash of {len} marks is not a positive multiple of {block}")]
    SparseNotBlockAligned { len: usize, block: usize },

    #[error("dense hash needs a {expected}-mark sparse hash, got {actual}")]
    SparseLength { expected: usize, actual: usize },

    #[error("failed to build grid thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
