//! Knot hash disk grid (128×128) with 4-connected region labeling.

pub mod disk;
pub mod error;
pub mod knot;
pub use disk::{DiskGrid, GridBuilder, GridConfig, RegionMap, RowBits};
pub use disk::{build_grid, compute_row_hash, count_regions};
pub use error::KnotError;
pub use knot::{DenseHash, KnotParams, KnotRing, knot_hash};
