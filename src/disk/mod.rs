//! Disk grid: knot-hash rows assembled into a 128×128 bitmap, and the
//! labeling of its used regions.

mod builder;
mod grid;
mod regions;
mod row;

/// Rows and columns of the disk grid.
pub const GRID_SIDE: usize = 128;

pub use builder::{
    GridBuilder, GridConfig, THREADS_ENV, build_grid, compute_row_hash, length_sequence,
    row_input,
};
pub use grid::DiskGrid;
pub use regions::{CellState, Direction, RegionId, RegionMap, count_regions};
pub use row::RowBits;
