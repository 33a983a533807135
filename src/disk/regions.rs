//! Region labeling over the 4-connected used cells of a [`DiskGrid`].
//!
//! Cells are scanned in row-major order. Each used cell without a label
//! seeds a new region, which is flood filled from an explicit stack before
//! the scan moves on. A cell is labeled when it is pushed, so no cell is
//! pushed twice and no region ever needs merging.
//!
//! Labels live in a separate map (`0` for unlabeled, `n` for region `n`);
//! the grid itself is never modified.

use std::num::NonZeroU16;

use super::GRID_SIDE;
use super::grid::DiskGrid;

/// Region identifier. A 128×128 grid holds at most 8192 regions.
pub type RegionId = NonZeroU16;

const UNLABELED: u16 = 0;

/// The four edge-adjacent directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    North = 0, // (x, y-1)
    South = 1, // (x, y+1)
    West  = 2, // (x-1, y)
    East  = 3, // (x+1, y)
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Neighbor of `(x, y)` in this direction, if it lies on the grid.
    #[inline]
    pub fn step(self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self {
            Direction::North => y.checked_sub(1).map(|ny| (x, ny)),
            Direction::South => (y + 1 < GRID_SIDE).then_some((x, y + 1)),
            Direction::West  => x.checked_sub(1).map(|nx| (nx, y)),
            Direction::East  => (x + 1 < GRID_SIDE).then_some((x + 1, y)),
        }
    }
}

/// Labeling state of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Free,
    UsedUnvisited,
    Labeled(RegionId),
}

#[derive(Clone, Debug)]
pub struct RegionMap {
    labels: Vec<u16>,
    /// Cell count per region, indexed by `id - 1`.
    sizes: Vec<usize>,
}

impl RegionMap {
    /// Label every region of `grid`.
    pub fn label(grid: &DiskGrid) -> Self {
        let mut labels = vec![UNLABELED; GRID_SIDE * GRID_SIDE];
        let mut sizes = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();

        grid.for_each_used(|x, y| {
            if labels[y * GRID_SIDE + x] != UNLABELED {
                return;
            }
            let id = (sizes.len() + 1) as u16;
            labels[y * GRID_SIDE + x] = id;
            stack.push((x, y));
            let mut size = 0usize;

            while let Some((cx, cy)) = stack.pop() {
                size += 1;
                for dir in Direction::ALL {
                    let Some((nx, ny)) = dir.step(cx, cy) else {
                        continue;
                    };
                    let slot = &mut labels[ny * GRID_SIDE + nx];
                    if *slot == UNLABELED && grid.is_used(nx, ny) {
                        *slot = id;
                        stack.push((nx, ny));
                    }
                }
            }
            sizes.push(size);
        });

        let map = Self { labels, sizes };
        log::debug!(
            "labeled {} regions, largest {} cells",
            map.count(),
            map.largest_region().map_or(0, |(_, size)| size)
        );
        map
    }

    /// Number of regions found.
    #[inline]
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Region of the cell at `(x, y)`, or `None` for a free cell.
    #[inline]
    pub fn label_at(&self, x: usize, y: usize) -> Option<RegionId> {
        NonZeroU16::new(self.labels[y * GRID_SIDE + x])
    }

    pub fn cell_state(&self, grid: &DiskGrid, x: usize, y: usize) -> CellState {
        match (grid.is_used(x, y), self.label_at(x, y)) {
            (_, Some(id)) => CellState::Labeled(id),
            (true, None) => CellState::UsedUnvisited,
            (false, None) => CellState::Free,
        }
    }

    /// Cell count of region `id`.
    pub fn region_size(&self, id: RegionId) -> Option<usize> {
        self.sizes.get(id.get() as usize - 1).copied()
    }

    #[inline]
    pub fn region_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Total cells carrying a label.
    pub fn labeled_cells(&self) -> usize {
        self.sizes.iter().sum()
    }

    /// The largest region and its size; the earliest found wins ties.
    pub fn largest_region(&self) -> Option<(RegionId, usize)> {
        let mut best: Option<(RegionId, usize)> = None;
        for (i, &size) in self.sizes.iter().enumerate() {
            if best.is_none_or(|(_, top)| size > top) {
                best = NonZeroU16::new((i + 1) as u16).map(|id| (id, size));
            }
        }
        best
    }
}

/// Number of 4-connected regions of used cells in `grid`.
pub fn count_regions(grid: &DiskGrid) -> usize {
    RegionMap::label(grid).count()
}

#[cfg(test)]
mod tests {
    use super::{CellState, Direction, RegionMap, count_regions};
    use crate::disk::GRID_SIDE;
    use crate::disk::grid::DiskGrid;

    fn grid_with(cells: &[(usize, usize)]) -> DiskGrid {
        let mut grid = DiskGrid::empty();
        for &(x, y) in cells {
            grid.set_used(x, y, true);
        }
        grid
    }

    #[test]
    fn neighbors_stay_on_grid() {
        let edge = GRID_SIDE - 1;
        assert_eq!(Direction::North.step(0, 0), None);
        assert_eq!(Direction::West.step(0, 0), None);
        assert_eq!(Direction::South.step(edge, edge), None);
        assert_eq!(Direction::East.step(edge, edge), None);
        assert_eq!(Direction::East.step(3, 4), Some((4, 4)));
        assert_eq!(Direction::North.step(3, 4), Some((3, 3)));
    }

    #[test]
    fn empty_grid_has_no_regions() {
        let map = RegionMap::label(&DiskGrid::empty());
        assert_eq!(map.count(), 0);
        assert_eq!(map.largest_region(), None);
        assert_eq!(map.cell_state(&DiskGrid::empty(), 0, 0), CellState::Free);
    }

    #[test]
    fn single_cell_is_one_region() {
        let grid = grid_with(&[(64, 64)]);
        let map = RegionMap::label(&grid);
        assert_eq!(map.count(), 1);
        let id = map.label_at(64, 64).unwrap();
        assert_eq!(id.get(), 1);
        assert_eq!(map.region_size(id), Some(1));
        assert_eq!(map.cell_state(&grid, 64, 64), CellState::Labeled(id));
    }

    #[test]
    fn diagonals_do_not_connect() {
        let grid = grid_with(&[(0, 0), (1, 1), (2, 2)]);
        assert_eq!(count_regions(&grid), 3);
    }

    #[test]
    fn no_wraparound_across_edges() {
        let edge = GRID_SIDE - 1;
        let grid = grid_with(&[(0, 5), (edge, 5), (7, 0), (7, edge)]);
        assert_eq!(count_regions(&grid), 4);
    }

    #[test]
    fn ids_follow_row_major_discovery() {
        // (4, 0) is scanned before (1, 1), so its region is found first.
        let grid = grid_with(&[(4, 0), (4, 1), (1, 2), (1, 1)]);
        let map = RegionMap::label(&grid);
        assert_eq!(map.count(), 2);
        assert_eq!(map.label_at(4, 1).unwrap().get(), 1);
        assert_eq!(map.label_at(1, 2).unwrap().get(), 2);
    }

    #[test]
    fn u_shape_is_one_region() {
        // Two arms that only meet at the bottom.
        let mut cells = Vec::new();
        for y in 0..5 {
            cells.push((0, y));
            cells.push((4, y));
        }
        for x in 1..4 {
            cells.push((x, 4));
        }
        let grid = grid_with(&cells);
        let map = RegionMap::label(&grid);
        assert_eq!(map.count(), 1);
        assert_eq!(map.labeled_cells(), cells.len());
    }

    #[test]
    fn full_grid_fills_without_recursion() {
        let mut grid = DiskGrid::empty();
        for y in 0..GRID_SIDE {
            for x in 0..GRID_SIDE {
                grid.set_used(x, y, true);
            }
        }
        let map = RegionMap::label(&grid);
        assert_eq!(map.count(), 1);
        assert_eq!(map.region_sizes(), &[GRID_SIDE * GRID_SIDE]);
    }

    #[test]
    fn checkerboard_is_all_singletons() {
        let mut grid = DiskGrid::empty();
        for y in 0..GRID_SIDE {
            for x in 0..GRID_SIDE {
                grid.set_used(x, y, (x + y) % 2 == 0);
            }
        }
        let map = RegionMap::label(&grid);
        assert_eq!(map.count(), GRID_SIDE * GRID_SIDE / 2);
        assert!(map.region_sizes().iter().all(|&size| size == 1));
    }

    #[test]
    fn largest_region_prefers_first_on_ties() {
        let grid = grid_with(&[(0, 0), (1, 0), (5, 0), (5, 1), (9, 9), (9, 10), (9, 11)]);
        let map = RegionMap::label(&grid);
        let (id, size) = map.largest_region().unwrap();
        assert_eq!(size, 3);
        assert_eq!(map.label_at(9, 10), Some(id));
        assert_eq!(map.region_sizes(), &[2, 2, 3]);

        let tied = RegionMap::label(&grid_with(&[(0, 0), (1, 0), (5, 0), (5, 1)]));
        let (id, size) = tied.largest_region().unwrap();
        assert_eq!((id.get(), size), (1, 2));
    }
}
