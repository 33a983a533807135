//! The 128×128 disk grid, one packed row per knot hash.

use super::GRID_SIDE;
use super::row::RowBits;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskGrid {
    rows: Box<[RowBits; GRID_SIDE]>,
}

impl Default for DiskGrid {
    fn default() -> Self {
        Self::empty()
    }
}

impl DiskGrid {
    /// A grid with every cell free.
    pub fn empty() -> Self {
        Self {
            rows: Box::new([RowBits::EMPTY; GRID_SIDE]),
        }
    }

    /// Build from rows in top-to-bottom order.
    ///
    /// # Panics
    /// Panics if `rows` does not hold exactly `GRID_SIDE` rows.
    pub fn from_rows(rows: Vec<RowBits>) -> Self {
        let len = rows.len();
        let rows: Box<[RowBits; GRID_SIDE]> = rows
            .into_boxed_slice()
            .try_into()
            .unwrap_or_else(|_| panic!("grid needs {GRID_SIDE} rows, got {len}"));
        Self { rows }
    }

    pub fn from_bools(cells: &[[bool; GRID_SIDE]; GRID_SIDE]) -> Self {
        let mut grid = Self::empty();
        for (row, line) in grid.rows.iter_mut().zip(cells) {
            *row = RowBits::from(*line);
        }
        grid
    }

    #[inline]
    pub fn side(&self) -> usize {
        GRID_SIDE
    }

    #[inline]
    pub fn row(&self, y: usize) -> RowBits {
        self.rows[y]
    }

    #[inline]
    pub fn rows(&self) -> &[RowBits] {
        &self.rows[..]
    }

    /// Whether the cell at column `x`, row `y` is used.
    #[inline]
    pub fn is_used(&self, x: usize, y: usize) -> bool {
        self.rows[y].get(x)
    }

    #[inline]
    pub fn set_used(&mut self, x: usize, y: usize, used: bool) {
        self.rows[y].set(x, used);
    }

    pub fn used_count(&self) -> usize {
        self.rows.iter().map(|row| row.count_used() as usize).sum()
    }

    pub fn to_bools(&self) -> Vec<[bool; GRID_SIDE]> {
        self.rows.iter().map(|row| row.to_bools()).collect()
    }

    /// Visit every used cell in row-major order.
    pub fn for_each_used<F: FnMut(usize, usize)>(&self, mut f: F) {
        for (y, row) in self.rows.iter().enumerate() {
            row.for_each_used(|x| f(x, y));
        }
    }

    /// Top-left `width`×`height` corner, `#` for used and `.` for free.
    pub fn render(&self, width: usize, height: usize) -> String {
        let width = width.min(GRID_SIDE);
        let height = height.min(GRID_SIDE);
        let mut out = String::with_capacity((width + 1) * height);
        for row in self.rows.iter().take(height) {
            out.extend(row.iter().take(width).map(|used| if used { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}
