//! One 128-cell grid row packed into a `u128`.
//!
//! Column 0 is the most significant bit, so the row reads left to right in
//! the same order as the dense hash bytes, high bit first.

use crate::knot::DenseHash;

use super::GRID_SIDE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowBits(pub u128);

impl RowBits {
    pub const EMPTY: Self = Self(0);

    #[inline(always)]
    const fn mask(col: usize) -> u128 {
        1u128 << (GRID_SIDE - 1 - col)
    }

    #[inline]
    pub fn get(self, col: usize) -> bool {
        debug_assert!(col < GRID_SIDE);
        self.0 & Self::mask(col) != 0
    }

    #[inline]
    pub fn set(&mut self, col: usize, used: bool) {
        debug_assert!(col < GRID_SIDE);
        if used {
            self.0 |= Self::mask(col);
        } else {
            self.0 &= !Self::mask(col);
        }
    }

    #[inline]
    pub fn count_used(self) -> u32 {
        self.0.count_ones()
    }

    /// Cells left to right.
    pub fn iter(self) -> impl Iterator<Item = bool> {
        (0..GRID_SIDE).map(move |col| self.get(col))
    }

    pub fn to_bools(self) -> [bool; GRID_SIDE] {
        let mut out = [false; GRID_SIDE];
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = self.get(col);
        }
        out
    }

    /// `0`/`1` per cell, 128 characters.
    pub fn to_bit_string(self) -> String {
        format!("{:0128b}", self.0)
    }

    /// Columns of used cells in ascending order.
    pub fn for_each_used<F: FnMut(usize)>(self, mut f: F) {
        let mut bits = self.0;
        while bits != 0 {
            let lead = bits.leading_zeros() as usize;
            f(lead);
            bits &= !Self::mask(lead);
        }
    }
}

impl From<DenseHash> for RowBits {
    fn from(hash: DenseHash) -> Self {
        Self(hash.to_u128())
    }
}

impl From<[bool; GRID_SIDE]> for RowBits {
    fn from(cells: [bool; GRID_SIDE]) -> Self {
        let mut row = Self::EMPTY;
        for (col, &used) in cells.iter().enumerate() {
            row.set(col, used);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::RowBits;
    use crate::knot::DenseHash;

    #[test]
    fn high_bit_is_first_column() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0xd4;
        bytes[15] = 0x01;
        let row = RowBits::from(DenseHash::from_bytes(bytes));
        let bits = row.to_bit_string();
        assert_eq!(bits.len(), 128);
        assert!(bits.starts_with("11010100"));
        assert!(bits.ends_with("00000001"));
        assert!(row.get(0) && row.get(1) && !row.get(2) && row.get(127));
        assert_eq!(row.count_used(), 5);
    }

    #[test]
    fn bools_match_bit_string() {
        let row = RowBits(0xa0c2_0170_0000_0000_0000_0000_0000_00ff);
        let from_str: Vec<bool> = row.to_bit_string().chars().map(|c| c == '1').collect();
        assert_eq!(row.to_bools().to_vec(), from_str);
        assert_eq!(row.iter().collect::<Vec<_>>(), from_str);
        assert_eq!(RowBits::from(row.to_bools()), row);
    }

    #[test]
    fn for_each_used_visits_ascending_columns() {
        let mut row = RowBits::EMPTY;
        for col in [0, 5, 64, 127] {
            row.set(col, true);
        }
        let mut seen = Vec::new();
        row.for_each_used(|col| seen.push(col));
        assert_eq!(seen, vec![0, 5, 64, 127]);

        row.set(5, false);
        assert!(!row.get(5));
        assert_eq!(row.count_used(), 3);
    }
}
