use derive_more::{DebugCustom, Display, Error};
use std::str::FromStr;
use tracing::instrument;

/// A square of the board, addressed by row and column.
///
/// Row 0 is the eighth rank, where black starts, and row 7 is the first rank.
/// Column 0 is the `a` file.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "{}", self)]
#[display(fmt = "{}{}", "(b'a' + self.col) as char", "8 - self.row")]
pub struct Square {
    #[cfg_attr(test, strategy(0u8..8))]
    row: u8,
    #[cfg_attr(test, strategy(0u8..8))]
    col: u8,
}

impl Square {
    /// The number of rows and columns on the board.
    pub const SIDE: usize = 8;

    /// Constructs [`Square`] from signed coordinates, if they lie on the board.
    pub const fn at(row: isize, col: isize) -> Option<Self> {
        if 0 <= row && row < Self::SIDE as isize && 0 <= col && col < Self::SIDE as isize {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Constructs [`Square`] from its index in the range (0..64), counted row by row.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range (0..64).
    pub fn from_index(i: usize) -> Self {
        assert!(i < Self::SIDE * Self::SIDE, "square index `{i}` out of range");

        Square {
            row: (i / Self::SIDE) as u8,
            col: (i % Self::SIDE) as u8,
        }
    }

    /// This square's row in the range (0..8).
    pub const fn row(&self) -> usize {
        self.row as usize
    }

    /// This square's column in the range (0..8).
    pub const fn col(&self) -> usize {
        self.col as usize
    }

    /// This square's index in the range (0..64), counted row by row.
    pub const fn index(&self) -> usize {
        self.row() * Self::SIDE + self.col()
    }

    /// The square `dr` rows and `dc` columns away, if it lies on the board.
    pub const fn shift(&self, dr: isize, dc: isize) -> Option<Self> {
        match ((self.row as isize).checked_add(dr), (self.col as isize).checked_add(dc)) {
            (Some(row), Some(col)) => Self::at(row, col),
            _ => None,
        }
    }

    /// Returns an iterator over all [`Square`]s, row by row.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::SIDE * Self::SIDE).map(Square::from_index)
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse square, expected a file in `a..=h` followed by a rank in `1..=8`")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    #[instrument(level = "trace", err)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[f @ b'a'..=b'h', r @ b'1'..=b'8'] => Ok(Square {
                row: b'8' - r,
                col: f - b'a',
            }),
            _ => Err(ParseSquareError),
        }
    }
}
