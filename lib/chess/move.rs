use crate::chess::{ParseSquareError, Square};
use derive_more::{Constructor, DebugCustom, Display, Error, From};
use std::str::FromStr;

/// A move in pure coordinate notation, e.g. `e2e4`.
#[derive(DebugCustom, Display, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[cfg_attr(test, filter(#self.whence != #self.whither))]
#[debug(fmt = "Move({})", self)]
#[display(fmt = "{}{}", whence, whither)]
pub struct Move {
    /// The square the piece moves from.
    pub whence: Square,
    /// The square the piece moves to.
    pub whither: Square,
}

/// The reason why parsing [`Move`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseMoveError {
    #[display(fmt = "failed to parse move, expected two squares such as `e2e4`")]
    #[from(ignore)]
    InvalidLength,
    #[display(fmt = "failed to parse move, {}", _0)]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_char_boundary(2) {
            return Err(ParseMoveError::InvalidLength);
        }

        Ok(Move::new(s[..2].parse()?, s[2..].parse()?))
    }
}
