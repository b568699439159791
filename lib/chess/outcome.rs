use crate::chess::Color;
use derive_more::Display;

/// One of the possible outcomes of a game.
///
/// There is no notion of check here, the game is won by capturing the opponent's king.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Outcome {
    #[display(fmt = "the {} player captured the opposing king", _0)]
    Regicide(Color),
}

impl Outcome {
    /// The winning side.
    pub fn winner(&self) -> Color {
        match *self {
            Outcome::Regicide(c) => c,
        }
    }
}
