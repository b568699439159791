use crate::chess::{Color, Role};
use derive_more::{Constructor, Display, Error};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
///
/// Pieces carry no identity beyond their role and color,
/// two white knights are indistinguishable from one another.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    pub role: Role,
    pub color: Color,
}

impl Piece {
    /// Whether `other` belongs to the opposite side.
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.color != other.color
    }

    /// The unicode chess symbol for this piece.
    pub fn glyph(&self) -> char {
        match (self.color, self.role) {
            (Color::White, Role::Pawn) => '♙',
            (Color::White, Role::Knight) => '♘',
            (Color::White, Role::Bishop) => '♗',
            (Color::White, Role::Rook) => '♖',
            (Color::White, Role::Queen) => '♕',
            (Color::White, Role::King) => '♔',
            (Color::Black, Role::Pawn) => '♟',
            (Color::Black, Role::Knight) => '♞',
            (Color::Black, Role::Bishop) => '♝',
            (Color::Black, Role::Rook) => '♜',
            (Color::Black, Role::Queen) => '♛',
            (Color::Black, Role::King) => '♚',
        }
    }
}

/// Prints the piece as a letter, upper case for white and lower case for black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = char::from(self);
        f.write_char(c)
    }
}

impl From<&Piece> for char {
    fn from(p: &Piece) -> char {
        let c = match p.role {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        };

        match p.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `PNBRQKpnbrqk`")]
pub struct ParsePieceError;

impl TryFrom<char> for Piece {
    type Error = ParsePieceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let color = match c {
            'A'..='Z' => Color::White,
            'a'..='z' => Color::Black,
            _ => return Err(ParsePieceError),
        };

        let role = c
            .to_ascii_lowercase()
            .to_string()
            .parse::<Role>()
            .map_err(|_| ParsePieceError)?;

        Ok(Piece::new(role, color))
    }
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.try_into(),
            _ => Err(ParsePieceError),
        }
    }
}
