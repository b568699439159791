use crate::chess::{Bitboard, Color, ParsePieceError, Piece, Role, Square};
use derive_more::{Display, Error, From};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The piece placement on the board.
///
/// This type holds at most one piece per square,
/// but otherwise does not validate the placement according to any set of rules.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; Square::SIDE]; Square::SIDE],
}

// We provide a custom implementation of Arbitrary rather than deriving,
// otherwise proptest overflows the stack generating large arrays.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, option::weighted, prelude::*};

        vec(weighted(0.3, any::<Piece>()), 64)
            .prop_map(|v| {
                let mut board = Board::empty();
                for (sq, p) in Square::iter().zip(v) {
                    board.set(sq, p);
                }

                board
            })
            .boxed()
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board::default()
    }

    /// The standard initial position.
    pub fn initial() -> Self {
        const BACK: [Role; Square::SIDE] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for c in [Color::White, Color::Black] {
            for (col, role) in BACK.into_iter().enumerate() {
                board.squares[c.home_row()][col] = Some(Piece::new(role, c));
                board.squares[c.pawn_row()][col] = Some(Piece::new(Role::Pawn, c));
            }
        }

        board
    }

    /// The piece on a [`Square`], if any.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()]
    }

    /// Places a piece on a [`Square`], or clears it, returning what was there before.
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.row()][sq.col()], p)
    }

    /// An iterator over the pieces on the board and the squares they occupy, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self.get(sq)?)))
    }

    /// [`Square`]s occupied by pieces of a [`Color`].
    pub fn by_color(&self, c: Color) -> Bitboard {
        self.iter()
            .filter(|(_, p)| p.color == c)
            .map(|(sq, _)| sq)
            .collect()
    }

    /// The [`Square`] occupied by the king of a [`Color`], if any.
    pub fn king(&self, c: Color) -> Option<Square> {
        let king = Piece::new(Role::King, c);
        self.iter().find(|&(_, p)| p == king).map(|(sq, _)| sq)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq.row()][sq.col()]
    }
}

/// Prints the piece placement field of the [FEN] notation, starting from row 0.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.squares.iter().enumerate() {
            if i > 0 {
                f.write_char('/')?;
            }

            let mut gap = 0;
            for p in row {
                match p {
                    None => gap += 1,
                    Some(p) => {
                        if gap > 0 {
                            write!(f, "{}", gap)?;
                            gap = 0;
                        }

                        write!(f, "{}", p)?;
                    }
                }
            }

            if gap > 0 {
                write!(f, "{}", gap)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board, expected 8 rows separated by `/`")]
    #[from(ignore)]
    InvalidRowCount,
    #[display(fmt = "failed to parse board, row {} does not span 8 columns", _0)]
    #[from(ignore)]
    InvalidRowLength(#[error(not(source))] usize),
    #[display(fmt = "failed to parse board, {}", _0)]
    InvalidPiece(ParsePieceError),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.trim().split('/').collect();
        if rows.len() != Square::SIDE {
            return Err(ParseBoardError::InvalidRowCount);
        }

        let mut board = Board::empty();
        for (r, row) in rows.into_iter().enumerate() {
            let mut col = 0;
            for c in row.chars() {
                match c.to_digit(10) {
                    Some(n @ 1..=8) => col += n as usize,
                    _ => {
                        let p = Piece::try_from(c)?;
                        if col >= Square::SIDE {
                            return Err(ParseBoardError::InvalidRowLength(r));
                        }

                        board.squares[r][col] = Some(p);
                        col += 1;
                    }
                }
            }

            if col != Square::SIDE {
                return Err(ParseBoardError::InvalidRowLength(r));
            }
        }

        Ok(board)
    }
}
