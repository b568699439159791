use crate::chess::{destinations, Bitboard, Board, Color, Move, Outcome, Piece, Square};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

/// A piece chosen by the side to move, along with the squares it may move to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Selection {
    pub square: Square,
    pub piece: Piece,
    pub destinations: Bitboard,
}

/// Whether the side to move has picked a piece.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase {
    #[default]
    AwaitingSelection,
    PieceSelected(Selection),
}

/// A move applied to the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Played {
    /// The move itself.
    pub m: Move,
    /// The piece that moved.
    pub piece: Piece,
    /// The enemy piece that stood on the destination, if any.
    pub captured: Option<Piece>,
    /// The outcome of the game, if this move ended it.
    pub outcome: Option<Outcome>,
}

/// What changed in response to a click.
///
/// This is enough for a presentation layer to update highlights and piece glyphs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Transition {
    /// Nothing changed.
    Ignored,
    /// A piece was selected.
    Selected(Selection),
    /// The piece on this square was deselected.
    Deselected(Square),
    /// The piece on this square was deselected in favor of another piece of the same side.
    Reselected(Square, Selection),
    /// A move was played.
    Moved(Played),
}

/// Represents an illegal [`Move`] in a given [`Game`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in position `{}`", _0, _1)]
pub struct IllegalMove(pub Move, pub Board);

/// A game played by clicking on squares.
///
/// The side to move first clicks one of its pieces to select it,
/// then clicks one of the highlighted destinations to move there.
/// The game ends as soon as either king is captured.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Game {
    board: Board,
    turn: Color,
    phase: Phase,
    outcome: Option<Outcome>,
}

// Random placements rarely hold exactly one king per side, so we place them explicitly.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Game {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Game>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use crate::chess::Role;
        use proptest::prelude::*;

        (
            any::<Board>(),
            any::<Color>(),
            any::<(Square, Square)>().prop_filter("distinct", |(w, b)| w != b),
            any::<Option<Square>>(),
        )
            .prop_map(|(mut board, turn, (w, b), click)| {
                let kings: Vec<_> = board
                    .iter()
                    .filter(|(_, p)| p.role == Role::King)
                    .map(|(sq, _)| sq)
                    .collect();

                for sq in kings {
                    board.set(sq, None);
                }

                board.set(w, Some(Piece::new(Role::King, Color::White)));
                board.set(b, Some(Piece::new(Role::King, Color::Black)));

                let mut game = Game::with_board(board, turn);
                if let Some(sq) = click {
                    game.click(sq);
                }

                game
            })
            .boxed()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game from the standard initial position, white to move.
    pub fn new() -> Self {
        Self::with_board(Board::initial(), Color::White)
    }

    /// A game from an arbitrary position.
    ///
    /// If either king is already missing from `board`, the game is over from the start.
    pub fn with_board(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            phase: Phase::AwaitingSelection,
            outcome: regicide(&board),
        }
    }

    /// Restores the initial position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The current piece placement.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Whether a piece is currently selected.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The currently selected piece, if any.
    pub fn selection(&self) -> Option<Selection> {
        match self.phase {
            Phase::AwaitingSelection => None,
            Phase::PieceSelected(s) => Some(s),
        }
    }

    /// The result of the game if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The winning side if the game has ended.
    pub fn winner(&self) -> Option<Color> {
        self.outcome.map(|o| o.winner())
    }

    /// The squares the piece on `sq` may move to, regardless of whose turn it is.
    pub fn destinations(&self, sq: Square) -> Bitboard {
        destinations(&self.board, sq)
    }

    /// An iterator over the moves available to the side to move.
    ///
    /// No moves are available once the game is over.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        let pieces = match self.outcome {
            None => self.board.by_color(self.turn),
            Some(_) => Bitboard::empty(),
        };

        pieces.into_iter().flat_map(move |whence| {
            self.destinations(whence)
                .into_iter()
                .map(move |whither| Move::new(whence, whither))
        })
    }

    /// Clicks the square at `(row, col)`.
    ///
    /// Coordinates off the board are ignored.
    pub fn select_or_move(&mut self, row: isize, col: isize) -> Transition {
        match Square::at(row, col) {
            Some(sq) => self.click(sq),
            None => Transition::Ignored,
        }
    }

    /// Clicks a square.
    ///
    /// * With no piece selected, clicking a piece of the side to move selects it.
    /// * Clicking the selected piece again deselects it.
    /// * Clicking one of the destinations of the selected piece moves it there.
    /// * Clicking anywhere else deselects the current piece,
    ///   selecting the clicked one instead if it belongs to the side to move.
    ///
    /// Once the game is over, every click is ignored.
    #[instrument(level = "trace", skip(self), ret, fields(turn = %self.turn))]
    pub fn click(&mut self, sq: Square) -> Transition {
        if self.is_over() {
            return Transition::Ignored;
        }

        match self.phase {
            Phase::AwaitingSelection => match self.select(sq) {
                None => Transition::Ignored,
                Some(s) => {
                    self.phase = Phase::PieceSelected(s);
                    Transition::Selected(s)
                }
            },

            Phase::PieceSelected(s) if s.square == sq => {
                self.phase = Phase::AwaitingSelection;
                Transition::Deselected(sq)
            }

            Phase::PieceSelected(s) if s.destinations.contains(sq) => {
                Transition::Moved(self.apply(Move::new(s.square, sq), s.piece))
            }

            Phase::PieceSelected(s) => match self.select(sq) {
                None => {
                    self.phase = Phase::AwaitingSelection;
                    Transition::Deselected(s.square)
                }

                Some(next) => {
                    self.phase = Phase::PieceSelected(next);
                    Transition::Reselected(s.square, next)
                }
            },
        }
    }

    /// Plays a whole move if it is legal, otherwise returns the reason why not.
    ///
    /// Any piece selected beforehand is deselected.
    #[instrument(level = "trace", skip(self), err, fields(turn = %self.turn))]
    pub fn play(&mut self, m: Move) -> Result<Played, IllegalMove> {
        match self.select(m.whence) {
            Some(s) if s.destinations.contains(m.whither) => Ok(self.apply(m, s.piece)),
            _ => Err(IllegalMove(m, self.board)),
        }
    }

    /// Selects the piece on `sq` if the game is ongoing and it belongs to the side to move.
    fn select(&self, sq: Square) -> Option<Selection> {
        let piece = self.board[sq]?;
        if self.is_over() || piece.color != self.turn {
            return None;
        }

        Some(Selection {
            square: sq,
            piece,
            destinations: self.destinations(sq),
        })
    }

    /// Applies a move of `piece` without checking its legality.
    fn apply(&mut self, m: Move, piece: Piece) -> Played {
        self.board.set(m.whence, None);
        let captured = self.board.set(m.whither, Some(piece));

        self.turn = !self.turn;
        self.phase = Phase::AwaitingSelection;
        self.outcome = regicide(&self.board);

        debug!(%m, %piece, ?captured, "move played");

        if let Some(o) = self.outcome {
            info!(outcome = %o, "game over");
        }

        Played {
            m,
            piece,
            captured,
            outcome: self.outcome,
        }
    }
}

/// The game is won by whoever still has a king on the board.
fn regicide(board: &Board) -> Option<Outcome> {
    match (board.king(Color::White), board.king(Color::Black)) {
        (None, _) => Some(Outcome::Regicide(Color::Black)),
        (_, None) => Some(Outcome::Regicide(Color::White)),
        _ => None,
    }
}
