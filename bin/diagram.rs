use derive_more::Constructor;
use lib::chess::{Board, Square};
use lib::game::Selection;
use std::fmt;

/// Renders the board for the terminal.
///
/// The selected piece is framed in brackets and its destinations in parentheses.
#[derive(Debug, Constructor)]
pub struct Diagram<'a> {
    board: &'a Board,
    selection: Option<Selection>,
}

const FILES: &str = "    a   b   c   d   e   f   g   h";
const RULE: &str = "  +---+---+---+---+---+---+---+---+";

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", FILES)?;
        writeln!(f, "{}", RULE)?;

        for sq in Square::iter() {
            let rank = Square::SIDE - sq.row();
            if sq.col() == 0 {
                write!(f, "{} |", rank)?;
            }

            let glyph = self.board[sq].map_or(' ', |p| p.glyph());
            match self.selection {
                Some(s) if s.square == sq => write!(f, "[{}]|", glyph)?,
                Some(s) if s.destinations.contains(sq) => write!(f, "({})|", glyph)?,
                _ => write!(f, " {} |", glyph)?,
            }

            if sq.col() == Square::SIDE - 1 {
                writeln!(f, " {}", rank)?;
                writeln!(f, "{}", RULE)?;
            }
        }

        write!(f, "{}", FILES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::game::Game;

    #[test]
    fn diagram_draws_the_initial_position() {
        let board = Board::initial();
        let diagram = Diagram::new(&board, None).to_string();
        let lines: Vec<_> = diagram.lines().collect();

        assert_eq!(lines.len(), 19);
        assert_eq!(lines[0], FILES);
        assert_eq!(lines[2], "8 | ♜ | ♞ | ♝ | ♛ | ♚ | ♝ | ♞ | ♜ | 8");
        assert_eq!(lines[8], "5 |   |   |   |   |   |   |   |   | 5");
        assert_eq!(lines[16], "1 | ♖ | ♘ | ♗ | ♕ | ♔ | ♗ | ♘ | ♖ | 1");
        assert_eq!(lines[18], FILES);
    }

    #[test]
    fn diagram_highlights_selection_and_destinations() {
        let mut game = Game::new();
        game.click("e2".parse().unwrap());

        let diagram = Diagram::new(game.board(), game.selection()).to_string();
        let lines: Vec<_> = diagram.lines().collect();

        assert_eq!(lines[10], "4 |   |   |   |   |( )|   |   |   | 4");
        assert_eq!(lines[12], "3 |   |   |   |   |( )|   |   |   | 3");
        assert_eq!(lines[14], "2 | ♙ | ♙ | ♙ | ♙ |[♙]| ♙ | ♙ | ♙ | 2");
    }
}
