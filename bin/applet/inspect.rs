use crate::diagram::Diagram;
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::{destinations, Board, Square};
use lib::game::Selection;
use tracing::{instrument, warn};

/// Lists the squares the piece on a square may move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Inspect {
    /// The position in FEN piece placement notation.
    #[clap(short, long, default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")]
    board: Board,

    /// The square of the piece to inspect, e.g. `e2`.
    square: Square,
}

impl Inspect {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self.report() {
            None => warn!(square = %self.square, "no piece to inspect"),
            Some(report) => println!("{}", report),
        }

        Ok(())
    }

    /// The diagram with the piece highlighted followed by its destinations, if there is a piece.
    fn report(&self) -> Option<String> {
        let piece = self.board.get(self.square)?;
        let selection = Selection {
            square: self.square,
            piece,
            destinations: destinations(&self.board, self.square),
        };

        let whither: Vec<_> = selection.destinations.iter().map(|sq| sq.to_string()).collect();

        Some(format!(
            "{}\n{} {}: {}",
            Diagram::new(&self.board, Some(selection)),
            piece.glyph(),
            self.square,
            whither.join(" ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime;

    #[test]
    fn board_defaults_to_the_initial_position() {
        let inspect = Inspect::try_parse_from(["inspect", "e2"]).unwrap();
        assert_eq!(inspect.board, Board::initial());
        assert_eq!(inspect.square, "e2".parse().unwrap());
    }

    #[test]
    fn report_lists_destinations_of_the_piece() {
        let inspect = Inspect::try_parse_from(["inspect", "e2"]).unwrap();
        let report = inspect.report().unwrap();

        assert!(report.contains("[♙]"));
        assert_eq!(report.lines().last(), Some("♙ e2: e4 e3"));
    }

    #[test]
    fn report_lists_captures_on_a_custom_board() {
        let inspect = Inspect::try_parse_from(["inspect", "--board", "4k3/8/8/8/8/8/8/K3R3", "e1"]).unwrap();
        assert_eq!(
            inspect.report().unwrap().lines().last(),
            Some("♖ e1: e8 e7 e6 e5 e4 e3 e2 b1 c1 d1 f1 g1 h1")
        );
    }

    #[test]
    fn report_is_empty_for_an_empty_square() {
        let inspect = Inspect::try_parse_from(["inspect", "e4"]).unwrap();
        assert_eq!(inspect.report(), None);
    }

    #[test]
    fn execute_succeeds_whether_or_not_the_square_is_occupied() {
        let rt = runtime::Builder::new_multi_thread().build().unwrap();

        for square in ["e2", "e4"] {
            let inspect = Inspect::try_parse_from(["inspect", square]).unwrap();
            assert!(rt.block_on(inspect.execute()).is_ok());
        }
    }
}
