use crate::{diagram::Diagram, io::Io, player::Player};
use derive_more::{Display, Error};
use lib::chess::{Color, Move, Outcome, Square};
use lib::game::{Game, Transition};
use std::{io, num::NonZeroU32, str::FromStr};
use tokio::time::sleep;
use tracing::{field::display, info, instrument, warn, Span};

/// A line entered by a human player.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Command {
    /// Click a square given in algebraic notation.
    Click(Square),
    /// Click at pixel coordinates `(x, y)` on the canvas.
    Pixel(i64, i64),
    /// Play a whole move.
    Play(Move),
    /// Start over from the initial position.
    Reset,
    /// Leave the game.
    Quit,
}

/// The reason why parsing [`Command`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "expected a square like `e2`, a move like `e2e4`, pixel coordinates `x y`, `reset` or `quit`")]
struct ParseCommandError;

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<_> = s.split_whitespace().collect();

        match words[..] {
            ["reset"] => Ok(Command::Reset),
            ["quit"] => Ok(Command::Quit),
            [w] if w.len() == 2 => w.parse().map(Command::Click).map_err(|_| ParseCommandError),
            [w] => w.parse().map(Command::Play).map_err(|_| ParseCommandError),
            [x, y] => match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) => Ok(Command::Pixel(x, y)),
                _ => Err(ParseCommandError),
            },
            _ => Err(ParseCommandError),
        }
    }
}

/// Drives a [`Game`] between two [`Player`]s over an [`Io`] interface.
#[derive(Debug)]
pub struct Session<I> {
    io: I,
    white: Player,
    black: Player,
    canvas: NonZeroU32,
}

impl<I: Io + Send> Session<I> {
    /// Constructs a [`Session`] where pixel clicks refer to a square canvas `canvas` pixels wide.
    pub fn new(io: I, white: Player, black: Player, canvas: NonZeroU32) -> Self {
        Session {
            io,
            white,
            black,
            canvas,
        }
    }

    /// The `(row, col)` under the pixel `(x, y)`, possibly off the board.
    fn square_at(&self, x: i64, y: i64) -> (isize, isize) {
        let side = Square::SIDE as i64;
        let canvas = i64::from(self.canvas.get());
        let row = y.saturating_mul(side).div_euclid(canvas);
        let col = x.saturating_mul(side).div_euclid(canvas);
        (row as isize, col as isize)
    }

    /// Plays until the game is over, a player quits or runs out of moves.
    #[instrument(level = "debug", skip(self, game), err, fields(outcome))]
    pub async fn run(mut self, game: &mut Game) -> io::Result<Option<Outcome>> {
        loop {
            if let Some(o) = game.outcome() {
                Span::current().record("outcome", display(o));
                self.io.send(&format!("game over: {}", o)).await?;
                self.io.flush().await?;
                return Ok(Some(o));
            }

            let turn = game.turn();
            let player = match turn {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };

            match player {
                Player::Random(ai, delay) => {
                    sleep(*delay).await;
                    match ai.play(game) {
                        Some(p) => self.io.send(&format!("{} played {}", turn, p.m)).await?,
                        None => {
                            warn!(%turn, "no move available");
                            self.io.send(&format!("no move available for {}", turn)).await?;
                            self.io.flush().await?;
                            return Ok(None);
                        }
                    }
                }

                Player::Human => {
                    let diagram = Diagram::new(game.board(), game.selection());
                    self.io.send(&diagram.to_string()).await?;
                    self.io.send(&format!("{} to move:", turn)).await?;
                    self.io.flush().await?;

                    let line = self.io.recv().await?;
                    let transition = match line.parse() {
                        Err(e) => {
                            self.io.send(&format!("{}", e)).await?;
                            continue;
                        }

                        Ok(Command::Quit) => {
                            info!(%turn, "player quit");
                            return Ok(None);
                        }

                        Ok(Command::Reset) => {
                            game.reset();
                            self.io.send("new game").await?;
                            continue;
                        }

                        Ok(Command::Click(sq)) => game.click(sq),

                        Ok(Command::Pixel(x, y)) => {
                            let (row, col) = self.square_at(x, y);
                            game.select_or_move(row, col)
                        }

                        Ok(Command::Play(m)) => match game.play(m) {
                            Ok(p) => Transition::Moved(p),
                            Err(e) => {
                                self.io.send(&format!("{}", e)).await?;
                                continue;
                            }
                        },
                    };

                    if let Some(msg) = describe(turn, transition) {
                        self.io.send(&msg).await?;
                    }
                }
            }
        }
    }
}

/// A human readable account of a [`Transition`].
fn describe(turn: Color, t: Transition) -> Option<String> {
    match t {
        Transition::Ignored => None,
        Transition::Selected(s) | Transition::Reselected(_, s) => {
            let destinations: Vec<_> = s.destinations.iter().map(|sq| sq.to_string()).collect();
            Some(format!(
                "selected {} on {}, destinations: [{}]",
                s.piece.glyph(),
                s.square,
                destinations.join(", ")
            ))
        }
        Transition::Deselected(sq) => Some(format!("deselected {}", sq)),
        Transition::Moved(p) => Some(match p.captured {
            None => format!("{} played {}", turn, p.m),
            Some(c) => format!("{} played {}, capturing {}", turn, p.m, c.glyph()),
        }),
    }
}
