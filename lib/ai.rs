use crate::chess::Move;
use crate::game::{Game, Played};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::{field::display, instrument, Span};

/// A computer player that picks uniformly among every move available to the side to move.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Random {
    /// Constructs [`Random`] seeded from the operating system.
    pub fn new() -> Self {
        Random {
            rng: StdRng::from_entropy(),
        }
    }

    /// Constructs [`Random`] with a fixed seed, so its choices are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Random {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks one of the moves available in `game`, if any.
    pub fn pick(&mut self, game: &Game) -> Option<Move> {
        let moves: Vec<_> = game.moves().collect();
        moves.choose(&mut self.rng).copied()
    }

    /// Picks one of the moves available in `game` and plays it.
    ///
    /// Returns `None` and leaves `game` untouched if no move is available.
    #[instrument(level = "debug", skip(self, game), fields(turn = %game.turn(), m))]
    pub fn play(&mut self, game: &mut Game) -> Option<Played> {
        let m = self.pick(game)?;
        Span::current().record("m", display(m));

        let played = game.play(m);
        debug_assert!(played.is_ok(), "{:?}", played);
        played.ok()
    }
}
