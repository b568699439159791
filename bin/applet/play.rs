use crate::{build::Build, io::Pipe, player::PlayerConfig, session::Session};
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::game::Game;
use std::num::NonZeroU32;
use tracing::{info, instrument};

/// A game between two players on the terminal.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The player with the white pieces.
    #[clap(short, long, default_value = "human()")]
    white: PlayerConfig,

    /// The player with the black pieces.
    #[clap(short, long, default_value = "human()")]
    black: PlayerConfig,

    /// The width in pixels of the canvas pixel clicks refer to.
    #[clap(short, long, default_value = "500")]
    canvas_size: NonZeroU32,
}

impl Default for Play {
    fn default() -> Self {
        Play::parse_from(["play"])
    }
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let white = self.white.build()?;
        let black = self.black.build()?;

        let mut game = Game::new();
        let session = Session::new(Pipe::stdio(), white, black, self.canvas_size);

        match session.run(&mut game).await? {
            Some(outcome) => info!(%outcome, winner = %outcome.winner()),
            None => info!("game interrupted"),
        }

        Ok(())
    }
}
