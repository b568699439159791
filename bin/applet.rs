use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod inspect;
mod play;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Inspect(inspect::Inspect),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => Ok(a.execute().await?),
            Applet::Inspect(a) => Ok(a.execute().await?),
        }
    }
}
