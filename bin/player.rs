use crate::build::Build;
use derive_more::{Display, Error, From};
use lib::ai::Random;
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr, time::Duration};

/// Someone or something that makes the moves of one side.
#[derive(Debug)]
pub enum Player {
    /// Moves are entered on the terminal.
    Human,
    /// Moves are picked at random after pausing to "think" for a while.
    Random(Random, Duration),
}

fn default_delay() -> Duration {
    Duration::from_secs(1)
}

/// Runtime configuration for a [`Player`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum PlayerConfig {
    Human(),
    Random {
        #[serde(default)]
        seed: Option<u64>,
        #[serde(default = "default_delay", with = "humantime_serde")]
        #[cfg_attr(test, strategy(proptest::strategy::Strategy::prop_map(0u64..3600000, Duration::from_millis)))]
        delay: Duration,
    },
}

impl fmt::Display for PlayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = ron::ser::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// The reason why parsing [`PlayerConfig`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse player configuration")]
pub struct ParseConfigError(ron::de::SpannedError);

impl FromStr for PlayerConfig {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}

impl Build for PlayerConfig {
    type Output = Player;
    type Error = Infallible;

    fn build(self) -> Result<Self::Output, Self::Error> {
        match self {
            PlayerConfig::Human() => Ok(Player::Human),
            PlayerConfig::Random { seed: None, delay } => Ok(Player::Random(Random::new(), delay)),
            PlayerConfig::Random {
                seed: Some(seed),
                delay,
            } => Ok(Player::Random(Random::with_seed(seed), delay)),
        }
    }
}
