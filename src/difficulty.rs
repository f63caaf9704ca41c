use enum_map::Enum;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// A selectable difficulty tier.
///
/// A tier is only a name; everything that actually varies between tiers
/// lives in the [`Profile`] it resolves to.
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Width of the longest tier name, for the menu selector
    pub(crate) const DISPLAY_WIDTH: u16 = 6;

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Returns the tunables for this tier
    pub(crate) fn profile(self) -> Profile {
        match self {
            Difficulty::Easy => Profile {
                growth: 1,
                bombs: 1,
                bomb_lifetime: Duration::from_millis(15000),
                warning_lead: Duration::from_millis(5000),
                food_points: 10,
                initial_interval: Duration::from_millis(200),
                speed_step: Duration::from_millis(4),
            },
            Difficulty::Normal => Profile {
                growth: 2,
                bombs: 2,
                bomb_lifetime: Duration::from_millis(10000),
                warning_lead: Duration::from_millis(3000),
                food_points: 15,
                initial_interval: Duration::from_millis(150),
                speed_step: Duration::from_millis(8),
            },
            Difficulty::Hard => Profile {
                growth: 3,
                bombs: 3,
                bomb_lifetime: Duration::from_millis(7000),
                warning_lead: Duration::from_millis(2000),
                food_points: 20,
                initial_interval: Duration::from_millis(100),
                speed_step: Duration::from_millis(12),
            },
        }
    }

    /// Returns a one-line description of the tier for the main menu
    pub(crate) fn summary(self) -> String {
        let profile = self.profile();
        let growth = profile.growth;
        let bombs = profile.bombs;
        let plural = if bombs == 1 { "" } else { "s" };
        let fuse = profile.bomb_lifetime.as_secs();
        format!("Grows +{growth} per food, {bombs} bomb{plural}, {fuse}s fuse")
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Difficulty, ParseDifficultyError> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error(r#"invalid difficulty; expected "easy", "normal", or "hard""#)]
pub(crate) struct ParseDifficultyError;

/// The tunables of one difficulty tier, fixed for the whole of a game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Profile {
    /// Number of cells the snake gains by eating one food
    pub(crate) growth: usize,

    /// Number of bombs kept on the board at once
    pub(crate) bombs: usize,

    /// How long a bomb stays on the board, measured on the session clock
    pub(crate) bomb_lifetime: Duration,

    /// Length of the blinking warning phase at the end of a bomb's lifetime
    pub(crate) warning_lead: Duration,

    /// Points awarded per food eaten
    pub(crate) food_points: u32,

    /// Time between snake movements at the start of a game
    pub(crate) initial_interval: Duration,

    /// How much faster the snake gets with each food eaten
    pub(crate) speed_step: Duration,
}
