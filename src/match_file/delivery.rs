use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::match_file::traits::{Batter, Bowler, Fielder, Player};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Runs {
    pub batter: u32,
    pub extras: u32,
    /// Usually `batter + extras`, but penalty runs can break that.
    pub total: u32,
    pub non_boundary: bool,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Extras {
    pub wides: u32,
    pub noballs: u32,
    pub legbyes: u32,
    pub byes: u32,
    pub penalty: u32,
}

impl Extras {
    pub const fn is_illegal_delivery(&self) -> bool {
        self.wides > 0 || self.noballs > 0
    }
}

#[derive(
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Copy,
    Clone,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WicketKind {
    Bowled,
    Caught,
    #[serde(rename = "caught and bowled")]
    #[strum(serialize = "caught and bowled")]
    CaughtAndBowled,
    Lbw,
    Stumped,
    #[serde(rename = "run out")]
    #[strum(serialize = "run out")]
    RunOut,
    #[serde(rename = "hit wicket")]
    #[strum(serialize = "hit wicket")]
    HitWicket,
    #[serde(rename = "retired hurt")]
    #[strum(serialize = "retired hurt")]
    RetiredHurt,
    #[serde(rename = "retired out")]
    #[strum(serialize = "retired out")]
    RetiredOut,
    #[serde(rename = "retired not out")]
    #[strum(serialize = "retired not out")]
    RetiredNotOut,
    #[serde(rename = "obstructing the field")]
    #[strum(serialize = "obstructing the field")]
    ObstructingTheField,
    #[serde(rename = "handled the ball")]
    #[strum(serialize = "handled the ball")]
    HandledTheBall,
    #[serde(rename = "hit the ball twice")]
    #[strum(serialize = "hit the ball twice")]
    HitTheBallTwice,
    #[serde(rename = "timed out")]
    #[strum(serialize = "timed out")]
    TimedOut,
    #[serde(other)]
    Other,
}

impl Default for WicketKind {
    fn default() -> Self {
        Self::Other
    }
}

impl WicketKind {
    pub const fn credited_to_bowler(self) -> bool {
        matches!(
            self,
            Self::Bowled
                | Self::Caught
                | Self::CaughtAndBowled
                | Self::Lbw
                | Self::Stumped
                | Self::HitWicket
        )
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WicketFielder {
    pub name: Option<Fielder>,
    pub substitute: bool,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wicket {
    pub player_out: Player,
    pub kind: WicketKind,
    pub fielders: Vec<WicketFielder>,
}

/// One bowled ball. `batter` and `bowler` are optional only so that a
/// corrupt record can be read and then skipped rather than failing the load.
#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Delivery {
    pub batter: Option<Batter>,
    pub bowler: Option<Bowler>,
    pub non_striker: Player,
    pub runs: Runs,
    pub extras: Extras,
    pub wickets: Vec<Wicket>,
}

impl Delivery {
    /// Both the batter and the bowler are named.
    pub fn is_attributed(&self) -> bool {
        let named = |p: &Option<Player>| p.as_deref().is_some_and(|p| !p.is_empty());
        named(&self.batter) && named(&self.bowler)
    }

    pub const fn is_legal(&self) -> bool {
        !self.extras.is_illegal_delivery()
    }

    pub const fn is_four(&self) -> bool {
        self.runs.batter == 4
    }

    pub const fn is_six(&self) -> bool {
        self.runs.batter == 6
    }

    pub const fn is_boundary(&self) -> bool {
        self.is_four() || self.is_six()
    }

    pub const fn is_dot(&self) -> bool {
        self.runs.total == 0
    }

    pub fn is_wicket(&self) -> bool {
        !self.wickets.is_empty()
    }

    pub fn dismisses(&self, player: &str) -> bool {
        self.wickets.iter().any(|w| w.player_out == player)
    }
}
