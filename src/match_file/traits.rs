use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub type Person = String;
pub type Player = Person;
pub type Batter = Player;
pub type Bowler = Player;
pub type Fielder = Player;
pub type Team = String;

/// Zero-based over number as stored in the source record.
pub type OverNumber = u32;
/// Zero-based position of an innings within its match.
pub type InningsIndex = usize;

#[derive(
    Debug, Eq, PartialEq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize, Display,
    EnumString, AsRefStr,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum MatchType {
    T20,
    IT20,
    ODI,
    ODM,
    Test,
    MDM,
    #[serde(other)]
    Other,
}

impl MatchType {
    /// Scheduled overs per innings for limited-overs formats.
    pub const fn scheduled_overs(self) -> Option<u32> {
        match self {
            Self::T20 | Self::IT20 => Some(20),
            Self::ODI | Self::ODM => Some(50),
            Self::Test | Self::MDM | Self::Other => None,
        }
    }
}

#[derive(
    Debug, Eq, PartialEq, Copy, Clone, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Field,
}
