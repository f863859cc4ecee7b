use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::match_file::delivery::Delivery;
use crate::match_file::traits::{
    Batter, Bowler, InningsIndex, MatchType, OverNumber, Player, Team, TossDecision,
};

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub runs: Option<u32>,
    pub wickets: Option<u32>,
    pub innings: Option<u32>,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    pub winner: Option<Team>,
    pub by: Option<Margin>,
    /// "tie", "draw" or "no result" when there is no winner.
    pub result: Option<String>,
    pub method: Option<String>,
    pub eliminator: Option<Team>,
}

impl Outcome {
    pub fn summary(&self) -> String {
        let Some(winner) = &self.winner else {
            return match self.result.as_deref() {
                Some("tie") => match &self.eliminator {
                    Some(e) => format!("Match tied ({e} won the eliminator)"),
                    None => String::from("Match tied"),
                },
                Some("draw") => String::from("Match drawn"),
                Some("no result") | None => String::from("No result"),
                Some(other) => other.to_string(),
            };
        };
        let margin = self.by.as_ref().and_then(|by| {
            let innings = by.innings.map(|_| "an innings and ").unwrap_or_default();
            match (by.runs, by.wickets) {
                (Some(r), _) => Some(format!("{innings}{r} run{}", plural(r))),
                (None, Some(w)) => Some(format!("{w} wicket{}", plural(w))),
                (None, None) => None,
            }
        });
        let method = self
            .method
            .as_ref()
            .map(|m| format!(" ({m})"))
            .unwrap_or_default();
        match margin {
            Some(m) => format!("{winner} won by {m}{method}"),
            None => format!("{winner} won{method}"),
        }
    }
}

const fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct Toss {
    pub winner: Team,
    pub decision: TossDecision,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInfo {
    pub name: Option<String>,
    pub match_number: Option<u32>,
    pub stage: Option<String>,
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchInfo {
    pub teams: Vec<Team>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub dates: Vec<NaiveDate>,
    pub outcome: Option<Outcome>,
    pub toss: Option<Toss>,
    pub match_type: Option<MatchType>,
    pub player_of_match: Vec<Player>,
    pub event: Option<EventInfo>,
    pub overs: Option<u32>,
    pub gender: Option<String>,
    pub players: HashMap<Team, Vec<Player>>,
}

impl MatchInfo {
    /// Overs per innings: the recorded limit, else the format's usual length.
    pub fn scheduled_overs(&self) -> Option<u32> {
        self.overs
            .or_else(|| self.match_type.and_then(MatchType::scheduled_overs))
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Target {
    pub runs: Option<u32>,
    pub overs: Option<f64>,
}

// f64 overs never hold NaN when read from JSON.
impl Eq for Target {}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Over {
    pub over: OverNumber,
    pub deliveries: Vec<Delivery>,
}

impl Over {
    /// The 1-based over number shown to readers.
    pub const fn number(&self) -> u32 {
        self.over + 1
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Innings {
    pub team: Team,
    pub overs: Vec<Over>,
    pub target: Option<Target>,
    pub super_over: bool,
}

/// A delivery whose batter and bowler are both known, together with its
/// position in the innings.
#[derive(Debug, Copy, Clone)]
pub struct Ball<'a> {
    pub innings: InningsIndex,
    pub over: OverNumber,
    /// Zero-based position within the over, counting every delivery.
    pub index_in_over: usize,
    pub batter: &'a Batter,
    pub bowler: &'a Bowler,
    pub non_striker: &'a Player,
    pub delivery: &'a Delivery,
}

impl<'a> Ball<'a> {
    fn from_delivery(
        innings: InningsIndex,
        over: OverNumber,
        index_in_over: usize,
        delivery: &'a Delivery,
    ) -> Option<Self> {
        match (&delivery.batter, &delivery.bowler) {
            (Some(batter), Some(bowler)) if !batter.is_empty() && !bowler.is_empty() => {
                Some(Self {
                    innings,
                    over,
                    index_in_over,
                    batter,
                    bowler,
                    non_striker: &delivery.non_striker,
                    delivery,
                })
            }
            _ => {
                debug!(
                    "Skipping delivery {} of over {} in innings {}: missing batter or bowler",
                    index_in_over + 1,
                    over + 1,
                    innings + 1
                );
                None
            }
        }
    }

    /// 1-based over number.
    pub const fn over_number(&self) -> u32 {
        self.over + 1
    }

    /// 1-based ball number within the over.
    pub const fn ball_number(&self) -> usize {
        self.index_in_over + 1
    }
}

impl Over {
    pub fn balls(&self, innings: InningsIndex) -> impl Iterator<Item = Ball<'_>> + '_ {
        let over = self.over;
        self.deliveries
            .iter()
            .enumerate()
            .filter_map(move |(i, d)| Ball::from_delivery(innings, over, i, d))
    }
}

impl Innings {
    pub fn balls(&self, innings: InningsIndex) -> impl Iterator<Item = Ball<'_>> + '_ {
        self.overs.iter().flat_map(move |o| o.balls(innings))
    }

    /// Runs off every delivery the walk keeps.
    pub fn total_runs(&self) -> u32 {
        self.overs
            .iter()
            .flat_map(|o| &o.deliveries)
            .filter(|d| d.is_attributed())
            .map(|d| d.runs.total)
            .sum()
    }

    fn unattributed_deliveries(&self) -> usize {
        self.overs
            .iter()
            .flat_map(|o| &o.deliveries)
            .filter(|d| !d.is_attributed())
            .count()
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Match {
    pub info: MatchInfo,
    pub innings: Vec<Innings>,
}

impl Match {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .context("Failed to parse match record")
            .map(Self::warn_unattributed)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader)
            .context("Failed to parse match record")
            .map(Self::warn_unattributed)
    }

    fn warn_unattributed(self) -> Self {
        for (i, inn) in self.innings.iter().enumerate() {
            let skipped = inn.unattributed_deliveries();
            if skipped > 0 {
                warn!(
                    "{}: skipping {} deliveries without batter or bowler in innings {}",
                    self.title(),
                    skipped,
                    i + 1
                );
            }
        }
        self
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open match file {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to load match file {}", path.display()))
    }

    pub fn balls(&self) -> impl Iterator<Item = Ball<'_>> + '_ {
        self.innings
            .iter()
            .enumerate()
            .flat_map(|(i, inn)| inn.balls(i))
    }

    pub fn title(&self) -> String {
        match self.info.teams.as_slice() {
            [a, b, ..] => format!("{a} v {b}"),
            [a] => a.clone(),
            [] => String::from("Unknown match"),
        }
    }
}
