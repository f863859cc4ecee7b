use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::analysis::accumulator::PlayerMap;
use crate::match_file::traits::{Bowler, InningsIndex};
use crate::match_file::Innings;
use crate::util::{overs_notation, ratio};

pub const DEFAULT_MIN_SPELL_BALLS: u32 = 6;

const POWERPLAY_LAST_START: u32 = 6;
const POWERPLAY_LAST_END: u32 = 10;
const DEATH_FIRST_OVER: u32 = 16;

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
pub enum MatchPhase {
    Powerplay,
    Middle,
    Death,
}

impl MatchPhase {
    /// Classifies a spell from its first and last 1-based overs.
    pub const fn classify(start_over: u32, end_over: u32) -> Self {
        if start_over <= POWERPLAY_LAST_START && end_over <= POWERPLAY_LAST_END {
            Self::Powerplay
        } else if end_over >= DEATH_FIRST_OVER || start_over >= DEATH_FIRST_OVER {
            Self::Death
        } else {
            Self::Middle
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize)]
pub struct OverFigures {
    /// 1-based.
    pub over: u32,
    pub runs: u32,
    pub wickets: u32,
    pub balls: u32,
}

#[derive(Debug, Eq, PartialEq, Clone, Default)]
struct SpellTally {
    runs: u32,
    balls: u32,
    dot_balls: u32,
    boundaries: u32,
    wickets: u32,
    maidens: u32,
    overs: Vec<OverFigures>,
}

impl SpellTally {
    fn finalize(self, bowler: Bowler, innings: InningsIndex) -> BowlingSpell {
        let start_over = self.overs.first().map_or(0, |o| o.over);
        let end_over = self.overs.last().map_or(0, |o| o.over);
        let overs = overs_notation(self.balls);
        BowlingSpell {
            innings,
            bowler,
            overs,
            balls: self.balls,
            runs: self.runs,
            wickets: self.wickets,
            economy: ratio(self.runs, overs),
            start_over,
            end_over,
            phase: MatchPhase::classify(start_over, end_over),
            dot_balls: self.dot_balls,
            boundaries: self.boundaries,
            maidens: self.maidens,
            over_figures: self.overs,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct BowlingSpell {
    pub innings: InningsIndex,
    pub bowler: Bowler,
    /// X.Y notation.
    pub overs: f64,
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    /// Runs per notated over.
    pub economy: f64,
    pub start_over: u32,
    pub end_over: u32,
    pub phase: MatchPhase,
    pub dot_balls: u32,
    pub boundaries: u32,
    pub maidens: u32,
    pub over_figures: Vec<OverFigures>,
}

impl BowlingSpell {
    /// Figures in the usual wickets-runs form.
    pub fn figures(&self) -> String {
        format!("{}-{}", self.wickets, self.runs)
    }
}

/// Attributes each over, whole, to the bowler of its first delivery and
/// builds one spell per bowler who reached `min_balls`. Spells are ordered by
/// wickets, then by economy.
pub fn bowling_spells(innings: &Innings, index: InningsIndex, min_balls: u32) -> Vec<BowlingSpell> {
    let mut map: PlayerMap<SpellTally> = PlayerMap::new();
    for over in &innings.overs {
        let mut balls = over.balls(index).peekable();
        let Some(main_bowler) = balls.peek().map(|b| b.bowler) else {
            continue;
        };
        let tally = map.entry_or_default(main_bowler);
        let mut figures = OverFigures {
            over: over.number(),
            runs: 0,
            wickets: 0,
            balls: 0,
        };
        for ball in balls {
            let d = ball.delivery;
            figures.runs += d.runs.total;
            figures.wickets += u32::try_from(d.wickets.len()).unwrap_or(u32::MAX);
            figures.balls += 1;
            if d.is_dot() {
                tally.dot_balls += 1;
            }
            if d.is_boundary() {
                tally.boundaries += 1;
            }
        }
        tally.runs += figures.runs;
        tally.wickets += figures.wickets;
        tally.balls += figures.balls;
        if figures.runs == 0 {
            tally.maidens += 1;
        }
        tally.overs.push(figures);
    }
    map.into_entries()
        .filter(|(_, tally)| tally.balls >= min_balls)
        .map(|(bowler, tally)| tally.finalize(bowler, index))
        .sorted_by(|a, b| {
            b.wickets
                .cmp(&a.wickets)
                .then_with(|| a.economy.total_cmp(&b.economy))
        })
        .collect()
}
