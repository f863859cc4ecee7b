use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::analysis::batting::PlayerBattingStats;
use crate::analysis::bowling::PlayerBowlingStats;
use crate::analysis::fall_of_wickets::FallOfWicket;
use crate::analysis::momentum::MomentumCurve;
use crate::analysis::partnership::Partnership;
use crate::analysis::phase::PhaseSummary;
use crate::analysis::spell::BowlingSpell;
use crate::match_file::traits::{InningsIndex, Team};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    pub explosive_strike_rate: f64,
    pub min_balls_for_strike_rate: u32,
    pub economical_economy: f64,
    pub min_overs_for_economy: u32,
    pub fifty_partnership: u32,
    pub century_partnership: u32,
    pub collapse_wickets: usize,
    pub collapse_runs: u32,
    pub min_maidens: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            explosive_strike_rate: 150.0,
            min_balls_for_strike_rate: 10,
            economical_economy: 4.0,
            min_overs_for_economy: 3,
            fifty_partnership: 50,
            century_partnership: 100,
            collapse_wickets: 3,
            collapse_runs: 20,
            min_maidens: 2,
        }
    }
}

/// Declared in display priority order.
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
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InsightCategory {
    TopScorer,
    BestBowling,
    CenturyPartnership,
    FiftyPartnership,
    ExplosiveBatting,
    EconomicalBowling,
    Collapse,
    MomentumSwing,
    PowerplayLeader,
    MaidenSpell,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub headline: String,
    pub value: f64,
}

impl Insight {
    fn new(category: InsightCategory, headline: String, value: f64) -> Self {
        Self {
            category,
            headline,
            value,
        }
    }

    /// Larger is more notable within a category.
    fn salience(&self) -> f64 {
        match self.category {
            InsightCategory::EconomicalBowling | InsightCategory::Collapse => -self.value,
            _ => self.value,
        }
    }
}

/// Everything the summarizer reads. It performs no delivery-level work of its own.
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    /// Batting team of each innings, by index.
    pub teams: &'a [Team],
    pub batting: &'a [PlayerBattingStats],
    pub bowling: &'a [PlayerBowlingStats],
    pub partnerships: &'a [Partnership],
    pub fall_of_wickets: &'a [FallOfWicket],
    pub spells: &'a [BowlingSpell],
    pub powerplays: &'a [PhaseSummary],
    pub momentum: &'a MomentumCurve,
}

impl<'a> InsightInputs<'a> {
    fn team(&self, innings: InningsIndex) -> &'a str {
        self.teams.get(innings).map_or("Unknown", String::as_str)
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn top_scorer(inputs: &InsightInputs) -> Option<Insight> {
    inputs.batting.iter().max_by_key(|b| b.runs).filter(|b| b.runs > 0).map(|b| {
        Insight::new(
            InsightCategory::TopScorer,
            format!("{} top-scored with {} off {} balls", b.name, b.runs, b.balls),
            f64::from(b.runs),
        )
    })
}

fn best_bowling(inputs: &InsightInputs) -> Option<Insight> {
    inputs
        .bowling
        .iter()
        .filter(|b| b.wickets > 0)
        .min_by(|a, b| b.wickets.cmp(&a.wickets).then(a.runs.cmp(&b.runs)))
        .map(|b| {
            Insight::new(
                InsightCategory::BestBowling,
                format!("{} returned the best figures of {}/{}", b.name, b.wickets, b.runs),
                f64::from(b.wickets),
            )
        })
}

fn explosive_batting<'a>(
    inputs: InsightInputs<'a>,
    t: &'a InsightThresholds,
) -> impl Iterator<Item = Insight> + 'a {
    inputs
        .batting
        .iter()
        .filter(move |b| {
            b.balls >= t.min_balls_for_strike_rate && b.strike_rate > t.explosive_strike_rate
        })
        .map(|b| {
            Insight::new(
                InsightCategory::ExplosiveBatting,
                format!(
                    "{} struck at {:.1} ({} off {})",
                    b.name, b.strike_rate, b.runs, b.balls
                ),
                b.strike_rate,
            )
        })
}

fn economical_bowling<'a>(
    inputs: InsightInputs<'a>,
    t: &'a InsightThresholds,
) -> impl Iterator<Item = Insight> + 'a {
    inputs
        .bowling
        .iter()
        .filter(move |b| b.overs >= t.min_overs_for_economy && b.economy < t.economical_economy)
        .map(|b| {
            Insight::new(
                InsightCategory::EconomicalBowling,
                format!(
                    "{} conceded only {:.2} an over across {} overs",
                    b.name, b.economy, b.overs
                ),
                b.economy,
            )
        })
}

fn big_partnerships<'a>(
    inputs: InsightInputs<'a>,
    t: &'a InsightThresholds,
) -> impl Iterator<Item = Insight> + 'a {
    inputs.partnerships.iter().filter_map(move |p| {
        let category = if p.runs >= t.century_partnership {
            InsightCategory::CenturyPartnership
        } else if p.runs >= t.fifty_partnership {
            InsightCategory::FiftyPartnership
        } else {
            return None;
        };
        Some(Insight::new(
            category,
            format!(
                "{} and {} added {} for the {} wicket for {}",
                p.batters[0],
                p.batters[1],
                p.runs,
                ordinal(p.wicket_index),
                inputs.team(p.innings)
            ),
            f64::from(p.runs),
        ))
    })
}

fn collapses(inputs: &InsightInputs, t: &InsightThresholds) -> Vec<Insight> {
    let mut found = vec![];
    if t.collapse_wickets == 0 {
        return found;
    }
    for (innings, fow) in &inputs
        .fall_of_wickets
        .iter()
        .group_by(|f| f.innings)
    {
        let fow = fow.collect_vec();
        let mut i = 0;
        while i + t.collapse_wickets <= fow.len() {
            let first = fow[i];
            let last = fow[i + t.collapse_wickets - 1];
            let score_before = first.score_at_fall - first.partnership_runs;
            let conceded = last.score_at_fall - score_before;
            if conceded <= t.collapse_runs {
                found.push(Insight::new(
                    InsightCategory::Collapse,
                    format!(
                        "{} lost {} wickets for {} runs, from {}/{} to {}/{}",
                        inputs.team(innings),
                        t.collapse_wickets,
                        conceded,
                        score_before,
                        first.wicket_number - 1,
                        last.score_at_fall,
                        last.wicket_number
                    ),
                    f64::from(conceded),
                ));
                i += t.collapse_wickets;
            } else {
                i += 1;
            }
        }
    }
    found
}

fn momentum_swing(inputs: &InsightInputs) -> Option<Insight> {
    inputs
        .momentum
        .biggest_swing()
        .filter(|o| o.net_change != 0.0)
        .map(|o| {
            Insight::new(
                InsightCategory::MomentumSwing,
                format!(
                    "Over {} of the {} innings ({}) swung momentum by {:+.1}",
                    o.over,
                    ordinal(u32::try_from(o.innings + 1).unwrap_or(u32::MAX)),
                    inputs.team(o.innings),
                    o.net_change
                ),
                o.net_change.abs(),
            )
        })
}

fn powerplay_leader(inputs: &InsightInputs) -> Option<Insight> {
    inputs
        .powerplays
        .iter()
        .filter(|p| p.balls > 0)
        .max_by(|a, b| a.run_rate.total_cmp(&b.run_rate))
        .map(|p| {
            Insight::new(
                InsightCategory::PowerplayLeader,
                format!(
                    "{} made {}/{} in the powerplay at {:.2} an over",
                    p.team, p.runs, p.wickets, p.run_rate
                ),
                p.run_rate,
            )
        })
}

fn maiden_spells<'a>(
    inputs: InsightInputs<'a>,
    t: &'a InsightThresholds,
) -> impl Iterator<Item = Insight> + 'a {
    inputs
        .spells
        .iter()
        .filter(move |s| s.maidens >= t.min_maidens)
        .map(|s| {
            Insight::new(
                InsightCategory::MaidenSpell,
                format!(
                    "{} bowled {} maidens in a {} spell of {}",
                    s.bowler,
                    s.maidens,
                    s.phase,
                    s.figures()
                ),
                f64::from(s.maidens),
            )
        })
}

/// Turns aggregator outputs into ranked highlights: by category priority,
/// then by how notable each one is.
pub fn summarize(inputs: &InsightInputs, thresholds: &InsightThresholds) -> Vec<Insight> {
    top_scorer(inputs)
        .into_iter()
        .chain(best_bowling(inputs))
        .chain(big_partnerships(*inputs, thresholds))
        .chain(explosive_batting(*inputs, thresholds))
        .chain(economical_bowling(*inputs, thresholds))
        .chain(collapses(inputs, thresholds))
        .chain(momentum_swing(inputs))
        .chain(powerplay_leader(inputs))
        .chain(maiden_spells(*inputs, thresholds))
        .sorted_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| b.salience().total_cmp(&a.salience()))
        })
        .collect()
}
