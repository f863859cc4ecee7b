use std::collections::HashSet;

use itertools::Itertools;
use serde::Serialize;

use crate::analysis::accumulator::PlayerMap;
use crate::match_file::traits::{Bowler, InningsIndex, OverNumber};
use crate::match_file::Ball;
use crate::util::{per_over, ratio};

#[derive(Debug, Eq, PartialEq, Clone, Default)]
struct BowlingTally {
    runs: u32,
    balls: u32,
    wickets: u32,
    extras: u32,
    dot_balls: u32,
    overs: HashSet<(InningsIndex, OverNumber)>,
}

impl BowlingTally {
    fn update(&mut self, ball: &Ball) {
        let d = ball.delivery;
        self.runs += d.runs.total;
        self.balls += 1;
        self.extras += d.runs.extras;
        self.wickets += u32::try_from(d.wickets.len()).unwrap_or(u32::MAX);
        if d.is_dot() {
            self.dot_balls += 1;
        }
        self.overs.insert((ball.innings, ball.over));
    }

    fn finalize(self, name: Bowler) -> PlayerBowlingStats {
        PlayerBowlingStats {
            name,
            runs: self.runs,
            balls: self.balls,
            wickets: self.wickets,
            extras: self.extras,
            dot_balls: self.dot_balls,
            economy: per_over(self.runs, self.balls),
            average: ratio(self.runs, self.wickets),
            overs: u32::try_from(self.overs.len()).unwrap_or(u32::MAX),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PlayerBowlingStats {
    pub name: Bowler,
    pub runs: u32,
    pub balls: u32,
    pub wickets: u32,
    pub extras: u32,
    pub dot_balls: u32,
    pub economy: f64,
    pub average: f64,
    /// Distinct overs in which the bowler delivered at least one ball.
    pub overs: u32,
}

/// Folds deliveries into bowling figures for every bowler seen, ordered by wickets.
pub fn bowling_figures<'a>(balls: impl IntoIterator<Item = Ball<'a>>) -> Vec<PlayerBowlingStats> {
    let mut map: PlayerMap<BowlingTally> = PlayerMap::new();
    for ball in balls {
        map.entry_or_default(ball.bowler).update(&ball);
    }
    map.into_entries()
        .map(|(name, tally)| tally.finalize(name))
        .sorted_by(|a, b| b.wickets.cmp(&a.wickets))
        .collect()
}

pub fn top_bowlers<'a>(
    balls: impl IntoIterator<Item = Ball<'a>>,
    limit: usize,
) -> Vec<PlayerBowlingStats> {
    let mut figures = bowling_figures(balls);
    figures.truncate(limit);
    figures
}
