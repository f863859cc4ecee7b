use itertools::Itertools;
use serde::Serialize;

use crate::analysis::accumulator::PlayerMap;
use crate::match_file::traits::Batter;
use crate::match_file::Ball;
use crate::util::{per_hundred, ratio};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Default)]
struct BattingTally {
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    dismissals: u32,
}

impl BattingTally {
    fn update(&mut self, ball: &Ball) {
        let d = ball.delivery;
        self.runs += d.runs.batter;
        // Every delivery faced counts, wides included.
        self.balls += 1;
        if d.is_four() {
            self.fours += 1;
        }
        if d.is_six() {
            self.sixes += 1;
        }
    }

    fn finalize(self, name: Batter) -> PlayerBattingStats {
        PlayerBattingStats {
            name,
            runs: self.runs,
            balls: self.balls,
            boundaries: self.fours,
            sixes: self.sixes,
            dismissals: self.dismissals,
            strike_rate: per_hundred(self.runs, self.balls),
            // A batter who was never dismissed averages their run total.
            average: if self.dismissals > 0 {
                ratio(self.runs, self.dismissals)
            } else {
                f64::from(self.runs)
            },
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PlayerBattingStats {
    pub name: Batter,
    pub runs: u32,
    pub balls: u32,
    /// Fours.
    pub boundaries: u32,
    pub sixes: u32,
    pub dismissals: u32,
    pub strike_rate: f64,
    pub average: f64,
}

impl PlayerBattingStats {
    pub const fn is_not_out(&self) -> bool {
        self.dismissals == 0
    }
}

/// Folds deliveries into batting figures for every batter seen, ordered by runs.
pub fn batting_figures<'a>(balls: impl IntoIterator<Item = Ball<'a>>) -> Vec<PlayerBattingStats> {
    let mut map: PlayerMap<BattingTally> = PlayerMap::new();
    for ball in balls {
        map.entry_or_default(ball.batter).update(&ball);
        // Dismissals go to the player named out, who may be the non-striker.
        for w in ball.delivery.wickets.iter().filter(|w| !w.player_out.is_empty()) {
            map.entry_or_default(&w.player_out).dismissals += 1;
        }
    }
    map.into_entries()
        .map(|(name, tally)| tally.finalize(name))
        .sorted_by(|a, b| b.runs.cmp(&a.runs))
        .collect()
}

pub fn top_batters<'a>(
    balls: impl IntoIterator<Item = Ball<'a>>,
    limit: usize,
) -> Vec<PlayerBattingStats> {
    let mut figures = batting_figures(balls);
    figures.truncate(limit);
    figures
}
