use serde::Serialize;

use crate::match_file::traits::{Bowler, InningsIndex};
use crate::match_file::Innings;
use crate::util::per_over;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct OverProgression {
    pub innings: InningsIndex,
    /// 1-based.
    pub over: u32,
    pub bowler: Option<Bowler>,
    pub runs: u32,
    pub wickets: u32,
    pub balls: u32,
    pub cumulative_runs: u32,
    pub cumulative_wickets: u32,
    /// Cumulative run rate at the end of the over.
    pub run_rate: f64,
}

pub fn over_by_over(innings: &Innings, index: InningsIndex) -> Vec<OverProgression> {
    let mut cumulative_runs = 0;
    let mut cumulative_wickets = 0;
    let mut cumulative_balls = 0;
    innings
        .overs
        .iter()
        .map(|over| {
            let mut row = OverProgression {
                innings: index,
                over: over.number(),
                bowler: None,
                runs: 0,
                wickets: 0,
                balls: 0,
                cumulative_runs: 0,
                cumulative_wickets: 0,
                run_rate: 0.0,
            };
            for ball in over.balls(index) {
                if row.bowler.is_none() {
                    row.bowler = Some(ball.bowler.clone());
                }
                row.runs += ball.delivery.runs.total;
                row.wickets += u32::try_from(ball.delivery.wickets.len()).unwrap_or(u32::MAX);
                row.balls += 1;
            }
            cumulative_runs += row.runs;
            cumulative_wickets += row.wickets;
            cumulative_balls += row.balls;
            row.cumulative_runs = cumulative_runs;
            row.cumulative_wickets = cumulative_wickets;
            row.run_rate = per_over(cumulative_runs, cumulative_balls);
            row
        })
        .collect()
}
