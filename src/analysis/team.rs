use serde::Serialize;

use crate::match_file::traits::{InningsIndex, Team};
use crate::match_file::Innings;
use crate::util::{per_over, ratio};

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct TeamStats {
    pub team: Team,
    pub innings: InningsIndex,
    pub total_runs: u32,
    pub total_wickets: u32,
    pub total_overs: u32,
    pub balls: u32,
    pub extras: u32,
    pub run_rate: f64,
    pub boundaries: u32,
    pub sixes: u32,
}

impl TeamStats {
    /// Score in the usual runs/wickets form.
    pub fn scoreline(&self) -> String {
        format!("{}/{}", self.total_runs, self.total_wickets)
    }
}

pub fn team_stats(innings: &Innings, index: InningsIndex) -> TeamStats {
    let mut stats = TeamStats {
        team: innings.team.clone(),
        innings: index,
        total_runs: 0,
        total_wickets: 0,
        total_overs: u32::try_from(innings.overs.len()).unwrap_or(u32::MAX),
        balls: 0,
        extras: 0,
        run_rate: 0.0,
        boundaries: 0,
        sixes: 0,
    };
    for ball in innings.balls(index) {
        let d = ball.delivery;
        stats.total_runs += d.runs.total;
        stats.total_wickets += u32::try_from(d.wickets.len()).unwrap_or(u32::MAX);
        stats.extras += d.runs.extras;
        stats.balls += 1;
        if d.is_four() {
            stats.boundaries += 1;
        }
        if d.is_six() {
            stats.sixes += 1;
        }
    }
    stats.run_rate = per_over(stats.total_runs, stats.balls);
    stats
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct BoundaryAnalysis {
    pub team: Team,
    pub innings: InningsIndex,
    pub fours: u32,
    pub sixes: u32,
    pub boundary_runs: u32,
    /// Share of the innings total scored in boundaries, as a percentage.
    pub boundary_percentage: f64,
    pub balls_per_boundary: f64,
}

pub fn boundary_analysis(innings: &Innings, index: InningsIndex) -> BoundaryAnalysis {
    let stats = team_stats(innings, index);
    let boundary_runs = stats.boundaries * 4 + stats.sixes * 6;
    BoundaryAnalysis {
        boundary_percentage: ratio(boundary_runs, stats.total_runs) * 100.0,
        balls_per_boundary: ratio(stats.balls, stats.boundaries + stats.sixes),
        team: stats.team,
        innings: index,
        fours: stats.boundaries,
        sixes: stats.sixes,
        boundary_runs,
    }
}
