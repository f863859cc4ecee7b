use serde::{Deserialize, Serialize};

use crate::match_file::traits::{InningsIndex, Team};
use crate::match_file::Innings;
use crate::util::{per_hundred, per_over};

/// Innings length the preset windows are written against.
pub const REFERENCE_OVERS: u32 = 20;

/// How a window moves when the innings is scheduled for more or fewer overs
/// than [`REFERENCE_OVERS`].
#[derive(Debug, Eq, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAnchor {
    /// Fixed positions from the first over.
    #[default]
    Start,
    /// Keeps its length and ends on the last scheduled over.
    End,
    /// Keeps its start and stretches its end with the innings.
    Between,
}

/// A fixed slice of an innings' overs, by position: `start..end`, zero-based.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub name: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub anchor: WindowAnchor,
}

impl PhaseWindow {
    pub fn new(name: &str, start: usize, end: usize) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
            anchor: WindowAnchor::Start,
        }
    }

    #[must_use]
    pub fn anchored(mut self, anchor: WindowAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn powerplay() -> Self {
        Self::new("powerplay", 0, 6)
    }

    pub fn middle() -> Self {
        Self::new("middle", 6, 15).anchored(WindowAnchor::Between)
    }

    /// The last five overs of the innings.
    pub fn death() -> Self {
        Self::new("death", 15, 20).anchored(WindowAnchor::End)
    }

    pub fn standard() -> Vec<Self> {
        vec![Self::powerplay(), Self::middle(), Self::death()]
    }

    /// Positions of this window in an innings of `scheduled` overs. Unknown
    /// lengths, as in first-class cricket, keep the written positions.
    #[must_use]
    pub fn resolve(&self, scheduled: Option<u32>) -> Self {
        let Some(scheduled) = scheduled else {
            return self.clone();
        };
        let scheduled = usize::try_from(scheduled).unwrap_or(usize::MAX);
        let reference = REFERENCE_OVERS as usize;
        let shift = |at: usize| at.saturating_add(scheduled).saturating_sub(reference);
        let (start, end) = match self.anchor {
            WindowAnchor::Start => (self.start, self.end),
            WindowAnchor::End => (shift(self.start), shift(self.end)),
            WindowAnchor::Between => (self.start, shift(self.end).max(self.start)),
        };
        Self {
            name: self.name.clone(),
            start,
            end,
            anchor: self.anchor,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct PhaseSummary {
    pub innings: InningsIndex,
    pub team: Team,
    pub window: String,
    /// Overs actually present in the window.
    pub overs: u32,
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    pub boundaries: u32,
    pub sixes: u32,
    pub dot_balls: u32,
    pub extras: u32,
    pub run_rate: f64,
    pub dot_ball_percentage: f64,
    /// Fours and sixes as a share of balls.
    pub boundary_percentage: f64,
}

/// Aggregates whatever overs of the window the innings has; a short innings
/// simply yields fewer overs.
pub fn phase_summary(
    innings: &Innings,
    index: InningsIndex,
    window: &PhaseWindow,
) -> PhaseSummary {
    let len = innings.overs.len();
    let start = window.start.min(len);
    let end = window.end.clamp(start, len);
    let slice = &innings.overs[start..end];

    let mut summary = PhaseSummary {
        innings: index,
        team: innings.team.clone(),
        window: window.name.clone(),
        overs: u32::try_from(slice.len()).unwrap_or(u32::MAX),
        balls: 0,
        runs: 0,
        wickets: 0,
        boundaries: 0,
        sixes: 0,
        dot_balls: 0,
        extras: 0,
        run_rate: 0.0,
        dot_ball_percentage: 0.0,
        boundary_percentage: 0.0,
    };
    for ball in slice.iter().flat_map(|o| o.balls(index)) {
        let d = ball.delivery;
        summary.balls += 1;
        summary.runs += d.runs.total;
        summary.extras += d.runs.extras;
        summary.wickets += u32::try_from(d.wickets.len()).unwrap_or(u32::MAX);
        if d.is_four() {
            summary.boundaries += 1;
        }
        if d.is_six() {
            summary.sixes += 1;
        }
        if d.is_dot() {
            summary.dot_balls += 1;
        }
    }
    summary.run_rate = per_over(summary.runs, summary.balls);
    summary.dot_ball_percentage = per_hundred(summary.dot_balls, summary.balls);
    summary.boundary_percentage = per_hundred(summary.boundaries + summary.sixes, summary.balls);
    summary
}
