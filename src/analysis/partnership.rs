use serde::Serialize;

use crate::match_file::traits::{InningsIndex, Player};
use crate::match_file::{Ball, Innings};
use crate::util::per_over;

/// Partnerships closed without a wicket are only kept above this size.
const MIN_RUNS_EXCLUSIVE: u32 = 0;
const MIN_BALLS_EXCLUSIVE: u32 = 5;

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Partnership {
    pub innings: InningsIndex,
    pub batters: [Player; 2],
    pub runs: u32,
    pub balls: u32,
    /// 1-based position of this partnership among those emitted for the innings.
    pub wicket_index: u32,
    pub run_rate: f64,
    pub boundaries: u32,
    pub sixes: u32,
    pub ended_by_wicket: bool,
}

#[derive(Debug, Eq, PartialEq, Clone)]
struct OpenPartnership {
    batter1: Player,
    /// Unknown between a wicket and the incoming batter's first delivery.
    batter2: Option<Player>,
    runs: u32,
    balls: u32,
    boundaries: u32,
    sixes: u32,
}

impl OpenPartnership {
    fn seed(ball: &Ball) -> Self {
        Self::with_pair(ball.batter.clone(), Some(ball.non_striker.clone()))
    }

    const fn with_pair(batter1: Player, batter2: Option<Player>) -> Self {
        Self {
            batter1,
            batter2,
            runs: 0,
            balls: 0,
            boundaries: 0,
            sixes: 0,
        }
    }

    fn involves(&self, player: &str) -> bool {
        self.batter1 == player || self.batter2.as_deref() == Some(player)
    }

    fn add(&mut self, ball: &Ball) {
        let d = ball.delivery;
        self.runs += d.runs.total;
        self.balls += 1;
        if d.is_four() {
            self.boundaries += 1;
        }
        if d.is_six() {
            self.sixes += 1;
        }
    }

    const fn is_substantial(&self) -> bool {
        self.runs > MIN_RUNS_EXCLUSIVE || self.balls > MIN_BALLS_EXCLUSIVE
    }
}

/// Segments an innings' deliveries into partnerships.
///
/// A wicket always closes the current pair. A striker who is neither of the
/// tracked pair means a wicket went unrecorded, so the pair is closed and
/// re-seeded; such closes, and the pair still open at the end of the innings,
/// are dropped when they hold no runs and no more than five balls.
#[derive(Debug, Clone)]
pub struct PartnershipTracker {
    innings: InningsIndex,
    open: Option<OpenPartnership>,
    emitted: Vec<Partnership>,
}

impl PartnershipTracker {
    pub const fn new(innings: InningsIndex) -> Self {
        Self {
            innings,
            open: None,
            emitted: Vec::new(),
        }
    }

    pub fn update(&mut self, ball: &Ball) {
        let mut current = match self.open.take() {
            None => OpenPartnership::seed(ball),
            Some(mut p) => match &p.batter2 {
                None if p.batter1 == *ball.batter => {
                    p.batter2 = Some(ball.non_striker.clone());
                    p
                }
                None if p.batter1 == *ball.non_striker => {
                    p.batter2 = Some(ball.batter.clone());
                    p
                }
                Some(_) if p.involves(ball.batter) => p,
                _ => {
                    self.close(p, false);
                    OpenPartnership::seed(ball)
                }
            },
        };
        current.add(ball);

        if ball.delivery.is_wicket() {
            let survivor = if ball.delivery.dismisses(ball.non_striker)
                && !ball.delivery.dismisses(ball.batter)
            {
                ball.batter
            } else {
                ball.non_striker
            };
            self.close(current, true);
            self.open = Some(OpenPartnership::with_pair(survivor.clone(), None));
        } else {
            self.open = Some(current);
        }
    }

    fn close(&mut self, partnership: OpenPartnership, by_wicket: bool) {
        if !by_wicket && !partnership.is_substantial() {
            return;
        }
        let wicket_index = u32::try_from(self.emitted.len() + 1).unwrap_or(u32::MAX);
        self.emitted.push(Partnership {
            innings: self.innings,
            batters: [
                partnership.batter1,
                partnership.batter2.unwrap_or_default(),
            ],
            runs: partnership.runs,
            balls: partnership.balls,
            wicket_index,
            run_rate: per_over(partnership.runs, partnership.balls),
            boundaries: partnership.boundaries,
            sixes: partnership.sixes,
            ended_by_wicket: by_wicket,
        });
    }

    pub fn finish(mut self) -> Vec<Partnership> {
        if let Some(open) = self.open.take() {
            self.close(open, false);
        }
        self.emitted
    }
}

pub fn partnerships(innings: &Innings, index: InningsIndex) -> Vec<Partnership> {
    let mut tracker = PartnershipTracker::new(index);
    for ball in innings.balls(index) {
        tracker.update(&ball);
    }
    tracker.finish()
}
