use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::match_file::traits::InningsIndex;
use crate::match_file::{Delivery, Match};

/// The named weight tables. `Primary` drives the match momentum curve;
/// `BallByBall` is the finer-grained table used for per-ball breakdowns.
#[derive(
    Debug,
    Eq,
    PartialEq,
    Copy,
    Clone,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MomentumPreset {
    #[default]
    Primary,
    BallByBall,
}

impl MomentumPreset {
    pub const fn weights(self) -> MomentumWeights {
        match self {
            Self::Primary => MomentumWeights {
                wicket: -10.0,
                six: 7.0,
                four: 5.0,
                running: 3.0,
                single: 1.0,
                dot: -1.0,
                extras: ExtrasBonus::Scaled(0.5),
            },
            Self::BallByBall => MomentumWeights {
                wicket: -10.0,
                six: 7.0,
                four: 5.0,
                running: 3.0,
                single: 1.0,
                dot: 0.0,
                extras: ExtrasBonus::AtLeast(1.0),
            },
        }
    }
}

/// Added on top of the base weight whenever a delivery carries extras.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrasBonus {
    /// `extras * factor`
    Scaled(f64),
    /// `max(floor, extras)`
    AtLeast(f64),
}

impl ExtrasBonus {
    fn apply(self, extras: u32) -> f64 {
        if extras == 0 {
            return 0.0;
        }
        match self {
            Self::Scaled(factor) => f64::from(extras) * factor,
            Self::AtLeast(floor) => f64::from(extras).max(floor),
        }
    }
}

#[derive(
    Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MomentumEvent {
    Wicket,
    Six,
    Four,
    Running,
    Single,
    Dot,
}

#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct MomentumWeights {
    pub wicket: f64,
    pub six: f64,
    pub four: f64,
    /// Two, three or any other non-boundary multiple.
    pub running: f64,
    pub single: f64,
    pub dot: f64,
    pub extras: ExtrasBonus,
}

impl Default for MomentumWeights {
    fn default() -> Self {
        MomentumPreset::default().weights()
    }
}

impl MomentumWeights {
    /// First match wins: wicket, six, four, running runs, single, dot.
    pub fn classify(d: &Delivery) -> MomentumEvent {
        if d.is_wicket() {
            MomentumEvent::Wicket
        } else if d.is_six() {
            MomentumEvent::Six
        } else if d.is_four() {
            MomentumEvent::Four
        } else {
            match d.runs.batter {
                0 => MomentumEvent::Dot,
                1 => MomentumEvent::Single,
                _ => MomentumEvent::Running,
            }
        }
    }

    pub fn delta(&self, d: &Delivery) -> (f64, MomentumEvent) {
        let event = Self::classify(d);
        let base = match event {
            MomentumEvent::Wicket => self.wicket,
            MomentumEvent::Six => self.six,
            MomentumEvent::Four => self.four,
            MomentumEvent::Running => self.running,
            MomentumEvent::Single => self.single,
            MomentumEvent::Dot => self.dot,
        };
        (base + self.extras.apply(d.runs.extras), event)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MomentumPoint {
    pub innings: InningsIndex,
    /// 1-based.
    pub over: u32,
    /// 1-based position within the over.
    pub ball: usize,
    pub delta: f64,
    pub cumulative: f64,
    pub is_wicket: bool,
    pub event: MomentumEvent,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct KeyEvent {
    pub ball: usize,
    pub delta: f64,
    pub event: MomentumEvent,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct OverMomentum {
    pub innings: InningsIndex,
    pub over: u32,
    pub start: f64,
    pub end: f64,
    pub net_change: f64,
    /// Largest absolute swing in the over; the earliest wins a tie.
    pub key_event: Option<KeyEvent>,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MomentumCurve {
    pub weights: MomentumWeights,
    pub points: Vec<MomentumPoint>,
    pub overs: Vec<OverMomentum>,
}

impl MomentumCurve {
    pub fn final_momentum(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.cumulative)
    }

    /// The over with the largest absolute net change.
    pub fn biggest_swing(&self) -> Option<&OverMomentum> {
        self.overs.iter().fold(None, |best: Option<&OverMomentum>, o| match best {
            Some(b) if b.net_change.abs() >= o.net_change.abs() => Some(b),
            _ => Some(o),
        })
    }
}

/// Scores every delivery of the match, carrying the running total across innings.
pub fn momentum(m: &Match, weights: MomentumWeights) -> MomentumCurve {
    let mut points = vec![];
    let mut overs = vec![];
    let mut cumulative = 0.0;
    for (index, innings) in m.innings.iter().enumerate() {
        for over in &innings.overs {
            let start = cumulative;
            let mut key_event: Option<KeyEvent> = None;
            let mut any = false;
            for ball in over.balls(index) {
                any = true;
                let (delta, event) = weights.delta(ball.delivery);
                cumulative += delta;
                points.push(MomentumPoint {
                    innings: index,
                    over: ball.over_number(),
                    ball: ball.ball_number(),
                    delta,
                    cumulative,
                    is_wicket: ball.delivery.is_wicket(),
                    event,
                });
                if key_event
                    .as_ref()
                    .map_or(true, |k| delta.abs() > k.delta.abs())
                {
                    key_event = Some(KeyEvent {
                        ball: ball.ball_number(),
                        delta,
                        event,
                    });
                }
            }
            if any {
                overs.push(OverMomentum {
                    innings: index,
                    over: over.number(),
                    start,
                    end: cumulative,
                    net_change: cumulative - start,
                    key_event,
                });
            }
        }
    }
    MomentumCurve {
        weights,
        points,
        overs,
    }
}
