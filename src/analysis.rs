pub mod accumulator;
pub mod batting;
pub mod bowling;
pub mod engine;
pub mod fall_of_wickets;
pub mod insights;
pub mod momentum;
pub mod partnership;
pub mod phase;
pub mod progression;
pub mod spell;
pub mod team;
#[cfg(test)]
mod fixtures;

pub use engine::{MatchAnalyzer, MatchReport};
