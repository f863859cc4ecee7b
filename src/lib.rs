#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp))]

pub mod analysis;
pub mod cache;
pub mod config;
pub mod match_file;
pub mod output;
mod util;

pub use analysis::{MatchAnalyzer, MatchReport};
pub use cache::MatchCache;
pub use config::AnalysisConfig;
pub use match_file::Match;
