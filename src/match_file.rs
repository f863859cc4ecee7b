pub mod delivery;
pub mod record;
pub mod traits;

pub use delivery::{Delivery, Extras, Runs, Wicket, WicketFielder, WicketKind};
pub use record::{Ball, Innings, Match, MatchInfo, Outcome, Over, Toss};
