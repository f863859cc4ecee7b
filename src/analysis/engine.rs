use serde::Serialize;
use tracing::debug;

use crate::analysis::batting::{top_batters, PlayerBattingStats};
use crate::analysis::bowling::{top_bowlers, PlayerBowlingStats};
use crate::analysis::fall_of_wickets::{wicket_analysis, FallOfWicket, WicketAnalysis};
use crate::analysis::insights::{summarize, Insight, InsightInputs};
use crate::analysis::momentum::{momentum, MomentumCurve, MomentumPreset};
use crate::analysis::partnership::{partnerships, Partnership};
use crate::analysis::phase::{phase_summary, PhaseSummary, PhaseWindow};
use crate::analysis::progression::{over_by_over, OverProgression};
use crate::analysis::spell::{bowling_spells, BowlingSpell};
use crate::analysis::team::{boundary_analysis, team_stats, BoundaryAnalysis, TeamStats};
use crate::config::AnalysisConfig;
use crate::match_file::traits::{InningsIndex, Team};
use crate::match_file::{Innings, Match};

/// Read-only query surface over one loaded match. Every call is a fresh pass
/// over the record, so one analyzer can be shared across threads.
#[derive(Debug, Clone)]
pub struct MatchAnalyzer<'a> {
    record: &'a Match,
    config: AnalysisConfig,
}

impl<'a> MatchAnalyzer<'a> {
    pub fn new(record: &'a Match) -> Self {
        Self::with_config(record, AnalysisConfig::default())
    }

    pub const fn with_config(record: &'a Match, config: AnalysisConfig) -> Self {
        Self { record, config }
    }

    pub fn top_batters(&self, limit: usize) -> Vec<PlayerBattingStats> {
        top_batters(self.record.balls(), limit)
    }

    pub fn top_bowlers(&self, limit: usize) -> Vec<PlayerBowlingStats> {
        top_bowlers(self.record.balls(), limit)
    }

    /// Empty when the match has no such innings.
    pub fn batting_for_innings(
        &self,
        index: InningsIndex,
        limit: usize,
    ) -> Vec<PlayerBattingStats> {
        self.record
            .innings
            .get(index)
            .map_or_else(Vec::new, |inn| top_batters(inn.balls(index), limit))
    }

    pub fn bowling_for_innings(
        &self,
        index: InningsIndex,
        limit: usize,
    ) -> Vec<PlayerBowlingStats> {
        self.record
            .innings
            .get(index)
            .map_or_else(Vec::new, |inn| top_bowlers(inn.balls(index), limit))
    }

    fn per_innings<T>(&self, f: impl Fn(&Innings, InningsIndex) -> T) -> Vec<T> {
        self.record
            .innings
            .iter()
            .enumerate()
            .map(|(i, inn)| f(inn, i))
            .collect()
    }

    pub fn team_stats(&self) -> Vec<TeamStats> {
        self.per_innings(team_stats)
    }

    pub fn partnership_analysis(&self) -> Vec<Partnership> {
        self.per_innings(partnerships).concat()
    }

    pub fn wicket_analysis(&self) -> Vec<WicketAnalysis> {
        self.per_innings(wicket_analysis)
    }

    pub fn fall_of_wickets(&self) -> Vec<FallOfWicket> {
        self.wicket_analysis()
            .into_iter()
            .flat_map(|w| w.fall_of_wickets)
            .collect()
    }

    pub fn boundary_analysis(&self) -> Vec<BoundaryAnalysis> {
        self.per_innings(boundary_analysis)
    }

    pub fn over_by_over_progression(&self) -> Vec<OverProgression> {
        self.per_innings(over_by_over).concat()
    }

    pub fn momentum(&self, preset: MomentumPreset) -> MomentumCurve {
        momentum(self.record, preset.weights())
    }

    /// Spells of every innings, each innings ranked on its own.
    pub fn bowling_spells(&self) -> Vec<BowlingSpell> {
        let min_balls = self.config.min_spell_balls;
        self.per_innings(|inn, i| bowling_spells(inn, i, min_balls)).concat()
    }

    /// Summaries of `window` for every innings, placed against the match's
    /// scheduled overs.
    pub fn phase(&self, window: &PhaseWindow) -> Vec<PhaseSummary> {
        let window = window.resolve(self.record.info.scheduled_overs());
        self.per_innings(|inn, i| phase_summary(inn, i, &window))
    }

    pub fn powerplay(&self) -> Vec<PhaseSummary> {
        self.phase(&self.config.powerplay)
    }

    pub fn death_overs(&self) -> Vec<PhaseSummary> {
        self.phase(&self.config.death)
    }

    pub fn phase_summaries(&self) -> Vec<PhaseSummary> {
        self.config
            .windows
            .iter()
            .flat_map(|w| self.phase(w))
            .collect()
    }

    fn batting_teams(&self) -> Vec<Team> {
        self.record.innings.iter().map(|i| i.team.clone()).collect()
    }

    pub fn insights(&self) -> Vec<Insight> {
        let teams = self.batting_teams();
        let batting = self.top_batters(usize::MAX);
        let bowling = self.top_bowlers(usize::MAX);
        let partnerships = self.partnership_analysis();
        let fall_of_wickets = self.fall_of_wickets();
        let spells = self.bowling_spells();
        let powerplays = self.powerplay();
        let curve = self.momentum(self.config.momentum);
        summarize(
            &InsightInputs {
                teams: &teams,
                batting: &batting,
                bowling: &bowling,
                partnerships: &partnerships,
                fall_of_wickets: &fall_of_wickets,
                spells: &spells,
                powerplays: &powerplays,
                momentum: &curve,
            },
            &self.config.insights,
        )
    }

    /// Every view of the match in one pass of the analyzer.
    pub fn report(&self) -> MatchReport {
        let limit = self.config.limit;
        let teams = self.batting_teams();
        let batting = self.top_batters(usize::MAX);
        let bowling = self.top_bowlers(usize::MAX);
        let partnerships = self.partnership_analysis();
        let wickets = self.wicket_analysis();
        let fall_of_wickets: Vec<FallOfWicket> = wickets
            .iter()
            .flat_map(|w| w.fall_of_wickets.iter().cloned())
            .collect();
        let spells = self.bowling_spells();
        let powerplay = self.powerplay();
        let curve = self.momentum(self.config.momentum);
        let insights = summarize(
            &InsightInputs {
                teams: &teams,
                batting: &batting,
                bowling: &bowling,
                partnerships: &partnerships,
                fall_of_wickets: &fall_of_wickets,
                spells: &spells,
                powerplays: &powerplay,
                momentum: &curve,
            },
            &self.config.insights,
        );
        debug!(
            "Built report for {} with {} insights",
            self.record.title(),
            insights.len()
        );
        MatchReport {
            title: self.record.title(),
            result: self.record.info.outcome.as_ref().map(|o| o.summary()),
            teams: self.team_stats(),
            batting: batting.into_iter().take(limit).collect(),
            bowling: bowling.into_iter().take(limit).collect(),
            partnerships,
            wickets,
            boundaries: self.boundary_analysis(),
            progression: self.over_by_over_progression(),
            momentum: curve,
            spells,
            powerplay,
            death_overs: self.death_overs(),
            phases: self.phase_summaries(),
            insights,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct MatchReport {
    pub title: String,
    pub result: Option<String>,
    pub teams: Vec<TeamStats>,
    pub batting: Vec<PlayerBattingStats>,
    pub bowling: Vec<PlayerBowlingStats>,
    pub partnerships: Vec<Partnership>,
    pub wickets: Vec<WicketAnalysis>,
    pub boundaries: Vec<BoundaryAnalysis>,
    pub progression: Vec<OverProgression>,
    pub momentum: MomentumCurve,
    pub spells: Vec<BowlingSpell>,
    pub powerplay: Vec<PhaseSummary>,
    pub death_overs: Vec<PhaseSummary>,
    pub phases: Vec<PhaseSummary>,
    pub insights: Vec<Insight>,
}
