use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use csv::{Writer, WriterBuilder};
use fixed_map::{Key, Map};
use rayon::prelude::*;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::debug;

use crate::analysis::batting::PlayerBattingStats;
use crate::analysis::bowling::PlayerBowlingStats;
use crate::analysis::fall_of_wickets::{FallOfWicket, WicketAnalysis};
use crate::analysis::insights::{Insight, InsightCategory};
use crate::analysis::momentum::{MomentumEvent, MomentumPoint, OverMomentum};
use crate::analysis::partnership::Partnership;
use crate::analysis::phase::PhaseSummary;
use crate::analysis::progression::OverProgression;
use crate::analysis::spell::{BowlingSpell, MatchPhase};
use crate::analysis::team::{BoundaryAnalysis, TeamStats};
use crate::analysis::MatchReport;
use crate::match_file::traits::{Bowler, InningsIndex, Player, Team};
use crate::match_file::WicketKind;

#[derive(Debug, Eq, PartialEq, Copy, Clone, Ord, PartialOrd, Hash, Display, EnumIter, Key)]
#[strum(serialize_all = "snake_case")]
pub enum OutputSchema {
    Team,
    Batting,
    Bowling,
    Partnership,
    FallOfWicket,
    WicketKind,
    Boundary,
    OverProgression,
    MomentumPoint,
    MomentumOver,
    BowlingSpell,
    Phase,
    Insight,
}

struct ThreadSafeCsvWriter {
    csv: Mutex<Writer<File>>,
}

impl ThreadSafeCsvWriter {
    fn new(output_root: &Path, schema: OutputSchema) -> Result<Self> {
        let output_path = output_root.join(format!("{schema}.csv"));
        debug!("Creating file {}", output_path.display());
        let csv = WriterBuilder::new()
            .has_headers(true)
            .from_path(&output_path)
            .with_context(|| format!("Failed to create file {}", output_path.display()))?;
        Ok(Self {
            csv: Mutex::new(csv),
        })
    }

    fn csv(&self) -> Result<MutexGuard<Writer<File>>> {
        self.csv
            .lock()
            .map_err(|e| anyhow!("Failed to acquire writer lock: {}", e))
    }
}

/// One CSV file per schema under the output root, plus a JSON report per match.
pub struct WriterMap {
    output_root: PathBuf,
    map: Map<OutputSchema, ThreadSafeCsvWriter>,
}

impl WriterMap {
    pub fn new(output_root: &Path) -> Result<Self> {
        fs::create_dir_all(output_root.join("reports")).with_context(|| {
            format!("Failed to create output dir {}", output_root.display())
        })?;
        let mut map = Map::new();
        for schema in OutputSchema::iter() {
            map.insert(schema, ThreadSafeCsvWriter::new(output_root, schema)?);
        }
        Ok(Self {
            output_root: output_root.to_path_buf(),
            map,
        })
    }

    fn get_csv(&self, schema: OutputSchema) -> Result<MutexGuard<Writer<File>>> {
        self.map
            .get(schema)
            .context("Failed to initialize writer for schema")?
            .csv()
    }

    fn write_rows<R: Serialize>(
        &self,
        schema: OutputSchema,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<()> {
        let mut csv = self.get_csv(schema)?;
        for row in rows {
            csv.serialize(row)
                .with_context(|| format!("Failed to write {schema} row"))?;
        }
        Ok(())
    }

    pub fn write_report(&self, match_id: &str, report: &MatchReport) -> Result<()> {
        self.write_rows(
            OutputSchema::Team,
            report.teams.iter().map(|t| TeamRow::new(match_id, t)),
        )?;
        self.write_rows(
            OutputSchema::Batting,
            report.batting.iter().map(|b| BattingRow::new(match_id, b)),
        )?;
        self.write_rows(
            OutputSchema::Bowling,
            report.bowling.iter().map(|b| BowlingRow::new(match_id, b)),
        )?;
        self.write_rows(
            OutputSchema::Partnership,
            report
                .partnerships
                .iter()
                .map(|p| PartnershipRow::new(match_id, p)),
        )?;
        self.write_rows(
            OutputSchema::FallOfWicket,
            report
                .wickets
                .iter()
                .flat_map(|w| &w.fall_of_wickets)
                .map(|f| FallOfWicketRow::new(match_id, f)),
        )?;
        self.write_rows(
            OutputSchema::WicketKind,
            report
                .wickets
                .iter()
                .flat_map(|w| WicketKindRow::from_analysis(match_id, w)),
        )?;
        self.write_rows(
            OutputSchema::Boundary,
            report
                .boundaries
                .iter()
                .map(|b| BoundaryRow::new(match_id, b)),
        )?;
        self.write_rows(
            OutputSchema::OverProgression,
            report
                .progression
                .iter()
                .map(|o| OverProgressionRow::new(match_id, o)),
        )?;
        self.write_rows(
            OutputSchema::MomentumPoint,
            report
                .momentum
                .points
                .iter()
                .map(|p| MomentumPointRow::new(match_id, p)),
        )?;
        self.write_rows(
            OutputSchema::MomentumOver,
            report
                .momentum
                .overs
                .iter()
                .map(|o| MomentumOverRow::new(match_id, o)),
        )?;
        self.write_rows(
            OutputSchema::BowlingSpell,
            report.spells.iter().map(|s| SpellRow::new(match_id, s)),
        )?;
        self.write_rows(
            OutputSchema::Phase,
            report.phases.iter().map(|p| PhaseRow::new(match_id, p)),
        )?;
        self.write_rows(
            OutputSchema::Insight,
            report
                .insights
                .iter()
                .enumerate()
                .map(|(rank, i)| InsightRow::new(match_id, rank + 1, i)),
        )?;
        self.write_json(match_id, report)
    }

    fn write_json(&self, match_id: &str, report: &MatchReport) -> Result<()> {
        let path = self.output_root.join("reports").join(format!("{match_id}.json"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), report)
            .with_context(|| format!("Failed to write report {}", path.display()))
    }

    pub fn flush_all(&self) -> Result<Vec<()>> {
        self.map
            .iter()
            .par_bridge()
            .map(|(_, writer)| {
                writer
                    .csv()?
                    .flush()
                    .map_err(|e| anyhow!("Failed to flush writer: {}", e))
            })
            .collect::<Result<Vec<()>>>()
    }
}

#[derive(Debug, Serialize)]
struct TeamRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    team: &'a Team,
    total_runs: u32,
    total_wickets: u32,
    total_overs: u32,
    balls: u32,
    extras: u32,
    run_rate: f64,
    fours: u32,
    sixes: u32,
}

impl<'a> TeamRow<'a> {
    const fn new(match_id: &'a str, t: &'a TeamStats) -> Self {
        Self {
            match_id,
            innings: t.innings,
            team: &t.team,
            total_runs: t.total_runs,
            total_wickets: t.total_wickets,
            total_overs: t.total_overs,
            balls: t.balls,
            extras: t.extras,
            run_rate: t.run_rate,
            fours: t.boundaries,
            sixes: t.sixes,
        }
    }
}

#[derive(Debug, Serialize)]
struct BattingRow<'a> {
    match_id: &'a str,
    batter: &'a Player,
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    dismissals: u32,
    strike_rate: f64,
    average: f64,
}

impl<'a> BattingRow<'a> {
    const fn new(match_id: &'a str, b: &'a PlayerBattingStats) -> Self {
        Self {
            match_id,
            batter: &b.name,
            runs: b.runs,
            balls: b.balls,
            fours: b.boundaries,
            sixes: b.sixes,
            dismissals: b.dismissals,
            strike_rate: b.strike_rate,
            average: b.average,
        }
    }
}

#[derive(Debug, Serialize)]
struct BowlingRow<'a> {
    match_id: &'a str,
    bowler: &'a Bowler,
    overs: u32,
    balls: u32,
    runs: u32,
    wickets: u32,
    extras: u32,
    dot_balls: u32,
    economy: f64,
    average: f64,
}

impl<'a> BowlingRow<'a> {
    const fn new(match_id: &'a str, b: &'a PlayerBowlingStats) -> Self {
        Self {
            match_id,
            bowler: &b.name,
            overs: b.overs,
            balls: b.balls,
            runs: b.runs,
            wickets: b.wickets,
            extras: b.extras,
            dot_balls: b.dot_balls,
            economy: b.economy,
            average: b.average,
        }
    }
}

#[derive(Debug, Serialize)]
struct PartnershipRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    wicket_index: u32,
    batter_1: &'a Player,
    batter_2: &'a Player,
    runs: u32,
    balls: u32,
    run_rate: f64,
    fours: u32,
    sixes: u32,
    ended_by_wicket: bool,
}

impl<'a> PartnershipRow<'a> {
    const fn new(match_id: &'a str, p: &'a Partnership) -> Self {
        Self {
            match_id,
            innings: p.innings,
            wicket_index: p.wicket_index,
            batter_1: &p.batters[0],
            batter_2: &p.batters[1],
            runs: p.runs,
            balls: p.balls,
            run_rate: p.run_rate,
            fours: p.boundaries,
            sixes: p.sixes,
            ended_by_wicket: p.ended_by_wicket,
        }
    }
}

#[derive(Debug, Serialize)]
struct FallOfWicketRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    wicket_number: u32,
    score_at_fall: u32,
    over_ball: &'a str,
    player_out: &'a Player,
    kind: WicketKind,
    bowler: &'a Bowler,
    partnership_runs: u32,
}

impl<'a> FallOfWicketRow<'a> {
    fn new(match_id: &'a str, f: &'a FallOfWicket) -> Self {
        Self {
            match_id,
            innings: f.innings,
            wicket_number: f.wicket_number,
            score_at_fall: f.score_at_fall,
            over_ball: &f.over_ball,
            player_out: &f.player_out,
            kind: f.kind,
            bowler: &f.bowler,
            partnership_runs: f.partnership_runs,
        }
    }
}

#[derive(Debug, Serialize)]
struct WicketKindRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    team: &'a Team,
    kind: WicketKind,
    count: u32,
    credited_to_bowler: bool,
}

impl<'a> WicketKindRow<'a> {
    fn from_analysis(match_id: &'a str, w: &'a WicketAnalysis) -> impl Iterator<Item = Self> + 'a {
        w.by_kind.iter().map(move |k| Self {
            match_id,
            innings: w.innings,
            team: &w.team,
            kind: k.kind,
            count: k.count,
            credited_to_bowler: k.credited_to_bowler,
        })
    }
}

#[derive(Debug, Serialize)]
struct BoundaryRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    team: &'a Team,
    fours: u32,
    sixes: u32,
    boundary_runs: u32,
    boundary_percentage: f64,
    balls_per_boundary: f64,
}

impl<'a> BoundaryRow<'a> {
    const fn new(match_id: &'a str, b: &'a BoundaryAnalysis) -> Self {
        Self {
            match_id,
            innings: b.innings,
            team: &b.team,
            fours: b.fours,
            sixes: b.sixes,
            boundary_runs: b.boundary_runs,
            boundary_percentage: b.boundary_percentage,
            balls_per_boundary: b.balls_per_boundary,
        }
    }
}

#[derive(Debug, Serialize)]
struct OverProgressionRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    over: u32,
    bowler: Option<&'a Bowler>,
    runs: u32,
    wickets: u32,
    balls: u32,
    cumulative_runs: u32,
    cumulative_wickets: u32,
    run_rate: f64,
}

impl<'a> OverProgressionRow<'a> {
    fn new(match_id: &'a str, o: &'a OverProgression) -> Self {
        Self {
            match_id,
            innings: o.innings,
            over: o.over,
            bowler: o.bowler.as_ref(),
            runs: o.runs,
            wickets: o.wickets,
            balls: o.balls,
            cumulative_runs: o.cumulative_runs,
            cumulative_wickets: o.cumulative_wickets,
            run_rate: o.run_rate,
        }
    }
}

#[derive(Debug, Serialize)]
struct MomentumPointRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    over: u32,
    ball: usize,
    event: MomentumEvent,
    delta: f64,
    cumulative: f64,
    is_wicket: bool,
}

impl<'a> MomentumPointRow<'a> {
    const fn new(match_id: &'a str, p: &'a MomentumPoint) -> Self {
        Self {
            match_id,
            innings: p.innings,
            over: p.over,
            ball: p.ball,
            event: p.event,
            delta: p.delta,
            cumulative: p.cumulative,
            is_wicket: p.is_wicket,
        }
    }
}

#[derive(Debug, Serialize)]
struct MomentumOverRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    over: u32,
    start: f64,
    end: f64,
    net_change: f64,
    key_ball: Option<usize>,
    key_event: Option<MomentumEvent>,
    key_delta: Option<f64>,
}

impl<'a> MomentumOverRow<'a> {
    fn new(match_id: &'a str, o: &'a OverMomentum) -> Self {
        Self {
            match_id,
            innings: o.innings,
            over: o.over,
            start: o.start,
            end: o.end,
            net_change: o.net_change,
            key_ball: o.key_event.as_ref().map(|k| k.ball),
            key_event: o.key_event.as_ref().map(|k| k.event),
            key_delta: o.key_event.as_ref().map(|k| k.delta),
        }
    }
}

#[derive(Debug, Serialize)]
struct SpellRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    bowler: &'a Bowler,
    overs: f64,
    balls: u32,
    runs: u32,
    wickets: u32,
    economy: f64,
    start_over: u32,
    end_over: u32,
    phase: MatchPhase,
    dot_balls: u32,
    boundaries: u32,
    maidens: u32,
}

impl<'a> SpellRow<'a> {
    const fn new(match_id: &'a str, s: &'a BowlingSpell) -> Self {
        Self {
            match_id,
            innings: s.innings,
            bowler: &s.bowler,
            overs: s.overs,
            balls: s.balls,
            runs: s.runs,
            wickets: s.wickets,
            economy: s.economy,
            start_over: s.start_over,
            end_over: s.end_over,
            phase: s.phase,
            dot_balls: s.dot_balls,
            boundaries: s.boundaries,
            maidens: s.maidens,
        }
    }
}

#[derive(Debug, Serialize)]
struct PhaseRow<'a> {
    match_id: &'a str,
    innings: InningsIndex,
    team: &'a Team,
    window: &'a str,
    overs: u32,
    balls: u32,
    runs: u32,
    wickets: u32,
    fours: u32,
    sixes: u32,
    dot_balls: u32,
    extras: u32,
    run_rate: f64,
    dot_ball_percentage: f64,
    boundary_percentage: f64,
}

impl<'a> PhaseRow<'a> {
    fn new(match_id: &'a str, p: &'a PhaseSummary) -> Self {
        Self {
            match_id,
            innings: p.innings,
            team: &p.team,
            window: &p.window,
            overs: p.overs,
            balls: p.balls,
            runs: p.runs,
            wickets: p.wickets,
            fours: p.boundaries,
            sixes: p.sixes,
            dot_balls: p.dot_balls,
            extras: p.extras,
            run_rate: p.run_rate,
            dot_ball_percentage: p.dot_ball_percentage,
            boundary_percentage: p.boundary_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsightRow<'a> {
    match_id: &'a str,
    rank: usize,
    category: InsightCategory,
    headline: &'a str,
    value: f64,
}

impl<'a> InsightRow<'a> {
    fn new(match_id: &'a str, rank: usize, i: &'a Insight) -> Self {
        Self {
            match_id,
            rank,
            category: i.category,
            headline: &i.headline,
            value: i.value,
        }
    }
}
