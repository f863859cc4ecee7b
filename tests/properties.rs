use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;

use innings::analysis::momentum::{MomentumEvent, MomentumPreset};
use innings::analysis::phase::PhaseWindow;
use innings::{AnalysisConfig, Match, MatchAnalyzer, MatchCache};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn delivery(batter: &str, non_striker: &str, bowler: &str, batter_runs: u32) -> String {
    format!(
        r#"{{"batter": "{batter}", "bowler": "{bowler}", "non_striker": "{non_striker}",
            "runs": {{"batter": {batter_runs}, "extras": 0, "total": {batter_runs}}}}}"#
    )
}

fn no_ball_run_out(batter: &str, non_striker: &str, bowler: &str, player_out: &str) -> String {
    format!(
        r#"{{"batter": "{batter}", "bowler": "{bowler}", "non_striker": "{non_striker}",
            "extras": {{"noballs": 1}}, "runs": {{"batter": 1, "extras": 1, "total": 2}},
            "wickets": [{{"player_out": "{player_out}", "kind": "run out"}}]}}"#
    )
}

fn single_innings(overs: &[Vec<String>]) -> Match {
    let overs = overs
        .iter()
        .enumerate()
        .map(|(i, d)| format!(r#"{{"over": {i}, "deliveries": [{}]}}"#, d.join(",")))
        .collect::<Vec<_>>()
        .join(",");
    Match::from_json_str(&format!(
        r#"{{"info": {{"teams": ["Kent", "Essex"]}},
            "innings": [{{"team": "Kent", "overs": [{overs}]}}]}}"#
    ))
    .expect("generated record parses")
}

#[test]
fn team_runs_equal_delivery_totals() {
    let m = Match::from_path(&fixture_path("short_match.json")).expect("fixture parses");
    let analyzer = MatchAnalyzer::new(&m);
    for (team, innings) in analyzer.team_stats().iter().zip(&m.innings) {
        assert_eq!(team.total_runs, innings.total_runs());
    }
}

#[test]
fn strike_rate_rule_holds_for_every_batter() {
    let m = Match::from_path(&fixture_path("short_match.json")).expect("fixture parses");
    for b in MatchAnalyzer::new(&m).top_batters(usize::MAX) {
        assert!(b.strike_rate.is_finite() && b.strike_rate >= 0.0);
        if b.balls > 0 {
            let expected = f64::from(b.runs) / f64::from(b.balls) * 100.0;
            assert!((b.strike_rate - expected).abs() < 1e-9);
        } else {
            assert_eq!(b.strike_rate, 0.0);
        }
    }
}

#[test]
fn partnerships_partition_the_innings() {
    let m = Match::from_path(&fixture_path("short_match.json")).expect("fixture parses");
    let analyzer = MatchAnalyzer::new(&m);
    let partnerships = analyzer.partnership_analysis();
    for (i, innings) in m.innings.iter().enumerate() {
        let runs: u32 = partnerships
            .iter()
            .filter(|p| p.innings == i)
            .map(|p| p.runs)
            .sum();
        assert_eq!(runs, innings.total_runs());
    }
}

#[test]
fn momentum_is_a_running_sum_and_idempotent() {
    let m = Match::from_path(&fixture_path("short_match.json")).expect("fixture parses");
    let analyzer = MatchAnalyzer::new(&m);
    let curve = analyzer.momentum(MomentumPreset::Primary);
    let mut running = 0.0;
    for p in &curve.points {
        running += p.delta;
        assert!((p.cumulative - running).abs() < 1e-9);
    }
    assert_eq!(curve, analyzer.momentum(MomentumPreset::Primary));
}

#[test]
fn spell_totals_match_their_overs() {
    let m = Match::from_path(&fixture_path("short_match.json")).expect("fixture parses");
    for spell in MatchAnalyzer::new(&m).bowling_spells() {
        let runs: u32 = spell.over_figures.iter().map(|o| o.runs).sum();
        let wickets: u32 = spell.over_figures.iter().map(|o| o.wickets).sum();
        let balls: u32 = spell.over_figures.iter().map(|o| o.balls).sum();
        assert_eq!((runs, wickets, balls), (spell.runs, spell.wickets, spell.balls));
    }
}

#[test]
fn scenario_all_dot_over() {
    let m = single_innings(&[vec![delivery("A", "B", "X", 0); 6]]);
    let analyzer = MatchAnalyzer::new(&m);
    let a = &analyzer.top_batters(10)[0];
    assert_eq!((a.runs, a.balls), (0, 6));
    assert_eq!(a.average, 0.0);
    assert_eq!(a.strike_rate, 0.0);
    assert_eq!(analyzer.team_stats()[0].run_rate, 0.0);
    let spells = analyzer.bowling_spells();
    assert_eq!(spells.len(), 1);
    assert_eq!(spells[0].maidens, 1);
    assert_eq!(spells[0].economy, 0.0);
}

#[test]
fn scenario_six_in_both_tables() {
    let mut over = vec![delivery("A", "B", "X", 6)];
    over.extend(vec![delivery("A", "B", "X", 0); 5]);
    let m = single_innings(&[over]);
    let analyzer = MatchAnalyzer::new(&m);
    for preset in [MomentumPreset::Primary, MomentumPreset::BallByBall] {
        let first = &analyzer.momentum(preset).points[0];
        assert_eq!(first.delta, 7.0);
        assert_eq!(first.event, MomentumEvent::Six);
    }
    assert_eq!(analyzer.boundary_analysis()[0].sixes, 1);
    assert_eq!(analyzer.bowling_spells()[0].boundaries, 1);
}

#[test]
fn scenario_short_innings_powerplay() {
    let overs: Vec<Vec<String>> = (0..4)
        .map(|_| vec![delivery("A", "B", "X", 1); 6])
        .collect();
    let m = single_innings(&overs);
    let powerplay = &MatchAnalyzer::new(&m).powerplay()[0];
    assert_eq!(powerplay.overs, 4);
    assert_eq!(powerplay.runs, 24);
    assert!((powerplay.run_rate - 6.0).abs() < 1e-9);
}

#[test]
fn scenario_non_striker_run_out_off_a_no_ball() {
    let m = single_innings(&[vec![
        delivery("A", "B", "X", 2),
        no_ball_run_out("A", "B", "X", "B"),
        delivery("A", "C", "X", 1),
        delivery("C", "A", "X", 0),
    ]]);
    let analyzer = MatchAnalyzer::new(&m);
    let batting = analyzer.top_batters(usize::MAX);
    let names: Vec<_> = batting.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!((batting[0].runs, batting[0].balls, batting[0].dismissals), (4, 3, 0));
    assert_eq!((batting[1].runs, batting[1].balls, batting[1].dismissals), (0, 0, 1));
    assert_eq!(batting[1].average, 0.0);
    assert_eq!(batting[2].dismissals, 0);

    let fow = analyzer.fall_of_wickets();
    assert_eq!(fow.len(), 1);
    assert_eq!(fow[0].player_out, "B");
    let dismissals: u32 = batting.iter().map(|b| b.dismissals).sum();
    assert_eq!(dismissals, 1);

    let wickets = &analyzer.wicket_analysis()[0];
    assert_eq!(wickets.bowler_wickets(), 0);
}

#[test]
fn empty_match_yields_zero_values() {
    let m = Match::from_json_str(r#"{"info": {}}"#).expect("parses");
    let analyzer = MatchAnalyzer::new(&m);
    let report = analyzer.report();
    assert!(report.teams.is_empty());
    assert!(report.batting.is_empty());
    assert!(report.momentum.points.is_empty());
    assert!(report.insights.is_empty());
    assert_eq!(report.title, "Unknown match");
}

#[test]
fn configured_windows_and_limits() {
    let m = Match::from_path(&fixture_path("short_match.json")).expect("fixture parses");
    let config = AnalysisConfig {
        limit: 1,
        windows: vec![PhaseWindow::new("opening", 0, 1)],
        ..AnalysisConfig::default()
    };
    let report = MatchAnalyzer::with_config(&m, config).report();
    assert_eq!(report.batting.len(), 1);
    assert_eq!(report.bowling.len(), 1);
    assert_eq!(report.phases.len(), 2);
    assert_eq!(report.phases[0].runs, 13);
    assert_eq!(report.phases[1].runs, 11);
}

#[test]
fn cached_record_is_shared_across_threads() {
    let cache = MatchCache::new(8, Duration::from_secs(60));
    let path = fixture_path("short_match.json");
    let record = cache.get_or_load(&path).expect("fixture loads");
    let expected = MatchAnalyzer::new(&record).report();
    let reports: Vec<_> = (0..8)
        .into_par_iter()
        .map(|_| {
            let shared = cache.get_or_load(&path).expect("cached");
            assert!(Arc::ptr_eq(&shared, &record));
            MatchAnalyzer::new(&shared).report()
        })
        .collect();
    assert!(reports.iter().all(|r| *r == expected));
    assert_eq!(cache.len(), 1);
}
