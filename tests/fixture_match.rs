use std::fs;
use std::path::PathBuf;

use innings::analysis::insights::InsightCategory;
use innings::analysis::momentum::{MomentumEvent, MomentumPreset};
use innings::analysis::spell::MatchPhase;
use innings::match_file::traits::{MatchType, TossDecision};
use innings::match_file::WicketKind;
use innings::{Match, MatchAnalyzer};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn load(name: &str) -> Match {
    Match::from_path(&fixture_path(name)).expect("fixture should parse")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn metadata_parses() {
    let m = load("short_match.json");
    assert_eq!(m.title(), "Kent v Essex");
    assert_eq!(m.info.match_type, Some(MatchType::T20));
    assert_eq!(m.info.venue.as_deref(), Some("St Lawrence Ground"));
    assert_eq!(m.info.dates.len(), 1);
    let toss = m.info.toss.as_ref().expect("toss");
    assert_eq!(toss.decision, TossDecision::Field);
    assert_eq!(
        m.info.outcome.as_ref().map(|o| o.summary()).as_deref(),
        Some("Kent won by 6 runs")
    );
    assert_eq!(m.innings.len(), 2);
    assert_eq!(m.innings[1].target.as_ref().and_then(|t| t.runs), Some(19));
}

#[test]
fn malformed_delivery_is_skipped_everywhere() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let kent = &analyzer.team_stats()[0];
    assert_eq!(kent.total_runs, 18);
    assert_eq!(kent.balls, 20);
    assert_eq!(kent.total_overs, 3);
    assert_eq!(kent.total_wickets, 2);
    assert_eq!(kent.extras, 2);
    assert!(close(kent.run_rate, 5.4));
    assert_eq!(kent.scoreline(), "18/2");

    let essex = &analyzer.team_stats()[1];
    assert_eq!(essex.total_runs, 12);
    assert_eq!(essex.balls, 12);
    assert!(close(essex.run_rate, 6.0));
}

#[test]
fn batting_figures() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let kent = analyzer.batting_for_innings(0, 10);
    let names: Vec<_> = kent.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["B", "D", "A", "C"]);

    let b = &kent[0];
    assert_eq!((b.runs, b.balls, b.boundaries, b.sixes), (11, 12, 1, 1));
    assert!(b.is_not_out());
    assert_eq!(b.average, 11.0);

    let a = &kent[2];
    assert_eq!((a.runs, a.balls, a.dismissals), (1, 3, 1));
    assert!(close(a.strike_rate, 100.0 / 3.0));

    let c = &kent[3];
    assert_eq!((c.runs, c.balls, c.dismissals), (1, 1, 1));

    let top = analyzer.top_batters(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].name, "B");
    assert_eq!(top[1].name, "E");
}

#[test]
fn bowling_figures() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let bowlers = analyzer.top_bowlers(10);
    let names: Vec<_> = bowlers.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Y", "Q", "X", "P"]);

    let y = &bowlers[0];
    assert_eq!((y.runs, y.balls, y.wickets, y.extras, y.overs), (5, 7, 2, 1, 1));
    assert!(close(y.average, 2.5));

    let x = &bowlers[2];
    assert_eq!((x.runs, x.balls, x.wickets, x.overs, x.dot_balls), (13, 13, 0, 2, 8));
    assert!(close(x.economy, 6.0));
    assert_eq!(x.average, 0.0);
}

#[test]
fn partnerships_and_fall_of_wickets() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let partnerships = analyzer.partnership_analysis();
    let kent: Vec<_> = partnerships.iter().filter(|p| p.innings == 0).collect();
    assert_eq!(kent.len(), 3);
    assert_eq!(kent[0].batters, [String::from("A"), String::from("B")]);
    assert_eq!((kent[0].runs, kent[0].balls, kent[0].wicket_index), (13, 9, 1));
    assert_eq!(kent[1].batters, [String::from("B"), String::from("C")]);
    assert_eq!((kent[1].runs, kent[1].balls), (2, 1));
    assert_eq!(kent[2].batters, [String::from("B"), String::from("D")]);
    assert_eq!((kent[2].runs, kent[2].balls, kent[2].wicket_index), (3, 10, 3));
    assert!(!kent[2].ended_by_wicket);

    let essex: Vec<_> = partnerships.iter().filter(|p| p.innings == 1).collect();
    assert_eq!(essex.len(), 2);
    assert_eq!(essex[1].batters, [String::from("E"), String::from("G")]);

    let wickets = analyzer.wicket_analysis();
    let fow = &wickets[0].fall_of_wickets;
    assert_eq!(fow.len(), 2);
    assert_eq!((fow[0].score_at_fall, fow[0].over_ball.as_str()), (13, "1.2"));
    assert_eq!(fow[0].kind, WicketKind::Caught);
    assert_eq!((fow[1].score_at_fall, fow[1].over_ball.as_str()), (15, "1.2"));
    assert_eq!(fow[1].kind, WicketKind::RunOut);
    assert_eq!(fow[1].partnership_runs, 2);
    assert_eq!(wickets[0].bowler_wickets(), 1);
    assert_eq!(wickets[1].fall_of_wickets[0].over_ball, "1.3");
}

#[test]
fn boundaries_and_progression() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let kent = &analyzer.boundary_analysis()[0];
    assert_eq!((kent.fours, kent.sixes, kent.boundary_runs), (1, 1, 10));
    assert!(close(kent.boundary_percentage, 10.0 / 18.0 * 100.0));
    assert!(close(kent.balls_per_boundary, 10.0));

    let overs = analyzer.over_by_over_progression();
    assert_eq!(overs.len(), 5);
    assert_eq!(
        overs.iter().take(3).map(|o| o.cumulative_runs).collect::<Vec<_>>(),
        vec![13, 18, 18]
    );
    assert_eq!(overs[1].cumulative_wickets, 2);
    assert_eq!(overs[2].bowler.as_deref(), Some("X"));
    assert_eq!(overs[2].balls, 6);
    assert_eq!(overs[3].innings, 1);
    assert_eq!(overs[3].cumulative_runs, 11);
}

#[test]
fn momentum_curve() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let curve = analyzer.momentum(MomentumPreset::Primary);
    assert_eq!(curve.points.len(), 32);
    let nets: Vec<f64> = curve.overs.iter().map(|o| o.net_change).collect();
    assert_eq!(nets, vec![11.5, -18.5, -6.0, 12.0, -14.5]);
    assert!(close(curve.final_momentum(), -15.5));

    let swing = curve.biggest_swing().expect("swing");
    assert_eq!((swing.innings, swing.over), (0, 2));
    let key = swing.key_event.as_ref().expect("key event");
    assert_eq!((key.ball, key.event), (2, MomentumEvent::Wicket));

    let fine = analyzer.momentum(MomentumPreset::BallByBall);
    let wide = &fine.points[3];
    assert_eq!(wide.delta, 1.0);
    assert_eq!(wide.event, MomentumEvent::Dot);
}

#[test]
fn spells_and_phases() {
    let m = load("short_match.json");
    let analyzer = MatchAnalyzer::new(&m);
    let spells = analyzer.bowling_spells();
    let names: Vec<_> = spells.iter().map(|s| s.bowler.as_str()).collect();
    assert_eq!(names, vec!["Y", "X", "Q", "P"]);

    let x = &spells[1];
    assert_eq!((x.balls, x.runs, x.maidens, x.dot_balls, x.boundaries), (13, 13, 1, 8, 2));
    assert!(close(x.overs, 2.1));
    assert!(close(x.economy, 13.0 / 2.1));
    assert_eq!((x.start_over, x.end_over), (1, 3));
    assert_eq!(x.phase, MatchPhase::Powerplay);
    assert_eq!(x.over_figures.len(), 2);

    let powerplay = analyzer.powerplay();
    assert_eq!(powerplay.len(), 2);
    let kent = &powerplay[0];
    assert_eq!((kent.overs, kent.balls, kent.runs, kent.wickets), (3, 20, 18, 2));
    assert_eq!(kent.dot_balls, 12);
    assert!(close(kent.run_rate, 5.4));

    let death = analyzer.death_overs();
    assert!(death.iter().all(|d| d.overs == 0 && d.run_rate == 0.0));
}

#[test]
fn insights_are_ranked() {
    let m = load("short_match.json");
    let insights = MatchAnalyzer::new(&m).insights();
    let categories: Vec<_> = insights.iter().map(|i| i.category).collect();
    assert_eq!(
        categories,
        vec![
            InsightCategory::TopScorer,
            InsightCategory::BestBowling,
            InsightCategory::MomentumSwing,
            InsightCategory::PowerplayLeader,
        ]
    );
    assert_eq!(insights[0].headline, "B top-scored with 11 off 12 balls");
    assert_eq!(insights[1].headline, "Y returned the best figures of 2/5");
    assert!(insights[3].headline.starts_with("Essex made 12/1 in the powerplay"));
}

#[test]
fn report_serializes_with_snake_case_fields() {
    let m = load("short_match.json");
    let report = MatchAnalyzer::new(&m).report();
    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["result"], "Kent won by 6 runs");
    assert_eq!(value["teams"][0]["total_runs"], 18);
    assert_eq!(value["spells"][0]["phase"], "powerplay");
    assert_eq!(value["insights"][0]["category"], "top_scorer");
    let raw = fs::read_to_string(fixture_path("short_match.json")).expect("fixture readable");
    assert_eq!(Match::from_json_str(&raw).expect("parses"), m);
}
