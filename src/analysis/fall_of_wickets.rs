use itertools::Itertools;
use serde::Serialize;

use crate::match_file::traits::{Bowler, InningsIndex, Player, Team};
use crate::match_file::{Innings, WicketKind};
use crate::util::over_ball_label;

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct FallOfWicket {
    pub innings: InningsIndex,
    pub wicket_number: u32,
    pub score_at_fall: u32,
    /// Overs.balls at the fall, counted from legal deliveries.
    pub over_ball: String,
    pub player_out: Player,
    pub kind: WicketKind,
    pub bowler: Bowler,
    pub partnership_runs: u32,
}

pub fn fall_of_wickets(innings: &Innings, index: InningsIndex) -> Vec<FallOfWicket> {
    let mut fow = vec![];
    let mut current_runs = 0;
    let mut legal_balls = 0;
    let mut runs_at_previous_wicket = 0;
    for ball in innings.balls(index) {
        let d = ball.delivery;
        current_runs += d.runs.total;
        if d.is_legal() {
            legal_balls += 1;
        }
        for wicket in &d.wickets {
            fow.push(FallOfWicket {
                innings: index,
                wicket_number: u32::try_from(fow.len() + 1).unwrap_or(u32::MAX),
                score_at_fall: current_runs,
                over_ball: over_ball_label(legal_balls),
                player_out: wicket.player_out.clone(),
                kind: wicket.kind,
                bowler: ball.bowler.clone(),
                partnership_runs: current_runs - runs_at_previous_wicket,
            });
            runs_at_previous_wicket = current_runs;
        }
    }
    fow
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct KindCount {
    pub kind: WicketKind,
    pub count: u32,
    pub credited_to_bowler: bool,
}

#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct WicketAnalysis {
    pub innings: InningsIndex,
    pub team: Team,
    pub fall_of_wickets: Vec<FallOfWicket>,
    /// Most frequent first, then by kind name.
    pub by_kind: Vec<KindCount>,
}

impl WicketAnalysis {
    pub fn bowler_wickets(&self) -> u32 {
        self.by_kind
            .iter()
            .filter(|k| k.credited_to_bowler)
            .map(|k| k.count)
            .sum()
    }
}

pub fn wicket_analysis(innings: &Innings, index: InningsIndex) -> WicketAnalysis {
    let fall_of_wickets = fall_of_wickets(innings, index);
    let by_kind = fall_of_wickets
        .iter()
        .counts_by(|f| f.kind)
        .into_iter()
        .map(|(kind, count)| KindCount {
            kind,
            count: u32::try_from(count).unwrap_or(u32::MAX),
            credited_to_bowler: kind.credited_to_bowler(),
        })
        .sorted_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.kind.as_ref().cmp(b.kind.as_ref()))
        })
        .collect();
    WicketAnalysis {
        innings: index,
        team: innings.team.clone(),
        fall_of_wickets,
        by_kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::*;
    use crate::match_file::Extras;

    #[test]
    fn records_score_and_label_at_each_wicket() {
        let mut no_ball_run_out = dismissal(runs("C", "Y", "B", 1), "C", WicketKind::RunOut);
        no_ball_run_out.extras = Extras {
            noballs: 1,
            ..Extras::default()
        };
        no_ball_run_out.runs.extras = 1;
        no_ball_run_out.runs.total = 2;

        let inn = innings(
            "Kent",
            vec![
                scoring_over(0, "X", "A", "B", [1, 0, 4, 0, 0, 1]),
                over(
                    1,
                    vec![
                        wide("A", "Y", "B", 1),
                        out("A", "Y", "B", WicketKind::Caught),
                        no_ball_run_out,
                        runs("D", "Y", "B", 2),
                    ],
                ),
            ],
        );
        let fow = fall_of_wickets(&inn, 0);
        assert_eq!(fow.len(), 2);

        assert_eq!(fow[0].wicket_number, 1);
        assert_eq!(fow[0].score_at_fall, 7);
        assert_eq!(fow[0].over_ball, "1.1");
        assert_eq!(fow[0].player_out, "A");
        assert_eq!(fow[0].bowler, "Y");
        assert_eq!(fow[0].partnership_runs, 7);

        assert_eq!(fow[1].wicket_number, 2);
        assert_eq!(fow[1].score_at_fall, 9);
        assert_eq!(fow[1].over_ball, "1.1");
        assert_eq!(fow[1].kind, WicketKind::RunOut);
        assert_eq!(fow[1].partnership_runs, 2);
    }

    #[test]
    fn no_wickets_no_records() {
        let inn = innings("Kent", vec![scoring_over(0, "X", "A", "B", [0; 6])]);
        assert!(fall_of_wickets(&inn, 0).is_empty());
        let analysis = wicket_analysis(&inn, 0);
        assert!(analysis.by_kind.is_empty());
        assert_eq!(analysis.bowler_wickets(), 0);
    }

    #[test]
    fn breakdown_by_kind_orders_by_count_then_name() {
        let inn = innings(
            "Kent",
            vec![over(
                0,
                vec![
                    out("A", "X", "B", WicketKind::RunOut),
                    out("C", "X", "B", WicketKind::Lbw),
                    out("D", "X", "B", WicketKind::Caught),
                    out("E", "X", "B", WicketKind::Caught),
                ],
            )],
        );
        let analysis = wicket_analysis(&inn, 0);
        assert_eq!(analysis.team, "Kent");
        assert_eq!(analysis.fall_of_wickets.len(), 4);
        let kinds: Vec<_> = analysis.by_kind.iter().map(|k| (k.kind, k.count)).collect();
        assert_eq!(
            kinds,
            vec![
                (WicketKind::Caught, 2),
                (WicketKind::Lbw, 1),
                (WicketKind::RunOut, 1),
            ]
        );
        assert_eq!(analysis.bowler_wickets(), 3);
    }
}
