//! Small in-code match builders for aggregator tests.

use crate::match_file::{
    Delivery, Extras, Innings, Match, MatchInfo, Over, Runs, Wicket, WicketKind,
};

pub fn runs(batter: &str, bowler: &str, non_striker: &str, scored: u32) -> Delivery {
    Delivery {
        batter: Some(batter.to_string()),
        bowler: Some(bowler.to_string()),
        non_striker: non_striker.to_string(),
        runs: Runs {
            batter: scored,
            extras: 0,
            total: scored,
            non_boundary: false,
        },
        ..Delivery::default()
    }
}

pub fn dot(batter: &str, bowler: &str, non_striker: &str) -> Delivery {
    runs(batter, bowler, non_striker, 0)
}

pub fn wide(batter: &str, bowler: &str, non_striker: &str, extras: u32) -> Delivery {
    Delivery {
        runs: Runs {
            batter: 0,
            extras,
            total: extras,
            non_boundary: false,
        },
        extras: Extras {
            wides: extras,
            ..Extras::default()
        },
        ..dot(batter, bowler, non_striker)
    }
}

pub fn out(batter: &str, bowler: &str, non_striker: &str, kind: WicketKind) -> Delivery {
    dismissal(dot(batter, bowler, non_striker), batter, kind)
}

pub fn dismissal(mut delivery: Delivery, player_out: &str, kind: WicketKind) -> Delivery {
    delivery.wickets.push(Wicket {
        player_out: player_out.to_string(),
        kind,
        fielders: vec![],
    });
    delivery
}

pub fn over(over: u32, deliveries: Vec<Delivery>) -> Over {
    Over { over, deliveries }
}

pub fn innings(team: &str, overs: Vec<Over>) -> Innings {
    Innings {
        team: team.to_string(),
        overs,
        ..Innings::default()
    }
}

pub fn match_of(innings: Vec<Innings>) -> Match {
    Match {
        info: MatchInfo {
            teams: innings.iter().map(|i| i.team.clone()).collect(),
            ..MatchInfo::default()
        },
        innings,
    }
}

/// Six balls from one bowler to one pair, scoring the given batter runs.
pub fn scoring_over(
    number: u32,
    bowler: &str,
    striker: &str,
    partner: &str,
    scores: [u32; 6],
) -> Over {
    over(
        number,
        scores
            .iter()
            .map(|s| runs(striker, bowler, partner, *s))
            .collect(),
    )
}
