use crate::state::{MatchState, Overs, MAX_WICKETS};

/// What, if anything, the last lifecycle check changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    None,
    InningsBreak { target: u32 },
    MatchOver { result: String },
}

/// Runs after every ball. Moves innings 1 into the break once it is
/// complete and ends the match in innings 2 on a successful chase or an
/// exhausted innings.
pub fn check_match_end(state: &mut MatchState) -> Transition {
    if state.match_over {
        return Transition::None;
    }
    match state.innings {
        1 if state.innings_complete() => start_second_innings(state),
        2 => settle_chase(state),
        _ => Transition::None,
    }
}

fn start_second_innings(state: &mut MatchState) -> Transition {
    let target = state.score + 1;
    let first = state.snapshot_innings();
    log::info!(
        "innings break: {} made {}, target {target}",
        state.batting_team().name,
        state.score_line()
    );

    let next_order = if state.player_is_batting() {
        state.batting_team_id = state.opponent_team.id.clone();
        state.opponent_roster.clone()
    } else {
        state.batting_team_id = state.player_team.id.clone();
        state.player_roster.clone()
    };

    state.innings1_data = Some(first);
    state.innings = 2;
    state.target = Some(target);
    state.score = 0;
    state.wickets = 0;
    state.overs = Overs::ZERO;
    state.batting_order = next_order;
    state.bowling_order.clear();
    state.on_strike_batsman_index = 0;
    state.current_bowler_index = None;
    state.commentary.log_end_of_innings(target);

    Transition::InningsBreak { target }
}

fn settle_chase(state: &mut MatchState) -> Transition {
    let Some(target) = state.target else {
        log::warn!("second innings has no target; skipping end-of-match check");
        return Transition::None;
    };

    let result = if state.score >= target {
        format!(
            "{} won by {} wickets.",
            state.batting_team().name,
            MAX_WICKETS.saturating_sub(state.wickets)
        )
    } else if state.innings_complete() {
        if state.score + 1 == target {
            "Match Tied!".to_string()
        } else {
            format!(
                "{} won by {} runs.",
                state.bowling_team().name,
                target - 1 - state.score
            )
        }
    } else {
        return Transition::None;
    };

    log::info!("match over: {result}");
    state.match_over = true;
    state.result_message = Some(result.clone());
    state.commentary.log_result(&result);
    Transition::MatchOver { result }
}
