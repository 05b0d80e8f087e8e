use crate::action::{tactic_batting_action, tactic_bowling_action, BallInput};
use crate::engine::{resolve_ball, upcoming_bowler, BallOutcome};
use crate::model::Player;
use crate::state::{MatchState, BALLS_PER_OVER, MAX_OVERS};
use rand::Rng;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HumanRole {
    Batting,
    Bowling,
}

/// Whether the next delivery needs a choice from the human, and for which
/// side.
pub fn human_to_act(state: &MatchState, player: &Player) -> Option<HumanRole> {
    if state.match_over {
        return None;
    }
    if state.player_is_batting() {
        return state
            .striker()
            .filter(|s| !s.is_out && s.player_name == player.name)
            .map(|_| HumanRole::Batting);
    }
    upcoming_bowler(state, player)
        .filter(|name| *name == player.name)
        .map(|_| HumanRole::Bowling)
}

fn run_over<R, F>(
    state: &mut MatchState,
    player: &Player,
    rng: &mut R,
    mut input_for: F,
) -> Vec<BallOutcome>
where
    R: Rng + ?Sized,
    F: FnMut(&MatchState, &mut R) -> BallInput,
{
    let mut balls = Vec::with_capacity(BALLS_PER_OVER as usize);
    for _ in 0..BALLS_PER_OVER {
        if state.match_over {
            break;
        }
        let input = input_for(state, rng);
        match resolve_ball(state, player, &input, rng) {
            Some(outcome) => balls.push(outcome),
            None => break,
        }
    }
    balls
}

/// Up to six balls with both sides on the AI policy.
pub fn simulate_ai_over<R: Rng + ?Sized>(
    state: &mut MatchState,
    player: &Player,
    rng: &mut R,
) -> Vec<BallOutcome> {
    run_over(state, player, rng, |_, _| BallInput::Simulate)
}

/// Up to six balls where the human's choices follow the declared tactic.
pub fn simulate_player_over<R: Rng + ?Sized>(
    state: &mut MatchState,
    player: &Player,
    rng: &mut R,
) -> Vec<BallOutcome> {
    let tactic = state.tactic;
    run_over(state, player, rng, |state, rng| {
        match human_to_act(state, player) {
            Some(HumanRole::Batting) => tactic_batting_action(tactic, rng).into(),
            Some(HumanRole::Bowling) => tactic_bowling_action(tactic, rng).into(),
            None => BallInput::Simulate,
        }
    })
}

/// Plays tactic-driven overs until the match ends. Returns the number of
/// balls bowled.
pub fn play_out<R: Rng + ?Sized>(state: &mut MatchState, player: &Player, rng: &mut R) -> usize {
    let max_overs = 2 * MAX_OVERS as usize + 1;
    let mut balls = 0;
    for _ in 0..max_overs {
        if state.match_over {
            break;
        }
        let bowled = simulate_player_over(state, player, rng).len();
        if bowled == 0 {
            log::warn!("no ball could be bowled; abandoning play-out");
            break;
        }
        balls += bowled;
    }
    balls
}
