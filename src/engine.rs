use crate::action::{
    random_ai_delivery, random_ai_shot, BallInput, DeliveryType, Line, Placement, ShotType,
};
use crate::actors::{ai_batsman_profile, ai_bowler_profile, BatsmanProfile, BowlerProfile};
use crate::commentary::{self, PRESSURE_PREFIX};
use crate::contest::{bucket, run_contest, Chase, ContestInput, Outcome};
use crate::error::SetupError;
use crate::lifecycle::{check_match_end, Transition};
use crate::model::Player;
use crate::profile::{resolve, EffectiveProfile};
use crate::setup::{start_match, MatchSetup};
use crate::state::{BallMilestone, BowlingEntry, MatchState};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Roster index of the first AI bowler; the attack cycles through four.
const FIRST_AI_BOWLER_SLOT: usize = 7;
const AI_BOWLER_ROTATION: u32 = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct BallOutcome {
    pub outcome: Outcome,
    pub striker: String,
    pub bowler: String,
    pub milestone: Option<BallMilestone>,
    pub commentary: String,
    pub transition: Transition,
}

impl BallOutcome {
    pub fn runs(&self) -> u32 {
        self.outcome.runs()
    }

    pub fn is_wicket(&self) -> bool {
        self.outcome.is_wicket()
    }
}

/// True when the human bowls the over about to start.
fn human_takes_over(state: &MatchState, player: &Player) -> bool {
    !state.player_is_batting() && player.role.can_bowl() && state.overs.completed() % 2 == 0
}

fn pick_bowler_name(state: &MatchState, player: &Player) -> Option<String> {
    if human_takes_over(state, player) {
        return Some(player.name.clone());
    }
    let roster = state.bowling_roster();
    let start = state.overs.completed() % AI_BOWLER_ROTATION;
    // A human in the tail keeps their slot but is never bowled by the AI.
    (0..AI_BOWLER_ROTATION)
        .map(|step| FIRST_AI_BOWLER_SLOT + ((start + step) % AI_BOWLER_ROTATION) as usize)
        .filter_map(|slot| roster.get(slot))
        .find(|entry| entry.player_name != player.name)
        .or_else(|| roster.last())
        .map(|entry| entry.player_name.clone())
}

fn over_just_completed(state: &MatchState) -> bool {
    state.overs.is_over_boundary() && state.overs.completed() > 0
}

fn needs_new_bowler(state: &MatchState) -> bool {
    state.current_bowler_index.is_none() || over_just_completed(state)
}

/// Who will bowl the next delivery, without changing the state.
pub fn upcoming_bowler(state: &MatchState, player: &Player) -> Option<String> {
    if needs_new_bowler(state) {
        pick_bowler_name(state, player)
    } else {
        state.current_bowler().map(|b| b.player_name.clone())
    }
}

/// Brings on a bowler before the first ball of the innings and after every
/// completed over. Returns the active bowler's index.
pub fn rotate_bowler(state: &mut MatchState, player: &Player) -> Option<usize> {
    if !needs_new_bowler(state) {
        return state.current_bowler_index;
    }
    let over_completed = over_just_completed(state);

    let name = pick_bowler_name(state, player)?;
    let idx = match state
        .bowling_order
        .iter()
        .position(|b| b.player_name == name)
    {
        Some(idx) => idx,
        None => {
            state.bowling_order.push(BowlingEntry::new(name.clone()));
            state.bowling_order.len() - 1
        }
    };
    state.current_bowler_index = Some(idx);
    if over_completed {
        state.commentary.log_end_of_over();
        state.commentary.log_new_bowler(&name);
    }
    Some(idx)
}

/// Next batsman after a wicket: first entry neither out nor yet faced.
fn next_batsman(state: &MatchState) -> Option<usize> {
    state
        .batting_order
        .iter()
        .position(|b| !b.is_out && b.balls == 0)
}

fn swap_strike(state: &mut MatchState) {
    if let Some(idx) = state.non_striker_index() {
        state.on_strike_batsman_index = idx;
    }
}

fn batting_choice<R: Rng + ?Sized>(
    input: &BallInput,
    human_batting: bool,
    rng: &mut R,
) -> (ShotType, Option<Placement>) {
    match input.batting() {
        Some(action) if human_batting => (action.shot, Some(action.placement)),
        _ => (random_ai_shot(rng), None),
    }
}

fn bowling_choice<R: Rng + ?Sized>(
    input: &BallInput,
    human_bowling: bool,
    rng: &mut R,
) -> (DeliveryType, Option<Line>) {
    match input.bowling() {
        Some(action) if human_bowling => (action.delivery, Some(action.line)),
        _ => (random_ai_delivery(rng), None),
    }
}

fn outcome_text(outcome: Outcome, batsman: &str, bowler: &str) -> String {
    match outcome {
        Outcome::Wicket => commentary::wicket_text(batsman, bowler),
        Outcome::Dot => commentary::dot_text(bowler),
        Outcome::Single => commentary::single_text(batsman),
        Outcome::Two => commentary::two_text(),
        Outcome::Gap(runs) => commentary::gap_text(runs),
        Outcome::Four => commentary::four_text(batsman),
        Outcome::Six => commentary::six_text(batsman),
    }
}

fn milestone_crossed(before: u32, after: u32) -> Option<BallMilestone> {
    if before < 100 && after >= 100 {
        Some(BallMilestone::Century)
    } else if before < 50 && after >= 50 {
        Some(BallMilestone::Fifty)
    } else {
        None
    }
}

/// Resolves one delivery against `state` and runs the lifecycle check.
///
/// Returns `None` without touching the state when the match is already over
/// or nobody can face or bowl.
pub fn resolve_ball<R: Rng + ?Sized>(
    state: &mut MatchState,
    player: &Player,
    input: &BallInput,
    rng: &mut R,
) -> Option<BallOutcome> {
    if state.match_over {
        return None;
    }
    let striker_idx = state.on_strike_batsman_index;
    let striker = match state.batting_order.get(striker_idx) {
        Some(entry) if !entry.is_out => entry.clone(),
        _ => {
            log::warn!("no batsman on strike at index {striker_idx}; ball skipped");
            return None;
        }
    };

    state.last_ball_milestone = None;
    let Some(bowler_idx) = rotate_bowler(state, player) else {
        log::warn!("bowling side has no one to bowl; ball skipped");
        return None;
    };
    let bowler = state.bowling_order[bowler_idx].clone();

    let human_batting = state.player_is_batting() && striker.player_name == player.name;
    let human_bowling = !state.player_is_batting() && bowler.player_name == player.name;

    let effective: Option<EffectiveProfile> =
        (human_batting || human_bowling).then(|| resolve(player));
    let batsman = match (&effective, human_batting) {
        (Some(eff), true) => BatsmanProfile::from_effective(eff),
        _ => ai_batsman_profile(striker.position, state.batting_team().strength, rng),
    };
    let bowler_profile = match (&effective, human_bowling) {
        (Some(eff), true) => BowlerProfile::from_effective(eff),
        _ => ai_bowler_profile(state.bowling_team().strength, rng),
    };

    let applicable = (human_batting && input.batting().is_some())
        || (human_bowling && input.bowling().is_some());
    if matches!(input, BallInput::Action(_)) && !applicable {
        log::warn!("ignoring {input:?}: the human is not acting on that side this ball");
    }
    let (shot, placement) = batting_choice(input, human_batting, rng);
    let (delivery, line) = bowling_choice(input, human_bowling, rng);

    let chase = match (state.innings, state.target) {
        (2, Some(target)) => Some(Chase {
            target,
            score: state.score,
            wickets: state.wickets,
            overs: state.overs,
        }),
        _ => None,
    };
    let contest_input = ContestInput {
        batsman,
        bowler: bowler_profile,
        balls_faced: striker.balls,
        balls_bowled: bowler.overs.total_balls(),
        pitch: state.pitch_condition,
        weather: state.weather,
        chase,
        ai_bias: (!human_batting).then(|| state.tactic.ai_batting_bias()),
        shot,
        placement,
        delivery,
        line,
    };
    let result = run_contest(&contest_input, rng);
    let outcome = bucket(&result, rng);
    let runs = outcome.runs();

    let mut text = String::new();
    if result.pressure_mounting() {
        text.push_str(PRESSURE_PREFIX);
    }
    text.push_str(&outcome_text(outcome, &striker.player_name, &bowler.player_name));

    {
        let entry = &mut state.batting_order[striker_idx];
        entry.balls += 1;
        entry.runs += runs;
    }
    let milestone = if human_batting {
        milestone_crossed(striker.runs, striker.runs + runs)
    } else {
        None
    };
    match milestone {
        Some(BallMilestone::Century) => text.push_str(&commentary::century_text(&player.name)),
        Some(BallMilestone::Fifty) => text.push_str(&commentary::fifty_text(&player.name)),
        None => {}
    }
    state.last_ball_milestone = milestone;

    state.score += runs;
    let ball_at = state.overs;
    let over_complete = state.overs.add_ball();
    {
        let figures = &mut state.bowling_order[bowler_idx];
        figures.runs += runs;
        figures.overs.add_ball();
        if outcome.is_wicket() {
            figures.wickets += 1;
        }
    }

    if outcome.is_wicket() {
        state.batting_order[striker_idx].is_out = true;
        state.wickets += 1;
        if let Some(next) = next_batsman(state) {
            state.on_strike_batsman_index = next;
        }
    } else if runs % 2 == 1 {
        swap_strike(state);
    }

    state.commentary.log_ball(ball_at, &text);

    if over_complete {
        swap_strike(state);
    }

    log::debug!(
        "{}.{} {} to {}: {:?}, {}",
        ball_at.completed(),
        ball_at.balls() + 1,
        bowler.player_name,
        striker.player_name,
        outcome,
        state.score_line()
    );

    let transition = check_match_end(state);
    Some(BallOutcome {
        outcome,
        striker: striker.player_name,
        bowler: bowler.player_name,
        milestone,
        commentary: text,
        transition,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// `None` once the match is over.
    pub ball: Option<BallOutcome>,
    pub match_over: bool,
}

/// Owns a match and its random source, stepping one ball at a time.
pub struct MatchEngine {
    state: MatchState,
    player: Player,
    rng: SmallRng,
}

impl MatchEngine {
    pub fn new(state: MatchState, player: Player, seed: u64) -> Self {
        Self {
            state,
            player,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws toss and conditions from the engine's own seeded source.
    pub fn start(player: Player, setup: &MatchSetup, seed: u64) -> Result<Self, SetupError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let state = start_match(&player, setup, &mut rng)?;
        Ok(Self { state, player, rng })
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn into_state(self) -> MatchState {
        self.state
    }

    pub fn step(&mut self, input: BallInput) -> StepResult {
        let ball = resolve_ball(&mut self.state, &self.player, &input, &mut self.rng);
        StepResult {
            ball,
            match_over: self.state.match_over,
        }
    }

    pub fn simulate_ai_over(&mut self) -> Vec<BallOutcome> {
        crate::autoplay::simulate_ai_over(&mut self.state, &self.player, &mut self.rng)
    }

    pub fn simulate_player_over(&mut self) -> Vec<BallOutcome> {
        crate::autoplay::simulate_player_over(&mut self.state, &self.player, &mut self.rng)
    }

    pub fn play_out(&mut self) {
        crate::autoplay::play_out(&mut self.state, &self.player, &mut self.rng);
    }
}
