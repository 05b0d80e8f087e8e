use crate::action::Tactic;
use crate::commentary::Commentary;
use crate::error::SetupError;
use crate::model::{Player, Team};
use crate::state::{
    BattingEntry, MatchState, Overs, PitchCondition, Toss, TossDecision, Weather, SQUAD_SIZE,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const AI_NAME_POOL: [&str; 12] = [
    "A. Jones",
    "B. Smith",
    "C. Patel",
    "D. Williams",
    "E. Khan",
    "F. Miller",
    "G. Taylor",
    "H. Ali",
    "I. Sharma",
    "J. Root",
    "K. Perera",
    "L. Ngidi",
];

/// Everything needed to start a match. Unset fields are drawn at random.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    pub player_team: Team,
    pub opponent_team: Team,
    #[serde(default)]
    pub tactic: Tactic,
    #[serde(default)]
    pub toss: Option<Toss>,
    #[serde(default)]
    pub pitch: Option<PitchCondition>,
    #[serde(default)]
    pub weather: Option<Weather>,
}

impl MatchSetup {
    pub fn new(player_team: Team, opponent_team: Team, tactic: Tactic) -> Self {
        Self {
            player_team,
            opponent_team,
            tactic,
            toss: None,
            pitch: None,
            weather: None,
        }
    }

    pub fn with_toss(mut self, winner_id: impl Into<String>, decision: TossDecision) -> Self {
        self.toss = Some(Toss {
            winner_id: winner_id.into(),
            decision,
        });
        self
    }

    pub fn with_conditions(mut self, pitch: PitchCondition, weather: Weather) -> Self {
        self.pitch = Some(pitch);
        self.weather = Some(weather);
        self
    }
}

fn validate(player: &Player, setup: &MatchSetup) -> Result<(), SetupError> {
    if player.name.trim().is_empty() {
        return Err(SetupError::EmptyPlayerName);
    }
    if !(1..=SQUAD_SIZE as u8).contains(&player.batting_position) {
        return Err(SetupError::BattingPositionOutOfRange(
            player.batting_position,
        ));
    }
    for team in [&setup.player_team, &setup.opponent_team] {
        if !(1..=100).contains(&team.strength) {
            return Err(SetupError::StrengthOutOfRange {
                team: team.id.clone(),
                strength: team.strength,
            });
        }
    }
    if setup.player_team.id == setup.opponent_team.id {
        return Err(SetupError::DuplicateTeamId(setup.player_team.id.clone()));
    }
    if let Some(toss) = &setup.toss {
        if toss.winner_id != setup.player_team.id && toss.winner_id != setup.opponent_team.id {
            return Err(SetupError::UnknownTossWinner(toss.winner_id.clone()));
        }
    }
    Ok(())
}

fn draw_toss<R: Rng + ?Sized>(setup: &MatchSetup, rng: &mut R) -> Toss {
    let winner_id = if rng.gen_bool(0.5) {
        setup.player_team.id.clone()
    } else {
        setup.opponent_team.id.clone()
    };
    let decision = if rng.gen_bool(0.5) {
        TossDecision::Bat
    } else {
        TossDecision::Bowl
    };
    Toss {
        winner_id,
        decision,
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RosterSide {
    /// The human's own XI: they take their batting position.
    Player,
    Opponent,
}

/// Eleven entries sorted by position. AI names fill every free slot from a
/// fresh shuffle of the pool, never reusing the human's name on either side.
pub fn build_roster<R: Rng + ?Sized>(
    player: &Player,
    side: RosterSide,
    rng: &mut R,
) -> Vec<BattingEntry> {
    let mut pool: Vec<&str> = AI_NAME_POOL
        .iter()
        .copied()
        .filter(|name| *name != player.name)
        .collect();
    pool.shuffle(rng);
    let mut names = pool.into_iter();

    (1..=SQUAD_SIZE as u8)
        .map(|position| {
            if side == RosterSide::Player && player.batting_position == position {
                BattingEntry::new(player.name.clone(), position)
            } else {
                BattingEntry::new(names.next().unwrap_or("Substitute"), position)
            }
        })
        .collect()
}

pub fn start_match<R: Rng + ?Sized>(
    player: &Player,
    setup: &MatchSetup,
    rng: &mut R,
) -> Result<MatchState, SetupError> {
    validate(player, setup)?;

    let toss = match &setup.toss {
        Some(toss) => toss.clone(),
        None => draw_toss(setup, rng),
    };
    let player_won_toss = toss.winner_id == setup.player_team.id;
    let player_bats_first = player_won_toss == (toss.decision == TossDecision::Bat);
    let batting_team_id = if player_bats_first {
        setup.player_team.id.clone()
    } else {
        setup.opponent_team.id.clone()
    };

    let player_roster = build_roster(player, RosterSide::Player, rng);
    let opponent_roster = build_roster(player, RosterSide::Opponent, rng);

    let pitch = match setup.pitch {
        Some(pitch) => pitch,
        None => *PitchCondition::ALL
            .choose(rng)
            .unwrap_or(&PitchCondition::Flat),
    };
    let weather = match setup.weather {
        Some(weather) => weather,
        None => *Weather::ALL.choose(rng).unwrap_or(&Weather::Sunny),
    };

    let toss_winner_name = if player_won_toss {
        &setup.player_team.name
    } else {
        &setup.opponent_team.name
    };
    let mut commentary = Commentary::new();
    commentary.log_toss(toss_winner_name, toss.decision);
    commentary.log_conditions(weather, pitch);

    log::info!(
        "{} v {}: {} won the toss and chose to {}; {} pitch, {} weather",
        setup.player_team.name,
        setup.opponent_team.name,
        toss_winner_name,
        toss.decision,
        pitch,
        weather
    );

    let batting_order = if player_bats_first {
        player_roster.clone()
    } else {
        opponent_roster.clone()
    };

    Ok(MatchState {
        player_team: setup.player_team.clone(),
        opponent_team: setup.opponent_team.clone(),
        toss_winner_id: toss.winner_id,
        toss_decision: toss.decision,
        tactic: setup.tactic,
        pitch_condition: pitch,
        weather,
        innings: 1,
        batting_team_id,
        score: 0,
        wickets: 0,
        overs: Overs::ZERO,
        target: None,
        batting_order,
        bowling_order: Vec::new(),
        current_bowler_index: None,
        on_strike_batsman_index: 0,
        innings1_data: None,
        player_roster,
        opponent_roster,
        commentary,
        match_over: false,
        result_message: None,
        last_ball_milestone: None,
    })
}

/// On-disk match file: the human player plus the match setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupFile {
    pub player: Player,
    #[serde(flatten)]
    pub setup: MatchSetup,
}
