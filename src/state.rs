use crate::action::Tactic;
use crate::commentary::Commentary;
use crate::error::OversParseError;
use crate::model::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_OVERS: u32 = 20;
pub const MAX_WICKETS: u32 = 10;
pub const BALLS_PER_OVER: u8 = 6;
pub const SQUAD_SIZE: usize = 11;

/// Overs in cricket notation: `18.3` is 18 completed overs and 3 balls.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Overs {
    completed: u32,
    balls: u8,
}

impl Overs {
    pub const ZERO: Overs = Overs {
        completed: 0,
        balls: 0,
    };

    pub fn new(completed: u32, balls: u8) -> Result<Self, OversParseError> {
        if balls >= BALLS_PER_OVER {
            return Err(OversParseError::BallOutOfRange(
                completed as f64 + balls as f64 / 10.0,
            ));
        }
        Ok(Self { completed, balls })
    }

    pub fn whole(completed: u32) -> Self {
        Self {
            completed,
            balls: 0,
        }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn balls(&self) -> u8 {
        self.balls
    }

    pub fn total_balls(&self) -> u32 {
        self.completed * BALLS_PER_OVER as u32 + self.balls as u32
    }

    /// Overs bowled as a true fraction (18.3 -> 18.5).
    pub fn elapsed(&self) -> f64 {
        self.total_balls() as f64 / BALLS_PER_OVER as f64
    }

    pub fn is_over_boundary(&self) -> bool {
        self.balls == 0
    }

    /// Advance by one delivery. Returns true when that ball completed an over.
    pub fn add_ball(&mut self) -> bool {
        if self.balls + 1 == BALLS_PER_OVER {
            self.completed += 1;
            self.balls = 0;
            true
        } else {
            self.balls += 1;
            false
        }
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.completed, self.balls)
    }
}

impl From<Overs> for f64 {
    fn from(overs: Overs) -> Self {
        overs.completed as f64 + overs.balls as f64 / 10.0
    }
}

impl TryFrom<f64> for Overs {
    type Error = OversParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 {
            return Err(OversParseError::Invalid(value));
        }
        let completed = value.trunc();
        let balls = ((value - completed) * 10.0).round() as u8;
        if balls >= BALLS_PER_OVER {
            return Err(OversParseError::BallOutOfRange(value));
        }
        Ok(Self {
            completed: completed as u32,
            balls,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PitchCondition {
    Flat,
    Green,
    Dusty,
}

impl PitchCondition {
    pub const ALL: [PitchCondition; 3] = [
        PitchCondition::Flat,
        PitchCondition::Green,
        PitchCondition::Dusty,
    ];
}

impl fmt::Display for PitchCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PitchCondition::Flat => "Flat",
            PitchCondition::Green => "Green",
            PitchCondition::Dusty => "Dusty",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Overcast,
}

impl Weather {
    pub const ALL: [Weather; 2] = [Weather::Sunny, Weather::Overcast];
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Sunny => f.write_str("Sunny"),
            Weather::Overcast => f.write_str("Overcast"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TossDecision {
    Bat,
    Bowl,
}

impl fmt::Display for TossDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TossDecision::Bat => f.write_str("bat"),
            TossDecision::Bowl => f.write_str("bowl"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toss {
    pub winner_id: String,
    pub decision: TossDecision,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattingEntry {
    pub player_name: String,
    pub runs: u32,
    pub balls: u32,
    pub is_out: bool,
    /// Fixed 1..=11 slot in the order.
    pub position: u8,
}

impl BattingEntry {
    pub fn new(player_name: impl Into<String>, position: u8) -> Self {
        Self {
            player_name: player_name.into(),
            runs: 0,
            balls: 0,
            is_out: false,
            position,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingEntry {
    pub player_name: String,
    pub overs: Overs,
    pub runs: u32,
    pub wickets: u32,
}

impl BowlingEntry {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            overs: Overs::ZERO,
            runs: 0,
            wickets: 0,
        }
    }
}

/// Frozen card of a completed innings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InningsData {
    pub batting_team_id: String,
    pub batting_card: Vec<BattingEntry>,
    pub bowling_card: Vec<BowlingEntry>,
    pub total_score: u32,
    pub wickets: u32,
    pub overs: Overs,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BallMilestone {
    Fifty,
    Century,
}

impl fmt::Display for BallMilestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BallMilestone::Fifty => f.write_str("FIFTY!"),
            BallMilestone::Century => f.write_str("CENTURY!"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchPhase {
    Innings1,
    Innings2Break,
    Innings2,
    MatchOver,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub player_team: Team,
    pub opponent_team: Team,
    pub toss_winner_id: String,
    pub toss_decision: TossDecision,
    pub tactic: Tactic,
    pub pitch_condition: PitchCondition,
    pub weather: Weather,

    pub innings: u8,
    pub batting_team_id: String,
    pub score: u32,
    pub wickets: u32,
    pub overs: Overs,
    pub target: Option<u32>,

    pub batting_order: Vec<BattingEntry>,
    pub bowling_order: Vec<BowlingEntry>,
    pub current_bowler_index: Option<usize>,
    pub on_strike_batsman_index: usize,

    pub innings1_data: Option<InningsData>,
    pub player_roster: Vec<BattingEntry>,
    pub opponent_roster: Vec<BattingEntry>,

    pub commentary: Commentary,
    pub match_over: bool,
    pub result_message: Option<String>,
    pub last_ball_milestone: Option<BallMilestone>,
}

impl MatchState {
    pub fn phase(&self) -> MatchPhase {
        if self.match_over {
            MatchPhase::MatchOver
        } else if self.innings == 1 {
            MatchPhase::Innings1
        } else if self.overs == Overs::ZERO && self.bowling_order.is_empty() {
            MatchPhase::Innings2Break
        } else {
            MatchPhase::Innings2
        }
    }

    pub fn player_is_batting(&self) -> bool {
        self.batting_team_id == self.player_team.id
    }

    pub fn batting_team(&self) -> &Team {
        if self.player_is_batting() {
            &self.player_team
        } else {
            &self.opponent_team
        }
    }

    pub fn bowling_team(&self) -> &Team {
        if self.player_is_batting() {
            &self.opponent_team
        } else {
            &self.player_team
        }
    }

    pub fn bowling_roster(&self) -> &[BattingEntry] {
        if self.player_is_batting() {
            &self.opponent_roster
        } else {
            &self.player_roster
        }
    }

    pub fn striker(&self) -> Option<&BattingEntry> {
        self.batting_order.get(self.on_strike_batsman_index)
    }

    pub fn current_bowler(&self) -> Option<&BowlingEntry> {
        self.current_bowler_index
            .and_then(|idx| self.bowling_order.get(idx))
    }

    /// The two not-out batsmen at the crease, earliest in the order first.
    pub fn at_crease(&self) -> Vec<usize> {
        self.batting_order
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_out)
            .map(|(idx, _)| idx)
            .take(2)
            .collect()
    }

    pub fn non_striker_index(&self) -> Option<usize> {
        self.at_crease()
            .into_iter()
            .find(|idx| *idx != self.on_strike_batsman_index)
    }

    pub fn innings_complete(&self) -> bool {
        self.wickets >= MAX_WICKETS || self.overs.completed() >= MAX_OVERS
    }

    pub fn score_line(&self) -> String {
        format!("{}/{} ({} ov)", self.score, self.wickets, self.overs)
    }

    pub fn snapshot_innings(&self) -> InningsData {
        InningsData {
            batting_team_id: self.batting_team_id.clone(),
            batting_card: self.batting_order.clone(),
            bowling_card: self.bowling_order.clone(),
            total_score: self.score,
            wickets: self.wickets,
            overs: self.overs,
        }
    }
}
