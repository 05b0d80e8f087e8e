use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Defensive,
    Normal,
    Aggressive,
    Single,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    OffSide,
    OnSide,
    Straight,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    SafeDelivery,
    StandardDelivery,
    AttackingDelivery,
    Yorker,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Line {
    OutsideOff,
    OnStump,
    LegSide,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BattingAction {
    #[serde(rename = "type")]
    pub shot: ShotType,
    pub placement: Placement,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BowlingAction {
    #[serde(rename = "type")]
    pub delivery: DeliveryType,
    pub line: Line,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerAction {
    Batting(BattingAction),
    Bowling(BowlingAction),
}

/// What the caller hands the engine for one delivery.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BallInput {
    Action(PlayerAction),
    /// Both ends act on the AI policy.
    Simulate,
}

impl From<PlayerAction> for BallInput {
    fn from(action: PlayerAction) -> Self {
        BallInput::Action(action)
    }
}

impl From<BattingAction> for BallInput {
    fn from(action: BattingAction) -> Self {
        BallInput::Action(PlayerAction::Batting(action))
    }
}

impl From<BowlingAction> for BallInput {
    fn from(action: BowlingAction) -> Self {
        BallInput::Action(PlayerAction::Bowling(action))
    }
}

impl BallInput {
    pub fn batting(&self) -> Option<BattingAction> {
        match self {
            BallInput::Action(PlayerAction::Batting(a)) => Some(*a),
            _ => None,
        }
    }

    pub fn bowling(&self) -> Option<BowlingAction> {
        match self {
            BallInput::Action(PlayerAction::Bowling(a)) => Some(*a),
            _ => None,
        }
    }
}

/// Pre-declared match approach of the human's side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tactic {
    Aggressive,
    #[default]
    Balanced,
    Defensive,
}

impl Tactic {
    pub const ALL: [Tactic; 3] = [Tactic::Aggressive, Tactic::Balanced, Tactic::Defensive];

    /// Bias applied to AI batting scores.
    pub fn ai_batting_bias(self) -> f64 {
        match self {
            Tactic::Aggressive => 1.1,
            Tactic::Balanced => 1.0,
            Tactic::Defensive => 0.9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tactic::Aggressive => "aggressive",
            Tactic::Balanced => "balanced",
            Tactic::Defensive => "defensive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aggressive" => Some(Tactic::Aggressive),
            "balanced" => Some(Tactic::Balanced),
            "defensive" => Some(Tactic::Defensive),
            _ => None,
        }
    }
}

const AI_SHOTS: [ShotType; 3] = [ShotType::Defensive, ShotType::Normal, ShotType::Aggressive];
const AI_DELIVERIES: [DeliveryType; 3] = [
    DeliveryType::SafeDelivery,
    DeliveryType::StandardDelivery,
    DeliveryType::AttackingDelivery,
];
const PLACEMENTS: [Placement; 3] = [Placement::OffSide, Placement::OnSide, Placement::Straight];
const LINES: [Line; 3] = [Line::OutsideOff, Line::OnStump, Line::LegSide];

pub fn random_ai_shot<R: Rng + ?Sized>(rng: &mut R) -> ShotType {
    *AI_SHOTS.choose(rng).unwrap_or(&ShotType::Normal)
}

pub fn random_ai_delivery<R: Rng + ?Sized>(rng: &mut R) -> DeliveryType {
    *AI_DELIVERIES
        .choose(rng)
        .unwrap_or(&DeliveryType::StandardDelivery)
}

pub fn random_placement<R: Rng + ?Sized>(rng: &mut R) -> Placement {
    *PLACEMENTS.choose(rng).unwrap_or(&Placement::Straight)
}

pub fn random_line<R: Rng + ?Sized>(rng: &mut R) -> Line {
    *LINES.choose(rng).unwrap_or(&Line::OnStump)
}

/// Batting choice the autoplayer makes on the human's behalf.
pub fn tactic_batting_action<R: Rng + ?Sized>(tactic: Tactic, rng: &mut R) -> BattingAction {
    let shot = match tactic {
        Tactic::Aggressive if rng.gen::<f64>() > 0.4 => ShotType::Aggressive,
        Tactic::Aggressive => ShotType::Normal,
        Tactic::Defensive if rng.gen::<f64>() > 0.4 => ShotType::Defensive,
        Tactic::Defensive => ShotType::Single,
        Tactic::Balanced => ShotType::Normal,
    };
    BattingAction {
        shot,
        placement: random_placement(rng),
    }
}

/// Bowling choice the autoplayer makes on the human's behalf.
pub fn tactic_bowling_action<R: Rng + ?Sized>(tactic: Tactic, rng: &mut R) -> BowlingAction {
    let delivery = match tactic {
        Tactic::Aggressive if rng.gen::<f64>() > 0.4 => DeliveryType::AttackingDelivery,
        Tactic::Defensive if rng.gen::<f64>() > 0.4 => DeliveryType::SafeDelivery,
        _ => DeliveryType::StandardDelivery,
    };
    BowlingAction {
        delivery,
        line: random_line(rng),
    }
}
