//! Scoring model for a single delivery.
//!
//! Every function here is pure apart from the injected random source. The
//! engine gathers a [`ContestInput`] for the ball, calls [`run_contest`] and
//! then [`bucket`] to turn the contest value into an [`Outcome`].

use crate::action::{DeliveryType, Line, Placement, ShotType};
use crate::actors::{BatsmanProfile, BowlerProfile};
use crate::state::{Overs, PitchCondition, Weather, MAX_OVERS};
use rand::Rng;

pub const BATSMAN_FATIGUE_ONSET: u32 = 20;
pub const BOWLER_FATIGUE_ONSET: u32 = 18;
pub const PRESSURE_COMMENT_THRESHOLD: f64 = 0.1;
pub const BASE_WICKET_CHANCE: f64 = 0.08;
pub const WICKET_CONTEST_CEILING: f64 = -5.0;

/// Second-innings chase context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chase {
    pub target: u32,
    pub score: u32,
    pub wickets: u32,
    pub overs: Overs,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContestInput {
    pub batsman: BatsmanProfile,
    pub bowler: BowlerProfile,
    pub balls_faced: u32,
    pub balls_bowled: u32,
    pub pitch: PitchCondition,
    pub weather: Weather,
    pub chase: Option<Chase>,
    /// Tactic bias, present only when the batsman is AI-controlled.
    pub ai_bias: Option<f64>,
    pub shot: ShotType,
    pub placement: Option<Placement>,
    pub delivery: DeliveryType,
    pub line: Option<Line>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContestResult {
    pub contest: f64,
    pub wicket: bool,
    pub pressure_effect: f64,
}

impl ContestResult {
    pub fn pressure_mounting(&self) -> bool {
        self.pressure_effect > PRESSURE_COMMENT_THRESHOLD
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Wicket,
    Dot,
    Single,
    Two,
    /// Pushed into the gap: 3 runs or 1.
    Gap(u32),
    Four,
    Six,
}

impl Outcome {
    pub fn runs(self) -> u32 {
        match self {
            Outcome::Wicket | Outcome::Dot => 0,
            Outcome::Single => 1,
            Outcome::Two => 2,
            Outcome::Gap(runs) => runs,
            Outcome::Four => 4,
            Outcome::Six => 6,
        }
    }

    pub fn is_wicket(self) -> bool {
        matches!(self, Outcome::Wicket)
    }
}

pub fn base_batting_score(batsman: &BatsmanProfile) -> f64 {
    batsman.timing * 0.6 + batsman.power * 0.4
}

pub fn base_bowling_score(bowler: &BowlerProfile) -> f64 {
    bowler.accuracy * 0.7 + bowler.stock_ball() * 0.3
}

/// Pitch and weather multipliers as (batting, bowling).
pub fn condition_multipliers(
    pitch: PitchCondition,
    weather: Weather,
    bowler: &BowlerProfile,
) -> (f64, f64) {
    match pitch {
        PitchCondition::Green if weather == Weather::Overcast => (1.0, 1.15),
        PitchCondition::Green => (1.0, 1.0),
        PitchCondition::Dusty if bowler.spin > bowler.pace => (1.0, 1.2),
        PitchCondition::Dusty => (1.0, 0.9),
        PitchCondition::Flat => (1.1, 1.0),
    }
}

/// Multiplier left after fatigue; 1.0 until `onset` balls.
pub fn fatigue_factor(balls: u32, onset: u32, fitness: f64) -> f64 {
    let excess = (balls as f64 - onset as f64) / 100.0;
    1.0 - excess.max(0.0) * (1.0 - fitness / 125.0)
}

pub fn mental_adjustment(batsman: &BatsmanProfile) -> f64 {
    (batsman.aggression - 50.0) * 0.1 + (batsman.temperament - 50.0) * 0.1
}

/// Runs needed over overs left, with overs read in cricket notation
/// (18.3 leaves 1.7). Floored at one ball so the rate stays finite.
pub fn required_run_rate(chase: &Chase) -> f64 {
    let needed = chase.target as f64 - chase.score as f64;
    let remaining = (MAX_OVERS as f64 - f64::from(chase.overs)).max(0.1);
    needed / remaining
}

/// Fractional penalty applied to the batting score under chase pressure.
pub fn pressure_effect(chase: &Chase, pressure_handling: f64) -> f64 {
    let rrr = required_run_rate(chase);
    let pressure = ((rrr - 9.0) * 5.0 + (chase.wickets as f64 - 6.0) * 4.0).max(0.0);
    (pressure - pressure_handling).max(0.0) / 100.0
}

/// (batting multiplier, wicket-chance multiplier)
pub fn shot_multipliers(shot: ShotType) -> (f64, f64) {
    match shot {
        ShotType::Aggressive => (1.25, 2.5),
        ShotType::Defensive => (0.6, 0.7),
        ShotType::Single => (0.8, 1.0),
        ShotType::Normal => (1.0, 1.0),
    }
}

pub fn delivery_multiplier(delivery: DeliveryType) -> f64 {
    match delivery {
        DeliveryType::AttackingDelivery => 1.2,
        DeliveryType::Yorker => 1.3,
        DeliveryType::SafeDelivery => 0.8,
        DeliveryType::StandardDelivery => 1.0,
    }
}

pub fn run_contest<R: Rng + ?Sized>(input: &ContestInput, rng: &mut R) -> ContestResult {
    let (bat_cond, bowl_cond) = condition_multipliers(input.pitch, input.weather, &input.bowler);
    let mut batting = base_batting_score(&input.batsman) * bat_cond;
    let mut bowling = base_bowling_score(&input.bowler) * bowl_cond;

    batting *= fatigue_factor(
        input.balls_faced,
        BATSMAN_FATIGUE_ONSET,
        input.batsman.fitness,
    );
    bowling *= fatigue_factor(input.balls_bowled, BOWLER_FATIGUE_ONSET, input.bowler.fitness);

    batting += mental_adjustment(&input.batsman);

    let pressure = input
        .chase
        .map(|chase| pressure_effect(&chase, input.batsman.pressure_handling))
        .unwrap_or(0.0);
    batting *= 1.0 - pressure;

    if let Some(bias) = input.ai_bias {
        batting *= bias;
    }

    let mut wicket = false;
    let (shot_mult, wicket_modifier) = shot_multipliers(input.shot);
    batting *= shot_mult;
    // Edged behind.
    if input.shot == ShotType::Aggressive
        && input.placement == Some(Placement::OffSide)
        && rng.gen::<f64>() < 0.1
    {
        wicket = true;
    }

    bowling *= delivery_multiplier(input.delivery);
    if input.delivery == DeliveryType::Yorker
        && input.line == Some(Line::OnStump)
        && input.bowler.accuracy > 75.0
        && rng.gen::<f64>() < 0.1
    {
        wicket = true;
    }

    let contest = batting - bowling + rng.gen_range(-10.0..10.0);

    if !wicket
        && contest < WICKET_CONTEST_CEILING
        && rng.gen::<f64>() < BASE_WICKET_CHANCE * wicket_modifier
    {
        wicket = true;
    }

    ContestResult {
        contest,
        wicket,
        pressure_effect: pressure,
    }
}

pub fn bucket<R: Rng + ?Sized>(result: &ContestResult, rng: &mut R) -> Outcome {
    if result.wicket {
        return Outcome::Wicket;
    }
    let c = result.contest;
    if c < 10.0 {
        Outcome::Dot
    } else if c < 20.0 {
        Outcome::Single
    } else if c < 28.0 {
        Outcome::Two
    } else if c < 35.0 {
        Outcome::Gap(if rng.gen::<f64>() > 0.8 { 3 } else { 1 })
    } else if c < 45.0 {
        Outcome::Four
    } else {
        Outcome::Six
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make_batsman(skill: f64) -> BatsmanProfile {
        BatsmanProfile {
            timing: skill,
            power: skill,
            aggression: 50.0,
            temperament: 50.0,
            pressure_handling: 50.0,
            fitness: 60.0,
        }
    }

    fn make_bowler(pace: f64, spin: f64) -> BowlerProfile {
        BowlerProfile {
            pace,
            accuracy: 60.0,
            spin,
            fitness: 60.0,
        }
    }

    fn make_input(batsman: BatsmanProfile, bowler: BowlerProfile) -> ContestInput {
        ContestInput {
            batsman,
            bowler,
            balls_faced: 0,
            balls_bowled: 0,
            pitch: PitchCondition::Green,
            weather: Weather::Sunny,
            chase: None,
            ai_bias: None,
            shot: ShotType::Normal,
            placement: Some(Placement::Straight),
            delivery: DeliveryType::StandardDelivery,
            line: Some(Line::OutsideOff),
        }
    }

    #[test]
    fn base_scores_weight_components() {
        let bat = BatsmanProfile {
            timing: 80.0,
            power: 50.0,
            ..make_batsman(0.0)
        };
        assert!((base_batting_score(&bat) - 68.0).abs() < 1e-9);
        let bowl = make_bowler(70.0, 40.0);
        assert!((base_bowling_score(&bowl) - 63.0).abs() < 1e-9);
    }

    #[test]
    fn dusty_pitch_favours_spinners() {
        let spinner = make_bowler(40.0, 70.0);
        let seamer = make_bowler(70.0, 40.0);
        assert_eq!(
            condition_multipliers(PitchCondition::Dusty, Weather::Sunny, &spinner),
            (1.0, 1.2)
        );
        assert_eq!(
            condition_multipliers(PitchCondition::Dusty, Weather::Sunny, &seamer),
            (1.0, 0.9)
        );
        assert_eq!(
            condition_multipliers(PitchCondition::Green, Weather::Overcast, &seamer),
            (1.0, 1.15)
        );
        assert_eq!(
            condition_multipliers(PitchCondition::Flat, Weather::Overcast, &seamer),
            (1.1, 1.0)
        );
    }

    #[test]
    fn fatigue_starts_after_onset() {
        assert_eq!(fatigue_factor(20, BATSMAN_FATIGUE_ONSET, 50.0), 1.0);
        let tired = fatigue_factor(70, BATSMAN_FATIGUE_ONSET, 50.0);
        assert!((tired - (1.0 - 0.5 * 0.6)).abs() < 1e-9);
        let fit = fatigue_factor(70, BATSMAN_FATIGUE_ONSET, 100.0);
        assert!(fit > tired);
    }

    #[test]
    fn run_rate_reads_overs_as_cricket_decimal() {
        let chase = Chase {
            target: 150,
            score: 100,
            wickets: 7,
            overs: Overs::new(18, 3).unwrap(),
        };
        // 50 needed with 1.7 left.
        let rrr = required_run_rate(&chase);
        assert!((rrr - 50.0 / 1.7).abs() < 1e-9);
        let pressure = (rrr - 9.0) * 5.0 + 4.0;
        let effect = pressure_effect(&chase, 30.0);
        assert!((effect - (pressure - 30.0) / 100.0).abs() < 1e-9);

        let last_over = Chase {
            target: 150,
            score: 140,
            wickets: 3,
            overs: Overs::new(19, 5).unwrap(),
        };
        assert!((required_run_rate(&last_over) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn easy_chase_has_no_pressure() {
        let chase = Chase {
            target: 120,
            score: 100,
            wickets: 2,
            overs: Overs::whole(10),
        };
        assert_eq!(pressure_effect(&chase, 0.0), 0.0);
    }

    #[test]
    fn last_ball_chase_rate_is_finite() {
        let chase = Chase {
            target: 150,
            score: 140,
            wickets: 3,
            overs: Overs::whole(20),
        };
        assert!(required_run_rate(&chase).is_finite());
    }

    #[test]
    fn bucket_boundaries() {
        let mut rng = SmallRng::seed_from_u64(1);
        let at = |contest| ContestResult {
            contest,
            wicket: false,
            pressure_effect: 0.0,
        };
        assert_eq!(bucket(&at(9.99), &mut rng), Outcome::Dot);
        assert_eq!(bucket(&at(10.0), &mut rng), Outcome::Single);
        assert_eq!(bucket(&at(27.9), &mut rng), Outcome::Two);
        assert!(matches!(bucket(&at(30.0), &mut rng), Outcome::Gap(1 | 3)));
        assert_eq!(bucket(&at(44.0), &mut rng), Outcome::Four);
        assert_eq!(bucket(&at(45.0), &mut rng), Outcome::Six);
        let out = ContestResult {
            wicket: true,
            ..at(60.0)
        };
        assert_eq!(bucket(&out, &mut rng), Outcome::Wicket);
    }

    #[test]
    fn dominant_batsman_never_loses_wicket_on_normal_shot() {
        let mut rng = SmallRng::seed_from_u64(9);
        let input = make_input(make_batsman(100.0), make_bowler(10.0, 10.0));
        for _ in 0..500 {
            let result = run_contest(&input, &mut rng);
            assert!(!result.wicket);
            assert!(result.contest >= 45.0);
        }
    }

    fn wickets_in(input: &ContestInput, seed: u64, balls: usize) -> usize {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..balls)
            .filter(|_| run_contest(input, &mut rng).wicket)
            .count()
    }

    #[test]
    fn aggressive_shot_to_off_side_can_edge_behind() {
        // Contest stays far above the ceiling, so only the edge roll can take a wicket.
        let base = ContestInput {
            shot: ShotType::Aggressive,
            ..make_input(make_batsman(100.0), make_bowler(10.0, 10.0))
        };
        let off_side = ContestInput {
            placement: Some(Placement::OffSide),
            ..base
        };
        let on_side = ContestInput {
            placement: Some(Placement::OnSide),
            ..base
        };
        let edged = wickets_in(&off_side, 31, 2000);
        assert!((120..=300).contains(&edged), "{edged} edges in 2000");
        assert_eq!(wickets_in(&on_side, 31, 2000), 0);
    }

    #[test]
    fn accurate_yorker_on_the_stumps_can_bowl_a_batsman() {
        let yorker = |accuracy, line| ContestInput {
            bowler: BowlerProfile {
                accuracy,
                ..make_bowler(10.0, 10.0)
            },
            delivery: DeliveryType::Yorker,
            line: Some(line),
            ..make_input(make_batsman(100.0), make_bowler(10.0, 10.0))
        };
        let bowled = wickets_in(&yorker(80.0, Line::OnStump), 47, 2000);
        assert!((120..=300).contains(&bowled), "{bowled} bowled in 2000");
        assert_eq!(wickets_in(&yorker(75.0, Line::OnStump), 47, 2000), 0);
        assert_eq!(wickets_in(&yorker(80.0, Line::LegSide), 47, 2000), 0);
    }

    #[test]
    fn defensive_shot_lowers_contest() {
        let base = make_input(make_batsman(70.0), make_bowler(60.0, 40.0));
        let defensive = ContestInput {
            shot: ShotType::Defensive,
            ..base
        };
        let mut a = SmallRng::seed_from_u64(5);
        let mut b = SmallRng::seed_from_u64(5);
        let normal = run_contest(&base, &mut a);
        let blocked = run_contest(&defensive, &mut b);
        assert!(blocked.contest < normal.contest);
    }
}
