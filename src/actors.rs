//! Per-delivery skill profiles for whoever is batting and bowling.
//!
//! Non-human actors get a fresh profile every ball from their side's team
//! strength plus noise. Nothing is cached between deliveries, so an AI
//! batsman's form is independent from one ball to the next.

use crate::profile::EffectiveProfile;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatsmanProfile {
    pub timing: f64,
    pub power: f64,
    pub aggression: f64,
    pub temperament: f64,
    pub pressure_handling: f64,
    pub fitness: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BowlerProfile {
    pub pace: f64,
    pub accuracy: f64,
    pub spin: f64,
    pub fitness: f64,
}

impl BatsmanProfile {
    pub fn from_effective(effective: &EffectiveProfile) -> Self {
        let skills = effective.skills();
        let attrs = effective.attributes();
        Self {
            timing: skills.batting.timing as f64,
            power: skills.batting.power as f64,
            aggression: attrs.aggression as f64,
            temperament: attrs.temperament as f64,
            pressure_handling: attrs.pressure_handling as f64,
            fitness: skills.fitness as f64,
        }
    }
}

impl BowlerProfile {
    pub fn from_effective(effective: &EffectiveProfile) -> Self {
        let skills = effective.skills();
        Self {
            pace: skills.bowling.pace as f64,
            accuracy: skills.bowling.accuracy as f64,
            spin: skills.bowling.spin as f64,
            fitness: skills.fitness as f64,
        }
    }

    pub fn stock_ball(&self) -> f64 {
        self.pace.max(self.spin)
    }
}

/// Top order gets a lift, the tail a penalty.
pub fn position_bonus(position: u8) -> f64 {
    if position < 5 {
        10.0
    } else if position > 8 {
        -15.0
    } else {
        0.0
    }
}

pub fn ai_batsman_profile<R: Rng + ?Sized>(
    position: u8,
    team_strength: u8,
    rng: &mut R,
) -> BatsmanProfile {
    let base = team_strength as f64;
    let bonus = position_bonus(position);
    BatsmanProfile {
        timing: base + bonus + rng.gen_range(0.0..10.0),
        power: base + bonus + rng.gen_range(0.0..10.0),
        aggression: 50.0 + (10.0 - position as f64) * 2.0,
        temperament: 40.0 + bonus + rng.gen_range(0.0..20.0),
        pressure_handling: 30.0 + bonus + rng.gen_range(0.0..30.0),
        fitness: 50.0 + rng.gen_range(0.0..20.0),
    }
}

pub fn ai_bowler_profile<R: Rng + ?Sized>(team_strength: u8, rng: &mut R) -> BowlerProfile {
    let base = team_strength as f64;
    BowlerProfile {
        pace: base + rng.gen_range(0.0..15.0),
        accuracy: base + 5.0 + rng.gen_range(0.0..15.0),
        spin: base - 10.0 + rng.gen_range(0.0..15.0),
        fitness: 50.0 + rng.gen_range(0.0..20.0),
    }
}
