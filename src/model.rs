use crate::items::{Attribute, BattingSkill, BowlingSkill, EquipmentSlot, Loadout, StatTarget};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;

pub fn clamp_stat(value: i32) -> u8 {
    value.clamp(STAT_MIN, STAT_MAX) as u8
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    #[serde(alias = "All-rounder")]
    AllRounder,
    Wicketkeeper,
}

impl PlayerRole {
    pub fn can_bowl(self) -> bool {
        matches!(self, PlayerRole::Bowler | PlayerRole::AllRounder)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Fixed 1..=100 rating.
    pub strength: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BattingSkills {
    pub timing: u8,
    pub power: u8,
    pub running: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BowlingSkills {
    pub pace: u8,
    pub spin: u8,
    pub accuracy: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSkills {
    pub batting: BattingSkills,
    pub bowling: BowlingSkills,
    pub fielding: u8,
    pub fitness: u8,
}

impl Default for PlayerSkills {
    fn default() -> Self {
        Self {
            batting: BattingSkills {
                timing: 30,
                power: 30,
                running: 30,
            },
            bowling: BowlingSkills {
                pace: 30,
                spin: 30,
                accuracy: 30,
            },
            fielding: 40,
            fitness: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    pub confidence: u8,
    pub focus: u8,
    pub temperament: u8,
    pub teamwork: u8,
    pub aggression: u8,
    pub pressure_handling: u8,
    pub player_happiness: u8,
    pub team_happiness: u8,
    pub manager_happiness: u8,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self {
            confidence: 50,
            focus: 50,
            temperament: 50,
            teamwork: 50,
            aggression: 30,
            pressure_handling: 30,
            player_happiness: 50,
            team_happiness: 50,
            manager_happiness: 50,
        }
    }
}

/// Additive stat access shared by equipment boosts and training.
pub trait StatSheet {
    fn stat_mut(&mut self, target: StatTarget) -> &mut u8;

    fn stat(&self, target: StatTarget) -> u8;

    fn add_clamped(&mut self, target: StatTarget, delta: i32) {
        let slot = self.stat_mut(target);
        *slot = clamp_stat(*slot as i32 + delta);
    }
}

/// Skills and attributes together; the part of a player the boosts touch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, Default)]
pub struct StatBlock {
    pub skills: PlayerSkills,
    pub attributes: PlayerAttributes,
}

impl StatSheet for StatBlock {
    fn stat_mut(&mut self, target: StatTarget) -> &mut u8 {
        match target {
            StatTarget::Batting(BattingSkill::Timing) => &mut self.skills.batting.timing,
            StatTarget::Batting(BattingSkill::Power) => &mut self.skills.batting.power,
            StatTarget::Batting(BattingSkill::Running) => &mut self.skills.batting.running,
            StatTarget::Bowling(BowlingSkill::Pace) => &mut self.skills.bowling.pace,
            StatTarget::Bowling(BowlingSkill::Spin) => &mut self.skills.bowling.spin,
            StatTarget::Bowling(BowlingSkill::Accuracy) => &mut self.skills.bowling.accuracy,
            StatTarget::Fielding => &mut self.skills.fielding,
            StatTarget::Fitness => &mut self.skills.fitness,
            StatTarget::Attribute(attr) => match attr {
                Attribute::Confidence => &mut self.attributes.confidence,
                Attribute::Focus => &mut self.attributes.focus,
                Attribute::Temperament => &mut self.attributes.temperament,
                Attribute::Teamwork => &mut self.attributes.teamwork,
                Attribute::Aggression => &mut self.attributes.aggression,
                Attribute::PressureHandling => &mut self.attributes.pressure_handling,
                Attribute::PlayerHappiness => &mut self.attributes.player_happiness,
                Attribute::TeamHappiness => &mut self.attributes.team_happiness,
                Attribute::ManagerHappiness => &mut self.attributes.manager_happiness,
            },
        }
    }

    fn stat(&self, target: StatTarget) -> u8 {
        let mut copy = *self;
        *copy.stat_mut(target)
    }
}

impl StatBlock {
    /// Clamp every skill and attribute into [0, 100].
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for target in ALL_TARGETS {
            out.add_clamped(target, 0);
        }
        out
    }
}

pub const ALL_TARGETS: [StatTarget; 17] = [
    StatTarget::Batting(BattingSkill::Timing),
    StatTarget::Batting(BattingSkill::Power),
    StatTarget::Batting(BattingSkill::Running),
    StatTarget::Bowling(BowlingSkill::Pace),
    StatTarget::Bowling(BowlingSkill::Spin),
    StatTarget::Bowling(BowlingSkill::Accuracy),
    StatTarget::Fielding,
    StatTarget::Fitness,
    StatTarget::Attribute(Attribute::Confidence),
    StatTarget::Attribute(Attribute::Focus),
    StatTarget::Attribute(Attribute::Temperament),
    StatTarget::Attribute(Attribute::Teamwork),
    StatTarget::Attribute(Attribute::Aggression),
    StatTarget::Attribute(Attribute::PressureHandling),
    StatTarget::Attribute(Attribute::PlayerHappiness),
    StatTarget::Attribute(Attribute::TeamHappiness),
    StatTarget::Attribute(Attribute::ManagerHappiness),
];

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    pub runs: u32,
    pub wickets: u32,
    pub matches: u32,
    pub potm_awards: u32,
    #[serde(default)]
    pub awards: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub runs: u32,
    pub wickets: u32,
}

/// Career milestones already reached. Owned per player value, so clones
/// never share it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milestones(BTreeSet<String>);

impl Milestones {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns true if the milestone was not already recorded.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub role: PlayerRole,
    #[serde(flatten)]
    pub stats: StatBlock,
    #[serde(default)]
    pub equipment: Loadout,
    pub batting_position: u8,
    #[serde(default)]
    pub career: CareerStats,
    #[serde(default)]
    pub season: SeasonStats,
    #[serde(default = "default_reputation")]
    pub reputation: u8,
    #[serde(default = "default_finance")]
    pub finance: u32,
    #[serde(default = "default_energy")]
    pub energy: u8,
    #[serde(default)]
    pub milestones: Milestones,
}

fn default_reputation() -> u8 {
    10
}

fn default_finance() -> u32 {
    1000
}

fn default_energy() -> u8 {
    100
}

impl Player {
    pub fn builder(name: impl Into<String>) -> PlayerBuilder {
        PlayerBuilder::new(name)
    }

    pub fn skills(&self) -> &PlayerSkills {
        &self.stats.skills
    }

    pub fn attributes(&self) -> &PlayerAttributes {
        &self.stats.attributes
    }

    pub fn with_equipment(&self, slot: EquipmentSlot, item_id: impl Into<String>) -> Self {
        Self {
            equipment: self.equipment.with_item(slot, item_id),
            ..self.clone()
        }
    }

    pub fn with_stat_delta(&self, target: StatTarget, delta: i32) -> Self {
        let mut stats = self.stats;
        stats.add_clamped(target, delta);
        Self {
            stats,
            ..self.clone()
        }
    }

    pub fn with_energy(&self, energy: i32) -> Self {
        Self {
            energy: clamp_stat(energy),
            ..self.clone()
        }
    }

    pub fn with_finance(&self, finance: u32) -> Self {
        Self {
            finance,
            ..self.clone()
        }
    }
}

pub struct PlayerBuilder {
    player: Player,
}

impl PlayerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            player: Player {
                name: name.into(),
                role: PlayerRole::Batsman,
                stats: StatBlock::default(),
                equipment: Loadout::default(),
                batting_position: 5,
                career: CareerStats::default(),
                season: SeasonStats::default(),
                reputation: default_reputation(),
                finance: default_finance(),
                energy: default_energy(),
                milestones: Milestones::new(),
            },
        }
    }

    pub fn role(mut self, role: PlayerRole) -> Self {
        self.player.role = role;
        self
    }

    pub fn skills(mut self, skills: PlayerSkills) -> Self {
        self.player.stats.skills = skills;
        self
    }

    pub fn attributes(mut self, attributes: PlayerAttributes) -> Self {
        self.player.stats.attributes = attributes;
        self
    }

    pub fn equipment(mut self, equipment: Loadout) -> Self {
        self.player.equipment = equipment;
        self
    }

    pub fn batting_position(mut self, position: u8) -> Self {
        self.player.batting_position = position;
        self
    }

    pub fn reputation(mut self, reputation: u8) -> Self {
        self.player.reputation = reputation;
        self
    }

    pub fn finance(mut self, finance: u32) -> Self {
        self.player.finance = finance;
        self
    }

    pub fn career(mut self, career: CareerStats) -> Self {
        self.player.career = career;
        self
    }

    pub fn build(self) -> Player {
        let mut player = self.player;
        player.stats = player.stats.clamped();
        player.reputation = player.reputation.min(STAT_MAX as u8);
        player.energy = player.energy.min(STAT_MAX as u8);
        player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_delta_clamps_at_bounds() {
        let player = Player::builder("Test").build();
        let high = player.with_stat_delta(StatTarget::Fitness, 500);
        let low = player.with_stat_delta(StatTarget::Fitness, -500);
        assert_eq!(high.skills().fitness, 100);
        assert_eq!(low.skills().fitness, 0);
        assert_eq!(player.skills().fitness, 50);
    }

    #[test]
    fn milestones_insert_once() {
        let mut milestones = Milestones::new();
        assert!(milestones.insert("1000_RUNS"));
        assert!(!milestones.insert("1000_RUNS"));
        assert_eq!(milestones.len(), 1);
    }

    #[test]
    fn cloned_player_does_not_share_milestones() {
        let mut a = Player::builder("A").build();
        let b = a.clone();
        a.milestones.insert("50_MATCHES");
        assert!(!b.milestones.contains("50_MATCHES"));
    }
}
