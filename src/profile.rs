use crate::model::{Player, PlayerAttributes, PlayerSkills, StatBlock, StatSheet, ALL_TARGETS};

/// A player's stats with equipment applied. Built only from a base
/// [`Player`], so boosts cannot be stacked twice.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EffectiveProfile {
    stats: StatBlock,
}

impl EffectiveProfile {
    pub fn skills(&self) -> &PlayerSkills {
        &self.stats.skills
    }

    pub fn attributes(&self) -> &PlayerAttributes {
        &self.stats.attributes
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }
}

pub fn resolve(player: &Player) -> EffectiveProfile {
    let boosts = player.equipment.boosts();
    let mut stats = player.stats;
    // Boosts on one stat are summed before the single clamp.
    for target in ALL_TARGETS {
        let total: i32 = boosts
            .iter()
            .filter(|b| b.target == target)
            .map(|b| b.value as i32)
            .sum();
        stats.add_clamped(target, total);
    }
    EffectiveProfile { stats }
}

/// Mean of effective timing and power, used for batting-order promotion.
pub fn batting_rating(player: &Player) -> f64 {
    let effective = resolve(player);
    let batting = effective.skills().batting;
    (batting.timing as f64 + batting.power as f64) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{EquipmentSlot, StatTarget};

    #[test]
    fn starter_gear_is_identity() {
        let player = Player::builder("Opener").build();
        let effective = resolve(&player);
        assert_eq!(effective.stats(), &player.stats);
    }

    #[test]
    fn boost_clamps_at_hundred() {
        let player = Player::builder("Opener")
            .build()
            .with_stat_delta(StatTarget::Fitness, 48)
            .with_equipment(EquipmentSlot::Kit, "kit_fitness");
        assert_eq!(player.skills().fitness, 98);
        assert_eq!(resolve(&player).skills().fitness, 100);
    }
}
