use phf::phf_map;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Bat,
    Pads,
    Gloves,
    Kit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattingSkill {
    Timing,
    Power,
    Running,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BowlingSkill {
    Pace,
    Spin,
    Accuracy,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Confidence,
    Focus,
    Temperament,
    Teamwork,
    Aggression,
    PressureHandling,
    PlayerHappiness,
    TeamHappiness,
    ManagerHappiness,
}

/// The single stat a boost (or a training session) lands on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "skill", rename_all = "camelCase")]
pub enum StatTarget {
    Batting(BattingSkill),
    Bowling(BowlingSkill),
    Fielding,
    Fitness,
    Attribute(Attribute),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EquipmentBoost {
    pub target: StatTarget,
    pub value: i16,
}

#[derive(Clone, Copy, Debug)]
pub struct Equipment {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub cost: u32,
    pub boost: Option<EquipmentBoost>,
    pub description: &'static str,
}

pub static EQUIPMENT_CATALOG: phf::Map<&'static str, Equipment> = phf_map! {
    "bat_starter" => Equipment {
        id: "bat_starter",
        name: "Standard Willow Bat",
        slot: EquipmentSlot::Bat,
        cost: 0,
        boost: None,
        description: "A basic, reliable bat.",
    },
    "bat_power" => Equipment {
        id: "bat_power",
        name: "Pro \"Blaster\" Bat",
        slot: EquipmentSlot::Bat,
        cost: 5000,
        boost: Some(EquipmentBoost { target: StatTarget::Batting(BattingSkill::Power), value: 5 }),
        description: "+5 Power",
    },
    "bat_timing" => Equipment {
        id: "bat_timing",
        name: "Master \"Touch\" Bat",
        slot: EquipmentSlot::Bat,
        cost: 7500,
        boost: Some(EquipmentBoost { target: StatTarget::Batting(BattingSkill::Timing), value: 7 }),
        description: "+7 Timing",
    },
    "pads_starter" => Equipment {
        id: "pads_starter",
        name: "Standard Pads",
        slot: EquipmentSlot::Pads,
        cost: 0,
        boost: None,
        description: "Basic protection.",
    },
    "pads_run" => Equipment {
        id: "pads_run",
        name: "Lightweight \"Sprinter\" Pads",
        slot: EquipmentSlot::Pads,
        cost: 4000,
        boost: Some(EquipmentBoost { target: StatTarget::Batting(BattingSkill::Running), value: 6 }),
        description: "+6 Running",
    },
    "gloves_starter" => Equipment {
        id: "gloves_starter",
        name: "Standard Gloves",
        slot: EquipmentSlot::Gloves,
        cost: 0,
        boost: None,
        description: "Basic gloves.",
    },
    "gloves_confidence" => Equipment {
        id: "gloves_confidence",
        name: "\"Aura\" Pro Gloves",
        slot: EquipmentSlot::Gloves,
        cost: 6000,
        boost: Some(EquipmentBoost { target: StatTarget::Attribute(Attribute::Confidence), value: 5 }),
        description: "+5 Confidence",
    },
    "kit_starter" => Equipment {
        id: "kit_starter",
        name: "Plain Club Kit",
        slot: EquipmentSlot::Kit,
        cost: 0,
        boost: None,
        description: "Standard team apparel.",
    },
    "kit_fitness" => Equipment {
        id: "kit_fitness",
        name: "Aero-Dynamic Pro Kit",
        slot: EquipmentSlot::Kit,
        cost: 10000,
        boost: Some(EquipmentBoost { target: StatTarget::Fitness, value: 5 }),
        description: "+5 Fitness",
    },
};

pub fn get_item(id: &str) -> Option<&'static Equipment> {
    EQUIPMENT_CATALOG.get(id)
}

/// One equipped item id per slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub bat: String,
    pub pads: String,
    pub gloves: String,
    pub kit: String,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            bat: "bat_starter".to_string(),
            pads: "pads_starter".to_string(),
            gloves: "gloves_starter".to_string(),
            kit: "kit_starter".to_string(),
        }
    }
}

impl Loadout {
    pub fn item_id(&self, slot: EquipmentSlot) -> &str {
        match slot {
            EquipmentSlot::Bat => &self.bat,
            EquipmentSlot::Pads => &self.pads,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Kit => &self.kit,
        }
    }

    pub fn with_item(&self, slot: EquipmentSlot, id: impl Into<String>) -> Self {
        let mut next = self.clone();
        let id = id.into();
        match slot {
            EquipmentSlot::Bat => next.bat = id,
            EquipmentSlot::Pads => next.pads = id,
            EquipmentSlot::Gloves => next.gloves = id,
            EquipmentSlot::Kit => next.kit = id,
        }
        next
    }

    pub fn slots(&self) -> impl Iterator<Item = (EquipmentSlot, &str)> {
        [
            EquipmentSlot::Bat,
            EquipmentSlot::Pads,
            EquipmentSlot::Gloves,
            EquipmentSlot::Kit,
        ]
        .into_iter()
        .map(move |slot| (slot, self.item_id(slot)))
    }

    /// Boosts granted by the equipped items. Unknown ids contribute nothing.
    pub fn boosts(&self) -> Vec<EquipmentBoost> {
        let mut out = Vec::new();
        for (slot, id) in self.slots() {
            match get_item(id) {
                Some(item) => {
                    if item.slot != slot {
                        log::warn!("item '{id}' is a {:?}, equipped as {:?}", item.slot, slot);
                    }
                    if let Some(boost) = item.boost {
                        out.push(boost);
                    }
                }
                None => log::warn!("unknown equipment id '{id}' in {slot:?} slot"),
            }
        }
        out
    }
}
