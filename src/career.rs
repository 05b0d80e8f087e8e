//! Data-driven career events.
//!
//! An [`EventTable`] is plain data loaded from JSON. [`apply_choice`] is the
//! only thing that interprets it, and it never touches a running match: a
//! `StartMatch` effect just hands a tactic back to the caller.

use crate::action::Tactic;
use crate::error::EventError;
use crate::items::{get_item, StatTarget};
use crate::model::Player;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChoiceEffect {
    #[serde(rename_all = "camelCase")]
    Train {
        target: StatTarget,
        amount: i32,
        #[serde(default)]
        energy_cost: u8,
    },
    Rest {
        energy: u8,
    },
    #[serde(rename_all = "camelCase")]
    BuyEquipment {
        item_id: String,
    },
    StartMatch {
        #[serde(default)]
        tactic: Tactic,
    },
    None,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    #[serde(default = "no_effect")]
    pub effect: ChoiceEffect,
    #[serde(default)]
    pub next_event: Option<String>,
}

fn no_effect() -> ChoiceEffect {
    ChoiceEffect::None
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    pub events: BTreeMap<String, Event>,
}

impl EventTable {
    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.get(id)
    }

    /// Every `next_event` must exist and every item must be in the catalog.
    pub fn validate(&self) -> Result<(), EventError> {
        for event in self.events.values() {
            for choice in &event.choices {
                if let Some(next) = &choice.next_event {
                    if !self.events.contains_key(next) {
                        return Err(EventError::UnknownEvent(next.clone()));
                    }
                }
                if let ChoiceEffect::BuyEquipment { item_id } = &choice.effect {
                    if get_item(item_id).is_none() {
                        return Err(EventError::UnknownItem(item_id.clone()));
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceOutcome {
    pub player: Player,
    pub next_event: Option<String>,
    /// Set when the choice starts a match with this tactic.
    pub match_request: Option<Tactic>,
}

fn apply_effect(player: &Player, effect: &ChoiceEffect) -> Result<Player, EventError> {
    match effect {
        ChoiceEffect::Train {
            target,
            amount,
            energy_cost,
        } => {
            if player.energy < *energy_cost {
                return Err(EventError::InsufficientEnergy {
                    needed: *energy_cost,
                    available: player.energy,
                });
            }
            Ok(player
                .with_stat_delta(*target, *amount)
                .with_energy(player.energy as i32 - *energy_cost as i32))
        }
        ChoiceEffect::Rest { energy } => Ok(player.with_energy(player.energy as i32 + *energy as i32)),
        ChoiceEffect::BuyEquipment { item_id } => {
            let item = get_item(item_id).ok_or_else(|| EventError::UnknownItem(item_id.clone()))?;
            if player.finance < item.cost {
                return Err(EventError::InsufficientFunds {
                    item: item_id.clone(),
                    cost: item.cost,
                    funds: player.finance,
                });
            }
            Ok(player
                .with_equipment(item.slot, item.id)
                .with_finance(player.finance - item.cost))
        }
        ChoiceEffect::StartMatch { .. } | ChoiceEffect::None => Ok(player.clone()),
    }
}

pub fn apply_choice(
    player: &Player,
    table: &EventTable,
    event_id: &str,
    choice: usize,
) -> Result<ChoiceOutcome, EventError> {
    let event = table
        .get(event_id)
        .ok_or_else(|| EventError::UnknownEvent(event_id.to_string()))?;
    let picked = event
        .choices
        .get(choice)
        .ok_or_else(|| EventError::ChoiceOutOfRange {
            event: event_id.to_string(),
            choice,
        })?;

    let updated = apply_effect(player, &picked.effect)?;
    let match_request = match &picked.effect {
        ChoiceEffect::StartMatch { tactic } => Some(*tactic),
        _ => None,
    };
    log::debug!("{event_id}[{choice}] '{}' -> {:?}", picked.text, picked.next_event);
    Ok(ChoiceOutcome {
        player: updated,
        next_event: picked.next_event.clone(),
        match_request,
    })
}
