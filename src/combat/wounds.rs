//! Wound tracks
//!
//! Light and severe wounds are arrays of boolean boxes; incapacitating is a
//! single flag. Box counts vary by archetype and capacity feats, so the
//! track supports an explicit resize that never clears an existing wound.

use serde::{Deserialize, Serialize};

use crate::actor::snapshot::CharacterKind;
use crate::combat::constants::{
    CHARACTER_LIGHT_SLOTS, CHARACTER_SEVERE_SLOTS, ICE_LIGHT_SLOTS, ICE_SEVERE_SLOTS,
    VEHICLE_LIGHT_SLOTS, VEHICLE_SEVERE_SLOTS,
};

/// Wound tiers, worst last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WoundTier {
    Light,
    Severe,
    Incapacitating,
}

/// Per-actor damage record, owned by the actor it describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WoundTrack {
    pub light: Vec<bool>,
    pub severe: Vec<bool>,
    pub incapacitating: bool,
}

impl WoundTrack {
    pub fn new(light_slots: usize, severe_slots: usize) -> Self {
        Self {
            light: vec![false; light_slots],
            severe: vec![false; severe_slots],
            incapacitating: false,
        }
    }

    /// Fresh track with the archetype's default box counts plus any
    /// capacity bonus on the light row.
    pub fn for_kind(kind: CharacterKind, capacity_bonus: usize) -> Self {
        let (light, severe) = match kind {
            CharacterKind::Character | CharacterKind::Npc => {
                (CHARACTER_LIGHT_SLOTS, CHARACTER_SEVERE_SLOTS)
            }
            CharacterKind::Vehicle => (VEHICLE_LIGHT_SLOTS, VEHICLE_SEVERE_SLOTS),
            CharacterKind::Ice => (ICE_LIGHT_SLOTS, ICE_SEVERE_SLOTS),
        };
        Self::new(light + capacity_bonus, severe)
    }

    /// Pure resize transform: pads new boxes as unchecked at the end,
    /// truncates from the end when shrinking. Boxes that survive the
    /// resize keep their value, so no wound is silently cleared when a
    /// capacity bonus comes or goes mid-session.
    pub fn resized(&self, light_slots: usize, severe_slots: usize) -> Self {
        let mut light = self.light.clone();
        light.resize(light_slots, false);
        let mut severe = self.severe.clone();
        severe.resize(severe_slots, false);
        Self {
            light,
            severe,
            incapacitating: self.incapacitating,
        }
    }

    /// Check the first open box in a row. Returns false when the row is
    /// full (or has no boxes at all).
    pub(crate) fn fill_first_open(row: &mut [bool]) -> bool {
        match row.iter_mut().find(|slot| !**slot) {
            Some(slot) => {
                *slot = true;
                true
            }
            None => false,
        }
    }

    pub fn light_full(&self) -> bool {
        self.light.iter().all(|&slot| slot)
    }

    pub fn severe_full(&self) -> bool {
        self.severe.iter().all(|&slot| slot)
    }

    /// Is the actor out of the fight?
    pub fn is_incapacitated(&self) -> bool {
        self.incapacitating
    }
}
