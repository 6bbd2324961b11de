//! Damage application
//!
//! One canonical path from a final damage value to wound-track boxes, shared
//! by every archetype. Archetypes differ only in how their threshold
//! profile is derived; the comparison rule (strictly greater than) and the
//! slot-filling cascade are the same for all of them.

use serde::{Deserialize, Serialize};

use crate::actor::snapshot::ActorSnapshot;
use crate::combat::constants::{
    ICE_INCAPACITATING_THRESHOLD, ICE_LIGHT_THRESHOLD, ICE_SEVERE_THRESHOLD, INCAPACITATING_STEP,
    SEVERE_STEP,
};
use crate::combat::wounds::{WoundTier, WoundTrack};

/// Damage-value thresholds above which each wound tier is inflicted
///
/// A missing severe threshold models the two-tier profiles some archetypes
/// use; damage application skips the absent tier rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageProfile {
    pub light: i32,
    pub severe: Option<i32>,
    pub incapacitating: i32,
}

impl DamageProfile {
    /// Character physical track: strength, optionally armor, plus feat
    /// bonuses; severe and incapacitating step up from light.
    pub fn character_physical(strength: u32, armor: Option<u32>, feat_bonus: i32) -> Self {
        let light = strength as i32 + armor.unwrap_or(0) as i32 + feat_bonus;
        Self {
            light,
            severe: Some(light + SEVERE_STEP),
            incapacitating: light + INCAPACITATING_STEP,
        }
    }

    /// Character mental track: same stepping from willpower; armor never
    /// applies.
    pub fn character_mental(willpower: u32, feat_bonus: i32) -> Self {
        let light = willpower as i32 + feat_bonus;
        Self {
            light,
            severe: Some(light + SEVERE_STEP),
            incapacitating: light + INCAPACITATING_STEP,
        }
    }

    /// Vehicle track: structure plus armor, stepped by structure per tier.
    pub fn vehicle(structure: u32, armor: u32) -> Self {
        let structure = structure as i32;
        let armor = armor as i32;
        Self {
            light: structure + armor,
            severe: Some(2 * structure + armor),
            incapacitating: 3 * structure + armor,
        }
    }

    /// Physical profile straight from a character snapshot: the
    /// "with armor" variant folds worn armor into every threshold.
    pub fn for_character(snapshot: &ActorSnapshot, with_armor: bool) -> Self {
        Self::character_physical(
            snapshot.attributes.strength,
            with_armor.then_some(snapshot.armor),
            snapshot.threshold_bonus(),
        )
    }

    /// ICE track: fixed thresholds.
    pub fn ice() -> Self {
        Self {
            light: ICE_LIGHT_THRESHOLD,
            severe: Some(ICE_SEVERE_THRESHOLD),
            incapacitating: ICE_INCAPACITATING_THRESHOLD,
        }
    }

    /// Which tier a damage value lands in. Strictly-greater-than at every
    /// step; at or below the light threshold means no wound at all.
    pub fn target_tier(&self, damage: i32) -> Option<WoundTier> {
        if damage <= self.light {
            return None;
        }
        match self.severe {
            Some(severe) => {
                if damage <= severe {
                    Some(WoundTier::Light)
                } else if damage <= self.incapacitating {
                    Some(WoundTier::Severe)
                } else {
                    Some(WoundTier::Incapacitating)
                }
            }
            // Two-tier profile: no severe threshold to clear
            None => {
                if damage <= self.incapacitating {
                    Some(WoundTier::Light)
                } else {
                    Some(WoundTier::Incapacitating)
                }
            }
        }
    }
}

/// Feedback code for the host's notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCode {
    BelowThreshold,
    Applied,
    Overflowed,
    Incapacitated,
}

/// What a damage application did to the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Tier the wound actually landed in, if any
    pub tier: Option<WoundTier>,
    /// Did the wound land above its target tier because boxes were full?
    pub overflowed: bool,
    pub code: DamageCode,
}

impl DamageReport {
    fn below_threshold() -> Self {
        Self {
            tier: None,
            overflowed: false,
            code: DamageCode::BelowThreshold,
        }
    }
}

/// Place a wound of the given tier, cascading upward when a row is full.
/// Returns the tier it landed in and whether it overflowed. Setting an
/// already-set incapacitating flag is idempotent.
pub(crate) fn inflict(track: &mut WoundTrack, tier: WoundTier) -> (WoundTier, bool) {
    match tier {
        WoundTier::Incapacitating => {
            track.incapacitating = true;
            (WoundTier::Incapacitating, false)
        }
        WoundTier::Severe => {
            if WoundTrack::fill_first_open(&mut track.severe) {
                (WoundTier::Severe, false)
            } else {
                track.incapacitating = true;
                (WoundTier::Incapacitating, true)
            }
        }
        WoundTier::Light => {
            if WoundTrack::fill_first_open(&mut track.light) {
                (WoundTier::Light, false)
            } else if WoundTrack::fill_first_open(&mut track.severe) {
                (WoundTier::Severe, true)
            } else {
                track.incapacitating = true;
                (WoundTier::Incapacitating, true)
            }
        }
    }
}

/// Apply a final damage value to a wound track.
///
/// At-or-below-light damage is a no-op, reported as `BelowThreshold` with
/// the track untouched. Otherwise the target tier is filled left to right,
/// overflowing one tier at a time when rows are full.
pub fn apply_damage(profile: &DamageProfile, track: &mut WoundTrack, damage: i32) -> DamageReport {
    let Some(target) = profile.target_tier(damage) else {
        return DamageReport::below_threshold();
    };

    let (landed, overflowed) = inflict(track, target);
    let code = match landed {
        WoundTier::Incapacitating => DamageCode::Incapacitated,
        _ if overflowed => DamageCode::Overflowed,
        _ => DamageCode::Applied,
    };

    tracing::debug!(
        damage,
        ?target,
        ?landed,
        overflowed,
        "damage applied to wound track"
    );

    DamageReport {
        tier: Some(landed),
        overflowed,
        code,
    }
}
