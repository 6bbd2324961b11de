//! Drain: self-inflicted consequences of magical complications
//!
//! Only Sorcery and Conjuration tests drain. The complication tier decides
//! whether the caster shrugs it off, takes a narrative penalty, or wounds
//! themselves.

use serde::{Deserialize, Serialize};

use crate::actor::snapshot::SkillCategory;
use crate::combat::damage::inflict;
use crate::combat::wounds::{WoundTier, WoundTrack};
use crate::dice::complication::ComplicationTier;

/// What the drain did to the caster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrainEffect {
    /// No complication, or a non-magical skill
    None,
    /// Narrative-only penalty, no wound
    Narrative,
    /// A wound placed through the normal slot-filling cascade
    Wound { tier: WoundTier, overflowed: bool },
    /// Disaster: the caster drops, bypassing slot-filling
    Incapacitated,
}

/// Apply drain for a completed test of the given skill category.
///
/// The category must be the acting skill's, resolved through any
/// specialization-to-skill link before calling.
pub fn apply_drain(
    category: SkillCategory,
    complication: ComplicationTier,
    caster_track: &mut WoundTrack,
) -> DrainEffect {
    if !category.drains() {
        return DrainEffect::None;
    }
    match complication {
        ComplicationTier::None => DrainEffect::None,
        ComplicationTier::Minor => DrainEffect::Narrative,
        ComplicationTier::Critical => {
            // One light wound, overflowing like any other
            let (tier, overflowed) = inflict(caster_track, WoundTier::Light);
            tracing::debug!(?tier, overflowed, "drain wound inflicted");
            DrainEffect::Wound { tier, overflowed }
        }
        ComplicationTier::Disaster => {
            caster_track.incapacitating = true;
            DrainEffect::Incapacitated
        }
    }
}
