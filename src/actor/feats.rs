//! Feats: persistent character options that grant Risk Reduction or
//! damage-threshold bonuses against specific roll targets
//!
//! Targets are stored by handle, resolved once when the snapshot is built;
//! the resolution pipeline never searches feats by name.

use serde::{Deserialize, Serialize};

use crate::actor::snapshot::{SkillHandle, SpecHandle};
use crate::core::types::Attribute;

/// What a feat applies to, resolved to stable handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatTarget {
    Attribute(Attribute),
    Skill(SkillHandle),
    Specialization(SpecHandle),
}

/// An active character option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feat {
    pub name: String,
    pub active: bool,
    pub target: FeatTarget,
    /// Risk Reduction granted when the target is rolled (0..=3 per source)
    pub risk_reduction: u32,
    /// Flat bonus to damage thresholds (toughness-style feats)
    pub threshold_bonus: i32,
}
