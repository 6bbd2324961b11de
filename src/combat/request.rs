//! Roll requests
//!
//! A request bundles everything one roll needs, built fresh from an actor
//! snapshot per user action and never persisted. All name resolution and
//! Risk Reduction aggregation happens here, so the resolution pipeline
//! downstream is pure.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor::snapshot::{ActorSnapshot, CharacterKind, SkillHandle, SpecHandle};
use crate::combat::constants::{BY_POISON_DAMAGE, SPECIALIZATION_DICE};
use crate::core::error::Result;
use crate::core::types::{ActorId, Attribute};
use crate::dice::complication::{
    aggregate_risk_reduction, evaluate, RiskReduction, RiskReductionSource, RollOutcome,
};
use crate::dice::pool::{offered_risk_dice, DicePool, RollMode};
use crate::dice::roller::{roll_pool, RawOutcome};

/// Damage carried by the acting weapon, spell or program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageExpression {
    /// Plain damage value
    Value(i32),
    /// Strength-relative: attacker strength plus an offset
    StrengthPlus(i32),
    /// "By poison": passed through unresolved as -1 for external handling
    ByPoison,
}

impl DamageExpression {
    /// Parse a damage string from an item document.
    ///
    /// Accepts integers, `STR`, `STR+N`, `STR-N` and `by-poison`.
    /// Malformed input degrades to 0 with a logged warning; it never
    /// surfaces as an error.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("by-poison") {
            return DamageExpression::ByPoison;
        }
        if let Ok(value) = trimmed.parse::<i32>() {
            return DamageExpression::Value(value);
        }
        if let Some(rest) = trimmed
            .strip_prefix("STR")
            .or_else(|| trimmed.strip_prefix("str"))
        {
            let rest = rest.trim();
            if rest.is_empty() {
                return DamageExpression::StrengthPlus(0);
            }
            if let Ok(offset) = rest.parse::<i32>() {
                // parse::<i32> accepts the leading sign of "+N" / "-N"
                return DamageExpression::StrengthPlus(offset);
            }
        }
        tracing::warn!(raw, "unresolvable damage expression, degrading to 0");
        DamageExpression::Value(0)
    }

    /// Resolve against the attacker's strength at roll time.
    pub fn resolve(&self, strength: u32) -> i32 {
        match self {
            DamageExpression::Value(value) => *value,
            DamageExpression::StrengthPlus(offset) => strength as i32 + offset,
            DamageExpression::ByPoison => BY_POISON_DAMAGE,
        }
    }
}

/// Everything the engine needs to resolve one roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRequest {
    pub actor: ActorId,
    pub kind: CharacterKind,
    pub pool: DicePool,
    pub mode: RollMode,
    pub attribute: Attribute,
    pub skill: Option<SkillHandle>,
    pub specialization: Option<SpecHandle>,
    /// Fixed success count substituted for the dice roll (NPC/ICE path)
    pub threshold: Option<u32>,
    pub risk_reduction_sources: Vec<RiskReductionSource>,
    pub risk_reduction: RiskReduction,
    pub damage: Option<DamageExpression>,
    pub is_defend: bool,
    pub is_counter_attack: bool,
}

impl RollRequest {
    /// Resolve the request into an outcome. A fixed threshold bypasses
    /// dice entirely; otherwise the pool is rolled and evaluated. One
    /// call, one final outcome; there are no retries.
    pub fn resolve(&self, rng: &mut impl Rng) -> ResolvedRoll {
        let (raw, outcome) = match self.threshold {
            Some(threshold) => (RawOutcome::empty(), RollOutcome::from_threshold(threshold)),
            None => {
                let raw = roll_pool(&self.pool, rng);
                let outcome = evaluate(&raw, self.mode, self.risk_reduction);
                (raw, outcome)
            }
        };
        ResolvedRoll {
            request: self.clone(),
            raw,
            outcome,
        }
    }
}

/// A resolved roll: the outcome plus an echo of its originating request,
/// handed to the presentation layer for display and history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRoll {
    pub request: RollRequest,
    pub raw: RawOutcome,
    pub outcome: RollOutcome,
}

/// Builds a `RollRequest` from a snapshot
///
/// Pool size is attribute + skill rating, plus a flat bonus when a
/// matching specialization is selected. Risk Reduction sources are
/// re-aggregated on every build, tracking the current selection.
#[derive(Debug, Clone)]
pub struct RollRequestBuilder<'a> {
    snapshot: &'a ActorSnapshot,
    attribute: Attribute,
    skill: Option<SkillHandle>,
    specialization: Option<SpecHandle>,
    mode: RollMode,
    risk_dice: Option<u32>,
    threshold: Option<u32>,
    damage: Option<DamageExpression>,
    is_defend: bool,
    is_counter_attack: bool,
}

impl<'a> RollRequestBuilder<'a> {
    pub fn new(snapshot: &'a ActorSnapshot, attribute: Attribute) -> Self {
        Self {
            snapshot,
            attribute,
            skill: None,
            specialization: None,
            mode: RollMode::default(),
            risk_dice: None,
            threshold: None,
            damage: None,
            is_defend: false,
            is_counter_attack: false,
        }
    }

    pub fn skill(mut self, skill: SkillHandle) -> Self {
        self.skill = Some(skill);
        self
    }

    /// Select a specialization; its parent skill is linked automatically.
    pub fn specialization(mut self, spec: SpecHandle) -> Self {
        self.specialization = Some(spec);
        self.skill = Some(self.snapshot.specialization(spec).skill);
        self
    }

    pub fn mode(mut self, mode: RollMode) -> Self {
        self.mode = mode;
        self
    }

    /// Override the risk-dice count (defaults to the offered maximum).
    pub fn risk_dice(mut self, count: u32) -> Self {
        self.risk_dice = Some(count);
        self
    }

    /// Substitute a fixed success count for the dice roll.
    pub fn fixed_threshold(mut self, threshold: u32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn damage(mut self, damage: DamageExpression) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn defend(mut self) -> Self {
        self.is_defend = true;
        self
    }

    pub fn counter_attack(mut self) -> Self {
        self.is_counter_attack = true;
        self
    }

    pub fn build(self) -> Result<RollRequest> {
        let snapshot = self.snapshot;

        let mut base_pool = snapshot.attributes.get(self.attribute);
        if let Some(skill) = self.skill {
            base_pool += snapshot.skill(skill).rating;
        }
        if self.specialization.is_some() {
            base_pool += SPECIALIZATION_DICE;
        }

        // Aggregated fresh for the current selection, never cached
        let sources =
            snapshot.risk_reduction_sources(self.attribute, self.skill, self.specialization);
        let risk_reduction = aggregate_risk_reduction(&sources);

        let risk_dice = self
            .risk_dice
            .unwrap_or_else(|| offered_risk_dice(base_pool, risk_reduction));
        let pool = DicePool::new(base_pool, risk_dice, risk_reduction)?;

        Ok(RollRequest {
            actor: snapshot.id,
            kind: snapshot.kind,
            pool,
            mode: self.mode,
            attribute: self.attribute,
            skill: self.skill,
            specialization: self.specialization,
            threshold: self.threshold,
            risk_reduction_sources: sources,
            risk_reduction,
            damage: self.damage,
            is_defend: self.is_defend,
            is_counter_attack: self.is_counter_attack,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_snapshot() -> ActorSnapshot {
        ActorSnapshot::from_json(
            r#"{
                "name": "Rook",
                "kind": "character",
                "attributes": { "strength": 3, "agility": 4, "willpower": 3, "logic": 2, "charisma": 2, "edge": 1 },
                "skills": [ { "name": "Firearms", "rating": 3, "category": "combat" } ],
                "specializations": [ { "name": "Pistols", "skill": "Firearms" } ],
                "feats": [
                    { "name": "Steady Hands", "target": { "skill": "Firearms" }, "risk_reduction": 1 }
                ],
                "armor": 1
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_integer_damage() {
        assert_eq!(DamageExpression::parse("6"), DamageExpression::Value(6));
        assert_eq!(DamageExpression::parse(" -2 "), DamageExpression::Value(-2));
    }

    #[test]
    fn test_parse_strength_relative_damage() {
        assert_eq!(
            DamageExpression::parse("STR"),
            DamageExpression::StrengthPlus(0)
        );
        assert_eq!(
            DamageExpression::parse("STR+2"),
            DamageExpression::StrengthPlus(2)
        );
        assert_eq!(
            DamageExpression::parse("str-1"),
            DamageExpression::StrengthPlus(-1)
        );
        assert_eq!(DamageExpression::StrengthPlus(2).resolve(3), 5);
    }

    #[test]
    fn test_parse_poison_sentinel_passes_through() {
        let expr = DamageExpression::parse("by-poison");
        assert_eq!(expr, DamageExpression::ByPoison);
        assert_eq!(expr.resolve(5), BY_POISON_DAMAGE);
    }

    #[test]
    fn test_malformed_damage_degrades_to_zero() {
        assert_eq!(
            DamageExpression::parse("2d6+1"),
            DamageExpression::Value(0)
        );
        assert_eq!(DamageExpression::parse(""), DamageExpression::Value(0));
    }

    #[test]
    fn test_pool_from_attribute_and_skill() {
        let snapshot = sample_snapshot();
        let firearms = snapshot.skill_handle("Firearms").unwrap();
        let request = RollRequestBuilder::new(&snapshot, Attribute::Agility)
            .skill(firearms)
            .risk_dice(0)
            .build()
            .unwrap();
        assert_eq!(request.pool.total(), 7); // agility 4 + firearms 3
        assert_eq!(request.risk_reduction.value(), 1);
    }

    #[test]
    fn test_specialization_links_parent_skill_and_adds_dice() {
        let snapshot = sample_snapshot();
        let pistols = snapshot.specialization_handle("Pistols").unwrap();
        let request = RollRequestBuilder::new(&snapshot, Attribute::Agility)
            .specialization(pistols)
            .risk_dice(0)
            .build()
            .unwrap();
        assert_eq!(request.skill, snapshot.skill_handle("Firearms"));
        assert_eq!(request.pool.total(), 9); // 4 + 3 + 2
    }

    #[test]
    fn test_default_risk_dice_is_offered_maximum() {
        let snapshot = sample_snapshot();
        let firearms = snapshot.skill_handle("Firearms").unwrap();
        let request = RollRequestBuilder::new(&snapshot, Attribute::Agility)
            .skill(firearms)
            .build()
            .unwrap();
        // RR 1 caps risk dice at 5, pool is 7
        assert_eq!(request.pool.risk_dice, 5);
        assert_eq!(request.pool.total(), 7);
    }

    #[test]
    fn test_overdrawn_risk_dice_rejected() {
        let snapshot = sample_snapshot();
        let firearms = snapshot.skill_handle("Firearms").unwrap();
        let result = RollRequestBuilder::new(&snapshot, Attribute::Agility)
            .skill(firearms)
            .risk_dice(6) // cap at RR 1 is 5
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_threshold_request_bypasses_dice() {
        let snapshot = sample_snapshot();
        let request = RollRequestBuilder::new(&snapshot, Attribute::Agility)
            .fixed_threshold(3)
            .risk_dice(0)
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let resolved = request.resolve(&mut rng);
        assert_eq!(resolved.outcome.total_successes, 3);
        assert!(resolved.raw.normal_results.is_empty());
        assert!(resolved.raw.risk_results.is_empty());
    }

    #[test]
    fn test_resolve_echoes_request() {
        let snapshot = sample_snapshot();
        let request = RollRequestBuilder::new(&snapshot, Attribute::Agility)
            .build()
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let resolved = request.resolve(&mut rng);
        assert_eq!(resolved.request, request);
        assert_eq!(
            resolved.raw.normal_results.len() + resolved.raw.risk_results.len(),
            request.pool.total() as usize
        );
    }
}
