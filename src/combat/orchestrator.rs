//! Attack/Defense orchestration
//!
//! Sequences Attack → (optional) Defense or Counter-Attack → final damage.
//! An encounter either resolves immediately (standalone roll, undefendable
//! effect) or parks in `AwaitingDefense` until the defender picks a
//! response; there is no timeout and no cancellation, so the pending state
//! can be held indefinitely and every outcome is final once produced.

use serde::{Deserialize, Serialize};

use crate::actor::snapshot::IceKind;
use crate::combat::constants::BY_POISON_DAMAGE;
use crate::dice::complication::RollOutcome;

/// One side's resolved attack, ready to be compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub outcome: RollOutcome,
    /// None when the action carries no damage value at all
    pub base_damage: Option<i32>,
    /// Direct effects forbid the defense branch entirely
    pub direct: bool,
    /// Effect-only attacks (some ICE) deal no damage even on success
    pub effect_only: bool,
}

impl Attack {
    pub fn new(outcome: RollOutcome, base_damage: Option<i32>) -> Self {
        Self {
            outcome,
            base_damage,
            direct: false,
            effect_only: false,
        }
    }

    /// A direct spell-type attack: undefendable.
    pub fn direct_spell(outcome: RollOutcome, base_damage: i32) -> Self {
        Self {
            outcome,
            base_damage: Some(base_damage),
            direct: true,
            effect_only: false,
        }
    }

    /// An ICE attack: always a fixed threshold equal to the server index,
    /// and damageless for effect-only sub-types.
    pub fn ice(kind: IceKind, server_index: u32, base_damage: i32) -> Self {
        Self {
            outcome: RollOutcome::from_threshold(server_index),
            base_damage: Some(base_damage),
            direct: false,
            effect_only: !kind.deals_damage(),
        }
    }

    /// Damage dealt after winning against `defense_successes`.
    ///
    /// A missing damage value on a successful attack is 0; the by-poison
    /// sentinel passes through untouched for external handling.
    fn final_damage(&self, defense_successes: u32) -> i32 {
        if self.effect_only {
            return 0;
        }
        let base = self.base_damage.unwrap_or(0);
        if base == BY_POISON_DAMAGE {
            return BY_POISON_DAMAGE;
        }
        base + self.outcome.total_successes as i32 - defense_successes as i32
    }
}

/// The defender's three exclusive responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseChoice {
    /// Roll a defense pool
    Roll(RollOutcome),
    /// Substitute a fixed NPC-style threshold
    FixedThreshold(u32),
    /// Take the hit; full damage applies
    Decline,
}

/// Which side won the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Attacker,
    Defender,
    Tie,
}

/// Final outcome of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub attack_successes: u32,
    pub defense_successes: u32,
    /// None when the roll was displayed standalone, without a compare
    pub winner: Option<Winner>,
    pub attack_failed: bool,
    pub damage_to_defender: i32,
    pub damage_to_attacker: i32,
}

impl Resolution {
    fn standalone(attack_successes: u32) -> Self {
        Self {
            attack_successes,
            defense_successes: 0,
            winner: None,
            attack_failed: false,
            damage_to_defender: 0,
            damage_to_attacker: 0,
        }
    }
}

/// An attack waiting on the defender's choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDefense {
    attack: Attack,
}

impl PendingDefense {
    pub fn attack(&self) -> &Attack {
        &self.attack
    }

    /// Resolve against one of the three defense responses.
    ///
    /// Ties favor the attacker: the attack succeeds when its successes at
    /// least equal the defense's.
    pub fn respond(self, choice: DefenseChoice) -> Resolution {
        let defense_successes = match choice {
            DefenseChoice::Roll(outcome) => outcome.total_successes,
            DefenseChoice::FixedThreshold(threshold) => threshold,
            DefenseChoice::Decline => 0,
        };
        resolve_versus(&self.attack, defense_successes)
    }

    /// Counter-attack variant: a symmetric three-way comparison. A tie
    /// damages neither side; the winner's damage uses their own base and
    /// the loser's successes.
    pub fn counter_attack(self, counter: Attack) -> Resolution {
        let attack_successes = self.attack.outcome.total_successes;
        let counter_successes = counter.outcome.total_successes;

        let (winner, damage_to_defender, damage_to_attacker) =
            match attack_successes.cmp(&counter_successes) {
                std::cmp::Ordering::Greater => (
                    Winner::Attacker,
                    self.attack.final_damage(counter_successes),
                    0,
                ),
                std::cmp::Ordering::Less => (
                    Winner::Defender,
                    0,
                    counter.final_damage(attack_successes),
                ),
                std::cmp::Ordering::Equal => (Winner::Tie, 0, 0),
            };

        Resolution {
            attack_successes,
            defense_successes: counter_successes,
            winner: Some(winner),
            attack_failed: winner != Winner::Attacker,
            damage_to_defender,
            damage_to_attacker,
        }
    }
}

/// An encounter after the attacker has rolled
///
/// Invalid sequencing is unrepresentable: an encounter is either already
/// resolved or holds a `PendingDefense` that consumes itself on response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encounter {
    AwaitingDefense(PendingDefense),
    Resolved(Resolution),
}

impl Encounter {
    /// Open an encounter from the attacker's resolved roll.
    ///
    /// A missing target is not an error: the roll degrades to a standalone
    /// display with no damage compare, as does an action carrying no
    /// damage value. Direct attacks skip the defense branch entirely.
    pub fn open(attack: Attack, has_target: bool) -> Encounter {
        if !has_target || attack.base_damage.is_none() {
            tracing::debug!(has_target, "standalone roll, no damage comparison");
            return Encounter::Resolved(Resolution::standalone(attack.outcome.total_successes));
        }
        if attack.direct {
            return Encounter::Resolved(resolve_versus(&attack, 0));
        }
        Encounter::AwaitingDefense(PendingDefense { attack })
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Encounter::Resolved(resolution) => Some(resolution),
            Encounter::AwaitingDefense(_) => None,
        }
    }
}

fn resolve_versus(attack: &Attack, defense_successes: u32) -> Resolution {
    let attack_successes = attack.outcome.total_successes;
    // Tie favors the attacker
    if attack_successes >= defense_successes {
        Resolution {
            attack_successes,
            defense_successes,
            winner: Some(Winner::Attacker),
            attack_failed: false,
            damage_to_defender: attack.final_damage(defense_successes),
            damage_to_attacker: 0,
        }
    } else {
        Resolution {
            attack_successes,
            defense_successes,
            winner: Some(Winner::Defender),
            attack_failed: true,
            damage_to_defender: 0,
            damage_to_attacker: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack_with(successes: u32, base_damage: i32) -> Attack {
        Attack::new(RollOutcome::from_threshold(successes), Some(base_damage))
    }

    fn pending(attack: Attack) -> PendingDefense {
        match Encounter::open(attack, true) {
            Encounter::AwaitingDefense(pending) => pending,
            Encounter::Resolved(_) => panic!("expected a pending defense"),
        }
    }

    #[test]
    fn test_attack_beats_defense_with_margin() {
        let resolution =
            pending(attack_with(5, 6)).respond(DefenseChoice::Roll(RollOutcome::from_threshold(3)));
        assert_eq!(resolution.winner, Some(Winner::Attacker));
        assert_eq!(resolution.damage_to_defender, 8); // 6 + 5 - 3
        assert!(!resolution.attack_failed);
    }

    #[test]
    fn test_tie_favors_attacker() {
        let resolution =
            pending(attack_with(4, 5)).respond(DefenseChoice::Roll(RollOutcome::from_threshold(4)));
        assert_eq!(resolution.winner, Some(Winner::Attacker));
        assert_eq!(resolution.damage_to_defender, 5); // 5 + 4 - 4
    }

    #[test]
    fn test_failed_attack_deals_nothing() {
        let resolution =
            pending(attack_with(2, 6)).respond(DefenseChoice::FixedThreshold(4));
        assert_eq!(resolution.winner, Some(Winner::Defender));
        assert!(resolution.attack_failed);
        assert_eq!(resolution.damage_to_defender, 0);
    }

    #[test]
    fn test_declined_defense_takes_full_damage() {
        let resolution = pending(attack_with(3, 4)).respond(DefenseChoice::Decline);
        assert_eq!(resolution.damage_to_defender, 7); // 4 + 3 - 0
    }

    #[test]
    fn test_outdefended_attack_can_go_nonpositive() {
        // Margin arithmetic is not floored here; the damage engine treats
        // nonpositive values as below every threshold
        let resolution =
            pending(attack_with(4, 1)).respond(DefenseChoice::FixedThreshold(4));
        assert_eq!(resolution.damage_to_defender, 1); // 1 + 4 - 4
        let resolution =
            pending(attack_with(4, -2)).respond(DefenseChoice::FixedThreshold(4));
        assert_eq!(resolution.damage_to_defender, -2);
    }

    #[test]
    fn test_missing_target_degrades_to_standalone() {
        let encounter = Encounter::open(attack_with(5, 6), false);
        let resolution = encounter.resolution().unwrap();
        assert_eq!(resolution.winner, None);
        assert_eq!(resolution.attack_successes, 5);
        assert_eq!(resolution.damage_to_defender, 0);
    }

    #[test]
    fn test_damageless_action_degrades_to_standalone() {
        let attack = Attack::new(RollOutcome::from_threshold(5), None);
        let encounter = Encounter::open(attack, true);
        assert!(encounter.resolution().is_some());
    }

    #[test]
    fn test_direct_spell_skips_defense() {
        let attack = Attack::direct_spell(RollOutcome::from_threshold(3), 4);
        let encounter = Encounter::open(attack, true);
        let resolution = encounter.resolution().unwrap();
        assert_eq!(resolution.winner, Some(Winner::Attacker));
        assert_eq!(resolution.damage_to_defender, 7); // full damage, no defense
    }

    #[test]
    fn test_ice_attack_uses_server_index() {
        let attack = Attack::ice(IceKind::Black, 3, 2);
        let pending = pending(attack);
        assert_eq!(pending.attack().outcome.total_successes, 3);
        let resolution = pending.respond(DefenseChoice::FixedThreshold(2));
        assert_eq!(resolution.damage_to_defender, 3); // 2 + 3 - 2
    }

    #[test]
    fn test_effect_only_ice_deals_no_damage_on_success() {
        let attack = Attack::ice(IceKind::TarBaby, 4, 2);
        let resolution = pending(attack).respond(DefenseChoice::FixedThreshold(1));
        assert_eq!(resolution.winner, Some(Winner::Attacker));
        assert_eq!(resolution.damage_to_defender, 0);
    }

    #[test]
    fn test_counter_attack_winner_by_margin() {
        let resolution = pending(attack_with(4, 5)).counter_attack(attack_with(2, 3));
        assert_eq!(resolution.winner, Some(Winner::Attacker));
        assert_eq!(resolution.damage_to_defender, 7); // 5 + 4 - 2
        assert_eq!(resolution.damage_to_attacker, 0);

        let resolution = pending(attack_with(2, 5)).counter_attack(attack_with(4, 3));
        assert_eq!(resolution.winner, Some(Winner::Defender));
        assert_eq!(resolution.damage_to_defender, 0);
        assert_eq!(resolution.damage_to_attacker, 5); // 3 + 4 - 2
    }

    #[test]
    fn test_counter_attack_tie_damages_neither() {
        let resolution = pending(attack_with(4, 6)).counter_attack(attack_with(4, 6));
        assert_eq!(resolution.winner, Some(Winner::Tie));
        assert_eq!(resolution.damage_to_defender, 0);
        assert_eq!(resolution.damage_to_attacker, 0);
    }

    #[test]
    fn test_poison_sentinel_passes_through_resolution() {
        let attack = Attack::new(RollOutcome::from_threshold(5), Some(BY_POISON_DAMAGE));
        let resolution = pending(attack).respond(DefenseChoice::FixedThreshold(2));
        assert_eq!(resolution.damage_to_defender, BY_POISON_DAMAGE);
    }
}
