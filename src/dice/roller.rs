//! Raw die generation
//!
//! Generation is the only randomized step in the pipeline. Everything
//! downstream (success counting, complications) is a pure function of the
//! `RawOutcome` produced here, so tests can inject fixed results.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::pool::DicePool;

/// Raw die faces from one roll, normal and risk dice kept apart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawOutcome {
    pub normal_results: Vec<u8>,
    pub risk_results: Vec<u8>,
}

impl RawOutcome {
    /// No dice rolled (threshold-substituted outcomes use this)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from fixed faces, for deterministic tests and replays
    pub fn from_results(normal_results: Vec<u8>, risk_results: Vec<u8>) -> Self {
        Self {
            normal_results,
            risk_results,
        }
    }
}

fn roll_die(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=6)
}

/// Roll every die in the pool. Zero-sized sub-pools yield empty result
/// vectors; rolling zero dice is not an error.
pub fn roll_pool(pool: &DicePool, rng: &mut impl Rng) -> RawOutcome {
    RawOutcome {
        normal_results: (0..pool.normal_dice).map(|_| roll_die(rng)).collect(),
        risk_results: (0..pool.risk_dice).map(|_| roll_die(rng)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_produces_one_result_per_die() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let pool = DicePool {
            normal_dice: 4,
            risk_dice: 2,
        };
        let raw = roll_pool(&pool, &mut rng);
        assert_eq!(raw.normal_results.len(), 4);
        assert_eq!(raw.risk_results.len(), 2);
    }

    #[test]
    fn test_all_faces_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pool = DicePool {
            normal_dice: 100,
            risk_dice: 100,
        };
        let raw = roll_pool(&pool, &mut rng);
        for v in raw.normal_results.iter().chain(raw.risk_results.iter()) {
            assert!((1..=6).contains(v));
        }
    }

    #[test]
    fn test_zero_dice_yields_empty_results() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let raw = roll_pool(&DicePool::all_normal(0), &mut rng);
        assert!(raw.normal_results.is_empty());
        assert!(raw.risk_results.is_empty());
    }

    #[test]
    fn test_same_seed_same_roll() {
        let pool = DicePool {
            normal_dice: 6,
            risk_dice: 2,
        };
        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);
        assert_eq!(roll_pool(&pool, &mut rng1), roll_pool(&pool, &mut rng2));
    }
}
