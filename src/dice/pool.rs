//! Dice pools and roll modes
//!
//! A pool is split into normal dice and risk dice before anything is rolled.
//! Risk dice score double successes but can roll critical failures; how many
//! may be taken is bounded by the roller's Risk Reduction.

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::dice::complication::RiskReduction;

/// Roll mode, fixed for the duration of one roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollMode {
    /// 5 and 6 are successes
    #[default]
    Normal,
    /// 4, 5 and 6 are successes
    Advantage,
    /// Only 6 is a success
    Disadvantage,
}

impl RollMode {
    /// Is this die face a success under the mode?
    pub fn is_success(&self, value: u8) -> bool {
        match self {
            RollMode::Normal => value >= 5,
            RollMode::Advantage => value >= 4,
            RollMode::Disadvantage => value == 6,
        }
    }
}

/// Maximum risk dice offered at a given Risk Reduction
pub fn risk_cap(risk_reduction: RiskReduction) -> u32 {
    match risk_reduction.value() {
        0 => 2,
        1 => 5,
        2 => 8,
        _ => 12,
    }
}

/// Default (and maximum) risk dice for a pool: bounded by both the pool
/// itself and the Risk-Reduction-derived cap.
pub fn offered_risk_dice(base_pool: u32, risk_reduction: RiskReduction) -> u32 {
    base_pool.min(risk_cap(risk_reduction))
}

/// A dice pool split into normal and risk dice
///
/// `normal_dice + risk_dice` always equals the base pool size the pool was
/// built from; the split is validated at construction so resolution never
/// has to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    pub normal_dice: u32,
    pub risk_dice: u32,
}

impl DicePool {
    /// Split `base_pool` dice into normal and risk dice.
    ///
    /// Rejects a split where risk dice exceed the pool or the cap derived
    /// from `risk_reduction`. Rolling zero dice is valid.
    pub fn new(base_pool: u32, risk_dice: u32, risk_reduction: RiskReduction) -> Result<Self> {
        if risk_dice > base_pool {
            return Err(EngineError::InvalidPoolSize(format!(
                "{risk_dice} risk dice exceed pool of {base_pool}"
            )));
        }
        let cap = risk_cap(risk_reduction);
        if risk_dice > cap {
            return Err(EngineError::InvalidPoolSize(format!(
                "{risk_dice} risk dice exceed cap of {cap} at RR {}",
                risk_reduction.value()
            )));
        }
        Ok(Self {
            normal_dice: base_pool - risk_dice,
            risk_dice,
        })
    }

    /// A pool with no risk dice
    pub fn all_normal(base_pool: u32) -> Self {
        Self {
            normal_dice: base_pool,
            risk_dice: 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.normal_dice + self.risk_dice
    }
}
