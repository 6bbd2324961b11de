//! Risk Reduction, success counting and complications
//!
//! Risk dice are double-edged: each success on one counts twice, but a face
//! of 1 is a critical failure no matter the roll mode. Risk Reduction
//! absorbs critical failures before they escalate into complications.

use serde::{Deserialize, Serialize};

use crate::dice::pool::RollMode;
use crate::dice::roller::RawOutcome;

/// One origin of Risk Reduction (an active feat targeting the rolled
/// skill, specialization or attribute)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReductionSource {
    pub origin_name: String,
    pub value: u32,
}

/// Aggregated Risk Reduction for one roll, clamped to 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct RiskReduction(u32);

impl RiskReduction {
    pub fn new(value: u32) -> Self {
        Self(value.min(3))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Sum all sources, then cap at 3.
///
/// Callers must re-derive this whenever the selected skill or
/// specialization changes; it is never cached across a change of selection.
pub fn aggregate_risk_reduction(sources: &[RiskReductionSource]) -> RiskReduction {
    RiskReduction::new(sources.iter().map(|s| s.value).sum())
}

/// Escalating consequence of unabsorbed critical failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ComplicationTier {
    #[default]
    None,
    Minor,
    Critical,
    Disaster,
}

impl ComplicationTier {
    /// Total mapping: every failure count lands in exactly one tier.
    pub fn from_remaining_failures(remaining: u32) -> Self {
        match remaining {
            0 => ComplicationTier::None,
            1 => ComplicationTier::Minor,
            2 => ComplicationTier::Critical,
            _ => ComplicationTier::Disaster,
        }
    }
}

/// The counted result of one roll, immutable once built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub normal_successes: u32,
    pub risk_successes: u32,
    /// `normal_successes + 2 * risk_successes`
    pub total_successes: u32,
    pub critical_failures: u32,
    /// Critical failures left after Risk Reduction absorbed its share
    pub remaining_failures: u32,
    pub complication: ComplicationTier,
}

impl RollOutcome {
    /// Fixed-threshold substitution for NPCs and ICE: a deterministic
    /// success count with no dice, no failures and no complication.
    pub fn from_threshold(threshold: u32) -> Self {
        Self {
            normal_successes: 0,
            risk_successes: 0,
            total_successes: threshold,
            critical_failures: 0,
            remaining_failures: 0,
            complication: ComplicationTier::None,
        }
    }
}

/// Count successes and critical failures from raw faces.
///
/// A risk die showing 1 is a critical failure and never simultaneously a
/// success. Risk-die successes count double toward the total.
pub fn evaluate(raw: &RawOutcome, mode: RollMode, risk_reduction: RiskReduction) -> RollOutcome {
    let normal_successes = raw
        .normal_results
        .iter()
        .filter(|&&v| mode.is_success(v))
        .count() as u32;

    let mut risk_successes = 0;
    let mut critical_failures: u32 = 0;
    for &v in &raw.risk_results {
        if v == 1 {
            critical_failures += 1;
        } else if mode.is_success(v) {
            risk_successes += 1;
        }
    }

    let remaining_failures = critical_failures.saturating_sub(risk_reduction.value());

    RollOutcome {
        normal_successes,
        risk_successes,
        total_successes: normal_successes + 2 * risk_successes,
        critical_failures,
        remaining_failures,
        complication: ComplicationTier::from_remaining_failures(remaining_failures),
    }
}
