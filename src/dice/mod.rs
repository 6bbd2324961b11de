pub mod complication;
pub mod pool;
pub mod roller;

pub use complication::{
    aggregate_risk_reduction, evaluate, ComplicationTier, RiskReduction, RiskReductionSource,
    RollOutcome,
};
pub use pool::{offered_risk_dice, risk_cap, DicePool, RollMode};
pub use roller::{roll_pool, RawOutcome};
