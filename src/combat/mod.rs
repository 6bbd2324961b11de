pub mod constants;
pub mod damage;
pub mod drain;
pub mod orchestrator;
pub mod request;
pub mod wounds;

pub use damage::{apply_damage, DamageCode, DamageProfile, DamageReport};
pub use drain::{apply_drain, DrainEffect};
pub use orchestrator::{Attack, DefenseChoice, Encounter, PendingDefense, Resolution, Winner};
pub use request::{DamageExpression, ResolvedRoll, RollRequest, RollRequestBuilder};
pub use wounds::{WoundTier, WoundTrack};
