//! Sprawl Engine - dice-pool combat resolution for Anarchy-style tabletop play

pub mod actor;
pub mod combat;
pub mod core;
pub mod dice;
