//! Combat tunables in one place

/// Extra dice granted by rolling with a matching specialization
pub const SPECIALIZATION_DICE: u32 = 2;

/// Damage-threshold step from light to severe for characters
pub const SEVERE_STEP: i32 = 3;
/// Damage-threshold step from light to incapacitating for characters
pub const INCAPACITATING_STEP: i32 = 6;

/// ICE damage thresholds are fixed (firewall assumed 1)
pub const ICE_LIGHT_THRESHOLD: i32 = 1;
pub const ICE_SEVERE_THRESHOLD: i32 = 2;
pub const ICE_INCAPACITATING_THRESHOLD: i32 = 3;

/// Default wound-box counts per archetype, before capacity feats
pub const CHARACTER_LIGHT_SLOTS: usize = 3;
pub const CHARACTER_SEVERE_SLOTS: usize = 2;
pub const VEHICLE_LIGHT_SLOTS: usize = 2;
pub const VEHICLE_SEVERE_SLOTS: usize = 1;
pub const ICE_LIGHT_SLOTS: usize = 2;
pub const ICE_SEVERE_SLOTS: usize = 1;

/// Sentinel damage value for "by poison/by type" expressions, passed
/// through unresolved for external handling
pub const BY_POISON_DAMAGE: i32 = -1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_steps_ordered() {
        assert!(SEVERE_STEP > 0);
        assert!(INCAPACITATING_STEP > SEVERE_STEP);
        assert!(ICE_LIGHT_THRESHOLD < ICE_SEVERE_THRESHOLD);
        assert!(ICE_SEVERE_THRESHOLD < ICE_INCAPACITATING_THRESHOLD);
    }
}
