//! Progression curves
//!
//! Pure functions of the wave or level number. No randomness, no state.

use crate::consts::*;

/// XP needed to reach `level` from the previous level.
///
/// `floor(10 * 1.5^(level-1))`: 10, 15, 22, 33, ...
pub fn xp_required(level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as i32;
    (XP_BASE * XP_SCALE.powi(exponent)).floor() as u64
}

/// Seconds between spawns during `wave`, clamped at 0.3 from wave 12 on.
pub fn spawn_delay(wave: u32) -> f64 {
    let delay = SPAWN_INITIAL_DELAY - wave as f64 * SPAWN_DELAY_STEP;
    // Snap float noise from the 0.15 step so boundary waves compare exactly
    let delay = (delay * 1e9).round() / 1e9;
    delay.max(SPAWN_MIN_DELAY)
}

/// Probability that a spawn in `wave` is elite, capped at 30% from wave 16 on.
pub fn elite_chance(wave: u32) -> f64 {
    if wave < ELITE_MIN_WAVE {
        return 0.0;
    }
    let chance = ELITE_BASE_CHANCE + (wave - ELITE_MIN_WAVE) as f64 * ELITE_CHANCE_PER_WAVE;
    let chance = (chance * 1e9).round() / 1e9;
    chance.min(ELITE_MAX_CHANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_xp_curve_known_values() {
        assert_eq!(xp_required(1), 10);
        assert_eq!(xp_required(2), 15);
        assert_eq!(xp_required(3), 22);
        let level_20 = xp_required(20);
        assert!(level_20 > 15_000 && level_20 < 25_000, "got {}", level_20);
    }

    #[test]
    fn test_xp_curve_strictly_increasing() {
        for level in 2..=20 {
            assert!(xp_required(level) > xp_required(level - 1));
        }
    }

    #[test]
    fn test_spawn_delay_known_values() {
        assert!((spawn_delay(1) - 1.85).abs() < 1e-9);
        assert!((spawn_delay(5) - 1.25).abs() < 1e-9);
        assert_eq!(spawn_delay(10), 0.5);
        assert!((spawn_delay(11) - 0.35).abs() < 1e-9);
        assert_eq!(spawn_delay(12), 0.3);
        assert_eq!(spawn_delay(20), 0.3);
        assert_eq!(spawn_delay(100), 0.3);
    }

    #[test]
    fn test_elite_chance_known_values() {
        assert_eq!(elite_chance(1), 0.0);
        assert_eq!(elite_chance(2), 0.0);
        assert!((elite_chance(3) - 0.05).abs() < 1e-9);
        assert!((elite_chance(5) - 0.09).abs() < 1e-9);
        assert!((elite_chance(10) - 0.19).abs() < 1e-9);
        assert!((elite_chance(15) - 0.29).abs() < 1e-9);
        assert_eq!(elite_chance(16), 0.3);
        assert_eq!(elite_chance(30), 0.3);
        assert_eq!(elite_chance(50), 0.3);
    }

    proptest! {
        #[test]
        fn spawn_delay_never_below_minimum(wave in 1u32..=100) {
            prop_assert!(spawn_delay(wave) >= SPAWN_MIN_DELAY);
        }

        #[test]
        fn spawn_delay_non_increasing(wave in 1u32..100) {
            prop_assert!(spawn_delay(wave + 1) <= spawn_delay(wave));
        }

        #[test]
        fn elite_chance_bounded(wave in 1u32..=50) {
            let chance = elite_chance(wave);
            prop_assert!((0.0..=ELITE_MAX_CHANCE).contains(&chance));
        }

        #[test]
        fn elite_chance_non_decreasing(wave in 1u32..50) {
            prop_assert!(elite_chance(wave + 1) >= elite_chance(wave));
        }
    }
}
