//! Word Survivor - A typing survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, typing, projectiles, items)
//! - `game`: Query/command facade shared by the UI layer and tests
//! - `tuning`: Data-driven game balance
//! - `error`: Load-time failures (catalogs, tuning)

pub mod error;
pub mod game;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{CatalogError, GameError, TuningError};
pub use game::Game;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate. 125 Hz keeps one step at a whole number of microseconds.
    pub const SIM_HZ: u64 = 125;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Fixed simulation timestep in microseconds
    pub const SIM_STEP_MICROS: u64 = 1_000_000 / SIM_HZ;
    /// Maximum substeps per update call (2 seconds) to prevent spiral of death
    pub const MAX_SUBSTEPS: u64 = 2 * SIM_HZ;

    /// XP curve: floor(XP_BASE * XP_SCALE^(level-1))
    pub const XP_BASE: f64 = 10.0;
    pub const XP_SCALE: f64 = 1.5;

    /// Spawn delay curve: max(SPAWN_MIN_DELAY, SPAWN_INITIAL_DELAY - wave * SPAWN_DELAY_STEP)
    pub const SPAWN_INITIAL_DELAY: f64 = 2.0;
    pub const SPAWN_DELAY_STEP: f64 = 0.15;
    pub const SPAWN_MIN_DELAY: f64 = 0.3;

    /// Elite curve: no elites before ELITE_MIN_WAVE, then linear growth up to the cap
    pub const ELITE_MIN_WAVE: u32 = 3;
    pub const ELITE_BASE_CHANCE: f64 = 0.05;
    pub const ELITE_CHANCE_PER_WAVE: f64 = 0.02;
    pub const ELITE_MAX_CHANCE: f64 = 0.30;

    /// Item tier drop weights (sum to 100)
    pub const TIER_WEIGHT_WHITE: u32 = 60;
    pub const TIER_WEIGHT_GREEN: u32 = 25;
    pub const TIER_WEIGHT_RED: u32 = 12;
    pub const TIER_WEIGHT_LEGENDARY: u32 = 3;

    /// Entity sizes (pixels)
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const ENEMY_RADIUS: f32 = 16.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;

    /// Enemies spawn this far outside the play field edge
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Enemies further than this outside the play field are culled
    pub const FIELD_EXIT_MARGIN: f32 = 150.0;
}

/// Unit vector from `from` toward `to` (zero when coincident)
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Vowels heal with vowel_vampirism; everything else alphabetic is a consonant
#[inline]
pub fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}
