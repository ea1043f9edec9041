//! Game balance tunables
//!
//! Everything a designer may want to tweak without touching the progression
//! curves. Missing JSON keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    /// Play field width (pixels)
    pub field_width: f32,
    /// Play field height (pixels)
    pub field_height: f32,

    // === Player ===
    /// Starting and maximum health
    pub player_max_health: f32,
    /// Damage per second dealt by each touching enemy
    pub contact_dps: f32,

    // === Enemies ===
    /// Speed of an enemy with baseSpeed 1.0 (pixels/s)
    pub enemy_base_speed: f32,
    /// Fractional enemy health growth per wave after the first
    pub enemy_health_growth: f32,
    /// Elite health multiplier
    pub elite_health_mult: f32,
    /// Elite speed multiplier
    pub elite_speed_mult: f32,
    /// Elite XP multiplier
    pub elite_xp_mult: u32,

    // === Projectiles ===
    /// Projectile speed (pixels/s)
    pub projectile_speed: f32,
    /// Damage of one completed word before item modifiers
    pub projectile_damage: f32,
    /// Seconds before an unresolved projectile expires
    pub projectile_lifetime: f32,

    // === Progression ===
    /// Seconds of play per wave
    pub wave_duration: f32,
    /// Items offered on each level-up
    pub reward_choices: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_max_health: 100.0,
            contact_dps: 10.0,

            enemy_base_speed: 40.0,
            enemy_health_growth: 0.08,
            elite_health_mult: 2.0,
            elite_speed_mult: 1.25,
            elite_xp_mult: 3,

            projectile_speed: 600.0,
            projectile_damage: 10.0,
            projectile_lifetime: 3.0,

            wave_duration: 30.0,
            reward_choices: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for exporting a tuning file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_max_health", self.player_max_health),
            ("enemy_base_speed", self.enemy_base_speed),
            ("elite_health_mult", self.elite_health_mult),
            ("elite_speed_mult", self.elite_speed_mult),
            ("projectile_speed", self.projectile_speed),
            ("projectile_damage", self.projectile_damage),
            ("projectile_lifetime", self.projectile_lifetime),
            ("wave_duration", self.wave_duration),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::OutOfRange {
                    name,
                    value,
                    safe_range: "(0, inf)",
                });
            }
        }

        let non_negative = [
            ("contact_dps", self.contact_dps),
            ("enemy_health_growth", self.enemy_health_growth),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TuningError::OutOfRange {
                    name,
                    value,
                    safe_range: "[0, inf)",
                });
            }
        }

        if self.reward_choices == 0 {
            return Err(TuningError::OutOfRange {
                name: "reward_choices",
                value: 0.0,
                safe_range: "[1, 35]",
            });
        }
        Ok(())
    }

    /// Center of the play field, where the player stands
    pub fn field_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }
}
