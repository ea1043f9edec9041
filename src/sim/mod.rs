//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod combat;
pub mod enemies;
pub mod formulas;
pub mod hooks;
pub mod inventory;
pub mod items;
pub mod movement;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod words;

pub use catalog::Catalog;
pub use combat::KeyOutcome;
pub use enemies::{Behavior, ENEMY_TYPES, EnemyType};
pub use formulas::{elite_chance, spawn_delay, xp_required};
pub use hooks::{Hook, HookSet, Modifiers};
pub use inventory::Inventory;
pub use items::{ITEMS, Item, SYNERGIES, Synergy, Tier};
pub use state::{Enemy, GameEvent, GamePhase, GameState, Player, Projectile, RewardOffer};
pub use tick::{toggle_pause, update};
