//! Query/command facade over a session
//!
//! UI layers and tests drive the game only through [`Game`]. Queries return
//! copies, so a caller never observes a half-applied update.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::error::GameError;
use crate::sim::catalog::Catalog;
use crate::sim::combat::{self, KeyOutcome};
use crate::sim::enemies::EnemyType;
use crate::sim::items::Item;
use crate::sim::progression;
use crate::sim::spawner::spawn_enemy;
use crate::sim::state::{Enemy, GameEvent, GamePhase, GameState, Player, Projectile, RewardOffer};
use crate::sim::tick;
use crate::tuning::Tuning;

/// Discrete keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character for the typing resolver
    Char(char),
    /// Pause toggle
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value; None for keys the game ignores
    pub fn from_dom(key: &str) -> Option<Key> {
        if key == "Escape" {
            return Some(Key::Escape);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(Key::Char(c)),
            _ => None,
        }
    }
}

/// One game instance: catalog handle, tuning and the current session
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Default tuning, sitting in the menu
    pub fn new(seed: u64) -> Result<Self, GameError> {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, GameError> {
        tuning.validate()?;
        let catalog = Catalog::global()?;
        log::info!("Game created (seed {})", seed);
        Ok(Self {
            state: GameState::new(seed, catalog, tuning),
        })
    }

    // === Queries ===

    pub fn game_state(&self) -> GamePhase {
        self.state.phase
    }

    /// Item id -> stack count
    pub fn inventory(&self) -> BTreeMap<String, u32> {
        self.state.inventory.snapshot()
    }

    pub fn active_synergies(&self) -> Vec<&'static str> {
        self.state.inventory.active_synergies()
    }

    /// Word of the current target, if one is held
    pub fn current_word(&self) -> Option<String> {
        self.state.current_word().map(str::to_string)
    }

    pub fn typed_index(&self) -> usize {
        self.state.player.typed_index
    }

    pub fn enemies(&self) -> Vec<Enemy> {
        self.state.enemies.clone()
    }

    pub fn projectiles(&self) -> Vec<Projectile> {
        self.state.projectiles.clone()
    }

    pub fn player(&self) -> Player {
        self.state.player.clone()
    }

    pub fn wave(&self) -> u32 {
        self.state.wave
    }

    /// Oldest unresolved level-up offer
    pub fn pending_reward(&self) -> Option<RewardOffer> {
        self.state.offers.front().cloned()
    }

    /// Read-only view of the whole session
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn enemy_types() -> &'static [EnemyType] {
        &crate::sim::enemies::ENEMY_TYPES
    }

    pub fn items() -> &'static [Item] {
        &crate::sim::items::ITEMS
    }

    /// Enemy types keyed by id
    pub fn enemy_type_table() -> BTreeMap<&'static str, &'static EnemyType> {
        Self::enemy_types().iter().map(|t| (t.id, t)).collect()
    }

    /// Items keyed by id
    pub fn item_table() -> BTreeMap<&'static str, &'static Item> {
        Self::items().iter().map(|i| (i.id, i)).collect()
    }

    // === Commands ===

    /// Start a fresh session from any phase
    pub fn start_game(&mut self) {
        self.state.reset_session();
    }

    /// Advance by `delta_ms` of real time (no-op unless playing)
    pub fn update_game(&mut self, delta_ms: f64) {
        tick::update(&mut self.state, delta_ms);
    }

    /// Grant one stack of an item. False when unknown or maxed.
    pub fn add_item(&mut self, id: &str, skip_notification: bool) -> bool {
        progression::add_item(&mut self.state, id, skip_notification)
    }

    /// Take item `index` of the oldest pending reward offer
    pub fn choose_reward(&mut self, index: usize) -> bool {
        progression::choose_reward(&mut self.state, index)
    }

    /// Place an enemy directly. None for an unknown type id.
    pub fn spawn_enemy_of_type(&mut self, x: f32, y: f32, type_id: &str) -> Option<u32> {
        let Some(enemy_type) = self.state.catalog.enemy_type(type_id) else {
            log::warn!("Unknown enemy type: {}", type_id);
            return None;
        };
        Some(spawn_enemy(&mut self.state, enemy_type, Vec2::new(x, y), false))
    }

    /// Feed one typed character to the resolver
    pub fn press_key(&mut self, c: char) -> KeyOutcome {
        combat::press_key(&mut self.state, c)
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) => self.press_key(c),
            Key::Escape => {
                self.toggle_pause();
                KeyOutcome::Ignored
            }
        }
    }

    /// Playing <-> Paused; false in any other phase
    pub fn toggle_pause(&mut self) -> bool {
        tick::toggle_pause(&mut self.state)
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Test hook: set player health directly
    pub fn set_player_health(&mut self, health: f32) {
        self.state.player.health = health;
    }
}
