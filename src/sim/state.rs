//! Game state and core simulation types
//!
//! Everything a session owns lives here. A new session replaces all of it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Serialize, Serializer};

use super::catalog::Catalog;
use super::enemies::{Behavior, EnemyType};
use super::inventory::Inventory;
use crate::tuning::Tuning;

/// Vectors cross to JavaScript as `{x, y}`
fn serialize_xy<S: Serializer>(v: &Vec2, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Xy {
        x: f32,
        y: f32,
    }
    Xy { x: v.x, y: v.y }.serialize(serializer)
}

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-session, all state preserved
    Paused,
    /// Player died; terminal until a new session starts
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// The player at the center of the field
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(flatten, serialize_with = "serialize_xy")]
    pub pos: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Levels gained this session (0 at start)
    pub level: u32,
    /// XP collected toward the next level
    pub xp: u64,
    pub kills: u32,
    /// Enemy currently being typed
    pub target: Option<u32>,
    /// Correctly typed leading characters of the target's word
    pub typed_index: usize,
    /// Wrong keys pressed on the current word
    pub mistakes: u32,
    /// Damage accumulated by consonant_cruelty on the current word
    pub word_bonus: f32,
    /// ctrl_z saves spent during the current wave
    pub survives_used: u32,
    /// last_word already consumed this session
    pub last_stand_used: bool,
    /// Took contact damage on the previous step
    pub in_contact: bool,
}

impl Player {
    pub fn new(pos: Vec2, max_health: f32) -> Self {
        Self {
            pos,
            health: max_health,
            max_health,
            level: 0,
            xp: 0,
            kills: 0,
            target: None,
            typed_index: 0,
            mistakes: 0,
            word_bonus: 0.0,
            survives_used: 0,
            last_stand_used: false,
            in_contact: false,
        }
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Reset typing progress and release the target
    pub fn clear_target(&mut self) {
        self.target = None;
        self.reset_word();
    }

    /// Reset per-word typing state
    pub fn reset_word(&mut self) {
        self.typed_index = 0;
        self.mistakes = 0;
        self.word_bonus = 0.0;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A word-carrying enemy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    pub id: u32,
    /// Catalog id of the enemy type
    pub enemy_type: &'static str,
    pub behavior: Behavior,
    #[serde(flatten, serialize_with = "serialize_xy")]
    pub pos: Vec2,
    #[serde(serialize_with = "serialize_xy")]
    pub vel: Vec2,
    pub word: String,
    pub health: f32,
    pub max_health: f32,
    /// Movement speed before slows (pixels/s)
    pub speed: f32,
    pub elite: bool,
    /// Behavior clock (seconds alive)
    pub age: f32,
    /// Slow from invisible_ink (fraction) and its remaining time
    pub slow_factor: f32,
    pub slow_timer: f32,
    /// A completed word's projectile is in flight toward this enemy
    pub locked: bool,
}

impl Enemy {
    pub fn new(
        id: u32,
        enemy_type: &'static EnemyType,
        pos: Vec2,
        word: String,
        health: f32,
        speed: f32,
        elite: bool,
    ) -> Self {
        Self {
            id,
            enemy_type: enemy_type.id,
            behavior: enemy_type.behavior,
            pos,
            vel: Vec2::ZERO,
            word,
            health,
            max_health: health,
            speed,
            elite,
            age: 0.0,
            slow_factor: 0.0,
            slow_timer: 0.0,
            locked: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// May the player start typing this enemy's word?
    pub fn is_targetable(&self) -> bool {
        !self.locked && !self.is_dead() && !self.word.is_empty()
    }

    /// Apply an on-hit slow, keeping the stronger effect
    pub fn apply_slow(&mut self, factor: f32, secs: f32) {
        self.slow_factor = self.slow_factor.max(factor);
        self.slow_timer = self.slow_timer.max(secs);
    }
}

/// A homing projectile fired by a completed word
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projectile {
    pub id: u32,
    #[serde(flatten, serialize_with = "serialize_xy")]
    pub pos: Vec2,
    #[serde(serialize_with = "serialize_xy")]
    pub vel: Vec2,
    /// Enemy being homed on (None = flying straight)
    pub target: Option<u32>,
    pub damage: f32,
    pub crit: bool,
    /// Seconds left before expiry
    pub lifetime: f32,
    pub wall_bounces: u32,
    pub ricochets: u32,
    pub pierce: u32,
    /// Enemy whose completed word fired this projectile
    pub word_owner: Option<u32>,
    /// Enemies already struck (never hit twice)
    pub hits: Vec<u32>,
}

/// Notable simulation events, drained by the UI layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameEvent {
    SessionStarted { seed: u64 },
    EnemySpawned { id: u32, enemy_type: &'static str, elite: bool },
    WordCompleted { word: String, enemy: u32 },
    EnemyKilled { id: u32, word: String, xp: u64 },
    /// Contact damage started after a contact-free step
    PlayerHit { damage: f32, health: f32 },
    PlayerSaved { by: &'static str },
    LevelUp { level: u32 },
    WaveStarted { wave: u32 },
    ItemAcquired { id: &'static str, stacks: u32 },
    SynergyActivated { id: &'static str, name: &'static str },
    GameOver { wave: u32, level: u32, kills: u32 },
}

/// Item choices offered after a level-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardOffer {
    pub level: u32,
    pub items: Vec<&'static str>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Base seed; each session derives its own
    pub seed: u64,
    /// Sessions started so far
    pub sessions: u64,
    pub rng: Pcg32,
    pub catalog: &'static Catalog,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current wave (starts at 1)
    pub wave: u32,
    /// Seconds of playing time this session
    pub elapsed: f64,
    /// Seconds into the current wave
    pub wave_timer: f64,
    /// Seconds since the last spawn
    pub spawn_timer: f64,
    /// Seconds left on an ellipsis freeze
    pub freeze_timer: f32,
    /// Seconds since the last ghostwriter keystroke
    pub auto_type_timer: f32,
    /// Unsimulated time carried between update calls
    pub accumulator_micros: u64,
    /// Sub-microsecond remainder, in microseconds
    pub accumulator_frac: f64,
    /// Simulation steps taken this session
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Active projectiles (sorted by id)
    pub projectiles: Vec<Projectile>,
    pub inventory: Inventory,
    /// Last fully typed word whose enemy died; echo enemies repeat it
    pub last_defeated_word: Option<String>,
    pub offers: VecDeque<RewardOffer>,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a game sitting in the menu
    pub fn new(seed: u64, catalog: &'static Catalog, tuning: Tuning) -> Self {
        let player = Player::new(tuning.field_center(), tuning.player_max_health);
        Self {
            seed,
            sessions: 0,
            rng: Pcg32::seed_from_u64(seed),
            catalog,
            tuning,
            phase: GamePhase::Menu,
            wave: 1,
            elapsed: 0.0,
            wave_timer: 0.0,
            spawn_timer: 0.0,
            freeze_timer: 0.0,
            auto_type_timer: 0.0,
            accumulator_micros: 0,
            accumulator_frac: 0.0,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            inventory: Inventory::new(),
            last_defeated_word: None,
            offers: VecDeque::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Wipe every session-owned value and enter `Playing`
    pub fn reset_session(&mut self) {
        let session_seed = self.seed.wrapping_add(self.sessions);
        self.sessions += 1;
        self.rng = Pcg32::seed_from_u64(session_seed);
        self.wave = 1;
        self.elapsed = 0.0;
        self.wave_timer = 0.0;
        self.spawn_timer = 0.0;
        self.freeze_timer = 0.0;
        self.auto_type_timer = 0.0;
        self.accumulator_micros = 0;
        self.accumulator_frac = 0.0;
        self.time_ticks = 0;
        self.player = Player::new(self.tuning.field_center(), self.tuning.player_max_health);
        self.enemies.clear();
        self.projectiles.clear();
        self.inventory.clear();
        self.last_defeated_word = None;
        self.offers.clear();
        self.events.clear();
        self.next_id = 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::SessionStarted { seed: session_seed });
        log::info!("Session {} started (seed {})", self.sessions, session_seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Word of the current target, if any
    pub fn current_word(&self) -> Option<&str> {
        self.player
            .target
            .and_then(|id| self.enemy(id))
            .map(|e| e.word.as_str())
    }

    /// Nearest living enemy to `pos`, skipping `exclude`
    pub fn nearest_enemy(&self, pos: Vec2, exclude: &[u32]) -> Option<u32> {
        self.enemies
            .iter()
            .filter(|e| !e.is_dead() && !exclude.contains(&e.id))
            .min_by(|a, b| {
                a.pos
                    .distance_squared(pos)
                    .total_cmp(&b.pos.distance_squared(pos))
            })
            .map(|e| e.id)
    }

    /// Recompute max health from items, healing by any increase
    pub fn refresh_max_health(&mut self) {
        let max = self.tuning.player_max_health + self.inventory.modifiers().max_health;
        let gained = max - self.player.max_health;
        self.player.max_health = max;
        if gained > 0.0 {
            self.player.heal(gained);
        } else {
            self.player.health = self.player.health.min(max);
        }
    }

    /// Ensure deterministic ordering
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
