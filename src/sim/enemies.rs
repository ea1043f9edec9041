//! Enemy type catalog
//!
//! Fifteen immutable enemy definitions. `base_hp` and `base_speed` are
//! multipliers applied to the tuning's base damage and base speed.

use serde::Serialize;

/// Movement strategy of an enemy type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Straight line toward the player
    Chase,
    /// Stop-and-go bursts
    Stutter,
    /// Gentle weave, hard to track
    Drift,
    /// Sharp side-to-side weave
    Zigzag,
    /// Spirals inward
    Orbit,
    /// Periodically teleports closer
    Blink,
    /// Slow approach with periodic sprints
    Dash,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Chase => "chase",
            Behavior::Stutter => "stutter",
            Behavior::Drift => "drift",
            Behavior::Zigzag => "zigzag",
            Behavior::Orbit => "orbit",
            Behavior::Blink => "blink",
            Behavior::Dash => "dash",
        }
    }
}

/// Immutable enemy definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyType {
    pub id: &'static str,
    pub name: &'static str,
    /// Named word pool, or `None` for the echo type
    pub word_pool: Option<&'static str>,
    #[serde(rename = "baseHP")]
    pub base_hp: f32,
    pub base_speed: f32,
    pub color: &'static str,
    pub behavior: Behavior,
    pub spawn_weight: u32,
    pub min_wave: u32,
}

/// Id of the type that repeats the last defeated word
pub const ECHO_TYPE_ID: &str = "echo";

pub static ENEMY_TYPES: [EnemyType; 15] = [
    EnemyType {
        id: "mumble",
        name: "Mumble",
        word_pool: Some("common"),
        base_hp: 1.0,
        base_speed: 1.0,
        color: "#9ca3af",
        behavior: Behavior::Chase,
        spawn_weight: 30,
        min_wave: 1,
    },
    EnemyType {
        id: "stutter",
        name: "Stutter",
        word_pool: Some("short"),
        base_hp: 0.8,
        base_speed: 1.1,
        color: "#f59e0b",
        behavior: Behavior::Stutter,
        spawn_weight: 20,
        min_wave: 1,
    },
    EnemyType {
        id: "whisper",
        name: "Whisper",
        word_pool: Some("quiet"),
        base_hp: 0.6,
        base_speed: 1.3,
        color: "#c4b5fd",
        behavior: Behavior::Drift,
        spawn_weight: 15,
        min_wave: 2,
    },
    EnemyType {
        id: "shout",
        name: "Shout",
        word_pool: Some("loud"),
        base_hp: 2.0,
        base_speed: 0.7,
        color: "#ef4444",
        behavior: Behavior::Chase,
        spawn_weight: 10,
        min_wave: 3,
    },
    EnemyType {
        id: "footnote",
        name: "Footnote",
        word_pool: Some("tiny"),
        base_hp: 0.5,
        base_speed: 1.6,
        color: "#a3e635",
        behavior: Behavior::Zigzag,
        spawn_weight: 12,
        min_wave: 2,
    },
    EnemyType {
        id: "slur",
        name: "Slur",
        word_pool: Some("compound"),
        base_hp: 1.2,
        base_speed: 1.0,
        color: "#fb923c",
        behavior: Behavior::Zigzag,
        spawn_weight: 10,
        min_wave: 4,
    },
    EnemyType {
        id: "jargon",
        name: "Jargon",
        word_pool: Some("jargon"),
        base_hp: 1.8,
        base_speed: 0.8,
        color: "#38bdf8",
        behavior: Behavior::Chase,
        spawn_weight: 8,
        min_wave: 5,
    },
    EnemyType {
        id: "palindrome",
        name: "Palindrome",
        word_pool: Some("palindromes"),
        base_hp: 1.5,
        base_speed: 0.9,
        color: "#e879f9",
        behavior: Behavior::Orbit,
        spawn_weight: 6,
        min_wave: 6,
    },
    EnemyType {
        id: "echo",
        name: "Echo",
        word_pool: None,
        base_hp: 1.0,
        base_speed: 1.2,
        color: "#2dd4bf",
        behavior: Behavior::Chase,
        spawn_weight: 6,
        min_wave: 4,
    },
    EnemyType {
        id: "typo",
        name: "Typo",
        word_pool: Some("typos"),
        base_hp: 1.0,
        base_speed: 1.1,
        color: "#facc15",
        behavior: Behavior::Blink,
        spawn_weight: 8,
        min_wave: 5,
    },
    EnemyType {
        id: "censor",
        name: "Censor",
        word_pool: Some("censored"),
        base_hp: 1.6,
        base_speed: 0.9,
        color: "#111827",
        behavior: Behavior::Dash,
        spawn_weight: 6,
        min_wave: 7,
    },
    EnemyType {
        id: "quote",
        name: "Quote",
        word_pool: Some("quotes"),
        base_hp: 1.4,
        base_speed: 1.0,
        color: "#fde68a",
        behavior: Behavior::Orbit,
        spawn_weight: 5,
        min_wave: 8,
    },
    EnemyType {
        id: "thesis",
        name: "Thesis",
        word_pool: Some("academic"),
        base_hp: 3.0,
        base_speed: 0.5,
        color: "#7c3aed",
        behavior: Behavior::Chase,
        spawn_weight: 3,
        min_wave: 10,
    },
    EnemyType {
        id: "citation_needed",
        name: "Citation Needed",
        word_pool: Some("citations"),
        base_hp: 1.2,
        base_speed: 1.4,
        color: "#60a5fa",
        behavior: Behavior::Dash,
        spawn_weight: 4,
        min_wave: 9,
    },
    EnemyType {
        id: "misspelling",
        name: "Misspelling",
        word_pool: Some("misspellings"),
        base_hp: 1.1,
        base_speed: 1.2,
        color: "#f472b6",
        behavior: Behavior::Blink,
        spawn_weight: 5,
        min_wave: 6,
    },
];
