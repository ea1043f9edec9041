//! Item and synergy catalog
//!
//! 35 items in four rarity tiers (9/12/10/4). An item's `register_hooks` is a pure
//! function of its stack count returning the item's full hook list.

use serde::Serialize;

use super::hooks::Hook;
use crate::consts::*;

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    White,
    Green,
    Red,
    Legendary,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::White, Tier::Green, Tier::Red, Tier::Legendary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::White => "WHITE",
            Tier::Green => "GREEN",
            Tier::Red => "RED",
            Tier::Legendary => "LEGENDARY",
        }
    }

    /// Drop weight out of 100
    pub fn weight(&self) -> u32 {
        match self {
            Tier::White => TIER_WEIGHT_WHITE,
            Tier::Green => TIER_WEIGHT_GREEN,
            Tier::Red => TIER_WEIGHT_RED,
            Tier::Legendary => TIER_WEIGHT_LEGENDARY,
        }
    }

    /// Number of catalog items in this tier
    pub const fn expected_count(&self) -> usize {
        match self {
            Tier::White => 9,
            Tier::Green => 12,
            Tier::Red => 10,
            Tier::Legendary => 4,
        }
    }
}

/// Catalog size: the sum of the per-tier counts
pub const ITEM_COUNT: usize = Tier::White.expected_count()
    + Tier::Green.expected_count()
    + Tier::Red.expected_count()
    + Tier::Legendary.expected_count();

/// Immutable item definition
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: Tier,
    pub description: &'static str,
    pub max_stacks: u32,
    pub icon: &'static str,
    #[serde(skip)]
    pub register_hooks: fn(u32) -> Vec<Hook>,
}

impl Item {
    /// Hooks for this item at `stacks`
    pub fn hooks(&self, stacks: u32) -> Vec<Hook> {
        (self.register_hooks)(stacks)
    }
}

pub static ITEMS: [Item; ITEM_COUNT] = [
    // === WHITE ===
    Item {
        id: "rubber_letters",
        name: "Rubber Letters",
        tier: Tier::White,
        description: "Projectiles that lose their target bounce off walls (+1 bounce per stack)",
        max_stacks: 5,
        icon: "🏀",
        register_hooks: |s| vec![Hook::WallBounce(s)],
    },
    Item {
        id: "vowel_vampirism",
        name: "Vowel Vampirism",
        tier: Tier::White,
        description: "Each correctly typed vowel heals 0.5 HP per stack",
        max_stacks: 5,
        icon: "🧛",
        register_hooks: |s| vec![Hook::VowelHeal(0.5 * s as f32)],
    },
    Item {
        id: "echo_chamber",
        name: "Echo Chamber",
        tier: Tier::White,
        description: "10% chance per stack to fire a second projectile on word completion",
        max_stacks: 6,
        icon: "🔊",
        register_hooks: |s| vec![Hook::EchoShot(0.1 * s as f32)],
    },
    Item {
        id: "consonant_cruelty",
        name: "Consonant Cruelty",
        tier: Tier::White,
        description: "Each correctly typed consonant adds 0.2 damage per stack to the word",
        max_stacks: 5,
        icon: "🔪",
        register_hooks: |s| vec![Hook::ConsonantDamage(0.2 * s as f32)],
    },
    Item {
        id: "spellcheck",
        name: "Spellcheck",
        tier: Tier::White,
        description: "Words typed without a mistake deal +10% damage per stack",
        max_stacks: 5,
        icon: "✅",
        register_hooks: |s| vec![Hook::PerfectWordBonus(0.1 * s as f32)],
    },
    Item {
        id: "margin_notes",
        name: "Margin Notes",
        tier: Tier::White,
        description: "+10 max HP per stack",
        max_stacks: 10,
        icon: "📝",
        register_hooks: |s| vec![Hook::MaxHealth(10.0 * s as f32)],
    },
    Item {
        id: "torn_page",
        name: "Torn Page",
        tier: Tier::White,
        description: "Enemies move 5% slower per stack",
        max_stacks: 5,
        icon: "📃",
        register_hooks: |s| vec![Hook::EnemySlow(0.05 * s as f32)],
    },
    Item {
        id: "papercut",
        name: "Papercut",
        tier: Tier::White,
        description: "Projectiles deal +1 damage per stack",
        max_stacks: 10,
        icon: "📄",
        register_hooks: |s| vec![Hook::FlatDamage(s as f32)],
    },
    Item {
        id: "footnote",
        name: "Footnote",
        tier: Tier::White,
        description: "+1 XP per kill per stack",
        max_stacks: 5,
        icon: "🔖",
        register_hooks: |s| vec![Hook::BonusXp(s)],
    },
    // === GREEN ===
    Item {
        id: "ink_blot",
        name: "Ink Blot",
        tier: Tier::Green,
        description: "Hits splash 20% damage per stack to enemies within 50px",
        max_stacks: 4,
        icon: "🫧",
        register_hooks: |s| {
            vec![Hook::Splash {
                radius: 50.0,
                fraction: 0.2 * s as f32,
            }]
        },
    },
    Item {
        id: "bookmark",
        name: "Bookmark",
        tier: Tier::Green,
        description: "Heal 10 HP per stack at the start of each wave",
        max_stacks: 4,
        icon: "📑",
        register_hooks: |s| vec![Hook::WaveHeal(10.0 * s as f32)],
    },
    Item {
        id: "ricochet_rune",
        name: "Ricochet Rune",
        tier: Tier::Green,
        description: "Projectiles ricochet to another enemy at 60% damage (+1 ricochet per stack)",
        max_stacks: 4,
        icon: "🪃",
        register_hooks: |s| {
            vec![Hook::Ricochet {
                count: s,
                falloff: 0.6,
            }]
        },
    },
    Item {
        id: "chain_letter",
        name: "Chain Letter",
        tier: Tier::Green,
        description: "Kills deal 5 damage per stack to the nearest enemy",
        max_stacks: 4,
        icon: "⛓",
        register_hooks: |s| vec![Hook::ChainDamage(5.0 * s as f32)],
    },
    Item {
        id: "red_pen",
        name: "Red Pen",
        tier: Tier::Green,
        description: "5% crit chance per stack",
        max_stacks: 5,
        icon: "🖍",
        register_hooks: |s| vec![Hook::CritChance(0.05 * s as f32)],
    },
    Item {
        id: "ghostwriter",
        name: "Ghostwriter",
        tier: Tier::Green,
        description: "Types a correct letter for you every 6 seconds (faster with stacks)",
        max_stacks: 3,
        icon: "👻",
        register_hooks: |s| vec![Hook::AutoType(6.0 / s.max(1) as f32)],
    },
    Item {
        id: "hardcover",
        name: "Hardcover",
        tier: Tier::Green,
        description: "Take 10% less contact damage per stack",
        max_stacks: 4,
        icon: "📕",
        register_hooks: |s| vec![Hook::DamageReduction(0.1 * s as f32)],
    },
    Item {
        id: "unabridged",
        name: "Unabridged",
        tier: Tier::Green,
        description: "Projectiles fly 15% faster per stack",
        max_stacks: 4,
        icon: "📚",
        register_hooks: |s| vec![Hook::ProjectileSpeed(0.15 * s as f32)],
    },
    Item {
        id: "invisible_ink",
        name: "Invisible Ink",
        tier: Tier::Green,
        description: "Hits slow enemies by 20% per stack for 2 seconds",
        max_stacks: 3,
        icon: "🫙",
        register_hooks: |s| {
            vec![Hook::SlowOnHit {
                factor: 0.2 * s as f32,
                secs: 2.0,
            }]
        },
    },
    Item {
        id: "serif_strike",
        name: "Serif Strike",
        tier: Tier::Green,
        description: "Words of 6+ letters deal +25% damage per stack",
        max_stacks: 4,
        icon: "🗡",
        register_hooks: |s| {
            vec![Hook::LongWordBonus {
                min_len: 6,
                bonus: 0.25 * s as f32,
            }]
        },
    },
    Item {
        id: "backspace_item",
        name: "Backspace",
        tier: Tier::Green,
        description: "Hits knock enemies back 20px per stack",
        max_stacks: 4,
        icon: "⌫",
        register_hooks: |s| vec![Hook::Knockback(20.0 * s as f32)],
    },
    Item {
        id: "ellipsis",
        name: "Ellipsis",
        tier: Tier::Green,
        description: "Completing a word freezes all enemies for 0.2s per stack",
        max_stacks: 3,
        icon: "…",
        register_hooks: |s| vec![Hook::FreezeEnemies(0.2 * s as f32)],
    },
    // === RED ===
    Item {
        id: "damage_aura",
        name: "Damage Aura",
        tier: Tier::Red,
        description: "Enemies within 80px take 3 damage per second per stack",
        max_stacks: 3,
        icon: "🔥",
        register_hooks: |s| {
            vec![Hook::Aura {
                radius: 80.0 + 20.0 * s.saturating_sub(1) as f32,
                dps: 3.0 * s as f32,
            }]
        },
    },
    Item {
        id: "hemingway",
        name: "Hemingway",
        tier: Tier::Red,
        description: "Words of 4 letters or fewer deal +100% damage per stack",
        max_stacks: 3,
        icon: "🥃",
        register_hooks: |s| {
            vec![Hook::ShortWordBonus {
                max_len: 4,
                bonus: s as f32,
            }]
        },
    },
    Item {
        id: "proust",
        name: "Proust",
        tier: Tier::Red,
        description: "Words of 8+ letters fire 1 extra projectile per stack",
        max_stacks: 3,
        icon: "🧁",
        register_hooks: |s| {
            vec![Hook::ExtraProjectiles {
                min_len: 8,
                count: s,
            }]
        },
    },
    Item {
        id: "monkey_typewriter",
        name: "Monkey Typewriter",
        tier: Tier::Red,
        description: "Each correct key has a 2% chance per stack to finish the word",
        max_stacks: 3,
        icon: "🐒",
        register_hooks: |s| vec![Hook::InstantComplete(0.02 * s as f32)],
    },
    Item {
        id: "ctrl_z",
        name: "Ctrl+Z",
        tier: Tier::Red,
        description: "Survive a fatal hit at 1 HP, once per wave per stack",
        max_stacks: 3,
        icon: "↩",
        register_hooks: |s| vec![Hook::SurviveFatal(s)],
    },
    Item {
        id: "critical_letter",
        name: "Critical Letter",
        tier: Tier::Red,
        description: "Critical hits deal +100% damage per stack",
        max_stacks: 3,
        icon: "❗",
        register_hooks: |s| vec![Hook::CritMultiplier(s as f32)],
    },
    Item {
        id: "bold_statement",
        name: "Bold Statement",
        tier: Tier::Red,
        description: "Projectiles pierce 1 extra enemy per stack",
        max_stacks: 3,
        icon: "🅱",
        register_hooks: |s| vec![Hook::Pierce(s)],
    },
    Item {
        id: "comic_sans",
        name: "Comic Sans",
        tier: Tier::Red,
        description: "Deal +50% damage per stack to elite enemies",
        max_stacks: 3,
        icon: "🤡",
        register_hooks: |s| vec![Hook::EliteBonus(0.5 * s as f32)],
    },
    Item {
        id: "tab_complete",
        name: "Tab Complete",
        tier: Tier::Red,
        description: "The last letter of each word per stack is typed for you",
        max_stacks: 2,
        icon: "⇥",
        register_hooks: |s| vec![Hook::AutoCompleteTail(s)],
    },
    Item {
        id: "recursive",
        name: "Recursive",
        tier: Tier::Red,
        description: "Kills have a 20% chance per stack to fire a projectile at the nearest enemy",
        max_stacks: 3,
        icon: "🔁",
        register_hooks: |s| vec![Hook::RecursiveShot(0.2 * s as f32)],
    },
    // === LEGENDARY ===
    Item {
        id: "tower_of_babel",
        name: "Tower of Babel",
        tier: Tier::Legendary,
        description: "Every completed word also fires at every other enemy",
        max_stacks: 1,
        icon: "🗼",
        register_hooks: |_| vec![Hook::Barrage],
    },
    Item {
        id: "blood_ink",
        name: "Blood Ink",
        tier: Tier::Legendary,
        description: "Kills heal 2 HP and projectiles deal +5 damage",
        max_stacks: 1,
        icon: "🩸",
        register_hooks: |_| vec![Hook::Lifesteal(2.0), Hook::FlatDamage(5.0)],
    },
    Item {
        id: "babel_toll",
        name: "Babel Toll",
        tier: Tier::Legendary,
        description: "Kills grant double XP",
        max_stacks: 1,
        icon: "🔔",
        register_hooks: |_| vec![Hook::XpMultiplier(2)],
    },
    Item {
        id: "last_word",
        name: "The Last Word",
        tier: Tier::Legendary,
        description: "Once per run, a fatal hit clears the field and restores half your HP",
        max_stacks: 1,
        icon: "🪦",
        register_hooks: |_| vec![Hook::LastStand],
    },
];

/// A bonus effect active while both items are held
#[derive(Debug, Clone, Serialize)]
pub struct Synergy {
    pub id: &'static str,
    pub name: &'static str,
    pub items: [&'static str; 2],
    #[serde(skip)]
    pub register_hooks: fn() -> Vec<Hook>,
}

impl Synergy {
    pub fn hooks(&self) -> Vec<Hook> {
        (self.register_hooks)()
    }
}

pub static SYNERGIES: [Synergy; 5] = [
    Synergy {
        id: "pinball_wizard",
        name: "Pinball Wizard",
        items: ["rubber_letters", "ricochet_rune"],
        register_hooks: || {
            vec![
                Hook::WallBounce(2),
                Hook::BounceDamage(0.25),
                Hook::Ricochet {
                    count: 0,
                    falloff: 1.0,
                },
            ]
        },
    },
    Synergy {
        id: "vampire_lexicon",
        name: "Vampire Lexicon",
        items: ["vowel_vampirism", "blood_ink"],
        register_hooks: || vec![Hook::VowelHeal(0.5), Hook::Lifesteal(2.0)],
    },
    Synergy {
        id: "literary_canon",
        name: "Literary Canon",
        items: ["hemingway", "proust"],
        register_hooks: || {
            vec![
                Hook::LongWordBonus {
                    min_len: 8,
                    bonus: 0.5,
                },
                Hook::ShortWordBonus {
                    max_len: 3,
                    bonus: 0.5,
                },
            ]
        },
    },
    Synergy {
        id: "infinite_loop",
        name: "Infinite Loop",
        items: ["echo_chamber", "recursive"],
        register_hooks: || vec![Hook::EchoShot(0.15), Hook::RecursiveShot(0.15)],
    },
    Synergy {
        id: "rorschach",
        name: "Rorschach",
        items: ["ink_blot", "invisible_ink"],
        register_hooks: || {
            vec![
                Hook::Splash {
                    radius: 20.0,
                    fraction: 0.1,
                },
                Hook::SlowOnHit {
                    factor: 0.2,
                    secs: 1.0,
                },
            ]
        },
    },
];
