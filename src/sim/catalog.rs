//! Validated, indexed view over the static catalogs
//!
//! The catalogs are checked once, the first time [`Catalog::global`] is
//! called. A malformed catalog is a startup failure; after that every lookup
//! is a read-only hash probe.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::enemies::{ECHO_TYPE_ID, ENEMY_TYPES, EnemyType};
use super::items::{ITEM_COUNT, ITEMS, Item, SYNERGIES, Synergy, Tier};
use super::words::word_pool;
use crate::error::CatalogError;

/// Expected number of enemy types
pub const ENEMY_TYPE_COUNT: usize = 15;

static CATALOG: OnceLock<Result<Catalog, CatalogError>> = OnceLock::new();

/// O(1) lookup over enemy types, items and synergies
#[derive(Debug)]
pub struct Catalog {
    enemy_types: &'static [EnemyType],
    items: &'static [Item],
    synergies: &'static [Synergy],
    enemy_index: HashMap<&'static str, usize>,
    item_index: HashMap<&'static str, usize>,
}

impl Catalog {
    /// The process-wide catalog, validated on first access
    pub fn global() -> Result<&'static Catalog, CatalogError> {
        CATALOG
            .get_or_init(|| {
                let catalog = Catalog::load();
                match &catalog {
                    Ok(c) => log::info!(
                        "Catalog loaded: {} enemy types, {} items, {} synergies",
                        c.enemy_types.len(),
                        c.items.len(),
                        c.synergies.len()
                    ),
                    Err(err) => log::error!("Catalog failed validation: {}", err),
                }
                catalog
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Validate and index the built-in catalogs
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_parts(&ENEMY_TYPES, &ITEMS, &SYNERGIES)
    }

    /// Validate and index arbitrary catalog data
    pub fn from_parts(
        enemy_types: &'static [EnemyType],
        items: &'static [Item],
        synergies: &'static [Synergy],
    ) -> Result<Self, CatalogError> {
        validate_enemy_types(enemy_types)?;
        validate_items(items)?;

        let enemy_index = enemy_types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();
        let item_index: HashMap<_, _> = items.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

        for synergy in synergies {
            for item in synergy.items {
                if !item_index.contains_key(item) {
                    return Err(CatalogError::UnknownSynergyItem {
                        synergy: synergy.id,
                        item,
                    });
                }
            }
        }

        Ok(Self {
            enemy_types,
            items,
            synergies,
            enemy_index,
            item_index,
        })
    }

    pub fn enemy_type(&self, id: &str) -> Option<&'static EnemyType> {
        let types = self.enemy_types;
        self.enemy_index.get(id).map(|&i| &types[i])
    }

    pub fn item(&self, id: &str) -> Option<&'static Item> {
        let items = self.items;
        self.item_index.get(id).map(|&i| &items[i])
    }

    pub fn enemy_types(&self) -> &'static [EnemyType] {
        self.enemy_types
    }

    pub fn items(&self) -> &'static [Item] {
        self.items
    }

    pub fn synergies(&self) -> &'static [Synergy] {
        self.synergies
    }

    /// Items of one tier, in catalog order
    pub fn items_in_tier(&self, tier: Tier) -> impl Iterator<Item = &'static Item> {
        self.items.iter().filter(move |item| item.tier == tier)
    }

    /// Enemy types allowed to spawn in `wave`
    pub fn eligible_enemies(&self, wave: u32) -> impl Iterator<Item = &'static EnemyType> {
        self.enemy_types.iter().filter(move |t| t.min_wave <= wave)
    }
}

fn check_positive(id: &'static str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CatalogError::NonPositive { id, field, value })
    }
}

fn check_text(id: &'static str, field: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.is_empty() {
        Err(CatalogError::EmptyField { id, field })
    } else {
        Ok(())
    }
}

/// Enemy catalog invariants: count, unique ids, positive numerics, resolvable pools
pub fn validate_enemy_types(types: &'static [EnemyType]) -> Result<(), CatalogError> {
    if types.len() != ENEMY_TYPE_COUNT {
        return Err(CatalogError::WrongCount {
            catalog: "enemy",
            expected: ENEMY_TYPE_COUNT,
            got: types.len(),
        });
    }

    let mut seen = HashSet::new();
    for t in types {
        if !seen.insert(t.id) {
            return Err(CatalogError::DuplicateId { id: t.id });
        }
        check_text(t.id, "id", t.id)?;
        check_text(t.id, "name", t.name)?;
        check_text(t.id, "color", t.color)?;
        check_positive(t.id, "baseHP", t.base_hp as f64)?;
        check_positive(t.id, "baseSpeed", t.base_speed as f64)?;
        check_positive(t.id, "spawnWeight", t.spawn_weight as f64)?;
        check_positive(t.id, "minWave", t.min_wave as f64)?;

        match t.word_pool {
            None if t.id == ECHO_TYPE_ID => {}
            None => return Err(CatalogError::BadWordPool { id: t.id, pool: None }),
            Some(pool) => {
                if pool.is_empty() || word_pool(pool).is_none_or(|words| words.is_empty()) {
                    return Err(CatalogError::BadWordPool {
                        id: t.id,
                        pool: Some(pool),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Item catalog invariants: count, unique ids, tier counts, stack limits, weights
pub fn validate_items(items: &'static [Item]) -> Result<(), CatalogError> {
    if items.len() != ITEM_COUNT {
        return Err(CatalogError::WrongCount {
            catalog: "item",
            expected: ITEM_COUNT,
            got: items.len(),
        });
    }

    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id) {
            return Err(CatalogError::DuplicateId { id: item.id });
        }
        check_text(item.id, "id", item.id)?;
        check_text(item.id, "name", item.name)?;
        check_text(item.id, "description", item.description)?;
        check_text(item.id, "icon", item.icon)?;
        check_positive(item.id, "maxStacks", item.max_stacks as f64)?;
        if item.tier == Tier::Legendary && item.max_stacks != 1 {
            return Err(CatalogError::LegendaryStacks {
                id: item.id,
                max_stacks: item.max_stacks,
            });
        }
    }

    for tier in Tier::ALL {
        let got = items.iter().filter(|i| i.tier == tier).count();
        if got != tier.expected_count() {
            return Err(CatalogError::TierCount {
                tier: tier.as_str(),
                expected: tier.expected_count(),
                got,
            });
        }
    }

    let total: u32 = Tier::ALL.iter().map(Tier::weight).sum();
    if total != 100 {
        return Err(CatalogError::TierWeights { total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemies::Behavior;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.enemy_types().len(), 15);
        assert_eq!(catalog.items().len(), 35);
        assert_eq!(ITEM_COUNT, 35);
        assert!(catalog.item("last_word").is_some());
    }

    #[test]
    fn test_enemy_ids_present() {
        let catalog = Catalog::load().unwrap();
        for id in [
            "mumble",
            "stutter",
            "whisper",
            "shout",
            "footnote",
            "slur",
            "jargon",
            "palindrome",
            "echo",
            "typo",
            "censor",
            "quote",
            "thesis",
            "citation_needed",
            "misspelling",
        ] {
            let t = catalog.enemy_type(id).unwrap_or_else(|| panic!("missing {}", id));
            assert_eq!(t.id, id);
            assert!(t.base_hp > 0.0 && t.base_speed > 0.0);
        }
    }

    #[test]
    fn test_only_echo_has_no_pool() {
        for t in &ENEMY_TYPES {
            if t.id == ECHO_TYPE_ID {
                assert!(t.word_pool.is_none());
            } else {
                let pool = t.word_pool.unwrap();
                assert!(!pool.is_empty());
            }
        }
    }

    #[test]
    fn test_item_tiers_and_stacks() {
        let catalog = Catalog::load().unwrap();
        let counts: Vec<usize> = Tier::ALL
            .iter()
            .map(|&t| catalog.items_in_tier(t).count())
            .collect();
        assert_eq!(counts, vec![9, 12, 10, 4]);
        for item in catalog.items_in_tier(Tier::Legendary) {
            assert_eq!(item.max_stacks, 1, "{}", item.id);
        }
        assert_eq!(catalog.item("echo_chamber").unwrap().max_stacks, 6);
        assert_eq!(Tier::ALL.iter().map(Tier::weight).sum::<u32>(), 100);
    }

    #[test]
    fn test_expected_item_ids_present() {
        let catalog = Catalog::load().unwrap();
        for id in [
            "rubber_letters",
            "vowel_vampirism",
            "echo_chamber",
            "consonant_cruelty",
            "spellcheck",
            "margin_notes",
            "torn_page",
            "papercut",
            "footnote",
            "ink_blot",
            "bookmark",
            "ricochet_rune",
            "chain_letter",
            "red_pen",
            "ghostwriter",
            "hardcover",
            "unabridged",
            "invisible_ink",
            "serif_strike",
            "backspace_item",
            "ellipsis",
            "damage_aura",
            "hemingway",
            "proust",
            "monkey_typewriter",
            "ctrl_z",
            "critical_letter",
            "bold_statement",
            "comic_sans",
            "tab_complete",
            "recursive",
            "tower_of_babel",
            "blood_ink",
            "babel_toll",
            "last_word",
        ] {
            assert_eq!(catalog.item(id).map(|i| i.id), Some(id));
        }
        assert!(catalog.item("nonexistent").is_none());
    }

    #[test]
    fn test_every_item_registers_hooks() {
        for item in &ITEMS {
            for stacks in 1..=item.max_stacks {
                assert!(!item.hooks(stacks).is_empty(), "{} x{}", item.id, stacks);
            }
        }
    }

    #[test]
    fn test_eligible_enemies_by_wave() {
        let catalog = Catalog::load().unwrap();
        let wave1: Vec<_> = catalog.eligible_enemies(1).map(|t| t.id).collect();
        assert_eq!(wave1, vec!["mumble", "stutter"]);
        assert_eq!(catalog.eligible_enemies(100).count(), 15);
    }

    static BAD_ENEMIES: [EnemyType; 1] = [EnemyType {
        id: "broken",
        name: "Broken",
        word_pool: Some("common"),
        base_hp: 1.0,
        base_speed: 1.0,
        color: "#000",
        behavior: Behavior::Chase,
        spawn_weight: 1,
        min_wave: 1,
    }];

    #[test]
    fn test_rejects_wrong_enemy_count() {
        assert_eq!(
            validate_enemy_types(&BAD_ENEMIES),
            Err(CatalogError::WrongCount {
                catalog: "enemy",
                expected: 15,
                got: 1
            })
        );
    }

    #[test]
    fn test_rejects_unknown_synergy_item() {
        static BAD_SYNERGIES: [Synergy; 1] = [Synergy {
            id: "nonsense",
            name: "Nonsense",
            items: ["papercut", "not_an_item"],
            register_hooks: Vec::new,
        }];
        let err = Catalog::from_parts(&ENEMY_TYPES, &ITEMS, &BAD_SYNERGIES).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownSynergyItem {
                item: "not_an_item",
                ..
            }
        ));
    }
}
