//! Inventory and synergy tracking
//!
//! The only way to change stack counts is [`Inventory::add`]. Every change
//! re-registers the item's hooks at the new count and re-evaluates the
//! synergy table, so the resulting hook set depends only on what is held,
//! never on the order it was acquired.

use std::collections::{BTreeMap, BTreeSet};

use super::catalog::Catalog;
use super::hooks::{HookSet, Modifiers};
use super::items::{Item, Synergy};

/// Result of a successful [`Inventory::add`]
#[derive(Debug, Clone)]
pub struct Acquired {
    pub item: &'static Item,
    pub stacks: u32,
    /// Synergies that became active with this item
    pub synergies: Vec<&'static Synergy>,
}

/// Held items and their hooks
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    stacks: BTreeMap<&'static str, u32>,
    active_synergies: BTreeSet<&'static str>,
    hooks: HookSet,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one stack of `id`.
    ///
    /// Returns `None` without touching anything when the id is unknown or
    /// the item is already at its stack limit.
    pub fn add(&mut self, catalog: &Catalog, id: &str) -> Option<Acquired> {
        let item = catalog.item(id)?;
        let current = self.stacks(item.id);
        if current >= item.max_stacks {
            return None;
        }

        let stacks = current + 1;
        self.stacks.insert(item.id, stacks);
        self.hooks.register(item.id, item.hooks(stacks));
        let synergies = self.refresh_synergies(catalog);

        Some(Acquired {
            item,
            stacks,
            synergies,
        })
    }

    /// Current stack count (0 when not held)
    pub fn stacks(&self, id: &str) -> u32 {
        self.stacks.get(id).copied().unwrap_or(0)
    }

    /// Whether another stack of `item` can be added
    pub fn can_add(&self, item: &Item) -> bool {
        self.stacks(item.id) < item.max_stacks
    }

    /// Copy of the id -> stack count map
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.stacks
            .iter()
            .map(|(id, &count)| (id.to_string(), count))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.stacks.iter().map(|(&id, &count)| (id, count))
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Ids of active synergies, sorted
    pub fn active_synergies(&self) -> Vec<&'static str> {
        self.active_synergies.iter().copied().collect()
    }

    pub fn hooks(&self) -> &HookSet {
        &self.hooks
    }

    pub fn modifiers(&self) -> &Modifiers {
        self.hooks.modifiers()
    }

    pub fn clear(&mut self) {
        self.stacks.clear();
        self.active_synergies.clear();
        self.hooks.clear();
    }

    /// Bring synergy hooks in line with held items, returning newly active ones
    fn refresh_synergies(&mut self, catalog: &Catalog) -> Vec<&'static Synergy> {
        let mut activated = Vec::new();
        for synergy in catalog.synergies() {
            let held = synergy.items.iter().all(|id| self.stacks(id) > 0);
            let active = self.active_synergies.contains(synergy.id);
            if held && !active {
                self.active_synergies.insert(synergy.id);
                self.hooks.register(synergy.id, synergy.hooks());
                activated.push(synergy);
            } else if !held && active {
                self.active_synergies.remove(synergy.id);
                self.hooks.unregister(synergy.id);
            }
        }
        activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static Catalog {
        Catalog::global().unwrap()
    }

    #[test]
    fn test_add_creates_and_increments() {
        let mut inv = Inventory::new();
        assert_eq!(inv.stacks("rubber_letters"), 0);
        let acquired = inv.add(catalog(), "rubber_letters").unwrap();
        assert_eq!(acquired.stacks, 1);
        inv.add(catalog(), "rubber_letters").unwrap();
        inv.add(catalog(), "rubber_letters").unwrap();
        assert_eq!(inv.stacks("rubber_letters"), 3);
    }

    #[test]
    fn test_stack_limit() {
        let mut inv = Inventory::new();
        let max = catalog().item("echo_chamber").unwrap().max_stacks;
        for i in 1..=max {
            assert_eq!(inv.add(catalog(), "echo_chamber").map(|a| a.stacks), Some(i));
        }
        assert!(inv.add(catalog(), "echo_chamber").is_none());
        assert_eq!(inv.stacks("echo_chamber"), max);
    }

    #[test]
    fn test_unknown_item_is_rejected() {
        let mut inv = Inventory::new();
        assert!(inv.add(catalog(), "not_an_item").is_none());
        assert!(inv.is_empty());
        assert!(inv.hooks().is_empty());
    }

    #[test]
    fn test_hooks_do_not_duplicate_on_restack() {
        let mut inv = Inventory::new();
        inv.add(catalog(), "papercut");
        inv.add(catalog(), "papercut");
        inv.add(catalog(), "papercut");
        assert_eq!(inv.hooks().hooks_for("papercut").len(), 1);
        assert_eq!(inv.modifiers().flat_damage, 3.0);
    }

    #[test]
    fn test_synergy_activates_with_second_half() {
        let mut inv = Inventory::new();
        let first = inv.add(catalog(), "rubber_letters").unwrap();
        assert!(first.synergies.is_empty());
        assert!(inv.active_synergies().is_empty());

        let second = inv.add(catalog(), "ricochet_rune").unwrap();
        assert_eq!(second.synergies.len(), 1);
        assert_eq!(second.synergies[0].id, "pinball_wizard");
        assert_eq!(inv.active_synergies(), vec!["pinball_wizard"]);

        // Restacking a half does not re-announce the synergy
        let third = inv.add(catalog(), "rubber_letters").unwrap();
        assert!(third.synergies.is_empty());
    }

    #[test]
    fn test_synergy_order_independent() {
        let mut a = Inventory::new();
        a.add(catalog(), "rubber_letters");
        a.add(catalog(), "ricochet_rune");

        let mut b = Inventory::new();
        b.add(catalog(), "ricochet_rune");
        b.add(catalog(), "rubber_letters");

        assert_eq!(a.active_synergies(), b.active_synergies());
        assert_eq!(a.modifiers(), b.modifiers());
    }

    #[test]
    fn test_clear() {
        let mut inv = Inventory::new();
        inv.add(catalog(), "hemingway");
        inv.add(catalog(), "proust");
        inv.clear();
        assert!(inv.is_empty());
        assert!(inv.active_synergies().is_empty());
        assert_eq!(inv.modifiers(), &Modifiers::default());
    }
}
