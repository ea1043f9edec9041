//! Experience, level-up rewards, waves and item acquisition

use rand::Rng;

use super::formulas::xp_required;
use super::items::{Item, Tier};
use super::state::{GameEvent, GamePhase, GameState, RewardOffer};

/// Add kill XP, consuming it into as many level-ups as it covers
pub fn grant_xp(state: &mut GameState, xp: u64) {
    state.player.xp += xp;
    loop {
        let needed = xp_required(state.player.level + 1);
        if state.player.xp < needed {
            break;
        }
        state.player.xp -= needed;
        state.player.level += 1;
        let offer = roll_offer(state);
        log::info!(
            "Level {} reached, offering {:?}",
            state.player.level,
            offer.items
        );
        state.offers.push_back(offer);
        state.events.push(GameEvent::LevelUp {
            level: state.player.level,
        });
    }
}

/// Sample distinct, non-maxed items for the current level by tier weight
pub fn roll_offer(state: &mut GameState) -> RewardOffer {
    let catalog = state.catalog;
    let mut picks: Vec<&'static str> = Vec::new();

    for _ in 0..state.tuning.reward_choices {
        let pools: Vec<(Tier, Vec<&'static Item>)> = Tier::ALL
            .iter()
            .map(|&tier| {
                let available: Vec<&'static Item> = catalog
                    .items_in_tier(tier)
                    .filter(|item| state.inventory.can_add(item) && !picks.contains(&item.id))
                    .collect();
                (tier, available)
            })
            .filter(|(_, available)| !available.is_empty())
            .collect();

        let total: u32 = pools.iter().map(|(tier, _)| tier.weight()).sum();
        if total == 0 {
            break;
        }
        let mut roll = state.rng.random_range(0..total);
        for (tier, available) in &pools {
            if roll < tier.weight() {
                let item = available[state.rng.random_range(0..available.len())];
                picks.push(item.id);
                break;
            }
            roll -= tier.weight();
        }
    }

    RewardOffer {
        level: state.player.level,
        items: picks,
    }
}

/// Grant one stack of `id`, applying its hooks and any synergies it completes
pub fn add_item(state: &mut GameState, id: &str, skip_notification: bool) -> bool {
    let catalog = state.catalog;
    if catalog.item(id).is_none() {
        log::warn!("Unknown item id: {}", id);
        return false;
    }
    let Some(acquired) = state.inventory.add(catalog, id) else {
        log::debug!("Item {} is at its stack limit", id);
        return false;
    };

    state.refresh_max_health();
    log::info!("Acquired {} x{}", acquired.item.id, acquired.stacks);
    for synergy in &acquired.synergies {
        log::info!("Synergy activated: {}", synergy.name);
    }

    if !skip_notification {
        state.events.push(GameEvent::ItemAcquired {
            id: acquired.item.id,
            stacks: acquired.stacks,
        });
        for synergy in acquired.synergies {
            state.events.push(GameEvent::SynergyActivated {
                id: synergy.id,
                name: synergy.name,
            });
        }
    }
    true
}

/// Resolve the oldest pending offer by taking its `index`th item
pub fn choose_reward(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let Some(offer) = state.offers.front() else {
        return false;
    };
    let Some(&id) = offer.items.get(index) else {
        log::warn!("Reward index {} out of range ({} offered)", index, offer.items.len());
        return false;
    };
    state.offers.pop_front();
    add_item(state, id, false)
}

/// Advance the wave clock, starting a new wave each `wave_duration`
pub fn update_waves(state: &mut GameState, dt: f32) {
    state.wave_timer += dt as f64;
    let duration = state.tuning.wave_duration as f64;
    while state.wave_timer >= duration {
        state.wave_timer -= duration;
        start_next_wave(state);
    }
}

fn start_next_wave(state: &mut GameState) {
    state.wave += 1;
    state.player.survives_used = 0;
    let heal = state.inventory.modifiers().wave_heal;
    if heal > 0.0 {
        state.player.heal(heal);
    }
    log::info!("Wave {} started", state.wave);
    state.events.push(GameEvent::WaveStarted { wave: state.wave });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Catalog;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(9, Catalog::global().unwrap(), Tuning::default());
        state.reset_session();
        state
    }

    #[test]
    fn test_xp_consumed_on_level_up() {
        let mut state = playing_state();
        grant_xp(&mut state, 12);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.xp, 2);
        assert_eq!(state.offers.len(), 1);
    }

    #[test]
    fn test_large_grant_covers_several_levels() {
        let mut state = playing_state();
        // 10 + 15 + 22 = 47
        grant_xp(&mut state, 50);
        assert_eq!(state.player.level, 3);
        assert_eq!(state.player.xp, 3);
        assert_eq!(state.offers.len(), 3);
    }

    #[test]
    fn test_offer_items_distinct_and_addable() {
        let mut state = playing_state();
        for _ in 0..50 {
            let offer = roll_offer(&mut state);
            assert_eq!(offer.items.len(), 3);
            let mut ids = offer.items.clone();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn test_offer_skips_maxed_items() {
        let mut state = playing_state();
        for item in state.catalog.items() {
            for _ in 0..item.max_stacks {
                add_item(&mut state, item.id, true);
            }
        }
        let offer = roll_offer(&mut state);
        assert!(offer.items.is_empty());
    }

    #[test]
    fn test_choose_reward_grants_item() {
        let mut state = playing_state();
        grant_xp(&mut state, 10);
        let id = state.offers[0].items[1];
        assert!(choose_reward(&mut state, 1));
        assert_eq!(state.inventory.stacks(id), 1);
        assert!(state.offers.is_empty());
        assert!(!choose_reward(&mut state, 0));
    }

    #[test]
    fn test_reward_held_while_paused() {
        let mut state = playing_state();
        grant_xp(&mut state, 10);
        state.phase = GamePhase::Paused;
        let max_health = state.player.max_health;
        assert!(!choose_reward(&mut state, 0));
        assert_eq!(state.offers.len(), 1);
        assert!(state.inventory.is_empty());
        assert_eq!(state.player.max_health, max_health);

        state.phase = GamePhase::Playing;
        assert!(choose_reward(&mut state, 0));
    }

    #[test]
    fn test_add_item_notifications() {
        let mut state = playing_state();
        state.events.clear();
        add_item(&mut state, "rubber_letters", false);
        add_item(&mut state, "ricochet_rune", false);
        let kinds: Vec<_> = state.events.iter().map(|e| format!("{:?}", e)).collect();
        assert_eq!(kinds.len(), 3);
        assert!(kinds[2].starts_with("SynergyActivated"));

        state.events.clear();
        add_item(&mut state, "papercut", true);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_add_unknown_item_rejected() {
        let mut state = playing_state();
        assert!(!add_item(&mut state, "nope", false));
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn test_margin_notes_raise_max_health() {
        let mut state = playing_state();
        add_item(&mut state, "margin_notes", true);
        assert_eq!(state.player.max_health, 110.0);
        assert_eq!(state.player.health, 110.0);
    }

    #[test]
    fn test_wave_advances_and_bookmark_heals() {
        let mut state = playing_state();
        add_item(&mut state, "bookmark", true);
        state.player.health = 50.0;
        state.player.survives_used = 1;
        update_waves(&mut state, 30.0);
        assert_eq!(state.wave, 2);
        assert_eq!(state.player.health, 60.0);
        assert_eq!(state.player.survives_used, 0);
    }
}
