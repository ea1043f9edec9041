//! Enemy spawning
//!
//! Spawns are gated by [`spawn_delay`] for the current wave. Each spawn picks
//! a type by weight among those eligible for the wave, then rolls elite
//! status independently.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::catalog::Catalog;
use super::enemies::EnemyType;
use super::formulas::{elite_chance, spawn_delay};
use super::state::{Enemy, GameEvent, GameState};
use super::words::{ECHO_FALLBACK_POOL, word_pool};
use crate::consts::*;
use crate::tuning::Tuning;

/// Weighted pick among types eligible for `wave`
pub fn pick_enemy_type(
    catalog: &Catalog,
    wave: u32,
    rng: &mut Pcg32,
) -> Option<&'static EnemyType> {
    let total: u32 = catalog.eligible_enemies(wave).map(|t| t.spawn_weight).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for t in catalog.eligible_enemies(wave) {
        if roll < t.spawn_weight {
            return Some(t);
        }
        roll -= t.spawn_weight;
    }
    None
}

/// Independent elite roll for a spawn in `wave`
pub fn roll_elite(wave: u32, rng: &mut Pcg32) -> bool {
    let chance = elite_chance(wave);
    chance > 0.0 && rng.random::<f64>() < chance
}

/// Word for a new enemy of `enemy_type`
///
/// Echo enemies repeat the last defeated word. Before anything has been
/// defeated they draw from the fallback pool instead.
pub fn pick_word(enemy_type: &EnemyType, last_defeated: Option<&str>, rng: &mut Pcg32) -> String {
    let pool_name = match enemy_type.word_pool {
        Some(pool) => pool,
        None => {
            if let Some(word) = last_defeated {
                return word.to_string();
            }
            log::warn!(
                "{} spawned before any word was defeated, using fallback pool",
                enemy_type.id
            );
            ECHO_FALLBACK_POOL
        }
    };

    match word_pool(pool_name) {
        Some(words) if !words.is_empty() => words[rng.random_range(0..words.len())].to_string(),
        // Unreachable with a validated catalog
        _ => String::new(),
    }
}

/// Random point just outside one edge of the play field
pub fn spawn_position(tuning: &Tuning, rng: &mut Pcg32) -> Vec2 {
    let (w, h) = (tuning.field_width, tuning.field_height);
    let along: f32 = rng.random();
    match rng.random_range(0..4u32) {
        0 => Vec2::new(along * w, -SPAWN_MARGIN),
        1 => Vec2::new(w + SPAWN_MARGIN, along * h),
        2 => Vec2::new(along * w, h + SPAWN_MARGIN),
        _ => Vec2::new(-SPAWN_MARGIN, along * h),
    }
}

/// Health of a fresh enemy of `enemy_type` in `wave`
pub fn enemy_health(tuning: &Tuning, enemy_type: &EnemyType, wave: u32, elite: bool) -> f32 {
    let growth = 1.0 + tuning.enemy_health_growth * wave.saturating_sub(1) as f32;
    let elite_mult = if elite { tuning.elite_health_mult } else { 1.0 };
    tuning.projectile_damage * enemy_type.base_hp * growth * elite_mult
}

/// Speed of a fresh enemy of `enemy_type`
pub fn enemy_speed(tuning: &Tuning, enemy_type: &EnemyType, elite: bool) -> f32 {
    let elite_mult = if elite { tuning.elite_speed_mult } else { 1.0 };
    tuning.enemy_base_speed * enemy_type.base_speed * elite_mult
}

/// Create an enemy of `enemy_type` at `pos` and add it to the session
pub fn spawn_enemy(
    state: &mut GameState,
    enemy_type: &'static EnemyType,
    pos: Vec2,
    elite: bool,
) -> u32 {
    let id = state.next_entity_id();
    let word = pick_word(
        enemy_type,
        state.last_defeated_word.as_deref(),
        &mut state.rng,
    );
    let health = enemy_health(&state.tuning, enemy_type, state.wave, elite);
    let speed = enemy_speed(&state.tuning, enemy_type, elite);

    log::debug!(
        "Spawned {} #{} '{}' (hp {:.1}{})",
        enemy_type.id,
        id,
        word,
        health,
        if elite { ", elite" } else { "" }
    );
    state
        .enemies
        .push(Enemy::new(id, enemy_type, pos, word, health, speed, elite));
    state.events.push(GameEvent::EnemySpawned {
        id,
        enemy_type: enemy_type.id,
        elite,
    });
    id
}

/// Advance the spawn clock and spawn whenever a full interval has elapsed
pub fn update_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt as f64;
    let delay = spawn_delay(state.wave);
    while state.spawn_timer >= delay {
        state.spawn_timer -= delay;
        let catalog = state.catalog;
        let Some(enemy_type) = pick_enemy_type(catalog, state.wave, &mut state.rng) else {
            log::warn!("No enemy type eligible for wave {}", state.wave);
            return;
        };
        let elite = roll_elite(state.wave, &mut state.rng);
        let pos = spawn_position(&state.tuning, &mut state.rng);
        spawn_enemy(state, enemy_type, pos, elite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn catalog() -> &'static Catalog {
        Catalog::global().unwrap()
    }

    #[test]
    fn test_wave_one_only_spawns_wave_one_types() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let t = pick_enemy_type(catalog(), 1, &mut rng).unwrap();
            assert!(t.min_wave <= 1, "{} spawned in wave 1", t.id);
        }
    }

    #[test]
    fn test_weighted_pick_reaches_every_type() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5000 {
            seen.insert(pick_enemy_type(catalog(), 20, &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 15);
    }

    #[test]
    fn test_no_elites_before_wave_three() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!((0..500).all(|_| !roll_elite(1, &mut rng) && !roll_elite(2, &mut rng)));
        assert!((0..500).any(|_| roll_elite(20, &mut rng)));
    }

    #[test]
    fn test_echo_copies_last_defeated_word() {
        let echo = catalog().enemy_type("echo").unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        assert_eq!(pick_word(echo, Some("kayak"), &mut rng), "kayak");
    }

    #[test]
    fn test_echo_falls_back_without_defeated_word() {
        let echo = catalog().enemy_type("echo").unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let word = pick_word(echo, None, &mut rng);
        assert!(word_pool(ECHO_FALLBACK_POOL).unwrap().contains(&word.as_str()));
    }

    #[test]
    fn test_pool_words_come_from_pool() {
        let mumble = catalog().enemy_type("mumble").unwrap();
        let mut rng = Pcg32::seed_from_u64(9);
        let word = pick_word(mumble, Some("ignored"), &mut rng);
        assert!(word_pool("common").unwrap().contains(&word.as_str()));
    }

    #[test]
    fn test_spawn_position_outside_field() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..100 {
            let p = spawn_position(&tuning, &mut rng);
            let inside = p.x > 0.0 && p.x < tuning.field_width && p.y > 0.0 && p.y < tuning.field_height;
            assert!(!inside, "{:?} is inside the field", p);
        }
    }

    #[test]
    fn test_elite_stats_boosted() {
        let tuning = Tuning::default();
        let shout = catalog().enemy_type("shout").unwrap();
        assert!(enemy_health(&tuning, shout, 1, true) > enemy_health(&tuning, shout, 1, false));
        assert!(enemy_speed(&tuning, shout, true) > enemy_speed(&tuning, shout, false));
        assert!(enemy_health(&tuning, shout, 10, false) > enemy_health(&tuning, shout, 1, false));
    }
}
