//! Typing and combat resolution
//!
//! The player types the word of one target enemy at a time. A wrong key is
//! ignored (progress is kept) and only counted as a mistake. Completing the
//! word fires a homing projectile at the target and locks it until the
//! projectile lands; a target that survives the hit gets a fresh word.

use glam::Vec2;
use rand::Rng;

use super::hooks::Modifiers;
use super::progression::grant_xp;
use super::spawner::pick_word;
use super::state::{Enemy, GameEvent, GamePhase, GameState, Projectile};
use crate::consts::*;
use crate::{direction_to, is_vowel};

/// What a keypress did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not playing, or nothing to type
    Ignored,
    /// Correct character, word not finished
    Advanced,
    /// Correct character that finished the word
    Completed,
    /// Wrong character; progress kept
    Missed,
}

/// Keep the current target if still typeable, otherwise pick the nearest
/// typeable enemy. Returns the target id.
pub fn acquire_target(state: &mut GameState) -> Option<u32> {
    if let Some(id) = state.player.target {
        if state.enemy(id).is_some_and(Enemy::is_targetable) {
            return Some(id);
        }
        state.player.clear_target();
    }

    let pos = state.player.pos;
    let id = state
        .enemies
        .iter()
        .filter(|e| e.is_targetable())
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .total_cmp(&b.pos.distance_squared(pos))
        })
        .map(|e| e.id)?;
    state.player.target = Some(id);
    Some(id)
}

/// Character the player must type next
pub fn expected_char(state: &GameState) -> Option<char> {
    state
        .current_word()
        .and_then(|word| word.chars().nth(state.player.typed_index))
}

/// Handle one typed character
pub fn press_key(state: &mut GameState, c: char) -> KeyOutcome {
    if state.phase != GamePhase::Playing {
        return KeyOutcome::Ignored;
    }
    if acquire_target(state).is_none() {
        return KeyOutcome::Ignored;
    }
    let Some(expected) = expected_char(state) else {
        return KeyOutcome::Ignored;
    };

    if c.eq_ignore_ascii_case(&expected) {
        type_correct_char(state, expected)
    } else {
        state.player.mistakes += 1;
        log::debug!("Mistyped '{}' (expected '{}')", c, expected);
        KeyOutcome::Missed
    }
}

/// Advance the typed index by one correct character, running key-press hooks
pub fn type_correct_char(state: &mut GameState, c: char) -> KeyOutcome {
    let mods = state.inventory.modifiers();
    let (vowel_heal, consonant_damage) = (mods.vowel_heal, mods.consonant_damage);
    let (instant, tail) = (mods.instant_complete, mods.auto_complete_tail as usize);

    state.player.typed_index += 1;
    if c.is_ascii_alphabetic() {
        if is_vowel(c) {
            state.player.heal(vowel_heal);
        } else {
            state.player.word_bonus += consonant_damage;
        }
    }

    let len = state.current_word().map(|w| w.chars().count()).unwrap_or(0);
    let typed = state.player.typed_index;
    let mut complete = typed >= len;
    if !complete && instant > 0.0 && state.rng.random::<f32>() < instant {
        log::debug!("monkey_typewriter finished the word");
        complete = true;
    }
    if !complete && tail > 0 && len - typed <= tail {
        complete = true;
    }

    if complete {
        complete_word(state);
        KeyOutcome::Completed
    } else {
        KeyOutcome::Advanced
    }
}

/// Damage of the word just completed, before crits
fn word_damage(state: &GameState, mods: &Modifiers, word_len: usize) -> f32 {
    let base = state.tuning.projectile_damage + mods.flat_damage + state.player.word_bonus;
    let mut mult = 1.0;
    if state.player.mistakes == 0 {
        mult += mods.perfect_bonus;
    }
    for &(min_len, bonus) in &mods.long_word {
        if word_len >= min_len {
            mult += bonus;
        }
    }
    for &(max_len, bonus) in &mods.short_word {
        if word_len <= max_len {
            mult += bonus;
        }
    }
    base * mult
}

/// Fire at the current target and move on to the next one
pub fn complete_word(state: &mut GameState) {
    let Some(target) = state.player.target else {
        return;
    };
    let Some(word) = state.enemy(target).map(|e| e.word.clone()) else {
        state.player.clear_target();
        return;
    };
    let mods = state.inventory.modifiers().clone();
    let word_len = word.chars().count();

    let mut damage = word_damage(state, &mods, word_len);
    let crit = mods.crit_chance > 0.0 && state.rng.random::<f32>() < mods.crit_chance;
    if crit {
        damage *= mods.crit_multiplier;
    }

    if let Some(enemy) = state.enemy_mut(target) {
        enemy.locked = true;
    }
    let origin = state.player.pos;
    fire_projectile(state, &mods, origin, target, damage, crit, Some(target));

    if mods.echo_chance > 0.0 && state.rng.random::<f32>() < mods.echo_chance {
        fire_projectile(state, &mods, origin, target, damage, crit, None);
    }

    let extra: u32 = mods
        .extra_projectiles
        .iter()
        .filter(|(min_len, _)| word_len >= *min_len)
        .map(|(_, count)| count)
        .sum();
    let mut aimed = vec![target];
    for _ in 0..extra {
        let next = state.nearest_enemy(origin, &aimed).unwrap_or(target);
        aimed.push(next);
        fire_projectile(state, &mods, origin, next, damage, crit, None);
    }

    if mods.barrage {
        let others: Vec<u32> = state
            .enemies
            .iter()
            .filter(|e| e.id != target && !e.is_dead())
            .map(|e| e.id)
            .collect();
        for id in others {
            fire_projectile(state, &mods, origin, id, damage, crit, None);
        }
    }

    if mods.freeze_secs > 0.0 {
        state.freeze_timer = state.freeze_timer.max(mods.freeze_secs);
    }

    log::debug!("Completed '{}' for {:.1} damage{}", word, damage, if crit { " (crit)" } else { "" });
    state.events.push(GameEvent::WordCompleted {
        word,
        enemy: target,
    });
    state.player.clear_target();
    acquire_target(state);
}

/// Launch a projectile from `origin` homing on `target`
pub fn fire_projectile(
    state: &mut GameState,
    mods: &Modifiers,
    origin: Vec2,
    target: u32,
    damage: f32,
    crit: bool,
    word_owner: Option<u32>,
) -> u32 {
    let speed = state.tuning.projectile_speed * (1.0 + mods.projectile_speed);
    let aim = state
        .enemy(target)
        .map(|e| direction_to(origin, e.pos))
        .unwrap_or(Vec2::ZERO);
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: origin,
        vel: aim * speed,
        target: Some(target),
        damage,
        crit,
        lifetime: state.tuning.projectile_lifetime,
        wall_bounces: mods.wall_bounces,
        ricochets: mods.ricochets,
        pierce: mods.pierce,
        word_owner,
        hits: Vec::new(),
    });
    id
}

fn outside_field(state: &GameState, pos: Vec2) -> bool {
    pos.x < 0.0 || pos.y < 0.0 || pos.x > state.tuning.field_width || pos.y > state.tuning.field_height
}

/// Move projectiles, bounce free ones off walls, and resolve hits
pub fn update_projectiles(state: &mut GameState, dt: f32) {
    let mods = state.inventory.modifiers().clone();
    let speed = state.tuning.projectile_speed * (1.0 + mods.projectile_speed);
    let hit_range = ENEMY_RADIUS + PROJECTILE_RADIUS;
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    let mut consumed = vec![false; state.projectiles.len()];

    for pi in 0..state.projectiles.len() {
        // Homing
        let target_pos = state.projectiles[pi]
            .target
            .and_then(|id| state.enemy(id))
            .filter(|e| !e.is_dead())
            .map(|e| e.pos);
        let p = &mut state.projectiles[pi];
        match target_pos {
            Some(tp) => {
                let dir = direction_to(p.pos, tp);
                if dir != Vec2::ZERO {
                    p.vel = dir * p.vel.length().max(speed);
                }
            }
            None => p.target = None,
        }

        p.pos += p.vel * dt;
        p.lifetime -= dt;
        if p.lifetime <= 0.0 {
            consumed[pi] = true;
            continue;
        }

        // Only free-flying projectiles interact with the walls
        if p.target.is_none() && outside_field(state, state.projectiles[pi].pos) {
            let p = &mut state.projectiles[pi];
            if p.wall_bounces == 0 || p.vel == Vec2::ZERO {
                consumed[pi] = true;
                continue;
            }
            if p.pos.x < 0.0 || p.pos.x > width {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > height {
                p.vel.y = -p.vel.y;
            }
            p.pos = p.pos.clamp(Vec2::ZERO, Vec2::new(width, height));
            p.wall_bounces -= 1;
            p.damage *= 1.0 + mods.bounce_damage;
        }

        // Homing projectiles only strike their target; free ones strike anything
        let p = &state.projectiles[pi];
        let hit = state
            .enemies
            .iter()
            .filter(|e| !e.is_dead() && !p.hits.contains(&e.id))
            .filter(|e| p.target.is_none_or(|t| t == e.id))
            .find(|e| e.pos.distance(p.pos) <= hit_range)
            .map(|e| e.id);

        if let Some(enemy_id) = hit {
            consumed[pi] = resolve_hit(state, &mods, pi, enemy_id);
        }
    }

    let mut index = 0;
    let mut released = Vec::new();
    state.projectiles.retain(|p| {
        let keep = !consumed.get(index).copied().unwrap_or(false);
        index += 1;
        if !keep {
            if let Some(owner) = p.word_owner {
                released.push(owner);
            }
        }
        keep
    });
    // A projectile that never reached its word's enemy releases the lock
    for owner in released {
        if let Some(enemy) = state.enemy_mut(owner) {
            enemy.locked = false;
        }
    }
}

/// Apply projectile `pi` to `enemy_id`. Returns true when the projectile is used up.
fn resolve_hit(state: &mut GameState, mods: &Modifiers, pi: usize, enemy_id: u32) -> bool {
    let player_pos = state.player.pos;
    let (damage, owner) = {
        let p = &state.projectiles[pi];
        (p.damage, p.word_owner)
    };

    let Some(enemy) = state.enemy_mut(enemy_id) else {
        return true;
    };
    let dealt = if enemy.elite {
        damage * (1.0 + mods.elite_bonus)
    } else {
        damage
    };
    enemy.health -= dealt;
    if let Some((factor, secs)) = mods.slow_on_hit {
        enemy.apply_slow(factor, secs);
    }
    if mods.knockback > 0.0 {
        enemy.pos += direction_to(player_pos, enemy.pos) * mods.knockback;
    }
    let hit_pos = enemy.pos;
    let enemy_type = enemy.enemy_type;
    let survived = !enemy.is_dead();
    let word = enemy.word.clone();

    if owner == Some(enemy_id) {
        state.projectiles[pi].word_owner = None;
        if survived {
            // Spent word: hand out a new one
            let new_word = state
                .catalog
                .enemy_type(enemy_type)
                .map(|t| pick_word(t, state.last_defeated_word.as_deref(), &mut state.rng))
                .unwrap_or(word);
            if let Some(enemy) = state.enemy_mut(enemy_id) {
                enemy.word = new_word;
                enemy.locked = false;
            }
        }
    }

    if mods.splash_fraction > 0.0 && mods.splash_radius > 0.0 {
        let splash = dealt * mods.splash_fraction;
        for other in state.enemies.iter_mut() {
            if other.id != enemy_id && other.pos.distance(hit_pos) <= mods.splash_radius {
                other.health -= splash;
            }
        }
    }

    let p = &mut state.projectiles[pi];
    p.hits.push(enemy_id);
    if p.pierce > 0 {
        p.pierce -= 1;
        p.target = None;
        return false;
    }
    if p.ricochets > 0 {
        p.ricochets -= 1;
        p.damage *= mods.ricochet_falloff;
        let hits = p.hits.clone();
        if let Some(next) = state.nearest_enemy(hit_pos, &hits) {
            let p = &mut state.projectiles[pi];
            p.target = Some(next);
            p.pos = hit_pos;
            return false;
        }
    }
    true
}

/// Remove dead enemies and run kill hooks until nothing else dies
pub fn reap_dead(state: &mut GameState) {
    // Bounded: each pass removes at least one enemy
    while state.enemies.iter().any(Enemy::is_dead) {
        let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
            std::mem::take(&mut state.enemies).into_iter().partition(Enemy::is_dead);
        state.enemies = alive;
        for enemy in dead {
            on_enemy_killed(state, enemy);
        }
    }
}

fn on_enemy_killed(state: &mut GameState, enemy: Enemy) {
    let mods = state.inventory.modifiers().clone();
    let base_xp = if enemy.elite {
        state.tuning.elite_xp_mult as u64
    } else {
        1
    };
    let xp = (base_xp + mods.bonus_xp as u64) * mods.xp_multiplier as u64;

    state.player.kills += 1;
    // Locked means its word was typed in full, whatever struck the final blow
    if enemy.locked {
        state.last_defeated_word = Some(enemy.word.clone());
    }
    if state.player.target == Some(enemy.id) {
        state.player.clear_target();
    }
    if mods.lifesteal > 0.0 {
        state.player.heal(mods.lifesteal);
    }

    if mods.chain_damage > 0.0 {
        if let Some(next) = state.nearest_enemy(enemy.pos, &[]) {
            if let Some(other) = state.enemy_mut(next) {
                other.health -= mods.chain_damage;
            }
        }
    }

    if mods.recursive_chance > 0.0 && state.rng.random::<f32>() < mods.recursive_chance {
        if let Some(next) = state.nearest_enemy(enemy.pos, &[]) {
            let damage = state.tuning.projectile_damage + mods.flat_damage;
            fire_projectile(state, &mods, enemy.pos, next, damage, false, None);
        }
    }

    log::debug!("Killed {} #{} '{}' (+{} xp)", enemy.enemy_type, enemy.id, enemy.word, xp);
    state.events.push(GameEvent::EnemyKilled {
        id: enemy.id,
        word: enemy.word,
        xp,
    });
    grant_xp(state, xp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Catalog;
    use crate::sim::progression::add_item;
    use crate::sim::spawner::spawn_enemy;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(42, Catalog::global().unwrap(), Tuning::default());
        state.reset_session();
        state
    }

    fn spawn(state: &mut GameState, type_id: &str, pos: Vec2) -> u32 {
        let t = state.catalog.enemy_type(type_id).unwrap();
        spawn_enemy(state, t, pos, false)
    }

    fn type_word(state: &mut GameState) -> String {
        acquire_target(state);
        let word = state.current_word().unwrap().to_string();
        for c in word.chars() {
            press_key(state, c);
        }
        word
    }

    #[test]
    fn test_correct_key_advances() {
        let mut state = playing_state();
        spawn(&mut state, "mumble", Vec2::new(100.0, 100.0));
        acquire_target(&mut state);
        let first = expected_char(&state).unwrap();
        assert_eq!(press_key(&mut state, first), KeyOutcome::Advanced);
        assert_eq!(state.player.typed_index, 1);
    }

    #[test]
    fn test_uppercase_key_matches() {
        let mut state = playing_state();
        spawn(&mut state, "mumble", Vec2::new(100.0, 100.0));
        acquire_target(&mut state);
        let first = expected_char(&state).unwrap().to_ascii_uppercase();
        assert_ne!(press_key(&mut state, first), KeyOutcome::Missed);
    }

    #[test]
    fn test_wrong_key_keeps_progress() {
        let mut state = playing_state();
        spawn(&mut state, "thesis", Vec2::new(100.0, 100.0));
        acquire_target(&mut state);
        let first = expected_char(&state).unwrap();
        press_key(&mut state, first);
        assert_eq!(press_key(&mut state, '#'), KeyOutcome::Missed);
        assert_eq!(state.player.typed_index, 1);
        assert_eq!(state.player.mistakes, 1);
    }

    #[test]
    fn test_completion_fires_and_resets() {
        let mut state = playing_state();
        let id = spawn(&mut state, "mumble", Vec2::new(100.0, 100.0));
        type_word(&mut state);
        assert_eq!(state.player.typed_index, 0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].target, Some(id));
        assert!(state.enemy(id).unwrap().locked);
        // Nothing else to type
        assert_eq!(state.player.target, None);
    }

    #[test]
    fn test_target_advances_to_next_enemy() {
        let mut state = playing_state();
        let center = state.player.pos;
        let near = spawn(&mut state, "mumble", center + Vec2::new(50.0, 0.0));
        let far = spawn(&mut state, "mumble", center + Vec2::new(200.0, 0.0));
        assert_eq!(acquire_target(&mut state), Some(near));
        type_word(&mut state);
        assert_eq!(state.player.target, Some(far));
    }

    #[test]
    fn test_projectile_kills_and_records_word() {
        let mut state = playing_state();
        let center = state.player.pos;
        let id = spawn(&mut state, "mumble", center + Vec2::new(100.0, 0.0));
        let word = type_word(&mut state);
        for _ in 0..60 {
            update_projectiles(&mut state, SIM_DT);
            reap_dead(&mut state);
        }
        assert!(state.enemy(id).is_none());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.last_defeated_word.as_deref(), Some(word.as_str()));
    }

    #[test]
    fn test_typed_word_recorded_when_aura_kills() {
        let mut state = playing_state();
        let center = state.player.pos;
        let id = spawn(&mut state, "mumble", center + Vec2::new(100.0, 0.0));
        let word = type_word(&mut state);
        state.projectiles.clear();
        state.enemy_mut(id).unwrap().health = 0.01;
        add_item(&mut state, "damage_aura", true);
        state.enemy_mut(id).unwrap().pos = center + Vec2::new(20.0, 0.0);

        crate::sim::movement::apply_aura(&mut state, SIM_DT);
        reap_dead(&mut state);

        assert!(state.enemy(id).is_none());
        assert_eq!(state.player.kills, 1);
        assert_eq!(state.last_defeated_word.as_deref(), Some(word.as_str()));
    }

    #[test]
    fn test_untyped_kill_keeps_last_word() {
        let mut state = playing_state();
        state.last_defeated_word = Some("earlier".to_string());
        let id = spawn(&mut state, "mumble", Vec2::new(100.0, 100.0));
        state.enemy_mut(id).unwrap().health = 0.0;
        reap_dead(&mut state);
        assert_eq!(state.last_defeated_word.as_deref(), Some("earlier"));
    }

    #[test]
    fn test_survivor_gets_new_word_and_unlocks() {
        let mut state = playing_state();
        // Thesis has 3x base health: one word does not kill it
        let center = state.player.pos;
        let id = spawn(&mut state, "thesis", center + Vec2::new(100.0, 0.0));
        type_word(&mut state);
        for _ in 0..60 {
            update_projectiles(&mut state, SIM_DT);
            reap_dead(&mut state);
        }
        let enemy = state.enemy(id).unwrap();
        assert!(!enemy.locked);
        assert!(enemy.health < enemy.max_health);
        assert!(!enemy.word.is_empty());
    }

    #[test]
    fn test_keys_ignored_outside_playing() {
        let mut state = playing_state();
        spawn(&mut state, "mumble", Vec2::new(100.0, 100.0));
        state.phase = GamePhase::Paused;
        assert_eq!(press_key(&mut state, 'a'), KeyOutcome::Ignored);
    }

    #[test]
    fn test_tab_complete_finishes_tail() {
        let mut state = playing_state();
        add_item(&mut state, "tab_complete", true);
        spawn(&mut state, "thesis", Vec2::new(100.0, 100.0));
        acquire_target(&mut state);
        let len = state.current_word().unwrap().len();
        let mut outcome = KeyOutcome::Ignored;
        for _ in 0..len - 1 {
            let c = expected_char(&state).unwrap();
            outcome = press_key(&mut state, c);
        }
        assert_eq!(outcome, KeyOutcome::Completed);
    }

    #[test]
    fn test_tower_of_babel_fires_at_everyone() {
        let mut state = playing_state();
        add_item(&mut state, "tower_of_babel", true);
        for i in 0..4 {
            spawn(&mut state, "mumble", Vec2::new(50.0 + i as f32 * 100.0, 50.0));
        }
        acquire_target(&mut state);
        type_word(&mut state);
        assert_eq!(state.projectiles.len(), 4);
    }

    #[test]
    fn test_chain_letter_damages_neighbor() {
        let mut state = playing_state();
        add_item(&mut state, "chain_letter", true);
        let victim = spawn(&mut state, "mumble", Vec2::new(100.0, 100.0));
        let neighbor = spawn(&mut state, "thesis", Vec2::new(120.0, 100.0));
        state.enemy_mut(victim).unwrap().health = 0.0;
        reap_dead(&mut state);
        let n = state.enemy(neighbor).unwrap();
        assert!((n.max_health - n.health - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_vowel_vampirism_heals() {
        let mut state = playing_state();
        add_item(&mut state, "vowel_vampirism", true);
        state.player.health = 50.0;
        spawn(&mut state, "palindrome", Vec2::new(100.0, 100.0));
        acquire_target(&mut state);
        let word = state.current_word().unwrap().to_string();
        let vowels = word.chars().filter(|&c| is_vowel(c)).count() as f32;
        type_word(&mut state);
        assert!((state.player.health - (50.0 + 0.5 * vowels)).abs() < 1e-4);
    }
}
