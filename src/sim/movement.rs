//! Enemy movement and everything that touches the player
//!
//! Movement is a pure function of an enemy's behavior, age and position
//! relative to the player. Enemies never step inside contact range; once
//! there they hold position and deal contact damage every step.

use glam::Vec2;

use super::combat::{acquire_target, expected_char, type_correct_char};
use super::enemies::Behavior;
use super::state::{Enemy, GameEvent, GameState};
use crate::consts::*;
use crate::direction_to;

/// Distance at which an enemy touches the player
pub const CONTACT_DISTANCE: f32 = PLAYER_RADIUS + ENEMY_RADIUS;
/// Contact damage multiplier for elites
pub const ELITE_CONTACT_MULT: f32 = 1.5;
/// Seconds between blink teleports
pub const BLINK_PERIOD: f32 = 3.0;
/// Distance covered by one blink
pub const BLINK_DISTANCE: f32 = 60.0;

/// Direction and speed multiplier for one step of `behavior`
fn steer(behavior: Behavior, age: f32, phase: f32, to_player: Vec2) -> (Vec2, f32) {
    let side = to_player.perp();
    let t = age + phase;
    match behavior {
        Behavior::Chase => (to_player, 1.0),
        Behavior::Stutter => {
            let moving = t.rem_euclid(1.0) < 0.6;
            (to_player, if moving { 1.4 } else { 0.0 })
        }
        Behavior::Drift => (to_player + side * 0.5 * (t * 1.5).sin(), 0.9),
        Behavior::Zigzag => {
            let sign = if (t * 4.0).sin() >= 0.0 { 1.0 } else { -1.0 };
            (to_player + side * 0.8 * sign, 1.0)
        }
        Behavior::Orbit => (to_player * 0.4 + side, 1.0),
        Behavior::Blink => (to_player, 0.6),
        Behavior::Dash => {
            let sprinting = t.rem_euclid(2.5) < 0.5;
            (to_player, if sprinting { 3.0 } else { 0.5 })
        }
    }
}

/// Clamp a move so it ends no closer than contact distance
fn stop_at_contact(from: Vec2, to: Vec2, player: Vec2) -> Vec2 {
    if from.distance(player) < CONTACT_DISTANCE || to.distance(player) >= CONTACT_DISTANCE {
        return to;
    }
    let back = direction_to(player, to);
    let back = if back == Vec2::ZERO {
        direction_to(player, from)
    } else {
        back
    };
    player + back * CONTACT_DISTANCE
}

fn move_enemy(enemy: &mut Enemy, player: Vec2, slow: f32, dt: f32) {
    let distance = enemy.pos.distance(player);
    if distance < CONTACT_DISTANCE {
        enemy.vel = Vec2::ZERO;
        return;
    }

    let to_player = direction_to(enemy.pos, player);
    let phase = enemy.id as f32 * 0.37;
    let (dir, mult) = steer(enemy.behavior, enemy.age, phase, to_player);
    let speed = enemy.speed * (1.0 - slow) * (1.0 - enemy.slow_factor) * mult;
    enemy.vel = dir.normalize_or_zero() * speed;

    let mut next = enemy.pos + enemy.vel * dt;
    if enemy.behavior == Behavior::Blink {
        let before = ((enemy.age - dt) / BLINK_PERIOD).floor();
        let after = (enemy.age / BLINK_PERIOD).floor();
        if after > before && enemy.age >= BLINK_PERIOD {
            next += to_player * BLINK_DISTANCE;
        }
    }
    enemy.pos = stop_at_contact(enemy.pos, next, player);
}

/// Age, slow down and move every enemy
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let frozen = state.freeze_timer > 0.0;
    state.freeze_timer = (state.freeze_timer - dt).max(0.0);
    let slow = state.inventory.modifiers().enemy_slow;
    let player = state.player.pos;

    for enemy in state.enemies.iter_mut() {
        enemy.age += dt;
        if enemy.slow_timer > 0.0 {
            enemy.slow_timer -= dt;
            if enemy.slow_timer <= 0.0 {
                enemy.slow_timer = 0.0;
                enemy.slow_factor = 0.0;
            }
        }
        if frozen {
            enemy.vel = Vec2::ZERO;
            continue;
        }
        move_enemy(enemy, player, slow, dt);
    }
}

/// Drop enemies that wandered far outside the field. They give no XP.
pub fn cull_escaped(state: &mut GameState) {
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);
    let m = FIELD_EXIT_MARGIN;
    let target = state.player.target;
    let before = state.enemies.len();
    state.enemies.retain(|e| {
        let p = e.pos;
        p.x >= -m && p.y >= -m && p.x <= w + m && p.y <= h + m
    });
    if state.enemies.len() != before {
        log::debug!("Culled {} escaped enemies", before - state.enemies.len());
        if target.is_some_and(|id| state.enemy(id).is_none()) {
            state.player.clear_target();
        }
    }
}

/// Damage the player for every enemy in contact range
pub fn apply_contact_damage(state: &mut GameState, dt: f32) {
    let player = state.player.pos;
    let dps = state.tuning.contact_dps;
    let raw: f32 = state
        .enemies
        .iter()
        .filter(|e| !e.is_dead() && e.pos.distance(player) <= CONTACT_DISTANCE + 1.0)
        .map(|e| if e.elite { dps * ELITE_CONTACT_MULT } else { dps })
        .sum::<f32>()
        * dt;

    if raw <= 0.0 {
        state.player.in_contact = false;
        return;
    }
    let damage = raw * (1.0 - state.inventory.modifiers().damage_reduction);
    damage_player(state, damage);
    if !state.player.in_contact {
        state.player.in_contact = true;
        state.events.push(GameEvent::PlayerHit {
            damage,
            health: state.player.health,
        });
    }
}

/// Apply damage, letting ctrl_z and last_word veto a fatal hit
pub fn damage_player(state: &mut GameState, damage: f32) {
    if state.player.health - damage > 0.0 {
        state.player.health -= damage;
        return;
    }

    let (survive_fatal, last_stand) = {
        let mods = state.inventory.modifiers();
        (mods.survive_fatal, mods.last_stand)
    };
    let player = &mut state.player;

    if player.survives_used < survive_fatal {
        player.survives_used += 1;
        player.health = 1.0;
        log::info!("ctrl_z undid a fatal hit ({}/{} this wave)", player.survives_used, survive_fatal);
        state.events.push(GameEvent::PlayerSaved { by: "ctrl_z" });
        return;
    }

    if last_stand && !player.last_stand_used {
        player.last_stand_used = true;
        player.health = player.max_health * 0.5;
        player.clear_target();
        let cleared = state.enemies.len();
        state.enemies.clear();
        state.projectiles.clear();
        log::info!("last_word cleared {} enemies", cleared);
        state.events.push(GameEvent::PlayerSaved { by: "last_word" });
        return;
    }

    player.health = 0.0;
}

/// damage_aura: constant damage to enemies near the player
pub fn apply_aura(state: &mut GameState, dt: f32) {
    let Some((radius, dps)) = state.inventory.modifiers().aura else {
        return;
    };
    let player = state.player.pos;
    for enemy in state.enemies.iter_mut() {
        if enemy.pos.distance(player) <= radius {
            enemy.health -= dps * dt;
        }
    }
}

/// ghostwriter: type one correct character every interval
pub fn auto_type(state: &mut GameState, dt: f32) {
    let Some(interval) = state.inventory.modifiers().auto_type_interval else {
        return;
    };
    state.auto_type_timer += dt;
    while state.auto_type_timer >= interval {
        state.auto_type_timer -= interval;
        if acquire_target(state).is_none() {
            state.auto_type_timer = 0.0;
            return;
        }
        let Some(c) = expected_char(state) else {
            return;
        };
        type_correct_char(state, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Catalog;
    use crate::sim::progression::add_item;
    use crate::sim::spawner::spawn_enemy;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(3, Catalog::global().unwrap(), Tuning::default());
        state.reset_session();
        state
    }

    fn spawn(state: &mut GameState, type_id: &str, pos: Vec2) -> u32 {
        let t = state.catalog.enemy_type(type_id).unwrap();
        spawn_enemy(state, t, pos, false)
    }

    #[test]
    fn test_chasers_close_in_and_stop_at_contact() {
        let mut state = playing_state();
        let center = state.player.pos;
        let id = spawn(&mut state, "mumble", center + Vec2::new(200.0, 0.0));
        for _ in 0..2000 {
            update_enemies(&mut state, SIM_DT);
        }
        let d = state.enemy(id).unwrap().pos.distance(state.player.pos);
        assert!((d - CONTACT_DISTANCE).abs() < 1e-3, "distance {}", d);
    }

    #[test]
    fn test_every_behavior_approaches() {
        let mut state = playing_state();
        let start = state.player.pos + Vec2::new(300.0, 0.0);
        let ids: Vec<u32> = state
            .catalog
            .enemy_types()
            .iter()
            .map(|t| spawn_enemy(&mut state, t, start, false))
            .collect();
        for _ in 0..1250 {
            update_enemies(&mut state, SIM_DT);
        }
        for id in ids {
            let e = state.enemy(id).unwrap();
            assert!(e.pos.distance(state.player.pos) < 300.0, "{} did not approach", e.enemy_type);
        }
    }

    #[test]
    fn test_freeze_holds_enemies() {
        let mut state = playing_state();
        let start = state.player.pos + Vec2::new(200.0, 0.0);
        let id = spawn(&mut state, "mumble", start);
        state.freeze_timer = 0.5;
        update_enemies(&mut state, SIM_DT);
        assert_eq!(state.enemy(id).unwrap().pos, start);
    }

    #[test]
    fn test_contact_damage_scales_with_enemies() {
        let mut state = playing_state();
        let center = state.player.pos;
        for _ in 0..3 {
            spawn(&mut state, "mumble", center + Vec2::new(10.0, 0.0));
        }
        apply_contact_damage(&mut state, 1.0);
        assert!((state.player.health - 70.0).abs() < 1e-4);
        assert!(matches!(state.events.last(), Some(GameEvent::PlayerHit { .. })));
    }

    #[test]
    fn test_hardcover_reduces_contact_damage() {
        let mut state = playing_state();
        add_item(&mut state, "hardcover", true);
        let center = state.player.pos;
        spawn(&mut state, "mumble", center);
        apply_contact_damage(&mut state, 1.0);
        assert!((state.player.health - 91.0).abs() < 1e-4);
    }

    #[test]
    fn test_ctrl_z_once_per_wave() {
        let mut state = playing_state();
        add_item(&mut state, "ctrl_z", true);
        damage_player(&mut state, 500.0);
        assert_eq!(state.player.health, 1.0);
        damage_player(&mut state, 500.0);
        assert!(state.player.is_dead());
    }

    #[test]
    fn test_last_word_clears_field() {
        let mut state = playing_state();
        add_item(&mut state, "last_word", true);
        let center = state.player.pos;
        spawn(&mut state, "mumble", center);
        damage_player(&mut state, 500.0);
        assert_eq!(state.player.health, 50.0);
        assert!(state.enemies.is_empty());
        damage_player(&mut state, 500.0);
        assert!(state.player.is_dead());
    }

    #[test]
    fn test_escaped_enemies_culled() {
        let mut state = playing_state();
        let id = spawn(&mut state, "mumble", Vec2::new(-500.0, -500.0));
        cull_escaped(&mut state);
        assert!(state.enemy(id).is_none());
    }

    #[test]
    fn test_ghostwriter_types_for_player() {
        let mut state = playing_state();
        add_item(&mut state, "ghostwriter", true);
        spawn(&mut state, "thesis", Vec2::new(100.0, 100.0));
        auto_type(&mut state, 6.0);
        assert_eq!(state.player.typed_index, 1);
    }
}
