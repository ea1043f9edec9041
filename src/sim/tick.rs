//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Frame time is
//! banked in whole microseconds, with the sub-microsecond remainder carried
//! to the next call, so any split of the same total delta runs the same
//! steps.

use super::combat::{acquire_target, reap_dead, update_projectiles};
use super::movement::{apply_aura, apply_contact_damage, auto_type, cull_escaped, update_enemies};
use super::progression::update_waves;
use super::spawner::update_spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one fixed timestep
pub fn step(state: &mut GameState, dt: f32) {
    state.time_ticks += 1;
    state.elapsed += dt as f64;

    update_waves(state, dt);
    update_spawner(state, dt);
    acquire_target(state);

    update_enemies(state, dt);
    auto_type(state, dt);
    apply_aura(state, dt);
    update_projectiles(state, dt);
    reap_dead(state);

    apply_contact_damage(state, dt);
    cull_escaped(state);
    check_game_over(state);

    state.normalize_order();
}

fn check_game_over(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.player.is_dead() {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.player.clear_target();
    log::info!(
        "Game over at wave {} (level {}, {} kills, {:.1}s)",
        state.wave,
        state.player.level,
        state.player.kills,
        state.elapsed
    );
    state.events.push(GameEvent::GameOver {
        wave: state.wave,
        level: state.player.level,
        kills: state.player.kills,
    });
}

/// Bank `delta_ms` of real time and run every whole step it covers.
///
/// Does nothing outside `Playing`. A single call runs at most
/// [`MAX_SUBSTEPS`] steps; time beyond that is dropped.
pub fn update(state: &mut GameState, delta_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !delta_ms.is_finite() || delta_ms < 0.0 {
        log::warn!("Ignoring invalid frame delta {} ms", delta_ms);
        return;
    }
    let micros = delta_ms * 1000.0 + state.accumulator_frac;
    let whole = micros.floor();
    state.accumulator_frac = micros - whole;
    state.accumulator_micros += whole as u64;

    let mut substeps = 0;
    while state.accumulator_micros >= SIM_STEP_MICROS {
        if substeps == MAX_SUBSTEPS {
            let dropped = state.accumulator_micros - state.accumulator_micros % SIM_STEP_MICROS;
            log::warn!("Dropping {:.1} ms of simulation time", dropped as f64 / 1000.0);
            state.accumulator_micros %= SIM_STEP_MICROS;
            break;
        }
        state.accumulator_micros -= SIM_STEP_MICROS;
        step(state, SIM_DT);
        substeps += 1;
        if state.phase != GamePhase::Playing {
            state.accumulator_micros = 0;
            state.accumulator_frac = 0.0;
            break;
        }
    }
}

/// Playing <-> Paused. Returns true if the phase changed.
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            log::debug!("Paused");
            true
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            log::debug!("Resumed");
            true
        }
        GamePhase::Menu | GamePhase::GameOver => false,
    }
}
