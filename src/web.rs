//! JavaScript bindings
//!
//! Snapshots cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{Game, Key};

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("Snapshot serialization failed: {}", err);
        "null".to_string()
    })
}

/// A game handle owned by JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WebGame, JsError> {
        let game = Game::new(seed).map_err(|err| JsError::new(&err.to_string()))?;
        Ok(WebGame { game })
    }

    #[wasm_bindgen(js_name = gameState)]
    pub fn game_state(&self) -> String {
        self.game.game_state().as_str().to_string()
    }

    pub fn inventory(&self) -> String {
        to_json(&self.game.inventory())
    }

    #[wasm_bindgen(js_name = activeSynergies)]
    pub fn active_synergies(&self) -> String {
        to_json(&self.game.active_synergies())
    }

    #[wasm_bindgen(js_name = currentWord)]
    pub fn current_word(&self) -> Option<String> {
        self.game.current_word()
    }

    #[wasm_bindgen(js_name = typedIndex)]
    pub fn typed_index(&self) -> u32 {
        self.game.typed_index() as u32
    }

    pub fn enemies(&self) -> String {
        to_json(&self.game.enemies())
    }

    pub fn projectiles(&self) -> String {
        to_json(&self.game.projectiles())
    }

    pub fn player(&self) -> String {
        to_json(&self.game.player())
    }

    pub fn wave(&self) -> u32 {
        self.game.wave()
    }

    #[wasm_bindgen(js_name = pendingReward)]
    pub fn pending_reward(&self) -> String {
        to_json(&self.game.pending_reward())
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self) {
        self.game.start_game();
    }

    #[wasm_bindgen(js_name = updateGame)]
    pub fn update_game(&mut self, delta_ms: f64) {
        self.game.update_game(delta_ms);
    }

    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self, id: &str, skip_notification: bool) -> bool {
        self.game.add_item(id, skip_notification)
    }

    #[wasm_bindgen(js_name = chooseReward)]
    pub fn choose_reward(&mut self, index: u32) -> bool {
        self.game.choose_reward(index as usize)
    }

    #[wasm_bindgen(js_name = spawnEnemyOfType)]
    pub fn spawn_enemy_of_type(&mut self, x: f32, y: f32, type_id: &str) -> Option<u32> {
        self.game.spawn_enemy_of_type(x, y, type_id)
    }

    /// Feed a DOM `KeyboardEvent.key`. Returns false for ignored keys.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        match Key::from_dom(key) {
            Some(key) => {
                self.game.handle_key(key);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&mut self) -> bool {
        self.game.toggle_pause()
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        to_json(&self.game.drain_events())
    }

    /// Enemy types keyed by id
    #[wasm_bindgen(js_name = enemyTypes)]
    pub fn enemy_types() -> String {
        to_json(&Game::enemy_type_table())
    }

    /// Items keyed by id
    pub fn items() -> String {
        to_json(&Game::item_table())
    }
}
