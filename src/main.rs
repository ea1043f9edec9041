//! Word Survivor entry point
//!
//! Web: binds keyboard input and the animation frame loop to a [`Game`].
//! Native: runs a seeded bot typist headlessly and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use word_survivor::game::{Game, Key};
    use word_survivor::sim::GamePhase;

    struct App {
        game: Game,
        last_time: f64,
    }

    impl App {
        fn update(&mut self, time: f64) {
            let delta_ms = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            self.game.update_game(delta_ms);

            for event in self.game.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let set = |id: &str, text: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(text));
                }
            };

            let player = self.game.player();
            let word = self.game.current_word().unwrap_or_default();
            let typed: String = word.chars().take(self.game.typed_index()).collect();
            set("word", &word);
            set("typed", &typed);
            set("state", self.game.game_state().as_str());
            set("wave", &self.game.wave().to_string());
            set(
                "health",
                &format!("{:.0}/{:.0}", player.health.max(0.0), player.max_health),
            );
            set("level", &player.level.to_string());
            let reward = self
                .game
                .pending_reward()
                .map(|offer| {
                    offer
                        .items
                        .iter()
                        .enumerate()
                        .map(|(i, id)| format!("[{}] {}", i + 1, id))
                        .collect::<Vec<_>>()
                        .join("  ")
                })
                .unwrap_or_default();
            set("reward", &reward);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", err).into());
        }

        log::info!("Word Survivor starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        if let Some(loading) = window
            .document()
            .and_then(|d| d.get_element_by_id("loading"))
        {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed).map_err(|err| JsValue::from_str(&err.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            last_time: 0.0,
        }));
        setup_keyboard(&window, app.clone());
        setup_auto_pause(&window, app.clone());
        request_animation_frame(app);

        log::info!("Word Survivor running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut app = app.borrow_mut();
            let key = event.key();
            let phase = app.game.game_state();

            match phase {
                GamePhase::Menu | GamePhase::GameOver => {
                    if key == "Enter" || key == " " {
                        let seed = js_sys::Date::now() as u64;
                        app.game = match Game::new(seed) {
                            Ok(game) => game,
                            Err(err) => {
                                log::error!("Restart failed: {}", err);
                                return;
                            }
                        };
                        app.game.start_game();
                        app.last_time = 0.0;
                        log::info!("Started new game with seed: {}", seed);
                    }
                }
                GamePhase::Playing | GamePhase::Paused => {
                    // Digits pick a level-up reward; words never contain them
                    if let Some(index) = key.parse::<usize>().ok().filter(|&n| n >= 1) {
                        if phase == GamePhase::Playing && app.game.pending_reward().is_some() {
                            app.game.choose_reward(index - 1);
                            return;
                        }
                    }
                    if let Some(key) = Key::from_dom(&key) {
                        event.prevent_default();
                        app.game.handle_key(key);
                    }
                }
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            if app.game.game_state() == GamePhase::Playing {
                app.game.toggle_pause();
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            app.update(time);
            app.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use word_survivor::game::{Game, Key};
    use word_survivor::sim::{GameEvent, GamePhase};
    use word_survivor::{GameError, Tuning};

    /// Simulated frame length (60 fps)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of game time
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// Frames between bot keystrokes (about 6 keys/s)
    const KEY_EVERY: u32 = 10;
    /// Chance the bot fumbles a key
    const MISTAKE_CHANCE: f32 = 0.05;

    /// Headless run with a seeded bot typist
    pub fn run(seed: u64, tuning: Tuning) -> Result<(), GameError> {
        let mut game = Game::with_tuning(seed, tuning)?;
        let mut bot = Pcg32::seed_from_u64(seed.rotate_left(17));
        game.start_game();

        let mut frames = 0;
        while frames < MAX_FRAMES && game.game_state() == GamePhase::Playing {
            frames += 1;

            if let Some(offer) = game.pending_reward() {
                if !offer.items.is_empty() {
                    let pick = bot.random_range(0..offer.items.len());
                    game.choose_reward(pick);
                }
            }

            if frames % KEY_EVERY == 0 {
                if let Some(word) = game.current_word() {
                    let next = word.chars().nth(game.typed_index());
                    let key = if bot.random::<f32>() < MISTAKE_CHANCE {
                        Some('#')
                    } else {
                        next
                    };
                    if let Some(c) = key {
                        game.handle_key(Key::Char(c));
                    }
                }
            }

            game.update_game(FRAME_MS);

            for event in game.drain_events() {
                match event {
                    GameEvent::WaveStarted { .. }
                    | GameEvent::LevelUp { .. }
                    | GameEvent::SynergyActivated { .. }
                    | GameEvent::PlayerSaved { .. } => log::info!("{:?}", event),
                    _ => log::debug!("{:?}", event),
                }
            }
        }

        let player = game.player();
        log::info!(
            "Run over after {:.1}s: {}, wave {}, level {}, {} kills",
            frames as f64 * FRAME_MS / 1000.0,
            game.game_state().as_str(),
            game.wave(),
            player.level,
            player.kills
        );
        log::info!("Items: {:?}", game.inventory());
        log::info!("Synergies: {:?}", game.active_synergies());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Word Survivor (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match word_survivor::Tuning::from_json(&json) {
                Ok(tuning) => tuning,
                Err(err) => {
                    log::error!("Bad tuning file {}: {}", path, err);
                    std::process::exit(1);
                }
            },
            Err(err) => {
                log::error!("Cannot read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => word_survivor::Tuning::default(),
    };

    if let Err(err) = demo::run(seed, tuning) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
