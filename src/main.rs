//! Pixel Arcade entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent};

    use pixel_arcade::audio::{AudioManager, SoundEffect};
    use pixel_arcade::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use pixel_arcade::platform::ActiveGame;
    use pixel_arcade::renderer::{CanvasRenderer, update_hud};
    use pixel_arcade::sim::Heading;
    use pixel_arcade::{Arcade, Command, GameKind, Settings};

    /// Everything the browser callbacks share
    struct Game {
        arcade: Arcade,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        last_time: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64, document: &Document) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            for event in self.arcade.frame(dt) {
                log::debug!("{:?}", event);
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            if let Some(game) = self.arcade.active() {
                if let Some(renderer) = &self.renderer {
                    renderer.render(game);
                }
                update_hud(document, game);
            }
        }

        /// Show the menu or the game panel
        fn sync_panels(&self, document: &Document) {
            let in_game = self.arcade.active_kind().is_some();
            let typing = self.arcade.active_kind() == Some(GameKind::Hunter);
            set_hidden(document, "arcade-menu", in_game);
            set_hidden(document, "game-panel", !in_game);
            set_hidden(document, "hunter-input", !typing);
            set_hidden(document, "snake-dpad", !(in_game && !typing));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{} - scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("Pixel Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let store = open_store();
        let settings = Settings::load(store.as_ref());
        let audio = AudioManager::new(settings.effective_volume());
        let seed = js_sys::Date::now() as u64;

        let game = Rc::new(RefCell::new(Game {
            arcade: Arcade::new(settings, store, seed),
            renderer: CanvasRenderer::new(&document, "canvas"),
            audio,
            last_time: 0.0,
        }));
        if game.borrow().renderer.is_none() {
            log::error!("Canvas #canvas not found - nothing will be drawn");
        }
        game.borrow().sync_panels(&document);

        setup_menu(game.clone(), &document);
        setup_input(game.clone(), &document);
        request_animation_frame(game);
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu(game: Rc<RefCell<Game>>, document: &Document) {
        for (id, kind) in [("open-snake", GameKind::Snake), ("open-hunter", GameKind::Hunter)] {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, id, move || {
                let mut g = game.borrow_mut();
                g.arcade.open(kind);
                g.sync_panels(&doc);
            });
        }
        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "back-btn", move || {
                let mut g = game.borrow_mut();
                g.arcade.back();
                g.sync_panels(&doc);
            });
        }
        // Touch D-pad for Pixel Snake
        for (id, heading) in [
            ("dpad-up", Heading::Up),
            ("dpad-down", Heading::Down),
            ("dpad-left", Heading::Left),
            ("dpad-right", Heading::Right),
        ] {
            let game = game.clone();
            on_click(document, id, move || {
                game.borrow_mut().arcade.command(Command::Steer(heading));
            });
        }
        {
            let doc = document.clone();
            on_click(document, "start-btn", move || {
                let mut g = game.borrow_mut();
                let was_running = match g.arcade.active() {
                    Some(ActiveGame::Snake(s)) => s.state.phase.is_running(),
                    Some(ActiveGame::Hunter(h)) => h.state.phase.is_running(),
                    None => false,
                };
                g.arcade.start();
                if was_running {
                    return;
                }
                if let Some(input) = doc
                    .get_element_by_id("hunter-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    input.set_value("");
                    let _ = input.focus();
                }
            });
        }
    }

    fn setup_input(game: Rc<RefCell<Game>>, document: &Document) {
        // Keyboard
        {
            let game = game.clone();
            let doc = document.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let typing = g.arcade.active_kind() == Some(GameKind::Hunter);
                let Some(command) = Command::from_key(&event.key(), typing) else {
                    return;
                };
                if matches!(command, Command::Steer(_)) || event.key() == " " {
                    event.prevent_default();
                }
                g.arcade.command(command);
                if command == Command::Back {
                    g.sync_panels(&doc);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Word Hunter text field
        if let Some(input) = document
            .get_element_by_id("hunter-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let field = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.arcade.type_text(&field.value());
                if let Some(ActiveGame::Hunter(h)) = g.arcade.active() {
                    if h.state.input.is_empty() {
                        field.set_value("");
                    }
                }
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            game.borrow_mut().frame(time, &document);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Arcade (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build for play");

    demo::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pixel_arcade::persistence::{FileStore, KeyValueStore, MemoryStore};
    use pixel_arcade::sim::GameEvent;
    use pixel_arcade::{Arcade, Command, GameKind, Settings};

    /// Simulated frame length (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop a demo game after this many frames (~5 minutes)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    fn open_store() -> Box<dyn KeyValueStore> {
        let path = std::env::var("PIXEL_ARCADE_STORE")
            .unwrap_or_else(|_| "pixel_arcade.json".to_string());
        match FileStore::open(&path) {
            Ok(store) => {
                log::info!("High scores persist to {}", store.path().display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("Cannot open {}: {} - using memory store", path, e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        let store = open_store();
        let settings = Settings::load(store.as_ref());
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut arcade = Arcade::new(settings, store, seed);
        arcade.command(Command::ToggleIdle);

        for kind in [GameKind::Snake, GameKind::Hunter] {
            arcade.open(kind);
            arcade.start();
            let final_score = play(&mut arcade);
            println!("{:?}: final score {}", kind, final_score);
            arcade.back();
        }
    }

    /// Run frames until the game ends or the frame budget runs out
    fn play(arcade: &mut Arcade) -> u32 {
        let mut score = 0;
        for _ in 0..MAX_FRAMES {
            for event in arcade.frame(FRAME_MS) {
                log::debug!("{:?}", event);
                match event {
                    GameEvent::RewardEaten { score: s } | GameEvent::WordCaught { score: s, .. } => {
                        score = s
                    }
                    GameEvent::NewHighScore { score: s } => {
                        println!("New high score: {}", s);
                    }
                    GameEvent::GameOver { final_score } => return final_score,
                    _ => {}
                }
            }
        }
        log::info!("Frame budget reached");
        score
    }
}
