//! Pixel Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use pixel_invaders::audio::AudioManager;
    use pixel_invaders::renderer::{RenderState, build_scene};
    use pixel_invaders::sim::GameEvent;
    use pixel_invaders::{Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings) -> Self {
            Self {
                session: Session::new(tuning),
                audio: AudioManager::new(settings.effective_volume()),
                settings,
                render_state: None,
            }
        }

        /// Simulate and draw one frame; returns whether to keep scheduling
        fn frame(&mut self, time: f64) -> bool {
            let outcome = self.session.frame(time);
            for event in &outcome.events {
                self.audio.on_event(event);
                self.update_hud(event);
            }
            self.render();
            outcome.reschedule
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.session.state, &self.settings);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Push score changes and the game-over panel into the DOM
        fn update_hud(&self, event: &GameEvent) {
            match event {
                GameEvent::EnemyDestroyed { score } => set_text("score", &score.to_string()),
                GameEvent::GameOver { final_score, .. } => {
                    set_text("finalScore", &final_score.to_string());
                    set_hidden("gameOver", false);
                }
                GameEvent::Shot | GameEvent::FormationCleared => {}
            }
        }

        /// Reset game state; returns true if the frame loop must be resumed
        fn restart(&mut self) -> bool {
            let resume = self.session.restart();
            set_hidden("gameOver", true);
            set_text("score", "0");
            set_text("lives", &self.session.state.lives.to_string());
            resume
        }
    }

    fn set_text(id: &str, text: &str) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        match el {
            Some(el) => el.set_text_content(Some(text)),
            None => log::warn!("Missing HUD element #{}", id),
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    /// Read an optional `<script id="tuning" type="application/json">` override
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pixel Invaders starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let tuning = load_tuning(&document);
        let settings = Settings::load();
        let width = tuning.canvas_width as u32;
        let height = tuning.canvas_height as u32;
        let logical_size = (tuning.canvas_width, tuning.canvas_height);
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.set_tab_index(1);

        if let Ok(json) = serde_json::to_string(&tuning) {
            log::debug!("Tuning: {}", json);
        }

        let game = Rc::new(RefCell::new(Game::new(tuning, settings)));

        // Initialize WebGPU (WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::default(),
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, logical_size)
                            .await
                        {
                            Ok(render_state) => {
                                game.borrow_mut().render_state = Some(render_state)
                            }
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        // Initial HUD
        set_text("score", "0");
        set_text("lives", &game.borrow().session.state.lives.to_string());
        set_hidden("gameOver", true);

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());

        let _ = canvas.focus();

        // Start game loop
        if game.borrow_mut().session.start() {
            request_animation_frame(game);
        }

        log::info!("Pixel Invaders running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let consumed = game
                    .borrow_mut()
                    .session
                    .handle_key_down(&event.key(), event.repeat());
                // Arrows and space would scroll the page
                if consumed {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.handle_key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss - keyup events never arrive, so drop held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.input.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click focuses the canvas
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let _ = canvas_clone.focus();
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restartButton"))
        else {
            log::warn!("No #restartButton element");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let resume = game.borrow_mut().restart();
            if resume {
                request_animation_frame(game.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = game.borrow_mut().frame(time);
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_invaders::consts::FRAME_MS;
    use pixel_invaders::{Session, Tuning};

    env_logger::init();
    log::info!("Pixel Invaders (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring tuning from {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(tuning);
    session.toggle_autopilot();
    session.start();

    let mut frames: u64 = 0;
    let mut shots = 0;
    loop {
        let outcome = session.frame(frames as f64 * FRAME_MS as f64);
        frames += 1;
        shots += outcome
            .events
            .iter()
            .filter(|e| matches!(e, pixel_invaders::sim::GameEvent::Shot))
            .count();
        if !outcome.reschedule {
            break;
        }
    }

    let state = &session.state;
    println!(
        "Demo finished after {} frames: score {}, {} shots, formation {}",
        frames,
        state.score,
        shots,
        if state.cleared { "cleared" } else { "landed" }
    );
}
