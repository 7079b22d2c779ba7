//! Lane Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use lane_dodge::Settings;
    use lane_dodge::audio::AudioManager;
    use lane_dodge::platform::{frame_delta, queue_key};
    use lane_dodge::renderer::{RenderState, build_scene};
    use lane_dodge::sim::{Command, GamePhase, GameState, TickInput, Viewport, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        input: TickInput,
        last_time: Option<f64>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState, settings: Settings) -> Self {
            let input = TickInput {
                autopilot: settings.demo,
                ..Default::default()
            };
            Self {
                state,
                render_state: None,
                audio: AudioManager::new(&settings),
                settings,
                input,
                last_time: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick for this frame
        fn update(&mut self, time: f64) {
            let dt = frame_delta(self.last_time, time);
            self.last_time = Some(time);

            let events = tick(&mut self.state, &self.input, dt);

            // Commands are one-shot
            self.input.commands.clear();

            self.audio.handle_events(&events);
            self.audio.update();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state);
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Lane Dodge starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Simulation runs in CSS pixels; the surface uses device pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let viewport = Viewport::new(client_w as f32, client_h as f32);
        if viewport.is_empty() {
            log::error!("Canvas has no size ({client_w}x{client_h}); is it hidden?");
            return;
        }

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let state = match GameState::new(viewport, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Cannot start a session for {viewport:?}: {e}");
                return;
            }
        };
        log::info!("Game initialized with seed: {seed}, viewport {client_w}x{client_h}");
        let game = Rc::new(RefCell::new(Game::new(state, settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, viewport).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Lane Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();

            // Browsers only allow audio after a user gesture
            if !g.audio.is_loop_playing() {
                g.audio.play_loop();
            }

            if queue_key(&event.key(), &mut g.input) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::GameOver {
                    g.input.push(Command::Restart);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_dodge::Tuning;
    use lane_dodge::sim::{GameEvent, GameState, TickInput, Viewport, tick};

    env_logger::init();
    log::info!("Lane Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` to play");

    // Usage: lane-dodge [seed] [ticks] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::error!("Bad tuning file {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::with_tuning(Viewport::new(800.0, 600.0), seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to create session: {e}");
            std::process::exit(1);
        }
    };
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut spawned = 0u32;
    let mut played = 0u32;
    for _ in 0..ticks {
        let events = tick(&mut state, &input, 1.0);
        played += 1;
        spawned += events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count() as u32;
        if state.is_game_over() {
            break;
        }
    }

    println!(
        "seed {seed}: {played} ticks, {spawned} obstacles, score {}, difficulty {:.3}, {:?}",
        state.score, state.difficulty, state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
