//! Hop Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop. On the
//! web the page needs a `<canvas id="canvas">` and, optionally, a
//! `<button id="restart-btn">`. Natively the binary plays headless runs with
//! the autopilot and reports the scores.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

    use hop_runner::Game;
    use hop_runner::Tuning;
    use hop_runner::highscore::LocalStorageStore;
    use hop_runner::platform::input::is_bound_key;
    use hop_runner::platform::{Intent, RawInput, intent_for};
    use hop_runner::renderer::CanvasRenderer;

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStorageStore>,
        renderer: CanvasRenderer,
        /// An animation frame is scheduled
        loop_active: bool,
    }

    impl App {
        fn render(&self) {
            if let Err(e) = self.renderer.render(&self.game.snapshot()) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Hop Runner starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let canvas = match document
            .get_element_by_id("canvas")
            .map(|el| el.dyn_into::<HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("Missing <canvas id=\"canvas\">");
                return;
            }
        };

        let tuning = Tuning::default();
        let renderer = match CanvasRenderer::new(canvas.clone(), tuning.base_speed) {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Canvas init failed: {:?}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(tuning, seed, LocalStorageStore::new());
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            loop_active: false,
        }));
        // Idle frame with the start overlay
        app.borrow().render();

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());
        setup_resize(app);

        log::info!("Hop Runner running!");
    }

    /// Feed an input to the game and make sure the loop runs if a run started
    fn dispatch(app: &Rc<RefCell<App>>, input: RawInput) {
        let Some(intent) = intent_for(&input) else {
            return;
        };
        let start_loop = {
            let mut a = app.borrow_mut();
            a.game.handle(intent, now_ms());
            a.render();
            let start = a.game.state().is_running() && !a.loop_active;
            if start {
                a.loop_active = true;
            }
            start
        };
        if start_loop {
            request_animation_frame(app.clone());
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if is_bound_key(&code) {
                    event.prevent_default();
                }
                if event.repeat() {
                    return;
                }
                dispatch(&app, RawInput::Key(code));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse / pen. Touch pointers are left to the touchstart handler.
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if event.pointer_type() == "touch" {
                    return;
                }
                dispatch(&app, RawInput::PointerDown);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                dispatch(&app, RawInput::TouchStart);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                dispatch(&app, RawInput::RestartButton);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.renderer.resize();
            a.render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let running = a.game.frame(time);
            a.render();
            if !running {
                a.loop_active = false;
            }
            running
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hop Runner (native) starting...");
    log::info!("Native mode plays headless autopilot runs - run with `trunk serve` for the web version");

    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result};
    use hop_runner::platform::Intent;
    use hop_runner::{Game, MemoryStore, Tuning};

    /// Number of autopilot runs to play
    const RUNS: u32 = 3;
    /// Give up on a run after this long (simulated seconds)
    const MAX_RUN_SECS: f32 = 300.0;
    const FRAME_DT: f32 = 1.0 / 60.0;

    fn read_tuning(path: &str) -> Result<Tuning> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tuning file {}", path))?;
        let tuning =
            Tuning::from_json(&json).with_context(|| format!("Invalid tuning in {}", path))?;
        Ok(tuning)
    }

    /// Tuning from the file named by `HOP_RUNNER_TUNING`, else defaults
    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("HOP_RUNNER_TUNING") else {
            return Tuning::default();
        };
        match read_tuning(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning: {:#}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(rand::random::<u64>);

        let mut game = Game::new(load_tuning(), seed, MemoryStore::new());
        game.set_autopilot(true);

        for run in 1..=RUNS {
            game.handle(Intent::Restart, 0.0);
            let max_frames = (MAX_RUN_SECS / FRAME_DT) as u32;
            let mut frames = 0;
            while game.step(FRAME_DT) && frames < max_frames {
                frames += 1;
            }
            let state = game.state();
            println!(
                "run {}: score {} after {:.1}s (speed {:.0}, {} obstacle slots)",
                run,
                state.score.display(),
                state.elapsed,
                state.speed,
                state.obstacles.capacity()
            );
        }
        println!("seed {} best {}", seed, game.state().high_score);
    }

}
