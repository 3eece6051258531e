//! Blob Arena entry point
//!
//! Browser builds wire the canvas, keyboard and touch input to a [`Game`]
//! and drive it from a `setInterval` loop. Native builds run a headless game
//! on the virtual clock with a scripted pilot at the controls.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use blob_arena::input::Direction;
    use blob_arena::renderer::CanvasSurface;
    use blob_arena::{Game, Settings};

    /// How often the host loop feeds time to the game (ms)
    const HOST_INTERVAL_MS: i32 = 5;
    /// A host gap longer than this counts as a stall (ms)
    const STALL_MS: f64 = 250.0;
    /// Drag distance (px) that counts as one direction press
    const PAN_STEP_PX: f32 = 30.0;

    type SharedGame = Rc<RefCell<Game<CanvasSurface>>>;

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (width as u32, height as u32)
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let performance = window.performance().ok_or("no performance")?;
        let canvas = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into::<HtmlCanvasElement>()?;

        let surface = CanvasSurface::new(canvas)?;
        let (width, height) = window_size(&window);
        surface.resize(width, height);

        let settings = Settings {
            seed: Some(js_sys::Date::now() as u64),
            ..Default::default()
        };
        let game: SharedGame = Rc::new(RefCell::new(Game::new(
            surface,
            settings,
            performance.now(),
        )));

        setup_resize(&window, game.clone())?;
        setup_keyboard(&document, game.clone())?;
        setup_touch(&document, game.clone())?;
        setup_host_loop(&window, performance, game)?;

        log::info!("Blob Arena started ({}x{})", width, height);
        Ok(())
    }

    fn setup_resize(window: &web_sys::Window, game: SharedGame) -> Result<(), JsValue> {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size(&win);
            let mut g = game.borrow_mut();
            g.surface().resize(width, height);
            g.resize(width, height);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(document: &web_sys::Document, game: SharedGame) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            game.borrow_mut().handle_key(&event.key());
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_touch(document: &web_sys::Document, game: SharedGame) -> Result<(), JsValue> {
        let anchor: Rc<Cell<Option<(f32, f32)>>> = Rc::new(Cell::new(None));

        let touch_point = |event: &TouchEvent| {
            event
                .touches()
                .get(0)
                .map(|t| (t.client_x() as f32, t.client_y() as f32))
        };

        {
            let anchor = anchor.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                anchor.set(touch_point(&event));
            });
            document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let (Some(start), Some(point)) = (anchor.get(), touch_point(&event)) else {
                return;
            };
            let (dx, dy) = (point.0 - start.0, point.1 - start.1);
            if dx.hypot(dy) < PAN_STEP_PX {
                return;
            }
            if let Some(direction) = Direction::from_drag(dx, dy) {
                game.borrow_mut().direction(direction);
            }
            anchor.set(Some(point));
        });
        document.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_host_loop(
        window: &web_sys::Window,
        performance: web_sys::Performance,
        game: SharedGame,
    ) -> Result<(), JsValue> {
        let last = Cell::new(performance.now());
        let closure = Closure::<dyn FnMut()>::new(move || {
            let now = performance.now();
            let mut g = game.borrow_mut();
            if now - last.get() > STALL_MS {
                g.stall_to(now);
            }
            g.advance_to(now);
            last.set(now);
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            HOST_INTERVAL_MS,
        )?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use blob_arena::input::{Command, Direction};
    use blob_arena::renderer::LogSurface;
    use blob_arena::sim::GamePhase;
    use blob_arena::{Game, Settings};

    /// Virtual time between host loop iterations (ms)
    const HOST_STEP_MS: f64 = 10.0;
    /// The pilot presses a key this often (ms)
    const PILOT_INTERVAL_MS: f64 = 400.0;
    /// A real-time gap longer than this counts as a stall (ms)
    const STALL_MS: f64 = 250.0;

    /// Command line options
    #[derive(Debug)]
    pub struct Options {
        pub config: Option<PathBuf>,
        pub seconds: f64,
        pub seed: Option<u64>,
        pub realtime: bool,
    }

    impl Options {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut options = Options {
                config: None,
                seconds: 60.0,
                seed: None,
                realtime: false,
            };
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--config" => {
                        options.config = Some(args.next().ok_or("--config needs a path")?.into())
                    }
                    "--seconds" => {
                        let value = args.next().ok_or("--seconds needs a value")?;
                        options.seconds = value
                            .parse()
                            .map_err(|e| format!("bad --seconds {value:?}: {e}"))?;
                    }
                    "--seed" => {
                        let value = args.next().ok_or("--seed needs a value")?;
                        options.seed =
                            Some(value.parse().map_err(|e| format!("bad --seed {value:?}: {e}"))?);
                    }
                    "--realtime" => options.realtime = true,
                    other => return Err(format!("unknown argument {other:?}")),
                }
            }
            Ok(options)
        }
    }

    /// Presses random direction keys, mostly toward the open field
    struct Pilot {
        rng: Pcg32,
        next_press_ms: f64,
    }

    impl Pilot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9),
                next_press_ms: PILOT_INTERVAL_MS,
            }
        }

        fn drive(&mut self, game: &mut Game<LogSurface>, now_ms: f64) {
            while now_ms >= self.next_press_ms {
                self.next_press_ms += PILOT_INTERVAL_MS;
                let direction = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
                game.handle_command(Command::Move(direction));
            }
        }
    }

    pub fn run(options: Options) {
        let mut settings = options
            .config
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        if options.seed.is_some() {
            settings.seed = options.seed;
        }
        let seed = settings.seed.unwrap_or(blob_arena::game::DEFAULT_SEED);

        let surface = LogSurface::new(800, 600, 30);
        let mut game = Game::new(surface, settings, 0.0);
        let mut pilot = Pilot::new(seed);
        let end_ms = options.seconds * 1000.0;

        let started = Instant::now();
        let mut now_ms = 0.0;
        while now_ms < end_ms {
            if options.realtime {
                std::thread::sleep(Duration::from_millis(HOST_STEP_MS as u64));
                let real_ms = started.elapsed().as_secs_f64() * 1000.0;
                if real_ms - now_ms > STALL_MS {
                    game.stall_to(real_ms);
                }
                now_ms = real_ms.min(end_ms);
            } else {
                now_ms = (now_ms + HOST_STEP_MS).min(end_ms);
            }

            pilot.drive(&mut game, now_ms);
            game.advance_to(now_ms);

            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        let summary = serde_json::json!({
            "seed": seed,
            "phase": game.phase(),
            "score": game.score(),
            "time": game.timer().time(),
            "blobs": game.state().blobs.len(),
            "player_radius": game.state().player.radius,
            "frames": game.surface().frames(),
        });
        println!("{summary}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blob Arena (native, headless) starting...");

    match native::Options::parse(std::env::args().skip(1)) {
        Ok(options) => native::run(options),
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: blob-arena [--config FILE] [--seconds N] [--seed N] [--realtime]");
            std::process::exit(2);
        }
    }
}
