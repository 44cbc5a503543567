//! Neon Brawl entry point
//!
//! Native: runs a headless autopilot demo and logs the outcome.
//! Web: wires keyboard, procedural audio and the animation-frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use neon_brawl::Settings;
    use neon_brawl::Tuning;
    use neon_brawl::assets::AssetManifest;
    use neon_brawl::audio::WebAudio;
    use neon_brawl::platform::KeyboardState;
    use neon_brawl::platform::web::install_keyboard;
    use neon_brawl::renderer::{Hud, draw_list};
    use neon_brawl::sim::{FrameClock, GameStatus, World, tick};

    // Hands each frame to the page's renderer, if one is registered
    #[wasm_bindgen(inline_js = "
        export function present_frame(sprites, score, lives, status) {
            if (window.neonBrawlPresent) {
                window.neonBrawlPresent(sprites, score, lives, status);
            }
        }
    ")]
    extern "C" {
        fn present_frame(sprites: &[u8], score: f64, lives: u32, status: &str);
    }

    struct Game {
        world: World,
        keys: Rc<RefCell<KeyboardState>>,
        audio: WebAudio,
        clock: FrameClock,
        settings: Settings,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = self.keys.borrow_mut().sample();
            tick(&mut self.world, &input, &mut self.audio, dt);
        }

        fn render(&self, time: f64) {
            let sprites = draw_list(&self.world, time, &self.settings);
            let hud = Hud::from_world(&self.world);
            present_frame(
                bytemuck::cast_slice(sprites.as_slice()),
                hud.score as f64,
                hud.lives as u32,
                &format!("{:?}", hud.status),
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::default();

        let mut world = World::new(seed, Tuning::default());
        // Audio is procedural; the manifest only has to be complete
        world.finish_loading(AssetManifest::default().validate());
        log::info!("World initialized with seed: {}", seed);

        let keys = Rc::new(RefCell::new(KeyboardState::new()));
        install_keyboard(keys.clone())?;

        let game = Rc::new(RefCell::new(Game {
            world,
            keys,
            audio: WebAudio::new(&settings),
            clock: FrameClock::new(),
            settings,
        }));

        setup_auto_pause(&window, game.clone())?;
        request_animation_frame(game);

        log::info!("Neon Brawl running!");
        Ok(())
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.world.state.status == GameStatus::Playing {
                    g.world.state.status = GameStatus::Paused;
                    log::info!("Auto-paused (window blur)");
                }
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
                g.audio.resume();
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
            g.render(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(err) = wasm_game::run() {
        log::error!("Failed to start: {:?}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Brawl (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use the web build to play");

    run_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run driven by the autopilot at a simulated 60 Hz
#[cfg(not(target_arch = "wasm32"))]
fn run_demo() {
    use neon_brawl::assets::AssetManifest;
    use neon_brawl::audio::{AudioManager, AudioSink};
    use neon_brawl::renderer::Hud;
    use neon_brawl::sim::{FrameClock, World, demo_input, tick};
    use neon_brawl::{Settings, Tuning};

    let tuning = match std::env::var("NEON_BRAWL_TUNING") {
        Ok(path) => Tuning::load(&path).unwrap_or_else(|err| {
            log::warn!("Ignoring tuning file {path}: {err}");
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };
    let settings = match std::env::var("NEON_BRAWL_SETTINGS") {
        Ok(path) => Settings::load(&path).unwrap_or_else(|err| {
            log::warn!("Ignoring settings file {path}: {err}");
            Settings::default()
        }),
        Err(_) => Settings::default(),
    };
    let seed = env_number("NEON_BRAWL_SEED", 42);
    let frames = env_number("NEON_BRAWL_FRAMES", 3600);

    let mut world = World::new(seed, tuning);
    world.finish_loading(AssetManifest::default().validate());
    let mut audio = AudioManager::new(&settings);
    let mut clock = FrameClock::new();
    log::info!("Running {frames} frames with seed {seed}");

    for frame in 0..frames {
        let now_ms = frame as f64 * 1000.0 / 60.0;
        let dt = clock.delta(now_ms);
        let input = demo_input(&world);
        tick(&mut world, &input, &mut audio, dt);
    }
    audio.stop_music();

    let hud = Hud::from_world(&world);
    log::info!(
        "Demo finished: level {}, score {}, lives {}, {} sounds played",
        hud.level,
        hud.score,
        hud.lives,
        audio.sounds_played()
    );
    match serde_json::to_string_pretty(&world.state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize final state: {err}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_number(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("{name}={raw} is not a number, using {default}");
            default
        }),
        Err(_) => default,
    }
}
