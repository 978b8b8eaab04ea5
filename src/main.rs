//! Canvas Invaders entry point
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

    use canvas_invaders::renderer::{FrameBatch, RenderState};
    use canvas_invaders::{AudioManager, Game, Settings};

    /// `keyCode` of the mute toggle (M)
    const MUTE_KEY: u32 = 77;

    /// Browser-side state around the simulation
    struct App {
        game: Game,
        batch: FrameBatch,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
    }

    impl App {
        fn new(width: f32, height: f32, seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                game: Game::new(width, height, seed),
                batch: FrameBatch::new(),
                render_state: None,
                audio: AudioManager::from_settings(&settings),
                settings,
            }
        }

        /// Simulate and draw one frame
        fn frame(&mut self) {
            self.game.frame(&mut self.batch, &self.audio);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.audio.set_muted(muted);
            self.settings.save();
            log::info!("Sound {}", if muted { "off" } else { "on" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Canvas Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("screen")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.width();
        let height = canvas.height();

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(width as f32, height as f32, seed)));
        log::info!("Game initialized {}x{} with seed: {}", width, height, seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Canvas Invaders running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                // First key press counts as the user gesture audio needs
                a.audio.resume();

                let code = event.key_code();
                if code == MUTE_KEY {
                    a.toggle_mute();
                    return;
                }
                if let Some(control) = a.game.keyboard.key_down(code) {
                    if control.prevents_default() {
                        event.prevent_default();
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.keyboard.key_up(event.key_code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside): key-ups will never arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.settings.release_keys_on_blur {
                    a.game.keyboard.release_all();
                    log::info!("Released keys (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use canvas_invaders::renderer::FrameBatch;
    use canvas_invaders::{AudioManager, Game, Settings};

    env_logger::init();
    log::info!("Canvas Invaders (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    const FRAMES: u64 = 600;
    const SEED: u64 = 0x5EED;

    let mut game = Game::new(600.0, 400.0, SEED);
    let audio = AudioManager::from_settings(&Settings::load());
    let mut batch = FrameBatch::new();

    // Scripted run: sweep right while tapping space once a second
    game.keyboard.key_down(39);
    for frame in 0..FRAMES {
        if frame % 60 == 0 {
            game.keyboard.key_down(32);
        }
        game.frame(&mut batch, &audio);
    }

    let world = &game.world;
    log::info!(
        "After {} frames: player {}, {} invaders, {} bullets, {} rects drawn",
        world.frame,
        if world.player().is_some() { "alive" } else { "destroyed" },
        world.invaders().count(),
        world.bullets().count(),
        batch.rect_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
