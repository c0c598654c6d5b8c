//! Lurker entry point
//!
//! Browser build wires the DOM, pointer lock and Web Audio into a session
//! and drives it from requestAnimationFrame. Native build plays a headless
//! session on autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, MouseEvent};

    use lurker::input::InputEvent;
    use lurker::platform::{
        Collaborators, FrameSink, FrameView, Hud, HudSnapshot, PointerCapture, SessionSummary,
    };
    use lurker::sim::{FrameTimer, SessionPhase, SystemClock, seeded};
    use lurker::{Config, SessionController, Settings};

    // JS bindings for pointer lock and the scene hook
    #[wasm_bindgen(inline_js = "
        export function request_pointer_lock() {
            const canvas = document.getElementById('gameCanvas');
            if (canvas) {
                const result = canvas.requestPointerLock();
                if (result && result.catch) {
                    result.catch(e => console.log('Pointer lock failed:', e));
                }
            }
        }

        export function exit_pointer_lock() {
            if (document.pointerLockElement) {
                document.exitPointerLock();
            }
        }

        export function is_pointer_locked() {
            const canvas = document.getElementById('gameCanvas');
            return canvas !== null && document.pointerLockElement === canvas;
        }

        export function present_frame(px, py, pz, yaw, pitch, ax, ay, az, visible, ayaw) {
            const scene = window.lurkerScene;
            if (scene && scene.present) {
                scene.present(px, py, pz, yaw, pitch, ax, ay, az, visible, ayaw);
            }
        }
    ")]
    extern "C" {
        fn request_pointer_lock();
        fn exit_pointer_lock();
        fn is_pointer_locked() -> bool;
        #[allow(clippy::too_many_arguments)]
        fn present_frame(
            px: f32,
            py: f32,
            pz: f32,
            yaw: f32,
            pitch: f32,
            ax: f32,
            ay: f32,
            az: f32,
            visible: bool,
            ayaw: f32,
        );
    }

    /// HUD and screens in the page
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    impl Hud for DomHud {
        fn publish(&mut self, hud: &HudSnapshot) {
            self.set_text("scoreDisplay", &hud.score.to_string());
            self.set_text("scaresDisplay", &hud.scares_label());
            self.set_text("timeDisplay", &hud.time_remaining);
            self.set_hidden("scareMessage", !hud.scare_active);
        }

        fn show_summary(&mut self, summary: &SessionSummary) {
            self.set_text("finalScore", &summary.score.to_string());
            self.set_text("finalScares", &summary.scare_count.to_string());
            self.set_text("gameOverReason", summary.reason.as_str());
        }

        fn phase_changed(&mut self, phase: SessionPhase) {
            for id in ["startScreen", "pauseScreen", "gameOverScreen", "scareMessage"] {
                self.set_hidden(id, true);
            }
            let in_session = phase.is_active();
            self.set_hidden("gameUI", !in_session);
            self.set_hidden("volumeControl", !in_session);
            match phase {
                SessionPhase::Menu => self.set_hidden("startScreen", false),
                SessionPhase::Paused => self.set_hidden("pauseScreen", false),
                SessionPhase::Ended => self.set_hidden("gameOverScreen", false),
                SessionPhase::Playing => {}
            }
        }
    }

    struct CanvasPointer;

    impl PointerCapture for CanvasPointer {
        fn request(&mut self) {
            request_pointer_lock();
        }

        fn release(&mut self) {
            exit_pointer_lock();
        }
    }

    /// Hands each frame to the page's scene (`window.lurkerScene`)
    struct SceneHook;

    impl FrameSink for SceneHook {
        fn present(&mut self, frame: &FrameView) {
            let p = frame.player_position;
            let a = frame.antagonist_position;
            present_frame(
                p.x,
                p.y,
                p.z,
                frame.yaw,
                frame.pitch,
                a.x,
                a.y,
                a.z,
                frame.antagonist_visible,
                frame.antagonist_yaw,
            );
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: SessionController,
        frame: FrameTimer,
        settings: Settings,
    }

    impl Game {
        /// Mute button and `M` key; persisted with the rest of the settings
        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            let volume = self.settings.effective_volume();
            self.controller.set_volume(volume);
            self.settings.save();
            sync_mute_label(muted);
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }
    }

    fn sync_mute_label(muted: bool) {
        let button = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("muteButton"));
        if let Some(button) = button {
            button.set_text_content(Some(if muted { "Unmute" } else { "Mute" }));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Lurker starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let (ambient, scare_sound) = lurker::audio::web_sounds();
        let io = Collaborators {
            ambient,
            scare_sound,
            hud: Box::new(DomHud {
                document: document.clone(),
            }),
            pointer: Box::new(CanvasPointer),
            renderer: Box::new(SceneHook),
        };

        let seed = js_sys::Date::now() as u64;
        let controller = match SessionController::new(
            Config::default(),
            Box::new(SystemClock::new()),
            Box::new(seeded(seed)),
            io,
        ) {
            Ok(controller) => controller,
            Err(e) => {
                log::error!("Invalid config: {e}");
                return;
            }
        };
        log::info!("Session RNG seed: {}", seed);

        let mut game = Game {
            controller,
            frame: FrameTimer::new(),
            settings: Settings::load(),
        };
        let volume = game.settings.effective_volume();
        game.controller.set_volume(volume);
        sync_mute_label(game.settings.muted);
        let game = Rc::new(RefCell::new(game));

        setup_input_handlers(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_volume_slider(&document, game.clone());
        request_animation_frame(game);

        log::info!("Lurker running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if event.code() == "Escape" {
                    event.prevent_default();
                }
                if event.code() == "KeyM" {
                    game.borrow_mut().toggle_mute();
                    return;
                }
                game.borrow_mut()
                    .controller
                    .handle_input(&InputEvent::KeyDown(event.code()));
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut()
                    .controller
                    .handle_input(&InputEvent::KeyUp(event.code()));
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse look (relative motion under pointer lock)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .controller
                    .handle_input(&InputEvent::PointerMotion {
                        dx: event.movement_x() as f32,
                        dy: event.movement_y() as f32,
                    });
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer lock change
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let captured = is_pointer_locked();
                game.borrow_mut()
                    .controller
                    .handle_input(&InputEvent::PointerCaptureChanged { captured });
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Pointer lock error
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                log::warn!("Pointer lock error");
            });
            let _ = document.add_event_listener_with_callback(
                "pointerlockerror",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            action(&mut game.borrow_mut());
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "startButton", game.clone(), |g| {
            g.frame.reset();
            g.controller.start();
        });
        on_click(document, "restartButton", game.clone(), |g| {
            g.frame.reset();
            g.controller.restart();
        });
        on_click(document, "resumeButton", game.clone(), |g| {
            g.frame.reset();
            g.controller.resume();
        });
        on_click(document, "mainMenuButton", game.clone(), |g| {
            g.controller.return_to_menu();
        });
        on_click(document, "muteButton", game, Game::toggle_mute);
    }

    fn setup_volume_slider(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(slider) = document
            .get_element_by_id("volumeSlider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        slider.set_value(&game.borrow().settings.master_volume.to_string());

        let input = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(level) = input.value().parse::<f32>() else {
                return;
            };
            let mut g = game.borrow_mut();
            g.settings.set_master_volume(level);
            let volume = g.settings.effective_volume();
            g.controller.set_volume(volume);
            g.settings.save();
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let dt = g.frame.delta(time);
            if g.controller.phase() == SessionPhase::Playing {
                g.controller.tick(dt);
            } else {
                g.controller.present();
            }
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
    use std::path::PathBuf;

    use lurker::platform::Collaborators;
    use lurker::sim::{ManualClock, seeded};
    use lurker::{Config, SessionController, Settings};

    env_logger::init();
    log::info!("Lurker (native) starting...");

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let clock = ManualClock::new(0.0);
    let seed = 0x5EED_2026_u64;
    let mut controller = match SessionController::new(
        config,
        Box::new(clock.clone()),
        Box::new(seeded(seed)),
        Collaborators::headless(),
    ) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Invalid config: {e}");
            std::process::exit(1);
        }
    };
    controller.set_volume(Settings::load().effective_volume());

    controller.start();
    controller.pointer_capture_changed(true);
    let frames = autopilot::run(&mut controller, &clock);

    let session = controller.session();
    println!(
        "Headless session ({} frames): {:?}, score {}, scares {}/{}, time left {}",
        frames,
        controller.phase(),
        session.score,
        session.scare_count,
        controller.config().max_scares,
        lurker::format_clock(session.time_remaining)
    );
    if let Some(summary) = controller.last_summary() {
        println!("Reason: {}", summary.reason);
    }
}

/// Walks toward wherever the antagonist is hiding
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use std::f32::consts::{PI, TAU};

    use lurker::input::InputEvent;
    use lurker::sim::{ManualClock, SessionPhase};
    use lurker::{SessionController, horizontal_distance};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Safety cap well past any configured session length
    const MAX_FRAMES: u64 = 60 * 60 * 60;

    pub fn run(controller: &mut SessionController, clock: &ManualClock) -> u64 {
        let mut frames = 0;
        while controller.phase() == SessionPhase::Playing && frames < MAX_FRAMES {
            steer(controller);
            clock.advance(FRAME_MS);
            controller.tick((FRAME_MS / 1000.0) as f32);
            frames += 1;
        }
        frames
    }

    fn steer(controller: &mut SessionController) {
        let player = controller.player();
        let target = controller.antagonist().hiding_position;
        let to_target = target - player.position;

        if horizontal_distance(player.position, target) < 1.0 {
            controller.handle_input(&InputEvent::KeyUp("KeyW".into()));
            return;
        }

        // Forward is (-sin yaw, -cos yaw) on the floor
        let desired = (-to_target.x).atan2(-to_target.z);
        let turn = wrap(desired - player.yaw);
        let dx = -turn / controller.config().mouse_sensitivity;
        controller.handle_input(&InputEvent::PointerMotion { dx, dy: 0.0 });
        controller.handle_input(&InputEvent::KeyDown("KeyW".into()));
    }

    fn wrap(mut angle: f32) -> f32 {
        while angle >= PI {
            angle -= TAU;
        }
        while angle < -PI {
            angle += TAU;
        }
        angle
    }
}
