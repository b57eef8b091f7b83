//! Blob Arena entry point
//!
//! Browser: canvas renderer, mouse and touch-joystick input, DOM HUD.
//! Native: headless demo session driven by a scripted joystick.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use blob_arena::renderer::CanvasRenderer;
    use blob_arena::sim::{InputMode, RenderSnapshot, TickInput};
    use blob_arena::{Session, SessionPhase, Tuning};

    /// Knob travel in CSS pixels
    const JOYSTICK_MAX_DIST: f32 = 45.0;

    struct Game {
        session: Session,
        renderer: CanvasRenderer,
        input: TickInput,
    }

    impl Game {
        fn viewport(&self) -> Vec2 {
            let (w, h) = self.renderer.fit_to_client();
            Vec2::new(w, h)
        }

        /// One simulation step and one draw
        fn frame(&mut self) {
            self.input.viewport = self.viewport();

            if let Some(signal) = self.session.frame(&self.input) {
                show_game_over(signal.final_mass);
            }

            if let Some(snap) = self.session.snapshot() {
                if let Err(e) = self.renderer.draw(&snap) {
                    log::warn!("Render error: {:?}", e);
                }
                update_hud(&snap);
            }
        }

        fn start(&mut self, raw_name: &str) {
            let seed = js_sys::Date::now() as u64;
            let viewport = self.viewport();
            // Pointer starts at the screen centre so the player holds still
            self.input = TickInput::pointer(viewport / 2.0, viewport);
            self.session.start(raw_name, seed, viewport);
            set_visible("startScreen", false);
            set_visible("gameOverScreen", false);
        }

        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let viewport = self.viewport();
            if self.session.restart(seed, viewport) {
                self.input.joystick = Vec2::ZERO;
                set_visible("gameOverScreen", false);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn show_game_over(final_mass: u32) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("finalScore")) {
            el.set_text_content(Some(&final_mass.to_string()));
        }
        set_visible("gameOverScreen", true);
    }

    /// Score and leaderboard
    fn update_hud(snap: &RenderSnapshot<'_>) {
        let Some(document) = document() else {
            return;
        };

        if let Some(el) = document.get_element_by_id("currentScore") {
            el.set_text_content(Some(&snap.score.to_string()));
        }

        if let Some(list) = document.get_element_by_id("leaderboardList") {
            list.set_inner_html("");
            for entry in &snap.leaderboard {
                let Ok(item) = document.create_element("li") else {
                    continue;
                };
                // Names are user input: text content only
                item.set_text_content(Some(&format!(
                    "{}. {} - {}",
                    entry.rank, entry.name, entry.mass
                )));
                let _ = item.set_attribute("style", &format!("color: {}", entry.color));
                let _ = list.append_child(&item);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Blob Arena starting...");

        let document = document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(Tuning::default()),
            renderer: CanvasRenderer::new(canvas.clone())?,
            input: TickInput::default(),
        }));

        setup_pointer(&canvas, game.clone());
        setup_joystick(&document, game.clone());
        setup_buttons(&document, game.clone());

        set_visible("startScreen", true);
        request_animation_frame(game);

        log::info!("Blob Arena ready");
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.input.mode = InputMode::Pointer;
            g.input.pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
        });
        let _ =
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn move_knob(knob: Option<&HtmlElement>, offset: Vec2) {
        if let Some(knob) = knob {
            let _ = knob.style().set_property(
                "transform",
                &format!("translate({}px, {}px)", offset.x, offset.y),
            );
        }
    }

    /// Touch joystick: the knob follows the finger up to JOYSTICK_MAX_DIST
    /// from the base centre; deflection is normalized by that distance.
    fn setup_joystick(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(base) = document.get_element_by_id("joystick") else {
            log::debug!("No joystick element, touch input disabled");
            return;
        };
        let knob = document
            .get_element_by_id("joystickKnob")
            .and_then(|k| k.dyn_into::<HtmlElement>().ok());

        {
            let game = game.clone();
            let base_clone = base.clone();
            let knob = knob.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.target_touches().get(0) else {
                    return;
                };
                let rect = base_clone.get_bounding_client_rect();
                let center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
                let finger = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                let offset = (finger - center).clamp_length_max(JOYSTICK_MAX_DIST);
                move_knob(knob.as_ref(), offset);

                let mut g = game.borrow_mut();
                g.input.mode = InputMode::Joystick;
                g.input.joystick = offset / JOYSTICK_MAX_DIST;
            });
            for name in ["touchstart", "touchmove"] {
                let _ = base.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Release
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                move_knob(knob.as_ref(), Vec2::ZERO);
                game.borrow_mut().input.joystick = Vec2::ZERO;
            });
            for name in ["touchend", "touchcancel"] {
                let _ = base.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let name_input = document
            .get_element_by_id("playerName")
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());

        if let Some(btn) = document.get_element_by_id("startButton") {
            let game = game.clone();
            let name_input = name_input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let name = name_input.as_ref().map(|i| i.value()).unwrap_or_default();
                game.borrow_mut().start(&name);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Enter in the name field starts the first game
        if let Some(input) = name_input {
            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() != "Enter" {
                    return;
                }
                let mut g = game.borrow_mut();
                if g.session.phase() == SessionPhase::NotStarted {
                    g.start(&input_clone.value());
                }
            });
            let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;

    use blob_arena::sim::TickInput;
    use blob_arena::{Session, SessionPhase, Tuning};
    use glam::Vec2;

    const SEED: u64 = 42;
    /// One minute at 60 frames per second
    const MAX_FRAMES: u32 = 3600;
    const REPORT_EVERY: u32 = 600;

    pub fn load_tuning(path: &str) -> Result<Tuning, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    fn report(session: &Session, frame: u32) {
        let Some(snap) = session.snapshot() else {
            return;
        };
        log::info!("Frame {}: score {}", frame, snap.score);
        for entry in &snap.leaderboard {
            log::info!("  {}. {} ({})", entry.rank, entry.name, entry.mass);
        }
    }

    /// Run a scripted session: the joystick sweeps slowly round the clock
    pub fn run(tuning: Tuning) {
        let mut session = Session::new(tuning);
        let viewport = Vec2::new(1280.0, 720.0);
        session.start("Demo", SEED, viewport);

        for frame in 1..=MAX_FRAMES {
            let angle = frame as f32 * 0.01;
            let input = TickInput::joystick(Vec2::new(angle.cos(), angle.sin()), viewport);

            if let Some(signal) = session.frame(&input) {
                log::info!("Eaten after {} frames, final mass {}", frame, signal.final_mass);
                break;
            }
            if frame % REPORT_EVERY == 0 {
                report(&session, frame);
            }
        }

        if session.phase() == SessionPhase::Running {
            log::info!("Survived {} frames", MAX_FRAMES);
            report(&session, MAX_FRAMES);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blob Arena (native) starting headless demo...");
    log::info!("The playable version runs in the browser (wasm32 build)");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match demo::load_tuning(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => blob_arena::Tuning::default(),
    };

    demo::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
