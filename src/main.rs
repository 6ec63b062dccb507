//! Neon Sprint entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use neon_sprint::consts::*;
    use neon_sprint::render;
    use neon_sprint::sim::Viewport;
    use neon_sprint::{GameSession, InputState, SessionPhase};

    /// Cached HUD readouts; DOM text is rewritten only when a value changes
    #[derive(Default)]
    struct HudCache {
        score: Option<u64>,
        best: Option<u64>,
        speed: Option<i32>,
        boost: Option<u8>,
    }

    /// Host shell: session plus everything platform-side
    struct Shell {
        session: GameSession,
        input: InputState,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        raf_id: Option<i32>,
        hud: HudCache,
    }

    impl Shell {
        /// Run one scheduled frame and repaint
        fn frame(&mut self, time: f64) -> SessionPhase {
            let phase = self.session.frame(time, &self.input);
            self.draw();
            self.update_hud();
            phase
        }

        fn draw(&self) {
            if let Some(world) = self.session.world() {
                if let Err(e) = render::render(&self.ctx, world) {
                    log::warn!("Render error: {e:?}");
                }
            }
        }

        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let score = self.session.score();
            if self.hud.score != Some(score) {
                self.hud.score = Some(score);
                set_hud_value(&document, "hud-score", &score.to_string());
            }

            let best = self.session.best_score();
            if self.hud.best != Some(best) {
                self.hud.best = Some(best);
                set_hud_value(&document, "hud-best", &best.to_string());
            }

            let speed = self.session.display_speed();
            if self.hud.speed != Some(speed) {
                self.hud.speed = Some(speed);
                set_hud_value(&document, "hud-speed", &speed.to_string());
            }

            let boost = self.session.boost_percent();
            if self.hud.boost != Some(boost) {
                self.hud.boost = Some(boost);
                set_hud_value(&document, "hud-boost", &format!("{boost}%"));
            }

            // Overlays follow the phase
            set_visible(&document, "start-overlay", self.session.phase() == SessionPhase::Idle);
            set_visible(&document, "crash-overlay", self.session.is_crashed());
            if self.session.is_crashed() {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.session.score().to_string()));
                }
            }
        }

        /// Begin a run: fresh world, cleared input, loop scheduled
        fn start(shell: &Rc<RefCell<Shell>>) {
            cancel_frame(shell);
            {
                let mut s = shell.borrow_mut();
                s.input.clear();
                s.session.start();
            }
            request_frame(shell.clone());
        }

        /// Re-measure the canvas container and push the new viewport into
        /// the session
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(parent) = self.canvas.parent_element() else {
                return;
            };

            let rect = parent.get_bounding_client_rect();
            let width = (rect.width() as f32).min(VIEWPORT_MAX_WIDTH);
            let height = neon_sprint::clamp(
                (width * 1.4).round(),
                VIEWPORT_MIN_HEIGHT,
                VIEWPORT_MAX_HEIGHT,
            );
            let dpr = (window.device_pixel_ratio() as f32).min(MAX_DPR);

            self.canvas.set_width((width * dpr) as u32);
            self.canvas.set_height((height * dpr) as u32);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{width}px"));
            let _ = style.set_property("height", &format!("{height}px"));

            self.session.resize(Viewport::new(width, height, dpr));

            // Keep a crashed or freshly-resized frame on screen
            self.draw();
        }
    }

    fn set_hud_value(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    fn request_frame(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let for_closure = shell.clone();
        let closure = Closure::once(move |time: f64| {
            for_closure.borrow_mut().raf_id = None;
            let phase = for_closure.borrow_mut().frame(time);
            // The loop only reschedules itself while the session runs; a
            // crash ends the cadence until the next start
            if phase == SessionPhase::Running {
                request_frame(for_closure);
            }
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => shell.borrow_mut().raf_id = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    /// Idempotent: safe when no frame is pending
    fn cancel_frame(shell: &Rc<RefCell<Shell>>) {
        if let Some(id) = shell.borrow_mut().raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    fn setup_keyboard(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keydown: simulation buttons plus the session-level keys
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key().to_lowercase();
                let handled = shell.borrow_mut().input.apply_key(&key, true);
                if handled {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "enter" => {
                        if !shell.borrow().session.is_running() {
                            Shell::start(&shell);
                        }
                    }
                    "r" => {
                        if shell.borrow().session.is_crashed() {
                            Shell::start(&shell);
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup releases held buttons
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key().to_lowercase();
                shell.borrow_mut().input.apply_key(&key, false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_observer(shell: Rc<RefCell<Shell>>) {
        let Some(parent) = shell.borrow().canvas.parent_element() else {
            log::warn!("Canvas has no container, skipping resize observer");
            return;
        };

        let closure = Closure::<dyn FnMut(js_sys::Array, web_sys::ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: web_sys::ResizeObserver| {
                shell.borrow_mut().resize();
            },
        );
        match web_sys::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&parent);
                // The observer must outlive this function
                std::mem::forget(observer);
            }
            Err(e) => log::warn!("ResizeObserver unavailable: {e:?}"),
        }
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Sprint starting...");

        let Some(window) = web_sys::window() else {
            log::warn!("No window, cannot start");
            return;
        };
        let Some(document) = window.document() else {
            log::warn!("No document, cannot start");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::warn!("No #canvas element, cannot start");
                return;
            }
        };
        let ctx: CanvasRenderingContext2d = match canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
        {
            Some(ctx) => ctx,
            None => {
                log::warn!("Canvas has no 2d context, cannot start");
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(seed, Viewport::new(640.0, 880.0, 1.0));
        log::info!("Session seeded with {seed}");

        let shell = Rc::new(RefCell::new(Shell {
            session,
            input: InputState::default(),
            canvas,
            ctx,
            raf_id: None,
            hud: HudCache::default(),
        }));

        shell.borrow_mut().resize();
        shell.borrow_mut().update_hud();
        setup_keyboard(shell.clone());
        setup_resize_observer(shell);

        log::info!("Neon Sprint ready, press Enter to start");
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
    use neon_sprint::sim::Viewport;
    use neon_sprint::{GameSession, InputState};

    env_logger::init();
    log::info!("Neon Sprint (native) starting...");

    // Headless smoke run: a seeded session stepped at a steady 60 Hz with a
    // scripted input pattern
    let mut session = GameSession::new(7, Viewport::new(640.0, 880.0, 1.0));
    session.start();

    let mut input = InputState::default();
    for i in 1..=1000u32 {
        input.boost = i <= 120;
        input.steer_right = (200..260).contains(&i);
        input.steer_left = (400..460).contains(&i);

        let timestamp = i as f64 * 16.666;
        if session.frame(timestamp, &input) != neon_sprint::SessionPhase::Running {
            log::info!("Crashed on frame {i}");
            break;
        }
    }

    println!(
        "distance: {}  speed: {}  boost: {}%  best: {}",
        session.score(),
        session.display_speed(),
        session.boost_percent(),
        session.best_score()
    );
}
