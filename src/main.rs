//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        PointerEvent,
    };

    use brick_breaker::render::{Hud, Paint, Shadow, Style, Surface, colors, draw_frame};
    use brick_breaker::sim::{Circle, GameEvent, PaddleDirection, Rect};
    use brick_breaker::{Game, Settings};

    /// Canvas 2D implementation of the draw calls
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
    }

    impl Surface for CanvasSurface {
        fn clear(&mut self, size: Vec2) {
            self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
        }

        fn set_alpha(&mut self, alpha: f32) {
            self.ctx.set_global_alpha(alpha as f64);
        }

        fn set_shadow(&mut self, shadow: Option<Shadow>) {
            match shadow {
                Some(shadow) => {
                    self.ctx.set_shadow_color(&colors::css(shadow.color));
                    self.ctx.set_shadow_blur(shadow.blur as f64);
                }
                None => self.ctx.set_shadow_blur(0.0),
            }
        }

        fn fill_rect(&mut self, rect: &Rect, paint: Paint) {
            self.ctx.set_fill_style_str(&paint.css());
            self.ctx.fill_rect(
                rect.left() as f64,
                rect.top() as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
        }

        fn fill_round_rect(&mut self, rect: &Rect, radius: f32, paint: Paint) {
            let r = radius.min(rect.size.x / 2.0).min(rect.size.y / 2.0) as f64;
            let (l, t) = (rect.left() as f64, rect.top() as f64);
            let (rt, b) = (rect.right() as f64, rect.bottom() as f64);

            self.ctx.begin_path();
            self.ctx.move_to(l + r, t);
            let _ = self.ctx.arc_to(rt, t, rt, b, r);
            let _ = self.ctx.arc_to(rt, b, l, b, r);
            let _ = self.ctx.arc_to(l, b, l, t, r);
            let _ = self.ctx.arc_to(l, t, rt, t, r);
            self.ctx.close_path();
            self.ctx.set_fill_style_str(&paint.css());
            self.ctx.fill();
        }

        fn fill_circle(&mut self, circle: &Circle, paint: Paint) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                circle.center.x as f64,
                circle.center.y as f64,
                circle.radius as f64,
                0.0,
                TAU,
            );
            self.ctx.close_path();
            self.ctx.set_fill_style_str(&paint.css());
            self.ctx.fill();
        }
    }

    /// Game instance plus its browser bindings
    struct Host {
        game: Game,
        surface: CanvasSurface,
        style: Style,
        document: Document,
        /// An animation frame is pending
        scheduled: bool,
    }

    impl Host {
        fn render(&mut self) {
            let frame = self.game.frame();
            draw_frame(&mut self.surface, &frame, &self.style);
            self.update_hud(&Hud::from_frame(&frame));
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, hud: &Hud) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score));
            }
            if let Some(el) = self.document.get_element_by_id("lives") {
                el.set_text_content(Some(&hud.lives));
            }
            if let Some(el) = self.document.get_element_by_id("msg") {
                el.set_text_content(Some(hud.message));
            }
            if let Some(btn) = self
                .document
                .get_element_by_id("restartBtn")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if hud.show_restart { "block" } else { "none" };
                let _ = btn.style().set_property("display", display);
            }
        }

        fn log_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::LifeLost { remaining } => {
                        log::info!("Life lost, {} remaining", remaining)
                    }
                    GameEvent::Ended(outcome) => log::info!("Game ended: {:?}", outcome),
                    other => log::trace!("{:?}", other),
                }
            }
        }
    }

    pub fn run() -> Option<()> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Brick Breaker starting...");

        let window = web_sys::window()?;
        let document = window.document()?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

        let mut settings = Settings::load();
        settings.tuning.canvas_width = canvas.width() as f32;
        settings.tuning.canvas_height = canvas.height() as f32;

        let seed = js_sys::Date::now() as u64;
        let style = Style::from_settings(&settings);
        let host = Rc::new(RefCell::new(Host {
            game: Game::new(settings, seed),
            surface: CanvasSurface { ctx },
            style,
            document,
            scheduled: false,
        }));

        setup_input_handlers(&canvas, host.clone());
        setup_restart_button(host.clone());

        host.borrow_mut().render();
        schedule(host);

        log::info!("Brick Breaker running!");
        Some(())
    }

    fn canvas_x(canvas: &HtmlCanvasElement, event: &PointerEvent) -> f32 {
        let rect = canvas.get_bounding_client_rect();
        (event.client_x() as f64 - rect.left()) as f32
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard: arrow keys hold a direction until released
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let direction = match event.key().as_str() {
                    "ArrowRight" => PaddleDirection::Right,
                    "ArrowLeft" => PaddleDirection::Left,
                    _ => return,
                };
                host.borrow_mut().game.set_paddle_velocity(direction);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "ArrowRight" | "ArrowLeft") {
                    host.borrow_mut()
                        .game
                        .set_paddle_velocity(PaddleDirection::None);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer drag: press on the canvas, follow anywhere until release
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                host.borrow_mut().game.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let x = canvas_x(&canvas_clone, &event);
                host.borrow_mut().game.pointer_move(x);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                host.borrow_mut().game.pointer_up();
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(host: Rc<RefCell<Host>>) {
        let Some(btn) = host.borrow().document.get_element_by_id("restartBtn") else {
            log::warn!("No restart button found");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let idle = {
                let mut h = host.borrow_mut();
                h.game.restart();
                h.log_events();
                h.render();
                !h.scheduled
            };
            if idle {
                schedule(host.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Ask the browser for one more frame callback
    fn schedule(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        host.borrow_mut().scheduled = true;
        let closure = Closure::once(move |_time: f64| {
            on_frame(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_frame(host: Rc<RefCell<Host>>) {
        let running = {
            let mut h = host.borrow_mut();
            h.scheduled = false;
            h.game.run_if_active();
            h.log_events();
            h.render();
            h.game.is_running()
        };

        if running {
            schedule(host);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if wasm_game::run().is_none() {
        log::error!("Failed to start: missing window, canvas or 2D context");
    }
}

/// Upper bound on headless demo length
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_FRAMES: u64 = 500_000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::render::{Hud, MeshSurface, Style, Vertex, draw_frame};
    use brick_breaker::sim::GameEvent;
    use brick_breaker::{Game, Settings, autopilot};

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    let settings = Settings::load();
    if let Ok(json) = settings.to_json() {
        log::debug!("Effective settings: {}", json);
    }
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut game = Game::new(settings, seed);

    let mut frames = 0;
    while game.is_running() && frames < MAX_DEMO_FRAMES {
        game.set_paddle_velocity(autopilot::steer(game.state()));
        game.run_if_active();
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::BrickDestroyed { row, col } => {
                    log::debug!("Brick ({}, {}) destroyed at frame {}", row, col, frames)
                }
                GameEvent::LifeLost { remaining } => {
                    log::info!("Life lost at frame {}, {} remaining", frames, remaining)
                }
                GameEvent::Ended(outcome) => log::info!("Game ended: {:?}", outcome),
                other => log::trace!("{:?}", other),
            }
        }
    }

    let frame = game.frame();
    let hud = Hud::from_frame(&frame);

    // Tessellate the final frame the way a GPU host would
    let mut mesh = MeshSurface::default();
    draw_frame(&mut mesh, &frame, &Style::from_settings(game.settings()));

    let message = if hud.message.is_empty() {
        "Demo stopped"
    } else {
        hud.message
    };
    println!("{} after {} frames", message, frames);
    println!("Score: {}  Lives: {}", hud.score, hud.lives);
    println!(
        "Final frame: {} vertices ({} bytes)",
        mesh.vertices.len(),
        Vertex::as_bytes(&mesh.vertices).len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
