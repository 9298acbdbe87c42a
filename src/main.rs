//! Planet Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        TouchEvent, Window,
    };

    use planet_dash::platform::input::{TOUCH_PRESSED_BG, TOUCH_RELEASED_BG};
    use planet_dash::platform::{InputState, fit_field, profile_for};
    use planet_dash::renderer::CanvasPresenter;
    use planet_dash::sim::Field;
    use planet_dash::{Game, GameConfig};

    /// Game instance plus everything the browser callbacks touch
    struct App {
        game: Game,
        presenter: CanvasPresenter,
        input: InputState,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Refit the canvas to the container and rescale the simulation
        fn resize(&mut self) {
            let field = measure_field();
            self.canvas.set_width(field.width as u32);
            self.canvas.set_height(field.height as u32);
            self.game.resize(field);
        }

        fn frame(&mut self, time: f64) {
            let input = self.input.current();
            self.game.frame(time, &input, &mut self.presenter);
        }

        /// End-of-run button: next level or restart
        fn continue_run(&mut self) {
            match self.game.pending_action() {
                Some(action) => {
                    log::info!("{}", action.label());
                    self.game.apply(action, &mut self.presenter);
                }
                None => log::warn!("Continue pressed with no finished level"),
            }
        }
    }

    fn measure_field() -> Field {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let container_width = document
            .get_element_by_id("game-container")
            .map(|el| el.client_width() as f32)
            .unwrap_or(800.0);
        let window_height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(1000.0) as f32;
        fit_field(container_width, window_height)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Planet Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let profile = profile_for(&user_agent);
        let config = GameConfig::load(profile);
        log::info!("Input profile: {}", profile.as_str());

        let field = measure_field();
        canvas.set_width(field.width as u32);
        canvas.set_height(field.height as u32);

        let seed = js_sys::Date::now() as u64;
        let presenter = CanvasPresenter::new(&canvas, document.clone())?;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, field, seed),
            presenter,
            input: InputState::new(profile.touch_controls()),
            canvas,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_resize(&window, app.clone())?;
        setup_keyboard(&document, app.clone())?;
        if profile.touch_controls() {
            setup_touch_controls(&document, app.clone())?;
        }
        setup_continue_button(&document, app.clone());

        request_animation_frame(app);

        log::info!("Planet Dash running!");
        Ok(())
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_down(&event.key());
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.key());
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_touch_controls(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        match document
            .get_element_by_id("mobile-controls")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(el) => el.style().set_property("display", "block")?,
            None => log::warn!("Missing #mobile-controls element"),
        }

        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let buttons = document.query_selector_all(".control-btn")?;
        for i in 0..buttons.length() {
            let Some(button) = buttons.item(i) else { continue };
            for (event_name, pressed) in
                [("touchstart", true), ("touchend", false), ("touchcancel", false)]
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let Some(el) = event
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                    else {
                        return;
                    };
                    let id = el.id();
                    let mut app = app.borrow_mut();
                    let known = if pressed {
                        app.input.touch_start(&id)
                    } else {
                        app.input.touch_end(&id)
                    };
                    if known {
                        let bg = if pressed { TOUCH_PRESSED_BG } else { TOUCH_RELEASED_BG };
                        let _ = el.style().set_property("background", bg);
                    }
                });
                button.add_event_listener_with_callback_and_add_event_listener_options(
                    event_name,
                    closure.as_ref().unchecked_ref(),
                    &options,
                )?;
                closure.forget();
            }
        }

        // Keep the page from scrolling while a finger is on the pad
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let on_pad = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                .and_then(|el| el.closest("#mobile-controls").ok().flatten())
                .is_some();
            if on_pad {
                event.prevent_default();
            }
        });
        document.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();

        Ok(())
    }

    fn setup_continue_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("restart") else {
            log::warn!("Missing #restart button");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            app.borrow_mut().continue_run();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Planet Dash (native) starting...");
    log::info!("Native mode has no display - serve the wasm build for the real game");

    println!("\nRunning headless autopilot...");
    headless::run_autopilot();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session that steers straight at each planet, for smoke testing the loop natively
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use planet_dash::renderer::{Presenter, Sprite, TrailCurve};
    use planet_dash::sim::{EndOfRun, Field, FlashColor, LevelOutcome, TickInput};
    use planet_dash::{Game, GameConfig, InputProfile};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    /// Presenter that only logs the end-of-run panel
    #[derive(Default)]
    struct LogPresenter {
        runs: u32,
    }

    impl Presenter for LogPresenter {
        fn clear_and_draw_background(&mut self, _field: Field, _grid_size: f32) {}
        fn draw_trail(&mut self, _curve: &TrailCurve) {}
        fn draw_entity(&mut self, _sprite: &Sprite) {}
        fn draw_flash(&mut self, _field: Field, _color: FlashColor) {}
        fn refresh_score_and_timer(&mut self, _score: u32, _time_secs: u32) {}

        fn show_end_of_run(&mut self, summary: &EndOfRun) {
            self.runs += 1;
            println!(
                "  level {}: {} score={} time={}s",
                summary.level,
                summary.result_text(),
                summary.score,
                summary.time_secs
            );
            for planet in &summary.planets {
                println!("    {}", planet);
            }
        }

        fn hide_end_of_run(&mut self) {}
    }

    /// Hold the directions that close the gap to the live planet
    fn steer(game: &Game) -> TickInput {
        let state = game.state();
        let delta = state.current_planet().pos - state.player.pos;
        let slack = state.player.speed;
        TickInput {
            up: delta.y < -slack,
            down: delta.y > slack,
            left: delta.x < -slack,
            right: delta.x > slack,
        }
    }

    pub fn run_autopilot() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let config = GameConfig::load(InputProfile::Desktop);
        let mut game = Game::new(config, Field::new(800.0, 600.0), seed);
        let mut presenter = LogPresenter::default();

        for frame in 0..MAX_FRAMES {
            let input = steer(&game);
            match game.frame(frame as f64 * FRAME_MS, &input, &mut presenter) {
                Some(LevelOutcome::Won) => match game.pending_action() {
                    Some(action @ planet_dash::sim::NextAction::AdvanceLevel) => {
                        game.apply(action, &mut presenter)
                    }
                    _ => break,
                },
                Some(LevelOutcome::Lost) => break,
                None => {}
            }
        }

        println!(
            "✓ Autopilot finished after {} level(s), planets reached: {:?}",
            presenter.runs,
            game.state().planets_reached
        );
    }
}
