//! Bacon Ops entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use bacon_ops::best_score::{BestScoreStore, BestScoreTracker, LocalStore};
    use bacon_ops::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
    use bacon_ops::hud::{HudData, Overlay};
    use bacon_ops::input::{CanvasRect, KeyboardMouse, VirtualJoystick};
    use bacon_ops::renderer::{RenderState, Renderer, SceneOptions};
    use bacon_ops::sim::{GameMode, GameState, InputState};
    use bacon_ops::{GameLoop, Settings};

    /// Page-wide state shared by every listener
    struct Game {
        settings: Settings,
        session: Option<GameLoop>,
        /// Bumped per session so frame callbacks from an old chain drop out
        generation: u32,
        canvas: HtmlCanvasElement,
        render_state: Rc<RefCell<Option<RenderState>>>,
        keyboard: Rc<RefCell<KeyboardMouse>>,
        joystick: Rc<RefCell<VirtualJoystick>>,
        /// Last input handed to the simulation, for the aim line
        last_input: Rc<Cell<InputState>>,
        best: Rc<RefCell<LocalStore>>,
        tracker: Rc<RefCell<BestScoreTracker>>,
        touch: bool,
    }

    impl Game {
        /// Stop any running session and start a fresh one in `mode`
        fn start_session(&mut self, mode: GameMode) -> u32 {
            self.stop_session();
            self.generation = self.generation.wrapping_add(1);
            self.tracker.borrow_mut().reset();
            {
                let mut joystick = self.joystick.borrow_mut();
                joystick.touch_end();
                joystick.set_firing(false);
            }

            let seed = js_sys::Date::now() as u64;
            let state = GameState::new(
                self.canvas.width() as f32,
                self.canvas.height() as f32,
                mode,
                seed,
            );

            let mut session = GameLoop::new(state, self.renderer(), self.listener());
            if self.touch {
                let joystick = self.joystick.clone();
                let last_input = self.last_input.clone();
                session.set_input_provider(move || {
                    let input = joystick.borrow().current();
                    last_input.set(input);
                    input
                });
            } else {
                let keyboard = self.keyboard.clone();
                let last_input = self.last_input.clone();
                session.set_input_provider(move || {
                    let input = keyboard.borrow().current();
                    last_input.set(input);
                    input
                });
            }

            if let Some(doc) = document() {
                set_hidden(&doc, "menu", true);
                set_hidden(&doc, "hud", false);
            }

            log::info!("Starting {} session (seed {})", mode.as_str(), seed);
            session.start(now_ms());
            self.session = Some(session);
            self.generation
        }

        fn stop_session(&mut self) {
            if let Some(mut session) = self.session.take() {
                session.stop();
            }
        }

        /// Drop the session and go back to mode selection
        fn to_menu(&mut self) {
            self.stop_session();
            if let Some(doc) = document() {
                set_hidden(&doc, "hud", true);
                set_hidden(&doc, "touch-controls", true);
                set_hidden(&doc, "round-overlay", true);
                set_hidden(&doc, "pause-menu", true);
                set_hidden(&doc, "menu", false);
            }
        }

        fn current_mode(&self) -> Option<GameMode> {
            self.session.as_ref().map(|s| s.state().mode)
        }

        /// Draws into the shared WebGPU state, if it came up
        fn renderer(&self) -> impl Renderer + 'static {
            let render_state = self.render_state.clone();
            let last_input = self.last_input.clone();
            let mut options = SceneOptions::from_settings(&self.settings);
            let show_aim_line = self.settings.show_aim_line;

            move |state: &GameState| {
                if let Some(rs) = render_state.borrow_mut().as_mut() {
                    options.aim_line_to = show_aim_line.then(|| last_input.get().aim_target());
                    rs.options = options;
                    Renderer::render(rs, state);
                }
            }
        }

        /// Publishes each snapshot to the HUD and the best-score store
        fn listener(&self) -> impl FnMut(&GameState) + 'static {
            let tracker = self.tracker.clone();
            let best = self.best.clone();
            let touch = self.touch;
            let authenticated = document().is_some_and(|doc| is_authenticated(&doc));

            move |state: &GameState| {
                let Some(doc) = document() else {
                    return;
                };
                update_hud(&doc, &HudData::from_state(state), touch);

                let mut store = best.borrow_mut();
                if let Some(score) = tracker.borrow_mut().record(state, authenticated, &mut *store) {
                    set_text(&doc, "best-score", &score.to_string());
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(doc: &Document, id: &str, hidden: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// The embedding page marks signed-in players on `<body>`
    fn is_authenticated(doc: &Document) -> bool {
        doc.body()
            .and_then(|b| b.get_attribute("data-authenticated"))
            .is_some_and(|v| v == "true")
    }

    fn canvas_rect(canvas: &HtmlCanvasElement) -> CanvasRect {
        let rect = canvas.get_bounding_client_rect();
        CanvasRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
            canvas_width: canvas.width() as f32,
            canvas_height: canvas.height() as f32,
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(doc: &Document, hud: &HudData, touch: bool) {
        set_text(doc, "hud-health-value", &hud.health_text());
        if let Some(el) = doc.get_element_by_id("hud-health-fill") {
            let _ = el.set_attribute("style", &format!("width: {:.1}%", hud.health_fraction() * 100.0));
        }
        set_text(doc, "hud-score", &hud.score.to_string());
        set_text(doc, "hud-ammo", &hud.ammo_text());
        set_text(doc, "hud-round", &format!("Round {}", hud.round));

        set_hidden(doc, "touch-controls", !(touch && hud.show_touch_controls));
        set_hidden(doc, "pause-menu", hud.overlay != Overlay::Paused);

        match hud.overlay {
            Overlay::Victory | Overlay::Defeat => {
                let title = if hud.overlay == Overlay::Victory {
                    "Round Complete!"
                } else {
                    "Defeated"
                };
                set_text(doc, "round-title", title);
                set_text(doc, "final-score", &hud.score.to_string());
                set_hidden(doc, "round-overlay", false);
            }
            Overlay::None | Overlay::Paused => set_hidden(doc, "round-overlay", true),
        }
    }

    /// Create the WebGPU surface and pipeline; `None` leaves the game headless
    async fn init_renderer(canvas: &HtmlCanvasElement) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
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
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let view = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        match RenderState::new(surface, &adapter, canvas.width(), canvas.height(), view).await {
            Ok(rs) => Some(rs),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Bacon Ops starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No <canvas id=\"canvas\"> on the page");
            return;
        };

        if canvas.width() == 0 || canvas.height() == 0 {
            canvas.set_width(DEFAULT_CANVAS_WIDTH as u32);
            canvas.set_height(DEFAULT_CANVAS_HEIGHT as u32);
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        // Written back so the stored copy is always sanitized and complete
        let settings = Settings::load();
        settings.save();
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(DEFAULT_CANVAS_WIDTH as f64);
        let has_touch = window.navigator().max_touch_points() > 0;
        let touch = settings.control_scheme.uses_touch(viewport_width, has_touch);
        log::info!(
            "Control scheme: {} ({})",
            settings.control_scheme.as_str(),
            if touch { "touch" } else { "keyboard + mouse" }
        );

        let best = LocalStore::load();
        set_text(&document, "best-score", &best.best().to_string());

        let render_state = init_renderer(&canvas).await;
        if render_state.is_none() {
            log::warn!("Running without a renderer");
        }

        let aim_default = Vec2::new(canvas.width() as f32 / 2.0, canvas.height() as f32 / 2.0);
        let game = Rc::new(RefCell::new(Game {
            joystick: Rc::new(RefCell::new(VirtualJoystick::new(
                settings.joystick_max_distance,
                aim_default,
            ))),
            settings,
            session: None,
            generation: 0,
            canvas: canvas.clone(),
            render_state: Rc::new(RefCell::new(render_state)),
            keyboard: Rc::new(RefCell::new(KeyboardMouse::new())),
            last_input: Rc::new(Cell::new(InputState::aiming_at(aim_default))),
            best: Rc::new(RefCell::new(best)),
            tracker: Rc::new(RefCell::new(BestScoreTracker::new())),
            touch,
        }));

        if touch {
            setup_touch_handlers(&document, &canvas, game.clone());
        } else {
            setup_keyboard_mouse_handlers(&canvas, game.clone());
        }
        setup_menu_buttons(&document, game.clone());
        setup_auto_pause(game.clone());

        game.borrow_mut().to_menu();

        log::info!("Bacon Ops ready");
    }

    fn on_click(doc: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = doc.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start(game: &Rc<RefCell<Game>>, mode: GameMode) {
        let generation = game.borrow_mut().start_session(mode);
        request_animation_frame(game.clone(), generation);
    }

    fn setup_menu_buttons(doc: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(doc, "start-arena", move || start(&game, GameMode::Arena));
        }
        {
            let game = game.clone();
            on_click(doc, "start-practice", move || start(&game, GameMode::Practice));
        }
        {
            let game = game.clone();
            on_click(doc, "restart-btn", move || {
                let mode = game.borrow().current_mode();
                if let Some(mode) = mode {
                    start(&game, mode);
                }
            });
        }
        {
            let game = game.clone();
            on_click(doc, "menu-btn", move || game.borrow_mut().to_menu());
        }
        on_click(doc, "resume-btn", move || {
            if let Some(session) = game.borrow_mut().session.as_mut() {
                session.resume();
            }
        });
    }

    fn setup_keyboard_mouse_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (keyboard, interval_ms) = {
            let g = game.borrow();
            (g.keyboard.clone(), g.settings.input_sample_interval_ms)
        };

        // Key down (Escape toggles pause)
        {
            let keyboard = keyboard.clone();
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    if let Some(session) = game.borrow_mut().session.as_mut() {
                        if !session.pause() {
                            session.resume();
                        }
                    }
                    return;
                }
                keyboard.borrow_mut().key_down(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let keyboard = keyboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                keyboard.borrow_mut().key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - client coordinates scaled to canvas pixels
        {
            let keyboard = keyboard.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_rect(&canvas_clone);
                keyboard
                    .borrow_mut()
                    .mouse_move(event.client_x() as f32, event.client_y() as f32, &rect);
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let keyboard = keyboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    keyboard.borrow_mut().mouse_down();
                }
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Released anywhere, not just over the canvas
        {
            let keyboard = keyboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    keyboard.borrow_mut().mouse_up();
                }
            });
            let _ = window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Held keys would stick after focus moves away
        {
            let keyboard = keyboard.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                keyboard.borrow_mut().release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fixed-rate sampler, independent of the render loop
        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                keyboard.borrow_mut().sample();
            });
            if let Err(e) = window.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms as i32,
            ) {
                log::error!("Failed to start input sampler: {:?}", e);
            }
            closure.forget();
        }
    }

    fn setup_touch_handlers(doc: &Document, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let joystick = game.borrow().joystick.clone();

        if let Some(stick) = doc.get_element_by_id("joystick") {
            let knob = doc.get_element_by_id("joystick-knob");

            // Start and move share one handler
            for event_name in ["touchstart", "touchmove"] {
                let joystick = joystick.clone();
                let stick_clone = stick.clone();
                let knob = knob.clone();
                let starting = event_name == "touchstart";
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let Some(touch) = event.target_touches().get(0) else {
                        return;
                    };
                    let rect = stick_clone.get_bounding_client_rect();
                    let center = Vec2::new(
                        (rect.left() + rect.width() / 2.0) as f32,
                        (rect.top() + rect.height() / 2.0) as f32,
                    );
                    let point = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);

                    let mut js = joystick.borrow_mut();
                    if starting {
                        js.touch_start(point, center);
                    } else {
                        js.touch_move(point, center);
                    }
                    if let Some(knob) = &knob {
                        let offset = js.knob_offset();
                        let _ = knob.set_attribute(
                            "style",
                            &format!("transform: translate({:.1}px, {:.1}px)", offset.x, offset.y),
                        );
                    }
                });
                let _ = stick.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for event_name in ["touchend", "touchcancel"] {
                let joystick = joystick.clone();
                let knob = knob.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    joystick.borrow_mut().touch_end();
                    if let Some(knob) = &knob {
                        let _ = knob.remove_attribute("style");
                    }
                });
                let _ = stick.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(fire) = doc.get_element_by_id("fire-button") {
            for (event_name, firing) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
                let joystick = joystick.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    joystick.borrow_mut().set_firing(firing);
                });
                let _ = fire.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Touching the canvas sets the aim target
        for event_name in ["touchstart", "touchmove"] {
            let joystick = joystick.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.target_touches().get(0) {
                    let rect = canvas_rect(&canvas_clone);
                    let target = rect.to_canvas(touch.client_x() as f32, touch.client_y() as f32);
                    joystick.borrow_mut().aim_at(target);
                }
            });
            let _ = canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, generation: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, generation, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, generation: u32, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            if g.generation != generation {
                return;
            }
            match g.session.as_mut() {
                Some(session) => session.frame(time).is_some(),
                None => false,
            }
        };

        if keep_going {
            request_animation_frame(game, generation);
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        fn auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
            let mut g = game.borrow_mut();
            if !g.settings.auto_pause_on_blur {
                return;
            }
            if let Some(session) = g.session.as_mut() {
                if session.pause() {
                    log::info!("Auto-paused ({})", reason);
                }
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bacon_ops::sim::GameMode;

    env_logger::init();
    log::info!("Bacon Ops (native) starting...");
    log::info!("Native mode runs a headless session - build for wasm32 to play in the browser");

    let mode = std::env::args()
        .nth(1)
        .and_then(|arg| GameMode::from_str(&arg))
        .unwrap_or(GameMode::Arena);
    headless::run(mode);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session: stand still and shoot at the nearest enemy
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::RefCell;
    use std::rc::Rc;

    use bacon_ops::best_score::{BestScoreTracker, MemoryStore};
    use bacon_ops::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
    use bacon_ops::renderer::NullRenderer;
    use bacon_ops::sim::{GameMode, GameState, InputState};
    use bacon_ops::GameLoop;

    const SEED: u64 = 0xBAC0;
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// One minute of simulated play
    const MAX_FRAMES: u32 = 60 * 60;

    fn aim_at_nearest(state: &GameState) -> InputState {
        let player = state.player.position;
        let target = state
            .enemies
            .iter()
            .map(|e| e.position)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));

        match target {
            Some(target) => InputState {
                firing: true,
                ..InputState::aiming_at(target)
            },
            None => InputState::aiming_at(player),
        }
    }

    pub fn run(mode: GameMode) {
        let state = GameState::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, mode, SEED);

        // The provider sees the last published snapshot, like a real host
        let published = Rc::new(RefCell::new(state.clone()));
        let mut tracker = BestScoreTracker::new();
        let mut store = MemoryStore::new(0);
        let submitted = Rc::new(RefCell::new(None));

        let mut session = {
            let published = published.clone();
            let submitted = submitted.clone();
            GameLoop::new(state, NullRenderer, move |state: &GameState| {
                if let Some(score) = tracker.record(state, true, &mut store) {
                    *submitted.borrow_mut() = Some(score);
                }
                *published.borrow_mut() = state.clone();
            })
        };
        {
            let published = published.clone();
            session.set_input_provider(move || aim_at_nearest(&published.borrow()));
        }

        session.start(0.0);
        let mut kills = 0;
        let mut shots = 0;
        for _ in 0..MAX_FRAMES {
            let Some(events) = session.advance(FRAME_DT) else {
                break;
            };
            kills += events.kills;
            shots += usize::from(events.shot_fired);
            if session.state().is_finished() {
                break;
            }
        }
        session.stop();

        let state = session.state();
        log::info!(
            "Finished: status {:?}, score {}, {} shots, {} kills in {:.1}s",
            state.status,
            state.score,
            shots,
            kills,
            session.elapsed()
        );
        if let Some(score) = *submitted.borrow() {
            log::info!("New best score: {}", score);
        }

        match serde_json::to_string_pretty(state) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize final state: {}", e),
        }
    }
}
