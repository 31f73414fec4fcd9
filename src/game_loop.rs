//! Real-time orchestrator
//!
//! Owns the [`GameState`] for one session. The host calls [`GameLoop::frame`]
//! from its display-refresh callback (or [`GameLoop::advance`] with a
//! synthetic delta in tests); each call steps the simulation if playing,
//! renders, and publishes the state to the host.

use crate::consts::MAX_FRAME_DT;
use crate::input::InputProvider;
use crate::renderer::Renderer;
use crate::sim::{GameState, GameStatus, InputState, TickEvents, tick};

/// Host callback receiving the state after every frame
pub type StateListener = Box<dyn FnMut(&GameState)>;

/// Clamp a frame delta (seconds) into `[0, MAX_FRAME_DT]`
///
/// Stalls such as a backgrounded tab would otherwise make the
/// simulation jump.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_FRAME_DT)
    } else {
        0.0
    }
}

pub struct GameLoop {
    state: GameState,
    renderer: Box<dyn Renderer>,
    on_state_change: StateListener,
    input_provider: Option<InputProvider>,
    running: bool,
    /// Timestamp (ms) of the previous frame
    last_time: f64,
    /// Seconds of simulated play; drives the fire-rate gate
    elapsed: f32,
    frame_count: u64,
}

impl GameLoop {
    pub fn new(
        state: GameState,
        renderer: impl Renderer + 'static,
        on_state_change: impl FnMut(&GameState) + 'static,
    ) -> Self {
        Self {
            state,
            renderer: Box::new(renderer),
            on_state_change: Box::new(on_state_change),
            input_provider: None,
            running: false,
            last_time: 0.0,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Replace the input source; takes effect on the next tick
    pub fn set_input_provider(&mut self, provider: impl FnMut() -> InputState + 'static) {
        self.input_provider = Some(Box::new(provider));
    }

    /// Begin play at timestamp `now_ms` and run the first frame
    pub fn start(&mut self, now_ms: f64) {
        self.last_time = now_ms;
        self.running = true;
        self.state.status = GameStatus::Playing;
        log::info!(
            "Session started ({} mode, {} enemies)",
            self.state.mode.as_str(),
            self.state.enemies.len()
        );
        self.frame(now_ms);
    }

    /// Stop stepping; later frames are ignored. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Session stopped after {} frames", self.frame_count);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Host-driven pause; only a playing session can pause
    pub fn pause(&mut self) -> bool {
        if self.state.status == GameStatus::Playing {
            self.state.status = GameStatus::Paused;
            log::info!("Paused");
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.state.status == GameStatus::Paused {
            self.state.status = GameStatus::Playing;
            log::info!("Resumed");
            true
        } else {
            false
        }
    }

    /// Display-refresh callback with a monotonic timestamp in milliseconds
    ///
    /// Returns `None` once stopped (the host should not schedule another
    /// frame).
    pub fn frame(&mut self, now_ms: f64) -> Option<TickEvents> {
        if !self.running {
            return None;
        }
        let dt = ((now_ms - self.last_time) / 1000.0) as f32;
        self.last_time = now_ms;
        Some(self.run_frame(clamp_frame_dt(dt)))
    }

    /// Run one frame with an explicit delta (seconds), no clock involved
    pub fn advance(&mut self, dt: f32) -> Option<TickEvents> {
        if !self.running {
            return None;
        }
        Some(self.run_frame(clamp_frame_dt(dt)))
    }

    fn run_frame(&mut self, dt: f32) -> TickEvents {
        self.frame_count += 1;
        let events = self.update(dt);
        self.renderer.render(&self.state);
        (self.on_state_change)(&self.state);
        events
    }

    fn update(&mut self, dt: f32) -> TickEvents {
        if self.state.status != GameStatus::Playing {
            return TickEvents::default();
        }
        let Some(provider) = self.input_provider.as_mut() else {
            return TickEvents::default();
        };

        let input = provider();
        self.elapsed += dt;
        tick(&mut self.state, &input, dt, self.elapsed)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Seconds of simulated play so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Hand back the final state, ending the session
    pub fn into_state(mut self) -> GameState {
        self.stop();
        self.state
    }
}
