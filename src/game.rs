//! Host-facing game controller
//!
//! Owns the session state and the current input intent. Input handlers only
//! write intent fields; the host's frame callback calls `run_if_active`,
//! which consumes them in the next tick.

use crate::render::Frame;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, PaddleDirection, TickInput, tick};

/// Game instance holding session state and pending input
pub struct Game {
    state: GameState,
    input: TickInput,
    settings: Settings,
    /// Pointer drag in progress
    pointer_held: bool,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        log::info!("New game with seed {}", seed);
        Self {
            state: GameState::with_tuning(seed, settings.tuning.clone()),
            input: TickInput::default(),
            settings,
            pointer_held: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Keyboard intent, held until changed
    pub fn set_paddle_velocity(&mut self, direction: PaddleDirection) {
        self.input.direction = direction;
    }

    /// Pointer intent: center the paddle on `x` during the next tick
    pub fn set_paddle_target_x(&mut self, x: f32) {
        self.input.target_x = Some(x);
    }

    /// Start a drag; the paddle follows later pointer moves until release
    pub fn pointer_down(&mut self) {
        self.pointer_held = true;
    }

    pub fn pointer_move(&mut self, x: f32) {
        if self.pointer_held {
            self.set_paddle_target_x(x);
        }
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
    }

    /// Restart entry point (e.g. the restart button)
    ///
    /// A held key keeps steering; pending pointer intent is dropped.
    pub fn restart(&mut self) {
        self.state.restart();
        self.input.target_x = None;
        self.pointer_held = false;
    }

    /// Frame callback entry point. Runs one tick if the game is running and
    /// returns whether it did.
    pub fn run_if_active(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        tick(&mut self.state, &self.input);

        // Pointer targets are one-shot, key direction persists
        self.input.target_x = None;
        true
    }

    /// Read-only snapshot for the presentation layer
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
