use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::assets::GameAssets;
use crate::audio::{Cue, SoundBoard};
use crate::game::{GameEvent, GameState, GameStatus, TickReport};
use crate::input::{GameInput, InputSource};
use crate::renderer::{draw_game_over, draw_scene, Renderer};

/// Whether the loop should keep running after an iteration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Owns one game session and drives it at a fixed cadence.
pub struct Session<R, I> {
    state: GameState,
    assets: GameAssets,
    sound: SoundBoard,
    renderer: R,
    input: I,
    tick_interval: Duration,
}

impl<R: Renderer, I: InputSource> Session<R, I> {
    pub fn new(
        state: GameState,
        assets: GameAssets,
        sound: SoundBoard,
        renderer: R,
        input: I,
        tick_interval: Duration,
    ) -> Self {
        Self {
            state,
            assets,
            sound,
            renderer,
            input,
            tick_interval,
        }
    }

    /// Starts background music for the first run.
    pub fn start(&mut self) {
        self.sound.start_music();
        log::info!("game started");
    }

    /// Runs until a quit input arrives, sleeping out the rest of each tick.
    pub fn run(&mut self) -> io::Result<()> {
        self.start();

        loop {
            let started = Instant::now();
            if self.step()? == LoopControl::Quit {
                break;
            }

            if let Some(remaining) = self.tick_interval.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }

        self.sound.stop_music();
        log::info!("session ended with score {}", self.state.score());
        Ok(())
    }

    /// One loop iteration: drain input, advance if playing, draw the frame.
    pub fn step(&mut self) -> io::Result<LoopControl> {
        for input in self.input.poll_events()? {
            if self.handle_input(input) == LoopControl::Quit {
                log::info!("quit requested");
                return Ok(LoopControl::Quit);
            }
        }

        if self.state.is_playing() {
            let report = self.state.tick();
            self.dispatch(&report);
        }

        match self.state.status {
            GameStatus::Playing => draw_scene(&mut self.renderer, &self.state, &self.assets)?,
            GameStatus::Terminated(_) => {
                draw_game_over(&mut self.renderer, &self.state, &self.assets)?;
            }
        }

        Ok(LoopControl::Continue)
    }

    /// Starts a new run and restarts background music.
    pub fn reset(&mut self) {
        self.state.reset();
        self.sound.start_music();
        log::info!("new game started");
    }

    fn handle_input(&mut self, input: GameInput) -> LoopControl {
        match input {
            GameInput::Quit => return LoopControl::Quit,
            GameInput::Direction(direction) if self.state.is_playing() => {
                self.state.snake.turn(direction);
            }
            GameInput::Confirm if !self.state.is_playing() => self.reset(),
            GameInput::Direction(_) | GameInput::Confirm => {}
        }

        LoopControl::Continue
    }

    fn dispatch(&mut self, report: &TickReport) {
        for event in &report.events {
            match event {
                GameEvent::FoodConsumed => {
                    self.sound.play(Cue::FoodConsumed);
                    log::debug!("food consumed, score {}", self.state.score());
                }
                GameEvent::Crashed(reason) => {
                    self.sound.play(Cue::Crash);
                    self.sound.stop_music();
                    log::info!("Game over: {reason} (score {})", self.state.score());
                }
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for setting up scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn sound(&self) -> &SoundBoard {
        &self.sound
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
