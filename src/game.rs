//! Fixed timestep game loop
//!
//! One tick: poll input, steer the player, drive the AIs, update the field.
//! Real frame time is fed through an accumulator so the simulation always
//! advances in whole `sim_dt` steps.

use crate::consts::MAX_SUBSTEPS;
use crate::controller::{AiController, InputSource, PlayerController, Renderer};
use crate::error::{GameError, valid_dt};
use crate::sim::{Field, GameEnd, RandomSource, SimRng};

/// A play session: the field plus its input and output collaborators
pub struct Game<I: InputSource, V: Renderer, R: RandomSource = SimRng> {
    field: Field<R>,
    input: I,
    view: V,
    player_controller: PlayerController,
    ai_controller: AiController,
    sim_dt: f32,
    accumulator: f32,
}

impl<I: InputSource, V: Renderer, R: RandomSource> Game<I, V, R> {
    pub fn new(field: Field<R>, input: I, view: V, sim_dt: f32) -> Result<Self, GameError> {
        if !valid_dt(sim_dt) {
            return Err(GameError::InvalidTimestep { dt: sim_dt });
        }
        Ok(Self {
            field,
            input,
            view,
            player_controller: PlayerController::default(),
            ai_controller: AiController,
            sim_dt,
            accumulator: 0.0,
        })
    }

    /// Replace the player controller, e.g. to turn on approach slowdown
    pub fn with_player_controller(mut self, controller: PlayerController) -> Self {
        self.player_controller = controller;
        self
    }

    pub fn field(&self) -> &Field<R> {
        &self.field
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn sim_dt(&self) -> f32 {
        self.sim_dt
    }

    pub fn game_end(&self) -> GameEnd {
        self.field.game_end()
    }

    /// Run one fixed step
    pub fn tick(&mut self) -> GameEnd {
        if self.field.game_end().is_over() {
            return self.field.game_end();
        }
        let input = self
            .input
            .poll(self.field.player(), self.field.characters());
        self.player_controller
            .apply(&mut self.field, input, self.sim_dt);
        self.ai_controller.drive(&mut self.field, self.sim_dt);
        self.field.update()
    }

    /// Hand the current state to the renderer
    pub fn render(&mut self) {
        let snapshot = self.field.snapshot();
        self.view.render(&snapshot);
    }

    /// Consume `frame_dt` seconds of real time, then render once
    ///
    /// Returns the number of fixed steps run. Frame time is capped at 0.1 s
    /// and at most [`MAX_SUBSTEPS`] steps run per frame.
    pub fn advance(&mut self, frame_dt: f32) -> Result<u32, GameError> {
        if !valid_dt(frame_dt) {
            return Err(GameError::InvalidTimestep { dt: frame_dt });
        }
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= self.sim_dt && substeps < MAX_SUBSTEPS {
            if self.field.game_end().is_over() {
                self.accumulator = 0.0;
                break;
            }
            self.tick();
            self.accumulator -= self.sim_dt;
            substeps += 1;
        }

        self.render();
        Ok(substeps)
    }

    /// Tick and render until the game ends or `max_ticks` updates have run
    pub fn run_headless(&mut self, max_ticks: u64) -> GameEnd {
        while !self.field.game_end().is_over() && self.field.tick_count() < max_ticks {
            self.tick();
            self.render();
        }
        log::info!(
            "Session stopped after {} ticks: {:?} (player size {})",
            self.field.tick_count(),
            self.field.game_end(),
            self.field.player().size()
        );
        self.field.game_end()
    }
}
