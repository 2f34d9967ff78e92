//! Platform abstraction layer
//!
//! The simulation never draws or plays sound itself. Hosts implement:
//! - `Renderer`: receives a snapshot after every tick and on pause changes
//! - `AudioOut`: fire-and-forget wall impact sound
//!
//! `Session` ties a controller to both and runs one host frame at a time.

use std::time::Duration;

use crate::input::{KeyAction, map_key};
use crate::settings::KeyBindings;
use crate::sim::{Command, ControllerPhase, GameEvent, Outcome, RoundController, Snapshot};

/// Presentation collaborator
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot);
}

/// Audio collaborator. Playing a sound never feeds back into the simulation.
pub trait AudioOut {
    fn play_wall_hit(&mut self);
}

/// Audio sink that plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioOut for NullAudio {
    fn play_wall_hit(&mut self) {}
}

/// Running totals a host can report on
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionStats {
    pub frames: u64,
    pub ticks: u64,
    pub wall_hits: u64,
    pub bricks_hit: u64,
    pub levels_cleared: u32,
    pub rounds_failed: u32,
    pub highest_level: u32,
}

/// One controller wired to its render and audio collaborators
pub struct Session<R: Renderer, A: AudioOut> {
    controller: RoundController,
    renderer: R,
    audio: A,
    keys: KeyBindings,
    stats: SessionStats,
}

impl<R: Renderer, A: AudioOut> Session<R, A> {
    pub fn new(controller: RoundController, renderer: R, audio: A, keys: KeyBindings) -> Self {
        let stats = SessionStats {
            highest_level: controller.level(),
            ..Default::default()
        };
        let mut session = Self {
            controller,
            renderer,
            audio,
            keys,
            stats,
        };
        // Initial paused frame with the Play affordance
        let snapshot = session.controller.snapshot();
        session.renderer.render(&snapshot);
        session
    }

    pub fn controller(&self) -> &RoundController {
        &self.controller
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Queue a command for the next frame
    pub fn send(&mut self, command: Command) {
        self.controller.push(command);
    }

    /// Translate and queue a key event. Returns true if the key was bound.
    pub fn key(&mut self, key: &str, action: KeyAction) -> bool {
        match map_key(&self.keys, key, action) {
            Some(command) => {
                self.send(command);
                true
            }
            None => false,
        }
    }

    /// Run one host frame: apply commands, move the paddle by `dt` of wall
    /// time, tick the physics once, then hand events to the collaborators.
    pub fn frame(&mut self, dt: Duration) -> Option<Outcome> {
        self.stats.frames += 1;

        self.controller.apply_commands();
        if self.dispatch_events() {
            let snapshot = self.controller.snapshot();
            self.renderer.render(&snapshot);
        }

        self.controller.advance_paddle(dt);

        let outcome = self.controller.tick()?;
        self.stats.ticks += 1;
        self.dispatch_events();
        let snapshot = self.controller.snapshot();
        self.renderer.render(&snapshot);
        Some(outcome)
    }

    /// Forward pending events. Returns true if a pause transition happened.
    fn dispatch_events(&mut self) -> bool {
        let mut pause_changed = false;
        for event in self.controller.drain_events() {
            match event {
                GameEvent::WallImpact => {
                    self.stats.wall_hits += 1;
                    self.audio.play_wall_hit();
                }
                GameEvent::BrickHit { .. } => self.stats.bricks_hit += 1,
                GameEvent::LevelCleared { next_health } => {
                    self.stats.levels_cleared += 1;
                    self.stats.highest_level = self.stats.highest_level.max(next_health);
                }
                GameEvent::RoundFailed { .. } => self.stats.rounds_failed += 1,
                GameEvent::PhaseChanged { from, to } => {
                    if from == ControllerPhase::Paused || to == ControllerPhase::Paused {
                        pause_changed = true;
                    }
                }
            }
        }
        pause_changed
    }
}
