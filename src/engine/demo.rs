//! Built-in deterministic engine
//!
//! Stands in for a real game backend so the binary and tests can run
//! end to end. Actions move a point around an unbounded plane and the
//! frame is a gradient derived from position and elapsed time. Not a
//! simulation.

use crate::engine::{Action, FrameBuffer, GameEngine, GameState};
use crate::error::{FramecastError, FramecastResult};
use async_trait::async_trait;
use tracing::debug;

const FRAME_WIDTH: usize = 320;
const FRAME_HEIGHT: usize = 200;
const MOVE_STEP: f32 = 1.0;
const TURN_STEP_DEGREES: f32 = 15.0;

/// Deterministic in-process engine
pub struct DemoEngine {
    state: GameState,
    elapsed: f64,
    initialized: bool,
}

impl DemoEngine {
    pub fn new() -> Self {
        Self {
            state: GameState::default(),
            elapsed: 0.0,
            initialized: false,
        }
    }
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameEngine for DemoEngine {
    async fn initialize(&mut self) -> FramecastResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.initialized = true;
        debug!("Demo engine initialized");
        Ok(())
    }

    async fn apply_action(&mut self, action: Action) -> FramecastResult<()> {
        if !self.initialized {
            return Err(FramecastError::EngineRuntime(
                "action applied before initialize".to_string(),
            ));
        }

        let (x, y, angle) = self.state.position;
        let radians = angle.to_radians();
        match action {
            Action::MoveForward => {
                self.state.position = (x + radians.cos() * MOVE_STEP, y + radians.sin() * MOVE_STEP, angle);
            }
            Action::MoveBackward => {
                self.state.position = (x - radians.cos() * MOVE_STEP, y - radians.sin() * MOVE_STEP, angle);
            }
            Action::TurnLeft => {
                self.state.position = (x, y, (angle - TURN_STEP_DEGREES).rem_euclid(360.0));
            }
            Action::TurnRight => {
                self.state.position = (x, y, (angle + TURN_STEP_DEGREES).rem_euclid(360.0));
            }
            Action::Shoot => {
                // No dry firing
                if self.state.ammo > 0 {
                    self.state.ammo -= 1;
                    self.state.score += 10;
                }
            }
            Action::Use => {
                self.state.score += 1;
            }
            Action::SwitchWeapon => {
                self.state.weapon = if self.state.weapon >= 7 {
                    1
                } else {
                    self.state.weapon + 1
                };
            }
        }
        Ok(())
    }

    async fn advance(&mut self, delta_time: f64) -> FramecastResult<FrameBuffer> {
        if !self.initialized {
            return Err(FramecastError::EngineRuntime(
                "advance called before initialize".to_string(),
            ));
        }

        self.elapsed += delta_time;
        let (px, py, _) = self.state.position;
        let phase = self.elapsed as usize + px.abs() as usize + py.abs() as usize;

        let mut frame = FrameBuffer::blank(FRAME_WIDTH, FRAME_HEIGHT);
        for y in 0..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                frame.pixels[y * FRAME_WIDTH + x] = (((x + y + phase) % 256) & 0xff) as u8;
            }
        }
        Ok(frame)
    }

    async fn snapshot_state(&self) -> FramecastResult<GameState> {
        Ok(self.state.clone())
    }

    async fn restore_state(&mut self, state: GameState) -> FramecastResult<()> {
        self.state = state;
        Ok(())
    }

    async fn close(&mut self) {
        if self.initialized {
            self.initialized = false;
            debug!("Demo engine closed");
        }
    }

    fn engine_name(&self) -> &'static str {
        "demo"
    }
}
