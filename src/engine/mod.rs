//! Game engine abstraction
//!
//! Provides a trait for the engine operations a session drives, so the
//! session core stays independent of any particular game backend.

pub mod demo;
pub mod state;

pub use demo::DemoEngine;
pub use state::{GameState, SnapshotStore};

use crate::error::FramecastResult;
use async_trait::async_trait;

/// Discrete player action forwarded to the engine
///
/// A closed set: inputs that do not map onto one of these never reach
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
    Shoot,
    Use,
    SwitchWeapon,
}

/// Raw grayscale frame produced by one engine step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    /// Row-major 8-bit luminance, `width * height` bytes
    pub pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a frame filled with black
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Luminance at (x, y); out-of-range coordinates read as black
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }
}

/// Abstract game engine interface
///
/// One instance backs exactly one session. The owning session drives at
/// most one call at a time and invokes `close` exactly when it stops.
#[async_trait]
pub trait GameEngine: Send + Sync {
    /// Bring the engine up; safe to call when already initialized
    async fn initialize(&mut self) -> FramecastResult<()>;

    /// Apply a discrete player action
    async fn apply_action(&mut self, action: Action) -> FramecastResult<()>;

    /// Advance the simulation and return the resulting frame
    async fn advance(&mut self, delta_time: f64) -> FramecastResult<FrameBuffer>;

    /// Capture the current game state
    async fn snapshot_state(&self) -> FramecastResult<GameState>;

    /// Restore a previously captured game state
    async fn restore_state(&mut self, state: GameState) -> FramecastResult<()>;

    /// Tear down; idempotent, safe to call repeatedly or never
    async fn close(&mut self);

    /// Human-readable engine name for logs
    fn engine_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_frame_dimensions() {
        let frame = FrameBuffer::blank(4, 3);
        assert_eq!(frame.pixels.len(), 12);
        assert_eq!(frame.pixel(3, 2), 0);
    }

    #[test]
    fn pixel_out_of_range_is_black() {
        let mut frame = FrameBuffer::blank(2, 2);
        frame.pixels[3] = 200;
        assert_eq!(frame.pixel(1, 1), 200);
        assert_eq!(frame.pixel(2, 0), 0);
        assert_eq!(frame.pixel(0, 5), 0);
    }
}
