//! Framecast - ASCII game multiplexer for chat bots
//!
//! Drives many per-user game sessions against one rate-limited outbound
//! chat channel, converting engine frames into bounded-rate ASCII
//! updates.

pub mod chat;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod session;

pub use error::{FramecastError, FramecastResult};
