//! Configuration schema for Framecast
//!
//! Configuration is stored at `~/.config/framecast/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// ASCII display settings
    pub display: DisplayConfig,

    /// Throttling and pacing settings
    pub pacing: PacingConfig,

    /// Session settings
    pub session: SessionConfig,
}

impl Config {
    /// Reject values the driver cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if !(self.pacing.update_rate > 0.0) {
            return Err("pacing.update_rate must be positive".to_string());
        }
        if self.pacing.min_message_interval < 0.0 || self.pacing.min_reaction_interval < 0.0 {
            return Err("pacing intervals must not be negative".to_string());
        }
        if self.session.max_sessions == 0 {
            return Err("session.max_sessions must be at least 1".to_string());
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err("display dimensions must be non-zero".to_string());
        }
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// ASCII grid dimensions for rendered frames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target width in characters
    pub width: usize,

    /// Target height in characters
    pub height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
        }
    }
}

/// Throttling and pacing settings
///
/// All intervals are in seconds. The chat platform enforces its own
/// global ceiling on message frequency, so `min_message_interval` paces
/// aggregate emission across every session sharing the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Driving loop cadence
    pub update_rate: f64,

    /// Minimum interval between outbound messages
    pub min_message_interval: f64,

    /// Minimum interval between accepted inputs per session
    pub min_reaction_interval: f64,

    /// Per-session update ceiling within one 60-second bucket
    pub max_updates_per_minute: u32,

    /// Sessions idle longer than this are evicted
    pub idle_timeout: f64,

    /// Minimum interval between idle sweeps
    pub sweep_interval: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            update_rate: 1.0,
            min_message_interval: 1.0,
            min_reaction_interval: 0.25,
            max_updates_per_minute: 60,
            idle_timeout: 300.0,
            sweep_interval: 60.0,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum concurrent sessions
    pub max_sessions: usize,

    /// Directory for game-state snapshots (defaults to the state dir)
    pub save_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10,
            save_dir: None,
        }
    }
}
