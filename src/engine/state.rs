//! Game state value type and snapshot persistence

use crate::error::{FramecastError, FramecastResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Point-in-time game state
///
/// A plain value type with no behavior; round-trips losslessly through
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub health: i32,
    pub armor: i32,
    pub ammo: i32,
    pub weapon: u8,
    /// x, y, facing angle
    pub position: (f32, f32, f32),
    pub level: u32,
    pub score: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            health: 100,
            armor: 0,
            ammo: 50,
            weapon: 2, // pistol
            position: (0.0, 0.0, 0.0),
            level: 1,
            score: 0,
        }
    }
}

/// Snapshot files keyed by level and capture timestamp
///
/// Layout: `<save_dir>/save_{level}_{YYYYmmdd_HHMMSS}.json`. Loading
/// never mutates the file, only in-memory state.
pub struct SnapshotStore {
    save_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given directory
    pub fn new(save_dir: PathBuf) -> Self {
        Self { save_dir }
    }

    /// Persist a snapshot, returning the path written
    pub async fn save(&self, state: &GameState) -> FramecastResult<PathBuf> {
        fs::create_dir_all(&self.save_dir).await.map_err(|e| {
            FramecastError::io(
                format!("creating save directory {}", self.save_dir.display()),
                e,
            )
        })?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = self
            .save_dir
            .join(format!("save_{}_{}.json", state.level, timestamp));

        let content = serde_json::to_string_pretty(state)?;
        fs::write(&path, content)
            .await
            .map_err(|e| FramecastError::io(format!("writing snapshot {}", path.display()), e))?;

        info!("Saved snapshot to {}", path.display());
        Ok(path)
    }

    /// Load a snapshot from a specific file
    pub async fn load(&self, path: &Path) -> FramecastResult<GameState> {
        if !path.exists() {
            return Err(FramecastError::SnapshotNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| FramecastError::io(format!("reading snapshot {}", path.display()), e))?;

        let state: GameState = serde_json::from_str(&content)?;
        debug!("Loaded snapshot from {}", path.display());
        Ok(state)
    }

    /// List all snapshot paths, newest first
    pub async fn list(&self) -> FramecastResult<Vec<PathBuf>> {
        if !self.save_dir.exists() {
            return Ok(vec![]);
        }

        let mut paths = vec![];
        let mut entries = fs::read_dir(&self.save_dir)
            .await
            .map_err(|e| FramecastError::io("reading save directory", e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FramecastError::io("reading save entry", e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }

        // Timestamped names sort chronologically
        paths.sort();
        paths.reverse();
        Ok(paths)
    }
}
