//! Outbound chat channel abstraction
//!
//! The platform behind this trait enforces its own global ceiling on
//! message frequency; the session manager's pacing delay exists to stay
//! under it no matter how many sessions share the channel.

use crate::error::FramecastResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Platform-assigned identifier of an outbound message
pub type MessageId = u64;

/// Notice shown when the per-session update ceiling is hit
pub const RATE_LIMIT_NOTICE: &str = "Slow down! Message rate limit reached. Wait a moment...";

/// Notice shown when session creation hits the global cap
pub const SESSION_LIMIT_NOTICE: &str = "Maximum number of game sessions reached. Try again later.";

/// Notice shown when an engine failure ends a session
pub const SESSION_FAILED_NOTICE: &str = "Your game session hit an engine error and was ended.";

/// Abstract chat platform interface
#[async_trait]
pub trait ChatOutbound: Send + Sync {
    /// Post a new message to the user's channel, returning its id
    async fn send(&self, user_id: &str, text: &str) -> FramecastResult<MessageId>;

    /// Replace the content of an existing message
    async fn edit(&self, user_id: &str, message_id: MessageId, text: &str) -> FramecastResult<()>;

    /// Remove a message
    async fn delete(&self, user_id: &str, message_id: MessageId) -> FramecastResult<()>;
}

/// Stdout-backed outbound for the demo binary
pub struct ConsoleOutbound {
    next_id: AtomicU64,
}

impl ConsoleOutbound {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for ConsoleOutbound {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatOutbound for ConsoleOutbound {
    async fn send(&self, user_id: &str, text: &str) -> FramecastResult<MessageId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        println!("--- {user_id} (message {id}) ---\n{text}");
        Ok(id)
    }

    async fn edit(&self, user_id: &str, message_id: MessageId, text: &str) -> FramecastResult<()> {
        println!("--- {user_id} (edit {message_id}) ---\n{text}");
        Ok(())
    }

    async fn delete(&self, user_id: &str, message_id: MessageId) -> FramecastResult<()> {
        println!("--- {user_id} (delete {message_id}) ---");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn console_outbound_assigns_increasing_ids() {
        let outbound = ConsoleOutbound::new();
        let a = outbound.send("alice", "x").await.unwrap();
        let b = outbound.send("alice", "y").await.unwrap();
        assert!(b > a);
    }
}
