//! Session management module

pub mod game;
pub mod manager;
pub mod rate_limit;

pub use game::{GameSession, Lifecycle};
pub use manager::SessionManager;
pub use rate_limit::RateLimiter;

/// Shared test doubles for the session core
#[cfg(test)]
pub(crate) mod testing {
    use crate::chat::{ChatOutbound, MessageId};
    use crate::engine::{Action, FrameBuffer, GameEngine, GameState};
    use crate::error::{FramecastError, FramecastResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    /// Ordered record of engine calls across any number of engines
    #[derive(Default)]
    pub struct EventLog(Mutex<Vec<String>>);

    impl EventLog {
        pub fn push(&self, event: impl Into<String>) {
            self.0.lock().unwrap().push(event.into());
        }

        pub fn events(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }

        pub fn position(&self, event: &str) -> Option<usize> {
            self.events().iter().position(|e| e == event)
        }

        pub fn count_of(&self, event: &str) -> usize {
            self.events().iter().filter(|e| *e == event).count()
        }
    }

    /// Engine double that records every call into a shared log
    pub struct ScriptedEngine {
        tag: String,
        log: Arc<EventLog>,
        fail_advance: bool,
        state: GameState,
        initialized: bool,
    }

    impl ScriptedEngine {
        pub fn new(tag: impl Into<String>, log: Arc<EventLog>) -> Self {
            Self {
                tag: tag.into(),
                log,
                fail_advance: false,
                state: GameState::default(),
                initialized: false,
            }
        }

        pub fn failing(tag: impl Into<String>, log: Arc<EventLog>) -> Self {
            let mut engine = Self::new(tag, log);
            engine.fail_advance = true;
            engine
        }
    }

    #[async_trait]
    impl GameEngine for ScriptedEngine {
        async fn initialize(&mut self) -> FramecastResult<()> {
            if !self.initialized {
                self.initialized = true;
                self.log.push(format!("{}:init", self.tag));
            }
            Ok(())
        }

        async fn apply_action(&mut self, action: Action) -> FramecastResult<()> {
            self.log.push(format!("{}:action:{action:?}", self.tag));
            Ok(())
        }

        async fn advance(&mut self, _delta_time: f64) -> FramecastResult<FrameBuffer> {
            if self.fail_advance {
                return Err(FramecastError::EngineRuntime("scripted failure".into()));
            }
            self.log.push(format!("{}:advance", self.tag));
            let mut frame = FrameBuffer::blank(4, 2);
            frame.pixels = vec![0, 64, 128, 255, 255, 128, 64, 0];
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
                self.log.push(format!("{}:close", self.tag));
            }
        }

        fn engine_name(&self) -> &'static str {
            "scripted"
        }
    }

    /// Outbound double that records sends and edits
    #[derive(Default)]
    pub struct RecordingOutbound {
        pub sent: Mutex<Vec<(String, String)>>,
        pub edited: Mutex<Vec<(String, MessageId, String)>>,
        next_id: AtomicU64,
    }

    #[async_trait]
    impl ChatOutbound for RecordingOutbound {
        async fn send(&self, user_id: &str, text: &str) -> FramecastResult<MessageId> {
            self.sent
                .lock()
                .unwrap()
                .push((user_id.to_string(), text.to_string()));
            Ok(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
        }

        async fn edit(
            &self,
            user_id: &str,
            message_id: MessageId,
            text: &str,
        ) -> FramecastResult<()> {
            self.edited
                .lock()
                .unwrap()
                .push((user_id.to_string(), message_id, text.to_string()));
            Ok(())
        }

        async fn delete(&self, _user_id: &str, _message_id: MessageId) -> FramecastResult<()> {
            Ok(())
        }
    }
}
