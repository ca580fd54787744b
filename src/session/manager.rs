//! Session collection ownership and the periodic update sweep
//!
//! The manager is the only mutator of the registry. Within one tick the
//! idle sweep always completes before any update is issued, and every
//! session's update is followed by a mandatory pacing sleep so aggregate
//! emission never outruns the shared outbound channel, whatever the
//! per-session limiters allow.

use crate::chat::{ChatOutbound, SESSION_FAILED_NOTICE};
use crate::config::schema::{DisplayConfig, PacingConfig};
use crate::config::Config;
use crate::engine::{Action, GameEngine};
use crate::error::{FramecastError, FramecastResult};
use crate::session::game::GameSession;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Produces a fresh engine handle for each new session
pub type EngineFactory = Box<dyn Fn() -> Box<dyn GameEngine> + Send + Sync>;

/// Owns every session and serializes their lifecycle transitions
pub struct SessionManager {
    sessions: HashMap<String, GameSession>,
    engine_factory: EngineFactory,
    outbound: Arc<dyn ChatOutbound>,
    pacing: PacingConfig,
    display: DisplayConfig,
    max_sessions: usize,
    last_sweep: Option<f64>,
}

impl SessionManager {
    pub fn new(config: &Config, engine_factory: EngineFactory, outbound: Arc<dyn ChatOutbound>) -> Self {
        Self {
            sessions: HashMap::new(),
            engine_factory,
            outbound,
            pacing: config.pacing.clone(),
            display: config.display.clone(),
            max_sessions: config.session.max_sessions,
            last_sweep: None,
        }
    }

    /// Create (or replace) the session for a user
    ///
    /// An existing session is fully stopped before the replacement is
    /// published, so there is never more than one live engine per user.
    /// At capacity, creation of a genuinely new session fails with
    /// `SessionLimit` and the registry is left unchanged.
    pub async fn create_session(&mut self, user_id: &str, now: f64) -> FramecastResult<Uuid> {
        let replaced = match self.sessions.remove(user_id) {
            Some(mut old) => {
                info!(user = user_id, session = %old.id(), "Replacing existing session");
                old.stop().await;
                true
            }
            None => false,
        };

        if !replaced && self.sessions.len() >= self.max_sessions {
            return Err(FramecastError::SessionLimit {
                max: self.max_sessions,
            });
        }

        let mut session = GameSession::new(user_id, (self.engine_factory)(), &self.pacing);
        session.start(now).await?;

        let id = session.id();
        self.sessions.insert(user_id.to_string(), session);
        info!(user = user_id, session = %id, "Session created");
        Ok(id)
    }

    /// Look up a user's session
    pub fn get_session(&self, user_id: &str) -> Option<&GameSession> {
        self.sessions.get(user_id)
    }

    pub fn get_session_mut(&mut self, user_id: &str) -> Option<&mut GameSession> {
        self.sessions.get_mut(user_id)
    }

    /// Stop and remove a user's session; idempotent on a missing key
    pub async fn end_session(&mut self, user_id: &str) {
        if let Some(mut session) = self.sessions.remove(user_id) {
            session.stop().await;
            info!(user = user_id, "Session ended");
        }
    }

    /// Route a player input to its session; a missing user is a no-op
    pub async fn handle_input(
        &mut self,
        user_id: &str,
        now: f64,
        action: Action,
    ) -> FramecastResult<()> {
        match self.sessions.get_mut(user_id) {
            Some(session) => session.handle_input(now, action).await,
            None => Ok(()),
        }
    }

    /// One tick of the driver: idle sweep, then the paced update pass
    ///
    /// Per-session failures are isolated: the failing session is
    /// notified and evicted, and the pass continues. Nothing here ever
    /// aborts the driving loop.
    pub async fn update_all(&mut self, now: f64, delta_time: f64) {
        self.sweep_idle(now).await;

        let pacing_delay = Duration::from_secs_f64(self.pacing.min_message_interval);

        // Snapshot of keys: eviction mid-pass must not skip entries
        let users: Vec<String> = self.sessions.keys().cloned().collect();
        for user in users {
            let updated = match self.sessions.get_mut(&user) {
                Some(session) => session.update(now, delta_time).await,
                None => continue,
            };

            match updated {
                Ok(true) => {
                    if let Err(e) = self.publish_frame(&user).await {
                        if e.is_session_fatal() {
                            self.fail_session(&user, &e).await;
                        } else {
                            warn!(user = %user, error = %e, "Frame publish failed");
                        }
                    }
                }
                Ok(false) => {
                    debug!(user = %user, "Update skipped");
                }
                Err(e) => {
                    self.fail_session(&user, &e).await;
                }
            }

            // Aggregate pacing for the shared channel
            sleep(pacing_delay).await;
        }
    }

    /// End every session; used at shutdown for deterministic teardown
    pub async fn shutdown(&mut self) {
        let users: Vec<String> = self.sessions.keys().cloned().collect();
        for user in users {
            self.end_session(&user).await;
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// User ids currently holding a session
    pub fn users(&self) -> Vec<String> {
        self.sessions.keys().cloned().collect()
    }

    /// Evict sessions idle past the timeout, at most once per sweep interval
    async fn sweep_idle(&mut self, now: f64) {
        let due = self
            .last_sweep
            .map_or(true, |last| now - last >= self.pacing.sweep_interval);
        if !due {
            return;
        }
        self.last_sweep = Some(now);

        let idle: Vec<String> = self
            .sessions
            .iter()
            .filter(|(_, session)| now - session.last_update() > self.pacing.idle_timeout)
            .map(|(user, _)| user.clone())
            .collect();

        for user in idle {
            info!(user = %user, "Evicting idle session");
            self.end_session(&user).await;
        }
    }

    /// Render the user's latest frame and push it through the channel
    async fn publish_frame(&mut self, user_id: &str) -> FramecastResult<()> {
        let (text, message_id) = match self.sessions.get(user_id) {
            Some(session) => (
                session
                    .get_frame(self.display.width, self.display.height)
                    .await?,
                session.message_id(),
            ),
            None => return Ok(()),
        };

        if text.is_empty() {
            return Ok(());
        }

        match message_id {
            Some(id) => self.outbound.edit(user_id, id, &text).await?,
            None => {
                let id = self.outbound.send(user_id, &text).await?;
                if let Some(session) = self.sessions.get_mut(user_id) {
                    session.set_message_id(id);
                }
            }
        }
        Ok(())
    }

    /// Notify and evict a session whose engine failed
    async fn fail_session(&mut self, user_id: &str, error: &FramecastError) {
        warn!(user = %user_id, error = %error, "Engine failure, ending session");
        if let Err(e) = self.outbound.send(user_id, SESSION_FAILED_NOTICE).await {
            warn!(user = %user_id, error = %e, "Failed to deliver failure notice");
        }
        self.end_session(user_id).await;
    }
}
