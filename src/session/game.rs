//! Per-user game session
//!
//! A session owns one engine handle and the throttling state around it:
//! an update rate limiter, an input debounce stamp, and the idle-eviction
//! timestamp the manager sweeps on. Lifecycle is `Created → Active →
//! Stopped`, with `Stopped` terminal.

use crate::chat::MessageId;
use crate::config::schema::PacingConfig;
use crate::engine::{Action, FrameBuffer, GameEngine, GameState};
use crate::error::FramecastResult;
use crate::render;
use crate::session::rate_limit::RateLimiter;
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Active,
    Stopped,
}

/// One user's engine instance plus its throttling state
pub struct GameSession {
    id: Uuid,
    user_id: String,
    engine: Box<dyn GameEngine>,
    rate_limiter: RateLimiter,
    lifecycle: Lifecycle,
    min_reaction_interval: f64,
    last_update: f64,
    last_input: Option<f64>,
    latest_frame: Option<FrameBuffer>,
    message_id: Option<MessageId>,
}

impl GameSession {
    pub fn new(user_id: impl Into<String>, engine: Box<dyn GameEngine>, pacing: &PacingConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            engine,
            rate_limiter: RateLimiter::new(
                pacing.min_message_interval,
                pacing.max_updates_per_minute,
            ),
            lifecycle: Lifecycle::Created,
            min_reaction_interval: pacing.min_reaction_interval,
            last_update: 0.0,
            last_input: None,
            latest_frame: None,
            message_id: None,
        }
    }

    /// Initialize the engine and go active
    ///
    /// A no-op on a session that is already active or already stopped.
    /// Initialization failure leaves the session in `Created`.
    pub async fn start(&mut self, now: f64) -> FramecastResult<()> {
        match self.lifecycle {
            Lifecycle::Active | Lifecycle::Stopped => return Ok(()),
            Lifecycle::Created => {}
        }

        self.engine.initialize().await?;
        self.lifecycle = Lifecycle::Active;
        self.last_update = now;
        info!(
            session = %self.id,
            user = %self.user_id,
            engine = self.engine.engine_name(),
            "Session started"
        );
        Ok(())
    }

    /// Stop the session and close the engine handle
    ///
    /// Terminal and idempotent. Late-arriving operations on a stopped
    /// session are tolerated as no-ops.
    pub async fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        self.latest_frame = None;
        self.engine.close().await;
        info!(session = %self.id, user = %self.user_id, "Session stopped");
    }

    /// Forward a player action to the engine, debounced
    ///
    /// Inputs arriving within the reaction interval of the previous
    /// accepted input are dropped, never queued or replayed.
    pub async fn handle_input(&mut self, now: f64, action: Action) -> FramecastResult<()> {
        if self.lifecycle != Lifecycle::Active {
            return Ok(());
        }

        if let Some(last) = self.last_input {
            if now - last < self.min_reaction_interval {
                trace!(user = %self.user_id, ?action, "Input debounced");
                return Ok(());
            }
        }

        self.last_input = Some(now);
        self.engine.apply_action(action).await
    }

    /// Advance the engine by one rate-limited tick
    ///
    /// Returns whether the tick actually ran. A denied tick is skipped
    /// outright: the engine does not advance and the delta time is
    /// discarded, not accumulated.
    pub async fn update(&mut self, now: f64, delta_time: f64) -> FramecastResult<bool> {
        if self.lifecycle != Lifecycle::Active {
            return Ok(false);
        }

        if !self.rate_limiter.can_update(now) {
            trace!(user = %self.user_id, "Update skipped by rate limiter");
            return Ok(false);
        }

        let frame = self.engine.advance(delta_time).await?;
        self.rate_limiter.record_update(now);
        self.last_update = now;
        self.latest_frame = Some(frame);
        Ok(true)
    }

    /// Render the latest frame with its status overlay
    ///
    /// Never advances simulation; presentation is decoupled from the
    /// tick cadence. Empty when inactive or before the first frame.
    pub async fn get_frame(&self, width: usize, height: usize) -> FramecastResult<String> {
        if self.lifecycle != Lifecycle::Active {
            return Ok(String::new());
        }
        let Some(frame) = &self.latest_frame else {
            return Ok(String::new());
        };

        let ascii = render::render(frame, width, height);
        let state = self.engine.snapshot_state().await?;
        Ok(render::compose_overlay(&ascii, &state))
    }

    /// Capture the engine's current state
    pub async fn save_state(&self) -> FramecastResult<GameState> {
        if self.lifecycle != Lifecycle::Active {
            debug!(user = %self.user_id, "save_state on inactive session");
            return Ok(GameState::default());
        }
        self.engine.snapshot_state().await
    }

    /// Restore a previously captured state into the engine
    pub async fn load_state(&mut self, state: GameState) -> FramecastResult<()> {
        if self.lifecycle != Lifecycle::Active {
            debug!(user = %self.user_id, "load_state on inactive session ignored");
            return Ok(());
        }
        self.engine.restore_state(state).await
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Timestamp of the last permitted update, the idle-eviction basis
    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    pub fn message_id(&self) -> Option<MessageId> {
        self.message_id
    }

    pub fn set_message_id(&mut self, message_id: MessageId) {
        self.message_id = Some(message_id);
    }
}
