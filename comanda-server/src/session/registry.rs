//! Session registry keyed by login token
//!
//! Sessions idle longer than the configured timeout expire. A lookup of an
//! idle token fails with `SessionExpired`, and the sweeper task drops idle
//! sessions nobody asks for again, remembering their tokens for one more
//! timeout so a late request still gets `SessionExpired` instead of
//! `NotAuthenticated`.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::User;
use shared::util::{new_id, now_millis};
use tokio_util::sync::CancellationToken;

use super::Session;

/// Shared handle to one session
pub type SessionHandle = Arc<Mutex<Session>>;

/// How often the sweeper looks for idle sessions
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, SessionHandle>>,
    /// token -> expired at (ms)
    expired: Arc<DashMap<String, i64>>,
    /// `None` keeps sessions until logout
    idle_timeout: Option<Duration>,
}

impl SessionRegistry {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            idle_timeout: idle_timeout.filter(|t| !t.is_zero()),
            ..Self::default()
        }
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout
    }

    fn idle_timeout_ms(&self) -> Option<i64> {
        self.idle_timeout
            .map(|t| i64::try_from(t.as_millis()).unwrap_or(i64::MAX))
    }

    /// Start a session for `user` and return its token
    pub fn create(&self, user: &User) -> String {
        let token = new_id();
        let session = Session::new(token.clone(), user.username.clone(), user.role, now_millis());
        self.sessions
            .insert(token.clone(), Arc::new(Mutex::new(session)));
        tracing::debug!(username = %user.username, role = %user.role, "Session created");
        token
    }

    /// Look up a session and mark it as seen now
    pub fn touch(&self, token: &str) -> AppResult<SessionHandle> {
        self.touch_at(token, now_millis())
    }

    pub(crate) fn touch_at(&self, token: &str, now: i64) -> AppResult<SessionHandle> {
        let Some(handle) = self.sessions.get(token).map(|entry| entry.value().clone()) else {
            if self.expired.remove(token).is_some() {
                return Err(AppError::new(ErrorCode::SessionExpired));
            }
            return Err(AppError::not_authenticated());
        };

        {
            let mut session = handle.lock();
            if self.is_idle(&session, now) {
                drop(session);
                self.sessions.remove(token);
                tracing::debug!("Idle session expired on access");
                return Err(AppError::new(ErrorCode::SessionExpired));
            }
            session.last_seen = now;
        }
        Ok(handle)
    }

    fn is_idle(&self, session: &Session, now: i64) -> bool {
        self.idle_timeout_ms()
            .is_some_and(|timeout| now.saturating_sub(session.last_seen) > timeout)
    }

    /// Drop a session; `false` if the token was unknown
    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Expire idle sessions and forget old expired tokens; returns how many
    /// sessions expired
    pub fn sweep(&self) -> usize {
        self.sweep_at(now_millis())
    }

    pub(crate) fn sweep_at(&self, now: i64) -> usize {
        let Some(timeout) = self.idle_timeout_ms() else {
            return 0;
        };

        let idle: Vec<String> = self
            .sessions
            .iter()
            .filter(|entry| self.is_idle(&entry.value().lock(), now))
            .map(|entry| entry.key().clone())
            .collect();
        let mut count = 0;
        for token in idle {
            // Re-check: the session may have been touched since the scan.
            if self
                .sessions
                .remove_if(&token, |_, handle| self.is_idle(&handle.lock(), now))
                .is_some()
            {
                self.expired.insert(token, now);
                count += 1;
            }
        }

        self.expired
            .retain(|_, expired_at| now.saturating_sub(*expired_at) <= timeout);
        count
    }

    /// Sweep idle sessions until shutdown
    pub async fn run_sweeper(self, shutdown: CancellationToken) {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(idle_timeout = ?self.idle_timeout, "Session sweeper started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Session sweeper received shutdown signal");
                    break;
                }
                _ = interval.tick() => {
                    let expired = self.sweep();
                    if expired > 0 {
                        tracing::info!(expired, remaining = self.len(), "Idle sessions expired");
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
