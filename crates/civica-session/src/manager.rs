//! The session manager: the one place that decides whether the guardian
//! is logged in.
//!
//! It's responsible for:
//! - Restoring a persisted session on startup (and discarding it if it
//!   has expired or is malformed)
//! - Checking credentials at login and issuing a fresh 8-hour session
//! - Mirroring the session into storage, and clearing it at logout
//! - Broadcasting every state change to subscribers
//!
//! # Concurrency note
//!
//! Every mutating method takes `&mut self`. There is exactly one manager
//! per running application and exactly one storage slot it writes, so
//! the borrow checker is all the locking this needs. Observers don't
//! borrow the manager at all; they hold a `watch::Receiver` from
//! [`SessionManager::subscribe`].

use chrono::{DateTime, Utc};
use civica_storage::{Storage, StorageError};
use tokio::sync::watch;

use crate::{
    AuthSnapshot, AuthState, Authenticator, Credentials, RestoreOutcome, Session,
    SessionConfig, SessionError,
};

/// Owns the guardian's session and its persisted copy.
///
/// ## Lifecycle
///
/// ```text
/// new() ──→ restore() ──→ [Authenticated] ──→ logout() ──→ [Unauthenticated]
///               │               ↑
///               ▼               │
///        [Unauthenticated] ──→ login()
/// ```
///
/// Construction always runs [`restore`](Self::restore); there is no
/// separate init step and nothing to tear down.
pub struct SessionManager<S: Storage, A: Authenticator> {
    storage: S,
    auth: A,
    config: SessionConfig,
    state: AuthState,
    session: Option<Session>,
    updates: watch::Sender<AuthSnapshot>,
}

impl<S: Storage, A: Authenticator> SessionManager<S, A> {
    /// Creates a manager and immediately restores any stored session.
    pub fn new(storage: S, auth: A, config: SessionConfig) -> Self {
        let (updates, _) = watch::channel(AuthSnapshot::unauthenticated());
        let mut manager = Self {
            storage,
            auth,
            config,
            state: AuthState::Unauthenticated,
            session: None,
            updates,
        };
        manager.restore();
        manager
    }

    /// Re-reads the stored session and replaces the in-memory one with it.
    ///
    /// Never fails: expired, malformed and unreadable records all end in
    /// `Unauthenticated`. Expired and malformed records are also removed
    /// from storage so the next restore doesn't trip over them again.
    pub fn restore(&mut self) -> RestoreOutcome {
        self.restore_at(Utc::now())
    }

    pub(crate) fn restore_at(&mut self, now: DateTime<Utc>) -> RestoreOutcome {
        let outcome = match self.load_stored() {
            Ok(Some(session)) if session.is_valid_at(now) => {
                tracing::info!(
                    user = %session.user,
                    expires_at = %session.expires_at,
                    "session restored"
                );
                self.session = Some(session);
                self.transition(AuthState::Authenticated);
                return RestoreOutcome::Restored;
            }
            Ok(Some(session)) => {
                tracing::info!(
                    user = %session.user,
                    expires_at = %session.expires_at,
                    "stored session expired, discarding"
                );
                self.discard_stored();
                RestoreOutcome::Expired
            }
            Ok(None) => RestoreOutcome::Absent,
            Err(SessionError::Storage(e)) => {
                tracing::warn!(error = %e, "session storage unreadable");
                RestoreOutcome::Unavailable
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session is corrupt, discarding");
                self.discard_stored();
                RestoreOutcome::Corrupt
            }
        };
        if let Some(reason) = outcome.end_reason() {
            self.end_session(reason);
        }
        outcome
    }

    /// Checks the credentials and, if they're accepted, starts a new
    /// session.
    ///
    /// Waits `config.login_delay_ms` before answering. On success the new
    /// session (valid for `config.session_ttl_secs`) replaces any current
    /// one and is written to storage. On failure nothing changes: an
    /// unauthenticated manager stays unauthenticated, an authenticated one
    /// keeps its existing session.
    ///
    /// A storage write failure is logged, not returned; the session still
    /// holds for the life of the process. Dropping the returned future
    /// before it completes rolls the state back as if the credentials had
    /// been rejected.
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidCredentials`] if the authenticator
    /// rejects the credentials.
    pub async fn login(
        &mut self,
        credentials: &Credentials,
    ) -> Result<&Session, SessionError> {
        let previous = self.state;
        self.transition(AuthState::Authenticating);
        let mut pending = PendingLogin {
            manager: &mut *self,
            previous,
            settled: false,
        };

        let delay = pending.manager.config.login_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let identity = match pending.manager.auth.authenticate(credentials).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::info!(username = %credentials.username, "login rejected");
                return Err(e);
            }
        };
        pending.settled = true;
        drop(pending);

        let session = Session::issue(identity, Utc::now(), self.config.ttl());
        self.persist(&session);
        tracing::info!(
            user = %session.user,
            access_level = %session.access_level,
            expires_at = %session.expires_at,
            "login succeeded"
        );
        self.session = Some(session);
        self.transition(AuthState::Authenticated);

        Ok(self.session.as_ref().expect("session set above"))
    }

    /// Ends the session and clears the stored copy.
    ///
    /// Idempotent: logging out while logged out still clears storage and
    /// leaves the manager `Unauthenticated`.
    pub fn logout(&mut self) {
        if let Some(session) = &self.session {
            tracing::info!(user = %session.user, "logged out");
        }
        self.discard_stored();
        self.end_session(AuthState::LoggedOut);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// The current session, if logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns `true` if a session is held.
    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated && self.session.is_some()
    }

    /// Returns `true` while a login attempt is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver starts out holding the current snapshot and is
    /// updated after every transition.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.updates.subscribe()
    }

    // -- internals --------------------------------------------------------

    fn load_stored(&self) -> Result<Option<Session>, SessionError> {
        let raw = match self.storage.get_item(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StorageError::InvalidData { source, .. }) => {
                return Err(SessionError::CorruptSession(source.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Session::from_json(&raw).map(Some)
    }

    fn persist(&self, session: &Session) {
        let result = session.to_json().and_then(|raw| {
            self.storage
                .set_item(&self.config.storage_key, &raw)
                .map_err(SessionError::from)
        });
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }

    fn discard_stored(&self) {
        if let Err(e) = self.storage.remove_item(&self.config.storage_key) {
            tracing::warn!(error = %e, "failed to clear stored session");
        }
    }

    /// Drops the in-memory session. If one was held, passes through
    /// `reason` (`Expired` or `LoggedOut`) on the way to
    /// `Unauthenticated`.
    fn end_session(&mut self, reason: AuthState) {
        self.session = None;
        if self.state == AuthState::Authenticated {
            self.transition(reason);
        }
        self.transition(AuthState::Unauthenticated);
    }

    fn transition(&mut self, next: AuthState) {
        let from = self.state;
        if from == next && next != AuthState::Authenticated {
            return;
        }
        if !from.can_transition_to(next) {
            tracing::warn!(%from, to = %next, "unexpected session state transition");
        }
        tracing::debug!(%from, to = %next, "session state changed");
        self.state = next;
        self.updates.send_replace(AuthSnapshot {
            state: next,
            session: self.session.clone(),
        });
    }
}

/// An unfinished login. Dropped before it's settled (the credentials were
/// rejected, or the `login` future itself was dropped mid-delay), it puts
/// the manager back where the attempt started.
struct PendingLogin<'a, S: Storage, A: Authenticator> {
    manager: &'a mut SessionManager<S, A>,
    previous: AuthState,
    settled: bool,
}

impl<S: Storage, A: Authenticator> Drop for PendingLogin<'_, S, A> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let back = if self.manager.session.is_some() {
            self.previous
        } else {
            AuthState::Unauthenticated
        };
        self.manager.transition(back);
    }
}

// =========================================================================
// Tests
// =========================================================================
