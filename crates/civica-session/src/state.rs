//! The authentication state machine and what subscribers see of it.

use std::fmt;

use crate::Session;

// ---------------------------------------------------------------------------
// AuthState
// ---------------------------------------------------------------------------

/// Where the guardian is in its login lifecycle.
///
/// ```text
///                 ┌──────────(restore)───────────┐
///                 │                              ▼
/// Unauthenticated ──(login)──→ Authenticating ──→ Authenticated
///       ↑                          │                  │    │
///       └──────(rejected)──────────┘           (expire)  (logout)
///       ↑                                             ▼    ▼
///       └───────────────────────────────────── Expired | LoggedOut
/// ```
///
/// `Expired` and `LoggedOut` are pass-through states: the manager moves
/// on to `Unauthenticated` immediately, but subscribers get to see why
/// the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Expired,
    LoggedOut,
}

impl AuthState {
    /// Returns `true` if transitioning from `self` to `target` is one of
    /// the edges in the diagram above.
    pub fn can_transition_to(self, target: Self) -> bool {
        use AuthState::*;
        matches!(
            (self, target),
            (Unauthenticated, Authenticating)
                | (Unauthenticated, Authenticated)
                | (Authenticating, Authenticated)
                | (Authenticating, Unauthenticated)
                | (Authenticated, Authenticating)
                | (Authenticated, Authenticated)
                | (Authenticated, Expired)
                | (Authenticated, LoggedOut)
                | (Expired, Unauthenticated)
                | (LoggedOut, Unauthenticated)
        )
    }

    /// Returns `true` while a login attempt is in flight.
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Authenticating)
    }

}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Authenticating => write!(f, "Authenticating"),
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Expired => write!(f, "Expired"),
            Self::LoggedOut => write!(f, "LoggedOut"),
        }
    }
}

// ---------------------------------------------------------------------------
// AuthSnapshot
// ---------------------------------------------------------------------------

/// What subscribers of [`SessionManager::subscribe`](crate::SessionManager::subscribe)
/// receive after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub state: AuthState,
    pub session: Option<Session>,
}

impl AuthSnapshot {
    pub(crate) fn unauthenticated() -> Self {
        Self {
            state: AuthState::Unauthenticated,
            session: None,
        }
    }

    /// Mirrors the provider's `isLoading` flag.
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }
}

// ---------------------------------------------------------------------------
// RestoreOutcome
// ---------------------------------------------------------------------------

/// Why [`SessionManager::restore`](crate::SessionManager::restore) ended
/// where it did. Every outcome other than `Restored` leaves the manager
/// `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A valid stored session was loaded.
    Restored,
    /// Nothing was stored.
    Absent,
    /// The stored session had expired and was discarded.
    Expired,
    /// The stored data was malformed and was discarded.
    Corrupt,
    /// The storage backend couldn't be read.
    Unavailable,
}

impl RestoreOutcome {
    /// The pass-through state a held session ends in when a restore comes
    /// back with this outcome. `None` for `Restored`, which ends nothing.
    ///
    /// Only an emptied slot reads as a logout; any other lost record ends
    /// the session as `Expired`.
    pub(crate) fn end_reason(self) -> Option<AuthState> {
        match self {
            Self::Restored => None,
            Self::Absent => Some(AuthState::LoggedOut),
            Self::Expired | Self::Corrupt | Self::Unavailable => Some(AuthState::Expired),
        }
    }
}
