//! Session types: the record that says "this guardian is logged in".
//!
//! A session tracks:
//! - WHO is logged in (`user`)
//! - WHAT they may do (`access_level`)
//! - UNTIL WHEN (`expires_at`)
//!
//! The same struct is what gets persisted, so its serde layout IS the
//! storage format:
//!
//! ```json
//! {"isAuthenticated":true,"user":"guardian-demo","accessLevel":"demo","expiresAt":"2024-05-01T12:00:00.000Z"}
//! ```

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{Identity, SessionError};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// The defaults reproduce the demo portal: sessions last 8 hours, live in
/// the `guardian-session` slot, and login pauses for one second before
/// answering. Override individual fields with struct update syntax:
///
/// ```rust
/// use civica_session::SessionConfig;
///
/// let config = SessionConfig { login_delay_ms: 0, ..SessionConfig::default() };
/// assert_eq!(config.session_ttl_secs, 8 * 60 * 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long (in seconds) a freshly issued session stays valid.
    pub session_ttl_secs: u64,

    /// Storage slot the session is mirrored to.
    pub storage_key: String,

    /// Cosmetic pause (in milliseconds) before a login attempt is
    /// answered. Not an I/O wait; set to 0 to disable.
    pub login_delay_ms: u64,
}

impl SessionConfig {
    /// Default session lifetime: 8 hours.
    pub const DEFAULT_TTL_SECS: u64 = 8 * 60 * 60;

    /// Default storage slot.
    pub const DEFAULT_STORAGE_KEY: &'static str = "guardian-session";

    /// Session lifetime as a chrono delta, saturating at the largest
    /// representable value.
    pub fn ttl(&self) -> TimeDelta {
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    /// The cosmetic login pause.
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: Self::DEFAULT_TTL_SECS,
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            login_delay_ms: 1_000,
        }
    }
}

// ---------------------------------------------------------------------------
// AccessLevel
// ---------------------------------------------------------------------------

/// What a session is allowed to see. The demo portal only ever grants
/// `demo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Demo,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => write!(f, "demo"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An authenticated guardian session.
///
/// A session is valid if and only if `expires_at` is strictly in the
/// future. Nothing re-checks that on a timer; the manager evaluates it
/// when a stored session is restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Always `true` for a session that was issued by a login. A stored
    /// record with `false` here is rejected as corrupt.
    pub is_authenticated: bool,

    /// The logged-in username.
    pub user: String,

    pub access_level: AccessLevel,

    /// When the session stops being valid. Serialized as an RFC 3339
    /// timestamp with millisecond precision and a `Z` suffix.
    #[serde(with = "iso8601")]
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issues a new session for `identity`, valid for `ttl` from `now`.
    ///
    /// The expiry is truncated to whole milliseconds, the precision of the
    /// stored form, so a persisted session reads back identical.
    pub fn issue(identity: Identity, now: DateTime<Utc>, ttl: TimeDelta) -> Self {
        let expires_at = now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .trunc_subsecs(3);
        Self {
            is_authenticated: true,
            user: identity.user,
            access_level: identity.access_level,
            expires_at,
        }
    }

    /// Returns `true` if the session is still valid at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Time left before expiry, or `None` if already expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.is_valid_at(now).then(|| self.expires_at - now)
    }

    /// Serializes the session into its storage form.
    pub fn to_json(&self) -> Result<String, SessionError> {
        serde_json::to_string(self).map_err(SessionError::Encode)
    }

    /// Parses and validates a stored session.
    ///
    /// The shape is enforced by serde (missing fields, an unknown access
    /// level or a bad timestamp all fail to parse); the content checks
    /// below reject records that parse but could never have been issued.
    ///
    /// # Errors
    /// Returns [`SessionError::CorruptSession`] for anything that isn't a
    /// well-formed, authenticated session.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        let session: Session = serde_json::from_str(raw)
            .map_err(|e| SessionError::CorruptSession(e.to_string()))?;

        if !session.is_authenticated {
            return Err(SessionError::CorruptSession(
                "isAuthenticated is false".into(),
            ));
        }
        if session.user.trim().is_empty() {
            return Err(SessionError::CorruptSession("user is empty".into()));
        }
        Ok(session)
    }
}

/// Serde adapter for `DateTime<Utc>` as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Deserialization accepts any RFC 3339 timestamp (any offset, any
/// sub-second precision) and converts it to UTC.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| de::Error::custom(format!("invalid expiresAt {raw:?}: {e}")))
    }
}
