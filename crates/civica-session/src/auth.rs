//! Credential checking for the guardian.
//!
//! The session manager doesn't decide who may log in. It hands the
//! submitted [`Credentials`] to an [`Authenticator`] and gets back an
//! [`Identity`] or [`SessionError::InvalidCredentials`].
//!
//! The only authenticator shipped is [`DemoAuthenticator`], which accepts
//! exactly one fixed username/password pair. A real credential store
//! would be another implementation of the same trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AccessLevel, SessionError};

/// Username of the built-in demo account.
pub const DEMO_USERNAME: &str = "guardian-demo";

/// Password of the built-in demo account.
pub const DEMO_PASSWORD: &str = "sacred-oversight-2024";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A username/password pair submitted at login.
///
/// `Debug` is implemented by hand so the password never ends up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Who a successful login says the user is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub access_level: AccessLevel,
}

// ---------------------------------------------------------------------------
// Authenticator
// ---------------------------------------------------------------------------

/// Validates submitted credentials and returns the user's identity.
///
/// `Send + Sync + 'static` because the authenticator lives inside the
/// session manager for the whole life of the application.
///
/// # Example
///
/// ```rust
/// use civica_session::{AccessLevel, Authenticator, Credentials, Identity, SessionError};
///
/// /// Lets anyone in whose password is their username reversed.
/// struct MirrorAuthenticator;
///
/// impl Authenticator for MirrorAuthenticator {
///     async fn authenticate(
///         &self,
///         credentials: &Credentials,
///     ) -> Result<Identity, SessionError> {
///         let mirrored: String = credentials.username.chars().rev().collect();
///         if credentials.password != mirrored {
///             return Err(SessionError::InvalidCredentials);
///         }
///         Ok(Identity {
///             user: credentials.username.clone(),
///             access_level: AccessLevel::Demo,
///         })
///     }
/// }
/// ```
pub trait Authenticator: Send + Sync + 'static {
    /// Checks the credentials.
    ///
    /// # Returns
    /// - `Ok(Identity)`: the credentials are accepted
    /// - `Err(SessionError::InvalidCredentials)`: they are not
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl std::future::Future<Output = Result<Identity, SessionError>> + Send;
}

// ---------------------------------------------------------------------------
// DemoAuthenticator
// ---------------------------------------------------------------------------

/// Accepts a single fixed username/password pair, compared exactly.
///
/// No hashing, no case folding, no trimming: `" guardian-demo"` is a
/// different user. [`Default`] uses [`DEMO_USERNAME`] / [`DEMO_PASSWORD`].
#[derive(Clone)]
pub struct DemoAuthenticator {
    expected: Credentials,
}

impl DemoAuthenticator {
    /// Creates an authenticator that accepts only `username`/`password`.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            expected: Credentials::new(username, password),
        }
    }

    /// The one username this authenticator accepts.
    pub fn username(&self) -> &str {
        &self.expected.username
    }
}

impl Default for DemoAuthenticator {
    fn default() -> Self {
        Self::new(DEMO_USERNAME, DEMO_PASSWORD)
    }
}

impl fmt::Debug for DemoAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoAuthenticator")
            .field("expected", &self.expected)
            .finish()
    }
}

impl Authenticator for DemoAuthenticator {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity, SessionError> {
        if *credentials != self.expected {
            return Err(SessionError::InvalidCredentials);
        }
        Ok(Identity {
            user: credentials.username.clone(),
            access_level: AccessLevel::Demo,
        })
    }
}
