//! `Portal` builder and the session-gated navigation on top of it.
//!
//! The portal is the application context: it is built once at startup,
//! owns the one [`SessionManager`], and is handed to whatever drives the
//! UI. There is no global instance.

use std::path::PathBuf;

use civica_oracle::{route_for_cluster, ClusterId, LunarPhase, Route};
use civica_session::{
    Authenticator, Credentials, DemoAuthenticator, Session, SessionConfig, SessionManager,
};
use civica_storage::{FileStorage, Storage};

use crate::CivicaError;

/// Directory [`PortalBuilder::build`] stores sessions in unless told
/// otherwise.
pub const DEFAULT_STORAGE_DIR: &str = ".civica";

/// Builder for configuring and constructing a [`Portal`].
///
/// # Example
///
/// ```rust,no_run
/// use civica::prelude::*;
///
/// # fn main() -> Result<(), CivicaError> {
/// let portal = PortalBuilder::new()
///     .storage_dir("/var/lib/civica")
///     .session_config(SessionConfig { login_delay_ms: 0, ..SessionConfig::default() })
///     .build()?;
/// assert!(!portal.sessions().is_loading());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PortalBuilder {
    storage_dir: PathBuf,
    session_config: SessionConfig,
}

impl PortalBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            session_config: SessionConfig::default(),
        }
    }

    /// Sets the directory [`build`](Self::build) keeps the session in.
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Builds a portal backed by [`FileStorage`] and the demo
    /// credentials, restoring any session left in the storage directory.
    ///
    /// # Errors
    /// Returns [`CivicaError::Storage`] if the storage directory can't be
    /// created.
    pub fn build(self) -> Result<Portal<FileStorage, DemoAuthenticator>, CivicaError> {
        let storage = FileStorage::open(&self.storage_dir)?;
        Ok(self.build_with(storage, DemoAuthenticator::default()))
    }

    /// Builds a portal over caller-supplied storage and authenticator.
    /// The configured storage directory is ignored.
    pub fn build_with<S: Storage, A: Authenticator>(self, storage: S, auth: A) -> Portal<S, A> {
        let sessions = SessionManager::new(storage, auth, self.session_config);
        tracing::info!(state = %sessions.state(), "portal ready");
        Portal { sessions }
    }
}

impl Default for PortalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The running portal: one guardian session plus the route guard.
pub struct Portal<S: Storage, A: Authenticator> {
    sessions: SessionManager<S, A>,
}

impl<S: Storage, A: Authenticator> Portal<S, A> {
    /// Logs in. See [`SessionManager::login`].
    pub async fn login(&mut self, credentials: &Credentials) -> Result<&Session, CivicaError> {
        Ok(self.sessions.login(credentials).await?)
    }

    /// Logs out. See [`SessionManager::logout`].
    pub fn logout(&mut self) {
        self.sessions.logout();
    }

    /// The session manager, for state queries and subscriptions.
    pub fn sessions(&self) -> &SessionManager<S, A> {
        &self.sessions
    }

    /// The route guard: where a request for `route` actually lands.
    ///
    /// Protected views resolve to [`Route::Auth`] until a guardian is
    /// logged in; everything else passes through unchanged.
    pub fn navigate(&self, route: Route) -> Route {
        if route.requires_session() && !self.sessions.is_authenticated() {
            tracing::debug!(requested = %route, "not logged in, redirecting to auth");
            return Route::Auth;
        }
        route
    }

    /// Resolves a path through the route guard. Unknown paths return
    /// `None`.
    pub fn visit(&self, path: &str) -> Option<Route> {
        Route::from_path(path).map(|route| self.navigate(route))
    }

    /// Where selecting `cluster` on the compass lands, after the guard.
    /// Unknown clusters return `None`.
    pub fn select_cluster(&self, cluster: ClusterId) -> Option<Route> {
        route_for_cluster(cluster).map(|route| self.navigate(route))
    }

    /// Today's moon, by the local clock.
    pub fn lunar_phase(&self) -> LunarPhase {
        LunarPhase::today()
    }
}

#[cfg(test)]
mod tests {
    use civica_session::{AuthState, DEMO_PASSWORD, DEMO_USERNAME};
    use civica_storage::MemoryStorage;

    use super::*;

    fn portal() -> Portal<MemoryStorage, DemoAuthenticator> {
        PortalBuilder::new()
            .session_config(SessionConfig {
                login_delay_ms: 0,
                ..SessionConfig::default()
            })
            .build_with(MemoryStorage::new(), DemoAuthenticator::default())
    }

    #[test]
    fn test_builder_defaults() {
        let builder = PortalBuilder::default();
        assert_eq!(builder.storage_dir, PathBuf::from(".civica"));
        assert_eq!(builder.session_config, SessionConfig::default());
    }

    #[test]
    fn test_navigate_protected_route_redirects_when_logged_out() {
        let portal = portal();

        assert_eq!(portal.navigate(Route::Dashboard), Route::Auth);
        assert_eq!(portal.navigate(Route::Billing), Route::Auth);
        assert_eq!(portal.navigate(Route::Settings), Route::Auth);
    }

    #[test]
    fn test_navigate_public_route_passes_through() {
        let portal = portal();

        assert_eq!(portal.navigate(Route::Landing), Route::Landing);
        assert_eq!(portal.navigate(Route::Auth), Route::Auth);
        assert_eq!(
            portal.navigate(Route::RitualTechnologist),
            Route::RitualTechnologist
        );
    }

    #[tokio::test]
    async fn test_navigate_protected_route_allowed_after_login() {
        let mut portal = portal();
        portal
            .login(&Credentials::new(DEMO_USERNAME, DEMO_PASSWORD))
            .await
            .unwrap();

        assert_eq!(portal.navigate(Route::Dashboard), Route::Dashboard);
        assert_eq!(portal.select_cluster(ClusterId(5)), Some(Route::Billing));
    }

    #[tokio::test]
    async fn test_login_failure_maps_to_session_error() {
        let mut portal = portal();

        let result = portal.login(&Credentials::new("x", "y")).await;

        assert!(matches!(
            result,
            Err(CivicaError::Session(civica_session::SessionError::InvalidCredentials))
        ));
        assert_eq!(portal.sessions().state(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_select_cluster_guarded_and_unknown() {
        let portal = portal();

        assert_eq!(portal.select_cluster(ClusterId(2)), Some(Route::Auth));
        assert_eq!(
            portal.select_cluster(ClusterId(13)),
            Some(Route::RitualTechnologist)
        );
        assert_eq!(portal.select_cluster(ClusterId(99)), None);
    }

    #[test]
    fn test_visit_unknown_path_is_none() {
        let portal = portal();

        assert_eq!(portal.visit("/nowhere"), None);
        assert_eq!(portal.visit("/billing"), Some(Route::Auth));
    }
}
