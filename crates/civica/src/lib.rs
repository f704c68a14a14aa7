//! # CIVICA 144
//!
//! The guardian portal: a single demo identity gating a handful of views.
//!
//! The portal ties the layers together:
//!
//! ```text
//! Portal (this crate)  ← route guard, cluster compass, lunar phase
//!     ↕
//! civica-session  ← login, logout, restore, expiry
//!     ↕
//! civica-storage  ← the persisted session slot
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use civica::prelude::*;
//!
//! # async fn run() -> Result<(), CivicaError> {
//! civica::telemetry::init();
//!
//! let mut portal = PortalBuilder::new().storage_dir(".civica").build()?;
//! portal
//!     .login(&Credentials::new(DEMO_USERNAME, DEMO_PASSWORD))
//!     .await?;
//! assert_eq!(portal.navigate(Route::Dashboard), Route::Dashboard);
//! # Ok(())
//! # }
//! ```

mod error;
mod portal;
pub mod telemetry;

pub use error::CivicaError;
pub use portal::{Portal, PortalBuilder, DEFAULT_STORAGE_DIR};

/// Everything needed to build and drive a portal.
pub mod prelude {
    pub use crate::{CivicaError, Portal, PortalBuilder};
    pub use civica_oracle::{route_for_cluster, ClusterId, LunarPhase, Route};
    pub use civica_session::{
        AccessLevel, AuthSnapshot, AuthState, Authenticator, Credentials, DemoAuthenticator,
        Identity, RestoreOutcome, Session, SessionConfig, SessionError, SessionManager,
        DEMO_PASSWORD, DEMO_USERNAME,
    };
    pub use civica_storage::{FileStorage, MemoryStorage, Storage, StorageError};
}
