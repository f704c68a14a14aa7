//! Guardian session management for CIVICA 144.
//!
//! This crate handles the demo login lifecycle:
//!
//! 1. **Authentication**: checking submitted [`Credentials`]
//!    ([`Authenticator`] trait, [`DemoAuthenticator`])
//! 2. **Session tracking**: knowing whether the guardian is logged in
//!    and until when ([`SessionManager`], [`Session`])
//! 3. **Persistence**: mirroring the session into one storage slot and
//!    restoring it on startup
//!
//! # How it fits in the stack
//!
//! ```text
//! Portal (above)  ← route guard, navigation
//!     ↕
//! Session Layer (this crate)  ← who is logged in, until when
//!     ↕
//! Storage Layer (below)  ← one persisted key/value slot
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod error;
mod manager;
mod session;
mod state;

pub use auth::{Authenticator, Credentials, DemoAuthenticator, Identity, DEMO_PASSWORD, DEMO_USERNAME};
pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{AccessLevel, Session, SessionConfig};
pub use state::{AuthSnapshot, AuthState, RestoreOutcome};
