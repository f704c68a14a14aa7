//! Integration tests for the portal over real file storage.
//!
//! Each test opens its own temporary directory, so "restarting the app"
//! is just building a second portal over the same directory.

use std::fs;

use civica::prelude::*;

const SESSION_FILE: &str = "guardian-session.json";

// =========================================================================
// Helpers
// =========================================================================

fn instant() -> SessionConfig {
    SessionConfig {
        login_delay_ms: 0,
        ..SessionConfig::default()
    }
}

fn open(dir: &tempfile::TempDir) -> Portal<FileStorage, DemoAuthenticator> {
    PortalBuilder::new()
        .storage_dir(dir.path())
        .session_config(instant())
        .build()
        .expect("portal should build")
}

fn demo() -> Credentials {
    Credentials::new(DEMO_USERNAME, DEMO_PASSWORD)
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_login_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let issued = {
        let mut portal = open(&dir);
        let session = portal.login(&demo()).await.unwrap().clone();
        session
    };

    let portal = open(&dir);

    assert_eq!(portal.sessions().state(), AuthState::Authenticated);
    assert_eq!(portal.sessions().session(), Some(&issued));
    assert_eq!(portal.navigate(Route::Billing), Route::Billing);
}

#[tokio::test]
async fn test_logout_removes_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut portal = open(&dir);
    portal.login(&demo()).await.unwrap();
    assert!(dir.path().join(SESSION_FILE).exists());

    portal.logout();

    assert!(!dir.path().join(SESSION_FILE).exists());
    assert_eq!(open(&dir).sessions().state(), AuthState::Unauthenticated);
}

#[test]
fn test_session_file_uses_browser_layout() {
    // A file written by the browser build must be picked up as-is.
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(SESSION_FILE),
        r#"{"isAuthenticated":true,"user":"guardian-demo","accessLevel":"demo","expiresAt":"2999-01-01T00:00:00.000Z"}"#,
    )
    .unwrap();

    let portal = open(&dir);

    let session = portal.sessions().session().expect("restored");
    assert_eq!(session.user, "guardian-demo");
    assert_eq!(session.access_level, AccessLevel::Demo);
}

#[test]
fn test_expired_session_file_is_deleted_on_start() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(SESSION_FILE),
        r#"{"isAuthenticated":true,"user":"guardian-demo","accessLevel":"demo","expiresAt":"2001-01-01T00:00:00.000Z"}"#,
    )
    .unwrap();

    let portal = open(&dir);

    assert_eq!(portal.sessions().state(), AuthState::Unauthenticated);
    assert!(!dir.path().join(SESSION_FILE).exists());
    assert_eq!(portal.navigate(Route::Dashboard), Route::Auth);
}

#[test]
fn test_garbage_session_file_starts_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(SESSION_FILE), b"\xff\xfe not json").unwrap();

    let portal = open(&dir);

    assert_eq!(portal.sessions().state(), AuthState::Unauthenticated);
    assert!(
        !dir.path().join(SESSION_FILE).exists(),
        "undecodable session file should be discarded"
    );
}

#[test]
fn test_build_fails_when_storage_dir_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();

    let result = PortalBuilder::new().storage_dir(&blocker).build();

    assert!(matches!(result, Err(CivicaError::Storage(StorageError::Io { .. }))));
}

#[tokio::test]
async fn test_cluster_compass_respects_guard() {
    let dir = tempfile::tempdir().unwrap();
    let mut portal = open(&dir);

    assert_eq!(portal.select_cluster(ClusterId(1)), Some(Route::Auth));
    assert_eq!(portal.visit("/ritual-technologist"), Some(Route::RitualTechnologist));

    portal.login(&demo()).await.unwrap();

    assert_eq!(portal.select_cluster(ClusterId(1)), Some(Route::Dashboard));
    assert_eq!(portal.select_cluster(ClusterId::BILLING), Some(Route::Billing));
    assert_eq!(portal.visit("/settings"), Some(Route::Settings));
}
