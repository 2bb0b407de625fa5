//! Session middleware configuration.
//!
//! Sets up cookie sessions using tower-sessions. The cookie carries only the
//! session id; the persisted keys (`token`, `role`, `profile`, `theme`) live
//! in the server-side store.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ConsoleConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tavola_session";

/// Session expiry time in seconds (12 hours, roughly one service day).
const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// Sessions do not survive a restart; staff log in again (or pick a demo
/// role) after a deploy.
#[must_use]
pub fn create_session_layer(config: &ConsoleConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
