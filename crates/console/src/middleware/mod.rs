//! HTTP middleware and extractors for the console.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Session layer (tower-sessions, in-memory store)
//!
//! Authentication is enforced per handler through the extractors in [`auth`].

pub mod auth;
pub mod session;

pub use auth::{ConsoleSession, RequirePayrollAccess, RequireSession, SessionRejection};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
