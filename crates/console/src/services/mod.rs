//! Business logic services for the console.
//!
//! # Services
//!
//! - `auth` - Credential login and account registration against the backend
//! - `join_keys` - Pluggable join-key validation (static table or remote)
//! - `signup` - Staff signup gated on join keys

pub mod auth;
pub mod join_keys;
pub mod signup;

pub use auth::{AuthBackend, AuthError, Registration};
pub use join_keys::{JoinKeyValidator, RemoteJoinKeys};
pub use signup::{SignupError, SignupRequest, ValidationError, sign_up};
