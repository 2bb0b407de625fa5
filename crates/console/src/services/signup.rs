//! Staff signup.
//!
//! Form checks and the join-key lookup both run before the register call;
//! any [`ValidationError`] means the backend was never asked to create the
//! account.

use secrecy::{ExposeSecret, SecretString};
use tavola_core::{Email, JoinKeyKind, KeyValidation, Role};
use thiserror::Error;
use tracing::instrument;

use super::auth::{AuthBackend, AuthError, Registration};
use super::join_keys::JoinKeyValidator;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Signup input that failed local checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter your full name")]
    MissingName,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{} is required for this role", .0.label())]
    MissingJoinKey(JoinKeyKind),

    #[error("{} is not valid", .0.label())]
    InvalidJoinKey(JoinKeyKind),
}

/// Errors that can occur during signup.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl SignupError {
    /// Message safe to render on the signup form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Auth(e) => e.user_message(),
        }
    }
}

/// Raw signup form values.
#[derive(Debug)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
    pub role: Role,
    pub join_key: Option<String>,
}

/// Outcome of a successful signup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUp {
    pub email: Email,
    pub role: Role,
    /// Restaurant or manager the account joined, when a key was required.
    pub joined: Option<String>,
}

/// Validate `request`, check its join key, then register the account.
///
/// # Errors
///
/// Returns `SignupError::Validation` before any register call when the form
/// or join key is unacceptable, and `SignupError::Auth` when the backend
/// refuses the account.
#[instrument(skip_all, fields(role = %request.role))]
pub async fn sign_up(
    validator: &dyn JoinKeyValidator,
    auth: &dyn AuthBackend,
    request: SignupRequest,
) -> Result<SignedUp, SignupError> {
    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(ValidationError::MissingName.into());
    }
    let email = Email::parse(&request.email).map_err(|_| ValidationError::InvalidEmail)?;
    if request.password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        }
        .into());
    }
    if request.password.expose_secret() != request.password_confirm.expose_secret() {
        return Err(ValidationError::PasswordMismatch.into());
    }

    let (join_key, joined) = match JoinKeyKind::required_for(request.role) {
        None => (None, None),
        Some(kind) => {
            let key = request.join_key.unwrap_or_default();
            match validator.validate(kind, &key).await {
                KeyValidation::Valid { owner_name } => (Some(key), Some(owner_name)),
                KeyValidation::Unknown => return Err(ValidationError::MissingJoinKey(kind).into()),
                KeyValidation::Invalid => return Err(ValidationError::InvalidJoinKey(kind).into()),
            }
        }
    };

    let registration = Registration {
        email,
        password: request.password,
        full_name: full_name.to_string(),
        role: request.role,
        join_key,
    };
    auth.register(&registration).await?;

    tracing::info!(email = %registration.email, "staff account registered");
    Ok(SignedUp {
        email: registration.email,
        role: registration.role,
        joined,
    })
}
