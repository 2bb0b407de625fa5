//! Credential authentication against the operations backend.
//!
//! The session store and signup flow talk to an [`AuthBackend`] rather than
//! the HTTP client directly, so tests can swap in a recording fake.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tavola_core::{AccessToken, Email, Role};
use thiserror::Error;

use crate::api::{ApiClient, FetchError, RegisterRequest};

/// Errors from the auth collaborator.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password not accepted.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The backend refused the request with an explanation.
    #[error("{0}")]
    Rejected(String),

    /// The backend could not be reached or answered unexpectedly.
    #[error("Authentication service unavailable")]
    Unavailable(#[source] FetchError),
}

impl AuthError {
    /// Message safe to render on a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unavailable(_) => {
                "The authentication service is unavailable. Try again or use a demo account."
                    .to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// A new staff account.
#[derive(Debug)]
pub struct Registration {
    pub email: Email,
    pub password: SecretString,
    pub full_name: String,
    pub role: Role,
    pub join_key: Option<String>,
}

/// External credential and registration authority.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &Email, password: &SecretString)
    -> Result<AccessToken, AuthError>;

    /// Create an account. Join keys have already been validated.
    async fn register(&self, registration: &Registration) -> Result<(), AuthError>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AccessToken, AuthError> {
        match Self::login(self, email, password).await {
            Ok(token) => Ok(AccessToken::new(token.access_token)),
            Err(e) => Err(classify(e, true)),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        let request = RegisterRequest {
            email: registration.email.as_str(),
            password: registration.password.expose_secret(),
            full_name: &registration.full_name,
            role: registration.role,
            join_key: registration.join_key.as_deref(),
        };
        Self::register(self, &request)
            .await
            .map_err(|e| classify(e, false))
    }
}

/// Split backend failures into "the user got it wrong" and "the service is down".
fn classify(error: FetchError, is_login: bool) -> AuthError {
    match error.status() {
        Some(StatusCode::UNAUTHORIZED) if is_login => AuthError::InvalidCredentials,
        Some(status) if status.is_client_error() => match error.detail() {
            Some(detail) => AuthError::Rejected(detail.to_string()),
            None if is_login => AuthError::InvalidCredentials,
            None => AuthError::Rejected(format!("Registration refused ({status})")),
        },
        _ => {
            tracing::warn!(error = %error, "auth backend call failed");
            AuthError::Unavailable(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: StatusCode, detail: &str) -> FetchError {
        FetchError::Status {
            status: code,
            detail: detail.to_string(),
        }
    }

    #[test]
    fn test_login_401_is_invalid_credentials() {
        assert!(matches!(
            classify(status(StatusCode::UNAUTHORIZED, "Incorrect email or password"), true),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_client_error_detail_is_surfaced() {
        let err = classify(status(StatusCode::CONFLICT, "Email already registered"), false);
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn test_server_error_is_unavailable() {
        let err = classify(status(StatusCode::BAD_GATEWAY, ""), true);
        assert!(matches!(err, AuthError::Unavailable(_)));
        assert!(err.user_message().contains("demo account"));
    }
}
