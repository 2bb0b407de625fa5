//! Auth and join-key endpoints.

use secrecy::{ExposeSecret, SecretString};
use tavola_core::{Email, JoinKeyKind};
use tracing::instrument;

use super::{
    ApiClient, FetchError, JoinKeyCheck, JoinKeyCheckResponse, RegisterRequest, TokenResponse,
    read_empty, read_json,
};

impl ApiClient {
    /// `POST /auth/login` with form-encoded `username`/`password`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` when the credentials are rejected.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<TokenResponse, FetchError> {
        let response = self
            .client()
            .post(self.endpoint("auth/login")?)
            .timeout(self.timeout())
            .form(&[
                ("username", email.as_str()),
                ("password", password.expose_secret()),
            ])
            .send()
            .await?;

        read_json(response).await
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Status` when the backend refuses the account.
    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<(), FetchError> {
        let response = self
            .client()
            .post(self.endpoint("auth/register")?)
            .timeout(self.timeout())
            .json(request)
            .send()
            .await?;

        read_empty(response).await
    }

    /// `POST /auth/join-keys/validate`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on any transport, status or decode failure.
    #[instrument(skip(self, key))]
    pub async fn validate_join_key(
        &self,
        kind: JoinKeyKind,
        key: &str,
    ) -> Result<JoinKeyCheckResponse, FetchError> {
        let response = self
            .client()
            .post(self.endpoint("auth/join-keys/validate")?)
            .timeout(self.timeout())
            .json(&JoinKeyCheck { kind, key })
            .send()
            .await?;

        read_json(response).await
    }
}
