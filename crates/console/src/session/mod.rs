//! Session store: who is acting, with what privileges.
//!
//! A [`SessionStore`] is built per request (web) or per command (CLI) over a
//! [`SessionStorage`] backend, restored from the persisted keys, and mutated
//! only through `login`, `demo_login` and `logout`. Persisted keys are listed
//! in [`tavola_core::session::keys`].

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

use secrecy::SecretString;
use tavola_core::session::keys;
use tavola_core::{Email, PersistedSession, Restored, Role, Session, Theme, UnknownRolePolicy};
use thiserror::Error;
use tracing::instrument;

use crate::services::auth::{AuthBackend, AuthError};

/// Errors that can occur while changing the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
}

/// The acting session over a persisted storage backend.
pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Rebuild the session from persisted keys.
    ///
    /// A token next to a missing or unrecognized role is resolved by `policy`
    /// and logged either way.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn restore(storage: S, policy: UnknownRolePolicy) -> Result<Self, StorageError> {
        let persisted = PersistedSession {
            token: storage.get(keys::TOKEN).await?,
            role: storage.get(keys::ROLE).await?,
            profile: storage.get(keys::PROFILE).await?,
        };

        let current = match persisted.restore(policy) {
            Restored::Anonymous => None,
            Restored::Session(session) => Some(session),
            Restored::RoleDefaulted { session, found } => {
                tracing::warn!(
                    found_role = ?found,
                    "persisted role missing or unrecognized; defaulting to restaurant_admin"
                );
                Some(session)
            }
            Restored::Rejected { found } => {
                tracing::warn!(
                    found_role = ?found,
                    "persisted role missing or unrecognized; session requires re-authentication"
                );
                None
            }
        };

        Ok(Self { storage, current })
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(Session::role)
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Log in through the auth backend as `role`.
    ///
    /// Nothing is changed when the backend refuses.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Auth` when credentials are rejected or the
    /// backend is unavailable, `SessionError::Storage` if persisting fails.
    #[instrument(skip(self, auth, password), fields(role = %role))]
    pub async fn login(
        &mut self,
        auth: &dyn AuthBackend,
        email: &Email,
        password: &SecretString,
        role: Role,
    ) -> Result<&Session, SessionError> {
        let token = auth.login(email, password).await?;
        let session = Session::for_login(role, token, email);
        tracing::info!(email = %email, "logged in");
        Ok(self.establish(session).await?)
    }

    /// Start a demo session for `role` without contacting any backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails.
    #[instrument(skip(self), fields(role = %role))]
    pub async fn demo_login(&mut self, role: Role) -> Result<&Session, StorageError> {
        tracing::info!("demo login");
        self.establish(Session::demo(role)).await
    }

    /// Persist `session`. The old token is dropped first and the new one is
    /// written last, so a failed write leaves the store anonymous rather than
    /// pairing a token with another session's role.
    async fn establish(&mut self, session: Session) -> Result<&Session, StorageError> {
        let profile = serde_json::to_string(session.identity())
            .map_err(StorageError::Corrupt)?;

        self.current = None;
        self.storage.remove(keys::TOKEN).await?;
        self.storage
            .set_many(&[
                (keys::ROLE, session.role().as_str()),
                (keys::PROFILE, profile.as_str()),
                (keys::TOKEN, session.token().expose()),
            ])
            .await?;
        Ok(self.current.insert(session))
    }

    /// End the session. Purely local; the in-memory session is cleared and
    /// every persisted key is attempted even if some removals fail.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError` hit while removing keys.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.current = None;

        let mut first_error = None;
        for key in [keys::TOKEN, keys::ROLE, keys::PROFILE] {
            if let Err(e) = self.storage.remove(key).await {
                tracing::warn!(key, error = %e, "failed to remove session key");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                tracing::info!("logged out");
                Ok(())
            }
        }
    }

    /// Persisted theme; unreadable values read as the default.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn theme(&self) -> Result<Theme, StorageError> {
        Ok(self
            .storage
            .get(keys::THEME)
            .await?
            .and_then(|t| t.parse().ok())
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if persisting fails.
    pub async fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(keys::THEME, theme.as_str()).await
    }
}
