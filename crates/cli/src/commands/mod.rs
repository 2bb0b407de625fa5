//! CLI command implementations.
//!
//! Every command works on the same persisted session keys the web console
//! uses, stored as a JSON file via [`FileStorage`].

pub mod join_key;
pub mod probe;
pub mod session;

use std::path::PathBuf;

use tavola_console::api::ApiClient;
use tavola_console::config::{ConfigError, ConsoleConfig, parse_api_url};
use tavola_console::connectivity::ConnectivityProber;
use tavola_console::session::{FileStorage, SessionError, SessionStore, StorageError};
use tavola_core::UnknownRolePolicy;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] tavola_core::EmailError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Session state error: {0}")]
    Storage(#[from] StorageError),

    /// Operations API is not reachable.
    #[error("Backend unreachable at {0}")]
    Offline(String),
}

/// Shared state for a single command invocation.
pub struct Context {
    config: ConsoleConfig,
    api: ApiClient,
    state_path: PathBuf,
    policy: UnknownRolePolicy,
}

impl Context {
    /// Build the context from CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the API URL is invalid.
    pub fn new(
        state_path: PathBuf,
        api_url: &str,
        policy: UnknownRolePolicy,
    ) -> Result<Self, CliError> {
        let config = ConsoleConfig::local(parse_api_url(api_url)?);
        let api = ApiClient::new(&config.api);
        Ok(Self {
            config,
            api,
            state_path,
            policy,
        })
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn prober(&self) -> ConnectivityProber {
        ConnectivityProber::new(self.api.clone(), self.config.api.health_timeout)
    }

    /// Restore the session from the state file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state file cannot be read.
    pub async fn session(&self) -> Result<SessionStore<FileStorage>, StorageError> {
        SessionStore::restore(FileStorage::new(&self.state_path), self.policy).await
    }
}
