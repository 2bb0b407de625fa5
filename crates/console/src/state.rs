//! Application state shared across handlers.

use std::sync::Arc;

use tavola_core::{StaticJoinKeys, UnknownRolePolicy};

use crate::api::ApiClient;
use crate::config::{ConsoleConfig, JoinKeyMode};
use crate::connectivity::ConnectivityProber;
use crate::fallback::FallbackCounters;
use crate::services::{AuthBackend, JoinKeyValidator, RemoteJoinKeys};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Per-user state lives in the request's
/// `SessionStore`, never here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    api: ApiClient,
    prober: ConnectivityProber,
    join_keys: Arc<dyn JoinKeyValidator>,
    auth: Arc<dyn AuthBackend>,
    fallbacks: FallbackCounters,
}

impl AppState {
    /// Build state from configuration: one API client shared by the prober,
    /// the auth backend and (in remote mode) the join-key validator.
    #[must_use]
    pub fn new(config: ConsoleConfig) -> Self {
        let api = ApiClient::new(&config.api);
        let join_keys: Arc<dyn JoinKeyValidator> = match config.join_keys {
            JoinKeyMode::Static => Arc::new(StaticJoinKeys::default()),
            JoinKeyMode::Remote => Arc::new(RemoteJoinKeys::new(api.clone())),
        };
        let auth: Arc<dyn AuthBackend> = Arc::new(api.clone());
        Self::from_parts(config, api, join_keys, auth)
    }

    /// Build state with explicit collaborators (tests swap in fakes here).
    #[must_use]
    pub fn from_parts(
        config: ConsoleConfig,
        api: ApiClient,
        join_keys: Arc<dyn JoinKeyValidator>,
        auth: Arc<dyn AuthBackend>,
    ) -> Self {
        let prober = ConnectivityProber::new(api.clone(), config.api.health_timeout);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                prober,
                join_keys,
                auth,
                fallbacks: FallbackCounters::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn prober(&self) -> &ConnectivityProber {
        &self.inner.prober
    }

    #[must_use]
    pub fn join_keys(&self) -> &dyn JoinKeyValidator {
        self.inner.join_keys.as_ref()
    }

    #[must_use]
    pub fn auth(&self) -> &dyn AuthBackend {
        self.inner.auth.as_ref()
    }

    #[must_use]
    pub fn fallbacks(&self) -> &FallbackCounters {
        &self.inner.fallbacks
    }

    #[must_use]
    pub fn unknown_role_policy(&self) -> UnknownRolePolicy {
        self.inner.config.unknown_role_policy
    }
}
