//! Join-key validation backends.

use async_trait::async_trait;
use tavola_core::join_key::is_blank;
use tavola_core::{JoinKeyKind, KeyValidation, StaticJoinKeys};

use crate::api::ApiClient;

/// Checks a join key and reports whose it is.
///
/// Blank input must come back as [`KeyValidation::Unknown`] without any
/// backend being consulted.
#[async_trait]
pub trait JoinKeyValidator: Send + Sync {
    async fn validate(&self, kind: JoinKeyKind, key: &str) -> KeyValidation;
}

#[async_trait]
impl JoinKeyValidator for StaticJoinKeys {
    async fn validate(&self, kind: JoinKeyKind, key: &str) -> KeyValidation {
        self.check(kind, key)
    }
}

/// Asks the operations API (`POST /auth/join-keys/validate`).
///
/// Any failure reads as [`KeyValidation::Invalid`], so signup stays blocked
/// while the backend is unreachable.
#[derive(Debug, Clone)]
pub struct RemoteJoinKeys {
    api: ApiClient,
}

impl RemoteJoinKeys {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl JoinKeyValidator for RemoteJoinKeys {
    async fn validate(&self, kind: JoinKeyKind, key: &str) -> KeyValidation {
        if is_blank(key) {
            return KeyValidation::Unknown;
        }

        match self.api.validate_join_key(kind, key).await {
            Ok(response) if response.valid => KeyValidation::Valid {
                owner_name: response.owner_name.unwrap_or_default(),
            },
            Ok(_) => KeyValidation::Invalid,
            Err(e) => {
                tracing::warn!(error = %e, kind = %kind, "join key lookup failed; treating key as invalid");
                KeyValidation::Invalid
            }
        }
    }
}
