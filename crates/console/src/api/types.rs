//! Wire types for the operations API.

use serde::{Deserialize, Serialize};
use tavola_core::{JoinKeyKind, Role};

/// `GET /health` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `POST /auth/login` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `POST /auth/register` request body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_key: Option<&'a str>,
}

/// `POST /auth/join-keys/validate` request body.
#[derive(Debug, Serialize)]
pub struct JoinKeyCheck<'a> {
    pub kind: JoinKeyKind,
    pub key: &'a str,
}

/// `POST /auth/join-keys/validate` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinKeyCheckResponse {
    pub valid: bool,
    #[serde(default)]
    pub owner_name: Option<String>,
}

/// Error body. `detail` is either a message or a list of field errors.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(message) => Some(message),
            serde_json::Value::Array(errors) => {
                let messages: Vec<String> = errors
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(serde_json::Value::as_str))
                    .map(str::to_owned)
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert!(health.is_healthy());
        let degraded: HealthStatus = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!degraded.is_healthy());
    }

    #[test]
    fn test_register_request_omits_missing_key() {
        let body = serde_json::to_value(RegisterRequest {
            email: "nikos@example.com",
            password: "hunter22!",
            full_name: "Nikos P",
            role: Role::RestaurantAdmin,
            join_key: None,
        })
        .unwrap();
        assert_eq!(body["role"], "restaurant_admin");
        assert!(body.get("join_key").is_none());
    }

    #[test]
    fn test_validation_error_list_is_joined() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email"},{"msg":"field required"}]}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("value is not a valid email; field required")
        );
    }
}
