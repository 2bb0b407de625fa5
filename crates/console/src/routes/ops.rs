//! Operator endpoints.

use axum::{Json, extract::State};
use serde::Serialize;
use tavola_core::ConnectivityState;

use crate::fallback::FallbackReport;
use crate::middleware::RequireSession;
use crate::state::AppState;

/// `GET /ops/fallbacks` body.
#[derive(Debug, Serialize)]
pub struct FallbacksResponse {
    /// Outcome of the most recent page probe; not a fresh probe.
    pub connectivity: ConnectivityState,
    #[serde(flatten)]
    pub fallbacks: FallbackReport,
}

/// Demo-fallback counters since startup. Signed-in callers only; anonymous
/// callers are sent to the login page like every other console page.
pub async fn fallbacks(
    State(state): State<AppState>,
    _required: RequireSession,
) -> Json<FallbacksResponse> {
    Json(FallbacksResponse {
        connectivity: state.prober().last_state(),
        fallbacks: state.fallbacks().report(),
    })
}
