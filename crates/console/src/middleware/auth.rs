//! Session extractors.
//!
//! Each request restores its own [`SessionStore`] over the request's cookie
//! session. Handlers pick the extractor matching the access they need:
//!
//! - [`ConsoleSession`] - restored store, possibly anonymous
//! - [`RequireSession`] - any authenticated role, else redirect to login
//! - [`RequirePayrollAccess`] - `restaurant_admin` or `manager`, else 403

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tavola_core::Session;

use crate::error::{AppError, set_sentry_user};
use crate::session::SessionStore;
use crate::state::AppState;

/// Session store restored for this request.
pub struct ConsoleSession(pub SessionStore<tower_sessions::Session>);

/// Why a session extractor refused the request.
#[derive(Debug)]
pub enum SessionRejection {
    /// No session; send the browser to the login page.
    RedirectToLogin,
    /// Authenticated but the role may not open the page.
    Forbidden,
    /// The session layer is missing or storage failed.
    Error(AppError),
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Payroll is limited to restaurant admins and managers",
            )
                .into_response(),
            Self::Error(e) => e.into_response(),
        }
    }
}

impl FromRequestParts<AppState> for ConsoleSession {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<tower_sessions::Session>()
            .cloned()
            .ok_or_else(|| {
                SessionRejection::Error(AppError::Internal(
                    "session layer not installed".to_string(),
                ))
            })?;

        let store = SessionStore::restore(session, state.unknown_role_policy())
            .await
            .map_err(|e| SessionRejection::Error(e.into()))?;

        if let Some(current) = store.current() {
            set_sentry_user(&current.identity().email, current.role().as_str());
        }

        Ok(Self(store))
    }
}

/// An authenticated session of any role.
pub struct RequireSession {
    pub store: SessionStore<tower_sessions::Session>,
    pub session: Session,
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ConsoleSession(store) = ConsoleSession::from_request_parts(parts, state).await?;
        let session = store
            .current()
            .cloned()
            .ok_or(SessionRejection::RedirectToLogin)?;
        Ok(Self { store, session })
    }
}

/// An authenticated session whose role may view payroll.
pub struct RequirePayrollAccess(pub RequireSession);

impl FromRequestParts<AppState> for RequirePayrollAccess {
    type Rejection = SessionRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let required = RequireSession::from_request_parts(parts, state).await?;
        if !required.session.role().can_view_payroll() {
            tracing::info!(role = %required.session.role(), "payroll access denied");
            return Err(SessionRejection::Forbidden);
        }
        Ok(Self(required))
    }
}
