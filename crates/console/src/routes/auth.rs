//! Authentication route handlers.
//!
//! Credential login goes through the auth backend; demo login picks a role and
//! never touches the network. Signup is gated on join keys.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tavola_core::{Email, JoinKeyKind, KeyValidation, Role};

use crate::error::AppError;
use crate::middleware::ConsoleSession;
use crate::routes::{PageChrome, RoleOption, role_options};
use crate::services::{AuthError, SignupError, SignupRequest, sign_up};
use crate::session::{SessionError, StorageError};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

const fn default_role() -> Role {
    Role::RestaurantAdmin
}

const fn default_signup_role() -> Role {
    Role::Manager
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// The backend does not report a role, so staff pick one.
    #[serde(default = "default_role")]
    pub role: Role,
}

/// Demo login form data.
#[derive(Debug, Deserialize)]
pub struct DemoForm {
    pub role: Role,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default = "default_signup_role")]
    pub role: Role,
    #[serde(default)]
    pub join_key: Option<String>,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the login page after a signup.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub registered: Option<String>,
    pub joined: Option<String>,
}

/// Query parameters for the live join-key check.
///
/// The signup form sends its `role` and `join_key` fields; other callers
/// name the `kind` and `key` directly.
#[derive(Debug, Default, Deserialize)]
pub struct JoinKeyQuery {
    pub kind: Option<JoinKeyKind>,
    pub role: Option<Role>,
    #[serde(default, alias = "join_key")]
    pub key: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub chrome: PageChrome,
    pub error: Option<String>,
    pub success: Option<String>,
    pub email: String,
    pub roles: Vec<RoleOption>,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub chrome: PageChrome,
    pub error: Option<String>,
    pub full_name: String,
    pub email: String,
    pub join_key: String,
    pub roles: Vec<RoleOption>,
}

/// Join-key status fragment.
#[derive(Template, WebTemplate)]
#[template(path = "auth/_join_key.html")]
pub struct JoinKeyFragment {
    /// `unknown`, `invalid` or `valid`; used as a CSS modifier.
    pub status: &'static str,
    pub message: String,
}

impl JoinKeyFragment {
    fn new(kind: Option<JoinKeyKind>, validation: &KeyValidation) -> Self {
        match (kind, validation) {
            (None, _) => Self {
                status: "unknown",
                message: "Restaurant admins do not need a join key".to_string(),
            },
            (Some(_), KeyValidation::Unknown) => Self {
                status: "unknown",
                message: String::new(),
            },
            (Some(kind), KeyValidation::Invalid) => Self {
                status: "invalid",
                message: format!("{} is not valid", kind.label()),
            },
            (Some(_), KeyValidation::Valid { owner_name }) => Self {
                status: "valid",
                message: format!("Joining {owner_name}"),
            },
        }
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    ConsoleSession(store): ConsoleSession,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    if store.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let success = query.registered.map(|_| match query.joined {
        Some(owner) if !owner.is_empty() => {
            format!("Account created. You joined {owner}; log in to continue.")
        }
        _ => "Account created. Log in to continue.".to_string(),
    });

    Ok(LoginTemplate {
        chrome: PageChrome::public(store.theme().await?, "/auth/login"),
        error: None,
        success,
        email: String::new(),
        roles: role_options(default_role()),
    }
    .into_response())
}

/// Handle credential login.
pub async fn login(
    State(state): State<AppState>,
    ConsoleSession(mut store): ConsoleSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let theme = store.theme().await?;
    let render = |status: StatusCode, message: String| {
        (
            status,
            LoginTemplate {
                chrome: PageChrome::public(theme, "/auth/login"),
                error: Some(message),
                success: None,
                email: form.email.clone(),
                roles: role_options(form.role),
            },
        )
            .into_response()
    };

    let Ok(email) = Email::parse(&form.email) else {
        return Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Enter a valid email address".to_string(),
        ));
    };
    let password = SecretString::from(form.password.clone());

    let outcome = store
        .login(state.auth(), &email, &password, form.role)
        .await
        .map(|_| ());
    match outcome {
        Ok(()) => {
            store
                .storage()
                .cycle_id()
                .await
                .map_err(StorageError::from)?;
            Ok(Redirect::to("/").into_response())
        }
        Err(SessionError::Auth(e)) => {
            tracing::warn!(email = %email, error = %e, "login failed");
            let status = match e {
                AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::UNAUTHORIZED,
            };
            Ok(render(status, e.user_message()))
        }
        Err(SessionError::Storage(e)) => Err(e.into()),
    }
}

/// Start a demo session for the chosen role.
pub async fn demo_login(
    ConsoleSession(mut store): ConsoleSession,
    Form(form): Form<DemoForm>,
) -> Result<Redirect, AppError> {
    store.demo_login(form.role).await?;
    store
        .storage()
        .cycle_id()
        .await
        .map_err(StorageError::from)?;
    Ok(Redirect::to("/"))
}

/// Handle logout. The theme preference is kept.
pub async fn logout(ConsoleSession(mut store): ConsoleSession) -> Result<Redirect, AppError> {
    store.logout().await?;
    Ok(Redirect::to("/auth/login"))
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(ConsoleSession(store): ConsoleSession) -> Result<Response, AppError> {
    Ok(SignupTemplate {
        chrome: PageChrome::public(store.theme().await?, "/auth/signup"),
        error: None,
        full_name: String::new(),
        email: String::new(),
        join_key: String::new(),
        roles: role_options(default_signup_role()),
    }
    .into_response())
}

/// Handle signup form submission.
pub async fn signup(
    State(state): State<AppState>,
    ConsoleSession(store): ConsoleSession,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let theme = store.theme().await?;
    let request = SignupRequest {
        full_name: form.full_name.clone(),
        email: form.email.clone(),
        password: SecretString::from(form.password),
        password_confirm: SecretString::from(form.password_confirm),
        role: form.role,
        join_key: form.join_key.clone(),
    };

    match sign_up(state.join_keys(), state.auth(), request).await {
        Ok(signed_up) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("registered", signed_up.email.as_str())
                .append_pair("joined", signed_up.joined.as_deref().unwrap_or_default())
                .finish();
            Ok(Redirect::to(&format!("/auth/login?{query}")).into_response())
        }
        Err(e) => {
            let status = match &e {
                SignupError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SignupError::Auth(AuthError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
                SignupError::Auth(_) => StatusCode::BAD_REQUEST,
            };
            tracing::info!(error = %e, role = %form.role, "signup refused");
            Ok((
                status,
                SignupTemplate {
                    chrome: PageChrome::public(theme, "/auth/signup"),
                    error: Some(e.user_message()),
                    full_name: form.full_name,
                    email: form.email,
                    join_key: form.join_key.unwrap_or_default(),
                    roles: role_options(form.role),
                },
            )
                .into_response())
        }
    }
}

/// Live join-key check for the signup form.
pub async fn join_key_check(
    State(state): State<AppState>,
    Query(query): Query<JoinKeyQuery>,
) -> JoinKeyFragment {
    let kind = query
        .kind
        .or_else(|| JoinKeyKind::required_for(query.role.unwrap_or_else(default_signup_role)));
    let validation = match kind {
        Some(kind) => state.join_keys().validate(kind, &query.key).await,
        None => KeyValidation::Unknown,
    };
    JoinKeyFragment::new(kind, &validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_states() {
        let unknown = JoinKeyFragment::new(Some(JoinKeyKind::Manager), &KeyValidation::Unknown);
        assert_eq!(unknown.status, "unknown");
        assert!(unknown.message.is_empty());

        let invalid = JoinKeyFragment::new(Some(JoinKeyKind::Restaurant), &KeyValidation::Invalid);
        assert_eq!(invalid.message, "Restaurant key is not valid");

        let valid = JoinKeyFragment::new(
            Some(JoinKeyKind::Restaurant),
            &KeyValidation::Valid {
                owner_name: "Mykonos Mediterranean".to_string(),
            },
        );
        assert_eq!(valid.status, "valid");
        assert_eq!(valid.message, "Joining Mykonos Mediterranean");
    }

    #[test]
    fn test_fragment_renders() {
        let html = JoinKeyFragment::new(Some(JoinKeyKind::Manager), &KeyValidation::Invalid)
            .render()
            .unwrap_or_default();
        assert!(html.contains("join-key--invalid"));
        assert!(html.contains("Manager key is not valid"));
    }
}
