//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /ops/fallbacks          - Demo-fallback counters (JSON, signed in)
//!
//! # Auth
//! GET  /auth/login             - Login page (credentials or demo role)
//! POST /auth/login             - Credential login
//! POST /auth/demo              - Demo login for a role
//! POST /auth/logout            - Logout
//! GET  /auth/signup            - Staff signup page
//! POST /auth/signup            - Staff signup action
//! GET  /auth/join-key          - Live join-key check (HTML fragment)
//!
//! # Pages (require a session)
//! GET  /                       - Dashboard
//! GET  /inventory              - Stock, alerts, value by category
//! GET  /staff                  - Employees
//! GET  /payroll                - Pay runs (restaurant_admin, manager)
//! GET  /expenses               - Expenses by category
//!
//! # Preferences
//! POST /preferences/theme      - Switch light/dark theme
//! ```

pub mod auth;
pub mod dashboard;
pub mod expenses;
pub mod inventory;
pub mod ops;
pub mod payroll;
pub mod preferences;
pub mod staff;

use axum::{
    Router,
    routing::{get, post},
};
use tavola_core::{ConnectivityState, Role, Session, Theme};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/demo", post(auth::demo_login))
        .route("/logout", post(auth::logout))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/join-key", get(auth::join_key_check))
}

/// Create all console routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/inventory", get(inventory::index))
        .route("/staff", get(staff::index))
        .route("/payroll", get(payroll::index))
        .route("/expenses", get(expenses::index))
        .route("/preferences/theme", post(preferences::set_theme))
        .route("/ops/fallbacks", get(ops::fallbacks))
        .nest("/auth", auth_routes())
}

// =============================================================================
// Shared page chrome
// =============================================================================

/// The signed-in staff member as shown in the header.
#[derive(Debug, Clone)]
pub struct UserView {
    pub display_name: String,
    pub email: String,
    pub role_label: &'static str,
    pub restaurant_name: String,
    pub demo_session: bool,
}

impl From<&Session> for UserView {
    fn from(session: &Session) -> Self {
        let identity = session.identity();
        Self {
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            role_label: session.role().label(),
            restaurant_name: identity.restaurant_name.clone(),
            demo_session: session.is_demo(),
        }
    }
}

/// Header, navigation and banners shared by every page.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub theme: Theme,
    pub user: Option<UserView>,
    pub current_path: &'static str,
    /// Show the "Demo data" badge.
    pub demo_data: bool,
    /// Show the offline banner.
    pub offline: bool,
    pub can_view_payroll: bool,
}

impl PageChrome {
    /// Chrome for a signed-in page.
    #[must_use]
    pub fn page(session: &Session, theme: Theme, current_path: &'static str) -> Self {
        Self {
            theme,
            user: Some(UserView::from(session)),
            current_path,
            demo_data: false,
            offline: false,
            can_view_payroll: session.role().can_view_payroll(),
        }
    }

    /// Chrome for the login and signup pages.
    #[must_use]
    pub const fn public(theme: Theme, current_path: &'static str) -> Self {
        Self {
            theme,
            user: None,
            current_path,
            demo_data: false,
            offline: false,
            can_view_payroll: false,
        }
    }

    /// Record how the page's data was resolved.
    #[must_use]
    pub fn with_data(mut self, connectivity: ConnectivityState, demo_data: bool) -> Self {
        self.offline = connectivity == ConnectivityState::Offline;
        self.demo_data = demo_data;
        self
    }

    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.current_path == path
    }

    #[must_use]
    pub fn next_theme(&self) -> &'static str {
        self.theme.toggled().as_str()
    }
}

/// A role choice on the login and signup forms.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One option per role, with `selected` pre-checked.
#[must_use]
pub fn role_options(selected: Role) -> Vec<RoleOption> {
    Role::ALL
        .iter()
        .map(|role| RoleOption {
            value: role.as_str(),
            label: role.label(),
            selected: *role == selected,
        })
        .collect()
}

/// Probe the backend once for this page view.
pub async fn probe(state: &AppState) -> ConnectivityState {
    ConnectivityState::from_probe(state.prober().probe().await)
}
