//! Display preferences.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tavola_core::Theme;

use crate::error::AppError;
use crate::middleware::ConsoleSession;

/// Theme form data.
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: Theme,
    /// Page to return to.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Only local absolute paths are followed; anything else returns home.
///
/// Browsers treat `\` as `/` and drop tabs and newlines, so either could turn
/// `/x` into a protocol-relative `//host`.
fn safe_redirect(target: Option<&str>) -> &str {
    match target {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}

/// Persist the theme. Works signed in or out.
pub async fn set_theme(
    ConsoleSession(store): ConsoleSession,
    Form(form): Form<ThemeForm>,
) -> Result<Redirect, AppError> {
    store.set_theme(form.theme).await?;
    Ok(Redirect::to(safe_redirect(form.redirect.as_deref())))
}
