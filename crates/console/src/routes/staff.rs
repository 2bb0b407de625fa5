//! Staff page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tavola_core::demo;
use tavola_core::staff::{Employee, StaffSummary, staff_summary};
use tracing::instrument;

use crate::error::AppError;
use crate::fallback::{Domain, resolve};
use crate::filters;
use crate::middleware::RequireSession;
use crate::routes::{PageChrome, probe};
use crate::state::AppState;

/// Staff page template.
#[derive(Template, WebTemplate)]
#[template(path = "staff/index.html")]
pub struct StaffTemplate {
    pub chrome: PageChrome,
    pub employees: Vec<Employee>,
    pub summary: StaffSummary,
}

#[instrument(skip_all, fields(role = %required.session.role()))]
pub async fn index(
    State(state): State<AppState>,
    required: RequireSession,
) -> Result<StaffTemplate, AppError> {
    let RequireSession { store, session } = required;
    let connectivity = probe(&state).await;

    let employees = resolve(
        state.fallbacks(),
        Domain::Staff,
        connectivity,
        state.api().employees(session.token(), &session.scope()),
        || demo::employees().to_vec(),
    )
    .await;

    let chrome = PageChrome::page(&session, store.theme().await?, "/staff")
        .with_data(connectivity, employees.is_demo());

    Ok(StaffTemplate {
        chrome,
        summary: staff_summary(&employees.data)?,
        employees: employees.data,
    })
}
