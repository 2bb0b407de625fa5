//! Payroll page. Restricted to restaurant admins and managers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tavola_core::demo;
use tavola_core::payroll::{PayRun, PayrollSummary, payroll_summary};
use tracing::instrument;

use crate::error::AppError;
use crate::fallback::{Domain, resolve};
use crate::filters;
use crate::middleware::{RequirePayrollAccess, RequireSession};
use crate::routes::{PageChrome, probe};
use crate::state::AppState;

/// Payroll page template.
#[derive(Template, WebTemplate)]
#[template(path = "payroll/index.html")]
pub struct PayrollTemplate {
    pub chrome: PageChrome,
    pub runs: Vec<PayRun>,
    pub summary: PayrollSummary,
}

#[instrument(skip_all, fields(role = %access.0.session.role()))]
pub async fn index(
    State(state): State<AppState>,
    access: RequirePayrollAccess,
) -> Result<PayrollTemplate, AppError> {
    let RequirePayrollAccess(RequireSession { store, session }) = access;
    let connectivity = probe(&state).await;

    let runs = resolve(
        state.fallbacks(),
        Domain::Payroll,
        connectivity,
        state.api().pay_runs(session.token(), &session.scope()),
        || demo::pay_runs().to_vec(),
    )
    .await;

    let chrome = PageChrome::page(&session, store.theme().await?, "/payroll")
        .with_data(connectivity, runs.is_demo());

    Ok(PayrollTemplate {
        chrome,
        summary: payroll_summary(&runs.data)?,
        runs: runs.data,
    })
}
