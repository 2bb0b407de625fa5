//! Expenses page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tavola_core::demo;
use tavola_core::expenses::{Expense, ExpenseSummary, expense_summary};
use tracing::instrument;

use crate::error::AppError;
use crate::fallback::{Domain, resolve};
use crate::filters;
use crate::middleware::RequireSession;
use crate::routes::{PageChrome, probe};
use crate::state::AppState;

/// Expenses page template.
#[derive(Template, WebTemplate)]
#[template(path = "expenses/index.html")]
pub struct ExpensesTemplate {
    pub chrome: PageChrome,
    pub expenses: Vec<Expense>,
    pub summary: ExpenseSummary,
}

#[instrument(skip_all, fields(role = %required.session.role()))]
pub async fn index(
    State(state): State<AppState>,
    required: RequireSession,
) -> Result<ExpensesTemplate, AppError> {
    let RequireSession { store, session } = required;
    let connectivity = probe(&state).await;

    let expenses = resolve(
        state.fallbacks(),
        Domain::Expenses,
        connectivity,
        state.api().expenses(session.token(), &session.scope()),
        || demo::expenses().to_vec(),
    )
    .await;

    let chrome = PageChrome::page(&session, store.theme().await?, "/expenses")
        .with_data(connectivity, expenses.is_demo());

    Ok(ExpensesTemplate {
        chrome,
        summary: expense_summary(&expenses.data)?,
        expenses: expenses.data,
    })
}
