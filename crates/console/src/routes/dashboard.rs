//! Dashboard page: headline figures across every domain.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tavola_core::dashboard::{DashboardOverview, dashboard_overview};
use tavola_core::demo;
use tavola_core::inventory::{LowStockAlert, low_stock_alerts};
use tracing::instrument;

use crate::error::AppError;
use crate::fallback::{Domain, Sourced, resolve};
use crate::filters;
use crate::middleware::RequireSession;
use crate::routes::{PageChrome, probe};
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: PageChrome,
    pub overview: DashboardOverview,
    pub alerts: Vec<LowStockAlert>,
}

/// Display the dashboard.
///
/// The four domains are resolved concurrently after a single probe. Pay runs
/// are only fetched for roles that may see payroll.
#[instrument(skip_all, fields(role = %required.session.role()))]
pub async fn index(
    State(state): State<AppState>,
    required: RequireSession,
) -> Result<DashboardTemplate, AppError> {
    let RequireSession { store, session } = required;
    let connectivity = probe(&state).await;
    let scope = session.scope();
    let token = session.token();
    let counters = state.fallbacks();
    let can_view_payroll = session.role().can_view_payroll();

    let (items, employees, expenses, pay_runs) = tokio::join!(
        resolve(
            counters,
            Domain::Inventory,
            connectivity,
            state.api().inventory_items(token, &scope),
            || demo::inventory_items().to_vec(),
        ),
        resolve(
            counters,
            Domain::Staff,
            connectivity,
            state.api().employees(token, &scope),
            || demo::employees().to_vec(),
        ),
        resolve(
            counters,
            Domain::Expenses,
            connectivity,
            state.api().expenses(token, &scope),
            || demo::expenses().to_vec(),
        ),
        async {
            if can_view_payroll {
                Some(
                    resolve(
                        counters,
                        Domain::Payroll,
                        connectivity,
                        state.api().pay_runs(token, &scope),
                        || demo::pay_runs().to_vec(),
                    )
                    .await,
                )
            } else {
                None
            }
        },
    );

    let demo_data = items.is_demo()
        || employees.is_demo()
        || expenses.is_demo()
        || pay_runs.as_ref().is_some_and(Sourced::is_demo);

    let overview = dashboard_overview(
        &items.data,
        &employees.data,
        pay_runs.as_ref().map_or(&[][..], |runs| runs.data.as_slice()),
        &expenses.data,
    )?;

    Ok(DashboardTemplate {
        chrome: PageChrome::page(&session, store.theme().await?, "/")
            .with_data(connectivity, demo_data),
        overview,
        alerts: low_stock_alerts(&items.data)?,
    })
}
