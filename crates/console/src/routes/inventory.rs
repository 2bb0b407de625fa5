//! Inventory page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tavola_core::demo;
use tavola_core::inventory::{InventoryItem, LowStockAlert, ValueSummary, low_stock_alerts, value_summary};
use tracing::instrument;

use crate::error::AppError;
use crate::fallback::{Domain, resolve};
use crate::filters;
use crate::middleware::RequireSession;
use crate::routes::{PageChrome, probe};
use crate::state::AppState;

/// Inventory page template.
#[derive(Template, WebTemplate)]
#[template(path = "inventory/index.html")]
pub struct InventoryTemplate {
    pub chrome: PageChrome,
    pub items: Vec<InventoryItem>,
    pub alerts: Vec<LowStockAlert>,
    pub summary: ValueSummary,
}

/// Display stock levels, low-stock alerts and value by category.
#[instrument(skip_all, fields(role = %required.session.role()))]
pub async fn index(
    State(state): State<AppState>,
    required: RequireSession,
) -> Result<InventoryTemplate, AppError> {
    let RequireSession { store, session } = required;
    let connectivity = probe(&state).await;

    let items = resolve(
        state.fallbacks(),
        Domain::Inventory,
        connectivity,
        state.api().inventory_items(session.token(), &session.scope()),
        || demo::inventory_items().to_vec(),
    )
    .await;

    let chrome = PageChrome::page(&session, store.theme().await?, "/inventory")
        .with_data(connectivity, items.is_demo());

    Ok(InventoryTemplate {
        chrome,
        alerts: low_stock_alerts(&items.data)?,
        summary: value_summary(&items.data)?,
        items: items.data,
    })
}
