//! Scoped data endpoints.
//!
//! Each call sends the session's bearer token plus its `restaurant_key` (and
//! `manager_id`, when present) as query parameters, and expects a JSON array.
//! Rows whose amounts would overflow the page summaries are rejected here, so
//! they fall back like any other failed fetch.

use serde::de::DeserializeOwned;
use tavola_core::expenses::Expense;
use tavola_core::inventory::InventoryItem;
use tavola_core::payroll::PayRun;
use tavola_core::staff::Employee;
use tavola_core::{AccessToken, CheckedAmounts, DataScope};
use tracing::instrument;

use super::{ApiClient, FetchError, read_json};

impl ApiClient {
    async fn get_scoped<T: DeserializeOwned + CheckedAmounts>(
        &self,
        path: &str,
        token: &AccessToken,
        scope: &DataScope,
    ) -> Result<Vec<T>, FetchError> {
        let response = self
            .client()
            .get(self.endpoint(path)?)
            .timeout(self.timeout())
            .bearer_auth(token.expose())
            .query(scope)
            .send()
            .await?;

        let rows: Vec<T> = read_json(response).await?;
        T::check_amounts(&rows)?;
        Ok(rows)
    }

    /// `GET /inventory/items`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on any transport, status, decode or range failure.
    #[instrument(skip(self, token))]
    pub async fn inventory_items(
        &self,
        token: &AccessToken,
        scope: &DataScope,
    ) -> Result<Vec<InventoryItem>, FetchError> {
        self.get_scoped("inventory/items", token, scope).await
    }

    /// `GET /staff/employees`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on any transport, status, decode or range failure.
    #[instrument(skip(self, token))]
    pub async fn employees(
        &self,
        token: &AccessToken,
        scope: &DataScope,
    ) -> Result<Vec<Employee>, FetchError> {
        self.get_scoped("staff/employees", token, scope).await
    }

    /// `GET /payroll/runs`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on any transport, status, decode or range failure.
    #[instrument(skip(self, token))]
    pub async fn pay_runs(
        &self,
        token: &AccessToken,
        scope: &DataScope,
    ) -> Result<Vec<PayRun>, FetchError> {
        self.get_scoped("payroll/runs", token, scope).await
    }

    /// `GET /expenses`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on any transport, status, decode or range failure.
    #[instrument(skip(self, token))]
    pub async fn expenses(
        &self,
        token: &AccessToken,
        scope: &DataScope,
    ) -> Result<Vec<Expense>, FetchError> {
        self.get_scoped("expenses", token, scope).await
    }
}
