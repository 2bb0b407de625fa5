//! Live-or-demo data resolution.
//!
//! Every data page funnels through [`resolve`]: one decision point that either
//! uses the live fetch or substitutes the domain's demo dataset, and counts
//! each substitution so operators can see how often pages run on demo data
//! (`GET /ops/fallbacks`).

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tavola_core::{ConnectivityState, DataSource};

use crate::api::FetchError;

/// Data families with their own demo dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Inventory,
    Staff,
    Payroll,
    Expenses,
}

impl Domain {
    pub const ALL: [Self; 4] = [Self::Inventory, Self::Staff, Self::Payroll, Self::Expenses];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Staff => "staff",
            Self::Payroll => "payroll",
            Self::Expenses => "expenses",
        }
    }
}

/// Data tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    #[must_use]
    pub const fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    #[must_use]
    pub const fn demo(data: T) -> Self {
        Self {
            data,
            source: DataSource::Demo,
        }
    }

    #[must_use]
    pub const fn is_demo(&self) -> bool {
        self.source.is_demo()
    }
}

#[derive(Debug, Default)]
struct DomainCounters {
    offline: AtomicU64,
    failed: AtomicU64,
}

/// How often each domain fell back to demo data since startup.
#[derive(Debug, Default)]
pub struct FallbackCounters {
    inventory: DomainCounters,
    staff: DomainCounters,
    payroll: DomainCounters,
    expenses: DomainCounters,
}

/// Snapshot of one domain's counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainFallbacks {
    pub domain: Domain,
    /// Fetch skipped because the probe reported the backend offline.
    pub offline: u64,
    /// Fetch attempted and failed.
    pub failed: u64,
}

/// Snapshot served by `GET /ops/fallbacks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackReport {
    pub total: u64,
    pub domains: Vec<DomainFallbacks>,
}

impl FallbackCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    const fn counters(&self, domain: Domain) -> &DomainCounters {
        match domain {
            Domain::Inventory => &self.inventory,
            Domain::Staff => &self.staff,
            Domain::Payroll => &self.payroll,
            Domain::Expenses => &self.expenses,
        }
    }

    fn record_offline(&self, domain: Domain) {
        self.counters(domain).offline.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self, domain: Domain) {
        self.counters(domain).failed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self, domain: Domain) -> DomainFallbacks {
        let counters = self.counters(domain);
        DomainFallbacks {
            domain,
            offline: counters.offline.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
        }
    }

    #[must_use]
    pub fn report(&self) -> FallbackReport {
        let domains: Vec<DomainFallbacks> =
            Domain::ALL.iter().map(|d| self.snapshot(*d)).collect();
        FallbackReport {
            total: domains.iter().map(|d| d.offline + d.failed).sum(),
            domains,
        }
    }
}

/// Pick live or demo data for one domain.
///
/// - Offline: `fetch` is dropped without being polled, so no request is sent.
/// - Online or not yet probed: `fetch` runs; on error the demo dataset is used
///   and the error is logged.
///
/// Either fallback increments the domain's counter.
pub async fn resolve<T, F, D>(
    counters: &FallbackCounters,
    domain: Domain,
    connectivity: ConnectivityState,
    fetch: F,
    demo: D,
) -> Sourced<T>
where
    F: Future<Output = Result<T, FetchError>>,
    D: FnOnce() -> T,
{
    if connectivity == ConnectivityState::Offline {
        counters.record_offline(domain);
        tracing::debug!(domain = domain.as_str(), "backend offline; using demo data");
        return Sourced::demo(demo());
    }

    match fetch.await {
        Ok(data) => Sourced::live(data),
        Err(e) => {
            counters.record_failure(domain);
            tracing::warn!(
                domain = domain.as_str(),
                error = %e,
                "live fetch failed; using demo data"
            );
            Sourced::demo(demo())
        }
    }
}
