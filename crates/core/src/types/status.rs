//! Status enums for staff and payroll records.

use serde::{Deserialize, Serialize};

/// Employment status of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    #[default]
    Active,
    OnLeave,
    Terminated,
}

impl EmploymentStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On leave",
            Self::Terminated => "Terminated",
        }
    }
}

/// Lifecycle of a pay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayRunStatus {
    #[default]
    Draft,
    Processing,
    Paid,
}

impl PayRunStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Processing => "Processing",
            Self::Paid => "Paid",
        }
    }
}

/// Health of the connection to the operations backend as seen by one page view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    /// No probe has completed yet.
    #[default]
    Unknown,
    Online,
    Offline,
}

impl ConnectivityState {
    #[must_use]
    pub const fn from_probe(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }

    #[must_use]
    pub const fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }
}

/// Where a page's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
}

impl DataSource {
    #[must_use]
    pub const fn is_demo(self) -> bool {
        matches!(self, Self::Demo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_from_probe() {
        assert_eq!(ConnectivityState::default(), ConnectivityState::Unknown);
        assert!(ConnectivityState::from_probe(true).is_online());
        assert_eq!(
            ConnectivityState::from_probe(false),
            ConnectivityState::Offline
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::OnLeave).ok().as_deref(),
            Some("\"on_leave\"")
        );
        assert_eq!(
            serde_json::from_str::<PayRunStatus>("\"processing\"").ok(),
            Some(PayRunStatus::Processing)
        );
    }
}
