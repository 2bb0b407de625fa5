//! Staff roles and display preferences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a stored or submitted role string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// The role a session acts under.
///
/// The string form (`restaurant_admin`, `manager`, `pos_user`) is what gets
/// persisted under the `role` storage key and sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Owns the restaurant account; sees everything.
    RestaurantAdmin,
    /// Runs a team; sees payroll and staff for their restaurant.
    Manager,
    /// Front-of-house terminal user; operational pages only.
    PosUser,
}

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Self; 3] = [Self::RestaurantAdmin, Self::Manager, Self::PosUser];

    /// Storage/wire form of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RestaurantAdmin => "restaurant_admin",
            Self::Manager => "manager",
            Self::PosUser => "pos_user",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RestaurantAdmin => "Restaurant Admin",
            Self::Manager => "Manager",
            Self::PosUser => "POS User",
        }
    }

    /// Whether the role may open payroll figures.
    #[must_use]
    pub const fn can_view_payroll(self) -> bool {
        matches!(self, Self::RestaurantAdmin | Self::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restaurant_admin" => Ok(Self::RestaurantAdmin),
            "manager" => Ok(Self::Manager),
            "pos_user" => Ok(Self::PosUser),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

/// UI color scheme, persisted under the `theme` storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("invalid theme: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_forms_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!(
            "owner".parse::<Role>(),
            Err(RoleParseError("owner".to_string()))
        );
        assert!("Manager".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_payroll_visibility() {
        assert!(Role::RestaurantAdmin.can_view_payroll());
        assert!(Role::Manager.can_view_payroll());
        assert!(!Role::PosUser.can_view_payroll());
    }

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
