//! Join keys gate staff self-registration.
//!
//! A new manager joins a restaurant with the restaurant's key; a new POS user
//! joins a manager's team with the manager's key. [`StaticJoinKeys`] is the
//! local implementation backed by one fixed key per kind; the console wraps it
//! (and a remote lookup) behind an async validator trait.

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// Join key for the demo restaurant.
pub const DEMO_RESTAURANT_KEY: &str = "REST-MYK2026-ATHNS";
/// Owner name reported for [`DEMO_RESTAURANT_KEY`].
pub const DEMO_RESTAURANT_NAME: &str = "Mykonos Mediterranean";
/// Join key for the demo manager.
pub const DEMO_MANAGER_KEY: &str = "MGR-MYK2026-ELENA";
/// Owner name reported for [`DEMO_MANAGER_KEY`].
pub const DEMO_MANAGER_NAME: &str = "Elena Vasquez";

/// Which kind of key is being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKeyKind {
    Restaurant,
    Manager,
}

impl JoinKeyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Manager => "manager",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant key",
            Self::Manager => "Manager key",
        }
    }

    /// The key a signup for `role` must present, if any.
    #[must_use]
    pub const fn required_for(role: Role) -> Option<Self> {
        match role {
            Role::RestaurantAdmin => None,
            Role::Manager => Some(Self::Restaurant),
            Role::PosUser => Some(Self::Manager),
        }
    }
}

impl std::fmt::Display for JoinKeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JoinKeyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restaurant" => Ok(Self::Restaurant),
            "manager" => Ok(Self::Manager),
            _ => Err(format!("invalid join key kind: {s}")),
        }
    }
}

/// Tri-state result of checking a join key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeyValidation {
    /// Nothing entered yet; show neither an error nor a success.
    Unknown,
    Invalid,
    Valid { owner_name: String },
}

impl KeyValidation {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The owner the key belongs to, when valid.
    #[must_use]
    pub fn owner_name(&self) -> Option<&str> {
        match self {
            Self::Valid { owner_name } => Some(owner_name),
            Self::Unknown | Self::Invalid => None,
        }
    }
}

/// Whether a submitted key counts as "nothing entered".
#[must_use]
pub fn is_blank(key: &str) -> bool {
    key.trim().is_empty()
}

/// A single accepted key and the name it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    pub owner_name: String,
}

impl KeyEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            owner_name: owner_name.into(),
        }
    }
}

/// Local join-key table with exactly one valid key per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticJoinKeys {
    restaurant: KeyEntry,
    manager: KeyEntry,
}

impl Default for StaticJoinKeys {
    fn default() -> Self {
        Self {
            restaurant: KeyEntry::new(DEMO_RESTAURANT_KEY, DEMO_RESTAURANT_NAME),
            manager: KeyEntry::new(DEMO_MANAGER_KEY, DEMO_MANAGER_NAME),
        }
    }
}

impl StaticJoinKeys {
    #[must_use]
    pub const fn new(restaurant: KeyEntry, manager: KeyEntry) -> Self {
        Self {
            restaurant,
            manager,
        }
    }

    /// Check `key` by exact string match.
    ///
    /// Blank input is [`KeyValidation::Unknown`]; anything else that does not
    /// match byte-for-byte is [`KeyValidation::Invalid`].
    #[must_use]
    pub fn check(&self, kind: JoinKeyKind, key: &str) -> KeyValidation {
        if is_blank(key) {
            return KeyValidation::Unknown;
        }

        let entry = match kind {
            JoinKeyKind::Restaurant => &self.restaurant,
            JoinKeyKind::Manager => &self.manager,
        };

        if key == entry.key {
            KeyValidation::Valid {
                owner_name: entry.owner_name.clone(),
            }
        } else {
            KeyValidation::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_key_exact_match() {
        let keys = StaticJoinKeys::default();
        assert_eq!(
            keys.check(JoinKeyKind::Restaurant, "REST-MYK2026-ATHNS"),
            KeyValidation::Valid {
                owner_name: "Mykonos Mediterranean".to_owned()
            }
        );
    }

    #[test]
    fn test_non_matching_keys_are_invalid() {
        let keys = StaticJoinKeys::default();
        for key in [
            "rest-myk2026-athns",
            "REST-MYK2026-ATHNS ",
            "REST-MYK2026",
            "x",
            DEMO_MANAGER_KEY,
        ] {
            assert_eq!(
                keys.check(JoinKeyKind::Restaurant, key),
                KeyValidation::Invalid,
                "{key:?}"
            );
        }
    }

    #[test]
    fn test_blank_is_unknown() {
        let keys = StaticJoinKeys::default();
        assert_eq!(keys.check(JoinKeyKind::Restaurant, ""), KeyValidation::Unknown);
        assert_eq!(keys.check(JoinKeyKind::Manager, "   "), KeyValidation::Unknown);
    }

    #[test]
    fn test_manager_key() {
        let keys = StaticJoinKeys::default();
        let result = keys.check(JoinKeyKind::Manager, DEMO_MANAGER_KEY);
        assert!(result.is_valid());
        assert_eq!(result.owner_name(), Some("Elena Vasquez"));
    }

    #[test]
    fn test_required_key_per_role() {
        assert_eq!(JoinKeyKind::required_for(Role::RestaurantAdmin), None);
        assert_eq!(
            JoinKeyKind::required_for(Role::Manager),
            Some(JoinKeyKind::Restaurant)
        );
        assert_eq!(
            JoinKeyKind::required_for(Role::PosUser),
            Some(JoinKeyKind::Manager)
        );
    }

    #[test]
    fn test_custom_table() {
        let keys = StaticJoinKeys::new(
            KeyEntry::new("R-1", "Taverna Nikos"),
            KeyEntry::new("M-1", "Dimitra"),
        );
        assert_eq!(keys.check(JoinKeyKind::Manager, "M-1").owner_name(), Some("Dimitra"));
        assert_eq!(
            keys.check(JoinKeyKind::Restaurant, DEMO_RESTAURANT_KEY),
            KeyValidation::Invalid
        );
    }
}
