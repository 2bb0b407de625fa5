//! Session identity and the rules for restoring it from persisted storage.
//!
//! This module only decides *what* a session looks like. Reading and writing
//! the persisted keys is the console's job (see `tavola_console::session`).
//!
//! Invariant: a [`Session`] always carries both a token and a role, so
//! "token present ⇔ authenticated" and "token ⇒ role" hold by construction.
//! An unauthenticated state is simply the absence of a `Session`.

use serde::{Deserialize, Serialize};

use crate::join_key::{DEMO_MANAGER_KEY, DEMO_RESTAURANT_KEY, DEMO_RESTAURANT_NAME};
use crate::types::{Email, Role};

/// Storage keys shared by every persisted-storage backend.
pub mod keys {
    /// Opaque access token.
    pub const TOKEN: &str = "token";
    /// Role string (`restaurant_admin`, `manager`, `pos_user`).
    pub const ROLE: &str = "role";
    /// Display identity as JSON.
    pub const PROFILE: &str = "profile";
    /// UI theme (`light`, `dark`).
    pub const THEME: &str = "theme";
}

/// Prefix of tokens minted by demo login.
pub const DEMO_TOKEN_PREFIX: &str = "demo-token-";

/// Opaque bearer token issued by the auth backend or minted for demo mode.
///
/// `Debug` is redacted so tokens never land in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The deterministic demo token for a role: `demo-token-<role>`.
    #[must_use]
    pub fn demo(role: Role) -> Self {
        Self(format!("{DEMO_TOKEN_PREFIX}{role}"))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0.starts_with(DEMO_TOKEN_PREFIX)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Display profile of the acting staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub display_name: String,
    pub email: String,
    pub restaurant_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// The fixed demo identity for a role.
///
/// Used verbatim by demo login, and as the default profile when a persisted
/// session has no (or an unreadable) profile.
#[must_use]
pub fn demo_identity(role: Role) -> Identity {
    match role {
        Role::RestaurantAdmin => Identity {
            display_name: "Nikos Papadopoulos".to_owned(),
            email: "nikos@mykonos-mediterranean.com".to_owned(),
            restaurant_name: DEMO_RESTAURANT_NAME.to_owned(),
            restaurant_key: Some(DEMO_RESTAURANT_KEY.to_owned()),
            manager_id: None,
        },
        Role::Manager => Identity {
            display_name: "Elena Vasquez".to_owned(),
            email: "elena@mykonos-mediterranean.com".to_owned(),
            restaurant_name: DEMO_RESTAURANT_NAME.to_owned(),
            restaurant_key: Some(DEMO_RESTAURANT_KEY.to_owned()),
            manager_id: Some(DEMO_MANAGER_KEY.to_owned()),
        },
        Role::PosUser => Identity {
            display_name: "Marco Rossi".to_owned(),
            email: "marco@mykonos-mediterranean.com".to_owned(),
            restaurant_name: DEMO_RESTAURANT_NAME.to_owned(),
            restaurant_key: Some(DEMO_RESTAURANT_KEY.to_owned()),
            manager_id: Some(DEMO_MANAGER_KEY.to_owned()),
        },
    }
}

/// Identifiers a page sends to the backend to scope its queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    role: Role,
    token: AccessToken,
    identity: Identity,
}

impl Session {
    #[must_use]
    pub const fn new(role: Role, token: AccessToken, identity: Identity) -> Self {
        Self {
            role,
            token,
            identity,
        }
    }

    /// A demo session: token `demo-token-<role>` with the role's demo identity.
    #[must_use]
    pub fn demo(role: Role) -> Self {
        Self::new(role, AccessToken::demo(role), demo_identity(role))
    }

    /// A session for a real login.
    ///
    /// The backend returns only a token, so the name comes from the email and
    /// the restaurant fields from the role's demo defaults.
    #[must_use]
    pub fn for_login(role: Role, token: AccessToken, email: &Email) -> Self {
        let identity = Identity {
            display_name: email.display_name(),
            email: email.to_string(),
            ..demo_identity(role)
        };
        Self::new(role, token, identity)
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.token.is_demo()
    }

    #[must_use]
    pub fn scope(&self) -> DataScope {
        DataScope {
            restaurant_key: self.identity.restaurant_key.clone(),
            manager_id: self.identity.manager_id.clone(),
        }
    }
}

/// What to do when a persisted token is found next to a missing or
/// unrecognized role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownRolePolicy {
    /// Treat the session as `restaurant_admin`.
    #[default]
    DefaultToAdmin,
    /// Drop the session and require a fresh login.
    RequireReauth,
}

impl std::str::FromStr for UnknownRolePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::DefaultToAdmin),
            "reauth" => Ok(Self::RequireReauth),
            _ => Err(format!("expected 'admin' or 'reauth', got '{s}'")),
        }
    }
}

/// Raw values read back from persisted storage.
#[derive(Debug, Clone, Default)]
pub struct PersistedSession {
    pub token: Option<String>,
    pub role: Option<String>,
    pub profile: Option<String>,
}

/// Outcome of restoring a persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restored {
    /// No token was persisted.
    Anonymous,
    /// Token and a valid role were found.
    Session(Session),
    /// Token found but the role was missing or unrecognized; the admin
    /// fallback was applied.
    RoleDefaulted {
        session: Session,
        found: Option<String>,
    },
    /// Token found but the role was missing or unrecognized and the policy
    /// requires re-authentication.
    Rejected { found: Option<String> },
}

impl Restored {
    /// The resulting session, if any.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        match self {
            Self::Session(session) | Self::RoleDefaulted { session, .. } => Some(session),
            Self::Anonymous | Self::Rejected { .. } => None,
        }
    }
}

impl PersistedSession {
    /// Rebuild a session from persisted values.
    ///
    /// An empty token counts as no token. A missing or unparseable profile
    /// falls back to the demo identity for the resolved role.
    #[must_use]
    pub fn restore(self, policy: UnknownRolePolicy) -> Restored {
        let Some(token) = self.token.filter(|t| !t.is_empty()) else {
            return Restored::Anonymous;
        };

        let parsed = self.role.as_deref().and_then(|r| r.parse::<Role>().ok());
        let (role, defaulted) = match (parsed, policy) {
            (Some(role), _) => (role, false),
            (None, UnknownRolePolicy::DefaultToAdmin) => (Role::RestaurantAdmin, true),
            (None, UnknownRolePolicy::RequireReauth) => {
                return Restored::Rejected { found: self.role };
            }
        };

        let identity = self
            .profile
            .as_deref()
            .and_then(|p| serde_json::from_str::<Identity>(p).ok())
            .unwrap_or_else(|| demo_identity(role));

        let session = Session::new(role, AccessToken::new(token), identity);
        if defaulted {
            Restored::RoleDefaulted {
                session,
                found: self.role,
            }
        } else {
            Restored::Session(session)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn persisted(token: Option<&str>, role: Option<&str>) -> PersistedSession {
        PersistedSession {
            token: token.map(str::to_owned),
            role: role.map(str::to_owned),
            profile: None,
        }
    }

    #[test]
    fn test_demo_session_for_every_role() {
        for role in Role::ALL {
            let session = Session::demo(role);
            assert_eq!(session.role(), role);
            assert_eq!(session.token().expose(), format!("demo-token-{role}"));
            assert_eq!(session.identity(), &demo_identity(role));
            assert!(session.is_demo());
        }
    }

    #[test]
    fn test_demo_table_scopes() {
        let admin = demo_identity(Role::RestaurantAdmin);
        assert_eq!(admin.restaurant_name, "Mykonos Mediterranean");
        assert_eq!(admin.restaurant_key.as_deref(), Some("REST-MYK2026-ATHNS"));
        assert!(admin.manager_id.is_none());

        let manager = demo_identity(Role::Manager);
        assert_eq!(manager.manager_id.as_deref(), Some(DEMO_MANAGER_KEY));
    }

    #[test]
    fn test_login_session_synthesizes_identity() {
        let email = Email::parse("sofia.karras@mykonos.gr").unwrap();
        let session = Session::for_login(Role::Manager, AccessToken::new("jwt-abc"), &email);

        assert_eq!(session.identity().display_name, "Sofia Karras");
        assert_eq!(session.identity().email, "sofia.karras@mykonos.gr");
        assert_eq!(session.identity().restaurant_name, "Mykonos Mediterranean");
        assert!(!session.is_demo());
        assert_eq!(
            session.scope(),
            DataScope {
                restaurant_key: Some(DEMO_RESTAURANT_KEY.to_owned()),
                manager_id: Some(DEMO_MANAGER_KEY.to_owned()),
            }
        );
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret-jwt");
        assert!(!format!("{token:?}").contains("super-secret-jwt"));
    }

    #[test]
    fn test_restore_without_token_is_anonymous() {
        assert_eq!(
            persisted(None, Some("manager")).restore(UnknownRolePolicy::default()),
            Restored::Anonymous
        );
        assert_eq!(
            persisted(Some(""), Some("manager")).restore(UnknownRolePolicy::default()),
            Restored::Anonymous
        );
    }

    #[test]
    fn test_restore_with_valid_role() {
        let restored = persisted(Some("jwt"), Some("pos_user")).restore(UnknownRolePolicy::default());
        let session = restored.into_session().unwrap();
        assert_eq!(session.role(), Role::PosUser);
        assert_eq!(session.identity(), &demo_identity(Role::PosUser));
    }

    #[test]
    fn test_restore_unknown_role_defaults_to_admin() {
        for bad in [Some("owner"), Some(""), None] {
            let restored = persisted(Some("jwt"), bad).restore(UnknownRolePolicy::DefaultToAdmin);
            assert!(matches!(restored, Restored::RoleDefaulted { .. }));
            assert_eq!(
                restored.into_session().unwrap().role(),
                Role::RestaurantAdmin
            );
        }
    }

    #[test]
    fn test_restore_unknown_role_reauth_policy() {
        let restored = persisted(Some("jwt"), Some("owner")).restore(UnknownRolePolicy::RequireReauth);
        assert_eq!(
            restored,
            Restored::Rejected {
                found: Some("owner".to_owned())
            }
        );
    }

    #[test]
    fn test_restore_uses_persisted_profile() {
        let profile = Identity {
            display_name: "Sofia Karras".to_owned(),
            email: "sofia@mykonos.gr".to_owned(),
            restaurant_name: "Mykonos Mediterranean".to_owned(),
            restaurant_key: None,
            manager_id: Some("MGR-1".to_owned()),
        };
        let restored = PersistedSession {
            token: Some("jwt".to_owned()),
            role: Some("manager".to_owned()),
            profile: Some(serde_json::to_string(&profile).unwrap()),
        }
        .restore(UnknownRolePolicy::default());

        assert_eq!(restored.into_session().unwrap().identity(), &profile);
    }

    #[test]
    fn test_restore_corrupt_profile_uses_demo_defaults() {
        let restored = PersistedSession {
            token: Some("jwt".to_owned()),
            role: Some("manager".to_owned()),
            profile: Some("{not json".to_owned()),
        }
        .restore(UnknownRolePolicy::default());

        assert_eq!(
            restored.into_session().unwrap().identity(),
            &demo_identity(Role::Manager)
        );
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "reauth".parse::<UnknownRolePolicy>().unwrap(),
            UnknownRolePolicy::RequireReauth
        );
        assert!("maybe".parse::<UnknownRolePolicy>().is_err());
    }
}
