//! Join-key checks.
//!
//! # Usage
//!
//! ```bash
//! # Against the built-in key table
//! tavola check-key restaurant REST-MYK2026-ATHNS
//!
//! # Against the operations API
//! tavola check-key manager MGR-MYK2026-ELENA --remote
//! ```

use tavola_console::services::{JoinKeyValidator, RemoteJoinKeys};
use tavola_core::{JoinKeyKind, KeyValidation, StaticJoinKeys};

use super::{CliError, Context};

/// Validate `key` and print the outcome.
///
/// An invalid key is reported, not treated as a command failure.
///
/// # Errors
///
/// Never fails today; the signature matches the other commands.
pub async fn check(
    ctx: &Context,
    kind: JoinKeyKind,
    key: &str,
    remote: bool,
) -> Result<(), CliError> {
    let validator: Box<dyn JoinKeyValidator> = if remote {
        Box::new(RemoteJoinKeys::new(ctx.api().clone()))
    } else {
        Box::new(StaticJoinKeys::default())
    };

    let outcome = validator.validate(kind, key).await;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", describe(kind, &outcome));
    }
    Ok(())
}

fn describe(kind: JoinKeyKind, outcome: &KeyValidation) -> String {
    match outcome {
        KeyValidation::Unknown => format!("{}: no key entered", kind.label()),
        KeyValidation::Invalid => format!("{}: invalid", kind.label()),
        KeyValidation::Valid { owner_name } => {
            format!("{}: valid ({owner_name})", kind.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(JoinKeyKind::Restaurant, &KeyValidation::Unknown),
            "Restaurant key: no key entered"
        );
        assert_eq!(
            describe(JoinKeyKind::Manager, &KeyValidation::Invalid),
            "Manager key: invalid"
        );
        assert_eq!(
            describe(
                JoinKeyKind::Restaurant,
                &KeyValidation::Valid {
                    owner_name: "Mykonos Mediterranean".to_owned()
                }
            ),
            "Restaurant key: valid (Mykonos Mediterranean)"
        );
    }
}
