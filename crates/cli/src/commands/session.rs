//! Session commands: demo login, login, logout, whoami and theme.
//!
//! # Usage
//!
//! ```bash
//! tavola demo-login pos_user
//! TAVOLA_PASSWORD=... tavola login -e elena@mykonos-mediterranean.com -r manager
//! tavola whoami
//! tavola theme dark
//! tavola logout
//! ```

use secrecy::SecretString;
use tavola_console::session::{FileStorage, StorageError};
use tavola_core::{Email, Role, Session, Theme};

use super::{CliError, Context};

/// Start a demo session for `role`.
///
/// # Errors
///
/// Returns `CliError::Storage` if the state file cannot be written.
pub async fn demo_login(ctx: &Context, role: Role) -> Result<(), CliError> {
    let mut store = ctx.session().await?;
    let session = store.demo_login(role).await?;
    print_session(session);
    Ok(())
}

/// Log in against the operations API.
///
/// # Errors
///
/// Returns `CliError::InvalidEmail` for a malformed email, or
/// `CliError::Session` if the backend refuses or storage fails.
pub async fn login(ctx: &Context, email: &str, password: String, role: Role) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let password = SecretString::from(password);

    let mut store = ctx.session().await?;
    let session = store.login(ctx.api(), &email, &password, role).await?;
    print_session(session);
    Ok(())
}

/// Clear the stored session. The theme survives unless the state file is
/// unreadable, in which case the whole file is discarded.
///
/// # Errors
///
/// Returns `CliError::Storage` if the state file cannot be written or removed.
pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    let was_authenticated = end_session(ctx).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", if was_authenticated { "Logged out" } else { "No active session" });
    }
    Ok(())
}

/// Returns whether a session was active. Restoring is best effort.
async fn end_session(ctx: &Context) -> Result<bool, StorageError> {
    match ctx.session().await {
        Ok(mut store) => {
            let was_authenticated = store.is_authenticated();
            store.logout().await?;
            Ok(was_authenticated)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %ctx.state_path.display(),
                "session state unreadable; discarding it"
            );
            FileStorage::new(&ctx.state_path).discard().await?;
            Ok(true)
        }
    }
}

/// Print the stored session, if any.
///
/// # Errors
///
/// Returns `CliError::Storage` if the state file cannot be read.
pub async fn whoami(ctx: &Context) -> Result<(), CliError> {
    let store = ctx.session().await?;

    if let Some(session) = store.current() {
        print_session(session);
    } else {
        #[allow(clippy::print_stdout)]
        {
            println!("Not logged in");
        }
    }
    Ok(())
}

/// Show the stored theme, or replace it.
///
/// # Errors
///
/// Returns `CliError::Storage` if the state file cannot be read or written.
pub async fn theme(ctx: &Context, theme: Option<Theme>) -> Result<(), CliError> {
    let store = ctx.session().await?;

    let theme = match theme {
        Some(theme) => {
            store.set_theme(theme).await?;
            theme
        }
        None => store.theme().await?,
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{}", theme.as_str());
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_session(session: &Session) {
    let identity = session.identity();
    let mode = if session.is_demo() { " [demo]" } else { "" };

    println!("{} <{}>{mode}", identity.display_name, identity.email);
    println!("  role:       {}", session.role().label());
    println!("  restaurant: {}", identity.restaurant_name);
    println!("  payroll:    {}", if session.role().can_view_payroll() { "yes" } else { "no" });
}
