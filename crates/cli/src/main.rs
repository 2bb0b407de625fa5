//! Tavola CLI - sessions, connectivity and join keys from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Is the operations API up?
//! tavola probe
//!
//! # Start a demo session as a manager
//! tavola demo-login manager
//!
//! # Log in with real credentials (password from TAVOLA_PASSWORD)
//! tavola login -e elena@mykonos-mediterranean.com -r manager
//!
//! # Show the current session
//! tavola whoami
//!
//! # Check a join key
//! tavola check-key restaurant REST-MYK2026-ATHNS
//! ```
//!
//! # Commands
//!
//! - `probe` - Health-check the operations API
//! - `demo-login` - Start a demo session for a role
//! - `login` / `logout` / `whoami` - Manage the stored session
//! - `check-key` - Validate a restaurant or manager join key
//! - `theme` - Show or set the stored theme
//!
//! The session is stored as JSON at `--state` (default
//! `.tavola-session.json`), using the same keys as the web console.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tavola_core::{JoinKeyKind, Role, Theme, UnknownRolePolicy};

mod commands;

#[derive(Parser)]
#[command(name = "tavola")]
#[command(author, version, about = "Tavola CLI tools")]
struct Cli {
    /// Session state file
    #[arg(long, global = true, env = "TAVOLA_STATE", default_value = ".tavola-session.json")]
    state: PathBuf,

    /// Operations API base URL
    #[arg(long, global = true, env = "TAVOLA_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Handling of a stored session whose role is unrecognized (`admin`, `reauth`)
    #[arg(long, global = true, env = "TAVOLA_UNKNOWN_ROLE_POLICY", default_value = "admin")]
    unknown_role_policy: UnknownRolePolicy,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Health-check the operations API
    Probe,
    /// Start a demo session (no network)
    DemoLogin {
        /// Role (`restaurant_admin`, `manager`, `pos_user`)
        role: Role,
    },
    /// Log in with credentials
    Login {
        /// Staff email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(long, env = "TAVOLA_PASSWORD", hide_env_values = true)]
        password: String,

        /// Role to act as
        #[arg(short, long, default_value = "restaurant_admin")]
        role: Role,
    },
    /// Clear the stored session (theme is kept)
    Logout,
    /// Show the stored session
    Whoami,
    /// Validate a join key
    CheckKey {
        /// Key kind (`restaurant`, `manager`)
        kind: JoinKeyKind,

        /// The key
        key: String,

        /// Ask the operations API instead of the built-in table
        #[arg(long)]
        remote: bool,
    },
    /// Show or set the theme
    Theme {
        /// `light` or `dark`; omit to show the current theme
        theme: Option<Theme>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing; logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = commands::Context::new(cli.state, &cli.api_url, cli.unknown_role_policy)?;

    match cli.command {
        Commands::Probe => commands::probe::run(&ctx).await,
        Commands::DemoLogin { role } => commands::session::demo_login(&ctx, role).await,
        Commands::Login {
            email,
            password,
            role,
        } => commands::session::login(&ctx, &email, password, role).await,
        Commands::Logout => commands::session::logout(&ctx).await,
        Commands::Whoami => commands::session::whoami(&ctx).await,
        Commands::CheckKey { kind, key, remote } => {
            commands::join_key::check(&ctx, kind, &key, remote).await
        }
        Commands::Theme { theme } => commands::session::theme(&ctx, theme).await,
    }
}
