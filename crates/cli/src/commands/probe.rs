//! Connectivity check.
//!
//! # Usage
//!
//! ```bash
//! tavola probe --api-url https://ops.example.com/api
//! ```
//!
//! Exits non-zero when the backend is unreachable or unhealthy, so it can
//! gate scripts.

use super::{CliError, Context};

/// Probe `GET /health` once.
///
/// # Errors
///
/// Returns `CliError::Offline` if the probe fails.
pub async fn run(ctx: &Context) -> Result<(), CliError> {
    let base_url = ctx.api().base_url().to_string();

    if ctx.prober().probe().await {
        #[allow(clippy::print_stdout)]
        {
            println!("online: {base_url}");
        }
        Ok(())
    } else {
        Err(CliError::Offline(base_url))
    }
}
