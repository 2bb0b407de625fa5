//! Core types for Tavola.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{AmountOverflow, CheckedAmounts, checked_total, format_money, round_cents};
pub use role::{Role, RoleParseError, Theme};
pub use status::*;
