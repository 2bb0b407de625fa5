//! Tavola Core - Shared types library.
//!
//! This crate provides the types and pure logic shared by every Tavola
//! component:
//! - `console` - Server-rendered restaurant operations console
//! - `cli` - Command-line session and connectivity tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. Everything here is deterministic, which is what lets
//! demo figures be derived from demo datasets with the exact code used for
//! live data.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, roles, statuses and money formatting
//! - [`session`] - Session identity, demo identities and restore rules
//! - [`join_key`] - Join-key kinds, tri-state validation and the static table
//! - [`inventory`], [`staff`], [`payroll`], [`expenses`], [`dashboard`] -
//!   Domain records and derivations
//! - [`demo`] - Static demo datasets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dashboard;
pub mod demo;
pub mod expenses;
pub mod inventory;
pub mod join_key;
pub mod payroll;
pub mod session;
pub mod staff;
pub mod types;

pub use join_key::{JoinKeyKind, KeyValidation, StaticJoinKeys};
pub use session::{AccessToken, DataScope, Identity, PersistedSession, Restored, Session, UnknownRolePolicy};
pub use types::*;
