//! PartsGrid Core - Shared types library.
//!
//! This crate provides common types used across all PartsGrid components:
//! - `client` - Session and API-access layer for the marketplace REST API
//! - `cli` - Command-line front-end driving the client SDK
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no timers.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, roles, prices, statuses,
//!   and the REST response envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
