//! Core types for PartsGrid.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod envelope;
pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use envelope::{Envelope, Paged, Pagination};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use role::Role;
pub use status::*;
