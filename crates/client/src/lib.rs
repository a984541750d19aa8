//! PartsGrid client - session and API-access layer.
//!
//! This crate is the single point of contact between PartsGrid front-ends
//! (dealer dashboard, back-office tooling, CLI) and the marketplace REST
//! API. It owns:
//!
//! - the shared [`api::ApiClient`] with its request-interceptor chain
//!   (bearer-token injection) and response logging,
//! - the [`cookies::CookieJar`] persisting the session token and small
//!   derived identifiers,
//! - the advisory [`token`] decoder for JWT claims,
//! - the [`session::SessionMonitor`] that logs the user out the moment the
//!   token's expiry claim elapses,
//! - one [`services`] module per backend resource,
//! - the snapshot-based [`store`] caching the last-known server state per
//!   resource.
//!
//! # Data flow
//!
//! Caller action → service method → `ApiClient` (token attached) → backend
//! → response shaped by the service → dispatched into a store slice →
//! consumers read slice snapshots.
//!
//! # Example
//!
//! ```rust,ignore
//! use partsgrid_client::{api::ApiClient, config::ClientConfig, cookies::CookieJar};
//! use partsgrid_client::services::orders::OrdersService;
//! use partsgrid_client::store::{Store, dispatch};
//!
//! let config = ClientConfig::from_env()?;
//! let jar = CookieJar::shared();
//! let client = ApiClient::new(&config, jar.clone())?;
//! let store = Store::new();
//!
//! let orders = OrdersService::new(&client);
//! let page = dispatch(store.orders(), orders.list(&Default::default())).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod cookies;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod token;
pub mod upload_log;
