//! Venue marketplace module.
//!
//! Domain layer owns balances, venue ownership and the purchase rules;
//! `infra` provides in-memory storage and per-entity locks; `api::rest`
//! exposes the HTTP surface.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use config::MarketplaceConfig;
pub use domain::service::Service;
