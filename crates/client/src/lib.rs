//! `storefront-client`
//!
//! **Responsibility:** product source adapters for the catalog engine.
//!
//! This crate provides:
//! - `HttpProductSource`: the storefront API over HTTP
//! - `JsonFileProductSource`: a JSON export on disk
//! - Environment-driven configuration for the `storefront` binary

pub mod config;
pub mod file;
pub mod http;
pub mod intents;
pub mod payload;

pub use config::ClientConfig;
pub use file::JsonFileProductSource;
pub use http::HttpProductSource;
pub use intents::{IntentError, ShopIntents};
pub use payload::parse_products;
