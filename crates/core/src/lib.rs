//! `storefront-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no async).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, duplicate_ids};
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
