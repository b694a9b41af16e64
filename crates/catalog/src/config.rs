//! Catalog configuration (environment-driven, with defaults).

use std::time::Duration;

use thiserror::Error;

use crate::facets::DEFAULT_CATEGORIES;
use crate::pagination::PAGE_SIZE;
use crate::query::PriceRange;

pub const PAGE_SIZE_ENV: &str = "STOREFRONT_PAGE_SIZE";
pub const FEATURED_LIMIT_ENV: &str = "STOREFRONT_FEATURED_LIMIT";
pub const FETCH_TIMEOUT_ENV: &str = "STOREFRONT_FETCH_TIMEOUT_MS";

/// Products shown in the home-page featured section.
pub const FEATURED_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Catalog settings shared by the shop page and the featured section.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub page_size: usize,
    pub featured_limit: usize,
    /// `None` waits for the product source indefinitely.
    pub fetch_timeout: Option<Duration>,
    pub default_price_range: PriceRange,
    /// Category labels offered by the filter sidebar.
    pub categories: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            featured_limit: FEATURED_LIMIT,
            fetch_timeout: None,
            default_price_range: PriceRange::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CatalogConfig {
    /// Read overrides from the process environment.
    ///
    /// Malformed values are logged and replaced by their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(page_size) = read_var(&lookup, PAGE_SIZE_ENV, parse_positive) {
            config.page_size = page_size;
        }
        if let Some(limit) = read_var(&lookup, FEATURED_LIMIT_ENV, parse_count) {
            config.featured_limit = limit;
        }
        if let Some(ms) = read_var(&lookup, FETCH_TIMEOUT_ENV, parse_positive) {
            config.fetch_timeout = Some(Duration::from_millis(ms as u64));
        }

        config
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn read_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    parse: fn(&'static str, &str) -> Result<T, ConfigError>,
) -> Option<T> {
    let raw = lookup(key)?;
    match parse(key, &raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("{err}; using default");
            None
        }
    }
}

fn parse_count(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: "expected a non-negative integer",
    })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match parse_count(key, raw)? {
        0 => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero",
        }),
        n => Ok(n),
    }
}
