//! Client configuration (where products come from).

use std::path::PathBuf;
use std::sync::Arc;

use storefront_catalog::ProductSource;

use crate::file::JsonFileProductSource;
use crate::http::HttpProductSource;

pub const API_URL_ENV: &str = "STOREFRONT_API_URL";
pub const AUTH_TOKEN_ENV: &str = "STOREFRONT_AUTH_TOKEN";
pub const PRODUCTS_FILE_ENV: &str = "STOREFRONT_PRODUCTS_FILE";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: Option<String>,
    /// When set, products are read from this file instead of the API.
    pub products_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            products_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: non_blank(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: non_blank(AUTH_TOKEN_ENV),
            products_file: non_blank(PRODUCTS_FILE_ENV).map(PathBuf::from),
        }
    }

    /// Build the configured product source.
    pub fn product_source(&self) -> Arc<dyn ProductSource> {
        if let Some(path) = &self.products_file {
            tracing::info!(path = %path.display(), "reading products from file");
            return Arc::new(JsonFileProductSource::new(path.clone()));
        }

        match &self.token {
            Some(token) => {
                tracing::info!(api_url = %self.api_url, "fetching products with authentication token");
                Arc::new(HttpProductSource::with_token(self.api_url.clone(), token.clone()))
            }
            None => {
                tracing::info!(api_url = %self.api_url, "fetching products without authentication token");
                Arc::new(HttpProductSource::new(self.api_url.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_api() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:8080");
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ClientConfig::from_lookup(|key| match key {
            API_URL_ENV => Some("https://shop.example".to_string()),
            AUTH_TOKEN_ENV => Some("   ".to_string()),
            PRODUCTS_FILE_ENV => Some("products.json".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url, "https://shop.example");
        assert_eq!(config.token, None);
        assert_eq!(config.products_file, Some(PathBuf::from("products.json")));
    }
}
