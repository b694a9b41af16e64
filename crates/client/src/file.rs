//! Product source reading a JSON export from disk.

use std::path::PathBuf;

use async_trait::async_trait;

use storefront_catalog::{Product, ProductSource, SourceError};

use crate::payload::parse_products;

#[derive(Debug, Clone)]
pub struct JsonFileProductSource {
    path: PathBuf,
}

impl JsonFileProductSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductSource for JsonFileProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io(format!("{}: {e}", self.path.display())))?;
        parse_products(&body)
    }
}
