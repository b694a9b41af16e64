//! Product source backed by the storefront HTTP API.

use async_trait::async_trait;

use storefront_catalog::{Product, ProductSource, SourceError};

use crate::payload::parse_products;

/// Fetches `{api_url}/products`.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl HttpProductSource {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            token: None,
        }
    }

    pub fn with_token(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(api_url)
        }
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        let url = self.products_url();
        let mut req = self.client.get(&url);

        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SourceError::Api(status.as_u16(), body));
        }

        let products = parse_products(&body)?;
        tracing::debug!(%url, count = products.len(), "fetched products over HTTP");
        Ok(products)
    }
}
