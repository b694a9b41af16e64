//! Product list payloads as served by the backend.

use serde::Deserialize;
use serde_json::Value;

use storefront_catalog::{Product, SourceError};

/// Accepted body shapes: a bare array or `{ "products": [...] }`.
///
/// Records stay untyped here so a bad one can be dropped on its own.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductListBody {
    List(Vec<Value>),
    Wrapped { products: Vec<Value> },
}

/// Decode a product list body.
///
/// Fails only when the body itself is not a product list. Records that do
/// not decode are logged and skipped.
pub fn parse_products(body: &str) -> Result<Vec<Product>, SourceError> {
    let records = match serde_json::from_str::<ProductListBody>(body) {
        Ok(ProductListBody::List(records)) | Ok(ProductListBody::Wrapped { products: records }) => {
            records
        }
        Err(_) => {
            return Err(SourceError::Parse(
                "expected a JSON array of products or an object with a `products` array"
                    .to_string(),
            ));
        }
    };

    let total = records.len();
    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed product record");
                None
            }
        })
        .collect();

    if products.len() < total {
        tracing::warn!(kept = products.len(), total, "some product records were skipped");
    }
    Ok(products)
}
