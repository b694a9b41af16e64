//! Home-page featured section.
//!
//! Shows the first few products of the store in load order and whether a
//! "view all" link is needed. It shares the shop page's store, so mounting
//! both sections still fetches once.

use std::sync::Arc;

use serde::Serialize;

use crate::product::Product;
use crate::store::{FetchStatus, LoadOutcome, ProductSource, ProductStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Showcase {
    pub items: Vec<Product>,
    /// More products exist than are shown.
    pub has_more: bool,
}

/// What the featured section renders: the showcase plus the store's fetch status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedView {
    pub status: FetchStatus,
    #[serde(flatten)]
    pub showcase: Showcase,
}

/// First `limit` products of `products`, in their original order.
pub fn featured_showcase(products: &[Product], limit: usize) -> Showcase {
    Showcase {
        items: products.iter().take(limit).cloned().collect(),
        has_more: products.len() > limit,
    }
}

pub struct FeaturedSection<S> {
    store: Arc<ProductStore<S>>,
    limit: usize,
}

impl<S> FeaturedSection<S>
where
    S: ProductSource,
{
    pub fn new(store: Arc<ProductStore<S>>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Trigger the shared fetch if nothing is loaded yet.
    pub async fn mount(&self) -> LoadOutcome {
        self.store.load().await
    }

    pub fn showcase(&self) -> FeaturedView {
        let snapshot = self.store.snapshot();
        FeaturedView {
            showcase: featured_showcase(&snapshot.products, self.limit),
            status: snapshot.status,
        }
    }
}
