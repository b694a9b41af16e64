//! Shopper intents supplied on the command line environment.

use storefront_catalog::{CatalogController, ProductSource, SortKey};
use thiserror::Error;

pub const SORT_ENV: &str = "STOREFRONT_SORT";
pub const CATEGORIES_ENV: &str = "STOREFRONT_CATEGORIES";
pub const PRICE_MIN_ENV: &str = "STOREFRONT_PRICE_MIN";
pub const PRICE_MAX_ENV: &str = "STOREFRONT_PRICE_MAX";
pub const PAGE_ENV: &str = "STOREFRONT_PAGE";

/// Error key when both price bounds were given and together form a bad range.
const PRICE_RANGE_KEYS: &str = "STOREFRONT_PRICE_MIN/STOREFRONT_PRICE_MAX";

#[derive(Debug, Error, PartialEq)]
pub enum IntentError {
    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl IntentError {
    fn invalid(key: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            key,
            reason: reason.to_string(),
        }
    }
}

/// Filter/sort/page choices to replay against a controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopIntents {
    pub sort: Option<SortKey>,
    pub categories: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub page: Option<usize>,
}

impl ShopIntents {
    pub fn from_env() -> Result<Self, IntentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IntentError> {
        let sort = lookup(SORT_ENV)
            .map(|raw| raw.parse::<SortKey>().map_err(|e| IntentError::invalid(SORT_ENV, e)))
            .transpose()?;

        let categories: Vec<String> = lookup(CATEGORIES_ENV)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let price_min = parse_number(&lookup, PRICE_MIN_ENV)?;
        let price_max = parse_number(&lookup, PRICE_MAX_ENV)?;
        let page = lookup(PAGE_ENV)
            .map(|raw| {
                raw.trim()
                    .parse::<usize>()
                    .map_err(|e| IntentError::invalid(PAGE_ENV, e))
            })
            .transpose()?;

        Ok(Self {
            sort,
            categories,
            price_min,
            price_max,
            page,
        })
    }

    /// Replay the intents in the order a shopper would: filters, sort, page.
    pub fn apply_to<S: ProductSource>(
        &self,
        controller: &mut CatalogController<S>,
    ) -> Result<(), IntentError> {
        for category in &self.categories {
            controller.toggle_category(category, true);
        }

        let price_key = match (self.price_min, self.price_max) {
            (Some(_), Some(_)) => Some(PRICE_RANGE_KEYS),
            (Some(_), None) => Some(PRICE_MIN_ENV),
            (None, Some(_)) => Some(PRICE_MAX_ENV),
            (None, None) => None,
        };
        if let Some(key) = price_key {
            let current = controller.filter().price();
            let min = self.price_min.unwrap_or(current.min());
            let max = self.price_max.unwrap_or(current.max());
            controller
                .set_price_range(min, max)
                .map_err(|e| IntentError::invalid(key, e))?;
        }

        if let Some(sort) = self.sort {
            controller.set_sort(sort);
        }

        if let Some(page) = self.page {
            if !controller.set_page(page) {
                tracing::warn!(page, "requested page is out of range; showing page 1");
            }
        }

        Ok(())
    }
}

fn parse_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<f64>, IntentError> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| IntentError::invalid(key, e))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storefront_catalog::{CatalogConfig, InMemoryProductSource, Product, ProductStore};

    fn lookup(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn parses_all_intents() {
        let intents = ShopIntents::from_lookup(lookup(&[
            (SORT_ENV, "price_high"),
            (CATEGORIES_ENV, "Home Decor, ,Bags & Wallets"),
            (PRICE_MIN_ENV, "10"),
            (PRICE_MAX_ENV, "250.5"),
            (PAGE_ENV, "2"),
        ]))
        .unwrap();

        assert_eq!(intents.sort, Some(SortKey::PriceHigh));
        assert_eq!(intents.categories, vec!["Home Decor", "Bags & Wallets"]);
        assert_eq!(intents.price_min, Some(10.0));
        assert_eq!(intents.price_max, Some(250.5));
        assert_eq!(intents.page, Some(2));
    }

    #[test]
    fn rejects_unknown_sort() {
        let err = ShopIntents::from_lookup(lookup(&[(SORT_ENV, "cheapest")])).unwrap_err();
        assert!(matches!(err, IntentError::Invalid { key: SORT_ENV, .. }));
    }

    #[tokio::test]
    async fn applies_intents_to_controller() {
        let products: Vec<Product> = (0..40)
            .map(|i| {
                let category = if i % 2 == 0 { "Home Decor" } else { "Toys & Collectibles" };
                Product::new(format!("p{i}"), format!("Item {i}"), i as f64).with_category(category)
            })
            .collect();
        let store = Arc::new(ProductStore::new(InMemoryProductSource::new(products)));
        let mut controller = CatalogController::new(store, &CatalogConfig::default().with_page_size(5));
        controller.mount().await;

        let intents = ShopIntents {
            sort: Some(SortKey::PriceHigh),
            categories: vec!["home decor".to_string()],
            price_min: None,
            price_max: Some(30.0),
            page: Some(2),
        };
        intents.apply_to(&mut controller).unwrap();

        let view = controller.view();
        assert_eq!(view.total, 16);
        assert_eq!(view.page, 2);
        assert_eq!(view.items[0].name(), "Item 20");
    }

    fn empty_controller() -> CatalogController<InMemoryProductSource> {
        let store = Arc::new(ProductStore::new(InMemoryProductSource::new(vec![])));
        CatalogController::new(store, &CatalogConfig::default())
    }

    #[test]
    fn inverted_price_range_is_reported() {
        let mut controller = empty_controller();
        let intents = ShopIntents {
            price_min: Some(500.0),
            price_max: Some(100.0),
            ..ShopIntents::default()
        };
        let err = intents.apply_to(&mut controller).unwrap_err();
        assert!(matches!(err, IntentError::Invalid { key: PRICE_RANGE_KEYS, .. }));
    }

    #[test]
    fn bad_price_bound_names_the_variable_that_was_set() {
        let mut controller = empty_controller();
        let only_max = ShopIntents {
            price_max: Some(-1.0),
            ..ShopIntents::default()
        };
        let err = only_max.apply_to(&mut controller).unwrap_err();
        assert!(matches!(err, IntentError::Invalid { key: PRICE_MAX_ENV, .. }));

        let only_min = ShopIntents {
            price_min: Some(20_000.0),
            ..ShopIntents::default()
        };
        let err = only_min.apply_to(&mut controller).unwrap_err();
        assert!(matches!(err, IntentError::Invalid { key: PRICE_MIN_ENV, .. }));
    }
}
