//! Category list offered by the filter sidebar.

use serde::Serialize;

use crate::product::normalize_category;
use crate::query::FilterSpec;

pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Toys & Collectibles",
    "Bags & Wallets",
    "Resin Art & Decor",
    "Home Decor",
    "Jewelry & Accessories",
];

/// One checkbox in the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFacet {
    pub label: String,
    /// Normalized key used for matching.
    pub key: String,
    pub selected: bool,
}

pub fn category_facets(labels: &[String], filter: &FilterSpec) -> Vec<CategoryFacet> {
    labels
        .iter()
        .map(|label| {
            let key = normalize_category(label);
            let selected = filter.categories().contains(&key);
            CategoryFacet {
                label: label.clone(),
                key,
                selected,
            }
        })
        .collect()
}
