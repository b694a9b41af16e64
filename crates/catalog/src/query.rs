//! Filtering and ordering of the catalog.
//!
//! Everything here is pure: inputs are borrowed, results are new vectors.

use core::cmp::Ordering;
use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

use crate::product::{Product, normalize_category};

/// Lower bound of the default price filter.
pub const DEFAULT_PRICE_MIN: f64 = 0.0;
/// Upper bound of the default price filter.
pub const DEFAULT_PRICE_MAX: f64 = 10_000.0;

/// Inclusive price range, `min <= max`, both finite and non-negative.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> DomainResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DomainError::validation("price bounds must be finite numbers"));
        }
        if min < 0.0 {
            return Err(DomainError::validation("minimum price cannot be negative"));
        }
        if min > max {
            return Err(DomainError::validation(format!(
                "minimum price {min} exceeds maximum price {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_PRICE_MIN,
            max: DEFAULT_PRICE_MAX,
        }
    }
}

/// Active catalog filters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Normalized category keys; empty means every category.
    categories: BTreeSet<String>,
    price: PriceRange,
}

impl FilterSpec {
    pub fn new(price: PriceRange) -> Self {
        Self {
            categories: BTreeSet::new(),
            price,
        }
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    pub fn price(&self) -> PriceRange {
        self.price
    }

    /// Whether `category` (any case/whitespace) is currently selected.
    pub fn is_selected(&self, category: &str) -> bool {
        self.categories.contains(&normalize_category(category))
    }

    /// Select or deselect a category. Returns `true` if the selection changed.
    pub fn toggle_category(&mut self, category: &str, selected: bool) -> bool {
        let key = normalize_category(category);
        if selected {
            self.categories.insert(key)
        } else {
            self.categories.remove(&key)
        }
    }

    pub fn set_price(&mut self, price: PriceRange) {
        self.price = price;
    }

    /// Category and price predicates combined.
    ///
    /// Products without a usable price never match.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.contains(&product.category_key());
        let price_ok = product.price().is_some_and(|p| self.price.contains(p));
        category_ok && price_ok
    }
}

/// Catalog ordering. Wire values are the snake_case names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Featured,
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Featured,
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price_low",
            SortKey::PriceHigh => "price_high",
        }
    }

    /// Menu label shown next to the sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::Newest => "Newest",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
        }
    }

    /// Comparator for a stable sort.
    ///
    /// `Featured` is a stable partition: featured items first, original order
    /// kept inside each group.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceLow => cmp_price(a.price(), b.price()),
            SortKey::PriceHigh => cmp_price(b.price(), a.price()),
            // `None` orders before any date, so missing dates land last.
            SortKey::Newest => b.created_at().cmp(&a.created_at()),
            SortKey::Featured => b.is_featured().cmp(&a.is_featured()),
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown sort key '{s}'")))
    }
}

fn cmp_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// Derive the visible catalog: filter, then stable-sort the survivors.
pub fn apply(products: &[Product], filter: &FilterSpec, sort: SortKey) -> Vec<Product> {
    let mut visible: Vec<Product> = products
        .iter()
        .filter(|product| filter.matches(product))
        .cloned()
        .collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
