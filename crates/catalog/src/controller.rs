//! Shop page controller.
//!
//! Owns the filter, sort and page selections and keeps the derived product
//! list in step with them. One user intent is processed per `&mut self` call.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use storefront_core::DomainResult;

use crate::config::CatalogConfig;
use crate::facets::{CategoryFacet, category_facets};
use crate::pagination::{page_count, paginate};
use crate::product::Product;
use crate::query::{FilterSpec, PriceRange, SortKey, apply};
use crate::store::{FetchStatus, LoadOutcome, ProductSource, ProductStore};

/// Coarse page state mirroring the store's fetch status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerState {
    Idle,
    Loading,
    Ready,
    Error,
}

impl From<&FetchStatus> for ControllerState {
    fn from(status: &FetchStatus) -> Self {
        match status {
            FetchStatus::Idle => ControllerState::Idle,
            FetchStatus::Loading => ControllerState::Loading,
            FetchStatus::Success => ControllerState::Ready,
            FetchStatus::Error(_) => ControllerState::Error,
        }
    }
}

/// Everything the shop page renders.
#[derive(Debug, Serialize)]
pub struct CatalogView<'a> {
    pub state: ControllerState,
    pub status: FetchStatus,
    pub sort: SortKey,
    pub filter: &'a FilterSpec,
    /// Products on the current page.
    pub items: &'a [Product],
    pub page: usize,
    pub page_count: usize,
    /// Number of products on this page ("Showing {showing} of {total}").
    pub showing: usize,
    /// Number of products matching the filters.
    pub total: usize,
    pub show_pagination: bool,
}

pub struct CatalogController<S> {
    store: Arc<ProductStore<S>>,
    page_size: usize,
    categories: Vec<String>,
    filter: FilterSpec,
    sort: SortKey,
    page: usize,
    visible: Vec<Product>,
    /// Store revision `visible` was derived from.
    revision: u64,
}

impl<S> CatalogController<S>
where
    S: ProductSource,
{
    pub fn new(store: Arc<ProductStore<S>>, config: &CatalogConfig) -> Self {
        Self {
            store,
            page_size: config.page_size,
            categories: config.categories.clone(),
            filter: FilterSpec::new(config.default_price_range),
            sort: SortKey::default(),
            page: 1,
            visible: Vec::new(),
            revision: 0,
        }
    }

    /// Page became visible: fetch if the store is empty, then derive.
    pub async fn mount(&mut self) -> LoadOutcome {
        let outcome = self.store.load().await;
        self.refresh();
        outcome
    }

    pub fn state(&self) -> ControllerState {
        ControllerState::from(&self.store.status())
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn facets(&self) -> Vec<CategoryFacet> {
        category_facets(&self.categories, &self.filter)
    }

    pub fn toggle_category(&mut self, category: &str, selected: bool) {
        let changed = self.filter.toggle_category(category, selected);
        debug!(category, selected, changed, "category toggled");
        self.page = 1;
        self.recompute();
    }

    /// Rejects invalid ranges and leaves the current filter untouched.
    pub fn set_price_range(&mut self, min: f64, max: f64) -> DomainResult<()> {
        let range = PriceRange::new(min, max)?;
        self.filter.set_price(range);
        self.page = 1;
        self.recompute();
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
        self.recompute();
    }

    /// Move to `page`. Returns `false` (and keeps the current page) when
    /// `page` is outside `1..=page_count`.
    pub fn set_page(&mut self, page: usize) -> bool {
        self.refresh();
        let count = page_count(self.visible.len(), self.page_size);
        if page == 0 || page > count {
            debug!(page, page_count = count, "ignoring out-of-range page");
            return false;
        }
        self.page = page;
        true
    }

    /// Picks up products loaded since the last intent, then builds the view.
    pub fn view(&mut self) -> CatalogView<'_> {
        self.refresh();
        let status = self.store.status();
        let page = paginate(&self.visible, self.page, self.page_size);
        CatalogView {
            state: ControllerState::from(&status),
            status,
            sort: self.sort,
            filter: &self.filter,
            items: page.items,
            page: self.page,
            page_count: page.page_count,
            showing: page.items.len(),
            total: self.visible.len(),
            show_pagination: page.page_count > 1,
        }
    }

    /// Re-derive if the store holds a newer product list.
    fn refresh(&mut self) {
        if self.store.revision() != self.revision {
            self.recompute();
            let count = page_count(self.visible.len(), self.page_size);
            if self.page > count.max(1) {
                self.page = 1;
            }
        }
    }

    fn recompute(&mut self) {
        let snapshot = self.store.snapshot();
        self.visible = apply(&snapshot.products, &self.filter, self.sort);
        self.revision = snapshot.revision;
        debug!(
            total = snapshot.products.len(),
            visible = self.visible.len(),
            sort = %self.sort,
            "catalog recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryProductSource, SourceError};

    fn catalog(len: usize) -> Vec<Product> {
        (0..len)
            .map(|i| {
                let category = if i % 2 == 0 { "Home Decor" } else { "Bags & Wallets" };
                Product::new(format!("p{i}"), format!("Item {i}"), (i * 10) as f64)
                    .with_category(category)
                    .with_featured(i % 5 == 0)
            })
            .collect()
    }

    async fn mounted(len: usize) -> CatalogController<InMemoryProductSource> {
        let store = Arc::new(ProductStore::new(InMemoryProductSource::new(catalog(len))));
        let mut controller = CatalogController::new(store, &CatalogConfig::default());
        controller.mount().await;
        controller
    }

    #[tokio::test]
    async fn mount_loads_and_derives_first_page() {
        let mut controller = mounted(37).await;
        assert_eq!(controller.state(), ControllerState::Ready);

        let view = controller.view();
        assert_eq!(view.total, 37);
        assert_eq!(view.page_count, 3);
        assert_eq!(view.showing, 16);
        assert!(view.show_pagination);
    }

    #[tokio::test]
    async fn repeated_mounts_fetch_once() {
        let mut controller = mounted(5).await;
        assert_eq!(controller.mount().await, LoadOutcome::AlreadyLoaded);
        assert_eq!(controller.store.source().calls(), 1);
    }

    #[tokio::test]
    async fn sort_and_filter_changes_reset_to_first_page() {
        let mut controller = mounted(37).await;

        assert!(controller.set_page(3));
        controller.set_sort(SortKey::PriceHigh);
        assert_eq!(controller.page(), 1);

        assert!(controller.set_page(3));
        controller.set_price_range(0.0, 5_000.0).unwrap();
        assert_eq!(controller.page(), 1);

        assert!(controller.set_page(3));
        controller.toggle_category("home decor", true);
        assert_eq!(controller.page(), 1);
        assert_eq!(controller.view().total, 19);
    }

    #[tokio::test]
    async fn out_of_range_pages_are_ignored() {
        let mut controller = mounted(37).await;
        assert!(controller.set_page(2));
        assert!(!controller.set_page(0));
        assert!(!controller.set_page(4));
        assert_eq!(controller.page(), 2);
        assert_eq!(controller.view().items.len(), 16);
    }

    #[tokio::test]
    async fn invalid_price_range_keeps_previous_filter() {
        let mut controller = mounted(10).await;
        controller.set_price_range(10.0, 50.0).unwrap();
        assert!(controller.set_price_range(60.0, 20.0).is_err());
        assert_eq!(controller.filter().price(), PriceRange::new(10.0, 50.0).unwrap());
        assert_eq!(controller.view().total, 5);
    }

    #[tokio::test]
    async fn fetch_error_surfaces_in_view() {
        let source = InMemoryProductSource::failing(SourceError::Api(500, "boom".into()));
        let store = Arc::new(ProductStore::new(source));
        let mut controller = CatalogController::new(store, &CatalogConfig::default());

        controller.mount().await;
        let view = controller.view();
        assert_eq!(view.state, ControllerState::Error);
        assert_eq!(view.status.error_message(), Some("API error (500): boom"));
        assert_eq!(view.total, 0);
        assert_eq!(view.page_count, 0);
        assert!(!view.show_pagination);
    }

    #[tokio::test]
    async fn picks_up_products_loaded_elsewhere() {
        let store = Arc::new(ProductStore::new(InMemoryProductSource::new(catalog(20))));
        let mut controller = CatalogController::new(store.clone(), &CatalogConfig::default());
        controller.set_sort(SortKey::PriceHigh);
        assert_eq!(controller.view().total, 0);

        // Another section triggers the shared fetch.
        store.load().await;

        let view = controller.view();
        assert_eq!(view.total, 20);
        assert_eq!(view.items[0].name(), "Item 19");
    }

    #[tokio::test]
    async fn facets_follow_selection() {
        let mut controller = mounted(4).await;
        controller.toggle_category("Bags & Wallets", true);
        let selected: Vec<_> = controller
            .facets()
            .into_iter()
            .filter(|f| f.selected)
            .map(|f| f.label)
            .collect();
        assert_eq!(selected, vec!["Bags & Wallets".to_string()]);
    }
}
