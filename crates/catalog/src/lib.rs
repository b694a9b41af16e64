//! Storefront catalog engine.
//!
//! Holds the product list fetched from a [`ProductSource`], derives the
//! filtered and sorted catalog, and slices it into pages for the shop page.
//! No rendering and no transport live here.

pub mod config;
pub mod controller;
pub mod facets;
pub mod pagination;
pub mod product;
pub mod query;
pub mod showcase;
pub mod store;

pub use config::{CatalogConfig, ConfigError};
pub use controller::{CatalogController, CatalogView, ControllerState};
pub use facets::{CategoryFacet, DEFAULT_CATEGORIES, category_facets};
pub use pagination::{PAGE_SIZE, Page, page_count, paginate};
pub use product::{CategoryRef, Product, normalize_category};
pub use query::{FilterSpec, PriceRange, SortKey, apply};
pub use showcase::{FeaturedSection, FeaturedView, Showcase, featured_showcase};
pub use store::{
    FetchStatus, InMemoryProductSource, LoadOutcome, ProductSource, ProductStore, SourceError,
    StoreSnapshot,
};
