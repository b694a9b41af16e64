//! `storefront` binary: load the catalog once and print what the home page
//! and shop page would render.

use std::sync::Arc;

use anyhow::Context;
use storefront_catalog::{
    CatalogConfig, CatalogController, ControllerState, FeaturedSection, ProductStore, SortKey,
};
use storefront_client::{ClientConfig, ShopIntents};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let catalog_config = CatalogConfig::from_env();
    let client_config = ClientConfig::from_env();
    let intents = ShopIntents::from_env().context("invalid shop intents")?;

    let store = Arc::new(
        ProductStore::new(client_config.product_source())
            .with_fetch_timeout(catalog_config.fetch_timeout),
    );

    let home = FeaturedSection::new(store.clone(), catalog_config.featured_limit);
    let mut shop = CatalogController::new(store, &catalog_config);

    // Both sections mount together; the store fetches once.
    let (home_outcome, shop_outcome) = tokio::join!(home.mount(), shop.mount());
    tracing::debug!(?home_outcome, ?shop_outcome, "sections mounted");

    if shop.state() == ControllerState::Error {
        let view = shop.view();
        let message = view.status.error_message().unwrap_or("unknown error").to_string();
        anyhow::bail!("failed to load products: {message}");
    }

    intents.apply_to(&mut shop).context("failed to apply shop intents")?;

    let featured = home.showcase();
    let facets = shop.facets();
    let sort_options: Vec<_> = SortKey::ALL
        .iter()
        .map(|key| {
            serde_json::json!({
                "value": key,
                "label": key.label(),
                "selected": *key == shop.sort(),
            })
        })
        .collect();
    let catalog = shop.view();

    let output = serde_json::json!({
        "featured": featured,
        "facets": facets,
        "sort_options": sort_options,
        "catalog": catalog,
    });
    let rendered = serde_json::to_string_pretty(&output).context("failed to render catalog")?;
    println!("{rendered}");

    Ok(())
}
