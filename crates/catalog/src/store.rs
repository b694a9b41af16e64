//! Product store: the authoritative product list plus its fetch status.
//!
//! The store issues at most one request while its list is empty. A `load()`
//! arriving while another is in flight returns immediately instead of racing
//! or queueing behind it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use storefront_core::duplicate_ids;

use crate::product::Product;

/// Failure reported by a product source.
///
/// The store only keeps the rendered message; the variants exist for the
/// adapters' own logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("product fetch timed out after {0} ms")]
    TimedOut(u64),
}

/// Where products come from (HTTP, local file, fixtures).
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError>;
}

#[async_trait]
impl<S> ProductSource for Arc<S>
where
    S: ProductSource + ?Sized,
{
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        (**self).fetch_all().await
    }
}

/// In-memory product source for tests/dev. Counts how often it is called.
#[derive(Debug)]
pub struct InMemoryProductSource {
    result: Result<Vec<Product>, SourceError>,
    calls: AtomicUsize,
}

impl InMemoryProductSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            result: Ok(products),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for InMemoryProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Request status of the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl FetchStatus {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What a `load()` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The source was called and returned this many products.
    Fetched(usize),
    /// The source was called and failed; the status now carries the message.
    Failed(String),
    /// Products were already present; nothing was requested.
    AlreadyLoaded,
    /// Another load is in flight; this call was suppressed.
    InFlight,
}

/// Consistent view of the store at one instant.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub products: Arc<[Product]>,
    pub status: FetchStatus,
    /// Bumped every time a fetch stores a new list.
    pub revision: u64,
}

#[derive(Debug)]
struct StoreState {
    products: Arc<[Product]>,
    status: FetchStatus,
    revision: u64,
}

/// Shared product list with a fetch-once policy.
///
/// Wrap in an `Arc` to share between page sections; all methods take `&self`.
#[derive(Debug)]
pub struct ProductStore<S> {
    source: S,
    fetch_timeout: Option<Duration>,
    state: RwLock<StoreState>,
}

impl<S> ProductStore<S>
where
    S: ProductSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            fetch_timeout: None,
            state: RwLock::new(StoreState {
                products: Arc::from(Vec::new()),
                status: FetchStatus::Idle,
                revision: 0,
            }),
        }
    }

    /// Fail a fetch that has not completed within `timeout`.
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn status(&self) -> FetchStatus {
        self.read_state().status.clone()
    }

    pub fn products(&self) -> Arc<[Product]> {
        self.read_state().products.clone()
    }

    pub fn revision(&self) -> u64 {
        self.read_state().revision
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.read_state();
        StoreSnapshot {
            products: state.products.clone(),
            status: state.status.clone(),
            revision: state.revision,
        }
    }

    /// Fetch products unless they are already present or being fetched.
    ///
    /// Dropping the returned future before it completes puts the store back
    /// to `Idle`, so a later call can issue a fresh request.
    pub async fn load(&self) -> LoadOutcome {
        {
            let mut state = self.write_state();
            if !state.products.is_empty() {
                debug!(count = state.products.len(), "products already loaded; skipping fetch");
                return LoadOutcome::AlreadyLoaded;
            }
            if state.status == FetchStatus::Loading {
                debug!("product fetch already in flight; suppressing duplicate load");
                return LoadOutcome::InFlight;
            }
            state.status = FetchStatus::Loading;
        }

        let guard = InFlightGuard {
            store: self,
            armed: true,
        };

        info!("fetching products");
        let result = match self.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.source.fetch_all()).await {
                Ok(result) => result,
                Err(_) => Err(SourceError::TimedOut(limit.as_millis() as u64)),
            },
            None => self.source.fetch_all().await,
        };
        guard.disarm();

        let mut state = self.write_state();
        match result {
            Ok(products) => {
                let duplicates = duplicate_ids(&products);
                if !duplicates.is_empty() {
                    warn!(?duplicates, "product source returned duplicate ids");
                }
                let count = products.len();
                state.products = Arc::from(products);
                state.status = FetchStatus::Success;
                state.revision += 1;
                info!(count, "products loaded");
                LoadOutcome::Fetched(count)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(error = %message, "product fetch failed");
                state.status = FetchStatus::Error(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets `Loading` back to `Idle` if a load future is dropped mid-fetch.
struct InFlightGuard<'a, S>
where
    S: ProductSource,
{
    store: &'a ProductStore<S>,
    armed: bool,
}

impl<S> InFlightGuard<'_, S>
where
    S: ProductSource,
{
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S> Drop for InFlightGuard<'_, S>
where
    S: ProductSource,
{
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.store.write_state();
        if state.status == FetchStatus::Loading {
            warn!("product fetch abandoned before completion");
            state.status = FetchStatus::Idle;
        }
    }
}
