//! Catalog state
//!
//! Holds the latest product snapshot from the backend plus the search
//! term and loading flags. The list is only ever replaced wholesale by
//! a successful fetch; a failed fetch keeps the stale list so a
//! transient network blip cannot destroy a working cart.

use shared::Product;
use std::time::Duration;

/// Background refresh interval (silent fetch)
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Held product list with fetch bookkeeping
#[derive(Debug, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    search_term: Option<String>,
    loading: bool,
    loaded_once: bool,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a fetch; silent fetches never show a spinner
    pub fn begin_fetch(&mut self, silent: bool) {
        if !silent {
            self.loading = true;
        }
    }

    /// Replace the whole held list with a fresh snapshot
    pub fn complete_fetch(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loading = false;
        self.loaded_once = true;
    }

    /// Record a failed fetch, keeping the previous list
    ///
    /// Also terminates the loading state so a first-load failure does
    /// not leave the UI spinning forever.
    pub fn fail_fetch(&mut self) {
        self.loading = false;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, product_id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether at least one fetch has succeeded
    pub fn loaded_once(&self) -> bool {
        self.loaded_once
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn set_search_term(&mut self, term: Option<String>) {
        self.search_term = term.filter(|t| !t.is_empty());
    }
}
