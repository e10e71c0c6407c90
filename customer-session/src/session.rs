//! Customer session facade
//!
//! Ties the catalog state, cart store, pulse markers, and order
//! submission together over a [`CustomerApi`] implementation. Session
//! state lives behind one `RwLock`: user mutations and whole-snapshot
//! reconciliation each run to completion under the write lock, so the
//! cart is never observed mid-reconciliation. Late catalog responses
//! are applied as-is; reconciliation is idempotent, last one wins.

use crate::cart::{CartAdjustment, CartError, CartLine, CartStore};
use crate::catalog::{CatalogState, REFRESH_INTERVAL};
use crate::markers::{MarkerToken, UpdateMarkers, RECONCILE_PULSE, USER_PULSE};
use crate::submit::{self, SubmitError, SubmitPhase};
use chrono::{DateTime, Utc};
use gstbill_client::{ClientResult, CustomerApi};
use parking_lot::RwLock;
use serde::Serialize;
use shared::response::SubmitOrderResponse;
use shared::{CustomerInvoice, CustomerOrder, Product};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Durable record of a background clamp or drop
///
/// The pulse marker fades after a second; these stay until the user
/// dismisses them, so a cart shrunk by a background refresh is never
/// silently smaller.
#[derive(Debug, Clone, Serialize)]
pub struct StockNotice {
    pub id: u64,
    pub product_name: String,
    pub previous_quantity: u32,
    pub new_quantity: u32,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct SessionState {
    catalog: CatalogState,
    cart: CartStore,
    markers: UpdateMarkers,
    notes: String,
    notices: Vec<StockNotice>,
    next_notice_id: u64,
    submit_phase: SubmitPhase,
}

impl SessionState {
    fn push_notice(&mut self, product_name: &str, from: u32, to: u32) {
        self.next_notice_id += 1;
        self.notices.push(StockNotice {
            id: self.next_notice_id,
            product_name: product_name.to_string(),
            previous_quantity: from,
            new_quantity: to,
            at: Utc::now(),
        });
    }
}

/// Customer storefront session
///
/// Cheap to clone; clones share the same state and API handle.
#[derive(Debug)]
pub struct CustomerSession<A> {
    api: Arc<A>,
    state: Arc<RwLock<SessionState>>,
}

impl<A> Clone for CustomerSession<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: CustomerApi + 'static> CustomerSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    // ========== Catalog ==========

    /// Fetch the catalog and reconcile the cart against it
    ///
    /// Silent fetches never touch the loading flag. On failure the
    /// previous product list is retained and the error is logged and
    /// returned; the background loop swallows it, explicit callers may
    /// surface it.
    pub async fn refresh_catalog(&self, silent: bool) -> ClientResult<()> {
        let search = {
            let mut state = self.state.write();
            state.catalog.begin_fetch(silent);
            state.catalog.search_term().map(str::to_string)
        };

        match self.api.fetch_products(search.as_deref()).await {
            Ok(products) => {
                self.apply_catalog(products);
                Ok(())
            }
            Err(err) => {
                self.state.write().catalog.fail_fetch();
                tracing::warn!(error = %err, silent, "failed to load products");
                Err(err)
            }
        }
    }

    /// Apply a catalog snapshot: replace the held list, reconcile the
    /// cart, and record pulses + durable notices for every adjustment
    pub fn apply_catalog(&self, products: Vec<Product>) {
        let tokens = {
            let mut state = self.state.write();
            let adjustments = state.cart.reconcile(&products);
            state.catalog.complete_fetch(products);

            let mut tokens = Vec::with_capacity(adjustments.len());
            for adjustment in &adjustments {
                tokens.push(state.markers.mark(adjustment.product_id()));
                match adjustment {
                    CartAdjustment::QuantityClamped { name, from, to, .. } => {
                        tracing::info!(product = %name, from, to, "cart quantity clamped to stock");
                        state.push_notice(name, *from, *to);
                    }
                    CartAdjustment::LineDropped { name, quantity, .. } => {
                        tracing::info!(product = %name, quantity, "cart line dropped");
                        state.push_notice(name, *quantity, 0);
                    }
                }
            }
            tokens
        };

        for token in tokens {
            self.schedule_marker_clear(token, RECONCILE_PULSE);
        }
    }

    /// Change the search term and re-fetch (non-silent, like the
    /// initial load)
    pub async fn set_search_term(&self, term: Option<String>) -> ClientResult<()> {
        self.state.write().catalog.set_search_term(term);
        self.refresh_catalog(false).await
    }

    /// Spawn the 5-minute silent background refresh loop
    pub fn spawn_refresh_task(&self) -> JoinHandle<()> {
        self.spawn_refresh_task_with_interval(REFRESH_INTERVAL)
    }

    pub fn spawn_refresh_task_with_interval(&self, period: Duration) -> JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately; the initial load is the
            // caller's explicit refresh_catalog(false)
            interval.tick().await;
            loop {
                interval.tick().await;
                // Errors are logged inside refresh_catalog; stale data
                // stays usable until the next tick
                let _ = session.refresh_catalog(true).await;
            }
        })
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.read().catalog.products().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().catalog.is_loading()
    }

    pub fn loaded_once(&self) -> bool {
        self.state.read().catalog.loaded_once()
    }

    // ========== Cart ==========

    /// Add one unit of a catalog product to the cart
    pub fn add_to_cart(&self, product_id: i64) -> Result<(), CartError> {
        let token = {
            let mut state = self.state.write();
            let product = state
                .catalog
                .find(product_id)
                .cloned()
                .ok_or(CartError::UnknownProduct { product_id })?;
            state.cart.add(&product)?;
            state.markers.mark(product_id)
        };
        self.schedule_marker_clear(token, USER_PULSE);
        Ok(())
    }

    /// Adjust a cart quantity by a signed delta
    pub fn update_quantity(&self, product_id: i64, delta: i64) -> Result<(), CartError> {
        let token = {
            let mut state = self.state.write();
            let product = state
                .catalog
                .find(product_id)
                .cloned()
                .ok_or(CartError::UnknownProduct { product_id })?;
            state.cart.adjust(&product, delta)?;
            state.markers.mark(product_id)
        };
        self.schedule_marker_clear(token, USER_PULSE);
        Ok(())
    }

    /// Remove a line from the cart
    pub fn remove_from_cart(&self, product_id: i64) -> bool {
        self.state.write().cart.remove(product_id)
    }

    pub fn cart_quantity(&self, product_id: i64) -> u32 {
        self.state.read().cart.quantity_of(product_id)
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.state.read().cart.lines().to_vec()
    }

    pub fn cart_total(&self) -> f64 {
        self.state.read().cart.total_amount()
    }

    pub fn cart_is_empty(&self) -> bool {
        self.state.read().cart.is_empty()
    }

    /// Empty the cart without submitting (explicit user action)
    pub fn clear_cart(&self) {
        self.state.write().cart.clear();
    }

    pub fn is_marked(&self, product_id: i64) -> bool {
        self.state.read().markers.is_marked(product_id)
    }

    // ========== Notes ==========

    pub fn set_notes(&self, notes: impl Into<String>) {
        self.state.write().notes = notes.into();
    }

    pub fn notes(&self) -> String {
        self.state.read().notes.clone()
    }

    // ========== Stock notices ==========

    pub fn stock_notices(&self) -> Vec<StockNotice> {
        self.state.read().notices.clone()
    }

    pub fn dismiss_stock_notice(&self, notice_id: u64) {
        self.state.write().notices.retain(|n| n.id != notice_id);
    }

    // ========== Order submission ==========

    /// Validate the cart and submit it as an order
    ///
    /// Validation failures return before any network call. On a
    /// confirmed success the cart and notes are cleared and a silent
    /// catalog refresh is triggered so displayed stock reflects the
    /// decremented server state; on any failure the cart is untouched
    /// so the user can retry.
    pub async fn submit_order(&self) -> Result<SubmitOrderResponse, SubmitError> {
        let draft = {
            let mut state = self.state.write();
            state.submit_phase = SubmitPhase::Validating;
            if let Err(err) = submit::validate(state.cart.lines()) {
                state.submit_phase = SubmitPhase::Failed;
                return Err(err);
            }
            let draft = submit::build_draft(state.cart.lines(), &state.notes);
            state.submit_phase = SubmitPhase::Submitting;
            draft
        };

        match self.api.submit_order(&draft).await {
            Ok(receipt) => {
                {
                    let mut state = self.state.write();
                    state.cart.clear();
                    state.notes.clear();
                    state.submit_phase = SubmitPhase::Succeeded;
                }
                tracing::info!(
                    total = draft.total_amount,
                    items = draft.items.len(),
                    "order submitted"
                );
                if let Err(err) = self.refresh_catalog(true).await {
                    tracing::warn!(error = %err, "post-order catalog refresh failed");
                }
                Ok(receipt)
            }
            Err(err) => {
                self.state.write().submit_phase = SubmitPhase::Failed;
                Err(err.into())
            }
        }
    }

    pub fn submit_phase(&self) -> SubmitPhase {
        self.state.read().submit_phase
    }

    // ========== History ==========

    /// Load the customer's order history
    pub async fn load_orders(&self) -> ClientResult<Vec<CustomerOrder>> {
        self.api.fetch_orders().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load orders");
        })
    }

    /// Load the customer's invoice history
    pub async fn load_invoices(&self) -> ClientResult<Vec<CustomerInvoice>> {
        self.api.fetch_invoices().await.inspect_err(|err| {
            tracing::warn!(error = %err, "failed to load invoices");
        })
    }

    // ========== Internals ==========

    /// Schedule an independently cancellable marker clear
    ///
    /// Each clear holds its own token; a marker re-marked in the
    /// meantime has a newer generation and survives the stale clear.
    fn schedule_marker_clear(&self, token: MarkerToken, after: Duration) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            state.write().markers.clear(token);
        });
    }
}
