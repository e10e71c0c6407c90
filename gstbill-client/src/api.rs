//! Customer API seam
//!
//! The session logic talks to the backend through this trait so tests
//! can substitute a scripted mock for the real [`HttpClient`].

use crate::{ClientResult, HttpClient};
use async_trait::async_trait;
use shared::response::SubmitOrderResponse;
use shared::{CustomerInvoice, CustomerOrder, OrderDraft, Product};

/// Backend operations the customer session depends on
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// Fetch the product catalog, optionally filtered by a search term
    async fn fetch_products(&self, search: Option<&str>) -> ClientResult<Vec<Product>>;

    /// Submit an order built from the cart
    async fn submit_order(&self, draft: &OrderDraft) -> ClientResult<SubmitOrderResponse>;

    /// Fetch the customer's order history
    async fn fetch_orders(&self) -> ClientResult<Vec<CustomerOrder>>;

    /// Fetch the customer's invoice history
    async fn fetch_invoices(&self) -> ClientResult<Vec<CustomerInvoice>>;
}

#[async_trait]
impl CustomerApi for HttpClient {
    async fn fetch_products(&self, search: Option<&str>) -> ClientResult<Vec<Product>> {
        self.products(search).await
    }

    async fn submit_order(&self, draft: &OrderDraft) -> ClientResult<SubmitOrderResponse> {
        self.submit_order(draft).await
    }

    async fn fetch_orders(&self) -> ClientResult<Vec<CustomerOrder>> {
        self.orders().await
    }

    async fn fetch_invoices(&self) -> ClientResult<Vec<CustomerInvoice>> {
        self.invoices().await
    }
}
