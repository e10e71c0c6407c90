//! Shared types for the GST billing customer client
//!
//! Data model and wire types used by both the HTTP client and the
//! customer session logic: products, orders, invoices, and the response
//! envelopes the backend wraps them in.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{CustomerInvoice, CustomerOrder, LineItem, OrderDraft, OrderItemInput, Product};
pub use response::{
    InvoiceListResponse, OrderListResponse, ProductListResponse, SubmitOrderResponse,
};
