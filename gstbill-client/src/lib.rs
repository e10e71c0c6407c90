//! GST Billing Client - HTTP client for the customer REST API
//!
//! Provides network-based calls to the billing backend's customer
//! endpoints: product catalog, order submission, and order/invoice
//! history. The [`CustomerApi`] trait is the seam the session logic is
//! written against, so tests can drive it with a scripted mock.

pub mod api;
pub mod config;
pub mod error;
pub mod http;

pub use api::CustomerApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::models::{CustomerInvoice, CustomerOrder, OrderDraft, Product};
