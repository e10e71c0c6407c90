//! API response envelopes
//!
//! The backend wraps every customer API payload in a `{success, ...}`
//! envelope. These types are the parse boundary: raw JSON is converted
//! into them at the fetch site before anything touches session state.

use crate::models::{CustomerInvoice, CustomerOrder, Product};
use serde::{Deserialize, Serialize};

/// Envelope for `GET /customer-auth/products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for `GET /customer-auth/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<CustomerOrder>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope for `GET /customer-auth/invoices`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub invoices: Vec<CustomerInvoice>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Envelope for `POST /customer-auth/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOrderResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
}

impl SubmitOrderResponse {
    /// Best-effort error text for a failed submission
    pub fn error_text(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Failed to submit order".to_string())
    }
}
