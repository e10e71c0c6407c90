//! Invoice Model

use super::order::LineItem;
use serde::{Deserialize, Serialize};

/// Invoice entity as returned by the invoice history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInvoice {
    pub id: i64,
    pub invoice_number: String,
    pub invoice_date: String,
    pub due_date: Option<String>,
    pub status: String,
    /// Total amount in currency unit
    pub total_amount: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub created_at: Option<String>,
}
