//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity as published by the catalog endpoint
///
/// Server-owned and read-only on the client: each catalog fetch replaces
/// the whole held list, individual products are never patched locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Effective unit price for the logged-in customer
    pub price: f64,
    /// Catalog price before any customer-specific override
    pub default_price: Option<f64>,
    #[serde(default)]
    pub has_custom_price: bool,
    /// Units currently available; zero means out of stock
    pub stock_quantity: u32,
    pub image_url: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Whether at least one unit can be ordered
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
