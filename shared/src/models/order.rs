//! Order Model

use serde::{Deserialize, Serialize};

/// Line item on a submitted order or issued invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Option<i64>,
    pub product_name: String,
    pub quantity: u32,
    /// Price in currency unit
    pub unit_price: f64,
}

/// Single line of an order submission payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: u32,
    /// Price in currency unit, as held in the cart at submission time
    pub unit_price: f64,
}

/// Order submission payload (`POST /customer-auth/orders` body)
///
/// `total_amount` is the plain f64 sum of `unit_price * quantity` over
/// the items; any rounding is left to the display currency formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub items: Vec<OrderItemInput>,
    pub notes: String,
    pub total_amount: f64,
}

/// Order entity as returned by the order history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub id: i64,
    pub order_number: String,
    pub order_date: String,
    pub status: String,
    /// Total amount in currency unit
    pub total_amount: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub created_at: Option<String>,
}
