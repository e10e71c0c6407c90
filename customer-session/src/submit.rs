//! Order validation and submission outcomes
//!
//! Submission walks `Idle → Validating → Submitting → {Succeeded |
//! Failed}`. Validation is synchronous and never touches the network;
//! every rejection names the offending product and quantities so it
//! can be surfaced verbatim.

use crate::cart::CartLine;
use gstbill_client::ClientError;
use shared::{OrderDraft, OrderItemInput};
use thiserror::Error;

/// Where the last submission attempt got to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Order submission errors, one variant per user-facing category
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("your cart is empty, add products before placing an order")]
    EmptyCart,

    /// Defensive re-check; the cart store's own guards should make
    /// this unreachable
    #[error("invalid quantity for {name}, please update your cart")]
    InvalidQuantity { name: String },

    #[error("insufficient stock for {name}: available {available}, in cart {requested}")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },

    /// Response body was not valid JSON; carries a truncated snippet
    #[error("server error: {0}")]
    Server(String),

    /// Backend rejected the order; its reason verbatim
    #[error("{0}")]
    Rejected(String),

    #[error("cannot connect to server: {0}")]
    Connect(String),

    #[error("authentication required")]
    Unauthorized,
}

/// Validate the cart against the stock held in its own lines
pub fn validate(lines: &[CartLine]) -> Result<(), SubmitError> {
    if lines.is_empty() {
        return Err(SubmitError::EmptyCart);
    }

    for line in lines {
        if line.quantity == 0 {
            return Err(SubmitError::InvalidQuantity {
                name: line.product.name.clone(),
            });
        }
        if line.quantity > line.product.stock_quantity {
            return Err(SubmitError::InsufficientStock {
                name: line.product.name.clone(),
                requested: line.quantity,
                available: line.product.stock_quantity,
            });
        }
    }

    Ok(())
}

/// Snapshot the cart into a submission payload
pub fn build_draft(lines: &[CartLine], notes: &str) -> OrderDraft {
    OrderDraft {
        items: lines
            .iter()
            .map(|line| OrderItemInput {
                product_id: line.product.id,
                quantity: line.quantity,
                unit_price: line.product.price,
            })
            .collect(),
        notes: notes.to_string(),
        total_amount: lines.iter().map(CartLine::line_total).sum(),
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Connect(msg) => SubmitError::Connect(msg),
            ClientError::Unauthorized => SubmitError::Unauthorized,
            ClientError::MalformedResponse { status, body } => {
                SubmitError::Server(format!("{status}: {body}"))
            }
            ClientError::Rejected(reason) => SubmitError::Rejected(reason),
            ClientError::Status { message, .. } => SubmitError::Rejected(message),
            ClientError::Serialization(err) => SubmitError::Server(err.to_string()),
        }
    }
}
