//! Data models

pub mod invoice;
pub mod order;
pub mod product;

pub use invoice::CustomerInvoice;
pub use order::{CustomerOrder, LineItem, OrderDraft, OrderItemInput};
pub use product::Product;
