//! Customer session logic for the GST billing storefront
//!
//! Keeps a client-held shopping cart consistent with the server-owned
//! product catalog and turns the cart into a submitted order:
//!
//! - [`cart::CartStore`] holds the cart and reconciles it against each
//!   catalog snapshot (clamp to stock, drop vanished products).
//! - [`catalog::CatalogState`] tracks the held product list, the search
//!   term, and the first-load spinner flag.
//! - [`markers::UpdateMarkers`] is the keyed arena of "recently updated"
//!   pulse flags with independently cancellable clears.
//! - [`submit`] validates the cart and classifies submission outcomes.
//! - [`session::CustomerSession`] ties these together over a
//!   [`gstbill_client::CustomerApi`] implementation and runs the
//!   5-minute silent background refresh.

pub mod cart;
pub mod catalog;
pub mod logging;
pub mod markers;
pub mod session;
pub mod submit;

pub use cart::{CartAdjustment, CartError, CartLine, CartStore, DropReason};
pub use catalog::{CatalogState, REFRESH_INTERVAL};
pub use markers::{MarkerToken, UpdateMarkers, RECONCILE_PULSE, USER_PULSE};
pub use session::{CustomerSession, StockNotice};
pub use submit::{SubmitError, SubmitPhase};
