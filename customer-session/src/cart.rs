//! Cart store and reconciliation
//!
//! The cart is an ordered collection of lines, one per product id. Its
//! invariant while settled: `0 < quantity <= product.stock_quantity`.
//! [`CartStore::reconcile`] restores the invariant after every catalog
//! snapshot arrives; user mutations enforce it up front.

use shared::Product;
use thiserror::Error;

/// One cart line: a product and the requested quantity
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Line total in currency unit
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Cart mutation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Requested quantity exceeds available stock; names the exact
    /// available quantity so the UI can show it
    #[error("only {available} of {name} available in stock")]
    InsufficientStock { name: String, available: u32 },

    #[error("product {product_id} is not in the catalog")]
    UnknownProduct { product_id: i64 },
}

/// Why a line was removed during reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Stock fell to zero
    OutOfStock,
    /// Product absent from the latest catalog snapshot
    Discontinued,
}

/// Change applied to the cart by one reconciliation pass
#[derive(Debug, Clone, PartialEq)]
pub enum CartAdjustment {
    /// Quantity reduced to the new stock level; line kept (`to >= 1`)
    QuantityClamped {
        product_id: i64,
        name: String,
        from: u32,
        to: u32,
    },
    /// Line removed entirely; `quantity` is what the user had requested
    LineDropped {
        product_id: i64,
        name: String,
        quantity: u32,
        reason: DropReason,
    },
}

impl CartAdjustment {
    /// Id of the product the adjustment applies to
    pub fn product_id(&self) -> i64 {
        match self {
            CartAdjustment::QuantityClamped { product_id, .. }
            | CartAdjustment::LineDropped { product_id, .. } => *product_id,
        }
    }
}

/// In-memory cart keyed by product id, insertion order preserved
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, product_id: i64) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    /// Requested quantity for a product, 0 when absent
    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.position(product_id)
            .map(|i| self.lines[i].quantity)
            .unwrap_or(0)
    }

    /// Add one unit of a product
    ///
    /// Inserts a new line with quantity 1, or increments an existing
    /// line clamped to stock. Adding when the cart already holds the
    /// whole stock is a no-op that reports the available quantity.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if product.stock_quantity == 0 {
            return Err(CartError::OutOfStock {
                name: product.name.clone(),
            });
        }

        let current = self.quantity_of(product.id);
        if current >= product.stock_quantity {
            return Err(CartError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock_quantity,
            });
        }

        match self.position(product.id) {
            Some(i) => {
                let line = &mut self.lines[i];
                line.product = product.clone();
                line.quantity = (line.quantity + 1).min(product.stock_quantity);
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Adjust a product's quantity by a signed delta
    ///
    /// A resulting quantity of zero or less removes the line. A result
    /// above stock is rejected without mutation.
    pub fn adjust(&mut self, product: &Product, delta: i64) -> Result<(), CartError> {
        let next = i64::from(self.quantity_of(product.id)) + delta;

        if next <= 0 {
            self.remove(product.id);
            return Ok(());
        }

        // Saturate so an oversized delta fails the stock check instead
        // of wrapping into a small quantity
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next > product.stock_quantity {
            return Err(CartError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock_quantity,
            });
        }

        match self.position(product.id) {
            Some(i) => {
                let line = &mut self.lines[i];
                line.product = product.clone();
                line.quantity = next;
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: next,
            }),
        }
        Ok(())
    }

    /// Remove a line unconditionally
    pub fn remove(&mut self, product_id: i64) -> bool {
        match self.position(product_id) {
            Some(i) => {
                self.lines.remove(i);
                true
            }
            None => false,
        }
    }

    /// Reconcile the cart against the latest catalog snapshot
    ///
    /// For each line: refresh the product data from the snapshot and
    /// clamp the quantity to the new stock; drop lines whose product is
    /// gone or whose clamped quantity is zero. Idempotent: a second
    /// pass over the same snapshot reports no changes.
    pub fn reconcile(&mut self, latest: &[Product]) -> Vec<CartAdjustment> {
        let mut adjustments = Vec::new();

        self.lines.retain_mut(|line| {
            let Some(fresh) = latest.iter().find(|p| p.id == line.product.id) else {
                adjustments.push(CartAdjustment::LineDropped {
                    product_id: line.product.id,
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    reason: DropReason::Discontinued,
                });
                return false;
            };

            let clamped = line.quantity.min(fresh.stock_quantity);
            if clamped == 0 {
                adjustments.push(CartAdjustment::LineDropped {
                    product_id: line.product.id,
                    name: fresh.name.clone(),
                    quantity: line.quantity,
                    reason: DropReason::OutOfStock,
                });
                return false;
            }

            if clamped != line.quantity {
                adjustments.push(CartAdjustment::QuantityClamped {
                    product_id: line.product.id,
                    name: fresh.name.clone(),
                    from: line.quantity,
                    to: clamped,
                });
            }

            line.product = fresh.clone();
            line.quantity = clamped;
            true
        });

        adjustments
    }

    /// Sum of `unit_price * quantity` over all lines, plain f64
    pub fn total_amount(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Drop every line (successful order or explicit user action)
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: f64, stock: u32) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            default_price: None,
            has_custom_price: false,
            stock_quantity: stock,
            image_url: None,
            sku: None,
            category: None,
            is_active: true,
        }
    }

    #[test]
    fn add_inserts_line_with_quantity_one() {
        let mut cart = CartStore::new();
        cart.add(&product(1, "Rice", 100.0, 5)).unwrap();
        assert_eq!(cart.quantity_of(1), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn add_increments_existing_line() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 5);
        cart.add(&rice).unwrap();
        cart.add(&rice).unwrap();
        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn add_at_stock_limit_is_rejected_with_available_quantity() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 2);
        cart.add(&rice).unwrap();
        cart.add(&rice).unwrap();

        let err = cart.add(&rice).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                name: "Rice".to_string(),
                available: 2
            }
        );
        // Cart unchanged
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn add_out_of_stock_product_is_rejected() {
        let mut cart = CartStore::new();
        let err = cart.add(&product(1, "Ghee", 620.0, 0)).unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                name: "Ghee".to_string()
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn adjust_to_zero_removes_line() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 5);
        cart.add(&rice).unwrap();
        cart.adjust(&rice, -1).unwrap();
        assert_eq!(cart.quantity_of(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn adjust_beyond_stock_is_rejected_without_mutation() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 3);
        cart.add(&rice).unwrap();

        let err = cart.adjust(&rice, 5).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                name: "Rice".to_string(),
                available: 3
            }
        );
        assert_eq!(cart.quantity_of(1), 1);
    }

    #[test]
    fn adjust_with_delta_beyond_u32_is_rejected() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 3);
        cart.add(&rice).unwrap();

        let err = cart.adjust(&rice, i64::from(u32::MAX) + 2).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                name: "Rice".to_string(),
                available: 3
            }
        );
        assert_eq!(cart.quantity_of(1), 1);
    }

    #[test]
    fn remove_deletes_unconditionally() {
        let mut cart = CartStore::new();
        cart.add(&product(1, "Rice", 100.0, 5)).unwrap();
        assert!(cart.remove(1));
        assert!(!cart.remove(1));
        assert!(cart.is_empty());
    }

    #[test]
    fn quantity_of_absent_product_is_zero() {
        let cart = CartStore::new();
        assert_eq!(cart.quantity_of(42), 0);
    }

    #[test]
    fn reconcile_clamps_quantity_to_new_stock() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 10);
        for _ in 0..5 {
            cart.add(&rice).unwrap();
        }

        let latest = vec![product(1, "Rice", 100.0, 3)];
        let adjustments = cart.reconcile(&latest);

        assert_eq!(cart.quantity_of(1), 3);
        assert_eq!(
            adjustments,
            vec![CartAdjustment::QuantityClamped {
                product_id: 1,
                name: "Rice".to_string(),
                from: 5,
                to: 3,
            }]
        );
        // Clamp invariant: every remaining line fits the snapshot
        for line in cart.lines() {
            let fresh = latest.iter().find(|p| p.id == line.product.id).unwrap();
            assert!(line.quantity <= fresh.stock_quantity);
        }
    }

    #[test]
    fn reconcile_drops_vanished_products() {
        let mut cart = CartStore::new();
        cart.add(&product(1, "Rice", 100.0, 5)).unwrap();
        cart.add(&product(2, "Ghee", 620.0, 5)).unwrap();

        let latest = vec![product(2, "Ghee", 620.0, 5)];
        let adjustments = cart.reconcile(&latest);

        assert_eq!(cart.quantity_of(1), 0);
        assert_eq!(cart.quantity_of(2), 1);
        assert_eq!(
            adjustments,
            vec![CartAdjustment::LineDropped {
                product_id: 1,
                name: "Rice".to_string(),
                quantity: 1,
                reason: DropReason::Discontinued,
            }]
        );
    }

    #[test]
    fn reconcile_drops_lines_clamped_to_zero() {
        let mut cart = CartStore::new();
        cart.add(&product(1, "Rice", 100.0, 5)).unwrap();

        let latest = vec![product(1, "Rice", 100.0, 0)];
        let adjustments = cart.reconcile(&latest);

        assert!(cart.is_empty());
        assert_eq!(
            adjustments,
            vec![CartAdjustment::LineDropped {
                product_id: 1,
                name: "Rice".to_string(),
                quantity: 1,
                reason: DropReason::OutOfStock,
            }]
        );
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut cart = CartStore::new();
        let rice = product(1, "Rice", 100.0, 10);
        for _ in 0..7 {
            cart.add(&rice).unwrap();
        }
        cart.add(&product(2, "Ghee", 620.0, 5)).unwrap();

        let latest = vec![product(1, "Rice", 100.0, 4)];

        let first = cart.reconcile(&latest);
        assert!(!first.is_empty());
        let lines_after_first: Vec<(i64, u32)> = cart
            .lines()
            .iter()
            .map(|l| (l.product.id, l.quantity))
            .collect();

        let second = cart.reconcile(&latest);
        assert!(second.is_empty());
        let lines_after_second: Vec<(i64, u32)> = cart
            .lines()
            .iter()
            .map(|l| (l.product.id, l.quantity))
            .collect();
        assert_eq!(lines_after_first, lines_after_second);
    }

    #[test]
    fn reconcile_refreshes_product_data() {
        let mut cart = CartStore::new();
        cart.add(&product(1, "Rice", 100.0, 5)).unwrap();

        // Customer-specific price arrived with the new snapshot
        let mut updated = product(1, "Rice", 90.0, 5);
        updated.has_custom_price = true;
        let adjustments = cart.reconcile(&[updated]);

        assert!(adjustments.is_empty());
        let line = &cart.lines()[0];
        assert_eq!(line.product.price, 90.0);
        assert!(line.product.has_custom_price);
    }

    #[test]
    fn total_amount_sums_line_totals() {
        let mut cart = CartStore::new();
        let a = product(1, "A", 100.0, 10);
        let b = product(2, "B", 50.0, 10);
        cart.adjust(&a, 2).unwrap();
        cart.adjust(&b, 3).unwrap();
        assert_eq!(cart.total_amount(), 350.0);
    }
}
