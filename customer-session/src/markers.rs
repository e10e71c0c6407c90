//! "Recently updated" pulse markers
//!
//! Keyed arena of cosmetic highlight flags, one per product. Each
//! `mark` hands back a generation-tagged token; a scheduled clear only
//! lands if its token still matches, so a stale timer can never clear a
//! newer marker, and clearing one product's marker never touches
//! another's.

use std::collections::HashMap;
use std::time::Duration;

/// Pulse duration for user-initiated quantity changes
pub const USER_PULSE: Duration = Duration::from_millis(500);

/// Pulse duration for reconciliation-driven changes
pub const RECONCILE_PULSE: Duration = Duration::from_millis(1000);

/// Handle for clearing one specific marking of one product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerToken {
    product_id: i64,
    generation: u64,
}

impl MarkerToken {
    pub fn product_id(&self) -> i64 {
        self.product_id
    }
}

/// Active pulse markers keyed by product id
#[derive(Debug, Default)]
pub struct UpdateMarkers {
    active: HashMap<i64, u64>,
    next_generation: u64,
}

impl UpdateMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a product as recently updated
    ///
    /// Re-marking an already marked product bumps the generation, which
    /// invalidates any clear still scheduled for the earlier marking.
    pub fn mark(&mut self, product_id: i64) -> MarkerToken {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.active.insert(product_id, generation);
        MarkerToken {
            product_id,
            generation,
        }
    }

    /// Clear a marker if the token is still current
    pub fn clear(&mut self, token: MarkerToken) -> bool {
        match self.active.get(&token.product_id) {
            Some(&generation) if generation == token.generation => {
                self.active.remove(&token.product_id);
                true
            }
            _ => false,
        }
    }

    pub fn is_marked(&self, product_id: i64) -> bool {
        self.active.contains_key(&product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
