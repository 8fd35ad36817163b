//! Store
//!
//! The persistent store adapter: a single durable slot holding the full
//! serialized cart snapshot. Pure I/O; the cart engine re-saves the whole
//! snapshot after every mutation and rehydrates from it on session start.
//! Corrupt or missing snapshots always load as "no prior cart".

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Current snapshot schema version. Snapshots carrying any other version
/// load as an empty cart rather than being repaired.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The full serializable state of the cart at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Schema version for future evolution.
    pub version: u32,

    /// The cart lines in display order.
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    /// Snapshot the given cart.
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            lines: cart.lines().to_vec(),
        }
    }

    /// Rebuild a cart from this snapshot. A snapshot with an unknown
    /// version yields an empty cart.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        if self.version == SNAPSHOT_VERSION {
            Cart::from_lines(self.lines)
        } else {
            Cart::new()
        }
    }
}

/// Errors from the storage slot itself.
///
/// Decode failures are deliberately not represented: an unreadable snapshot
/// loads as `None`, never as an error the shopper path has to handle.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage slot could not be read or written.
    #[error("storage slot unavailable")]
    Unavailable(#[source] std::io::Error),

    /// The snapshot could not be encoded for writing.
    #[error("snapshot could not be encoded")]
    Encode(#[source] serde_json::Error),
}

/// A durable slot for one cart snapshot. Last write wins.
pub trait CartStore: std::fmt::Debug {
    /// Overwrite the slot with the given snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot cannot be written. Callers on
    /// the shopper path treat this as non-fatal.
    fn save(&self, snapshot: &CartSnapshot) -> Result<(), StoreError>;

    /// Read the slot. Missing, corrupt or version-mismatched contents
    /// yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] only if the slot itself is unreadable.
    fn load(&self) -> Result<Option<CartSnapshot>, StoreError>;

    /// Empty the slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot cannot be cleared.
    fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::{Product, ProductId, QuantityUnit};

    use super::*;

    fn sample_cart() -> Result<Cart, crate::cart::CartError> {
        let mut cart = Cart::new();
        let product = Product {
            id: ProductId::new(),
            name: "Cardamom".to_owned(),
            description: String::new(),
            image: String::new(),
            category: "spices".to_owned(),
            price: 120,
            unit: QuantityUnit::Gram,
            variants: Vec::new(),
            active: true,
        };

        cart.add_item(&product, 2, None)?;

        Ok(cart)
    }

    #[test]
    fn snapshot_round_trips_the_cart() -> TestResult {
        let cart = sample_cart()?;

        let restored = CartSnapshot::of(&cart).into_cart();

        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn unknown_version_yields_empty_cart() -> TestResult {
        let cart = sample_cart()?;
        let mut snapshot = CartSnapshot::of(&cart);
        snapshot.version = 99;

        assert!(snapshot.into_cart().is_empty());

        Ok(())
    }

    #[test]
    fn snapshot_serializes_with_version_field() -> TestResult {
        let snapshot = CartSnapshot::of(&Cart::new());

        let json = serde_json::to_value(&snapshot)?;

        assert_eq!(json["version"], SNAPSHOT_VERSION);

        Ok(())
    }
}
