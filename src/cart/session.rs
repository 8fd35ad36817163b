//! Session cart
//!
//! Wraps the cart engine with its persistent store: rehydrates on open and
//! re-saves the full snapshot after every mutation. The in-memory cart is
//! authoritative for the session; a store that stops accepting writes only
//! costs durability, never correctness.

use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartError, LineId},
    products::{Product, Variant},
    store::{CartSnapshot, CartStore},
};

/// A cart bound to a durable snapshot slot for the lifetime of a shopping
/// session. All mutation goes through the methods here; the inner [`Cart`]
/// is only handed out immutably.
#[derive(Debug)]
pub struct SessionCart {
    cart: Cart,
    store: Box<dyn CartStore>,
}

impl SessionCart {
    /// Open a session, rehydrating from the store. A missing, corrupt or
    /// unreadable snapshot starts the session with an empty cart.
    #[must_use]
    pub fn open(store: Box<dyn CartStore>) -> Self {
        let cart = match store.load() {
            Ok(Some(snapshot)) => snapshot.into_cart(),
            Ok(None) => Cart::new(),
            Err(error) => {
                warn!(%error, "cart store unreadable, starting with an empty cart");

                Cart::new()
            }
        };

        Self { cart, store }
    }

    /// The current cart contents and derived totals.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add a product to the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] for a zero quantity or an unpriced,
    /// variantless product; the cart and the stored snapshot are unchanged.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        variant: Option<&Variant>,
    ) -> Result<LineId, CartError> {
        let line_id = self.cart.add_item(product, quantity, variant)?;

        debug!(%line_id, product = %product.id, quantity, "added to cart");
        self.persist();

        Ok(line_id)
    }

    /// Remove a line and persist. A no-op if the id is absent.
    pub fn remove_line(&mut self, line: LineId) {
        self.cart.remove_line(line);
        self.persist();
    }

    /// Replace a line's quantity and persist; zero removes the line.
    pub fn set_quantity(&mut self, line: LineId, quantity: u32) {
        self.cart.set_quantity(line, quantity);
        self.persist();
    }

    /// Discard all lines and persist. Called exactly when an order hand-off
    /// has been initiated.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(error) = self.store.save(&CartSnapshot::of(&self.cart)) {
            warn!(%error, "failed to persist cart snapshot, in-memory cart remains authoritative");
        }
    }
}
