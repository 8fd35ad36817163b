//! Cart
//!
//! The client-side cart engine: an ordered collection of [`CartLine`]s with
//! merge-on-add identity rules and derived totals. At most one line exists
//! per (product, variant-selection) pair; adding the same pair again
//! increments that line's quantity. Lines with quantity zero do not exist.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::TypedUuid,
    pricing::{CartTotals, TotalsPolicy},
    products::{Product, ProductId, QuantityUnit, Variant},
};

pub mod session;

pub use session::SessionCart;

/// Cart line id, stable across quantity updates.
pub type LineId = TypedUuid<CartLine>;

/// Errors for invalid cart mutations. The cart is never left corrupted; a
/// rejected operation changes nothing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A mutation was requested with a quantity of zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// A variantless product with no price cannot be added.
    #[error("product {0} has no price")]
    UnpricedProduct(ProductId),
}

/// One entry in the cart: a product (plus optional variant selection) and a
/// quantity, with the display fields denormalized at add-time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable identifier for targeting this line from the UI.
    pub line_id: LineId,

    /// The product this line was created from.
    pub product_id: ProductId,

    /// Product name as it was when added.
    pub name: String,

    /// Product image as it was when added.
    pub image: String,

    /// Category slug as it was when added.
    pub category: String,

    /// Unit the base price applies to.
    pub unit: QuantityUnit,

    /// The product's base price at add-time.
    pub base_price: u64,

    /// The selected variant copy, if any. Stored resolved so later catalog
    /// edits cannot drift prices already in the cart.
    pub variant: Option<Variant>,

    /// Number of units; always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// The price actually charged per unit: the variant's price if a
    /// variant is selected, else the base price.
    #[must_use]
    pub fn effective_price(&self) -> u64 {
        self.variant.as_ref().map_or(self.base_price, |v| v.price)
    }

    /// Effective unit price × quantity.
    #[must_use]
    pub fn line_subtotal(&self) -> u64 {
        self.effective_price()
            .saturating_mul(u64::from(self.quantity))
    }

    fn matches(&self, product: ProductId, variant: Option<&Variant>) -> bool {
        self.product_id == product && same_selection(self.variant.as_ref(), variant)
    }
}

fn same_selection(a: Option<&Variant>, b: Option<&Variant>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same_selection(b),
        _ => false,
    }
}

/// Ordered cart contents. Insertion order is display order; mutations never
/// reorder lines.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, dropping any that violate the
    /// quantity invariant.
    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: lines.into_iter().filter(|line| line.quantity >= 1).collect(),
        }
    }

    /// Add a product (with an optional variant selection) to the cart.
    ///
    /// If a line for the same (product, variant-selection) pair already
    /// exists its quantity is incremented; otherwise a new line with a fresh
    /// [`LineId`] is appended. Returns the id of the affected line.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` was zero.
    /// - [`CartError::UnpricedProduct`]: the product has no base price and
    ///   no variant was selected.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        variant: Option<&Variant>,
    ) -> Result<LineId, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if variant.is_none() && product.price == 0 {
            return Err(CartError::UnpricedProduct(product.id));
        }

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(product.id, variant))
        {
            line.quantity = line.quantity.saturating_add(quantity);

            return Ok(line.line_id);
        }

        let line = CartLine {
            line_id: LineId::new(),
            product_id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            unit: product.unit,
            base_price: product.price,
            variant: variant.cloned(),
            quantity,
        };

        let line_id = line.line_id;
        self.lines.push(line);

        Ok(line_id)
    }

    /// Remove the line with the given id. A no-op if the id is absent.
    pub fn remove_line(&mut self, line: LineId) {
        self.lines.retain(|l| l.line_id != line);
    }

    /// Replace a line's quantity. A quantity of zero removes the line.
    /// A no-op if the id is absent.
    pub fn set_quantity(&mut self, line: LineId, quantity: u32) {
        if quantity == 0 {
            self.remove_line(line);
            return;
        }

        if let Some(l) = self.lines.iter_mut().find(|l| l.line_id == line) {
            l.quantity = quantity;
        }
    }

    /// Discard all lines. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    #[must_use]
    pub fn line(&self, line: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.line_id == line)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum + u64::from(line.quantity))
    }

    /// Sum of effective unit price × quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.line_subtotal()))
    }

    /// Subtotal, tax and grand total under the given policy.
    #[must_use]
    pub fn totals(&self, policy: &TotalsPolicy) -> CartTotals {
        policy.totals_for(self.subtotal())
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::VariantId;

    use super::*;

    fn oil(price: u64) -> Product {
        Product {
            id: ProductId::new(),
            name: "Groundnut Oil".to_owned(),
            description: String::new(),
            image: "oil.jpg".to_owned(),
            category: "oils".to_owned(),
            price,
            unit: QuantityUnit::Litre,
            variants: Vec::new(),
            active: true,
        }
    }

    fn size(quantity: u32, price: u64) -> Variant {
        Variant {
            id: Some(VariantId::new()),
            quantity,
            unit: QuantityUnit::Gram,
            price,
        }
    }

    #[test]
    fn add_item_appends_a_line() -> TestResult {
        let mut cart = Cart::new();
        let product = oil(180);

        let line_id = cart.add_item(&product, 2, None)?;

        let line = cart.line(line_id).ok_or("line missing")?;
        assert_eq!(line.quantity, 2);
        assert_eq!(line.effective_price(), 180);
        assert_eq!(cart.line_count(), 1);

        Ok(())
    }

    #[test]
    fn adding_same_product_and_variant_merges() -> TestResult {
        let mut cart = Cart::new();
        let product = oil(180);
        let half_kilo = size(500, 95);

        let first = cart.add_item(&product, 1, Some(&half_kilo))?;
        let second = cart.add_item(&product, 3, Some(&half_kilo))?;

        assert_eq!(first, second);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 4);

        Ok(())
    }

    #[test]
    fn different_variants_create_distinct_lines() -> TestResult {
        let mut cart = Cart::new();
        let product = oil(180);

        cart.add_item(&product, 1, Some(&size(500, 95)))?;
        cart.add_item(&product, 1, Some(&size(250, 50)))?;

        assert_eq!(cart.line_count(), 2);

        Ok(())
    }

    #[test]
    fn variantless_and_variant_lines_are_distinct() -> TestResult {
        let mut cart = Cart::new();
        let product = oil(180);

        cart.add_item(&product, 1, None)?;
        cart.add_item(&product, 1, Some(&size(500, 95)))?;

        assert_eq!(cart.line_count(), 2);

        Ok(())
    }

    #[test]
    fn add_item_rejects_zero_quantity() {
        let mut cart = Cart::new();
        let product = oil(180);

        let result = cart.add_item(&product, 0, None);

        assert_eq!(result, Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn add_item_rejects_priceless_variantless_product() {
        let mut cart = Cart::new();
        let product = oil(0);

        let result = cart.add_item(&product, 1, None);

        assert_eq!(result, Err(CartError::UnpricedProduct(product.id)));
        assert!(cart.is_empty());
    }

    #[test]
    fn priceless_product_with_variant_is_accepted() -> TestResult {
        let mut cart = Cart::new();
        let product = oil(0);
        let half_kilo = size(500, 95);

        let line_id = cart.add_item(&product, 1, Some(&half_kilo))?;

        let line = cart.line(line_id).ok_or("line missing")?;
        assert_eq!(line.effective_price(), 95);

        Ok(())
    }

    #[test]
    fn remove_line_is_noop_for_unknown_id() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(&oil(180), 1, None)?;

        cart.remove_line(LineId::new());

        assert_eq!(cart.line_count(), 1);

        Ok(())
    }

    #[test]
    fn set_quantity_replaces_quantity() -> TestResult {
        let mut cart = Cart::new();
        let line_id = cart.add_item(&oil(180), 1, None)?;

        cart.set_quantity(line_id, 5);

        assert_eq!(cart.item_count(), 5);

        Ok(())
    }

    #[test]
    fn set_quantity_zero_removes_the_line() -> TestResult {
        let mut cart = Cart::new();
        let line_id = cart.add_item(&oil(180), 2, None)?;

        cart.set_quantity(line_id, 0);

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn line_id_is_stable_across_updates() -> TestResult {
        let mut cart = Cart::new();
        let line_id = cart.add_item(&oil(180), 1, None)?;

        cart.set_quantity(line_id, 4);

        assert!(cart.line(line_id).is_some());

        Ok(())
    }

    #[test]
    fn subtotal_sums_effective_prices() -> TestResult {
        let mut cart = Cart::new();
        let plain = oil(100);
        let with_variant = oil(999);
        let half_kilo = size(500, 50);

        cart.add_item(&plain, 2, None)?;
        cart.add_item(&with_variant, 3, Some(&half_kilo))?;

        assert_eq!(cart.subtotal(), 100 * 2 + 50 * 3);

        Ok(())
    }

    #[test]
    fn totals_follow_the_policy() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(&oil(100), 2, None)?;

        let taxed = cart.totals(&TotalsPolicy::GST_5);
        assert_eq!(taxed.tax, 10);
        assert_eq!(taxed.grand_total, 210);

        let inclusive = cart.totals(&TotalsPolicy::TaxInclusive);
        assert_eq!(inclusive.tax, 0);
        assert_eq!(inclusive.grand_total, 200);

        Ok(())
    }

    #[test]
    fn clear_empties_and_is_idempotent() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(&oil(180), 1, None)?;

        cart.clear();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0);

        Ok(())
    }

    #[test]
    fn lines_keep_insertion_order() -> TestResult {
        let mut cart = Cart::new();
        let first = oil(100);
        let second = oil(200);
        let third = oil(300);

        cart.add_item(&first, 1, None)?;
        cart.add_item(&second, 1, None)?;
        cart.add_item(&third, 1, None)?;

        // Mutating a middle line must not reorder.
        let middle = cart.lines()[1].line_id;
        cart.set_quantity(middle, 7);

        let prices: Vec<u64> = cart.lines().iter().map(CartLine::effective_price).collect();
        assert_eq!(prices, vec![100, 200, 300]);

        Ok(())
    }

    #[test]
    fn from_lines_drops_zero_quantity_lines() -> TestResult {
        let mut cart = Cart::new();
        cart.add_item(&oil(180), 1, None)?;

        let mut lines = cart.lines().to_vec();
        if let Some(line) = lines.first_mut() {
            line.quantity = 0;
        }

        let restored = Cart::from_lines(lines);

        assert!(restored.is_empty());

        Ok(())
    }

    #[test]
    fn denormalized_copy_shields_cart_from_catalog_edits() -> TestResult {
        let mut cart = Cart::new();
        let mut product = oil(180);

        cart.add_item(&product, 1, None)?;

        // A later catalog edit must not change the price already in the cart.
        product.price = 400;

        assert_eq!(cart.subtotal(), 180);

        Ok(())
    }
}
