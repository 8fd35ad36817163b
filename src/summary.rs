//! Order summary
//!
//! Composes the human-readable order bill sent over the external messaging
//! hand-off. Pure text generation: no I/O, no clock reads, no cart
//! mutation, and byte-identical output for identical inputs (the message is
//! transmitted externally and asserted on in tests).

use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::TotalsPolicy,
};

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Customer-supplied checkout fields.
///
/// The order date is part of the input rather than read from the wall
/// clock, so composing the same order twice yields the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Full name.
    pub name: String,

    /// Local phone number, digits only.
    pub phone: String,

    /// Preformatted order date shown on the bill.
    pub placed_on: String,

    /// Requested pickup date/time, where the storefront collects one.
    pub pickup_at: Option<String>,
}

/// Checkout preconditions. Submission is refused, not errored-and-retried,
/// until these hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutRules {
    /// Exact number of digits the phone number must have.
    pub phone_digits: usize,

    /// Whether a pickup date/time is required.
    pub require_pickup: bool,
}

impl Default for CheckoutRules {
    fn default() -> Self {
        Self {
            phone_digits: 10,
            require_pickup: false,
        }
    }
}

/// Why a set of customer details cannot check out yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerDetailsError {
    /// The name is missing or blank.
    #[error("customer name is required")]
    EmptyName,

    /// The phone number is not exactly the expected number of digits.
    #[error("phone number must be exactly {expected} digits")]
    InvalidPhone {
        /// Digits required.
        expected: usize,
    },

    /// A pickup date/time is required but missing.
    #[error("pickup date/time is required")]
    MissingPickup,
}

impl CustomerDetails {
    /// Check the checkout preconditions.
    ///
    /// # Errors
    ///
    /// Returns the first failed [`CustomerDetailsError`] precondition.
    pub fn validate(&self, rules: &CheckoutRules) -> Result<(), CustomerDetailsError> {
        if self.name.trim().is_empty() {
            return Err(CustomerDetailsError::EmptyName);
        }

        let digits = self.phone.trim();
        if digits.len() != rules.phone_digits || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CustomerDetailsError::InvalidPhone {
                expected: rules.phone_digits,
            });
        }

        if rules.require_pickup && self.pickup_at.as_ref().is_none_or(|p| p.trim().is_empty()) {
            return Err(CustomerDetailsError::MissingPickup);
        }

        Ok(())
    }
}

/// Presentation settings for the bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Store name printed in the header.
    pub store_name: String,

    /// Symbol prefixed to every amount, e.g. "₹".
    pub currency_symbol: String,

    /// Dialing prefix printed before the customer phone, e.g. "+91".
    pub dialing_prefix: String,

    /// Totals policy; decides whether a tax line appears.
    pub policy: TotalsPolicy,
}

/// Compose the order bill for a cart and customer.
///
/// Line-by-line itemization (index, name, size, quantity × unit price, line
/// subtotal) followed by the totals block and a closing note. Amounts are
/// whole currency units prefixed with the configured symbol.
#[must_use]
pub fn compose(cart: &Cart, customer: &CustomerDetails, config: &SummaryConfig) -> String {
    let sym = &config.currency_symbol;
    let totals = cart.totals(&config.policy);

    let mut bill = String::new();

    bill.push_str(&format!("🧾 *{}*\n", config.store_name));
    bill.push_str(DIVIDER);
    bill.push_str("\n📋 *ORDER BILL*\n");
    bill.push_str(DIVIDER);
    bill.push_str("\n\n");

    bill.push_str("👤 *Customer Details*\n");
    bill.push_str(&format!("Name: {}\n", customer.name));
    bill.push_str(&format!(
        "Phone: {} {}\n",
        config.dialing_prefix, customer.phone
    ));
    bill.push_str(&format!("Date: {}\n", customer.placed_on));
    if let Some(pickup) = &customer.pickup_at {
        bill.push_str(&format!("Pickup: {pickup}\n"));
    }
    bill.push('\n');

    bill.push_str(DIVIDER);
    bill.push_str("\n🛒 *ORDER ITEMS*\n");
    bill.push_str(DIVIDER);
    bill.push_str("\n\n");

    for (index, line) in cart.lines().iter().enumerate() {
        bill.push_str(&format!("{}. *{}*\n", index + 1, line.name));

        if let Some(variant) = &line.variant {
            bill.push_str(&format!("   Size: {}\n", variant.label()));
        }

        bill.push_str(&format!(
            "   Qty: {} × {sym}{}\n",
            line.quantity,
            line.effective_price()
        ));
        bill.push_str(&format!("   Subtotal: {sym}{}\n\n", line.line_subtotal()));
    }

    bill.push_str(DIVIDER);
    bill.push_str("\n💰 *BILL SUMMARY*\n");
    bill.push_str(DIVIDER);
    bill.push('\n');

    bill.push_str(&format!(
        "Items ({}): {sym}{}\n",
        cart.item_count(),
        totals.subtotal
    ));

    if let TotalsPolicy::FlatTax { .. } = config.policy {
        bill.push_str(&format!(
            "Tax (GST {}%): {sym}{}\n",
            config.policy.rate_percent(),
            totals.tax
        ));
    }

    bill.push_str("Delivery: FREE\n");
    bill.push_str(DIVIDER);
    bill.push_str(&format!("\n*GRAND TOTAL: {sym}{}*\n", totals.grand_total));
    bill.push_str(DIVIDER);
    bill.push_str("\n\nThank you for your order! 🙏");

    bill
}
