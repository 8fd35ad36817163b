//! Checkout
//!
//! Turns a validated cart and customer into an order hand-off: the composed
//! bill is percent-encoded onto a phone-number-addressed chat deep link.
//! Opening that link is the sole submission mechanism; no server-side order
//! record exists. The cart is cleared exactly when the hand-off is
//! initiated, not before.

use thiserror::Error;
use tracing::debug;

use crate::{
    cart::SessionCart,
    summary::{self, CheckoutRules, CustomerDetails, CustomerDetailsError, SummaryConfig},
};

/// Where orders are handed off to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffConfig {
    /// Destination phone number including country code, digits only,
    /// e.g. "919347953935".
    pub phone_number: String,
}

/// Why an order could not be placed. Nothing was sent and the cart is
/// untouched in every case.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// A required customer field is missing or invalid.
    #[error(transparent)]
    Customer(#[from] CustomerDetailsError),
}

/// A successfully initiated hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The composed bill text.
    pub summary: String,

    /// The deep link to open to transmit the bill.
    pub url: String,
}

/// The checkout flow: preconditions, bill presentation and hand-off target.
#[derive(Debug, Clone)]
pub struct Checkout {
    /// Customer field preconditions.
    pub rules: CheckoutRules,

    /// Bill presentation settings.
    pub summary: SummaryConfig,

    /// Hand-off destination.
    pub handoff: HandoffConfig,
}

impl Checkout {
    /// Place an order: validate, compose the bill, build the hand-off link
    /// and clear the cart.
    ///
    /// The cart is cleared only after the summary and link exist, i.e.
    /// exactly when the hand-off is initiated.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Customer`]: a checkout precondition failed.
    pub fn place_order(
        &self,
        session: &mut SessionCart,
        customer: &CustomerDetails,
    ) -> Result<PlacedOrder, CheckoutError> {
        if session.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        customer.validate(&self.rules)?;

        let bill = summary::compose(session.cart(), customer, &self.summary);
        let url = handoff_url(&bill, &self.handoff);

        debug!(
            lines = session.cart().line_count(),
            "order hand-off initiated"
        );
        session.clear();

        Ok(PlacedOrder { summary: bill, url })
    }
}

/// Build the messaging deep link carrying the percent-encoded bill.
#[must_use]
pub fn handoff_url(summary: &str, config: &HandoffConfig) -> String {
    format!(
        "https://wa.me/{}?text={}",
        config.phone_number,
        urlencoding::encode(summary)
    )
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        pricing::TotalsPolicy,
        products::{Product, ProductId, QuantityUnit},
        store::MemoryStore,
    };

    use super::*;

    fn checkout() -> Checkout {
        Checkout {
            rules: CheckoutRules::default(),
            summary: SummaryConfig {
                store_name: "SHOBHA ENTERPRISES".to_owned(),
                currency_symbol: "₹".to_owned(),
                dialing_prefix: "+91".to_owned(),
                policy: TotalsPolicy::GST_5,
            },
            handoff: HandoffConfig {
                phone_number: "919347953935".to_owned(),
            },
        }
    }

    fn customer() -> CustomerDetails {
        CustomerDetails {
            name: "Asha Rao".to_owned(),
            phone: "9876543210".to_owned(),
            placed_on: "21/08/2026, 10:30 am".to_owned(),
            pickup_at: None,
        }
    }

    fn session_with_items() -> Result<SessionCart, crate::cart::CartError> {
        let mut session = SessionCart::open(Box::new(MemoryStore::new()));

        let ghee = Product {
            id: ProductId::new(),
            name: "Pure Ghee".to_owned(),
            description: String::new(),
            image: String::new(),
            category: "ghee".to_owned(),
            price: 600,
            unit: QuantityUnit::Litre,
            variants: Vec::new(),
            active: true,
        };

        session.add_item(&ghee, 1, None)?;

        Ok(session)
    }

    #[test]
    fn place_order_builds_link_and_clears_cart() -> TestResult {
        let mut session = session_with_items()?;

        let order = checkout().place_order(&mut session, &customer())?;

        assert!(order.url.starts_with("https://wa.me/919347953935?text="));
        assert!(order.summary.contains("Pure Ghee"));
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[test]
    fn link_carries_the_encoded_bill() -> TestResult {
        let mut session = session_with_items()?;

        let order = checkout().place_order(&mut session, &customer())?;

        let encoded = urlencoding::encode(&order.summary).into_owned();
        assert!(order.url.ends_with(&encoded));
        assert!(!order.url.contains('\n'));

        Ok(())
    }

    #[test]
    fn empty_cart_is_refused() {
        let mut session = SessionCart::open(Box::new(MemoryStore::new()));

        let result = checkout().place_order(&mut session, &customer());

        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn invalid_customer_leaves_the_cart_untouched() -> TestResult {
        let mut session = session_with_items()?;
        let incomplete = CustomerDetails {
            phone: "12345".to_owned(),
            ..customer()
        };

        let result = checkout().place_order(&mut session, &incomplete);

        assert!(matches!(result, Err(CheckoutError::Customer(_))));
        assert_eq!(session.cart().line_count(), 1);

        Ok(())
    }

    #[test]
    fn handoff_url_percent_encodes_reserved_characters() {
        let config = HandoffConfig {
            phone_number: "919347953935".to_owned(),
        };

        let url = handoff_url("a b&c\nd", &config);

        assert_eq!(
            url,
            "https://wa.me/919347953935?text=a%20b%26c%0Ad"
        );
    }
}
