//! Pricing
//!
//! Totals policies for the cart. Two policies have shipped: a flat 5% tax
//! added at checkout, and a tax-inclusive policy with no separate tax line.
//! The policy is an explicit, named configuration; the engine never switches
//! between them silently.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Derived totals for a cart under a [`TotalsPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of effective unit price × quantity over all lines.
    pub subtotal: u64,

    /// Tax added on top of the subtotal; zero under [`TotalsPolicy::TaxInclusive`].
    pub tax: u64,

    /// Amount the shopper pays.
    pub grand_total: u64,
}

/// How a cart subtotal becomes a grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsPolicy {
    /// A fixed percentage of the subtotal, expressed in basis points, is
    /// added as a separate tax line. Rounded half-up to the nearest whole
    /// currency unit.
    FlatTax {
        /// Tax rate in basis points (500 = 5%).
        basis_points: u32,
    },

    /// No separate tax line; the grand total equals the subtotal.
    TaxInclusive,
}

impl TotalsPolicy {
    /// The flat 5% GST policy.
    pub const GST_5: Self = Self::FlatTax { basis_points: 500 };

    /// Compute totals for a subtotal under this policy.
    #[must_use]
    pub fn totals_for(&self, subtotal: u64) -> CartTotals {
        match self {
            Self::TaxInclusive => CartTotals {
                subtotal,
                tax: 0,
                grand_total: subtotal,
            },
            Self::FlatTax { basis_points } => {
                let tax = tax_on(subtotal, *basis_points);

                CartTotals {
                    subtotal,
                    tax,
                    grand_total: subtotal.saturating_add(tax),
                }
            }
        }
    }

    /// The tax rate as a percentage, e.g. "5" for 500 basis points.
    ///
    /// Empty under [`TotalsPolicy::TaxInclusive`], which has no tax line.
    #[must_use]
    pub fn rate_percent(&self) -> String {
        match self {
            Self::TaxInclusive => String::new(),
            Self::FlatTax { basis_points } => {
                let percent = Decimal::from(*basis_points) / Decimal::from(100_u32);

                percent.normalize().to_string()
            }
        }
    }
}

impl Default for TotalsPolicy {
    fn default() -> Self {
        Self::GST_5
    }
}

/// Tax in whole currency units on a subtotal, rounded half-up.
fn tax_on(subtotal: u64, basis_points: u32) -> u64 {
    let rate = Decimal::from(basis_points) / Decimal::from(10_000_u32);
    let tax = Decimal::from(subtotal) * rate;

    tax.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}
