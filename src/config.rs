//! Storefront configuration
//!
//! Loaded from CLI arguments and environment variables, with a `.env` file
//! picked up when present.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::{
    checkout::{Checkout, HandoffConfig},
    pricing::TotalsPolicy,
    summary::{CheckoutRules, SummaryConfig},
};

/// Storefront client configuration
#[derive(Debug, Parser)]
#[command(name = "bodega", about = "Storefront client", long_about = None)]
pub struct StorefrontConfig {
    /// Catalog/admin API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Shop presentation and hand-off settings.
    #[command(flatten)]
    pub shop: ShopConfig,

    /// Cart persistence settings.
    #[command(flatten)]
    pub cart: CartConfig,
}

/// Remote API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// API base URL
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:8081/api")]
    pub base_url: String,

    /// Tenant slug all API paths are scoped by
    #[arg(long, env = "TENANT_SLUG", default_value = "shobha")]
    pub tenant: String,
}

/// Shop presentation and order hand-off settings.
#[derive(Debug, Args)]
pub struct ShopConfig {
    /// Store name printed on order bills
    #[arg(long, env = "STORE_NAME", default_value = "SHOBHA ENTERPRISES")]
    pub store_name: String,

    /// Symbol prefixed to currency amounts
    #[arg(long, env = "CURRENCY_SYMBOL", default_value = "₹")]
    pub currency_symbol: String,

    /// Dialing prefix shown before customer phone numbers
    #[arg(long, env = "DIALING_PREFIX", default_value = "+91")]
    pub dialing_prefix: String,

    /// Phone number orders are handed off to, digits only with country code
    #[arg(long, env = "ORDER_PHONE", default_value = "919347953935")]
    pub order_phone: String,

    /// Totals policy applied at checkout
    #[arg(long, env = "TAX_POLICY", value_enum, default_value = "gst-5")]
    pub tax_policy: TaxPolicyArg,

    /// Require a pickup date/time at checkout
    #[arg(long, env = "REQUIRE_PICKUP")]
    pub require_pickup: bool,
}

/// Cart persistence settings.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Path of the cart snapshot slot
    #[arg(long, env = "CART_SNAPSHOT_PATH", default_value = "cart.json")]
    pub snapshot_path: PathBuf,
}

/// Selectable totals policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaxPolicyArg {
    /// Flat 5% GST added at checkout
    #[value(name = "gst-5")]
    Gst5,

    /// No separate tax line
    #[value(name = "tax-inclusive")]
    TaxInclusive,
}

impl From<TaxPolicyArg> for TotalsPolicy {
    fn from(value: TaxPolicyArg) -> Self {
        match value {
            TaxPolicyArg::Gst5 => Self::GST_5,
            TaxPolicyArg::TaxInclusive => Self::TaxInclusive,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment and CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// The configured totals policy.
    #[must_use]
    pub fn totals_policy(&self) -> TotalsPolicy {
        self.shop.tax_policy.into()
    }

    /// Bill presentation settings derived from this configuration.
    #[must_use]
    pub fn summary_config(&self) -> SummaryConfig {
        SummaryConfig {
            store_name: self.shop.store_name.clone(),
            currency_symbol: self.shop.currency_symbol.clone(),
            dialing_prefix: self.shop.dialing_prefix.clone(),
            policy: self.totals_policy(),
        }
    }

    /// The full checkout flow derived from this configuration.
    #[must_use]
    pub fn checkout(&self) -> Checkout {
        Checkout {
            rules: CheckoutRules {
                require_pickup: self.shop.require_pickup,
                ..CheckoutRules::default()
            },
            summary: self.summary_config(),
            handoff: HandoffConfig {
                phone_number: self.shop.order_phone.clone(),
            },
        }
    }
}
