//! Bodega prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    admin::{AdminClient, AdminError, ProductDraft, VariantDraft},
    cart::{Cart, CartError, CartLine, LineId, SessionCart},
    catalog::{CatalogClient, CatalogError, HttpCatalogClient},
    checkout::{Checkout, CheckoutError, HandoffConfig, PlacedOrder},
    config::StorefrontConfig,
    pricing::{CartTotals, TotalsPolicy},
    products::{Category, Product, ProductId, QuantityUnit, Variant, VariantId},
    store::{CartSnapshot, CartStore, FileStore, MemoryStore},
    summary::{CheckoutRules, CustomerDetails, CustomerDetailsError, SummaryConfig},
};
