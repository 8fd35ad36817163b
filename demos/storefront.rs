//! Storefront Example
//!
//! Walks the whole shopper flow offline: build a small catalog, fill a
//! persistent cart, print the totals and the order bill, and show the
//! hand-off link a real client would open.
//!
//! Configuration flags (store name, currency symbol, tax policy, snapshot
//! path) are the same ones the library exposes; try
//! `--tax-policy tax-inclusive`.

use anyhow::Result;

use bodega::prelude::*;

/// Storefront Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let config = StorefrontConfig::load()?;

    let oil = Product {
        id: ProductId::new(),
        name: "Groundnut Oil".to_owned(),
        description: "Cold-pressed groundnut oil".to_owned(),
        image: String::new(),
        category: "oils".to_owned(),
        price: 180,
        unit: QuantityUnit::Litre,
        variants: Vec::new(),
        active: true,
    };

    let cardamom = Product {
        id: ProductId::new(),
        name: "Green Cardamom".to_owned(),
        description: String::new(),
        image: String::new(),
        category: "spices".to_owned(),
        price: 0,
        unit: QuantityUnit::Gram,
        variants: vec![
            Variant {
                id: Some(VariantId::new()),
                quantity: 50,
                unit: QuantityUnit::Gram,
                price: 120,
            },
            Variant {
                id: Some(VariantId::new()),
                quantity: 100,
                unit: QuantityUnit::Gram,
                price: 220,
            },
        ],
        active: true,
    };

    let mut session = SessionCart::open(Box::new(FileStore::new(&config.cart.snapshot_path)));
    session.clear();

    session.add_item(&oil, 2, None)?;
    for variant in &cardamom.variants {
        session.add_item(&cardamom, 1, Some(variant))?;
    }
    // Adding the same selection again merges instead of duplicating.
    session.add_item(&cardamom, 1, cardamom.variants.first())?;

    let totals = session.cart().totals(&config.totals_policy());
    println!(
        "{} lines, {} items, subtotal {}{}, grand total {}{}",
        session.cart().line_count(),
        session.cart().item_count(),
        config.shop.currency_symbol,
        totals.subtotal,
        config.shop.currency_symbol,
        totals.grand_total,
    );

    let customer = CustomerDetails {
        name: "Asha Rao".to_owned(),
        phone: "9876543210".to_owned(),
        placed_on: "21/08/2026, 10:30 am".to_owned(),
        pickup_at: None,
    };

    let order = config.checkout().place_order(&mut session, &customer)?;

    println!("\n{}\n", order.summary);
    println!("Hand-off link: {}", order.url);
    println!("Cart is now empty: {}", session.cart().is_empty());

    Ok(())
}
