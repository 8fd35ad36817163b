//! Products
//!
//! Catalog data model shared by the shopper-facing cart, the catalog read
//! client and the admin CRUD client. The cart never mutates these; it takes
//! denormalized copies at add-time so later catalog edits do not change
//! prices already in a shopper's cart.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::ids::TypedUuid;

/// Product id
pub type ProductId = TypedUuid<Product>;

/// Variant id
pub type VariantId = TypedUuid<Variant>;

/// Unit a product quantity is measured in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    /// Grams
    Gram,
    /// Kilograms
    Kilogram,
    /// Millilitres
    Millilitre,
    /// Litres
    Litre,
    /// Individual pieces
    #[default]
    Piece,
}

impl Display for QuantityUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let label = match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Millilitre => "ml",
            Self::Litre => "L",
            Self::Piece => "pc",
        };

        f.write_str(label)
    }
}

/// A purchasable size option of a product, carrying its own price.
///
/// Admin-created variants carry an id; variants embedded in catalog payloads
/// may not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant id, when the backend assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,

    /// Quantity value, e.g. the `500` in "500g".
    pub quantity: u32,

    /// Unit the quantity is measured in.
    pub unit: QuantityUnit,

    /// Price charged when this variant is selected, overriding the
    /// product's base price. Whole currency units.
    pub price: u64,
}

impl Variant {
    /// Whether two variant copies denote the same selection.
    ///
    /// Ids win when both sides have one; otherwise the copies must be
    /// structurally equal.
    #[must_use]
    pub fn same_selection(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Human-readable size label, e.g. "500g" or "1L".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.quantity, self.unit)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Longer description
    #[serde(default)]
    pub description: String,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Category slug this product belongs to
    pub category: String,

    /// Base unit price in whole currency units; overridden by a selected
    /// variant's price.
    pub price: u64,

    /// Unit the base price applies to
    #[serde(default)]
    pub unit: QuantityUnit,

    /// Size options, possibly empty
    #[serde(default)]
    pub variants: Vec<Variant>,

    /// Whether the product is visible to shoppers
    #[serde(default = "active_default")]
    pub active: bool,
}

fn active_default() -> bool {
    true
}

/// Category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category slug
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Image URL
    #[serde(default)]
    pub image: String,
}
