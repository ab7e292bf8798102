//! Catalog records
//!
//! Typed records for merchants and configurable products. Raw server payloads
//! are converted into these shapes at the boundary; nothing downstream works
//! with untyped JSON.

use serde::{Deserialize, Serialize};

use crate::{ids::string_id, price::Price};

string_id! {
    /// Merchant (restaurant/store) identifier.
    MerchantId
}

string_id! {
    /// Product identifier.
    ProductId
}

string_id! {
    /// Product variation identifier.
    VariationId
}

string_id! {
    /// Product addon identifier.
    AddonId
}

/// A priced variation of a product (size, base option).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Variation id.
    pub id: VariationId,

    /// Display title.
    pub title: String,

    /// Variation base price.
    pub price: Price,
}

/// An optional extra attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Addon id.
    pub id: AddonId,

    /// Display title.
    pub title: String,

    /// Addon price, added per unit on top of the variation price.
    pub price: Price,
}

/// A configurable catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: ProductId,

    /// Owning merchant.
    pub merchant: MerchantId,

    /// Display title.
    pub title: String,

    /// Display image URL.
    #[serde(default)]
    pub image: String,

    /// ISO alpha currency code all prices are denominated in.
    pub currency: String,

    /// Available variations. A product always has at least one.
    pub variations: Vec<Variation>,

    /// Available addons.
    #[serde(default)]
    pub addons: Vec<Addon>,
}

impl Product {
    /// Looks up a variation by id.
    #[must_use]
    pub fn variation(&self, id: &VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| &v.id == id)
    }

    /// Looks up an addon by id.
    #[must_use]
    pub fn addon(&self, id: &AddonId) -> Option<&Addon> {
        self.addons.iter().find(|a| &a.id == id)
    }
}

/// A merchant as listed on browse/search screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantSummary {
    /// Merchant id.
    pub id: MerchantId,

    /// Display name.
    pub name: String,

    /// Cuisine tags used by search filters.
    #[serde(default)]
    pub cuisines: Vec<String>,

    /// Average rating, 0.0..=5.0.
    #[serde(default)]
    pub rating: f32,

    /// Whether the merchant is currently accepting orders.
    #[serde(default)]
    pub open: bool,
}
