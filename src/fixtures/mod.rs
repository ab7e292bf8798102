//! Fixtures
//!
//! Named catalog fixture sets for tests and demos, defined in YAML and
//! parsed into the same typed records the boundary parsers produce.

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Addon, MerchantId, MerchantSummary, Product, ProductId, Variation};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error.
    #[error("failed to parse fixture YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// No fixture set with the given name.
    #[error("unknown fixture set: {0}")]
    UnknownSet(String),

    /// Product not found in the loaded set.
    #[error("product not found: {0}")]
    ProductNotFound(String),
}

#[derive(Debug, Deserialize)]
struct FixtureDocument {
    merchants: Vec<MerchantFixture>,
}

#[derive(Debug, Deserialize)]
struct MerchantFixture {
    id: MerchantId,
    name: String,
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    rating: f32,
    #[serde(default)]
    open: bool,
    products: Vec<ProductFixture>,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: ProductId,
    title: String,
    #[serde(default)]
    image: String,
    currency: String,
    variations: Vec<Variation>,
    #[serde(default)]
    addons: Vec<Addon>,
}

/// A loaded fixture set: merchant summaries plus their full products.
#[derive(Debug)]
pub struct Fixture {
    merchants: Vec<MerchantSummary>,
    products: Vec<Product>,
}

impl Fixture {
    /// Loads a bundled fixture set by name.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownSet`] for an unknown name or a YAML
    /// error if the set fails to parse.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let raw = match name {
            "bistro" => include_str!("sets/bistro.yaml"),
            other => return Err(FixtureError::UnknownSet(other.to_owned())),
        };

        Self::from_yaml(raw)
    }

    /// Parses a fixture document from YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::Yaml`] if the document fails to parse.
    pub fn from_yaml(raw: &str) -> Result<Self, FixtureError> {
        let document: FixtureDocument = serde_norway::from_str(raw)?;

        let mut merchants = Vec::new();
        let mut products = Vec::new();

        for merchant in document.merchants {
            merchants.push(MerchantSummary {
                id: merchant.id.clone(),
                name: merchant.name,
                cuisines: merchant.cuisines,
                rating: merchant.rating,
                open: merchant.open,
            });

            for product in merchant.products {
                products.push(Product {
                    id: product.id,
                    merchant: merchant.id.clone(),
                    title: product.title,
                    image: product.image,
                    currency: product.currency,
                    variations: product.variations,
                    addons: product.addons,
                });
            }
        }

        Ok(Fixture {
            merchants,
            products,
        })
    }

    /// The merchants in the set.
    #[must_use]
    pub fn merchants(&self) -> &[MerchantSummary] {
        &self.merchants
    }

    /// The products in the set.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id string.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if no product has the id.
    pub fn product(&self, id: &str) -> Result<&Product, FixtureError> {
        self.products
            .iter()
            .find(|product| product.id.as_str() == id)
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::price::Price;

    use super::*;

    #[test]
    fn bistro_set_loads() -> TestResult {
        let fixture = Fixture::from_set("bistro")?;

        assert_eq!(fixture.merchants().len(), 3);
        assert!(fixture.products().len() >= 4, "expected several products");

        Ok(())
    }

    #[test]
    fn products_carry_their_merchant() -> TestResult {
        let fixture = Fixture::from_set("bistro")?;

        let product = fixture.product("p-padthai")?;

        assert_eq!(product.merchant, MerchantId::new("m-noodle"));
        assert_eq!(
            product.variations.first().map(|v| v.price),
            Some(Price::from_minor(950))
        );

        Ok(())
    }

    #[test]
    fn unknown_set_is_an_error() {
        assert!(matches!(
            Fixture::from_set("nope"),
            Err(FixtureError::UnknownSet(_))
        ));
    }
}
