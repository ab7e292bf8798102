//! Cart line identity

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{AddonId, ProductId, VariationId};

/// Composite identity of a cart line.
///
/// Two configurations collide on the same line exactly when they share the
/// product, the variation and the addon set. Addon ids are held sorted, so
/// the order addons were selected in never matters. The structured key (rather
/// than a joined string) makes separator-collision bugs impossible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    product: ProductId,
    variation: VariationId,
    addons: SmallVec<[AddonId; 4]>,
}

impl LineKey {
    /// Derives the key for a configuration. Addon ids are sorted and
    /// de-duplicated.
    #[must_use]
    pub fn new(product: ProductId, variation: VariationId, addons: &[AddonId]) -> Self {
        let mut addons: SmallVec<[AddonId; 4]> = addons.iter().cloned().collect();
        addons.sort_unstable();
        addons.dedup();

        LineKey {
            product,
            variation,
            addons,
        }
    }

    /// The product component of the key.
    #[must_use]
    pub fn product(&self) -> &ProductId {
        &self.product
    }

    /// The variation component of the key.
    #[must_use]
    pub fn variation(&self) -> &VariationId {
        &self.variation
    }

    /// The sorted addon ids.
    #[must_use]
    pub fn addons(&self) -> &[AddonId] {
        &self.addons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addon_order_is_irrelevant() {
        let a = LineKey::new(
            ProductId::new("p1"),
            VariationId::new("v1"),
            &[AddonId::new("a2"), AddonId::new("a1")],
        );
        let b = LineKey::new(
            ProductId::new("p1"),
            VariationId::new("v1"),
            &[AddonId::new("a1"), AddonId::new("a2")],
        );

        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_addons_collapse() {
        let a = LineKey::new(
            ProductId::new("p1"),
            VariationId::new("v1"),
            &[AddonId::new("a1"), AddonId::new("a1")],
        );

        assert_eq!(a.addons().len(), 1);
    }

    #[test]
    fn different_configurations_never_collide() {
        let base = LineKey::new(ProductId::new("p1"), VariationId::new("v1"), &[]);
        let other_variation = LineKey::new(ProductId::new("p1"), VariationId::new("v2"), &[]);
        let with_addon = LineKey::new(
            ProductId::new("p1"),
            VariationId::new("v1"),
            &[AddonId::new("a1")],
        );

        assert_ne!(base, other_variation);
        assert_ne!(base, with_addon);
    }
}
