//! Cart
//!
//! The pricing/reconciliation state container. All mutations are synchronous
//! pure computations over the in-memory state; no operation fails. Invalid
//! configurations (unknown variation or addon ids) leave the cart untouched
//! and are only observable through a diagnostic log. A cross-merchant add is
//! not an error either: the attempted line is staged as [`CartState::pending`]
//! and the caller receives [`CartOutcome::RequiresConfirmation`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    catalog::{AddonId, MerchantId, Product, VariationId},
    price::Price,
};

pub mod checkout;
pub mod key;
pub mod summary;

pub use checkout::Checkout;
pub use key::LineKey;

/// One configured product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    key: LineKey,
    merchant: MerchantId,
    title: String,
    image: String,
    currency: String,
    unit_price: Price,
    quantity: u64,
}

impl CartLine {
    /// The composite identity of this line.
    #[must_use]
    pub fn key(&self) -> &LineKey {
        &self.key
    }

    /// The merchant this line belongs to.
    #[must_use]
    pub fn merchant(&self) -> &MerchantId {
        &self.merchant
    }

    /// Display title of the product.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// ISO alpha currency code of the prices on this line.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Price of one unit: variation price plus the sum of addon prices.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Units of this configuration in the cart. Strictly positive while the
    /// line exists.
    #[must_use]
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Contribution of this line to the cart total.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Result of a cart mutation.
///
/// Modelled as a tagged union rather than hidden state flags, so callers
/// cannot forget to check for the confirmation case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// The line was inserted or updated.
    Committed {
        /// Identity of the affected line.
        key: LineKey,
    },

    /// The line was removed (its quantity reached zero).
    Removed {
        /// Identity of the removed line.
        key: LineKey,
    },

    /// The item belongs to a different merchant than the current cart. The
    /// attempt was staged as the pending line; committing it requires the
    /// caller to confirm replacing the cart ([`CartState::confirm_replace`]).
    RequiresConfirmation,

    /// Nothing changed (invalid configuration, or no such line).
    Unchanged,
}

/// The cart state container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PersistedCart", into = "PersistedCart")]
pub struct CartState {
    lines: FxHashMap<LineKey, CartLine>,
    merchant: Option<MerchantId>,
    total_quantity: u64,
    total_price: Price,
    pending: Option<CartLine>,
    popup_visible: bool,
    checkout: Checkout,
}

impl CartState {
    /// Adds the given quantity of one product configuration.
    ///
    /// Re-adding a configuration already in the cart accumulates onto the
    /// existing line. A quantity of zero or below removes the line instead.
    /// On an empty cart the product's merchant is adopted as the cart
    /// merchant; on a non-empty cart owned by a different merchant the
    /// attempt is staged instead of merged. The unit price is always
    /// recomputed from the current catalog data, so a stale persisted price
    /// is corrected on the next upsert.
    pub fn add_quantity(
        &mut self,
        product: &Product,
        variation: &VariationId,
        addons: &[AddonId],
        quantity: i64,
    ) -> CartOutcome {
        let Some(line) = self.build_line(product, variation, addons, quantity.max(0)) else {
            return CartOutcome::Unchanged;
        };

        if self.conflicts_with(&product.merchant) {
            if quantity <= 0 {
                // A removal can never apply to a foreign-merchant cart.
                debug!(merchant = %product.merchant, "cross-merchant removal ignored");
                return CartOutcome::Unchanged;
            }

            self.pending = Some(line);
            self.recompute_popup(&product.merchant);

            return CartOutcome::RequiresConfirmation;
        }

        let outcome = if quantity <= 0 {
            self.remove_line(&line.key)
        } else {
            self.upsert_line(line)
        };

        self.collapse_if_empty();
        self.recompute_popup(&product.merchant);

        outcome
    }

    /// Adds one unit to an existing line.
    pub fn increase_quantity(&mut self, key: &LineKey) -> CartOutcome {
        let Some(line) = self.lines.get_mut(key) else {
            return CartOutcome::Unchanged;
        };

        line.quantity = line.quantity.saturating_add(1);
        let merchant = line.merchant.clone();
        let unit = line.unit_price;

        self.total_quantity = self.total_quantity.saturating_add(1);
        self.total_price = self.total_price.saturating_add(unit);
        self.recompute_popup(&merchant);

        CartOutcome::Committed { key: key.clone() }
    }

    /// Removes one unit from an existing line, dropping the line when it
    /// reaches zero.
    pub fn decrease_quantity(&mut self, key: &LineKey) -> CartOutcome {
        let Some(line) = self.lines.get_mut(key) else {
            return CartOutcome::Unchanged;
        };

        let merchant = line.merchant.clone();

        let outcome = if line.quantity <= 1 {
            self.remove_line(key)
        } else {
            line.quantity -= 1;
            let unit = line.unit_price;
            self.total_quantity = self.total_quantity.saturating_sub(1);
            self.total_price = self.total_price.saturating_sub(unit);

            CartOutcome::Committed { key: key.clone() }
        };

        self.collapse_if_empty();
        self.recompute_popup(&merchant);

        outcome
    }

    /// Removes an entire line regardless of its quantity.
    pub fn decrease_to_zero(&mut self, key: &LineKey) -> CartOutcome {
        let Some(merchant) = self.lines.get(key).map(|line| line.merchant.clone()) else {
            return CartOutcome::Unchanged;
        };

        let outcome = self.remove_line(key);
        self.collapse_if_empty();
        self.recompute_popup(&merchant);

        outcome
    }

    /// Commits the staged pending line after clearing the conflicting cart.
    pub fn confirm_replace(&mut self) -> CartOutcome {
        let Some(line) = self.pending.take() else {
            return CartOutcome::Unchanged;
        };

        self.clear();

        let key = line.key.clone();
        let merchant = line.merchant.clone();

        self.merchant = Some(line.merchant.clone());
        self.total_quantity = line.quantity;
        self.total_price = line.line_total();
        self.lines.insert(key.clone(), line);
        self.recompute_popup(&merchant);

        CartOutcome::Committed { key }
    }

    /// Drops the staged pending line, leaving the cart as it was.
    pub fn dismiss_pending(&mut self) {
        self.pending = None;
    }

    /// Resets the cart to its initial empty state, checkout defaults
    /// included.
    pub fn clear(&mut self) {
        *self = CartState::default();
    }

    /// Mutable access to the checkout sub-record. Checkout fields are
    /// independently settable and survive cart mutations until the cart is
    /// cleared.
    pub fn checkout_mut(&mut self) -> &mut Checkout {
        &mut self.checkout
    }

    /// The checkout sub-record.
    #[must_use]
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Iterates over the cart lines in unspecified order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Looks up a line by key.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.get(key)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The merchant all lines belong to, if the cart is non-empty.
    #[must_use]
    pub fn merchant(&self) -> Option<&MerchantId> {
        self.merchant.as_ref()
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.total_quantity
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.total_price
    }

    /// Amount payable after the checkout coupon and tip are applied.
    #[must_use]
    pub fn payable(&self) -> Price {
        self.checkout.payable(self.total_price)
    }

    /// The staged cross-merchant line, if a confirmation is outstanding.
    #[must_use]
    pub fn pending(&self) -> Option<&CartLine> {
        self.pending.as_ref()
    }

    /// Whether a destructive confirmation is required before the pending
    /// line can be committed.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the cart popup affordance should be shown. Recomputed on
    /// every mutation: non-empty cart whose merchant matches the item just
    /// processed.
    #[must_use]
    pub fn popup_visible(&self) -> bool {
        self.popup_visible
    }

    /// ISO alpha currency code of the cart, taken from any line.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.lines.values().next().map(CartLine::currency)
    }

    /// Resolves a configuration against current catalog data. Unknown
    /// variation or addon ids make the whole operation a no-op.
    fn build_line(
        &self,
        product: &Product,
        variation: &VariationId,
        addons: &[AddonId],
        quantity: i64,
    ) -> Option<CartLine> {
        let Some(variation) = product.variation(variation) else {
            warn!(
                product = %product.id,
                variation = %variation,
                "variation not on product; cart unchanged"
            );
            return None;
        };

        let key = LineKey::new(product.id.clone(), variation.id.clone(), addons);

        let mut unit_price = variation.price;
        for id in key.addons() {
            let Some(addon) = product.addon(id) else {
                warn!(
                    product = %product.id,
                    addon = %id,
                    "addon not on product; cart unchanged"
                );
                return None;
            };

            unit_price = unit_price.saturating_add(addon.price);
        }

        Some(CartLine {
            key,
            merchant: product.merchant.clone(),
            title: product.title.clone(),
            image: product.image.clone(),
            currency: product.currency.clone(),
            unit_price,
            quantity: u64::try_from(quantity).unwrap_or(0),
        })
    }

    /// Whether adding for this merchant would violate merchant exclusivity.
    fn conflicts_with(&self, merchant: &MerchantId) -> bool {
        !self.lines.is_empty() && self.merchant.as_ref().is_some_and(|current| current != merchant)
    }

    /// Inserts a line, or accumulates onto an existing one, adjusting the
    /// running totals by the delta only. The totals must always equal the
    /// true sum over lines; the integration suite checks that after every
    /// operation.
    fn upsert_line(&mut self, line: CartLine) -> CartOutcome {
        if self.lines.is_empty() {
            self.merchant = Some(line.merchant.clone());
        }

        let key = line.key.clone();

        if let Some(existing) = self.lines.get_mut(&key) {
            // Accumulate onto the line and reprice it: remove the old
            // contribution, add the merged one. The unit price may have
            // changed since the line was first added.
            let merged = existing.quantity.saturating_add(line.quantity);

            self.total_quantity = self
                .total_quantity
                .saturating_sub(existing.quantity)
                .saturating_add(merged);
            self.total_price = self
                .total_price
                .saturating_sub(existing.line_total())
                .saturating_add(line.unit_price.times(merged));

            existing.quantity = merged;
            existing.unit_price = line.unit_price;
            existing.title = line.title;
            existing.image = line.image;
        } else {
            self.total_quantity = self.total_quantity.saturating_add(line.quantity);
            self.total_price = self.total_price.saturating_add(line.line_total());
            self.lines.insert(key.clone(), line);
        }

        CartOutcome::Committed { key }
    }

    /// Removes a line and subtracts its prior contribution from the totals.
    fn remove_line(&mut self, key: &LineKey) -> CartOutcome {
        let Some(line) = self.lines.remove(key) else {
            return CartOutcome::Unchanged;
        };

        self.total_quantity = self.total_quantity.saturating_sub(line.quantity);
        self.total_price = self.total_price.saturating_sub(line.line_total());

        CartOutcome::Removed { key: key.clone() }
    }

    /// Force-resets the whole cart whenever the total quantity reaches zero,
    /// independent of how it got there. A staged pending line survives: the
    /// merchant boundary it was waiting on is gone, but committing it still
    /// requires the explicit confirmation.
    fn collapse_if_empty(&mut self) {
        if self.total_quantity == 0 {
            let pending = self.pending.take();
            *self = CartState::default();
            self.pending = pending;
        }
    }

    fn recompute_popup(&mut self, processed: &MerchantId) {
        self.popup_visible =
            self.total_quantity > 0 && self.merchant.as_ref() == Some(processed);
    }
}

/// Persisted shape of the cart: the lines themselves plus checkout choices.
/// Merchant and totals are derived on rehydration rather than trusted from
/// the document, and transient UI state (pending line, popup flag) never
/// persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedCart {
    lines: Vec<CartLine>,
    checkout: Checkout,
}

impl From<CartState> for PersistedCart {
    fn from(cart: CartState) -> Self {
        PersistedCart {
            lines: cart.lines.into_values().collect(),
            checkout: cart.checkout,
        }
    }
}

impl From<PersistedCart> for CartState {
    fn from(persisted: PersistedCart) -> Self {
        let mut cart = CartState {
            checkout: persisted.checkout,
            ..CartState::default()
        };

        for line in persisted.lines {
            if line.quantity == 0 {
                continue;
            }

            if cart.merchant.is_none() {
                cart.merchant = Some(line.merchant.clone());
            }

            // Merchant exclusivity is re-validated: lines from any other
            // merchant in a tampered or out-of-date document are dropped.
            if cart.merchant.as_ref() != Some(&line.merchant) {
                warn!(merchant = %line.merchant, "foreign-merchant line dropped on rehydration");
                continue;
            }

            cart.total_quantity = cart.total_quantity.saturating_add(line.quantity);
            cart.total_price = cart.total_price.saturating_add(line.line_total());
            cart.lines.insert(line.key.clone(), line);
        }

        cart
    }
}
