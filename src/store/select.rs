//! Selectors
//!
//! Pure derived views over the state tree, with a revision-tagged memo for
//! values that are expensive enough to cache between renders.

use crate::{
    catalog::MerchantSummary,
    price::Price,
    store::{AppState, search::SortOrder},
};

/// A memoized selector value, recomputed only when the store revision moves.
#[derive(Debug, Default)]
pub struct Memo<T> {
    revision: Option<u64>,
    value: Option<T>,
}

impl<T> Memo<T> {
    /// Creates an empty memo.
    #[must_use]
    pub const fn new() -> Self {
        Memo {
            revision: None,
            value: None,
        }
    }

    /// Returns the cached value for `revision`, computing it if the store
    /// has moved on since the last call.
    pub fn get(&mut self, revision: u64, compute: impl FnOnce() -> T) -> &T {
        if self.revision != Some(revision) {
            self.value = None;
            self.revision = Some(revision);
        }

        self.value.get_or_insert_with(compute)
    }
}

/// Why the checkout button is disabled, if it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutBlocker {
    /// Nothing in the cart.
    EmptyCart,

    /// A cross-merchant confirmation is outstanding.
    PendingConfirmation,

    /// Delivery selected but no shipping address chosen.
    MissingAddress,

    /// No payment method chosen.
    MissingPayment,
}

/// The first thing preventing checkout, or `None` when the order can be
/// placed.
#[must_use]
pub fn checkout_blocker(state: &AppState) -> Option<CheckoutBlocker> {
    use crate::cart::checkout::Fulfilment;

    if state.cart.is_empty() {
        return Some(CheckoutBlocker::EmptyCart);
    }

    if state.cart.requires_confirmation() {
        return Some(CheckoutBlocker::PendingConfirmation);
    }

    let checkout = state.cart.checkout();

    if checkout.fulfilment == Fulfilment::Delivery && checkout.address.is_none() {
        return Some(CheckoutBlocker::MissingAddress);
    }

    if checkout.payment.is_none() {
        return Some(CheckoutBlocker::MissingPayment);
    }

    None
}

/// Amount payable for the current cart after coupon and tip.
#[must_use]
pub fn payable_total(state: &AppState) -> Price {
    state.cart.payable()
}

/// Merchants passing the applied search filters, in the applied sort order.
#[must_use]
pub fn visible_merchants<'a>(
    state: &AppState,
    merchants: &'a [MerchantSummary],
) -> Vec<&'a MerchantSummary> {
    let filters = &state.search.applied;

    let mut visible: Vec<&MerchantSummary> = merchants
        .iter()
        .filter(|merchant| filters.matches(merchant))
        .collect();

    match filters.sort {
        SortOrder::Recommended => {}
        SortOrder::Rating => {
            visible.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        }
        SortOrder::Alphabetical => visible.sort_by(|a, b| a.name.cmp(&b.name)),
    }

    visible
}
