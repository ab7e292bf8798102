//! Store
//!
//! The combined state tree: independent reducer slices behind a single
//! dispatcher. Every dispatch is a synchronous, run-to-completion transition
//! by a single writer; subscribers are notified after the transition commits.
//! Side effects (network calls, timers) live outside the store and feed their
//! results back in as further actions.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::cart::{CartOutcome, CartState, LineKey, checkout};
use crate::catalog::{AddonId, Product, VariationId};
use crate::price::Price;

pub mod auth;
pub mod config;
pub mod persist;
pub mod ride;
pub mod search;
pub mod select;
pub mod theme;

pub use auth::{AuthAction, AuthState};
pub use config::{ConfigAction, RemoteConfig};
pub use persist::{FileStorage, PersistError, Storage};
pub use ride::{LocationAction, LocationState, RideAction, RideDraft};
pub use search::{SearchAction, SearchState};
pub use theme::{Theme, ThemeAction};

new_key_type! {
    /// Handle for a store subscription.
    pub struct SubscriberKey;
}

/// The process-wide state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Session/auth slice. Persisted.
    pub auth: AuthState,

    /// Cart slice. Persisted.
    pub cart: CartState,

    /// Ride creation draft.
    pub ride: RideDraft,

    /// Location picker slice. Persisted.
    pub location: LocationState,

    /// Search/filter staging slice.
    pub search: SearchState,

    /// Theme slice. Persisted.
    pub theme: Theme,

    /// Remote config slice.
    pub config: RemoteConfig,
}

/// Cart slice actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add units of one product configuration; an existing line
    /// accumulates.
    Add {
        /// The product, with current catalog prices.
        product: Box<Product>,

        /// Chosen variation.
        variation: VariationId,

        /// Chosen addons, any order.
        addons: Vec<AddonId>,

        /// Units to add; zero or below removes the line.
        quantity: i64,
    },

    /// Add one unit to a line.
    Increase(LineKey),

    /// Remove one unit from a line.
    Decrease(LineKey),

    /// Remove a line entirely.
    DecreaseToZero(LineKey),

    /// Confirm replacing the cart with the staged cross-merchant line.
    ConfirmReplace,

    /// Drop the staged cross-merchant line.
    DismissPending,

    /// Reset the cart.
    Clear,

    /// Choose delivery or pickup.
    SetFulfilment(checkout::Fulfilment),

    /// Choose a shipping address.
    SetAddress(Option<String>),

    /// Choose a fulfilment time.
    SetSchedule(checkout::Schedule),

    /// Choose a payment method.
    SetPayment(Option<checkout::PaymentMethod>),

    /// Apply a coupon.
    ApplyCoupon(checkout::Coupon),

    /// Remove the applied coupon.
    RemoveCoupon,

    /// Set the courier tip.
    SetTip(Price),
}

/// An intent dispatched against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Auth slice.
    Auth(AuthAction),

    /// Cart slice.
    Cart(CartAction),

    /// Ride draft slice.
    Ride(RideAction),

    /// Location picker slice.
    Location(LocationAction),

    /// Search slice.
    Search(SearchAction),

    /// Theme slice.
    Theme(ThemeAction),

    /// Remote config slice.
    Config(ConfigAction),
}

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// Store revision after the transition.
    pub revision: u64,

    /// Outcome of the cart mutation, when the action targeted the cart.
    pub cart: Option<CartOutcome>,
}

type Subscriber = Box<dyn FnMut(&AppState)>;

/// The state container. Single writer; all mutation goes through
/// [`Store::dispatch`].
pub struct Store {
    state: AppState,
    revision: u64,
    subscribers: SlotMap<SubscriberKey, Subscriber>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Store {
    /// Creates a store with default (empty) state.
    #[must_use]
    pub fn new() -> Self {
        Store {
            state: AppState::default(),
            revision: 0,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Creates a store rehydrated from persisted storage. Unreadable
    /// documents fall back to defaults; startup never fails here.
    #[must_use]
    pub fn rehydrated(storage: &dyn Storage) -> Self {
        Store {
            state: persist::rehydrate(storage),
            revision: 0,
            subscribers: SlotMap::with_key(),
        }
    }

    /// The current state tree.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Monotonic revision, bumped once per dispatch.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a subscriber invoked after every dispatch.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&AppState) + 'static) -> SubscriberKey {
        self.subscribers.insert(Box::new(subscriber))
    }

    /// Removes a subscriber.
    pub fn unsubscribe(&mut self, key: SubscriberKey) {
        self.subscribers.remove(key);
    }

    /// Applies one action to its slice, then notifies subscribers.
    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let cart = match action {
            Action::Auth(action) => {
                auth::reduce(&mut self.state.auth, action);
                None
            }
            Action::Cart(action) => Some(Self::reduce_cart(&mut self.state.cart, action)),
            Action::Ride(action) => {
                ride::reduce(&mut self.state.ride, action);
                None
            }
            Action::Location(action) => {
                ride::reduce_location(&mut self.state.location, action);
                None
            }
            Action::Search(action) => {
                search::reduce(&mut self.state.search, action);
                None
            }
            Action::Theme(action) => {
                theme::reduce(&mut self.state.theme, action);
                None
            }
            Action::Config(action) => {
                config::reduce(&mut self.state.config, action);
                None
            }
        };

        self.revision += 1;

        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.state);
        }

        DispatchResult {
            revision: self.revision,
            cart,
        }
    }

    /// Saves the whitelisted slices to storage.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistError`] if serialization or the storage write
    /// fails.
    pub fn persist(&self, storage: &dyn Storage) -> Result<(), PersistError> {
        persist::persist(&self.state, storage)
    }

    fn reduce_cart(cart: &mut CartState, action: CartAction) -> CartOutcome {
        match action {
            CartAction::Add {
                product,
                variation,
                addons,
                quantity,
            } => cart.add_quantity(&product, &variation, &addons, quantity),
            CartAction::Increase(key) => cart.increase_quantity(&key),
            CartAction::Decrease(key) => cart.decrease_quantity(&key),
            CartAction::DecreaseToZero(key) => cart.decrease_to_zero(&key),
            CartAction::ConfirmReplace => cart.confirm_replace(),
            CartAction::DismissPending => {
                cart.dismiss_pending();
                CartOutcome::Unchanged
            }
            CartAction::Clear => {
                cart.clear();
                CartOutcome::Unchanged
            }
            CartAction::SetFulfilment(fulfilment) => {
                cart.checkout_mut().fulfilment = fulfilment;
                CartOutcome::Unchanged
            }
            CartAction::SetAddress(address) => {
                cart.checkout_mut().address = address;
                CartOutcome::Unchanged
            }
            CartAction::SetSchedule(schedule) => {
                cart.checkout_mut().schedule = schedule;
                CartOutcome::Unchanged
            }
            CartAction::SetPayment(payment) => {
                cart.checkout_mut().payment = payment;
                CartOutcome::Unchanged
            }
            CartAction::ApplyCoupon(coupon) => {
                cart.checkout_mut().coupon = Some(coupon);
                CartOutcome::Unchanged
            }
            CartAction::RemoveCoupon => {
                cart.checkout_mut().coupon = None;
                CartOutcome::Unchanged
            }
            CartAction::SetTip(tip) => {
                cart.checkout_mut().tip = tip;
                CartOutcome::Unchanged
            }
        }
    }
}
