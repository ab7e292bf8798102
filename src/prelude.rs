//! Errand prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartLine, CartOutcome, CartState, Checkout, LineKey,
        checkout::{Coupon, Discount, Fulfilment, PaymentMethod, Schedule},
    },
    catalog::{Addon, AddonId, MerchantId, MerchantSummary, Product, ProductId, Variation, VariationId},
    price::{CurrencyError, Price},
    ride::{
        Bid, BidId, DriverId, FareRaise, GeoPoint, RideId, RideRequest, VehicleClass,
        bids::{BidFeed, FeedEffect, FeedEvent, FeedPhase, TimerKind},
    },
    store::{
        Action, AppState, AuthAction, AuthState, CartAction, ConfigAction, DispatchResult,
        FileStorage, LocationAction, LocationState, PersistError, RemoteConfig, RideAction,
        RideDraft, SearchAction, SearchState, Storage, Store, SubscriberKey, Theme, ThemeAction,
        select::{CheckoutBlocker, Memo},
    },
    tracking::{OrderStatus, TrackingUpdate, TrackingView},
    wire::{ChatMessage, WireEvent, parse_event},
};
