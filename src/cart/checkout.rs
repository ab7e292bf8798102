//! Checkout sub-record
//!
//! Delivery/pickup mode, address, scheduling, payment, coupon and tip. Each
//! field is independently settable; the whole record resets to defaults
//! whenever the cart is cleared.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::price::Price;

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fulfilment {
    /// Courier delivery to a shipping address.
    #[default]
    Delivery,

    /// Customer collects from the merchant.
    Pickup,
}

/// When the order should be fulfilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// As soon as possible.
    #[default]
    Asap,

    /// A named delivery slot chosen by the customer.
    Slot(String),
}

/// Selected payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cash,

    /// Stored wallet balance.
    Wallet,

    /// A tokenised card reference.
    Card(String),
}

/// Discount carried by a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    /// Percentage off the subtotal.
    Percent(Decimal),

    /// Fixed amount off the subtotal.
    Flat(Price),
}

/// An applied coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon code as entered.
    pub code: String,

    /// Discount the code grants.
    pub discount: Discount,
}

impl Coupon {
    /// The amount this coupon takes off the given subtotal. Never exceeds the
    /// subtotal.
    #[must_use]
    pub fn discount_on(&self, subtotal: Price) -> Price {
        let cut = match &self.discount {
            Discount::Percent(percent) => subtotal.percent_of(*percent),
            Discount::Flat(amount) => *amount,
        };

        cut.min(subtotal)
    }
}

/// Checkout choices attached to the cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    /// Delivery or pickup.
    pub fulfilment: Fulfilment,

    /// Reference to a saved shipping address. Required for delivery.
    pub address: Option<String>,

    /// Requested fulfilment time.
    pub schedule: Schedule,

    /// Chosen payment method.
    pub payment: Option<PaymentMethod>,

    /// Applied coupon, if any.
    pub coupon: Option<Coupon>,

    /// Courier tip.
    pub tip: Price,
}

impl Checkout {
    /// Amount payable for the given subtotal: subtotal minus coupon discount
    /// plus tip.
    #[must_use]
    pub fn payable(&self, subtotal: Price) -> Price {
        let discount = self
            .coupon
            .as_ref()
            .map_or(Price::ZERO, |coupon| coupon.discount_on(subtotal));

        subtotal.saturating_sub(discount).saturating_add(self.tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_coupon_discounts_subtotal() {
        let coupon = Coupon {
            code: "SAVE10".to_owned(),
            discount: Discount::Percent(Decimal::from(10)),
        };

        assert_eq!(
            coupon.discount_on(Price::from_minor(2000)),
            Price::from_minor(200)
        );
    }

    #[test]
    fn flat_coupon_never_exceeds_subtotal() {
        let coupon = Coupon {
            code: "FIVEOFF".to_owned(),
            discount: Discount::Flat(Price::from_minor(500)),
        };

        assert_eq!(
            coupon.discount_on(Price::from_minor(300)),
            Price::from_minor(300)
        );
    }

    #[test]
    fn payable_applies_discount_then_tip() {
        let checkout = Checkout {
            coupon: Some(Coupon {
                code: "SAVE10".to_owned(),
                discount: Discount::Percent(Decimal::from(10)),
            }),
            tip: Price::from_minor(150),
            ..Checkout::default()
        };

        assert_eq!(
            checkout.payable(Price::from_minor(2000)),
            Price::from_minor(1950)
        );
    }

    #[test]
    fn default_checkout_is_delivery_asap() {
        let checkout = Checkout::default();

        assert_eq!(checkout.fulfilment, Fulfilment::Delivery);
        assert_eq!(checkout.schedule, Schedule::Asap);
        assert!(checkout.payment.is_none());
    }
}
