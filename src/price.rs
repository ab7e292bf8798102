//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when formatting a price for display.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// The ISO alpha code was not recognised.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// A price in minor units (pence/cents).
///
/// All cart arithmetic happens in minor units; [`Money`] is only produced at
/// the display boundary.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero price.
    pub const ZERO: Price = Price(0);

    /// Creates a new price from minor units.
    #[must_use]
    pub const fn from_minor(value: u64) -> Self {
        Price(value)
    }

    /// Returns the price in minor units.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Adds another price, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }

    /// Subtracts another price, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Price) -> Price {
        Price(self.0.saturating_sub(other.0))
    }

    /// Multiplies the price by a quantity, saturating at the numeric bound.
    #[must_use]
    pub const fn times(self, quantity: u64) -> Price {
        Price(self.0.saturating_mul(quantity))
    }

    /// Takes a percentage cut of this price, rounding to the nearest minor
    /// unit (banker's rounding).
    #[must_use]
    pub fn percent_of(self, percent: Decimal) -> Price {
        let cut = (Decimal::from(self.0) * percent / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

        Price(cut.to_u64().unwrap_or(0))
    }

    /// Converts the price to [`Money`] in the given ISO currency for display.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCurrency`] if the code is not a known
    /// ISO alpha code.
    pub fn display(self, currency_code: &str) -> Result<Money<'static, iso::Currency>, CurrencyError> {
        let currency = iso::find(currency_code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(currency_code.to_owned()))?;

        let minor = i64::try_from(self.0).unwrap_or(i64::MAX);

        Ok(Money::from_minor(minor, currency))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn saturating_arithmetic() {
        let price = Price::from_minor(100);

        assert_eq!(price.saturating_add(Price::from_minor(50)).minor(), 150);
        assert_eq!(price.saturating_sub(Price::from_minor(150)).minor(), 0);
        assert_eq!(price.times(3).minor(), 300);
    }

    #[test]
    fn percent_rounds_to_nearest_minor_unit() {
        // 15% of 333 = 49.95 -> 50
        let price = Price::from_minor(333);

        assert_eq!(price.percent_of(Decimal::from(15)).minor(), 50);
    }

    #[test]
    fn display_formats_known_currency() -> TestResult {
        let money = Price::from_minor(1250).display("GBP")?;

        assert_eq!(money.to_minor_units(), 1250);

        Ok(())
    }

    #[test]
    fn display_rejects_unknown_currency() {
        let err = Price::from_minor(100).display("XYZ");

        assert_eq!(err, Err(CurrencyError::UnknownCurrency("XYZ".to_owned())));
    }
}
