//! Cart summary rendering
//!
//! Renders a cart as a receipt-style table for demos and debug output. The
//! presentation layer proper renders its own components; this is the textual
//! equivalent.

use std::fmt::Write as _;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{cart::CartState, price::CurrencyError};

/// Errors raised while rendering a cart summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A price could not be formatted for display.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Formatting failure while writing the table.
    #[error("failed to write summary")]
    Format(#[from] std::fmt::Error),
}

/// Renders the cart as a table of lines followed by the totals block.
///
/// An empty cart renders as a single informational row.
///
/// # Errors
///
/// Returns a [`SummaryError`] if a line carries an unknown currency code or
/// formatting fails.
pub fn render(cart: &CartState) -> Result<String, SummaryError> {
    let Some(currency) = cart.currency() else {
        return Ok("(empty cart)\n".to_owned());
    };
    let currency = currency.to_owned();

    let mut builder = Builder::default();
    builder.push_record(["Item", "Qty", "Unit", "Total"]);

    let mut lines: Vec<_> = cart.lines().collect();
    lines.sort_by(|a, b| a.title().cmp(b.title()));

    for line in lines {
        builder.push_record([
            line.title().to_owned(),
            line.quantity().to_string(),
            line.unit_price().display(&currency)?.to_string(),
            line.line_total().display(&currency)?.to_string(),
        ]);
    }

    let subtotal = cart.total_price();
    let checkout = cart.checkout();

    builder.push_record([
        "Subtotal".to_owned(),
        cart.total_quantity().to_string(),
        String::new(),
        subtotal.display(&currency)?.to_string(),
    ]);

    if let Some(coupon) = &checkout.coupon {
        builder.push_record([
            format!("Coupon {}", coupon.code),
            String::new(),
            String::new(),
            format!("-{}", coupon.discount_on(subtotal).display(&currency)?),
        ]);
    }

    if checkout.tip.minor() > 0 {
        builder.push_record([
            "Tip".to_owned(),
            String::new(),
            String::new(),
            checkout.tip.display(&currency)?.to_string(),
        ]);
    }

    builder.push_record([
        "Payable".to_owned(),
        String::new(),
        String::new(),
        cart.payable().display(&currency)?.to_string(),
    ]);

    let mut table = builder.build();
    table
        .with(Style::modern_rounded())
        .modify(Columns::new(1..), Alignment::right());

    let mut out = String::new();
    writeln!(out, "{table}")?;

    Ok(out)
}
