//! Order tracking
//!
//! Maps the server-provided order status to progress and map-marker data for
//! the tracking screen. Statuses are parsed strictly at the boundary; an
//! unrecognised status is a parse error, never trusted as-is.

use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delay before prompting for a review once an order is delivered.
pub const REVIEW_PROMPT_DELAY: Duration = Duration::from_secs(2);

/// Errors raised when interpreting tracking data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackingError {
    /// The server sent a status string this client does not know.
    #[error("unknown order status: {0}")]
    UnknownStatus(String),
}

/// Lifecycle status of a placed order, in wire spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, awaiting merchant confirmation.
    Pending,

    /// Accepted by the merchant.
    Confirmed,

    /// Being prepared.
    Preparing,

    /// Courier picked the order up.
    PickedUp,

    /// Courier is en route to the customer.
    OnTheWay,

    /// Handed over to the customer.
    Delivered,

    /// Cancelled by either party.
    Cancelled,
}

impl OrderStatus {
    /// The forward path an order progresses along. `Cancelled` sits outside
    /// it.
    const PROGRESSION: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::PickedUp,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ];

    /// Position on the progress indicator: `(step, total)`. `None` for a
    /// cancelled order.
    #[must_use]
    pub fn progress(self) -> Option<(usize, usize)> {
        Self::PROGRESSION
            .iter()
            .position(|status| *status == self)
            .map(|step| (step + 1, Self::PROGRESSION.len()))
    }

    /// Which map markers the tracking screen shows for this status.
    #[must_use]
    pub fn markers(self) -> MarkerSet {
        match self {
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Preparing => MarkerSet {
                merchant: true,
                courier: false,
                destination: true,
            },
            OrderStatus::PickedUp | OrderStatus::OnTheWay => MarkerSet {
                merchant: true,
                courier: true,
                destination: true,
            },
            OrderStatus::Delivered | OrderStatus::Cancelled => MarkerSet {
                merchant: false,
                courier: false,
                destination: true,
            },
        }
    }

    /// Whether the order reached a terminal status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = TrackingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "picked_up" => Ok(OrderStatus::PickedUp),
            "on_the_way" => Ok(OrderStatus::OnTheWay),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(TrackingError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Which markers are visible on the tracking map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSet {
    /// Merchant location marker.
    pub merchant: bool,

    /// Courier location marker.
    pub courier: bool,

    /// Delivery destination marker.
    pub destination: bool,
}

/// Navigation side effects derived from status changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingUpdate {
    /// Navigate to the review screen after the given delay.
    PromptReview {
        /// Delay before navigating.
        after: Duration,
    },
}

/// Edge-triggered view over a stream of status updates.
///
/// The review prompt fires exactly once, on the transition into
/// [`OrderStatus::Delivered`], no matter how often the server repeats the
/// status afterwards.
#[derive(Debug, Default)]
pub struct TrackingView {
    last: Option<OrderStatus>,
}

impl TrackingView {
    /// Creates a view with no status observed yet.
    #[must_use]
    pub fn new() -> Self {
        TrackingView::default()
    }

    /// The most recently observed status.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.last
    }

    /// Observes the next status and returns any navigation side effect.
    pub fn observe(&mut self, status: OrderStatus) -> Option<TrackingUpdate> {
        let entered_delivered =
            status == OrderStatus::Delivered && self.last != Some(OrderStatus::Delivered);

        self.last = Some(status);

        entered_delivered.then_some(TrackingUpdate::PromptReview {
            after: REVIEW_PROMPT_DELAY,
        })
    }
}
