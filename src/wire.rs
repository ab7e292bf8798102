//! Wire events
//!
//! Fire-and-forget JSON event payloads received over the persistent
//! WebSocket connection. Raw frames are converted to typed events here;
//! malformed shapes are rejected before they reach any state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ids::string_id,
    ride::{BidId, FareRaise, RideId, RideRequest},
};

string_id! {
    /// Chat message identifier.
    MessageId
}

string_id! {
    /// Chat participant identifier (rider or driver user id).
    ParticipantId
}

/// Errors raised while decoding a wire frame.
#[derive(Debug, Error)]
pub enum WireError {
    /// The frame was not a well-formed event envelope.
    #[error("malformed wire event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A single chat message exchanged during a ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message id.
    pub id: MessageId,

    /// Ride the conversation belongs to.
    pub ride: RideId,

    /// Sending participant.
    pub sender: ParticipantId,

    /// Message body.
    pub body: String,

    /// Send time, epoch milliseconds.
    pub sent_at: u64,
}

/// A typed event decoded from one WebSocket frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum WireEvent {
    /// A ride request was broadcast (driver side) or acknowledged.
    #[serde(rename = "ride:request")]
    RideRequest(RideRequest),

    /// A driver bid was accepted by the rider.
    #[serde(rename = "bid:accepted")]
    BidAccepted {
        /// Ride the accepted bid is against.
        ride: RideId,

        /// The accepted bid.
        bid: BidId,
    },

    /// The rider raised the offered fare.
    #[serde(rename = "fare:raised")]
    FareRaised(FareRaise),

    /// A chat message was delivered.
    #[serde(rename = "chat:message")]
    Chat(ChatMessage),
}

/// Decodes one raw frame into a typed event.
///
/// # Errors
///
/// Returns [`WireError::Malformed`] if the frame is not valid JSON or does
/// not match any known event shape.
pub fn parse_event(raw: &str) -> Result<WireEvent, WireError> {
    Ok(serde_json::from_str(raw)?)
}
