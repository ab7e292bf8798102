//! Ride hailing records
//!
//! Transient API response shapes for ride requests, driver bids and fare
//! adjustments, parsed into typed records at the boundary.

use serde::{Deserialize, Serialize};

use crate::{ids::string_id, price::Price};

pub mod bids;

string_id! {
    /// Ride request identifier.
    RideId
}

string_id! {
    /// Driver bid identifier.
    BidId
}

string_id! {
    /// Driver identifier.
    DriverId
}

/// A geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

/// Requested vehicle class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Standard car.
    #[default]
    Economy,

    /// Higher-end car.
    Comfort,

    /// Motorbike.
    Moto,
}

/// A ride request as submitted to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    /// Ride id assigned by the backend.
    pub id: RideId,

    /// Pickup coordinate.
    pub pickup: GeoPoint,

    /// Dropoff coordinate.
    pub dropoff: GeoPoint,

    /// Requested vehicle class.
    #[serde(default)]
    pub vehicle: VehicleClass,

    /// Fare offered by the rider, in minor units.
    pub offered_fare: Price,

    /// ISO alpha currency code of the fare.
    pub currency: String,
}

/// A driver's fare offer against a ride request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Bid id.
    pub id: BidId,

    /// Ride the bid is against.
    pub ride: RideId,

    /// Bidding driver.
    pub driver: DriverId,

    /// Driver display name.
    #[serde(default)]
    pub driver_name: String,

    /// Driver rating, 0.0..=5.0.
    #[serde(default)]
    pub rating: f32,

    /// Offered fare in minor units.
    pub fare: Price,

    /// Estimated minutes to pickup.
    #[serde(default)]
    pub eta_minutes: u32,
}

/// A fare adjustment raised by the rider while waiting for bids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareRaise {
    /// Ride the adjustment applies to.
    pub ride: RideId,

    /// New offered fare in minor units.
    pub fare: Price,
}
