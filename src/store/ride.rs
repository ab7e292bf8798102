//! Ride slices
//!
//! Two small slices: the ride creation draft (pickup/dropoff/vehicle/offered
//! fare, transient) and the location picker (persisted so the app reopens
//! where the user last searched).

use serde::{Deserialize, Serialize};

use crate::{
    price::Price,
    ride::{GeoPoint, VehicleClass},
};

/// Ride creation draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideDraft {
    /// Pickup coordinate.
    pub pickup: Option<GeoPoint>,

    /// Dropoff coordinate.
    pub dropoff: Option<GeoPoint>,

    /// Requested vehicle class.
    pub vehicle: VehicleClass,

    /// Fare offered by the rider.
    pub offered_fare: Price,
}

impl RideDraft {
    /// Whether the draft has everything needed to submit a ride request.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.pickup.is_some() && self.dropoff.is_some() && self.offered_fare > Price::ZERO
    }
}

/// Ride draft actions.
#[derive(Debug, Clone, PartialEq)]
pub enum RideAction {
    /// Set the pickup coordinate.
    SetPickup(GeoPoint),

    /// Set the dropoff coordinate.
    SetDropoff(GeoPoint),

    /// Choose the vehicle class.
    SetVehicle(VehicleClass),

    /// Set the offered fare.
    OfferFare(Price),

    /// Raise the offered fare by an increment while waiting for bids.
    RaiseFare(Price),

    /// Discard the draft.
    Reset,
}

pub(super) fn reduce(state: &mut RideDraft, action: RideAction) {
    match action {
        RideAction::SetPickup(point) => state.pickup = Some(point),
        RideAction::SetDropoff(point) => state.dropoff = Some(point),
        RideAction::SetVehicle(vehicle) => state.vehicle = vehicle,
        RideAction::OfferFare(fare) => state.offered_fare = fare,
        RideAction::RaiseFare(increment) => {
            state.offered_fare = state.offered_fare.saturating_add(increment);
        }
        RideAction::Reset => *state = RideDraft::default(),
    }
}

/// Location picker slice. Persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    /// The picked point, if any.
    pub picked: Option<GeoPoint>,

    /// Human-readable label for the picked point.
    pub label: String,
}

/// Location picker actions.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationAction {
    /// Pick a point.
    Pick {
        /// The coordinate.
        point: GeoPoint,

        /// Display label.
        label: String,
    },

    /// Clear the picked location.
    Clear,
}

pub(super) fn reduce_location(state: &mut LocationState, action: LocationAction) {
    match action {
        LocationAction::Pick { point, label } => {
            state.picked = Some(point);
            state.label = label;
        }
        LocationAction::Clear => *state = LocationState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT: GeoPoint = GeoPoint { lat: 51.5, lng: -0.12 };

    #[test]
    fn draft_is_submittable_once_complete() {
        let mut draft = RideDraft::default();
        assert!(!draft.is_submittable());

        reduce(&mut draft, RideAction::SetPickup(POINT));
        reduce(&mut draft, RideAction::SetDropoff(POINT));
        assert!(!draft.is_submittable());

        reduce(&mut draft, RideAction::OfferFare(Price::from_minor(800)));
        assert!(draft.is_submittable());
    }

    #[test]
    fn raise_fare_adds_to_the_offer() {
        let mut draft = RideDraft {
            offered_fare: Price::from_minor(800),
            ..RideDraft::default()
        };

        reduce(&mut draft, RideAction::RaiseFare(Price::from_minor(100)));

        assert_eq!(draft.offered_fare, Price::from_minor(900));
    }

    #[test]
    fn picking_a_location_sets_point_and_label() {
        let mut state = LocationState::default();

        reduce_location(
            &mut state,
            LocationAction::Pick {
                point: POINT,
                label: "Home".to_owned(),
            },
        );

        assert!(state.picked.is_some());
        assert_eq!(state.label, "Home");
    }
}
