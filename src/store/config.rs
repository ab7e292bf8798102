//! Remote config slice
//!
//! Server-driven configuration fetched at startup. Defaults are used until
//! the first load commits.

use serde::{Deserialize, Serialize};

use crate::price::Price;

/// Remote configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Default ISO alpha currency code.
    pub currency: String,

    /// Minimum offerable ride fare.
    pub minimum_ride_fare: Price,

    /// Support phone number shown on failure screens.
    pub support_phone: String,

    /// Whether the backend is in maintenance mode.
    pub maintenance: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            currency: "USD".to_owned(),
            minimum_ride_fare: Price::from_minor(100),
            support_phone: String::new(),
            maintenance: false,
        }
    }
}

/// Config actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// A remote config fetch completed.
    Loaded(RemoteConfig),
}

pub(super) fn reduce(state: &mut RemoteConfig, action: ConfigAction) {
    match action {
        ConfigAction::Loaded(config) => *state = config,
    }
}
