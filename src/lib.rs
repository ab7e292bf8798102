//! Errand
//!
//! Errand is the client-side state engine for a consumer app combining food
//! delivery and ride hailing: a reducer-slice state store with persistence,
//! a cart pricing/reconciliation container, typed wire-event parsing, and
//! the real-time bid feed fallback machine. It is sans-IO; an embedding
//! shell owns transports, timers and rendering.

mod ids;

pub mod cart;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod price;
pub mod ride;
pub mod store;
pub mod tracking;
pub mod wire;
