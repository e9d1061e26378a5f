//! Starhelm: plan a route between two points using only the visible sky.
//!
//! At each leg the navigator picks the visible body whose compass bearing
//! best matches the direction to the destination, follows it along a
//! great circle until it sets or the traveler starts drifting away from
//! the target, then picks again.
//!
//! The sky itself (catalog and ephemeris) is a collaborator behind the
//! [`sky::Sky`] trait. [`sky::CatalogSky`] is a built-in implementation
//! over a bright-star catalog.

pub mod error;
pub mod export;
pub mod geodesy;
pub mod model;
pub mod navigate;
pub mod sky;

#[cfg(test)]
mod testing;

pub use error::{NavigationError, PositionError, SkyError};
pub use model::{
    CelestialObject, Horizontal, ObjectKind, OptimizeFor, Position, Route, Sighting, StopReason,
    Waypoint,
};
