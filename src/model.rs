//! Core data model for Starhelm.
//!
//! Positions and celestial objects come from the caller or the sky
//! provider. Routes and waypoints are what planning produces.

mod celestial;
mod policy;
mod position;
mod route;

pub use celestial::{CelestialObject, Horizontal, NAVIGATIONAL_STARS, ObjectKind, Sighting};
pub use policy::OptimizeFor;
pub use position::Position;
pub use route::{Route, StopReason, Waypoint};
