//! Route types: the terminal artifact of a planning run.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{OptimizeFor, Position, Sighting};

/// Why the traveler stopped at a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Within the cutoff distance of the target.
    TargetReached,

    /// The reference object dropped to or below the horizon.
    ObjectLost,

    /// Following the object further would lead away from the target.
    ClosestApproach,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TargetReached => "target_reached",
            Self::ObjectLost => "object_lost",
            Self::ClosestApproach => "closest_approach",
        }
    }
}

/// A point along a route where one leg ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Position,

    /// The followed object as last seen on this leg.
    /// `None` for the closing waypoint placed on arrival.
    pub reference_object: Option<Sighting>,

    pub reason: StopReason,

    pub timestamp: Timestamp,

    /// Great-circle distance to the target, km.
    pub distance_to_target: f64,
}

/// A complete route from start to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Stable identifier, e.g. `shortest` or `alternative_2`.
    pub id: String,

    /// Human label, e.g. "Shortest Path".
    pub label: String,

    /// The selection policy this route was planned under.
    pub optimize_for: OptimizeFor,

    pub observation_time: Timestamp,

    pub waypoints: Vec<Waypoint>,

    /// Sum of leg distances, km. Never less than `direct_distance`
    /// less the cutoff.
    pub total_distance: f64,

    /// Great-circle distance start to target, km.
    pub direct_distance: f64,

    /// Number of legs followed.
    pub iterations: u32,

    /// Names of followed objects, in the order they were followed.
    pub used_objects: Vec<String>,

    /// Distance under which the target counts as reached, km.
    pub target_reached_cutoff: f64,
}

impl Route {
    /// Two routes are the same path when they stop the same number of
    /// times and follow the same objects in the same order.
    pub fn same_path(&self, other: &Self) -> bool {
        self.waypoints.len() == other.waypoints.len() && self.used_objects == other.used_objects
    }

    pub fn set_identity(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.id = id.into();
        self.label = label.into();
    }
}
