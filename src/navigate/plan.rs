//! Building one route, leg by leg.

use std::collections::HashSet;

use jiff::Timestamp;
use tracing::{debug, info};

use super::{
    follow::{FollowConfig, Leg, MAX_FOLLOW_STEPS, ObjectFollower},
    select::{SelectionPolicy, select_reference},
};
use crate::{
    error::{NavigationError, Result},
    geodesy::{bearing, distance, positions_equal, target_reached_cutoff},
    model::{OptimizeFor, Position, Route, Sighting, StopReason, Waypoint},
    sky::{Sky, Visibility},
};

/// Everything a caller asks of a route computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: Position,
    pub target: Position,

    /// The sky is frozen at this instant for the whole computation.
    pub observation_time: Timestamp,

    /// Distance walked per follower step, km.
    pub step_size_km: f64,

    /// Legs allowed before giving up.
    pub max_iterations: u32,

    pub prioritize_major: bool,

    /// Only sun, moon, and planets may be followed.
    pub planets_only: bool,

    pub optimize_for: OptimizeFor,

    pub visibility: Visibility,

    /// Upper bound on alternatives returned by the orchestrator.
    pub max_routes: usize,
}

impl RouteRequest {
    pub fn new(start: Position, target: Position, observation_time: Timestamp) -> Self {
        Self {
            start,
            target,
            observation_time,
            step_size_km: 10.0,
            max_iterations: 100,
            prioritize_major: false,
            planets_only: false,
            optimize_for: OptimizeFor::default(),
            visibility: Visibility::default(),
            max_routes: 3,
        }
    }
}

/// The knobs one planner run may vary from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    pub optimize_for: OptimizeFor,
    pub prioritize_major: bool,
    pub step_size_km: f64,

    /// Names never to follow, on top of those already used.
    pub excluded: HashSet<String>,
}

impl PlanOptions {
    pub fn from_request(request: &RouteRequest) -> Self {
        Self {
            optimize_for: request.optimize_for,
            prioritize_major: request.prioritize_major,
            step_size_km: request.step_size_km,
            excluded: HashSet::new(),
        }
    }
}

/// Mutable state of a single planner run. Never outlives [`RoutePlanner::plan`].
struct NavigationState {
    current: Position,
    used: HashSet<String>,
    used_order: Vec<String>,
    waypoints: Vec<Waypoint>,
    iterations: u32,
    total_distance: f64,
}

impl NavigationState {
    fn new(start: Position) -> Self {
        Self {
            current: start,
            used: HashSet::new(),
            used_order: Vec::new(),
            waypoints: Vec::new(),
            iterations: 0,
            total_distance: 0.0,
        }
    }

    fn excluded(&self, extra: &HashSet<String>) -> HashSet<String> {
        self.used.union(extra).cloned().collect()
    }

    fn record_leg(&mut self, leg: Leg, target: &Position, timestamp: Timestamp) {
        self.total_distance += distance(&self.current, &leg.position);

        let name = leg.reference.object.name.clone();
        if self.used.insert(name.clone()) {
            self.used_order.push(name);
        }

        self.waypoints.push(Waypoint {
            position: leg.position,
            distance_to_target: distance(&leg.position, target),
            reference_object: Some(leg.reference),
            reason: leg.reason,
            timestamp,
        });
        self.current = leg.position;
        self.iterations += 1;
    }

    fn record_arrival(&mut self, timestamp: Timestamp) {
        self.waypoints.push(Waypoint {
            position: self.current,
            reference_object: None,
            reason: StopReason::TargetReached,
            timestamp,
            distance_to_target: 0.0,
        });
    }
}

/// Plans single routes for one request.
pub struct RoutePlanner<'a, S: Sky + ?Sized> {
    sky: &'a S,
    request: &'a RouteRequest,
}

impl<'a, S: Sky + ?Sized> RoutePlanner<'a, S> {
    pub fn new(sky: &'a S, request: &'a RouteRequest) -> Self {
        Self { sky, request }
    }

    /// Plan one route from start to target under `options`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::NoVisibleObjects`] when nothing unused is up,
    /// [`NavigationError::NoSuitableReference`] when nothing up is eligible,
    /// [`NavigationError::MaxIterationsExceeded`] when the leg budget runs out,
    /// and [`NavigationError::Sky`] when the provider fails.
    pub fn plan(&self, options: &PlanOptions) -> Result<Route> {
        let request = self.request;
        let target = request.target;
        let time = request.observation_time;

        let direct_distance = distance(&request.start, &target);
        let cutoff = target_reached_cutoff(direct_distance);

        let follower = ObjectFollower::new(
            self.sky,
            target,
            time,
            FollowConfig {
                step_size_km: options.step_size_km,
                target_reached_cutoff_km: cutoff,
                max_steps: MAX_FOLLOW_STEPS,
                visibility: request.visibility,
            },
        );
        let policy = SelectionPolicy {
            optimize_for: options.optimize_for,
            prioritize_major: options.prioritize_major,
        };

        let mut state = NavigationState::new(request.start);
        let finish = |state: NavigationState| {
            let route = Route {
                id: options.optimize_for.route_id().to_string(),
                label: options.optimize_for.route_label().to_string(),
                optimize_for: options.optimize_for,
                observation_time: time,
                waypoints: state.waypoints,
                total_distance: state.total_distance,
                direct_distance,
                iterations: state.iterations,
                used_objects: state.used_order,
                target_reached_cutoff: cutoff,
            };
            info!(
                optimize_for = %route.optimize_for,
                legs = route.iterations,
                total_km = route.total_distance,
                "route planned"
            );
            route
        };

        while state.iterations < request.max_iterations {
            if positions_equal(&state.current, &target, cutoff) {
                state.record_arrival(time);
                return Ok(finish(state));
            }

            let target_bearing = bearing(&state.current, &target);
            let excluded = state.excluded(&options.excluded);
            let candidates = self.candidates(&state.current, &excluded)?;

            let reference = select_reference(target_bearing, &candidates, policy)
                .ok_or(NavigationError::NoSuitableReference)?;
            debug!(
                object = reference.name(),
                target_bearing,
                azimuth = reference.azimuth,
                "following"
            );

            let leg = follower.follow(reference, state.current)?;
            let reason = leg.reason;
            state.record_leg(leg, &target, time);

            if reason == StopReason::TargetReached {
                return Ok(finish(state));
            }
        }

        Err(NavigationError::MaxIterationsExceeded(request.max_iterations))
    }

    /// Visible, unused, eligible candidates at `position`, in provider order.
    fn candidates(&self, position: &Position, excluded: &HashSet<String>) -> Result<Vec<Sighting>> {
        let request = self.request;
        let mut candidates = self.sky.visible_objects(
            position,
            request.observation_time,
            excluded,
            request.visibility,
        )?;
        candidates.retain(|sighting| !excluded.contains(sighting.name()));

        if candidates.is_empty() {
            return Err(NavigationError::NoVisibleObjects {
                latitude: position.latitude,
                longitude: position.longitude,
            });
        }

        if request.planets_only {
            candidates.retain(|sighting| sighting.object.kind.is_solar_system());
        }
        Ok(candidates)
    }
}
