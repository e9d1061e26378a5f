//! Following one object until it stops being useful.
//!
//! The traveler walks in fixed steps along the object's current azimuth.
//! After every step the object is re-sighted from the new position, and the
//! leg ends as soon as one of three things happens:
//!
//! 1. the object is at or below the horizon ([`StopReason::ObjectLost`]),
//! 2. the step took the traveler further from the target
//!    ([`StopReason::ClosestApproach`]),
//! 3. the traveler is within the cutoff of the target
//!    ([`StopReason::TargetReached`]).

use jiff::Timestamp;
use tracing::{debug, warn};

use crate::{
    error::SkyError,
    geodesy::{destination, distance},
    model::{Position, Sighting, StopReason},
    sky::{Sky, Visibility},
};

/// Hard cap on steps in a single leg.
pub const MAX_FOLLOW_STEPS: u32 = 10_000;

/// Configuration for following one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowConfig {
    /// Distance walked per step, km.
    pub step_size_km: f64,

    /// Distance under which the target counts as reached, km.
    pub target_reached_cutoff_km: f64,

    /// Steps before the leg is cut short.
    pub max_steps: u32,

    /// Thresholds that decide whether a re-sighted object counts as visible.
    /// The leg itself only stops once the object is at or below the horizon.
    pub visibility: Visibility,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            step_size_km: 10.0,
            target_reached_cutoff_km: 1.0,
            max_steps: MAX_FOLLOW_STEPS,
            visibility: Visibility::default(),
        }
    }
}

/// State of a leg in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// Still walking.
    Following,
    /// The object set. Terminal.
    ObjectLost,
    /// Walking on would lead away from the target. Terminal.
    ClosestApproach,
    /// Within the cutoff of the target. Terminal.
    TargetReached,
}

impl FollowState {
    /// The waypoint reason for a terminal state.
    pub fn stop_reason(self) -> Option<StopReason> {
        match self {
            Self::Following => None,
            Self::ObjectLost => Some(StopReason::ObjectLost),
            Self::ClosestApproach => Some(StopReason::ClosestApproach),
            Self::TargetReached => Some(StopReason::TargetReached),
        }
    }
}

/// Outcome of following one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Where the leg ends.
    pub position: Position,

    pub reason: StopReason,

    /// The object as last sighted on this leg.
    pub reference: Sighting,

    /// Steps taken, including the one that ended the leg.
    pub steps: u32,
}

/// Position bookkeeping for one leg.
#[derive(Debug, Clone)]
struct LegTracker {
    current: Position,
    previous_distance: f64,
    closest: Position,
    closest_distance: f64,
    state: FollowState,
}

impl LegTracker {
    fn new(start: Position, target: &Position) -> Self {
        let start_distance = distance(&start, target);
        Self {
            current: start,
            previous_distance: start_distance,
            closest: start,
            closest_distance: start_distance,
            state: FollowState::Following,
        }
    }

    /// Record a step to `next`, where the object stands at `altitude`.
    fn advance(
        &mut self,
        next: Position,
        altitude: f64,
        target: &Position,
        cutoff_km: f64,
    ) -> FollowState {
        if altitude <= 0.0 {
            self.state = FollowState::ObjectLost;
            return self.state;
        }

        let next_distance = distance(&next, target);
        if next_distance > self.previous_distance {
            self.state = FollowState::ClosestApproach;
            return self.state;
        }

        self.current = next;
        if next_distance < cutoff_km {
            self.state = FollowState::TargetReached;
            return self.state;
        }

        if next_distance < self.closest_distance {
            self.closest = next;
            self.closest_distance = next_distance;
        }
        self.previous_distance = next_distance;
        self.state
    }

    /// Where a stopped leg should be reported.
    ///
    /// A lost object leaves the traveler where it was last above the
    /// horizon; a closest approach reports the closest point visited.
    fn stop_position(&self) -> Position {
        match self.state {
            FollowState::ClosestApproach => self.closest,
            FollowState::Following | FollowState::ObjectLost | FollowState::TargetReached => {
                self.current
            }
        }
    }
}

/// Walks the traveler after one object at a time.
pub struct ObjectFollower<'a, S: Sky + ?Sized> {
    sky: &'a S,
    target: Position,
    time: Timestamp,
    config: FollowConfig,
}

impl<'a, S: Sky + ?Sized> ObjectFollower<'a, S> {
    pub fn new(sky: &'a S, target: Position, time: Timestamp, config: FollowConfig) -> Self {
        Self {
            sky,
            target,
            time,
            config,
        }
    }

    /// Follow `reference` from `start` until a stop condition fires.
    ///
    /// If the step cap runs out first, the leg ends as a closest approach at
    /// the best point seen.
    pub fn follow(&self, reference: &Sighting, start: Position) -> Result<Leg, SkyError> {
        let mut tracker = LegTracker::new(start, &self.target);
        let mut snapshot = reference.clone();

        let Some(mut azimuth) = reference.azimuth else {
            return Ok(Leg {
                position: start,
                reason: StopReason::ClosestApproach,
                reference: snapshot,
                steps: 0,
            });
        };

        for step in 1..=self.config.max_steps {
            let next = destination(&tracker.current, azimuth, self.config.step_size_km);
            let horizontal = self
                .sky
                .object_position(&snapshot.object, &next, self.time)?;
            let is_visible = self
                .config
                .visibility
                .admits(snapshot.object.magnitude, horizontal.altitude);
            snapshot = snapshot.resighted(horizontal, is_visible);
            azimuth = horizontal.azimuth;

            let state = tracker.advance(
                next,
                horizontal.altitude,
                &self.target,
                self.config.target_reached_cutoff_km,
            );
            if let Some(reason) = state.stop_reason() {
                debug!(
                    object = %snapshot.object.name,
                    steps = step,
                    reason = reason.as_str(),
                    "leg stopped"
                );
                return Ok(Leg {
                    position: tracker.stop_position(),
                    reason,
                    reference: snapshot,
                    steps: step,
                });
            }
        }

        warn!(
            object = %snapshot.object.name,
            max_steps = self.config.max_steps,
            "step cap exhausted, ending leg at closest point"
        );
        Ok(Leg {
            position: tracker.closest,
            reason: StopReason::ClosestApproach,
            reference: snapshot,
            steps: self.config.max_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        model::{CelestialObject, Horizontal},
        testing::{PursuitSky, ScriptedSky, observation_time, pos, sighting},
    };

    fn no_candidates(_: &Position, _: &std::collections::HashSet<String>) -> Vec<Sighting> {
        Vec::new()
    }

    fn config(step_size_km: f64, cutoff_km: f64) -> FollowConfig {
        FollowConfig {
            step_size_km,
            target_reached_cutoff_km: cutoff_km,
            ..FollowConfig::default()
        }
    }

    #[test]
    fn reaches_target_when_object_points_at_it() {
        let target = pos(1.0, 0.0);
        let sky = PursuitSky::new(target).star("Beacon", 0.0, 45.0);
        let follower = ObjectFollower::new(&sky, target, observation_time(), config(10.0, 5.0));

        let leg = follower
            .follow(&sighting("Beacon", 0.0, 45.0), pos(0.0, 0.0))
            .unwrap();

        assert_eq!(leg.reason, StopReason::TargetReached);
        assert_eq!(leg.steps, 11);
        assert!(distance(&leg.position, &target) < 5.0);
        assert_eq!(leg.reference.name(), "Beacon");
    }

    #[test]
    fn object_lost_reports_position_before_the_setting_step() {
        // Altitude falls by 100° per degree of latitude walked north:
        // 21°, 12°, 3°, then below the horizon on the fourth step.
        let sky = ScriptedSky {
            candidates: no_candidates,
            locate: |_, position| {
                Ok(Horizontal {
                    azimuth: 0.0,
                    altitude: 30.0 - position.latitude * 100.0,
                })
            },
        };
        let start = pos(0.0, 0.0);
        let follower =
            ObjectFollower::new(&sky, pos(10.0, 0.0), observation_time(), config(10.0, 5.0));

        let leg = follower
            .follow(&sighting("Sinking", 0.0, 30.0), start)
            .unwrap();

        let mut expected = start;
        for _ in 0..3 {
            expected = destination(&expected, 0.0, 10.0);
        }
        assert_eq!(leg.reason, StopReason::ObjectLost);
        assert_eq!(leg.steps, 4);
        assert_eq!(leg.position, expected);
        assert!(leg.reference.altitude.unwrap() <= 0.0);
        assert!(!leg.reference.is_visible);
    }

    #[test]
    fn altitude_of_exactly_zero_counts_as_lost() {
        let sky = ScriptedSky {
            candidates: no_candidates,
            locate: |_, _| {
                Ok(Horizontal {
                    azimuth: 0.0,
                    altitude: 0.0,
                })
            },
        };
        let start = pos(0.0, 0.0);
        let follower =
            ObjectFollower::new(&sky, pos(10.0, 0.0), observation_time(), config(10.0, 5.0));

        let leg = follower.follow(&sighting("Grazing", 0.0, 10.0), start).unwrap();
        assert_eq!(leg.reason, StopReason::ObjectLost);
        assert_eq!(leg.position, start);
        assert_eq!(leg.steps, 1);
    }

    #[test]
    fn closest_approach_reports_closest_point_not_current() {
        // Walking north-east past a target due north.
        let sky = ScriptedSky {
            candidates: no_candidates,
            locate: |_, _| {
                Ok(Horizontal {
                    azimuth: 45.0,
                    altitude: 45.0,
                })
            },
        };
        let start = pos(0.0, 0.0);
        let target = pos(1.0, 0.0);
        let follower = ObjectFollower::new(&sky, target, observation_time(), config(10.0, 5.0));

        let leg = follower.follow(&sighting("Skew", 45.0, 45.0), start).unwrap();

        let mut closest = start;
        loop {
            let next = destination(&closest, 45.0, 10.0);
            if distance(&next, &target) > distance(&closest, &target) {
                break;
            }
            closest = next;
        }
        assert_eq!(leg.reason, StopReason::ClosestApproach);
        assert_eq!(leg.position, closest);
        assert!(distance(&leg.position, &target) < distance(&start, &target));
    }

    #[test]
    fn step_cap_falls_back_to_closest_approach() {
        let sky = ScriptedSky {
            candidates: no_candidates,
            locate: |_, _| {
                Ok(Horizontal {
                    azimuth: 0.0,
                    altitude: 45.0,
                })
            },
        };
        let start = pos(0.0, 0.0);
        let follower = ObjectFollower::new(
            &sky,
            pos(80.0, 0.0),
            observation_time(),
            FollowConfig {
                step_size_km: 1.0,
                target_reached_cutoff_km: 5.0,
                max_steps: 5,
                visibility: Visibility::default(),
            },
        );

        let leg = follower.follow(&sighting("Steady", 0.0, 45.0), start).unwrap();

        let mut expected = start;
        for _ in 0..5 {
            expected = destination(&expected, 0.0, 1.0);
        }
        assert_eq!(leg.reason, StopReason::ClosestApproach);
        assert_eq!(leg.steps, 5);
        assert_eq!(leg.position, expected);
    }

    #[test]
    fn reference_without_azimuth_ends_leg_in_place() {
        let sky = PursuitSky::new(pos(1.0, 0.0));
        let follower =
            ObjectFollower::new(&sky, pos(1.0, 0.0), observation_time(), FollowConfig::default());
        let mut blind = sighting("Blind", 0.0, 45.0);
        blind.azimuth = None;

        let leg = follower.follow(&blind, pos(0.0, 0.0)).unwrap();
        assert_eq!(leg.reason, StopReason::ClosestApproach);
        assert_eq!(leg.steps, 0);
        assert_eq!(leg.position, pos(0.0, 0.0));
    }

    #[test]
    fn sky_failures_propagate() {
        let sky = ScriptedSky {
            candidates: no_candidates,
            locate: |object: &CelestialObject, _| {
                Err(SkyError::EphemerisUnavailable(object.name.clone()))
            },
        };
        let follower =
            ObjectFollower::new(&sky, pos(1.0, 0.0), observation_time(), FollowConfig::default());

        let err = follower
            .follow(&sighting("Venus", 0.0, 20.0), pos(0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, SkyError::EphemerisUnavailable("Venus".into()));
    }

    #[test]
    fn snapshot_visibility_follows_configured_thresholds() {
        // 21°, 12°, 3°, then set: the leg runs on below 20° but the
        // snapshot stops counting as visible.
        let sky = ScriptedSky {
            candidates: no_candidates,
            locate: |_, position| {
                Ok(Horizontal {
                    azimuth: 0.0,
                    altitude: 30.0 - position.latitude * 100.0,
                })
            },
        };
        let mut config = config(10.0, 5.0);
        config.visibility = Visibility {
            min_altitude: 20.0,
            max_magnitude: 6.0,
        };
        config.max_steps = 2;
        let follower = ObjectFollower::new(&sky, pos(10.0, 0.0), observation_time(), config);

        let leg = follower
            .follow(&sighting("Sinking", 0.0, 30.0), pos(0.0, 0.0))
            .unwrap();

        assert_eq!(leg.reason, StopReason::ClosestApproach);
        assert_eq!(leg.steps, 2);
        let altitude = leg.reference.altitude.unwrap();
        assert!(altitude > 0.0 && altitude < 20.0, "{altitude}");
        assert!(!leg.reference.is_visible);
    }

    #[test]
    fn tracker_keeps_following_while_closing_in() {
        let target = pos(1.0, 0.0);
        let mut tracker = LegTracker::new(pos(0.0, 0.0), &target);

        let state = tracker.advance(pos(0.1, 0.0), 30.0, &target, 5.0);
        assert_eq!(state, FollowState::Following);
        assert_eq!(tracker.closest, pos(0.1, 0.0));
        assert_eq!(state.stop_reason(), None);
    }
}
