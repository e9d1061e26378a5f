//! Route planning: selection, following, single routes, and alternatives.
//!
//! Control flows top-down: [`plan_routes`] drives a [`RoutePlanner`] per
//! variant, and each planner alternates [`select_reference`] with an
//! [`ObjectFollower`] leg until the target is reached.

mod alternatives;
mod follow;
mod plan;
mod select;

pub use alternatives::{AlternativeStrategy, RouteVariant, label_routes, plan_routes};
pub use follow::{FollowConfig, FollowState, Leg, MAX_FOLLOW_STEPS, ObjectFollower};
pub use plan::{PlanOptions, RoutePlanner, RouteRequest};
pub use select::{
    ALTITUDE_BONUS_DEG, COMFORTABLE_MIN_ALTITUDE_DEG, MAJOR_BODY_BONUS_DEG, SelectionPolicy,
    select_reference,
};
