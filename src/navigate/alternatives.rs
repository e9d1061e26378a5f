//! Several distinct routes for the same request.
//!
//! The planner runs once per [`RouteVariant`] until enough distinct routes
//! are collected. The variants to try are an explicit list; two presets
//! come with [`AlternativeStrategy`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::plan::{PlanOptions, RoutePlanner, RouteRequest};
use crate::{
    error::Result,
    model::{OptimizeFor, Route},
    sky::Sky,
};

/// One way of asking the planner for a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteVariant {
    /// The caller's own policy.
    Requested,

    /// A fixed selection policy.
    Optimize(OptimizeFor),

    /// "Shortest" while avoiding the objects earlier routes led with.
    ///
    /// Tries excluding the first object of the first route, then that of the
    /// second route if different, then both. The first attempt that yields
    /// a new route wins.
    ExcludeLeaders,

    /// "Shortest" with a scaled step and the major-body preference flipped.
    Perturbed { step_scale: f64 },
}

impl RouteVariant {
    /// Planner runs to attempt for this variant, given the routes so far.
    fn attempts(self, request: &RouteRequest, found: &[Route]) -> Vec<PlanOptions> {
        let base = PlanOptions::from_request(request);
        match self {
            Self::Requested => vec![base],
            Self::Optimize(optimize_for) => vec![PlanOptions {
                optimize_for,
                ..base
            }],
            Self::ExcludeLeaders => leader_exclusions(found)
                .into_iter()
                .map(|excluded| PlanOptions {
                    optimize_for: OptimizeFor::Shortest,
                    excluded,
                    ..base.clone()
                })
                .collect(),
            Self::Perturbed { step_scale } => vec![PlanOptions {
                optimize_for: OptimizeFor::Shortest,
                prioritize_major: !base.prioritize_major,
                step_size_km: base.step_size_km * step_scale,
                ..base
            }],
        }
    }
}

fn leader_exclusions(found: &[Route]) -> Vec<HashSet<String>> {
    let mut sets: Vec<HashSet<String>> = Vec::new();
    let leader = |index: usize| found.get(index).and_then(|r| r.used_objects.first());

    if let Some(first) = leader(0) {
        sets.push(HashSet::from([first.clone()]));
    }
    if let Some(second) = leader(1)
        && sets.first().is_none_or(|set| !set.contains(second))
    {
        sets.push(HashSet::from([second.clone()]));
    }
    if let [a, b] = sets.as_slice() {
        let both = a.union(b).cloned().collect();
        sets.push(both);
    }
    sets
}

/// Named sets of variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternativeStrategy {
    /// Requested, least changes, exclusions of leading objects, then a
    /// perturbed fallback.
    #[default]
    Exclusions,

    /// Requested, least changes, and a comfortable route that keeps its
    /// label.
    Comfortable,
}

impl AlternativeStrategy {
    pub fn variants(self) -> Vec<RouteVariant> {
        match self {
            Self::Exclusions => vec![
                RouteVariant::Requested,
                RouteVariant::Optimize(OptimizeFor::LeastChanges),
                RouteVariant::ExcludeLeaders,
                RouteVariant::Perturbed { step_scale: 1.5 },
            ],
            Self::Comfortable => vec![
                RouteVariant::Requested,
                RouteVariant::Optimize(OptimizeFor::LeastChanges),
                RouteVariant::Optimize(OptimizeFor::Comfortable),
            ],
        }
    }
}

/// Plan up to `request.max_routes` distinct routes, sorted and labeled.
///
/// # Errors
///
/// Fails when the first planner run fails, or when any run hits a sky
/// provider failure. Infeasible later runs only shorten the result.
/// Without any run to attempt, the requested route is planned.
pub fn plan_routes<S: Sky + ?Sized>(
    sky: &S,
    request: &RouteRequest,
    variants: &[RouteVariant],
) -> Result<Vec<Route>> {
    let planner = RoutePlanner::new(sky, request);
    let wanted = request.max_routes.max(1);
    let mut routes: Vec<Route> = Vec::new();

    for variant in variants {
        if routes.len() >= wanted {
            break;
        }

        for options in variant.attempts(request, &routes) {
            match planner.plan(&options) {
                Ok(route) if routes.iter().any(|r| r.same_path(&route)) => {
                    debug!(?variant, used = ?route.used_objects, "duplicate route skipped");
                }
                Ok(route) => {
                    routes.push(route);
                    break;
                }
                Err(err) if routes.is_empty() || !err.is_infeasible() => return Err(err),
                Err(err) => {
                    warn!(?variant, error = %err, "alternative route failed");
                }
            }
        }
    }

    if routes.is_empty() {
        // No variant ran the planner at all; the requested route is the primary.
        routes.push(planner.plan(&PlanOptions::from_request(request))?);
    }

    label_routes(&mut routes);
    Ok(routes)
}

/// Sort by total distance and assign ids and labels by rank.
///
/// The shortest route is always "Shortest Path". Label-keeping policies
/// keep theirs. Of the rest, the one with the fewest waypoints becomes
/// "Fewest Waypoints" and the others "Alternative Route N", N being the
/// rank.
pub fn label_routes(routes: &mut [Route]) {
    routes.sort_by(|a, b| a.total_distance.total_cmp(&b.total_distance));

    let fewest = routes
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, route)| !route.optimize_for.keeps_label())
        .min_by_key(|(rank, route)| (route.waypoints.len(), *rank))
        .map(|(rank, _)| rank);

    for (rank, route) in routes.iter_mut().enumerate() {
        let (id, label) = if rank == 0 {
            identity(OptimizeFor::Shortest)
        } else if route.optimize_for.keeps_label() {
            identity(route.optimize_for)
        } else if fewest == Some(rank) {
            identity(OptimizeFor::LeastChanges)
        } else {
            (format!("alternative_{rank}"), format!("Alternative Route {rank}"))
        };
        route.set_identity(id, label);
    }
}

fn identity(optimize_for: OptimizeFor) -> (String, String) {
    (
        optimize_for.route_id().to_string(),
        optimize_for.route_label().to_string(),
    )
}
