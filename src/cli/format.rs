//! Output formatting for CLI display.

use std::fmt::Write;

use starhelm::{Route, Sighting, geodesy::Direction};

/// Format a compass answer as `bearing° CARDINAL`.
pub(super) fn format_direction(direction: &Direction) -> String {
    format!("{:.1}° {}", direction.bearing, direction.cardinal_direction)
}

/// One block per route: header, totals, then one line per waypoint.
pub(super) fn format_routes(routes: &[Route]) -> String {
    let mut out = String::new();
    for (i, route) in routes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{} [{}]", route.label, route.id);
        let _ = writeln!(
            out,
            "  {:.1} km traveled, {:.1} km direct, {} leg(s), arrival within {:.2} km",
            route.total_distance,
            route.direct_distance,
            route.iterations,
            route.target_reached_cutoff
        );
        for (n, waypoint) in route.waypoints.iter().enumerate() {
            let via = waypoint
                .reference_object
                .as_ref()
                .map_or("direct", Sighting::name);
            let _ = writeln!(
                out,
                "  {:>2}. {}  via {via}  ({}, {:.1} km to go)",
                n + 1,
                waypoint.position,
                waypoint.reason.as_str(),
                waypoint.distance_to_target
            );
        }
    }
    out
}

/// One line per visible object, in provider order.
pub(super) fn format_sightings(sightings: &[Sighting]) -> String {
    if sightings.is_empty() {
        return "Nothing visible\n".to_string();
    }
    let mut out = String::new();
    for sighting in sightings {
        let (azimuth, altitude) = sighting
            .horizontal()
            .map_or((f64::NAN, f64::NAN), |h| (h.azimuth, h.altitude));
        let _ = writeln!(
            out,
            "{:<16} mag {:>5.2}  az {azimuth:>5.1}°  alt {altitude:>4.1}°",
            sighting.name(),
            sighting.object.magnitude
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use starhelm::{
        CelestialObject, Horizontal, OptimizeFor, Position, StopReason, Waypoint,
        geodesy::direction,
    };

    fn vega() -> Sighting {
        Sighting::observed(
            CelestialObject::star("Vega", 18.6156, 38.7837, 0.03),
            Horizontal {
                azimuth: 75.3,
                altitude: 42.5,
            },
            true,
        )
    }

    fn sample_route() -> Route {
        Route {
            id: "shortest".into(),
            label: "Shortest Path".into(),
            optimize_for: OptimizeFor::Shortest,
            observation_time: Timestamp::UNIX_EPOCH,
            waypoints: vec![
                Waypoint {
                    position: Position::new(0.5, 0.0).unwrap(),
                    reference_object: Some(vega()),
                    reason: StopReason::ObjectLost,
                    timestamp: Timestamp::UNIX_EPOCH,
                    distance_to_target: 55.6,
                },
                Waypoint {
                    position: Position::new(0.99, 0.0).unwrap(),
                    reference_object: None,
                    reason: StopReason::TargetReached,
                    timestamp: Timestamp::UNIX_EPOCH,
                    distance_to_target: 0.0,
                },
            ],
            total_distance: 110.0,
            direct_distance: 111.2,
            iterations: 2,
            used_objects: vec!["Vega".into()],
            target_reached_cutoff: 5.0,
        }
    }

    #[test]
    fn format_direction_north() {
        let d = direction(&Position::new(0.0, 0.0).unwrap(), &Position::new(1.0, 0.0).unwrap());
        assert_eq!(format_direction(&d), "0.0° N");
    }

    #[test]
    fn format_route_block() {
        let text = format_routes(&[sample_route()]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Shortest Path [shortest]");
        assert_eq!(
            lines[1],
            "  110.0 km traveled, 111.2 km direct, 2 leg(s), arrival within 5.00 km"
        );
        assert_eq!(
            lines[2],
            "   1. 0.5000, 0.0000  via Vega  (object_lost, 55.6 km to go)"
        );
        assert_eq!(
            lines[3],
            "   2. 0.9900, 0.0000  via direct  (target_reached, 0.0 km to go)"
        );
    }

    #[test]
    fn format_routes_separates_blocks() {
        let text = format_routes(&[sample_route(), sample_route()]);
        assert_eq!(text.matches("Shortest Path").count(), 2);
        assert!(text.contains("\n\nShortest Path"));
    }

    #[test]
    fn format_sighting_line() {
        let text = format_sightings(&[vega()]);
        assert_eq!(text, "Vega             mag  0.03  az  75.3°  alt 42.5°\n");
    }

    #[test]
    fn format_empty_sky() {
        assert_eq!(format_sightings(&[]), "Nothing visible\n");
    }
}
