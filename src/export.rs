//! Route export: GPX tracks and GeoJSON feature collections.
//!
//! Both formats carry one point per waypoint, in route order. A waypoint
//! without a reference object (the closing arrival point) is shown as
//! "Direct".

use std::fmt::Write;

use serde_json::{Value, json};

use crate::model::{Route, Waypoint};

const DIRECT: &str = "Direct";

fn via(waypoint: &Waypoint) -> &str {
    waypoint
        .reference_object
        .as_ref()
        .map_or(DIRECT, |sighting| sighting.name())
}

/// Render `route` as a GPX 1.1 document with a single track segment.
pub fn gpx(route: &Route, name: &str) -> String {
    let name = escape_xml(name);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<gpx version="1.1" creator="starhelm" xmlns="http://www.topografix.com/GPX/1/1">"#
    );
    let _ = writeln!(out, "  <metadata>");
    let _ = writeln!(out, "    <name>{name}</name>");
    let _ = writeln!(out, "    <time>{}</time>", route.observation_time);
    let _ = writeln!(out, "  </metadata>");
    let _ = writeln!(out, "  <trk>");
    let _ = writeln!(out, "    <name>{name}</name>");
    let _ = writeln!(out, "    <trkseg>");
    for (i, waypoint) in route.waypoints.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"      <trkpt lat="{}" lon="{}">"#,
            waypoint.position.latitude, waypoint.position.longitude
        );
        let _ = writeln!(out, "        <name>Waypoint {}</name>", i + 1);
        let _ = writeln!(
            out,
            "        <desc>Via: {} | Reason: {}</desc>",
            escape_xml(via(waypoint)),
            waypoint.reason.as_str()
        );
        let _ = writeln!(out, "      </trkpt>");
    }
    let _ = writeln!(out, "    </trkseg>");
    let _ = writeln!(out, "  </trk>");
    out.push_str("</gpx>\n");
    out
}

/// Build a GeoJSON `FeatureCollection` for `route`.
///
/// Coordinates are `[longitude, latitude]`. With two or more waypoints a
/// `LineString` feature tracing the whole route comes first.
pub fn geojson(route: &Route, name: &str) -> Value {
    let mut features: Vec<Value> = Vec::with_capacity(route.waypoints.len() + 1);

    if route.waypoints.len() > 1 {
        let coordinates: Vec<[f64; 2]> = route
            .waypoints
            .iter()
            .map(|w| [w.position.longitude, w.position.latitude])
            .collect();
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": { "name": name, "type": "route" },
        }));
    }

    for (i, waypoint) in route.waypoints.iter().enumerate() {
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [waypoint.position.longitude, waypoint.position.latitude],
            },
            "properties": {
                "name": format!("Waypoint {}", i + 1),
                "reference_object": via(waypoint),
                "reason": waypoint.reason,
                "distance_to_target": waypoint.distance_to_target,
            },
        }));
    }

    json!({ "type": "FeatureCollection", "features": features })
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
