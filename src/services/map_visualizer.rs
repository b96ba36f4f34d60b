// src/services/map_visualizer.rs
// DOCUMENTATION: Stylized route map
// PURPOSE: Lay out place items on a synthetic circle and overlay nearby travelers.
// Not a geographic projection: only the item order defines the route.

use crate::models::{ItineraryItem, NearbyTraveler};
use geo_types::{Coord, LineString};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt::Write;

/// Size of the square view box
pub const VIEW_BOX: f64 = 100.0;
/// Center of the route circle
pub const CENTER: f64 = 50.0;
/// Radius of the route circle
pub const RADIUS: f64 = 35.0;
/// Maximum distance of a traveler marker from the center, per axis
pub const TRAVELER_SPREAD: f64 = 30.0;

/// One numbered stop of the route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteNode {
    pub item_id: String,
    pub title: String,
    /// 1-based position in the route
    pub order: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerMarker {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub x: f64,
    pub y: f64,
}

/// Rendered map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RouteMap {
    /// No place items to draw
    Placeholder,
    Diagram {
        label: String,
        nodes: Vec<RouteNode>,
        #[serde(serialize_with = "serialize_path")]
        path: LineString<f64>,
        travelers: Vec<TravelerMarker>,
    },
}

fn serialize_path<S>(path: &LineString<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    let mut seq = serializer.serialize_seq(Some(path.0.len()))?;
    for coord in &path.0 {
        seq.serialize_element(&[coord.x, coord.y])?;
    }
    seq.end()
}

/// Position of the index-th of count nodes on the route circle
pub fn circle_position(index: usize, count: usize) -> Coord<f64> {
    let angle = (index as f64 / count as f64) * 2.0 * PI;
    Coord {
        x: CENTER + RADIUS * angle.cos(),
        y: CENTER + RADIUS * angle.sin(),
    }
}

/// Random marker position within the traveler spread around the center
/// DOCUMENTATION: Drawn once when live mode is switched on so markers stay put
/// across renders
pub fn random_marker_position() -> (f64, f64) {
    let mut rng = rand::rng();
    (
        CENTER + rng.random_range(-TRAVELER_SPREAD..TRAVELER_SPREAD),
        CENTER + rng.random_range(-TRAVELER_SPREAD..TRAVELER_SPREAD),
    )
}

/// Render the route of an item list
/// DOCUMENTATION: Pure function; only place items become nodes, connected in
/// index order by a single polyline
pub fn render_route_map(items: &[ItineraryItem], travelers: &[NearbyTraveler]) -> RouteMap {
    let places: Vec<&ItineraryItem> = items.iter().filter(|item| item.is_place()).collect();

    if places.is_empty() {
        return RouteMap::Placeholder;
    }

    let nodes: Vec<RouteNode> = places
        .iter()
        .enumerate()
        .map(|(index, place)| {
            let position = circle_position(index, places.len());
            RouteNode {
                item_id: place.id.clone(),
                title: place.title.clone(),
                order: index + 1,
                x: position.x,
                y: position.y,
            }
        })
        .collect();

    let path: LineString<f64> = nodes.iter().map(|n| Coord { x: n.x, y: n.y }).collect();

    let label = if travelers.is_empty() {
        "Offline Map View".to_string()
    } else {
        format!("Live Map ({} travelers nearby)", travelers.len())
    };

    let travelers = travelers
        .iter()
        .map(|t| TravelerMarker {
            id: t.id.clone(),
            name: t.name.clone(),
            avatar: t.avatar.clone(),
            x: t.map_x,
            y: t.map_y,
        })
        .collect();

    RouteMap::Diagram {
        label,
        nodes,
        path,
        travelers,
    }
}

impl RouteMap {
    pub fn node_count(&self) -> usize {
        match self {
            RouteMap::Placeholder => 0,
            RouteMap::Diagram { nodes, .. } => nodes.len(),
        }
    }

    /// SVG document for the map
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {0} {0}">"#,
            VIEW_BOX
        );

        match self {
            RouteMap::Placeholder => {
                svg.push_str(r##"<rect width="100" height="100" fill="#E5E7EB"/>"##);
                svg.push_str(
                    r##"<text x="50" y="50" font-size="6" text-anchor="middle" fill="#6B7280">No route data</text>"##,
                );
            }
            RouteMap::Diagram {
                label,
                nodes,
                path,
                travelers,
            } => {
                svg.push_str(r##"<rect width="100" height="100" fill="#EFF6FF"/>"##);
                let _ = write!(
                    svg,
                    r##"<text x="3" y="6" font-size="4" fill="#1E40AF">{}</text>"##,
                    escape_xml(label)
                );

                let points: Vec<String> = path
                    .0
                    .iter()
                    .map(|c| format!("{:.2},{:.2}", c.x, c.y))
                    .collect();
                let _ = write!(
                    svg,
                    r##"<path d="M {}" fill="none" stroke="#94A3B8" stroke-width="1" stroke-dasharray="4 2"/>"##,
                    points.join(" L ")
                );

                for node in nodes {
                    let _ = write!(
                        svg,
                        r##"<g><circle cx="{x:.2}" cy="{y:.2}" r="6" fill="white" stroke="#5E35B1" stroke-width="2"/><text x="{x:.2}" y="{ty:.2}" font-size="4" text-anchor="middle" fill="#374151">{order}</text></g>"##,
                        x = node.x,
                        y = node.y,
                        ty = node.y + 1.5,
                        order = node.order
                    );
                }

                for marker in travelers {
                    let _ = write!(
                        svg,
                        r##"<g><circle cx="{x:.2}" cy="{y:.2}" r="4" fill="#00BFA5" stroke="white" stroke-width="1"/><image href="{href}" x="{ix:.2}" y="{iy:.2}" height="4" width="4"/></g>"##,
                        x = marker.x,
                        y = marker.y,
                        href = escape_xml(&marker.avatar),
                        ix = marker.x - 2.0,
                        iy = marker.y - 2.0
                    );
                }
            }
        }

        svg.push_str("</svg>");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
