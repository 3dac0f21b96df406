//! Geometry helpers shared by the element factory and the hit-test engine.
//!
//! This module provides:
//! - Distance, point-to-line and point-to-circle proximity tests
//! - Arrowhead barb coordinates
//! - Color-name mapping used by the configuration layer

use crate::draw::{Color, color::*};
use serde::Serialize;

/// Default tolerance for the line proximity test (sum-of-distances slack).
pub const LINE_THRESHOLD: f64 = 0.1;

/// Default tolerance for the circle proximity test (distance from the rim).
pub const CIRCLE_THRESHOLD: f64 = 5.0;

/// Default arrowhead barb length in pixels.
pub const ARROW_LENGTH: f64 = 20.0;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        distance(self.x, self.y, other.x, other.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new(
            self.x + (other.x - self.x) / 2.0,
            self.y + (other.y - self.y) / 2.0,
        )
    }
}

// ============================================================================
// Proximity Tests
// ============================================================================

/// Euclidean distance between `(ax, ay)` and `(bx, by)`.
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Returns true when `(px, py)` lies "on" the segment from `(x1, y1)` to `(x2, y2)`.
///
/// Uses the sum-of-distances test: the point is accepted when the detour through
/// it is within [`LINE_THRESHOLD`] of the segment length. Points well outside
/// the segment along its own line are still rejected only by that small slack.
pub fn is_point_near_line(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> bool {
    is_point_near_line_within(x1, y1, x2, y2, px, py, LINE_THRESHOLD)
}

/// [`is_point_near_line`] with an explicit tolerance.
pub fn is_point_near_line_within(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    px: f64,
    py: f64,
    threshold: f64,
) -> bool {
    let to_start = distance(x1, y1, px, py);
    let to_end = distance(x2, y2, px, py);
    let length = distance(x1, y1, x2, y2);
    (to_start + to_end - length).abs() < threshold
}

/// Returns true when `(px, py)` is within [`CIRCLE_THRESHOLD`] of the circle rim.
pub fn is_point_near_circle(cx: f64, cy: f64, radius: f64, px: f64, py: f64) -> bool {
    is_point_near_circle_within(cx, cy, radius, px, py, CIRCLE_THRESHOLD)
}

/// [`is_point_near_circle`] with an explicit tolerance.
pub fn is_point_near_circle_within(
    cx: f64,
    cy: f64,
    radius: f64,
    px: f64,
    py: f64,
    threshold: f64,
) -> bool {
    (distance(cx, cy, px, py) - radius).abs() < threshold
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two barb endpoints of an arrowhead at the tip `(x2, y2)`.
///
/// Each barb points back along the shaft, rotated ±30° from it, at `length`
/// pixels from the tip. Degenerate shafts (tip == tail) use an angle of zero.
///
/// # Returns
/// `[(x3, y3), (x4, y4)]`
pub fn arrow_head_coordinates(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    length: f64,
) -> [(f64, f64); 2] {
    let angle = (y2 - y1).atan2(x2 - x1);
    let spread = std::f64::consts::FRAC_PI_6;

    let x3 = x2 - length * (angle - spread).cos();
    let y3 = y2 - length * (angle - spread).sin();

    let x4 = x2 - length * (angle + spread).cos();
    let y4 = y2 - length * (angle + spread).sin();

    [(x3, y3), (x4, y4)]
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings (or `#rrggbb` hex) to Color values.
///
/// Used by the configuration system and event scripts.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        other => Color::from_hex(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn midpoint_of_segment_is_near_line() {
        assert!(is_point_near_line(0.0, 0.0, 100.0, 0.0, 50.0, 0.0));
        assert!(is_point_near_line(10.0, 10.0, 50.0, 50.0, 30.0, 30.0));
    }

    #[test]
    fn far_point_is_not_near_line() {
        assert!(!is_point_near_line(0.0, 0.0, 100.0, 0.0, 50.0, 40.0));
        assert!(!is_point_near_line(0.0, 0.0, 100.0, 0.0, 300.0, 0.0));
    }

    #[test]
    fn explicit_threshold_widens_line_test() {
        // Detour through (50, 5) is ~0.5px longer than the segment.
        assert!(!is_point_near_line_within(0.0, 0.0, 100.0, 0.0, 50.0, 5.0, 0.1));
        assert!(is_point_near_line_within(0.0, 0.0, 100.0, 0.0, 50.0, 5.0, 1.0));
    }

    #[test]
    fn circle_test_checks_rim_not_interior() {
        assert!(is_point_near_circle(0.0, 0.0, 10.0, 10.0, 0.0));
        assert!(is_point_near_circle(0.0, 0.0, 10.0, 0.0, -12.0));
        assert!(!is_point_near_circle(0.0, 0.0, 20.0, 0.0, 0.0));
        assert!(!is_point_near_circle(0.0, 0.0, 10.0, 30.0, 0.0));
    }

    #[test]
    fn arrow_barbs_sit_behind_the_tip_at_thirty_degrees() {
        let [(x3, y3), (x4, y4)] = arrow_head_coordinates(0.0, 0.0, 100.0, 0.0, 20.0);

        assert!((distance(100.0, 0.0, x3, y3) - 20.0).abs() < 1e-9);
        assert!((distance(100.0, 0.0, x4, y4) - 20.0).abs() < 1e-9);
        assert!(x3 < 100.0 && x4 < 100.0);
        // Mirror images across the shaft.
        assert!((y3 + y4).abs() < 1e-9);
        assert!((y3.abs() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn name_to_color_handles_names_and_hex() {
        assert_eq!(name_to_color("Black"), Some(BLACK));
        assert_eq!(name_to_color("#ff0000"), Some(RED));
        assert!(name_to_color("chartreuse").is_none());
    }
}
