//! Freehand brush outlines.
//!
//! A brush stroke is stored as the raw pointer samples. For display and
//! erasing it is turned into a closed, variable-width outline polygon and then
//! into a smoothed quadratic path through the outline's midpoints.

use crate::util::Point;
use serde::Serialize;
use std::f64::consts::PI;

/// Segments used to approximate round caps.
const CAP_SEGMENTS: usize = 13;

/// Segments used when flattening each quadratic for containment tests.
const FLATTEN_SEGMENTS: usize = 4;

/// Rate at which simulated pressure follows pointer speed.
const RATE_OF_PRESSURE_CHANGE: f64 = 0.275;

/// Outline parameters for freehand strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOptions {
    /// Base diameter of the stroke in pixels.
    pub size: f64,
    /// How strongly speed thins the stroke (0 = constant width).
    pub thinning: f64,
    /// How far each sample is pulled toward the previous one (0 = raw input).
    pub streamline: f64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            size: 16.0,
            thinning: 0.5,
            streamline: 0.5,
        }
    }
}

/// One command of a smoothed path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Point },
    QuadTo { control: Point, to: Point },
    Close,
}

/// Closed smoothed path for a brush stroke.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SmoothPath {
    pub commands: Vec<PathCommand>,
    /// Flattened polygon used for containment tests.
    #[serde(skip)]
    polygon: Vec<Point>,
}

impl SmoothPath {
    /// Builds the midpoint-quadratic path through a closed outline.
    pub fn from_outline(outline: &[Point]) -> Self {
        if outline.is_empty() {
            return Self::default();
        }

        let mut commands = Vec::with_capacity(outline.len() + 2);
        let mut polygon = Vec::with_capacity(outline.len() * FLATTEN_SEGMENTS + 1);

        commands.push(PathCommand::MoveTo { to: outline[0] });
        polygon.push(outline[0]);

        let mut current = outline[0];
        for (i, &control) in outline.iter().enumerate() {
            let next = outline[(i + 1) % outline.len()];
            let to = control.midpoint(next);
            commands.push(PathCommand::QuadTo { control, to });
            flatten_quad(current, control, to, &mut polygon);
            current = to;
        }
        commands.push(PathCommand::Close);

        Self { commands, polygon }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Nonzero-winding containment test against the flattened path.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.polygon.len() < 3 {
            return false;
        }

        let mut winding = 0i32;
        for i in 0..self.polygon.len() {
            let a = self.polygon[i];
            let b = self.polygon[(i + 1) % self.polygon.len()];
            let cross = (b.x - a.x) * (y - a.y) - (x - a.x) * (b.y - a.y);
            if a.y <= y {
                if b.y > y && cross > 0.0 {
                    winding += 1;
                }
            } else if b.y <= y && cross < 0.0 {
                winding -= 1;
            }
        }
        winding != 0
    }

    /// Renders the path as SVG path data.
    pub fn to_svg(&self) -> String {
        let mut parts = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            match command {
                PathCommand::MoveTo { to } => parts.push(format!("M {} {}", to.x, to.y)),
                PathCommand::QuadTo { control, to } => parts.push(format!(
                    "Q {} {} {} {}",
                    control.x, control.y, to.x, to.y
                )),
                PathCommand::Close => parts.push("Z".to_string()),
            }
        }
        parts.join(" ")
    }
}

/// Computes the outline polygon of a freehand stroke through `points`.
pub fn stroke_outline(points: &[Point], options: &StrokeOptions) -> Vec<Point> {
    let samples = streamline(points, options.streamline);
    let Some(&first) = samples.first() else {
        return Vec::new();
    };

    let radii = simulated_radii(&samples, options);

    if samples.len() == 1 {
        return circle(first, radii[0]);
    }

    let last_index = samples.len() - 1;
    let mut left = Vec::with_capacity(samples.len());
    let mut right = Vec::with_capacity(samples.len());

    for (i, &point) in samples.iter().enumerate() {
        let prev = samples[i.saturating_sub(1)];
        let next = samples[(i + 1).min(last_index)];
        let (dx, dy) = unit(next.x - prev.x, next.y - prev.y);
        // Left-hand normal of the travel direction.
        let (nx, ny) = (-dy, dx);
        let r = radii[i];
        left.push(Point::new(point.x + nx * r, point.y + ny * r));
        right.push(Point::new(point.x - nx * r, point.y - ny * r));
    }

    let start_dir = unit(samples[1].x - first.x, samples[1].y - first.y);
    let end_point = samples[last_index];
    let prev_end = samples[last_index - 1];
    let end_dir = unit(end_point.x - prev_end.x, end_point.y - prev_end.y);

    let start_left = (-start_dir.1, start_dir.0);
    let end_left = (-end_dir.1, end_dir.0);

    let mut outline = Vec::with_capacity(left.len() + right.len() + CAP_SEGMENTS * 2);
    // Right side -> behind the first sample -> left side.
    outline.extend(cap(
        first,
        radii[0],
        (-start_left.0, -start_left.1),
        (-start_dir.0, -start_dir.1),
    ));
    outline.extend(left);
    // Left side -> ahead of the last sample -> right side.
    outline.extend(cap(end_point, radii[last_index], end_left, end_dir));
    outline.extend(right.into_iter().rev());
    outline
}

/// Outline and smoothed path for `points` in one step.
pub fn smooth_path(points: &[Point], options: &StrokeOptions) -> SmoothPath {
    SmoothPath::from_outline(&stroke_outline(points, options))
}

fn streamline(points: &[Point], amount: f64) -> Vec<Point> {
    let t = 1.0 - amount.clamp(0.0, 0.99);
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &point in points {
        match out.last() {
            None => out.push(point),
            Some(&prev) => {
                let pulled = Point::new(prev.x + (point.x - prev.x) * t, prev.y + (point.y - prev.y) * t);
                if pulled.distance_to(prev) > f64::EPSILON {
                    out.push(pulled);
                }
            }
        }
    }
    out
}

fn simulated_radii(samples: &[Point], options: &StrokeOptions) -> Vec<f64> {
    let mut pressure = 0.5;
    let mut prev = samples[0];
    samples
        .iter()
        .map(|&point| {
            let distance = point.distance_to(prev);
            prev = point;
            if distance > 0.0 {
                let speed = (distance / options.size).min(1.0);
                let target = 1.0 - speed;
                pressure = (pressure + (target - pressure) * speed * RATE_OF_PRESSURE_CHANGE).min(1.0);
            }
            let radius = options.size * (0.5 - options.thinning * (0.5 - pressure));
            radius.max(0.5)
        })
        .collect()
}

fn unit(dx: f64, dy: f64) -> (f64, f64) {
    let len = (dx * dx + dy * dy).sqrt();
    if len > 0.0 { (dx / len, dy / len) } else { (1.0, 0.0) }
}

fn circle(center: Point, radius: f64) -> Vec<Point> {
    (0..CAP_SEGMENTS)
        .map(|i| {
            let angle = (i as f64 / CAP_SEGMENTS as f64) * PI * 2.0;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

/// Half-circle around `center` from the `from` side through the `via` direction.
///
/// Both directions are unit vectors; the two endpoints are excluded since they
/// coincide with the outline's side points.
fn cap(center: Point, radius: f64, from: (f64, f64), via: (f64, f64)) -> Vec<Point> {
    (1..CAP_SEGMENTS)
        .map(|i| {
            let angle = PI * (i as f64 / CAP_SEGMENTS as f64);
            let (c, s) = (angle.cos(), angle.sin());
            Point::new(
                center.x + radius * (c * from.0 + s * via.0),
                center.y + radius * (c * from.1 + s * via.1),
            )
        })
        .collect()
}

fn flatten_quad(from: Point, control: Point, to: Point, out: &mut Vec<Point>) {
    for i in 1..=FLATTEN_SEGMENTS {
        let t = i as f64 / FLATTEN_SEGMENTS as f64;
        let u = 1.0 - t;
        out.push(Point::new(
            u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
            u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
        ));
    }
}
