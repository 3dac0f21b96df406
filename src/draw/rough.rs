//! Seeded sketch-style ("hand-drawn") geometry generator.
//!
//! Every primitive is approximated by one or two jittered polylines. The jitter
//! comes from a [`StdRng`] seeded per drawable, so generating the same primitive
//! with the same options always yields identical points.

use super::color::Color;
use crate::util::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::PI;

/// Generation parameters for a single drawable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoughOptions {
    pub roughness: f64,
    pub bowing: f64,
    pub stroke_width: f64,
    pub max_randomness_offset: f64,
    pub curve_step_count: u32,
    pub curve_tightness: f64,
    pub disable_multi_stroke: bool,
    pub preserve_vertices: bool,
    /// Outline color; `None` leaves the choice to the presenter.
    pub stroke: Option<Color>,
    /// Solid fill color; `None` means unfilled.
    pub fill: Option<Color>,
    /// Must be non-zero; zero is reserved for "unseeded" in sketch renderers.
    pub seed: u64,
}

impl Default for RoughOptions {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            bowing: 1.0,
            stroke_width: 1.0,
            max_randomness_offset: 2.0,
            curve_step_count: 9,
            curve_tightness: 0.0,
            disable_multi_stroke: false,
            preserve_vertices: false,
            stroke: None,
            fill: None,
            seed: 1,
        }
    }
}

/// Primitive a drawable was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawableShape {
    Line,
    Rectangle,
    Circle,
    Ellipse,
    LinearPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpSetKind {
    /// Open polyline to be stroked with `stroke_width`.
    Stroke,
    /// Closed polygon to be filled.
    Fill,
}

/// One polyline (or polygon) of a drawable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpSet {
    pub kind: OpSetKind,
    pub points: Vec<Point>,
}

impl OpSet {
    fn stroke(points: Vec<Point>) -> Self {
        Self {
            kind: OpSetKind::Stroke,
            points,
        }
    }

    fn fill(points: Vec<Point>) -> Self {
        Self {
            kind: OpSetKind::Fill,
            points,
        }
    }
}

/// Renderable sketch geometry. Fill sets come before stroke sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawable {
    pub shape: DrawableShape,
    pub sets: Vec<OpSet>,
    pub options: RoughOptions,
}

impl Drawable {
    pub fn stroke_sets(&self) -> impl Iterator<Item = &OpSet> {
        self.sets.iter().filter(|set| set.kind == OpSetKind::Stroke)
    }

    pub fn fill_sets(&self) -> impl Iterator<Item = &OpSet> {
        self.sets.iter().filter(|set| set.kind == OpSetKind::Fill)
    }
}

pub struct RoughGenerator {
    rng: StdRng,
}

impl RoughGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from `options.seed`.
    pub fn for_options(options: &RoughOptions) -> Self {
        Self::new(options.seed)
    }

    fn random(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn offset(&mut self, min: f64, max: f64, options: &RoughOptions, roughness_gain: f64) -> f64 {
        options.roughness * roughness_gain * ((self.random() * (max - min)) + min)
    }

    fn offset_opt(&mut self, x: f64, options: &RoughOptions, roughness_gain: f64) -> f64 {
        self.offset(-x, x, options, roughness_gain)
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, options: &RoughOptions) -> Drawable {
        let sets = self
            .double_line(Point::new(x1, y1), Point::new(x2, y2), options)
            .into_iter()
            .map(OpSet::stroke)
            .collect();
        Drawable {
            shape: DrawableShape::Line,
            sets,
            options: options.clone(),
        }
    }

    /// Rectangle with its origin at `(x, y)`; negative extents are allowed.
    pub fn rectangle(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        options: &RoughOptions,
    ) -> Drawable {
        let corners = [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];

        let mut sets = Vec::new();
        if options.fill.is_some() {
            sets.push(OpSet::fill(corners.to_vec()));
        }
        for i in 0..corners.len() {
            let start = corners[i];
            let end = corners[(i + 1) % corners.len()];
            sets.extend(
                self.double_line(start, end, options)
                    .into_iter()
                    .map(OpSet::stroke),
            );
        }

        Drawable {
            shape: DrawableShape::Rectangle,
            sets,
            options: options.clone(),
        }
    }

    /// Circle centered on `(cx, cy)` with the given diameter.
    pub fn circle(&mut self, cx: f64, cy: f64, diameter: f64, options: &RoughOptions) -> Drawable {
        let mut drawable = self.ellipse(cx, cy, diameter, diameter, options);
        drawable.shape = DrawableShape::Circle;
        drawable
    }

    /// Ellipse centered on `(cx, cy)`.
    ///
    /// Signed `width`/`height` are kept as signed radii, so a negative extent
    /// traces the mirrored curve instead of collapsing it.
    pub fn ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        options: &RoughOptions,
    ) -> Drawable {
        let rx = width / 2.0;
        let ry = height / 2.0;

        let psq = (PI * 2.0 * ((rx * rx + ry * ry) / 2.0).sqrt()).sqrt();
        let base_steps = options.curve_step_count.max(4) as f64;
        let step_count = base_steps.max((base_steps / 200f64.sqrt()) * psq).ceil();
        let increment = (PI * 2.0) / step_count;

        let rx = rx + self.offset_opt(rx * 0.01, options, 1.0);
        let ry = ry + self.offset_opt(ry * 0.01, options, 1.0);

        let overlap_max = self.offset(0.4, 1.0, options, 1.0);
        let overlap = increment * self.offset(0.1, overlap_max, options, 1.0);
        let estimated = self.ellipse_points(increment, cx, cy, rx, ry, 1.0, overlap, options);

        let mut sets = Vec::new();
        if options.fill.is_some() {
            sets.push(OpSet::fill(estimated.clone()));
        }
        sets.push(OpSet::stroke(curve_through_points(&estimated, options)));

        if !options.disable_multi_stroke && options.roughness != 0.0 {
            let second = self.ellipse_points(increment, cx, cy, rx, ry, 1.5, 0.0, options);
            sets.push(OpSet::stroke(curve_through_points(&second, options)));
        }

        Drawable {
            shape: DrawableShape::Ellipse,
            sets,
            options: options.clone(),
        }
    }

    /// Open path through `points` (consecutive pairs joined by sketch lines).
    pub fn linear_path(&mut self, points: &[Point], options: &RoughOptions) -> Drawable {
        let mut sets = Vec::new();
        for pair in points.windows(2) {
            sets.extend(
                self.double_line(pair[0], pair[1], options)
                    .into_iter()
                    .map(OpSet::stroke),
            );
        }

        Drawable {
            shape: DrawableShape::LinearPath,
            sets,
            options: options.clone(),
        }
    }

    fn double_line(&mut self, start: Point, end: Point, options: &RoughOptions) -> Vec<Vec<Point>> {
        let mut lines = vec![self.rough_line(start, end, options, false)];
        if !options.disable_multi_stroke {
            lines.push(self.rough_line(start, end, options, true));
        }
        lines
    }

    fn rough_line(
        &mut self,
        start: Point,
        end: Point,
        options: &RoughOptions,
        overlay: bool,
    ) -> Vec<Point> {
        let length_sq = (start.x - end.x).powi(2) + (start.y - end.y).powi(2);
        let length = length_sq.sqrt();

        let roughness_gain = if length < 200.0 {
            1.0
        } else if length > 500.0 {
            0.4
        } else {
            (-0.0016668) * length + 1.233334
        };

        let mut offset = options.max_randomness_offset;
        if (offset * offset * 100.0) > length_sq {
            offset = length / 10.0;
        }
        if overlay {
            offset /= 2.0;
        }

        let diverge_point = 0.2 + self.random() * 0.2;
        let mid_disp_x = options.bowing * options.max_randomness_offset * (end.y - start.y) / 200.0;
        let mid_disp_y = options.bowing * options.max_randomness_offset * (start.x - end.x) / 200.0;
        let mid_disp_x = self.offset_opt(mid_disp_x, options, roughness_gain);
        let mid_disp_y = self.offset_opt(mid_disp_y, options, roughness_gain);

        let first = if options.preserve_vertices {
            start
        } else {
            Point::new(
                start.x + self.offset_opt(offset, options, roughness_gain),
                start.y + self.offset_opt(offset, options, roughness_gain),
            )
        };

        let cp1 = Point::new(
            mid_disp_x
                + start.x
                + (end.x - start.x) * diverge_point
                + self.offset_opt(offset, options, roughness_gain),
            mid_disp_y
                + start.y
                + (end.y - start.y) * diverge_point
                + self.offset_opt(offset, options, roughness_gain),
        );
        let cp2 = Point::new(
            mid_disp_x
                + start.x
                + 2.0 * (end.x - start.x) * diverge_point
                + self.offset_opt(offset, options, roughness_gain),
            mid_disp_y
                + start.y
                + 2.0 * (end.y - start.y) * diverge_point
                + self.offset_opt(offset, options, roughness_gain),
        );

        let last = if options.preserve_vertices {
            end
        } else {
            Point::new(
                end.x + self.offset_opt(offset, options, roughness_gain),
                end.y + self.offset_opt(offset, options, roughness_gain),
            )
        };

        let mut points = vec![first];
        points.extend(bezier_curve(first, cp1, cp2, last, 10));
        points
    }

    #[allow(clippy::too_many_arguments)]
    fn ellipse_points(
        &mut self,
        increment: f64,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        offset: f64,
        overlap: f64,
        options: &RoughOptions,
    ) -> Vec<Point> {
        let mut points = Vec::new();
        let rad_offset = self.offset_opt(0.5, options, 1.0) - (PI / 2.0);

        points.push(Point::new(
            self.offset_opt(offset, options, 1.0) + cx + 0.9 * rx * (rad_offset - increment).cos(),
            self.offset_opt(offset, options, 1.0) + cy + 0.9 * ry * (rad_offset - increment).sin(),
        ));

        let end_angle = PI * 2.0 + rad_offset - 0.01;
        let mut angle = rad_offset;
        while angle < end_angle {
            points.push(Point::new(
                self.offset_opt(offset, options, 1.0) + cx + rx * angle.cos(),
                self.offset_opt(offset, options, 1.0) + cy + ry * angle.sin(),
            ));
            angle += increment;
        }

        let closing = [
            (1.0, rad_offset + PI * 2.0 + overlap * 0.5),
            (0.98, rad_offset + overlap),
            (0.9, rad_offset + overlap * 0.5),
        ];
        for (scale, angle) in closing {
            points.push(Point::new(
                self.offset_opt(offset, options, 1.0) + cx + scale * rx * angle.cos(),
                self.offset_opt(offset, options, 1.0) + cy + scale * ry * angle.sin(),
            ));
        }

        points
    }
}

/// Catmull-Rom style curve through `points`, flattened to a polyline.
fn curve_through_points(points: &[Point], options: &RoughOptions) -> Vec<Point> {
    if points.len() < 4 {
        return points.to_vec();
    }

    let s = 1.0 - options.curve_tightness;
    let mut curve = vec![points[1]];

    for i in 1..points.len() - 2 {
        let p0 = points[i - 1];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[i + 2];

        let cp1 = Point::new(
            p1.x + (s * p2.x - s * p0.x) / 6.0,
            p1.y + (s * p2.y - s * p0.y) / 6.0,
        );
        let cp2 = Point::new(
            p2.x + (s * p1.x - s * p3.x) / 6.0,
            p2.y + (s * p1.y - s * p3.y) / 6.0,
        );

        curve.extend(bezier_curve(p1, cp1, cp2, p2, 8));
    }

    curve
}

/// Samples a cubic bezier, excluding `p0`.
fn bezier_curve(p0: Point, p1: Point, p2: Point, p3: Point, segments: u32) -> Vec<Point> {
    let mut points = Vec::with_capacity(segments as usize);

    for i in 1..=segments {
        let t = i as f64 / segments as f64;
        let u = 1.0 - t;
        let tt = t * t;
        let uu = u * u;
        let uuu = uu * u;
        let ttt = tt * t;

        let x = uuu * p0.x + 3.0 * uu * t * p1.x + 3.0 * u * tt * p2.x + ttt * p3.x;
        let y = uuu * p0.y + 3.0 * uu * t * p1.y + 3.0 * u * tt * p2.y + ttt * p3.y;

        points.push(Point::new(x, y));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;

    fn options(seed: u64) -> RoughOptions {
        RoughOptions {
            seed,
            ..RoughOptions::default()
        }
    }

    #[test]
    fn same_seed_reproduces_points() {
        let a = RoughGenerator::new(7).rectangle(0.0, 0.0, 40.0, 30.0, &options(7));
        let b = RoughGenerator::new(7).rectangle(0.0, 0.0, 40.0, 30.0, &options(7));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_changes_jitter() {
        let a = RoughGenerator::new(1).line(0.0, 0.0, 100.0, 0.0, &options(1));
        let b = RoughGenerator::new(2).line(0.0, 0.0, 100.0, 0.0, &options(2));
        assert_ne!(a.sets, b.sets);
    }

    #[test]
    fn line_is_double_stroked_unless_disabled() {
        let drawable = RoughGenerator::new(3).line(0.0, 0.0, 50.0, 50.0, &options(3));
        assert_eq!(drawable.stroke_sets().count(), 2);

        let single = RoughOptions {
            disable_multi_stroke: true,
            ..options(3)
        };
        let drawable = RoughGenerator::new(3).line(0.0, 0.0, 50.0, 50.0, &single);
        assert_eq!(drawable.stroke_sets().count(), 1);
    }

    #[test]
    fn preserved_vertices_hit_the_endpoints() {
        let exact = RoughOptions {
            preserve_vertices: true,
            ..options(4)
        };
        let drawable = RoughGenerator::new(4).line(10.0, 20.0, 90.0, 20.0, &exact);
        let first = &drawable.sets[0].points;
        assert_eq!(first[0], Point::new(10.0, 20.0));
        assert_eq!(*first.last().unwrap(), Point::new(90.0, 20.0));
    }

    #[test]
    fn fill_set_only_when_fill_color_given() {
        let plain = RoughGenerator::new(5).ellipse(0.0, 0.0, 40.0, 20.0, &options(5));
        assert_eq!(plain.fill_sets().count(), 0);

        let filled_options = RoughOptions {
            fill: Some(RED),
            ..options(5)
        };
        let filled = RoughGenerator::new(5).rectangle(0.0, 0.0, 10.0, 10.0, &filled_options);
        assert_eq!(filled.sets[0].kind, OpSetKind::Fill);
        assert_eq!(filled.sets[0].points.len(), 4);
    }

    #[test]
    fn negative_ellipse_extent_mirrors_instead_of_collapsing() {
        let drawable = RoughGenerator::new(6).ellipse(0.0, 0.0, -80.0, -40.0, &options(6));
        let xs: Vec<f64> = drawable.sets[0].points.iter().map(|p| p.x).collect();
        let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(min < -30.0 && max > 30.0);
    }

    #[test]
    fn degenerate_shapes_stay_finite() {
        let circle = RoughGenerator::new(8).circle(5.0, 5.0, 0.0, &options(8));
        let line = RoughGenerator::new(8).line(5.0, 5.0, 5.0, 5.0, &options(8));
        for set in circle.sets.iter().chain(line.sets.iter()) {
            assert!(set.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn linear_path_joins_consecutive_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let drawable = RoughGenerator::new(9).linear_path(&points, &options(9));
        assert_eq!(drawable.shape, DrawableShape::LinearPath);
        assert_eq!(drawable.stroke_sets().count(), 4);
    }
}
