//! Joint geometry
//!
//! Pure 2D helpers called for every analyzed frame. All functions take
//! points by value and never allocate.

use serde::{Deserialize, Serialize};

/// Angle reported when a ray has zero length (treated as fully extended)
pub const DEGENERATE_ANGLE: f64 = 180.0;

/// Ray length below which an angle cannot be measured
const MIN_RAY_LENGTH: f64 = 1e-9;

/// Point in normalized image space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Angle at vertex `b` between rays b->a and b->c, in degrees (0-180).
///
/// Uses cos(θ) = (v1 · v2) / (|v1| × |v2|) with the cosine clamped to
/// [-1, 1]. A zero-length ray yields [`DEGENERATE_ANGLE`].
pub fn angle_deg(a: Point, b: Point, c: Point) -> f64 {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let mag1 = v1.0.hypot(v1.1);
    let mag2 = v2.0.hypot(v2.1);

    if !(mag1 > MIN_RAY_LENGTH && mag2 > MIN_RAY_LENGTH) {
        return DEGENERATE_ANGLE;
    }

    let cos_angle = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Midpoint of two points
pub fn mid(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Euclidean distance
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Angle of the segment from->to measured from the vertical axis (0-180).
///
/// 0 means `to` is straight below `from`, 90 is level, 180 straight above.
pub fn tilt_from_vertical(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    dx.atan2(dy).to_degrees().abs()
}

/// Angle of the segment a-b from the horizontal axis (0-90), direction-agnostic
pub fn tilt_from_horizontal(a: Point, b: Point) -> f64 {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    if dx < MIN_RAY_LENGTH && dy < MIN_RAY_LENGTH {
        return 0.0;
    }
    dy.atan2(dx).to_degrees()
}
