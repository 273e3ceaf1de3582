// MIT/Apache2 License

//! Shared geometric vocabulary: points, vectors, the tolerances that every other module agrees upon, and the
//! `Primitive` sum type that paths are made of.

mod offset;
mod primitive;

pub use offset::*;
pub use primitive::*;

use approx::abs_diff_eq;

pub use lyon_geom::{point, vector, Box2D, CubicBezierSegment, LineSegment, QuadraticBezierSegment};

/// A point in two-dimensional space.
pub type Point = lyon_geom::Point<f32>;
/// A displacement in two-dimensional space.
pub type Vector = lyon_geom::Vector<f32>;

/// Two points closer than this on both axes are considered the same point.
pub const NEARBY_TOLERANCE: f32 = 1e-3;

/// When a clipping split point lands within this distance of a clip edge, it is snapped onto the edge.
pub const CLIP_SNAP_TOLERANCE: f32 = 0.1;

/// A round join is drawn as a single arc once the dot product of its two unit normals reaches this value
/// (an angle of roughly 26 degrees).
pub const ROUND_JOIN_DOT_THRESHOLD: f32 = 0.9;

/// An offset curve piece is accepted once the dot product of its end normals reaches this value.
pub const OFFSET_FLATNESS_DOT: f32 = 0.97;

/// Maximum distance allowed between an offset curve piece and the true offset curve at the piece's midpoint.
pub const OFFSET_TOLERANCE: f32 = 0.05;

/// Flattening tolerance used when no other is configured.
pub const DEFAULT_TOLERANCE: f32 = 0.25;

/// Recursion limit for rectangle clipping.
pub const MAX_CLIP_DEPTH: u32 = 32;

/// Recursion limit for round join angle bisection.
pub const MAX_JOIN_DEPTH: u32 = 8;

/// Recursion limit for curve offset subdivision.
pub const MAX_OFFSET_DEPTH: u32 = 10;

/// Tell if two points are the same within `NEARBY_TOLERANCE`.
#[must_use]
#[inline]
pub fn is_nearby(a: Point, b: Point) -> bool {
    abs_diff_eq!(a.x, b.x, epsilon = NEARBY_TOLERANCE) && abs_diff_eq!(a.y, b.y, epsilon = NEARBY_TOLERANCE)
}

/// Tell if both coordinates of a point are finite.
#[must_use]
#[inline]
pub fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// The left-hand unit normal of a direction, `(-d.y, d.x)` normalized.
///
/// A zero (or non-finite) direction falls back to the normal of the `+x` axis instead of producing `NaN`.
#[must_use]
#[inline]
pub fn unit_normal(direction: Vector) -> Vector {
    let d = unit_or_default(direction);
    vector(-d.y, d.x)
}

/// Normalize a vector, falling back to `+x` if it has no usable length.
#[must_use]
#[inline]
pub fn unit_or_default(v: Vector) -> Vector {
    unit_or(v, vector(1.0, 0.0))
}

/// Normalize a vector, falling back to `fallback` if it has no usable length.
#[must_use]
#[inline]
pub fn unit_or(v: Vector, fallback: Vector) -> Vector {
    let len = v.length();
    if len.is_finite() && len > f32::EPSILON {
        v / len
    } else {
        fallback
    }
}

/// Clamp a point, component-wise, into the rectangle spanned by `min` and `max`.
#[must_use]
#[inline]
pub fn clamp_point(min: Point, max: Point, p: Point) -> Point {
    point(p.x.max(min.x).min(max.x), p.y.max(min.y).min(max.y))
}
