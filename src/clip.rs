// MIT/Apache2 License

//! Clipping primitives against an axis-aligned rectangle.
//!
//! Geometry that lies outside of the rectangle is not discarded but flattened onto its edges, so that a clipped
//! closed contour is still closed and still winds around the same area inside of the rectangle.

use crate::{
    geometry::{clamp_point, is_nearby, Box2D, Point, Primitive, CLIP_SNAP_TOLERANCE, MAX_CLIP_DEPTH},
    path::Path,
};

/// Where a primitive's bounding box lies relative to the clip rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Placement {
    Inside,
    Outside,
    Straddling,
}

/// Clip a single primitive against the rectangle spanned by `min` and `max`.
///
/// The result contains only primitives lying within the rectangle. Parts that were outside of it are replaced
/// by straight lines along its border.
#[must_use]
#[inline]
pub fn clip(min: Point, max: Point, primitive: Primitive) -> Vec<Primitive> {
    let mut out = Vec::new();
    clip_into(min, max, primitive, 0, &mut out);
    out
}

/// Clip every primitive of a path against the rectangle spanned by `min` and `max`.
#[must_use]
#[inline]
pub fn clip_path(min: Point, max: Point, path: &Path) -> Path {
    let mut out = Vec::new();
    for primitive in path {
        clip_into(min, max, *primitive, 0, &mut out);
    }
    Path::from(out)
}

/// Clip a single primitive against a `Box2D`.
#[must_use]
#[inline]
pub fn clip_to_box(rect: Box2D<f32>, primitive: Primitive) -> Vec<Primitive> {
    clip(rect.min, rect.max, primitive)
}

fn clip_into(min: Point, max: Point, primitive: Primitive, depth: u32, out: &mut Vec<Primitive>) {
    let bounds = primitive.bounding_box();
    let x = placement(bounds.min.x, bounds.max.x, min.x, max.x);
    let y = placement(bounds.min.y, bounds.max.y, min.y, max.y);

    match (x, y) {
        (Placement::Inside, Placement::Inside) => push_coalesced(out, primitive),
        (Placement::Outside, _) | (_, Placement::Outside) => push_clamped(min, max, primitive, out),
        _ if depth >= MAX_CLIP_DEPTH => {
            log::trace!("Clip recursion limit reached for {:?}", primitive);
            push_clamped(min, max, primitive, out);
        }
        _ => {
            let (first, second) = split_snapped(min, max, &primitive);
            clip_into(min, max, first, depth + 1, out);
            clip_into(min, max, second, depth + 1, out);
        }
    }
}

#[inline]
fn placement(low: f32, high: f32, min: f32, max: f32) -> Placement {
    if min <= low && high <= max {
        Placement::Inside
    } else if low >= max || high <= min {
        Placement::Outside
    } else {
        Placement::Straddling
    }
}

/// Collapse a primitive onto the border of the rectangle.
#[inline]
fn push_clamped(min: Point, max: Point, primitive: Primitive, out: &mut Vec<Primitive>) {
    let from = clamp_point(min, max, primitive.first_point());
    let to = clamp_point(min, max, primitive.last_point());
    push_coalesced(out, Primitive::line(from, to));
}

/// Split a primitive at its middle. The split point is snapped onto the nearest edge of the rectangle when it
/// lies within `CLIP_SNAP_TOLERANCE` of it, so that no sliver is left along the border.
fn split_snapped(min: Point, max: Point, primitive: &Primitive) -> (Primitive, Primitive) {
    let (first, second) = primitive.break_at(0.5);
    let mid = first.last_point();

    let snap = |value: f32, low: f32, high: f32| {
        let edge = if (value - low).abs() < (value - high).abs() {
            low
        } else {
            high
        };

        if (value - edge).abs() < CLIP_SNAP_TOLERANCE {
            edge
        } else {
            value
        }
    };

    let snapped = Point::new(snap(mid.x, min.x, max.x), snap(mid.y, min.y, max.y));
    if snapped == mid {
        (first, second)
    } else {
        (with_last_point(first, snapped), with_first_point(second, snapped))
    }
}

#[inline]
fn with_first_point(primitive: Primitive, p: Point) -> Primitive {
    match primitive {
        Primitive::Line(l) => Primitive::line(p, l.to),
        Primitive::Quadratic(q) => Primitive::quadratic(p, q.ctrl, q.to),
        Primitive::Cubic(c) => Primitive::cubic(p, c.ctrl1, c.ctrl2, c.to),
    }
}

#[inline]
fn with_last_point(primitive: Primitive, p: Point) -> Primitive {
    match primitive {
        Primitive::Line(l) => Primitive::line(l.from, p),
        Primitive::Quadratic(q) => Primitive::quadratic(q.from, q.ctrl, p),
        Primitive::Cubic(c) => Primitive::cubic(c.from, c.ctrl1, c.ctrl2, p),
    }
}

/// Add a primitive to the output, dropping degenerate ones and merging a line into the previous one when it
/// continues it in the same direction.
fn push_coalesced(out: &mut Vec<Primitive>, primitive: Primitive) {
    let primitive = match primitive.sanitize() {
        Some(primitive) => primitive,
        None => return,
    };

    if let (Some(Primitive::Line(previous)), Primitive::Line(next)) = (out.last_mut(), primitive) {
        let a = previous.to - previous.from;
        let b = next.to - next.from;
        let collinear = a.cross(b).abs() <= 1e-4 * a.length() * b.length();
        if collinear && a.dot(b) > 0.0 && is_nearby(previous.to, next.from) {
            previous.to = next.to;
            return;
        }
    }

    out.push(primitive);
}
