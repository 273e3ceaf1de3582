// MIT/Apache2 License

//! Approximate offset curves.
//!
//! The exact offset of a bezier curve is not a bezier curve, so curves are offset piecewise: a piece is shifted
//! by moving its control points along its end normals, and the piece is subdivided until the shifted copy is
//! close enough to the true offset at its midpoint.

use super::{
    unit_normal, unit_or, CubicBezierSegment, Point, Primitive, QuadraticBezierSegment, Vector,
    MAX_OFFSET_DEPTH, OFFSET_FLATNESS_DOT, OFFSET_TOLERANCE,
};

/// Offset a quadratic bezier curve by `distance` along its left-hand normal.
#[must_use]
#[inline]
pub fn offset_quadratic(distance: f32, curve: &QuadraticBezierSegment<f32>) -> Vec<Primitive> {
    let mut pieces = Vec::new();
    offset_piece(distance, Primitive::Quadratic(*curve), 0, &mut pieces);
    pieces
}

/// Offset a cubic bezier curve by `distance` along its left-hand normal.
#[must_use]
#[inline]
pub fn offset_cubic(distance: f32, curve: &CubicBezierSegment<f32>) -> Vec<Primitive> {
    let mut pieces = Vec::new();
    offset_piece(distance, Primitive::Cubic(*curve), 0, &mut pieces);
    pieces
}

fn offset_piece(distance: f32, piece: Primitive, depth: u32, out: &mut Vec<Primitive>) {
    let piece = match piece.sanitize() {
        Some(piece) => piece,
        None => return,
    };

    if piece.is_line() {
        out.extend(piece.offset(distance));
        return;
    }

    let (_, n0) = piece.first_point_and_normal();
    let (_, n1) = piece.last_point_and_normal();
    let shifted = shift(distance, &piece, n0, n1);

    let flat_enough = n0.dot(n1) >= OFFSET_FLATNESS_DOT;
    if flat_enough && midpoint_error(distance, &piece, &shifted) <= OFFSET_TOLERANCE {
        out.push(shifted);
        return;
    }

    if depth >= MAX_OFFSET_DEPTH {
        log::trace!("Offset subdivision limit reached for {:?}", piece);
        out.push(shifted);
        return;
    }

    let (first, second) = piece.break_at(0.5);
    offset_piece(distance, first, depth + 1, out);
    offset_piece(distance, second, depth + 1, out);
}

/// Move a curve piece's control points along its end normals.
fn shift(distance: f32, piece: &Primitive, n0: Vector, n1: Vector) -> Primitive {
    match *piece {
        Primitive::Line(_) => piece.translate(n0 * distance),
        Primitive::Cubic(c) => Primitive::cubic(
            c.from + n0 * distance,
            c.ctrl1 + n0 * distance,
            c.ctrl2 + n1 * distance,
            c.to + n1 * distance,
        ),
        Primitive::Quadratic(q) => {
            let from = q.from + n0 * distance;
            let to = q.to + n1 * distance;
            let ctrl = intersect(from, piece.start_tangent(), to, piece.end_tangent())
                .unwrap_or_else(|| q.ctrl + unit_or(n0 + n1, n0) * distance);
            Primitive::quadratic(from, ctrl, to)
        }
    }
}

/// Intersection of the line through `p0` along `d0` with the line through `p1` along `d1`.
fn intersect(p0: Point, d0: Vector, p1: Point, d1: Vector) -> Option<Point> {
    let denominator = d0.cross(d1);
    if denominator.abs() <= f32::EPSILON * d0.length() * d1.length() {
        return None;
    }

    let s = (p1 - p0).cross(d1) / denominator;
    let p = p0 + d0 * s;
    if p.x.is_finite() && p.y.is_finite() {
        Some(p)
    } else {
        None
    }
}

/// Distance between the shifted piece's midpoint and the true offset point at `t = 0.5`.
fn midpoint_error(distance: f32, piece: &Primitive, shifted: &Primitive) -> f32 {
    let expected = piece.sample(0.5) + unit_normal(tangent_at(piece, 0.5)) * distance;
    (shifted.sample(0.5) - expected).length()
}

fn tangent_at(piece: &Primitive, t: f32) -> Vector {
    let d = match piece {
        Primitive::Line(l) => l.to - l.from,
        Primitive::Quadratic(q) => q.derivative(t),
        Primitive::Cubic(c) => c.derivative(t),
    };

    unit_or(d, piece.last_point() - piece.first_point())
}
