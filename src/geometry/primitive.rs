// MIT/Apache2 License

use super::{
    is_finite, is_nearby, offset_cubic, offset_quadratic, point, unit_normal, unit_or_default, Box2D,
    CubicBezierSegment, LineSegment, Point, QuadraticBezierSegment, Vector,
};

/// A single segment of a path: a straight line, a quadratic bezier curve or a cubic bezier curve.
///
/// Primitives are values. Every transformation (clipping, splitting, offsetting, flattening) produces new
/// primitives rather than modifying the original.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Primitive {
    /// A straight line segment.
    Line(LineSegment<f32>),
    /// A quadratic bezier curve, with one control point.
    Quadratic(QuadraticBezierSegment<f32>),
    /// A cubic bezier curve, with two control points.
    Cubic(CubicBezierSegment<f32>),
}

impl Default for Primitive {
    #[inline]
    fn default() -> Primitive {
        Primitive::line(point(0.0, 0.0), point(0.0, 0.0))
    }
}

impl From<LineSegment<f32>> for Primitive {
    #[inline]
    fn from(line: LineSegment<f32>) -> Primitive {
        Primitive::Line(line)
    }
}

impl From<QuadraticBezierSegment<f32>> for Primitive {
    #[inline]
    fn from(curve: QuadraticBezierSegment<f32>) -> Primitive {
        Primitive::Quadratic(curve)
    }
}

impl From<CubicBezierSegment<f32>> for Primitive {
    #[inline]
    fn from(curve: CubicBezierSegment<f32>) -> Primitive {
        Primitive::Cubic(curve)
    }
}

impl Primitive {
    /// Create a straight line between two points.
    #[must_use]
    #[inline]
    pub fn line(from: Point, to: Point) -> Primitive {
        Primitive::Line(LineSegment { from, to })
    }

    /// Create a quadratic bezier curve.
    #[must_use]
    #[inline]
    pub fn quadratic(from: Point, ctrl: Point, to: Point) -> Primitive {
        Primitive::Quadratic(QuadraticBezierSegment { from, ctrl, to })
    }

    /// Create a cubic bezier curve.
    #[must_use]
    #[inline]
    pub fn cubic(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Primitive {
        Primitive::Cubic(CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        })
    }

    /// Is this a straight line?
    #[must_use]
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Primitive::Line(_))
    }

    /// The point this primitive starts at.
    #[must_use]
    #[inline]
    pub fn first_point(&self) -> Point {
        match self {
            Primitive::Line(l) => l.from,
            Primitive::Quadratic(q) => q.from,
            Primitive::Cubic(c) => c.from,
        }
    }

    /// The point this primitive ends at.
    #[must_use]
    #[inline]
    pub fn last_point(&self) -> Point {
        match self {
            Primitive::Line(l) => l.to,
            Primitive::Quadratic(q) => q.to,
            Primitive::Cubic(c) => c.to,
        }
    }

    /// The direction of travel at the start of the primitive.
    ///
    /// When the first control leg is degenerate, the next usable control point is used instead, so that curves
    /// with a coincident control point still have a meaningful direction.
    #[must_use]
    #[inline]
    pub fn start_tangent(&self) -> Vector {
        match self {
            Primitive::Line(l) => l.to - l.from,
            Primitive::Quadratic(q) => first_distinct(q.from, &[q.ctrl, q.to]) - q.from,
            Primitive::Cubic(c) => first_distinct(c.from, &[c.ctrl1, c.ctrl2, c.to]) - c.from,
        }
    }

    /// The direction of travel at the end of the primitive.
    #[must_use]
    #[inline]
    pub fn end_tangent(&self) -> Vector {
        match self {
            Primitive::Line(l) => l.to - l.from,
            Primitive::Quadratic(q) => q.to - first_distinct(q.to, &[q.ctrl, q.from]),
            Primitive::Cubic(c) => c.to - first_distinct(c.to, &[c.ctrl2, c.ctrl1, c.from]),
        }
    }

    /// The first point and the unit normal (to the left of the direction of travel) at that point.
    #[must_use]
    #[inline]
    pub fn first_point_and_normal(&self) -> (Point, Vector) {
        (self.first_point(), unit_normal(self.start_tangent()))
    }

    /// The last point and the unit normal (to the left of the direction of travel) at that point.
    #[must_use]
    #[inline]
    pub fn last_point_and_normal(&self) -> (Point, Vector) {
        (self.last_point(), unit_normal(self.end_tangent()))
    }

    /// The unit direction of travel at the end of the primitive.
    #[must_use]
    #[inline]
    pub fn last_unit_tangent(&self) -> Vector {
        unit_or_default(self.end_tangent())
    }

    /// The same geometry, travelled in the opposite direction.
    #[must_use]
    #[inline]
    pub fn reverse(&self) -> Primitive {
        match *self {
            Primitive::Line(l) => Primitive::line(l.to, l.from),
            Primitive::Quadratic(q) => Primitive::quadratic(q.to, q.ctrl, q.from),
            Primitive::Cubic(c) => Primitive::cubic(c.to, c.ctrl2, c.ctrl1, c.from),
        }
    }

    /// The same primitive moved by `v`.
    #[must_use]
    #[inline]
    pub fn translate(&self, v: Vector) -> Primitive {
        match *self {
            Primitive::Line(l) => Primitive::line(l.from + v, l.to + v),
            Primitive::Quadratic(q) => Primitive::quadratic(q.from + v, q.ctrl + v, q.to + v),
            Primitive::Cubic(c) => Primitive::cubic(c.from + v, c.ctrl1 + v, c.ctrl2 + v, c.to + v),
        }
    }

    /// Evaluate the primitive at parameter `t`.
    #[must_use]
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        match self {
            Primitive::Line(l) => l.sample(t),
            Primitive::Quadratic(q) => q.sample(t),
            Primitive::Cubic(c) => c.sample(t),
        }
    }

    /// The bounding box of the control points. Bezier curves always lie within this box.
    #[must_use]
    #[inline]
    pub fn bounding_box(&self) -> Box2D<f32> {
        let (min, max) = match self {
            Primitive::Line(l) => (l.from.min(l.to), l.from.max(l.to)),
            Primitive::Quadratic(q) => (q.from.min(q.ctrl).min(q.to), q.from.max(q.ctrl).max(q.to)),
            Primitive::Cubic(c) => (
                c.from.min(c.ctrl1).min(c.ctrl2).min(c.to),
                c.from.max(c.ctrl1).max(c.ctrl2).max(c.to),
            ),
        };
        Box2D::new(min, max)
    }

    /// Tell if every coordinate of this primitive is finite.
    #[must_use]
    #[inline]
    pub fn is_finite(&self) -> bool {
        match self {
            Primitive::Line(l) => is_finite(l.from) && is_finite(l.to),
            Primitive::Quadratic(q) => is_finite(q.from) && is_finite(q.ctrl) && is_finite(q.to),
            Primitive::Cubic(c) => {
                is_finite(c.from) && is_finite(c.ctrl1) && is_finite(c.ctrl2) && is_finite(c.to)
            }
        }
    }

    /// Split the primitive in two at parameter `t`, which is clamped into `[0, 1]`.
    #[must_use]
    #[inline]
    pub fn break_at(&self, t: f32) -> (Primitive, Primitive) {
        let t = t.max(0.0).min(1.0);
        match self {
            Primitive::Line(l) => {
                let (a, b) = l.split(t);
                (a.into(), b.into())
            }
            Primitive::Quadratic(q) => {
                let (a, b) = q.split(t);
                (a.into(), b.into())
            }
            Primitive::Cubic(c) => {
                let (a, b) = c.split(t);
                (a.into(), b.into())
            }
        }
    }

    /// Call `callback` with a series of connected line segments approximating this primitive within
    /// `tolerance`.
    #[inline]
    pub fn for_each_flattened<F: FnMut(LineSegment<f32>)>(&self, tolerance: f32, mut callback: F) {
        match self {
            Primitive::Line(l) => callback(*l),
            Primitive::Quadratic(q) => connect(q.from, q.flattened(tolerance), &mut callback),
            Primitive::Cubic(c) => connect(c.from, c.flattened(tolerance), &mut callback),
        }
    }

    /// Approximate this primitive with straight lines.
    #[must_use]
    #[inline]
    pub fn flatten(&self, tolerance: f32) -> Vec<LineSegment<f32>> {
        let mut lines = Vec::new();
        self.for_each_flattened(tolerance, |line| lines.push(line));
        lines
    }

    /// Approximate the arc length of this primitive. Lines are measured exactly; curves are measured along
    /// their flattening.
    #[must_use]
    #[inline]
    pub fn approximate_length(&self, tolerance: f32) -> f32 {
        match self {
            Primitive::Line(l) => l.length(),
            _ => {
                let mut length = 0.0;
                self.for_each_flattened(tolerance, |line| length += line.length());
                length
            }
        }
    }

    /// Remove degeneracy from this primitive.
    ///
    /// Returns `None` when every control point is nearby the others, or when a coordinate is not finite. A
    /// quadratic curve whose control point sits on one of its ends is turned into a straight line.
    #[must_use]
    #[inline]
    pub fn sanitize(&self) -> Option<Primitive> {
        if !self.is_finite() {
            return None;
        }

        match *self {
            Primitive::Line(l) if is_nearby(l.from, l.to) => None,
            Primitive::Quadratic(q) => {
                let near_start = is_nearby(q.from, q.ctrl);
                let near_end = is_nearby(q.ctrl, q.to);
                match (near_start, near_end) {
                    (true, true) => None,
                    (true, false) | (false, true) => Some(Primitive::line(q.from, q.to)),
                    (false, false) => Some(*self),
                }
            }
            Primitive::Cubic(c)
                if is_nearby(c.from, c.ctrl1) && is_nearby(c.ctrl1, c.ctrl2) && is_nearby(c.ctrl2, c.to) =>
            {
                None
            }
            _ => Some(*self),
        }
    }

    /// Offset this primitive by `distance` along its left-hand normal. Negative distances offset to the right.
    ///
    /// Lines offset exactly; curves are approximated by one or more curve pieces.
    #[must_use]
    #[inline]
    pub fn offset(&self, distance: f32) -> Vec<Primitive> {
        match self {
            Primitive::Line(l) => {
                let n = unit_normal(l.to - l.from);
                vec![self.translate(n * distance)]
            }
            Primitive::Quadratic(q) => offset_quadratic(distance, q),
            Primitive::Cubic(c) => offset_cubic(distance, c),
        }
    }
}

/// Join a series of points, starting at `from`, into connected lines.
#[inline]
fn connect<F: FnMut(LineSegment<f32>)>(from: Point, points: impl Iterator<Item = Point>, callback: &mut F) {
    points.fold(from, |from, to| {
        callback(LineSegment { from, to });
        to
    });
}

/// The first point in `candidates` that is not nearby `origin`, or the last candidate if they all are.
#[inline]
fn first_distinct(origin: Point, candidates: &[Point]) -> Point {
    candidates
        .iter()
        .copied()
        .find(|&p| !is_nearby(origin, p))
        .or_else(|| candidates.last().copied())
        .unwrap_or(origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vector;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reverse_swaps_ends() {
        let c = Primitive::cubic(point(0.0, 0.0), point(1.0, 2.0), point(3.0, 2.0), point(4.0, 0.0));
        let r = c.reverse();
        assert_eq!(r.first_point(), c.last_point());
        assert_eq!(r.last_point(), c.first_point());
        assert_eq!(r.reverse(), c);
    }

    #[test]
    fn degenerate_control_leg_keeps_a_direction() {
        let c = Primitive::cubic(point(0.0, 0.0), point(0.0, 0.0), point(0.0, 5.0), point(5.0, 5.0));
        let t = c.start_tangent();
        assert_abs_diff_eq!(t.x, 0.0);
        assert!(t.y > 0.0);
        let (_, n) = c.first_point_and_normal();
        assert_abs_diff_eq!(n.x, -1.0);
    }

    #[test]
    fn sanitize_drops_points() {
        assert_eq!(Primitive::line(point(1.0, 1.0), point(1.0, 1.0)).sanitize(), None);
        let q = Primitive::quadratic(point(0.0, 0.0), point(0.0, 0.0), point(4.0, 0.0));
        assert_eq!(q.sanitize(), Some(Primitive::line(point(0.0, 0.0), point(4.0, 0.0))));
        let nan = Primitive::line(point(f32::NAN, 0.0), point(1.0, 0.0));
        assert_eq!(nan.sanitize(), None);
    }

    #[test]
    fn break_line_at_parameter() {
        let (a, b) = Primitive::line(point(0.0, 0.0), point(10.0, 0.0)).break_at(0.3);
        assert_abs_diff_eq!(a.last_point().x, 3.0, epsilon = 1e-5);
        assert_eq!(a.last_point(), b.first_point());
    }

    #[test]
    fn flattened_curve_is_connected() {
        let q = Primitive::quadratic(point(0.0, 0.0), point(5.0, 10.0), point(10.0, 0.0));
        let lines = q.flatten(0.1);
        assert!(lines.len() > 1);
        assert_eq!(lines[0].from, q.first_point());
        for pair in lines.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_abs_diff_eq!(lines[lines.len() - 1].to.x, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn line_length_is_exact() {
        let l = Primitive::line(point(0.0, 0.0), point(3.0, 4.0));
        assert_abs_diff_eq!(l.approximate_length(1.0), 5.0);
    }

    #[test]
    fn line_offsets_to_the_left() {
        let l = Primitive::line(point(0.0, 0.0), point(10.0, 0.0));
        let off = l.offset(2.0);
        assert_eq!(off, vec![l.translate(vector(0.0, 2.0))]);
    }
}
