// MIT/Apache2 License

use super::{push_line, Join, Joint};
use crate::geometry::{
    unit_or, Point, Primitive, Vector, MAX_JOIN_DEPTH, ROUND_JOIN_DOT_THRESHOLD,
};

/// Build the primitives connecting the offset of `prev` to the offset of `next`, on the side given by the sign
/// of `offset`.
#[must_use]
#[inline]
pub fn join_primitives(offset: f32, join: Join, prev: &Primitive, next: &Primitive) -> Joint {
    let (p, u) = prev.last_point_and_normal();
    let (_, v) = next.first_point_and_normal();
    let fallback = prev.last_unit_tangent();

    match join {
        Join::Round => round_join(offset, p, u, v, fallback),
        Join::Miter(limit) => miter_join(offset, limit, p, u, v, fallback),
    }
}

/// Connect `p + u * offset` to `p + v * offset` with circular arcs around `p`.
///
/// `u` and `v` are unit vectors. Wide angles are bisected until every piece spans a small enough angle to be
/// drawn as one cubic arc. When `u` and `v` point in opposite directions, the arc goes around through
/// `fallback`.
#[must_use]
#[inline]
pub fn round_join(offset: f32, p: Point, u: Vector, v: Vector, fallback: Vector) -> Joint {
    let mut joint = Joint::new();
    round_join_into(offset, p, u, v, fallback, 0, &mut joint);
    joint
}

fn round_join_into(
    offset: f32,
    p: Point,
    u: Vector,
    v: Vector,
    fallback: Vector,
    depth: u32,
    joint: &mut Joint,
) {
    if u.dot(v) >= ROUND_JOIN_DOT_THRESHOLD {
        push_arc(offset, p, u, v, joint);
        return;
    }

    if depth >= MAX_JOIN_DEPTH {
        log::trace!("Round join bisection limit reached at {:?}", p);
        push_arc(offset, p, u, v, joint);
        return;
    }

    let w = unit_or(u + v, fallback);
    round_join_into(offset, p, u, w, fallback, depth + 1, joint);
    round_join_into(offset, p, w, v, fallback, depth + 1, joint);
}

/// A single cubic approximation of the circular arc from `p + u * offset` to `p + v * offset`.
fn push_arc(offset: f32, p: Point, u: Vector, v: Vector, joint: &mut Joint) {
    let from = p + u * offset;
    let to = p + v * offset;

    let angle = u.dot(v).max(-1.0).min(1.0).acos();
    let handle = 4.0 / 3.0 * (angle / 4.0).tan() * offset;
    let sign = if u.cross(v) < 0.0 { -1.0 } else { 1.0 };
    let tangent_u = Vector::new(-u.y, u.x) * sign;
    let tangent_v = Vector::new(-v.y, v.x) * sign;

    if let Some(arc) = Primitive::cubic(from, from + tangent_u * handle, to - tangent_v * handle, to).sanitize() {
        joint.push(arc);
    }
}

/// Connect `p + u * offset` to `p + v * offset` by extending both edges until they meet.
///
/// If the miter point would lie further than `limit` half-widths from `p`, or the edges turn back onto
/// themselves, the two ends are connected by a single bevel line instead.
#[must_use]
#[inline]
pub fn miter_join(offset: f32, limit: f32, p: Point, u: Vector, v: Vector, fallback: Vector) -> Joint {
    let a = p + u * offset;
    let c = p + v * offset;
    let w = unit_or(u + v, fallback);
    let u_dot_w = u.dot(w);

    let mut joint = Joint::new();
    if u_dot_w > 0.0 && 1.0 / u_dot_w <= limit {
        let m = p + w * (offset / u_dot_w);
        push_line(&mut joint, a, m);
        push_line(&mut joint, m, c);
    } else {
        push_line(&mut joint, a, c);
    }

    joint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{is_nearby, point, vector},
        init_test_logging,
    };
    use approx::assert_abs_diff_eq;

    #[test]
    fn right_angle_miter() {
        let joint = miter_join(1.0, 4.0, point(10.0, 0.0), vector(0.0, -1.0), vector(1.0, 0.0), vector(1.0, 0.0));
        assert_eq!(joint.len(), 2);
        assert!(is_nearby(joint[0].first_point(), point(10.0, -1.0)));
        assert!(is_nearby(joint[0].last_point(), point(11.0, -1.0)));
        assert!(is_nearby(joint[1].last_point(), point(11.0, 0.0)));
    }

    #[test]
    fn miter_limit_falls_back_to_bevel() {
        // a near-reversal of direction
        let u = vector(0.0, 1.0);
        let v = unit_or(vector(0.05, -1.0), u);
        let joint = miter_join(1.0, 1.0, point(0.0, 0.0), u, v, vector(1.0, 0.0));
        assert_eq!(joint.len(), 1);
        assert!(is_nearby(joint[0].first_point(), point(0.0, 1.0)));
        assert!(is_nearby(joint[0].last_point(), point(v.x, v.y)));
    }

    #[test]
    fn straight_continuation_needs_no_join() {
        let n = vector(0.0, 1.0);
        assert!(miter_join(2.0, 4.0, point(3.0, 3.0), n, n, vector(1.0, 0.0)).is_empty());
        assert!(round_join(2.0, point(3.0, 3.0), n, n, vector(1.0, 0.0)).is_empty());
    }

    #[test]
    fn round_join_follows_the_circle() {
        let center = point(5.0, 5.0);
        let joint = round_join(3.0, center, vector(1.0, 0.0), vector(-1.0, 0.0), vector(0.0, 1.0));
        assert!(joint.len() > 1);
        assert!(is_nearby(joint[0].first_point(), point(8.0, 5.0)));
        assert!(is_nearby(joint[joint.len() - 1].last_point(), point(2.0, 5.0)));

        for arc in joint.iter() {
            for &t in &[0.0, 0.25, 0.5, 0.75, 1.0] {
                assert_abs_diff_eq!((arc.sample(t) - center).length(), 3.0, epsilon = 1e-3);
            }
            // goes around through the fallback side
            assert!(arc.sample(0.5).y >= 5.0);
        }
        for pair in joint.windows(2) {
            assert!(is_nearby(pair[0].last_point(), pair[1].first_point()));
        }
    }

    #[test]
    fn round_join_turns_the_short_way() {
        let center = point(0.0, 0.0);
        let joint = round_join(1.0, center, vector(0.0, 1.0), vector(1.0, 0.0), vector(1.0, 0.0));
        for arc in joint.iter() {
            let mid = arc.sample(0.5);
            assert!(mid.x >= -1e-4 && mid.y >= -1e-4);
        }
    }

    #[test]
    fn round_join_without_usable_fallback_stops_bisecting() {
        init_test_logging();

        // opposite normals and a zero fallback leave every bisection stuck on the same half
        let center = point(5.0, 5.0);
        let joint = round_join(2.0, center, vector(1.0, 0.0), vector(-1.0, 0.0), vector(0.0, 0.0));

        assert!(joint.len() <= 1 << MAX_JOIN_DEPTH);
        assert!(joint.iter().all(Primitive::is_finite));
        assert!(is_nearby(joint[0].first_point(), point(7.0, 5.0)));
        assert!(is_nearby(joint[joint.len() - 1].last_point(), point(3.0, 5.0)));
        for pair in joint.windows(2) {
            assert!(is_nearby(pair[0].last_point(), pair[1].first_point()));
        }
    }

    #[test]
    fn join_between_lines() {
        let prev = Primitive::line(point(0.0, 0.0), point(10.0, 0.0));
        let next = Primitive::line(point(10.0, 0.0), point(10.0, 10.0));
        let joint = join_primitives(1.0, Join::Miter(4.0), &prev, &next);
        assert_eq!(joint.len(), 2);
        assert!(is_nearby(joint[0].first_point(), point(10.0, 1.0)));
        assert!(is_nearby(joint[1].last_point(), point(9.0, 0.0)));
    }
}
