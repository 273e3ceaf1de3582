// MIT/Apache2 License

use super::{push_line, round_join, Cap, Joint};
use crate::geometry::Primitive;

/// Build the cap closing the offset outline at the end of `primitive`.
///
/// The cap runs from the left offset of the primitive's last point (`p + n * offset`) to its right offset
/// (`p - n * offset`), so that the outline continues along the reversed primitive.
#[must_use]
#[inline]
pub fn cap(offset: f32, style: Cap, primitive: &Primitive) -> Joint {
    let (p, n) = primitive.last_point_and_normal();
    let tangent = primitive.last_unit_tangent();

    match style {
        Cap::Round => round_join(offset, p, n, -n, tangent),
        Cap::Straight(extension) => {
            let a = p + n * offset;
            let b = p - n * offset;
            let push = tangent * (offset * extension);

            let mut joint = Joint::new();
            push_line(&mut joint, a, a + push);
            push_line(&mut joint, a + push, b + push);
            push_line(&mut joint, b + push, b);
            joint
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{is_nearby, point};

    fn segment() -> Primitive {
        Primitive::line(point(0.0, 0.0), point(0.0, 10.0))
    }

    #[test]
    fn butt_cap_is_one_line() {
        let joint = cap(2.0, Cap::Straight(0.0), &segment());
        assert_eq!(joint.len(), 1);
        assert!(is_nearby(joint[0].first_point(), point(-2.0, 10.0)));
        assert!(is_nearby(joint[0].last_point(), point(2.0, 10.0)));
    }

    #[test]
    fn square_cap_is_pushed_out() {
        let joint = cap(2.0, Cap::Straight(1.0), &segment());
        assert_eq!(joint.len(), 3);
        assert!(is_nearby(joint[1].first_point(), point(-2.0, 12.0)));
        assert!(is_nearby(joint[1].last_point(), point(2.0, 12.0)));
        assert!(is_nearby(joint[2].last_point(), point(2.0, 10.0)));
    }

    #[test]
    fn round_cap_bulges_forward() {
        let joint = cap(2.0, Cap::Round, &segment());
        assert!(!joint.is_empty());
        assert!(is_nearby(joint[0].first_point(), point(-2.0, 10.0)));
        assert!(is_nearby(joint[joint.len() - 1].last_point(), point(2.0, 10.0)));
        assert!(joint.iter().all(|arc| arc.sample(0.5).y > 10.0));
    }
}
