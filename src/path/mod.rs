// MIT/Apache2 License

use crate::geometry::{is_nearby, Point, Primitive};
use std::{iter::FromIterator, slice::Iter as SliceIter, vec::IntoIter as VecIter};

mod events;

/// A path. This is an ordered series of primitives, each usually starting where the previous one ended, which
/// together form a single open or closed contour.
///
/// Contiguity is a convention and is not enforced. An empty path is the identity for concatenation.
#[derive(Debug, Clone, Default, PartialEq)]
#[repr(transparent)]
pub struct Path {
    primitives: Vec<Primitive>,
}

impl Path {
    /// Create a new, empty path.
    #[must_use]
    #[inline]
    pub fn new() -> Path {
        Path { primitives: vec![] }
    }

    /// Create a path from a collection of primitives.
    #[inline]
    pub fn from_primitives<I: IntoIterator<Item = Primitive>>(i: I) -> Path {
        i.into_iter().collect()
    }

    /// Create a path based upon a series of points forming a polyline.
    #[inline]
    pub fn polyline<I: IntoIterator<Item = Point>>(points: I) -> Path {
        points
            .into_iter()
            .scan(None, |last_point, current_point| {
                Some(
                    last_point
                        .replace(current_point)
                        .map(|last_point| Primitive::line(last_point, current_point)),
                )
            })
            .flatten()
            .collect()
    }

    /// Create a closed polygon through a series of points. A closing line is added if the last point does not
    /// already meet the first.
    #[inline]
    pub fn polygon<I: IntoIterator<Item = Point>>(points: I) -> Path {
        let mut path = Path::polyline(points);
        path.close();
        path
    }

    /// Closes this path with an additional straight line, if it is not closed already.
    #[inline]
    pub fn close(&mut self) {
        if let (Some(first), Some(last)) = (self.first_point(), self.last_point()) {
            if !is_nearby(first, last) {
                self.primitives.push(Primitive::line(last, first));
            }
        }
    }

    /// The primitives making up this path.
    #[must_use]
    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Iterate over the primitives making up this path.
    #[inline]
    pub fn iter(&self) -> SliceIter<'_, Primitive> {
        self.primitives.iter()
    }

    /// The number of primitives in this path.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Tell if this path has no primitives.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Add a primitive to the end of this path.
    #[inline]
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Move every primitive of `other` onto the end of this path.
    #[inline]
    pub fn append(&mut self, other: Path) {
        self.primitives.extend(other.primitives);
    }

    /// Concatenate two paths.
    #[must_use]
    #[inline]
    pub fn concat(mut self, other: Path) -> Path {
        self.append(other);
        self
    }

    /// The point the path starts at.
    #[must_use]
    #[inline]
    pub fn first_point(&self) -> Option<Point> {
        self.primitives.first().map(Primitive::first_point)
    }

    /// The point the path ends at.
    #[must_use]
    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.primitives.last().map(Primitive::last_point)
    }

    /// A path is closed if it ends where it starts.
    #[must_use]
    #[inline]
    pub fn is_closed(&self) -> bool {
        match (self.first_point(), self.last_point()) {
            (Some(first), Some(last)) => is_nearby(first, last),
            _ => false,
        }
    }

    /// The same contour, travelled in the opposite direction.
    #[must_use]
    #[inline]
    pub fn reversed(&self) -> Path {
        self.primitives.iter().rev().map(Primitive::reverse).collect()
    }

    /// The same path, without degenerate or non-finite primitives.
    #[must_use]
    #[inline]
    pub fn sanitized(&self) -> Path {
        self.primitives.iter().filter_map(Primitive::sanitize).collect()
    }

    /// The approximate length of the path, measured along flattened curves.
    #[must_use]
    #[inline]
    pub fn length(&self, tolerance: f32) -> f32 {
        self.primitives
            .iter()
            .map(|p| p.approximate_length(tolerance))
            .sum()
    }
}

impl From<Vec<Primitive>> for Path {
    #[inline]
    fn from(primitives: Vec<Primitive>) -> Path {
        Path { primitives }
    }
}

impl IntoIterator for Path {
    type Item = Primitive;
    type IntoIter = VecIter<Primitive>;

    #[inline]
    fn into_iter(self) -> VecIter<Primitive> {
        self.primitives.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Primitive;
    type IntoIter = SliceIter<'a, Primitive>;

    #[inline]
    fn into_iter(self) -> SliceIter<'a, Primitive> {
        self.primitives.iter()
    }
}

impl FromIterator<Primitive> for Path {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Path {
        Path {
            primitives: iter.into_iter().collect(),
        }
    }
}

impl Extend<Primitive> for Path {
    #[inline]
    fn extend<I: IntoIterator<Item = Primitive>>(&mut self, iter: I) {
        self.primitives.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use approx::assert_abs_diff_eq;

    #[test]
    fn polyline_connects_points() {
        let path = Path::polyline(vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]);
        assert_eq!(
            path.primitives(),
            &[
                Primitive::line(point(0.0, 0.0), point(1.0, 0.0)),
                Primitive::line(point(1.0, 0.0), point(1.0, 1.0)),
            ]
        );
        assert!(!path.is_closed());
    }

    #[test]
    fn polygon_is_closed() {
        let path = Path::polygon(vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 3.0)]);
        assert_eq!(path.len(), 3);
        assert!(path.is_closed());
        assert_abs_diff_eq!(path.length(0.1), 12.0);
    }

    #[test]
    fn reversed_runs_backwards() {
        let path = Path::polyline(vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)]);
        let rev = path.reversed();
        assert_eq!(rev.first_point(), Some(point(1.0, 1.0)));
        assert_eq!(rev.last_point(), Some(point(0.0, 0.0)));
        assert_eq!(rev.reversed(), path);
    }

    #[test]
    fn empty_path_is_identity() {
        let path = Path::polyline(vec![point(0.0, 0.0), point(1.0, 0.0)]);
        assert_eq!(Path::new().concat(path.clone()), path);
        assert_eq!(path.clone().concat(Path::new()), path);
        assert!(!Path::new().is_closed());
    }
}
