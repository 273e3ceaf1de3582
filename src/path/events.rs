// MIT/Apache2 License

//! Conversion between `lyon_path` event streams and `Path`s.

use super::Path;
use crate::geometry::{is_nearby, Primitive};
use lyon_path::PathEvent;

impl Path {
    /// Collect every primitive of a `lyon_path` event stream into one path.
    ///
    /// Closing events become straight lines back to the start of their sub-path. Sub-path boundaries are not
    /// preserved; use [`Path::subpaths_from_events`] to keep them apart.
    #[inline]
    pub fn from_events<I: IntoIterator<Item = PathEvent>>(events: I) -> Path {
        events.into_iter().filter_map(event_to_primitive).collect()
    }

    /// Split a `lyon_path` event stream into one path per sub-path.
    #[inline]
    pub fn subpaths_from_events<I: IntoIterator<Item = PathEvent>>(events: I) -> Vec<Path> {
        let mut subpaths = vec![];
        let mut current = Path::new();

        for event in events {
            match event {
                PathEvent::Begin { .. } => {
                    if !current.is_empty() {
                        subpaths.push(std::mem::take(&mut current));
                    }
                }
                PathEvent::End { .. } => {
                    current.extend(event_to_primitive(event));
                    subpaths.push(std::mem::take(&mut current));
                }
                event => current.extend(event_to_primitive(event)),
            }
        }

        if !current.is_empty() {
            subpaths.push(current);
        }

        subpaths.retain(|path| !path.is_empty());
        subpaths
    }

    /// Build a `lyon_path::Path` from this path, for handing over to a tessellator or rasterizer.
    ///
    /// A new sub-path is begun wherever a primitive does not start at the end of the previous one. Sub-paths
    /// that end where they started are closed.
    #[must_use]
    #[inline]
    pub fn to_lyon_path(&self) -> lyon_path::Path {
        let mut builder = lyon_path::Path::builder();
        let mut open: Option<(lyon_path::math::Point, lyon_path::math::Point)> = None;

        for primitive in self.iter() {
            let start = primitive.first_point();
            match open {
                Some((_, last)) if is_nearby(last, start) => {}
                Some((first, last)) => {
                    builder.end(is_nearby(first, last));
                    builder.begin(start);
                    open = Some((start, start));
                }
                None => {
                    builder.begin(start);
                    open = Some((start, start));
                }
            }

            match *primitive {
                Primitive::Line(l) => {
                    builder.line_to(l.to);
                }
                Primitive::Quadratic(q) => {
                    builder.quadratic_bezier_to(q.ctrl, q.to);
                }
                Primitive::Cubic(c) => {
                    builder.cubic_bezier_to(c.ctrl1, c.ctrl2, c.to);
                }
            }

            if let Some((first, _)) = open {
                open = Some((first, primitive.last_point()));
            }
        }

        if let Some((first, last)) = open {
            builder.end(is_nearby(first, last));
        }

        builder.build()
    }
}

#[inline]
fn event_to_primitive(event: PathEvent) -> Option<Primitive> {
    match event {
        PathEvent::Begin { .. } => None,
        PathEvent::Line { from, to } => Some(Primitive::line(from, to)),
        PathEvent::Quadratic { from, ctrl, to } => Some(Primitive::quadratic(from, ctrl, to)),
        PathEvent::Cubic {
            from,
            ctrl1,
            ctrl2,
            to,
        } => Some(Primitive::cubic(from, ctrl1, ctrl2, to)),
        PathEvent::End {
            last,
            first,
            close: true,
        } if !is_nearby(last, first) => Some(Primitive::line(last, first)),
        PathEvent::End { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    fn two_triangles() -> lyon_path::Path {
        let mut builder = lyon_path::Path::builder();
        builder.begin(point(0.0, 0.0));
        builder.line_to(point(10.0, 0.0));
        builder.line_to(point(10.0, 10.0));
        builder.end(true);
        builder.begin(point(20.0, 0.0));
        builder.quadratic_bezier_to(point(25.0, 5.0), point(30.0, 0.0));
        builder.end(false);
        builder.build()
    }

    #[test]
    fn events_become_primitives() {
        let path = Path::from_events(two_triangles().iter());
        assert_eq!(path.len(), 4);
        assert_eq!(path.primitives()[2], Primitive::line(point(10.0, 10.0), point(0.0, 0.0)));
        assert_eq!(
            path.primitives()[3],
            Primitive::quadratic(point(20.0, 0.0), point(25.0, 5.0), point(30.0, 0.0))
        );
    }

    #[test]
    fn subpaths_stay_apart() {
        let subpaths = Path::subpaths_from_events(two_triangles().iter());
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths[0].is_closed());
        assert_eq!(subpaths[1].len(), 1);
    }

    #[test]
    fn lyon_path_round_trip_keeps_subpaths() {
        let original = Path::subpaths_from_events(two_triangles().iter());
        let all = original[0].clone().concat(original[1].clone());
        let rebuilt = Path::subpaths_from_events(all.to_lyon_path().iter());
        assert_eq!(rebuilt, original);
    }
}
