// MIT/Apache2 License

//! Turning a centerline path into the closed outline of its stroke.
//!
//! The outline is built by offsetting the path to its left by half of the stroke width, capping its end,
//! offsetting the reversed path (which is the right-hand edge, walked backwards) and capping its start. The two
//! halves meet end to end, so the result is a closed contour that can be filled with the nonzero rule.

use crate::{
    geometry::{is_nearby, Point, Primitive},
    path::Path,
    Error, Result,
};
use std::iter;
use tinyvec::TinyVec;

mod cap;
mod join;
mod options;

pub use cap::*;
pub use join::*;
pub use options::*;

/// The handful of primitives produced for a single join or cap.
pub type Joint = TinyVec<[Primitive; 4]>;

/// How two consecutive primitives of a stroke are connected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Join {
    /// Connect the outlines with a circular arc around the shared vertex.
    Round,
    /// Extend the outlines until they meet. If the miter would be longer than the given ratio of the stroke
    /// width, a bevel is drawn instead.
    Miter(f32),
}

/// How the ends of an open stroke are terminated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Cap {
    /// Terminate the stroke with a half circle.
    Round,
    /// Terminate the stroke with a straight edge, pushed outwards by the given ratio of half of the stroke
    /// width. `Straight(0.0)` is a butt cap, and `Straight(1.0)` a square cap.
    Straight(f32),
}

impl Default for Join {
    #[inline]
    fn default() -> Join {
        Join::Miter(4.0)
    }
}

impl Default for Cap {
    #[inline]
    fn default() -> Cap {
        Cap::Straight(0.0)
    }
}

impl Join {
    /// How far from its vertex this join may reach, in half stroke widths.
    #[inline]
    fn reach(self) -> f32 {
        match self {
            Join::Round => 1.0,
            Join::Miter(limit) => limit.max(1.0),
        }
    }

    /// Check that this join can be drawn.
    #[inline]
    pub fn validate(self) -> Result {
        match self {
            Join::Miter(limit) if !(limit.is_finite() && limit > 0.0) => {
                log::warn!("Rejecting miter limit {}", limit);
                Err(Error::InvalidMiterLimit(limit))
            }
            _ => Ok(()),
        }
    }
}

impl Cap {
    /// How far past the path's end this cap reaches, in half stroke widths.
    #[inline]
    fn reach(self) -> f32 {
        match self {
            Cap::Round => 1.0,
            Cap::Straight(extension) => extension.max(1.0),
        }
    }

    /// Check that this cap can be drawn.
    #[inline]
    pub fn validate(self) -> Result {
        match self {
            Cap::Straight(extension) if !(extension.is_finite() && extension >= 0.0) => {
                log::warn!("Rejecting cap extension {}", extension);
                Err(Error::InvalidCapExtension(extension))
            }
            _ => Ok(()),
        }
    }
}

/// Check that a stroke width is positive and finite.
#[inline]
pub fn validate_width(width: f32) -> Result {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        log::warn!("Rejecting stroke width {}", width);
        Err(Error::InvalidStrokeWidth(width))
    }
}

/// Check a whole stroke configuration: the width, the join and both caps.
///
/// Besides checking each value on its own, this rejects widths whose half, scaled by the miter limit or by
/// a cap extension, overflows. Such a stroke would push points out to infinity and leave its outline open.
#[inline]
pub fn validate_stroke(width: f32, join: Join, (cap_start, cap_end): (Cap, Cap)) -> Result {
    validate_width(width)?;
    join.validate()?;
    cap_start.validate()?;
    cap_end.validate()?;

    let offset = width / 2.0;
    let ratios = [join.reach(), cap_start.reach(), cap_end.reach()];
    if ratios.iter().all(|ratio| (offset * ratio).is_finite()) {
        Ok(())
    } else {
        log::warn!("Rejecting stroke width {} for {:?} with caps {:?}", width, join, (cap_start, cap_end));
        Err(Error::StrokeTooWide(width))
    }
}

/// Build the closed outline of `path` stroked with the given width, join and `(start, end)` caps.
///
/// Degenerate primitives are dropped before stroking. A path that is closed (its last point is nearby its
/// first) is joined back onto itself instead of being capped. An empty path strokes to an empty outline.
#[inline]
pub fn strokize(width: f32, join: Join, (cap_start, cap_end): (Cap, Cap), path: &Path) -> Result<Path> {
    validate_stroke(width, join, (cap_start, cap_end))?;

    let sanitized = path.sanitized();
    log::debug!(
        "Stroking {} primitives ({} after sanitizing) at width {}",
        path.len(),
        sanitized.len(),
        width
    );

    let offset = width / 2.0;
    let reversed = sanitized.reversed();

    Ok(offset_and_join(offset, join, cap_end, sanitized.primitives()).concat(offset_and_join(
        offset,
        join,
        cap_start,
        reversed.primitives(),
    )))
}

/// Offset one side of a series of primitives, joining them together and capping (or closing) the end.
fn offset_and_join(offset: f32, join: Join, cap_style: Cap, primitives: &[Primitive]) -> Path {
    let first = match primitives.first() {
        Some(first) => first,
        None => return Path::new(),
    };
    let first_point = first.first_point();

    let nexts = primitives.iter().skip(1).map(Some).chain(iter::once(None));
    primitives
        .iter()
        .zip(nexts)
        .fold(Path::new(), |mut outline, (current, next)| {
            outline.extend(current.offset(offset));
            let joint = match next {
                Some(next) => join_primitives(offset, join, current, next),
                None if is_nearby(first_point, current.last_point()) => {
                    join_primitives(offset, join, current, first)
                }
                None => cap(offset, cap_style, current),
            };
            outline.extend(joint);
            outline
        })
}

/// Add a line to a joint unless it is degenerate.
#[inline]
pub(crate) fn push_line(joint: &mut Joint, from: Point, to: Point) {
    if let Some(line) = Primitive::line(from, to).sanitize() {
        joint.push(line);
    }
}
