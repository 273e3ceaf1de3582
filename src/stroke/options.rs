// MIT/Apache2 License

use super::{strokize, validate_stroke, Cap, Join};
use crate::{
    dash::{dashize, DashPattern},
    geometry::DEFAULT_TOLERANCE,
    path::Path,
    Error, Result,
};

/// Everything needed to stroke a path.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOptions {
    /// Width of the stroke.
    pub width: f32,
    /// Style used to connect consecutive primitives.
    pub join: Join,
    /// Style used for the start of an open path.
    pub start_cap: Cap,
    /// Style used for the end of an open path.
    pub end_cap: Cap,
    /// Alternating paint and gap lengths. Empty for a solid stroke.
    pub dash_pattern: Vec<f32>,
    /// Distance into the dash pattern at which the path starts.
    pub dash_offset: f32,
    /// Tolerance used when curves are flattened for dashing.
    pub tolerance: f32,
}

impl Default for StrokeOptions {
    #[inline]
    fn default() -> StrokeOptions {
        StrokeOptions {
            width: 1.0,
            join: Join::default(),
            start_cap: Cap::default(),
            end_cap: Cap::default(),
            dash_pattern: vec![],
            dash_offset: 0.0,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl StrokeOptions {
    /// Options for a solid stroke of the given width.
    #[must_use]
    #[inline]
    pub fn new(width: f32) -> StrokeOptions {
        StrokeOptions {
            width,
            ..Default::default()
        }
    }

    #[must_use]
    #[inline]
    pub fn with_join(mut self, join: Join) -> StrokeOptions {
        self.join = join;
        self
    }

    /// Use the same cap on both ends.
    #[must_use]
    #[inline]
    pub fn with_caps(mut self, cap: Cap) -> StrokeOptions {
        self.start_cap = cap;
        self.end_cap = cap;
        self
    }

    #[must_use]
    #[inline]
    pub fn with_start_cap(mut self, cap: Cap) -> StrokeOptions {
        self.start_cap = cap;
        self
    }

    #[must_use]
    #[inline]
    pub fn with_end_cap(mut self, cap: Cap) -> StrokeOptions {
        self.end_cap = cap;
        self
    }

    /// Dash the stroke with the given pattern, starting `offset` into it.
    #[must_use]
    #[inline]
    pub fn with_dashes<I: IntoIterator<Item = f32>>(mut self, offset: f32, pattern: I) -> StrokeOptions {
        self.dash_offset = offset;
        self.dash_pattern = pattern.into_iter().collect();
        self
    }

    #[must_use]
    #[inline]
    pub fn with_tolerance(mut self, tolerance: f32) -> StrokeOptions {
        self.tolerance = tolerance;
        self
    }

    /// Tell if these options dash the stroke.
    #[must_use]
    #[inline]
    pub fn is_dashed(&self) -> bool {
        !self.dash_pattern.is_empty()
    }

    /// Check the options, returning the first problem found.
    #[inline]
    pub fn validate(&self) -> Result {
        validate_stroke(self.width, self.join, (self.start_cap, self.end_cap))?;
        validate_tolerance(self.tolerance)?;

        if self.is_dashed() {
            DashPattern::new(self.dash_pattern.iter().copied())?;
            if !self.dash_offset.is_finite() {
                log::warn!("Rejecting dash offset {}", self.dash_offset);
                return Err(Error::InvalidDashPhase(self.dash_offset));
            }
        }

        Ok(())
    }

    /// Stroke a path with these options, producing one closed outline per painted run. A solid stroke produces
    /// at most one outline.
    #[inline]
    pub fn stroke(&self, path: &Path) -> Result<Vec<Path>> {
        self.validate()?;
        let caps = (self.start_cap, self.end_cap);

        let runs = if self.is_dashed() {
            let pattern = DashPattern::new(self.dash_pattern.iter().copied())?;
            dashize(self.dash_offset, &pattern, path, self.tolerance)?
        } else {
            vec![path.clone()]
        };

        let mut outlines = Vec::with_capacity(runs.len());
        for run in &runs {
            let outline = strokize(self.width, self.join, caps, run)?;
            if !outline.is_empty() {
                outlines.push(outline);
            }
        }

        Ok(outlines)
    }
}

/// Check that a flattening tolerance is positive and finite.
#[inline]
pub fn validate_tolerance(tolerance: f32) -> Result {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        log::warn!("Rejecting tolerance {}", tolerance);
        Err(Error::InvalidTolerance(tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn defaults() {
        let options = StrokeOptions::new(3.0);
        assert_eq!(options.width, 3.0);
        assert_eq!(options.join, Join::Miter(4.0));
        assert_eq!(options.start_cap, Cap::Straight(0.0));
        assert_eq!(options.end_cap, Cap::Straight(0.0));
        assert!(!options.is_dashed());
        assert_eq!(options.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn builder_sets_fields() {
        let options = StrokeOptions::new(2.0)
            .with_join(Join::Round)
            .with_caps(Cap::Round)
            .with_end_cap(Cap::Straight(1.0))
            .with_dashes(1.0, vec![4.0, 2.0])
            .with_tolerance(0.1);
        assert_eq!(options.join, Join::Round);
        assert_eq!(options.start_cap, Cap::Round);
        assert_eq!(options.end_cap, Cap::Straight(1.0));
        assert_eq!(options.dash_pattern, vec![4.0, 2.0]);
        assert_eq!(options.dash_offset, 1.0);
        assert_eq!(options.tolerance, 0.1);
    }

    #[test]
    fn validation_reports_first_problem() {
        assert_eq!(
            StrokeOptions::new(-1.0).with_tolerance(0.0).validate(),
            Err(Error::InvalidStrokeWidth(-1.0))
        );
        assert_eq!(
            StrokeOptions::new(1.0).with_tolerance(0.0).validate(),
            Err(Error::InvalidTolerance(0.0))
        );
        assert_eq!(
            StrokeOptions::new(1.0).with_dashes(0.0, vec![0.0, 0.0]).validate(),
            Err(Error::EmptyDashPattern)
        );
        assert_eq!(
            StrokeOptions::new(1.0).with_dashes(f32::INFINITY, vec![1.0]).validate(),
            Err(Error::InvalidDashPhase(f32::INFINITY))
        );
        assert_eq!(
            StrokeOptions::new(1e30).with_caps(Cap::Straight(1e10)).validate(),
            Err(Error::StrokeTooWide(1e30))
        );
    }

    #[test]
    fn solid_and_dashed_strokes() {
        let path = Path::polyline(vec![point(0.0, 0.0), point(10.0, 0.0)]);

        let solid = StrokeOptions::new(2.0).stroke(&path).unwrap();
        assert_eq!(solid.len(), 1);
        assert_eq!(solid[0].len(), 4);

        let dashed = StrokeOptions::new(2.0).with_dashes(0.0, vec![3.0, 2.0]).stroke(&path).unwrap();
        assert_eq!(dashed.len(), 2);
        assert!(dashed.iter().all(Path::is_closed));

        assert!(StrokeOptions::new(2.0).stroke(&Path::new()).unwrap().is_empty());
    }
}
