// MIT/Apache2 License

//! Splitting a path into the painted runs of a dash pattern.

use crate::{
    geometry::{LineSegment, Primitive, DEFAULT_TOLERANCE},
    path::Path,
    stroke::{strokize, validate_stroke, validate_tolerance, Cap, Join},
    Error, Result,
};
use std::mem;

/// Lengths closer than this are considered equal when consuming dash entries.
const DASH_EPSILON: f32 = 1e-4;

/// A validated dash pattern: alternating paint and gap lengths, starting with paint.
#[derive(Debug, Clone, PartialEq)]
pub struct DashPattern {
    entries: Vec<f32>,
    total: f32,
}

impl DashPattern {
    /// Create a dash pattern. Every entry must be finite and non-negative, and at least one must be positive.
    #[inline]
    pub fn new<I: IntoIterator<Item = f32>>(entries: I) -> Result<DashPattern> {
        let entries: Vec<f32> = entries.into_iter().collect();

        if let Some(&bad) = entries.iter().find(|e| !(e.is_finite() && **e >= 0.0)) {
            log::warn!("Rejecting dash entry {}", bad);
            return Err(Error::InvalidDashEntry(bad));
        }

        let total: f32 = entries.iter().sum();
        if total <= 0.0 {
            log::warn!("Rejecting dash pattern {:?} with no length", entries);
            return Err(Error::EmptyDashPattern);
        }

        Ok(DashPattern { entries, total })
    }

    /// The paint and gap lengths, in order.
    #[must_use]
    #[inline]
    pub fn entries(&self) -> &[f32] {
        &self.entries
    }

    /// The sum of every entry.
    #[must_use]
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.total
    }

    /// The distance after which the pattern repeats with the same paint/gap parity. A pattern with an odd
    /// number of entries swaps paint and gap on every pass, so it takes two passes to repeat.
    #[must_use]
    #[inline]
    pub fn period(&self) -> f32 {
        if self.entries.len() % 2 == 0 {
            self.total
        } else {
            self.total * 2.0
        }
    }

    /// Bring a phase into `[0, period)`. Negative phases are moved forwards by whole pattern lengths first.
    #[must_use]
    #[inline]
    pub fn normalize_phase(&self, phase: f32) -> f32 {
        let mut phase = phase;
        if phase < 0.0 {
            phase += (-phase / self.total).ceil() * self.total;
            if phase < 0.0 {
                phase += self.total;
            }
        }

        let phase = phase % self.period();
        if phase.is_finite() {
            phase
        } else {
            0.0
        }
    }

    /// The infinite sequence of `(length, is_paint)` entries, starting `phase` into the pattern.
    #[must_use]
    #[inline]
    pub fn cycle(&self, phase: f32) -> DashCycle<'_> {
        let mut cycle = DashCycle {
            entries: &self.entries,
            index: 0,
            head: None,
        };

        let mut phase = self.normalize_phase(phase);
        // the phase is below the period, so two passes always consume it
        for _ in 0..self.entries.len() * 2 {
            let length = self.entries[cycle.index % self.entries.len()];
            if phase < length {
                if phase > 0.0 {
                    cycle.head = Some(length - phase);
                }
                break;
            }
            phase -= length;
            cycle.index += 1;
        }

        cycle
    }
}

/// Iterator over the repeating entries of a dash pattern, as `(length, is_paint)`.
///
/// Zero-length entries are skipped. Paint and gap are decided by an entry's position in the endless sequence,
/// so a pattern with an odd number of entries alternates which of them are painted on every pass.
#[derive(Debug, Clone)]
pub struct DashCycle<'a> {
    entries: &'a [f32],
    index: usize,
    head: Option<f32>,
}

impl<'a> Iterator for DashCycle<'a> {
    type Item = (f32, bool);

    #[inline]
    fn next(&mut self) -> Option<(f32, bool)> {
        for _ in 0..=self.entries.len() {
            let index = self.index;
            let length = match self.head.take() {
                Some(head) => head,
                None => *self.entries.get(index % self.entries.len().max(1))?,
            };
            self.index += 1;

            if length > 0.0 {
                return Some((length, index % 2 == 0));
            }
        }

        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Walks a stream of lines, handing them out to paint runs.
struct Splitter<'a> {
    dashes: DashCycle<'a>,
    remaining: f32,
    painting: bool,
    current: Path,
    runs: Vec<Path>,
}

impl<'a> Splitter<'a> {
    fn new(mut dashes: DashCycle<'a>) -> Option<Splitter<'a>> {
        let (remaining, painting) = dashes.next()?;
        Some(Splitter {
            dashes,
            remaining,
            painting,
            current: Path::new(),
            runs: vec![],
        })
    }

    fn paint(&mut self, line: LineSegment<f32>) {
        if self.painting {
            self.current.extend(Primitive::Line(line).sanitize());
        }
    }

    /// Move on to the next entry, closing the current run if paint turns into a gap.
    fn advance(&mut self) -> bool {
        let (remaining, painting) = match self.dashes.next() {
            Some(next) => next,
            None => return false,
        };

        if self.painting && !painting {
            self.finish_run();
        }
        self.remaining = remaining;
        self.painting = painting;
        true
    }

    fn finish_run(&mut self) {
        if !self.current.is_empty() {
            self.runs.push(mem::take(&mut self.current));
        }
    }

    fn take_line(&mut self, mut line: LineSegment<f32>) -> bool {
        loop {
            let length = line.length();
            if length <= self.remaining + DASH_EPSILON {
                self.paint(line);
                self.remaining -= length;
                return self.remaining > DASH_EPSILON || self.advance();
            }

            let (head, tail) = line.split(self.remaining / length);
            self.paint(head);
            if !self.advance() {
                return false;
            }
            line = tail;
        }
    }

    fn into_runs(mut self) -> Vec<Path> {
        if self.painting {
            self.finish_run();
        }
        self.runs
    }
}

/// Split `path` into the painted runs of `pattern`, starting `phase` into the pattern. Gaps are dropped.
///
/// Curves are flattened to lines within `tolerance` before being measured, so every run is made of lines.
#[inline]
pub fn dashize(phase: f32, pattern: &DashPattern, path: &Path, tolerance: f32) -> Result<Vec<Path>> {
    if !phase.is_finite() {
        log::warn!("Rejecting dash phase {}", phase);
        return Err(Error::InvalidDashPhase(phase));
    }
    validate_tolerance(tolerance)?;

    log::debug!(
        "Dashing {} primitives with pattern {:?} at phase {}",
        path.len(),
        pattern.entries(),
        phase
    );

    let mut splitter = match Splitter::new(pattern.cycle(phase)) {
        Some(splitter) => splitter,
        None => return Ok(vec![]),
    };

    let lines = path
        .iter()
        .filter_map(Primitive::sanitize)
        .flat_map(|primitive| primitive.flatten(tolerance))
        .filter(|line| Primitive::Line(*line).sanitize().is_some());

    for line in lines {
        if !splitter.take_line(line) {
            break;
        }
    }

    Ok(splitter.into_runs())
}

/// Dash `path` and stroke every painted run, producing one closed outline per run.
#[inline]
pub fn dashed_strokize(
    phase: f32,
    pattern: &DashPattern,
    width: f32,
    join: Join,
    caps: (Cap, Cap),
    path: &Path,
) -> Result<Vec<Path>> {
    validate_stroke(width, join, caps)?;

    dashize(phase, pattern, path, DEFAULT_TOLERANCE)?
        .iter()
        .map(|run| strokize(width, join, caps, run))
        .filter(|outline| !matches!(outline, Ok(outline) if outline.is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{point, Point};
    use approx::assert_abs_diff_eq;

    fn ten() -> Path {
        Path::polyline(vec![point(0.0, 0.0), point(10.0, 0.0)])
    }

    fn extent(run: &Path) -> (Point, Point) {
        (run.first_point().unwrap(), run.last_point().unwrap())
    }

    fn assert_runs(runs: &[Path], expected: &[(f32, f32)]) {
        assert_eq!(runs.len(), expected.len(), "runs: {:?}", runs);
        for (run, &(start, end)) in runs.iter().zip(expected) {
            let (first, last) = extent(run);
            assert_abs_diff_eq!(first.x, start, epsilon = 1e-3);
            assert_abs_diff_eq!(last.x, end, epsilon = 1e-3);
        }
    }

    #[test]
    fn pattern_validation() {
        assert_eq!(DashPattern::new(vec![1.0, -1.0]), Err(Error::InvalidDashEntry(-1.0)));
        assert!(matches!(DashPattern::new(vec![f32::NAN]), Err(Error::InvalidDashEntry(_))));
        assert_eq!(DashPattern::new(vec![0.0, 0.0]), Err(Error::EmptyDashPattern));
        assert_eq!(DashPattern::new(vec![]), Err(Error::EmptyDashPattern));
        assert_eq!(DashPattern::new(vec![3.0, 2.0]).unwrap().period(), 5.0);
        assert_eq!(DashPattern::new(vec![3.0, 2.0, 1.0]).unwrap().period(), 12.0);
    }

    #[test]
    fn cycle_repeats_with_parity() {
        let pattern = DashPattern::new(vec![1.0, 2.0, 3.0]).unwrap();
        let entries: Vec<_> = pattern.cycle(0.0).take(6).collect();
        assert_eq!(
            entries,
            vec![(1.0, true), (2.0, false), (3.0, true), (1.0, false), (2.0, true), (3.0, false)]
        );
    }

    #[test]
    fn cycle_consumes_phase() {
        let pattern = DashPattern::new(vec![3.0, 2.0]).unwrap();
        let entries: Vec<_> = pattern.cycle(4.0).take(3).collect();
        assert_eq!(entries, vec![(1.0, false), (3.0, true), (2.0, false)]);

        let entries: Vec<_> = pattern.cycle(3.0).take(2).collect();
        assert_eq!(entries, vec![(2.0, false), (3.0, true)]);
    }

    #[test]
    fn cycle_skips_zero_entries() {
        let pattern = DashPattern::new(vec![0.0, 2.0]).unwrap();
        let entries: Vec<_> = pattern.cycle(0.0).take(2).collect();
        assert_eq!(entries, vec![(2.0, false), (2.0, false)]);
    }

    #[test]
    fn negative_phase_is_normalized() {
        let pattern = DashPattern::new(vec![3.0, 2.0]).unwrap();
        assert_abs_diff_eq!(pattern.normalize_phase(-1.0), 4.0);
        assert_abs_diff_eq!(pattern.normalize_phase(-11.0), 4.0);
        assert_abs_diff_eq!(pattern.normalize_phase(12.0), 2.0);
    }

    #[test]
    fn three_two_over_ten() {
        let pattern = DashPattern::new(vec![3.0, 2.0]).unwrap();
        let runs = dashize(0.0, &pattern, &ten(), DEFAULT_TOLERANCE).unwrap();
        assert_runs(&runs, &[(0.0, 3.0), (5.0, 8.0)]);
    }

    #[test]
    fn single_value_alternates() {
        let pattern = DashPattern::new(vec![2.0]).unwrap();
        let runs = dashize(0.0, &pattern, &ten(), DEFAULT_TOLERANCE).unwrap();
        assert_runs(&runs, &[(0.0, 2.0), (4.0, 6.0), (8.0, 10.0)]);
    }

    #[test]
    fn phase_landing_in_a_gap() {
        let pattern = DashPattern::new(vec![3.0, 2.0]).unwrap();
        let runs = dashize(4.0, &pattern, &ten(), DEFAULT_TOLERANCE).unwrap();
        assert_runs(&runs, &[(1.0, 4.0), (6.0, 9.0)]);

        let negative = dashize(-1.0, &pattern, &ten(), DEFAULT_TOLERANCE).unwrap();
        assert_eq!(negative, runs);
    }

    #[test]
    fn runs_follow_corners() {
        let path = Path::polyline(vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)]);
        let pattern = DashPattern::new(vec![6.0, 1.0]).unwrap();
        let runs = dashize(0.0, &pattern, &path, DEFAULT_TOLERANCE).unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 2);
        let (first, last) = extent(&runs[0]);
        assert_eq!(first, point(0.0, 0.0));
        assert_abs_diff_eq!(last.y, 2.0, epsilon = 1e-4);
        let (first, last) = extent(&runs[1]);
        assert_abs_diff_eq!(first.y, 3.0, epsilon = 1e-4);
        assert_eq!(last, point(4.0, 4.0));
    }

    #[test]
    fn curves_are_flattened() {
        let path = Path::from_primitives(vec![Primitive::quadratic(
            point(0.0, 0.0),
            point(5.0, 5.0),
            point(10.0, 0.0),
        )]);
        let pattern = DashPattern::new(vec![1.0, 1.0]).unwrap();
        let runs = dashize(0.0, &pattern, &path, 0.01).unwrap();
        assert!(runs.len() > 4);
        for run in &runs {
            assert!(run.iter().all(Primitive::is_line));
            assert!(run.length(0.01) <= 1.0 + 1e-3);
        }
    }

    #[test]
    fn empty_path_has_no_runs() {
        let pattern = DashPattern::new(vec![1.0]).unwrap();
        assert!(dashize(0.0, &pattern, &Path::new(), DEFAULT_TOLERANCE).unwrap().is_empty());
    }

    #[test]
    fn bad_phase_and_tolerance_are_rejected() {
        let pattern = DashPattern::new(vec![1.0]).unwrap();
        assert!(matches!(
            dashize(f32::NAN, &pattern, &ten(), DEFAULT_TOLERANCE),
            Err(Error::InvalidDashPhase(_))
        ));
        assert_eq!(
            dashize(0.0, &pattern, &ten(), -1.0),
            Err(Error::InvalidTolerance(-1.0))
        );
    }

    #[test]
    fn dashed_stroke_gives_one_outline_per_run() {
        let pattern = DashPattern::new(vec![3.0, 2.0]).unwrap();
        let outlines = dashed_strokize(
            0.0,
            &pattern,
            2.0,
            Join::Round,
            (Cap::Straight(0.0), Cap::Straight(0.0)),
            &ten(),
        )
        .unwrap();

        assert_eq!(outlines.len(), 2);
        for outline in &outlines {
            assert_eq!(outline.len(), 4);
            assert!(outline.is_closed());
        }
        assert!(dashed_strokize(0.0, &pattern, 0.0, Join::Round, (Cap::Round, Cap::Round), &ten()).is_err());
    }
}
