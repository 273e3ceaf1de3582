// MIT/Apache2 License

use std::fmt;

/// Sum error type for chalkstroke operations.
///
/// Every variant describes a configuration that was rejected at an entry point. Numeric degeneracy inside the
/// geometry (coincident points, zero-length tangents) is never surfaced as an error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Error {
    /// The stroke width was zero, negative or not finite.
    InvalidStrokeWidth(f32),
    /// The miter limit was zero, negative or not finite.
    InvalidMiterLimit(f32),
    /// The extension ratio of a straight cap was negative or not finite.
    InvalidCapExtension(f32),
    /// Half of the stroke width, scaled by the miter limit or a cap extension, does not fit in an `f32`.
    StrokeTooWide(f32),
    /// A dash pattern contained a negative or non-finite entry.
    InvalidDashEntry(f32),
    /// The dash pattern had no positive length.
    EmptyDashPattern,
    /// The dash phase was not finite.
    InvalidDashPhase(f32),
    /// The flattening tolerance was zero, negative or not finite.
    InvalidTolerance(f32),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStrokeWidth(w) => write!(f, "Stroke width must be positive and finite, got {}", w),
            Self::InvalidMiterLimit(l) => write!(f, "Miter limit must be positive and finite, got {}", l),
            Self::InvalidCapExtension(e) => {
                write!(f, "Cap extension must be non-negative and finite, got {}", e)
            }
            Self::StrokeTooWide(w) => {
                write!(f, "Stroke width {} overflows when scaled by the miter limit or cap extension", w)
            }
            Self::InvalidDashEntry(d) => {
                write!(f, "Dash entries must be non-negative and finite, got {}", d)
            }
            Self::EmptyDashPattern => f.write_str("Dash pattern has no positive length"),
            Self::InvalidDashPhase(p) => write!(f, "Dash phase must be finite, got {}", p),
            Self::InvalidTolerance(t) => write!(f, "Tolerance must be positive and finite, got {}", t),
        }
    }
}

/// Convenience result type.
pub type Result<T = ()> = std::result::Result<T, Error>;
