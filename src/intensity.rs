// MIT/Apache2 License

use num_traits::{AsPrimitive, Bounded};
use ordered_float::NotNan;

/// A value that goes from zero to one. Coverage handed over by a rasterizer is validated into an `Intensity`
/// before it reaches the compositor. This type is essentially a wrapper around an `f32`, but with two invariants:
///
/// * The inner value will always be between `0.0` and `1.0`.
/// * The inner value will never be `NaN`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Intensity {
    inner: NotNan<f32>,
}

impl Intensity {
    /// No intensity at all.
    #[must_use]
    #[inline]
    pub fn zero() -> Intensity {
        Intensity::default()
    }

    /// Full intensity.
    #[must_use]
    #[inline]
    pub fn one() -> Intensity {
        Intensity {
            inner: NotNan::new(1.0).unwrap_or_default(),
        }
    }

    /// Create a new `Intensity`. If the inner value does not meet the invariants mentioned above, this function
    /// returns `None`.
    #[must_use]
    #[inline]
    pub fn new(inner: f32) -> Option<Intensity> {
        if !(0.0..=1.0).contains(&inner) {
            return None;
        }

        NotNan::new(inner).ok().map(|inner| Intensity { inner })
    }

    /// Create a new `Intensity`, pulling out-of-range values back onto the nearest bound. `NaN` becomes zero.
    #[must_use]
    #[inline]
    pub fn saturating(inner: f32) -> Intensity {
        if inner.is_nan() {
            Intensity::zero()
        } else {
            Intensity::new(inner.max(0.0).min(1.0)).unwrap_or(Intensity::zero())
        }
    }

    /// Get the inner value of the `Intensity`.
    #[must_use]
    #[inline]
    pub fn into_inner(self) -> f32 {
        self.inner.into_inner()
    }

    /// The remaining intensity, `1 - self`.
    #[must_use]
    #[inline]
    pub fn complement(self) -> Intensity {
        Intensity::saturating(1.0 - self.into_inner())
    }

    /// Scale this value onto the full range of an unsigned integer type, rounding to the nearest step.
    #[must_use]
    #[inline]
    pub fn scale<N>(self) -> N
    where
        N: Bounded + AsPrimitive<f32>,
        f32: AsPrimitive<N>,
    {
        let bound: f32 = N::max_value().as_();
        (bound * self.into_inner()).round().as_()
    }

    /// Scale this value to a `u8`.
    #[must_use]
    #[inline]
    pub fn scale_u8(self) -> u8 {
        self.scale()
    }
}

impl From<Intensity> for f32 {
    #[inline]
    fn from(i: Intensity) -> f32 {
        i.into_inner()
    }
}

impl From<u8> for Intensity {
    #[inline]
    fn from(value: u8) -> Intensity {
        Intensity::saturating(f32::from(value) / 255.0)
    }
}
