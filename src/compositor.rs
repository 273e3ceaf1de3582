// MIT/Apache2 License

//! Blending a painted color onto a destination pixel, weighted by the coverage a rasterizer computed for it.

use crate::intensity::Intensity;
use std::fmt;

/// A pixel component that coverage can be applied to.
///
/// `EMPTY` and `FULL` are the bounds of the component's range; `f32` components live in `[0, 1]` and `u8`
/// components in `[0, 255]`. Every operation keeps its result within that range for in-range inputs.
pub trait Modulable: Copy + PartialEq + PartialOrd + fmt::Debug {
    const EMPTY: Self;
    const FULL: Self;

    /// Saturate a coverage value into range, returning it along with its complement.
    fn clamp_coverage(coverage: f32) -> (Self, Self);

    /// Multiply two components.
    fn modulate(self, other: Self) -> Self;

    /// Divide by another component. Dividing by `EMPTY` leaves the value unchanged.
    fn modiv(self, other: Self) -> Self;

    /// `coverage * painted + inverse * background`.
    fn alpha_over(coverage: Self, inverse: Self, background: Self, painted: Self) -> Self;

    /// The alpha of painting with `coverage` over a background of the given alpha.
    fn alpha_compose(coverage: Self, inverse: Self, background_alpha: Self, painted_alpha: Self) -> Self;

    /// `FULL - self`.
    fn complement(self) -> Self;

    /// Blend a straight-alpha background channel with a painted channel, and divide by the composed alpha.
    ///
    /// This is `alpha_over(coverage, inverse, background * background_alpha, painted)` divided by
    /// `alpha_compose(coverage, inverse, background_alpha, FULL)`.
    #[inline]
    fn alpha_over_straight(
        coverage: Self,
        inverse: Self,
        background_alpha: Self,
        background: Self,
        painted: Self,
    ) -> Self {
        let alpha = Self::alpha_compose(coverage, inverse, background_alpha, Self::FULL);
        Self::alpha_over(coverage, inverse, background.modulate(background_alpha), painted).modiv(alpha)
    }

    /// Fold the opacity of the paint into a coverage value.
    #[inline]
    fn coverage_modulate(coverage: Self, alpha: Self) -> (Self, Self) {
        let coverage = alpha.modulate(coverage);
        (coverage, coverage.complement())
    }
}

impl Modulable for f32 {
    const EMPTY: f32 = 0.0;
    const FULL: f32 = 1.0;

    #[inline]
    fn clamp_coverage(coverage: f32) -> (f32, f32) {
        let coverage = Intensity::saturating(coverage);
        (coverage.into_inner(), coverage.complement().into_inner())
    }

    #[inline]
    fn modulate(self, other: f32) -> f32 {
        self * other
    }

    #[inline]
    fn modiv(self, other: f32) -> f32 {
        if other == 0.0 {
            self
        } else {
            self / other
        }
    }

    #[inline]
    fn alpha_over(coverage: f32, inverse: f32, background: f32, painted: f32) -> f32 {
        coverage * painted + inverse * background
    }

    #[inline]
    fn alpha_compose(coverage: f32, inverse: f32, background_alpha: f32, _painted_alpha: f32) -> f32 {
        coverage + background_alpha * inverse
    }

    #[inline]
    fn complement(self) -> f32 {
        1.0 - self
    }
}

/// Divide by 255, rounding to nearest, for values that already carry the `+ 128` bias.
#[inline]
fn div255(v: u32) -> u8 {
    let v = (v + (v >> 8)) >> 8;
    v.min(255) as u8
}

impl Modulable for u8 {
    const EMPTY: u8 = 0;
    const FULL: u8 = 255;

    #[inline]
    fn clamp_coverage(coverage: f32) -> (u8, u8) {
        let coverage = Intensity::saturating(coverage).scale_u8();
        (coverage, 255 - coverage)
    }

    #[inline]
    fn modulate(self, other: u8) -> u8 {
        div255(u32::from(self) * u32::from(other) + 128)
    }

    #[inline]
    fn modiv(self, other: u8) -> u8 {
        if other == 0 {
            return self;
        }

        let (value, other) = (u32::from(self), u32::from(other));
        ((value * 255 + other / 2) / other).min(255) as u8
    }

    #[inline]
    fn alpha_over(coverage: u8, inverse: u8, background: u8, painted: u8) -> u8 {
        let (c, ic) = (u32::from(coverage), u32::from(inverse));
        div255(c * u32::from(painted) + ic * u32::from(background) + 128)
    }

    #[inline]
    fn alpha_compose(coverage: u8, inverse: u8, background_alpha: u8, _painted_alpha: u8) -> u8 {
        let (c, ic) = (u32::from(coverage), u32::from(inverse));
        div255(c * 255 + u32::from(background_alpha) * ic + 128)
    }

    #[inline]
    fn complement(self) -> u8 {
        255 - self
    }

    /// Weighs `painted` by `coverage * 255` and `background` by `inverse * background_alpha`, so that the
    /// result is rounded once instead of after every step.
    #[inline]
    fn alpha_over_straight(coverage: u8, inverse: u8, background_alpha: u8, background: u8, painted: u8) -> u8 {
        let painted_weight = u32::from(coverage) * 255;
        let background_weight = u32::from(inverse) * u32::from(background_alpha);
        let total = painted_weight + background_weight;
        if total == 0 {
            return background;
        }

        let sum = painted_weight * u32::from(painted) + background_weight * u32::from(background);
        ((sum + total / 2) / total).min(255) as u8
    }
}

/// A pixel made of `Modulable` components.
pub trait Pixel: Copy + PartialEq + fmt::Debug {
    type Component: Modulable;

    /// The alpha of this pixel.
    fn opacity(&self) -> Self::Component;

    /// Apply a function to every component, alpha included.
    fn map_components<F: FnMut(Self::Component) -> Self::Component>(self, f: F) -> Self;

    /// Combine the color channels of two pixels pairwise with `f`, and use `alpha` as the new alpha. Pixels
    /// without an alpha channel ignore `alpha`.
    fn mix_with_alpha<F: FnMut(Self::Component, Self::Component) -> Self::Component>(
        self,
        other: Self,
        f: F,
        alpha: Self::Component,
    ) -> Self;
}

/// A function blending a `top` pixel onto a `bottom` pixel with a coverage and its complement.
pub type Compositor<P> = fn(<P as Pixel>::Component, <P as Pixel>::Component, P, P) -> P;

/// Replace the destination with the painted pixel, scaled by coverage.
#[must_use]
#[inline]
pub fn composition_destination<P: Pixel>(
    coverage: P::Component,
    _inverse: P::Component,
    _bottom: P,
    top: P,
) -> P {
    top.map_components(|component| component.modulate(coverage))
}

/// Paint `top` over `bottom` with the given coverage, "source over" style.
#[must_use]
#[inline]
pub fn composition_alpha<P: Pixel>(coverage: P::Component, inverse: P::Component, bottom: P, top: P) -> P {
    if coverage == P::Component::EMPTY {
        return bottom;
    }
    if coverage == P::Component::FULL {
        return top;
    }

    let bottom_opacity = bottom.opacity();
    let alpha_out = P::Component::alpha_compose(coverage, inverse, bottom_opacity, top.opacity());

    bottom.mix_with_alpha(
        top,
        |back, fore| P::Component::alpha_over_straight(coverage, inverse, bottom_opacity, back, fore),
        alpha_out,
    )
}

/// Composite `source` onto a run of destination pixels, one coverage value per pixel.
///
/// Coverage values are saturated into range and then weighted by the opacity of `source`. When the slices
/// differ in length, the extra elements are left alone.
#[inline]
pub fn composite_span<P: Pixel>(compositor: Compositor<P>, coverages: &[f32], destination: &mut [P], source: P) {
    let opacity = source.opacity();
    for (pixel, &coverage) in destination.iter_mut().zip(coverages) {
        let (coverage, _) = P::Component::clamp_coverage(coverage);
        let (coverage, inverse) = P::Component::coverage_modulate(coverage, opacity);
        *pixel = compositor(coverage, inverse, *pixel, source);
    }
}
