// MIT/Apache2 License

use crate::{
    compositor::{Modulable, Pixel},
    intensity::Intensity,
};

/// A four-element color, with alpha last.
///
/// Color channels are stored with straight (not premultiplied) alpha.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Rgba<C> {
    pub r: C,
    pub g: C,
    pub b: C,
    pub a: C,
}

/// A single gray level. It is always opaque.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Luma<C>(pub C);

pub type Rgba8 = Rgba<u8>;
pub type RgbaF = Rgba<f32>;
pub type Luma8 = Luma<u8>;
pub type LumaF = Luma<f32>;

impl<C> Rgba<C> {
    /// Create a new color.
    #[inline]
    pub const fn new(r: C, g: C, b: C, a: C) -> Rgba<C> {
        Rgba { r, g, b, a }
    }
}

impl<C: Modulable> Rgba<C> {
    pub const WHITE: Rgba<C> = Rgba::new(C::FULL, C::FULL, C::FULL, C::FULL);
    pub const BLACK: Rgba<C> = Rgba::new(C::EMPTY, C::EMPTY, C::EMPTY, C::FULL);
    pub const TRANSPARENT: Rgba<C> = Rgba::new(C::EMPTY, C::EMPTY, C::EMPTY, C::EMPTY);

    /// Create a new, fully opaque color.
    #[inline]
    pub fn opaque(r: C, g: C, b: C) -> Rgba<C> {
        Rgba::new(r, g, b, C::FULL)
    }
}

impl RgbaF {
    /// Creates a new color. This function returns `None` if any of the elements are outside of `[0, 1]` or
    /// NaN.
    #[inline]
    pub fn checked(r: f32, g: f32, b: f32, a: f32) -> Option<RgbaF> {
        Some(Rgba::new(
            Intensity::new(r)?.into_inner(),
            Intensity::new(g)?.into_inner(),
            Intensity::new(b)?.into_inner(),
            Intensity::new(a)?.into_inner(),
        ))
    }

    /// Clamp to u8's.
    #[must_use]
    #[inline]
    pub fn to_rgba8(self) -> Rgba8 {
        self.map(|c| Intensity::saturating(c).scale_u8())
    }
}

impl Rgba8 {
    /// Spread onto `[0, 1]` floats.
    #[must_use]
    #[inline]
    pub fn to_rgbaf(self) -> RgbaF {
        self.map(|c| Intensity::from(c).into_inner())
    }
}

impl<C: Copy> Rgba<C> {
    /// Apply a function to every element, alpha included.
    #[inline]
    pub fn map<D, F: FnMut(C) -> D>(self, mut f: F) -> Rgba<D> {
        Rgba::new(f(self.r), f(self.g), f(self.b), f(self.a))
    }
}

impl<C: Modulable> Pixel for Rgba<C> {
    type Component = C;

    #[inline]
    fn opacity(&self) -> C {
        self.a
    }

    #[inline]
    fn map_components<F: FnMut(C) -> C>(self, f: F) -> Self {
        self.map(f)
    }

    #[inline]
    fn mix_with_alpha<F: FnMut(C, C) -> C>(self, other: Self, mut f: F, alpha: C) -> Self {
        Rgba::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b), alpha)
    }
}

impl<C: Modulable> Luma<C> {
    pub const WHITE: Luma<C> = Luma(C::FULL);
    pub const BLACK: Luma<C> = Luma(C::EMPTY);
}

impl LumaF {
    /// Clamp to a u8.
    #[must_use]
    #[inline]
    pub fn to_luma8(self) -> Luma8 {
        Luma(Intensity::saturating(self.0).scale_u8())
    }
}

impl<C: Modulable> Pixel for Luma<C> {
    type Component = C;

    #[inline]
    fn opacity(&self) -> C {
        C::FULL
    }

    #[inline]
    fn map_components<F: FnMut(C) -> C>(self, mut f: F) -> Self {
        Luma(f(self.0))
    }

    #[inline]
    fn mix_with_alpha<F: FnMut(C, C) -> C>(self, other: Self, mut f: F, _alpha: C) -> Self {
        Luma(f(self.0, other.0))
    }
}
