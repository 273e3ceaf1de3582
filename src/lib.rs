// MIT/Apache2 License

//! Turns vector paths into fillable outlines and blends the result into pixels.
//!
//! A path can be split into dashes ([`dashize`]), stroked into closed outlines ([`strokize`]) and clipped to a
//! rectangle ([`clip_path`]). Once a rasterizer has computed the coverage of those outlines, the compositors
//! ([`composition_alpha`], [`composition_destination`]) blend paint into `u8` or `f32` pixels.

#![forbid(unsafe_code)]

mod error;

pub mod clip;
pub mod color;
pub mod compositor;
pub mod dash;
pub mod geometry;
pub mod intensity;
pub mod path;
pub mod stroke;

pub use clip::*;
pub use color::*;
pub use compositor::*;
pub use dash::*;
pub use error::*;
pub use geometry::*;
pub use intensity::*;
pub use path::*;
pub use stroke::*;

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
