//! A 2D texture resource over a fixed-function style graphics context.
//!
//! [`Texture`] owns one texture name on a [`GraphicsContext`] and, while
//! locked or staged, a CPU-side mirror of its texels. It can be loaded from
//! raw texels or from an image file (padded to 32-texel boundaries, optionally
//! color keyed), locked for per-texel editing, and drawn as a textured quad
//! with an optional clip rectangle.
//!
//! # Overview
//!
//! - [`Texture`] the resource and its [`TextureState`] machine.
//! - [`quad_geometry`] the clip/UV math behind [`Texture::render`].
//! - [`image_io`] decode and canvas padding via the `image` crate.
//! - [`color_key`] texel keying.
//! - [`SoftwareContext`] a headless context that keeps textures in memory.
//!
//! Operations come in two forms: `try_*` returns a [`TextureError`]; the
//! plain form logs the error through `tracing` and returns `false`.

pub mod color_key;
pub mod error;
pub mod image_io;
pub mod quad;
pub mod software;
pub mod texture;

pub use gltex_core::*;

pub use color_key::ColorKey;
pub use error::TextureError;
pub use quad::quad_geometry;
pub use software::{DrawCall, SoftwareContext};
pub use texture::{Texture, TextureState};
