//! Shared vocabulary for the `gltex` texture wrapper.
//!
//! This crate holds everything both the texture resource ([`gltex`]) and the
//! live OpenGL backend ([`gltex_gl`]) need to agree on:
//!
//! - [`geometry`] named-field records for points, sizes, rectangles and quads.
//! - [`pixel`] the packed RGBA texel type.
//! - [`context`] the [`GraphicsContext`] trait a texture talks to.
//! - [`config`] texture creation options.
//! - [`logging`] subscriber bootstrap.
//!
//! [`gltex`]: ../gltex/index.html
//! [`gltex_gl`]: ../gltex_gl/index.html

pub mod config;
pub mod context;
pub mod geometry;
pub mod logging;
pub mod pixel;

pub use config::{Padding, TextureConfig};
pub use context::{Filter, GlError, GraphicsContext, TextureId};
pub use geometry::{Dimensions, Point, Quad, Rect, TexCoords, Vertex};
pub use logging::init_logging;
pub use pixel::Rgba;
