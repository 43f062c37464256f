//! OpenGL backend for `gltex`.
//!
//! [`GlContext`] implements [`gltex_core::GraphicsContext`] with raw `gl`
//! calls against whatever context is current on the calling thread. Texture
//! calls map one-to-one onto `glGenTextures`, `glTexImage2D`,
//! `glTexSubImage2D`, `glGetTexImage` and friends. Quads are drawn by a
//! small built-in program, since core profiles have no immediate mode.
//!
//! ### Warning
//!
//! A context must be current before [`GlContext::new`] and for every call
//! after it. Nothing here checks which thread you are on.

pub mod context;
pub mod loader;
mod shader;

pub use context::{ortho, screen_projection, GlContext, MIN_GL_VERSION};
pub use loader::{gl_version, is_context_current, load_gl, load_gl_with, parse_gl_version};
