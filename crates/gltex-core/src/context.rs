//! The graphics-context seam.
//!
//! A [`GraphicsContext`] supplies the handful of texture primitives a
//! texture resource needs. The live OpenGL implementation lives in
//! `gltex-gl`; a headless in-memory one lives in `gltex::software`.
//!
//! Like OpenGL itself, a context has exactly one "currently bound texture"
//! slot. Every upload, download and filter call acts on whatever is bound.
//! That slot is process-wide state with no enforced reset: after a render
//! the rendered texture stays bound until someone binds something else.
//! [`GraphicsContext::bound_texture`] makes it observable.

use std::num::NonZeroU32;

use crate::geometry::{Dimensions, Point, Quad};

/// A live texture name. `0` ("no texture") is represented as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(NonZeroU32);

impl TextureId {
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

/// Raw name for an optional texture, `0` when unset.
pub fn raw_name(id: Option<TextureId>) -> u32 {
    id.map_or(0, TextureId::get)
}

/// Minification and magnification filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    Linear,
    Nearest,
}

/// An error code reported by the graphics context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GlError {
    #[error("invalid enumerant")]
    InvalidEnum,
    #[error("invalid value")]
    InvalidValue,
    #[error("invalid operation")]
    InvalidOperation,
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,
    #[error("out of memory")]
    OutOfMemory,
    #[error("invalid framebuffer operation")]
    InvalidFramebufferOperation,
    #[error("unknown error 0x{0:04x}")]
    Other(u32),
}

impl GlError {
    /// Map a `glGetError` result. `GL_NO_ERROR` maps to `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => return None,
            0x0500 => Self::InvalidEnum,
            0x0501 => Self::InvalidValue,
            0x0502 => Self::InvalidOperation,
            0x0503 => Self::StackOverflow,
            0x0504 => Self::StackUnderflow,
            0x0505 => Self::OutOfMemory,
            0x0506 => Self::InvalidFramebufferOperation,
            other => Self::Other(other),
        })
    }
}

/// Texture primitives of a current graphics context.
///
/// Implementations must only be used on the thread that owns the context.
/// Methods take `&self`: the underlying context is global state, so
/// implementations carry whatever bookkeeping they need in cells.
pub trait GraphicsContext {
    /// Generate a fresh texture name. `None` if the context could not.
    fn create_texture(&self) -> Option<TextureId>;

    /// Bind `id` to the 2D texture slot, or unbind with `None`.
    fn bind_texture(&self, id: Option<TextureId>);

    /// The texture currently bound to the 2D slot.
    fn bound_texture(&self) -> Option<TextureId>;

    /// Allocate storage for the bound texture and upload `texels` verbatim.
    fn tex_image(&self, dims: Dimensions, texels: &[u32]);

    /// Overwrite the whole bound texture in place, without reallocation.
    fn tex_sub_image(&self, dims: Dimensions, texels: &[u32]);

    /// Read the bound texture back into `out`.
    fn get_tex_image(&self, out: &mut [u32]);

    /// Set minification and magnification filtering on the bound texture.
    fn set_filter(&self, filter: Filter);

    /// Release a texture name. Deleting the bound texture unbinds it.
    fn delete_texture(&self, id: TextureId);

    /// Pop the oldest pending error, if any.
    fn take_error(&self) -> Option<GlError>;

    /// Reset the local transform, move to `origin` and draw `quad` textured
    /// with the bound texture.
    fn draw_quad(&self, origin: Point, quad: &Quad);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_texture() {
        assert_eq!(TextureId::new(0), None);
        assert_eq!(TextureId::new(7).map(TextureId::get), Some(7));
        assert_eq!(raw_name(None), 0);
    }

    #[test]
    fn error_codes_map_to_readable_text() {
        assert_eq!(GlError::from_code(0), None);
        assert_eq!(GlError::from_code(0x0501), Some(GlError::InvalidValue));
        assert_eq!(GlError::OutOfMemory.to_string(), "out of memory");
        assert_eq!(GlError::Other(0x9999).to_string(), "unknown error 0x9999");
    }
}
