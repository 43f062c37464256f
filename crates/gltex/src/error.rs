//! Texture operation failures.

use std::path::PathBuf;

use gltex_core::{Dimensions, GlError};

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// The context reported an error after a create/upload/download call.
    #[error("error loading texture from {context}: {error}")]
    Graphics { context: String, error: GlError },

    #[error("graphics context could not generate a texture name")]
    NoHandle,

    #[error("unable to load {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("expected {expected} texels, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("no unlocked texture to lock")]
    NotResident,

    #[error("texture is already locked")]
    AlreadyLocked,

    #[error("texture is not locked")]
    NotLocked,

    #[error("cannot load texture from current pixels: a texture is already loaded")]
    TextureExists,

    #[error("cannot load texture from current pixels: no pixels to create a texture from")]
    NoStagedPixels,

    #[error("no pixels available; lock the texture first")]
    NoPixels,

    #[error("texel ({x}, {y}) is outside {}x{}", dimensions.width, dimensions.height)]
    OutOfBounds {
        x: u32,
        y: u32,
        dimensions: Dimensions,
    },
}
