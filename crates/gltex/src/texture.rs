//! The texture resource.
//!
//! ```text
//! Empty --load--> Resident --lock--> Locked --unlock--> Resident --free--> Empty
//! Empty --load_pixels_from_file--> Staged --create_from_staged_pixels--> Resident
//! ```
//!
//! Every load first frees whatever the texture held, so a failed load ends
//! in `Empty`. Lock and unlock failures leave the state as it was.

use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::rc::Rc;

use gltex_core::{Dimensions, GraphicsContext, Point, Rect, TextureConfig, TextureId};
use tracing::{debug, error, trace};

use crate::color_key::ColorKey;
use crate::error::TextureError;
use crate::image_io;
use crate::quad::quad_geometry;

/// Which of its lifecycle states a [`Texture`] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    /// No texture name, no texels.
    Empty,
    /// Texels staged on the CPU, no texture name yet.
    Staged,
    /// Texels live only on the GPU.
    Resident,
    /// Texels mirrored on the CPU; the GPU copy may be stale until unlock.
    Locked,
}

/// A 2D texture owned on a graphics context.
///
/// A `Texture` is the only owner of its texture name and of its CPU texel
/// buffer. It cannot be cloned; moving it moves the name. Dropping it
/// deletes the name.
pub struct Texture<C: GraphicsContext> {
    ctx: Rc<C>,
    config: TextureConfig,
    id: Option<TextureId>,
    pixels: Option<Vec<u32>>,
    dimensions: Dimensions,
}

impl<C: GraphicsContext> Debug for Texture<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id)
            .field("dimensions", &self.dimensions)
            .field("state", &self.state())
            .finish()
    }
}

impl<C: GraphicsContext> Texture<C> {
    /// An empty texture on `ctx` with the default configuration.
    pub fn new(ctx: Rc<C>) -> Self {
        Self::with_config(ctx, TextureConfig::default())
    }

    pub fn with_config(ctx: Rc<C>, config: TextureConfig) -> Self {
        Self {
            ctx,
            config,
            id: None,
            pixels: None,
            dimensions: Dimensions::ZERO,
        }
    }

    pub fn state(&self) -> TextureState {
        match (self.id, &self.pixels) {
            (None, None) => TextureState::Empty,
            (None, Some(_)) => TextureState::Staged,
            (Some(_), None) => TextureState::Resident,
            (Some(_), Some(_)) => TextureState::Locked,
        }
    }

    pub fn texture_id(&self) -> Option<TextureId> {
        self.id
    }

    /// Allocated size, including any padding added on load.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn config(&self) -> &TextureConfig {
        &self.config
    }

    pub fn context(&self) -> &Rc<C> {
        &self.ctx
    }

    /// CPU texels, present while locked or staged.
    pub fn pixels(&self) -> Option<&[u32]> {
        self.pixels.as_deref()
    }

    pub fn pixels_mut(&mut self) -> Option<&mut [u32]> {
        self.pixels.as_deref_mut()
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Create a texture from `texels`, uploaded verbatim at `dims`.
    pub fn try_create_from_pixels(
        &mut self,
        texels: &[u32],
        dims: Dimensions,
    ) -> Result<(), TextureError> {
        self.free();

        if texels.len() != dims.texel_count() {
            return Err(TextureError::PixelCount {
                expected: dims.texel_count(),
                actual: texels.len(),
            });
        }

        let context = format!("{:p}", texels.as_ptr());
        let id = self.upload(texels, dims, context)?;
        self.id = Some(id);
        self.dimensions = dims;

        debug!(id = id.get(), ?dims, "created texture");
        Ok(())
    }

    pub fn create_from_pixels(&mut self, texels: &[u32], dims: Dimensions) -> bool {
        report("create_from_pixels", self.try_create_from_pixels(texels, dims))
    }

    /// Decode `path`, pad it per the configuration and upload it.
    pub fn try_load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), TextureError> {
        let path = path.as_ref();
        self.free();

        let (texels, dims) = image_io::load_texels(path, &self.config).map_err(|source| {
            TextureError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.try_create_from_pixels(&texels, dims)
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        report_path("load_from_file", path, self.try_load_from_file(path))
    }

    /// Decode and pad `path` into the CPU buffer without creating a texture.
    pub fn try_load_pixels_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<(), TextureError> {
        let path = path.as_ref();
        self.free();

        let (texels, dims) = image_io::load_texels(path, &self.config).map_err(|source| {
            TextureError::Decode {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.pixels = Some(texels);
        self.dimensions = dims;

        debug!(path = %path.display(), ?dims, "staged pixels");
        Ok(())
    }

    pub fn load_pixels_from_file(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        report_path("load_pixels_from_file", path, self.try_load_pixels_from_file(path))
    }

    /// Upload the staged CPU buffer and release it.
    ///
    /// Fails without side effects when a texture already exists or nothing
    /// is staged.
    pub fn try_create_from_staged_pixels(&mut self) -> Result<(), TextureError> {
        if self.id.is_some() {
            return Err(TextureError::TextureExists);
        }
        let Some(texels) = self.pixels.as_deref() else {
            return Err(TextureError::NoStagedPixels);
        };

        let id = self.upload(texels, self.dimensions, "staged pixels".to_owned())?;
        self.id = Some(id);
        self.pixels = None;

        debug!(id = id.get(), dims = ?self.dimensions, "created texture from staged pixels");
        Ok(())
    }

    pub fn create_from_staged_pixels(&mut self) -> bool {
        report("create_from_staged_pixels", self.try_create_from_staged_pixels())
    }

    /// Load `path` with every texel matching `key` made transparent white.
    pub fn try_load_from_file_with_color_key(
        &mut self,
        path: impl AsRef<Path>,
        key: ColorKey,
    ) -> Result<(), TextureError> {
        self.try_load_pixels_from_file(path)?;

        if let Some(texels) = self.pixels.as_deref_mut() {
            let keyed = key.apply(texels);
            trace!(keyed, ?key, "applied color key");
        }

        let result = self.try_create_from_staged_pixels();
        if result.is_err() {
            self.free();
        }
        result
    }

    /// `load_from_file_with_color_key(path, [r, g, b], a)`; `a == 0` keys on
    /// RGB alone.
    pub fn load_from_file_with_color_key(
        &mut self,
        path: impl AsRef<Path>,
        rgb: [u8; 3],
        alpha: u8,
    ) -> bool {
        let path = path.as_ref();
        let key = ColorKey { rgb, alpha };
        report_path(
            "load_from_file_with_color_key",
            path,
            self.try_load_from_file_with_color_key(path, key),
        )
    }

    // -----------------------------------------------------------------------
    // Pixel access
    // -----------------------------------------------------------------------

    /// Download the GPU texels into a fresh CPU buffer.
    pub fn try_lock(&mut self) -> Result<(), TextureError> {
        let id = match self.state() {
            TextureState::Resident => self.id.ok_or(TextureError::NotResident)?,
            TextureState::Locked => return Err(TextureError::AlreadyLocked),
            TextureState::Empty | TextureState::Staged => return Err(TextureError::NotResident),
        };

        let mut texels = vec![0u32; self.dimensions.texel_count()];

        self.ctx.bind_texture(Some(id));
        self.ctx.get_tex_image(&mut texels);
        self.ctx.bind_texture(None);

        if let Some(error) = self.ctx.take_error() {
            return Err(TextureError::Graphics {
                context: format!("texture {}", id.get()),
                error,
            });
        }

        self.pixels = Some(texels);
        debug!(id = id.get(), "locked texture");
        Ok(())
    }

    pub fn lock(&mut self) -> bool {
        report("lock", self.try_lock())
    }

    /// Push the CPU buffer back into the existing texture and drop it.
    pub fn try_unlock(&mut self) -> Result<(), TextureError> {
        let (Some(id), Some(texels)) = (self.id, self.pixels.as_deref()) else {
            return Err(TextureError::NotLocked);
        };

        self.ctx.bind_texture(Some(id));
        self.ctx.tex_sub_image(self.dimensions, texels);
        self.ctx.bind_texture(None);

        if let Some(error) = self.ctx.take_error() {
            return Err(TextureError::Graphics {
                context: format!("texture {}", id.get()),
                error,
            });
        }

        self.pixels = None;
        debug!(id = id.get(), "unlocked texture");
        Ok(())
    }

    pub fn unlock(&mut self) -> bool {
        report("unlock", self.try_unlock())
    }

    pub fn try_get_pixel(&self, x: u32, y: u32) -> Result<u32, TextureError> {
        let index = self.pixel_index(x, y)?;
        self.pixels
            .as_ref()
            .map(|p| p[index])
            .ok_or(TextureError::NoPixels)
    }

    /// Texel at `(x, y)`; `None` when not locked or out of range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.try_get_pixel(x, y).ok()
    }

    pub fn try_set_pixel(&mut self, x: u32, y: u32, texel: u32) -> Result<(), TextureError> {
        let index = self.pixel_index(x, y)?;
        let pixels = self.pixels.as_mut().ok_or(TextureError::NoPixels)?;
        pixels[index] = texel;
        Ok(())
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, texel: u32) -> bool {
        report("set_pixel", self.try_set_pixel(x, y, texel))
    }

    // -----------------------------------------------------------------------
    // Release and draw
    // -----------------------------------------------------------------------

    /// Delete the texture name if any, drop the CPU buffer and zero the
    /// dimensions. Safe to call repeatedly.
    pub fn free(&mut self) {
        if let Some(id) = self.id.take() {
            self.ctx.delete_texture(id);
            trace!(id = id.get(), "deleted texture");
        }
        self.pixels = None;
        self.dimensions = Dimensions::ZERO;
    }

    /// Draw the texture with its top-left corner at `position`.
    ///
    /// With `clip`, only that sub-rectangle (in texels) is drawn, at its own
    /// size. Does nothing when there is no texture name or the texture has
    /// no texels. Leaves this texture bound on the context.
    pub fn render(&self, position: Point, clip: Option<Rect>) {
        let Some(id) = self.id else {
            return;
        };
        if self.dimensions.is_empty() {
            return;
        }

        let quad = quad_geometry(self.dimensions, clip);
        self.ctx.bind_texture(Some(id));
        self.ctx.draw_quad(position, &quad);
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Create a name, upload `texels`, apply filtering, unbind. On a
    /// reported error the new name is deleted again.
    fn upload(
        &self,
        texels: &[u32],
        dims: Dimensions,
        context: String,
    ) -> Result<TextureId, TextureError> {
        let id = self.ctx.create_texture().ok_or(TextureError::NoHandle)?;

        self.ctx.bind_texture(Some(id));
        self.ctx.tex_image(dims, texels);
        self.ctx.set_filter(self.config.filter);
        self.ctx.bind_texture(None);

        if let Some(error) = self.ctx.take_error() {
            self.ctx.delete_texture(id);
            return Err(TextureError::Graphics { context, error });
        }

        Ok(id)
    }

    fn pixel_index(&self, x: u32, y: u32) -> Result<usize, TextureError> {
        if self.pixels.is_none() {
            return Err(TextureError::NoPixels);
        }
        self.dimensions
            .index_of(x, y)
            .ok_or(TextureError::OutOfBounds {
                x,
                y,
                dimensions: self.dimensions,
            })
    }
}

impl<C: GraphicsContext> Drop for Texture<C> {
    fn drop(&mut self) {
        self.free();
    }
}

fn report(op: &'static str, result: Result<(), TextureError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!(op, "{err}");
            false
        }
    }
}

fn report_path(op: &'static str, path: &Path, result: Result<(), TextureError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            error!(op, path = %path.display(), "{err}");
            false
        }
    }
}
