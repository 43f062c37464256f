//! [`SoftwareContext`] is an in-memory [`GraphicsContext`].
//!
//! Textures live in a map keyed by name, the bound-texture slot is an
//! ordinary field, and draws are recorded instead of rasterized. Errors
//! follow the GL model: a failing call records an error code, leaves the
//! texture untouched, and the code is returned by the next `take_error`.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use gltex_core::{Dimensions, Filter, GlError, GraphicsContext, Point, Quad, TextureId};

/// One recorded [`GraphicsContext::draw_quad`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Texture bound when the quad was drawn.
    pub texture: Option<TextureId>,
    pub origin: Point,
    pub quad: Quad,
}

#[derive(Debug, Default)]
struct StoredTexture {
    dims: Dimensions,
    texels: Vec<u32>,
    filter: Option<Filter>,
}

#[derive(Debug)]
struct State {
    next_name: u32,
    textures: HashMap<TextureId, StoredTexture>,
    bound: Option<TextureId>,
    /// Pending error codes, oldest first.
    errors: VecDeque<GlError>,
    /// Error the next texel transfer will fail with.
    armed: Option<GlError>,
    /// When set, `create_texture` returns `None`.
    names_exhausted: bool,
    draws: Vec<DrawCall>,
}

/// Headless graphics context for tests and CPU-only use.
#[derive(Debug)]
pub struct SoftwareContext {
    state: RefCell<State>,
}

impl Default for SoftwareContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftwareContext {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_name: 1,
                textures: HashMap::new(),
                bound: None,
                errors: VecDeque::new(),
                armed: None,
                names_exhausted: false,
                draws: Vec::new(),
            }),
        }
    }

    /// Make the next texel transfer (`tex_image`, `tex_sub_image` or
    /// `get_tex_image`) fail with `error`.
    pub fn fail_next(&self, error: GlError) {
        self.state.borrow_mut().armed = Some(error);
    }

    /// Make `create_texture` fail until reset.
    pub fn set_names_exhausted(&self, exhausted: bool) {
        self.state.borrow_mut().names_exhausted = exhausted;
    }

    /// Texels of a live texture as stored "on the GPU".
    pub fn texels(&self, id: TextureId) -> Option<Vec<u32>> {
        self.state.borrow().textures.get(&id).map(|t| t.texels.clone())
    }

    pub fn dimensions(&self, id: TextureId) -> Option<Dimensions> {
        self.state.borrow().textures.get(&id).map(|t| t.dims)
    }

    pub fn filter(&self, id: TextureId) -> Option<Filter> {
        self.state.borrow().textures.get(&id).and_then(|t| t.filter)
    }

    /// Number of texture names not yet deleted.
    pub fn live_textures(&self) -> usize {
        self.state.borrow().textures.len()
    }

    pub fn draw_calls(&self) -> Vec<DrawCall> {
        self.state.borrow().draws.clone()
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Run `f` on the bound texture, recording an error instead when the
    /// transfer is armed to fail, nothing is bound, or `f` rejects the call.
    fn with_bound(&self, f: impl FnOnce(&mut StoredTexture) -> Result<(), GlError>) {
        let mut state = self.state.borrow_mut();

        if let Some(error) = state.armed.take() {
            state.errors.push_back(error);
            return;
        }

        let result = match state.bound {
            Some(id) => match state.textures.get_mut(&id) {
                Some(texture) => f(texture),
                None => Err(GlError::InvalidOperation),
            },
            None => Err(GlError::InvalidOperation),
        };

        if let Err(error) = result {
            state.errors.push_back(error);
        }
    }
}

impl GraphicsContext for SoftwareContext {
    fn create_texture(&self) -> Option<TextureId> {
        let mut state = self.state.borrow_mut();
        if state.names_exhausted {
            return None;
        }

        let id = TextureId::new(state.next_name)?;
        state.next_name += 1;
        state.textures.insert(id, StoredTexture::default());
        Some(id)
    }

    fn bind_texture(&self, id: Option<TextureId>) {
        let mut state = self.state.borrow_mut();
        match id {
            Some(id) if !state.textures.contains_key(&id) => {
                state.errors.push_back(GlError::InvalidValue);
            }
            _ => state.bound = id,
        }
    }

    fn bound_texture(&self) -> Option<TextureId> {
        self.state.borrow().bound
    }

    fn tex_image(&self, dims: Dimensions, texels: &[u32]) {
        self.with_bound(|texture| {
            if texels.len() != dims.texel_count() {
                return Err(GlError::InvalidValue);
            }
            texture.dims = dims;
            texture.texels = texels.to_vec();
            Ok(())
        });
    }

    fn tex_sub_image(&self, dims: Dimensions, texels: &[u32]) {
        self.with_bound(|texture| {
            if dims != texture.dims || texels.len() != dims.texel_count() {
                return Err(GlError::InvalidValue);
            }
            texture.texels.copy_from_slice(texels);
            Ok(())
        });
    }

    fn get_tex_image(&self, out: &mut [u32]) {
        self.with_bound(|texture| {
            if out.len() != texture.texels.len() {
                return Err(GlError::InvalidValue);
            }
            out.copy_from_slice(&texture.texels);
            Ok(())
        });
    }

    fn set_filter(&self, filter: Filter) {
        self.with_bound(|texture| {
            texture.filter = Some(filter);
            Ok(())
        });
    }

    fn delete_texture(&self, id: TextureId) {
        let mut state = self.state.borrow_mut();
        state.textures.remove(&id);
        if state.bound == Some(id) {
            state.bound = None;
        }
    }

    fn take_error(&self) -> Option<GlError> {
        self.state.borrow_mut().errors.pop_front()
    }

    fn draw_quad(&self, origin: Point, quad: &Quad) {
        let mut state = self.state.borrow_mut();
        let texture = state.bound;
        state.draws.push(DrawCall {
            texture,
            origin,
            quad: *quad,
        });
    }
}
