//! [`GlContext`] implements [`GraphicsContext`] over the current OpenGL context.

use std::cell::Cell;
use std::ffi::c_void;
use std::mem::size_of;

use anyhow::{anyhow, Result};
use gl::types::{GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use gltex_core::{Dimensions, Filter, GlError, GraphicsContext, Point, Quad, TextureId};

use crate::loader;
use crate::shader::{QuadProgram, ATTRIB_POSITION, ATTRIB_TEXCOORD};

/// Floats per streamed vertex: position xy, texcoord uv.
const VERTEX_FLOATS: usize = 4;

/// Texture unit the quad program samples.
const SAMPLER_UNIT: GLuint = 0;

/// Oldest desktop version with vertex arrays and GLSL 1.40.
pub const MIN_GL_VERSION: (u32, u32) = (3, 1);

fn sampler_unit_enum() -> GLenum {
    gl::TEXTURE0 + SAMPLER_UNIT
}

/// Reject contexts the quad renderer cannot run on.
fn check_version(version: &str) -> Result<()> {
    let (major, minor) = MIN_GL_VERSION;
    match loader::parse_gl_version(version) {
        Some(found) if found >= MIN_GL_VERSION => Ok(()),
        _ => Err(anyhow!("OpenGL {major}.{minor}+ required, got {version}")),
    }
}

/// Column-major orthographic projection, as `glOrtho` builds it.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> [f32; 16] {
    let mut m = [0.0; 16];
    m[0] = 2.0 / (right - left);
    m[5] = 2.0 / (top - bottom);
    m[10] = -2.0 / (far - near);
    m[12] = -(right + left) / (right - left);
    m[13] = -(top + bottom) / (top - bottom);
    m[14] = -(far + near) / (far - near);
    m[15] = 1.0;
    m
}

/// Screen-space projection with the origin at the top-left, y down.
pub fn screen_projection(width: f32, height: f32) -> [f32; 16] {
    ortho(0.0, width, height, 0.0, 1.0, -1.0)
}

fn filter_enum(filter: Filter) -> GLint {
    match filter {
        Filter::Linear => gl::LINEAR as GLint,
        Filter::Nearest => gl::NEAREST as GLint,
    }
}

/// The current OpenGL context, seen through [`GraphicsContext`].
///
/// Owns the quad program, vertex array and streaming vertex buffer used by
/// [`GraphicsContext::draw_quad`]. Must be created and used on the thread
/// where the context is current.
pub struct GlContext {
    program: QuadProgram,
    vao: GLuint,
    vbo: GLuint,
    projection: Cell<[f32; 16]>,
    /// Error detected on our side of a call, reported before GL's own.
    local_error: Cell<Option<GlError>>,
}

impl GlContext {
    /// Load function pointers through `gl_loader` and build the draw state.
    pub fn new() -> Result<Self> {
        loader::load_gl();
        Self::create()
    }

    /// Like [`GlContext::new`] but with a windowing library's loader.
    pub fn with_loader(loader: impl FnMut(&'static str) -> *const c_void) -> Result<Self> {
        loader::load_gl_with(loader);
        Self::create()
    }

    fn create() -> Result<Self> {
        let Some(version) = loader::gl_version() else {
            return Err(anyhow!("no current OpenGL context"));
        };
        check_version(&version)?;
        if !gl::GenVertexArrays::is_loaded() {
            return Err(anyhow!("vertex arrays not loaded for OpenGL {version}"));
        }

        let program = unsafe { QuadProgram::new()? };

        let mut vao = 0;
        let mut vbo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (4 * VERTEX_FLOATS * size_of::<f32>()) as GLsizeiptr,
                std::ptr::null(),
                gl::STREAM_DRAW,
            );

            let stride = (VERTEX_FLOATS * size_of::<f32>()) as GLsizei;
            gl::EnableVertexAttribArray(ATTRIB_POSITION);
            gl::VertexAttribPointer(
                ATTRIB_POSITION,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                std::ptr::null(),
            );
            gl::EnableVertexAttribArray(ATTRIB_TEXCOORD);
            gl::VertexAttribPointer(
                ATTRIB_TEXCOORD,
                2,
                gl::FLOAT,
                gl::FALSE,
                stride,
                (2 * size_of::<f32>()) as *const c_void,
            );

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        let ctx = Self {
            program,
            vao,
            vbo,
            projection: Cell::new(ortho(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0)),
            local_error: Cell::new(None),
        };

        if let Some(error) = ctx.take_error() {
            return Err(anyhow!("error initializing quad renderer: {error}"));
        }

        tracing::debug!(vao, vbo, program = ctx.program.id, "GL context ready");
        Ok(ctx)
    }

    /// Projection applied to every drawn quad.
    pub fn set_projection(&self, matrix: [f32; 16]) {
        self.projection.set(matrix);
    }

    pub fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe {
            gl::Viewport(x, y, width, height);
        }
    }

    pub fn clear(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    /// Standard "over" blending, so color-keyed texels draw transparent.
    pub fn enable_alpha_blending(&self) {
        unsafe {
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
        }
    }

    fn bound_level_dimensions(&self) -> Dimensions {
        let mut width = 0;
        let mut height = 0;
        unsafe {
            gl::GetTexLevelParameteriv(gl::TEXTURE_2D, 0, gl::TEXTURE_WIDTH, &mut width);
            gl::GetTexLevelParameteriv(gl::TEXTURE_2D, 0, gl::TEXTURE_HEIGHT, &mut height);
        }
        Dimensions::new(width.max(0) as u32, height.max(0) as u32)
    }

    fn record(&self, error: GlError) {
        if self.local_error.get().is_none() {
            self.local_error.set(Some(error));
        }
    }
}

impl GraphicsContext for GlContext {
    fn create_texture(&self) -> Option<TextureId> {
        let mut name: GLuint = 0;
        unsafe {
            gl::GenTextures(1, &mut name);
        }
        TextureId::new(name)
    }

    fn bind_texture(&self, id: Option<TextureId>) {
        unsafe {
            gl::ActiveTexture(sampler_unit_enum());
            gl::BindTexture(gl::TEXTURE_2D, gltex_core::context::raw_name(id));
        }
    }

    fn bound_texture(&self) -> Option<TextureId> {
        let mut name: GLint = 0;
        unsafe {
            gl::GetIntegerv(gl::TEXTURE_BINDING_2D, &mut name);
        }
        TextureId::new(name as GLuint)
    }

    fn tex_image(&self, dims: Dimensions, texels: &[u32]) {
        if texels.len() < dims.texel_count() {
            self.record(GlError::InvalidValue);
            return;
        }
        unsafe {
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as GLint,
                dims.width as GLsizei,
                dims.height as GLsizei,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                texels.as_ptr().cast(),
            );
        }
    }

    fn tex_sub_image(&self, dims: Dimensions, texels: &[u32]) {
        if texels.len() < dims.texel_count() {
            self.record(GlError::InvalidValue);
            return;
        }
        unsafe {
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                0,
                0,
                0,
                dims.width as GLsizei,
                dims.height as GLsizei,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                texels.as_ptr().cast(),
            );
        }
    }

    fn get_tex_image(&self, out: &mut [u32]) {
        // glGetTexImage writes the whole level; never hand it a short buffer.
        if out.len() < self.bound_level_dimensions().texel_count() {
            self.record(GlError::InvalidValue);
            return;
        }
        unsafe {
            gl::GetTexImage(
                gl::TEXTURE_2D,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                out.as_mut_ptr().cast(),
            );
        }
    }

    fn set_filter(&self, filter: Filter) {
        let value = filter_enum(filter);
        unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, value);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, value);
        }
    }

    fn delete_texture(&self, id: TextureId) {
        let name = id.get();
        unsafe {
            gl::DeleteTextures(1, &name);
        }
    }

    fn take_error(&self) -> Option<GlError> {
        if let Some(error) = self.local_error.take() {
            return Some(error);
        }
        GlError::from_code(unsafe { gl::GetError() })
    }

    fn draw_quad(&self, origin: Point, quad: &Quad) {
        let mut data = [0.0f32; 4 * VERTEX_FLOATS];
        for (chunk, vertex) in data.chunks_exact_mut(VERTEX_FLOATS).zip(&quad.vertices) {
            chunk.copy_from_slice(&[
                vertex.position.x,
                vertex.position.y,
                vertex.tex.x,
                vertex.tex.y,
            ]);
        }

        let projection = self.projection.get();
        unsafe {
            gl::UseProgram(self.program.id);
            gl::UniformMatrix4fv(self.program.projection, 1, gl::FALSE, projection.as_ptr());
            gl::Uniform2f(self.program.origin, origin.x, origin.y);
            gl::Uniform1i(self.program.texture, SAMPLER_UNIT as GLint);

            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                0,
                size_of::<[f32; 4 * VERTEX_FLOATS]>() as GLsizeiptr,
                data.as_ptr().cast(),
            );
            gl::DrawArrays(gl::TRIANGLE_FAN, 0, 4);

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
            gl::UseProgram(0);
        }
    }
}

impl Drop for GlContext {
    fn drop(&mut self) {
        unsafe {
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
                self.vbo = 0;
            }
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
                self.vao = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(m: &[f32; 16], x: f32, y: f32) -> (f32, f32) {
        (m[0] * x + m[4] * y + m[12], m[1] * x + m[5] * y + m[13])
    }

    fn close((ax, ay): (f32, f32), (bx, by): (f32, f32)) -> bool {
        (ax - bx).abs() < 1e-5 && (ay - by).abs() < 1e-5
    }

    #[test]
    fn screen_projection_maps_corners_to_clip_space() {
        let m = screen_projection(640.0, 480.0);
        assert!(close(apply(&m, 0.0, 0.0), (-1.0, 1.0)));
        assert!(close(apply(&m, 640.0, 480.0), (1.0, -1.0)));
        assert!(close(apply(&m, 320.0, 240.0), (0.0, 0.0)));
    }

    #[test]
    fn legacy_contexts_are_rejected() {
        let err = check_version("2.1 Mesa 23.0.4").unwrap_err();
        assert_eq!(err.to_string(), "OpenGL 3.1+ required, got 2.1 Mesa 23.0.4");
        assert!(check_version("3.0 Mesa 23.0.4").is_err());
        assert!(check_version("OpenGL ES 3.2 Mesa 23.0.4").is_err());
        assert!(check_version("3.1 Mesa 23.0.4").is_ok());
        assert!(check_version("4.6.0 NVIDIA 535.54.03").is_ok());
    }

    #[test]
    fn binds_on_the_sampled_unit() {
        assert_eq!(sampler_unit_enum(), gl::TEXTURE0);
    }

    #[test]
    fn filters_map_to_gl_enums() {
        assert_eq!(filter_enum(Filter::Linear), gl::LINEAR as GLint);
        assert_eq!(filter_enum(Filter::Nearest), gl::NEAREST as GLint);
    }

    #[test]
    fn gl_error_codes_match_gl_constants() {
        assert_eq!(GlError::from_code(gl::INVALID_ENUM), Some(GlError::InvalidEnum));
        assert_eq!(GlError::from_code(gl::INVALID_VALUE), Some(GlError::InvalidValue));
        assert_eq!(
            GlError::from_code(gl::INVALID_OPERATION),
            Some(GlError::InvalidOperation)
        );
        assert_eq!(GlError::from_code(gl::OUT_OF_MEMORY), Some(GlError::OutOfMemory));
        assert_eq!(GlError::from_code(gl::NO_ERROR), None);
    }
}
