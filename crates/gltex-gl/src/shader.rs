//! The built-in textured-quad program.
//!
//! Positions arrive in the caller's coordinate frame, offset by the
//! `u_origin` uniform and mapped by `u_projection`. This stands in for the
//! fixed-function `glLoadIdentity` / `glTranslatef` / `glBegin(GL_QUADS)`
//! sequence on core profiles.

use std::ffi::CString;
use std::ptr::null_mut;

use anyhow::{anyhow, Result};
use gl::types::{GLchar, GLenum, GLint, GLuint};

pub(crate) const ATTRIB_POSITION: GLuint = 0;
pub(crate) const ATTRIB_TEXCOORD: GLuint = 1;

const VERTEX_SOURCE: &str = r#"#version 140
in vec2 a_position;
in vec2 a_texcoord;
uniform mat4 u_projection;
uniform vec2 u_origin;
out vec2 v_texcoord;
void main() {
    v_texcoord = a_texcoord;
    gl_Position = u_projection * vec4(u_origin + a_position, 0.0, 1.0);
}
"#;

const FRAGMENT_SOURCE: &str = r#"#version 140
in vec2 v_texcoord;
uniform sampler2D u_texture;
out vec4 o_color;
void main() {
    o_color = texture(u_texture, v_texcoord);
}
"#;

/// Linked quad program and its uniform locations.
pub(crate) struct QuadProgram {
    pub(crate) id: GLuint,
    pub(crate) projection: GLint,
    pub(crate) origin: GLint,
    pub(crate) texture: GLint,
}

impl QuadProgram {
    /// # Safety
    ///
    /// Requires a current GL context with loaded function pointers.
    pub(crate) unsafe fn new() -> Result<Self> {
        let vertex = compile(VERTEX_SOURCE, gl::VERTEX_SHADER)?;
        let fragment = match compile(FRAGMENT_SOURCE, gl::FRAGMENT_SHADER) {
            Ok(f) => f,
            Err(err) => {
                gl::DeleteShader(vertex);
                return Err(err);
            }
        };

        let id = gl::CreateProgram();
        gl::AttachShader(id, vertex);
        gl::AttachShader(id, fragment);
        gl::BindAttribLocation(id, ATTRIB_POSITION, c"a_position".as_ptr());
        gl::BindAttribLocation(id, ATTRIB_TEXCOORD, c"a_texcoord".as_ptr());
        gl::LinkProgram(id);

        gl::DetachShader(id, vertex);
        gl::DetachShader(id, fragment);
        gl::DeleteShader(vertex);
        gl::DeleteShader(fragment);

        let mut success = 0;
        gl::GetProgramiv(id, gl::LINK_STATUS, &mut success);
        if success == 0 {
            let mut len = 0;
            gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
            let log = info_log(len, |len, buf| gl::GetProgramInfoLog(id, len, null_mut(), buf));
            gl::DeleteProgram(id);
            return Err(anyhow!("failed to link quad program: {log}"));
        }

        Ok(Self {
            id,
            projection: gl::GetUniformLocation(id, c"u_projection".as_ptr()),
            origin: gl::GetUniformLocation(id, c"u_origin".as_ptr()),
            texture: gl::GetUniformLocation(id, c"u_texture".as_ptr()),
        })
    }
}

impl Drop for QuadProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

unsafe fn compile(source: &str, kind: GLenum) -> Result<GLuint> {
    let source = CString::new(source)?;
    let id = gl::CreateShader(kind);
    gl::ShaderSource(id, 1, &source.as_ptr(), std::ptr::null());
    gl::CompileShader(id);

    let mut success = 0;
    gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut success);
    if success == 0 {
        let mut len = 0;
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
        let log = info_log(len, |len, buf| gl::GetShaderInfoLog(id, len, null_mut(), buf));
        gl::DeleteShader(id);
        return Err(anyhow!("failed to compile shader 0x{kind:04x}: {log}"));
    }

    Ok(id)
}

unsafe fn info_log(len: GLint, read: impl FnOnce(GLint, *mut GLchar)) -> String {
    let mut buf = vec![0u8; len.max(1) as usize];
    read(len, buf.as_mut_ptr().cast());
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}
