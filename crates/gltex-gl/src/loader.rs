//! GL function pointer loading.

use std::ffi::{c_void, CStr};
use std::sync::Once;

pub(crate) static GL_INIT_ONCE: Once = Once::new();

/// Load GL function pointers from the current context via `gl_loader`.
///
/// Runs exactly once per process; later calls are no-ops.
pub fn load_gl() {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        tracing::debug!("loaded GL function pointers via gl_loader");
    });
}

/// Load GL function pointers through a caller-supplied lookup, e.g. a
/// windowing library's `get_proc_address`.
pub fn load_gl_with(loader: impl FnMut(&'static str) -> *const c_void) {
    gl::load_with(loader);
}

/// `true` when a context is current and the loaded pointers answer.
pub fn is_context_current() -> bool {
    gl_version().is_some()
}

/// The `GL_VERSION` string of the current context.
pub fn gl_version() -> Option<String> {
    if !gl::GetString::is_loaded() {
        return None;
    }
    unsafe {
        let ptr = gl::GetString(gl::VERSION);
        if ptr.is_null() {
            return None;
        }
        Some(CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned())
    }
}

/// Desktop `(major, minor)` from a `GL_VERSION` string such as
/// `"4.6.0 NVIDIA 535.54"` or `"3.1 Mesa 23.0"`. OpenGL ES strings give `None`.
pub fn parse_gl_version(version: &str) -> Option<(u32, u32)> {
    if version.starts_with("OpenGL ES") {
        return None;
    }
    let mut parts = version.split_whitespace().next()?.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor: String = parts
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    Some((major, minor.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vendor_version_strings() {
        assert_eq!(parse_gl_version("4.6.0 NVIDIA 535.54.03"), Some((4, 6)));
        assert_eq!(parse_gl_version("3.1 Mesa 23.0.4"), Some((3, 1)));
        assert_eq!(parse_gl_version("2.1 INTEL-20.6.4"), Some((2, 1)));
        assert_eq!(parse_gl_version("3.3.0 - Build 31.0.101"), Some((3, 3)));
    }

    #[test]
    fn rejects_es_and_garbage() {
        assert_eq!(parse_gl_version("OpenGL ES 3.2 Mesa 23.0"), None);
        assert_eq!(parse_gl_version(""), None);
        assert_eq!(parse_gl_version("unknown"), None);
    }
}
