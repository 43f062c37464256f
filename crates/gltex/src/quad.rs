//! Quad and texture-coordinate computation for rendering.

use gltex_core::{Dimensions, Quad, Rect, TexCoords};

/// The quad [`Texture::render`](crate::Texture::render) draws.
///
/// Without a clip the quad covers the whole texture at its allocated size
/// and samples the unit square. With a clip the quad takes the clip's size
/// and samples the clip's edges divided by `dims`.
pub fn quad_geometry(dims: Dimensions, clip: Option<Rect>) -> Quad {
    let width = dims.width as f32;
    let height = dims.height as f32;

    match clip {
        None => Quad::new(width, height, TexCoords::UNIT),
        Some(clip) => {
            let tex = TexCoords {
                left: clip.x / width,
                top: clip.y / height,
                right: (clip.x + clip.width) / width,
                bottom: (clip.y + clip.height) / height,
            };
            Quad::new(clip.width, clip.height, tex)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn clip_is_normalized_by_dimensions() {
        let quad = quad_geometry(
            Dimensions::new(100, 50),
            Some(Rect::new(10.0, 5.0, 20.0, 10.0)),
        );
        let tex = quad.tex_coords();

        assert!(close(tex.left, 0.10));
        assert!(close(tex.right, 0.30));
        assert!(close(tex.top, 0.10));
        assert!(close(tex.bottom, 0.30));
        assert_eq!(quad.size(), (20.0, 10.0));
    }

    #[test]
    fn full_texture_uses_unit_square() {
        let quad = quad_geometry(Dimensions::new(64, 64), None);
        assert_eq!(quad.tex_coords(), TexCoords::UNIT);
        assert_eq!(quad.size(), (64.0, 64.0));
    }

    #[test]
    fn vertices_pair_corners_with_matching_uvs() {
        let quad = quad_geometry(
            Dimensions::new(128, 64),
            Some(Rect::new(64.0, 0.0, 64.0, 32.0)),
        );
        let [tl, tr, br, bl] = quad.vertices;

        assert_eq!((tl.position.x, tl.position.y), (0.0, 0.0));
        assert_eq!((tl.tex.x, tl.tex.y), (0.5, 0.0));
        assert_eq!((tr.position.x, tr.position.y), (64.0, 0.0));
        assert_eq!((tr.tex.x, tr.tex.y), (1.0, 0.0));
        assert_eq!((br.position.x, br.position.y), (64.0, 32.0));
        assert_eq!((br.tex.x, br.tex.y), (1.0, 0.5));
        assert_eq!((bl.position.x, bl.position.y), (0.0, 32.0));
        assert_eq!((bl.tex.x, bl.tex.y), (0.5, 0.5));
    }
}
