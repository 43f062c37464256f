//! Named-field geometry records.

/// A position in the current coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size of a texture or image in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const ZERO: Dimensions = Dimensions {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of texels covered, `width * height`.
    pub fn texel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major index of `(x, y)`, or `None` when outside.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle, used for texture clips.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Texture-space edges in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoords {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TexCoords {
    /// The whole texture.
    pub const UNIT: TexCoords = TexCoords {
        left: 0.0,
        top: 0.0,
        right: 1.0,
        bottom: 1.0,
    };
}

impl Default for TexCoords {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A quad corner paired with its texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Point,
    pub tex: Point,
}

/// Four textured corners, wound top-left, top-right, bottom-right, bottom-left.
///
/// Positions are relative to the draw origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub vertices: [Vertex; 4],
}

impl Quad {
    /// Build a quad of `size` with its top-left corner at the origin.
    pub fn new(width: f32, height: f32, tex: TexCoords) -> Self {
        let corner = |x: f32, y: f32, u: f32, v: f32| Vertex {
            position: Point::new(x, y),
            tex: Point::new(u, v),
        };

        Self {
            vertices: [
                corner(0.0, 0.0, tex.left, tex.top),
                corner(width, 0.0, tex.right, tex.top),
                corner(width, height, tex.right, tex.bottom),
                corner(0.0, height, tex.left, tex.bottom),
            ],
        }
    }

    /// Width and height spanned by the quad.
    pub fn size(&self) -> (f32, f32) {
        let br = self.vertices[2].position;
        (br.x, br.y)
    }

    /// Texture edges sampled by the quad.
    pub fn tex_coords(&self) -> TexCoords {
        let tl = self.vertices[0].tex;
        let br = self.vertices[2].tex;
        TexCoords {
            left: tl.x,
            top: tl.y,
            right: br.x,
            bottom: br.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_is_row_major() {
        let dims = Dimensions::new(4, 3);
        assert_eq!(dims.index_of(0, 0), Some(0));
        assert_eq!(dims.index_of(3, 0), Some(3));
        assert_eq!(dims.index_of(1, 2), Some(9));
        assert_eq!(dims.index_of(4, 0), None);
        assert_eq!(dims.index_of(0, 3), None);
    }

    #[test]
    fn zero_sized_dimensions_are_empty() {
        assert!(Dimensions::ZERO.is_empty());
        assert!(Dimensions::new(5, 0).is_empty());
        assert!(!Dimensions::new(1, 1).is_empty());
        assert_eq!(Dimensions::new(7, 3).texel_count(), 21);
    }

    #[test]
    fn quad_winding_starts_top_left() {
        let quad = Quad::new(20.0, 10.0, TexCoords::UNIT);
        let positions: Vec<_> = quad.vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(0.0, 0.0),
                Point::new(20.0, 0.0),
                Point::new(20.0, 10.0),
                Point::new(0.0, 10.0),
            ]
        );
        assert_eq!(quad.size(), (20.0, 10.0));
        assert_eq!(quad.tex_coords(), TexCoords::UNIT);
    }
}
