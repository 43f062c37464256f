//! Packed RGBA texels.
//!
//! A texel is one `u32` whose bytes, in memory order, are R, G, B, A. That is
//! the layout `GL_RGBA` + `GL_UNSIGNED_BYTE` reads and writes, so texel
//! buffers go to and from the graphics context without conversion.

/// One texel split into channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 0xff);
    pub const WHITE: Rgba = Rgba::new(0xff, 0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_texel(texel: u32) -> Self {
        let [r, g, b, a] = texel.to_ne_bytes();
        Self { r, g, b, a }
    }

    pub fn to_texel(self) -> u32 {
        u32::from_ne_bytes([self.r, self.g, self.b, self.a])
    }

    /// Color-key test: RGB must equal `rgb`; alpha is compared only when
    /// `alpha` is non-zero.
    pub fn matches_key(&self, rgb: [u8; 3], alpha: u8) -> bool {
        self.r == rgb[0] && self.g == rgb[1] && self.b == rgb[2] && (alpha == 0 || self.a == alpha)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texel_bytes_are_rgba_in_memory_order() {
        let texel = Rgba::new(1, 2, 3, 4).to_texel();
        assert_eq!(texel.to_ne_bytes(), [1, 2, 3, 4]);
        assert_eq!(Rgba::from_texel(texel), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn key_ignores_alpha_when_zero() {
        let cyan = Rgba::new(0, 0xff, 0xff, 0x80);
        assert!(cyan.matches_key([0, 0xff, 0xff], 0));
        assert!(!cyan.matches_key([0, 0xff, 0xff], 0xff));
        assert!(cyan.matches_key([0, 0xff, 0xff], 0x80));
        assert!(!cyan.matches_key([0xff, 0xff, 0xff], 0));
    }
}
