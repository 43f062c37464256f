//! Color keying.

use gltex_core::Rgba;

/// What a keyed texel becomes: white, fully transparent.
pub const KEYED: Rgba = Rgba::new(0xff, 0xff, 0xff, 0x00);

/// A color to make transparent.
///
/// `alpha == 0` compares RGB only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorKey {
    pub rgb: [u8; 3],
    pub alpha: u8,
}

impl ColorKey {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: [r, g, b],
            alpha: 0,
        }
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self {
            rgb: self.rgb,
            alpha,
        }
    }

    pub fn matches(&self, texel: u32) -> bool {
        Rgba::from_texel(texel).matches_key(self.rgb, self.alpha)
    }

    /// Rewrite every matching texel to [`KEYED`]. Returns how many changed.
    pub fn apply(&self, texels: &mut [u32]) -> usize {
        let keyed = KEYED.to_texel();
        let mut count = 0;
        for texel in texels.iter_mut().filter(|t| self.matches(**t)) {
            *texel = keyed;
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_texels_become_transparent() {
        let cyan = Rgba::new(0, 0xff, 0xff, 0xff).to_texel();
        let red = Rgba::new(0xff, 0, 0, 0xff).to_texel();
        let mut texels = vec![cyan, red, cyan, red];

        let changed = ColorKey::rgb(0, 0xff, 0xff).apply(&mut texels);

        assert_eq!(changed, 2);
        assert_eq!(texels, vec![KEYED.to_texel(), red, KEYED.to_texel(), red]);
    }

    #[test]
    fn alpha_is_compared_when_set() {
        let half = Rgba::new(0, 0xff, 0xff, 0x80).to_texel();
        let full = Rgba::new(0, 0xff, 0xff, 0xff).to_texel();
        let mut texels = vec![half, full];

        let changed = ColorKey::rgb(0, 0xff, 0xff).with_alpha(0xff).apply(&mut texels);

        assert_eq!(changed, 1);
        assert_eq!(texels, vec![half, KEYED.to_texel()]);
    }
}
