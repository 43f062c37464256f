//! Image decoding and canvas padding.
//!
//! Files are decoded with the `image` crate, converted to RGBA8 and, under
//! [`Padding::Aligned`], enlarged so both sides land on a 32-texel boundary.
//! Decoded content stays at the upper-left; new texels take the
//! configured pad color.

use std::path::Path;

use gltex_core::{Dimensions, Padding, Rgba, TextureConfig};
use image::{ImageError, RgbaImage};

/// Alignment boundary: the bit width of the dimension type.
pub const ALIGNMENT: u32 = u32::BITS;

/// Smallest multiple of [`ALIGNMENT`] that is `>= n`.
pub fn align(n: u32) -> u32 {
    n.div_ceil(ALIGNMENT).saturating_mul(ALIGNMENT)
}

pub fn aligned_dimensions(dims: Dimensions) -> Dimensions {
    Dimensions::new(align(dims.width), align(dims.height))
}

/// Decode `path` into RGBA8.
pub fn decode_rgba(path: &Path) -> Result<RgbaImage, ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Grow `image` to `dims`, anchoring its content at the upper-left.
///
/// Returns the image untouched when it already has that size. A target
/// smaller than the image crops.
pub fn enlarge_canvas(image: RgbaImage, dims: Dimensions, fill: Rgba) -> RgbaImage {
    if image.dimensions() == (dims.width, dims.height) {
        return image;
    }

    let mut canvas = RgbaImage::from_pixel(dims.width, dims.height, image::Rgba(fill.into()));
    image::imageops::replace(&mut canvas, &image, 0, 0);
    canvas
}

/// Pack an RGBA8 image into one texel per pixel, row-major.
pub fn texels_from_image(image: &RgbaImage) -> Vec<u32> {
    image
        .as_raw()
        .chunks_exact(4)
        .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Decode `path` and apply the padding policy of `config`.
pub fn load_texels(
    path: &Path,
    config: &TextureConfig,
) -> Result<(Vec<u32>, Dimensions), ImageError> {
    let image = decode_rgba(path)?;
    let (width, height) = image.dimensions();
    let source = Dimensions::new(width, height);

    let image = match config.padding {
        Padding::Aligned => {
            let target = aligned_dimensions(source);
            if target != source {
                tracing::debug!(
                    path = %path.display(),
                    ?source,
                    ?target,
                    "padding image to aligned size"
                );
            }
            enlarge_canvas(image, target, config.pad_color)
        }
        Padding::None => image,
    };

    let dims = Dimensions::new(image.width(), image.height());
    Ok((texels_from_image(&image), dims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| image::Rgba([x as u8, y as u8, 0x40, 0xff]))
    }

    #[test]
    fn align_rounds_up_to_boundary() {
        assert_eq!(align(0), 0);
        assert_eq!(align(1), 32);
        assert_eq!(align(31), 32);
        assert_eq!(align(32), 32);
        assert_eq!(align(33), 64);
        assert_eq!(align(100), 128);
        assert_eq!(
            aligned_dimensions(Dimensions::new(50, 64)),
            Dimensions::new(64, 64)
        );
    }

    #[test]
    fn enlarge_keeps_content_at_upper_left() {
        let source = gradient(5, 3);
        let padded = enlarge_canvas(source.clone(), Dimensions::new(32, 32), Rgba::TRANSPARENT);

        assert_eq!(padded.dimensions(), (32, 32));
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(padded.get_pixel(x, y), source.get_pixel(x, y));
            }
        }
        assert_eq!(padded.get_pixel(5, 0).0, [0, 0, 0, 0]);
        assert_eq!(padded.get_pixel(0, 3).0, [0, 0, 0, 0]);
        assert_eq!(padded.get_pixel(31, 31).0, [0, 0, 0, 0]);
    }

    #[test]
    fn load_texels_pads_to_aligned_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("small.png");
        gradient(40, 7).save(&path).unwrap();

        let config = TextureConfig::default().with_pad_color(Rgba::WHITE);
        let (texels, dims) = load_texels(&path, &config).unwrap();

        assert_eq!(dims, Dimensions::new(64, 32));
        assert_eq!(texels.len(), 64 * 32);
        assert_eq!(Rgba::from_texel(texels[0]), Rgba::new(0, 0, 0x40, 0xff));
        assert_eq!(Rgba::from_texel(texels[6 * 64 + 39]), Rgba::new(39, 6, 0x40, 0xff));
        assert_eq!(Rgba::from_texel(texels[40]), Rgba::WHITE);
        assert_eq!(Rgba::from_texel(texels[7 * 64]), Rgba::WHITE);
    }

    #[test]
    fn load_texels_without_padding_keeps_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("odd.png");
        gradient(3, 5).save(&path).unwrap();

        let config = TextureConfig::default().with_padding(Padding::None);
        let (texels, dims) = load_texels(&path, &config).unwrap();

        assert_eq!(dims, Dimensions::new(3, 5));
        assert_eq!(texels.len(), 15);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_texels(&dir.path().join("nope.png"), &TextureConfig::default());
        assert!(result.is_err());
    }
}
