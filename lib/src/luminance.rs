use crate::config::TransparencyPolicy;
use crate::error::{AsciiError, Result};
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Perceptual luminosity of an RGB triple
///
/// Formula: L = round(0.30*R + 0.59*G + 0.11*B)
///
/// Computed in integer hundredths so that equal channels give back the same
/// value exactly: `luminosity(v, v, v) == v`.
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * 30 + g as u32 * 59 + b as u32 * 11;
    ((weighted + 50) / 100).min(255) as u8
}

/// Luminosity of a pixel that may carry an alpha channel
///
/// Under [`TransparencyPolicy::White`] a fully transparent pixel reads as
/// white whatever its RGB channels hold, since decoders commonly store
/// transparent pixels as `(0, 0, 0, 0)`.
pub fn sample_luminosity(rgb: [u8; 3], alpha: Option<u8>, policy: TransparencyPolicy) -> u8 {
    match (policy, alpha) {
        (TransparencyPolicy::White, Some(0)) => 255,
        _ => luminosity(rgb[0], rgb[1], rgb[2]),
    }
}

/// Grayscale copy of an RGB or RGBA image
///
/// Each pixel becomes `(l, l, l)` with `l` its luminosity under `policy`;
/// alpha is carried over unchanged. The input is not modified.
///
/// # Errors
/// `UnsupportedPixelFormat` for layouts other than RGB8/RGBA8.
pub fn to_grayscale(image: &DynamicImage, policy: TransparencyPolicy) -> Result<DynamicImage> {
    match image {
        DynamicImage::ImageRgb8(src) => {
            let gray = RgbImage::from_fn(src.width(), src.height(), |x, y| {
                let Rgb([r, g, b]) = *src.get_pixel(x, y);
                let l = sample_luminosity([r, g, b], None, policy);
                Rgb([l, l, l])
            });
            Ok(DynamicImage::ImageRgb8(gray))
        }
        DynamicImage::ImageRgba8(src) => {
            let gray = RgbaImage::from_fn(src.width(), src.height(), |x, y| {
                let Rgba([r, g, b, a]) = *src.get_pixel(x, y);
                let l = sample_luminosity([r, g, b], Some(a), policy);
                Rgba([l, l, l, a])
            });
            Ok(DynamicImage::ImageRgba8(gray))
        }
        other => Err(AsciiError::UnsupportedPixelFormat(other.color())),
    }
}
