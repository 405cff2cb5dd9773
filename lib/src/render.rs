use crate::config::RenderConfig;
use crate::error::{AsciiError, Result};
use crate::glyph::{CellMetrics, GlyphRasterizer};
use crate::luminance::sample_luminosity;
use image::{DynamicImage, Rgba, RgbaImage};

/// Glyph fill when color is off
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A source pixel: position, color and alpha when the layout has one
type Sample = (u32, u32, [u8; 3], Option<u8>);

/// Convert any decoded image to one of the two layouts [`render`] accepts
///
/// RGB8 and RGBA8 pass through unchanged. Other layouts become RGBA8 when
/// they carry alpha and RGB8 otherwise.
pub fn normalize_pixels(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

/// Output canvas size for a `width` x `height` source
///
/// # Errors
/// `InvalidArgument` for an empty source or a canvas that overflows `u32`.
pub fn canvas_size(width: u32, height: u32, cell: CellMetrics) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(AsciiError::invalid(format!(
            "cannot render an empty {width}x{height} image"
        )));
    }
    match (width.checked_mul(cell.width()), height.checked_mul(cell.height())) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(AsciiError::invalid(format!(
            "canvas for {width}x{height} pixels at {}x{} per glyph is too large",
            cell.width(),
            cell.height()
        ))),
    }
}

/// Select the ramp character for one pixel
pub fn select_glyph(rgb: [u8; 3], alpha: Option<u8>, config: &RenderConfig) -> char {
    let luminosity = sample_luminosity(rgb, alpha, config.transparency);
    config.ramp.glyph_for(luminosity)
}

/// Pixels in raster order: top-to-bottom, left-to-right
fn samples(image: &DynamicImage) -> Result<Box<dyn Iterator<Item = Sample> + '_>> {
    match image {
        DynamicImage::ImageRgb8(src) => Ok(Box::new(
            src.enumerate_pixels()
                .map(|(x, y, p)| -> Sample { (x, y, p.0, None) }),
        )),
        DynamicImage::ImageRgba8(src) => Ok(Box::new(
            src.enumerate_pixels()
                .map(|(x, y, p)| -> Sample { (x, y, [p[0], p[1], p[2]], Some(p[3])) }),
        )),
        other => Err(AsciiError::UnsupportedPixelFormat(other.color())),
    }
}

/// Renders an image as glyph art
///
/// Every source pixel becomes one glyph cell:
/// 1. Compute the pixel's luminosity (transparent pixels follow
///    `config.transparency`)
/// 2. Pick the ramp character for that luminosity
/// 3. Draw it at `(x * cell_width, y * cell_height)`, in the pixel's own
///    color when `config.colored` is set and in black otherwise
///
/// # Arguments
/// * `image` - RGB8 or RGBA8 source, read only
/// * `glyphs` - Rasterizer providing the cell size and glyph drawing
/// * `config` - Configuration parameters for the conversion
///
/// # Returns
/// A new RGBA canvas of `(width * cell_width, height * cell_height)` pixels
/// filled with `config.background` behind the glyphs.
///
/// # Errors
/// `UnsupportedPixelFormat` for other layouts (see [`normalize_pixels`]),
/// `InvalidArgument` for an invalid config, glyphs built for a different
/// font size than `config.font_size`, or an empty image.
pub fn render<G>(image: &DynamicImage, glyphs: &G, config: &RenderConfig) -> Result<RgbaImage>
where
    G: GlyphRasterizer + ?Sized,
{
    config.validate()?;
    if glyphs.font_size() != config.font_size {
        return Err(AsciiError::invalid(format!(
            "glyphs are sized for {}px but the config asks for {}px",
            glyphs.font_size(),
            config.font_size
        )));
    }
    let pixels = samples(image)?;

    let cell = glyphs.cell_metrics();
    let (width, height) = canvas_size(image.width(), image.height(), cell)?;
    let [r, g, b] = config.background;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

    for (x, y, rgb, alpha) in pixels {
        let glyph = select_glyph(rgb, alpha, config);
        let color = if config.colored {
            Rgba([rgb[0], rgb[1], rgb[2], 255])
        } else {
            INK
        };
        glyphs.draw_glyph(&mut canvas, glyph, x * cell.width(), y * cell.height(), color);
    }

    Ok(canvas)
}
