use crate::error::{AsciiError, Result};
use image::DynamicImage;
use image::imageops::FilterType;

/// Resampling filter used when resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    Nearest,
    /// Linear interpolation over a 2x2 neighbourhood
    #[default]
    Bilinear,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Height matching `target_width` at the source aspect ratio
///
/// `floor(target_width * height / width)`, never less than 1.
pub fn target_height(width: u32, height: u32, target_width: u32) -> Result<u32> {
    if target_width == 0 {
        return Err(AsciiError::invalid("target width must be positive"));
    }
    if width == 0 || height == 0 {
        return Err(AsciiError::invalid(format!(
            "cannot resize an empty {width}x{height} image"
        )));
    }

    let scaled = target_width as u64 * height as u64 / width as u64;
    u32::try_from(scaled.max(1))
        .map_err(|_| AsciiError::invalid(format!("resized height {scaled} is too large")))
}

/// Resize an image to `target_width` while keeping its aspect ratio
///
/// Returns a new image with the same pixel layout; the source is untouched.
/// An extreme aspect ratio that would round the height down to zero gets a
/// height of one pixel.
///
/// # Errors
/// `InvalidArgument` if `target_width` is zero, checked before any pixel is
/// read.
pub fn resize(
    image: &DynamicImage,
    target_width: u32,
    filter: ResizeFilter,
) -> Result<DynamicImage> {
    let height = target_height(image.width(), image.height(), target_width)?;
    Ok(image.resize_exact(target_width, height, filter.into()))
}
