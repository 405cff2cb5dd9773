use crate::error::Result;
use crate::glyph::GlyphRasterizer;
use crate::pipeline::Pipeline;
use image::{DynamicImage, RgbaImage};
use log::{debug, warn};
use rayon::prelude::*;

/// Converts independent images in parallel
///
/// Images are spread over the rayon thread pool, one image per task; each
/// image is still rendered by a single sequential scan, so its output does
/// not depend on scheduling. Results come back in input order, one per
/// image. Whether a failure aborts the batch is up to the caller.
pub fn convert_all<G>(
    pipeline: &Pipeline,
    glyphs: &G,
    images: &[DynamicImage],
) -> Vec<Result<RgbaImage>>
where
    G: GlyphRasterizer + ?Sized,
{
    debug!(
        "converting {} images on {} threads",
        images.len(),
        rayon::current_num_threads()
    );

    images
        .par_iter()
        .enumerate()
        .map(|(index, image)| {
            let result = pipeline.run(image, glyphs);
            if let Err(e) = &result {
                warn!("image #{index} failed: {e}");
            }
            result
        })
        .collect()
}
