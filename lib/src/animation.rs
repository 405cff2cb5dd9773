//! Animated output
//!
//! Rendered canvases become the frames of a looping GIF, each shown for the
//! same duration.

use crate::error::{AsciiError, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode `frames` as an endlessly looping GIF
///
/// # Arguments
/// * `writer` - Destination for the encoded bytes
/// * `frames` - Canvases in display order
/// * `frame_ms` - Display time of every frame in milliseconds
///
/// # Errors
/// `InvalidArgument` for a zero duration or an empty frame list, checked
/// before anything is written.
pub fn encode_gif<W, I>(writer: W, frames: I, frame_ms: u32) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = RgbaImage>,
{
    if frame_ms == 0 {
        return Err(AsciiError::invalid("frame duration must be positive"));
    }
    let mut frames = frames.into_iter().peekable();
    if frames.peek().is_none() {
        return Err(AsciiError::invalid("an animation needs at least one frame"));
    }

    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(frame_ms, 1);
    let mut count = 0usize;
    for canvas in frames {
        encoder.encode_frame(Frame::from_parts(canvas, 0, 0, delay))?;
        count += 1;
    }
    debug!("encoded {count} GIF frames at {frame_ms}ms");
    Ok(())
}

/// Write a looping GIF to `path`
pub fn save_gif<I>(path: &Path, frames: I, frame_ms: u32) -> Result<()>
where
    I: IntoIterator<Item = RgbaImage>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_gif(&mut writer, frames, frame_ms)?;
    writer.flush()?;
    Ok(())
}
