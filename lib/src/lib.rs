//! asciify - render images as text glyph art
//!
//! Every source pixel is reduced to a luminosity, mapped onto a density ramp
//! of characters (darkest first) and the chosen character is drawn back into
//! a new image, one fixed-size glyph cell per pixel. Glyphs are black or
//! tinted with the source color.
//!
//! # Example
//! ```no_run
//! use asciify::{FontGlyphs, Pipeline, RenderConfig, render::normalize_pixels};
//!
//! let input = normalize_pixels(image::open("photo.png").unwrap());
//! let config = RenderConfig::default();
//! let glyphs = FontGlyphs::system(config.font_size).unwrap();
//! let pipeline = Pipeline::new(config).unwrap().resize_before(120);
//! let output = pipeline.run(&input, &glyphs).unwrap();
//! output.save("ascii_art.png").unwrap();
//! ```

pub mod animation;
pub mod batch;
pub mod config;
pub mod error;
pub mod glyph;
pub mod luminance;
pub mod pipeline;
pub mod ramp;
pub mod render;
pub mod resize;

// Re-export main types for convenience
pub use batch::convert_all;
pub use config::{RenderConfig, TransparencyPolicy};
pub use error::{AsciiError, Result};
pub use glyph::{BitmapGlyphs, CellMetrics, FontGlyphs, GlyphRasterizer};
pub use pipeline::{Pipeline, Stage};
pub use ramp::DensityRamp;
pub use render::render;
pub use resize::{ResizeFilter, resize};
