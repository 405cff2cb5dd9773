//! Glyph rasterizers
//!
//! The renderer only needs two things from a font: the size of one glyph
//! cell and a way to draw a single character into a canvas. [`FontGlyphs`]
//! does this with a TrueType/OpenType font, [`BitmapGlyphs`] with built-in
//! 8x8 bitmaps that need no font file at all.

use crate::error::{AsciiError, Result};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::{debug, info};
use std::path::Path;

/// Character whose box sizes every cell
pub const CELL_REFERENCE_GLYPH: char = '@';

/// Pixel size of one rendered character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    width: u32,
    height: u32,
}

impl CellMetrics {
    /// # Errors
    /// `InvalidArgument` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AsciiError::invalid(format!(
                "glyph cell must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Draws single characters into an output canvas
pub trait GlyphRasterizer: Sync {
    /// Nominal size in pixels per em the glyphs were built for
    fn font_size(&self) -> u32;

    /// Box occupied by the densest glyph, shared by every cell
    fn cell_metrics(&self) -> CellMetrics;

    /// Draw `glyph` with its cell's top-left corner at `(x, y)`
    fn draw_glyph(&self, canvas: &mut RgbaImage, glyph: char, x: u32, y: u32, color: Rgba<u8>);
}

/// Glyphs rendered from a scalable font
pub struct FontGlyphs {
    font: FontVec,
    font_size: u32,
    scale: PxScale,
    cell: CellMetrics,
}

impl FontGlyphs {
    /// Parse font data and size it to `font_size` pixels per em
    ///
    /// # Errors
    /// `InvalidArgument` for a zero size, `RenderingUnavailable` if the data
    /// is not a usable font.
    pub fn from_bytes(data: Vec<u8>, font_size: u32) -> Result<Self> {
        if font_size == 0 {
            return Err(AsciiError::invalid("font size must be positive"));
        }
        let font = FontVec::try_from_vec(data)
            .map_err(|e| AsciiError::RenderingUnavailable(format!("invalid font data: {e}")))?;

        // Font size is the em height, the same convention as most imaging
        // libraries. PxScale measures ascent to descent instead.
        let size = font_size as f32;
        let scale = match font.units_per_em() {
            Some(units) if units > 0.0 => PxScale::from(size * font.height_unscaled() / units),
            _ => PxScale::from(size),
        };

        let cell = measure_cell(&font, scale)?;
        debug!(
            "font sized {}px: cell {}x{}",
            font_size,
            cell.width(),
            cell.height()
        );
        Ok(Self {
            font,
            font_size,
            scale,
            cell,
        })
    }

    /// Load a font file
    pub fn load(path: &Path, font_size: u32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            AsciiError::RenderingUnavailable(format!(
                "cannot read font {}: {e}",
                path.display()
            ))
        })?;
        Self::from_bytes(data, font_size)
    }

    /// Load the first usable monospace system font
    ///
    /// Candidates that are missing or fail to parse are skipped.
    pub fn system(font_size: u32) -> Result<Self> {
        if font_size == 0 {
            return Err(AsciiError::invalid("font size must be positive"));
        }
        for candidate in system_font_candidates() {
            let Ok(data) = std::fs::read(candidate) else {
                continue;
            };
            match Self::from_bytes(data, font_size) {
                Ok(glyphs) => {
                    info!("Using system font {candidate}");
                    return Ok(glyphs);
                }
                Err(e) => debug!("Skipping system font {candidate}: {e}"),
            }
        }
        Err(AsciiError::RenderingUnavailable(
            "no monospace system font found (pass a font file explicitly)".to_string(),
        ))
    }
}

impl GlyphRasterizer for FontGlyphs {
    fn font_size(&self) -> u32 {
        self.font_size
    }

    fn cell_metrics(&self) -> CellMetrics {
        self.cell
    }

    fn draw_glyph(&self, canvas: &mut RgbaImage, glyph: char, x: u32, y: u32, color: Rgba<u8>) {
        if glyph.is_whitespace() {
            return;
        }
        let mut buf = [0u8; 4];
        draw_text_mut(
            canvas,
            color,
            x as i32,
            y as i32,
            self.scale,
            &self.font,
            glyph.encode_utf8(&mut buf),
        );
    }
}

/// Right and bottom edges of the reference glyph, placed as it is drawn
fn measure_cell(font: &FontVec, scale: PxScale) -> Result<CellMetrics> {
    let scaled = font.as_scaled(scale);
    let id = scaled.glyph_id(CELL_REFERENCE_GLYPH);

    let (right, bottom) = match font
        .outline_glyph(id.with_scale_and_position(scale, point(0.0, scaled.ascent())))
    {
        Some(outline) => {
            let bounds = outline.px_bounds();
            (bounds.max.x, bounds.max.y)
        }
        None => (scaled.h_advance(id), scaled.height()),
    };

    CellMetrics::new(right.ceil().max(1.0) as u32, bottom.ceil().max(1.0) as u32)
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Menlo.ttc",
            "/System/Library/Fonts/Monaco.ttf",
            "/System/Library/Fonts/Supplemental/Courier New.ttf",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &[
            "C:\\Windows\\Fonts\\consola.ttf",
            "C:\\Windows\\Fonts\\cour.ttf",
            "C:\\Windows\\Fonts\\lucon.ttf",
        ]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
            "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
            "/usr/share/fonts/truetype/noto/NotoSansMono-Regular.ttf",
        ]
    }
}

/// Built-in 8x8 bitmap glyphs, scaled to fill each cell
#[derive(Debug, Clone, Copy)]
pub struct BitmapGlyphs {
    font_size: u32,
    cell: CellMetrics,
}

impl BitmapGlyphs {
    /// Bitmaps stretched over `cell`, reported as `font_size`
    pub fn new(font_size: u32, cell: CellMetrics) -> Self {
        Self { font_size, cell }
    }

    /// Square cells of `font_size` pixels
    pub fn for_font_size(font_size: u32) -> Result<Self> {
        Ok(Self::new(font_size, CellMetrics::new(font_size, font_size)?))
    }
}

impl GlyphRasterizer for BitmapGlyphs {
    fn font_size(&self) -> u32 {
        self.font_size
    }

    fn cell_metrics(&self) -> CellMetrics {
        self.cell
    }

    fn draw_glyph(&self, canvas: &mut RgbaImage, glyph: char, x: u32, y: u32, color: Rgba<u8>) {
        let (cw, ch) = (self.cell.width(), self.cell.height());

        for gy in 0..8 {
            let y0 = y + gy * ch / 8;
            let y1 = y + (gy + 1) * ch / 8;
            if y1 == y0 {
                continue;
            }
            for gx in 0..8 {
                if !should_draw_pixel(glyph, gx, gy) {
                    continue;
                }
                let x0 = x + gx * cw / 8;
                let x1 = x + (gx + 1) * cw / 8;
                if x1 > x0 {
                    let rect = Rect::at(x0 as i32, y0 as i32).of_size(x1 - x0, y1 - y0);
                    draw_filled_rect_mut(canvas, rect, color);
                }
            }
        }
    }
}

/// Whether the bitmap for `ch` is set at `(x, y)` of its 8x8 grid
fn should_draw_pixel(ch: char, x: u32, y: u32) -> bool {
    match ch {
        c if c.is_whitespace() => false,

        '|' => x == 3 || x == 4,

        '-' => y == 3 || y == 4,

        '_' => y == 7,

        '/' => {
            let expected_x = 7 - y;
            x == expected_x || x == expected_x.saturating_sub(1)
        }

        '\\' => x == y || x == y.saturating_sub(1),

        '.' => (3..=4).contains(&x) && (6..=7).contains(&y),

        ',' => ((3..=4).contains(&x) && y >= 6) || (x == 2 && y == 7),

        ':' => (3..=4).contains(&x) && (y == 2 || y == 5),

        ';' => (3..=4).contains(&x) && (y == 2 || y == 5 || y == 6),

        '\'' | '`' => (3..=4).contains(&x) && y <= 2,

        '=' => y == 2 || y == 5,

        '+' => {
            ((x == 3 || x == 4) && (1..=6).contains(&y))
                || ((y == 3 || y == 4) && (1..=6).contains(&x))
        }

        '*' => {
            let inner = (1..=6).contains(&x) && (1..=6).contains(&y);
            inner && ((x == 3 || x == 4) || (y == 3 || y == 4) || x == y || x == 7 - y)
        }

        '#' => (x == 2 || x == 5) || (y == 2 || y == 5),

        '%' => {
            (x + y == 7)
                || ((0..=1).contains(&x) && (0..=1).contains(&y))
                || ((6..=7).contains(&x) && (6..=7).contains(&y))
        }

        '@' => {
            let dx = x as i32 - 3;
            let dy = y as i32 - 3;
            dx * dx + dy * dy <= 12
        }

        _ => true,
    }
}
