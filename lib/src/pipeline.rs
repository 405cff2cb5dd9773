//! Conversion pipeline
//!
//! A render is the one mandatory stage. Resizes may run before it, to
//! shrink the source (fewer pixels means fewer glyphs), or after it, to
//! scale the finished canvas.

use crate::config::RenderConfig;
use crate::error::{AsciiError, Result};
use crate::glyph::GlyphRasterizer;
use crate::render::render;
use crate::resize::{ResizeFilter, resize};
use image::{DynamicImage, RgbaImage};
use log::debug;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Aspect-preserving resize to a width in pixels
    Resize { width: u32, filter: ResizeFilter },
    /// Glyph rendering
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Resize { width, .. } => write!(f, "resize to {width}px"),
            Stage::Render => write!(f, "render"),
        }
    }
}

/// Ordered stages around a single render
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RenderConfig,
    stages: Vec<Stage>,
    filter: ResizeFilter,
}

impl Pipeline {
    /// # Errors
    /// `InvalidArgument` if `config` does not validate.
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stages: vec![Stage::Render],
            filter: ResizeFilter::default(),
        })
    }

    /// Filter for resize stages added after this call
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Resize the source to `width` before rendering
    pub fn resize_before(mut self, width: u32) -> Self {
        let render_at = self
            .stages
            .iter()
            .position(|stage| *stage == Stage::Render)
            .unwrap_or(self.stages.len());
        self.stages.insert(
            render_at,
            Stage::Resize {
                width,
                filter: self.filter,
            },
        );
        self
    }

    /// Resize the rendered canvas to `width`
    pub fn resize_after(mut self, width: u32) -> Self {
        self.stages.push(Stage::Resize {
            width,
            filter: self.filter,
        });
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Checks every stage without touching pixels
    pub fn validate(&self) -> Result<()> {
        for stage in &self.stages {
            if let Stage::Resize { width: 0, .. } = stage {
                return Err(AsciiError::Stage {
                    stage: stage.to_string(),
                    source: Box::new(AsciiError::invalid("target width must be positive")),
                });
            }
        }
        Ok(())
    }

    /// Runs all stages in order on `image`
    ///
    /// # Errors
    /// The first failing stage, wrapped in [`AsciiError::Stage`]. Nothing is
    /// returned for a partially converted image.
    pub fn run<G>(&self, image: &DynamicImage, glyphs: &G) -> Result<RgbaImage>
    where
        G: GlyphRasterizer + ?Sized,
    {
        self.validate()?;

        let mut current: Option<DynamicImage> = None;
        for stage in &self.stages {
            let input = current.as_ref().unwrap_or(image);
            debug!(
                "{stage}: input {}x{}",
                input.width(),
                input.height()
            );
            let output = self.apply(*stage, input, glyphs).map_err(|e| AsciiError::Stage {
                stage: stage.to_string(),
                source: Box::new(e),
            })?;
            current = Some(output);
        }

        Ok(current.unwrap_or_else(|| image.clone()).into_rgba8())
    }

    fn apply<G>(&self, stage: Stage, input: &DynamicImage, glyphs: &G) -> Result<DynamicImage>
    where
        G: GlyphRasterizer + ?Sized,
    {
        match stage {
            Stage::Resize { width, filter } => resize(input, width, filter),
            Stage::Render => render(input, glyphs, &self.config).map(DynamicImage::ImageRgba8),
        }
    }
}
