use image::ColorType;
use thiserror::Error;

/// Errors produced while converting an image to glyph art
#[derive(Error, Debug)]
pub enum AsciiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported pixel format {0:?}, expected RGB8 or RGBA8")]
    UnsupportedPixelFormat(ColorType),
    #[error("glyph rendering unavailable: {0}")]
    RenderingUnavailable(String),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{stage} failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: Box<AsciiError>,
    },
}

impl AsciiError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The innermost error, skipping pipeline stage context
    pub fn root(&self) -> &AsciiError {
        match self {
            AsciiError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, AsciiError>;
