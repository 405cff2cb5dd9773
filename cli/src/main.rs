mod convert;

use anyhow::Result;
use asciify::ResizeFilter;
use asciify::config::DEFAULT_FONT_SIZE;
use asciify::ramp::DEFAULT_RAMP;
use clap::{ArgGroup, Parser, ValueEnum, value_parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asciify", version, about = "Asciify given image(s)")]
#[command(group(ArgGroup::new("source").required(true).args(["file", "directory"])))]
pub struct Args {
    /// Path to an image file
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
    /// Directory of images (.png, .jpg, .jpeg)
    #[arg(short = 'd', long)]
    pub directory: Option<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,
    /// Font size of each glyph in pixels
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE, value_parser = value_parser!(u32).range(1..))]
    pub font_size: u32,
    /// Resize width of the original image while keeping its aspect ratio
    #[arg(short, long, value_parser = value_parser!(u32).range(1..))]
    pub resize: Option<u32>,
    /// Resize width of the final output while keeping its aspect ratio
    #[arg(long, value_parser = value_parser!(u32).range(1..))]
    pub resize_final: Option<u32>,
    /// Write a single GIF, showing each image for this many milliseconds
    #[arg(short, long, value_name = "MS", value_parser = value_parser!(u32).range(1..))]
    pub gif: Option<u32>,
    /// Tint glyphs with the source colors
    #[arg(short, long)]
    pub color: bool,
    /// Font file (TTF/OTF), defaults to a monospace system font
    #[arg(long, conflicts_with = "builtin_glyphs")]
    pub font: Option<PathBuf>,
    /// Use the built-in bitmap glyphs instead of a font
    #[arg(long)]
    pub builtin_glyphs: bool,
    /// Characters from darkest to lightest
    #[arg(long, default_value = DEFAULT_RAMP)]
    pub density: String,
    /// Read fully transparent pixels by their RGB values instead of as white
    #[arg(long)]
    pub ignore_alpha: bool,
    /// Resampling filter for both resizes
    #[arg(long, value_enum, default_value = "bilinear")]
    pub filter: FilterChoice,
    /// Worker threads for directory mode (default: one per core)
    #[arg(short, long, value_parser = value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,
    /// Skip images that fail instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterChoice {
    Nearest,
    Bilinear,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<FilterChoice> for ResizeFilter {
    fn from(choice: FilterChoice) -> Self {
        match choice {
            FilterChoice::Nearest => ResizeFilter::Nearest,
            FilterChoice::Bilinear => ResizeFilter::Bilinear,
            FilterChoice::CatmullRom => ResizeFilter::CatmullRom,
            FilterChoice::Gaussian => ResizeFilter::Gaussian,
            FilterChoice::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}

fn main() -> Result<()> {
    // Configure logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    convert::run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["asciify", "-f", "cat.png"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("cat.png")));
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.font_size, 12);
        assert_eq!(args.density, "@%#*+=-:. ");
        assert_eq!(args.filter, FilterChoice::Bilinear);
        assert!(!args.color);
        assert!(args.resize.is_none() && args.resize_final.is_none() && args.gif.is_none());
    }

    #[test]
    fn test_source_required() {
        assert!(Args::try_parse_from(["asciify"]).is_err());
    }

    #[test]
    fn test_file_and_directory_exclusive() {
        assert!(Args::try_parse_from(["asciify", "-f", "a.png", "-d", "frames"]).is_err());
    }

    #[test]
    fn test_positive_values_only() {
        for flag in ["--font-size", "--resize", "--resize-final", "--gif"] {
            assert!(
                Args::try_parse_from(["asciify", "-d", "frames", flag, "0"]).is_err(),
                "{flag} accepted 0"
            );
        }
    }

    #[test]
    fn test_full_command_line() {
        let args = Args::try_parse_from([
            "asciify", "-d", "frames", "-o", "out", "--font-size", "8", "-r", "120",
            "--resize-final", "800", "-g", "100", "-c", "--builtin-glyphs", "--filter",
            "lanczos3", "-j", "2",
        ])
        .unwrap();
        assert_eq!(args.directory, Some(PathBuf::from("frames")));
        assert_eq!(args.resize, Some(120));
        assert_eq!(args.resize_final, Some(800));
        assert_eq!(args.gif, Some(100));
        assert_eq!(args.jobs, Some(2));
        assert!(args.color && args.builtin_glyphs);
        assert_eq!(ResizeFilter::from(args.filter), ResizeFilter::Lanczos3);
    }

    #[test]
    fn test_font_conflicts_with_builtin() {
        let result =
            Args::try_parse_from(["asciify", "-f", "a.png", "--font", "x.ttf", "--builtin-glyphs"]);
        assert!(result.is_err());
    }
}
