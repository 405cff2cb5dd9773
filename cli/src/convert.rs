use crate::Args;
use anyhow::{Context, Result, bail};
use asciify::animation::save_gif;
use asciify::render::normalize_pixels;
use asciify::{
    BitmapGlyphs, DensityRamp, FontGlyphs, GlyphRasterizer, Pipeline, RenderConfig,
    TransparencyPolicy, convert_all,
};
use image::{DynamicImage, RgbaImage};
use log::{info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub fn run(args: &Args) -> Result<()> {
    if !args.output_dir.is_dir() {
        bail!("{} is not a valid output directory", args.output_dir.display());
    }
    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs as usize)
            .build_global()
            .context("failed to start worker threads")?;
    }

    let paths = match (&args.file, &args.directory) {
        (Some(file), _) => vec![file.clone()],
        (None, Some(dir)) => list_images(dir)?,
        (None, None) => bail!("either a file or a directory is required"),
    };
    if paths.is_empty() {
        info!(
            "No images were found in {}.",
            args.directory.as_deref().unwrap_or(Path::new(".")).display()
        );
        return Ok(());
    }

    let config = render_config(args)?;
    let glyphs = load_glyphs(args)?;
    let pipeline = build_pipeline(args, config)?;

    let (paths, images) = load_images(paths, args.keep_going)?;

    info!("Converting images...");
    let results = convert_all(&pipeline, &*glyphs, &images);
    let canvases = converted(&paths, results, args.keep_going)?;

    if let Some(frame_ms) = args.gif {
        if canvases.is_empty() {
            bail!("no frames were converted, nothing to animate");
        }
        let output = args.output_dir.join("output.gif");
        save_gif(&output, canvases, frame_ms)
            .with_context(|| format!("failed to write {}", output.display()))?;
        info!("Animation written to {}", output.display());
    } else {
        for (index, canvas) in canvases.iter().enumerate() {
            let output = args.output_dir.join(format!("output{index}.png"));
            canvas
                .save(&output)
                .with_context(|| format!("failed to save {}", output.display()))?;
            info!("Processed image #{index}...");
        }
    }

    info!("Process completed.");
    Ok(())
}

/// Successful canvases in input order, dropping failures when `keep_going` is set
fn converted(
    paths: &[PathBuf],
    results: Vec<asciify::Result<RgbaImage>>,
    keep_going: bool,
) -> Result<Vec<RgbaImage>> {
    let mut canvases = Vec::with_capacity(results.len());
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(canvas) => canvases.push(canvas),
            Err(e) if keep_going => warn!("Skipping {}: {e}", path.display()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to convert {}", path.display()));
            }
        }
    }
    Ok(canvases)
}

fn render_config(args: &Args) -> Result<RenderConfig> {
    let ramp = DensityRamp::new(&args.density).context("invalid --density")?;
    let transparency = if args.ignore_alpha {
        TransparencyPolicy::Ignore
    } else {
        TransparencyPolicy::White
    };
    Ok(RenderConfig {
        font_size: args.font_size,
        colored: args.color,
        ramp,
        transparency,
        ..Default::default()
    })
}

fn load_glyphs(args: &Args) -> Result<Box<dyn GlyphRasterizer>> {
    let glyphs: Box<dyn GlyphRasterizer> = if args.builtin_glyphs {
        Box::new(BitmapGlyphs::for_font_size(args.font_size)?)
    } else if let Some(path) = &args.font {
        Box::new(
            FontGlyphs::load(path, args.font_size)
                .with_context(|| format!("failed to load font {}", path.display()))?,
        )
    } else {
        Box::new(
            FontGlyphs::system(args.font_size)
                .context("no usable font (use --font or --builtin-glyphs)")?,
        )
    };
    Ok(glyphs)
}

fn build_pipeline(args: &Args, config: RenderConfig) -> Result<Pipeline> {
    let mut pipeline = Pipeline::new(config)?.with_filter(args.filter.into());
    if let Some(width) = args.resize {
        pipeline = pipeline.resize_before(width);
    }
    if let Some(width) = args.resize_final {
        pipeline = pipeline.resize_after(width);
    }
    Ok(pipeline)
}

/// Decode every path, dropping unreadable ones when `keep_going` is set
fn load_images(
    paths: Vec<PathBuf>,
    keep_going: bool,
) -> Result<(Vec<PathBuf>, Vec<DynamicImage>)> {
    let mut kept = Vec::with_capacity(paths.len());
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        match image::open(&path) {
            Ok(image) => {
                images.push(normalize_pixels(image));
                kept.push(path);
            }
            Err(e) if keep_going => warn!("Skipping {}: {e}", path.display()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to open image {}", path.display()));
            }
        }
    }
    Ok((kept, images))
}

/// Image files directly inside `dir`, sorted by path
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let mut entries: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_image_extension(path))
        .collect();
    entries.sort();
    Ok(entries)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{AnimationDecoder, Rgba, RgbaImage};
    use std::fs;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_fn(width, height, |x, _| Rgba([(x * 40) as u8, 80, 160, 255]))
            .save(path)
            .unwrap();
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("asciify").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_list_images_flat_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("b.png"), 2, 2);
        write_png(&dir.path().join("a.png"), 2, 2);
        fs::write(dir.path().join("c.JPG"), b"not really").unwrap();
        fs::write(dir.path().join("notes.txt"), b"skip").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_png(&dir.path().join("nested").join("d.png"), 2, 2);

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.JPG"]);
    }

    #[test]
    fn test_list_images_requires_directory() {
        assert!(list_images(Path::new("/nonexistent/frames")).is_err());
    }

    #[test]
    fn test_single_file_with_builtin_glyphs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        write_png(&input, 5, 3);
        let out = dir.path().to_str().unwrap();

        let args = parse(&[
            "-f", input.to_str().unwrap(), "-o", out, "--builtin-glyphs", "--font-size", "4",
        ]);
        run(&args).unwrap();

        let output = image::open(dir.path().join("output0.png")).unwrap();
        assert_eq!((output.width(), output.height()), (20, 12));
    }

    #[test]
    fn test_directory_to_gif_with_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        fs::create_dir(&frames).unwrap();
        for name in ["0.png", "1.png", "2.png"] {
            write_png(&frames.join(name), 40, 20);
        }
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let args = parse(&[
            "-d", frames.to_str().unwrap(), "-o", out.to_str().unwrap(), "--builtin-glyphs",
            "--font-size", "3", "-r", "10", "--resize-final", "15", "-g", "50", "-c",
        ]);
        run(&args).unwrap();

        // 40x20 -> 10x5 -> 30x15 canvas -> 15x7
        let file = fs::File::open(out.join("output.gif")).unwrap();
        let decoder = image::codecs::gif::GifDecoder::new(std::io::BufReader::new(file)).unwrap();
        let decoded = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].buffer().dimensions(), (15, 7));
        assert!(!out.join("output0.png").exists());
    }

    #[test]
    fn test_bad_image_fails_unless_keep_going() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        fs::create_dir(&frames).unwrap();
        write_png(&frames.join("a.png"), 2, 2);
        fs::write(frames.join("b.png"), b"garbage").unwrap();
        let out = dir.path().to_str().unwrap();
        let source = frames.to_str().unwrap();

        let strict = parse(&["-d", source, "-o", out, "--builtin-glyphs"]);
        assert!(run(&strict).is_err());

        let lenient = parse(&["-d", source, "-o", out, "--builtin-glyphs", "--keep-going"]);
        run(&lenient).unwrap();
        assert!(dir.path().join("output0.png").exists());
        assert!(!dir.path().join("output1.png").exists());
    }

    #[test]
    fn test_failed_conversions_leave_no_gaps() {
        let paths: Vec<PathBuf> = ["a.png", "b.png", "c.png"].iter().map(PathBuf::from).collect();
        let results = || {
            vec![
                Ok(RgbaImage::new(1, 1)),
                Err(asciify::AsciiError::InvalidArgument("broken".to_string())),
                Ok(RgbaImage::new(2, 2)),
            ]
        };

        assert!(converted(&paths, results(), false).is_err());

        let canvases = converted(&paths, results(), true).unwrap();
        let sizes: Vec<(u32, u32)> = canvases.iter().map(|c| c.dimensions()).collect();
        assert_eq!(sizes, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().to_str().unwrap();
        run(&parse(&["-d", source, "-o", source, "--builtin-glyphs"])).unwrap();
    }

    #[test]
    fn test_missing_output_dir() {
        let args = parse(&["-f", "in.png", "-o", "/nonexistent/out", "--builtin-glyphs"]);
        assert!(run(&args).is_err());
    }
}
