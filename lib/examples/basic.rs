/// Basic example: Convert a simple test image to glyph art
///
/// This creates a test image with some basic shapes and renders it twice,
/// once in black ink and once with source colors, using the built-in
/// bitmap glyphs so no font file is needed.
use asciify::{BitmapGlyphs, Pipeline, RenderConfig};
use image::{DynamicImage, Rgba, RgbaImage};

fn main() {
    println!("asciify - Basic Example");
    println!("=======================\n");

    // 80x60 test image: one glyph per pixel
    let width = 80;
    let height = 60;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([100, 100, 100, 255]));

    // White circle with a black rim in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 20.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            } else if (dist - radius).abs() < 3.0 {
                img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
    }

    // Red diagonal and a transparent corner
    for i in 0..height {
        img.put_pixel(i, i, Rgba([255, 0, 0, 255]));
    }
    for y in 0..10 {
        for x in 0..10 {
            img.put_pixel(width - 1 - x, y, Rgba([0, 0, 0, 0]));
        }
    }

    println!("Created test image: {}x{}", width, height);

    let font_size = 8;
    let glyphs = BitmapGlyphs::for_font_size(font_size).expect("valid glyph size");
    let source = DynamicImage::ImageRgba8(img);

    for colored in [false, true] {
        let config = RenderConfig {
            font_size,
            colored,
            ..Default::default()
        };
        println!("Rendering with ramp \"{}\", colored: {}", config.ramp, colored);

        let pipeline = Pipeline::new(config).expect("valid config");
        let output = pipeline.run(&source, &glyphs).expect("render failed");
        let name = if colored { "basic_colored.png" } else { "basic_output.png" };
        output.save(name).expect("Failed to save output");
        println!("✓ Saved {}x{} output to: {}", output.width(), output.height(), name);
    }

    source.save("basic_input.png").expect("Failed to save input");
    println!("✓ Saved input to:  basic_input.png");
}
