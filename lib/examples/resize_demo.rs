use asciify::{BitmapGlyphs, Pipeline, RenderConfig};
use image::{DynamicImage, Rgba, RgbaImage};

fn main() {
    println!("asciify - Resize Demo");
    println!("=====================\n");

    let test_cases = vec![
        (100, 100, "100x100 square"),
        (127, 85, "127x85 landscape"),
        (1920, 1080, "1920x1080 (Full HD)"),
        (1000, 3, "1000x3 (height rounds to zero)"),
    ];

    let glyphs = BitmapGlyphs::for_font_size(12).expect("valid glyph size");
    let pipeline = Pipeline::new(RenderConfig::default())
        .expect("valid config")
        .resize_before(64)
        .resize_after(640);

    println!("Stages:");
    for stage in pipeline.stages() {
        println!("  - {}", stage);
    }
    println!();

    for (width, height, description) in test_cases {
        println!("Testing: {}", description);

        let mut img = RgbaImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let gray = ((x + y) % 256) as u8;
                img.put_pixel(x, y, Rgba([gray, gray, gray, 255]));
            }
        }

        let output = pipeline
            .run(&DynamicImage::ImageRgba8(img), &glyphs)
            .expect("conversion failed");
        let (out_w, out_h) = output.dimensions();

        println!("  Input:  {}x{}", width, height);
        println!("  Output: {}x{}", out_w, out_h);
        println!();
    }

    println!("Sources are shrunk to 64 glyphs across, rendered, then scaled to 640px wide.");
}
