/// Basic example: Convert a simple test image to ASCII art
///
/// This creates a test image with some basic shapes and prints it as text
use asciify::{ConversionConfig, process_image};
use image::{Rgb, RgbImage};

fn main() {
    println!("asciify - Basic Example");
    println!("=======================\n");

    // Create a simple 120x60 test image
    let width = 120;
    let height = 60;

    // Horizontal gradient background with a white circle in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 20.0;

    let img = RgbImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - center_x;
        let dy = y as f32 - center_y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist < radius {
            Rgb([255, 255, 255])
        } else if (dist - radius).abs() < 2.0 {
            Rgb([0, 0, 0])
        } else {
            let gray = (x * 255 / width) as u8;
            Rgb([gray, gray / 2, 255 - gray])
        }
    });

    println!("Created test image: {}x{}", width, height);

    let config = ConversionConfig::with_scale(0.5);
    println!("Processing with scale {}\n", config.scale);

    match process_image(&img, &config) {
        Ok(art) => print!("{art}"),
        Err(e) => eprintln!("Conversion failed: {e}"),
    }
}
