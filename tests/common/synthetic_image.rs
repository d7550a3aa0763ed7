use image::{Rgb, RgbImage};

/// Smooth color field with no pure-white pixels, so every white pixel in a
/// projection result is an unfilled gap.
pub fn world_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 200 / width.max(1)) as u8;
        let g = (y * 200 / height.max(1)) as u8;
        let b = ((x + y) % 97) as u8 + 40;
        Rgb([r, g, b])
    })
}
