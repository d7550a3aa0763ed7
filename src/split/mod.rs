//! Splitting a source image into equal-angle vertical gores.

mod layout;

pub use layout::{GoreLayout, GoreRange, DEFAULT_DEGREE_STEP, FULL_TURN_DEG};

use image::{imageops, RgbImage};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while splitting an image into gores.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid degree step {0}: must be between 1 and 360")]
    InvalidDegreeStep(u32),
    #[error("Degree step {degree_step} gives zero-width gores for a {width}px wide image")]
    ZeroGoreWidth { width: u32, degree_step: u32 },
    #[error("Source image is empty: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// A vertical slice of the source image.
#[derive(Debug, Clone)]
pub struct Gore {
    /// Where the slice sits in the source.
    pub range: GoreRange,
    /// Pixels of the slice, full source height.
    pub image: RgbImage,
}

impl Gore {
    /// 1-based position of the gore, left to right.
    pub fn index(&self) -> usize {
        self.range.index
    }
}

/// Cuts `source` into `360 / degree_step` gores covering its full width.
pub fn split_into_gores(source: &RgbImage, degree_step: u32) -> Result<Vec<Gore>, SplitError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(SplitError::EmptyImage { width, height });
    }

    let layout = GoreLayout::new(width, degree_step)?;
    debug!(
        gore_count = layout.gore_count,
        gore_width = layout.gore_width,
        "split layout"
    );

    let gores = layout
        .ranges()
        .into_iter()
        .map(|range| {
            let image = imageops::crop_imm(source, range.x_start, 0, range.width(), height)
                .to_image();
            Gore { range, image }
        })
        .collect();

    Ok(gores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_split_red_into_four() {
        let source = RgbImage::from_pixel(360, 180, Rgb([255, 0, 0]));
        let gores = split_into_gores(&source, 90).unwrap();
        assert_eq!(gores.len(), 4);
        for (i, gore) in gores.iter().enumerate() {
            assert_eq!(gore.index(), i + 1);
            assert_eq!(gore.image.dimensions(), (90, 180));
        }
    }

    #[test]
    fn test_split_copies_pixels() {
        let source = RgbImage::from_fn(37, 4, |x, y| Rgb([x as u8, y as u8, 0]));
        let gores = split_into_gores(&source, 40).unwrap();
        for gore in &gores {
            for (x, y, pixel) in gore.image.enumerate_pixels() {
                assert_eq!(pixel, source.get_pixel(gore.range.x_start + x, y));
            }
        }
    }

    #[test]
    fn test_split_narrow_image_fails() {
        let source = RgbImage::new(10, 10);
        let err = split_into_gores(&source, 20).unwrap_err();
        assert!(matches!(err, SplitError::ZeroGoreWidth { .. }));
    }

    #[test]
    fn test_split_empty_image_fails() {
        let source = RgbImage::new(0, 10);
        let err = split_into_gores(&source, 20).unwrap_err();
        assert!(matches!(err, SplitError::EmptyImage { width: 0, height: 10 }));
    }
}
