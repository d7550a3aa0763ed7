//! Reassembling gores side by side into one image.

use image::{imageops, RgbImage};
use thiserror::Error;

/// Errors that can occur while merging gores.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No gores to merge")]
    NoGores,
}

/// Pastes `gores` left to right at cumulative x offsets.
///
/// The result is as wide as all gores together and as tall as the tallest
/// one; rows a shorter gore does not reach stay black.
pub fn merge_gores(gores: &[RgbImage]) -> Result<RgbImage, MergeError> {
    if gores.is_empty() {
        return Err(MergeError::NoGores);
    }

    let total_width: u32 = gores.iter().map(RgbImage::width).sum();
    let max_height = gores.iter().map(RgbImage::height).max().unwrap_or(0);

    let mut merged = RgbImage::new(total_width, max_height);
    let mut x_offset: i64 = 0;
    for gore in gores {
        imageops::replace(&mut merged, gore, x_offset, 0);
        x_offset += gore.width() as i64;
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::split_into_gores;
    use image::Rgb;

    #[test]
    fn test_merge_empty_fails() {
        assert!(matches!(merge_gores(&[]), Err(MergeError::NoGores)));
    }

    #[test]
    fn test_split_merge_roundtrip() {
        let source = RgbImage::from_fn(101, 23, |x, y| {
            Rgb([(x * 2) as u8, (y * 11) as u8, (x * y % 256) as u8])
        });
        let gores: Vec<RgbImage> = split_into_gores(&source, 30)
            .unwrap()
            .into_iter()
            .map(|g| g.image)
            .collect();
        let merged = merge_gores(&gores).unwrap();
        assert_eq!(merged.dimensions(), source.dimensions());
        assert_eq!(merged.as_raw(), source.as_raw());
    }

    #[test]
    fn test_merge_uneven_heights() {
        let tall = RgbImage::from_pixel(3, 5, Rgb([1, 2, 3]));
        let short = RgbImage::from_pixel(2, 2, Rgb([4, 5, 6]));
        let merged = merge_gores(&[tall, short]).unwrap();

        assert_eq!(merged.dimensions(), (5, 5));
        assert_eq!(*merged.get_pixel(0, 4), Rgb([1, 2, 3]));
        assert_eq!(*merged.get_pixel(3, 1), Rgb([4, 5, 6]));
        assert_eq!(*merged.get_pixel(4, 4), Rgb([0, 0, 0]));
    }
}
