//! Gap repair for the rows around the equator.
//!
//! Rounding in the scatter step leaves isolated empty columns even where
//! `cos(lat)` is close to one. Only a narrow band around the center row is
//! repaired; gaps elsewhere are part of the gore taper.

use image::{Rgb, RgbImage};

use super::config::RepairConfig;
use super::sinusoidal::is_empty;

/// Fills empty pixels in the equator band from their horizontal neighbors.
///
/// Rows are visited top to bottom and columns left to right, updating in
/// place, so a pixel filled earlier counts as a neighbor for later gaps.
/// Each gap takes the per-channel mean (truncated) of every non-empty pixel
/// within `window_radius` columns. When the window holds nothing, the left
/// neighbor and then the right neighbor are tried.
///
/// Returns the number of pixels that were filled.
pub fn repair_equator_band(image: &mut RgbImage, config: &RepairConfig) -> usize {
    let (width, height) = image.dimensions();
    let (start, end) = config.band(height);
    let radius = config.window_radius;
    let mut filled = 0;

    for y in start..end {
        for x in 0..width {
            if !is_empty(image.get_pixel(x, y)) {
                continue;
            }

            let lo = x.saturating_sub(radius);
            let hi = x.saturating_add(radius).min(width - 1);
            let fill = window_mean(image, y, lo, hi).or_else(|| adjacent_pixel(image, x, y));

            if let Some(pixel) = fill {
                image.put_pixel(x, y, pixel);
                filled += 1;
            }
        }
    }

    filled
}

/// Mean of the non-empty pixels in columns `lo..=hi` of row `y`.
fn window_mean(image: &RgbImage, y: u32, lo: u32, hi: u32) -> Option<Rgb<u8>> {
    let mut sum = [0u32; 3];
    let mut count = 0u32;

    for nx in lo..=hi {
        let pixel = image.get_pixel(nx, y);
        if is_empty(pixel) {
            continue;
        }
        for (acc, &c) in sum.iter_mut().zip(pixel.0.iter()) {
            *acc += c as u32;
        }
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some(Rgb(sum.map(|s| (s / count) as u8)))
}

fn adjacent_pixel(image: &RgbImage, x: u32, y: u32) -> Option<Rgb<u8>> {
    let width = image.width();
    if x > 0 {
        let left = image.get_pixel(x - 1, y);
        if !is_empty(left) {
            return Some(*left);
        }
    }
    if x + 1 < width {
        let right = image.get_pixel(x + 1, y);
        if !is_empty(right) {
            return Some(*right);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::sinusoidal::EMPTY_PIXEL;

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, EMPTY_PIXEL)
    }

    #[test]
    fn test_gap_takes_window_mean() {
        let mut img = blank(11, 5);
        img.put_pixel(3, 2, Rgb([10, 20, 30]));
        img.put_pixel(7, 2, Rgb([21, 40, 61]));

        repair_equator_band(&mut img, &RepairConfig::default());

        // Column 0 only sees column 3 within its window.
        assert_eq!(*img.get_pixel(0, 2), Rgb([10, 20, 30]));
        // Column 5 sees both seeded pixels plus the already-filled columns to its left.
        assert!(!is_empty(img.get_pixel(5, 2)));
    }

    #[test]
    fn test_mean_is_truncated() {
        let mut img = blank(3, 1);
        img.put_pixel(0, 0, Rgb([0, 1, 2]));
        img.put_pixel(2, 0, Rgb([1, 2, 5]));

        let filled = repair_equator_band(&mut img, &RepairConfig::default());

        assert_eq!(filled, 1);
        assert_eq!(*img.get_pixel(1, 0), Rgb([0, 1, 3]));
    }

    #[test]
    fn test_rows_outside_band_untouched() {
        let mut img = RgbImage::from_pixel(8, 20, Rgb([5, 5, 5]));
        img.put_pixel(4, 0, EMPTY_PIXEL);
        img.put_pixel(4, 10, EMPTY_PIXEL);
        img.put_pixel(4, 19, EMPTY_PIXEL);

        let filled = repair_equator_band(&mut img, &RepairConfig::default());

        assert_eq!(filled, 1);
        assert!(is_empty(img.get_pixel(4, 0)));
        assert_eq!(*img.get_pixel(4, 10), Rgb([5, 5, 5]));
        assert!(is_empty(img.get_pixel(4, 19)));
    }

    #[test]
    fn test_adjacent_fallback_with_zero_radius() {
        let config = RepairConfig {
            band_rows: 0,
            window_radius: 0,
        };
        let mut img = blank(4, 1);
        img.put_pixel(3, 0, Rgb([9, 8, 7]));

        repair_equator_band(&mut img, &config);

        // Column 2 copies its right neighbor; columns 0 and 1 have none when visited.
        assert!(is_empty(img.get_pixel(0, 0)));
        assert!(is_empty(img.get_pixel(1, 0)));
        assert_eq!(*img.get_pixel(2, 0), Rgb([9, 8, 7]));
    }

    #[test]
    fn test_fully_empty_row_stays_empty() {
        let mut img = blank(12, 5);
        let filled = repair_equator_band(&mut img, &RepairConfig::default());
        assert_eq!(filled, 0);
        assert!(img.pixels().all(is_empty));
    }

    #[test]
    fn test_zero_width_image_is_noop() {
        let mut img = blank(0, 5);
        assert_eq!(repair_equator_band(&mut img, &RepairConfig::default()), 0);
    }
}
