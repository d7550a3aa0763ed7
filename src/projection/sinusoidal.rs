//! Forward (scatter) sinusoidal mapping of a single gore.
//!
//! Every gore is treated in its own local frame: its columns span the full
//! longitude range `[-pi, pi)` regardless of how wide a slice of the source
//! it was cut from. Rows keep their index; only columns move.

use std::f64::consts::PI;

use image::{Rgb, RgbImage};

/// Placeholder for destination pixels that no source pixel reached.
pub const EMPTY_PIXEL: Rgb<u8> = Rgb([u8::MAX; 3]);

/// Returns true if `pixel` holds the empty (pure white) value.
#[inline]
pub fn is_empty(pixel: &Rgb<u8>) -> bool {
    pixel.0.iter().all(|&c| c == u8::MAX)
}

/// Latitude in radians for row `y` of an image `height` rows tall.
///
/// Row 0 maps to `-pi/2`; the last row approaches `+pi/2`.
#[inline]
pub fn row_latitude(y: u32, height: u32) -> f64 {
    PI * (y as f64 / height as f64 - 0.5)
}

/// Longitude in radians for column `x` of an image `width` columns wide.
///
/// Column 0 maps to `-pi`; the last column approaches `+pi`.
#[inline]
pub fn column_longitude(x: u32, width: u32) -> f64 {
    2.0 * PI * (x as f64 / width as f64 - 0.5)
}

/// Destination column for a source pixel at `(lon, lat)`, or `None` when it
/// falls outside `[0, width)`.
#[inline]
pub fn sinusoidal_column(lon: f64, lat: f64, width: u32) -> Option<u32> {
    let x_sinu = lon * lat.cos();
    let mapped = ((x_sinu + PI) / (2.0 * PI) * width as f64).floor();
    if mapped >= 0.0 && mapped < width as f64 {
        Some(mapped as u32)
    } else {
        None
    }
}

/// Scatters every source pixel to its sinusoidal column on the same row.
///
/// Columns are visited left to right, so when several source pixels land on
/// the same destination the rightmost one wins. Destinations nobody writes to
/// keep [`EMPTY_PIXEL`].
pub fn sinusoidal_scatter(source: &RgbImage) -> RgbImage {
    let (width, height) = source.dimensions();
    let mut out = RgbImage::from_pixel(width, height, EMPTY_PIXEL);

    for y in 0..height {
        let lat = row_latitude(y, height);
        for x in 0..width {
            let lon = column_longitude(x, width);
            if let Some(x_mapped) = sinusoidal_column(lon, lat, width) {
                out.put_pixel(x_mapped, y, *source.get_pixel(x, y));
            }
        }
    }

    out
}
