//! Pixel and angular layout of gores across a source image.

use serde::{Deserialize, Serialize};

use super::SplitError;

/// Full turn in degrees.
pub const FULL_TURN_DEG: u32 = 360;

/// Default angular width of a gore, in degrees.
pub const DEFAULT_DEGREE_STEP: u32 = 20;

/// Column and longitude range covered by one gore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoreRange {
    /// 1-based gore index.
    pub index: usize,
    /// First source column (inclusive).
    pub x_start: u32,
    /// Last source column (exclusive).
    pub x_end: u32,
    /// Starting longitude in degrees, measured from the left edge.
    pub lon_start_deg: u32,
    /// Ending longitude in degrees (exclusive).
    pub lon_end_deg: u32,
}

impl GoreRange {
    /// Width of the gore in pixels.
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }
}

/// How a source image of a given width is cut into gores.
///
/// `gore_count = 360 / degree_step` and every gore is
/// `width * degree_step / 360` pixels wide, except the last one which
/// runs to the right edge and absorbs the rounding remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoreLayout {
    pub source_width: u32,
    pub degree_step: u32,
    pub gore_count: u32,
    pub gore_width: u32,
}

impl GoreLayout {
    /// Computes the layout for `source_width` columns and `degree_step` degrees per gore.
    pub fn new(source_width: u32, degree_step: u32) -> Result<Self, SplitError> {
        if degree_step == 0 || degree_step > FULL_TURN_DEG {
            return Err(SplitError::InvalidDegreeStep(degree_step));
        }
        let gore_count = FULL_TURN_DEG / degree_step;
        let gore_width =
            (source_width as u64 * degree_step as u64 / FULL_TURN_DEG as u64) as u32;
        if gore_width == 0 {
            return Err(SplitError::ZeroGoreWidth {
                width: source_width,
                degree_step,
            });
        }

        Ok(Self {
            source_width,
            degree_step,
            gore_count,
            gore_width,
        })
    }

    /// Width of the last gore, including the rounding remainder.
    pub fn last_gore_width(&self) -> u32 {
        self.source_width - (self.gore_count - 1) * self.gore_width
    }

    /// Ranges of all gores, left to right.
    pub fn ranges(&self) -> Vec<GoreRange> {
        (0..self.gore_count)
            .map(|i| {
                let last = i + 1 == self.gore_count;
                let x_start = i * self.gore_width;
                GoreRange {
                    index: i as usize + 1,
                    x_start,
                    x_end: if last { self.source_width } else { x_start + self.gore_width },
                    lon_start_deg: i * self.degree_step,
                    lon_end_deg: if last { FULL_TURN_DEG } else { (i + 1) * self.degree_step },
                }
            })
            .collect()
    }
}
