//! Gap-repair configuration for the sinusoidal projector.

use serde::{Deserialize, Serialize};

/// Rows above and below the center row that receive gap repair.
pub const DEFAULT_BAND_ROWS: u32 = 2;

/// Columns searched on either side of a gap when averaging neighbors.
pub const DEFAULT_WINDOW_RADIUS: u32 = 5;

/// Parameters for the equator-band gap repair.
///
/// The band covers `center_row - band_rows ..= center_row + band_rows`,
/// clipped to the image, where `center_row = height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Half-height of the repaired band, in rows.
    pub band_rows: u32,
    /// Half-width of the horizontal neighbor window, in columns.
    pub window_radius: u32,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            band_rows: DEFAULT_BAND_ROWS,
            window_radius: DEFAULT_WINDOW_RADIUS,
        }
    }
}

impl RepairConfig {
    /// Returns the half-open row range `[start, end)` repaired for an image of `height` rows.
    pub fn band(&self, height: u32) -> (u32, u32) {
        let center = height / 2;
        let start = center.saturating_sub(self.band_rows);
        let end = center
            .saturating_add(self.band_rows)
            .saturating_add(1)
            .min(height);
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band_is_five_rows() {
        let config = RepairConfig::default();
        assert_eq!(config.band(180), (88, 93));
    }

    #[test]
    fn test_band_clipped_to_small_images() {
        let config = RepairConfig::default();
        assert_eq!(config.band(3), (0, 3));
        assert_eq!(config.band(1), (0, 1));
        assert_eq!(config.band(0), (0, 0));
    }
}
