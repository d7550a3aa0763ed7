//! Sinusoidal projection of individual gores.
//!
//! A gore is first scattered along `x * cos(lat)` and then the rows around
//! the equator are patched where rounding left holes.

mod config;
mod repair;
mod sinusoidal;

pub use config::{RepairConfig, DEFAULT_BAND_ROWS, DEFAULT_WINDOW_RADIUS};
pub use repair::repair_equator_band;
pub use sinusoidal::{
    column_longitude, is_empty, row_latitude, sinusoidal_column, sinusoidal_scatter, EMPTY_PIXEL,
};

use std::borrow::Borrow;

use image::RgbImage;
use rayon::prelude::*;
use tracing::debug;

/// Projects a single gore. The input is left untouched and the output has
/// the same dimensions.
pub fn project_gore(gore: &RgbImage, config: &RepairConfig) -> RgbImage {
    let mut out = sinusoidal_scatter(gore);
    let filled = repair_equator_band(&mut out, config);
    debug!(
        width = gore.width(),
        height = gore.height(),
        filled,
        "projected gore"
    );
    out
}

/// Projects every gore, returning results in input order.
///
/// With `parallel` set the gores are spread over the rayon pool; the output
/// is identical to the sequential path since gores share no state.
pub fn project_gores<G>(gores: &[G], config: &RepairConfig, parallel: bool) -> Vec<RgbImage>
where
    G: Borrow<RgbImage> + Sync,
{
    if parallel {
        gores
            .par_iter()
            .map(|g| project_gore(<G as Borrow<RgbImage>>::borrow(g), config))
            .collect()
    } else {
        gores
            .iter()
            .map(|g| project_gore(<G as Borrow<RgbImage>>::borrow(g), config))
            .collect()
    }
}
