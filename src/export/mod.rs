//! Image I/O: loading sources and writing gores and merged output as PNG.

mod png;

pub use png::{
    ensure_dir, export_gores_png, export_rgb_png, gore_file_name, load_rgb_image, ExportError,
    PngExportOptions,
};
