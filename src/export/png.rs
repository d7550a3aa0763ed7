//! PNG load/save for source images and gores.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbImage};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to save image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: Box<ExportError>,
    },
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// File name used for gore `index` (1-based): `gore_{index}.png`.
pub fn gore_file_name(index: usize) -> String {
    format!("gore_{}.png", index)
}

/// Loads any supported raster format and converts it to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImage, ExportError> {
    let img = image::open(path).map_err(|source| ExportError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.into_rgb8())
}

/// Creates `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes an RGB image as an 8-bit PNG.
pub fn export_rgb_png(
    img: &RgbImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    write_png(img, path, options).map_err(|e| ExportError::Save {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

fn write_png(img: &RgbImage, path: &Path, options: &PngExportOptions) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Writes gores as `{output_dir}/gore_{i}.png`, numbering from 1.
///
/// Returns the written paths in gore order.
pub fn export_gores_png<'a, I>(
    gores: I,
    output_dir: &Path,
    options: &PngExportOptions,
) -> Result<Vec<PathBuf>, ExportError>
where
    I: IntoIterator<Item = &'a RgbImage>,
{
    ensure_dir(output_dir)?;

    let mut paths = Vec::new();
    for (i, gore) in gores.into_iter().enumerate() {
        let path = output_dir.join(gore_file_name(i + 1));
        export_rgb_png(gore, &path, options)?;
        info!(path = %path.display(), "gore saved");
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let img = RgbImage::from_fn(13, 7, |x, y| Rgb([x as u8 * 19, y as u8 * 31, 200]));
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");

        export_rgb_png(&img, &path, &PngExportOptions::default()).unwrap();
        let loaded = load_rgb_image(&path).unwrap();

        assert_eq!(loaded.as_raw(), img.as_raw());
    }

    #[test]
    fn test_export_gores_names() {
        let gores = vec![RgbImage::new(2, 2), RgbImage::new(3, 2), RgbImage::new(4, 2)];
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("gores");

        let paths = export_gores_png(&gores, &out, &PngExportOptions::default()).unwrap();

        assert_eq!(paths.len(), 3);
        for i in 1..=3 {
            let path = out.join(format!("gore_{}.png", i));
            assert!(path.exists(), "missing {}", path.display());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = load_rgb_image(&path).unwrap_err();
        assert!(matches!(err, ExportError::Load { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("x.png");
        let err = export_rgb_png(&RgbImage::new(1, 1), &path, &PngExportOptions::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::Save { .. }));
    }
}
