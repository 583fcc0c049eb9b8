//! Runtime settings
//!
//! All settings are transient defaults built at startup. Nothing is read from
//! or written to disk; the only external knob is `RUST_LOG` for logging.

use std::path::PathBuf;

use crate::format::TargetFormat;

/// Name given to the archive when more than one result is downloaded
pub const ARCHIVE_NAME: &str = "converted-images.zip";

/// Largest raster surface we will allocate, in pixels (16384 x 16384)
pub const MAX_SURFACE_PIXELS: u64 = 16_384 * 16_384;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "image_converter=info";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Format assigned to every newly selected file
    pub default_format: TargetFormat,
    /// File name used for multi-result downloads
    pub archive_name: String,
    /// Directory the save dialog opens in
    pub save_dir: Option<PathBuf>,
    /// Upper bound for decoded image area
    pub max_surface_pixels: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: TargetFormat::Webp,
            archive_name: ARCHIVE_NAME.to_string(),
            save_dir: default_save_dir(),
            max_surface_pixels: MAX_SURFACE_PIXELS,
        }
    }
}

/// The user's download directory, or their home directory
pub fn default_save_dir() -> Option<PathBuf> {
    dirs::download_dir().or_else(dirs::home_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.default_format, TargetFormat::Webp);
        assert_eq!(settings.archive_name, "converted-images.zip");
        assert_eq!(settings.max_surface_pixels, 268_435_456);
    }
}
