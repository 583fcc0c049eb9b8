//! Output format table
//!
//! Every target format maps to a fixed MIME type, output extension and
//! encoder quality. The table is static; nothing here is user-configurable.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseFormatError;

/// Encoder settings for one output format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatSpec {
    /// Human-readable label (e.g., "WebP")
    pub label: &'static str,
    /// MIME type handed to the encoder
    pub mime_type: &'static str,
    /// Output file extension, including the leading dot
    pub extension: &'static str,
    /// Encoder quality in 0.0..=1.0 (1.0 = lossless)
    pub quality: f32,
}

/// A format the converter can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    #[default]
    Webp,
    Png,
    Jpeg,
}

const WEBP: FormatSpec = FormatSpec {
    label: "WebP",
    mime_type: "image/webp",
    extension: ".webp",
    quality: 0.9,
};

const PNG: FormatSpec = FormatSpec {
    label: "PNG",
    mime_type: "image/png",
    extension: ".png",
    quality: 1.0,
};

const JPEG: FormatSpec = FormatSpec {
    label: "JPEG",
    mime_type: "image/jpeg",
    extension: ".jpg",
    quality: 0.9,
};

impl TargetFormat {
    /// All formats, in the order they are offered to the user
    pub const ALL: [TargetFormat; 3] = [TargetFormat::Webp, TargetFormat::Png, TargetFormat::Jpeg];

    /// Look up the static encoder settings for this format
    pub const fn spec(self) -> &'static FormatSpec {
        match self {
            TargetFormat::Webp => &WEBP,
            TargetFormat::Png => &PNG,
            TargetFormat::Jpeg => &JPEG,
        }
    }

    /// Short identifier ("webp", "png", "jpeg")
    pub const fn id(self) -> &'static str {
        match self {
            TargetFormat::Webp => "webp",
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        self.spec().mime_type
    }

    pub fn extension(self) -> &'static str {
        self.spec().extension
    }

    pub fn quality(self) -> f32 {
        self.spec().quality
    }
}

/// Shown in the per-file pick list
impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().label)
    }
}

impl FromStr for TargetFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webp" => Ok(TargetFormat::Webp),
            "png" => Ok(TargetFormat::Png),
            // Both spellings name the same encoder
            "jpeg" | "jpg" => Ok(TargetFormat::Jpeg),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_is_fixed_per_format() {
        assert_eq!(TargetFormat::Webp.quality(), 0.9);
        assert_eq!(TargetFormat::Jpeg.quality(), 0.9);
        assert_eq!(TargetFormat::Png.quality(), 1.0);
    }

    #[test]
    fn test_extensions_and_mime_types() {
        assert_eq!(TargetFormat::Jpeg.extension(), ".jpg");
        assert_eq!(TargetFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(TargetFormat::Webp.extension(), ".webp");
        assert_eq!(TargetFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_default_is_webp() {
        assert_eq!(TargetFormat::default(), TargetFormat::Webp);
    }

    #[test]
    fn test_parse_accepts_jpg_alias() {
        assert_eq!("jpg".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
        assert_eq!("JPEG".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
        assert_eq!("webp".parse::<TargetFormat>().unwrap(), TargetFormat::Webp);
        assert!("avif".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(TargetFormat::Webp.to_string(), "WebP");
        assert_eq!(TargetFormat::Jpeg.to_string(), "JPEG");
    }
}
