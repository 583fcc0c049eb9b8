//! Image conversion module
//!
//! This module handles:
//! - Decoding source bytes (raster formats and SVG)
//! - Drawing them 1:1 onto an RGBA raster surface
//! - Re-encoding the surface to the target format
//! - Running a batch of conversions one item at a time

pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod surface;

use tokio::task;
use tracing::debug;

use crate::error::ConvertError;
use crate::format::TargetFormat;
use crate::settings::{Settings, MAX_SURFACE_PIXELS};
use crate::state::data::{file_extension, output_name};
use crate::state::{ConversionRequest, ConversionResult, SourceFile};
use surface::RasterSurface;

pub use pipeline::{convert_all, ConversionReport, ItemFailure, PipelineEvent, Progress};

/// Converts single images; cheap to copy into worker tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    max_surface_pixels: u64,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            max_surface_pixels: MAX_SURFACE_PIXELS,
        }
    }
}

impl Converter {
    pub fn new(max_surface_pixels: u64) -> Self {
        Self { max_surface_pixels }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_surface_pixels)
    }

    /// Convert one request on the blocking pool
    ///
    /// Decode and encode are CPU-bound, so they run in `spawn_blocking`. A
    /// panic inside a codec surfaces as `ConvertError::Worker`.
    pub async fn convert(self, request: ConversionRequest) -> Result<ConversionResult, ConvertError> {
        task::spawn_blocking(move || self.convert_blocking(&request.source, request.target))
            .await
            .map_err(|e| ConvertError::Worker(format!("Task join error: {}", e)))?
    }

    /// Blocking implementation of a single conversion
    pub fn convert_blocking(
        &self,
        source: &SourceFile,
        target: TargetFormat,
    ) -> Result<ConversionResult, ConvertError> {
        let img = decode::decode(source, self.max_surface_pixels)?;
        let surface = RasterSurface::draw(&img, self.max_surface_pixels)?;
        let encoded = encode::encode(&surface, target)?;

        let result = ConversionResult {
            name: output_name(source.name(), target),
            original_size: source.size(),
            converted_size: encoded.len() as u64,
            data: encoded.into(),
            // Label comes from the name, never from the content
            original_format: file_extension(source.name()).to_uppercase(),
            output_format: target,
        };

        debug!(
            name = %result.name,
            width = surface.width(),
            height = surface.height(),
            original = result.original_size,
            converted = result.converted_size,
            "Encoded {}",
            target.id()
        );
        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    #[test]
    fn test_naming_law() {
        let source = fixtures::source("photo.png", ImageFormat::Png);
        let result = Converter::default()
            .convert_blocking(&source, TargetFormat::Jpeg)
            .unwrap();

        assert_eq!(result.name, "photo.jpg");
        assert_eq!(result.original_format, "PNG");
        assert_eq!(result.output_format, TargetFormat::Jpeg);
        assert_eq!(result.original_size, source.size());
        assert_eq!(result.converted_size, result.data.len() as u64);
    }

    #[test]
    fn test_label_follows_extension_not_content() {
        let source = fixtures::source("scan.bmp", ImageFormat::Png);
        let result = Converter::default()
            .convert_blocking(&source, TargetFormat::Png)
            .unwrap();
        assert_eq!(result.original_format, "BMP");
    }

    #[test]
    fn test_same_input_same_output() {
        let source = fixtures::source("a.png", ImageFormat::Png);
        let converter = Converter::default();
        for format in TargetFormat::ALL {
            let first = converter.convert_blocking(&source, format).unwrap();
            let second = converter.convert_blocking(&source, format).unwrap();
            assert_eq!(first.data, second.data);
        }
    }

    #[test]
    fn test_surface_limit_applies() {
        let source = fixtures::source("a.png", ImageFormat::Png);
        let err = Converter::new(10)
            .convert_blocking(&source, TargetFormat::Webp)
            .unwrap_err();
        assert!(err.is_encode_failure());
    }

    #[test]
    fn test_oversized_svg_fails_as_item_error() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20000" height="20000"/>"#;
        let source = SourceFile::new("huge.svg", svg.to_vec());

        let err = Converter::new(1_000_000)
            .convert_blocking(&source, TargetFormat::Png)
            .unwrap_err();
        assert_eq!(err, ConvertError::ContextUnavailable { width: 20000, height: 20000 });
    }

    #[tokio::test]
    async fn test_convert_async() {
        let request = ConversionRequest::new(
            fixtures::source("b.gif", ImageFormat::Gif),
            TargetFormat::Webp,
        );
        let result = Converter::default().convert(request).await.unwrap();
        assert_eq!(result.name, "b.webp");
        assert_eq!(result.original_format, "GIF");
    }

    #[tokio::test]
    async fn test_convert_async_decode_failure() {
        let request = ConversionRequest::new(fixtures::broken("x.png"), TargetFormat::Png);
        let err = Converter::default().convert(request).await.unwrap_err();
        assert!(matches!(err, ConvertError::Decode(_)));
    }
}
