//! Surface encoding
//!
//! PNG and JPEG use the `image` codecs. WebP goes through libwebp because
//! `image` only writes lossless WebP and we need the 0.9 quality setting.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;

use super::surface::RasterSurface;
use crate::error::ConvertError;
use crate::format::TargetFormat;

/// libwebp refuses anything wider or taller than this
const WEBP_MAX_DIMENSION: u32 = 16_383;

/// Serialize a surface with the target format's MIME type and quality
pub fn encode(surface: &RasterSurface, target: TargetFormat) -> Result<Vec<u8>, ConvertError> {
    let quality = target.quality();
    match target {
        TargetFormat::Png => encode_png(surface),
        TargetFormat::Jpeg => encode_jpeg(surface, quality),
        TargetFormat::Webp => encode_webp(surface, quality),
    }
}

fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, ConvertError> {
    let mut out = Vec::new();
    surface
        .rgba()
        .write_with_encoder(PngEncoder::new(&mut out))
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    Ok(out)
}

fn encode_jpeg(surface: &RasterSurface, quality: f32) -> Result<Vec<u8>, ConvertError> {
    let rgb = surface.to_rgb_over_black();
    let mut out = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, percent(quality)))
        .map_err(|e| ConvertError::Encode(e.to_string()))?;
    Ok(out)
}

fn encode_webp(surface: &RasterSurface, quality: f32) -> Result<Vec<u8>, ConvertError> {
    let (width, height) = (surface.width(), surface.height());
    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(ConvertError::Encode(format!(
            "{}x{} exceeds the WebP limit of {} pixels per side",
            width, height, WEBP_MAX_DIMENSION
        )));
    }

    let encoder = webp::Encoder::from_rgba(surface.rgba().as_raw(), width, height);
    let memory = encoder
        .encode_simple(false, quality * 100.0)
        .map_err(|e| ConvertError::Encode(format!("WebP encoding failed: {:?}", e)))?;
    Ok(memory.to_vec())
}

/// 0.0..=1.0 quality to the 1..=100 scale the JPEG encoder takes
fn percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}
