//! Source decoding
//!
//! Raster formats go through `image`, which picks the codec from the file
//! content. SVG sources are rasterized with resvg at their intrinsic size.
//!
//! Both paths read the image dimensions first and refuse anything larger
//! than the surface limit before allocating pixel memory.

use image::{DynamicImage, ImageReader, Limits, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use tracing::debug;

use super::surface::ensure_fits;
use crate::error::ConvertError;
use crate::mime;
use crate::state::SourceFile;

/// Widest decoded pixel `image` produces (RGBA, 32-bit float per channel)
const MAX_BYTES_PER_PIXEL: u64 = 16;

/// Decode a source file into pixels, refusing images over `max_pixels`
pub fn decode(source: &SourceFile, max_pixels: u64) -> Result<DynamicImage, ConvertError> {
    if source.mime_type() == mime::SVG {
        return rasterize_svg(source.data(), max_pixels);
    }

    let decode_err = |e: image::ImageError| ConvertError::Decode(e.to_string());
    let open = || {
        ImageReader::new(Cursor::new(source.data()))
            .with_guessed_format()
            .map_err(|e| ConvertError::Decode(e.to_string()))
    };

    let (width, height) = open()?.into_dimensions().map_err(decode_err)?;
    ensure_fits(width, height, max_pixels)?;

    // Raise the crate's allocation cap so anything within the surface limit decodes
    let mut limits = Limits::default();
    let needed = max_pixels.saturating_mul(MAX_BYTES_PER_PIXEL);
    limits.max_alloc = limits.max_alloc.map(|cap| cap.max(needed));

    let mut reader = open()?;
    reader.limits(limits);
    let img = reader.decode().map_err(decode_err)?;

    debug!(name = source.name(), width = img.width(), height = img.height(), "Decoded image");
    Ok(img)
}

/// Render an SVG document at its own width and height
fn rasterize_svg(data: &[u8], max_pixels: u64) -> Result<DynamicImage, ConvertError> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| ConvertError::Decode(format!("Invalid SVG: {}", e)))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    ensure_fits(width, height, max_pixels)?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ConvertError::ContextUnavailable { width, height })?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha
    let mut rgba = RgbaImage::new(width, height);
    for (dst, src) in rgba.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    debug!(width, height, "Rasterized SVG");
    Ok(DynamicImage::ImageRgba8(rgba))
}
