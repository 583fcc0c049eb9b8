//! Offscreen raster surface
//!
//! Decoded images are drawn 1:1 onto an RGBA buffer sized exactly to their
//! natural dimensions. No scaling, cropping or color transform.

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

use crate::error::ConvertError;

/// RGBA staging buffer between decode and encode
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl RasterSurface {
    /// Draw `image` onto a new surface of the same size
    ///
    /// Fails with `ContextUnavailable` for empty images or ones larger than
    /// `max_pixels`.
    pub fn draw(image: &DynamicImage, max_pixels: u64) -> Result<Self, ConvertError> {
        ensure_fits(image.width(), image.height(), max_pixels)?;

        Ok(Self {
            pixels: image.to_rgba8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Drop the alpha channel by compositing over black
    ///
    /// This is what a canvas does when exporting to a format without alpha.
    pub fn to_rgb_over_black(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
            let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            Rgb([blend(r), blend(g), blend(b)])
        })
    }
}

/// Check that a `width` x `height` surface could be allocated
///
/// Decoders call this with header dimensions before touching any pixels.
pub fn ensure_fits(width: u32, height: u32, max_pixels: u64) -> Result<(), ConvertError> {
    let area = width as u64 * height as u64;
    if area == 0 || area > max_pixels {
        return Err(ConvertError::ContextUnavailable { width, height });
    }
    Ok(())
}
