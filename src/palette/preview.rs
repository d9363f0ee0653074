//! Raster previews of palettes.
//!
//! A swatch shows one palette the way the canvas would frame it: the
//! background fills the image and the primary and accent colors sit in
//! horizontal bands across its middle. A ramp shows the palette sweep
//! across the whole anchored temperature range.

use image::{ImageBuffer, Rgb as Pixel, RgbImage};
use std::io::Cursor;

use super::anchors::Rgb;
use super::interpolate::{interpolated_palette, Palette};
use super::{MAX_TEMPERATURE_C, MIN_TEMPERATURE_C};
use crate::error::{Result, WeatherglassError};

fn to_pixel(color: Rgb) -> Pixel<u8> {
    Pixel([
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
    ])
}

/// Render a single palette as a swatch
pub fn render_swatch(palette: &Palette, width: u32, height: u32) -> RgbImage {
    let bands = [palette.primary, palette.accent1, palette.accent2];

    // Bands occupy the middle half of the image
    let band_top = height / 4;
    let band_height = (height / 2 / bands.len() as u32).max(1);

    ImageBuffer::from_fn(width, height, |_, y| {
        if y >= band_top {
            let band = ((y - band_top) / band_height) as usize;
            if let Some(color) = bands.get(band) {
                return to_pixel(*color);
            }
        }
        to_pixel(palette.background)
    })
}

/// Render the palette sweep from the coldest to the hottest anchor.
///
/// Columns run left to right from cold to hot; rows are split into four
/// stripes (background, primary, accent1, accent2).
pub fn render_ramp(width: u32, height: u32) -> RgbImage {
    let stripe_height = (height / 4).max(1);
    let span = MAX_TEMPERATURE_C - MIN_TEMPERATURE_C;

    ImageBuffer::from_fn(width, height, |x, y| {
        let fraction = if width > 1 {
            x as f64 / (width - 1) as f64
        } else {
            0.0
        };
        let palette = interpolated_palette(MIN_TEMPERATURE_C + span * fraction);

        match y / stripe_height {
            0 => to_pixel(palette.background),
            1 => to_pixel(palette.primary),
            2 => to_pixel(palette.accent1),
            _ => to_pixel(palette.accent2),
        }
    })
}

/// Encode an image as PNG bytes
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)
        .map_err(|e| WeatherglassError::ImageGeneration {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buffer.into_inner())
}
