//! Raster output.
//!
//! The photo is prepared with `image` (square crop, resize, circular mask)
//! and everything above it is rasterized from the overlay SVG with resvg,
//! then composited on top.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{BadgeError, Result};
use crate::renderer::RenderedBadge;
use crate::svg::{composite_over, render_svg};

/// Largest badge that will be rasterized, in pixels.
pub const MAX_RASTER_SIZE: u32 = 8192;

/// Decodes a photo in any format the `image` crate understands.
pub fn load_photo(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Pixel size of a badge, or an error if it is not rasterizable.
pub fn raster_size(size: f64) -> Result<u32> {
    let rounded = size.round();
    if rounded >= 1.0 && rounded <= f64::from(MAX_RASTER_SIZE) {
        Ok(rounded as u32)
    } else {
        Err(BadgeError::RasterSize { size })
    }
}

/// Crops the photo to a centered square, scales it to `size` and masks it
/// to a circle.
pub fn prepare_photo(photo: &DynamicImage, size: u32) -> RgbaImage {
    let (width, height) = (photo.width(), photo.height());
    let side = width.min(height);
    let square = photo.crop_imm((width - side) / 2, (height - side) / 2, side, side);

    let mut img = square
        .resize_exact(size, size, FilterType::Triangle)
        .to_rgba8();
    apply_circle_mask(&mut img);
    img
}

/// Clears everything outside the inscribed circle, with a one pixel soft edge.
fn apply_circle_mask(img: &mut RgbaImage) {
    let radius = img.width().min(img.height()) as f32 / 2.0;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
        pixel[3] = (pixel[3] as f32 * coverage).round() as u8;
    }
}

/// Rasterizes a rendered badge, optionally over a photo.
///
/// Without a photo the base is transparent.
pub fn rasterize(badge: &RenderedBadge, photo: Option<&DynamicImage>) -> Result<RgbaImage> {
    let size = raster_size(badge.size)?;

    let mut canvas = match photo {
        Some(photo) => prepare_photo(photo, size),
        None => RgbaImage::new(size, size),
    };

    let overlay = render_svg(&badge.svg_overlay_document(), size)?;
    composite_over(&mut canvas, &overlay, 0, 0);

    log::debug!("rasterized badge {} at {size}px", badge.curve.id);
    Ok(canvas)
}

/// Encodes an image as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BadgeConfig, RgbColor};
    use crate::renderer::BadgeRenderer;
    use image::Rgba;

    fn red_photo(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn raster_size_bounds() {
        assert_eq!(raster_size(200.0).unwrap(), 200);
        assert_eq!(raster_size(99.6).unwrap(), 100);
        assert!(raster_size(0.0).is_err());
        assert!(raster_size(-5.0).is_err());
        assert!(raster_size(f64::NAN).is_err());
        assert!(raster_size(1e6).is_err());
    }

    #[test]
    fn photo_is_cropped_and_masked() {
        let img = prepare_photo(&red_photo(80, 40), 50);

        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(img.get_pixel(25, 25).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(49, 49)[3], 0);
    }

    #[test]
    fn gradient_darkens_the_lower_half() {
        let config = BadgeConfig::new("unused", "Test")
            .with_size(200.0)
            .with_gradient(RgbColor::new(0, 102, 53), 180.0, 1.0);
        let badge = BadgeRenderer::new().render(&config);

        let img = rasterize(&badge, None).unwrap();
        assert_eq!(img.dimensions(), (200, 200));

        // Top half of the gradient is clear.
        assert_eq!(img.get_pixel(100, 50)[3], 0);

        // Between the 60% and 90% stops the wash is partly opaque and green.
        let lower = img.get_pixel(100, 150);
        assert!(lower[3] > 0);
        assert!(lower[1] > lower[0]);
    }

    #[test]
    fn curved_text_is_drawn_along_the_rim() {
        if crate::svg::system_fonts().is_empty() {
            eprintln!("no system fonts installed, skipping");
            return;
        }

        let badge = BadgeRenderer::new().render(&BadgeConfig::new("unused", "Test"));
        let img = rasterize(&badge, None).unwrap();

        // Default text is white; nothing else in the overlay is.
        let white = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] > 230 && p[1] > 230 && p[2] > 230 && p[3] > 230)
            .map(|(_, y, _)| y)
            .collect::<Vec<_>>();
        assert!(white.len() > 20, "only {} white pixels", white.len());
        assert!(white.iter().all(|&y| y > 100), "text above the rim");
    }

    #[test]
    fn photo_shows_through_the_clear_top() {
        let config = BadgeConfig::new("unused", "Test").with_size(100.0);
        let badge = BadgeRenderer::new().render(&config);

        let img = rasterize(&badge, Some(&red_photo(64, 64))).unwrap();

        let top = img.get_pixel(50, 30);
        assert_eq!(top[3], 255);
        assert!(top[0] > 200 && top[1] < 50);
        assert_eq!(img.get_pixel(1, 1)[3], 0);
    }

    #[test]
    fn png_encoding_round_trips_dimensions() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        let png = encode_png(&img).unwrap();

        let decoded = load_photo(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn unrasterizable_sizes_fail() {
        let badge = BadgeRenderer::new().render(&BadgeConfig::new("a", "b").with_size(0.0));
        assert!(matches!(
            rasterize(&badge, None),
            Err(BadgeError::RasterSize { .. })
        ));
    }
}
