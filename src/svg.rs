//! SVG utilities: escaping, rasterization through resvg, and compositing.

use std::sync::{Arc, OnceLock};

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::error::{BadgeError, Result};

// ============================================================================
// Escaping
// ============================================================================

/// Escapes text for use in XML/HTML content and double-quoted attributes.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// SVG Rendering
// ============================================================================

/// System fonts, loaded once per process.
pub(crate) fn system_fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("loaded {} font faces for text rendering", db.len());
            resolve_sans_serif(&mut db);
            Arc::new(db)
        })
        .clone()
}

/// Points the generic `sans-serif` family at a face that is installed.
///
/// fontdb maps `sans-serif` to Arial by default; usvg drops any text whose
/// family has no installed face.
fn resolve_sans_serif(db: &mut fontdb::Database) {
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..fontdb::Query::default()
    };
    if db.query(&query).is_some() {
        return;
    }

    let families: Vec<(&str, bool)> = db
        .faces()
        .filter_map(|face| {
            let (name, _) = face.families.first()?;
            Some((name.as_str(), face.monospaced))
        })
        .collect();
    let fallback = families
        .iter()
        .find(|(name, mono)| !mono && name.contains("Sans") && !name.contains("Mono"))
        .or_else(|| families.iter().find(|(_, mono)| !mono))
        .or_else(|| families.first())
        .map(|(name, _)| name.to_string());

    match fallback {
        Some(family) => {
            log::debug!("using {family:?} for sans-serif text");
            db.set_sans_serif_family(family);
        }
        None => log::warn!("no font faces available, badge text will not be rendered"),
    }
}

/// Renders an SVG string to an RGBA image whose larger side is `size` pixels.
pub fn render_svg(svg_data: &str, size: u32) -> Result<RgbaImage> {
    let mut opts = Options::default();
    opts.fontdb = system_fonts();
    let tree = Tree::from_str(svg_data, &opts)?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(BadgeError::RasterSize {
        size: f64::from(size),
    })?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (pixel, out) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        *out = Rgba([r, g, b, a]);
    }

    img
}

/// Converts premultiplied channels back to straight alpha.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        return (0, 0, 0, 0);
    }
    let scale = 255.0 / f32::from(a);
    let channel = |c: u8| (f32::from(c) * scale).round().min(255.0) as u8;
    (channel(r), channel(g), channel(b), a)
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites `src` onto `dest` at the given offset (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
        let blended = alpha_blend(*src_pixel, *dst_pixel);
        dest.put_pixel(dx as u32, dy as u32, blended);
    }
}

/// Porter-Duff source-over on straight-alpha pixels.
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_alpha = f32::from(src[3]) / 255.0;
    let dst_weight = f32::from(dst[3]) / 255.0 * (1.0 - src_alpha);
    let out_alpha = src_alpha + dst_weight;
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().take(3).enumerate() {
        let mixed = f32::from(src[i]) * src_alpha + f32::from(dst[i]) * dst_weight;
        *channel = (mixed / out_alpha).round() as u8;
    }
    out[3] = (out_alpha * 255.0).round() as u8;
    Rgba(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><circle cx="50" cy="50" r="40" fill="#ff0000"/></svg>"##;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape_xml("#opentowork"), "#opentowork");
    }

    #[test]
    fn render_simple_svg() {
        let img = render_svg(SIMPLE_SVG, 50).unwrap();
        assert_eq!(img.width(), 50);
        assert_eq!(img.height(), 50);

        let center = img.get_pixel(25, 25);
        assert_eq!(center.0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn invalid_svg_is_an_error() {
        assert!(matches!(
            render_svg("not svg", 10),
            Err(BadgeError::SvgParse(_))
        ));
    }

    /// Counts text nodes left in a parsed tree.
    fn text_nodes(group: &resvg::usvg::Group) -> usize {
        group
            .children()
            .iter()
            .map(|node| match node {
                resvg::usvg::Node::Text(_) => 1,
                resvg::usvg::Node::Group(group) => text_nodes(group),
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn sans_serif_text_survives_parsing() {
        let fonts = system_fonts();
        if fonts.is_empty() {
            eprintln!("no system fonts installed, skipping");
            return;
        }

        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="40"><text x="5" y="30" style="font-family: sans-serif; font-size: 20px;">#opentowork</text></svg>"#;
        let mut opts = Options::default();
        opts.fontdb = fonts;
        let tree = Tree::from_str(svg, &opts).unwrap();

        assert_eq!(text_nodes(tree.root()), 1);
    }

    #[test]
    fn empty_font_database_is_left_alone() {
        let mut db = fontdb::Database::new();
        resolve_sans_serif(&mut db);
        assert!(db.is_empty());
    }

    #[test]
    fn unpremultiply_restores_straight_color() {
        // Default gradient green at the 60% stop, premultiplied by 0.3.
        assert_eq!(unpremultiply(0, 31, 16, 77), (0, 103, 53, 77));
        assert_eq!(unpremultiply(12, 34, 56, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(255, 255, 255, 255), (255, 255, 255, 255));
    }

    #[test]
    fn opaque_ring_covers_the_photo() {
        let skin = Rgba([224, 187, 160, 255]);
        let mut photo = RgbaImage::from_pixel(20, 20, skin);
        let ring = RgbaImage::from_pixel(4, 20, Rgba([212, 173, 0, 255]));

        composite_over(&mut photo, &ring, 16, 0);

        assert_eq!(photo.get_pixel(17, 10).0, [212, 173, 0, 255]);
        assert_eq!(photo.get_pixel(15, 10).0, skin.0);
    }

    #[test]
    fn gradient_wash_tints_the_photo() {
        let skin = Rgba([224, 187, 160, 255]);
        let mut photo = RgbaImage::from_pixel(20, 20, skin);
        let wash = RgbaImage::from_pixel(20, 10, Rgba([0, 102, 53, 77]));

        composite_over(&mut photo, &wash, 0, 10);

        let tinted = photo.get_pixel(10, 15);
        assert_eq!(tinted[3], 255);
        assert!(tinted[0] < skin[0] && tinted[0] > 140);
        assert!(tinted[2] < skin[2]);
        assert_eq!(photo.get_pixel(10, 5).0, skin.0);
    }

    #[test]
    fn wash_clipped_at_the_edges() {
        let mut photo = RgbaImage::from_pixel(10, 10, Rgba([224, 187, 160, 255]));
        let wash = RgbaImage::from_pixel(6, 6, Rgba([0, 102, 53, 255]));

        composite_over(&mut photo, &wash, -3, 7);

        assert_eq!(photo.get_pixel(0, 9).0, [0, 102, 53, 255]);
        assert_eq!(photo.get_pixel(2, 7).0, [0, 102, 53, 255]);
        assert_eq!(photo.get_pixel(3, 9).0, [224, 187, 160, 255]);
        assert_eq!(photo.get_pixel(0, 6).0, [224, 187, 160, 255]);
    }

    #[test]
    fn composite_onto_transparent() {
        let mut dest = RgbaImage::new(2, 2);
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 102, 53, 200]));

        composite_over(&mut dest, &src, 0, 0);

        assert_eq!(dest.get_pixel(1, 1).0, [0, 102, 53, 200]);
    }
}
