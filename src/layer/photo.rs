//! Photo layer.

use super::{FrameClip, LayerEffect, OutputMode, RenderContext};
use crate::config::BadgeConfig;
use crate::style::IMAGE_CLASS;
use crate::svg::escape_xml;

/// The base photo, with its alternative text.
///
/// # Consumed Properties
///
/// - [`FrameClip`]: clips the photo to the circle in SVG mode.
#[derive(Debug, Clone)]
pub struct PhotoLayer {
    pub src: String,
    pub alt: String,
    pub size: f64,
}

impl PhotoLayer {
    pub fn new(config: &BadgeConfig) -> Self {
        Self {
            src: config.image_src.clone(),
            alt: config.image_alt.clone(),
            size: config.size,
        }
    }
}

impl LayerEffect for PhotoLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        let markup = match ctx.mode {
            OutputMode::Html => format!(
                r#"<img src="{}" alt="{}" class="{IMAGE_CLASS}"/>"#,
                escape_xml(&self.src),
                escape_xml(&self.alt)
            ),
            OutputMode::Svg => {
                let clip = ctx
                    .get::<FrameClip>()
                    .map(|clip| format!(r#" clip-path="url(#{})""#, escape_xml(&clip.0)))
                    .unwrap_or_default();
                format!(
                    r#"<image href="{}" x="0" y="0" width="{size}" height="{size}" preserveAspectRatio="xMidYMid slice"{clip}/>"#,
                    escape_xml(&self.src),
                    size = self.size
                )
            }
            OutputMode::SvgOverlay => return,
        };
        ctx.fragments.base.push_str(&markup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_image_escapes_attributes() {
        let layer = PhotoLayer::new(&BadgeConfig::new("/a.webp?x=1&y=2", "Jo \"JJ\" Lee"));
        let mut ctx = RenderContext::new(OutputMode::Html, 200.0);

        layer.apply(&mut ctx);

        assert_eq!(
            ctx.fragments.base,
            r#"<img src="/a.webp?x=1&amp;y=2" alt="Jo &quot;JJ&quot; Lee" class="opentowork-badge-image"/>"#
        );
    }

    #[test]
    fn svg_image_without_clip() {
        let layer = PhotoLayer::new(&BadgeConfig::new("/a.webp", "A").with_size(120.0));
        let mut ctx = RenderContext::new(OutputMode::Svg, 120.0);

        layer.apply(&mut ctx);

        assert!(ctx.fragments.base.contains(r#"width="120" height="120""#));
        assert!(!ctx.fragments.base.contains("clip-path"));
    }
}
