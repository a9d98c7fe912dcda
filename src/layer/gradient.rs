//! Gradient overlay layer.

use super::{FrameClip, LayerEffect, OutputMode, RenderContext};
use crate::style::{GRADIENT_CLASS, LinearGradient, StyleDeclarations};
use crate::svg::escape_xml;

/// A directional color wash over the lower part of the badge.
///
/// # Consumed Properties
///
/// - [`FrameClip`]: clips the wash to the circle in SVG modes.
#[derive(Debug, Clone)]
pub struct GradientLayer {
    pub size: f64,
    pub gradient: LinearGradient,
    pub gradient_id: String,
}

impl GradientLayer {
    pub fn new(size: f64, gradient: LinearGradient, instance_id: &str) -> Self {
        Self {
            size,
            gradient,
            gradient_id: format!("{instance_id}-gradient"),
        }
    }

    /// `<linearGradient>` element in bounding box units.
    fn svg_definition(&self) -> String {
        let ((x1, y1), (x2, y2)) = self.gradient.unit_endpoints();
        let mut def = format!(
            r#"<linearGradient id="{}" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}">"#,
            escape_xml(&self.gradient_id)
        );
        for stop in &self.gradient.stops {
            let color = stop.color;
            def.push_str(&format!(
                r#"<stop offset="{}" stop-color="rgb({},{},{})" stop-opacity="{}"/>"#,
                stop.offset, color.r, color.g, color.b, stop.alpha
            ));
        }
        def.push_str("</linearGradient>");
        def
    }
}

impl LayerEffect for GradientLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        match ctx.mode {
            OutputMode::Html => {
                let mut style = StyleDeclarations::new();
                style.set("background", self.gradient.to_string());
                ctx.fragments.overlay.push_str(&format!(
                    r#"<div class="{GRADIENT_CLASS}" style="{}"></div>"#,
                    escape_xml(&style.to_string())
                ));
            }
            OutputMode::Svg | OutputMode::SvgOverlay => {
                let definition = self.svg_definition();
                ctx.fragments.defs.push_str(&definition);

                let clip = ctx
                    .get::<FrameClip>()
                    .map(|clip| format!(r#" clip-path="url(#{})""#, escape_xml(&clip.0)))
                    .unwrap_or_default();
                ctx.fragments.overlay.push_str(&format!(
                    r#"<rect x="0" y="0" width="{size}" height="{size}" fill="url(#{})"{clip}/>"#,
                    escape_xml(&self.gradient_id),
                    size = self.size
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RgbColor;

    fn layer() -> GradientLayer {
        GradientLayer::new(
            200.0,
            LinearGradient::new(RgbColor::new(0, 102, 53), 180.0, 1.0),
            "badge",
        )
    }

    #[test]
    fn html_background() {
        let mut ctx = RenderContext::new(OutputMode::Html, 200.0);
        layer().apply(&mut ctx);

        assert_eq!(
            ctx.fragments.overlay,
            "<div class=\"opentowork-badge-gradient\" style=\"background: linear-gradient(180deg, \
             transparent 0%, transparent 50%, rgba(0, 102, 53, 0.3) 60%, rgba(0, 102, 53, 1) 90%);\"></div>"
        );
    }

    #[test]
    fn svg_definition_has_four_stops() {
        let mut ctx = RenderContext::new(OutputMode::SvgOverlay, 200.0);
        layer().apply(&mut ctx);

        let defs = &ctx.fragments.defs;
        assert!(defs.starts_with(r#"<linearGradient id="badge-gradient""#));
        assert_eq!(defs.matches("<stop ").count(), 4);
        assert!(defs.contains(r#"<stop offset="0.6" stop-color="rgb(0,102,53)" stop-opacity="0.3"/>"#));
        assert!(defs.contains(r#"<stop offset="0.9" stop-color="rgb(0,102,53)" stop-opacity="1"/>"#));
        assert!(ctx.fragments.overlay.contains(r#"fill="url(#badge-gradient)""#));
    }
}
