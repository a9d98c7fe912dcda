//! Circular frame layer.

use super::{FrameClip, LayerEffect, RenderContext};
use crate::config::{BadgeConfig, DEFAULT_BORDER_COLOR};
use crate::svg::escape_xml;

/// The circular frame: clip region for the layers above and the border ring.
///
/// In HTML mode the frame is the wrapper element itself, styled from
/// [`frame_style`](crate::style::frame_style), so this layer emits nothing.
///
/// # Emitted Properties
///
/// - [`FrameClip`]: id of the circular clip path (SVG modes only).
#[derive(Debug, Clone)]
pub struct FrameLayer {
    pub size: f64,
    pub border_width: f64,
    pub border_color: String,
    pub clip_id: String,
}

impl FrameLayer {
    pub fn new(config: &BadgeConfig, instance_id: &str) -> Self {
        Self {
            size: config.size,
            border_width: config.border_width,
            border_color: config.border_color.clone(),
            clip_id: format!("{instance_id}-clip"),
        }
    }

    /// Border color usable in a standalone SVG.
    ///
    /// CSS custom properties only resolve inside a page, so they fall back
    /// to the default border color.
    pub fn svg_border_color(&self) -> &str {
        if self.border_color.trim_start().starts_with("var(") {
            log::warn!(
                "border color {} cannot be resolved outside a stylesheet, using {}",
                self.border_color,
                DEFAULT_BORDER_COLOR
            );
            DEFAULT_BORDER_COLOR
        } else {
            &self.border_color
        }
    }
}

impl LayerEffect for FrameLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        if !ctx.mode.is_svg() {
            return;
        }

        let center = self.size / 2.0;
        ctx.fragments.defs.push_str(&format!(
            r#"<clipPath id="{}"><circle cx="{center}" cy="{center}" r="{center}"/></clipPath>"#,
            escape_xml(&self.clip_id)
        ));

        if self.border_width > 0.0 {
            // Stroke straddles the path, so pull it in by half a width.
            let ring_radius = (center - self.border_width / 2.0).max(0.0);
            ctx.fragments.frame.push_str(&format!(
                r#"<circle cx="{center}" cy="{center}" r="{ring_radius}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                escape_xml(self.svg_border_color()),
                self.border_width
            ));
        }
    }

    fn emit(&self, ctx: &mut RenderContext) {
        if ctx.mode.is_svg() {
            ctx.set(FrameClip(self.clip_id.clone()));
        }
    }
}
