//! Curved text layer.

use super::{CurveLink, LayerEffect, OutputMode, RenderContext};
use crate::config::{BadgeConfig, TextStyle};
use crate::geometry::text_path;
use crate::style::{ComposedStyle, StyleDeclarations, TEXT_CLASS, TEXT_SVG_CLASS};
use crate::svg::escape_xml;

const DEFAULT_TEXT_FILL: &str = "white";
/// Font family used by standalone SVG output when none is configured.
const FALLBACK_FONT_FAMILY: &str = "sans-serif";

/// The badge text laid out along the arc path.
///
/// # Emitted Properties
///
/// - [`CurveLink`]: id and path data of the curve the text is linked to.
#[derive(Debug, Clone)]
pub struct TextLayer {
    pub size: f64,
    pub text: String,
    pub curve_id: String,
    pub path: String,
    pub font_size: f64,
    pub start_offset: String,
    pub text_style: TextStyle,
}

impl TextLayer {
    pub fn new(config: &BadgeConfig, style: &ComposedStyle, curve_id: &str) -> Self {
        Self {
            size: config.size,
            text: config.badge_text.clone(),
            curve_id: curve_id.to_string(),
            path: text_path(config.size, config.text_path.as_deref()),
            font_size: style.font_size,
            start_offset: style.start_offset(),
            text_style: config.text_style.clone(),
        }
    }

    /// Inline style of the `<text>` element.
    pub fn text_declarations(&self, mode: OutputMode) -> StyleDeclarations {
        let ts = &self.text_style;
        let mut style = StyleDeclarations::new();
        match &ts.font_size {
            Some(font_size) => style.set("font-size", font_size.as_str()),
            None => style.set("font-size", format!("{}px", self.font_size)),
        }
        match &ts.font_family {
            Some(family) => style.set("font-family", family.as_str()),
            None if mode.is_svg() => style.set("font-family", FALLBACK_FONT_FAMILY),
            None => {}
        }
        if let Some(weight) = &ts.font_weight {
            style.set("font-weight", weight.as_str());
        }
        if let Some(spacing) = &ts.letter_spacing {
            style.set("letter-spacing", spacing.as_str());
        }
        style
    }

    fn path_definition(&self) -> String {
        format!(
            r#"<path id="{}" d="{}" fill="none"/>"#,
            escape_xml(&self.curve_id),
            escape_xml(&self.path)
        )
    }

    fn text_element(&self, mode: OutputMode) -> String {
        let fill = self.text_style.color.as_deref().unwrap_or(DEFAULT_TEXT_FILL);
        format!(
            r##"<text class="{TEXT_CLASS}" fill="{}" style="{}"><textPath href="#{}" startOffset="{}">{}</textPath></text>"##,
            escape_xml(fill),
            escape_xml(&self.text_declarations(mode).to_string()),
            escape_xml(&self.curve_id),
            escape_xml(&self.start_offset),
            escape_xml(&self.text)
        )
    }
}

impl LayerEffect for TextLayer {
    fn transform(&self, ctx: &mut RenderContext) {
        match ctx.mode {
            OutputMode::Html => {
                ctx.fragments.overlay.push_str(&format!(
                    r#"<svg class="{TEXT_SVG_CLASS}" viewBox="0 0 {size} {size}" xmlns="http://www.w3.org/2000/svg"><defs>{}</defs>{}</svg>"#,
                    self.path_definition(),
                    self.text_element(ctx.mode),
                    size = self.size
                ));
            }
            OutputMode::Svg | OutputMode::SvgOverlay => {
                ctx.fragments.defs.push_str(&self.path_definition());
                ctx.fragments.overlay.push_str(&self.text_element(ctx.mode));
            }
        }
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(CurveLink {
            id: self.curve_id.clone(),
            path: self.path.clone(),
        });
    }
}
