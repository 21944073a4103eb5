//! SVG output encoder.
//!
//! Vector output is the full-fidelity rendering of a figure: unlike the
//! raster path it carries every text label.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect { x: f32, y: f32, width: f32, height: f32, fill: Rgba, stroke: Option<Rgba>, stroke_width: f32 },
    /// Circle
    Circle { cx: f32, cy: f32, r: f32, fill: Rgba },
    /// Line
    Line { x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32 },
    /// Polyline (connected line segments, round caps)
    Polyline { points: Vec<(f32, f32)>, stroke: Rgba, stroke_width: f32 },
    /// Text, optionally rotated about its anchor point (degrees, clockwise)
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        baseline: TextBaseline,
        rotate: f32,
    },
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the anchor (left-aligned for LTR).
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor (right-aligned for LTR).
    End,
}

/// Vertical text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Alphabetic baseline sits on the anchor.
    #[default]
    Alphabetic,
    /// Text is vertically centered on the anchor.
    Middle,
    /// Top of the text hangs from the anchor.
    Hanging,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect { x, y, width, height, fill, stroke: None, stroke_width: 1.0 });
        self
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(mut self, cx: f32, cy: f32, r: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Circle { cx, cy, r, fill });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) -> Self {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width });
        self
    }

    /// Add left-aligned text on the alphabetic baseline.
    #[must_use]
    pub fn text(mut self, x: f32, y: f32, text: &str, font_size: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            rotate: 0.0,
        });
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Number of elements added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no elements have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, rgba_to_css(&bg));
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Convert RGBA to CSS color string.
fn rgba_to_css(color: &Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!("rgba({},{},{},{:.3})", color.r, color.g, color.b, f32::from(color.a) / 255.0)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => {
            let stroke_attr = stroke
                .map(|s| format!(r#" stroke="{}" stroke-width="{}""#, rgba_to_css(&s), stroke_width))
                .unwrap_or_default();
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{stroke_attr}/>"#,
                rgba_to_css(fill)
            )
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, rgba_to_css(fill))
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
                rgba_to_css(stroke)
            )
        }
        SvgElement::Polyline { points, stroke, stroke_width } => {
            let points_str: String =
                points.iter().map(|(x, y)| format!("{x},{y}")).collect::<Vec<_>>().join(" ");
            format!(
                r#"<polyline points="{points_str}" fill="none" stroke="{}" stroke-width="{stroke_width}" stroke-linecap="round"/>"#,
                rgba_to_css(stroke)
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, baseline, rotate } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let baseline_attr = match baseline {
                TextBaseline::Alphabetic => String::new(),
                TextBaseline::Middle => r#" dominant-baseline="central""#.to_string(),
                TextBaseline::Hanging => r#" dominant-baseline="hanging""#.to_string(),
            };
            let transform_attr = if rotate.abs() > f32::EPSILON {
                format!(r#" transform="rotate({rotate} {x} {y})""#)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{anchor_str}"{baseline_attr}{transform_attr} font-family="sans-serif">{}</text>"#,
                rgba_to_css(fill),
                escape_xml(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_element(anchor: TextAnchor, baseline: TextBaseline, rotate: f32) -> SvgElement {
        SvgElement::Text {
            x: 10.0,
            y: 20.0,
            text: "Label".to_string(),
            font_size: 10.0,
            fill: Rgba::BLACK,
            anchor,
            baseline,
            rotate,
        }
    }

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let svg = SvgEncoder::new(100, 100).rect(10.0, 20.0, 30.0, 40.0, Rgba::RED).render();

        assert!(svg.contains("<rect x=\"10\" y=\"20\" width=\"30\" height=\"40\""));
        assert!(svg.contains("rgb(255,0,0)"));
    }

    #[test]
    fn test_svg_rect_with_stroke() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Rect {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
            fill: Rgba::RED,
            stroke: Some(Rgba::BLACK),
            stroke_width: 2.0,
        });
        let svg = encoder.render();
        assert!(svg.contains("stroke=\"rgb(0,0,0)\" stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_circle() {
        let svg = SvgEncoder::new(100, 100).circle(50.0, 50.0, 25.0, Rgba::BLUE).render();

        assert!(svg.contains("<circle cx=\"50\" cy=\"50\" r=\"25\""));
        assert!(svg.contains("rgb(0,0,255)"));
    }

    #[test]
    fn test_svg_line() {
        let svg = SvgEncoder::new(100, 100).line(0.0, 0.0, 100.0, 100.0, Rgba::BLACK, 2.0).render();

        assert!(svg.contains("<line"));
        assert!(svg.contains("x2=\"100\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_polyline() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(SvgElement::Polyline {
            points: vec![(0.0, 0.0), (50.0, 100.0)],
            stroke: Rgba::GREEN,
            stroke_width: 3.0,
        });
        let svg = encoder.render();

        assert!(svg.contains("points=\"0,0 50,100\""));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke-linecap=\"round\""));
    }

    #[test]
    fn test_svg_text() {
        let svg = SvgEncoder::new(100, 100).text(10.0, 50.0, "Hello", 12.0, Rgba::BLACK).render();

        assert!(svg.contains("<text"));
        assert!(svg.contains(">Hello</text>"));
        assert!(svg.contains("font-size=\"12\""));
        assert!(svg.contains("text-anchor=\"start\""));
        assert!(!svg.contains("dominant-baseline"));
    }

    #[test]
    fn test_svg_text_alignment_and_rotation() {
        let mut encoder = SvgEncoder::new(100, 100);
        encoder.add_element(text_element(TextAnchor::Middle, TextBaseline::Middle, -90.0));
        encoder.add_element(text_element(TextAnchor::End, TextBaseline::Hanging, 0.0));
        let svg = encoder.render();

        assert!(svg.contains("text-anchor=\"middle\" dominant-baseline=\"central\""));
        assert!(svg.contains("transform=\"rotate(-90 10 20)\""));
        assert!(svg.contains("text-anchor=\"end\" dominant-baseline=\"hanging\""));
        assert_eq!(svg.matches("transform=").count(), 1);
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text(10.0, 50.0, "<script>alert('xss')</script> & \"q\"", 12.0, Rgba::BLACK)
            .render();

        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("&amp;"));
        assert!(svg.contains("&quot;"));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_svg_rgba_alpha() {
        let css = rgba_to_css(&Rgba::new(255, 0, 0, 128));
        assert!(css.starts_with("rgba"));
        assert!(css.contains("0.502"));
    }

    #[test]
    fn test_svg_len() {
        let encoder = SvgEncoder::new(10, 10);
        assert!(encoder.is_empty());
        let encoder = encoder.circle(1.0, 1.0, 1.0, Rgba::RED);
        assert_eq!(encoder.len(), 1);
    }

    #[test]
    fn test_svg_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        SvgEncoder::new(100, 100).rect(10.0, 10.0, 80.0, 80.0, Rgba::BLUE).write_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("</svg>"));
    }

    #[test]
    fn test_svg_encoder_default() {
        let svg = SvgEncoder::default().render();
        assert!(svg.contains("width=\"800\""));
    }
}
