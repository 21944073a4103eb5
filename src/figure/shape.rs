//! Pixel-space shapes shared by the SVG and raster backends.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::{SvgElement, TextAnchor, TextBaseline};
use crate::render::{draw_marker, draw_rect, draw_rect_outline, draw_thick_line};

/// A resolved drawing command in figure pixels (origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape {
    Fill { rect: Rect, color: Rgba, edge: Option<(Rgba, f32)> },
    Disc { center: Point, diameter: f32, color: Rgba },
    Stroke { points: Vec<Point>, width: f32, color: Rgba },
    Label { at: Point, text: String, size: f32, color: Rgba, anchor: TextAnchor, baseline: TextBaseline, rotate: f32 },
}

impl Shape {
    pub(crate) fn to_svg(&self) -> SvgElement {
        match self {
            Self::Fill { rect, color, edge } => SvgElement::Rect {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                fill: *color,
                stroke: edge.map(|(c, _)| c),
                stroke_width: edge.map_or(1.0, |(_, w)| w),
            },
            Self::Disc { center, diameter, color } => {
                SvgElement::Circle { cx: center.x, cy: center.y, r: diameter / 2.0, fill: *color }
            }
            Self::Stroke { points, width, color } => match points.as_slice() {
                [a, b] => SvgElement::Line { x1: a.x, y1: a.y, x2: b.x, y2: b.y, stroke: *color, stroke_width: *width },
                _ => SvgElement::Polyline {
                    points: points.iter().map(|p| (p.x, p.y)).collect(),
                    stroke: *color,
                    stroke_width: *width,
                },
            },
            Self::Label { at, text, size, color, anchor, baseline, rotate } => SvgElement::Text {
                x: at.x,
                y: at.y,
                text: text.clone(),
                font_size: *size,
                fill: *color,
                anchor: *anchor,
                baseline: *baseline,
                rotate: *rotate,
            },
        }
    }

    /// Rasterize onto `fb`. Labels are skipped.
    pub(crate) fn rasterize(&self, fb: &mut Framebuffer) {
        match self {
            Self::Fill { rect, color, edge } => {
                draw_rect(fb, *rect, *color);
                if let Some((edge_color, width)) = edge {
                    draw_rect_outline(fb, *rect, *edge_color, width.round().max(1.0) as u32);
                }
            }
            Self::Disc { center, diameter, color } => draw_marker(fb, *center, *diameter, *color),
            Self::Stroke { points, width, color } => {
                for pair in points.windows(2) {
                    draw_thick_line(fb, pair[0], pair[1], *width, *color);
                }
            }
            Self::Label { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_point_stroke_becomes_line() {
        let shape = Shape::Stroke {
            points: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            width: 2.0,
            color: Rgba::BLACK,
        };
        assert!(matches!(shape.to_svg(), SvgElement::Line { .. }));
    }

    #[test]
    fn test_fill_with_edge_keeps_stroke() {
        let shape = Shape::Fill {
            rect: Rect::new(1.0, 1.0, 4.0, 4.0),
            color: Rgba::RED,
            edge: Some((Rgba::BLACK, 1.5)),
        };
        match shape.to_svg() {
            SvgElement::Rect { stroke, stroke_width, .. } => {
                assert_eq!(stroke, Some(Rgba::BLACK));
                assert!((stroke_width - 1.5).abs() < f32::EPSILON);
            }
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn test_rasterize_fill_and_edge() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        Shape::Fill { rect: Rect::new(2.0, 2.0, 10.0, 10.0), color: Rgba::RED, edge: Some((Rgba::BLUE, 1.0)) }
            .rasterize(&mut fb);

        assert_eq!(fb.get_pixel(6, 6), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(2, 2), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::WHITE));
    }

    #[test]
    fn test_labels_are_not_rasterized() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        Shape::Label {
            at: Point::new(5.0, 5.0),
            text: "x".to_string(),
            size: 10.0,
            color: Rgba::BLACK,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            rotate: 0.0,
        }
        .rasterize(&mut fb);
        assert_eq!(fb.count_color(Rgba::WHITE), 100);
    }
}
