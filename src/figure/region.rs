//! Figure regions (one set of axes each) and the marks drawn into them.

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::output::{TextAnchor, TextBaseline};

/// A labeled tick position along one axis, in data units.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Position in data units.
    pub position: f32,
    /// Label drawn next to the tick.
    pub label: String,
}

impl Tick {
    /// Create a tick.
    #[must_use]
    pub fn new(position: f32, label: impl Into<String>) -> Self {
        Self { position, label: label.into() }
    }
}

/// Something drawn inside a region, positioned in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Axis-aligned rectangle from corner `(x, y)` spanning `width` by `height`.
    Rect {
        /// Corner x.
        x: f32,
        /// Corner y.
        y: f32,
        /// Extent along x.
        width: f32,
        /// Extent along y.
        height: f32,
        /// Fill color.
        fill: Rgba,
        /// Optional one-point edge.
        edge: Option<Rgba>,
    },
    /// Vertical bar centered on `x`, rising from 0 to `height`.
    Bar {
        /// Center x.
        x: f32,
        /// Bar value.
        height: f32,
        /// Thickness in data units.
        width: f32,
        /// Fill color.
        fill: Rgba,
        /// Optional one-point edge.
        edge: Option<Rgba>,
    },
    /// Horizontal bar centered on `y`, extending from 0 to `length`.
    BarH {
        /// Center y.
        y: f32,
        /// Bar value.
        length: f32,
        /// Thickness in data units.
        height: f32,
        /// Fill color.
        fill: Rgba,
        /// Optional one-point edge.
        edge: Option<Rgba>,
    },
    /// Round marker with a diameter in points.
    Marker {
        /// Center x.
        x: f32,
        /// Center y.
        y: f32,
        /// Diameter in points.
        size_pt: f32,
        /// Fill color.
        color: Rgba,
    },
    /// Connected line through data points, width in points.
    Polyline {
        /// Vertices in data units.
        points: Vec<Point>,
        /// Stroke width in points.
        width_pt: f32,
        /// Stroke color.
        color: Rgba,
    },
    /// Text anchored at a data position.
    Text {
        /// Anchor x.
        x: f32,
        /// Anchor y.
        y: f32,
        /// Content.
        text: String,
        /// Font size in points.
        size_pt: f32,
        /// Fill color.
        color: Rgba,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Vertical alignment.
        baseline: TextBaseline,
    },
}

/// One set of axes placed inside a figure.
///
/// `bounds` is fractional figure space with the origin at the bottom-left
/// (`x` = left, `y` = bottom). Either axis limit pair may be inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Fractional placement `[left, bottom, width, height]`.
    pub bounds: Rect,
    /// Data limits along x (left edge, right edge).
    pub xlim: (f32, f32),
    /// Data limits along y (bottom edge, top edge).
    pub ylim: (f32, f32),
    /// Draw the rectangular frame (spines).
    pub frame: bool,
    /// Draw frame, ticks and axis labels at all.
    pub axis_visible: bool,
    /// Labeled ticks under the bottom edge.
    pub x_ticks: Vec<Tick>,
    /// Labeled ticks left of the left edge.
    pub y_ticks: Vec<Tick>,
    /// Length of x tick marks in points.
    pub x_tick_length_pt: f32,
    /// Rotated label along the left edge.
    pub y_label: Option<String>,
    /// Title above the top edge, with its font size in points.
    pub title: Option<(String, f32)>,
    marks: Vec<Mark>,
}

impl Region {
    /// Default tick length in points.
    pub const TICK_LENGTH_PT: f32 = 3.5;

    /// Framed region with unit limits and no ticks.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            frame: true,
            axis_visible: true,
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            x_tick_length_pt: Self::TICK_LENGTH_PT,
            y_label: None,
            title: None,
            marks: Vec::new(),
        }
    }

    /// Region drawn without a frame.
    #[must_use]
    pub fn frameless(bounds: Rect) -> Self {
        Self { frame: false, ..Self::new(bounds) }
    }

    /// Set x limits (left, right).
    pub fn set_xlim(&mut self, left: f32, right: f32) {
        self.xlim = (left, right);
    }

    /// Set y limits (bottom, top). Pass `bottom > top` to flip the axis.
    pub fn set_ylim(&mut self, bottom: f32, top: f32) {
        self.ylim = (bottom, top);
    }

    /// Hide frame, ticks and labels; only marks are drawn.
    pub fn axis_off(&mut self) {
        self.axis_visible = false;
    }

    /// Append a mark. Later marks draw over earlier ones.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Marks in drawing order.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_defaults() {
        let region = Region::new(Rect::new(0.1, 0.1, 0.5, 0.5));
        assert!(region.frame);
        assert!(region.axis_visible);
        assert!(region.marks().is_empty());
        assert_eq!(region.xlim, (0.0, 1.0));
    }

    #[test]
    fn test_frameless_and_axis_off() {
        let mut region = Region::frameless(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(!region.frame);
        region.axis_off();
        assert!(!region.axis_visible);
    }

    #[test]
    fn test_flipped_limits_are_kept_as_given() {
        let mut region = Region::new(Rect::default());
        region.set_ylim(2.5, -0.5);
        assert_eq!(region.ylim, (2.5, -0.5));
    }

    #[test]
    fn test_marks_keep_insertion_order() {
        let mut region = Region::new(Rect::default());
        region.push(Mark::Marker { x: 0.0, y: 0.0, size_pt: 5.0, color: Rgba::BLACK });
        region.push(Mark::Bar { x: 0.0, height: 2.0, width: 0.8, fill: Rgba::RED, edge: None });

        assert!(matches!(region.marks()[0], Mark::Marker { .. }));
        assert!(matches!(region.marks()[1], Mark::Bar { .. }));
    }
}
