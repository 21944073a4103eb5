//! Figure model: a physical canvas holding independently scaled regions.
//!
//! A [`Figure`] is sized in inches and rendered at a given dpi. Each
//! [`Region`] occupies a fractional rectangle of the canvas (origin at the
//! bottom-left) and maps its own data limits onto that rectangle. Sizes given
//! in points (markers, line widths, fonts) convert to pixels at `dpi / 72`.

mod region;
mod shape;

pub use region::{Mark, Region, Tick};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::output::{PngEncoder, SvgEncoder, TextAnchor, TextBaseline};
use crate::scale::{LinearScale, Scale};
use shape::Shape;
use std::path::Path;

/// Handle to a region inside the figure that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

/// Spine width in points.
const SPINE_PT: f32 = 0.8;
/// Gap between a tick mark and its label, in points.
const TICK_PAD_PT: f32 = 3.5;
/// Rough glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.6;

/// A canvas of fixed physical size with positioned regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width in inches.
    pub width_in: f32,
    /// Height in inches.
    pub height_in: f32,
    /// Pixels per inch.
    pub dpi: f32,
    /// Canvas fill.
    pub background: Rgba,
    /// Color of tick labels, axis labels and titles.
    pub text_color: Rgba,
    /// Tick label and axis label size, in points.
    pub font_pt: f32,
    regions: Vec<Region>,
}

impl Figure {
    /// Create an empty figure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the figure is less than one
    /// pixel in either direction.
    pub fn new(width_in: f32, height_in: f32, dpi: f32) -> Result<Self> {
        let figure = Self {
            width_in,
            height_in,
            dpi,
            background: Rgba::WHITE,
            text_color: Rgba::BLACK,
            font_pt: 10.0,
            regions: Vec::new(),
        };
        let (width, height) = figure.pixel_size();
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(figure)
    }

    /// Add a region; later regions draw over earlier ones.
    pub fn add_region(&mut self, region: Region) -> RegionId {
        self.regions.push(region);
        RegionId(self.regions.len() - 1)
    }

    /// Region behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different figure.
    #[must_use]
    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id.0]
    }

    /// Mutable region behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different figure.
    pub fn region_mut(&mut self, id: RegionId) -> &mut Region {
        &mut self.regions[id.0]
    }

    /// All regions in drawing order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Canvas size in whole pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f32| {
            let v = (inches * self.dpi).round();
            if v.is_finite() && v > 0.0 { v as u32 } else { 0 }
        };
        (px(self.width_in), px(self.height_in))
    }

    /// Convert points to pixels.
    #[must_use]
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    /// Pixel rectangle (origin top-left) covered by `region`.
    #[must_use]
    pub fn region_pixels(&self, region: &Region) -> Rect {
        let (w, h) = self.pixel_size();
        let (w, h) = (w as f32, h as f32);
        let b = region.bounds;
        Rect::new(b.x * w, (1.0 - b.y - b.height) * h, b.width * w, b.height * h)
    }

    /// Render as an SVG document, text included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if a region has degenerate limits.
    pub fn to_svg(&self) -> Result<String> {
        let (width, height) = self.pixel_size();
        let mut encoder = SvgEncoder::new(width, height).background(Some(self.background));
        for shape in self.shapes()? {
            encoder.add_element(shape.to_svg());
        }
        tracing::debug!(width, height, elements = encoder.len(), "rendered figure to SVG");
        Ok(encoder.render())
    }

    /// Write the figure as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg()?)?;
        tracing::info!(path = %path.display(), "wrote SVG");
        Ok(())
    }

    /// Rasterize the figure. Text is not drawn.
    ///
    /// # Errors
    ///
    /// Returns an error for a degenerate region or framebuffer size.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let (width, height) = self.pixel_size();
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(self.background);
        let shapes = self.shapes()?;
        for shape in &shapes {
            shape.rasterize(&mut fb);
        }
        tracing::debug!(width, height, shapes = shapes.len(), "rasterized figure");
        if tracing::enabled!(tracing::Level::TRACE) {
            let (min, max, mean) = fb.luminance_stats();
            tracing::trace!(min, max, mean, backend = ?Framebuffer::backend(), "luminance");
        }
        Ok(fb)
    }

    /// Write the rasterized figure as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or writing fails.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        PngEncoder::write_to_file(&self.to_framebuffer()?, path)?;
        tracing::info!(path = %path.display(), "wrote PNG");
        Ok(())
    }

    fn shapes(&self) -> Result<Vec<Shape>> {
        let mut shapes = Vec::new();
        for region in &self.regions {
            self.region_shapes(region, &mut shapes)?;
        }
        Ok(shapes)
    }

    fn region_shapes(&self, region: &Region, out: &mut Vec<Shape>) -> Result<()> {
        let bounds = self.region_pixels(region);
        let xs = LinearScale::new(region.xlim, (bounds.x, bounds.right()))?;
        let ys = LinearScale::new(region.ylim, (bounds.bottom(), bounds.y))?;
        let to_px = |x: f32, y: f32| Point::new(xs.scale(x), ys.scale(y));
        let edge = |c: Option<Rgba>| c.map(|c| (c, self.points_to_px(1.0)));

        for mark in region.marks() {
            match mark {
                Mark::Rect { x, y, width, height, fill, edge: e } => {
                    let rect = Rect::from_corners(to_px(*x, *y), to_px(x + width, y + height));
                    push_clipped(out, rect, bounds, *fill, edge(*e));
                }
                Mark::Bar { x, height, width, fill, edge: e } => {
                    let half = width / 2.0;
                    let rect = Rect::from_corners(to_px(x - half, 0.0), to_px(x + half, *height));
                    push_clipped(out, rect, bounds, *fill, edge(*e));
                }
                Mark::BarH { y, length, height, fill, edge: e } => {
                    let half = height / 2.0;
                    let rect = Rect::from_corners(to_px(0.0, y - half), to_px(*length, y + half));
                    push_clipped(out, rect, bounds, *fill, edge(*e));
                }
                Mark::Marker { x, y, size_pt, color } => out.push(Shape::Disc {
                    center: to_px(*x, *y),
                    diameter: self.points_to_px(*size_pt),
                    color: *color,
                }),
                Mark::Polyline { points, width_pt, color } => out.push(Shape::Stroke {
                    points: points.iter().map(|p| to_px(p.x, p.y)).collect(),
                    width: self.points_to_px(*width_pt),
                    color: *color,
                }),
                Mark::Text { x, y, text, size_pt, color, anchor, baseline } => out.push(Shape::Label {
                    at: to_px(*x, *y),
                    text: text.clone(),
                    size: self.points_to_px(*size_pt),
                    color: *color,
                    anchor: *anchor,
                    baseline: *baseline,
                    rotate: 0.0,
                }),
            }
        }

        if region.axis_visible {
            self.axis_shapes(region, bounds, &xs, &ys, out);
        }
        Ok(())
    }

    fn axis_shapes(&self, region: &Region, bounds: Rect, xs: &LinearScale, ys: &LinearScale, out: &mut Vec<Shape>) {
        let color = self.text_color;
        let font = self.points_to_px(self.font_pt);
        let line = self.points_to_px(SPINE_PT);
        let pad = self.points_to_px(TICK_PAD_PT);
        let label = |at: Point, text: &str, size: f32, anchor: TextAnchor, baseline: TextBaseline, rotate: f32| Shape::Label {
            at,
            text: text.to_string(),
            size,
            color,
            anchor,
            baseline,
            rotate,
        };

        if region.frame {
            let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
            out.push(Shape::Stroke {
                points: vec![Point::new(l, t), Point::new(r, t), Point::new(r, b), Point::new(l, b), Point::new(l, t)],
                width: line,
                color,
            });
        }

        let x_len = self.points_to_px(region.x_tick_length_pt);
        for tick in &region.x_ticks {
            let x = xs.scale(tick.position);
            if x < bounds.x - 0.5 || x > bounds.right() + 0.5 {
                continue;
            }
            let y = bounds.bottom();
            if x_len > 0.0 {
                out.push(Shape::Stroke { points: vec![Point::new(x, y), Point::new(x, y + x_len)], width: line, color });
            }
            out.push(label(Point::new(x, y + x_len + pad), &tick.label, font, TextAnchor::Middle, TextBaseline::Hanging, 0.0));
        }

        let y_len = self.points_to_px(Region::TICK_LENGTH_PT);
        let mut widest = 0;
        for tick in &region.y_ticks {
            let y = ys.scale(tick.position);
            if y < bounds.y - 0.5 || y > bounds.bottom() + 0.5 {
                continue;
            }
            let x = bounds.x;
            out.push(Shape::Stroke { points: vec![Point::new(x - y_len, y), Point::new(x, y)], width: line, color });
            out.push(label(Point::new(x - y_len - pad, y), &tick.label, font, TextAnchor::End, TextBaseline::Middle, 0.0));
            widest = widest.max(tick.label.chars().count());
        }

        if let Some(text) = &region.y_label {
            let x = bounds.x - y_len - pad - widest as f32 * GLYPH_ASPECT * font - pad;
            let y = bounds.y + bounds.height / 2.0;
            out.push(label(Point::new(x, y), text, font, TextAnchor::Middle, TextBaseline::Alphabetic, -90.0));
        }

        if let Some((text, size_pt)) = &region.title {
            let at = Point::new(bounds.x + bounds.width / 2.0, bounds.y - 2.0 * pad);
            out.push(label(at, text, self.points_to_px(*size_pt), TextAnchor::Middle, TextBaseline::Alphabetic, 0.0));
        }
    }
}

fn push_clipped(out: &mut Vec<Shape>, rect: Rect, bounds: Rect, color: Rgba, edge: Option<(Rgba, f32)>) {
    if let Some(rect) = rect.intersection(&bounds) {
        out.push(Shape::Fill { rect, color, edge });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_figure() -> (Figure, RegionId) {
        let mut figure = Figure::new(2.0, 1.0, 100.0).unwrap();
        let mut region = Region::frameless(Rect::new(0.0, 0.0, 1.0, 1.0));
        region.axis_off();
        region.set_xlim(0.0, 10.0);
        region.set_ylim(0.0, 10.0);
        let id = figure.add_region(region);
        (figure, id)
    }

    #[test]
    fn test_pixel_size_and_invalid_dimensions() {
        let figure = Figure::new(3.5, 2.25, 100.0).unwrap();
        assert_eq!(figure.pixel_size(), (350, 225));
        assert!(matches!(Figure::new(0.0, 1.0, 100.0), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_region_pixels_flip_vertical_origin() {
        let figure = Figure::new(2.0, 1.0, 100.0).unwrap();
        let region = Region::new(Rect::new(0.25, 0.1, 0.5, 0.4));
        let px = figure.region_pixels(&region);
        assert_relative_eq!(px.x, 50.0);
        assert_relative_eq!(px.y, 50.0);
        assert_relative_eq!(px.width, 100.0);
        assert_relative_eq!(px.height, 40.0);
    }

    #[test]
    fn test_bar_maps_to_region_pixels() {
        let (mut figure, id) = unit_figure();
        figure.region_mut(id).push(Mark::Bar { x: 5.0, height: 5.0, width: 2.0, fill: Rgba::RED, edge: None });

        let fb = figure.to_framebuffer().unwrap();
        // x 4..6 of 0..10 over 200 px, y 0..5 of 0..10 over 100 px (bottom half).
        assert_eq!(fb.get_pixel(100, 75), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(100, 25), Some(Rgba::WHITE));
        assert_eq!(fb.count_color(Rgba::RED), 40 * 50);
    }

    #[test]
    fn test_rect_marks_are_clipped() {
        let (mut figure, id) = unit_figure();
        figure.region_mut(id).push(Mark::Rect {
            x: -5.0,
            y: 0.0,
            width: 100.0,
            height: 1.0,
            fill: Rgba::BLUE,
            edge: None,
        });

        let svg = figure.to_svg().unwrap();
        assert!(svg.contains(r#"<rect x="0" y="90" width="200" height="10""#));
    }

    #[test]
    fn test_inverted_ylim_puts_first_row_on_top() {
        let (mut figure, id) = unit_figure();
        figure.region_mut(id).set_ylim(1.5, -0.5);
        figure.region_mut(id).push(Mark::Marker { x: 5.0, y: 0.0, size_pt: 7.2, color: Rgba::BLACK });

        let fb = figure.to_framebuffer().unwrap();
        assert_eq!(fb.get_pixel(100, 25), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(100, 75), Some(Rgba::WHITE));
    }

    #[test]
    fn test_degenerate_limits_are_reported() {
        let (mut figure, id) = unit_figure();
        figure.region_mut(id).set_xlim(1.0, 1.0);
        assert!(matches!(figure.to_svg(), Err(Error::ScaleDomain(_))));
    }

    #[test]
    fn test_axis_decorations_in_svg() {
        let mut figure = Figure::new(4.0, 3.0, 72.0).unwrap();
        let mut region = Region::new(Rect::new(0.2, 0.2, 0.6, 0.6));
        region.set_ylim(0.0, 4.0);
        region.y_ticks = vec![Tick::new(0.0, "0"), Tick::new(4.0, "4"), Tick::new(9.0, "9")];
        region.x_ticks = vec![Tick::new(0.5, "17")];
        region.y_label = Some("Size".to_string());
        region.title = Some(("Heading".to_string(), 10.0));
        figure.add_region(region);

        let svg = figure.to_svg().unwrap();
        assert!(svg.contains(">17</text>"));
        assert!(svg.contains(">4</text>"));
        assert!(!svg.contains(">9</text>"));
        assert!(svg.contains("rotate(-90"));
        assert!(svg.contains(">Heading</text>"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_hidden_axis_draws_no_decorations() {
        let (mut figure, id) = unit_figure();
        figure.region_mut(id).title = Some(("Hidden".to_string(), 10.0));
        let svg = figure.to_svg().unwrap();
        assert!(!svg.contains("Hidden"));
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn test_save_png_and_svg() {
        let (figure, _) = unit_figure();
        let dir = tempfile::tempdir().unwrap();
        figure.save_png(dir.path().join("f.png")).unwrap();
        figure.save_svg(dir.path().join("f.svg")).unwrap();

        let bytes = std::fs::read(dir.path().join("f.png")).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert!(std::fs::read_to_string(dir.path().join("f.svg")).unwrap().starts_with("<svg"));
    }
}
