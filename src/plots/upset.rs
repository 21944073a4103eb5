//! Upset plot: set intersections as a bar chart over a dot matrix.
//!
//! Five regions share one figure. The intersection bars sit above the dot
//! matrix, which marks the categories in each group; category totals and
//! category names run down the left side.
//!
//! ```
//! use upset_viz::prelude::*;
//!
//! let categories = Categories::new()
//!     .with("A", [1, 2, 3])
//!     .with("B", [2, 3, 4])
//!     .with("C", [4, 5]);
//!
//! let mut upset = make_upset(&categories, "Example").unwrap();
//! upset.color_bars("A", Rgba::RED).unwrap();
//!
//! assert_eq!(upset.groups()[0], Group::new(["A", "B"]));
//! assert!(upset.to_svg().unwrap().contains("Size of Intersection"));
//! ```
//!
//! # References
//!
//! - Lex, A., Gehlenborg, N., Strobelt, H., Vuillemot, R., & Pfister, H. (2014).
//!   "UpSet: Visualization of Intersecting Sets." IEEE TVCG 20(12).

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::{Figure, Mark, Region, RegionId, Tick};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::intersection::{intersection_sizes, Categories, Group, Intersections};
use crate::output::{TerminalEncoder, TextAnchor, TextBaseline};
use crate::scale::{format_tick, nice_ticks};
use crate::style::UpsetStyle;
use std::hash::Hash;
use std::io::Write;
use std::path::Path;

/// Width reserved for title, totals and labels, in inches.
const FIXED_WIDTH_IN: f32 = 3.5;
/// Vertical padding around the two stacked blocks, in inches.
const VERTICAL_PADDING_IN: f32 = 0.65;
const CATEGORY_BAR_WIDTH_IN: f32 = 1.5;
const LABEL_WIDTH_IN: f32 = 1.2;
const TITLE_WIDTH_IN: f32 = 2.0;
const SIDE_MARGIN_IN: f32 = 0.15;
const HEIGHT_MARGIN_IN: f32 = 0.3;
/// Headroom above the tallest intersection bar.
const BAR_HEADROOM: f32 = 1.05;
/// Headroom beyond the longest category bar.
const CATEGORY_HEADROOM: f32 = 1.1;
const CATEGORY_TICKS: usize = 3;

/// Physical figure size and fractional region placement.
///
/// Rects are `[left, bottom, width, height]` fractions of the figure with the
/// origin at the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpsetLayout {
    /// Figure width in inches.
    pub width_in: f32,
    /// Figure height in inches.
    pub height_in: f32,
    /// Title region (frameless).
    pub title: Rect,
    /// Intersection bar chart.
    pub bars: Rect,
    /// Dot matrix.
    pub dots: Rect,
    /// Category total bars.
    pub category_bars: Rect,
    /// Category names (frameless).
    pub category_labels: Rect,
}

impl UpsetLayout {
    /// Size the figure for `n_categories` rows and `n_groups` columns.
    #[must_use]
    pub fn compute(n_categories: usize, n_groups: usize, style: &UpsetStyle) -> Self {
        let fig_cat_height = style.row_height_in * n_categories as f32;
        let fig_bar_height = style.bar_chart_height_in;
        let fig_bar_width = style.column_width_in * n_groups as f32;
        let width_in = FIXED_WIDTH_IN + fig_bar_width;
        let height_in = fig_cat_height + fig_bar_height + VERTICAL_PADDING_IN;

        let cat_height = fig_cat_height / height_in;
        let bar_height = fig_bar_height / height_in;
        let catbar_width = CATEGORY_BAR_WIDTH_IN / width_in;
        let cat_width = LABEL_WIDTH_IN / width_in;
        let bar_width = fig_bar_width / width_in;
        let title_width = TITLE_WIDTH_IN / width_in;
        let side_margin = SIDE_MARGIN_IN / width_in;
        let left = cat_width + catbar_width + side_margin;
        let height_margin = HEIGHT_MARGIN_IN / height_in;
        let upper = cat_height + 2.0 * height_margin;

        Self {
            width_in,
            height_in,
            title: Rect::new(side_margin, upper, title_width, bar_height),
            bars: Rect::new(left, upper, bar_width, bar_height),
            dots: Rect::new(left, height_margin, bar_width, cat_height),
            category_bars: Rect::new(side_margin, height_margin, catbar_width, cat_height),
            category_labels: Rect::new(catbar_width + side_margin, height_margin, cat_width, cat_height),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Regions {
    title: RegionId,
    bars: RegionId,
    dots: RegionId,
    category_bars: RegionId,
    category_labels: RegionId,
}

/// An upset plot under construction.
///
/// Each drawing operation adds marks to the owned [`Figure`]; calling one
/// twice draws twice.
#[derive(Debug, Clone)]
pub struct Upset {
    style: UpsetStyle,
    categories: Vec<String>,
    counts: Vec<usize>,
    intersections: Intersections,
    groups: Vec<Group>,
    layout: UpsetLayout,
    figure: Figure,
    regions: Regions,
}

impl Upset {
    /// Group the categories and lay out an empty figure with the default style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no categories.
    pub fn new<E>(categories: &Categories<E>) -> Result<Self>
    where
        E: Eq + Hash + Clone,
    {
        Self::with_style(categories, UpsetStyle::default())
    }

    /// Like [`Upset::new`] with an explicit style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when there are no categories, or
    /// [`Error::InvalidDimensions`] when the style yields an empty figure.
    pub fn with_style<E>(categories: &Categories<E>, style: UpsetStyle) -> Result<Self>
    where
        E: Eq + Hash + Clone,
    {
        if categories.is_empty() {
            return Err(Error::EmptyData);
        }

        let intersections = intersection_sizes(categories);
        let groups: Vec<Group> = intersections.ordered().into_iter().map(|(group, _)| group).collect();
        let names: Vec<String> = categories.names().map(str::to_string).collect();
        let layout = UpsetLayout::compute(names.len(), groups.len(), &style);

        let mut figure = Figure::new(layout.width_in, layout.height_in, style.dpi)?;
        figure.background = style.background;
        figure.text_color = style.text_color;
        figure.font_pt = style.label_font_pt;

        let regions = Regions {
            title: figure.add_region(Region::frameless(layout.title)),
            bars: figure.add_region(Region::new(layout.bars)),
            dots: figure.add_region(Region::new(layout.dots)),
            category_bars: figure.add_region(Region::new(layout.category_bars)),
            category_labels: figure.add_region(Region::frameless(layout.category_labels)),
        };

        tracing::debug!(
            categories = names.len(),
            groups = groups.len(),
            width_in = layout.width_in,
            height_in = layout.height_in,
            "laid out upset plot"
        );

        Ok(Self {
            style,
            counts: categories.counts(),
            categories: names,
            intersections,
            groups,
            layout,
            figure,
            regions,
        })
    }

    /// Write `label` centered in the title region.
    pub fn title(&mut self, label: &str) -> &mut Self {
        let (size_pt, color) = (self.style.title_font_pt, self.style.text_color);
        let region = self.figure.region_mut(self.regions.title);
        region.push(Mark::Text {
            x: 0.0,
            y: 0.0,
            text: label.to_string(),
            size_pt,
            color,
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
        });
        region.set_xlim(-1.0, 1.0);
        region.set_ylim(-1.0, 1.0);
        region.axis_off();
        self
    }

    /// Write category names in row order, striping every other row.
    pub fn category_labels(&mut self) -> &mut Self {
        let rows = self.categories.len() as f32;
        let style = &self.style;
        let region = self.figure.region_mut(self.regions.category_labels);

        // Stripes go first so the names draw over them.
        for row in (0..self.categories.len()).step_by(2) {
            region.push(Mark::Rect {
                x: -0.8,
                y: row as f32 - 0.5,
                width: 2.0,
                height: 1.0,
                fill: style.label_stripe,
                edge: None,
            });
        }
        for (row, name) in self.categories.iter().enumerate() {
            region.push(Mark::Text {
                x: 0.0,
                y: row as f32,
                text: name.clone(),
                size_pt: style.label_font_pt,
                color: style.text_color,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
            });
        }

        region.set_ylim(rows - 0.5, -0.5);
        region.set_xlim(-1.0, 1.0);
        region.axis_off();
        self
    }

    /// Draw the membership matrix: a light dot per cell, and dark dots joined
    /// by a line on each group's member categories.
    pub fn intersection_dots(&mut self) -> &mut Self {
        let columns = self.groups.len();
        let rows = self.categories.len();
        let style = &self.style;
        let members: Vec<Vec<usize>> = self.groups.iter().map(|g| self.member_rows(g)).collect();
        let region = self.figure.region_mut(self.regions.dots);

        region.axis_off();
        region.set_ylim(rows as f32 - 0.5, -0.5);
        region.set_xlim(-0.5, column_limit(columns));

        for row in 0..rows {
            if row % 2 == 0 {
                region.push(Mark::Rect {
                    x: -1.0,
                    y: row as f32 - 0.5,
                    width: columns as f32 + 1.0,
                    height: 1.0,
                    fill: style.matrix_stripe,
                    edge: None,
                });
            }
        }
        for row in 0..rows {
            for column in 0..columns {
                region.push(Mark::Marker {
                    x: column as f32,
                    y: row as f32,
                    size_pt: style.marker_pt,
                    color: style.inactive_dot,
                });
            }
        }

        for (column, rows) in members.iter().enumerate() {
            let x = column as f32;
            if rows.len() > 1 {
                region.push(Mark::Polyline {
                    points: rows.iter().map(|&row| Point::new(x, row as f32)).collect(),
                    width_pt: style.connector_pt,
                    color: style.active_dot,
                });
            }
            for &row in rows {
                region.push(Mark::Marker { x, y: row as f32, size_pt: style.marker_pt, color: style.active_dot });
            }
        }
        self
    }

    /// Draw one bar per group, tallest first, labeled with its count.
    pub fn intersection_bars(&mut self) -> &mut Self {
        let counts: Vec<usize> = self.groups.iter().map(|g| self.intersections.get(g)).collect();
        let max = counts.iter().copied().max().unwrap_or(0);
        let top = if max == 0 { 1.0 } else { max as f32 * BAR_HEADROOM };
        let style = &self.style;
        let region = self.figure.region_mut(self.regions.bars);

        for (column, &count) in counts.iter().enumerate() {
            region.push(Mark::Bar {
                x: column as f32,
                height: count as f32,
                width: style.bar_width,
                fill: style.bar_color,
                edge: None,
            });
        }

        region.set_xlim(-0.5, column_limit(counts.len()));
        region.set_ylim(0.0, top);
        region.x_ticks =
            counts.iter().enumerate().map(|(column, count)| Tick::new(column as f32, count.to_string())).collect();
        region.x_tick_length_pt = 0.0;
        region.y_ticks =
            nice_ticks(0.0, top, style.max_y_ticks).into_iter().map(|v| Tick::new(v, format_tick(v))).collect();
        region.y_label = Some("Size of Intersection".to_string());
        self
    }

    /// Draw each category's total as a bar growing leftward from its row.
    pub fn category_bars(&mut self) -> &mut Self {
        let rows = self.categories.len() as f32;
        let max = self.counts.iter().copied().max().unwrap_or(0);
        let extent = if max == 0 {
            tracing::warn!("every category is empty; using a unit scale for category totals");
            1.0
        } else {
            max as f32 * CATEGORY_HEADROOM
        };
        let style = &self.style;
        let region = self.figure.region_mut(self.regions.category_bars);

        for (row, &count) in self.counts.iter().enumerate() {
            region.push(Mark::BarH {
                y: row as f32,
                length: count as f32,
                height: style.bar_width,
                fill: style.category_bar_color,
                edge: None,
            });
        }

        region.set_xlim(extent, 0.0);
        region.set_ylim(rows - 0.5, -0.5);
        region.y_ticks.clear();
        region.x_ticks =
            nice_ticks(0.0, extent, CATEGORY_TICKS).into_iter().map(|v| Tick::new(v, format_tick(v))).collect();
        region.title = Some(("Size of Group".to_string(), style.label_font_pt));
        self
    }

    /// Overlay bars in `color` on every group that includes `category`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is not plotted.
    pub fn color_bars(&mut self, category: &str, color: Rgba) -> Result<&mut Self> {
        self.color_bars_all(&[category], color)
    }

    /// Overlay bars in `color` on every group that includes all of `categories`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if any category is not plotted.
    pub fn color_bars_all<S: AsRef<str>>(&mut self, categories: &[S], color: Rgba) -> Result<&mut Self> {
        let columns = self.groups_superset_of(categories)?;
        tracing::trace!(groups = ?columns, %color, "highlighting bars");

        let marks: Vec<Mark> = columns
            .iter()
            .map(|&column| Mark::Bar {
                x: column as f32,
                height: self.intersections.get(&self.groups[column]) as f32,
                width: self.style.bar_width,
                fill: color,
                edge: Some(self.style.highlight_edge),
            })
            .collect();
        let region = self.figure.region_mut(self.regions.bars);
        for mark in marks {
            region.push(mark);
        }
        Ok(self)
    }

    /// Overlay a dot in `color` on `category`'s row for every group containing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is not plotted.
    pub fn color_dots(&mut self, category: &str, color: Rgba) -> Result<&mut Self> {
        let row = self.category_row(category)? as f32;
        let columns = self.groups_containing(category)?;
        tracing::trace!(category, groups = ?columns, %color, "highlighting dots");

        let size_pt = self.style.highlight_marker_pt;
        let region = self.figure.region_mut(self.regions.dots);
        for column in columns {
            region.push(Mark::Marker { x: column as f32, y: row, size_pt, color });
        }
        Ok(self)
    }

    /// Indices of groups whose members include `category`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is not plotted.
    pub fn groups_containing(&self, category: &str) -> Result<Vec<usize>> {
        self.category_row(category)?;
        Ok(self.groups.iter().enumerate().filter(|(_, g)| g.contains(category)).map(|(i, _)| i).collect())
    }

    /// Indices of groups whose members include every one of `categories`.
    ///
    /// An empty selection matches every group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if any category is not plotted.
    pub fn groups_superset_of<S: AsRef<str>>(&self, categories: &[S]) -> Result<Vec<usize>> {
        for category in categories {
            self.category_row(category.as_ref())?;
        }
        Ok(self
            .groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.is_superset_of(categories))
            .map(|(i, _)| i)
            .collect())
    }

    /// Print the rasterized figure to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn show(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.show_to(&mut out)
    }

    /// Print the rasterized figure to `out` in the terminal encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn show_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let fb = self.figure.to_framebuffer()?;
        TerminalEncoder::new().write_to(&fb, out)
    }

    /// Render the figure as SVG.
    ///
    /// # Errors
    ///
    /// Returns an error if a region has degenerate limits.
    pub fn to_svg(&self) -> Result<String> {
        self.figure.to_svg()
    }

    /// Write the figure as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        self.figure.save_svg(path)
    }

    /// Rasterize the figure.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        self.figure.to_framebuffer()
    }

    /// Write the rasterized figure as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or writing fails.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.figure.save_png(path)
    }

    /// Groups in plotting order (largest first).
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Column of `group`, if it was realized.
    #[must_use]
    pub fn group_index(&self, group: &Group) -> Option<usize> {
        self.groups.iter().position(|g| g == group)
    }

    /// Element count of the group in column `index`.
    #[must_use]
    pub fn count_of(&self, index: usize) -> Option<usize> {
        self.groups.get(index).map(|g| self.intersections.get(g))
    }

    /// Category names in row order.
    #[must_use]
    pub fn category_names(&self) -> &[String] {
        &self.categories
    }

    /// Category totals in row order.
    #[must_use]
    pub fn category_counts(&self) -> &[usize] {
        &self.counts
    }

    /// Group counts.
    #[must_use]
    pub fn intersections(&self) -> &Intersections {
        &self.intersections
    }

    /// Figure size and region placement.
    #[must_use]
    pub fn layout(&self) -> &UpsetLayout {
        &self.layout
    }

    /// The figure being drawn.
    #[must_use]
    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    /// Style in effect.
    #[must_use]
    pub fn style(&self) -> &UpsetStyle {
        &self.style
    }

    /// Intersection bar region.
    #[must_use]
    pub fn bars_region(&self) -> &Region {
        self.figure.region(self.regions.bars)
    }

    /// Dot matrix region.
    #[must_use]
    pub fn dots_region(&self) -> &Region {
        self.figure.region(self.regions.dots)
    }

    /// Category total region.
    #[must_use]
    pub fn category_bars_region(&self) -> &Region {
        self.figure.region(self.regions.category_bars)
    }

    fn category_row(&self, category: &str) -> Result<usize> {
        self.categories
            .iter()
            .position(|name| name == category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))
    }

    fn member_rows(&self, group: &Group) -> Vec<usize> {
        let mut rows: Vec<usize> =
            group.names().iter().filter_map(|name| self.categories.iter().position(|c| c == name)).collect();
        rows.sort_unstable();
        rows
    }
}

/// Right x limit for `columns` unit-spaced columns; a plot with no groups
/// keeps a one-column axis.
fn column_limit(columns: usize) -> f32 {
    columns.max(1) as f32 - 0.5
}

/// Build an upset plot with title, labels, totals, dots and bars drawn.
///
/// # Errors
///
/// Returns [`Error::EmptyData`] when there are no categories.
pub fn make_upset<E>(categories: &Categories<E>, label: &str) -> Result<Upset>
where
    E: Eq + Hash + Clone,
{
    let mut upset = Upset::new(categories)?;
    upset.title(label).category_labels().category_bars().intersection_dots().intersection_bars();
    Ok(upset)
}
