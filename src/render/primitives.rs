//! Primitive rasterization functions.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a one-pixel line using Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a line of the given pixel width with round caps.
///
/// Stamps filled discs along the segment; widths of one pixel or less fall
/// back to [`draw_line`].
pub fn draw_thick_line(fb: &mut Framebuffer, from: Point, to: Point, width: f32, color: Rgba) {
    if width <= 1.0 {
        draw_line(fb, from.x as i32, from.y as i32, to.x as i32, to.y as i32, color);
        return;
    }

    let radius = (width / 2.0).round() as i32;
    let steps = from.distance(to).ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from.x + (to.x - from.x) * t;
        let y = from.y + (to.y - from.y) * t;
        draw_circle(fb, x.round() as i32, y.round() as i32, radius, color);
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle given in pixel coordinates.
///
/// Fractional edges are rounded to the nearest pixel boundary.
pub fn draw_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    let x0 = rect.x.round().max(0.0);
    let y0 = rect.y.round().max(0.0);
    let x1 = rect.right().round().max(0.0);
    let y1 = rect.bottom().round().max(0.0);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    fb.fill_rect(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32, color);
}

/// Draw a rectangle outline of `thickness` pixels inside `rect`.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: Rect, color: Rgba, thickness: u32) {
    let t = thickness.max(1) as f32;
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }

    draw_rect(fb, Rect::new(rect.x, rect.y, rect.width, t.min(rect.height)), color);
    draw_rect(fb, Rect::new(rect.x, rect.bottom() - t, rect.width, t.min(rect.height)), color);
    draw_rect(fb, Rect::new(rect.x, rect.y, t.min(rect.width), rect.height), color);
    draw_rect(fb, Rect::new(rect.right() - t, rect.y, t.min(rect.width), rect.height), color);
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_horizontal_line(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_line(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a marker of `diameter` pixels centered on `center`.
pub fn draw_marker(fb: &mut Framebuffer, center: Point, diameter: f32, color: Rgba) {
    let radius = (diameter / 2.0).round() as i32;
    draw_circle(fb, center.x.round() as i32, center.y.round() as i32, radius, color);
}

#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}

// ============================================================================
// Tests
// ============================================================================
