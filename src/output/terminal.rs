//! Terminal output encoder (ASCII/Unicode/ANSI).
//!
//! Downsamples a framebuffer to character cells. Each cell averages the block
//! of pixels it covers, so thin connector lines and small markers survive the
//! reduction instead of vanishing between sample points.
//!
//! - ASCII: grayscale ramp ` .:-=+*#%@`
//! - Unicode: half-block characters (▀) for twice the vertical resolution
//! - ANSI: 24-bit background colors, one cell per character

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fmt::Write as FmtWrite;
use std::io::Write;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    #[default]
    UnicodeHalfBlock,
    /// Unicode full blocks with ANSI 24-bit color
    AnsiTrueColor,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
    height: Option<u32>,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { mode: TerminalMode::default(), width: None, height: None }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target width in characters.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.max(1));
        self
    }

    /// Set the target height in lines. Derived from the width when unset.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.max(1));
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::UnicodeHalfBlock => self.render_half_block(fb),
            TerminalMode::AnsiTrueColor => self.render_true_color(fb),
        }
    }

    /// Render a framebuffer into any writer (stdout for `show`).
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, fb: &Framebuffer, out: &mut W) -> Result<()> {
        out.write_all(self.render(fb).as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb, 2.0);
        let mut output = String::with_capacity((cols + 1) as usize * rows as usize);
        let cell = Cell::new(fb, cols, rows);

        for y in 0..rows {
            for x in 0..cols {
                let (r, g, b) = cell.average(fb, x, y);
                // Rec. 709 luminance coefficients
                let luma = (0.2126 * r + 0.7152 * g + 0.0722 * b) / 255.0;
                let last = Self::ASCII_RAMP.len() - 1;
                let idx = ((luma * last as f32).round() as usize).min(last);
                output.push(Self::ASCII_RAMP[idx]);
            }
            output.push('\n');
        }

        output
    }

    fn render_half_block(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb, 1.0);
        let rows = (rows + 1) & !1;
        let mut output = String::with_capacity((cols * 40 + 5) as usize * (rows / 2) as usize);
        let cell = Cell::new(fb, cols, rows);

        for y in (0..rows).step_by(2) {
            for x in 0..cols {
                let top = to_u8(cell.average(fb, x, y));
                let bottom = to_u8(cell.average(fb, x, y + 1));
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.0, top.1, top.2, bottom.0, bottom.1, bottom.2
                );
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    fn render_true_color(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.grid(fb, 2.0);
        let mut output = String::with_capacity((cols * 20 + 5) as usize * rows as usize);
        let cell = Cell::new(fb, cols, rows);

        for y in 0..rows {
            for x in 0..cols {
                let (r, g, b) = to_u8(cell.average(fb, x, y));
                let _ = write!(output, "\x1b[48;2;{r};{g};{b}m ");
            }
            output.push_str("\x1b[0m\n");
        }

        output
    }

    /// Character grid preserving the framebuffer's aspect ratio.
    /// `char_aspect` is the height/width ratio of one character cell.
    fn grid(&self, fb: &Framebuffer, char_aspect: f32) -> (u32, u32) {
        let fb_aspect = fb.width() as f32 / fb.height() as f32;

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1)),
            (None, Some(h)) => (((h as f32 * fb_aspect * char_aspect).round() as u32).max(1), h),
            (None, None) => {
                let w = 80u32.min(fb.width());
                (w, ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1))
            }
        }
    }
}

/// Pixel block covered by one character cell.
struct Cell {
    scale_x: f32,
    scale_y: f32,
}

impl Cell {
    fn new(fb: &Framebuffer, cols: u32, rows: u32) -> Self {
        Self {
            scale_x: fb.width() as f32 / cols.max(1) as f32,
            scale_y: fb.height() as f32 / rows.max(1) as f32,
        }
    }

    /// Mean RGB over the cell's pixel block.
    fn average(&self, fb: &Framebuffer, x: u32, y: u32) -> (f32, f32, f32) {
        let x0 = (x as f32 * self.scale_x) as u32;
        let y0 = (y as f32 * self.scale_y) as u32;
        let x1 = (((x + 1) as f32 * self.scale_x) as u32).clamp(x0 + 1, fb.width().max(x0 + 1));
        let y1 = (((y + 1) as f32 * self.scale_y) as u32).clamp(y0 + 1, fb.height().max(y0 + 1));

        let (mut r, mut g, mut b, mut n) = (0.0, 0.0, 0.0, 0.0);
        for py in y0..y1 {
            for px in x0..x1 {
                if let Some(pixel) = fb.get_pixel(px, py) {
                    r += f32::from(pixel.r);
                    g += f32::from(pixel.g);
                    b += f32::from(pixel.b);
                    n += 1.0;
                }
            }
        }

        if n > 0.0 {
            (r / n, g / n, b / n)
        } else {
            (0.0, 0.0, 0.0)
        }
    }
}

fn to_u8((r, g, b): (f32, f32, f32)) -> (u8, u8, u8) {
    (r.round() as u8, g.round() as u8, b.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn solid(w: u32, h: u32, color: Rgba) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h).expect("framebuffer creation should succeed");
        fb.clear(color);
        fb
    }

    #[test]
    fn test_ascii_render_white() {
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&solid(10, 10, Rgba::WHITE));

        assert!(output.contains('@'));
        assert!(!output.contains(' '));
    }

    #[test]
    fn test_ascii_render_black() {
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(5).render(&solid(10, 10, Rgba::BLACK));

        assert!(output.chars().filter(|&c| c != '\n').all(|c| c == ' '));
    }

    #[test]
    fn test_thin_line_survives_downsampling() {
        let mut fb = solid(100, 20, Rgba::WHITE);
        for y in 0..20 {
            fb.set_pixel(53, y, Rgba::BLACK);
        }

        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(10).height(2).render(&fb);

        // The column holding x=53 is darker than full white.
        assert!(output.lines().all(|line| line.chars().nth(5) != Some('@')));
    }

    #[test]
    fn test_unicode_half_block_contains_ansi() {
        let output = TerminalEncoder::new()
            .mode(TerminalMode::UnicodeHalfBlock)
            .width(5)
            .render(&solid(10, 10, Rgba::RED));

        assert!(output.contains("\x1b[38;2;255;0;0m"));
        assert!(output.contains('▀'));
        assert!(output.contains("\x1b[0m"));
    }

    #[test]
    fn test_ansi_true_color_contains_escapes() {
        let output = TerminalEncoder::new()
            .mode(TerminalMode::AnsiTrueColor)
            .width(5)
            .render(&solid(10, 10, Rgba::BLUE));

        assert!(output.contains("48;2;0;0;255"));
    }

    #[test]
    fn test_aspect_ratio_preservation() {
        let fb = solid(200, 100, Rgba::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(40).render(&fb);

        // 2:1 image, 2:1 character cells, 40 columns -> 10 lines.
        assert_eq!(output.lines().count(), 10);
    }

    #[test]
    fn test_custom_dimensions() {
        let fb = solid(100, 100, Rgba::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).width(20).height(10).render(&fb);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].len(), 20);
    }

    #[test]
    fn test_default_width_capped_at_80() {
        let fb = solid(1000, 100, Rgba::WHITE);
        let output = TerminalEncoder::new().mode(TerminalMode::Ascii).render(&fb);
        let first_line = output.lines().next().expect("iterator should have next element");

        assert!(first_line.len() <= 80);
    }

    #[test]
    fn test_write_to_buffer() {
        let fb = solid(10, 10, Rgba::WHITE);
        let mut buffer = Vec::new();
        TerminalEncoder::new().mode(TerminalMode::Ascii).width(4).write_to(&fb, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("@@@@"));
    }
}
