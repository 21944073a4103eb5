//! Rasterization of figure marks onto a [`Framebuffer`](crate::framebuffer::Framebuffer).
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: one-pixel axis spines and tick marks
//! - **Midpoint Circle**: filled markers and round-capped thick lines
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{
    draw_circle, draw_line, draw_marker, draw_rect, draw_rect_outline, draw_thick_line,
};
