//! # Upset-Viz
//!
//! Upset plots for visualizing how a handful of sets overlap.
//!
//! Elements are grouped by the exact set of categories that contain them;
//! each realized group becomes a bar (its size) over a column of dots (its
//! members). Rendering goes to SVG, PNG or the terminal, with raster work on
//! [trueno](https://crates.io/crates/trueno) buffers.
//!
//! ## Quick Start
//!
//! ```rust
//! use upset_viz::prelude::*;
//!
//! let categories = Categories::new()
//!     .with("A", ["x", "y", "z"])
//!     .with("B", ["y", "z", "w"])
//!     .with("C", ["w", "v"]);
//!
//! let mut plot = make_upset(&categories, "Tools")?;
//! plot.color_bars("A", Rgba::RED)?.color_dots("A", Rgba::RED)?;
//!
//! let svg = plot.to_svg()?;
//! assert!(svg.contains("Size of Group"));
//! # Ok::<(), upset_viz::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Parallel trueno kernels
//! - `config`: Load [`style::UpsetStyle`] from YAML
//!
//! ## References
//!
//! - Lex, A. et al. (2014). "UpSet: Visualization of Intersecting Sets." IEEE TVCG.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions and tick placement.
pub mod scale;

/// Set-intersection grouping.
pub mod intersection;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Figures, regions and marks.
pub mod figure;

/// Upset plot composer.
pub mod plots;

/// Upset plot style and its YAML form.
pub mod style;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives.
pub mod render;

/// Output encoders (PNG, SVG, terminal).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for upset-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use upset_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, Mark, Region};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Rect};
    pub use crate::intersection::{intersection_sizes, Categories, Group, Intersections};
    pub use crate::output::{PngEncoder, SvgEncoder, TerminalEncoder, TerminalMode};
    pub use crate::plots::{make_upset, Upset, UpsetLayout};
    pub use crate::scale::{LinearScale, Scale};
    pub use crate::style::UpsetStyle;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
