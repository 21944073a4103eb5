//! High-level plot types.
//!
//! Provides the upset plot and its layout.

mod upset;

pub use upset::{make_upset, Upset, UpsetLayout};
