//! Scale functions for data-to-pixel mappings.
//!
//! Every figure region maps its data limits onto its pixel rectangle through a
//! pair of [`LinearScale`]s. Inverted limits (e.g. a flipped category axis) are
//! simply a domain whose first value is larger than its second.

use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Length in range units of a domain-space span.
    #[must_use]
    pub fn span(&self, extent: f32) -> f32 {
        (extent * (self.range_max - self.range_min) / (self.domain_max - self.domain_min)).abs()
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Round a raw step up to the nearest 1, 2 or 5 times a power of ten.
#[must_use]
pub fn nice_step(raw: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let pow10 = 10.0_f32.powf(raw.log10().floor());
    let norm = raw / pow10;
    let mult = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    mult * pow10
}

/// Tick positions covering `[lo, hi]` with at most `max_ticks` intervals.
///
/// Positions are multiples of a [`nice_step`]; the bounds may be given in
/// either order. Counts are whole numbers, so steps never go below 1.
#[must_use]
pub fn nice_ticks(lo: f32, hi: f32, max_ticks: usize) -> Vec<f32> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if !(lo.is_finite() && hi.is_finite()) || (hi - lo) < f32::EPSILON {
        return vec![lo];
    }

    let step = nice_step((hi - lo) / max_ticks.max(1) as f32).max(1.0);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f32 * step).collect()
}

/// Format a tick value without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_tick(value: f32) -> String {
    if (value - value.round()).abs() < 1e-4 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.2}")
    }
}
