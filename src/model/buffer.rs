// File: ./src/model/buffer.rs
//! Percentage slack applied to minimum thresholds.
use crate::error::{ApplyError, Result};
use crate::model::item::{FilterSet, is_integral};
use std::fmt;

/// A validated buffer percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferPercent(f64);

impl BufferPercent {
    pub fn new(percent: f64) -> Result<Self> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ApplyError::InvalidBuffer(percent.to_string()));
        }
        Ok(Self(percent))
    }

    /// Reads a stored preference value. Empty means "no buffer".
    pub fn parse(raw: &str) -> Result<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let percent = raw
            .parse::<f64>()
            .map_err(|_| ApplyError::InvalidBuffer(raw.to_string()))?;
        Self::new(percent)
            .map(Some)
            .map_err(|_| ApplyError::InvalidBuffer(raw.to_string()))
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    pub fn multiplier(self) -> f64 {
        1.0 - self.0 / 100.0
    }

    /// Shrinks one magnitude, keeping integers integral and decimals at 2 places.
    pub fn adjust(self, magnitude: f64) -> f64 {
        let adjusted = magnitude * self.multiplier();
        if is_integral(magnitude) {
            round_half_up(adjusted)
        } else {
            round_half_up(adjusted * 100.0) / 100.0
        }
    }

    /// Applies the buffer to every present magnitude of the set.
    pub fn apply(self, mut set: FilterSet) -> FilterSet {
        let adjust = |magnitude: &mut Option<f64>| {
            if let Some(value) = magnitude {
                *value = self.adjust(*value);
            }
        };

        set.stats.iter_mut().for_each(|s| adjust(&mut s.magnitude));
        set.attributes
            .values_mut()
            .chain(set.resistances.values_mut())
            .for_each(|e| adjust(&mut e.magnitude));

        log::debug!(
            "Applied {} buffer (x{}) to {} filter(s)",
            self,
            self.multiplier(),
            set.filter_count()
        );
        set
    }
}

impl fmt::Display for BufferPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// Halves go toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    // Avoid emitting -0.
    if rounded == 0.0 { 0.0 } else { rounded }
}
