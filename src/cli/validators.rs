//! CLI argument validators.

use crate::audio::TrimRegion;
use crate::constants::MIN_TRIM_GAP_PERCENT;
use crate::error::{Error, Result};

/// Parse a trim handle position in percent (0-100).
pub fn parse_percent(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=100.0).contains(&value) {
        return Err(format!("percentage must be between 0 and 100, got {value}"));
    }

    Ok(value)
}

/// Turn a pair of trim handles into a region.
///
/// The handles must be more than [`MIN_TRIM_GAP_PERCENT`] apart, so the kept
/// range never collapses to a sliver.
pub fn trim_region_from_handles(start_percent: f64, end_percent: f64) -> Result<TrimRegion> {
    let handles_error = || Error::TrimHandles {
        start_percent,
        end_percent,
        min_gap: MIN_TRIM_GAP_PERCENT,
    };

    if start_percent >= end_percent - MIN_TRIM_GAP_PERCENT {
        return Err(handles_error());
    }
    TrimRegion::from_percent(start_percent, end_percent).ok_or_else(handles_error)
}
