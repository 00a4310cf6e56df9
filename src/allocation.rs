//! Allocation aggregator: reduce holdings to current percentage per asset class.
//!
//! Pure functions over an immutable holdings snapshot. The caller owns the data
//! and re-invokes on every edit; nothing here holds state between calls.

use crate::asset_class::{Allocations, AssetClass};
use crate::error::{Error, Result};
use crate::holding::Holding;

/// Tolerance for the target-total check: |sum - 100| must be below this.
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// Variances inside this band (percentage points) count as on-target.
pub const NEUTRAL_BAND: f64 = 0.1;

/// Sum of current market values across all holdings.
pub fn total_value(holdings: &[Holding]) -> f64 {
    holdings.iter().map(|h| h.value).sum()
}

/// Compute current percentage-of-total-value per asset class.
///
/// Classes with no holdings get 0. For any portfolio with positive total
/// value the five percentages sum to 100 (within floating-point tolerance).
///
/// # Errors
/// - [`Error::InvalidInput`] if any holding value is negative.
/// - [`Error::NoPortfolioValue`] if the total value is zero (or negative),
///   which would make every percentage undefined.
pub fn aggregate(holdings: &[Holding]) -> Result<Allocations> {
    for h in holdings {
        if h.value < 0.0 || !h.value.is_finite() {
            return Err(Error::InvalidInput(format!(
                "holding {} has invalid value {}",
                h.ticker, h.value
            )));
        }
    }

    let total = total_value(holdings);
    if total <= 0.0 {
        return Err(Error::NoPortfolioValue);
    }

    let mut class_values = [0.0_f64; AssetClass::COUNT];
    for h in holdings {
        class_values[h.asset_class.index()] += h.value;
    }

    let mut current = Allocations::default();
    for class in AssetClass::ALL {
        // The division can land one ULP above 100 when a single class holds
        // the whole portfolio; clamp so the output honors [0, 100].
        let pct = (100.0 * class_values[class.index()] / total).clamp(0.0, 100.0);
        current.set(class, pct);
    }
    Ok(current)
}

/// True iff the five target percentages sum to 100 within [`TOTAL_TOLERANCE`].
///
/// Targets that fail this check are still accepted by the engine — the caller
/// surfaces the mismatch instead of silently correcting it.
pub fn validate_total(targets: &Allocations) -> bool {
    (targets.total() - 100.0).abs() < TOTAL_TOLERANCE
}

/// Classification of a current-minus-target variance for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarianceBand {
    Neutral,
    Overweight,
    Underweight,
}

/// Classify a variance: within [`NEUTRAL_BAND`] of zero is neutral.
pub fn variance_band(variance: f64) -> VarianceBand {
    if variance.abs() < NEUTRAL_BAND {
        VarianceBand::Neutral
    } else if variance > 0.0 {
        VarianceBand::Overweight
    } else {
        VarianceBand::Underweight
    }
}
