//! CURRENT→TARGET rebalancing engine.
//!
//! Compares current vs. target percentages per asset class against a drift
//! threshold and emits ranked buy/sell recommendations. Pure: identical inputs
//! always produce identical output, and a run either fully succeeds or fully
//! fails — no partial lists on error.

use serde::Serialize;

use crate::asset_class::{Allocations, AssetClass};
use crate::error::{Error, Result};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Buy,
    Sell,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
        }
    }
}

/// A single rebalancing recommendation.
///
/// `priority` is the absolute variance; it drives ordering and is not meant
/// for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: Action,
    pub asset_class: AssetClass,
    /// Dollar amount to trade (always non-negative).
    pub amount: f64,
    pub description: String,
    #[serde(skip_serializing)]
    pub priority: f64,
}

/// Generate rebalancing recommendations from current/target allocations.
///
/// Per asset class, independently: a class whose absolute variance
/// (`current - target`) exceeds `threshold` percentage points gets a SELL
/// (overweight) or BUY (underweight) for `|variance| / 100 * total_value`
/// dollars. The result is sorted by absolute variance descending; ties break
/// by [`AssetClass`] declaration order.
///
/// Target totals that do not sum to 100 are accepted — variances are computed
/// per class independently, and the caller surfaces the mismatch via
/// `allocation::validate_total`. An empty result means the portfolio is within
/// thresholds; rendering a "balanced" message is the caller's concern.
///
/// # Errors
/// [`Error::InvalidInput`] if the threshold is negative or non-finite, any
/// percentage lies outside [0, 100], or `total_value` is negative. Inputs are
/// rejected, never clamped.
pub fn generate(
    current: &Allocations,
    target: &Allocations,
    total_value: f64,
    threshold: f64,
) -> Result<Vec<Recommendation>> {
    validate_inputs(current, target, total_value, threshold)?;

    let mut recommendations = Vec::new();

    for class in AssetClass::ALL {
        let variance = current.get(class) - target.get(class);
        if variance.abs() <= threshold {
            continue;
        }

        let action = if variance > 0.0 {
            Action::Sell
        } else {
            Action::Buy
        };
        let amount = variance.abs() / 100.0 * total_value;
        let description = describe(class, current.get(class), target.get(class), variance);

        recommendations.push(Recommendation {
            action,
            asset_class: class,
            amount,
            description,
            priority: variance.abs(),
        });
    }

    // Largest drift first; stable sort keeps declaration order on exact ties.
    recommendations.sort_by(|a, b| {
        b.priority
            .total_cmp(&a.priority)
            .then_with(|| a.asset_class.index().cmp(&b.asset_class.index()))
    });

    Ok(recommendations)
}

/// Select the recommendation text, in priority order: overweight first, then
/// the zero-holding Alternatives alert, then the generic underweight line.
fn describe(class: AssetClass, current: f64, target: f64, variance: f64) -> String {
    if variance > 0.0 {
        format!("Reduce overweight position by {:.1}%", variance.abs())
    } else if current == 0.0 && class == AssetClass::Alternatives {
        format!("Add alternatives allocation per target {target:.1}%")
    } else {
        format!("Increase allocation to target {target:.1}%")
    }
}

fn validate_inputs(
    current: &Allocations,
    target: &Allocations,
    total_value: f64,
    threshold: f64,
) -> Result<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(Error::InvalidInput(format!(
            "rebalancing threshold must be >= 0, got {threshold}"
        )));
    }
    if !total_value.is_finite() || total_value < 0.0 {
        return Err(Error::InvalidInput(format!(
            "total portfolio value must be >= 0, got {total_value}"
        )));
    }
    for (label, alloc) in [("current", current), ("target", target)] {
        for (class, pct) in alloc.iter() {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(Error::InvalidInput(format!(
                    "{label} percentage for {class} ({pct}) is outside [0, 100]"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_current() -> Allocations {
        Allocations::new([65.5, 22.8, 8.7, 3.0, 0.0])
    }

    fn demo_target() -> Allocations {
        Allocations::new([55.0, 25.0, 15.0, 3.0, 2.0])
    }

    #[test]
    fn demo_scenario_two_recommendations() {
        let recs = generate(&demo_current(), &demo_target(), 674_831.75, 5.0).unwrap();

        // Only Domestic (+10.5) and Fixed Income (-6.3) exceed the threshold;
        // International (-2.2), Cash (0.0), Alternatives (-2.0) do not.
        assert_eq!(recs.len(), 2);

        assert_eq!(recs[0].asset_class, AssetClass::DomesticEquity);
        assert_eq!(recs[0].action, Action::Sell);
        assert!((recs[0].amount - 70_857.33).abs() < 0.01);
        assert_eq!(recs[0].description, "Reduce overweight position by 10.5%");

        assert_eq!(recs[1].asset_class, AssetClass::FixedIncome);
        assert_eq!(recs[1].action, Action::Buy);
        assert!((recs[1].amount - 42_514.40).abs() < 0.01);
        assert_eq!(recs[1].description, "Increase allocation to target 15.0%");
    }

    #[test]
    fn variance_equal_to_threshold_excluded() {
        let current = Allocations::new([60.0, 20.0, 15.0, 3.0, 2.0]);
        let target = Allocations::new([55.0, 25.0, 15.0, 3.0, 2.0]);
        // Both variances are exactly +/-5.0 == threshold → no recommendations.
        let recs = generate(&current, &target, 100_000.0, 5.0).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn balanced_portfolio_returns_empty() {
        let target = demo_target();
        let recs = generate(&target, &target, 500_000.0, 5.0).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn zero_threshold_flags_any_drift() {
        let current = Allocations::new([55.1, 24.9, 15.0, 3.0, 2.0]);
        let recs = generate(&current, &demo_target(), 100_000.0, 0.0).unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn sell_iff_overweight() {
        let recs = generate(&demo_current(), &demo_target(), 674_831.75, 1.0).unwrap();
        for rec in &recs {
            let variance =
                demo_current().get(rec.asset_class) - demo_target().get(rec.asset_class);
            assert_eq!(rec.action == Action::Sell, variance > 0.0);
        }
    }

    #[test]
    fn alternatives_zero_holding_alert() {
        // Alternatives at 0% with a 2% target and a threshold below 2.
        let recs = generate(&demo_current(), &demo_target(), 674_831.75, 1.5).unwrap();
        let alt = recs
            .iter()
            .find(|r| r.asset_class == AssetClass::Alternatives)
            .unwrap();
        assert_eq!(alt.action, Action::Buy);
        assert_eq!(
            alt.description,
            "Add alternatives allocation per target 2.0%"
        );
    }

    #[test]
    fn alternatives_with_holdings_gets_generic_text() {
        let current = Allocations::new([65.5, 22.8, 8.7, 2.0, 1.0]);
        let target = Allocations::new([55.0, 25.0, 15.0, 3.0, 5.0]);
        let recs = generate(&current, &target, 100_000.0, 1.5).unwrap();
        let alt = recs
            .iter()
            .find(|r| r.asset_class == AssetClass::Alternatives)
            .unwrap();
        assert_eq!(alt.description, "Increase allocation to target 5.0%");
    }

    #[test]
    fn sorted_by_priority_descending() {
        let recs = generate(&demo_current(), &demo_target(), 674_831.75, 0.5).unwrap();
        for pair in recs.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn exact_tie_breaks_by_declaration_order() {
        // Domestic +10, International -10: identical priority.
        let current = Allocations::new([60.0, 20.0, 15.0, 3.0, 2.0]);
        let target = Allocations::new([50.0, 30.0, 15.0, 3.0, 2.0]);
        let recs = generate(&current, &target, 100_000.0, 5.0).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].asset_class, AssetClass::DomesticEquity);
        assert_eq!(recs[1].asset_class, AssetClass::InternationalEquity);
    }

    #[test]
    fn unsummed_targets_still_compute_per_class() {
        // Targets sum to 90 — accepted, variances computed independently.
        let target = Allocations::new([50.0, 25.0, 10.0, 3.0, 2.0]);
        let recs = generate(&demo_current(), &target, 100_000.0, 5.0).unwrap();
        assert!(!recs.is_empty());
    }

    #[test]
    fn reject_negative_threshold() {
        let result = generate(&demo_current(), &demo_target(), 100_000.0, -1.0);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn reject_out_of_range_percentage() {
        let bad = Allocations::new([120.0, 0.0, 0.0, 0.0, 0.0]);
        let result = generate(&bad, &demo_target(), 100_000.0, 5.0);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn reject_nan_percentage() {
        let bad = Allocations::new([f64::NAN, 25.0, 15.0, 3.0, 2.0]);
        let result = generate(&bad, &demo_target(), 100_000.0, 5.0);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn reject_negative_total_value() {
        let result = generate(&demo_current(), &demo_target(), -1.0, 5.0);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn accepts_aggregated_single_class_portfolio() {
        use crate::allocation;
        use crate::holding::{AccountType, Holding};

        // An all-cash account: the aggregator's output must round-trip into
        // the engine without tripping input validation.
        let holdings = vec![Holding {
            account: "FID-1".into(),
            account_type: AccountType::Taxable,
            name: "Federal Money Market Fund".into(),
            ticker: "SPAXX".into(),
            asset_class: AssetClass::Cash,
            shares: 379_819.42302868445,
            price: 1.0,
            value: 379_819.42302868445,
            cost_basis: 379_819.42302868445,
        }];

        let current = allocation::aggregate(&holdings).unwrap();
        let recs = generate(&current, &demo_target(), 379_819.42, 5.0).unwrap();
        assert!(!recs.is_empty());
    }

    #[test]
    fn idempotent() {
        let a = generate(&demo_current(), &demo_target(), 674_831.75, 5.0).unwrap();
        let b = generate(&demo_current(), &demo_target(), 674_831.75, 5.0).unwrap();
        assert_eq!(a, b);
    }
}
