//! Supplemental portfolio analysis: tax impact, risk narrative, projections.

use crate::holding::{AccountType, Holding};

/// Simplified long-term capital gains rate used for the tax estimate.
pub const LTCG_RATE: f64 = 0.15;

/// Estimate the capital-gains tax cost of rebalancing.
///
/// Counts unrealized gains on taxable-account holdings at [`LTCG_RATE`];
/// losses and tax-advantaged accounts contribute nothing. A deliberately
/// rough planning figure, not tax advice.
pub fn tax_impact(holdings: &[Holding]) -> f64 {
    holdings
        .iter()
        .filter(|h| h.account_type == AccountType::Taxable)
        .map(|h| (h.value - h.cost_basis).max(0.0) * LTCG_RATE)
        .sum()
}

/// One-line risk narrative for the IPS document, bucketed by tolerance score.
pub fn risk_assessment(score: u32) -> &'static str {
    if score < 30 {
        "Conservative investor with primary focus on capital preservation"
    } else if score < 50 {
        "Moderate investor seeking balanced growth with managed risk"
    } else if score < 70 {
        "Moderately aggressive investor comfortable with market volatility"
    } else {
        "Aggressive investor seeking maximum growth potential"
    }
}

/// Project portfolio value with annual compounding.
pub fn projected_value(current_value: f64, annual_return_pct: f64, years: u32) -> f64 {
    current_value * (1.0 + annual_return_pct / 100.0).powi(years as i32)
}
