//! Plain-text rendering of allocations, recommendations, and the IPS summary.
//!
//! This is the caller side of the core: all formatting (currency strings,
//! percentage strings, document text) lives here, never in the engine.

use rustc_hash::FxHashMap;

use crate::allocation::{self, VarianceBand};
use crate::analysis;
use crate::asset_class::{Allocations, AssetClass};
use crate::holding::Holding;
use crate::profile::Profile;
use crate::rebalance::Recommendation;

/// Format a dollar amount as `$1,234,568` (rounded, thousands separators).
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Current vs. target allocation table.
#[derive(Debug, Clone)]
pub struct AllocationReport<'a> {
    pub current: &'a Allocations,
    pub target: &'a Allocations,
}

impl std::fmt::Display for AllocationReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ALLOCATION:")?;
        writeln!(
            f,
            "  {:22} {:>9} {:>9} {:>9}",
            "Asset Class", "Current%", "Target%", "Variance"
        )?;
        for class in AssetClass::ALL {
            let current = self.current.get(class);
            let target = self.target.get(class);
            let variance = current - target;
            let band = match allocation::variance_band(variance) {
                VarianceBand::Neutral => "",
                VarianceBand::Overweight => "  over",
                VarianceBand::Underweight => "  under",
            };
            writeln!(
                f,
                "  {:22} {:>9.1} {:>9.1} {:>+9.1}{}",
                class.name(),
                current,
                target,
                variance,
                band,
            )?;
        }
        writeln!(
            f,
            "  {:22} {:>9.1} {:>9.1}",
            "Total",
            self.current.total(),
            self.target.total(),
        )?;
        if !allocation::validate_total(self.target) {
            writeln!(
                f,
                "  (!) target allocations sum to {:.1}, not 100",
                self.target.total()
            )?;
        }
        Ok(())
    }
}

/// Ranked recommendation list; renders a balanced notice when empty.
#[derive(Debug, Clone)]
pub struct RecommendationList<'a>(pub &'a [Recommendation]);

impl std::fmt::Display for RecommendationList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "REBALANCING RECOMMENDATIONS:")?;
        if self.0.is_empty() {
            writeln!(
                f,
                "  BALANCED — portfolio is within rebalancing thresholds"
            )?;
            return Ok(());
        }
        for rec in self.0 {
            writeln!(
                f,
                "  {:4} {:22} {:>12}  {}",
                rec.action.to_string(),
                rec.asset_class.name(),
                format_usd(rec.amount),
                rec.description,
            )?;
        }
        Ok(())
    }
}

/// IPS document preview: client, objectives, targets, policy, restrictions,
/// and per-account subtotals.
#[derive(Debug, Clone)]
pub struct IpsSummary<'a> {
    pub profile: &'a Profile,
    pub holdings: &'a [Holding],
}

impl std::fmt::Display for IpsSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.profile;
        let total = allocation::total_value(self.holdings);

        writeln!(f, "INVESTMENT POLICY STATEMENT — {}", p.client.name)?;
        writeln!(
            f,
            "  Prepared {} by {} ({}); custodian {}",
            p.advisor.ips_date.format("%B %-d, %Y"),
            p.advisor.name,
            p.advisor.firm,
            p.advisor.custodian,
        )?;
        writeln!(
            f,
            "  Objective: {} over a {}-year horizon, targeting {}% annually toward {}",
            p.objectives.primary_goal.to_lowercase(),
            p.objectives.horizon_years,
            p.objectives.target_annual_return_pct,
            format_usd(p.objectives.target_value),
        )?;
        writeln!(
            f,
            "  Risk profile: {} (score {})",
            analysis::risk_assessment(p.risk.tolerance_score),
            p.risk.tolerance_score,
        )?;

        write!(f, "  Target allocation: ")?;
        let mut first = true;
        for (class, pct) in p.targets().iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{class} {pct}%")?;
            first = false;
        }
        writeln!(f)?;

        writeln!(
            f,
            "  Rebalancing: {}, {}% drift threshold; reviews {}",
            p.rebalancing.frequency.to_lowercase(),
            p.rebalancing.threshold_pct,
            p.rebalancing.review_frequency.to_lowercase(),
        )?;
        writeln!(
            f,
            "  Restrictions: concentration limit {}%; minimum credit rating {}{}",
            p.restrictions.concentration_limit_pct,
            p.restrictions.minimum_credit_rating,
            if p.restrictions.excluded_sectors.is_empty() {
                String::new()
            } else {
                format!("; excluded sectors: {}", p.restrictions.excluded_sectors)
            },
        )?;

        writeln!(f, "  Portfolio value: {}", format_usd(total))?;
        for (account, label, subtotal) in account_subtotals(self.holdings) {
            writeln!(f, "    {account} ({label}): {}", format_usd(subtotal))?;
        }
        writeln!(
            f,
            "  Projected value in {} years: {}",
            p.objectives.horizon_years,
            format_usd(analysis::projected_value(
                total,
                p.objectives.target_annual_return_pct,
                p.objectives.horizon_years,
            )),
        )?;
        Ok(())
    }
}

/// Per-account market-value subtotals, sorted by account id for stable output.
fn account_subtotals(holdings: &[Holding]) -> Vec<(String, String, f64)> {
    let mut by_account: FxHashMap<&str, (String, f64)> = FxHashMap::default();
    for h in holdings {
        let entry = by_account
            .entry(h.account.as_str())
            .or_insert_with(|| (h.account_type.to_string(), 0.0));
        entry.1 += h.value;
    }

    let mut subtotals: Vec<(String, String, f64)> = by_account
        .into_iter()
        .map(|(account, (label, subtotal))| (account.to_string(), label, subtotal))
        .collect();
    subtotals.sort_by(|a, b| a.0.cmp(&b.0));
    subtotals
}
