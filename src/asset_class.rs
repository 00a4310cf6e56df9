//! The closed asset-class enumeration and the dense percentage map keyed by it.
//!
//! The five classes are a deliberate, fixed schema. Adding a sixth class is a
//! reviewed change to this enum, not a runtime string key.

use serde::{Deserialize, Serialize};

/// One of the five asset classes every holding and target belongs to.
///
/// Declaration order is the canonical order: it drives report rows, chart
/// segments, and the tie-break for equal-priority recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    #[serde(rename = "Domestic Equity")]
    DomesticEquity,
    #[serde(rename = "International Equity")]
    InternationalEquity,
    #[serde(rename = "Fixed Income")]
    FixedIncome,
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "Alternatives")]
    Alternatives,
}

impl AssetClass {
    pub const COUNT: usize = 5;

    /// All classes in canonical (declaration) order.
    pub const ALL: [AssetClass; Self::COUNT] = [
        AssetClass::DomesticEquity,
        AssetClass::InternationalEquity,
        AssetClass::FixedIncome,
        AssetClass::Cash,
        AssetClass::Alternatives,
    ];

    /// Position in canonical order, used to index [`Allocations`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name, matching the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            AssetClass::DomesticEquity => "Domestic Equity",
            AssetClass::InternationalEquity => "International Equity",
            AssetClass::FixedIncome => "Fixed Income",
            AssetClass::Cash => "Cash",
            AssetClass::Alternatives => "Alternatives",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A percentage per asset class, stored densely in canonical order.
///
/// Used for both current (derived) and target (advisor-edited) allocations.
/// Values are percentage points in [0, 100]; the type itself does not enforce
/// that the five values sum to 100 — see `allocation::validate_total`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Allocations([f64; AssetClass::COUNT]);

impl Allocations {
    /// Build from percentages in canonical order.
    pub const fn new(percentages: [f64; AssetClass::COUNT]) -> Self {
        Self(percentages)
    }

    pub fn get(&self, class: AssetClass) -> f64 {
        self.0[class.index()]
    }

    pub fn set(&mut self, class: AssetClass, percentage: f64) {
        self.0[class.index()] = percentage;
    }

    /// Iterate (class, percentage) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        AssetClass::ALL.iter().map(|&c| (c, self.0[c.index()]))
    }

    /// Sum of all five percentages.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}
