//! Portfolio holdings (holdings.json) loading and validation.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::asset_class::AssetClass;
use crate::error::{Error, Result};

/// Account tax treatment for a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Taxable,
    Ira,
    Roth,
    Brokerage,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Taxable => write!(f, "taxable"),
            AccountType::Ira => write!(f, "IRA"),
            AccountType::Roth => write!(f, "Roth"),
            AccountType::Brokerage => write!(f, "brokerage"),
        }
    }
}

/// A single position within a portfolio account.
///
/// Immutable snapshot for the duration of a session; the aggregator and the
/// engine never mutate holdings.
#[derive(Debug, Clone, Deserialize)]
pub struct Holding {
    pub account: String,
    pub account_type: AccountType,
    pub name: String,
    pub ticker: String,
    pub asset_class: AssetClass,
    pub shares: f64,
    pub price: f64,
    pub value: f64,
    pub cost_basis: f64,
}

/// A portfolio snapshot from holdings.json.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingsFile {
    pub as_of: NaiveDate,
    pub holdings: Vec<Holding>,
}

impl HoldingsFile {
    /// Load and validate a holdings.json file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::HoldingsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let file: HoldingsFile = serde_json::from_str(json)?;
        file.validate()?;
        Ok(file)
    }

    /// Validate the holdings snapshot.
    fn validate(&self) -> Result<()> {
        if self.holdings.is_empty() {
            return Err(Error::Holdings("holdings list is empty".into()));
        }

        // One row per (account, ticker)
        let mut seen = std::collections::HashSet::new();
        for h in &self.holdings {
            if h.ticker.is_empty() {
                return Err(Error::Holdings(format!(
                    "holding '{}' has an empty ticker",
                    h.name
                )));
            }
            if !seen.insert((&h.account, &h.ticker)) {
                return Err(Error::Holdings(format!(
                    "duplicate ticker {} in account {}",
                    h.ticker, h.account
                )));
            }
        }

        for h in &self.holdings {
            if h.shares < 0.0 || h.price < 0.0 {
                return Err(Error::Holdings(format!(
                    "{}: shares and price must be non-negative",
                    h.ticker
                )));
            }
            if h.value < 0.0 {
                return Err(Error::Holdings(format!(
                    "{}: current value {} is negative",
                    h.ticker, h.value
                )));
            }
            if h.cost_basis < 0.0 {
                return Err(Error::Holdings(format!(
                    "{}: cost basis {} is negative",
                    h.ticker, h.cost_basis
                )));
            }
        }

        Ok(())
    }
}
