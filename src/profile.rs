//! Client profile / IPS parameter loading and validation (profile.toml).

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::asset_class::Allocations;
use crate::error::{Error, Result};

/// Top-level client profile: everything the IPS document and the engine need.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub client: ClientConfig,
    pub risk: RiskConfig,
    pub objectives: ObjectivesConfig,
    pub targets: TargetsConfig,
    pub rebalancing: RebalancingConfig,
    pub restrictions: RestrictionsConfig,
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub marital_status: String,
    pub dependents: u32,
    pub employment_status: String,
    pub occupation: String,
    pub annual_income: f64,
    pub net_worth: f64,
    pub liquid_net_worth: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    pub tolerance_score: u32,
    pub tolerance_level: String,
    pub capacity: String,
    pub loss_tolerance_pct: f64,
    pub volatility_comfort: u32,
    pub experience_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectivesConfig {
    pub primary_goal: String,
    pub horizon_years: u32,
    pub target_annual_return_pct: f64,
    pub target_value: f64,
    pub liquidity_needs: String,
    pub income_requirement: f64,
    #[serde(default)]
    pub inflation_protection: bool,
    #[serde(default)]
    pub tax_considerations: bool,
}

/// Target percentage per asset class, advisor-edited.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetsConfig {
    pub domestic_equity: f64,
    pub international_equity: f64,
    pub fixed_income: f64,
    pub cash: f64,
    pub alternatives: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RebalancingConfig {
    #[serde(default = "default_threshold")]
    pub threshold_pct: f64,
    #[serde(default = "default_frequency")]
    pub frequency: String,
    pub benchmark: String,
    #[serde(default = "default_frequency")]
    pub review_frequency: String,
    #[serde(default = "default_frequency")]
    pub reporting_frequency: String,
    pub performance_tolerance_pct: f64,
}

fn default_threshold() -> f64 {
    5.0
}
fn default_frequency() -> String {
    "Quarterly".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RestrictionsConfig {
    #[serde(default)]
    pub esg_preferences: bool,
    #[serde(default)]
    pub excluded_sectors: String,
    pub concentration_limit_pct: f64,
    pub minimum_credit_rating: String,
    #[serde(default)]
    pub derivatives_allowed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    pub name: String,
    pub firm: String,
    pub custodian: String,
    #[serde(default)]
    pub fiduciary: bool,
    pub ips_date: NaiveDate,
    pub next_review_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            audit_file: default_audit_file(),
        }
    }
}

fn default_log_dir() -> String {
    "./logs".into()
}
fn default_audit_file() -> String {
    "audit.jsonl".into()
}

impl Profile {
    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ProfileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let profile: Profile = toml::from_str(&contents)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Validate profile invariants.
    fn validate(&self) -> Result<()> {
        if self.client.name.is_empty() {
            return Err(Error::Profile("client name must not be empty".into()));
        }
        if self.risk.tolerance_score > 100 {
            return Err(Error::Profile(format!(
                "risk tolerance score {} must be in [0, 100]",
                self.risk.tolerance_score
            )));
        }
        if self.objectives.horizon_years == 0 {
            return Err(Error::Profile("investment horizon must be >= 1 year".into()));
        }
        for (name, pct) in [
            ("domestic_equity", self.targets.domestic_equity),
            ("international_equity", self.targets.international_equity),
            ("fixed_income", self.targets.fixed_income),
            ("cash", self.targets.cash),
            ("alternatives", self.targets.alternatives),
        ] {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(Error::Profile(format!(
                    "target {name} ({pct}) must be in [0, 100]"
                )));
            }
        }
        if self.rebalancing.threshold_pct < 0.0 {
            return Err(Error::Profile("rebalancing threshold must be >= 0".into()));
        }
        if !(0.0..=100.0).contains(&self.restrictions.concentration_limit_pct) {
            return Err(Error::Profile(
                "concentration limit must be in [0, 100]".into(),
            ));
        }
        Ok(())
    }

    /// Target allocations in canonical asset-class order.
    ///
    /// The five values are intended to sum to 100, but that is checked and
    /// surfaced by `allocation::validate_total`, not enforced here.
    pub fn targets(&self) -> Allocations {
        Allocations::new([
            self.targets.domestic_equity,
            self.targets.international_equity,
            self.targets.fixed_income,
            self.targets.cash,
            self.targets.alternatives,
        ])
    }

    /// Full path to the audit log file.
    pub fn audit_path(&self) -> std::path::PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.audit_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_class::AssetClass;

    fn example_toml() -> &'static str {
        r#"
[client]
name = "Michael and Sarah Johnson"
date_of_birth = "1978-06-15"
marital_status = "Married"
dependents = 2
employment_status = "Employed"
occupation = "Technology Director"
annual_income = 185000.0
net_worth = 1250000.0
liquid_net_worth = 675000.0

[risk]
tolerance_score = 72
tolerance_level = "Moderately Aggressive"
capacity = "High"
loss_tolerance_pct = 25.0
volatility_comfort = 8
experience_level = "Advanced"

[objectives]
primary_goal = "Retirement"
horizon_years = 19
target_annual_return_pct = 8.2
target_value = 3500000.0
liquidity_needs = "Medium"
income_requirement = 0.0
inflation_protection = true
tax_considerations = true

[targets]
domestic_equity = 55.0
international_equity = 25.0
fixed_income = 15.0
cash = 3.0
alternatives = 2.0

[rebalancing]
threshold_pct = 5.0
frequency = "Quarterly"
benchmark = "60% S&P 500 / 40% Bloomberg Aggregate Bond"
review_frequency = "Quarterly"
reporting_frequency = "Quarterly"
performance_tolerance_pct = 3.0

[restrictions]
esg_preferences = true
excluded_sectors = "Tobacco, Firearms"
concentration_limit_pct = 8.0
minimum_credit_rating = "A-"
derivatives_allowed = false

[advisor]
name = "Robert Chen, CFP, CFA"
firm = "Summit Wealth Advisors"
custodian = "Fidelity Investments"
fiduciary = true
ips_date = "2024-05-30"
next_review_date = "2024-11-30"
"#
    }

    fn parse(toml_str: &str) -> Profile {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn parse_example_profile() {
        let profile = parse(example_toml());
        assert_eq!(profile.client.name, "Michael and Sarah Johnson");
        assert_eq!(profile.risk.tolerance_score, 72);
        assert_eq!(profile.objectives.horizon_years, 19);
        assert_eq!(profile.rebalancing.threshold_pct, 5.0);
        assert!(profile.restrictions.esg_preferences);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn targets_in_canonical_order() {
        let targets = parse(example_toml()).targets();
        assert_eq!(targets.get(AssetClass::DomesticEquity), 55.0);
        assert_eq!(targets.get(AssetClass::Alternatives), 2.0);
        assert_eq!(targets.total(), 100.0);
    }

    #[test]
    fn threshold_defaults_when_omitted() {
        let toml_str = example_toml().replace("threshold_pct = 5.0\n", "");
        let profile = parse(&toml_str);
        assert_eq!(profile.rebalancing.threshold_pct, 5.0);
    }

    #[test]
    fn logging_defaults_when_omitted() {
        let profile = parse(example_toml());
        assert_eq!(
            profile.audit_path(),
            std::path::PathBuf::from("./logs/audit.jsonl")
        );
    }

    #[test]
    fn validate_catches_negative_threshold() {
        let toml_str = example_toml().replace("threshold_pct = 5.0", "threshold_pct = -1.0");
        assert!(parse(&toml_str).validate().is_err());
    }

    #[test]
    fn validate_catches_target_over_100() {
        let toml_str = example_toml().replace("domestic_equity = 55.0", "domestic_equity = 155.0");
        assert!(parse(&toml_str).validate().is_err());
    }

    #[test]
    fn validate_catches_zero_horizon() {
        let toml_str = example_toml().replace("horizon_years = 19", "horizon_years = 0");
        assert!(parse(&toml_str).validate().is_err());
    }

    #[test]
    fn validate_catches_bad_risk_score() {
        let toml_str = example_toml().replace("tolerance_score = 72", "tolerance_score = 120");
        assert!(parse(&toml_str).validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.toml");
        std::fs::write(&path, example_toml()).unwrap();

        let profile = Profile::load(&path).unwrap();
        assert_eq!(profile.advisor.firm, "Summit Wealth Advisors");
    }
}
