//! Error types for the IPS rebalancer.

use std::path::PathBuf;

/// All errors that can occur during rebalancer operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("portfolio has no value: total holdings value is zero or negative")]
    NoPortfolioValue,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("profile error: {0}")]
    Profile(String),

    #[error("failed to read profile file {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse profile: {0}")]
    ProfileParse(#[from] toml::de::Error),

    #[error("holdings file error: {0}")]
    Holdings(String),

    #[error("failed to read holdings file {path}: {source}")]
    HoldingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse holdings JSON: {0}")]
    HoldingsParse(#[from] serde_json::Error),

    #[error("audit log error: {0}")]
    Audit(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
