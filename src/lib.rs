//! ips-rebalancer: Investment Policy Statement allocation and rebalancing engine.
//!
//! Reads a client profile (IPS parameters) from TOML and portfolio holdings
//! from JSON, aggregates current asset-class allocations, compares them to the
//! advisor's targets, and produces ranked buy/sell rebalancing recommendations
//! with an audit trail.
//!
//! The core is two pure operations: [`allocation::aggregate`] reduces holdings
//! to current percentage-of-total-value per asset class, and
//! [`rebalance::generate`] turns current/target drift into ordered
//! recommendations. Everything else (report rendering, CLI, audit log) is a
//! caller of those two functions.

pub mod allocation;
pub mod analysis;
pub mod asset_class;
pub mod audit;
pub mod error;
pub mod holding;
pub mod profile;
pub mod rebalance;
pub mod report;
