//! JSONL audit trail logging.
//!
//! Each CLI run appends events to an audit.jsonl file, one JSON object per
//! line. The core functions never write here; only the caller does.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::asset_class::Allocations;
use crate::error::Result;
use crate::rebalance::Recommendation;

/// An audit event written to the JSONL trail.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub event: &'static str,
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// Append-only audit logger.
pub struct AuditLog {
    writer: BufWriter<std::fs::File>,
}

impl AuditLog {
    /// Open (or create) the audit log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Log an event with arbitrary JSON data.
    pub fn log(&mut self, event: &'static str, data: serde_json::Value) -> Result<()> {
        let entry = AuditEvent {
            event,
            ts: Utc::now(),
            data,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Log a simple event with no additional data.
    pub fn log_simple(&mut self, event: &'static str) -> Result<()> {
        self.log(event, serde_json::json!({}))
    }
}

/// Convenience: log a run start event.
pub fn log_run_started(
    audit: &mut AuditLog,
    profile_file: &str,
    holdings_file: &str,
    client: &str,
) -> Result<()> {
    audit.log(
        "run_started",
        serde_json::json!({
            "profile_file": profile_file,
            "holdings_file": holdings_file,
            "client": client,
        }),
    )
}

/// Convenience: log aggregated allocations.
pub fn log_allocations(
    audit: &mut AuditLog,
    current: &Allocations,
    total_value: f64,
) -> Result<()> {
    let alloc_data: Vec<_> = current
        .iter()
        .map(|(class, pct)| {
            serde_json::json!({
                "class": class.name(),
                "current_pct": pct,
            })
        })
        .collect();

    audit.log(
        "allocations_computed",
        serde_json::json!({
            "allocations": alloc_data,
            "total_value": total_value,
        }),
    )
}

/// Convenience: log generated recommendations.
pub fn log_recommendations(
    audit: &mut AuditLog,
    threshold: f64,
    recommendations: &[Recommendation],
) -> Result<()> {
    let rec_data: Vec<_> = recommendations
        .iter()
        .map(|r| {
            serde_json::json!({
                "action": format!("{}", r.action),
                "class": r.asset_class.name(),
                "amount": r.amount,
                "description": r.description,
            })
        })
        .collect();

    audit.log(
        "recommendations_generated",
        serde_json::json!({
            "threshold_pct": threshold,
            "count": recommendations.len(),
            "recommendations": rec_data,
        }),
    )
}

/// Convenience: log the target-total validation outcome.
pub fn log_validation(audit: &mut AuditLog, target_total: f64, valid: bool) -> Result<()> {
    audit.log(
        "validation_checked",
        serde_json::json!({
            "target_total": target_total,
            "valid": valid,
        }),
    )
}
