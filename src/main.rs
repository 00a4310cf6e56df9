//! CLI entry point for the IPS rebalancer.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;

use ips_rebalancer::allocation;
use ips_rebalancer::analysis;
use ips_rebalancer::audit::{self, AuditLog};
use ips_rebalancer::error::Result;
use ips_rebalancer::holding::HoldingsFile;
use ips_rebalancer::profile::Profile;
use ips_rebalancer::rebalance;
use ips_rebalancer::report::{AllocationReport, IpsSummary, RecommendationList, format_usd};

#[derive(Parser)]
#[command(name = "ips-rebalancer")]
#[command(about = "IPS allocation review and rebalancing recommendations")]
#[command(version)]
struct Cli {
    /// Path to profile.toml
    #[arg(long, default_value = "profile.toml")]
    profile: PathBuf,

    /// Path to holdings.json
    #[arg(long, default_value = "holdings.json")]
    holdings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full dashboard: allocation table, recommendations, IPS summary
    Report,

    /// Rebalancing recommendations only
    Recommend {
        /// Override the profile's drift threshold (percentage points)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Check that target allocations sum to 100
    Validate,

    /// Estimate the capital-gains tax cost of rebalancing
    Tax,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let profile = match Profile::load(&cli.profile) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading profile: {e}");
            process::exit(1);
        }
    };

    let holdings = match HoldingsFile::load(&cli.holdings) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error loading holdings: {e}");
            process::exit(1);
        }
    };

    let ctx = RunContext {
        profile,
        holdings,
        profile_file: cli.profile.display().to_string(),
        holdings_file: cli.holdings.display().to_string(),
    };

    let result = match cli.command {
        Command::Report => run_report(&ctx),
        Command::Recommend { threshold } => run_recommend(&ctx, threshold),
        Command::Validate => run_validate(&ctx),
        Command::Tax => run_tax(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

struct RunContext {
    profile: Profile,
    holdings: HoldingsFile,
    profile_file: String,
    holdings_file: String,
}

impl RunContext {
    fn open_audit(&self) -> Result<AuditLog> {
        let mut log = AuditLog::open(&self.profile.audit_path())?;
        audit::log_run_started(
            &mut log,
            &self.profile_file,
            &self.holdings_file,
            &self.profile.client.name,
        )?;
        Ok(log)
    }
}

fn run_report(ctx: &RunContext) -> Result<()> {
    let mut audit_log = ctx.open_audit()?;

    let holdings = &ctx.holdings.holdings;
    let total = allocation::total_value(holdings);
    let current = allocation::aggregate(holdings)?;
    audit::log_allocations(&mut audit_log, &current, total)?;

    let targets = ctx.profile.targets();
    let threshold = ctx.profile.rebalancing.threshold_pct;
    let recommendations = rebalance::generate(&current, &targets, total, threshold)?;
    audit::log_recommendations(&mut audit_log, threshold, &recommendations)?;

    info!(
        "portfolio {} as of {}: {} holdings, {} recommendation(s)",
        format_usd(total),
        ctx.holdings.as_of,
        holdings.len(),
        recommendations.len(),
    );

    println!(
        "{}",
        AllocationReport {
            current: &current,
            target: &targets,
        }
    );
    println!("{}", RecommendationList(&recommendations));
    println!(
        "Estimated rebalancing tax impact (taxable accounts): {}\n",
        format_usd(analysis::tax_impact(holdings)),
    );
    println!(
        "{}",
        IpsSummary {
            profile: &ctx.profile,
            holdings,
        }
    );

    Ok(())
}

fn run_recommend(ctx: &RunContext, threshold_override: Option<f64>) -> Result<()> {
    let mut audit_log = ctx.open_audit()?;

    let holdings = &ctx.holdings.holdings;
    let total = allocation::total_value(holdings);
    let current = allocation::aggregate(holdings)?;
    audit::log_allocations(&mut audit_log, &current, total)?;

    let threshold = threshold_override.unwrap_or(ctx.profile.rebalancing.threshold_pct);
    let recommendations = rebalance::generate(&current, &ctx.profile.targets(), total, threshold)?;
    audit::log_recommendations(&mut audit_log, threshold, &recommendations)?;

    println!("{}", RecommendationList(&recommendations));
    Ok(())
}

fn run_validate(ctx: &RunContext) -> Result<()> {
    let mut audit_log = ctx.open_audit()?;

    let targets = ctx.profile.targets();
    let valid = allocation::validate_total(&targets);
    audit::log_validation(&mut audit_log, targets.total(), valid)?;

    if valid {
        println!("Target allocations sum to 100.0% — OK");
        Ok(())
    } else {
        eprintln!(
            "Target allocations sum to {:.1}%, not 100% — adjust targets",
            targets.total()
        );
        process::exit(2);
    }
}

fn run_tax(ctx: &RunContext) -> Result<()> {
    let impact = analysis::tax_impact(&ctx.holdings.holdings);
    println!(
        "Estimated rebalancing tax impact (taxable accounts, {:.0}% LTCG): {}",
        analysis::LTCG_RATE * 100.0,
        format_usd(impact),
    );
    Ok(())
}
