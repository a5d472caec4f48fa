use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::usage_reporting::policies::PlanOrdering;

/// Count managed service instances per offering and plan across a Cloud Foundry foundation
#[derive(Parser, Debug)]
#[command(name = "si-usage-report")]
#[command(version)]
#[command(
    about = "Report p.mysql, p.pcc, p.rabbit and p.redis service instance counts by plan",
    long_about = "Lists every service instance visible to the logged-in CF CLI user \
                  and reports instance counts for the managed offerings, grouped by plan.\n\n\
                  Uses the session from `cf login` ($CF_HOME/.cf/config.json)."
)]
pub struct Args {
    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a config file (defaults to ./si-usage-report.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Order of plans within each product: first-seen or lexicographic [default: first-seen]
    #[arg(long, value_name = "ORDER")]
    pub plan_order: Option<PlanOrdering>,

    /// Overall deadline in seconds for fetching all instances [default: 60]
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
