mod report;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Parser;
use cloudsweep_config::HomeDirSource;
use cloudsweep_core::{
    CREDENTIALS_DOCUMENT, DEFAULT_PLATFORM_BIN, PUBLIC_CLOUDS_DOCUMENT, RegionFailure, RunConfig,
    Sweep, default_log_dir, discard_log_dir,
};
use cloudsweep_juju::JujuClient;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEADLINE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "cloudsweep", version)]
#[command(
    about = "Bootstrap juju in every region of every public cloud with local credentials",
    long_about = None
)]
struct Cli {
    /// Index of the first cloud/region to bootstrap (resume an earlier run)
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Show debug output and pass --debug to juju
    #[arg(long)]
    debug: bool,
    /// Soft deadline for the run in UTC (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_deadline)]
    deadline: Option<DateTime<Utc>>,
    /// Path to the juju binary
    #[arg(long, default_value = DEFAULT_PLATFORM_BIN)]
    juju_bin: PathBuf,
    /// Directory for per-region logs (default: a fresh run directory)
    #[arg(long)]
    logs: Option<PathBuf>,
}

fn parse_deadline(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(value, DEADLINE_FORMAT)
        .map(|deadline| deadline.and_utc())
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {}", e))
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let source = HomeDirSource::from_env()?;
    tracing::debug!("reading cloud definitions from {}", source.root().display());

    let generated = cli.logs.is_none();
    let log_dir = default_log_dir(cli.logs).context("failed to prepare the log directory")?;
    let run_config = RunConfig::new(log_dir.clone())
        .with_start(cli.start)
        .with_debug(cli.debug)
        .with_deadline(cli.deadline)
        .with_platform_bin(cli.juju_bin);

    let sweep = match Sweep::prepare(
        &source,
        PUBLIC_CLOUDS_DOCUMENT,
        CREDENTIALS_DOCUMENT,
        run_config,
        JujuClient::from_run_config,
    ) {
        Ok(sweep) => sweep,
        Err(e) => {
            if generated {
                discard_log_dir(&log_dir);
            }
            return Err(e.into());
        }
    };

    let failures: Vec<RegionFailure> = sweep.bootstrap_cloud_regions().collect();
    report::print_summary(&failures, sweep.run_config(), Utc::now());

    if failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
