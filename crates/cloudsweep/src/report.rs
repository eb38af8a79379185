//! End-of-run summary

use chrono::{DateTime, Utc};
use cloudsweep_core::{RegionFailure, RunConfig};
use colored::Colorize;

pub fn summary_lines(
    failures: &[RegionFailure],
    run_config: &RunConfig,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lines = Vec::new();

    if failures.is_empty() {
        lines.push(
            "✓ all attempted regions bootstrapped"
                .green()
                .bold()
                .to_string(),
        );
    } else {
        lines.push(
            format!("✗ {} region(s) failed to bootstrap:", failures.len())
                .red()
                .bold()
                .to_string(),
        );
        for failure in failures {
            lines.push(format!(
                "  {} {}: {}",
                failure.alias.yellow(),
                failure.region,
                failure.error
            ));
        }
    }

    if run_config.start > 0 {
        lines.push(format!(
            "  {} skipped the first {} region(s)",
            "start:".dimmed(),
            run_config.start
        ));
    }
    lines.push(format!(
        "  {} {}",
        "logs:".dimmed(),
        run_config.log_dir.display()
    ));

    if let Some(deadline) = run_config.deadline
        && run_config.deadline_passed(now)
    {
        lines.push(
            format!("⚠ deadline {} was exceeded", deadline.format("%Y-%m-%dT%H:%M:%S"))
                .yellow()
                .to_string(),
        );
    }

    lines
}

pub fn print_summary(failures: &[RegionFailure], run_config: &RunConfig, now: DateTime<Utc>) {
    println!();
    for line in summary_lines(failures, run_config, now) {
        println!("{}", line);
    }
}
