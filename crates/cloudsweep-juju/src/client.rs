//! juju CLI wrapper
//!
//! Runs the juju binary for each bootstrap step and keeps its output in the
//! step's log directory.

use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use cloudsweep_core::{BootstrapError, BootstrapRequest, PlatformClient, RunConfig};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// juju CLI wrapper
#[derive(Debug, Clone)]
pub struct JujuClient {
    binary: PathBuf,
    debug: bool,
    soft_deadline: Option<DateTime<Utc>>,
}

impl JujuClient {
    /// Wrap `binary`, failing if it cannot be found
    pub fn new(binary: impl Into<PathBuf>) -> Result<Self> {
        let binary = binary.into();
        if !binary_exists(&binary)? {
            return Err(ClientError::BinaryNotFound(binary));
        }

        Ok(Self {
            binary,
            debug: false,
            soft_deadline: None,
        })
    }

    pub fn from_run_config(run_config: &RunConfig) -> Result<Self> {
        Ok(Self::new(&run_config.platform_bin)?
            .with_debug(run_config.debug)
            .with_soft_deadline(run_config.deadline))
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Commands issued after this time log a warning but still run
    pub fn with_soft_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.soft_deadline = deadline;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn args<'a>(&self, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 1);
        if let Some((subcommand, rest)) = args.split_first() {
            full.push(*subcommand);
            if self.debug {
                full.push("--debug");
            }
            full.extend_from_slice(rest);
        }
        full
    }

    /// Run a juju command, saving its output as `<log_dir>/<step>.log`
    fn run_command(
        &self,
        step: &str,
        args: &[&str],
        log_dir: &Path,
    ) -> std::result::Result<String, BootstrapError> {
        if let Some(deadline) = self.soft_deadline
            && Utc::now() > deadline
        {
            tracing::warn!("soft deadline {} has passed; running {} anyway", deadline, step);
        }

        let args = self.args(args);
        let command_line = format!("{} {}", self.binary.display(), args.join(" "));
        tracing::debug!("Running: {}", command_line);

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| BootstrapError::Spawn {
                program: self.binary.display().to_string(),
                source,
            })?;

        write_step_log(log_dir, step, &output)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BootstrapError::CommandFailed {
                command: command_line,
                status: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl PlatformClient for JujuClient {
    fn bootstrap(&self, request: &BootstrapRequest<'_>) -> std::result::Result<(), BootstrapError> {
        let target = format!("{}/{}", request.cloud, request.region);
        self.run_command(
            "bootstrap",
            &["bootstrap", &target, request.controller],
            request.log_dir,
        )?;
        Ok(())
    }

    fn wait_for_started(
        &self,
        controller: &str,
        log_dir: &Path,
    ) -> std::result::Result<(), BootstrapError> {
        let output = self.run_command(
            "show-controller",
            &["show-controller", controller, "--format", "yaml"],
            log_dir,
        )?;

        if !output.contains(controller) {
            return Err(BootstrapError::NotStarted(controller.to_string()));
        }
        Ok(())
    }

    fn kill_controller(
        &self,
        controller: &str,
        log_dir: &Path,
    ) -> std::result::Result<(), BootstrapError> {
        self.run_command("kill-controller", &["kill-controller", controller, "-y"], log_dir)?;
        Ok(())
    }
}

fn binary_exists(binary: &Path) -> Result<bool> {
    if binary.components().count() > 1 {
        return Ok(binary.is_file());
    }

    // Bare name: resolve through PATH
    let which = Command::new("which").arg(binary).output()?;
    Ok(which.status.success())
}

fn write_step_log(log_dir: &Path, step: &str, output: &Output) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let mut content = output.stdout.clone();
    content.extend_from_slice(&output.stderr);
    std::fs::write(log_dir.join(format!("{}.log", step)), content)
}
