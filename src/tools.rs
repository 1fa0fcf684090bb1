//! Process boundary for the deployment path: run external commands,
//! capture their output, and probe for the container/cluster tooling.
//! The rubric core never calls into this module.

use anyhow::{Context, Result};
use log::debug;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Generic "run a command, capture exit code/stdout/stderr" seam.
/// Deploy steps depend on this trait so tests can script the tools.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput>;

    /// Whether the program resolves on PATH at all.
    fn lookup(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Real implementation over `std::process::Command`.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput> {
        debug!("running {} {}", program, args.join(" "));
        match timeout {
            None => {
                let output = Command::new(program)
                    .args(args)
                    .output()
                    .with_context(|| format!("Failed to run {program}"))?;
                Ok(CommandOutput {
                    status: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
            Some(limit) => run_with_timeout(program, args, limit),
        }
    }
}

// Spawn with piped output and poll until exit or deadline. Output is
// drained after exit; probe commands stay well under the pipe buffer.
fn run_with_timeout(program: &str, args: &[&str], limit: Duration) -> Result<CommandOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run {program}"))?;

    let deadline = Instant::now() + limit;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                anyhow::bail!("{program} timed out after {}s", limit.as_secs());
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    };

    let mut stdout = String::new();
    let mut stderr = String::new();
    if let Some(mut pipe) = child.stdout.take() {
        pipe.read_to_string(&mut stdout).ok();
    }
    if let Some(mut pipe) = child.stderr.take() {
        pipe.read_to_string(&mut stderr).ok();
    }

    Ok(CommandOutput {
        status: status.code(),
        stdout,
        stderr,
    })
}

/// A tool is available when it resolves on PATH and its probe command
/// exits cleanly within the timeout.
pub fn tool_available(
    runner: &dyn CommandRunner,
    program: &str,
    probe_args: &[&str],
    timeout_secs: u64,
) -> bool {
    if !runner.lookup(program) {
        debug!("{program} not found on PATH");
        return false;
    }

    runner
        .run(program, probe_args, Some(Duration::from_secs(timeout_secs)))
        .map(|output| output.success())
        .unwrap_or(false)
}

/// Docker must both exist and have a reachable daemon.
pub fn docker_running(runner: &dyn CommandRunner) -> bool {
    tool_available(runner, "docker", &["info"], 10)
}

pub fn kubectl_available(runner: &dyn CommandRunner) -> bool {
    tool_available(runner, "kubectl", &["version", "--client"], 5)
}

pub fn kind_available(runner: &dyn CommandRunner) -> bool {
    tool_available(runner, "kind", &["version"], 5)
}
