//! Deployment orchestration: an ordered pipeline of named steps that
//! build the exercise image, load it into a kind cluster, and apply
//! the student's manifests. The runner aborts on the first failed step
//! and reports remediation text; nothing here touches grading state.

use crate::config::GradingConfig;
use crate::formatting::Styler;
use crate::tools::{docker_running, kind_available, kubectl_available, CommandRunner};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
    /// A required external tool is missing or unreachable
    #[error("{message}")]
    ToolUnavailable {
        message: &'static str,
        remedy: &'static str,
    },

    /// An external command exited nonzero
    #[error("{message}")]
    CommandFailed { message: String, detail: String },
}

impl StepError {
    fn command_failed(message: impl Into<String>, detail: impl Into<String>) -> Self {
        StepError::CommandFailed {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn remedy(&self) -> Option<&str> {
        match self {
            StepError::ToolUnavailable { remedy, .. } => Some(remedy),
            StepError::CommandFailed { .. } => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            StepError::ToolUnavailable { .. } => None,
            StepError::CommandFailed { detail, .. } => {
                (!detail.is_empty()).then_some(detail.as_str())
            }
        }
    }
}

/// What a finished step wants echoed to the user.
#[derive(Debug, Default)]
pub struct StepReport {
    /// Lines rendered with a pass icon
    pub successes: Vec<String>,
    /// Raw tool output echoed indented
    pub output: Vec<String>,
    /// Soft failures; the pipeline continues
    pub warnings: Vec<String>,
}

impl StepReport {
    fn success(line: impl Into<String>) -> Self {
        StepReport {
            successes: vec![line.into()],
            ..Default::default()
        }
    }
}

/// Everything a step needs to run.
pub struct StepContext<'a> {
    pub config: &'a GradingConfig,
    pub runner: &'a dyn CommandRunner,
    pub root: &'a Path,
}

type StepFn = fn(&StepContext) -> Result<StepReport, StepError>;

pub struct Step {
    pub name: &'static str,
    /// Progress line printed before the step runs
    pub intro: &'static str,
    pub run: StepFn,
}

/// The deployment pipeline, in execution order.
pub fn pipeline() -> Vec<Step> {
    vec![
        Step {
            name: "prerequisites",
            intro: "Checking prerequisites...",
            run: check_prerequisites,
        },
        Step {
            name: "ensure-cluster",
            intro: "Checking kind cluster...",
            run: ensure_cluster,
        },
        Step {
            name: "build-image",
            intro: "Building Docker image...",
            run: build_image,
        },
        Step {
            name: "load-image",
            intro: "Loading image into kind...",
            run: load_image,
        },
        Step {
            name: "apply-manifests",
            intro: "Applying Kubernetes manifests...",
            run: apply_manifests,
        },
        Step {
            name: "wait-rollout",
            intro: "Waiting for pods to be ready...",
            run: wait_rollout,
        },
        Step {
            name: "show-status",
            intro: "Current status:",
            run: show_status,
        },
    ]
}

/// Run every step in order, printing progress. Stops at the first
/// failure and reports its remedy; the caller decides the exit code.
pub fn run_pipeline(ctx: &StepContext, styler: &Styler) -> Result<(), StepError> {
    for step in pipeline() {
        println!("  {}", styler.info(step.intro));
        match (step.run)(ctx) {
            Ok(report) => print_step_report(&report, styler),
            Err(err) => {
                print_step_error(&err, styler);
                return Err(err);
            }
        }
    }
    Ok(())
}

fn print_step_report(report: &StepReport, styler: &Styler) {
    for line in &report.output {
        println!("      {line}");
    }
    for line in &report.successes {
        println!(
            "  {} {}",
            styler.success(styler.emoji("✓", "[x]")),
            styler.success(line)
        );
    }
    for line in &report.warnings {
        println!("  {}", styler.warning(line));
    }
}

fn print_step_error(err: &StepError, styler: &Styler) {
    println!(
        "  {} {}",
        styler.error(styler.emoji("❌", "[FAIL]")),
        styler.error(&err.to_string())
    );
    if let Some(detail) = err.detail() {
        println!("{detail}");
    }
    if let Some(remedy) = err.remedy() {
        println!("  {}", styler.warning(remedy));
    }
}

fn check_prerequisites(ctx: &StepContext) -> Result<StepReport, StepError> {
    if !docker_running(ctx.runner) {
        return Err(StepError::ToolUnavailable {
            message: "Docker is not running",
            remedy: "Start Docker Desktop and try again.",
        });
    }
    if !kubectl_available(ctx.runner) {
        return Err(StepError::ToolUnavailable {
            message: "kubectl not found",
            remedy: "See README.md Step 0 to install kubectl.",
        });
    }
    if !kind_available(ctx.runner) {
        return Err(StepError::ToolUnavailable {
            message: "kind not found",
            remedy: "See README.md Step 0 to install kind.",
        });
    }
    Ok(StepReport::success("All tools available"))
}

fn ensure_cluster(ctx: &StepContext) -> Result<StepReport, StepError> {
    let cluster = &ctx.config.cluster.name;
    let clusters = ctx
        .runner
        .run("kind", &["get", "clusters"], None)
        .map_err(|err| StepError::command_failed("Failed to list kind clusters", err.to_string()))?;

    if clusters.stdout.contains(cluster) {
        return Ok(StepReport::success("Cluster exists"));
    }

    let created = ctx
        .runner
        .run("kind", &["create", "cluster", "--name", cluster], None)
        .map_err(|err| StepError::command_failed("Failed to create cluster", err.to_string()))?;
    if !created.success() {
        return Err(StepError::command_failed(
            "Failed to create cluster",
            created.stderr,
        ));
    }
    Ok(StepReport::success("Cluster created"))
}

fn build_image(ctx: &StepContext) -> Result<StepReport, StepError> {
    let src_dir = ctx.config.app_src_dir(ctx.root);
    let src = src_dir.to_string_lossy();
    let built = ctx
        .runner
        .run(
            "docker",
            &["build", "-t", &ctx.config.cluster.image, src.as_ref()],
            None,
        )
        .map_err(|err| StepError::command_failed("Failed to build image", err.to_string()))?;
    if !built.success() {
        return Err(StepError::command_failed("Failed to build image", built.stderr));
    }
    Ok(StepReport::success("Image built"))
}

fn load_image(ctx: &StepContext) -> Result<StepReport, StepError> {
    let loaded = ctx
        .runner
        .run(
            "kind",
            &[
                "load",
                "docker-image",
                &ctx.config.cluster.image,
                "--name",
                &ctx.config.cluster.name,
            ],
            None,
        )
        .map_err(|err| StepError::command_failed("Failed to load image", err.to_string()))?;
    if !loaded.success() {
        return Err(StepError::command_failed("Failed to load image", loaded.stderr));
    }
    Ok(StepReport::success("Image loaded"))
}

fn apply_manifests(ctx: &StepContext) -> Result<StepReport, StepError> {
    let manifest_dir = ctx.config.manifest_dir(ctx.root);
    let dir = manifest_dir.to_string_lossy();
    let applied = ctx
        .runner
        .run("kubectl", &["apply", "-f", dir.as_ref()], None)
        .map_err(|err| StepError::command_failed("Failed to apply manifests", err.to_string()))?;
    if !applied.success() {
        return Err(StepError::command_failed(
            "Failed to apply manifests",
            applied.stderr,
        ));
    }

    Ok(StepReport {
        output: applied.stdout.trim().lines().map(String::from).collect(),
        ..Default::default()
    })
}

// A slow rollout is a soft failure: warn with a follow-up command and
// keep going so the status step still prints.
fn wait_rollout(ctx: &StepContext) -> Result<StepReport, StepError> {
    let deployment = format!("deployment/{}", ctx.config.cluster.deployment_name);
    let timeout = format!("--timeout={}s", ctx.config.deploy.rollout_timeout_secs);
    let waited = ctx
        .runner
        .run(
            "kubectl",
            &["wait", "--for=condition=available", &deployment, &timeout],
            None,
        )
        .map_err(|err| StepError::command_failed("Failed to wait for rollout", err.to_string()))?;

    if waited.success() {
        Ok(StepReport::success("Deployment is ready!"))
    } else {
        Ok(StepReport {
            warnings: vec![
                "Deployment not ready yet".to_string(),
                "Run 'kubectl get pods' to check status".to_string(),
            ],
            ..Default::default()
        })
    }
}

fn show_status(ctx: &StepContext) -> Result<StepReport, StepError> {
    let selector = format!("app={}", ctx.config.cluster.app_label);
    let mut output = Vec::new();

    for resource in ["pods", "services"] {
        let listed = ctx
            .runner
            .run("kubectl", &["get", resource, "-l", &selector], None)
            .map_err(|err| {
                StepError::command_failed(format!("Failed to list {resource}"), err.to_string())
            })?;
        output.extend(listed.stdout.trim().lines().map(String::from));
        output.push(String::new());
    }
    output.pop();

    Ok(StepReport {
        output,
        ..Default::default()
    })
}

/// Delete the applied resources. Missing resources are not an error.
pub fn clean_resources(ctx: &StepContext) -> Result<StepReport, StepError> {
    let manifest_dir = ctx.config.manifest_dir(ctx.root);
    let dir = manifest_dir.to_string_lossy();
    ctx.runner
        .run(
            "kubectl",
            &["delete", "-f", dir.as_ref(), "--ignore-not-found"],
            None,
        )
        .map_err(|err| StepError::command_failed("Failed to delete resources", err.to_string()))?;

    Ok(StepReport::success("Resources deleted"))
}
