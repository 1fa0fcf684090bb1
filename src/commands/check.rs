//! The `check` command: grade the manifests and render the report.

use crate::config::GradingConfig;
use crate::formatting::FormattingConfig;
use crate::io::output::{create_writer, OutputFormat};
use crate::report::{build_report, Report};
use anyhow::{Context, Result};
use log::debug;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

pub struct CheckConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

/// Grade and render. Completes with Ok regardless of the score; CI
/// wrappers can gate on [`Report::is_complete`].
pub fn run_check(config: &GradingConfig, check: CheckConfig) -> Result<Report> {
    let manifest_dir = config.manifest_dir(&check.path);
    debug!("grading manifests in {}", manifest_dir.display());

    let report = build_report(&manifest_dir);

    let destination: Box<dyn Write> = match &check.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };

    let mut writer = create_writer(destination, check.format, check.formatting);
    writer.write_report(&report)?;

    Ok(report)
}
