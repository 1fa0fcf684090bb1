//! The `clean` command: delete the applied exercise resources.

use crate::config::GradingConfig;
use crate::deploy::{clean_resources, StepContext};
use crate::formatting::{FormattingConfig, Styler};
use crate::tools::SystemRunner;
use anyhow::Result;
use std::path::PathBuf;

pub struct CleanConfig {
    pub path: PathBuf,
    pub formatting: FormattingConfig,
}

pub fn run_clean(config: &GradingConfig, clean: CleanConfig) -> Result<()> {
    let styler = Styler::new(clean.formatting);
    super::deploy::print_banner(&styler, "Cleaning up...");

    let runner = SystemRunner;
    let ctx = StepContext {
        config,
        runner: &runner,
        root: &clean.path,
    };

    println!("  {}", styler.info("Deleting Kubernetes resources..."));
    let report = clean_resources(&ctx).map_err(|err| anyhow::anyhow!("clean aborted: {err}"))?;
    for line in &report.successes {
        println!(
            "  {} {}",
            styler.success(styler.emoji("✓", "[x]")),
            styler.success(line)
        );
    }

    println!();
    println!("  {}", styler.warning("To delete the kind cluster:"));
    println!("  kind delete cluster --name {}", config.cluster.name);
    println!();
    Ok(())
}
