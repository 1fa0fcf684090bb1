//! The `deploy` command: run the orchestration pipeline against a
//! local kind cluster.

use crate::config::GradingConfig;
use crate::deploy::{run_pipeline, StepContext};
use crate::formatting::{FormattingConfig, Styler};
use crate::tools::SystemRunner;
use anyhow::Result;
use std::path::PathBuf;

pub struct DeployCommandConfig {
    pub path: PathBuf,
    pub formatting: FormattingConfig,
}

pub fn run_deploy(config: &GradingConfig, deploy: DeployCommandConfig) -> Result<()> {
    let styler = Styler::new(deploy.formatting);
    print_banner(&styler, "Deploying to Kubernetes cluster...");

    let runner = SystemRunner;
    let ctx = StepContext {
        config,
        runner: &runner,
        root: &deploy.path,
    };

    run_pipeline(&ctx, &styler).map_err(|err| anyhow::anyhow!("deploy aborted: {err}"))?;

    print_success_hints(config, &styler);
    Ok(())
}

pub(super) fn print_banner(styler: &Styler, headline: &str) {
    let ruler = "=".repeat(60);
    println!();
    println!("{}", styler.info(&ruler));
    println!(
        "{}",
        styler.banner(&format!("  {}Kubernetes Basics Challenge", styler.wheel()))
    );
    println!("{}", styler.info(&ruler));
    println!();
    println!("  {}", styler.bold(headline));
    println!();
}

fn print_success_hints(config: &GradingConfig, styler: &Styler) {
    println!();
    println!(
        "  {}",
        styler.success(&format!("{}Deployment complete!", styler.celebrate()))
    );
    println!();
    println!("  {}", styler.info("To test your app:"));
    println!(
        "  kubectl port-forward service/{} 8080:80",
        config.cluster.service_name
    );
    println!("  curl http://localhost:8080/health");
    println!();
    println!("  {}", styler.info("To view logs:"));
    println!("  kubectl logs -l app={}", config.cluster.app_label);
    println!();
}
