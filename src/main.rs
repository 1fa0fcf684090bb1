use anyhow::Result;
use kubegrade::cli::Commands;
use kubegrade::commands::{self, CheckConfig, CleanConfig, DeployCommandConfig};
use kubegrade::config::GradingConfig;
use kubegrade::formatting::FormattingConfig;
use std::path::PathBuf;

// Main orchestrator function
fn main() -> Result<()> {
    env_logger::init();

    let cli = kubegrade::cli::parse_args();

    match cli.command {
        // bare `kubegrade` grades the current directory
        None => handle_check(PathBuf::from("."), kubegrade::cli::OutputFormat::Terminal, None, false),
        Some(Commands::Check {
            path,
            format,
            output,
            plain,
        }) => handle_check(path, format, output, plain),
        Some(Commands::Deploy { path, plain }) => {
            let config = GradingConfig::load(&path)?;
            commands::run_deploy(
                &config,
                DeployCommandConfig {
                    path,
                    formatting: create_formatting_config(plain),
                },
            )
        }
        Some(Commands::Clean { path, plain }) => {
            let config = GradingConfig::load(&path)?;
            commands::run_clean(
                &config,
                CleanConfig {
                    path,
                    formatting: create_formatting_config(plain),
                },
            )
        }
        Some(Commands::Init { force }) => commands::init_config(force),
    }
}

fn handle_check(
    path: PathBuf,
    format: kubegrade::cli::OutputFormat,
    output: Option<PathBuf>,
    plain: bool,
) -> Result<()> {
    let config = GradingConfig::load(&path)?;
    commands::run_check(
        &config,
        CheckConfig {
            path,
            format: format.into(),
            output,
            formatting: create_formatting_config(plain),
        },
    )?;
    Ok(())
}

// Pure function to create formatting configuration
fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}
