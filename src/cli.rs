use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kubegrade")]
#[command(about = "Grading harness for the Kubernetes manifest-writing challenge", long_about = None)]
#[command(version)]
pub struct Cli {
    /// No subcommand grades the current directory
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the manifests against the rubric and show your progress
    Check {
        /// Exercise root (holds the k8s/ manifest directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ASCII-only output, no colors, no emoji
        #[arg(long)]
        plain: bool,
    },

    /// Build the image, load it into a kind cluster, and apply the manifests
    Deploy {
        /// Exercise root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// ASCII-only output, no colors, no emoji
        #[arg(long)]
        plain: bool,
    },

    /// Delete the applied Kubernetes resources
    Clean {
        /// Exercise root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// ASCII-only output, no colors, no emoji
        #[arg(long)]
        plain: bool,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
