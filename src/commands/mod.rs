//! CLI command implementations.
//!
//! Each submodule handles one subcommand with its configuration and
//! execution logic:
//! - **check**: grade the four manifests against the rubric
//! - **deploy**: build, load, and apply against a local kind cluster
//! - **clean**: delete the applied resources
//! - **init**: write a default `kubegrade.toml`

pub mod check;
pub mod clean;
pub mod deploy;
pub mod init;

pub use check::{run_check, CheckConfig};
pub use clean::{run_clean, CleanConfig};
pub use deploy::{run_deploy, DeployCommandConfig};
pub use init::init_config;
