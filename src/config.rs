//! Harness configuration, loaded once at startup from an optional
//! `kubegrade.toml` next to the exercise and passed down explicitly.
//! Rubric constants (expected names, images, ports) are part of the
//! fixed rubric and deliberately not configurable here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "kubegrade.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the four graded manifests
    #[serde(default = "default_manifest_dir")]
    pub manifest_dir: String,

    /// Directory holding the demo application's Dockerfile
    #[serde(default = "default_app_src_dir")]
    pub app_src_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// kind cluster name
    #[serde(default = "default_cluster_name")]
    pub name: String,

    /// Image tag built and loaded into the cluster
    #[serde(default = "default_image")]
    pub image: String,

    /// `app` label the exercise resources carry
    #[serde(default = "default_app_label")]
    pub app_label: String,

    /// Deployment name waited on during rollout
    #[serde(default = "default_deployment_name")]
    pub deployment_name: String,

    /// Service name used in the port-forward hint
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Upper bound on the `kubectl wait` rollout check
    #[serde(default = "default_rollout_timeout")]
    pub rollout_timeout_secs: u64,
}

fn default_manifest_dir() -> String {
    "k8s".to_string()
}

fn default_app_src_dir() -> String {
    "src".to_string()
}

fn default_cluster_name() -> String {
    "k8s-challenge".to_string()
}

fn default_image() -> String {
    "k8s-challenge-app:latest".to_string()
}

fn default_app_label() -> String {
    "k8s-challenge".to_string()
}

fn default_deployment_name() -> String {
    "k8s-challenge-app".to_string()
}

fn default_service_name() -> String {
    "k8s-challenge-service".to_string()
}

fn default_rollout_timeout() -> u64 {
    60
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest_dir: default_manifest_dir(),
            app_src_dir: default_app_src_dir(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: default_cluster_name(),
            image: default_image(),
            app_label: default_app_label(),
            deployment_name: default_deployment_name(),
            service_name: default_service_name(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            rollout_timeout_secs: default_rollout_timeout(),
        }
    }
}

impl GradingConfig {
    /// Load `kubegrade.toml` from the exercise root. A missing file is
    /// the defaults; a malformed file is an error for the operator.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !crate::io::file_exists(&path) {
            return Ok(Self::default());
        }

        let content = crate::io::read_file(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: GradingConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.paths.manifest_dir.is_empty() {
            anyhow::bail!("paths.manifest_dir must not be empty");
        }
        if self.cluster.name.is_empty() {
            anyhow::bail!("cluster.name must not be empty");
        }
        if self.deploy.rollout_timeout_secs == 0 {
            anyhow::bail!("deploy.rollout_timeout_secs must be positive");
        }
        Ok(())
    }

    pub fn manifest_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.manifest_dir)
    }

    pub fn app_src_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.app_src_dir)
    }
}

/// Template written by `kubegrade init`.
pub fn default_config_template() -> &'static str {
    r#"# kubegrade configuration

[paths]
manifest_dir = "k8s"
app_src_dir = "src"

[cluster]
name = "k8s-challenge"
image = "k8s-challenge-app:latest"
app_label = "k8s-challenge"
deployment_name = "k8s-challenge-app"
service_name = "k8s-challenge-service"

[deploy]
rollout_timeout_secs = 60
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GradingConfig::default();
        assert_eq!(config.paths.manifest_dir, "k8s");
        assert_eq!(config.cluster.name, "k8s-challenge");
        assert_eq!(config.cluster.image, "k8s-challenge-app:latest");
        assert_eq!(config.deploy.rollout_timeout_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: GradingConfig = toml::from_str(
            r#"
            [cluster]
            name = "my-cluster"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster.name, "my-cluster");
        assert_eq!(config.cluster.image, "k8s-challenge-app:latest");
        assert_eq!(config.paths.manifest_dir, "k8s");
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: GradingConfig = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.paths.manifest_dir, "k8s");
        assert_eq!(config.cluster.deployment_name, "k8s-challenge-app");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_manifest_dir() {
        let config: GradingConfig = toml::from_str(
            r#"
            [paths]
            manifest_dir = ""
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GradingConfig::load(dir.path()).unwrap();
        assert_eq!(config.cluster.name, "k8s-challenge");
    }
}
