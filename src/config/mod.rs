//! Configuration module
//!
//! Client construction settings and the container resources file.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::load_resources;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "default";

/// Settings needed to build a [`K8sClient`](crate::k8s::K8sClient)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Namespace of the scaled workload
    pub namespace: String,

    /// Scaled workload as `<kind>/<name>`
    pub target: String,

    /// Kubeconfig path; in-cluster credentials are used when unset
    pub kubeconfig: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(namespace: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            target: target.into(),
            kubeconfig: None,
        }
    }

    pub fn with_kubeconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }

    /// Build from explicit values, falling back to the environment
    pub fn resolve(
        env: &EnvConfig,
        namespace: Option<String>,
        target: Option<String>,
        kubeconfig: Option<PathBuf>,
    ) -> Result<Self> {
        let config = Self {
            namespace: namespace
                .or_else(|| env.namespace.clone())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            target: target.or_else(|| env.target.clone()).unwrap_or_default(),
            kubeconfig: kubeconfig.or_else(|| env.kubeconfig.clone().map(PathBuf::from)),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            anyhow::bail!("Namespace must not be empty");
        }
        if self.target.is_empty() {
            anyhow::bail!("Target must be set (e.g. deployment/my-app)");
        }
        Ok(())
    }
}
