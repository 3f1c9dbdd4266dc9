//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "SCALE_CLIENT";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Namespace from SCALE_CLIENT_NAMESPACE
    pub namespace: Option<String>,
    /// Target from SCALE_CLIENT_TARGET
    pub target: Option<String>,
    /// Kubeconfig path from SCALE_CLIENT_KUBECONFIG
    pub kubeconfig: Option<String>,
    /// Log level from SCALE_CLIENT_LOG_LEVEL
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            namespace: get_env("NAMESPACE"),
            target: get_env("TARGET"),
            kubeconfig: get_env("KUBECONFIG"),
            log_level: get_env("LOG_LEVEL"),
        }
    }
}

/// Get environment variable with prefix, ignoring empty values
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.is_empty())
}

/// Builder for setting environment variables in tests
#[cfg(test)]
#[derive(Default)]
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

#[cfg(test)]
impl EnvBuilder {
    /// Create a new environment builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_NAMESPACE"), namespace.into()));
        self
    }

    /// Set target
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_TARGET"), target.into()));
        self
    }

    /// Set kubeconfig path
    pub fn kubeconfig(mut self, path: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_KUBECONFIG"), path.into()));
        self
    }

    /// Set log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_LOG_LEVEL"), level.into()));
        self
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        for (key, value) in self.vars {
            env::set_var(key, value);
        }

        EnvGuard { previous }
    }
}

/// Guard that restores environment variables on drop
#[cfg(test)]
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all SCALE_CLIENT environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_NAMESPACE   Namespace of the scaled workload");
    println!("  {ENV_PREFIX}_TARGET      Scaled workload as <kind>/<name>");
    println!("  {ENV_PREFIX}_KUBECONFIG  Path to kubeconfig (in-cluster config when unset)");
    println!("  {ENV_PREFIX}_LOG_LEVEL   Log level (trace, debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_TARGET=deployment/coredns");
    println!("  export {ENV_PREFIX}_NAMESPACE=kube-system");
    println!("  k8s-scale-client cluster-size");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.namespace.is_none());
        assert!(config.target.is_none());
        assert!(config.kubeconfig.is_none());
    }

    #[test]
    fn test_env_builder() {
        let _guard = EnvBuilder::new()
            .namespace("kube-system")
            .target("deployment/coredns")
            .kubeconfig("")
            .log_level("debug")
            .apply_scoped();

        let config = EnvConfig::load();
        assert_eq!(config.namespace.as_deref(), Some("kube-system"));
        assert_eq!(config.target.as_deref(), Some("deployment/coredns"));
        assert_eq!(config.kubeconfig, None);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }
}
