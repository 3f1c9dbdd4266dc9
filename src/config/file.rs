//! Container resources files
//!
//! A YAML or JSON document mapping container names to resource
//! requirements, e.g.
//!
//! ```yaml
//! app:
//!   requests: { cpu: 250m, memory: 128Mi }
//!   limits: { cpu: "1", memory: 512Mi }
//! ```

use anyhow::{Context, Result};
use std::path::Path;

use crate::k8s::ResourceRequirementsMap;

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

/// Load container resources from file
pub fn load_resources(path: impl AsRef<Path>) -> Result<ResourceRequirementsMap> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read resources file: {}", path.display()))?;

    let resources: ResourceRequirementsMap = if is_yaml_file(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML resources: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON resources: {}", path.display()))?
    };

    if resources.is_empty() {
        anyhow::bail!("No containers listed in {}", path.display());
    }
    if let Some(name) = resources.keys().find(|name| name.is_empty()) {
        anyhow::bail!("Invalid container name {:?} in {}", name, path.display());
    }

    Ok(resources)
}
