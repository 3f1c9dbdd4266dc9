//! Container resource patches
//!
//! Builds the partial pod-template document for a [`Target`] and submits
//! it as a strategic merge patch, so containers are merged by name.

use k8s_openapi::api::core::v1::ResourceRequirements;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

use super::api::ControlPlane;
use super::target::Target;
use crate::error::{Error, Result};

/// Container name to the resources it should request
pub type ResourceRequirementsMap = BTreeMap<String, ResourceRequirements>;

/// Build the patch document for `target`
pub fn build_patch(target: &Target, resources: &ResourceRequirementsMap) -> Result<Value> {
    let containers = resources
        .iter()
        .map(|(name, requirements)| -> Result<Value> {
            Ok(json!({
                "name": name,
                "resources": serde_json::to_value(requirements)?,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(json!({
        "apiVersion": target.api_version(),
        "kind": target.kind(),
        "metadata": {
            "name": target.name(),
        },
        "spec": {
            "template": {
                "spec": {
                    "containers": containers,
                },
            },
        },
    }))
}

/// Patch the target's containers with the given resources
pub async fn update_resources<C>(api: &C, target: &Target, resources: &ResourceRequirementsMap) -> Result<()>
where
    C: ControlPlane + ?Sized,
{
    let kind = target.workload_kind()?;
    let patch = build_patch(target, resources)?;

    api.patch_workload(kind, target.namespace(), target.name(), &patch)
        .await
        .map_err(|source| Error::Patch {
            kind: kind.to_string(),
            namespace: target.namespace().to_string(),
            name: target.name().to_string(),
            source,
        })?;

    info!(
        "patched resources of {} container(s) in {}",
        resources.len(),
        target
    );
    Ok(())
}
