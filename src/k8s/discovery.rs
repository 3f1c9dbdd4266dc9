//! Kubernetes API capability discovery
//!
//! Resolves a short kind hint to the kind and group/version the cluster
//! currently serves it under.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use tracing::{debug, trace};

use super::api::ControlPlane;
use super::target::WorkloadKind;
use crate::error::{Error, Result};

/// Resolve `kind_hint` (e.g. `deployment`) to `(Kind, groupVersion)`.
///
/// Unsupported hints are rejected before the catalog is queried.
pub async fn discover_api<C>(api: &C, kind_hint: &str) -> Result<(String, String)>
where
    C: ControlPlane + ?Sized,
{
    let workload: WorkloadKind = kind_hint.parse()?;

    let catalog = api
        .preferred_namespaced_resources()
        .await
        .map_err(|source| Error::Discovery {
            kind: workload.kind().to_string(),
            source,
        })?;

    resolve_in_catalog(&catalog, workload).ok_or_else(|| Error::KindNotServed {
        kind: workload.kind().to_string(),
        plural: workload.plural().to_string(),
    })
}

/// First group/version in catalog order serving the kind's plural wins
pub fn resolve_in_catalog(catalog: &[APIResourceList], workload: WorkloadKind) -> Option<(String, String)> {
    for list in catalog {
        trace!(group_version = %list.group_version, "scanning catalog entry");
        if let Some(res) = list.resources.iter().find(|res| res.name == workload.plural()) {
            debug!(
                "resolved {} to {}.{}",
                workload.plural(),
                list.group_version,
                res.kind
            );
            return Some((res.kind.clone(), list.group_version.clone()));
        }
    }
    None
}
