//! Kubernetes API client module
//!
//! Target discovery, cluster sizing and container resource patching for
//! a cluster-proportional autoscaler.

mod api;
mod client;
mod discovery;
#[cfg(test)]
mod fake;
mod nodes;
mod patch;
mod target;

pub use api::{ControlPlane, KubeApi};
pub use client::{K8sClient, ScalingClient};
pub use discovery::{discover_api, resolve_in_catalog};
pub use nodes::{read_cluster_size, sum_capacity, ClusterSize};
pub use patch::{build_patch, update_resources, ResourceRequirementsMap};
pub use target::{make_target, parse_target, Target, WorkloadKind};
