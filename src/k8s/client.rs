//! Scaling client facade
//!
//! Owns the control-plane connection and the target resolved at
//! construction; every call after that is a fresh remote query.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::api::{ControlPlane, KubeApi};
use super::nodes::{read_cluster_size, ClusterSize};
use super::patch::{build_patch, update_resources, ResourceRequirementsMap};
use super::target::{make_target, Target};
use crate::config::ClientConfig;
use crate::error::Result;

/// Operations an autoscaler needs from the cluster
#[async_trait]
pub trait ScalingClient: Send + Sync {
    /// Count nodes and cores in the cluster
    async fn get_cluster_size(&mut self) -> Result<ClusterSize>;

    /// Update the resource requirements of containers in the target
    async fn update_resources(&self, resources: &ResourceRequirementsMap) -> Result<()>;
}

/// Kubernetes-backed [`ScalingClient`]
pub struct K8sClient<C = KubeApi> {
    api: C,
    target: Target,
    cluster_size: Option<ClusterSize>,
}

impl K8sClient<KubeApi> {
    /// Connect to the cluster and resolve the configured target
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let api = KubeApi::connect(config.kubeconfig.as_deref()).await?;
        Self::with_control_plane(api, &config.target, &config.namespace).await
    }
}

impl<C: ControlPlane> K8sClient<C> {
    /// Resolve `target` (`<kind>/<name>`) against `api`
    pub async fn with_control_plane(api: C, target: &str, namespace: &str) -> Result<Self> {
        let target = make_target(&api, target, namespace).await?;
        info!("scaling target is {}", target);

        Ok(Self {
            api,
            target,
            cluster_size: None,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The most recent successful cluster size read, for diagnostics
    pub fn last_cluster_size(&self) -> Option<ClusterSize> {
        self.cluster_size
    }

    pub fn control_plane(&self) -> &C {
        &self.api
    }

    /// The patch `update_resources` would send, without sending it
    pub fn preview_patch(&self, resources: &ResourceRequirementsMap) -> Result<Value> {
        build_patch(&self.target, resources)
    }

    pub async fn get_cluster_size(&mut self) -> Result<ClusterSize> {
        let size = read_cluster_size(&self.api).await?;
        self.cluster_size = Some(size);
        Ok(size)
    }

    pub async fn update_resources(&self, resources: &ResourceRequirementsMap) -> Result<()> {
        update_resources(&self.api, &self.target, resources).await
    }
}

#[async_trait]
impl<C: ControlPlane> ScalingClient for K8sClient<C> {
    async fn get_cluster_size(&mut self) -> Result<ClusterSize> {
        K8sClient::<C>::get_cluster_size(self).await
    }

    async fn update_resources(&self, resources: &ResourceRequirementsMap) -> Result<()> {
        K8sClient::<C>::update_resources(self, resources).await
    }
}
