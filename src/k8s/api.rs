//! Remote control-plane operations
//!
//! The three calls the scaling client needs, behind a trait so the
//! discovery, sizing and patching logic can run against a fake.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::Node;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::{
    api::{Api, ListParams, Patch, PatchParams},
    config::{KubeConfigOptions, Kubeconfig},
    core::NamespaceResourceScope,
    Client, Config,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::path::Path;
use tracing::debug;

use super::target::WorkloadKind;
use crate::error::{Error, Result};

/// Control-plane calls used by the scaling client
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Preferred version of every API group, restricted to namespaced resources
    async fn preferred_namespaced_resources(&self) -> Result<Vec<APIResourceList>, kube::Error>;

    /// All nodes in the cluster
    async fn list_nodes(&self) -> Result<Vec<Node>, kube::Error>;

    /// Apply a strategic merge patch to one workload
    async fn patch_workload(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
        patch: &Value,
    ) -> Result<(), kube::Error>;
}

/// [`ControlPlane`] backed by a live API server
#[derive(Clone)]
pub struct KubeApi {
    client: Client,
}

impl KubeApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using a kubeconfig file, or in-cluster credentials when no
    /// path is given
    pub async fn connect(kubeconfig: Option<&Path>) -> Result<Self> {
        let config = match kubeconfig {
            Some(path) => {
                let kubeconfig_err = |source| Error::Kubeconfig {
                    path: path.display().to_string(),
                    source,
                };
                let kc = Kubeconfig::read_from(path).map_err(kubeconfig_err)?;
                Config::from_custom_kubeconfig(kc, &KubeConfigOptions::default())
                    .await
                    .map_err(kubeconfig_err)?
            }
            None => Config::incluster().map_err(Error::InCluster)?,
        };

        let client = Client::try_from(config).map_err(Error::Connect)?;
        Ok(Self::new(client))
    }

    async fn patch_namespaced<K>(
        &self,
        namespace: &str,
        name: &str,
        patch: &Value,
    ) -> Result<(), kube::Error>
    where
        K: kube::Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + Debug,
        <K as kube::Resource>::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        api.patch(name, &PatchParams::default(), &Patch::Strategic(patch))
            .await?;
        Ok(())
    }
}

/// Drop cluster-scoped resources and subresources from a catalog entry
fn namespaced_only(mut list: APIResourceList) -> APIResourceList {
    list.resources
        .retain(|res| res.namespaced && !res.name.contains('/'));
    list
}

#[async_trait]
impl ControlPlane for KubeApi {
    async fn preferred_namespaced_resources(&self) -> Result<Vec<APIResourceList>, kube::Error> {
        let mut lists = Vec::new();

        let core = self.client.list_core_api_versions().await?;
        if let Some(version) = core.versions.first() {
            let list = self.client.list_core_api_resources(version).await?;
            lists.push(namespaced_only(list));
        }

        let groups = self.client.list_api_groups().await?;
        for group in groups.groups {
            let Some(preferred) = group
                .preferred_version
                .or_else(|| group.versions.into_iter().next())
            else {
                continue;
            };
            debug!(group_version = %preferred.group_version, "listing group resources");
            let list = self
                .client
                .list_api_group_resources(&preferred.group_version)
                .await?;
            lists.push(namespaced_only(list));
        }

        Ok(lists)
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, kube::Error> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = nodes.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn patch_workload(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
        patch: &Value,
    ) -> Result<(), kube::Error> {
        match kind {
            WorkloadKind::Deployment => {
                self.patch_namespaced::<Deployment>(namespace, name, patch)
                    .await
            }
            WorkloadKind::DaemonSet => {
                self.patch_namespaced::<DaemonSet>(namespace, name, patch)
                    .await
            }
            WorkloadKind::ReplicaSet => {
                self.patch_namespaced::<ReplicaSet>(namespace, name, patch)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;

    fn resource(name: &str, namespaced: bool) -> APIResource {
        APIResource {
            name: name.to_string(),
            kind: "Kind".to_string(),
            namespaced,
            ..Default::default()
        }
    }

    #[test]
    fn test_namespaced_only() {
        let list = APIResourceList {
            group_version: "apps/v1".to_string(),
            resources: vec![
                resource("deployments", true),
                resource("deployments/scale", true),
                resource("controllerrevisions", true),
                resource("nodes", false),
            ],
        };

        let names: Vec<_> = namespaced_only(list)
            .resources
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["deployments", "controllerrevisions"]);
    }

    #[tokio::test]
    async fn test_connect_malformed_kubeconfig() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "clusters: [not, closed").unwrap();

        let err = KubeApi::connect(Some(path.as_path())).await.err().unwrap();

        assert!(matches!(err, Error::Kubeconfig { path: ref p, .. } if p == &path.display().to_string()));
        assert!(err.is_construction());
    }

    #[tokio::test]
    async fn test_connect_missing_kubeconfig() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing");

        let err = KubeApi::connect(Some(path.as_path())).await.err().unwrap();

        assert!(matches!(err, Error::Kubeconfig { .. }));
        assert!(err.is_construction());
    }
}
