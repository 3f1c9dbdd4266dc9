//! In-memory control plane for tests

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Node, NodeStatus};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::api::ControlPlane;
use super::target::WorkloadKind;

/// A patch the fake received
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPatch {
    pub kind: WorkloadKind,
    pub namespace: String,
    pub name: String,
    pub patch: Value,
}

#[derive(Default)]
pub struct FakeControlPlane {
    catalog: Vec<APIResourceList>,
    nodes: Vec<Node>,
    fail_catalog: bool,
    fail_nodes: bool,
    fail_patch: bool,
    catalog_queries: AtomicUsize,
    node_queries: AtomicUsize,
    patches: Mutex<Vec<RecordedPatch>>,
}

impl FakeControlPlane {
    pub fn with_catalog(mut self, catalog: Vec<APIResourceList>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn failing_catalog(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    pub fn failing_nodes(mut self) -> Self {
        self.fail_nodes = true;
        self
    }

    pub fn failing_patch(mut self) -> Self {
        self.fail_patch = true;
        self
    }

    pub fn catalog_queries(&self) -> usize {
        self.catalog_queries.load(Ordering::SeqCst)
    }

    pub fn node_queries(&self) -> usize {
        self.node_queries.load(Ordering::SeqCst)
    }

    pub fn patches(&self) -> Vec<RecordedPatch> {
        self.patches.lock().unwrap().clone()
    }
}

fn server_error(message: &str) -> kube::Error {
    kube::Error::Api(kube::core::ErrorResponse {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: "InternalError".to_string(),
        code: 500,
    })
}

#[async_trait]
impl ControlPlane for FakeControlPlane {
    async fn preferred_namespaced_resources(&self) -> Result<Vec<APIResourceList>, kube::Error> {
        self.catalog_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_catalog {
            return Err(server_error("discovery unavailable"));
        }
        Ok(self.catalog.clone())
    }

    async fn list_nodes(&self) -> Result<Vec<Node>, kube::Error> {
        self.node_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_nodes {
            return Err(server_error("nodes unavailable"));
        }
        Ok(self.nodes.clone())
    }

    async fn patch_workload(
        &self,
        kind: WorkloadKind,
        namespace: &str,
        name: &str,
        patch: &Value,
    ) -> Result<(), kube::Error> {
        self.patches.lock().unwrap().push(RecordedPatch {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            patch: patch.clone(),
        });
        if self.fail_patch {
            return Err(server_error("admission webhook denied the request"));
        }
        Ok(())
    }
}

/// One group/version of the catalog serving `(plural, kind)` resources
pub fn catalog_entry(group_version: &str, resources: &[(&str, &str)]) -> APIResourceList {
    APIResourceList {
        group_version: group_version.to_string(),
        resources: resources
            .iter()
            .map(|(name, kind)| APIResource {
                name: name.to_string(),
                kind: kind.to_string(),
                namespaced: true,
                ..Default::default()
            })
            .collect(),
    }
}

/// A node reporting the given cpu capacity, or no capacity at all
pub fn node(name: &str, cpu: Option<&str>) -> Node {
    let mut node = Node::default();
    node.metadata.name = Some(name.to_string());
    node.status = cpu.map(|cpu| NodeStatus {
        capacity: Some(BTreeMap::from([
            ("cpu".to_string(), Quantity(cpu.to_string())),
            ("memory".to_string(), Quantity("16Gi".to_string())),
        ])),
        ..Default::default()
    });
    node
}
