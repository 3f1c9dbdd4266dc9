//! Cluster capacity accounting

use k8s_openapi::api::core::v1::Node;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::api::ControlPlane;
use crate::error::{Error, Result};
use crate::utils::NanoQuantity;

/// Node count and total CPU cores of the cluster
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSize {
    pub nodes: usize,
    pub cores: u64,
}

/// Count every node and sum its reported CPU capacity.
///
/// Unschedulable and control-plane nodes are included: this is capacity
/// accounting, not scheduling eligibility.
pub async fn read_cluster_size<C>(api: &C) -> Result<ClusterSize>
where
    C: ControlPlane + ?Sized,
{
    let nodes = api.list_nodes().await.map_err(Error::ListNodes)?;
    let size = sum_capacity(&nodes)?;
    info!("cluster has {} nodes and {} cores", size.nodes, size.cores);
    Ok(size)
}

/// Sum node CPU capacity exactly and convert to whole cores
pub fn sum_capacity(nodes: &[Node]) -> Result<ClusterSize> {
    let mut total = NanoQuantity::ZERO;

    for node in nodes {
        let cpu = node
            .status
            .as_ref()
            .and_then(|status| status.capacity.as_ref())
            .and_then(|capacity| capacity.get("cpu"));

        let Some(cpu) = cpu else {
            warn!("node {} reports no cpu capacity", node_name(node));
            continue;
        };

        let quantity = NanoQuantity::try_from(cpu)
            .ok()
            .filter(|q| !q.is_negative())
            .ok_or_else(|| Error::InvalidQuantity {
                node: node_name(node).to_string(),
                quantity: cpu.0.clone(),
            })?;
        total = total
            .checked_add(quantity)
            .ok_or(Error::CapacityOverflow)?;
    }

    let cores = total
        .to_whole_units()
        .ok_or(Error::NonIntegralCores(total.nanos()))?;
    let cores = u64::try_from(cores).map_err(|_| Error::CoreTotalOutOfRange(cores))?;

    Ok(ClusterSize {
        nodes: nodes.len(),
        cores,
    })
}

fn node_name(node: &Node) -> &str {
    node.metadata.name.as_deref().unwrap_or("<unnamed>")
}
