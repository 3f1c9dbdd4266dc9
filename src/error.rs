//! Error types
//!
//! One variant per failure class the client can surface. Construction
//! failures (connection, target format, discovery) are fatal; read and
//! patch failures are returned per call and may be retried by the caller.

use thiserror::Error;

/// Errors returned by the scaling client
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load kubeconfig {path}")]
    Kubeconfig {
        path: String,
        #[source]
        source: kube::config::KubeconfigError,
    },

    #[error("failed to load in-cluster configuration")]
    InCluster(#[source] kube::config::InClusterError),

    #[error("failed to create Kubernetes client")]
    Connect(#[source] kube::Error),

    #[error("target format error: {0:?} (expected <kind>/<name>)")]
    TargetFormat(String),

    #[error("unsupported kind {0:?}: must be one of deployment, daemonset or replicaset")]
    UnsupportedKind(String),

    #[error("failed to discover apigroup for kind {kind:?}")]
    Discovery {
        kind: String,
        #[source]
        source: kube::Error,
    },

    #[error("kind {kind:?} ({plural}) is not served by the cluster")]
    KindNotServed { kind: String, plural: String },

    #[error("failed to list nodes")]
    ListNodes(#[source] kube::Error),

    #[error("invalid cpu quantity {quantity:?} on node {node:?}")]
    InvalidQuantity { node: String, quantity: String },

    #[error("unable to compute integer values of cores in the cluster (total {0} nanocores)")]
    NonIntegralCores(i128),

    #[error("cluster cpu capacity is too large to count")]
    CapacityOverflow,

    #[error("cluster core total {0} does not fit in a core count")]
    CoreTotalOutOfRange(i128),

    #[error("can't marshal patch to JSON")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown target kind {0:?}: must be one of deployment/*, daemonset/* or replicaset/* (not case sensitive)")]
    UnknownTargetKind(String),

    #[error("patch of {kind} {namespace}/{name} failed")]
    Patch {
        kind: String,
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },
}

impl Error {
    /// Whether the error was raised while building the client
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::Kubeconfig { .. }
                | Error::InCluster(_)
                | Error::Connect(_)
                | Error::TargetFormat(_)
                | Error::UnsupportedKind(_)
                | Error::Discovery { .. }
                | Error::KindNotServed { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
