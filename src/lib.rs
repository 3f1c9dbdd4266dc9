//! Kubernetes client for cluster-proportional vertical autoscaling
//!
//! Measures the schedulable capacity of a cluster (nodes and CPU cores)
//! and pushes per-container resource requirements into a Deployment,
//! DaemonSet or ReplicaSet chosen at runtime.
//!
//! ```no_run
//! use k8s_scale_client::config::ClientConfig;
//! use k8s_scale_client::k8s::K8sClient;
//!
//! # async fn run() -> Result<(), k8s_scale_client::Error> {
//! let config = ClientConfig::new("kube-system", "deployment/coredns");
//! let mut client = K8sClient::connect(&config).await?;
//! let size = client.get_cluster_size().await?;
//! println!("{} nodes, {} cores", size.nodes, size.cores);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod k8s;
pub mod output;
pub mod utils;

pub use error::{Error, Result};
