//! Scalable target resolution
//!
//! Turns a `<kind>/<name>` string into a [`Target`] pinned to the
//! group/version the cluster currently serves for that kind.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::api::ControlPlane;
use super::discovery::discover_api;
use crate::error::{Error, Result};

/// Workload kinds whose pod template can be patched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    DaemonSet,
    ReplicaSet,
}

impl WorkloadKind {
    /// Canonical kind name
    pub fn kind(self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::DaemonSet => "DaemonSet",
            WorkloadKind::ReplicaSet => "ReplicaSet",
        }
    }

    /// Resource name the API server lists this kind under
    pub fn plural(self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "deployments",
            WorkloadKind::DaemonSet => "daemonsets",
            WorkloadKind::ReplicaSet => "replicasets",
        }
    }
}

/// Case-insensitive lookup by kind name
impl FromStr for WorkloadKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "deployment" => Ok(WorkloadKind::Deployment),
            "daemonset" => Ok(WorkloadKind::DaemonSet),
            "replicaset" => Ok(WorkloadKind::ReplicaSet),
            _ => Err(Error::UnsupportedKind(s.to_string())),
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// The workload whose container resources are managed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    kind: String,
    group_version: String,
    name: String,
    namespace: String,
}

impl Target {
    pub fn new(
        kind: impl Into<String>,
        group_version: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            group_version: group_version.into(),
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Kind as reported by the cluster, e.g. `Deployment`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Group/version, e.g. `apps/v1`
    pub fn group_version(&self) -> &str {
        &self.group_version
    }

    /// `apiVersion` field for documents addressed to this target
    pub fn api_version(&self) -> &str {
        &self.group_version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The workload variant addressed by this target
    pub fn workload_kind(&self) -> Result<WorkloadKind> {
        self.kind
            .parse::<WorkloadKind>()
            .map_err(|_| Error::UnknownTargetKind(self.kind.clone()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} {}/{}",
            self.group_version, self.kind, self.namespace, self.name
        )
    }
}

/// Split `<kind>/<name>` into its two halves
pub fn parse_target(target: &str) -> Result<(&str, &str)> {
    let mut splits = target.split('/');
    match (splits.next(), splits.next(), splits.next()) {
        (Some(kind), Some(name), None) => Ok((kind, name)),
        _ => Err(Error::TargetFormat(target.to_string())),
    }
}

/// Resolve a `<kind>/<name>` string against the cluster's catalog
pub async fn make_target<C>(api: &C, target: &str, namespace: &str) -> Result<Target>
where
    C: ControlPlane + ?Sized,
{
    let (kind, name) = parse_target(target)?;
    let (kind, group_version) = discover_api(api, kind).await?;

    debug!("discovered target {} = {}.{}", target, group_version, kind);

    Ok(Target::new(kind, group_version, name, namespace))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::fake::{catalog_entry, FakeControlPlane};

    #[test]
    fn test_workload_kind_from_str() {
        assert_eq!("deployment".parse::<WorkloadKind>().unwrap(), WorkloadKind::Deployment);
        assert_eq!("DaemonSet".parse::<WorkloadKind>().unwrap(), WorkloadKind::DaemonSet);
        assert_eq!("REPLICASET".parse::<WorkloadKind>().unwrap(), WorkloadKind::ReplicaSet);
        assert!(matches!(
            "statefulset".parse::<WorkloadKind>(),
            Err(Error::UnsupportedKind(ref k)) if k == "statefulset"
        ));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("deployment/web").unwrap(), ("deployment", "web"));
        assert_eq!(parse_target("deployment/").unwrap(), ("deployment", ""));

        for bad in ["deployment", "deployment/web/extra", "a/b/c/d", ""] {
            assert!(
                matches!(parse_target(bad), Err(Error::TargetFormat(ref s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_target_accessors() {
        let target = Target::new("Deployment", "apps/v1", "web", "ns1");
        assert_eq!(target.kind(), "Deployment");
        assert_eq!(target.group_version(), "apps/v1");
        assert_eq!(target.api_version(), "apps/v1");
        assert_eq!(target.name(), "web");
        assert_eq!(target.namespace(), "ns1");
        assert_eq!(target.workload_kind().unwrap(), WorkloadKind::Deployment);
        assert_eq!(target.to_string(), "apps/v1.Deployment ns1/web");
    }

    #[test]
    fn test_unknown_target_kind() {
        let target = Target::new("StatefulSet", "apps/v1", "db", "ns1");
        assert!(matches!(target.workload_kind(), Err(Error::UnknownTargetKind(k)) if k == "StatefulSet"));
    }

    #[tokio::test]
    async fn test_make_target() {
        let api = FakeControlPlane::default()
            .with_catalog(vec![catalog_entry("apps/v1", &[("daemonsets", "DaemonSet")])]);

        let target = make_target(&api, "DaemonSet/fluentd.v2", "kube-system").await.unwrap();

        assert_eq!(target, Target::new("DaemonSet", "apps/v1", "fluentd.v2", "kube-system"));
    }

    #[tokio::test]
    async fn test_make_target_bad_format_skips_discovery() {
        let api = FakeControlPlane::default();

        let err = make_target(&api, "deployment/a/b", "default").await.unwrap_err();

        assert!(matches!(err, Error::TargetFormat(_)));
        assert_eq!(api.catalog_queries(), 0);
    }
}
