//! etcd-operator managed clusters on Kubernetes.

use minijinja::context;

use crate::domain::AppError;
use crate::domain::cluster::ClusterConfig;
use crate::domain::tooling::OperatorConfig;

use super::LINE_CONTINUATION;
use super::template::{self, OPERATOR_MANIFEST, heredoc};

/// Port of the operator-created `<name>-client` service.
const OPERATOR_CLIENT_PORT: u16 = 2379;

fn image_version(cluster: &ClusterConfig) -> &str {
    cluster.version.strip_prefix('v').unwrap_or(&cluster.version)
}

/// Cluster resource with periodic backups, plus the `kubectl` call creating it.
///
/// Snapshot interval, retention and volume size are clamped first.
pub fn manifest(cluster: &ClusterConfig, operator: &OperatorConfig) -> Result<String, AppError> {
    let body = template::render(
        OPERATOR_MANIFEST,
        context! {
            name => &operator.name,
            size => cluster.member_count(),
            version => image_version(cluster),
            snapshot_interval => operator.clamped_snapshot_interval(),
            max_snapshots => operator.clamped_max_snapshots(),
            storage_type => &operator.storage_type,
            volume_mb => operator.clamped_backup_volume(),
        },
    )?;
    let path = format!("/tmp/{}.yaml", operator.name);
    Ok(format!("{}kubectl create -f {}\n", heredoc(&path, &body), path))
}

/// One-off pod checking the health of the operator-managed cluster.
pub fn kubectl_endpoint_health(cluster: &ClusterConfig, operator: &OperatorConfig) -> String {
    let endpoint = format!("http://{}-client:{}", operator.name, OPERATOR_CLIENT_PORT);
    [
        format!("kubectl run {}-health", operator.name),
        "--rm".to_string(),
        "--stdin".to_string(),
        "--tty".to_string(),
        "--restart=Never".to_string(),
        format!("--image quay.io/coreos/etcd:{}", cluster.version),
        "--".to_string(),
        format!("/bin/sh -c \"ETCDCTL_API=3 etcdctl --endpoints {} endpoint health\"", endpoint),
    ]
    .join(LINE_CONTINUATION)
        + "\n"
}
