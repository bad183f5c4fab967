//! Per-member etcd flag assembly.

use crate::domain::cluster::{ClusterConfig, NodeConfig};
use crate::domain::paths::exec_path;

use super::LINE_CONTINUATION;

/// Data directory as seen from inside the etcd container.
pub const CONTAINER_DATA_DIR: &str = "/etcd-data";
/// Certificate directory as seen from inside the etcd container.
pub const CONTAINER_CERTS_DIR: &str = "/etcd-ssl-certs-dir";

/// Rendering switches shared by every flag-based renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagOptions {
    /// Leave out `--data-dir`.
    pub skip_data_dir: bool,
    /// Join flags with a space instead of a line continuation.
    pub one_line: bool,
    /// Use the data and certificate paths mounted into the etcd container.
    pub containerized: bool,
}

impl FlagOptions {
    pub fn multi_line() -> Self {
        Self::default()
    }

    pub fn one_line() -> Self {
        Self { one_line: true, ..Self::default() }
    }

    pub fn with_skip_data_dir(mut self) -> Self {
        self.skip_data_dir = true;
        self
    }

    pub fn with_containerized(mut self) -> Self {
        self.containerized = true;
        self
    }

    fn separator(&self) -> &'static str {
        if self.one_line { " " } else { LINE_CONTINUATION }
    }
}

/// Ordered etcd flags for `node`.
///
/// The initial-cluster value is always computed from `cluster`, so the
/// cached `node.initial_cluster` is never trusted.
pub fn flag_list(cluster: &ClusterConfig, node: &NodeConfig, options: FlagOptions) -> Vec<String> {
    let (data_dir, certs_dir) = if options.containerized {
        (CONTAINER_DATA_DIR.to_string(), CONTAINER_CERTS_DIR.to_string())
    } else {
        (node.data_dir(), node.certs_dir())
    };

    let mut flags = vec![format!("--name {}", node.name)];
    if !options.skip_data_dir {
        flags.push(format!("--data-dir {}", data_dir));
    }

    let client_url = node.client_url(cluster.secure);
    let peer_url = node.peer_url(cluster.secure);
    flags.push(format!("--listen-client-urls {}", client_url));
    flags.push(format!("--advertise-client-urls {}", client_url));
    flags.push(format!("--listen-peer-urls {}", peer_url));
    flags.push(format!("--initial-advertise-peer-urls {}", peer_url));
    flags.push(format!("--initial-cluster {}", cluster.initial_cluster_text()));
    flags.push(format!("--initial-cluster-token {}", node.initial_cluster_token));
    flags.push(format!("--initial-cluster-state {}", node.initial_cluster_state));

    if cluster.secure {
        let root_ca = format!("{}/{}", certs_dir, cluster.root_ca_file());
        let cert = format!("{}/{}", certs_dir, node.cert_file());
        let key = format!("{}/{}", certs_dir, node.key_file());

        flags.push(format!("--trusted-ca-file {}", root_ca));
        flags.push(format!("--cert-file {}", cert));
        flags.push(format!("--key-file {}", key));
        flags.push(format!("--peer-trusted-ca-file {}", root_ca));
        flags.push(format!("--peer-cert-file {}", cert));
        flags.push(format!("--peer-key-file {}", key));
        flags.push("--client-cert-auth".to_string());
        flags.push("--peer-client-cert-auth".to_string());
    }

    if cluster.enable_profile {
        flags.push("--enable-pprof".to_string());
    }
    if cluster.debug {
        flags.push("--debug".to_string());
    }
    if cluster.auto_compaction_retention > 0 {
        flags.push(format!("--auto-compaction-retention {}", cluster.auto_compaction_retention));
    }

    flags
}

/// Flags for `node` joined in the requested mode.
pub fn render_flags(cluster: &ClusterConfig, node: &NodeConfig, options: FlagOptions) -> String {
    flag_list(cluster, node, options).join(options.separator())
}

/// Full etcd invocation: the binary under the cluster's exec dir followed by
/// [`render_flags`].
pub fn render_command(cluster: &ClusterConfig, node: &NodeConfig, options: FlagOptions) -> String {
    format!("{} {}", exec_path(&cluster.exec_dir, "etcd"), render_flags(cluster, node, options))
}
