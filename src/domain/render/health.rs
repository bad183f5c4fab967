//! Endpoint health checks for a running cluster.

use crate::domain::cluster::{ClusterConfig, NodeConfig};
use crate::domain::paths::exec_path;

use super::LINE_CONTINUATION;
use super::flags::CONTAINER_CERTS_DIR;

/// `etcdctl endpoint health` against every member, authenticating as `node`
/// when the cluster is secure.
///
/// With `containerized` an equivalent `docker exec` invocation is appended.
pub fn endpoint_health(cluster: &ClusterConfig, node: &NodeConfig, containerized: bool) -> String {
    let endpoints = cluster.client_endpoints_text();

    let mut segments = vec![
        format!("ETCDCTL_API=3 {}", exec_path(&cluster.exec_dir, "etcdctl")),
        format!("--endpoints {}", endpoints),
    ];
    segments.extend(client_tls_flags(cluster, node, &node.certs_dir()));
    segments.push("endpoint health".to_string());
    let mut cmd = segments.join(LINE_CONTINUATION);

    if containerized {
        let mut inner = vec![
            "export ETCDCTL_API=3 &&".to_string(),
            "/usr/local/bin/etcdctl".to_string(),
            format!("--endpoints {}", endpoints),
        ];
        inner.extend(client_tls_flags(cluster, node, CONTAINER_CERTS_DIR));
        inner.push("endpoint health".to_string());

        cmd.push_str("\n\n\n# to use 'docker' command to check the status\n");
        cmd.push_str(
            &[
                "/usr/bin/docker".to_string(),
                "exec".to_string(),
                format!("etcd-{}", cluster.version),
                format!("/bin/sh -c \"{}\"", inner.join(" ")),
            ]
            .join(LINE_CONTINUATION),
        );
        cmd.push_str("\n\n");
    }

    cmd
}

fn client_tls_flags(cluster: &ClusterConfig, node: &NodeConfig, certs_dir: &str) -> Vec<String> {
    if !cluster.secure {
        return Vec::new();
    }
    vec![
        format!("--cacert {}/{}", certs_dir, cluster.root_ca_file()),
        format!("--cert {}/{}", certs_dir, node.cert_file()),
        format!("--key {}/{}", certs_dir, node.key_file()),
    ]
}
