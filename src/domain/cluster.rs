//! Cluster and member configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::bounds::CLUSTER_SIZE;
use crate::domain::paths::normalize_dir;
use crate::domain::{AppError, defaults};

/// Rendered in place of the initial-cluster string when more than seven
/// members are declared.
pub const CLUSTER_SIZE_ERROR: &str = "(error: cluster size over 7 is not supported)";

/// URL scheme for client and peer traffic.
pub fn scheme(secure: bool) -> &'static str {
    if secure { "https" } else { "http" }
}

/// Bootstrap state passed to `--initial-cluster-state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialClusterState {
    #[default]
    New,
    Existing,
}

impl InitialClusterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitialClusterState::New => "new",
            InitialClusterState::Existing => "existing",
        }
    }
}

impl fmt::Display for InitialClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cluster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Member name, unique within the cluster.
    pub name: String,
    /// Data directory on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Directory holding this member's TLS assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certs_dir: Option<String>,
    /// Host name or IP the member listens on.
    pub address: String,
    pub client_port: u16,
    pub peer_port: u16,
    #[serde(default = "defaults::initial_cluster_token")]
    pub initial_cluster_token: String,
    #[serde(default)]
    pub initial_cluster_state: InitialClusterState,
    /// Last computed initial-cluster string, see [`ClusterConfig::with_initial_cluster`].
    #[serde(skip)]
    pub initial_cluster: String,
}

impl NodeConfig {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        client_port: u16,
        peer_port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            data_dir: None,
            certs_dir: None,
            address: address.into(),
            client_port,
            peer_port,
            initial_cluster_token: defaults::initial_cluster_token(),
            initial_cluster_state: InitialClusterState::New,
            initial_cluster: String::new(),
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_certs_dir(mut self, dir: impl Into<String>) -> Self {
        self.certs_dir = Some(dir.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.initial_cluster_token = token.into();
        self
    }

    pub fn with_state(mut self, state: InitialClusterState) -> Self {
        self.initial_cluster_state = state;
        self
    }

    pub fn data_dir(&self) -> String {
        normalize_dir(self.data_dir.as_deref())
    }

    pub fn certs_dir(&self) -> String {
        normalize_dir(self.certs_dir.as_deref())
    }

    pub fn client_url(&self, secure: bool) -> String {
        format!("{}://{}:{}", scheme(secure), self.address, self.client_port)
    }

    pub fn peer_url(&self, secure: bool) -> String {
        format!("{}://{}:{}", scheme(secure), self.address, self.peer_port)
    }

    /// `address:client_port` without a scheme.
    pub fn client_endpoint(&self) -> String {
        format!("{}:{}", self.address, self.client_port)
    }

    pub fn cert_file(&self) -> String {
        format!("{}.pem", self.name)
    }

    pub fn key_file(&self) -> String {
        format!("{}-key.pem", self.name)
    }
}

/// Cluster-wide configuration and its ordered members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    /// etcd release tag, e.g. `v3.1.0`.
    pub version: String,
    /// Directory the etcd binaries are installed into.
    pub exec_dir: String,
    /// Serve client and peer traffic over TLS.
    pub secure: bool,
    pub enable_profile: bool,
    pub debug: bool,
    /// Auto compaction retention in hours; 0 disables it.
    pub auto_compaction_retention: u32,
    /// Declared member count.
    pub cluster_size: u32,
    /// File prefix of the root CA (`<prefix>.pem`).
    pub root_ca_prefix: String,
    pub nodes: Vec<NodeConfig>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        defaults::cluster()
    }
}

impl ClusterConfig {
    pub fn exec_dir(&self) -> String {
        normalize_dir(Some(&self.exec_dir))
    }

    pub fn root_ca_file(&self) -> String {
        format!("{}.pem", self.root_ca_prefix)
    }

    /// True when the declared size is above the supported maximum.
    pub fn exceeds_supported_size(&self) -> bool {
        u64::from(self.cluster_size) > CLUSTER_SIZE.max
    }

    /// Number of members that take part in rendering.
    pub fn member_count(&self) -> usize {
        let declared = CLUSTER_SIZE.clamp(u64::from(self.cluster_size));
        usize::try_from(declared).unwrap_or(usize::MAX).min(self.nodes.len())
    }

    /// The first [`member_count`](Self::member_count) nodes, in order.
    pub fn members(&self) -> &[NodeConfig] {
        &self.nodes[..self.member_count()]
    }

    /// Comma-separated `name=peerURL` list for `--initial-cluster`.
    pub fn initial_cluster_text(&self) -> String {
        if self.exceeds_supported_size() {
            return CLUSTER_SIZE_ERROR.to_string();
        }
        self.members()
            .iter()
            .map(|node| format!("{}={}", node.name, node.peer_url(self.secure)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Compute the initial-cluster string together with a copy of every node
    /// carrying it in `initial_cluster`.
    ///
    /// When the declared size is unsupported the sentinel is returned and the
    /// nodes come back unchanged.
    pub fn with_initial_cluster(&self) -> (String, Vec<NodeConfig>) {
        let text = self.initial_cluster_text();
        if self.exceeds_supported_size() {
            return (text, self.nodes.clone());
        }
        let nodes = self
            .nodes
            .iter()
            .cloned()
            .map(|mut node| {
                node.initial_cluster = text.clone();
                node
            })
            .collect();
        (text, nodes)
    }

    pub fn node(&self, name: &str) -> Result<&NodeConfig, AppError> {
        self.nodes.iter().find(|node| node.name == name).ok_or_else(|| AppError::NodeNotFound {
            name: name.to_string(),
            available: self.node_names().join(", "),
        })
    }

    /// Named node, or the first member when no name is given.
    pub fn node_or_first(&self, name: Option<&str>) -> Result<&NodeConfig, AppError> {
        match name {
            Some(name) => self.node(name),
            None => self
                .nodes
                .first()
                .ok_or_else(|| AppError::invalid_profile("cluster has no nodes")),
        }
    }

    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.name.as_str()).collect()
    }

    /// Comma-separated `address:port` list of the members' client endpoints.
    pub fn client_endpoints_text(&self) -> String {
        self.members().iter().map(NodeConfig::client_endpoint).collect::<Vec<_>>().join(",")
    }

    /// Members' client URLs including the scheme.
    pub fn client_endpoints_with_scheme(&self) -> Vec<String> {
        self.members().iter().map(|node| node.client_url(self.secure)).collect()
    }

    pub fn client_endpoints_with_scheme_text(&self) -> String {
        self.client_endpoints_with_scheme().join(",")
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut seen = std::collections::BTreeSet::new();
        for node in &self.nodes {
            if node.name.trim().is_empty() {
                return Err(AppError::invalid_profile("node name must not be empty"));
            }
            if !seen.insert(node.name.as_str()) {
                return Err(AppError::invalid_profile(format!(
                    "duplicate node name '{}'",
                    node.name
                )));
            }
        }

        // An oversize cluster renders the sentinel instead of a member list.
        if self.exceeds_supported_size() {
            return Ok(());
        }
        let required = CLUSTER_SIZE.clamp(u64::from(self.cluster_size));
        if (self.nodes.len() as u64) < required {
            return Err(AppError::invalid_profile(format!(
                "cluster_size {} needs at least {} node(s), found {}",
                self.cluster_size,
                required,
                self.nodes.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_cluster(size: u32, secure: bool) -> ClusterConfig {
        ClusterConfig {
            secure,
            cluster_size: size,
            nodes: vec![
                NodeConfig::new("a", "10.0.0.1", 2379, 2380),
                NodeConfig::new("b", "10.0.0.2", 2379, 2380),
                NodeConfig::new("c", "10.0.0.3", 2379, 2380),
            ],
            ..ClusterConfig::default()
        }
    }

    #[test]
    fn urls_follow_security_flag() {
        let node = NodeConfig::new("s1", "localhost", 2379, 2380);
        assert_eq!(node.client_url(false), "http://localhost:2379");
        assert_eq!(node.peer_url(true), "https://localhost:2380");
    }

    #[test]
    fn initial_cluster_lists_declared_members_in_order() {
        let cluster = abc_cluster(3, false);
        let expected = "a=http://10.0.0.1:2380,b=http://10.0.0.2:2380,c=http://10.0.0.3:2380";
        assert_eq!(cluster.initial_cluster_text(), expected);

        let (text, nodes) = cluster.with_initial_cluster();
        assert_eq!(text, expected);
        assert!(nodes.iter().all(|node| node.initial_cluster == expected));
        assert!(cluster.nodes.iter().all(|node| node.initial_cluster.is_empty()));
    }

    #[test]
    fn initial_cluster_truncates_to_declared_size() {
        let cluster = abc_cluster(2, true);
        assert_eq!(
            cluster.initial_cluster_text(),
            "a=https://10.0.0.1:2380,b=https://10.0.0.2:2380"
        );
    }

    #[test]
    fn oversized_cluster_renders_sentinel_without_touching_nodes() {
        let cluster = abc_cluster(8, false);
        assert_eq!(cluster.initial_cluster_text(), CLUSTER_SIZE_ERROR);

        let (text, nodes) = cluster.with_initial_cluster();
        assert_eq!(text, CLUSTER_SIZE_ERROR);
        assert_eq!(nodes, cluster.nodes);
    }

    #[test]
    fn zero_size_counts_as_one_member() {
        let cluster = abc_cluster(0, false);
        assert_eq!(cluster.member_count(), 1);
        assert_eq!(cluster.client_endpoints_text(), "10.0.0.1:2379");
    }

    #[test]
    fn endpoints_cover_members_only() {
        let cluster = abc_cluster(2, true);
        assert_eq!(cluster.client_endpoints_text(), "10.0.0.1:2379,10.0.0.2:2379");
        assert_eq!(
            cluster.client_endpoints_with_scheme_text(),
            "https://10.0.0.1:2379,https://10.0.0.2:2379"
        );
    }

    #[test]
    fn validate_rejects_duplicates_and_short_node_lists() {
        let mut cluster = abc_cluster(3, false);
        cluster.nodes[2].name = "a".into();
        assert!(matches!(cluster.validate(), Err(AppError::InvalidProfile(_))));

        let mut cluster = abc_cluster(5, false);
        assert!(cluster.validate().is_err());
        cluster.cluster_size = 3;
        assert!(cluster.validate().is_ok());
    }

    #[test]
    fn oversize_cluster_with_few_nodes_still_validates() {
        let cluster = abc_cluster(8, true);
        assert!(cluster.validate().is_ok());
        assert_eq!(cluster.initial_cluster_text(), CLUSTER_SIZE_ERROR);
        assert_eq!(cluster.client_endpoints_text(), "10.0.0.1:2379,10.0.0.2:2379,10.0.0.3:2379");
    }

    #[test]
    fn unknown_node_reports_available_names() {
        let cluster = abc_cluster(3, false);
        let err = cluster.node("z").unwrap_err();
        assert_eq!(err.to_string(), "Node 'z' not found. Available: a, b, c");
    }
}
