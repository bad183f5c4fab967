//! Status shapes reported by the playground backend.

use serde::{Deserialize, Serialize};

/// Number of members the playground backend runs.
pub const PLAYGROUND_NODES: usize = 5;

fn default_true() -> bool {
    true
}

/// Initial session state returned by `conn`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connect {
    #[serde(default)]
    pub web_port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub deleted: bool,
}

/// Status of one playground member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NodeStatus {
    pub name: String,
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub is_leader: bool,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub state_txt: String,
    #[serde(rename = "DBSize", default)]
    pub db_size: u64,
    #[serde(rename = "DBSizeTxt", default)]
    pub db_size_txt: String,
    #[serde(default)]
    pub hash: i64,
}

impl NodeStatus {
    /// Placeholder shown before the backend has reported anything.
    pub fn stopped(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            state_txt: format!("{} has not started...", name),
            name,
            id: "None".to_string(),
            endpoint: "None".to_string(),
            is_leader: false,
            state: "Stopped".to_string(),
            db_size: 0,
            db_size_txt: "0 B".to_string(),
            hash: 0,
        }
    }
}

/// Whole-cluster status returned by `server-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerStatus {
    /// Absent in older backends, which are always active.
    #[serde(default = "default_true")]
    pub playground_active: bool,
    #[serde(default)]
    pub server_uptime: String,
    #[serde(rename = "UserN", default)]
    pub user_n: u64,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub node_statuses: Vec<NodeStatus>,
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self {
            playground_active: false,
            server_uptime: "0s".to_string(),
            user_n: 0,
            users: Vec::new(),
            node_statuses: (1..=PLAYGROUND_NODES)
                .map(|i| NodeStatus::stopped(format!("node{}", i)))
                .collect(),
        }
    }
}

impl ServerStatus {
    pub fn leader(&self) -> Option<&NodeStatus> {
        self.node_statuses.iter().find(|node| node.is_leader)
    }

    /// Endpoints of members that report a real endpoint.
    pub fn endpoints(&self) -> Vec<String> {
        self.node_statuses
            .iter()
            .filter(|node| !node.endpoint.is_empty() && node.endpoint != "None")
            .map(|node| node.endpoint.clone())
            .collect()
    }

    /// Endpoint of the member named `target`, or `target` itself when no
    /// member has that name.
    pub fn endpoint_of(&self, target: &str) -> String {
        self.node_statuses
            .iter()
            .find(|node| node.name == target)
            .map(|node| node.endpoint.clone())
            .unwrap_or_else(|| target.to_string())
    }
}
