//! Aggregate configuration a single invocation renders from.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::certs::CertificateAuthorityConfig;
use crate::domain::cluster::ClusterConfig;
use crate::domain::playground::PlaygroundConfig;
use crate::domain::tooling::{
    GoConfig, KubernetesConfig, OperatorConfig, RktConfig, SourceBuildConfig,
};

/// Everything the renderers need, loaded from a profile file or defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub cluster: ClusterConfig,
    pub certs: CertificateAuthorityConfig,
    pub go: GoConfig,
    pub source: SourceBuildConfig,
    pub rkt: RktConfig,
    pub kubernetes: KubernetesConfig,
    pub operator: OperatorConfig,
    pub playground: PlaygroundConfig,
}

impl Profile {
    pub fn parse_toml(content: &str) -> Result<Self, AppError> {
        let profile: Profile = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn parse_yaml(content: &str) -> Result<Self, AppError> {
        let profile: Profile = serde_yaml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn to_toml(&self) -> Result<String, AppError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.cluster.validate()?;
        self.playground.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cluster::InitialClusterState;

    #[test]
    fn empty_document_uses_defaults() {
        let profile = Profile::parse_toml("").unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.cluster.nodes.len(), 7);
        assert_eq!(profile.cluster.cluster_size, 3);
    }

    #[test]
    fn parses_partial_toml() {
        let toml = r#"
[cluster]
secure = false
cluster_size = 1
auto_compaction_retention = 2

[[cluster.nodes]]
name = "infra0"
address = "10.240.0.10"
client_port = 2379
peer_port = 2380
initial_cluster_state = "existing"

[certs]
key_size = 4096
"#;
        let profile = Profile::parse_toml(toml).unwrap();
        assert!(!profile.cluster.secure);
        assert_eq!(profile.cluster.nodes.len(), 1);
        let node = &profile.cluster.nodes[0];
        assert_eq!(node.initial_cluster_state, InitialClusterState::Existing);
        assert_eq!(node.initial_cluster_token, "tkn");
        assert_eq!(node.data_dir(), "");
        assert_eq!(profile.certs.key_size, 4096);
        assert_eq!(profile.certs.organization, "etcd");
    }

    #[test]
    fn parses_yaml() {
        let yaml = r#"
cluster:
  cluster_size: 1
  nodes:
    - name: solo
      address: 127.0.0.1
      client_port: 2379
      peer_port: 2380
operator:
  max_snapshots: 3
"#;
        let profile = Profile::parse_yaml(yaml).unwrap();
        assert_eq!(profile.cluster.node_names(), vec!["solo"]);
        assert_eq!(profile.operator.max_snapshots, 3);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Profile::parse_toml("[cluster]\nsize = 3\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParse(_)));
    }

    #[test]
    fn default_profile_round_trips_through_toml() {
        let rendered = Profile::default().to_toml().unwrap();
        assert_eq!(Profile::parse_toml(&rendered).unwrap(), Profile::default());
    }
}
