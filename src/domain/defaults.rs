//! Sample configuration used when no profile is supplied.
//!
//! Every value here is plain data; callers (and tests) build their own
//! configurations instead of relying on these.

use url::Url;

use crate::domain::certs::CertificateAuthorityConfig;
use crate::domain::cluster::{ClusterConfig, InitialClusterState, NodeConfig};
use crate::domain::playground::PlaygroundConfig;
use crate::domain::tooling::{
    GoConfig, KubernetesConfig, OperatorConfig, RktConfig, SourceBuildConfig,
};

pub const ETCD_VERSION: &str = "v3.1.0";
pub const FLAG_HELP_URL: &str = "https://github.com/coreos/etcd/blob/master/etcdmain/help.go";

const ROOT_CA_PREFIX: &str = "etcd-root-ca";
const NODE_CERTS_DIR: &str = "${HOME}/certs";

/// `(name, client_port, peer_port)` of the pre-filled local members.
const SAMPLE_MEMBERS: [(&str, u16, u16); 7] = [
    ("s1", 2379, 2380),
    ("s2", 22379, 22380),
    ("s3", 32379, 32380),
    ("s4", 4379, 4380),
    ("s5", 5379, 5380),
    ("s6", 6379, 6380),
    ("s7", 7379, 7380),
];

pub fn initial_cluster_token() -> String {
    "tkn".to_string()
}

pub fn cluster() -> ClusterConfig {
    let nodes = SAMPLE_MEMBERS
        .iter()
        .map(|(name, client_port, peer_port)| {
            NodeConfig::new(*name, "localhost", *client_port, *peer_port)
                .with_data_dir(format!("/tmp/etcd/{}", name))
                .with_certs_dir(NODE_CERTS_DIR)
                .with_token(initial_cluster_token())
                .with_state(InitialClusterState::New)
        })
        .collect();

    ClusterConfig {
        version: ETCD_VERSION.to_string(),
        exec_dir: "/tmp/test-etcd".to_string(),
        secure: true,
        enable_profile: false,
        debug: false,
        auto_compaction_retention: 0,
        cluster_size: 3,
        root_ca_prefix: ROOT_CA_PREFIX.to_string(),
        nodes,
    }
}

pub fn certificate_authority() -> CertificateAuthorityConfig {
    CertificateAuthorityConfig {
        arch: "linux-amd64".to_string(),
        version: "R1.2".to_string(),
        exec_dir: "/usr/local/bin".to_string(),
        certs_dir: "/tmp/certs".to_string(),
        root_ca_prefix: ROOT_CA_PREFIX.to_string(),
        gencert_file: "etcd-gencert.json".to_string(),
        organization: "etcd".to_string(),
        organization_unit: "etcd Security".to_string(),
        city: "San Francisco".to_string(),
        state: "California".to_string(),
        country: "USA".to_string(),
        key_algorithm: "rsa".to_string(),
        key_size: 2048,
        key_expiry_hours: 87600,
        common_name: ROOT_CA_PREFIX.to_string(),
        extra_hosts: String::new(),
    }
}

pub fn go() -> GoConfig {
    GoConfig { version: "1.10".to_string() }
}

pub fn source_build() -> SourceBuildConfig {
    SourceBuildConfig { git_user: "coreos".to_string(), git_branch: "master".to_string() }
}

pub fn rkt() -> RktConfig {
    RktConfig {
        version: "v1.18.0".to_string(),
        exec_dir: "/".to_string(),
        trust_prefix: "coreos.com/etcd".to_string(),
        trust_public_key: "https://coreos.com/dist/pubkeys/app-signing-pubkey.gpg".to_string(),
        custom_aci: String::new(),
    }
}

pub fn kubernetes() -> KubernetesConfig {
    KubernetesConfig {
        version: "v1.5.1".to_string(),
        goos: "linux".to_string(),
        goarch: "amd64".to_string(),
        exec_dir: "/usr/local/bin".to_string(),
    }
}

pub fn operator() -> OperatorConfig {
    OperatorConfig {
        name: "example-etcd-cluster".to_string(),
        snapshot_interval_secs: 1800,
        max_snapshots: 5,
        backup_volume_mb: 512,
        storage_type: "PersistentVolume".to_string(),
    }
}

pub fn playground_endpoint() -> Url {
    Url::parse("http://localhost:2200/").expect("Default playground URL must be valid")
}

pub fn playground_timeout_secs() -> u64 {
    10
}

pub fn playground() -> PlaygroundConfig {
    PlaygroundConfig { endpoint: playground_endpoint(), timeout_secs: playground_timeout_secs() }
}
