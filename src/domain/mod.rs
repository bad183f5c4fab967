pub mod bounds;
pub mod certs;
pub mod cluster;
pub mod defaults;
pub mod error;
pub mod paths;
pub mod playground;
pub mod profile;
pub mod render;
pub mod tooling;

pub use certs::CertificateAuthorityConfig;
pub use cluster::{CLUSTER_SIZE_ERROR, ClusterConfig, InitialClusterState, NodeConfig};
pub use error::AppError;
pub use playground::{
    ClientAction, ClientRequest, ClientResponse, Connect, KeyValue, LogBook, LogLevel, LogLine,
    NodeStatus, PLAYGROUND_NODES, PlaygroundConfig, ServerStatus,
};
pub use profile::Profile;
pub use render::{FlagOptions, GuideOptions, TextBlock, UnitKind};
pub use tooling::{GoConfig, KubernetesConfig, OperatorConfig, RktConfig, SourceBuildConfig};
