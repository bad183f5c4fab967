//! Parameters for the auxiliary tools the guides install.

use serde::{Deserialize, Serialize};

use crate::domain::bounds::{BACKUP_VOLUME_MB, MAX_SNAPSHOTS, SNAPSHOT_INTERVAL_SECS};
use crate::domain::defaults;
use crate::domain::paths::normalize_dir;

/// Go toolchain used to build etcd from source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoConfig {
    pub version: String,
}

impl Default for GoConfig {
    fn default() -> Self {
        defaults::go()
    }
}

/// Git fork and branch to build etcd from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceBuildConfig {
    pub git_user: String,
    pub git_branch: String,
}

impl Default for SourceBuildConfig {
    fn default() -> Self {
        defaults::source_build()
    }
}

/// rkt container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RktConfig {
    /// Release tag including the leading `v`.
    pub version: String,
    pub exec_dir: String,
    /// Image prefix whose signing key is trusted.
    pub trust_prefix: String,
    /// Public key URL or path to trust for `trust_prefix`.
    pub trust_public_key: String,
    /// Custom etcd ACI; empty uses the official image.
    pub custom_aci: String,
}

impl Default for RktConfig {
    fn default() -> Self {
        defaults::rkt()
    }
}

impl RktConfig {
    pub fn exec_dir(&self) -> String {
        normalize_dir(Some(&self.exec_dir))
    }

    /// Version without its leading `v`, as used by stage1 image names.
    pub fn stripped_version(&self) -> &str {
        self.version.strip_prefix('v').unwrap_or(&self.version)
    }
}

/// Kubernetes release binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KubernetesConfig {
    pub version: String,
    pub goos: String,
    pub goarch: String,
    pub exec_dir: String,
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        defaults::kubernetes()
    }
}

impl KubernetesConfig {
    pub fn exec_dir(&self) -> String {
        normalize_dir(Some(&self.exec_dir))
    }
}

/// etcd-operator managed cluster with periodic backups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OperatorConfig {
    /// Cluster resource name.
    pub name: String,
    pub snapshot_interval_secs: u64,
    pub max_snapshots: u64,
    pub backup_volume_mb: u64,
    pub storage_type: String,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        defaults::operator()
    }
}

impl OperatorConfig {
    pub fn clamped_snapshot_interval(&self) -> u64 {
        SNAPSHOT_INTERVAL_SECS.clamp(self.snapshot_interval_secs)
    }

    pub fn clamped_max_snapshots(&self) -> u64 {
        MAX_SNAPSHOTS.clamp(self.max_snapshots)
    }

    pub fn clamped_backup_volume(&self) -> u64 {
        BACKUP_VOLUME_MB.clamp(self.backup_volume_mb)
    }
}
