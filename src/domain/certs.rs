//! TLS certificate authority parameters.

use serde::{Deserialize, Serialize};

use crate::domain::bounds::{KEY_EXPIRY_HOURS, KEY_SIZE_BITS};
use crate::domain::defaults;
use crate::domain::paths::normalize_dir;

/// Hosts every generated certificate is valid for.
const LOOPBACK_HOSTS: [&str; 2] = ["127.0.0.1", "localhost"];

/// Template parameters for cfssl-based certificate generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertificateAuthorityConfig {
    /// cfssl release architecture suffix, e.g. `linux-amd64`.
    pub arch: String,
    /// cfssl release, e.g. `R1.2`.
    pub version: String,
    pub exec_dir: String,
    /// Directory certificates are generated into.
    pub certs_dir: String,
    pub root_ca_prefix: String,
    /// Signing configuration file name.
    pub gencert_file: String,

    pub organization: String,
    pub organization_unit: String,
    pub city: String,
    pub state: String,
    pub country: String,

    pub key_algorithm: String,
    pub key_size: u64,
    pub key_expiry_hours: u64,
    pub common_name: String,

    /// Additional certificate hosts, one per line.
    pub extra_hosts: String,
}

impl Default for CertificateAuthorityConfig {
    fn default() -> Self {
        defaults::certificate_authority()
    }
}

impl CertificateAuthorityConfig {
    pub fn exec_dir(&self) -> String {
        normalize_dir(Some(&self.exec_dir))
    }

    pub fn certs_dir(&self) -> String {
        normalize_dir(Some(&self.certs_dir))
    }

    pub fn clamped_key_size(&self) -> u64 {
        KEY_SIZE_BITS.clamp(self.key_size)
    }

    pub fn clamped_expiry_hours(&self) -> u64 {
        KEY_EXPIRY_HOURS.clamp(self.key_expiry_hours)
    }
}

/// Non-empty lines of a free-text host list.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().filter(|line| !line.is_empty()).map(str::to_string).collect()
}

/// Host list for a leaf certificate: loopback first, then `hosts` in order,
/// skipping empty entries and `localhost`.
pub fn certificate_hosts<'a>(hosts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut all: Vec<String> = LOOPBACK_HOSTS.iter().map(|h| h.to_string()).collect();
    all.extend(
        hosts.into_iter().filter(|host| !host.is_empty() && *host != "localhost").map(String::from),
    );
    all
}
