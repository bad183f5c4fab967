//! cfssl-based TLS material: root CA, signing config and leaf certificates.

use minijinja::context;

use crate::domain::AppError;
use crate::domain::certs::{CertificateAuthorityConfig, certificate_hosts, split_lines};
use crate::domain::cluster::{ClusterConfig, NodeConfig};
use crate::domain::paths::normalize_dir;

use super::template::{self, GENCERT_CONFIG, LEAF_CSR, ROOT_CA_CSR, heredoc};
use super::LINE_CONTINUATION;

/// Create the root CA, verify it and write the signing configuration.
pub fn root_ca(certs: &CertificateAuthorityConfig) -> Result<String, AppError> {
    let dir = certs.certs_dir();
    let prefix = &certs.root_ca_prefix;
    let csr_path = format!("{}/{}-csr.json", dir, prefix);

    let csr = template::render(
        ROOT_CA_CSR,
        context! {
            algo => &certs.key_algorithm,
            size => certs.clamped_key_size(),
            organization => &certs.organization,
            organization_unit => &certs.organization_unit,
            city => &certs.city,
            state => &certs.state,
            country => &certs.country,
            common_name => &certs.common_name,
        },
    )?;
    let signing = template::render(
        GENCERT_CONFIG,
        context! { expiry_hours => certs.clamped_expiry_hours() },
    )?;

    let mut txt = format!("mkdir -p {}\n\n", dir);
    txt.push_str(&heredoc(&csr_path, &csr));
    txt.push_str(&format!(
        "cfssl gencert --initca=true {} | cfssljson --bare {}/{}\n\n",
        csr_path, dir, prefix
    ));
    txt.push_str(&format!("# verify\nopenssl x509 -in {}/{}.pem -text -noout\n\n\n", dir, prefix));
    txt.push_str("# cert-generation configuration\n");
    txt.push_str(&heredoc(&format!("{}/{}", dir, certs.gencert_file), &signing));
    txt.push('\n');
    Ok(txt)
}

/// Files produced by [`root_ca`].
pub fn root_ca_files(certs: &CertificateAuthorityConfig) -> String {
    let dir = certs.certs_dir();
    let prefix = &certs.root_ca_prefix;
    format!(
        "# CSR configuration
{dir}/{prefix}-csr.json

# CSR
{dir}/{prefix}.csr

# self-signed root CA public key
{dir}/{prefix}.pem

# self-signed root CA private key
{dir}/{prefix}-key.pem

# cert-generation configuration for other TLS assets
{dir}/{gencert}
",
        dir = dir,
        prefix = prefix,
        gencert = certs.gencert_file
    )
}

/// Generate a certificate named `name` signed by the root CA.
///
/// `host` and every non-empty line of `extra_hosts` are added after the
/// loopback hosts, verbatim.
pub fn leaf_certificate(
    certs: &CertificateAuthorityConfig,
    name: &str,
    common_name: &str,
    host: &str,
    extra_hosts: &str,
) -> Result<String, AppError> {
    let dir = certs.certs_dir();
    let csr_path = format!("{}/{}-ca-csr.json", dir, name);

    let extra = split_lines(extra_hosts);
    let hosts = certificate_hosts(std::iter::once(host).chain(extra.iter().map(String::as_str)));
    let hosts_text =
        hosts.iter().map(|h| format!("    \"{}\"", h)).collect::<Vec<_>>().join(",\n");

    let csr = template::render(
        LEAF_CSR,
        context! {
            algo => &certs.key_algorithm,
            size => certs.clamped_key_size(),
            organization => &certs.organization,
            organization_unit => &certs.organization_unit,
            city => &certs.city,
            state => &certs.state,
            country => &certs.country,
            common_name => common_name,
            hosts => hosts_text,
        },
    )?;

    let gencert = [
        "cfssl gencert".to_string(),
        format!("--ca {}/{}.pem", dir, certs.root_ca_prefix),
        format!("--ca-key {}/{}-key.pem", dir, certs.root_ca_prefix),
        format!("--config {}/{}", dir, certs.gencert_file),
        format!("{} | cfssljson --bare {}/{}", csr_path, dir, name),
    ]
    .join(LINE_CONTINUATION);

    let mut txt = format!("mkdir -p {}\n\n", dir);
    txt.push_str(&heredoc(&csr_path, &csr));
    txt.push_str(&gencert);
    txt.push_str("\n\n");
    Ok(txt)
}

/// Copy generated certificates into `dst` on the target machine.
pub fn certs_copy(certs: &CertificateAuthorityConfig, dst: &str) -> String {
    let dst = normalize_dir(Some(dst));
    format!(
        "# after transferring certs to remote machines\nmkdir -p {}\ncp {}/* {}\n",
        dst,
        certs.certs_dir(),
        dst
    )
}

/// Files [`leaf_certificate`] produces for `name`, as found under `dst`.
pub fn cert_files(dst: &str, name: &str) -> String {
    let dst = normalize_dir(Some(dst));
    [
        format!("{}/{}-ca-csr.json", dst, name),
        format!("{}/{}.csr", dst, name),
        format!("{}/{}-key.pem", dst, name),
        format!("{}/{}.pem", dst, name),
    ]
    .join("\n")
}

/// [`cert_files`] for every member, in each member's certificate directory.
pub fn cluster_cert_files(cluster: &ClusterConfig) -> String {
    cluster
        .members()
        .iter()
        .map(|node: &NodeConfig| cert_files(&node.certs_dir(), &node.name))
        .collect::<Vec<_>>()
        .join("\n")
}
