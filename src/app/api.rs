//! API Facade for the application.
//!
//! High-level functions shared by the CLI and library callers: load a
//! profile, render one target from it, or open a playground session.

use std::path::Path;

use crate::adapters::{FileProfileStore, HttpPlaygroundBackend};
use crate::app::playground::PlaygroundSession;
use crate::domain::render::{
    FlagOptions, GuideOptions, UnitKind, cluster_guide, health, install, operator,
    render_command, render_flags, tls, units,
};
use crate::domain::{NodeConfig, Profile};
use crate::ports::ProfileStore;

pub use crate::domain::AppError;

/// Where `install` fetches etcd from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallSource {
    #[default]
    Linux,
    Osx,
    Source,
}

/// One renderable piece of output.
///
/// `node: None` selects the first member of the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    Install(InstallSource),
    Go,
    Kubernetes,
    RktInstall,
    RktTrust,
    CfsslInstall,
    RootCa,
    RootCaFiles,
    Cert { node: Option<String> },
    CertsCopy { node: Option<String> },
    /// Every member's files when `node` is `None`.
    CertFiles { node: Option<String> },
    DataDir { node: Option<String> },
    Flags { node: Option<String>, options: FlagOptions },
    Command { node: Option<String>, options: FlagOptions },
    InitialCluster,
    Endpoints { with_scheme: bool },
    Health { node: Option<String>, containerized: bool },
    Unit { node: Option<String>, kind: UnitKind },
    Systemctl { node: Option<String>, kind: UnitKind },
    /// The operator manifest, or its health-check pod with `health`.
    Operator { health: bool },
    Guide { kind: UnitKind, options: GuideOptions },
}

/// Load the profile at `path`, or the defaults when `path` is `None`.
pub fn load_profile(path: Option<&Path>) -> Result<Profile, AppError> {
    FileProfileStore::new(path.map(Path::to_path_buf)).load()
}

/// Default profile as TOML.
pub fn default_profile_toml() -> Result<String, AppError> {
    Profile::default().to_toml()
}

fn member<'a>(profile: &'a Profile, name: Option<&str>) -> Result<&'a NodeConfig, AppError> {
    profile.cluster.node_or_first(name)
}

/// Render `target` from `profile`.
///
/// Output is deterministic: the same profile and target always produce the
/// same text.
pub fn render(profile: &Profile, target: &RenderTarget) -> Result<String, AppError> {
    let cluster = &profile.cluster;
    let certs = &profile.certs;
    tracing::debug!(?target, "rendering");

    let text = match target {
        RenderTarget::Install(InstallSource::Linux) => install::etcd_linux(cluster),
        RenderTarget::Install(InstallSource::Osx) => install::etcd_osx(cluster),
        RenderTarget::Install(InstallSource::Source) => {
            install::etcd_from_source(cluster, &profile.source)
        }
        RenderTarget::Go => install::go_toolchain(&profile.go),
        RenderTarget::Kubernetes => install::kubernetes_binaries(&profile.kubernetes),
        RenderTarget::RktInstall => install::rkt(&profile.rkt),
        RenderTarget::RktTrust => install::rkt_trust(&profile.rkt),
        RenderTarget::CfsslInstall => install::cfssl(certs),
        RenderTarget::RootCa => tls::root_ca(certs)?,
        RenderTarget::RootCaFiles => tls::root_ca_files(certs),
        RenderTarget::Cert { node } => {
            let node = member(profile, node.as_deref())?;
            tls::leaf_certificate(certs, &node.name, &node.name, &node.address, &certs.extra_hosts)?
        }
        RenderTarget::CertsCopy { node } => {
            tls::certs_copy(certs, &member(profile, node.as_deref())?.certs_dir())
        }
        RenderTarget::CertFiles { node: None } => tls::cluster_cert_files(cluster),
        RenderTarget::CertFiles { node: Some(name) } => {
            let node = cluster.node(name)?;
            tls::cert_files(&node.certs_dir(), &node.name)
        }
        RenderTarget::DataDir { node } => units::data_dir_prepare(member(profile, node.as_deref())?),
        RenderTarget::Flags { node, options } => {
            render_flags(cluster, member(profile, node.as_deref())?, *options)
        }
        RenderTarget::Command { node, options } => {
            render_command(cluster, member(profile, node.as_deref())?, *options)
        }
        RenderTarget::InitialCluster => cluster.initial_cluster_text(),
        RenderTarget::Endpoints { with_scheme: true } => cluster.client_endpoints_with_scheme_text(),
        RenderTarget::Endpoints { with_scheme: false } => cluster.client_endpoints_text(),
        RenderTarget::Health { node, containerized } => {
            health::endpoint_health(cluster, member(profile, node.as_deref())?, *containerized)
        }
        RenderTarget::Unit { node, kind } => {
            units::render_unit(*kind, cluster, &profile.rkt, member(profile, node.as_deref())?)?
        }
        RenderTarget::Systemctl { node, kind } => {
            units::systemctl(&kind.service_name(member(profile, node.as_deref())?))
        }
        RenderTarget::Operator { health: false } => operator::manifest(cluster, &profile.operator)?,
        RenderTarget::Operator { health: true } => {
            operator::kubectl_endpoint_health(cluster, &profile.operator)
        }
        RenderTarget::Guide { kind, options } => cluster_guide(profile, *kind, *options)?
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(text)
}

/// Open an HTTP playground session against the profile's backend.
pub fn playground_session(
    profile: &Profile,
) -> Result<PlaygroundSession<HttpPlaygroundBackend>, AppError> {
    let backend = HttpPlaygroundBackend::new(&profile.playground)?;
    tracing::info!(endpoint = %profile.playground.endpoint, "playground backend");
    Ok(PlaygroundSession::new(backend))
}
