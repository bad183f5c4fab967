//! Step-by-step deployment guide for a whole cluster.

use crate::domain::AppError;
use crate::domain::profile::Profile;

use super::units::{UnitKind, data_dir_prepare, render_unit, systemctl};
use super::{TextBlock, health, install, operator, tls};

/// Optional sections of [`cluster_guide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuideOptions {
    /// Append the etcd-operator manifest and its health check.
    pub include_operator_manifest: bool,
}

/// Every block needed to bring up the profile's cluster with `kind` units.
///
/// Per-member blocks are rendered from the nodes returned by
/// [`ClusterConfig::with_initial_cluster`](crate::domain::ClusterConfig::with_initial_cluster).
pub fn cluster_guide(
    profile: &Profile,
    kind: UnitKind,
    options: GuideOptions,
) -> Result<Vec<TextBlock>, AppError> {
    let cluster = &profile.cluster;
    let certs = &profile.certs;
    let (_, nodes) = cluster.with_initial_cluster();
    let members = &nodes[..cluster.member_count()];

    let mut blocks = vec![TextBlock::new("Install etcd", install::etcd_linux(cluster))];
    if kind == UnitKind::Rkt {
        blocks.push(TextBlock::new("Install rkt", install::rkt(&profile.rkt)));
        blocks.push(TextBlock::new("Trust etcd image signing key", install::rkt_trust(&profile.rkt)));
    }
    if cluster.secure {
        blocks.push(TextBlock::new("Install cfssl", install::cfssl(certs)));
        blocks.push(TextBlock::new("Generate root CA", tls::root_ca(certs)?));
        blocks.push(TextBlock::new("Root CA files", tls::root_ca_files(certs)));
    }

    for node in members {
        if cluster.secure {
            blocks.push(TextBlock::new(
                format!("Generate certificate for {}", node.name),
                tls::leaf_certificate(certs, &node.name, &node.name, &node.address, &certs.extra_hosts)?,
            ));
            blocks.push(TextBlock::new(
                format!("Copy certificates to {}", node.name),
                tls::certs_copy(certs, &node.certs_dir()),
            ));
        }
        blocks.push(TextBlock::new(
            format!("Prepare data directory for {}", node.name),
            data_dir_prepare(node),
        ));
        blocks.push(TextBlock::new(
            format!("{} unit for {}", kind, node.name),
            render_unit(kind, cluster, &profile.rkt, node)?,
        ));
        blocks.push(TextBlock::new(
            format!("Start {}", node.name),
            systemctl(&kind.service_name(node)),
        ));
    }

    if let Some(first) = members.first() {
        blocks.push(TextBlock::new(
            "Check endpoint health",
            health::endpoint_health(cluster, first, kind.is_containerized()),
        ));
    }

    if options.include_operator_manifest {
        blocks.push(TextBlock::new(
            "etcd-operator cluster",
            operator::manifest(cluster, &profile.operator)?,
        ));
        blocks.push(TextBlock::new(
            "Check etcd-operator cluster health",
            operator::kubectl_endpoint_health(cluster, &profile.operator),
        ));
    }

    Ok(blocks)
}
