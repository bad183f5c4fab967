//! Service units wrapping the etcd command.

use std::fmt;
use std::str::FromStr;

use minijinja::context;

use crate::domain::AppError;
use crate::domain::cluster::{ClusterConfig, NodeConfig};
use crate::domain::paths::exec_path;
use crate::domain::tooling::RktConfig;

use super::LINE_CONTINUATION;
use super::flags::{CONTAINER_CERTS_DIR, CONTAINER_DATA_DIR, FlagOptions, render_command, render_flags};
use super::template::{self, COREOS_DROPIN, DOCKER_UNIT, RKT_UNIT, SYSTEMD_UNIT, heredoc};

const DOCKER_BIN_DIR: &str = "/usr/bin";
const COREOS_SERVICE: &str = "etcd-member";

/// How etcd is run under systemd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitKind {
    /// The etcd binary directly.
    #[default]
    Systemd,
    /// `docker run` of the official image.
    Docker,
    /// `rkt run` with the fly stage1.
    Rkt,
    /// Drop-in for Container Linux's `etcd-member.service`.
    CoreOs,
}

impl UnitKind {
    pub const ALL: [UnitKind; 4] = [UnitKind::Systemd, UnitKind::Docker, UnitKind::Rkt, UnitKind::CoreOs];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Systemd => "systemd",
            UnitKind::Docker => "docker",
            UnitKind::Rkt => "rkt",
            UnitKind::CoreOs => "coreos",
        }
    }

    /// systemd service the unit for `node` installs.
    pub fn service_name(&self, node: &NodeConfig) -> String {
        match self {
            UnitKind::CoreOs => COREOS_SERVICE.to_string(),
            _ => node.name.clone(),
        }
    }

    /// Whether etcd runs inside a container with remapped paths.
    pub fn is_containerized(&self) -> bool {
        matches!(self, UnitKind::Docker)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for UnitKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
            AppError::config_error(format!(
                "Unknown unit kind '{}': expected one of systemd, docker, rkt, coreos",
                s
            ))
        })
    }
}

fn install_unit(name: &str, body: &str) -> String {
    format!(
        "{}sudo mv /tmp/{}.service /etc/systemd/system/{}.service\n",
        heredoc(&format!("/tmp/{}.service", name), body),
        name,
        name
    )
}

/// Native systemd unit. `ExecStart` is exactly the multi-line etcd command.
pub fn systemd(cluster: &ClusterConfig, node: &NodeConfig) -> Result<String, AppError> {
    let exec_start = render_command(cluster, node, FlagOptions::multi_line());
    let body = template::render(SYSTEMD_UNIT, context! { exec_start => exec_start })?;
    Ok(format!("# to write service file for etcd\n{}", install_unit(&node.name, &body)))
}

/// systemd unit running the etcd image with Docker.
pub fn docker(cluster: &ClusterConfig, node: &NodeConfig) -> Result<String, AppError> {
    let docker = exec_path(DOCKER_BIN_DIR, "docker");
    let container = format!("etcd-{}", cluster.version);

    let mut segments = vec![
        docker.clone(),
        "run".to_string(),
        "--net=host".to_string(),
        format!("--name {}", container),
        format!("--volume={}:{}", node.data_dir(), CONTAINER_DATA_DIR),
    ];
    if cluster.secure {
        segments.push(format!("--volume={}:{}", node.certs_dir(), CONTAINER_CERTS_DIR));
    }
    segments.push(format!("quay.io/coreos/etcd:{}", cluster.version));
    segments.push("/usr/local/bin/etcd".to_string());
    segments.push(render_flags(cluster, node, FlagOptions::multi_line().with_containerized()));

    let body = template::render(
        DOCKER_UNIT,
        context! {
            exec_start => segments.join(LINE_CONTINUATION),
            exec_stop => format!("{} stop {}", docker, container),
        },
    )?;
    Ok(format!("# to write service file for etcd with Docker\n{}", install_unit(&node.name, &body)))
}

/// systemd unit running the etcd ACI with rkt.
pub fn rkt(cluster: &ClusterConfig, rkt: &RktConfig, node: &NodeConfig) -> Result<String, AppError> {
    let mut segments = vec![
        exec_path(&rkt.exec_dir(), "rkt"),
        "--trust-keys-from-https".to_string(),
        "--dir=/var/lib/rkt".to_string(),
        "run".to_string(),
        format!("--stage1-name coreos.com/rkt/stage1-fly:{}", rkt.stripped_version()),
        "--net=host".to_string(),
        format!("--volume data-dir,kind=host,source={}", node.data_dir()),
    ];
    if cluster.secure {
        segments.push(format!("--volume etcd-ssl-certs-dir,kind=host,source={}", node.certs_dir()));
        segments.push(format!("--mount volume=etcd-ssl-certs-dir,target={}", node.certs_dir()));
    }
    if rkt.custom_aci.is_empty() {
        segments.push(format!("coreos.com/etcd:{} --", cluster.version));
    } else {
        segments.push("--insecure-options=image".to_string());
        segments.push(format!("{} --", rkt.custom_aci));
    }
    segments.push(render_flags(cluster, node, FlagOptions::multi_line().with_skip_data_dir()));

    let body = template::render(RKT_UNIT, context! { exec_start => segments.join(LINE_CONTINUATION) })?;
    Ok(format!("# to write service file for etcd with rkt\n{}", install_unit(&node.name, &body)))
}

/// Drop-in overriding Container Linux's `etcd-member.service`.
pub fn coreos_dropin(cluster: &ClusterConfig, node: &NodeConfig) -> Result<String, AppError> {
    let body = template::render(
        COREOS_DROPIN,
        context! {
            version => &cluster.version,
            data_dir => node.data_dir(),
            certs_dir => node.certs_dir(),
            opts => render_flags(cluster, node, FlagOptions::multi_line().with_skip_data_dir()),
        },
    )?;
    let conf = format!("/tmp/override-{}.conf", node.name);
    let dropin_dir = format!("/etc/systemd/system/{}.service.d", COREOS_SERVICE);

    let mut txt = format!("# to write {} drop-in for etcd\n", COREOS_SERVICE);
    txt.push_str(&heredoc(&conf, &body));
    txt.push_str(&format!("sudo mkdir -p {}\n", dropin_dir));
    txt.push_str(&format!("sudo mv {} {}/override.conf\n", conf, dropin_dir));
    txt.push_str("# sudo systemd-delta --type=extended\n");
    Ok(txt)
}

/// Unit of `kind` for `node`.
pub fn render_unit(
    kind: UnitKind,
    cluster: &ClusterConfig,
    rkt_config: &RktConfig,
    node: &NodeConfig,
) -> Result<String, AppError> {
    match kind {
        UnitKind::Systemd => systemd(cluster, node),
        UnitKind::Docker => docker(cluster, node),
        UnitKind::Rkt => rkt(cluster, rkt_config, node),
        UnitKind::CoreOs => coreos_dropin(cluster, node),
    }
}

/// Lifecycle commands for a systemd service.
pub fn systemctl(service: &str) -> String {
    format!(
        "# to start service
sudo systemctl daemon-reload
sudo systemctl cat {s}.service
sudo systemctl enable {s}.service
sudo systemctl start {s}.service

# to get logs from service
sudo systemctl status {s}.service -l --no-pager
sudo journalctl -u {s}.service -l --no-pager|less
sudo journalctl -f -u {s}.service

# to stop service
sudo systemctl stop {s}.service
sudo systemctl disable {s}.service
",
        s = service
    )
}

/// Reminder about the member's data directory before first start.
pub fn data_dir_prepare(node: &NodeConfig) -> String {
    format!(
        "# make sure etcd process has write access to this directory
# remove this directory if the cluster is new; keep if restarting etcd
# sudo rm -rf {}
",
        node.data_dir()
    )
}
