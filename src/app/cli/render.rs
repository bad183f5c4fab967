//! Render command implementation.

use std::path::Path;

use clap::{Args, Subcommand};

use crate::app::api::{self, InstallSource, RenderTarget};
use crate::domain::defaults::FLAG_HELP_URL;
use crate::domain::{AppError, FlagOptions, GuideOptions, UnitKind};

#[derive(Args, Clone, Default)]
pub struct NodeArg {
    /// Member name; the first node when omitted
    #[arg(short, long)]
    node: Option<String>,
}

#[derive(Args, Clone, Default)]
pub struct FlagArgs {
    /// Join flags with spaces instead of line continuations
    #[arg(long)]
    one_line: bool,
    /// Leave out --data-dir
    #[arg(long)]
    skip_data_dir: bool,
    /// Use the data and certificate paths mounted into the etcd container
    #[arg(long)]
    containerized: bool,
}

impl FlagArgs {
    fn options(&self) -> FlagOptions {
        let mut options = if self.one_line { FlagOptions::one_line() } else { FlagOptions::multi_line() };
        if self.skip_data_dir {
            options = options.with_skip_data_dir();
        }
        if self.containerized {
            options = options.with_containerized();
        }
        options
    }
}

#[derive(Args, Clone)]
pub struct KindArg {
    /// Service flavour: systemd, docker, rkt or coreos
    #[arg(short, long, default_value = "systemd")]
    kind: String,
}

impl KindArg {
    fn parse(&self) -> Result<UnitKind, AppError> {
        self.kind.parse()
    }
}

#[derive(Subcommand, Clone)]
pub enum RenderCommand {
    /// Download and install etcd
    #[clap(visible_alias = "i")]
    Install {
        /// Install the macOS release instead of Linux
        #[arg(long, conflicts_with = "source")]
        osx: bool,
        /// Build etcd from source with Go
        #[arg(long, conflicts_with = "osx")]
        source: bool,
    },
    /// Install the Go toolchain
    Go,
    /// Install Kubernetes binaries
    Kubernetes,
    /// Install rkt
    RktInstall,
    /// Trust the etcd image signing key for rkt
    RktTrust,
    /// Install cfssl
    CfsslInstall,
    /// Generate the root CA
    RootCa,
    /// List the root CA files
    RootCaFiles,
    /// Generate a member certificate
    Cert(NodeArg),
    /// Copy certificates onto a member
    CertsCopy(NodeArg),
    /// List a member's certificate files; every member when no node is given
    CertFiles(NodeArg),
    /// Data directory reminder for a member
    DataDir(NodeArg),
    /// etcd flags for a member
    #[command(after_help = FLAG_HELP_URL)]
    Flags {
        #[command(flatten)]
        node: NodeArg,
        #[command(flatten)]
        flags: FlagArgs,
    },
    /// Full etcd command line for a member
    Command {
        #[command(flatten)]
        node: NodeArg,
        #[command(flatten)]
        flags: FlagArgs,
    },
    /// The --initial-cluster value
    InitialCluster,
    /// Comma-separated client endpoints
    Endpoints {
        /// Prefix each endpoint with its scheme
        #[arg(long)]
        scheme: bool,
    },
    /// etcdctl endpoint health check
    Health {
        #[command(flatten)]
        node: NodeArg,
        /// Run etcdctl inside the container
        #[arg(long)]
        containerized: bool,
    },
    /// Service unit for a member
    #[clap(visible_alias = "u")]
    Unit {
        #[command(flatten)]
        node: NodeArg,
        #[command(flatten)]
        kind: KindArg,
    },
    /// systemctl lifecycle commands for a member's service
    Systemctl {
        #[command(flatten)]
        node: NodeArg,
        #[command(flatten)]
        kind: KindArg,
    },
    /// etcd-operator cluster manifest
    Operator {
        /// Render the kubectl health-check pod instead
        #[arg(long)]
        health: bool,
    },
    /// Every step to bring up the cluster
    #[clap(visible_alias = "g")]
    Guide {
        #[command(flatten)]
        kind: KindArg,
        /// Append the etcd-operator manifest
        #[arg(long)]
        operator: bool,
    },
}

impl RenderCommand {
    fn into_target(self) -> Result<RenderTarget, AppError> {
        let target = match self {
            RenderCommand::Install { osx, source } => RenderTarget::Install(if osx {
                InstallSource::Osx
            } else if source {
                InstallSource::Source
            } else {
                InstallSource::Linux
            }),
            RenderCommand::Go => RenderTarget::Go,
            RenderCommand::Kubernetes => RenderTarget::Kubernetes,
            RenderCommand::RktInstall => RenderTarget::RktInstall,
            RenderCommand::RktTrust => RenderTarget::RktTrust,
            RenderCommand::CfsslInstall => RenderTarget::CfsslInstall,
            RenderCommand::RootCa => RenderTarget::RootCa,
            RenderCommand::RootCaFiles => RenderTarget::RootCaFiles,
            RenderCommand::Cert(node) => RenderTarget::Cert { node: node.node },
            RenderCommand::CertsCopy(node) => RenderTarget::CertsCopy { node: node.node },
            RenderCommand::CertFiles(node) => RenderTarget::CertFiles { node: node.node },
            RenderCommand::DataDir(node) => RenderTarget::DataDir { node: node.node },
            RenderCommand::Flags { node, flags } => {
                RenderTarget::Flags { node: node.node, options: flags.options() }
            }
            RenderCommand::Command { node, flags } => {
                RenderTarget::Command { node: node.node, options: flags.options() }
            }
            RenderCommand::InitialCluster => RenderTarget::InitialCluster,
            RenderCommand::Endpoints { scheme } => RenderTarget::Endpoints { with_scheme: scheme },
            RenderCommand::Health { node, containerized } => {
                RenderTarget::Health { node: node.node, containerized }
            }
            RenderCommand::Unit { node, kind } => {
                RenderTarget::Unit { node: node.node, kind: kind.parse()? }
            }
            RenderCommand::Systemctl { node, kind } => {
                RenderTarget::Systemctl { node: node.node, kind: kind.parse()? }
            }
            RenderCommand::Operator { health } => RenderTarget::Operator { health },
            RenderCommand::Guide { kind, operator } => RenderTarget::Guide {
                kind: kind.parse()?,
                options: GuideOptions { include_operator_manifest: operator },
            },
        };
        Ok(target)
    }
}

pub fn run_render(profile: Option<&Path>, command: RenderCommand) -> Result<(), AppError> {
    let profile = api::load_profile(profile)?;
    let text = api::render(&profile, &command.into_target()?)?;
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
    Ok(())
}
