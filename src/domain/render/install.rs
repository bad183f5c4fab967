//! Installation scripts for etcd and the tools around it.

use crate::domain::certs::CertificateAuthorityConfig;
use crate::domain::cluster::ClusterConfig;
use crate::domain::paths::{exec_path, is_root};
use crate::domain::tooling::{GoConfig, KubernetesConfig, RktConfig, SourceBuildConfig};

use super::LINE_CONTINUATION;

const DOWNLOAD_URLS: &str = "# choose either URL
GOOGLE_URL=https://storage.googleapis.com/etcd
GITHUB_URL=https://github.com/coreos/etcd/releases/download
DOWNLOAD_URL=${GOOGLE_URL}
";

const KUBERNETES_BINARIES: [&str; 6] =
    ["kubelet", "kube-apiserver", "kube-controller-manager", "kube-scheduler", "kube-proxy", "kubectl"];

/// Copy the extracted etcd binaries into the exec dir and print their versions.
///
/// Installing into `/` gets a commented hint pointing at `/usr/local/bin`.
fn copy_etcd_binaries(source_glob: &str, exec_dir: &str) -> String {
    let mut txt = String::new();
    if is_root(exec_dir) {
        txt.push_str(&format!("# sudo cp {} /usr/local/bin\n", source_glob));
    }
    txt.push_str(&format!("sudo cp {} {}\n\n", source_glob, exec_dir));
    txt.push_str(&format!("{} --version\n", exec_path(exec_dir, "etcd")));
    txt.push_str(&format!("{} --version\n\n", exec_path(exec_dir, "etcdctl")));
    txt
}

/// Download the Linux release tarball and install it.
pub fn etcd_linux(cluster: &ClusterConfig) -> String {
    let mut txt = format!("ETCD_VER={}\n\n{}\n", cluster.version, DOWNLOAD_URLS);
    txt.push_str(
        "rm -f /tmp/etcd-${ETCD_VER}-linux-amd64.tar.gz
rm -rf /tmp/test-etcd && mkdir -p /tmp/test-etcd

curl -L ${DOWNLOAD_URL}/${ETCD_VER}/etcd-${ETCD_VER}-linux-amd64.tar.gz -o /tmp/etcd-${ETCD_VER}-linux-amd64.tar.gz
tar xzvf /tmp/etcd-${ETCD_VER}-linux-amd64.tar.gz -C /tmp/test-etcd --strip-components=1

",
    );
    txt.push_str(&copy_etcd_binaries("/tmp/test-etcd/etcd*", &cluster.exec_dir()));
    txt
}

/// Download the macOS release zip and install it.
pub fn etcd_osx(cluster: &ClusterConfig) -> String {
    let mut txt = format!("ETCD_VER={}\n\n{}\n", cluster.version, DOWNLOAD_URLS);
    txt.push_str(
        "rm -f /tmp/etcd-${ETCD_VER}-darwin-amd64.zip
rm -rf /tmp/test-etcd && mkdir -p /tmp/test-etcd

curl -L ${DOWNLOAD_URL}/${ETCD_VER}/etcd-${ETCD_VER}-darwin-amd64.zip -o /tmp/etcd-${ETCD_VER}-darwin-amd64.zip
unzip /tmp/etcd-${ETCD_VER}-darwin-amd64.zip -d /tmp
mv /tmp/etcd-${ETCD_VER}-darwin-amd64/* /tmp/test-etcd

",
    );
    txt.push_str(&copy_etcd_binaries("/tmp/test-etcd/etcd*", &cluster.exec_dir()));
    txt
}

/// Clone a fork of etcd into `$GOPATH`, build it and install the binaries.
pub fn etcd_from_source(cluster: &ClusterConfig, source: &SourceBuildConfig) -> String {
    let mut txt = format!(
        r#"if [ "${{GOPATH}}" == "" ]; then
    echo "GOPATH does not exist!"
    exit 255
else
    echo "GOPATH: ${{GOPATH}}"
fi

GIT_PATH=github.com/coreos/etcd

USER_NAME={}
BRANCH_NAME={}

rm -rf ${{GOPATH}}/src/${{GIT_PATH}}
git clone https://github.com/${{USER_NAME}}/etcd{}--branch ${{BRANCH_NAME}}{}${{GOPATH}}/src/${{GIT_PATH}}

cd ${{GOPATH}}/src/${{GIT_PATH}} && ./build

"#,
        source.git_user, source.git_branch, LINE_CONTINUATION, LINE_CONTINUATION
    );
    txt.push_str(&copy_etcd_binaries("${GOPATH}/src/${GIT_PATH}/bin/etcd*", &cluster.exec_dir()));
    txt
}

/// Install the Go toolchain under `/usr/local/go` and export `GOPATH`.
pub fn go_toolchain(go: &GoConfig) -> String {
    format!(
        r#"GO_VERSION={}

sudo rm -f /usr/local/go/bin/go && sudo rm -rf /usr/local/go

GOOGLE_URL=https://storage.googleapis.com/golang
DOWNLOAD_URL=${{GOOGLE_URL}}

sudo curl -s ${{DOWNLOAD_URL}}/go$GO_VERSION.linux-amd64.tar.gz | sudo tar -v -C /usr/local/ -xz

if grep -q GOPATH "$(echo $HOME)/.bashrc"; then
    echo "bashrc already has GOPATH";
else
    echo "adding GOPATH to bashrc";
    echo "export GOPATH=$(echo $HOME)/go" >> $HOME/.bashrc;
    PATH_VAR=$PATH":/usr/local/go/bin:$(echo $HOME)/go/bin";
    echo "export PATH=$(echo $PATH_VAR)" >> $HOME/.bashrc;
    source $HOME/.bashrc;
fi

mkdir -p $GOPATH/bin/
go version
"#,
        go.version
    )
}

/// Download the Kubernetes server and client binaries.
pub fn kubernetes_binaries(kubernetes: &KubernetesConfig) -> String {
    let exec_dir = kubernetes.exec_dir();
    let mut txt = format!(
        r#"K8S_VER={}

GOOS={}
GOARCH={}

DOWNLOAD_URL=https://storage.googleapis.com/kubernetes-release/release

BINS='{}'

for K8S_BIN in ${{BINS}}; do
    echo "Downloading" ${{K8S_BIN}}
    rm -f /tmp/${{K8S_BIN}}
    curl -L ${{DOWNLOAD_URL}}/${{K8S_VER}}/bin/${{GOOS}}/${{GOARCH}}/${{K8S_BIN}} -o /tmp/${{K8S_BIN}}
    sudo chmod +x /tmp/${{K8S_BIN}}
"#,
        kubernetes.version,
        kubernetes.goos,
        kubernetes.goarch,
        KUBERNETES_BINARIES.join(" ")
    );
    if is_root(&exec_dir) {
        txt.push_str("    # sudo mv /tmp/${K8S_BIN} /usr/local/bin\n");
    }
    txt.push_str(&format!("    sudo mv /tmp/${{K8S_BIN}} {}\ndone\n\n", exec_dir));

    for binary in KUBERNETES_BINARIES {
        let version_flag = if binary == "kubectl" { "version" } else { "--version" };
        txt.push_str(&format!("{} {}\n", exec_path(&exec_dir, binary), version_flag));
    }
    txt
}

/// Download and install the rkt container runtime.
pub fn rkt(rkt: &RktConfig) -> String {
    let exec_dir = rkt.exec_dir();
    let mut txt = format!(
        r#"RKT_VERSION={}

GITHUB_URL=https://github.com/coreos/rkt/releases/download
DOWNLOAD_URL=${{GITHUB_URL}}

rm -f /tmp/rkt-${{RKT_VERSION}}.tar.gz
rm -rf /tmp/test-rkt-${{RKT_VERSION}} && mkdir -p /tmp/test-rkt-${{RKT_VERSION}}

curl -L ${{DOWNLOAD_URL}}/${{RKT_VERSION}}/rkt-${{RKT_VERSION}}.tar.gz -o /tmp/rkt-${{RKT_VERSION}}.tar.gz
tar xzvf /tmp/rkt-${{RKT_VERSION}}.tar.gz -C /tmp/test-rkt-${{RKT_VERSION}} --strip-components=1

"#,
        rkt.version
    );
    if is_root(&exec_dir) {
        txt.push_str("# sudo cp /tmp/test-rkt-${RKT_VERSION}/rkt /usr/local/bin\n");
    }
    txt.push_str(&format!("sudo cp /tmp/test-rkt-${{RKT_VERSION}}/rkt {}\n\n", exec_dir));
    txt.push_str(&format!("{} version\n", exec_path(&exec_dir, "rkt")));
    txt
}

/// Trust the signing key of the etcd image prefix.
pub fn rkt_trust(rkt: &RktConfig) -> String {
    [
        format!("sudo {} trust", exec_path(&rkt.exec_dir(), "rkt")),
        format!("--prefix {}", rkt.trust_prefix),
        format!("'{}'", rkt.trust_public_key),
    ]
    .join(LINE_CONTINUATION)
        + "\n"
}

/// Install `cfssl` and `cfssljson` and create the certificate directory.
pub fn cfssl(certs: &CertificateAuthorityConfig) -> String {
    let exec_dir = certs.exec_dir();
    let mut txt = String::from("rm -f /tmp/cfssl* && rm -rf /tmp/certs && mkdir -p /tmp/certs\n\n");
    for tool in ["cfssl", "cfssljson"] {
        txt.push_str(&format!(
            "curl -L https://pkg.cfssl.org/{}/{}_{} -o /tmp/{}\nchmod +x /tmp/{}\nsudo mv /tmp/{} {}\n\n",
            certs.version,
            tool,
            certs.arch,
            tool,
            tool,
            tool,
            exec_path(&exec_dir, tool)
        ));
    }
    txt.push_str(&format!("{} version\n", exec_path(&exec_dir, "cfssl")));
    txt.push_str(&format!("{} -h\n\n", exec_path(&exec_dir, "cfssljson")));
    txt.push_str(&format!("mkdir -p {}\n", certs.certs_dir()));
    txt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_install_uses_version_and_exec_dir() {
        let cluster = ClusterConfig::default();
        let script = etcd_linux(&cluster);
        assert!(script.starts_with("ETCD_VER=v3.1.0\n\n# choose either URL\n"));
        assert!(script.contains("DOWNLOAD_URL=${GOOGLE_URL}\n\nrm -f /tmp/etcd-${ETCD_VER}-linux-amd64.tar.gz"));
        assert!(script.contains("sudo cp /tmp/test-etcd/etcd* /tmp/test-etcd\n\n"));
        assert!(script.ends_with("/tmp/test-etcd/etcd --version\n/tmp/test-etcd/etcdctl --version\n\n"));
        assert!(!script.contains("# sudo cp"));
    }

    #[test]
    fn root_exec_dir_adds_hint_without_double_separator() {
        let cluster = ClusterConfig { exec_dir: "/".into(), ..ClusterConfig::default() };
        let script = etcd_osx(&cluster);
        assert!(script.contains("# sudo cp /tmp/test-etcd/etcd* /usr/local/bin\nsudo cp /tmp/test-etcd/etcd* /\n"));
        assert!(script.contains("\n/etcd --version\n/etcdctl --version\n"));
        assert!(script.contains("unzip /tmp/etcd-${ETCD_VER}-darwin-amd64.zip -d /tmp"));
    }

    #[test]
    fn source_build_clones_requested_fork() {
        let source = SourceBuildConfig { git_user: "gyuho".into(), git_branch: "raft".into() };
        let script = etcd_from_source(&ClusterConfig::default(), &source);
        assert!(script.contains("USER_NAME=gyuho\nBRANCH_NAME=raft\n"));
        assert!(script.contains(
            "git clone https://github.com/${USER_NAME}/etcd \\\n    --branch ${BRANCH_NAME} \\\n    ${GOPATH}/src/${GIT_PATH}\n"
        ));
        assert!(script.contains("sudo cp ${GOPATH}/src/${GIT_PATH}/bin/etcd* /tmp/test-etcd\n"));
    }

    #[test]
    fn kubernetes_lists_every_binary() {
        let script = kubernetes_binaries(&KubernetesConfig::default());
        assert!(script.contains("BINS='kubelet kube-apiserver kube-controller-manager kube-scheduler kube-proxy kubectl'"));
        assert!(script.contains("    sudo mv /tmp/${K8S_BIN} /usr/local/bin\ndone\n"));
        assert!(script.ends_with("/usr/local/bin/kube-proxy --version\n/usr/local/bin/kubectl version\n"));
    }

    #[test]
    fn rkt_defaults_install_into_root() {
        let rkt_config = RktConfig::default();
        let script = rkt(&rkt_config);
        assert!(script.starts_with("RKT_VERSION=v1.18.0\n"));
        assert!(script.contains("# sudo cp /tmp/test-rkt-${RKT_VERSION}/rkt /usr/local/bin\n"));
        assert!(script.ends_with("/rkt version\n"));

        assert_eq!(
            rkt_trust(&rkt_config),
            "sudo /rkt trust \\\n    --prefix coreos.com/etcd \\\n    'https://coreos.com/dist/pubkeys/app-signing-pubkey.gpg'\n"
        );
    }

    #[test]
    fn cfssl_install_moves_both_tools() {
        let script = cfssl(&CertificateAuthorityConfig::default());
        assert!(script.contains("curl -L https://pkg.cfssl.org/R1.2/cfssl_linux-amd64 -o /tmp/cfssl\n"));
        assert!(script.contains("sudo mv /tmp/cfssljson /usr/local/bin/cfssljson\n"));
        assert!(script.ends_with("mkdir -p /tmp/certs\n"));
    }

    #[test]
    fn go_install_sets_version() {
        let script = go_toolchain(&GoConfig { version: "1.8".into() });
        assert!(script.starts_with("GO_VERSION=1.8\n"));
        assert!(script.contains("DOWNLOAD_URL=${GOOGLE_URL}\n"));
    }
}
