mod common;

use common::TestContext;
use predicates::prelude::*;

const DEFAULT_INITIAL_CLUSTER: &str =
    "s1=https://localhost:2380,s2=https://localhost:22380,s3=https://localhost:32380";

#[test]
fn initial_cluster_uses_default_profile() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "initial-cluster"])
        .assert()
        .success()
        .stdout(format!("{}\n", DEFAULT_INITIAL_CLUSTER));
}

#[test]
fn one_line_command_contains_flags_in_order() {
    let ctx = TestContext::new();
    let output = ctx
        .cli()
        .args(["render", "command", "--node", "s2", "--one-line"])
        .output()
        .expect("failed to run etcdlabs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("/tmp/test-etcd/etcd --name s2 --data-dir /tmp/etcd/s2 "));
    assert!(!stdout.contains('\\'));
    let cert = stdout.find("--cert-file").unwrap();
    let peer_auth = stdout.find("--peer-client-cert-auth").unwrap();
    assert!(cert < peer_auth);
}

#[test]
fn insecure_profile_emits_no_tls_flags() {
    let ctx = TestContext::new();
    let profile = ctx.write_profile("plain.toml", "[cluster]\nsecure = false\n");
    ctx.cli_with_profile(&profile)
        .args(["render", "flags", "--one-line"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:2379"))
        .stdout(predicate::str::contains("--trusted-ca-file").not())
        .stdout(predicate::str::contains("--client-cert-auth").not());
}

#[test]
fn oversize_cluster_renders_error_sentinel() {
    let ctx = TestContext::new();
    let profile = ctx.write_profile("big.yaml", "cluster:\n  cluster_size: 8\n");
    ctx.cli_with_profile(&profile)
        .args(["render", "initial-cluster"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cluster size over 7"));
}

fn three_node_profile(cluster_size: u32) -> String {
    let mut toml = format!("[cluster]\ncluster_size = {}\n", cluster_size);
    for i in 1..=3 {
        toml.push_str(&format!(
            "\n[[cluster.nodes]]\nname = \"n{i}\"\naddress = \"10.0.0.{i}\"\nclient_port = 2379\npeer_port = 2380\n"
        ));
    }
    toml
}

#[test]
fn oversize_cluster_with_three_nodes_still_renders() {
    let ctx = TestContext::new();
    let profile = ctx.write_profile("three.toml", &three_node_profile(8));
    ctx.cli_with_profile(&profile)
        .args(["render", "initial-cluster"])
        .assert()
        .success()
        .stdout("(error: cluster size over 7 is not supported)\n");
    ctx.cli_with_profile(&profile)
        .args(["render", "endpoints"])
        .assert()
        .success()
        .stdout("10.0.0.1:2379,10.0.0.2:2379,10.0.0.3:2379\n");
}

#[test]
fn short_node_list_is_rejected_for_supported_size() {
    let ctx = TestContext::new();
    let profile = ctx.write_profile("short.toml", &three_node_profile(5));
    ctx.cli_with_profile(&profile)
        .args(["render", "initial-cluster"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs at least 5 node(s), found 3"));
}

#[test]
fn unknown_node_fails_with_available_names() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "unit", "--node", "s42"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Node 's42' not found"))
        .stderr(predicate::str::contains("s1, s2"));
}

#[test]
fn unknown_unit_kind_is_rejected() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "unit", "--kind", "upstart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown unit kind 'upstart'"));
}

#[test]
fn docker_unit_uses_container_paths() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "unit", "--kind", "docker", "--node", "s1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--data-dir /etcd-data"))
        .stdout(predicate::str::contains("/etcd-ssl-certs-dir/s1.pem"));
}

#[test]
fn coreos_systemctl_targets_etcd_member() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "systemctl", "--kind", "coreos"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sudo systemctl start etcd-member.service"));
}

#[test]
fn guide_lists_every_member() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["render", "guide", "--operator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Generate root CA"))
        .stdout(predicate::str::contains("# systemd unit for s3"))
        .stdout(predicate::str::contains("# systemd unit for s4").not())
        .stdout(predicate::str::contains("kubectl create -f"));
}

#[test]
fn root_ca_clamps_key_size() {
    let ctx = TestContext::new();
    let profile = ctx.write_profile("certs.toml", "[certs]\nkey_size = 100\n");
    ctx.cli_with_profile(&profile)
        .args(["render", "root-ca"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"size\": 256"));
}

#[test]
fn repeated_renders_are_identical() {
    let ctx = TestContext::new();
    let first = ctx.cli().args(["render", "guide", "--kind", "rkt"]).output().unwrap();
    let second = ctx.cli().args(["render", "guide", "--kind", "rkt"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn defaults_round_trip_through_profile() {
    let ctx = TestContext::new();
    let output = ctx.cli().arg("defaults").output().unwrap();
    assert!(output.status.success());
    let profile = ctx.write_profile("defaults.toml", &String::from_utf8(output.stdout).unwrap());

    ctx.cli_with_profile(&profile)
        .args(["render", "initial-cluster"])
        .assert()
        .success()
        .stdout(format!("{}\n", DEFAULT_INITIAL_CLUSTER));
}

#[test]
fn missing_profile_is_reported() {
    let ctx = TestContext::new();
    ctx.cli()
        .args(["--profile", "absent.toml", "render", "install"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile not found"));
}

#[test]
fn invalid_profile_field_is_rejected() {
    let ctx = TestContext::new();
    let profile = ctx.write_profile("typo.toml", "[cluster]\nsecuer = true\n");
    ctx.cli_with_profile(&profile)
        .args(["render", "install"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: TOML parse error"));
}
