mod common;

use common::TestContext;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::json;
use std::path::PathBuf;

const STATUS_BODY: &str = r#"{
  "PlaygroundActive": true,
  "ServerUptime": "12 minutes",
  "UserN": 1,
  "NodeStatuses": [
    {"Name": "node1", "Endpoint": "localhost:2379", "IsLeader": true, "State": "Leader", "DBSizeTxt": "25 kB"},
    {"Name": "node2", "Endpoint": "localhost:22379", "State": "Follower", "DBSizeTxt": "25 kB"},
    {"Name": "node3", "Endpoint": "localhost:32379", "State": "Follower", "DBSizeTxt": "25 kB"}
  ]
}"#;

fn playground_profile(ctx: &TestContext, server: &ServerGuard) -> PathBuf {
    ctx.write_profile(
        "playground.toml",
        &format!("[playground]\nendpoint = \"{}/\"\ntimeout_secs = 5\n", server.url()),
    )
}

#[test]
fn status_prints_members_and_leader() {
    let mut server = Server::new();
    let mock = server.mock("GET", "/server-status").with_status(200).with_body(STATUS_BODY).create();
    let ctx = TestContext::new();
    let profile = playground_profile(&ctx, &server);

    ctx.cli_with_profile(&profile)
        .args(["play", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uptime: 12 minutes"))
        .stdout(predicate::str::contains("*node1"))
        .stdout(predicate::str::contains("localhost:22379"))
        .stdout(predicate::str::contains("node1 is the leader"));
    mock.assert();
}

#[test]
fn status_failure_exits_with_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/server-status")
        .with_status(503)
        .with_body(r#"{"message": "playground is restarting"}"#)
        .create();
    let ctx = TestContext::new();
    let profile = playground_profile(&ctx, &server);

    ctx.cli_with_profile(&profile)
        .args(["play", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("playground is restarting"));
}

#[test]
fn write_posts_request_to_every_endpoint() {
    let mut server = Server::new();
    server.mock("GET", "/server-status").with_status(200).with_body(STATUS_BODY).create();
    let request = server
        .mock("POST", "/client-request")
        .match_body(Matcher::PartialJson(json!({
            "Action": "write",
            "KeyValue": {"Key": "foo", "Value": "bar"},
            "Endpoints": ["localhost:2379", "localhost:22379", "localhost:32379"]
        })))
        .with_status(200)
        .with_body(r#"{"Success": true, "ResultLines": ["[PUT] foo : bar (took 3ms)"]}"#)
        .create();
    let ctx = TestContext::new();
    let profile = playground_profile(&ctx, &server);

    ctx.cli_with_profile(&profile)
        .args(["play", "write", "foo", "bar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WRITE (key: foo, value: bar) via localhost:2379"))
        .stdout(predicate::str::contains("[PUT] foo : bar (took 3ms)"));
    request.assert();
}

#[test]
fn unsuccessful_get_exits_nonzero() {
    let mut server = Server::new();
    server.mock("GET", "/server-status").with_status(200).with_body(STATUS_BODY).create();
    server
        .mock("POST", "/client-request")
        .with_status(200)
        .with_body(r#"{"Success": false, "Result": "'get' error: key 'nope' not found"}"#)
        .create();
    let ctx = TestContext::new();
    let profile = playground_profile(&ctx, &server);

    ctx.cli_with_profile(&profile)
        .args(["play", "get", "nope"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ERROR"))
        .stdout(predicate::str::contains("key 'nope' not found"));
}

#[test]
fn stop_node_targets_member_endpoint() {
    let mut server = Server::new();
    server.mock("GET", "/server-status").with_status(200).with_body(STATUS_BODY).create();
    let request = server
        .mock("POST", "/client-request")
        .match_body(Matcher::PartialJson(json!({
            "Action": "stop-node",
            "Endpoints": ["localhost:22379"]
        })))
        .with_status(200)
        .with_body(r#"{"Success": true, "Result": "stopped node2"}"#)
        .create();
    let ctx = TestContext::new();
    let profile = playground_profile(&ctx, &server);

    ctx.cli_with_profile(&profile)
        .args(["play", "stop-node", "node2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stopped node2"));
    request.assert();
}

#[test]
fn connect_reports_user() {
    let mut server = Server::new();
    server
        .mock("GET", "/conn")
        .with_status(200)
        .with_body(r#"{"WebPort": 4200, "User": "alpha", "Deleted": false}"#)
        .create();
    let ctx = TestContext::new();
    let profile = playground_profile(&ctx, &server);

    ctx.cli_with_profile(&profile)
        .args(["play", "connect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("connected as 'alpha'"));
}
