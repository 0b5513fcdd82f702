use assert_cmd::Command;
use predicates::str::contains;

const MANIFEST: &str = r#"
[[articles]]
title = "Hello from the command line"
description = "Static output."
date = 2024-03-05
slug = "hello-from-the-command-line"
"#;

fn folio() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("folio"));
    cmd.env_remove("FOLIO_CONFIG_FILE").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn build_writes_static_site() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manifest = dir.path().join("articles.toml");
    std::fs::write(&manifest, MANIFEST).expect("write manifest");
    let out = dir.path().join("dist");

    folio()
        .env("FOLIO__SITE__AUTHOR", "Build Bot")
        .arg("build")
        .arg("--out")
        .arg(&out)
        .arg("--content-manifest")
        .arg(&manifest)
        .assert()
        .success();

    let home = std::fs::read_to_string(out.join("index.html")).expect("home page");
    assert!(home.contains("Hello from the command line"));
    assert!(home.contains("Build Bot. All rights reserved."));
    assert!(out.join("blog/hello-from-the-command-line/index.html").is_file());
    assert!(out.join("404.html").is_file());
}

#[test]
fn missing_manifest_fails_fast() {
    let dir = tempfile::tempdir().expect("tempdir");

    folio()
        .arg("build")
        .arg("--out")
        .arg(dir.path().join("dist"))
        .arg("--content-manifest")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .stdout(contains("application error"));
}

#[test]
fn invalid_port_is_reported() {
    folio()
        .env("FOLIO__SERVER__PORT", "0")
        .arg("serve")
        .assert()
        .failure()
        .stdout(contains("server.port"));
}
