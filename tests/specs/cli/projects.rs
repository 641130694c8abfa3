// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn lists_subdirectories_with_build_file() {
    let root = Project::empty();
    root.file("api/pom.xml", "<project/>")
        .file("web/pom.xml", "<project/>")
        .file("docs/README.md", "# docs");

    let out = cli().args(&["projects", &root.arg("")]).passes();
    let stdout = out.stdout();

    assert!(stdout.contains("api"));
    assert!(stdout.contains("web"));
    assert!(!stdout.contains("docs"));
}

#[test]
fn empty_root_reports_none() {
    let root = Project::empty();
    cli().args(&["projects", &root.arg("")]).passes().stdout_has("No projects found");
}

#[test]
fn json_lists_names_and_paths() {
    let root = Project::empty();
    root.file("api/pom.xml", "<project/>");

    let out = cli().args(&["projects", &root.arg(""), "--format", "json"]).passes();
    let parsed: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();

    assert_eq!(parsed[0]["name"], "api");
    assert!(parsed[0]["path"].as_str().unwrap().ends_with("api"));
}
