// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn missing_endpoint_is_rejected() {
    let project = Project::empty();
    project.file("pom.xml", "<project/>");

    cli().args(&["run", "--project", &project.arg("")]).exits(2).stderr_has("endpoint");
}

#[test]
fn invalid_endpoint_is_rejected() {
    let project = Project::empty();
    project.file("pom.xml", "<project/>");

    cli().args(&["run", "--project", &project.arg(""), "--endpoint", "not a url"]).exits(2);
}

#[test]
fn project_without_build_file_is_rejected() {
    let project = Project::empty();
    project.file("src/Main.java", "class Main {}");

    cli()
        .args(&["run", "--project", &project.arg(""), "--endpoint", DEAD_ENDPOINT])
        .exits(2)
        .stderr_has("pom.xml");
}

#[test]
fn missing_project_is_rejected() {
    let project = Project::empty();

    cli()
        .args(&["run", "--project", &project.arg("nope"), "--endpoint", DEAD_ENDPOINT])
        .exits(2)
        .stderr_has("project not found");
}

#[test]
fn downgrade_is_rejected() {
    let project = Project::empty();
    project.file("pom.xml", "<project/>");

    cli()
        .args(&["run", "--project", &project.arg(""), "--endpoint", DEAD_ENDPOINT])
        .args(&["--source", "17", "--target", "8"])
        .exits(2)
        .stderr_has("cannot upgrade from JDK17 to JDK8");
}

#[test]
fn unknown_java_version_is_a_usage_error() {
    cli().args(&["run", "--source", "9"]).exits(2).stderr_has("unsupported java version");
}

#[test]
fn missing_dependency_cache_fails_setup() {
    let project = Project::empty();
    project.file("pom.xml", "<project/>");

    cli()
        .args(&["run", "--project", &project.arg(""), "--endpoint", DEAD_ENDPOINT])
        .args(&["--no-desktop-notify"])
        .exits(1)
        .stderr_has("dependency");
}

#[test]
fn unreachable_service_fails_the_run() {
    let project = Project::empty();
    project
        .file("pom.xml", "<project/>")
        .file("src/main/java/App.java", "class App {}")
        .file("target/dependency/lib.jar", "jar");
    let work = Project::empty();

    let out = cli()
        .env("XFORM_WORK_DIR", work.path())
        .env("XFORM_THROTTLE_DELAY_MS", "0")
        .args(&["run", "--project", &project.arg(""), "--endpoint", DEAD_ENDPOINT])
        .args(&["--no-desktop-notify"])
        .exits(1);

    assert!(out.stdout().contains("Status: failed"));
}
