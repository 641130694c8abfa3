// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("run")
        .stdout_has("history")
        .stdout_has("projects");
}

#[test]
fn run_help_shows_version_flags() {
    cli().args(&["run", "--help"]).passes().stdout_has("--source").stdout_has("--target");
}

#[test]
fn version_includes_package_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1.0+");
}

#[test]
fn no_subcommand_is_a_usage_error() {
    cli().exits(2);
}
