// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::prelude::*;

#[test]
fn empty_state_has_no_runs() {
    cli().args(&["history"]).passes().stdout_has("No transformation runs yet");
}

#[test]
fn json_history_is_empty_array() {
    let out = cli().args(&["history", "--format", "json"]).passes();
    let parsed: serde_json::Value = serde_json::from_str(&out.stdout()).unwrap();
    assert_eq!(parsed, serde_json::json!([]));
}

#[test]
fn stored_run_is_listed() {
    let state = Project::empty();
    state.file(
        "history.json",
        r#"{"entries":[{"timestamp_ms":1700000000000,"module":"billing","status":"failed","duration_ms":42000,"id":"job-77"}]}"#,
    );

    cli()
        .env("XFORM_STATE_DIR", state.path())
        .args(&["history"])
        .passes()
        .stdout_has("billing")
        .stdout_has("failed")
        .stdout_has("job-77");
}
