// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

fn clear() {
    for key in [
        "XFORM_STATE_DIR",
        "XDG_STATE_HOME",
        "XFORM_WORK_DIR",
        "XFORM_POLL_INTERVAL_MS",
        "XFORM_KMS_KEY_ARN",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn state_dir_prefers_explicit_override() {
    clear();
    std::env::set_var("XFORM_STATE_DIR", "/tmp/xform-state");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");

    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xform-state"));
    clear();
}

#[test]
#[serial]
fn state_dir_falls_back_to_xdg() {
    clear();
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");

    assert_eq!(state_dir().unwrap(), PathBuf::from("/tmp/xdg/xform"));
    clear();
}

#[test]
#[serial]
fn poll_interval_defaults_and_overrides() {
    clear();
    assert_eq!(poll_interval(), Duration::from_secs(5));

    std::env::set_var("XFORM_POLL_INTERVAL_MS", "250");
    assert_eq!(poll_interval(), Duration::from_millis(250));

    std::env::set_var("XFORM_POLL_INTERVAL_MS", "soon");
    assert_eq!(poll_interval(), Duration::from_secs(5));
    clear();
}

#[test]
#[serial]
fn blank_kms_key_is_absent() {
    clear();
    std::env::set_var("XFORM_KMS_KEY_ARN", "  ");
    assert_eq!(kms_key_arn(), None);
    clear();
}
