// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn job_id_default_is_empty() {
    let id = JobId::default();
    assert!(id.is_empty());
    assert_eq!(id.as_str(), "");
}

#[test]
fn whitespace_job_id_counts_as_empty() {
    assert!(JobId::new("  ").is_empty());
}

#[test]
fn job_id_display_and_eq() {
    let id: JobId = "job-123".into();
    assert_eq!(id.to_string(), "job-123");
    assert_eq!(id, "job-123");
    assert!(!id.is_empty());
}

#[test]
fn upload_id_serde_is_transparent() {
    let id = UploadId::new("up-1");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"up-1\"");

    let parsed: UploadId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[yare::parameterized(
    truncates     = { "abcdefghijklmnop", 8, "abcdefgh" },
    shorter       = { "abc", 8, "abc" },
    exact         = { "abcdefgh", 8, "abcdefgh" },
    multibyte     = { "jöb-ïd", 3, "jöb" },
)]
fn short_truncates_by_chars(input: &str, n: usize, expected: &str) {
    assert_eq!(JobId::new(input).short(n), expected);
}
