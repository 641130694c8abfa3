// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use xform_core::test_support::strategies::arb_kms_key_arn;

#[test]
fn headers_without_key_have_only_content_type_and_checksum() {
    let headers = upload_headers("abc=", "");
    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("content-type"), Some("application/zip"));
    assert_eq!(headers.get(CHECKSUM_HEADER), Some("abc="));
    assert!(!headers.contains(SSE_HEADER));
    assert!(!headers.contains(SSE_KMS_KEY_HEADER));
}

#[test]
fn headers_with_key_request_kms_encryption() {
    let arn = "arn:aws:kms:us-east-1:123456789012:key/abcd";
    let headers = upload_headers("abc=", arn);
    assert_eq!(headers.len(), 4);
    assert_eq!(headers.get(SSE_HEADER), Some("aws:kms"));
    assert_eq!(headers.get(SSE_KMS_KEY_HEADER), Some(arn));
    assert!(headers.is_encrypted());
}

#[test]
fn whitespace_key_counts_as_empty() {
    assert!(!upload_headers("abc=", "   ").is_encrypted());
}

#[test]
fn padded_key_is_sent_trimmed() {
    let arn = "arn:aws:kms:us-east-1:123456789012:key/abc";
    let headers = upload_headers("abc=", &format!("  {arn}\n"));
    assert_eq!(headers.get(SSE_KMS_KEY_HEADER), Some(arn));
}

#[yare::parameterized(
    empty = { b"", "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=" },
    abc   = { b"abc", "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0=" },
)]
fn sha256_base64_matches_known_digests(input: &[u8], expected: &str) {
    assert_eq!(sha256_base64(input), expected);
}

proptest! {
    #[test]
    fn encryption_headers_present_iff_key_non_empty(
        checksum in "[A-Za-z0-9+/]{43}=",
        kms_key_arn in arb_kms_key_arn(),
    ) {
        let headers = upload_headers(&checksum, &kms_key_arn);
        prop_assert_eq!(headers.contains(SSE_HEADER), !kms_key_arn.is_empty());
        prop_assert_eq!(headers.contains(SSE_KMS_KEY_HEADER), !kms_key_arn.is_empty());
        prop_assert_eq!(headers.get(CHECKSUM_HEADER), Some(checksum.as_str()));
        prop_assert!(headers.iter().all(|(_, value)| !value.is_empty()));
    }
}
