// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Header set for archive uploads to a pre-signed destination.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub const CHECKSUM_HEADER: &str = "x-amz-checksum-sha256";
pub const CONTENT_TYPE_ZIP: &str = "application/zip";
pub const SSE_HEADER: &str = "x-amz-server-side-encryption";
pub const SSE_KMS_VALUE: &str = "aws:kms";
pub const SSE_KMS_KEY_HEADER: &str = "x-amz-server-side-encryption-aws-kms-key-id";

/// Headers sent with an archive upload, keyed by lowercase header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadHeaders(BTreeMap<&'static str, String>);

impl UploadHeaders {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when both server-side encryption headers are present.
    pub fn is_encrypted(&self) -> bool {
        self.contains(SSE_HEADER) && self.contains(SSE_KMS_KEY_HEADER)
    }
}

/// Build the upload header set.
///
/// Encryption headers are included only when `kms_key_arn` is non-empty
/// after trimming surrounding whitespace; an empty or whitespace-only ARN
/// omits them entirely rather than sending empty values. A present ARN is
/// sent trimmed.
pub fn upload_headers(checksum: &str, kms_key_arn: &str) -> UploadHeaders {
    let mut headers = BTreeMap::new();
    headers.insert("content-type", CONTENT_TYPE_ZIP.to_string());
    headers.insert(CHECKSUM_HEADER, checksum.to_string());
    let kms_key_arn = kms_key_arn.trim();
    if !kms_key_arn.is_empty() {
        headers.insert(SSE_HEADER, SSE_KMS_VALUE.to_string());
        headers.insert(SSE_KMS_KEY_HEADER, kms_key_arn.to_string());
    }
    UploadHeaders(headers)
}

/// Base64-encoded SHA-256 digest, the form the checksum header expects.
pub fn sha256_base64(bytes: &[u8]) -> String {
    STANDARD.encode(Sha256::digest(bytes))
}

#[cfg(test)]
#[path = "headers_tests.rs"]
mod tests;
