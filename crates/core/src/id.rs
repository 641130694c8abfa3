// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes for server-assigned handles.

/// Returns a string slice truncated to at most `n` characters.
pub fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Define an opaque newtype ID wrapper around `SmolStr`.
///
/// The transformation service assigns these values; the client never
/// generates or parses them. An empty ID stands for "not assigned yet".
///
/// Generates `new()`, `as_str()`, `is_empty()`, `short()`, `Display`,
/// `From<String>`, `From<&str>`, `PartialEq<str>`, `PartialEq<&str>`,
/// `AsRef<str>` and `Default` (the empty ID).
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct JobId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub fn new(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the service has not assigned this ID.
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Returns the ID truncated to at most `n` characters, for log lines.
            pub fn short(&self, n: usize) -> &str {
                $crate::id::short(&self.0, n)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id! {
    /// Identifier of a remote transformation job.
    ///
    /// Assigned only after the start call succeeds; empty before that.
    pub struct JobId;
}

define_id! {
    /// Identifier of an uploaded archive, returned by the upload destination request.
    pub struct UploadId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
