// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Projects eligible for transformation and the language versions they move between.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// A directory eligible for transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProject {
    pub name: String,
    pub path: PathBuf,
}

impl CandidateProject {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

/// Java language versions the service can upgrade between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JavaVersion {
    #[serde(rename = "JAVA_8")]
    Java8,
    #[serde(rename = "JAVA_11")]
    Java11,
    #[serde(rename = "JAVA_17")]
    Java17,
}

impl JavaVersion {
    /// Identifier used on the wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            JavaVersion::Java8 => "JAVA_8",
            JavaVersion::Java11 => "JAVA_11",
            JavaVersion::Java17 => "JAVA_17",
        }
    }
}

crate::simple_display! {
    JavaVersion {
        Java8 => "JDK8",
        Java11 => "JDK11",
        Java17 => "JDK17",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported java version '{0}' (expected 8, 11 or 17)")]
pub struct UnknownJavaVersion(pub String);

impl FromStr for JavaVersion {
    type Err = UnknownJavaVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let digits = normalized
            .trim_start_matches("JAVA_")
            .trim_start_matches("JDK")
            .trim_start_matches("1.");
        match digits {
            "8" => Ok(JavaVersion::Java8),
            "11" => Ok(JavaVersion::Java11),
            "17" => Ok(JavaVersion::Java17),
            _ => Err(UnknownJavaVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
