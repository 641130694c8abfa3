// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency cache collaborator.
//!
//! Produces a run-owned folder holding the project's resolved dependencies.
//! The folder is deleted when released (or dropped).

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use xform_core::CandidateProject;

#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("dependency cache not found: {}", .0.display())]
    CacheMissing(PathBuf),
    #[error("failed to copy dependencies: {0}")]
    Io(#[from] io::Error),
    #[error("dependency preparation failed: {0}")]
    Failed(String),
}

/// Temporary folder of prepared dependencies owned by one run.
#[derive(Debug)]
pub struct DependencyFolder {
    dir: TempDir,
}

impl DependencyFolder {
    pub fn new(dir: TempDir) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the folder and its contents.
    pub fn release(self) -> io::Result<()> {
        self.dir.close()
    }
}

#[async_trait]
pub trait DependencyPreparer: Clone + Send + Sync + 'static {
    async fn prepare(&self, project: &CandidateProject) -> Result<DependencyFolder, DependencyError>;
}

/// Copies an existing local dependency cache into a fresh temp folder.
#[derive(Debug, Clone)]
pub struct CopyCachePreparer {
    cache_root: PathBuf,
}

impl CopyCachePreparer {
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self { cache_root: cache_root.into() }
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }
}

#[async_trait]
impl DependencyPreparer for CopyCachePreparer {
    async fn prepare(&self, project: &CandidateProject) -> Result<DependencyFolder, DependencyError> {
        let cache_root = self.cache_root.clone();
        if !cache_root.is_dir() {
            return Err(DependencyError::CacheMissing(cache_root));
        }
        let project_name = project.name.clone();
        let folder = tokio::task::spawn_blocking(move || -> Result<DependencyFolder, DependencyError> {
            let dir = tempfile::Builder::new().prefix("xform-deps-").tempdir()?;
            let copied = copy_tree(&cache_root, dir.path())?;
            tracing::info!(project = %project_name, files = copied, "prepared dependency folder");
            Ok(DependencyFolder::new(dir))
        })
        .await
        .map_err(|e| DependencyError::Failed(e.to_string()))??;
        Ok(folder)
    }
}

/// Recursively copy `from` into `to`, returning the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> io::Result<usize> {
    let mut copied = 0;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            std::fs::create_dir_all(&target)?;
            copied += copy_tree(&entry.path(), &target)?;
        } else if file_type.is_file() {
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{DependencyError, DependencyFolder, DependencyPreparer};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::Arc;
    use xform_core::CandidateProject;

    #[derive(Default)]
    struct FakeDependencyState {
        files: Vec<(String, Vec<u8>)>,
        fail: Option<String>,
        prepared: Vec<PathBuf>,
    }

    /// Fake preparer writing a fixed set of files into a temp folder
    #[derive(Clone, Default)]
    pub struct FakeDependencyPreparer {
        inner: Arc<Mutex<FakeDependencyState>>,
    }

    impl FakeDependencyPreparer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, relative: &str, contents: &[u8]) -> Self {
            self.inner.lock().files.push((relative.to_string(), contents.to_vec()));
            self
        }

        pub fn failing(message: &str) -> Self {
            let fake = Self::default();
            fake.inner.lock().fail = Some(message.to_string());
            fake
        }

        /// Paths of every folder handed out so far.
        pub fn prepared(&self) -> Vec<PathBuf> {
            self.inner.lock().prepared.clone()
        }
    }

    #[async_trait]
    impl DependencyPreparer for FakeDependencyPreparer {
        async fn prepare(
            &self,
            _project: &CandidateProject,
        ) -> Result<DependencyFolder, DependencyError> {
            let (files, fail) = {
                let inner = self.inner.lock();
                (inner.files.clone(), inner.fail.clone())
            };
            if let Some(message) = fail {
                return Err(DependencyError::Failed(message));
            }
            let dir = tempfile::tempdir()?;
            for (relative, contents) in files {
                let path = dir.path().join(relative);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, contents)?;
            }
            self.inner.lock().prepared.push(dir.path().to_path_buf());
            Ok(DependencyFolder::new(dir))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDependencyPreparer;

#[cfg(test)]
#[path = "dependencies_tests.rs"]
mod tests;
