// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive builder.
//!
//! Packages a project tree and its prepared dependency cache into one zip:
//!
//! ```text
//! manifest.json
//! sources/<project relative paths>
//! dependencies/<cache relative paths>
//! ```
//!
//! Entries are written in sorted order with a fixed modification time, so
//! identical inputs produce identical bytes. The archive is written to a
//! `.partial` file and renamed into place only once complete.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Extensions of checksum sidecar files dropped from the dependency tree
pub const HASH_SIDECAR_EXTENSIONS: &[&str] = &["sha1", "sha256", "sha512", "md5"];

/// Directory names never archived from the project tree
const SKIPPED_SOURCE_DIRS: &[&str] = &[".git"];

pub const SOURCES_ROOT: &str = "sources/";
pub const DEPENDENCIES_ROOT: &str = "dependencies/";
pub const MANIFEST_NAME: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("project directory not found: {}", .0.display())]
    MissingProject(PathBuf),
    #[error("dependency directory not found: {}", .0.display())]
    MissingDependencies(PathBuf),
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to encode manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl ArchiveError {
    fn io(path: &Path, source: io::Error) -> Self {
        ArchiveError::Io { path: path.to_path_buf(), source }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    version: &'static str,
    sources_root: &'static str,
    dependencies_root: &'static str,
}

const MANIFEST: Manifest =
    Manifest { version: "1.0", sources_root: SOURCES_ROOT, dependencies_root: DEPENDENCIES_ROOT };

/// True when the file name carries a checksum sidecar extension.
pub fn is_hash_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HASH_SIDECAR_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
}

fn is_skipped_source(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|n| SKIPPED_SOURCE_DIRS.contains(&n))
}

/// Builds upload archives under a work directory.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    work_dir: PathBuf,
}

impl ArchiveBuilder {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self { work_dir: work_dir.into() }
    }

    /// Deterministic output location for `output_name`.
    pub fn output_path(&self, output_name: &str) -> PathBuf {
        self.work_dir.join(format!("{output_name}.zip"))
    }

    /// Build the archive, returning its path.
    ///
    /// On error no file is left at the output path.
    pub fn build(
        &self,
        project_root: &Path,
        dependencies: &Path,
        output_name: &str,
    ) -> Result<PathBuf, ArchiveError> {
        if !project_root.is_dir() {
            return Err(ArchiveError::MissingProject(project_root.to_path_buf()));
        }
        if !dependencies.is_dir() {
            return Err(ArchiveError::MissingDependencies(dependencies.to_path_buf()));
        }
        fs::create_dir_all(&self.work_dir).map_err(|e| ArchiveError::io(&self.work_dir, e))?;

        let output = self.output_path(output_name);
        let partial = output.with_extension("zip.partial");
        let excluded = [output.clone(), partial.clone()];

        let written = write_archive(&partial, project_root, dependencies, &excluded)
            .and_then(|()| fs::rename(&partial, &output).map_err(|e| ArchiveError::io(&output, e)));
        if let Err(e) = written {
            let _ = fs::remove_file(&partial);
            return Err(e);
        }
        tracing::info!(path = %output.display(), "archive built");
        Ok(output)
    }
}

fn write_archive(
    partial: &Path,
    project_root: &Path,
    dependencies: &Path,
    excluded: &[PathBuf],
) -> Result<(), ArchiveError> {
    let sources = collect_files(project_root, &|path| {
        !excluded.iter().any(|x| x == path) && !is_skipped_source(path)
    })?;
    let deps = collect_files(dependencies, &|path| !path.is_file() || !is_hash_sidecar(path))?;

    let file = File::create(partial).map_err(|e| ArchiveError::io(partial, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    zip.start_file(MANIFEST_NAME, options)?;
    serde_json::to_writer(&mut zip, &MANIFEST)?;

    for (root, prefix, files) in
        [(project_root, SOURCES_ROOT, sources), (dependencies, DEPENDENCIES_ROOT, deps)]
    {
        for path in files {
            let name = entry_name(prefix, root, &path);
            zip.start_file(name, options)?;
            let mut input = File::open(&path).map_err(|e| ArchiveError::io(&path, e))?;
            io::copy(&mut input, &mut zip).map_err(|e| ArchiveError::io(&path, e))?;
        }
    }

    let mut out = zip.finish()?;
    io::Write::flush(&mut out).map_err(|e| ArchiveError::io(partial, e))?;
    Ok(())
}

/// Regular files under `root` accepted by `keep`, sorted by path.
///
/// Symlinks are never followed or archived.
fn collect_files(root: &Path, keep: &dyn Fn(&Path) -> bool) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(|e| ArchiveError::io(&dir, e))? {
            let entry = entry.map_err(|e| ArchiveError::io(&dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ArchiveError::io(&path, e))?;
            if file_type.is_symlink() {
                tracing::debug!(path = %path.display(), "skipping symlink");
                continue;
            }
            if !keep(&path) {
                continue;
            }
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Zip entry name: prefix plus `/`-joined relative components.
fn entry_name(prefix: &str, root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<_> = relative.components().map(|c| c.as_os_str().to_string_lossy()).collect();
    format!("{prefix}{}", parts.join("/"))
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
