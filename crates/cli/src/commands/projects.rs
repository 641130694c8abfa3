// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `xform projects` - list directories that can be transformed.

use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use xform_engine::discover_projects;

#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Directory to scan, along with its immediate subdirectories
    #[arg(default_value = ".")]
    pub root: PathBuf,
}

pub fn handle(args: ProjectsArgs, format: OutputFormat) -> Result<()> {
    let projects = discover_projects(&args.root);
    match format {
        OutputFormat::Text => print!("{}", output::render_projects(&projects)),
        OutputFormat::Json => output::print_json(&projects)?,
    }
    Ok(())
}
