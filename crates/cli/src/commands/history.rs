// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `xform history` - show the last recorded run.

use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use xform_engine::{env, HistoryStore};

pub fn handle(format: OutputFormat) -> Result<()> {
    let dir = env::state_dir().map_err(|e| ExitError::validation(e.to_string()))?;
    let history = HistoryStore::new(dir).load()?;
    match format {
        OutputFormat::Text => print!("{}", output::render_history(&history)),
        OutputFormat::Json => output::print_json(&history.entries())?,
    }
    Ok(())
}
