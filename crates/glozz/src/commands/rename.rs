//! Rename command implementation.

use std::path::PathBuf;

use anyhow::Result;
use glozz_core::rename;
use tracing::info;

use super::{read_input, write_output};

/// Arguments for the rename command
#[derive(Debug)]
pub struct RenameArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source: String,
    /// New id; `None` picks the next free date for the same author
    pub target: Option<String>,
}

/// Execute the rename command
pub fn execute(args: RenameArgs) -> Result<()> {
    let document = read_input(&args.input)?;
    let renamed = rename(&document, &args.source, args.target.as_deref())?;

    // The only id that differs is the new one
    let old_ids = document.ids();
    if let Some(target) = renamed.ids().into_iter().find(|id| !old_ids.contains(id)) {
        info!("Renamed {} to {}", args.source, target);
    }

    write_output(&renamed, &args.output)
}
