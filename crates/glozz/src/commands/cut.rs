//! Cut command implementation.
//!
//! Keeps the units inside a window, then drops the relations and schemas
//! that lost a member so the written file stays consistent. Unless
//! `--shift 0` is given the output no longer carries the corpus hashcode,
//! since its spans index a slice of the text rather than the whole.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glozz_core::{ReferenceValidator, Span, cut, default_cut_offset, prune_dangling};
use tracing::{debug, info};

use super::{read_input, report_problems, write_output};

/// Arguments for the cut command
#[derive(Debug)]
pub struct CutArgs {
    pub input: PathBuf,
    pub start: i64,
    pub end: i64,
    pub output: PathBuf,
    /// Explicit shift; `None` re-anchors the window at 1
    pub shift: Option<i64>,
}

/// Execute the cut command
pub fn execute(args: CutArgs) -> Result<()> {
    let document = read_input(&args.input)?;
    let window = Span::checked(args.start, args.end).context("Invalid cut window")?;

    let offset = match args.shift {
        Some(offset) => offset,
        None => default_cut_offset(window)?,
    };
    debug!("Cutting {} to {} (offset {})", args.input.display(), window, offset);

    let sliced = cut(&document, window, Some(offset))?;
    let pruned = prune_dangling(&sliced);
    report_problems(&ReferenceValidator, &pruned, &args.output);

    info!(
        "Kept {} of {} units, {} of {} relations, {} of {} schemas",
        pruned.units.len(),
        document.units.len(),
        pruned.relations.len(),
        document.relations.len(),
        pruned.schemas.len(),
        document.schemas.len()
    );
    write_output(&pruned, &args.output)
}
