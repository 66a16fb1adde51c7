//! Shift command implementation.

use std::path::PathBuf;

use anyhow::Result;
use glozz_core::{ReferenceValidator, shift};

use super::{read_input, report_problems, write_output};

/// Arguments for the shift command
#[derive(Debug)]
pub struct ShiftArgs {
    pub input: PathBuf,
    /// Bounds at or past this offset move
    pub threshold: i64,
    pub output: PathBuf,
    pub delta: i64,
}

/// Execute the shift command
pub fn execute(args: ShiftArgs) -> Result<()> {
    let document = read_input(&args.input)?;
    let shifted = shift(&document, args.threshold, args.delta)?;

    // A negative shift can invert units straddling the threshold
    report_problems(&ReferenceValidator, &shifted, &args.output);

    write_output(&shifted, &args.output)
}
