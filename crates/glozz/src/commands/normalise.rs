//! Normalise command implementation.
//!
//! Each input is normalised on its own: a failure is logged and the
//! remaining files are still processed. The command fails at the end if
//! any file did. Outputs are named after their input, so inputs sharing a
//! file name all fail rather than overwrite one another.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use glozz_core::{NormalizeMode, normalize};
use tracing::{error, info};

use super::{read_input, write_output};

/// `--mode` values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Consecutive numbers from --start, in order of first appearance
    Count,
    /// Every date becomes 0
    Zero,
    /// Keep non-negative dates, renumber negative ones from -START
    Negonly,
}

impl From<Mode> for NormalizeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Count => NormalizeMode::Count,
            Mode::Zero => NormalizeMode::Zero,
            Mode::Negonly => NormalizeMode::NegOnly,
        }
    }
}

/// Arguments for the normalise command
#[derive(Debug)]
pub struct NormaliseArgs {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub mode: Mode,
    pub start: i64,
}

/// Execute the normalise command
pub fn execute(args: NormaliseArgs) -> Result<()> {
    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let mode = NormalizeMode::from(args.mode);
    let mut failed = Vec::new();

    let mut claims: HashMap<&OsStr, usize> = HashMap::new();
    for name in args.inputs.iter().filter_map(|input| input.file_name()) {
        *claims.entry(name).or_default() += 1;
    }

    for input in &args.inputs {
        if let Some(name) = input.file_name()
            && claims.get(name).is_some_and(|&count| count > 1)
        {
            error!(
                "{}: another input would also be written to {}",
                input.display(),
                args.output_dir.join(name).display()
            );
            failed.push(input.display().to_string());
            continue;
        }
        if let Err(err) = normalise_file(input, &args.output_dir, mode, args.start) {
            error!("{}: {:#}", input.display(), err);
            failed.push(input.display().to_string());
        }
    }

    if !failed.is_empty() {
        bail!(
            "Failed to normalise {} of {} file(s): {}",
            failed.len(),
            args.inputs.len(),
            failed.join(", ")
        );
    }
    info!("Normalised {} file(s) ({} mode)", args.inputs.len(), mode);
    Ok(())
}

fn normalise_file(input: &Path, output_dir: &Path, mode: NormalizeMode, start: i64) -> Result<()> {
    let name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?;

    let document = read_input(input)?;
    let normalised = normalize(&document, mode, start)?;
    write_output(&normalised, &output_dir.join(name))
}
