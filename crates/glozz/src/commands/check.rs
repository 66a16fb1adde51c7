//! Check command implementation.
//!
//! Runs the reference validator over an annotation file and, when given
//! the document's text, checks spans against it along with the recorded
//! hashcode. Problems are logged; any problem makes the command fail.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use glozz_core::{ReferenceValidator, check_hashcode};
use tracing::{error, info};

use super::{read_input, report_problems};

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub input: PathBuf,
    /// The document's text (.ac)
    pub text: Option<PathBuf>,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let mut document = read_input(&args.input)?;
    let mut ok = true;

    if let Some(text_path) = &args.text {
        let bytes = fs::read(text_path)
            .with_context(|| format!("Failed to read {}", text_path.display()))?;
        if let Err(err) = check_hashcode(&document, &bytes) {
            error!("{}: {}", args.input.display(), err);
            ok = false;
        }
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", text_path.display()))?;
        document = document.with_text(text);
    }

    ok &= report_problems(&ReferenceValidator, &document, &args.input);

    if !ok {
        bail!("{} is not consistent", args.input.display());
    }
    info!("{} is consistent", args.input.display());
    Ok(())
}
