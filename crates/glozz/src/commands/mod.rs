//! Command implementations for the glozz CLI
//!
//! Each command module handles the CLI interface and delegates to
//! glozz-core for the actual transformation. The helpers here cover the
//! file handling every command shares.

pub mod check;
pub mod cut;
pub mod hashcode;
pub mod normalise;
pub mod rename;
pub mod shift;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use glozz_core::{Document, GlozzError, Validator, read_document_with_file_id, write_document};
use glozz_source_map::SourceContext;
use tracing::{info, warn};

/// Read an annotation file, pointing structural errors at `path:line:col`.
pub fn read_input(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut sources = SourceContext::new();
    let file_id = sources.add_file(path.display().to_string(), Some(content));
    let content = sources
        .get_file(file_id)
        .and_then(|file| file.content.as_deref())
        .unwrap_or_default();

    read_document_with_file_id(content, file_id).map_err(|err| locate(&sources, err))
}

fn locate(sources: &SourceContext, err: GlozzError) -> anyhow::Error {
    match err.location() {
        Some(location) => anyhow!("{}: {}", sources.describe(location), err),
        None => anyhow::Error::new(err),
    }
}

pub fn write_output(document: &Document, path: &Path) -> Result<()> {
    let xml = write_document(document)?;
    fs::write(path, xml).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Log every problem `validator` finds. Returns whether the document passed.
pub fn report_problems(validator: &impl Validator, document: &Document, path: &Path) -> bool {
    match validator.validate(document) {
        Ok(()) => true,
        Err(report) => {
            for problem in &report.problems {
                warn!("{}: {}", path.display(), problem);
            }
            false
        }
    }
}
