//! Hashcode command implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glozz_core::hashcode_reader;

/// Arguments for the hashcode command
#[derive(Debug)]
pub struct HashcodeArgs {
    pub input: PathBuf,
}

/// Execute the hashcode command, printing the code on stdout
pub fn execute(args: HashcodeArgs) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let code = hashcode_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    println!("{}", code);
    Ok(())
}
