//! Dump-keys command implementation.
//!
//! Run against a save where every field was set to 0xFF in game; the output
//! is a mask table usable as `keys` in the config.

use anyhow::{Context, Result};
use dq5save_core::{dump, storage};
use std::path::Path;

/// Run the dump-keys command
pub fn run(save: &Path, output: &Path) -> Result<()> {
    let raw = storage::read_save(save)
        .with_context(|| format!("Failed to read {}", save.display()))?;
    dump::save_key_dump(&raw, output)?;
    println!("Dump saved to: {}", output.display());
    Ok(())
}
