//! Scan command implementation.
//!
//! Decodes every window of a raw region at a fixed width. Typical use is to
//! scan the same region before and after an in-game change and compare the
//! output to locate an unknown field.

use anyhow::Result;
use dq5save_core::{EditorConfig, ScanRow};
use std::path::Path;

use super::open_session;

/// Run the scan command
pub fn run(
    config: &EditorConfig,
    save: &Path,
    from: usize,
    to: usize,
    width: usize,
    (lower, upper): (u32, Option<u32>),
    json: bool,
) -> Result<()> {
    let session = open_session(config, save)?;
    let region = session.region(from, to, width)?;
    let mut table = region.collect_table()?;
    let visible = table.filter(lower, upper);
    let rows = table.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", format_header(region.start(), region.end(), width, visible, table.len()));
    println!();
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_header(from: usize, end: Option<usize>, width: usize, shown: usize, total: usize) -> String {
    match end {
        Some(to) => format!(
            "Scan 0x{:04X}..=0x{:04X} width {}: {} of {} shown",
            from, to, width, shown, total
        ),
        None => format!("Scan 0x{:04X} width {}: empty save", from, width),
    }
}

fn format_row(row: &ScanRow) -> String {
    let mut line = format!("{}  {:>10}  {}", row.address, row.value, row.hex);
    if let Some(label) = &row.annotation {
        line.push_str("  ");
        line.push_str(label);
    }
    line
}
