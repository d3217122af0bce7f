//! Show command implementation.
//!
//! Lists decoded fields, optionally limited to one section of the save.

use anyhow::Result;
use dq5save_core::{EditorConfig, FieldRow, Section};
use std::path::Path;

use super::open_session;

/// Run the show command
pub fn run(config: &EditorConfig, save: &Path, section: Option<Section>, json: bool) -> Result<()> {
    let session = open_session(config, save)?;
    let rows = session.rows(section);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if section.is_none() || section == Some(Section::Money) {
        println!("Money: {}", session.money());
    }
    println!();
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &FieldRow) -> String {
    let mut line = format!(
        "{}  {}  {:<18} {:>10}",
        row.address, row.width, row.label, row.current
    );
    if !row.text.is_empty() {
        line.push_str("  ");
        line.push_str(&row.text);
    }
    line
}
