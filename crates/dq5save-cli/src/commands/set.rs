//! Set command implementation.

use anyhow::{Context, Result, anyhow};
use dq5save_core::EditorConfig;
use std::path::Path;

use super::hex_utils::{format_hex_address, parse_hex_address, parse_number};
use super::{WriteOptions, diff_status, open_session, write_back};

/// Parse `<hex address>=<value>`
pub fn parse_assignment(s: &str) -> Result<(usize, u32)> {
    let (address, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected <address>=<value>, got {:?}", s))?;
    Ok((parse_hex_address(address.trim())?, parse_number(value.trim())?))
}

/// Run the set command
pub fn run(
    config: &EditorConfig,
    save: &Path,
    assignments: &[String],
    adjust: Option<usize>,
    options: &WriteOptions,
) -> Result<()> {
    let parsed = assignments
        .iter()
        .map(|s| parse_assignment(s))
        .collect::<Result<Vec<_>>>()?;

    let mut session = open_session(config, save)?;

    for (address, value) in parsed {
        let delta = session
            .set_value(address, value)
            .with_context(|| format!("Failed to set {}", format_hex_address(address)))?;
        println!(
            "{} = {} ({:+})",
            format_hex_address(address),
            value,
            delta
        );
    }

    if let Some(address) = adjust {
        session.adjust(address)?;
        if let Some(field) = session.field(address) {
            println!(
                "Adjusted {} to {}",
                format_hex_address(address),
                field.current()
            );
        }
    }

    println!("{}", diff_status(&session));
    write_back(&mut session, config, save, options)
}
