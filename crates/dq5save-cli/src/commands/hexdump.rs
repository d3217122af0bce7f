//! Hexdump command implementation.
//!
//! Displays save bytes in traditional hexdump format, either as stored or
//! with the mask table removed.
//!
//! # Output Format
//!
//! ```text
//! 0x0450: 48 65 6C 6C 6F 20 57 6F  72 6C 64 00 00 00 00 00  |Hello World.....|
//! ```

use anyhow::{Result, bail};
use dq5save_core::{EditorConfig, MaskTable, storage};
use std::path::Path;

/// Run the hexdump command
pub fn run(
    config: &EditorConfig,
    save: &Path,
    address: usize,
    size: usize,
    decoded: bool,
    ascii: bool,
) -> Result<()> {
    let raw = storage::read_save(save)?;
    if address >= raw.len() {
        bail!("Address 0x{:X} is past the end of the save ({} bytes)", address, raw.len());
    }
    let end = address.saturating_add(size).min(raw.len());

    let bytes = if decoded {
        let tables = config.load_tables()?;
        unmask(&raw[address..end], address, &tables.masks)
    } else {
        raw[address..end].to_vec()
    };

    println!(
        "Hexdump at 0x{:X} ({} bytes{}):",
        address,
        bytes.len(),
        if decoded { ", decoded" } else { "" }
    );
    println!();

    for (i, chunk) in bytes.chunks(16).enumerate() {
        println!("{}", format_line(address + i * 16, chunk, ascii));
    }

    Ok(())
}

fn unmask(bytes: &[u8], address: usize, masks: &MaskTable) -> Vec<u8> {
    bytes
        .iter()
        .enumerate()
        .map(|(i, b)| b ^ masks.get(address + i))
        .collect()
}

fn format_line(offset: usize, chunk: &[u8], ascii: bool) -> String {
    let mut line = format!("0x{:04X}: ", offset);

    // Hex bytes
    for (j, byte) in chunk.iter().enumerate() {
        if j == 8 {
            line.push(' ');
        }
        line.push_str(&format!("{:02X} ", byte));
    }

    // Padding for incomplete lines
    for j in chunk.len()..16 {
        if j == 8 {
            line.push(' ');
        }
        line.push_str("   ");
    }

    if ascii {
        line.push_str(" |");
        for byte in chunk {
            if (0x20..0x7F).contains(byte) {
                line.push(*byte as char);
            } else {
                line.push('.');
            }
        }
        for _ in chunk.len()..16 {
            line.push(' ');
        }
        line.push('|');
    }

    line.trim_end().to_string()
}
