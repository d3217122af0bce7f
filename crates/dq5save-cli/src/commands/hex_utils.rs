//! Hex address parsing and formatting utilities.

use anyhow::Result;

/// Parse a hex address string (with or without 0x prefix).
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_hex_address("0x0450").unwrap(), 0x450);
/// assert_eq!(parse_hex_address("0450").unwrap(), 0x450);
/// ```
pub fn parse_hex_address(s: &str) -> Result<usize> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    usize::from_str_radix(s, 16).map_err(|e| anyhow::anyhow!("Invalid hex address: {}", e))
}

/// Parse a field value: decimal, or hex with a 0x prefix
pub fn parse_number(s: &str) -> Result<u32> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid value {:?}: {}", s, e))
}

/// Format an address the way the tables write it
pub fn format_hex_address(addr: usize) -> String {
    format!("0x{:04X}", addr)
}
