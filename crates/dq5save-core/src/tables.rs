//! External lookup tables.
//!
//! All tables are tab-separated text, one entry per line:
//!
//! - Mask table (`Keys.txt`): `<hex address>\t<hex byte>`
//! - Item and monster tables: `<decimal code>\t<name>`
//!
//! The first entry for a key wins. Malformed lines are logged and skipped.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;

/// Split a table line into its key and value columns
fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.split('\t');
    let key = parts.next().filter(|k| !k.is_empty())?;
    let value = parts.next()?;
    Some((key, value))
}

fn read_table<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    debug!("Read table {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Per-address XOR mask bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskTable {
    keys: HashMap<usize, u8>,
}

impl MaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(content: &str) -> Self {
        let mut table = Self::new();
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((addr, key)) = split_line(line) else {
                warn!("Skipping malformed mask line {}: {:?}", n + 1, line);
                continue;
            };
            match (
                usize::from_str_radix(addr.trim(), 16),
                u8::from_str_radix(key.trim(), 16),
            ) {
                (Ok(addr), Ok(key)) => {
                    table.keys.entry(addr).or_insert(key);
                }
                _ => warn!("Skipping malformed mask line {}: {:?}", n + 1, line),
            }
        }
        table
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::parse(&read_table(path)?))
    }

    /// Insert a key unless the address already has one
    pub fn insert(&mut self, address: usize, key: u8) -> bool {
        if self.keys.contains_key(&address) {
            return false;
        }
        self.keys.insert(address, key);
        true
    }

    /// Mask byte for one address, `0x00` (no masking) when unknown
    pub fn get(&self, address: usize) -> u8 {
        self.keys.get(&address).copied().unwrap_or(0)
    }

    /// Mask bytes for `[address, address + width)`
    pub fn mask_for(&self, address: usize, width: usize) -> Vec<u8> {
        (0..width).map(|i| self.get(address + i)).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Code to display name (items, monsters)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    names: HashMap<u32, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(content: &str) -> Self {
        let mut table = Self::new();
        for (n, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed = split_line(line)
                .and_then(|(code, name)| code.trim().parse::<u32>().ok().map(|c| (c, name)));
            match parsed {
                Some((code, name)) => {
                    table
                        .names
                        .entry(code)
                        .or_insert_with(|| name.to_string());
                }
                None => warn!("Skipping malformed label line {}: {:?}", n + 1, line),
            }
        }
        table
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::parse(&read_table(path)?))
    }

    pub fn get(&self, code: u32) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// All lookup tables used by a session
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub masks: MaskTable,
    pub items: LabelTable,
    pub monsters: LabelTable,
}

impl Tables {
    pub fn new(masks: MaskTable, items: LabelTable, monsters: LabelTable) -> Self {
        Self {
            masks,
            items,
            monsters,
        }
    }
}
