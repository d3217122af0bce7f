//! Key dump for rebuilding the mask table.
//!
//! Given a save whose plaintext is known to be all `0xFF`, every raw byte
//! XOR `0xFF` is that address's mask byte. The output uses the mask table
//! format so it can be loaded back directly.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::layout::dump::REFERENCE_BYTE;

/// One `"<addr>\t<key>"` line per byte of `raw`
pub fn key_dump_lines(raw: &[u8]) -> impl Iterator<Item = String> + '_ {
    raw.iter()
        .enumerate()
        .map(|(i, b)| format!("{:04X}\t{:02X}", i, b ^ REFERENCE_BYTE))
}

pub fn write_key_dump<W: Write>(raw: &[u8], mut out: W) -> io::Result<()> {
    for line in key_dump_lines(raw) {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Save a key dump to `path`, overwriting it
pub fn save_key_dump<P: AsRef<Path>>(raw: &[u8], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_key_dump(raw, BufWriter::new(file))?;
    info!("Dumped {} keys to {}", raw.len(), path.display());
    Ok(())
}
