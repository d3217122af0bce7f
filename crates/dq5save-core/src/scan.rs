//! Region scanner.
//!
//! Decodes an arbitrary address range at a caller-chosen width, independent
//! of the schema. Used to hunt for undocumented fields: scan a range, edit
//! something in game, scan again and compare.
//!
//! Scanned fields are analysis-only and never contribute to the aggregate diff.

use serde::Serialize;
use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::field::{Field, FieldKind};
use crate::schema::Schema;
use crate::tables::MaskTable;

/// One decoded window of a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub field: Field,
    /// Schema label when the address is a known field
    pub annotation: Option<String>,
    pub visible: bool,
}

impl ScanEntry {
    pub fn address(&self) -> usize {
        self.field.address()
    }

    pub fn value(&self) -> u32 {
        self.field.current()
    }
}

/// A restartable scan over `[from, to]` of a borrowed blob
#[derive(Debug, Clone, Copy)]
pub struct RegionScan<'a> {
    raw: &'a [u8],
    masks: &'a MaskTable,
    schema: &'a Schema,
    from: usize,
    to: Option<usize>,
    width: usize,
}

impl<'a> RegionScan<'a> {
    /// Prepare a scan. `to` is inclusive and clamped to the last blob byte.
    pub fn new(
        raw: &'a [u8],
        masks: &'a MaskTable,
        schema: &'a Schema,
        from: usize,
        to: usize,
        width: usize,
    ) -> Result<Self> {
        codec::validate_width(width)?;
        let to = raw.len().checked_sub(1).map(|last| to.min(last));
        Ok(Self {
            raw,
            masks,
            schema,
            from,
            to,
            width,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> usize {
        self.from
    }

    /// Inclusive end after clamping; `None` for an empty blob
    pub fn end(&self) -> Option<usize> {
        self.to
    }

    /// Start (or restart) iterating over the range
    pub fn iter(&self) -> ScanIter<'a> {
        ScanIter {
            scan: *self,
            pos: Some(self.from),
        }
    }

    /// Decode the whole range, aborting on the first out-of-range window
    pub fn collect_table(&self) -> Result<ScanTable> {
        let entries = self.iter().collect::<Result<Vec<_>>>()?;
        debug!(
            "Scanned {} entries of width {} from {:#06x}",
            entries.len(),
            self.width,
            self.from
        );
        Ok(ScanTable { entries })
    }

    fn decode_at(&self, pos: usize) -> Result<ScanEntry> {
        let field = Field::load(self.raw, pos, self.width, FieldKind::Plain, self.masks)?;
        Ok(ScanEntry {
            field,
            annotation: self.schema.label(pos).map(str::to_string),
            visible: true,
        })
    }
}

pub struct ScanIter<'a> {
    scan: RegionScan<'a>,
    pos: Option<usize>,
}

impl Iterator for ScanIter<'_> {
    type Item = Result<ScanEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.pos?;
        let to = self.scan.to?;
        if pos > to {
            self.pos = None;
            return None;
        }

        let item = self.scan.decode_at(pos);
        self.pos = if item.is_ok() {
            pos.checked_add(self.scan.width)
        } else {
            None
        };
        Some(item)
    }
}

/// Materialized scan result with per-entry visibility
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanTable {
    entries: Vec<ScanEntry>,
}

impl ScanTable {
    pub fn entries(&self) -> &[ScanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Show only entries with `lower <= value <= upper`; `None` means unbounded.
    ///
    /// Values are never modified, so filtering again with the same bounds
    /// gives the same flags.
    pub fn filter(&mut self, lower: u32, upper: Option<u32>) -> usize {
        let upper = upper.unwrap_or(u32::MAX);
        for entry in &mut self.entries {
            let value = entry.value();
            entry.visible = lower <= value && value <= upper;
        }
        self.visible().count()
    }

    pub fn visibility(&self) -> Vec<bool> {
        self.entries.iter().map(|e| e.visible).collect()
    }

    pub fn visible(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    /// Reinitialise every entry's baseline to its current value
    pub fn mark_baseline(&mut self) {
        for entry in &mut self.entries {
            entry.field.mark_baseline();
        }
    }

    /// Serializable view of the visible entries
    pub fn report(&self) -> Vec<ScanRow> {
        self.visible()
            .map(|e| ScanRow {
                address: format!("0x{:04X}", e.address()),
                width: e.field.width(),
                value: e.value(),
                hex: format!("0x{:0width$X}", e.value(), width = e.field.width() * 2),
                annotation: e.annotation.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanRow {
    pub address: String,
    pub width: usize,
    pub value: u32,
    pub hex: String,
    pub annotation: Option<String>,
}
