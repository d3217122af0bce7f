//! Field descriptors.
//!
//! A [`Field`] is the decoded, editable view of one region of the save blob.
//! The blob itself is only touched at load and commit time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::codec;
use crate::error::{Error, Result};
use crate::tables::MaskTable;

/// What a field holds, resolved once when the schema is built
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    Plain,
    CurrencyByte,
    InventoryType,
    InventoryCount,
    RosterStat,
    RosterNameFragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    address: usize,
    mask: Vec<u8>,
    baseline: u32,
    current: u32,
    kind: FieldKind,
}

impl Field {
    /// Create an unmasked field with zero values
    pub fn new(address: usize, width: usize, kind: FieldKind) -> Result<Self> {
        codec::validate_width(width)?;
        Ok(Self {
            address,
            mask: vec![0; width],
            baseline: 0,
            current: 0,
            kind,
        })
    }

    /// Decode a field from the blob, taking its mask from `masks`.
    ///
    /// Both baseline and current start at the decoded value.
    pub fn load(
        raw: &[u8],
        address: usize,
        width: usize,
        kind: FieldKind,
        masks: &MaskTable,
    ) -> Result<Self> {
        codec::validate_width(width)?;
        let mask = masks.mask_for(address, width);
        let value = codec::decode(raw, address, &mask)?;
        Ok(Self {
            address,
            mask,
            baseline: value,
            current: value,
            kind,
        })
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn width(&self) -> usize {
        self.mask.len()
    }

    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    pub fn baseline(&self) -> u32 {
        self.baseline
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn max_value(&self) -> u32 {
        codec::max_value(self.width())
    }

    /// Change the width, re-allocating an unmasked mask.
    ///
    /// Values are truncated to the new width.
    pub fn resize(&mut self, width: usize) -> Result<()> {
        codec::validate_width(width)?;
        self.mask = vec![0; width];
        let max = self.max_value();
        self.baseline &= max;
        self.current &= max;
        Ok(())
    }

    /// Replace the current value, returning the previous one.
    ///
    /// This does not touch any diff bookkeeping; callers that own a
    /// [`DiffTracker`](crate::DiffTracker) must report the change.
    pub fn set_current(&mut self, value: u32) -> Result<u32> {
        if value > self.max_value() {
            return Err(Error::ValueOutOfRange {
                value: u64::from(value),
                width: self.width(),
            });
        }
        Ok(std::mem::replace(&mut self.current, value))
    }

    /// Restore the baseline, returning the previous current value
    pub fn reset(&mut self) -> u32 {
        std::mem::replace(&mut self.current, self.baseline)
    }

    /// Make the current value the new baseline
    pub fn mark_baseline(&mut self) {
        self.baseline = self.current;
    }

    /// Per-byte delta between current and baseline, byte 0 first
    pub fn byte_deltas(&self) -> Vec<i32> {
        (0..self.width())
            .map(|n| {
                i32::from(codec::byte_at(self.current, n))
                    - i32::from(codec::byte_at(self.baseline, n))
            })
            .collect()
    }

    /// Sum of [`byte_deltas`](Self::byte_deltas)
    pub fn delta(&self) -> i64 {
        self.byte_deltas().iter().map(|&d| i64::from(d)).sum()
    }

    pub fn is_modified(&self) -> bool {
        self.current != self.baseline
    }

    /// Encode the current value into `raw` at this field's address
    pub fn encode_into(&self, raw: &mut [u8]) -> Result<()> {
        codec::write(raw, self.address, &self.mask, self.current)
    }
}
