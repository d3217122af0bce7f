//! Editing session.
//!
//! A [`Session`] owns everything about one loaded save: the raw blob, one
//! [`Field`] per schema entry, the lookup tables and the aggregate diff.
//! Fields are decoded from the blob once at load; the blob is only rebuilt
//! from the fields at commit time.
//!
//! Every mutation goes through the session so the aggregate stays in step
//! with the fields:
//!
//! ```ignore
//! let mut session = Session::new(config.load_tables()?);
//! session.open("data.sav")?;
//! session.set_value(0x0014, 0x10)?;
//! session.adjust(0x0015)?;
//! if session.check_zero() {
//!     session.commit("data.sav", true)?;
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adjust;
use crate::codec;
use crate::diff::{DiffTracker, byte_delta};
use crate::error::{Error, Result};
use crate::field::{Field, FieldKind};
use crate::layout::{bag, party};
use crate::scan::{RegionScan, ScanTable};
use crate::schema::{Schema, SchemaEntry, Section};
use crate::storage;
use crate::tables::Tables;
use crate::text;

/// Notification sent to subscribers after every tracked mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub address: usize,
    pub old: u32,
    pub new: u32,
    /// Byte-wise delta of this change
    pub delta: i64,
    /// Aggregate diff after the change
    pub aggregate: i64,
}

pub type Observer = Box<dyn FnMut(&FieldChange)>;

/// Outcome of the pre-save diff check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveCheck {
    /// The recomputed sum disagrees with the tracked aggregate
    Inconsistent { computed: i64, tracked: i64 },
    /// The save would fail the game's checksum
    NonZero(i64),
    Clean,
}

impl SaveCheck {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Confirmation message shown before overwriting
    pub fn message(&self) -> String {
        match self {
            Self::Inconsistent { computed, tracked } => format!(
                "The diff may be wrong (computed {:+}, tracked {:+}). Overwrite anyway?",
                computed, tracked
            ),
            Self::NonZero(diff) => format!("The diff is {:+}, not 0. Overwrite anyway?", diff),
            Self::Clean => "Overwrite the save.".to_string(),
        }
    }
}

/// Serializable view of one schema field
#[derive(Debug, Clone, Serialize)]
pub struct FieldRow {
    pub address: String,
    pub width: usize,
    pub label: String,
    pub kind: FieldKind,
    pub baseline: u32,
    pub current: u32,
    pub delta: i64,
    pub text: String,
}

pub struct Session {
    schema: Schema,
    tables: Tables,
    blob: Vec<u8>,
    /// One field per schema entry, same order
    fields: Vec<Field>,
    tracker: DiffTracker,
    observers: Vec<Observer>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("blob_len", &self.blob.len())
            .field("fields", &self.fields.len())
            .field("aggregate", &self.tracker.aggregate())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Create an empty session over the standard layout
    pub fn new(tables: Tables) -> Self {
        Self::with_schema(Schema::standard(), tables)
    }

    pub fn with_schema(schema: Schema, tables: Tables) -> Self {
        Self {
            schema,
            tables,
            blob: Vec::new(),
            fields: Vec::new(),
            tracker: DiffTracker::new(),
            observers: Vec::new(),
        }
    }

    /// Read a save from disk and load it
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let blob = storage::read_save(path)?;
        self.load_bytes(blob)
    }

    /// Replace the loaded save with `blob`.
    ///
    /// On error the previous save stays loaded.
    pub fn load_bytes(&mut self, blob: Vec<u8>) -> Result<()> {
        let fields = self
            .schema
            .entries()
            .iter()
            .map(|e| Field::load(&blob, e.address, e.width, e.kind, &self.tables.masks))
            .collect::<Result<Vec<_>>>()?;

        info!("Loaded save: {} bytes, {} fields", blob.len(), fields.len());
        self.blob = blob;
        self.fields = fields;
        self.tracker.reset();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, address: usize) -> Option<&Field> {
        self.index_of(address).ok().map(|i| &self.fields[i])
    }

    /// Schema entries paired with their fields
    pub fn entries(&self) -> impl Iterator<Item = (&SchemaEntry, &Field)> {
        self.schema.entries().iter().zip(&self.fields)
    }

    pub fn aggregate(&self) -> i64 {
        self.tracker.aggregate()
    }

    pub fn check_zero(&self) -> bool {
        self.tracker.check_zero()
    }

    /// Register a callback invoked after every tracked change
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&FieldChange) + 'static,
    {
        self.observers.push(Box::new(callback));
    }

    fn index_of(&self, address: usize) -> Result<usize> {
        self.schema
            .index_of(address)
            .filter(|&i| i < self.fields.len())
            .ok_or(Error::UnknownField(address))
    }

    fn notify(&mut self, change: FieldChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    /// The single write path for schema fields
    fn write(&mut self, index: usize, value: u32) -> Result<i64> {
        let field = &mut self.fields[index];
        let old = field.set_current(value)?;
        let delta = self.tracker.on_value_changed(field, old, value);
        let change = FieldChange {
            address: field.address(),
            old,
            new: value,
            delta,
            aggregate: self.tracker.aggregate(),
        };
        self.notify(change);
        Ok(delta)
    }

    /// Set the value of the field at `address`, returning the byte delta
    pub fn set_value(&mut self, address: usize, value: u32) -> Result<i64> {
        let index = self.index_of(address)?;
        let delta = self.write(index, value)?;
        debug!(
            "Set {:#06x} = {:#x} (delta {:+}, aggregate {:+})",
            address,
            value,
            delta,
            self.aggregate()
        );
        Ok(delta)
    }

    /// Restore one field to its baseline
    pub fn reset_field(&mut self, address: usize) -> Result<()> {
        let index = self.index_of(address)?;
        let baseline = self.fields[index].baseline();
        self.write(index, baseline)?;
        Ok(())
    }

    /// Discard every edit and zero the aggregate
    pub fn reset_all(&mut self) {
        let mut changes = Vec::new();
        for field in &mut self.fields {
            let old = field.reset();
            if old != field.baseline() {
                changes.push((field.address(), old, field.baseline(), field.width()));
            }
        }
        self.tracker.reset();

        for (address, old, new, width) in changes {
            self.notify(FieldChange {
                address,
                old,
                new,
                delta: byte_delta(old, new, width),
                aggregate: 0,
            });
        }
        info!("Discarded all edits");
    }

    /// Nudge the field at `address` so the aggregate moves toward zero.
    ///
    /// Returns the aggregate afterwards, which is not guaranteed to be zero.
    pub fn adjust(&mut self, address: usize) -> Result<i64> {
        let index = self.index_of(address)?;
        let field = &self.fields[index];
        let steps = adjust::plan(field.current(), field.width(), self.aggregate());
        for value in steps {
            self.write(index, value)?;
        }
        debug!("Adjusted {:#06x}, aggregate {:+}", address, self.aggregate());
        Ok(self.aggregate())
    }

    /// Gold, combined from the individual money bytes
    pub fn money(&self) -> u32 {
        self.entries()
            .filter(|(e, _)| e.kind == FieldKind::CurrencyByte)
            .fold(0u32, |acc, (e, f)| {
                acc | (f.current() << (8 * e.index.min(codec::MAX_WIDTH - 1)))
            })
    }

    /// Display text for the field at `address`
    pub fn text(&self, address: usize) -> Result<String> {
        let index = self.index_of(address)?;
        Ok(text::field_text(
            &self.schema.entries()[index],
            self.fields[index].current(),
            &self.tables,
        ))
    }

    /// `(type, count)` of a bag slot
    pub fn bag_slot(&self, slot: usize) -> Result<(u32, u32)> {
        if slot >= bag::SLOTS {
            return Err(Error::SlotOutOfRange(slot));
        }
        let item = self.index_of(bag::type_address(slot))?;
        let count = self.index_of(bag::count_address(slot))?;
        Ok((self.fields[item].current(), self.fields[count].current()))
    }

    pub fn set_bag_slot(&mut self, slot: usize, item: u32, count: u32) -> Result<()> {
        if slot >= bag::SLOTS {
            return Err(Error::SlotOutOfRange(slot));
        }
        let item_index = self.index_of(bag::type_address(slot))?;
        let count_index = self.index_of(bag::count_address(slot))?;
        self.write(item_index, item)?;
        self.write(count_index, count)?;
        Ok(())
    }

    /// Delete a bag slot, shifting the following slots up.
    ///
    /// Shifting stops at the first empty slot (type 0, count 0). If it runs
    /// to the end of the bag, the last slot is cleared.
    pub fn delete_bag_slot(&mut self, slot: usize) -> Result<()> {
        let last = bag::SLOTS - 1;
        if slot > last {
            return Err(Error::SlotOutOfRange(slot));
        }

        let mut idx = slot;
        while idx < last {
            let (item, count) = self.bag_slot(idx)?;
            if item == 0 && count == 0 {
                break;
            }
            let (next_item, next_count) = self.bag_slot(idx + 1)?;
            self.set_bag_slot(idx, next_item, next_count)?;
            idx += 1;
        }

        if idx == last {
            self.set_bag_slot(last, 0, 0)?;
        }

        debug!("Deleted bag slot {}, aggregate {:+}", slot, self.aggregate());
        Ok(())
    }

    /// Write up to four characters into a member's name fragments.
    ///
    /// Fragments beyond the new name's length keep their current value.
    pub fn rename_member(&mut self, member: usize, name: &str) -> Result<()> {
        if member >= party::MEMBERS {
            return Err(Error::MemberOutOfRange(member));
        }

        let head = party::member_address(member);
        let values = name
            .chars()
            .take(party::NAME.len())
            .map(text::encode_name_char)
            .collect::<Result<Vec<_>>>()?;

        for (offset, value) in party::NAME.iter().zip(values) {
            let index = self.index_of(head + offset)?;
            self.write(index, value)?;
        }
        Ok(())
    }

    /// A member's name decoded from its fragments
    pub fn member_name(&self, member: usize) -> Result<String> {
        if member >= party::MEMBERS {
            return Err(Error::MemberOutOfRange(member));
        }
        let head = party::member_address(member);
        party::NAME
            .iter()
            .map(|offset| self.text(head + offset))
            .collect()
    }

    /// Classify the current edits before a save
    pub fn save_check(&self) -> SaveCheck {
        let computed = DiffTracker::recompute(&self.fields);
        let tracked = self.aggregate();
        if computed != tracked {
            SaveCheck::Inconsistent { computed, tracked }
        } else if computed != 0 {
            SaveCheck::NonZero(computed)
        } else {
            SaveCheck::Clean
        }
    }

    /// Encode every field into a copy of the blob
    pub fn materialize(&self) -> Result<Vec<u8>> {
        if !self.is_loaded() {
            return Err(Error::NotLoaded);
        }
        let mut raw = self.blob.clone();
        for field in &self.fields {
            field.encode_into(&mut raw)?;
        }
        Ok(raw)
    }

    /// Encode and write the save to `path`.
    ///
    /// Either the whole file is replaced or nothing changes. Fails with
    /// [`Error::NotLoaded`] before any save was loaded. Returns the
    /// backup path when `backup` is set and `path` already existed.
    pub fn commit<P: AsRef<Path>>(&mut self, path: P, backup: bool) -> Result<Option<PathBuf>> {
        let path = path.as_ref();
        let raw = self.materialize()?;

        match self.save_check() {
            SaveCheck::Clean => {}
            check => warn!("Saving with unresolved diff: {:?}", check),
        }

        let backup_path = if backup && path.exists() {
            Some(storage::backup(path)?)
        } else {
            None
        };

        storage::write_atomic(path, &raw)?;
        self.blob = raw;
        Ok(backup_path)
    }

    /// Prepare a scan of `[from, to]` over the loaded blob
    pub fn region(&self, from: usize, to: usize, width: usize) -> Result<RegionScan<'_>> {
        RegionScan::new(
            &self.blob,
            &self.tables.masks,
            &self.schema,
            from,
            to,
            width,
        )
    }

    /// Decode `[from, to]` at `width` for analysis
    pub fn scan(&self, from: usize, to: usize, width: usize) -> Result<ScanTable> {
        self.region(from, to, width)?.collect_table()
    }

    /// Serializable rows, optionally limited to one section
    pub fn rows(&self, section: Option<Section>) -> Vec<FieldRow> {
        self.entries()
            .filter(|(e, _)| section.is_none() || e.kind.section() == section)
            .map(|(e, f)| FieldRow {
                address: format!("0x{:04X}", e.address),
                width: e.width,
                label: e.label.clone(),
                kind: e.kind,
                baseline: f.baseline(),
                current: f.current(),
                delta: f.delta(),
                text: text::field_text(e, f.current(), &self.tables),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::money;
    use crate::tables::{LabelTable, MaskTable};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn session_with(blob: Vec<u8>, masks: &str) -> Session {
        let tables = Tables {
            masks: MaskTable::parse(masks),
            items: LabelTable::parse("1\tやくそう\n"),
            ..Tables::default()
        };
        let mut session = Session::new(tables);
        session.load_bytes(blob).unwrap();
        session
    }

    fn blank() -> Session {
        session_with(vec![0; party::END], "")
    }

    fn exp_address(member: usize) -> usize {
        party::member_address(member) + party::EXP
    }

    #[test]
    fn test_load_rejects_short_blob() {
        let mut session = blank();
        session.set_value(money::START, 7).unwrap();

        let min_len = session.schema().min_blob_len();
        assert_eq!(min_len, party::END - 2);
        let err = session.load_bytes(vec![0; min_len - 1]).unwrap_err();
        assert!(err.is_out_of_range());
        // previous save still loaded
        assert_eq!(session.blob().len(), party::END);
        assert_eq!(session.field(money::START).unwrap().current(), 7);
        assert_eq!(session.aggregate(), 7);
    }

    #[test]
    fn test_load_smallest_blob() {
        let mut session = blank();
        let min_len = session.schema().min_blob_len();
        session.load_bytes(vec![0; min_len]).unwrap();
        assert_eq!(session.blob().len(), min_len);
        assert!(session.check_zero());
    }

    #[test]
    fn test_load_decodes_with_masks() {
        let mut blob = vec![0; party::END];
        blob[0x14] = 0x5A ^ 0x10;
        let session = session_with(blob, "0014\t5A\n");
        assert_eq!(session.field(0x14).unwrap().baseline(), 0x10);
        assert_eq!(session.money(), 0x10);
    }

    #[test]
    fn test_four_byte_edit_moves_aggregate() {
        let mut blob = vec![0; party::END];
        blob[exp_address(0)] = 0x10;
        let mut session = session_with(blob, "");

        let delta = session.set_value(exp_address(0), 0x20).unwrap();
        assert_eq!(delta, 16);
        assert_eq!(session.field(exp_address(0)).unwrap().byte_deltas(), vec![16, 0, 0, 0]);
        assert_eq!(session.aggregate(), 16);
    }

    #[test]
    fn test_opposite_edits_return_to_zero() {
        let mut blob = vec![0; party::END];
        blob[money::START] = 0x05;
        blob[money::START + 1] = 0x0A;
        let mut session = session_with(blob, "");

        session.set_value(money::START, 0x06).unwrap();
        session.set_value(money::START + 1, 0x09).unwrap();
        assert_eq!(session.aggregate(), 0);
        assert!(session.check_zero());
        assert_eq!(session.money(), 0x0906);
    }

    #[test]
    fn test_adjust_restores_zero() {
        let mut session = blank();
        let addr = bag::type_address(0);
        session.set_value(addr, 0x0203).unwrap();
        assert_eq!(session.aggregate(), 5);

        let aggregate = session.adjust(addr).unwrap();
        assert_eq!(aggregate, 0);
        assert_eq!(session.field(addr).unwrap().current(), 0);
        assert_eq!(session.save_check(), SaveCheck::Clean);
    }

    #[test]
    fn test_adjust_other_field_negative() {
        let mut blob = vec![0; party::END];
        blob[money::START] = 10;
        let mut session = session_with(blob, "");
        session.set_value(money::START, 4).unwrap();
        assert_eq!(session.aggregate(), -6);

        session.adjust(money::START + 1).unwrap();
        assert_eq!(session.field(money::START + 1).unwrap().current(), 6);
        assert!(session.check_zero());
    }

    #[test]
    fn test_reset_all_restores_baselines() {
        let mut session = blank();
        session.set_value(money::START, 0xFF).unwrap();
        session.set_value(exp_address(3), 0x0102_0304).unwrap();
        session.delete_bag_slot(0).unwrap();
        session.reset_all();

        assert!(session.check_zero());
        assert!(session.fields().iter().all(|f| f.current() == f.baseline()));
    }

    #[test]
    fn test_reset_field_updates_aggregate() {
        let mut session = blank();
        session.set_value(money::START, 3).unwrap();
        session.set_value(money::START + 1, 4).unwrap();
        session.reset_field(money::START).unwrap();
        assert_eq!(session.aggregate(), 4);
    }

    #[test]
    fn test_unknown_field_and_overflow() {
        let mut session = blank();
        assert!(matches!(session.set_value(0x0000, 1), Err(Error::UnknownField(0))));
        assert!(matches!(
            session.set_value(money::START, 0x100),
            Err(Error::ValueOutOfRange { .. })
        ));
        assert!(session.check_zero());
    }

    #[test]
    fn test_delete_bag_slot_compacts() {
        let mut session = blank();
        session.set_bag_slot(0, 1, 2).unwrap();
        session.set_bag_slot(1, 3, 4).unwrap();
        session.set_bag_slot(2, 5, 6).unwrap();

        session.delete_bag_slot(1).unwrap();
        assert_eq!(session.bag_slot(0).unwrap(), (1, 2));
        assert_eq!(session.bag_slot(1).unwrap(), (5, 6));
        assert_eq!(session.bag_slot(2).unwrap(), (0, 0));
        assert_eq!(session.aggregate(), DiffTracker::recompute(session.fields()));
        assert_eq!(session.aggregate(), 1 + 2 + 5 + 6);
    }

    #[test]
    fn test_delete_last_slot_clears_it() {
        let mut session = blank();
        let last = bag::SLOTS - 1;
        session.set_bag_slot(last, 9, 9).unwrap();
        session.delete_bag_slot(last).unwrap();
        assert_eq!(session.bag_slot(last).unwrap(), (0, 0));
        assert!(session.check_zero());
        assert!(matches!(
            session.delete_bag_slot(bag::SLOTS),
            Err(Error::SlotOutOfRange(_))
        ));
    }

    #[test]
    fn test_delete_full_bag_clears_tail() {
        let mut session = blank();
        for slot in 0..bag::SLOTS {
            session.set_bag_slot(slot, 1, 1).unwrap();
        }
        session.delete_bag_slot(0).unwrap();
        assert_eq!(session.bag_slot(0).unwrap(), (1, 1));
        assert_eq!(session.bag_slot(bag::SLOTS - 1).unwrap(), (0, 0));
    }

    #[test]
    fn test_rename_member() {
        let mut session = blank();
        session.rename_member(2, "アベル").unwrap();
        assert_eq!(session.member_name(2).unwrap(), "アベル");
        assert!(!session.check_zero());

        // 4-byte characters are rejected before anything is written
        let before = session.aggregate();
        assert!(session.rename_member(2, "A😀").is_err());
        assert_eq!(session.aggregate(), before);
        assert_eq!(session.member_name(2).unwrap(), "アベル");

        assert!(matches!(
            session.rename_member(party::MEMBERS, "x"),
            Err(Error::MemberOutOfRange(_))
        ));
    }

    #[test]
    fn test_text_for_bag_slot() {
        let mut session = blank();
        assert_eq!(session.text(bag::type_address(0)).unwrap(), text::UNUSED_SLOT);
        session.set_value(bag::type_address(0), 1).unwrap();
        assert_eq!(session.text(bag::type_address(0)).unwrap(), "やくそう");
    }

    #[test]
    fn test_save_check_messages() {
        let mut session = blank();
        assert_eq!(session.save_check(), SaveCheck::Clean);

        session.set_value(money::START, 2).unwrap();
        assert_eq!(session.save_check(), SaveCheck::NonZero(2));

        session.tracker = DiffTracker::with_aggregate(0);
        assert_eq!(
            session.save_check(),
            SaveCheck::Inconsistent {
                computed: 2,
                tracked: 0
            }
        );

        let messages = [
            SaveCheck::Clean.message(),
            SaveCheck::NonZero(2).message(),
            session.save_check().message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
    }

    #[test]
    fn test_observer_receives_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = blank();
        let sink = Rc::clone(&seen);
        session.subscribe(move |change| sink.borrow_mut().push(*change));

        session.set_value(money::START, 3).unwrap();
        session.adjust(money::START).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].aggregate, 3);
        assert_eq!(seen[1].new, 0);
        assert_eq!(seen[1].aggregate, 0);
    }

    #[test]
    fn test_scan_does_not_touch_aggregate() {
        let mut session = blank();
        session.set_value(money::START, 1).unwrap();
        let table = session.scan(0, 0x40, 2).unwrap();
        assert!(!table.is_empty());
        assert_eq!(session.aggregate(), 1);
    }

    #[test]
    fn test_commit_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.sav");
        let mut blob: Vec<u8> = (0..party::END).map(|i| (i * 7) as u8).collect();
        blob.extend([0xEE; 16]);
        std::fs::write(&path, &blob).unwrap();

        let tables = Tables {
            masks: MaskTable::parse("0014\t5A\n0015\tA5\n"),
            ..Tables::default()
        };
        let mut session = Session::new(tables);
        assert!(!session.is_loaded());
        session.open(&path).unwrap();
        assert!(session.is_loaded());

        // unchanged values reproduce the original bytes
        assert_eq!(session.materialize().unwrap(), blob);

        let before = session.field(money::START).unwrap().current();
        session.set_value(money::START, before ^ 1).unwrap();
        let backup = session.commit(&path, true).unwrap();
        assert!(backup.is_some());

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written.len(), blob.len());
        assert_eq!(written[money::START], blob[money::START] ^ 1);
        assert_eq!(written[party::END..], blob[party::END..]);
        assert_eq!(std::fs::read(backup.unwrap()).unwrap(), blob);
    }

    #[test]
    fn test_commit_without_save_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.sav");
        std::fs::write(&path, vec![0xAB; party::END]).unwrap();

        let mut session = Session::new(Tables::default());
        assert!(matches!(session.commit(&path, false), Err(Error::NotLoaded)));
        assert!(matches!(session.materialize(), Err(Error::NotLoaded)));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xAB; party::END]);
    }

    #[test]
    fn test_reset_all_notifies_changed_fields() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = blank();
        session.set_value(money::START, 3).unwrap();
        session.set_value(money::START + 2, 1).unwrap();

        let sink = Rc::clone(&seen);
        session.subscribe(move |change| sink.borrow_mut().push(*change));
        session.reset_all();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!((seen[0].address, seen[0].old, seen[0].new), (money::START, 3, 0));
        assert_eq!(seen[1].delta, -1);
        assert!(seen.iter().all(|c| c.aggregate == 0));
    }

    #[test]
    fn test_commit_failure_leaves_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("data.sav");
        let mut session = blank();
        session.set_value(money::START, 1).unwrap();

        assert!(session.commit(&path, false).is_err());
        assert_eq!(session.blob()[money::START], 0);
        assert_eq!(session.aggregate(), 1);
    }

    #[test]
    fn test_rows_by_section() {
        let session = blank();
        assert_eq!(session.rows(Some(Section::Money)).len(), money::BYTES);
        assert_eq!(session.rows(Some(Section::Bag)).len(), bag::SLOTS * 2);
        assert_eq!(session.rows(None).len(), session.schema().len());
    }
}
