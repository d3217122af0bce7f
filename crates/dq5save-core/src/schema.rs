//! Schema registry.
//!
//! The registry is the ordered list of every known field in the save,
//! built once from the constants in [`crate::layout`]. Order matters: it is
//! the order fields are listed and committed in.

use std::collections::HashMap;

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::field::FieldKind;
use crate::layout::{bag, money, party};

/// Per-member roster values, in address order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr, Display,
)]
pub enum Stat {
    #[strum(serialize = "exp")]
    Exp,
    #[strum(serialize = "current HP")]
    CurHp,
    #[strum(serialize = "max HP")]
    MaxHp,
    #[strum(serialize = "current MP")]
    CurMp,
    #[strum(serialize = "max MP")]
    MaxMp,
    #[strum(serialize = "type?")]
    Type,
    #[strum(serialize = "race?")]
    Race,
    #[strum(serialize = "face?")]
    Face,
    #[strum(serialize = "strength")]
    Strength,
    #[strum(serialize = "defence")]
    Defence,
    #[strum(serialize = "agility")]
    Agility,
    #[strum(serialize = "wisdom")]
    Wisdom,
    #[strum(serialize = "luck")]
    Luck,
    #[strum(serialize = "level")]
    Level,
}

impl Stat {
    /// Offset from the member block start and width in bytes
    pub fn layout(&self) -> (usize, usize) {
        match self {
            Self::Exp => (party::EXP, 4),
            Self::CurHp => (party::CUR_HP, 2),
            Self::MaxHp => (party::MAX_HP, 2),
            Self::CurMp => (party::CUR_MP, 2),
            Self::MaxMp => (party::MAX_MP, 2),
            Self::Type => (party::TYPE, 1),
            Self::Race => (party::RACE, 1),
            Self::Face => (party::FACE, 1),
            Self::Strength => (party::STRENGTH, 1),
            Self::Defence => (party::DEFENCE, 1),
            Self::Agility => (party::AGILITY, 1),
            Self::Wisdom => (party::WISDOM, 1),
            Self::Luck => (party::LUCK, 1),
            Self::Level => (party::LEVEL, 1),
        }
    }

    /// Whether the value is a monster code shown via the monster table
    pub fn is_monster_code(&self) -> bool {
        matches!(self, Self::Type | Self::Face)
    }
}

/// One known field of the save layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    pub address: usize,
    pub width: usize,
    pub label: String,
    pub kind: FieldKind,
    /// Money byte, bag slot or party member index, depending on `kind`
    pub index: usize,
    /// Set for roster stats only
    pub stat: Option<Stat>,
}

impl SchemaEntry {
    fn new(address: usize, width: usize, label: String, kind: FieldKind, index: usize) -> Self {
        Self {
            address,
            width,
            label,
            kind,
            index,
            stat: None,
        }
    }
}

/// Section of the save a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Money,
    Bag,
    Party,
}

impl FieldKind {
    pub fn section(&self) -> Option<Section> {
        match self {
            FieldKind::CurrencyByte => Some(Section::Money),
            FieldKind::InventoryType | FieldKind::InventoryCount => Some(Section::Bag),
            FieldKind::RosterStat | FieldKind::RosterNameFragment => Some(Section::Party),
            FieldKind::Plain => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
    by_address: HashMap<usize, usize>,
}

impl Schema {
    /// Build a registry from entries; the first entry for an address wins lookups
    pub fn from_entries(entries: Vec<SchemaEntry>) -> Self {
        let mut by_address = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_address.entry(entry.address).or_insert(i);
        }
        Self {
            entries,
            by_address,
        }
    }

    /// The full save layout: money, bag slots, then party members
    pub fn standard() -> Self {
        let mut entries = Vec::new();

        for i in 0..money::BYTES {
            entries.push(SchemaEntry::new(
                money::START + i,
                1,
                format!("Money byte {}", i),
                FieldKind::CurrencyByte,
                i,
            ));
        }

        for slot in 0..bag::SLOTS {
            entries.push(SchemaEntry::new(
                bag::type_address(slot),
                bag::TYPE_WIDTH,
                format!("Bag {:03} type", slot + 1),
                FieldKind::InventoryType,
                slot,
            ));
            entries.push(SchemaEntry::new(
                bag::count_address(slot),
                bag::COUNT_WIDTH,
                format!("Bag {:03} count", slot + 1),
                FieldKind::InventoryCount,
                slot,
            ));
        }

        for member in 0..party::MEMBERS {
            let head = party::member_address(member);
            let mut member_entries: Vec<SchemaEntry> = Stat::iter()
                .map(|stat| {
                    let (offset, width) = stat.layout();
                    SchemaEntry {
                        stat: Some(stat),
                        ..SchemaEntry::new(
                            head + offset,
                            width,
                            format!("{:03} {}", member + 1, stat),
                            FieldKind::RosterStat,
                            member,
                        )
                    }
                })
                .collect();

            for (n, offset) in party::NAME.iter().enumerate() {
                member_entries.push(SchemaEntry::new(
                    head + offset,
                    party::NAME_FRAGMENT_WIDTH,
                    format!("{:03} name {}?", member + 1, n + 1),
                    FieldKind::RosterNameFragment,
                    member,
                ));
            }

            member_entries.sort_by_key(|e| e.address);
            entries.extend(member_entries);
        }

        Self::from_entries(entries)
    }

    /// Smallest blob that holds every entry
    pub fn min_blob_len(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.address + e.width)
            .max()
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the entry starting at `address`
    pub fn index_of(&self, address: usize) -> Option<usize> {
        self.by_address.get(&address).copied()
    }

    pub fn get(&self, address: usize) -> Option<&SchemaEntry> {
        self.index_of(address).map(|i| &self.entries[i])
    }

    /// Label of the entry starting at `address`
    pub fn label(&self, address: usize) -> Option<&str> {
        self.get(address).map(|e| e.label.as_str())
    }

    /// Entries belonging to one section
    pub fn section(&self, section: Section) -> impl Iterator<Item = &SchemaEntry> {
        self.entries
            .iter()
            .filter(move |e| e.kind.section() == Some(section))
    }
}
