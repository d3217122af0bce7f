//! # dq5save-core
//!
//! Core library for the DQ5 save editor.
//!
//! This crate provides:
//! - The XOR-masked little-endian field codec
//! - The save layout schema (money, bag, party roster)
//! - Aggregate diff tracking and the zero-diff adjustment heuristic
//! - Region scanning for reverse-engineering unknown fields
//! - Atomic save commit and key dumps

pub mod adjust;
pub mod codec;
pub mod config;
pub mod diff;
pub mod dump;
pub mod error;
pub mod field;
pub mod layout;
pub mod scan;
pub mod schema;
pub mod session;
pub mod storage;
pub mod tables;
pub mod text;

pub use config::{EditorConfig, EditorConfigBuilder};
pub use diff::DiffTracker;
pub use error::{Error, Result};
pub use field::{Field, FieldKind};
pub use scan::{RegionScan, ScanEntry, ScanRow, ScanTable};
pub use schema::{Schema, SchemaEntry, Section, Stat};
pub use session::{FieldChange, FieldRow, SaveCheck, Session};
pub use tables::{LabelTable, MaskTable, Tables};
