//! Delete-slot command implementation.

use anyhow::Result;
use dq5save_core::EditorConfig;
use std::path::Path;

use super::{WriteOptions, diff_status, open_session, write_back};

/// Run the delete-slot command
pub fn run(config: &EditorConfig, save: &Path, slot: usize, options: &WriteOptions) -> Result<()> {
    let mut session = open_session(config, save)?;
    let (item, count) = session.bag_slot(slot)?;
    let name = session.text(dq5save_core::layout::bag::type_address(slot))?;

    session.delete_bag_slot(slot)?;
    println!("Deleted slot {} ({} {} x{})", slot, item, name, count);
    println!("{}", diff_status(&session));
    write_back(&mut session, config, save, options)
}
