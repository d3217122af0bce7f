//! Rename command implementation.

use anyhow::Result;
use dq5save_core::EditorConfig;
use std::path::Path;
use tracing::warn;

use super::{WriteOptions, diff_status, open_session, write_back};

const MAX_NAME_CHARS: usize = 4;

/// Run the rename command
pub fn run(
    config: &EditorConfig,
    save: &Path,
    member: usize,
    name: &str,
    options: &WriteOptions,
) -> Result<()> {
    if name.chars().count() > MAX_NAME_CHARS {
        warn!("Names hold {} characters, the rest is dropped", MAX_NAME_CHARS);
    }

    let mut session = open_session(config, save)?;
    let before = session.member_name(member)?;
    session.rename_member(member, name)?;

    println!("{} -> {}", before, session.member_name(member)?);
    println!("{}", diff_status(&session));
    write_back(&mut session, config, save, options)
}
