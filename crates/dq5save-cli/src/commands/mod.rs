//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command, plus the
//! load and write-back steps the editing commands share.

pub mod delete_slot;
pub mod dump_keys;
pub mod hex_utils;
pub mod hexdump;
pub mod rename;
pub mod scan;
pub mod set;
pub mod show;

use anyhow::{Context, Result};
use dq5save_core::{EditorConfig, SaveCheck, Session};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::prompter::CliPrompter;

/// How an editing command writes its result
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub out: Option<PathBuf>,
    pub assume_yes: bool,
    pub no_backup: bool,
}

impl WriteOptions {
    fn target<'a>(&'a self, save: &'a Path) -> &'a Path {
        self.out.as_deref().unwrap_or(save)
    }
}

/// Load tables from `config` and open `save`
pub fn open_session(config: &EditorConfig, save: &Path) -> Result<Session> {
    let tables = config.load_tables().context("Failed to load tables")?;
    let mut session = Session::new(tables);
    session
        .open(save)
        .with_context(|| format!("Failed to open {}", save.display()))?;
    Ok(session)
}

/// Confirm and commit the session's edits
pub fn write_back(
    session: &mut Session,
    config: &EditorConfig,
    save: &Path,
    options: &WriteOptions,
) -> Result<()> {
    let prompter = CliPrompter::new(options.assume_yes);
    let check = session.save_check();
    match check {
        SaveCheck::Clean => prompter.display_message(&check.message()),
        _ => prompter.display_warning(&check.message()),
    }

    if !prompter.confirm("Write the save?") {
        println!("Not saved.");
        return Ok(());
    }

    let target = options.target(save);
    let backup = config.backup && !options.no_backup;
    if let Some(path) = session.commit(target, backup)? {
        info!("Backup: {}", path.display());
    }
    println!("Saved to {}", target.display());
    Ok(())
}

/// One-line diff status after an edit
pub fn diff_status(session: &Session) -> String {
    format!("Diff: {:+}", session.aggregate())
}
