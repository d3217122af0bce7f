//! Save file storage.
//!
//! Saves are read and written wholesale. Writes go to a temporary file in the
//! destination directory which is then renamed over the target, so a failed
//! write never leaves a half-written save behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::Result;

pub fn read_save<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Replace `path` with `data` atomically
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Path of a timestamped backup next to `path`
pub fn backup_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}.bak", name, now.format("%Y%m%d-%H%M%S")))
}

/// Copy `path` to a timestamped backup, returning the backup path
pub fn backup<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let target = backup_path(path, Local::now());
    fs::copy(path, &target)?;
    info!("Backed up {} to {}", path.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.sav");
        fs::write(&path, [1, 2, 3]).unwrap();

        write_atomic(&path, &[9, 8]).unwrap();
        assert_eq!(read_save(&path).unwrap(), vec![9, 8]);
    }

    #[test]
    fn test_write_atomic_missing_dir_leaves_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("data.sav");
        assert!(write_atomic(&path, &[1]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_backup_path_format() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let path = backup_path(Path::new("/saves/data.sav"), now);
        assert_eq!(path, PathBuf::from("/saves/data.sav.20240309-070501.bak"));
    }

    #[test]
    fn test_backup_copies_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.sav");
        fs::write(&path, [4, 5, 6]).unwrap();

        let target = backup(&path).unwrap();
        assert_eq!(fs::read(target).unwrap(), vec![4, 5, 6]);
    }
}
