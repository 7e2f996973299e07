//! Atomic file writes
//!
//! Content goes to a `.tmp` sibling, is synced, then renamed over the target,
//! so the target is always either the old version or the new one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically replace `path` with `content`
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    atomic_write_with(path, |file| file.write_all(content.as_bytes()))
}

/// Atomically replace `path` with whatever `write_fn` writes
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(&temp_path)?;
    write_fn(&mut file)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matches.json");

        atomic_write(&path, "[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matches.json");

        atomic_write(&path, "old").unwrap();
        atomic_write_with(&path, |file| writeln!(file, "new")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("nested");
        let path = nested.join("matches.json");

        atomic_write(&path, "{}").unwrap();

        assert!(path.exists());
    }
}
