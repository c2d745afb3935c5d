use crate::error::Result;
use crate::paths;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting the target.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy `path` to `<path>.bak`, overwriting any earlier backup.
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    let backup = paths::backup_path(path);
    std::fs::copy(path, &backup)?;
    Ok(backup)
}

/// Move every top-level entry of `src` into `dest`.
///
/// Entries whose name already exists in `dest` are left in place and reported
/// back. A rename that fails (e.g. across filesystems) falls back to a
/// recursive copy followed by removal of the source.
pub fn move_entries(src: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dest)?;
    let mut entries: Vec<_> = std::fs::read_dir(src)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut skipped = Vec::new();
    for entry in entries {
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if to.exists() {
            tracing::warn!(path = %to.display(), "destination exists, skipping");
            skipped.push(from);
            continue;
        }
        if std::fs::rename(&from, &to).is_err() {
            copy_recursive(&from, &to)?;
            if from.is_dir() {
                std::fs::remove_dir_all(&from)?;
            } else {
                std::fs::remove_file(&from)?;
            }
        }
    }
    Ok(skipped)
}

fn copy_recursive(from: &Path, to: &Path) -> Result<()> {
    if from.is_dir() {
        std::fs::create_dir_all(to)?;
        for entry in std::fs::read_dir(from)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &to.join(entry.file_name()))?;
        }
    } else {
        std::fs::copy(from, to)?;
    }
    Ok(())
}
