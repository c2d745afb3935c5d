use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ALCHEMIST_DIR: &str = ".alchemist";
pub const CONFIG_FILE: &str = ".alchemist/config.yaml";

pub const README_MD: &str = "README.md";
pub const CONTRIBUTING_MD: &str = "CONTRIBUTING.md";
pub const LICENSE_FILES: [&str; 3] = ["LICENSE", "LICENSE.md", "LICENSE.txt"];
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// Suffix appended to a file's name when it is backed up before a rewrite.
pub const BACKUP_SUFFIX: &str = ".bak";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<file>.bak` next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}
