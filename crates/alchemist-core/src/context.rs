//! Aggregates the project's source files into a single context string.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    "venv",
    "node_modules",
    ".tmp",
    "docs",
    "dist",
    "build",
    ".gemini",
    "target",
];

/// File extensions included in the context.
pub const INCLUDED_EXTENSIONS: &[&str] = &[
    "py", "md", "ps1", "sh", "js", "ts", "c", "cpp", "h", "yml", "yaml", "Dockerfile", "json",
    "toml", "rs",
];

/// Walk `root` and concatenate every included file as
/// `--- FILE: <path> ---\n<content>\n`, entries joined by `\n`.
///
/// Paths are relative to `root` with a `./` prefix. Files that are not valid
/// UTF-8 or cannot be read are skipped. Order is deterministic.
pub fn codebase_context(root: &Path) -> String {
    let mut sections = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() || !is_included(entry.path()) {
            continue;
        }
        let content = match std::fs::read_to_string(entry.path()) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(path = %entry.path().display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        sections.push(format!("--- FILE: ./{} ---\n{content}\n", rel.display()));
    }

    tracing::debug!(files = sections.len(), "codebase context assembled");
    sections.join("\n")
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn is_included(path: &Path) -> bool {
    if path.file_name().and_then(|n| n.to_str()) == Some("Dockerfile") {
        return true;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| INCLUDED_EXTENSIONS.contains(&ext))
}
