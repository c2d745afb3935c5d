//! Thin wrapper over the `git` binary rooted at one working tree.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::process;

/// Branch assumed when the remote does not advertise a HEAD branch.
pub const FALLBACK_BASE_BRANCH: &str = "master";

#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run<const N: usize>(&self, args: [&str; N]) -> Result<String> {
        process::run("git", args, &self.root)
    }

    pub fn init(&self) -> Result<()> {
        self.run(["init"]).map(drop)
    }

    /// `git status --porcelain`; empty when the tree is clean.
    pub fn status_porcelain(&self) -> Result<String> {
        self.run(["status", "--porcelain"])
    }

    pub fn staged_diff(&self) -> Result<String> {
        self.run(["diff", "--cached"])
    }

    pub fn add_all(&self) -> Result<()> {
        self.run(["add", "."]).map(drop)
    }

    pub fn add(&self, path: &Path) -> Result<()> {
        process::run("git", [Path::new("add"), Path::new("--"), path], &self.root).map(drop)
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(["commit", "-m", message]).map(drop)
    }

    pub fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        self.run(["checkout", "-b", branch]).map(drop)
    }

    pub fn current_branch(&self) -> Result<String> {
        self.run(["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// `git push -u origin <branch>`, optionally forced.
    pub fn push(&self, branch: &str, force: bool) -> Result<()> {
        if force {
            self.run(["push", "-u", "origin", branch, "--force"]).map(drop)
        } else {
            self.run(["push", "-u", "origin", branch]).map(drop)
        }
    }

    /// Default branch of `origin`, or [`FALLBACK_BASE_BRANCH`] when it cannot
    /// be determined.
    pub fn default_branch(&self) -> String {
        process::run_optional("git", ["remote", "show", "origin"], &self.root)
            .ok()
            .flatten()
            .and_then(|out| parse_head_branch(&out))
            .unwrap_or_else(|| FALLBACK_BASE_BRANCH.to_string())
    }

    /// `git diff <base>...HEAD`.
    pub fn diff_against(&self, base: &str) -> Result<String> {
        let range = format!("{base}...HEAD");
        self.run(["diff", range.as_str()])
    }

    /// Value of a config key, `None` when unset.
    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        process::run_optional("git", ["config", key], &self.root)
    }

    pub fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.run(["config", key, value]).map(drop)
    }
}

/// Extract the branch from the `HEAD branch: <name>` line of
/// `git remote show origin`.
pub fn parse_head_branch(remote_show: &str) -> Option<String> {
    remote_show.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("HEAD branch:")?;
        let branch = rest.trim();
        (!branch.is_empty() && branch != "(unknown)").then(|| branch.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_head_branch_from_remote_show() {
        let out = "* remote origin\n  Fetch URL: git@github.com:me/repo.git\n  HEAD branch: main\n  Remote branches:\n";
        assert_eq!(parse_head_branch(out).as_deref(), Some("main"));
    }

    #[test]
    fn parse_head_branch_missing_or_unknown() {
        assert_eq!(parse_head_branch("* remote origin\n"), None);
        assert_eq!(parse_head_branch("  HEAD branch: (unknown)\n"), None);
    }

    #[test]
    fn default_branch_falls_back_without_remote() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = Git::new(dir.path());
        git.init().unwrap();
        assert_eq!(git.default_branch(), FALLBACK_BASE_BRANCH);
    }

    #[test]
    fn status_and_staged_diff_in_fresh_repo() {
        if which::which("git").is_err() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let git = Git::new(dir.path());
        git.init().unwrap();
        assert_eq!(git.status_porcelain().unwrap(), "");

        std::fs::write(dir.path().join("app.py"), "print('hi')\n").unwrap();
        assert!(git.status_porcelain().unwrap().contains("app.py"));

        git.add_all().unwrap();
        assert!(git.staged_diff().unwrap().contains("print('hi')"));
    }
}
