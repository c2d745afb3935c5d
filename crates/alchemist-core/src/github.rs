//! Wrapper over the `gh` CLI.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AlchemistError, Result};
use crate::process;

/// Repository metadata as returned by `gh repo view --json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoMetadata {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub repository_topics: Option<Vec<Topic>>,
    #[serde(default)]
    pub license_info: Option<serde_json::Value>,
}

impl RepoMetadata {
    pub fn topics(&self) -> Vec<String> {
        self.repository_topics
            .iter()
            .flatten()
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    pub fn has_license(&self) -> bool {
        self.license_info.as_ref().is_some_and(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Topic {
    pub name: String,
}

/// One row of `gh repo list --json name,description,repositoryTopics`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub repository_topics: Option<Vec<Topic>>,
}

impl RepoSummary {
    pub fn topics(&self) -> Vec<String> {
        self.repository_topics
            .iter()
            .flatten()
            .map(|t| t.name.clone())
            .collect()
    }
}

/// A label to ensure exists before filing an issue.
#[derive(Debug, Clone, Copy)]
pub struct LabelSpec<'a> {
    pub name: &'a str,
    pub color: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct Gh {
    root: PathBuf,
}

impl Gh {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        process::run("gh", args, &self.root)
    }

    /// Login of the authenticated user, `None` when `gh` is not logged in.
    pub fn current_login(&self) -> Result<Option<String>> {
        process::run_optional("gh", ["api", "user", "-q", ".login"], &self.root)
    }

    /// Name of the repository the working directory belongs to.
    pub fn repo_name(&self) -> Result<Option<String>> {
        process::run_optional("gh", ["repo", "view", "--json", "name", "--jq", ".name"], &self.root)
    }

    pub fn repo_metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata> {
        let slug = format!("{owner}/{repo}");
        let raw = self.run(&[
            "repo",
            "view",
            &slug,
            "--json",
            "description,repositoryTopics,licenseInfo",
        ])?;
        parse_json("gh", &raw)
    }

    /// Public repositories of `owner`, at most 100.
    pub fn list_repos(&self, owner: &str) -> Result<Vec<RepoSummary>> {
        let raw = self.run(&[
            "repo",
            "list",
            owner,
            "--visibility=public",
            "--limit",
            "100",
            "--json",
            "name,description,repositoryTopics",
        ])?;
        parse_json("gh", &raw)
    }

    /// README body of `owner/repo`, `None` when it cannot be fetched.
    pub fn readme(&self, owner: &str, repo: &str) -> Result<Option<String>> {
        let slug = format!("{owner}/{repo}");
        process::run_optional(
            "gh",
            ["repo", "view", slug.as_str(), "--json", "body", "-q", ".body"],
            &self.root,
        )
    }

    pub fn add_topics(&self, owner: &str, repo: &str, topics: &[String]) -> Result<()> {
        let slug = format!("{owner}/{repo}");
        let joined = topics.join(",");
        self.run(&["repo", "edit", &slug, "--add-topic", &joined])
            .map(drop)
    }

    pub fn set_description(&self, owner: &str, repo: &str, description: &str) -> Result<()> {
        let slug = format!("{owner}/{repo}");
        self.run(&["repo", "edit", &slug, "--description", description])
            .map(drop)
    }

    /// Create a label; an already-existing label is not an error.
    pub fn create_label(&self, label: LabelSpec<'_>) -> Result<()> {
        let mut args = vec!["label", "create", label.name];
        if let Some(color) = label.color {
            args.extend(["--color", color]);
        }
        match self.run(&args) {
            Ok(_) => Ok(()),
            Err(AlchemistError::CommandFailed { stderr, .. }) => {
                tracing::debug!(label = label.name, %stderr, "label create skipped");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// File an issue with the body read from `body_file`; returns its URL.
    pub fn create_issue(&self, title: &str, body_file: &Path, labels: &[&str]) -> Result<String> {
        let body_file = body_file.to_string_lossy();
        let mut args = vec!["issue", "create", "--title", title, "--body-file", &*body_file];
        for label in labels {
            args.extend(["--label", *label]);
        }
        self.run(&args)
    }

    /// Open a pull request from the current branch; returns its URL.
    pub fn create_pr(&self, title: &str, body: &str) -> Result<String> {
        self.run(&["pr", "create", "--title", title, "--body", body])
    }

    /// Create a public repository from the working tree and push it.
    pub fn create_repo(&self, name: &str) -> Result<String> {
        self.run(&[
            "repo",
            "create",
            name,
            "--public",
            "--source=.",
            "--remote=origin",
            "--push",
        ])
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(program: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| AlchemistError::UnexpectedOutput {
        program: program.to_string(),
        message: e.to_string(),
    })
}
