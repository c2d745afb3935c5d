//! Repository "gold standard" audit.

use serde::Serialize;
use std::path::Path;

use crate::github::RepoMetadata;
use crate::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Gold,
    Silver,
    Lead,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Grade::Gold,
            s if s >= 50 => Grade::Silver,
            _ => Grade::Lead,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Gold => "gold",
            Grade::Silver => "silver",
            Grade::Lead => "lead",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditCheck {
    pub criterion: &'static str,
    pub weight: u32,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// `owner/repo`, or `None` for a local-only audit.
    pub target: Option<String>,
    pub checks: Vec<AuditCheck>,
    pub score: u32,
    pub grade: Grade,
}

impl AuditReport {
    pub fn missing(&self) -> impl Iterator<Item = &AuditCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Score the working tree at `root`, combined with remote metadata when the
/// repository is known to GitHub.
pub fn audit(root: &Path, target: Option<String>, metadata: Option<&RepoMetadata>) -> AuditReport {
    let exists = |rel: &str| root.join(rel).exists();
    let meta = metadata.cloned().unwrap_or_default();

    let checks = vec![
        AuditCheck {
            criterion: "README.md",
            weight: 20,
            passed: exists(paths::README_MD),
        },
        AuditCheck {
            criterion: "LICENSE",
            weight: 10,
            passed: meta.has_license() || paths::LICENSE_FILES.iter().any(|f| exists(f)),
        },
        AuditCheck {
            criterion: "CONTRIBUTING.md",
            weight: 10,
            passed: exists(paths::CONTRIBUTING_MD) || exists("CONTRIBUTING"),
        },
        AuditCheck {
            criterion: "Metadata: Description",
            weight: 20,
            passed: meta.has_description(),
        },
        AuditCheck {
            criterion: "Metadata: Topics",
            weight: 20,
            passed: meta.topics().len() >= 3,
        },
        AuditCheck {
            criterion: "CI/CD: GitHub Actions",
            weight: 20,
            passed: root.join(paths::WORKFLOWS_DIR).is_dir(),
        },
    ];

    let score = checks.iter().filter(|c| c.passed).map(|c| c.weight).sum();
    AuditReport {
        target,
        checks,
        score,
        grade: Grade::from_score(score),
    }
}
