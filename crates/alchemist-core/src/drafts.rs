//! Structured replies the commands ask the model for.

use serde::Deserialize;
use serde_json::Value;

use crate::parse::parse_json_response;

/// Repositories with at least this many topics are left alone.
pub const TOPIC_LIMIT: usize = 5;

pub const DEFAULT_PR_TITLE: &str = "AI PR Update";
pub const DEFAULT_PR_BODY: &str = "Automated PR created by Git-Alchemist.";
pub const PR_SIGNATURE: &str = "\n\n> Forged by Git-Alchemist ⚗️";

pub const DEFAULT_ISSUE_LABEL: &str = "enhancement";
pub const DRAFT_LABEL: &str = "status: draft";
pub const AUTOMATED_LABEL: &str = "automated";
pub const EASY_LABEL: &str = "good first issue";
pub const ISSUE_SIGNATURE: &str = "\n\n> Automated by Git-Alchemist";

/// `{"commands": [...]}` shell plan for a scaffold.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScaffoldPlan {
    #[serde(default)]
    pub commands: Vec<String>,
}

impl ScaffoldPlan {
    pub fn from_reply(reply: &str) -> Option<Self> {
        match parse_json_response(reply)? {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrDraft {
    pub title: String,
    pub body: String,
}

impl PrDraft {
    /// Missing or non-string keys fall back to the defaults.
    pub fn from_reply(reply: &str) -> Option<Self> {
        let Value::Object(map) = parse_json_response(reply)? else {
            return None;
        };
        let field = |key: &str, default: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Some(Self {
            title: field("title", DEFAULT_PR_TITLE),
            body: field("body", DEFAULT_PR_BODY),
        })
    }

    /// Body as submitted, with the signature appended.
    pub fn signed_body(&self) -> String {
        format!("{}{PR_SIGNATURE}", self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub body: String,
    #[serde(default = "default_issue_label")]
    pub label: String,
    #[serde(default)]
    pub easy: bool,
}

fn default_issue_label() -> String {
    DEFAULT_ISSUE_LABEL.to_string()
}

impl IssueDraft {
    /// `title` and `body` are required; `label` and `easy` are optional.
    pub fn from_reply(reply: &str) -> Option<Self> {
        match parse_json_response(reply)? {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            _ => None,
        }
    }

    pub fn draft_title(&self) -> String {
        format!("[DRAFT] {}", self.title)
    }

    pub fn signed_body(&self) -> String {
        format!("{}{ISSUE_SIGNATURE}", self.body)
    }

    /// Labels applied to the filed issue, in order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = vec![DRAFT_LABEL, AUTOMATED_LABEL, self.label.as_str()];
        if self.easy {
            labels.push(EASY_LABEL);
        }
        labels
    }
}

/// Parse a topic suggestion reply (a JSON array of strings).
pub fn parse_topics(reply: &str) -> Option<Vec<String>> {
    let Value::Array(items) = parse_json_response(reply)? else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.trim().to_lowercase()))
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Suggested topics not already present, deduplicated, keeping the total
/// within [`TOPIC_LIMIT`].
pub fn topics_to_add(suggested: &[String], existing: &[String]) -> Vec<String> {
    let room = TOPIC_LIMIT.saturating_sub(existing.len());
    let mut out: Vec<String> = Vec::new();
    for topic in suggested {
        if out.len() == room {
            break;
        }
        if !existing.contains(topic) && !out.contains(topic) {
            out.push(topic.clone());
        }
    }
    out
}
