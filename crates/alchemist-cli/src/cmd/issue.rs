use crate::backend::Ai;
use crate::output::print_json;
use alchemist_core::drafts::{IssueDraft, AUTOMATED_LABEL, DRAFT_LABEL, EASY_LABEL};
use alchemist_core::github::{Gh, LabelSpec};
use alchemist_core::Mode;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

pub fn run(root: &Path, mode: Mode, idea: &str, json: bool) -> anyhow::Result<()> {
    let ai = Ai::connect(root, mode)?;
    let gh = Gh::new(root);
    tracing::info!(mode = mode.as_str(), "drafting technical issue");

    let Some(reply) = ai.generate(&issue_prompt(idea), None) else {
        return Ok(());
    };
    let issue = IssueDraft::from_reply(&reply)
        .with_context(|| format!("could not parse an issue draft from the reply:\n{reply}"))?;
    let title = issue.draft_title();
    println!("Uploading Draft: {title}");

    for label in labels_for(&issue) {
        gh.create_label(label)?;
    }

    let mut body_file = tempfile::Builder::new()
        .suffix(".md")
        .tempfile()
        .context("failed to create issue body file")?;
    body_file.write_all(issue.signed_body().as_bytes())?;
    body_file.flush()?;

    let url = gh
        .create_issue(&title, body_file.path(), &issue.labels())
        .context("failed to create issue")?;

    if json {
        print_json(&serde_json::json!({ "title": title, "url": url, "labels": issue.labels() }))?;
    } else {
        println!("Success! Issue created as draft: {url}");
    }
    Ok(())
}

fn labels_for(issue: &IssueDraft) -> Vec<LabelSpec<'_>> {
    let mut labels = vec![
        LabelSpec {
            name: AUTOMATED_LABEL,
            color: Some("505050"),
        },
        LabelSpec {
            name: DRAFT_LABEL,
            color: Some("333333"),
        },
        LabelSpec {
            name: &issue.label,
            color: None,
        },
    ];
    if issue.easy {
        labels.push(LabelSpec {
            name: EASY_LABEL,
            color: Some("7057ff"),
        });
    }
    labels
}

fn issue_prompt(idea: &str) -> String {
    format!(
        "You are a Senior Tech Lead.\n\
         User Input: '{idea}'\n\
         TASK: Translate this into a technical implementation plan.\n\
         STRUCTURE:\n\
         - **Context**: 1 sentence explaining WHY.\n\
         - **Directives**: Bullet points of EXACTLY what to change.\n\
         OUTPUT FORMAT: Return ONLY a JSON object with keys: \"title\", \"body\", \"label\", \"easy\" (boolean).\n\
         No markdown blocks.\n"
    )
}
