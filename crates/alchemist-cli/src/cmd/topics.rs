use crate::backend::Ai;
use alchemist_core::drafts::{parse_topics, topics_to_add, TOPIC_LIMIT};
use alchemist_core::github::Gh;
use alchemist_core::Mode;
use anyhow::Context;
use std::path::Path;
use std::time::Duration;

/// Pause between repository edits.
const EDIT_PAUSE: Duration = Duration::from_millis(500);

pub fn run(root: &Path, mode: Mode, user: Option<&str>) -> anyhow::Result<()> {
    let gh = Gh::new(root);
    let owner = super::resolve_owner(&gh, user)?;
    let ai = Ai::connect(root, mode)?;

    println!("Optimizing topics for {owner} ({mode} mode)...");
    let repos = gh.list_repos(&owner).context("failed to list repositories")?;

    let mut updated = 0;
    for repo in repos {
        let existing = repo.topics();
        if existing.len() >= TOPIC_LIMIT {
            continue;
        }

        println!("Analyzing {}...", repo.name);
        let description = repo
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided");
        let Some(reply) = ai.generate(&topics_prompt(&repo.name, description, &existing), None) else {
            continue;
        };
        let Some(suggested) = parse_topics(&reply) else {
            tracing::warn!(repo = %repo.name, "failed to parse topic suggestions");
            continue;
        };

        let to_add = topics_to_add(&suggested, &existing);
        if to_add.is_empty() {
            continue;
        }
        println!("  Adding tags: {}", to_add.join(","));
        if let Err(e) = gh.add_topics(&owner, &repo.name, &to_add) {
            tracing::warn!(repo = %repo.name, error = %e, "failed to add topics");
            continue;
        }
        updated += 1;
        std::thread::sleep(EDIT_PAUSE);
    }

    println!("Done! Optimized {updated} repositories.");
    Ok(())
}

fn topics_prompt(name: &str, description: &str, existing: &[String]) -> String {
    format!(
        "Task: Suggest search-friendly GitHub topics for project \"{name}\".\n\
         Description: \"{description}\".\n\
         Existing Topics: {existing:?}.\n\
         Return ONLY a JSON array of strings (max {TOPIC_LIMIT} total topics).\n\
         Focus on technical keywords like 'python', 'api', 'automation', 'cli'.\n\
         Output Example: [\"python\", \"automation\"]\n"
    )
}
