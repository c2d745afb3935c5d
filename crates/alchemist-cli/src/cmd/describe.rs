use crate::backend::Ai;
use alchemist_core::github::Gh;
use alchemist_core::parse::{flatten_lines, truncate_chars, truncate_description};
use alchemist_core::Mode;
use anyhow::Context;
use std::path::Path;
use std::time::Duration;

/// README characters passed as context.
const README_CHARS: usize = 1_500;
const EDIT_PAUSE: Duration = Duration::from_millis(500);

pub fn run(root: &Path, mode: Mode, user: Option<&str>) -> anyhow::Result<()> {
    let gh = Gh::new(root);
    let owner = super::resolve_owner(&gh, user)?;
    let ai = Ai::connect(root, mode)?;

    println!("Generating descriptions for {owner} ({mode} mode)...");
    let repos = gh.list_repos(&owner).context("failed to list repositories")?;

    let mut updated = 0;
    for repo in repos {
        // The profile repository shares the owner's name.
        if repo.name == owner {
            continue;
        }
        if repo.description.as_deref().is_some_and(|d| !d.trim().is_empty()) {
            continue;
        }

        println!("Analyzing {}...", repo.name);
        let readme = gh.readme(&owner, &repo.name).ok().flatten();
        let readme = readme
            .as_deref()
            .map(|r| truncate_chars(r, README_CHARS))
            .unwrap_or("No readme available.");

        let Some(reply) = ai.generate(&describe_prompt(&repo.name, readme), None) else {
            continue;
        };
        let description = truncate_description(&flatten_lines(&reply));
        if description.is_empty() {
            continue;
        }

        println!("  New Desc: {description}");
        if let Err(e) = gh.set_description(&owner, &repo.name, &description) {
            tracing::warn!(repo = %repo.name, error = %e, "failed to set description");
            continue;
        }
        updated += 1;
        std::thread::sleep(EDIT_PAUSE);
    }

    println!("Done! Updated {updated} descriptions.");
    Ok(())
}

fn describe_prompt(name: &str, readme: &str) -> String {
    format!(
        "Task: Generate a GitHub repository description for project \"{name}\".\n\
         Readme Context: \"{readme}\".\n\
         Constraint: Max 20 words. Start with an action verb.\n\
         Output ONLY the description. No quotes.\n"
    )
}
