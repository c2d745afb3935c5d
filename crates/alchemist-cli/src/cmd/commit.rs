use crate::backend::Ai;
use crate::output::print_json;
use crate::prompt::Prompter;
use alchemist_core::git::Git;
use alchemist_core::parse::parse_numbered_options;
use alchemist_core::Mode;
use anyhow::Context;
use std::path::Path;

const INSTRUCTION: &str = "Task: Suggest 3 professional, semantic commit messages based on the git diff provided in the Context.\n\
Format: <type>(<scope>): <subject>\n\
Types: feat, fix, docs, style, refactor, test, chore\n\n\
Instructions:\n\
1. Return ONLY a numbered list of 3 options.\n\
2. No explanations or extra text.\n\
3. Ensure they are concise and accurate.\n";

pub fn run(root: &Path, mode: Mode, prompter: &Prompter, json: bool) -> anyhow::Result<()> {
    let git = Git::new(root);
    let mut diff = git.staged_diff().context("failed to read staged diff")?;

    if diff.is_empty() {
        println!("No staged changes found.");
        if !prompter.confirm("Stage all changes now? (git add .)", true)? {
            return Ok(());
        }
        git.add_all().context("git add failed")?;
        diff = git.staged_diff().context("failed to read staged diff")?;
        if diff.is_empty() {
            println!("Nothing to commit.");
            return Ok(());
        }
    }

    let ai = Ai::connect(root, mode)?;
    tracing::info!("analyzing changes for a commit message");
    let Some(reply) = ai.generate(INSTRUCTION, Some(&diff)) else {
        return Ok(());
    };

    let options = parse_numbered_options(&reply);
    if options.is_empty() {
        anyhow::bail!("model returned no commit message options:\n{reply}");
    }

    if !json {
        println!("\nRecommended Transmutations:");
        for (i, opt) in options.iter().enumerate() {
            println!("  {}. {opt}", i + 1);
        }
    }

    let chosen = prompter
        .choose("\nSelect a message to commit", options.len())?
        .map(|i| options[i].clone());

    match &chosen {
        Some(message) => {
            git.commit(message).context("git commit failed")?;
            if !json {
                println!("Committed: {message}");
            }
        }
        None => {
            if !json {
                println!("Commit aborted.");
            }
        }
    }

    if json {
        print_json(&serde_json::json!({ "options": options, "committed": chosen }))?;
    }
    Ok(())
}
