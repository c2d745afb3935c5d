use crate::backend::Ai;
use crate::prompt::Prompter;
use alchemist_core::drafts::PrDraft;
use alchemist_core::git::Git;
use alchemist_core::github::Gh;
use alchemist_core::parse::{one_line, truncate_chars};
use alchemist_core::Mode;
use anyhow::Context;
use std::path::Path;

/// Diff characters sent when drafting the commit message.
const COMMIT_DIFF_CHARS: usize = 3_000;
/// Diff characters sent when drafting the pull request.
const PR_DIFF_CHARS: usize = 5_000;

pub fn run(root: &Path, mode: Mode, prompter: &Prompter) -> anyhow::Result<()> {
    let git = Git::new(root);
    let gh = Gh::new(root);
    super::resolve_owner(&gh, None)?;
    let ai = Ai::connect(root, mode)?;

    commit_pending(&git, &ai)?;

    let base = git.default_branch();
    let diff = match git.diff_against(&base) {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(base = %base, error = %e, "could not diff against base branch");
            String::new()
        }
    };
    if diff.is_empty() {
        println!("No changes detected between the current branch and {base}.");
        return Ok(());
    }

    tracing::info!(base = %base, "drafting pull request");
    let Some(reply) = ai.generate(&pr_prompt(truncate_chars(&diff, PR_DIFF_CHARS)), None) else {
        return Ok(());
    };
    let draft = PrDraft::from_reply(&reply)
        .with_context(|| format!("could not parse a PR draft from the reply:\n{reply}"))?;

    println!("\nForged PR Title: {}", draft.title);
    println!("Forged PR Body:\n{}\n", draft.body);

    let skip_confirm = std::env::var_os("FORGE_NO_CONFIRM").is_some();
    if !skip_confirm && !prompter.confirm("Forge and open this PR on GitHub?", false)? {
        return Ok(());
    }

    let branch = git.current_branch().context("failed to read current branch")?;
    tracing::info!(branch = %branch, "pushing to origin");
    git.push(&branch, true).context("git push failed")?;
    let url = gh
        .create_pr(&draft.title, &draft.signed_body())
        .context("PR creation failed")?;
    println!("PR forged and opened: {url}");
    Ok(())
}

/// Move uncommitted work onto a fresh `forge-<ts>` branch and commit it.
/// Returns whether anything was committed.
fn commit_pending(git: &Git, ai: &Ai) -> anyhow::Result<bool> {
    let status = git.status_porcelain().context("git status failed")?;
    if status.is_empty() {
        return Ok(false);
    }

    let ts = chrono::Utc::now().timestamp();
    let branch = format!("forge-{ts}");
    println!("Uncommitted changes detected. Forging branch {branch}...");
    git.checkout_new_branch(&branch)
        .with_context(|| format!("failed to create branch {branch}"))?;
    git.add_all().context("git add failed")?;

    let fallback = format!("wip: auto-commit changes {ts}");
    let diff = git.staged_diff().context("failed to read staged diff")?;
    let message = if diff.is_empty() {
        fallback
    } else {
        ai.generate(&commit_prompt(truncate_chars(&diff, COMMIT_DIFF_CHARS)), None)
            .map(|reply| one_line(&reply))
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
    };

    git.commit(&message).context("git commit failed")?;
    println!("Committed changes: {message}");
    Ok(true)
}

fn commit_prompt(diff: &str) -> String {
    format!(
        "Task: Generate a concise, semantic git commit message for the following changes.\n\
         Diff:\n\
         '''\n\
         {diff}\n\
         '''\n\
         Constraint: Max 70 characters. No quotes. Start with a verb (e.g., 'fix:', 'feat:', 'chore:').\n"
    )
}

fn pr_prompt(diff: &str) -> String {
    format!(
        "Task: Generate a professional GitHub Pull Request title and technical description.\n\
         Context: Below is the git diff for the current branch.\n\n\
         DIFF:\n\
         '''\n\
         {diff}\n\
         '''\n\n\
         Instructions:\n\
         1. Title: Concise, semantic (e.g., feat: add X, fix: handle Y).\n\
         2. Body:\n   \
            - **Summary**: 1-2 sentences on what this PR does.\n   \
            - **Technical Changes**: Bullet points explaining the logic changes.\n\
         3. Return ONLY a JSON object with \"title\" and \"body\" keys. No markdown blocks.\n"
    )
}
