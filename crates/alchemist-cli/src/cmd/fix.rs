use crate::backend::Ai;
use crate::prompt::Prompter;
use alchemist_core::git::Git;
use alchemist_core::github::Gh;
use alchemist_core::parse::strip_code_fences;
use alchemist_core::{io, Mode};
use anyhow::Context;
use std::path::{Path, PathBuf};

pub fn run(
    root: &Path,
    mode: Mode,
    prompter: &Prompter,
    file: &Path,
    instruction: &str,
) -> anyhow::Result<()> {
    if !file.is_file() {
        anyhow::bail!("file not found: {}", file.display());
    }
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let pathspec = pathspec_in(root, file)?;

    let ai = Ai::connect(root, mode)?;
    tracing::info!(file = %file.display(), "consulting model");
    let Some(reply) = ai.generate(&fix_prompt(instruction), Some(&content)) else {
        return Ok(());
    };
    let fixed = strip_code_fences(&reply);

    let backup = io::backup_file(file)
        .with_context(|| format!("failed to back up {}", file.display()))?;
    println!("Backup created: {}", backup.display());
    io::atomic_write(file, fixed.as_bytes())
        .with_context(|| format!("failed to write {}", file.display()))?;
    println!("File updated: {}", file.display());

    if prompter.confirm("Create a PR for this fix?", false)? {
        open_fix_pr(root, &pathspec, instruction)?;
    }
    Ok(())
}

fn fix_prompt(instruction: &str) -> String {
    format!(
        "Task: Fix/Modify Code.\n\
         User Instructions:\n\
         '''\n\
         {instruction}\n\
         '''\n\n\
         Target File Content is provided in the Context.\n\n\
         Goal: Return ONLY the complete, corrected file content based on the User Instructions. \
         Do not use markdown blocks.\n"
    )
}

/// `file` (relative to the working directory) as a path git can resolve from
/// `root`. Files outside `root` keep their absolute path.
fn pathspec_in(root: &Path, file: &Path) -> anyhow::Result<PathBuf> {
    let file = file
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", file.display()))?;
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", root.display()))?;
    Ok(file
        .strip_prefix(&root)
        .map(Path::to_path_buf)
        .unwrap_or(file))
}

fn fix_branch_name() -> String {
    format!("fix/ai-{:08x}", rand::random::<u32>())
}

fn open_fix_pr(root: &Path, pathspec: &Path, instruction: &str) -> anyhow::Result<()> {
    let git = Git::new(root);
    let gh = Gh::new(root);
    let branch = fix_branch_name();
    let title = format!("AI Fix: {instruction}");

    git.checkout_new_branch(&branch)
        .with_context(|| format!("failed to create branch {branch}"))?;
    git.add(pathspec).context("git add failed")?;
    git.commit(&title).context("git commit failed")?;
    git.push(&branch, false).context("git push failed")?;
    let url = gh.create_pr(&title, "Automated fix.").context("PR creation failed")?;
    println!("Pull request opened: {url}");
    Ok(())
}
