use crate::backend::Ai;
use crate::prompt::Prompter;
use alchemist_core::drafts::ScaffoldPlan;
use alchemist_core::git::Git;
use alchemist_core::github::Gh;
use alchemist_core::{io, process, Mode};
use anyhow::Context;
use std::path::Path;

const WORKSPACE_PREFIX: &str = "git_alchemist_scaffold_";
const INITIAL_COMMIT: &str = "feat: Initial scaffold by Git-Alchemist";

/// Generated files land in `target` (the working directory); `root` only
/// supplies the configuration.
pub fn run(
    root: &Path,
    target: &Path,
    mode: Mode,
    prompter: &Prompter,
    instruction: &str,
) -> anyhow::Result<()> {
    let ai = Ai::connect(root, mode)?;
    tracing::info!(mode = mode.as_str(), "architecting solution");

    let Some(reply) = ai.generate(&scaffold_prompt(instruction), None) else {
        return Ok(());
    };
    let plan = ScaffoldPlan::from_reply(&reply)
        .with_context(|| format!("could not parse a scaffold plan from the reply:\n{reply}"))?;
    if plan.commands.is_empty() {
        println!("The plan contains no commands.");
        return Ok(());
    }

    println!("Generated Plan:");
    for cmd in &plan.commands {
        println!("  > {cmd}");
    }
    if !prompter.confirm("Execute these commands in a temporary workspace?", false)? {
        return Ok(());
    }

    // Removed on drop, whichever way this function exits.
    let workspace = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir()
        .context("failed to create temporary workspace")?;
    tracing::debug!(path = %workspace.path().display(), "created temporary workspace");

    for cmd in &plan.commands {
        println!("Running: {cmd}");
        process::run_shell(cmd, workspace.path()).with_context(|| format!("`{cmd}` failed"))?;
    }
    println!("Scaffolding complete. Contents:");
    println!("{}", process::run_shell("ls -R", workspace.path())?);

    let question = format!("Keep these files? (moves them to {})", target.display());
    if !prompter.confirm(&question, false)? {
        println!("Discarding workspace.");
        return Ok(());
    }
    let skipped = io::move_entries(workspace.path(), target).context("failed to move files")?;
    for path in &skipped {
        if let Some(name) = path.file_name() {
            println!("Warning: {} already exists, skipped.", name.to_string_lossy());
        }
    }
    println!("Files moved successfully.");

    if prompter.confirm("Initialize git and deploy to GitHub?", false)? {
        deploy(target)?;
    }
    Ok(())
}

fn scaffold_prompt(instruction: &str) -> String {
    format!(
        "Task: Project Scaffolding.\n\
         User Goal: \"{instruction}\"\n\
         Operating System: {os}\n\
         Constraint: Return ONLY a JSON object with a single key \"commands\" containing an array of shell strings.\n\
         The commands should assume they are running INSIDE the project root.\n\
         Example: {{\"commands\": [\"mkdir src\", \"touch src/main.py\", \"echo 'print(1)' > src/main.py\"]}}\n\
         Do NOT use markdown blocks.\n",
        os = std::env::consts::OS,
    )
}

/// `git init`, commit everything, and publish as a public repository named
/// after `dir`.
fn deploy(dir: &Path) -> anyhow::Result<()> {
    let name = repo_name_for(dir)?;
    let git = Git::new(dir);
    let gh = Gh::new(dir);

    println!("Initializing repository: {name}...");
    git.init().context("git init failed")?;
    if git.config_get("user.name")?.is_none() {
        let login = super::resolve_owner(&gh, None)?;
        git.config_set("user.name", &login)?;
        git.config_set("user.email", &format!("{login}@users.noreply.github.com"))?;
    }
    git.add_all().context("git add failed")?;
    git.commit(INITIAL_COMMIT).context("git commit failed")?;

    println!("Creating GitHub repository...");
    gh.create_repo(&name).context("GitHub deployment failed")?;
    println!("Project deployed to GitHub: {name}");
    Ok(())
}

fn repo_name_for(dir: &Path) -> anyhow::Result<String> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", dir.display()))?;
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .context("target directory has no name")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_is_named_after_target_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("flask-demo");
        std::fs::create_dir(&target).unwrap();
        assert_eq!(repo_name_for(&target).unwrap(), "flask-demo");
    }

    #[test]
    fn prompt_asks_for_commands_json() {
        let p = scaffold_prompt("A Flask app with Docker");
        assert!(p.contains("User Goal: \"A Flask app with Docker\""));
        assert!(p.contains("{\"commands\": ["));
        assert!(p.contains(std::env::consts::OS));
    }
}
