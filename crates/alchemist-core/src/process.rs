//! Subprocess invocation for the external tools the commands drive.
//!
//! Every call runs with piped stdout/stderr in an explicit working directory.
//! Stdout comes back trimmed; a non-zero exit becomes
//! [`AlchemistError::CommandFailed`] carrying the exit code and stderr.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{AlchemistError, Result};

/// Resolve `program` on `PATH`.
pub fn ensure_tool(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| AlchemistError::ToolMissing(program.to_string()))
}

/// Run `program` with `args` in `cwd` and return its trimmed stdout.
pub fn run<I, S>(program: &str, args: I, cwd: &Path) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = spawn(program, args, cwd)?;
    finish(program, output)
}

/// Like [`run`], but a non-zero exit yields `Ok(None)` instead of an error.
///
/// Used for lookups whose failure simply means "not available", such as
/// reading a git config key that is unset.
pub fn run_optional<I, S>(program: &str, args: I, cwd: &Path) -> Result<Option<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = spawn(program, args, cwd)?;
    if !output.status.success() {
        tracing::debug!(
            program,
            code = ?output.status.code(),
            "lookup exited unsuccessfully"
        );
        return Ok(None);
    }
    let stdout = stdout_of(&output);
    Ok((!stdout.is_empty()).then_some(stdout))
}

/// Run a shell command line through `sh -c` in `cwd`.
pub fn run_shell(command: &str, cwd: &Path) -> Result<String> {
    run("sh", ["-c", command], cwd)
}

fn spawn<I, S>(program: &str, args: I, cwd: &Path) -> Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let resolved = ensure_tool(program)?;
    let output = Command::new(resolved)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;
    Ok(output)
}

fn finish(program: &str, output: Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr)
            .trim()
            .chars()
            .take(500)
            .collect::<String>();
        return Err(AlchemistError::CommandFailed {
            program: program.to_string(),
            code: output.status.code(),
            stderr,
        });
    }
    Ok(stdout_of(&output))
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_tool_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = run("definitely-not-a-real-tool-xyz", ["--version"], dir.path()).unwrap_err();
        assert!(matches!(err, AlchemistError::ToolMissing(name) if name == "definitely-not-a-real-tool-xyz"));
    }

    #[test]
    fn stdout_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let out = run_shell("printf '  hello world \\n\\n'", dir.path()).unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn non_zero_exit_carries_code_and_stderr() {
        let dir = TempDir::new().unwrap();
        let err = run_shell("echo boom >&2; exit 3", dir.path()).unwrap_err();
        match err {
            AlchemistError::CommandFailed { program, code, stderr } => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn optional_run_swallows_failure() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_optional("sh", ["-c", "exit 1"], dir.path()).unwrap(), None);
        assert_eq!(run_optional("sh", ["-c", "true"], dir.path()).unwrap(), None);
        assert_eq!(
            run_optional("sh", ["-c", "echo ok"], dir.path()).unwrap().as_deref(),
            Some("ok")
        );
    }

    #[test]
    fn runs_in_requested_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let out = run_shell("ls", dir.path()).unwrap();
        assert!(out.contains("marker.txt"));
    }
}
