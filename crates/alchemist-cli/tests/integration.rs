#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn alchemist(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("alchemist").unwrap();
    cmd.current_dir(dir.path())
        .env("ALCHEMIST_ROOT", dir.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_BASE_URL")
        .env_remove("ALCHEMIST_NO_CONFIRM")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &TempDir, yaml: &str) {
    let path = dir.path().join(".alchemist/config.yaml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, yaml).unwrap();
}

fn reply_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// CLI surface
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    alchemist(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffold"))
        .stdout(predicate::str::contains("forge"))
        .stdout(predicate::str::contains("sage"))
        .stdout(predicate::str::contains("--mode"));
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    alchemist(&dir)
        .args(["--mode", "turbo", "explain", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid mode 'turbo'"));
}

#[test]
fn ai_command_without_api_key_fails_before_any_call() {
    let dir = TempDir::new().unwrap();
    alchemist(&dir)
        .args(["explain", "what is a monad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY not set"));
}

// ---------------------------------------------------------------------------
// alchemist config
// ---------------------------------------------------------------------------

#[test]
fn config_validate_defaults_are_clean() {
    let dir = TempDir::new().unwrap();
    alchemist(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_rejects_shared_models() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir,
        "generation:\n  fast:\n    models: [gemini-2.5-flash]\n    token_ceiling: 12000\n",
    );
    alchemist(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"))
        .stdout(predicate::str::contains("gemini-2.5-flash"));
}

#[test]
fn config_show_json_includes_default_tiers() {
    let dir = TempDir::new().unwrap();
    let output = alchemist(&dir)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["generation"]["fast"]["models"][0], "gemma-3-27b-it");
    assert_eq!(value["generation"]["smart"]["token_ceiling"], 230_000);
    assert_eq!(value["generation"]["batch_width"], 2);
}

#[test]
fn invalid_config_blocks_ai_commands() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "generation:\n  batch_width: 0\n");
    alchemist(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .args(["explain", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid generation config"));
}

// ---------------------------------------------------------------------------
// alchemist audit
// ---------------------------------------------------------------------------

#[test]
fn offline_audit_scores_local_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("README.md"), "# demo").unwrap();
    std::fs::write(dir.path().join("LICENSE"), "MIT").unwrap();

    let output = alchemist(&dir)
        .args(["audit", "--offline", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["score"], 30);
    assert_eq!(report["grade"], "lead");
    assert!(report["target"].is_null());
}

#[test]
fn offline_audit_table() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("README.md"), "# demo").unwrap();
    std::fs::create_dir_all(dir.path().join(".github/workflows")).unwrap();
    std::fs::write(dir.path().join("CONTRIBUTING.md"), "hi").unwrap();
    std::fs::write(dir.path().join("LICENSE.md"), "MIT").unwrap();

    alchemist(&dir)
        .args(["audit", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository Audit: Local"))
        .stdout(predicate::str::contains("Transmutation Score: 60% (silver)"))
        .stdout(predicate::str::contains("Metadata: Topics"));
}

// ---------------------------------------------------------------------------
// Generation against a mock Gemini endpoint
// ---------------------------------------------------------------------------

#[test]
fn explain_prints_model_reply() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1alpha/models/gemma-3-27b-it:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_body("A monad is a monoid in the category of endofunctors."))
        .create();

    alchemist(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.url())
        .args(["explain", "what is a monad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Explanation ---"))
        .stdout(predicate::str::contains("monoid in the category"));
    mock.assert();
}

#[test]
fn quota_error_falls_back_to_next_model() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let first = server
        .mock("POST", "/v1alpha/models/gemini-3-flash:generateContent")
        .with_status(429)
        .with_body(r#"{"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#)
        .create();
    let second = server
        .mock("POST", "/v1alpha/models/gemini-2.5-flash:generateContent")
        .with_status(200)
        .with_body(reply_body("second model answered"))
        .create();

    let output = alchemist(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.url())
        .args(["--mode", "smart", "--json", "explain", "x"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["explanation"], "second model answered");
    first.assert();
    second.assert();
}

#[test]
fn exhausted_models_exit_cleanly_without_output() {
    let dir = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", mockito::Matcher::Regex(r"^/v1alpha/models/.*".into()))
        .with_status(500)
        .with_body("boom")
        .expect(3)
        .create();

    alchemist(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.url())
        .args(["explain", "x"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    mock.assert();
}

#[test]
fn sage_reads_codebase_context() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("app.py"), "def handler(): return 42\n").unwrap();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1alpha/models/gemma-3-27b-it:generateContent")
        .match_body(mockito::Matcher::Regex("def handler".into()))
        .with_status(200)
        .with_body(reply_body("handler returns 42"))
        .create();

    alchemist(&dir)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.url())
        .args(["sage", "what does handler return?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handler returns 42"));
    mock.assert();
}

// ---------------------------------------------------------------------------
// Working-directory resolution
// ---------------------------------------------------------------------------

fn git(dir: &std::path::Path, args: &[&str]) -> String {
    let out = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(out.status.success(), "git {args:?}: {}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[test]
fn fix_from_subdirectory_stages_the_right_file() {
    if std::process::Command::new("git").arg("--version").output().is_err() {
        eprintln!("git not installed; skipping");
        return;
    }
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["config", "user.name", "Test"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    let src = dir.path().join("src");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("app.py"), "VERSION = 1\n").unwrap();
    git(dir.path(), &["add", "."]);
    git(dir.path(), &["commit", "-q", "-m", "init"]);

    let mut server = mockito::Server::new();
    server
        .mock("POST", "/v1alpha/models/gemma-3-27b-it:generateContent")
        .with_status(200)
        .with_body(reply_body("VERSION = 2\n"))
        .create();

    // No remote exists, so the run stops at push once the commit is made.
    alchemist(&dir)
        .current_dir(&src)
        .env("GEMINI_API_KEY", "test-key")
        .env("GEMINI_BASE_URL", server.url())
        .args(["--yes", "fix", "app.py", "bump"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("File updated: app.py"))
        .stderr(predicate::str::contains("git push failed"))
        .stderr(predicate::str::contains("pathspec").not());

    assert_eq!(std::fs::read_to_string(src.join("app.py")).unwrap(), "VERSION = 2\n");
    assert_eq!(git(dir.path(), &["log", "-1", "--format=%s"]), "AI Fix: bump");
    assert_eq!(
        git(dir.path(), &["show", "--name-only", "--format=", "HEAD"]),
        "src/app.py"
    );
    assert!(git(dir.path(), &["rev-parse", "--abbrev-ref", "HEAD"]).starts_with("fix/ai-"));
}
