use crate::output::{print_json, print_table};
use alchemist_core::audit::{audit, AuditReport, Grade};
use alchemist_core::github::Gh;
use std::path::Path;

pub fn run(
    root: &Path,
    user: Option<&str>,
    repo: Option<&str>,
    offline: bool,
    json: bool,
) -> anyhow::Result<()> {
    let report = if offline {
        audit(root, None, None)
    } else {
        remote_audit(root, user, repo)?
    };

    if json {
        return print_json(&report);
    }
    render(&report);
    Ok(())
}

fn remote_audit(root: &Path, user: Option<&str>, repo: Option<&str>) -> anyhow::Result<AuditReport> {
    let gh = Gh::new(root);
    let owner = super::resolve_owner(&gh, user)?;

    let repo = match repo {
        Some(r) => Some(r.to_string()),
        None => gh.repo_name()?,
    };
    let Some(repo) = repo else {
        tracing::warn!("not inside a GitHub repository, auditing local files only");
        return Ok(audit(root, None, None));
    };

    let metadata = match gh.repo_metadata(&owner, &repo) {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!(error = %e, "could not read repository metadata");
            None
        }
    };
    Ok(audit(root, Some(format!("{owner}/{repo}")), metadata.as_ref()))
}

fn render(report: &AuditReport) {
    println!(
        "Repository Audit: {}\n",
        report.target.as_deref().unwrap_or("Local")
    );
    let rows = report
        .checks
        .iter()
        .map(|c| {
            vec![
                c.criterion.to_string(),
                if c.passed { "GOLD" } else { "LEAD" }.to_string(),
                c.weight.to_string(),
            ]
        })
        .collect();
    print_table(&["Criterion", "Status", "Weight"], rows);

    println!(
        "\nTransmutation Score: {}% ({})",
        report.score,
        report.grade.as_str()
    );
    if report.grade == Grade::Gold && report.score == 100 {
        println!("Pure Gold! This repository is optimized for the community.");
    } else {
        let missing: Vec<_> = report.missing().map(|c| c.criterion).collect();
        println!("Missing: {}", missing.join(", "));
    }
}
