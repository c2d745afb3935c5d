pub mod audit;
pub mod commit;
pub mod config;
pub mod describe;
pub mod explain;
pub mod fix;
pub mod forge;
pub mod issue;
pub mod sage;
pub mod scaffold;
pub mod topics;

use alchemist_core::github::Gh;
use anyhow::Context;

/// Owner to act on: `--user` when given, otherwise the `gh` login.
pub(crate) fn resolve_owner(gh: &Gh, user: Option<&str>) -> anyhow::Result<String> {
    if let Some(u) = user {
        return Ok(u.to_string());
    }
    gh.current_login()
        .context("failed to query gh for the current user")?
        .context("not authenticated with gh CLI (run `gh auth login`)")
}
