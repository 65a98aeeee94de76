//! Sequential push driver.
//!
//! Walks the build branches in order. Before each push it writes one line
//! naming the branch to the diagnostic stream, so the last line printed always
//! identifies the push in flight. The first failure ends the run: later
//! branches are never attempted.

use std::io::Write;

use serde::Serialize;
use tracing::{info, warn};

use crate::branches::{BranchSource, BuildBranch};
use crate::config::PushConfig;
use crate::error::{Error, Result};
use crate::git::Pusher;

/// One ref that was pushed (or would have been, in a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushedRef {
  pub branch: String,
  pub source: BranchSource,
  pub refspec: String,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PushReport {
  pub remote: String,
  /// Commit HEAD resolved to, when the caller checked it.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub head: Option<String>,
  pub dry_run: bool,
  pub pushed: Vec<PushedRef>,
}

impl PushReport {
  pub fn count(&self) -> usize {
    self.pushed.len()
  }
}

/// The line written before pushing `branch`.
pub fn diagnostic_line(branch: &BuildBranch, dry_run: bool) -> String {
  if dry_run {
    format!("Would push HEAD to {}", branch.branch_name())
  } else {
    format!("Pushing HEAD to {}", branch.branch_name())
  }
}

/// Push HEAD to every branch in `branches`, in order.
///
/// Each diagnostic line is flushed before the matching push is issued. Returns
/// the first error unchanged; nothing after the failing branch runs.
pub async fn push_all<P, W>(
  pusher: &P,
  config: &PushConfig,
  branches: &[BuildBranch],
  diagnostics: &mut W,
) -> Result<PushReport>
where
  P: Pusher,
  W: Write,
{
  let mut report = PushReport {
    remote: config.remote.clone(),
    dry_run: config.dry_run,
    ..PushReport::default()
  };

  for (index, branch) in branches.iter().enumerate() {
    let refspec = branch.refspec(config.force);

    writeln!(diagnostics, "{}", diagnostic_line(branch, config.dry_run)).map_err(Error::Diagnostic)?;
    diagnostics.flush().map_err(Error::Diagnostic)?;

    if config.dry_run {
      info!(branch = %branch, refspec = %refspec, "dry run, skipping push");
    } else {
      info!(branch = %branch, remote = %config.remote, refspec = %refspec, "pushing");
      if let Err(err) = pusher.push(&config.remote, &refspec).await {
        warn!(
          branch = %branch,
          remaining = branches.len() - index - 1,
          error = %err,
          "push failed, aborting"
        );
        return Err(err);
      }
    }

    report.pushed.push(PushedRef {
      branch: branch.branch_name(),
      source: branch.source,
      refspec,
    });
  }

  Ok(report)
}
