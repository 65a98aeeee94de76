//! Implementation of the push run.
//!
//! Resolves HEAD, then pushes it to every build branch on `origin` in order,
//! stopping at the first failure.

use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use buildbranch_lib::{GitPusher, PushConfig, build_branches, push_all};

use crate::output::{OutputFormat, print_report};

/// Run the full push sequence described by `config`.
pub fn cmd_push(config: &PushConfig, format: OutputFormat) -> Result<()> {
  let pusher = GitPusher::from_config(config);
  let branches = build_branches();
  let started = Instant::now();

  // Current-thread runtime: pushes run one at a time.
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let report = rt.block_on(async {
    let head = pusher.resolve_head().await?;
    info!(head = %head, dir = %config.display_dir().display(), branches = branches.len(), "resolved HEAD");

    let mut stderr = io::stderr().lock();
    let mut report = push_all(&pusher, config, &branches, &mut stderr).await?;
    report.head = Some(head);
    Ok::<_, buildbranch_lib::Error>(report)
  })?;

  print_report(&report, started.elapsed(), format)
}
