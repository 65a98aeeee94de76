//! Terminal output for push-build-branches.
//!
//! Status lines go to stderr next to git's own progress output; the final
//! summary goes to stdout as text or JSON.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use buildbranch_lib::PushReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const ARROW: &str = "→";
}

/// Commit ids are shown abbreviated.
pub fn short_commit(commit: &str) -> &str {
  let len = commit.len().min(12);
  &commit[..len]
}

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    format!("{}m {}s", secs / 60, secs % 60)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Print the end-of-run summary.
pub fn print_report(report: &PushReport, elapsed: Duration, format: OutputFormat) -> anyhow::Result<()> {
  if format.is_json() {
    return print_json(report);
  }

  let verb = if report.dry_run { "Would push" } else { "Pushed" };
  let head = report
    .head
    .as_deref()
    .map(|commit| format!(" at {}", short_commit(commit)))
    .unwrap_or_default();

  print_success(&format!(
    "{} {} build branch(es) to {}{} in {}",
    verb,
    report.count(),
    report.remote,
    head,
    format_duration(elapsed)
  ));
  for pushed in &report.pushed {
    println!(
      "  {} {} {}",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      pushed.branch,
      format!("({})", pushed.source).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }

  Ok(())
}
