//! Shared test helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const BUILD_BRANCHES: [&str; 7] = [
  "build_bookworm",
  "build_trixie",
  "build_x86_64-unknown-linux-gnu",
  "build_x86_64-pc-windows-msvc",
  "build_x86_64-pc-windows-gnu",
  "build_x86_64-apple-darwin",
  "build_aarch64-apple-darwin",
];

/// Run git in `dir` with a fixed identity, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
  let output = StdCommand::new("git")
    .args(args)
    .current_dir(dir)
    .env("GIT_AUTHOR_NAME", "test")
    .env("GIT_AUTHOR_EMAIL", "test@example.com")
    .env("GIT_COMMITTER_NAME", "test")
    .env("GIT_COMMITTER_EMAIL", "test@example.com")
    .output()
    .unwrap();
  assert!(
    output.status.success(),
    "git {:?} failed: {}",
    args,
    String::from_utf8_lossy(&output.stderr)
  );
  String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Isolated repository pair.
///
/// `work` is a work tree with one commit; `remote` is a bare repository that
/// `work` knows as `origin`.
pub struct TestRepo {
  pub temp: TempDir,
  pub work: PathBuf,
  pub remote: PathBuf,
}

impl TestRepo {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("work");
    let remote = temp.path().join("remote.git");
    std::fs::create_dir_all(&work).unwrap();
    std::fs::create_dir_all(&remote).unwrap();

    git(&remote, &["init", "--bare", "--quiet"]);
    git(&work, &["init", "--quiet"]);
    git(&work, &["commit", "--allow-empty", "--quiet", "-m", "initial"]);
    git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);

    Self { temp, work, remote }
  }

  /// A work tree with a commit but no `origin` remote.
  pub fn without_origin() -> Self {
    let repo = Self::new();
    git(&repo.work, &["remote", "remove", "origin"]);
    repo
  }

  pub fn head(&self) -> String {
    git(&self.work, &["rev-parse", "HEAD"])
  }

  /// Replace HEAD with a commit that does not descend from it.
  pub fn rewrite_head(&self) {
    git(&self.work, &["commit", "--amend", "--allow-empty", "--quiet", "-m", "rewritten"]);
  }

  /// Branch name -> commit id for every `build_*` branch on the remote.
  pub fn remote_build_branches(&self) -> Vec<(String, String)> {
    let listing = git(&self.remote, &["for-each-ref", "--format=%(refname:short) %(objectname)", "refs/heads/"]);
    listing
      .lines()
      .filter_map(|line| line.split_once(' '))
      .filter(|(name, _)| name.starts_with("build_"))
      .map(|(name, commit)| (name.to_string(), commit.to_string()))
      .collect()
  }

  /// Command for the binary, running against `work` through `-C`.
  pub fn push_cmd(&self) -> Command {
    let mut cmd = push_build_branches();
    cmd.arg("-C").arg(&self.work);
    cmd.env_remove("PUSH_BUILD_BRANCHES_GIT");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

pub fn push_build_branches() -> Command {
  cargo_bin_cmd!("push-build-branches")
}

/// A stand-in for git that logs its arguments and fails one chosen push.
///
/// `rev-parse` prints a fixed commit id. A push whose refspec ends with
/// `build_<fail_on>` exits with `exit_code`; every other push succeeds.
#[cfg(unix)]
pub struct FakeGit {
  pub temp: TempDir,
  pub program: PathBuf,
  pub log: PathBuf,
}

#[cfg(unix)]
impl FakeGit {
  pub const HEAD: &'static str = "0123456789abcdef0123456789abcdef01234567";

  pub fn failing_on(fail_on: &str, exit_code: i32) -> Self {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let program = temp.path().join("git");
    let log = temp.path().join("calls.log");
    let script = format!(
      r#"#!/bin/sh
echo "$*" >> "{log}"
case "$1" in
  rev-parse)
    echo {head}
    ;;
  push)
    case "$3" in
      *build_{fail_on}) exit {exit_code} ;;
    esac
    ;;
esac
exit 0
"#,
      log = log.display(),
      head = Self::HEAD,
      fail_on = fail_on,
      exit_code = exit_code,
    );
    std::fs::write(&program, script).unwrap();
    std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

    Self { temp, program, log }
  }

  pub fn succeeding() -> Self {
    Self::failing_on("never-matches", 1)
  }

  /// Push invocations, as `push <remote> <refspec>` lines.
  pub fn pushes(&self) -> Vec<String> {
    std::fs::read_to_string(&self.log)
      .unwrap_or_default()
      .lines()
      .filter(|line| line.starts_with("push "))
      .map(str::to_string)
      .collect()
  }

  pub fn cmd(&self) -> Command {
    let mut cmd = push_build_branches();
    cmd.current_dir(self.temp.path());
    cmd.env("PUSH_BUILD_BRANCHES_GIT", &self.program);
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
