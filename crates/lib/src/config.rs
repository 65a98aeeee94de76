//! Run configuration for a push.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Remote every build branch is pushed to.
pub const REMOTE: &str = "origin";

/// Default git executable, resolved through `PATH`.
pub const DEFAULT_GIT: &str = "git";

/// Environment variable overriding the git executable.
pub const GIT_ENV: &str = "PUSH_BUILD_BRANCHES_GIT";

/// Everything the driver and the git backend need for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushConfig {
  pub remote: String,
  pub git: String,
  /// Working directory for git; `None` means the current directory.
  pub repo_dir: Option<PathBuf>,
  pub force: bool,
  pub dry_run: bool,
}

impl Default for PushConfig {
  fn default() -> Self {
    Self {
      remote: REMOTE.to_string(),
      git: DEFAULT_GIT.to_string(),
      repo_dir: None,
      force: false,
      dry_run: false,
    }
  }
}

impl PushConfig {
  /// Build the default configuration with environment overrides applied.
  ///
  /// An override that is set but not valid unicode is an error, so a broken
  /// environment is reported before any push is attempted.
  pub fn from_env() -> Result<Self> {
    Ok(Self {
      git: git_program()?,
      ..Self::default()
    })
  }

  /// Directory git runs in, for messages.
  pub fn display_dir(&self) -> PathBuf {
    self.repo_dir.clone().unwrap_or_else(|| PathBuf::from("."))
  }
}

fn git_program() -> Result<String> {
  match std::env::var(GIT_ENV) {
    Ok(value) if !value.is_empty() => Ok(value),
    Ok(_) | Err(std::env::VarError::NotPresent) => Ok(DEFAULT_GIT.to_string()),
    Err(source) => Err(Error::Env { var: GIT_ENV, source }),
  }
}
