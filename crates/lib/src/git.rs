//! Git backend for pushing refs.
//!
//! The driver only talks to the [`Pusher`] trait; [`GitPusher`] implements it
//! by running the `git` executable as a child process.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::config::PushConfig;
use crate::error::{Error, Result};

/// A single ref update against a remote.
pub trait Pusher {
  /// Ask `remote` to apply `refspec`.
  ///
  /// Resolves once the update has been accepted or rejected.
  fn push(&self, remote: &str, refspec: &str) -> impl Future<Output = Result<()>>;
}

/// Pushes by invoking `git push <remote> <refspec>`.
#[derive(Debug, Clone)]
pub struct GitPusher {
  program: String,
  repo_dir: Option<PathBuf>,
}

impl GitPusher {
  pub fn new(program: impl Into<String>, repo_dir: Option<PathBuf>) -> Self {
    Self {
      program: program.into(),
      repo_dir,
    }
  }

  pub fn from_config(config: &PushConfig) -> Self {
    Self::new(config.git.clone(), config.repo_dir.clone())
  }

  fn command(&self) -> Command {
    let mut command = Command::new(&self.program);
    if let Some(dir) = &self.repo_dir {
      command.current_dir(dir);
    }
    command
  }

  fn spawn_error(&self, source: std::io::Error) -> Error {
    Error::Spawn {
      program: self.program.clone(),
      source,
    }
  }

  /// Resolve HEAD to a full commit id.
  pub async fn resolve_head(&self) -> Result<String> {
    let output = self
      .command()
      .args(["rev-parse", "--verify", "--quiet", "HEAD^{commit}"])
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|e| self.spawn_error(e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || stdout.is_empty() {
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
      let message = if stderr.is_empty() {
        "no commit checked out".to_string()
      } else {
        stderr
      };
      return Err(Error::HeadUnresolved {
        dir: self.repo_dir.as_deref().unwrap_or(Path::new(".")).to_path_buf(),
        message,
      });
    }

    debug!(head = %stdout, "resolved HEAD");
    Ok(stdout)
  }
}

impl Pusher for GitPusher {
  async fn push(&self, remote: &str, refspec: &str) -> Result<()> {
    let mut command = self.command();
    command
      .arg("push")
      .arg(remote)
      .arg(refspec)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::inherit());

    debug!(program = %self.program, remote, refspec, "spawning git push");

    // Keep git's stdout out of the summary; progress and errors stay on stderr.
    let output = command.output().await.map_err(|e| self.spawn_error(e))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
      debug!(stdout = %stdout.trim(), "git push output");
    }

    if !output.status.success() {
      return Err(Error::PushFailed {
        refspec: refspec.to_string(),
        code: output.status.code(),
      });
    }

    Ok(())
  }
}
