//! Error type shared by the push driver and its git backend.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status used when no git exit code is available to propagate.
pub const GENERIC_FAILURE_CODE: i32 = 1;

/// Errors that can abort a push run.
#[derive(Debug, Error)]
pub enum Error {
  /// An environment override is set but cannot be used.
  #[error("environment variable {var} is not usable: {source}")]
  Env {
    var: &'static str,
    #[source]
    source: std::env::VarError,
  },

  /// The git executable could not be started.
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// HEAD does not resolve to a commit in the working directory.
  #[error("HEAD does not resolve to a commit in {dir}: {message}")]
  HeadUnresolved { dir: PathBuf, message: String },

  /// `git push` exited unsuccessfully.
  #[error("push of {refspec} failed with exit code {code:?}")]
  PushFailed { refspec: String, code: Option<i32> },

  /// Writing a diagnostic line failed.
  #[error("failed to write diagnostic: {0}")]
  Diagnostic(#[source] std::io::Error),
}

impl Error {
  /// Process exit status for this error.
  ///
  /// A failed push propagates git's own exit code. Everything else, including a
  /// push killed by a signal, maps to [`GENERIC_FAILURE_CODE`].
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::PushFailed { code: Some(code), .. } if *code != 0 => *code,
      _ => GENERIC_FAILURE_CODE,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
