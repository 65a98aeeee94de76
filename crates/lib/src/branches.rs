//! The fixed catalogue of build branches.
//!
//! Every item of either list maps to one remote branch named `build_<item>`.
//! Distribution codenames are pushed first, then target triples, each in the
//! order listed here.

use std::fmt;

use serde::Serialize;

/// Debian distribution codenames that get a build branch.
pub const DISTRIBUTIONS: [&str; 2] = ["bookworm", "trixie"];

/// Cross-compilation target triples that get a build branch.
pub const TARGET_TRIPLES: [&str; 5] = [
  "x86_64-unknown-linux-gnu",
  "x86_64-pc-windows-msvc",
  "x86_64-pc-windows-gnu",
  "x86_64-apple-darwin",
  "aarch64-apple-darwin",
];

/// Prefix shared by every build branch name.
pub const BRANCH_PREFIX: &str = "build_";

/// Which list a build branch comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BranchSource {
  Distribution,
  TargetTriple,
}

impl BranchSource {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Distribution => "distribution",
      Self::TargetTriple => "target-triple",
    }
  }
}

impl fmt::Display for BranchSource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// One entry of the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildBranch {
  pub source: BranchSource,
  pub item: &'static str,
}

impl BuildBranch {
  pub fn new(source: BranchSource, item: &'static str) -> Self {
    Self { source, item }
  }

  /// Short branch name, e.g. `build_bookworm`.
  pub fn branch_name(&self) -> String {
    format!("{}{}", BRANCH_PREFIX, self.item)
  }

  /// Fully qualified ref on the remote, e.g. `refs/heads/build_bookworm`.
  pub fn remote_ref(&self) -> String {
    format!("refs/heads/{}", self.branch_name())
  }

  /// Refspec mapping the local HEAD onto [`Self::remote_ref`].
  ///
  /// With `force` the refspec carries a leading `+` so the remote accepts
  /// non-fast-forward updates.
  pub fn refspec(&self, force: bool) -> String {
    let plus = if force { "+" } else { "" };
    format!("{}HEAD:{}", plus, self.remote_ref())
  }
}

impl fmt::Display for BuildBranch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.branch_name())
  }
}

/// All build branches in push order.
pub fn build_branches() -> Vec<BuildBranch> {
  DISTRIBUTIONS
    .iter()
    .map(|item| BuildBranch::new(BranchSource::Distribution, item))
    .chain(
      TARGET_TRIPLES
        .iter()
        .map(|item| BuildBranch::new(BranchSource::TargetTriple, item)),
    )
    .collect()
}
