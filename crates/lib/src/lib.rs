//! buildbranch-lib: push the current commit to every build branch.
//!
//! - `branches`: the fixed catalogue of `build_<item>` branches
//! - `driver`: the sequential, fail-fast push loop
//! - `git`: the `Pusher` seam and its `git` executable backend
//! - `config`: run configuration and environment overrides

pub mod branches;
pub mod config;
pub mod driver;
pub mod error;
pub mod git;

pub use branches::{BranchSource, BuildBranch, build_branches};
pub use config::PushConfig;
pub use driver::{PushReport, PushedRef, push_all};
pub use error::{Error, Result};
pub use git::{GitPusher, Pusher};
