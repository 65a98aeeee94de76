mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildbranch_lib::PushConfig;
use buildbranch_lib::error::GENERIC_FAILURE_CODE;

use crate::output::{OutputFormat, print_error};

/// Push the current commit to every build branch on origin.
///
/// Pushes HEAD to build_<codename> for each Debian codename, then to
/// build_<triple> for each target triple, stopping at the first failure.
#[derive(Parser)]
#[command(name = "push-build-branches")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Print what would be pushed without contacting the remote
  #[arg(long)]
  dry_run: bool,

  /// Force-update the remote branches
  #[arg(short, long)]
  force: bool,

  /// Run as if started in this directory
  #[arg(short = 'C', long = "repo", value_name = "DIR")]
  repo: Option<PathBuf>,

  /// Format of the final summary
  #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      let code = err
        .downcast_ref::<buildbranch_lib::Error>()
        .map(buildbranch_lib::Error::exit_code)
        .unwrap_or(GENERIC_FAILURE_CODE);
      ExitCode::from(u8::try_from(code).unwrap_or(1))
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let config = PushConfig {
    repo_dir: cli.repo.clone(),
    force: cli.force,
    dry_run: cli.dry_run,
    ..PushConfig::from_env()?
  };

  cmd::cmd_push(&config, cli.output)
}
