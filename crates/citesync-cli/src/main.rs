//! Command line entry point for syncing citation lists into author pages.
//!
//! Run from the root of a static site. Every folder under `content/authors/` whose
//! `_index.md` carries a citation profile link gets its "Publications" block regenerated
//! from the five most recent works on that profile.
//!
//! # Usage
//!
//! ```bash
//! # Sync every author under ./content/authors
//! citesync
//!
//! # Preview the generated blocks for another site without writing anything
//! citesync --root ../homepage --dry-run
//!
//! # Ten works per author, tolerating malformed listing rows, with debug logs
//! citesync --limit 10 --skip-bad-rows -vvv
//! ```
//!
//! Every subject is attempted even if an earlier one fails; the exit status is non-zero
//! when any subject failed.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use citesync::{
  error::CitesyncError,
  subject::{Subject, SyncOutcome},
  Config, HttpSource, PublicationRecord, RowPolicy,
};
use clap::{builder::ArgAction, Parser};
use tracing::{debug, error, trace};
use tracing_appender::{
  non_blocking::WorkerGuard,
  rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::EnvFilter;

pub mod error;
pub mod interaction;
pub mod sync;

use crate::{error::*, interaction::*, sync::*};

/// Command line interface configuration and argument parsing
#[derive(Parser, Debug)]
#[command(author, version, about = "Sync public citation lists into author pages")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Site root containing the authors directory.
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// TOML configuration file. Without one, built-in defaults are used.
  #[arg(long, short)]
  config: Option<PathBuf>,

  /// Number of works to render per author; 0 renders all of them.
  #[arg(long, short)]
  limit: Option<usize>,

  /// Drop malformed listing rows instead of failing the author.
  #[arg(long)]
  skip_bad_rows: bool,

  /// Print the generated blocks instead of writing them.
  #[arg(long)]
  dry_run: bool,

  /// Write logs to this file instead of stderr.
  #[arg(long)]
  log_file: Option<PathBuf>,
}

impl Cli {
  /// Loads the configuration file, if any, and layers the flags over it.
  fn config(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::from_path(path)?,
      None => Config::default(),
    };
    if let Some(limit) = self.limit {
      config = config.with_limit(Some(limit));
    }
    if self.skip_bad_rows {
      config = config.with_row_policy(RowPolicy::Skip);
    }
    trace!("Effective configuration: {:?}", config);
    Ok(config)
  }
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set. With a log file, the returned guard must be held
/// until exit so buffered lines are flushed.
fn setup_logging(verbosity: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  let Some(path) = log_file else {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .with_file(true)
      .with_line_number(true)
      .with_target(true)
      .init();
    return Ok(None);
  };

  let file_name =
    path.file_name().ok_or_else(|| CliError::LogFile(path.display().to_string()))?;
  let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
  let appender = RollingFileAppender::builder()
    .rotation(Rotation::NEVER)
    .filename_prefix(file_name.to_string_lossy())
    .build(dir)
    .map_err(|e| CliError::LogFile(format!("{}: {e}", path.display())))?;
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
  Ok(Some(guard))
}

/// Entry point for the citesync CLI application
///
/// # Errors
///
/// Returns [`CliError`] if the configuration cannot be loaded, the HTTP client cannot be
/// built, subject discovery fails, or at least one subject failed to sync.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let _guard = setup_logging(cli.verbose, cli.log_file.as_deref())?;
  debug!("Parsed arguments: {:?}", cli);

  let config = cli.config()?;
  let summary = sync_all(&cli, &config).await?;

  if summary.failed > 0 {
    return Err(CliError::SubjectsFailed(summary.failed));
  }
  Ok(())
}
