//! Error types for the `citesync` binary.

use thiserror::Error;

/// Error type alias used throughout the binary.
pub type Result<T> = core::result::Result<T, CliError>;

/// Errors that end a run.
#[derive(Error, Debug)]
pub enum CliError {
  /// Setup failed before any subject was processed.
  #[error(transparent)]
  Citesync(#[from] citesync::error::CitesyncError),

  /// Terminal or log file output failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The log file path has no file name component.
  #[error("Invalid log file path: {0}")]
  LogFile(String),

  /// Every subject was attempted but some of them failed.
  #[error("{0} subject(s) failed to sync")]
  SubjectsFailed(usize),
}
