//! Error types for the citesync library.
//!
//! A missing profile link and a document without a generated block are not errors: the
//! first surfaces as `Ok(None)` from [`crate::profile::read_profile_link`], the second
//! leaves the document unchanged. Everything else that can go wrong while syncing a
//! subject is a [`CitesyncError`].
//!
//! # Examples
//!
//! ```no_run
//! use citesync::{error::CitesyncError, profile::read_profile_link, Config};
//!
//! # fn example() -> Result<(), CitesyncError> {
//! match read_profile_link("content/authors/admin", &Config::default()) {
//!   Ok(Some(link)) => println!("Profile: {link}"),
//!   Ok(None) => println!("No profile configured"),
//!   Err(CitesyncError::Io(e)) => println!("Could not read the document: {e}"),
//!   Err(e) => println!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`citesync`](crate) crate.
pub type Result<T> = core::result::Result<T, CitesyncError>;

/// Errors that can occur while syncing a subject's citation list.
#[derive(Error, Debug)]
pub enum CitesyncError {
  /// A file system operation failed.
  ///
  /// This covers a missing metadata document as well as failures reading or
  /// writing it.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The metadata document's header could not be located.
  ///
  /// The string describes what was wrong, e.g. an opening fence without a
  /// closing one.
  #[error("Malformed front matter: {0}")]
  FrontMatter(String),

  /// A YAML front matter block did not match the expected schema.
  #[error(transparent)]
  Yaml(#[from] serde_yaml::Error),

  /// A TOML front matter block or configuration file did not match the expected schema.
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configured profile link is not a valid absolute URL.
  #[error("Invalid profile link \"{link}\": {source}")]
  InvalidProfileLink {
    /// The link as written in the metadata document.
    link:   String,
    /// The underlying parse failure.
    source: url::ParseError,
  },

  /// A network request failed or returned a non-success status.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A listing row lacked one of the cells a record is built from.
  #[error("Row {row} of the listing has no {missing}")]
  Extraction {
    /// Zero-based index of the row within the listing.
    row:     usize,
    /// Human readable name of the missing element.
    missing: &'static str,
  },

  /// The updated document could not be moved over the original.
  #[error(transparent)]
  Persist(#[from] tempfile::PersistError),

  /// A subject discovery pattern was invalid.
  #[error(transparent)]
  Pattern(#[from] glob::PatternError),

  /// Generic configuration error.
  #[error("{0}")]
  Config(String),
}
