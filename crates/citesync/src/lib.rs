//! Citation list synchronisation for static author pages.
//!
//! `citesync` keeps the "Publications" section of a researcher's homepage in step with their
//! public citation profile. For every subject (an author folder holding a metadata document) it:
//!
//! - Reads the profile link configured in the document's front matter
//! - Fetches the public works listing behind that link
//! - Extracts title, author list and year for the most recent rows
//! - Replaces the generated block at the end of the document with a fresh rendering
//!
//! # Getting Started
//!
//! ```no_run
//! use citesync::{prelude::*, subject::Subject, Config, HttpSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::default();
//!   let source = HttpSource::new(&config)?;
//!
//!   for subject in Subject::discover(".", &config)? {
//!     let outcome = subject.sync(&source, &config).await?;
//!     println!("{}: {:?}", subject.name(), outcome);
//!   }
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`profile`]: Front matter decoding and profile link lookup
//! - [`retriever`]: Fetching the raw works listing
//! - [`extract`]: Turning listing HTML into [`PublicationRecord`]s
//! - [`document`]: Stripping, rendering and appending the generated block
//! - [`subject`]: Subject discovery and the per-subject pipeline
//! - [`config`]: Run configuration
//! - [`error`]: Error type and `Result` alias

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::BTreeMap,
  fmt::Display,
  path::{Path, PathBuf},
  time::Duration,
};

use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, trace, warn};
use url::Url;
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod profile;
pub mod retriever;
pub mod subject;

pub use crate::{
  config::{Config, RowPolicy},
  extract::PublicationRecord,
  profile::ProfileLink,
  retriever::{HttpSource, ListingSource},
};
use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use citesync::prelude::*;
///
/// fn example() -> Result<(), CitesyncError> { Ok(()) }
/// ```
pub mod prelude {
  pub use crate::{error::CitesyncError, retriever::ListingSource};
}
