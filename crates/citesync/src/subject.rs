//! Subject discovery and the per-subject sync pipeline.
//!
//! A subject is one folder under the site's authors directory. Syncing it runs the steps
//! strictly in order (read profile link, fetch listing, extract records, update document)
//! and touches nothing but that subject's own metadata document.
//!
//! # Examples
//!
//! Preview the update without writing it:
//!
//! ```no_run
//! use citesync::{subject::{Subject, SyncOutcome}, Config, HttpSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let source = HttpSource::new(&config)?;
//! let subject = Subject::new("content/authors/admin");
//!
//! if let SyncOutcome::Updated(update) = subject.plan(&source, &config).await? {
//!   println!("{}", update.contents);
//! }
//! # Ok(())
//! # }
//! ```

use crate::{document::contains_generated_block, extract::extract_records, profile::AuthorMetadata};

use super::*;

/// One author folder holding a metadata document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Subject {
  /// The subject's folder.
  path: PathBuf,
}

/// What syncing a subject produced.
#[derive(Debug)]
pub enum SyncOutcome {
  /// No profile link is configured; the document was left alone.
  Skipped,
  /// A new generated block was computed (and, for [`Subject::sync`], written).
  Updated(Update),
}

/// A computed replacement for a subject's metadata document.
#[derive(Debug, Clone)]
pub struct Update {
  /// Document to overwrite.
  pub path:     PathBuf,
  /// Profile the records came from.
  pub link:     ProfileLink,
  /// Records rendered into the new block.
  pub records:  Vec<PublicationRecord>,
  /// Whether the document already held a generated block.
  pub replaced: bool,
  /// Full new document.
  pub contents: String,
}

impl Update {
  /// Writes the new document in place of the old one.
  pub fn apply(&self) -> Result<()> { document::write_atomically(&self.path, &self.contents) }
}

impl Subject {
  /// A subject rooted at `path`.
  pub fn new(path: impl AsRef<Path>) -> Self { Self { path: path.as_ref().to_path_buf() } }

  /// Lists the subject folders under `{root}/{authors_dir}`, sorted by path.
  ///
  /// A missing authors directory yields no subjects. Plain files next to the subject
  /// folders are ignored.
  pub fn discover(root: impl AsRef<Path>, config: &Config) -> Result<Vec<Self>> {
    let base = root.as_ref().join(&config.authors_dir);
    let pattern = format!("{}/*", glob::Pattern::escape(&base.to_string_lossy()));
    debug!("Discovering subjects with pattern {}", pattern);

    let mut subjects = Vec::new();
    for entry in glob::glob(&pattern)? {
      let path = entry.map_err(glob::GlobError::into_error)?;
      if path.is_dir() {
        subjects.push(Self::new(path));
      }
    }
    subjects.sort();
    Ok(subjects)
  }

  /// The subject's folder.
  pub fn path(&self) -> &Path { &self.path }

  /// Folder name, used as the subject's display name.
  pub fn name(&self) -> String {
    self
      .path
      .file_name()
      .map_or_else(|| self.path.display().to_string(), |name| name.to_string_lossy().into_owned())
  }

  /// Path of the subject's metadata document.
  pub fn document_path(&self, config: &Config) -> PathBuf { self.path.join(&config.index_file) }

  /// Computes the updated document without writing it.
  ///
  /// # Errors
  ///
  /// Fails if the document cannot be read or decoded, the listing cannot be fetched, or
  /// (under [`RowPolicy::Abort`]) a listing row is malformed.
  pub async fn plan<S>(&self, source: &S, config: &Config) -> Result<SyncOutcome>
  where S: ListingSource + ?Sized {
    let path = self.document_path(config);
    let current = tokio::fs::read_to_string(&path).await?;

    let Some(link) = AuthorMetadata::parse(&current)?.profile_link(config)? else {
      info!("{}: no profile link configured, skipping", self.name());
      return Ok(SyncOutcome::Skipped);
    };
    debug!(
      "{}: fetching works of author {}",
      self.name(),
      link.author_id().as_deref().unwrap_or("<unknown>")
    );

    let raw_html = source.fetch_listing(&link).await?;
    let extraction = extract_records(&raw_html, config.limit);
    if extraction.malformed() > 0 {
      warn!("{}: {} malformed listing row(s)", self.name(), extraction.malformed());
    }
    let records = extraction.resolve(config.row_policy)?;

    let contents = document::update_document(&current, &records);
    Ok(SyncOutcome::Updated(Update {
      path,
      link,
      records,
      replaced: contains_generated_block(&current),
      contents,
    }))
  }

  /// Computes the updated document and writes it back.
  pub async fn sync<S>(&self, source: &S, config: &Config) -> Result<SyncOutcome>
  where S: ListingSource + ?Sized {
    let outcome = self.plan(source, config).await?;
    if let SyncOutcome::Updated(update) = &outcome {
      update.apply()?;
      info!("{}: wrote {} record(s) to {}", self.name(), update.records.len(), update.path.display());
    }
    Ok(outcome)
  }
}
