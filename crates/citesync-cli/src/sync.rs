//! The run over every discovered subject.

use super::*;

/// Totals for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
  /// Subjects whose block was written, or would be in a dry run
  pub updated: usize,
  /// Subjects without a configured profile link
  pub skipped: usize,
  /// Subjects that ended in an error
  pub failed:  usize,
}

/// Syncs every subject under the site root, one after another.
///
/// A failing subject is reported and counted; the remaining subjects are still processed.
pub async fn sync_all(cli: &Cli, config: &Config) -> Result<Summary> {
  let source = HttpSource::new(config)?;
  let subjects = Subject::discover(&cli.root, config)?;
  if subjects.is_empty() {
    reply(ResponseContent::Warning(&format!(
      "No subjects found under {}",
      cli.root.join(&config.authors_dir).display()
    )));
  }

  let mut summary = Summary::default();
  for subject in &subjects {
    reply(ResponseContent::Subject(subject));

    let result = if cli.dry_run {
      subject.plan(&source, config).await
    } else {
      subject.sync(&source, config).await
    };

    match result {
      Ok(SyncOutcome::Skipped) => {
        reply(ResponseContent::Info("Hasn't updated the citation profile link, skipping."));
        summary.skipped += 1;
      },
      Ok(SyncOutcome::Updated(update)) => {
        reply(ResponseContent::Records(&update.records));
        if cli.dry_run {
          reply(ResponseContent::Block(&citesync::document::render_block(&update.records)));
          reply(ResponseContent::Info(&format!(
            "Dry run: {} left untouched",
            update.path.display()
          )));
        } else {
          let verb = if update.replaced { "Replaced" } else { "Added" };
          reply(ResponseContent::Success(&format!(
            "{verb} {} publication(s) in {}",
            update.records.len(),
            update.path.display()
          )));
        }
        summary.updated += 1;
      },
      Err(e) => {
        error!("Failed to sync {}: {e}", subject.path().display());
        reply(ResponseContent::Error(&e));
        summary.failed += 1;
      },
    }
  }

  reply(ResponseContent::Summary(&summary));
  Ok(summary)
}
