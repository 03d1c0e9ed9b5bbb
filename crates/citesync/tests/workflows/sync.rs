use std::fs;

use super::*;

fn config() -> Config { Config::default() }

#[tokio::test]
async fn test_placeholder_subject_is_untouched() -> TestResult<()> {
  let document = author_document(citesync::config::PLACEHOLDER_PROFILE_LINK, "Bio\n");
  let root = site(&[("admin", &document)]);
  let source = CannedListing::new(LISTING);

  let outcome = Subject::new(root.path().join("content/authors/admin")).sync(&source, &config()).await?;

  assert!(matches!(outcome, SyncOutcome::Skipped));
  assert!(source.requests().is_empty());
  assert_eq!(fs::read_to_string(index_of(root.path(), "admin"))?, document);
  Ok(())
}

#[tokio::test]
async fn test_sync_appends_five_newest_records() -> TestResult<()> {
  let document = author_document(PROFILE, "Ada works on engines.\n");
  let root = site(&[("ada", &document)]);
  let source = CannedListing::new(LISTING);

  let outcome = Subject::new(root.path().join("content/authors/ada")).sync(&source, &config()).await?;
  let SyncOutcome::Updated(update) = outcome else { panic!("expected an update") };

  assert_eq!(source.requests(), [PROFILE]);
  assert_eq!(update.records.len(), 5);
  assert!(!update.replaced);
  assert_eq!(update.link.author_id().as_deref(), Some("ADA0001"));

  let written = fs::read_to_string(index_of(root.path(), "ada"))?;
  assert_eq!(written, update.contents);
  assert!(written.starts_with(&document));
  assert!(written.ends_with(&format!("{END_MARKER}\n\n")));
  assert!(written.contains(
    "## Publications\n- **Sketch of the Analytical Engine, Revisited** (2024)\n  - A Lovelace, C Babbage\n"
  ));
  assert!(!written.contains("Translating Menabrea"));
  Ok(())
}

#[tokio::test]
async fn test_two_record_scenario_without_trailing_newline() -> TestResult<()> {
  let document = author_document(PROFILE, "Bio without newline");
  let root = site(&[("ada", &document)]);
  let html = r#"<table>
    <tr class="gsc_a_tr"><td class="gsc_a_t"><a>A</a><div>X, Y</div></td><td class="gsc_a_y">2020</td></tr>
    <tr class="gsc_a_tr"><td class="gsc_a_t"><a>B</a><div>Z</div></td><td class="gsc_a_y">2019</td></tr>
    <tr class="gsc_a_tr"><td class="gsc_a_t"><a>C</a><div>W</div></td><td class="gsc_a_y">2018</td></tr>
  </table>"#;
  let source = CannedListing::new(html);

  let config = config().with_limit(Some(2));
  Subject::new(root.path().join("content/authors/ada")).sync(&source, &config).await?;

  let expected = format!(
    "{document}\n{START_MARKER}\n<!-- This content is automatically generated by get_citations.py. \
     Don't touch -->\n\n\n## Publications\n- **A** (2020)\n  - X, Y\n- **B** (2019)\n  - \
     Z\n{END_MARKER}\n\n"
  );
  assert_eq!(fs::read_to_string(index_of(root.path(), "ada"))?, expected);
  Ok(())
}

#[tokio::test]
async fn test_rerun_replaces_previous_block() -> TestResult<()> {
  let document = author_document(PROFILE, "Bio\n");
  let root = site(&[("ada", &document)]);
  let subject = Subject::new(root.path().join("content/authors/ada"));

  subject.sync(&CannedListing::new(LISTING), &config()).await?;
  let fresher = r#"<table><tr class="gsc_a_tr"><td class="gsc_a_t"><a>Brand New</a><div>A Lovelace</div></td><td class="gsc_a_y">2025</td></tr></table>"#;
  let outcome = subject.sync(&CannedListing::new(fresher), &config()).await?;

  let SyncOutcome::Updated(update) = outcome else { panic!("expected an update") };
  assert!(update.replaced);

  let written = fs::read_to_string(index_of(root.path(), "ada"))?;
  assert_eq!(written.matches(START_MARKER).count(), 1);
  assert_eq!(written.matches(END_MARKER).count(), 1);
  assert!(written.contains("- **Brand New** (2025)\n  - A Lovelace\n"));
  assert!(!written.contains("Bernoulli"));
  assert_eq!(citesync::document::strip_generated_block(&written), document);
  Ok(())
}

#[tokio::test]
async fn test_plan_does_not_write() -> TestResult<()> {
  let document = author_document(PROFILE, "Bio\n");
  let root = site(&[("ada", &document)]);

  let outcome =
    Subject::new(root.path().join("content/authors/ada")).plan(&CannedListing::new(LISTING), &config()).await?;

  assert!(matches!(outcome, SyncOutcome::Updated(_)));
  assert_eq!(fs::read_to_string(index_of(root.path(), "ada"))?, document);
  Ok(())
}

#[tokio::test]
async fn test_malformed_row_policy() -> TestResult<()> {
  let document = author_document(PROFILE, "Bio\n");
  let html = r#"<table>
    <tr class="gsc_a_tr"><td class="gsc_a_t"><a>No authors here</a></td><td class="gsc_a_y">2021</td></tr>
    <tr class="gsc_a_tr"><td class="gsc_a_t"><a>Fine</a><div>A Lovelace</div></td><td class="gsc_a_y">2020</td></tr>
  </table>"#;

  let root = site(&[("ada", &document)]);
  let subject = Subject::new(root.path().join("content/authors/ada"));

  let aborted = subject.sync(&CannedListing::new(html), &config()).await;
  assert!(matches!(aborted, Err(CitesyncError::Extraction { row: 0, .. })));
  assert_eq!(fs::read_to_string(index_of(root.path(), "ada"))?, document);

  let skipping = config().with_row_policy(RowPolicy::Skip);
  subject.sync(&CannedListing::new(html), &skipping).await?;
  let written = fs::read_to_string(index_of(root.path(), "ada"))?;
  assert!(written.contains("- **Fine** (2020)"));
  assert!(!written.contains("No authors here"));
  Ok(())
}

#[tokio::test]
async fn test_fetch_failure_leaves_document_untouched() -> TestResult<()> {
  let document = author_document(PROFILE, "Bio\n");
  let root = site(&[("ada", &document)]);

  let result = Subject::new(root.path().join("content/authors/ada")).sync(&Offline, &config()).await;

  assert!(matches!(result, Err(CitesyncError::Io(_))));
  assert_eq!(fs::read_to_string(index_of(root.path(), "ada"))?, document);
  Ok(())
}

#[tokio::test]
async fn test_one_broken_subject_does_not_block_others() -> TestResult<()> {
  let good = author_document(PROFILE, "Bio\n");
  let placeholder = author_document(citesync::config::PLACEHOLDER_PROFILE_LINK, "Bio\n");
  let root = site(&[("ada", &good), ("broken", "no front matter at all\n"), ("charles", &placeholder)]);
  fs::create_dir_all(root.path().join("content/authors/empty"))?;
  let source = CannedListing::new(LISTING);

  let mut updated = Vec::new();
  let mut skipped = Vec::new();
  let mut failed = Vec::new();
  for subject in Subject::discover(root.path(), &config())? {
    match subject.sync(&source, &config()).await {
      Ok(SyncOutcome::Updated(_)) => updated.push(subject.name()),
      Ok(SyncOutcome::Skipped) => skipped.push(subject.name()),
      Err(e) => failed.push((subject.name(), e)),
    }
  }

  assert_eq!(updated, ["ada"]);
  assert_eq!(skipped, ["charles"]);
  let failed_names: Vec<_> = failed.iter().map(|(name, _)| name.as_str()).collect();
  assert_eq!(failed_names, ["broken", "empty"]);
  assert!(matches!(failed[0].1, CitesyncError::FrontMatter(_)));
  assert!(matches!(failed[1].1, CitesyncError::Io(_)));
  Ok(())
}
