use citesync::extract::extract_records;

use super::*;

#[test]
fn test_fixture_extracts_newest_first() -> TestResult<()> {
  let records = extract_records(LISTING.as_bytes(), Some(5)).resolve(RowPolicy::Abort)?;

  assert_eq!(records.len(), 5);
  assert_eq!(
    records[0],
    PublicationRecord::new("Sketch of the Analytical Engine, Revisited", "A Lovelace, C Babbage", "2024")
  );
  let years: Vec<_> = records.iter().map(|r| r.year.as_str()).collect();
  assert_eq!(years, ["2024", "2023", "2022", "2021", "2020"]);
  Ok(())
}

#[test]
fn test_fixture_unbounded_keeps_empty_year() -> TestResult<()> {
  let records = extract_records(LISTING.as_bytes(), None).resolve(RowPolicy::Abort)?;

  assert_eq!(records.len(), 7);
  let last = records.last().unwrap();
  assert_eq!(last.title, "An Undated Manuscript");
  assert_eq!(last.year, "");
  Ok(())
}

#[test]
fn test_limit_is_exact_below_row_count() {
  for k in 0..7 {
    let records = extract_records(LISTING.as_bytes(), Some(k)).resolve(RowPolicy::Abort).unwrap();
    assert_eq!(records.len(), k);
  }
}

#[test]
fn test_author_block_is_first_gray_line_only() -> TestResult<()> {
  let records = extract_records(LISTING.as_bytes(), Some(1)).resolve(RowPolicy::Abort)?;
  assert!(!records[0].authors.contains("Journal of Engines"));
  Ok(())
}
