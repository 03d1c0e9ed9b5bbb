//! Turning a works listing into [`PublicationRecord`]s.
//!
//! The listing is an HTML table with one `tr.gsc_a_tr` per work. Within a row, the
//! `td.gsc_a_t` cell holds the title link followed by a block of author names, and the
//! `td.gsc_a_y` cell holds the year:
//!
//! ```html
//! <tr class="gsc_a_tr">
//!   <td class="gsc_a_t">
//!     <a class="gsc_a_at" href="...">On Computable Numbers</a>
//!     <div class="gs_gray">A Turing</div>
//!     <div class="gs_gray">Proceedings of the London Mathematical Society</div>
//!   </td>
//!   <td class="gsc_a_c">...</td>
//!   <td class="gsc_a_y"><span class="gsc_a_h">1936</span></td>
//! </tr>
//! ```
//!
//! Text is passed through exactly as it appears in the page; rows keep their document
//! order.

use scraper::{ElementRef, Html, Selector};

use super::*;

lazy_static! {
  /// One work in the listing.
  static ref ROW: Selector = Selector::parse("tr.gsc_a_tr").unwrap();
  /// Cell holding the title link and author block.
  static ref TITLE_CELL: Selector = Selector::parse("td.gsc_a_t").unwrap();
  /// Cell holding the publication year.
  static ref YEAR_CELL: Selector = Selector::parse("td.gsc_a_y").unwrap();
  /// Title link inside the title cell.
  static ref LINK: Selector = Selector::parse("a").unwrap();
  /// Author block inside the title cell.
  static ref AUTHORS: Selector = Selector::parse("div").unwrap();
}

/// One work from a subject's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRecord {
  /// Title as shown in the listing
  pub title:   String,
  /// Author line, free-form
  pub authors: String,
  /// Year as shown in the listing; may be empty
  pub year:    String,
}

impl PublicationRecord {
  /// Convenience constructor.
  pub fn new(title: impl Into<String>, authors: impl Into<String>, year: impl Into<String>) -> Self {
    Self { title: title.into(), authors: authors.into(), year: year.into() }
  }
}

/// Result of extracting a listing: one outcome per examined row, in document order.
#[derive(Debug, Default)]
pub struct Extraction {
  /// Per-row outcomes.
  rows: Vec<Result<PublicationRecord>>,
}

impl Extraction {
  /// The per-row outcomes.
  pub fn rows(&self) -> &[Result<PublicationRecord>] { &self.rows }

  /// Number of rows that could not be turned into a record.
  pub fn malformed(&self) -> usize { self.rows.iter().filter(|row| row.is_err()).count() }

  /// Collapses the outcomes into records according to `policy`.
  ///
  /// With [`RowPolicy::Abort`] the first malformed row is returned as the error. With
  /// [`RowPolicy::Skip`] malformed rows are logged and dropped.
  pub fn resolve(self, policy: RowPolicy) -> Result<Vec<PublicationRecord>> {
    match policy {
      RowPolicy::Abort => self.rows.into_iter().collect(),
      RowPolicy::Skip => Ok(
        self
          .rows
          .into_iter()
          .filter_map(|row| row.inspect_err(|e| warn!("Skipping listing row: {e}")).ok())
          .collect(),
      ),
    }
  }
}

/// Parses `raw_html` and extracts a record from each of the first `limit` rows.
///
/// `limit` bounds the rows examined, so a malformed row still counts towards it. `None`
/// examines every row.
pub fn extract_records(raw_html: &[u8], limit: Option<usize>) -> Extraction {
  let html = String::from_utf8_lossy(raw_html);
  let document = Html::parse_document(&html);

  let rows: Vec<_> = document
    .select(&ROW)
    .take(limit.unwrap_or(usize::MAX))
    .enumerate()
    .map(|(index, row)| parse_row(index, row))
    .collect();

  debug!("Extracted {} listing rows", rows.len());
  Extraction { rows }
}

/// Builds a record from a single listing row.
fn parse_row(index: usize, row: ElementRef<'_>) -> Result<PublicationRecord> {
  let missing = |missing| CitesyncError::Extraction { row: index, missing };

  let title_cell = row.select(&TITLE_CELL).next().ok_or_else(|| missing("title cell"))?;
  let title = title_cell.select(&LINK).next().ok_or_else(|| missing("title link"))?;
  let authors = title_cell.select(&AUTHORS).next().ok_or_else(|| missing("author block"))?;
  let year = row.select(&YEAR_CELL).next().ok_or_else(|| missing("year cell"))?;

  Ok(PublicationRecord {
    title:   title.text().collect(),
    authors: authors.text().collect(),
    year:    year.text().collect(),
  })
}
