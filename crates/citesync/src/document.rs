//! Maintaining the generated block inside a metadata document.
//!
//! The block is owned by this crate and regenerated in full on every run. It is delimited
//! by [`START_MARKER`] and [`END_MARKER`] lines and always sits at the end of the document,
//! followed by one blank line:
//!
//! ```text
//! <!-- PUBLICATIONS START -->
//! <!-- This content is automatically generated by get_citations.py. Don't touch -->
//!
//!
//! ## Publications
//! - **On Computable Numbers** (1936)
//!   - A Turing
//! <!-- PUBLICATIONS END -->
//!
//! ```
//!
//! # Examples
//!
//! ```
//! use citesync::{document, PublicationRecord};
//!
//! let original = "---\ntitle: Ada\n---\nBio.\n";
//! let records = [PublicationRecord::new("A", "X, Y", "2020")];
//!
//! let updated = document::update_document(original, &records);
//! assert!(updated.starts_with(original));
//! assert_eq!(document::strip_generated_block(&updated), original);
//! ```

use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

/// First line of the generated block.
pub const START_MARKER: &str = "<!-- PUBLICATIONS START -->";
/// Last line of the generated block.
pub const END_MARKER: &str = "<!-- PUBLICATIONS END -->";
/// Warning placed right after the start marker.
pub const NOTICE: &str =
  "<!-- This content is automatically generated by get_citations.py. Don't touch -->";
/// Section heading of the rendered list.
pub const HEADING: &str = "## Publications";

/// A line without its terminator.
fn content(line: &str) -> &str {
  line.strip_suffix('\n').map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

/// Whether a line is a blank separator.
fn is_blank(line: &str) -> bool { line.trim().is_empty() }

/// Line range of the first complete block: the first start marker and the first end
/// marker after it, both inclusive.
fn find_block(lines: &[&str]) -> Option<(usize, usize)> {
  let start = lines.iter().position(|line| content(line) == START_MARKER)?;
  let end = start + 1 + lines[start + 1..].iter().position(|line| content(line) == END_MARKER)?;
  Some((start, end))
}

/// Whether `document` holds a complete generated block.
pub fn contains_generated_block(document: &str) -> bool {
  find_block(&document.split_inclusive('\n').collect::<Vec<_>>()).is_some()
}

/// Removes every generated block from `document`.
///
/// Each block is removed from its start marker through its end marker, together with one
/// blank separator line. A blank line after the end marker is taken only when it ends the
/// document, as that is the separator [`append_block`] writes. Otherwise a blank line
/// preceding the start marker is taken. Everything else is kept, so a block in the middle
/// of a document leaves the surrounding paragraphs and their spacing intact. A start marker
/// without a later end marker, or no markers at all, leaves the document as is.
pub fn strip_generated_block(document: &str) -> String {
  let mut lines: Vec<&str> = document.split_inclusive('\n').collect();
  let mut removed = 0;

  while let Some((start, end)) = find_block(&lines) {
    let trailing_separator = end + 2 == lines.len() && is_blank(lines[end + 1]);
    let (from, to) = if trailing_separator {
      (start, end + 1)
    } else if start > 0 && is_blank(lines[start - 1]) {
      (start - 1, end)
    } else {
      (start, end)
    };
    lines.drain(from..=to);
    removed += 1;
  }

  if removed == 0 {
    debug!("No generated block found");
  } else {
    debug!("Removed {removed} generated block(s)");
  }
  lines.concat()
}

/// Renders `records` as a complete generated block, markers included.
pub fn render_block(records: &[PublicationRecord]) -> String {
  let mut block = format!("{START_MARKER}\n{NOTICE}\n\n\n{HEADING}\n");
  for record in records {
    block.push_str(&render_record(record));
  }
  block.push_str(END_MARKER);
  block.push('\n');
  block
}

/// Renders one record as its two list lines.
fn render_record(record: &PublicationRecord) -> String {
  format!("- **{}** ({})\n  - {}\n", record.title, record.year, record.authors)
}

/// Appends `block` to `document`, terminating the document's last line first and adding a
/// blank line after the block.
pub fn append_block(document: &str, block: &str) -> String {
  let mut updated = String::with_capacity(document.len() + block.len() + 2);
  updated.push_str(document);
  if !updated.ends_with('\n') {
    updated.push('\n');
  }
  updated.push_str(block);
  updated.push('\n');
  updated
}

/// Replaces any generated block in `document` with one rendered from `records`.
pub fn update_document(document: &str, records: &[PublicationRecord]) -> String {
  append_block(&strip_generated_block(document), &render_block(records))
}

/// Replaces the file at `path` with `contents`.
///
/// The contents go to a temporary file in the same directory which is renamed over
/// `path` only once fully written, so a failure leaves the original untouched.
pub fn write_atomically(path: impl AsRef<Path>, contents: &str) -> Result<()> {
  let path = path.as_ref();
  let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

  let mut file = NamedTempFile::new_in(dir)?;
  file.write_all(contents.as_bytes())?;
  file.as_file().sync_all()?;
  if let Ok(metadata) = std::fs::metadata(path) {
    file.as_file().set_permissions(metadata.permissions())?;
  }
  file.persist(path)?;
  trace!("Wrote {} bytes to {}", contents.len(), path.display());
  Ok(())
}
