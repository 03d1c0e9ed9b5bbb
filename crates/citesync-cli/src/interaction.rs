//! Styled progress output on stdout.

use console::style;

use super::*;

/// Prefix for informational messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for the subject currently being processed
pub static WORKING_PREFIX: &str = "» ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Prefix for warnings
pub static WARNING_PREFIX: &str = "! ";
/// Tree branch for a record that has a sibling after it
pub static ITEM_PREFIX: &str = "├─";
/// Tree branch for the last record
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Separator between subjects
pub static RULE: &str = "──────────────────────────────────────────────────";

/// Something worth telling the user about.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Start of a subject's section.
  Subject(&'a Subject),
  /// Records that were (or would be) written.
  Records(&'a [PublicationRecord]),
  /// A raw block of text, printed verbatim.
  Block(&'a str),
  /// A completed write.
  Success(&'a str),
  /// Neutral progress, such as a skipped subject or a dry run.
  Info(&'a str),
  /// Something odd that does not fail the run.
  Warning(&'a str),
  /// The error a subject ended with.
  Error(&'a CitesyncError),
  /// End-of-run totals.
  Summary(&'a Summary),
}

/// Prints `content` to stdout.
pub fn reply(content: ResponseContent) {
  match content {
    ResponseContent::Subject(subject) => {
      println!("{}", style(RULE).dim());
      println!("{}{}", style(WORKING_PREFIX).cyan(), style(subject.path().display()).bold());
    },
    ResponseContent::Records(records) =>
      for (i, record) in records.iter().enumerate() {
        let prefix = if i + 1 == records.len() { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
        println!(
          "   {} {} ({})",
          style(prefix).dim(),
          style(&record.title).white(),
          style(&record.year).yellow()
        );
      },
    ResponseContent::Block(block) => print!("{block}"),
    ResponseContent::Success(message) => println!("{}{}", style(SUCCESS_PREFIX).green(), message),
    ResponseContent::Info(message) => println!("{}{}", style(INFO_PREFIX).blue(), message),
    ResponseContent::Warning(message) => println!("{}{}", style(WARNING_PREFIX).yellow(), message),
    ResponseContent::Error(error) =>
      println!("{}{}", style(ERROR_PREFIX).red(), style(error).red()),
    ResponseContent::Summary(summary) => {
      println!("{}", style(RULE).dim());
      println!(
        "{} updated, {} skipped, {} failed",
        style(summary.updated).green(),
        style(summary.skipped).blue(),
        style(summary.failed).red()
      );
    },
  }
}
