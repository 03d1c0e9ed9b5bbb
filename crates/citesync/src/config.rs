//! Run configuration.
//!
//! Every field has a default, so a run with no configuration file behaves like the
//! historical script: `content/authors/*/_index.md`, five records per subject, the
//! `graduation-cap` social link as the profile. A TOML file can override any subset:
//!
//! ```toml
//! authors_dir  = "content/people"
//! limit        = 10
//! row_policy   = "skip"
//! timeout_secs = 10
//!
//! [headers]
//! Accept-Language = "en"
//! ```
//!
//! `limit = 0` lifts the row limit entirely.

use super::*;

/// Social-link icon under which the profile link is stored.
pub const DEFAULT_PROFILE_ICON: &str = "graduation-cap";

/// Profile link shipped with the site theme's example author.
///
/// A subject still carrying this link has never configured their own profile and is
/// skipped.
pub const PLACEHOLDER_PROFILE_LINK: &str =
  "https://scholar.google.co.uk/citations?user=sIwtMXoAAAAJ";

/// Number of listing rows rendered per subject.
pub const DEFAULT_LIMIT: usize = 5;

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The listing is served differently (or not at all) to clients without a browser agent.
pub const DEFAULT_USER_AGENT: &str =
  "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// What to do with a listing row that lacks a title, author or year cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
  /// Fail the whole subject on the first malformed row.
  #[default]
  Abort,
  /// Log the malformed row and keep the rest.
  Skip,
}

/// Settings shared by every subject in a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory holding one folder per subject, relative to the site root.
  pub authors_dir:      PathBuf,
  /// File name of the metadata document inside each subject folder.
  pub index_file:       String,
  /// Maximum number of listing rows to render, `None` for all of them.
  #[serde(deserialize_with = "deserialize_limit")]
  pub limit:            Option<usize>,
  /// Social-link icon whose link is the profile page.
  pub profile_icon:     String,
  /// Link meaning "not configured".
  pub placeholder_link: String,
  /// Per-request timeout in seconds.
  pub timeout_secs:     u64,
  /// Extra headers sent with the listing request.
  pub headers:          BTreeMap<String, String>,
  /// Handling of malformed listing rows.
  pub row_policy:       RowPolicy,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      authors_dir:      PathBuf::from("content/authors"),
      index_file:       "_index.md".to_string(),
      limit:            Some(DEFAULT_LIMIT),
      profile_icon:     DEFAULT_PROFILE_ICON.to_string(),
      placeholder_link: PLACEHOLDER_PROFILE_LINK.to_string(),
      timeout_secs:     DEFAULT_TIMEOUT_SECS,
      headers:          BTreeMap::from([(
        "User-Agent".to_string(),
        DEFAULT_USER_AGENT.to_string(),
      )]),
      row_policy:       RowPolicy::default(),
    }
  }
}

impl Config {
  /// Parses a configuration from a TOML string; absent fields keep their defaults.
  pub fn from_toml_str(toml_str: &str) -> Result<Self> { Ok(toml::from_str(toml_str)?) }

  /// Reads a TOML configuration file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// Sets the row limit. `Some(0)` is treated as no limit.
  pub fn with_limit(mut self, limit: Option<usize>) -> Self {
    self.limit = limit.filter(|&n| n > 0);
    self
  }

  /// Sets the malformed-row policy.
  pub fn with_row_policy(mut self, row_policy: RowPolicy) -> Self {
    self.row_policy = row_policy;
    self
  }

  /// Sets the subject directory, relative to the site root.
  pub fn with_authors_dir(mut self, authors_dir: impl AsRef<Path>) -> Self {
    self.authors_dir = authors_dir.as_ref().to_path_buf();
    self
  }

  /// The per-request timeout.
  pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

/// Reads the row limit, mapping `0` to "no limit".
fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where D: Deserializer<'de> {
  let limit = usize::deserialize(deserializer)?;
  Ok(Some(limit).filter(|&n| n > 0))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_match_historical_behaviour() {
    let config = Config::default();
    assert_eq!(config.authors_dir, PathBuf::from("content/authors"));
    assert_eq!(config.index_file, "_index.md");
    assert_eq!(config.limit, Some(5));
    assert_eq!(config.profile_icon, "graduation-cap");
    assert_eq!(config.placeholder_link, PLACEHOLDER_PROFILE_LINK);
    assert_eq!(config.row_policy, RowPolicy::Abort);
    assert!(config.headers.contains_key("User-Agent"));
  }

  #[test]
  fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml_str(
      r#"
      limit = 10
      row_policy = "skip"

      [headers]
      Accept-Language = "en"
      "#,
    )
    .unwrap();

    assert_eq!(config.limit, Some(10));
    assert_eq!(config.row_policy, RowPolicy::Skip);
    assert_eq!(config.index_file, "_index.md");
    assert_eq!(config.timeout(), Duration::from_secs(30));
    // A [headers] table replaces the default map wholesale.
    assert_eq!(config.headers.get("Accept-Language").map(String::as_str), Some("en"));
    assert!(!config.headers.contains_key("User-Agent"));
  }

  #[test]
  fn test_zero_limit_is_unbounded() {
    let config = Config::from_toml_str("limit = 0").unwrap();
    assert_eq!(config.limit, None);
    assert_eq!(Config::default().with_limit(Some(0)).limit, None);
    assert_eq!(Config::default().with_limit(Some(3)).limit, Some(3));
  }

  #[test]
  fn test_unknown_row_policy_is_rejected() {
    assert!(matches!(
      Config::from_toml_str(r#"row_policy = "retry""#),
      Err(CitesyncError::TomlDe(_))
    ));
  }

  #[test]
  fn test_from_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("citesync.toml");
    std::fs::write(&path, "authors_dir = \"content/people\"\n").unwrap();

    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.authors_dir, PathBuf::from("content/people"));

    assert!(matches!(Config::from_path(dir.path().join("missing.toml")), Err(CitesyncError::Io(_))));
  }
}
