//! Subject metadata and profile link lookup.
//!
//! A subject's metadata document starts with a front matter header, either YAML between
//! `---` fences or TOML between `+++` fences, followed by a free-form Markdown body. The
//! header carries a `social` list of `{icon, link}` entries; the entry whose icon matches
//! [`Config::profile_icon`] points at the subject's citation profile.
//!
//! ```
//! use citesync::{profile::AuthorMetadata, Config};
//!
//! let document = r#"---
//! title: Ada
//! social:
//! - icon: graduation-cap
//!   link: https://scholar.google.com/citations?user=abc123
//! ---
//! Body text
//! "#;
//!
//! let metadata = AuthorMetadata::parse(document).unwrap();
//! let link = metadata.profile_link(&Config::default()).unwrap().unwrap();
//! assert_eq!(link.author_id().as_deref(), Some("abc123"));
//! ```

use super::*;

/// Header format of a metadata document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatter<'a> {
  /// YAML between `---` fences.
  Yaml(&'a str),
  /// TOML between `+++` fences.
  Toml(&'a str),
}

impl<'a> FrontMatter<'a> {
  /// Splits a document into its header and body.
  ///
  /// The opening fence must be the first line; the header runs until the next line
  /// consisting of the same fence. Trailing whitespace on fence lines is ignored.
  pub fn split(document: &'a str) -> Result<(Self, &'a str)> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    let mut lines = document.split_inclusive('\n');
    let opening = lines.next().map(str::trim_end).unwrap_or_default();
    let fence = match opening {
      "---" => "---",
      "+++" => "+++",
      _ => return Err(CitesyncError::FrontMatter("document has no front matter header".into())),
    };

    let header_start = document.split_inclusive('\n').next().map_or(0, str::len);
    let mut offset = header_start;
    for line in lines {
      if line.trim_end() == fence {
        let header = &document[header_start..offset];
        let body = &document[offset + line.len()..];
        let front_matter = match fence {
          "---" => FrontMatter::Yaml(header),
          _ => FrontMatter::Toml(header),
        };
        return Ok((front_matter, body));
      }
      offset += line.len();
    }

    Err(CitesyncError::FrontMatter(format!("no closing `{fence}` fence")))
  }
}

/// The part of a subject's front matter this crate reads.
///
/// Any other header fields are ignored and left untouched on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthorMetadata {
  /// Social links shown on the author card.
  #[serde(default)]
  pub social: Vec<SocialLink>,
}

/// One entry of the `social` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
  /// Icon name, doubling as the link's key.
  pub icon: String,
  /// Target of the link.
  pub link: String,
}

impl AuthorMetadata {
  /// Decodes the front matter of a metadata document.
  pub fn parse(document: &str) -> Result<Self> {
    let metadata = match FrontMatter::split(document)?.0 {
      FrontMatter::Yaml(header) if header.trim().is_empty() => Self::default(),
      FrontMatter::Yaml(header) => serde_yaml::from_str(header)?,
      FrontMatter::Toml(header) => toml::from_str(header)?,
    };
    Ok(metadata)
  }

  /// Maps icon names to links. A later entry with the same icon replaces an earlier one.
  pub fn social_links(&self) -> BTreeMap<&str, &str> {
    self.social.iter().map(|entry| (entry.icon.as_str(), entry.link.as_str())).collect()
  }

  /// The configured profile link, or `None` if the subject has none or still carries the
  /// placeholder.
  pub fn profile_link(&self, config: &Config) -> Result<Option<ProfileLink>> {
    let links = self.social_links();
    let Some(link) = links.get(config.profile_icon.as_str()) else {
      debug!("No `{}` social link", config.profile_icon);
      return Ok(None);
    };
    if *link == config.placeholder_link {
      debug!("Profile link is still the placeholder");
      return Ok(None);
    }
    ProfileLink::parse(link).map(Some)
  }
}

/// Reads `{subject}/{index_file}` and returns its profile link.
///
/// # Errors
///
/// Fails if the document cannot be read, has no well-formed header, or the header does
/// not match the [`AuthorMetadata`] schema.
pub fn read_profile_link(subject: impl AsRef<Path>, config: &Config) -> Result<Option<ProfileLink>> {
  let path = subject.as_ref().join(&config.index_file);
  trace!("Reading metadata from {}", path.display());
  let document = std::fs::read_to_string(&path)?;
  AuthorMetadata::parse(&document)?.profile_link(config)
}

/// A subject's citation profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink(Url);

impl ProfileLink {
  /// Parses an absolute profile URL.
  pub fn parse(link: &str) -> Result<Self> {
    Url::parse(link.trim())
      .map(Self)
      .map_err(|source| CitesyncError::InvalidProfileLink { link: link.to_string(), source })
  }

  /// The underlying URL.
  pub fn as_url(&self) -> &Url { &self.0 }

  /// The profile owner's id, taken from the `user` query parameter.
  ///
  /// Profile links look like `https://scholar.google.com/citations?user={id}&hl=en`.
  pub fn author_id(&self) -> Option<String> {
    self.0.query_pairs().find(|(key, _)| key == "user").map(|(_, value)| value.into_owned())
  }
}

impl Display for ProfileLink {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}
