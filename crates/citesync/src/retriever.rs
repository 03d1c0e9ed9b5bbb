//! Fetching the raw works listing behind a profile link.
//!
//! [`ListingSource`] is the seam between the pipeline and the network: [`HttpSource`]
//! performs one GET per profile, tests substitute a canned listing.
//!
//! # Examples
//!
//! ```no_run
//! use citesync::{prelude::*, Config, HttpSource, ProfileLink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let source = HttpSource::new(&config)?;
//! let link = ProfileLink::parse("https://scholar.google.com/citations?user=QWERTY12")?;
//! let html = source.fetch_listing(&link).await?;
//! println!("Fetched {} bytes", html.len());
//! # Ok(())
//! # }
//! ```

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::*;

/// Query parameters asking for the works list, newest first.
pub const LISTING_QUERY: [(&str, &str); 2] = [("view_op", "list_works"), ("sortby", "pubdate")];

/// Builds the listing URL for a profile: the profile link with [`LISTING_QUERY`] appended.
pub fn listing_url(link: &ProfileLink) -> Url {
  let mut url = link.as_url().clone();
  url.query_pairs_mut().extend_pairs(LISTING_QUERY);
  url
}

/// Anything that can produce the raw listing HTML for a profile.
#[async_trait]
pub trait ListingSource: Send + Sync {
  /// Fetches the listing page for `link`.
  ///
  /// # Errors
  ///
  /// Returns [`CitesyncError::Network`] on connection failures, timeouts and non-success
  /// responses.
  async fn fetch_listing(&self, link: &ProfileLink) -> Result<Vec<u8>>;
}

/// [`ListingSource`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSource {
  /// Client carrying the configured timeout and default headers.
  client: reqwest::Client,
}

impl HttpSource {
  /// Creates a source using the timeout and headers from `config`.
  pub fn new(config: &Config) -> Result<Self> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
      let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|e| CitesyncError::Config(format!("Invalid header name `{key}`: {e}")))?;
      let value = HeaderValue::from_str(value)
        .map_err(|e| CitesyncError::Config(format!("Invalid value for header `{key}`: {e}")))?;
      headers.insert(name, value);
    }

    let client =
      reqwest::Client::builder().timeout(config.timeout()).default_headers(headers).build()?;
    Ok(Self { client })
  }
}

#[async_trait]
impl ListingSource for HttpSource {
  async fn fetch_listing(&self, link: &ProfileLink) -> Result<Vec<u8>> {
    let url = listing_url(link);
    debug!("Fetching listing via: {}", url);

    let response = self.client.get(url).send().await?.error_for_status()?;
    let data = response.bytes().await?;

    trace!("Listing response: {} bytes", data.len());
    Ok(data.to_vec())
  }
}
