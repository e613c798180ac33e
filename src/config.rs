//! Runtime configuration.
//!
//! Defaults reproduce the built-in author profile and public API endpoints,
//! so the binary runs with no arguments. Tests point the endpoints at a
//! mock server via [`Config::for_testing`].

use crate::error::{MetricsError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Built-in author display name
pub const AUTHOR_NAME: &str = "Evangelos-Marios Nikolados";

/// Surname used to pick the author among search candidates
pub const AUTHOR_SURNAME: &str = "Nikolados";

/// Google Scholar profile identifier carried into the output
pub const SCHOLAR_ID: &str = "H8fc2JgAAAAJ";

/// Semantic Scholar graph API base URL
pub const SEMANTIC_SCHOLAR_API: &str = "https://api.semanticscholar.org/graph/v1";

/// Crossref API base URL
pub const CROSSREF_API: &str = "https://api.crossref.org";

/// Author search candidates requested from Semantic Scholar
pub const AUTHOR_SEARCH_LIMIT: u32 = 5;

/// Crossref rows requested; only the first page is read
pub const CROSSREF_ROWS: u32 = 100;

/// Identity of the author whose metrics are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorProfile {
    pub name: String,
    /// Substring a search candidate's name must contain to be selected
    pub surname: String,
    pub scholar_id: String,
}

impl Default for AuthorProfile {
    fn default() -> Self {
        Self {
            name: AUTHOR_NAME.to_string(),
            surname: AUTHOR_SURNAME.to_string(),
            scholar_id: SCHOLAR_ID.to_string(),
        }
    }
}

/// Hand-maintained values used when Semantic Scholar is unavailable.
///
/// Update these from the Google Scholar profile periodically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackValues {
    pub h_index: u32,
    pub i10_index: u32,
    pub total_citations: u64,
    pub publications_count: u32,
}

impl Default for FallbackValues {
    fn default() -> Self {
        Self {
            h_index: 6,
            i10_index: 3,
            total_citations: 124,
            publications_count: 10,
        }
    }
}

/// Top-level configuration injected into the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub author: AuthorProfile,
    pub semantic_scholar_api: String,
    pub crossref_api: String,
    pub search_limit: u32,
    pub crossref_rows: u32,
    /// Directory receiving `scholar_metrics.json` and `scholar_metrics.js`
    pub output_dir: PathBuf,
    pub fallback: FallbackValues,
    /// `None` leaves the HTTP client's default in place
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author: AuthorProfile::default(),
            semantic_scholar_api: SEMANTIC_SCHOLAR_API.to_string(),
            crossref_api: CROSSREF_API.to_string(),
            search_limit: AUTHOR_SEARCH_LIMIT,
            crossref_rows: CROSSREF_ROWS,
            output_dir: PathBuf::from("."),
            fallback: FallbackValues::default(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Configuration with both APIs served from `base_url` (a mock server).
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            semantic_scholar_api: format!("{}/graph/v1", base_url),
            crossref_api: base_url.to_string(),
            request_timeout: Some(Duration::from_secs(5)),
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Reject configurations the fetchers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.author.name.trim().is_empty() {
            return Err(MetricsError::Config("author name is empty".to_string()));
        }
        if self.author.surname.trim().is_empty() {
            return Err(MetricsError::Config("author surname is empty".to_string()));
        }
        for (label, api) in [
            ("Semantic Scholar", &self.semantic_scholar_api),
            ("Crossref", &self.crossref_api),
        ] {
            Url::parse(api).map_err(|e| {
                MetricsError::Config(format!("invalid {} API URL {:?}: {}", label, api, e))
            })?;
        }
        if self.search_limit == 0 || self.crossref_rows == 0 {
            return Err(MetricsError::Config(
                "search limit and Crossref rows must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
