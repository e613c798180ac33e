//! Semantic Scholar API Client
//!
//! Primary metrics source. Looks the author up by name, then fetches the
//! aggregate profile with an embedded paper list.
//!
//! API Details:
//! - Author search: GET /graph/v1/author/search?query=..&limit=..
//! - Author detail: GET /graph/v1/author/{id}?fields=..
//! - Unauthenticated; no retries are attempted

use crate::config::{AuthorProfile, Config};
use crate::error::{MetricsError, Result};
use crate::events::{EventSink, PipelineEvent};
use crate::metrics::{FetchOutcome, MetricsRecord, SOURCE_SEMANTIC_SCHOLAR};
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Fields requested from the author detail endpoint
const AUTHOR_FIELDS: &str = "name,hIndex,citationCount,publicationCount,papers.title,papers.citationCount,papers.year,papers.venue,papers.authors";

/// Citation threshold for the i10-index
const I10_THRESHOLD: u64 = 10;

#[derive(Debug, Deserialize)]
struct SSAuthorSearch {
    data: Option<Vec<SSAuthorCandidate>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SSAuthorCandidate {
    #[serde(rename = "authorId")]
    author_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SSAuthorDetail {
    name: Option<String>,
    #[serde(rename = "hIndex")]
    h_index: Option<u32>,
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
    #[serde(rename = "publicationCount")]
    publication_count: Option<u32>,
    papers: Option<Vec<SSPaper>>,
}

#[derive(Debug, Deserialize)]
struct SSPaper {
    #[serde(rename = "citationCount")]
    citation_count: Option<u64>,
}

/// Semantic Scholar graph API client
pub struct SemanticScholarClient {
    client: Client,
    api_base: String,
    search_limit: u32,
}

impl SemanticScholarClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_base: config.semantic_scholar_api.trim_end_matches('/').to_string(),
            search_limit: config.search_limit,
        }
    }

    /// Fetch the author's aggregate metrics.
    ///
    /// A search with no candidate containing the surname yields
    /// [`FetchOutcome::NotFound`]; any HTTP or parse failure yields
    /// [`FetchOutcome::Error`].
    pub async fn fetch_author_metrics(
        &self,
        author: &AuthorProfile,
        today: NaiveDate,
        events: &dyn EventSink,
    ) -> FetchOutcome<MetricsRecord> {
        events.event(PipelineEvent::PrimaryStarted);

        let outcome: FetchOutcome<MetricsRecord> =
            self.try_fetch(author, today, events).await.into();

        match &outcome {
            FetchOutcome::Success(record) => events.event(PipelineEvent::PrimaryFetched {
                h_index: record.h_index,
                total_citations: record.total_citations,
                publications: record.publications_count,
            }),
            FetchOutcome::NotFound => events.event(PipelineEvent::AuthorNotFound {
                query: author.name.clone(),
            }),
            FetchOutcome::Error(reason) => events.event(PipelineEvent::PrimaryFailed {
                reason: reason.clone(),
            }),
        }

        outcome
    }

    async fn try_fetch(
        &self,
        author: &AuthorProfile,
        today: NaiveDate,
        events: &dyn EventSink,
    ) -> Result<Option<MetricsRecord>> {
        let candidates = self.search_authors(&author.name).await?;

        let Some((author_id, name)) = select_author(&candidates, &author.surname)? else {
            return Ok(None);
        };
        events.event(PipelineEvent::AuthorSelected {
            author_id: author_id.to_string(),
            name: name.to_string(),
        });

        let detail = self.author_detail(author_id).await?;
        Ok(Some(build_record(detail, author, today)))
    }

    async fn search_authors(&self, query: &str) -> Result<Vec<SSAuthorCandidate>> {
        let url = format!("{}/author/search", self.api_base);
        let limit = self.search_limit.to_string();

        debug!(url = %url, query = query, "Searching Semantic Scholar authors");

        let search: SSAuthorSearch = self
            .get_json(&url, &[("query", query), ("limit", limit.as_str())])
            .await?;
        Ok(search.data.unwrap_or_default())
    }

    async fn author_detail(&self, author_id: &str) -> Result<SSAuthorDetail> {
        let url = author_detail_url(&self.api_base, author_id)?;

        debug!(url = %url, "Fetching Semantic Scholar author detail");

        self.get_json(url.as_str(), &[("fields", AUTHOR_FIELDS)]).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), error = %error_text, "API error");
            return Err(MetricsError::Api {
                code: status.as_u16(),
                message: format!("Semantic Scholar API error: {} - {}", status, error_text),
            });
        }

        response.json().await.map_err(|e| {
            MetricsError::Parse(format!("Failed to parse Semantic Scholar response: {}", e))
        })
    }
}

/// `{api_base}/author/{author_id}` with the ID encoded as one path segment.
fn author_detail_url(api_base: &str, author_id: &str) -> Result<Url> {
    let mut url = Url::parse(api_base)
        .map_err(|e| MetricsError::Config(format!("invalid Semantic Scholar API URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| MetricsError::Config("Semantic Scholar API URL cannot be a base".to_string()))?
        .pop_if_empty()
        .push("author")
        .push(author_id);
    Ok(url)
}

/// First candidate, in API order, whose name contains `surname`.
///
/// There is no confidence scoring: a common surname may select the wrong
/// person. A matching candidate without an ID is a malformed response.
fn select_author<'a>(
    candidates: &'a [SSAuthorCandidate],
    surname: &str,
) -> Result<Option<(&'a str, &'a str)>> {
    let Some((candidate, name)) = candidates.iter().find_map(|c| {
        let name = c.name.as_deref()?;
        name.contains(surname).then_some((c, name))
    }) else {
        return Ok(None);
    };

    let id = candidate
        .author_id
        .as_deref()
        .ok_or_else(|| MetricsError::Parse(format!("author candidate {:?} has no authorId", name)))?;
    Ok(Some((id, name)))
}

/// Count papers with at least 10 citations. Missing counts are 0.
fn i10_index(papers: &[SSPaper]) -> u32 {
    let count = papers
        .iter()
        .filter(|p| p.citation_count.unwrap_or(0) >= I10_THRESHOLD)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn build_record(detail: SSAuthorDetail, author: &AuthorProfile, today: NaiveDate) -> MetricsRecord {
    MetricsRecord {
        h_index: detail.h_index.unwrap_or(0),
        i10_index: i10_index(detail.papers.as_deref().unwrap_or_default()),
        total_citations: detail.citation_count.unwrap_or(0),
        publications_count: detail.publication_count.unwrap_or(0),
        last_updated: today,
        scholar_id: author.scholar_id.clone(),
        source: SOURCE_SEMANTIC_SCHOLAR.to_string(),
        author_name: detail.name.unwrap_or_else(|| author.name.clone()),
        total_citations_crossref: None,
        publications_crossref: None,
    }
}
