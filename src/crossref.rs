//! Crossref API client for supplementary citation counts.
//!
//! Queries works by author name and sums `is-referenced-by-count` over the
//! first page of results. Failures here never trigger the fallback record.

use crate::config::Config;
use crate::error::{MetricsError, Result};
use crate::events::{EventSink, PipelineEvent};
use crate::metrics::{FetchOutcome, SupplementaryMetrics};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CrossrefResponse {
    message: CrossrefMessage,
}

#[derive(Debug, Deserialize)]
struct CrossrefMessage {
    #[serde(default)]
    items: Vec<CrossrefItem>,
}

#[derive(Debug, Deserialize)]
struct CrossrefItem {
    #[serde(rename = "is-referenced-by-count")]
    referenced_by_count: Option<u64>,
}

/// Crossref works API client
pub struct CrossrefClient {
    client: reqwest::Client,
    works_url: String,
    rows: u32,
}

impl CrossrefClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            works_url: format!("{}/works", config.crossref_api.trim_end_matches('/')),
            rows: config.crossref_rows,
        }
    }

    /// Sum citations over works matching `author_name`.
    ///
    /// Only the first page (`rows` items) is read.
    pub async fn fetch_supplementary(
        &self,
        author_name: &str,
        events: &dyn EventSink,
    ) -> FetchOutcome<SupplementaryMetrics> {
        events.event(PipelineEvent::SecondaryStarted);

        match self.do_fetch(author_name).await {
            Ok(metrics) => {
                events.event(PipelineEvent::SecondaryFetched {
                    publications: metrics.publications,
                    total_citations: metrics.total_citations,
                });
                FetchOutcome::Success(metrics)
            }
            Err(e) => {
                events.event(PipelineEvent::SecondaryFailed {
                    reason: e.to_string(),
                });
                FetchOutcome::Error(e.to_string())
            }
        }
    }

    async fn do_fetch(&self, author_name: &str) -> Result<SupplementaryMetrics> {
        let rows = self.rows.to_string();

        debug!(url = %self.works_url, author = author_name, rows = self.rows, "Querying Crossref works");

        let response = self
            .client
            .get(&self.works_url)
            .query(&[("query.author", author_name), ("rows", rows.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MetricsError::Api {
                code: response.status().as_u16(),
                message: format!("Crossref API error: {}", response.status()),
            });
        }

        let data: CrossrefResponse = response.json().await.map_err(|e| {
            MetricsError::Parse(format!("Failed to parse Crossref response: {}", e))
        })?;

        Ok(summarize(&data.message.items))
    }
}

/// Citation sum and item count. Missing counters are 0.
fn summarize(items: &[CrossrefItem]) -> SupplementaryMetrics {
    SupplementaryMetrics {
        total_citations: items
            .iter()
            .map(|item| item.referenced_by_count.unwrap_or(0))
            .sum(),
        publications: u32::try_from(items.len()).unwrap_or(u32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_items() {
        let body = r#"{
            "status": "ok",
            "message": {
                "items": [
                    {"DOI": "10.1/a", "is-referenced-by-count": 40},
                    {"DOI": "10.1/b"},
                    {"DOI": "10.1/c", "is-referenced-by-count": 2}
                ]
            }
        }"#;
        let data: CrossrefResponse = serde_json::from_str(body).unwrap();
        let metrics = summarize(&data.message.items);

        assert_eq!(metrics.total_citations, 42);
        assert_eq!(metrics.publications, 3);
    }

    #[test]
    fn test_summarize_empty_message() {
        let data: CrossrefResponse = serde_json::from_str(r#"{"message": {}}"#).unwrap();
        assert_eq!(summarize(&data.message.items), SupplementaryMetrics::default());
    }
}
