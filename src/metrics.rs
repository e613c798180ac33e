//! Metrics record and fetch outcome types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source label for records built from Semantic Scholar.
pub const SOURCE_SEMANTIC_SCHOLAR: &str = "Semantic Scholar";

/// Source label for the static fallback record.
pub const SOURCE_FALLBACK: &str = "Manual (fallback)";

/// Citation metrics for one author, as persisted to `scholar_metrics.json`.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub h_index: u32,
    /// Papers with at least 10 citations
    pub i10_index: u32,
    pub total_citations: u64,
    pub publications_count: u32,
    /// Run date, serialized as `YYYY-MM-DD`
    pub last_updated: NaiveDate,
    pub scholar_id: String,
    /// Which fetch path produced the record
    pub source: String,
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_citations_crossref: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publications_crossref: Option<u32>,
}

impl MetricsRecord {
    /// Attach Crossref counts. These annotate the record and are never
    /// reconciled against the primary fields.
    pub fn with_supplementary(mut self, supplementary: &SupplementaryMetrics) -> Self {
        self.total_citations_crossref = Some(supplementary.total_citations);
        self.publications_crossref = Some(supplementary.publications);
        self
    }

    /// True if the record came from the static fallback.
    pub fn is_fallback(&self) -> bool {
        self.source == SOURCE_FALLBACK
    }
}

/// Counts derived from the Crossref works search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplementaryMetrics {
    pub total_citations: u64,
    pub publications: u32,
}

/// Result of one fetcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// Data retrieved and parsed
    Success(T),
    /// The API answered but nothing matched the author
    NotFound,
    /// Transport, status or parse failure
    Error(String),
}

impl<T> From<crate::error::Result<Option<T>>> for FetchOutcome<T> {
    fn from(result: crate::error::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => FetchOutcome::Success(value),
            Ok(None) => FetchOutcome::NotFound,
            Err(e) => FetchOutcome::Error(e.to_string()),
        }
    }
}
