//! Fetch-and-render orchestration.
//!
//! Semantic Scholar is always tried first, then Crossref. The final record is
//! chosen by [`resolve_record`], a pure function over the two outcomes: the
//! best available source wins and numbers are never cross-validated.

use crate::config::Config;
use crate::crossref::CrossrefClient;
use crate::error::{MetricsError, Result};
use crate::events::{EventSink, PipelineEvent};
use crate::fallback::fallback_metrics;
use crate::metrics::{FetchOutcome, MetricsRecord, SupplementaryMetrics};
use crate::output::{self, WriteReport};
use crate::semanticscholar::SemanticScholarClient;
use chrono::NaiveDate;
use tracing::info;

/// Which path produced the final record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPath {
    /// Semantic Scholar data, possibly annotated with Crossref counts
    Live,
    /// Static fallback values
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub record: MetricsRecord,
    pub path: RecordPath,
}

/// Pick the record to persist.
///
/// A successful primary fetch is kept and annotated with the secondary
/// counts when those succeeded too. Otherwise `fallback` is used and the
/// secondary outcome is discarded, even if it succeeded.
pub fn resolve_record(
    primary: FetchOutcome<MetricsRecord>,
    secondary: FetchOutcome<SupplementaryMetrics>,
    fallback: impl FnOnce() -> MetricsRecord,
) -> Resolution {
    match primary {
        FetchOutcome::Success(record) => {
            let record = match secondary {
                FetchOutcome::Success(supplementary) => record.with_supplementary(&supplementary),
                FetchOutcome::NotFound | FetchOutcome::Error(_) => record,
            };
            Resolution {
                record,
                path: RecordPath::Live,
            }
        }
        FetchOutcome::NotFound | FetchOutcome::Error(_) => Resolution {
            record: fallback(),
            path: RecordPath::Fallback,
        },
    }
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub record: MetricsRecord,
    pub path: RecordPath,
    pub writes: WriteReport,
}

impl RunReport {
    pub fn exit_code(&self) -> u8 {
        self.writes.exit_code()
    }
}

/// Wires the fetchers, fallback and writer together for one run.
pub struct Pipeline<'a> {
    config: Config,
    semantic_scholar: SemanticScholarClient,
    crossref: CrossrefClient,
    events: &'a dyn EventSink,
}

impl<'a> Pipeline<'a> {
    /// Validate `config` and build both API clients on one HTTP client.
    pub fn new(config: Config, events: &'a dyn EventSink) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "scholarmetrics/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MetricsError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            semantic_scholar: SemanticScholarClient::new(client.clone(), &config),
            crossref: CrossrefClient::new(client, &config),
            config,
            events,
        })
    }

    /// Fetch, resolve and persist. `today` stamps the record.
    pub async fn run(&self, today: NaiveDate) -> RunReport {
        let author = &self.config.author;

        let primary = self
            .semantic_scholar
            .fetch_author_metrics(author, today, self.events)
            .await;
        let secondary = self
            .crossref
            .fetch_supplementary(&author.name, self.events)
            .await;

        let Resolution { record, path } = resolve_record(primary, secondary, || {
            fallback_metrics(author, &self.config.fallback, today)
        });
        if path == RecordPath::Fallback {
            self.events.event(PipelineEvent::FallbackUsed);
        }

        info!(source = %record.source, output_dir = %self.config.output_dir.display(), "Saving metrics");
        let writes = output::persist(&record, &self.config.output_dir, self.events);

        RunReport {
            record,
            path,
            writes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthorProfile, FallbackValues};
    use crate::metrics::SOURCE_SEMANTIC_SCHOLAR;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn live_record() -> MetricsRecord {
        MetricsRecord {
            h_index: 9,
            i10_index: 5,
            total_citations: 300,
            publications_count: 20,
            last_updated: today(),
            scholar_id: "ID".to_string(),
            source: SOURCE_SEMANTIC_SCHOLAR.to_string(),
            author_name: "A. Author".to_string(),
            total_citations_crossref: None,
            publications_crossref: None,
        }
    }

    fn fallback() -> MetricsRecord {
        fallback_metrics(&AuthorProfile::default(), &FallbackValues::default(), today())
    }

    fn supplementary() -> SupplementaryMetrics {
        SupplementaryMetrics {
            total_citations: 77,
            publications: 11,
        }
    }

    #[test]
    fn test_live_with_supplementary() {
        let resolution = resolve_record(
            FetchOutcome::Success(live_record()),
            FetchOutcome::Success(supplementary()),
            fallback,
        );
        assert_eq!(resolution.path, RecordPath::Live);
        assert_eq!(resolution.record.h_index, 9);
        assert_eq!(resolution.record.total_citations_crossref, Some(77));
        assert_eq!(resolution.record.publications_crossref, Some(11));
    }

    #[test]
    fn test_live_without_supplementary() {
        let resolution = resolve_record(
            FetchOutcome::Success(live_record()),
            FetchOutcome::Error("timeout".to_string()),
            fallback,
        );
        assert_eq!(resolution.record, live_record());
    }

    #[test]
    fn test_fallback_discards_secondary() {
        for primary in [FetchOutcome::NotFound, FetchOutcome::Error("503".to_string())] {
            let resolution = resolve_record(primary, FetchOutcome::Success(supplementary()), fallback);
            assert_eq!(resolution.path, RecordPath::Fallback);
            assert_eq!(resolution.record, fallback());
            assert!(resolution.record.total_citations_crossref.is_none());
        }
    }

    #[test]
    fn test_fallback_only_built_when_needed() {
        let resolution = resolve_record(
            FetchOutcome::Success(live_record()),
            FetchOutcome::NotFound,
            || panic!("fallback must not be built on the live path"),
        );
        assert_eq!(resolution.path, RecordPath::Live);
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        let mut config = Config::default();
        config.author.name = String::new();
        let sink = crate::events::RecordingSink::new();
        assert!(matches!(Pipeline::new(config, &sink), Err(MetricsError::Config(_))));
    }
}
