//! Structured progress events.
//!
//! Each component reports what it did through an [`EventSink`] instead of
//! printing. The binary forwards events to `tracing`; tests record them.

use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    PrimaryStarted,
    AuthorSelected {
        author_id: String,
        name: String,
    },
    AuthorNotFound {
        query: String,
    },
    PrimaryFetched {
        h_index: u32,
        total_citations: u64,
        publications: u32,
    },
    PrimaryFailed {
        reason: String,
    },
    SecondaryStarted,
    SecondaryFetched {
        publications: u32,
        total_citations: u64,
    },
    SecondaryFailed {
        reason: String,
    },
    FallbackUsed,
    FileWritten {
        path: PathBuf,
    },
    FileWriteFailed {
        path: PathBuf,
        reason: String,
    },
}

pub trait EventSink {
    fn event(&self, event: PipelineEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::PrimaryStarted => {
                info!("Attempting to fetch from Semantic Scholar API")
            }
            PipelineEvent::AuthorSelected { author_id, name } => {
                info!(author_id = %author_id, name = %name, "Selected author candidate")
            }
            PipelineEvent::AuthorNotFound { query } => {
                warn!(query = %query, "Could not find author ID")
            }
            PipelineEvent::PrimaryFetched {
                h_index,
                total_citations,
                publications,
            } => info!(
                h_index,
                citations = total_citations,
                publications,
                "Fetched metrics from Semantic Scholar"
            ),
            PipelineEvent::PrimaryFailed { reason } => {
                warn!(error = %reason, "Error fetching from Semantic Scholar")
            }
            PipelineEvent::SecondaryStarted => info!("Fetching additional data from Crossref"),
            PipelineEvent::SecondaryFetched {
                publications,
                total_citations,
            } => info!(
                publications,
                citations = total_citations,
                "Crossref data retrieved"
            ),
            PipelineEvent::SecondaryFailed { reason } => {
                warn!(error = %reason, "Error fetching from Crossref")
            }
            PipelineEvent::FallbackUsed => warn!("Using fallback metrics"),
            PipelineEvent::FileWritten { path } => info!(path = %path.display(), "File written"),
            PipelineEvent::FileWriteFailed { path, reason } => {
                warn!(path = %path.display(), error = %reason, "File write failed")
            }
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, event: &PipelineEvent) -> bool {
        self.events().iter().any(|e| e == event)
    }
}

impl EventSink for RecordingSink {
    fn event(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
