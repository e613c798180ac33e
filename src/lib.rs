//! # scholarmetrics
//!
//! Citation metrics updater for a personal academic page.
//!
//! ## Modules
//!
//! - [`semanticscholar`] - Primary metrics from the Semantic Scholar graph API
//! - [`crossref`] - Supplementary citation counts from Crossref
//! - [`fallback`] - Static record used when the primary source fails
//! - [`pipeline`] - Fetch, merge-or-fallback, persist
//! - [`output`] - JSON data file and page script snippet
//! - [`config`] - Injected author profile and endpoints
//! - [`events`] - Structured progress events
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholarmetrics::{config::Config, events::TracingSink, pipeline::Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let sink = TracingSink;
//!     let pipeline = Pipeline::new(Config::default(), &sink)?;
//!     let report = pipeline.run(chrono::Local::now().date_naive()).await;
//!     println!("h-index {} ({})", report.record.h_index, report.record.source);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crossref;
pub mod error;
pub mod events;
pub mod fallback;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod semanticscholar;

pub use error::{MetricsError, Result};
