//! Persistence of the final record.
//!
//! Writes `scholar_metrics.json` and `scholar_metrics.js` into the output
//! directory. Each write is attempted independently and overwrites in place.

use crate::error::Result;
use crate::events::{EventSink, PipelineEvent};
use crate::metrics::MetricsRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON data file name
pub const JSON_FILE: &str = "scholar_metrics.json";

/// Script snippet file name
pub const SCRIPT_FILE: &str = "scholar_metrics.js";

/// Outcome of writing both output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub json_path: PathBuf,
    pub json_written: bool,
    pub script_path: PathBuf,
    pub script_written: bool,
}

impl WriteReport {
    pub fn all_written(&self) -> bool {
        self.json_written && self.script_written
    }

    /// Process exit status: 0 only if both files were written.
    pub fn exit_code(&self) -> u8 {
        if self.all_written() {
            0
        } else {
            1
        }
    }
}

/// Write the record as pretty-printed JSON (two-space indent).
pub fn write_json(record: &MetricsRecord, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(record)?;
    std::fs::write(path, content)?;
    debug!(path = %path.display(), "Saved metrics JSON");
    Ok(())
}

/// Write the rendered script snippet.
pub fn write_script(record: &MetricsRecord, path: &Path) -> Result<()> {
    std::fs::write(path, render_script(record))?;
    debug!(path = %path.display(), "Saved metrics script");
    Ok(())
}

/// Write both files into `output_dir`, reporting each one separately.
pub fn persist(record: &MetricsRecord, output_dir: &Path, events: &dyn EventSink) -> WriteReport {
    let json_path = output_dir.join(JSON_FILE);
    let script_path = output_dir.join(SCRIPT_FILE);

    let json_written = report(write_json(record, &json_path), &json_path, events);
    let script_written = report(write_script(record, &script_path), &script_path, events);

    WriteReport {
        json_path,
        json_written,
        script_path,
        script_written,
    }
}

fn report(result: Result<()>, path: &Path, events: &dyn EventSink) -> bool {
    match result {
        Ok(()) => {
            events.event(PipelineEvent::FileWritten {
                path: path.to_path_buf(),
            });
            true
        }
        Err(e) => {
            events.event(PipelineEvent::FileWriteFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            false
        }
    }
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Render the page snippet: the record as a `scholarMetrics` object plus
/// logic that fills the `h-index`, `citations`, `last-updated`, `i10-index`
/// and `pub-count` elements once the page is ready, and again 100ms later.
pub fn render_script(record: &MetricsRecord) -> String {
    let last_updated = record.last_updated.format("%Y-%m-%d").to_string();

    format!(
        r#"// Auto-generated Google Scholar metrics
// Last updated: {last_updated}
// Source: {source_comment}

const scholarMetrics = {{
    hIndex: {h_index},
    i10Index: {i10_index},
    totalCitations: {total_citations},
    publicationsCount: {publications_count},
    lastUpdated: {last_updated_js},
    scholarId: {scholar_id},
    source: {source},
    authorName: {author_name}
}};

// Function to update metrics on the page
function updateScholarMetrics() {{
    const hIndexElement = document.getElementById('h-index');
    if (hIndexElement) {{
        hIndexElement.textContent = `H-index: ${{scholarMetrics.hIndex}}`;
    }}

    const citationsElement = document.getElementById('citations');
    if (citationsElement) {{
        citationsElement.textContent = `Citations: ${{scholarMetrics.totalCitations}}`;
    }}

    const lastUpdatedElement = document.getElementById('last-updated');
    if (lastUpdatedElement) {{
        const date = new Date(scholarMetrics.lastUpdated);
        lastUpdatedElement.textContent = date.toLocaleDateString();
    }}

    const i10Element = document.getElementById('i10-index');
    if (i10Element) {{
        i10Element.textContent = `i10-index: ${{scholarMetrics.i10Index}}`;
    }}

    const pubCountElement = document.getElementById('pub-count');
    if (pubCountElement) {{
        pubCountElement.textContent = `Publications: ${{scholarMetrics.publicationsCount}}`;
    }}

    console.log('Scholar metrics updated:', scholarMetrics);
}}

// Auto-update when the DOM is ready
if (document.readyState === 'loading') {{
    document.addEventListener('DOMContentLoaded', updateScholarMetrics);
}} else {{
    updateScholarMetrics();
}}

// Re-apply for elements rendered after load
setTimeout(updateScholarMetrics, 100);
"#,
        last_updated = last_updated,
        source_comment = record.source.replace(['\r', '\n'], " "),
        h_index = record.h_index,
        i10_index = record.i10_index,
        total_citations = record.total_citations,
        publications_count = record.publications_count,
        last_updated_js = js_string(&last_updated),
        scholar_id = js_string(&record.scholar_id),
        source = js_string(&record.source),
        author_name = js_string(&record.author_name),
    )
}
