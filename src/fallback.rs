//! Static metrics used when Semantic Scholar cannot be reached.

use crate::config::{AuthorProfile, FallbackValues};
use crate::metrics::{MetricsRecord, SOURCE_FALLBACK};
use chrono::NaiveDate;

/// Hand-maintained record stamped with `today`. No I/O.
pub fn fallback_metrics(
    author: &AuthorProfile,
    values: &FallbackValues,
    today: NaiveDate,
) -> MetricsRecord {
    MetricsRecord {
        h_index: values.h_index,
        i10_index: values.i10_index,
        total_citations: values.total_citations,
        publications_count: values.publications_count,
        last_updated: today,
        scholar_id: author.scholar_id.clone(),
        source: SOURCE_FALLBACK.to_string(),
        author_name: author.name.clone(),
        total_citations_crossref: None,
        publications_crossref: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_values() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let record = fallback_metrics(&AuthorProfile::default(), &FallbackValues::default(), today);

        assert_eq!(record.h_index, 6);
        assert_eq!(record.i10_index, 3);
        assert_eq!(record.total_citations, 124);
        assert_eq!(record.publications_count, 10);
        assert_eq!(record.last_updated, today);
        assert_eq!(record.source, "Manual (fallback)");
        assert_eq!(record.scholar_id, "H8fc2JgAAAAJ");
        assert!(record.is_fallback());
        assert!(record.total_citations_crossref.is_none());
    }
}
