// LogLens - core/analysis.rs
//
// The request-level pipeline: bytes -> lines -> entries -> counts / selection.
// Holds no per-request state, so one Analyzer is shared by every request.

use crate::core::aggregate::aggregate;
use crate::core::categorizer::Categorizer;
use crate::core::filter::{filter_entries, CategoryFilter};
use crate::core::level::count_levels;
use crate::core::model::{CategorizerMode, FilterReport, UploadReport};
use crate::core::parser::parse_bytes;
use crate::core::storage::UploadSource;
use crate::util::error::RequestError;
use chrono::Utc;

/// Parses uploads with one fixed categorisation strategy.
#[derive(Debug, Clone)]
pub struct Analyzer {
    categorizer: Categorizer,
}

impl Analyzer {
    pub fn new(categorizer: Categorizer) -> Self {
        Self { categorizer }
    }

    /// Analyzer for a configured mode.
    pub fn for_mode(mode: CategorizerMode) -> Self {
        Self::new(Categorizer::new(mode))
    }

    pub fn mode(&self) -> CategorizerMode {
        self.categorizer.mode()
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Full parse of an uploaded file: every entry plus per-category counts.
    ///
    /// `filename` is recorded as-is; the caller passes the name the upload was
    /// stored under.
    pub fn upload(&self, raw: &[u8], filename: &str) -> UploadReport {
        let parsed = parse_bytes(raw, &self.categorizer);
        let log_types = aggregate(&parsed.entries);
        let log_levels = count_levels(&parsed.entries);

        tracing::info!(
            filename,
            bytes = raw.len(),
            entries = parsed.entries.len(),
            categories = log_types.len(),
            "Upload analysed"
        );

        UploadReport {
            filename: filename.to_string(),
            entries: parsed.entries,
            log_types,
            log_levels,
            lines_processed: parsed.lines_processed,
            uploaded_at: Utc::now(),
        }
    }

    /// Re-parse `raw` and keep only the entries that pass `filter`.
    pub fn filter_request(&self, raw: &[u8], filter: &CategoryFilter) -> FilterReport {
        let parsed = parse_bytes(raw, &self.categorizer);
        let total = parsed.entries.len();
        let entries = filter_entries(parsed.entries, filter);

        tracing::info!(
            selected = filter.selected.len(),
            levels = filter.levels.len(),
            search = filter.search.is_some(),
            total,
            kept = entries.len(),
            "Filter applied"
        );

        let log_levels = count_levels(&entries);
        FilterReport {
            entries,
            log_levels,
        }
    }

    /// Filter a previously stored upload, fetched fresh from `source`.
    ///
    /// A missing or blank filename is `MissingInput`; an upload that is no
    /// longer stored is `NotFound`. Any other storage failure is passed
    /// through without interpretation.
    pub fn filter_stored(
        &self,
        source: &dyn UploadSource,
        filename: Option<&str>,
        filter: &CategoryFilter,
    ) -> Result<FilterReport, RequestError> {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(RequestError::MissingInput { field: "filename" })?;

        let raw = source.read(filename)?;
        Ok(self.filter_request(&raw, filter))
    }
}
