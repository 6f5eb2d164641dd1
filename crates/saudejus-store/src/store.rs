//! Immutable, normalized record store.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use saudejus_core::{CaseRecord, CoreError, FilterCriteria, RawCaseRecord, YearRange, cases};
use tracing::info;

use crate::StoreError;
use crate::fixture::simulated_rows;

/// The case records of one session.
///
/// Built once through a pure normalization pass; there is no mutation API.
/// Cloning shares the underlying slice.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[CaseRecord]>,
}

impl RecordStore {
    /// Normalize and validate raw records. The first bad row aborts construction.
    pub fn from_raw<I>(raws: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = RawCaseRecord>,
    {
        let records = raws
            .into_iter()
            .enumerate()
            .map(|(row, raw)| {
                CaseRecord::try_from(raw).map_err(|source| StoreError::Ingest { row, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!(count = records.len(), "built record store");
        Ok(Self {
            records: records.into(),
        })
    }

    /// The built-in simulated dataset.
    pub fn simulated() -> Result<Self, StoreError> {
        Self::from_raw(simulated_rows())
    }

    /// Load a JSON array of raw records.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let raws: Vec<RawCaseRecord> = serde_json::from_reader(reader)?;
        Self::from_raw(raws)
    }

    pub fn from_json_path(path: &Path) -> Result<Self, StoreError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Load a Parquet file with the case record columns.
    #[cfg(feature = "parquet")]
    pub fn from_parquet(path: &Path) -> Result<Self, StoreError> {
        let batches = crate::read_parquet(path)?;
        let mut raws = Vec::new();
        for batch in &batches {
            raws.extend(cases::from_record_batch(batch)?);
        }
        Self::from_raw(raws)
    }

    /// Open a data file, choosing the loader by extension (`.json`, `.parquet`).
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::from_json_path(path),
            #[cfg(feature = "parquet")]
            Some("parquet") => Self::from_parquet(path),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    // ── Queries ──

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `[min, max]` decision year over the whole store; bounds of the year selector.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let min = self.records.iter().map(CaseRecord::decision_year).min()?;
        let max = self.records.iter().map(CaseRecord::decision_year).max()?;
        Some(YearRange::new(min, max))
    }

    /// Distinct normalized courts, in order of first appearance.
    pub fn courts(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(CaseRecord::court)
            .filter(|c| seen.insert(*c))
            .map(str::to_string)
            .collect()
    }

    /// Full year range and every court selected. `None` for an empty store.
    pub fn default_criteria(&self) -> Option<FilterCriteria> {
        Some(FilterCriteria::new(self.year_bounds()?, self.courts()))
    }

    /// Reject criteria naming a court the store has never seen.
    pub fn validate(&self, criteria: &FilterCriteria) -> Result<(), StoreError> {
        let known: HashSet<&str> = self.records.iter().map(CaseRecord::court).collect();
        let unknown: Vec<&str> = criteria
            .courts
            .iter()
            .map(String::as_str)
            .filter(|c| !known.contains(c))
            .collect();
        if !unknown.is_empty() {
            return Err(CoreError::InvalidCriteria(format!(
                "unknown court(s): {}",
                unknown.join(", ")
            ))
            .into());
        }
        Ok(())
    }

    /// The whole store as a single Arrow batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch, StoreError> {
        Ok(cases::to_record_batch(&self.records)?)
    }
}
