//! Filter engine: a stable, pure selection over the record store.

use tracing::debug;

use crate::{CaseRecord, FilterCriteria};

/// Keep the records matching `criteria`, preserving their original order.
///
/// An inverted year range or an empty court set yields an empty result, never an error.
pub fn filter(records: &[CaseRecord], criteria: &FilterCriteria) -> Vec<CaseRecord> {
    let kept: Vec<CaseRecord> = if criteria.year_range.is_inverted() || criteria.courts.is_empty()
    {
        Vec::new()
    } else {
        records
            .iter()
            .filter(|r| criteria.matches(r))
            .cloned()
            .collect()
    };
    debug!(input = records.len(), kept = kept.len(), "filtered case records");
    kept
}
