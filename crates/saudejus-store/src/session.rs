//! One user's analysis session: a shared record store plus a private chart cache.

use std::sync::Arc;

use saudejus_core::{CaseRecord, ChartCache, ChartData, FilterCriteria, filter};
use tracing::{debug, info};

use crate::{RecordStore, StoreError};

/// The result of applying criteria: the filtered table and its chart data.
#[derive(Debug, Clone)]
pub struct View {
    pub criteria: FilterCriteria,
    pub records: Vec<CaseRecord>,
    pub charts: Arc<ChartData>,
}

impl View {
    /// No records matched. Charts should show an empty-state notice.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-session state. Nothing here is shared between sessions except the
/// read-only record store.
pub struct Session {
    store: RecordStore,
    cache: ChartCache,
}

impl Session {
    pub fn new(store: RecordStore) -> Self {
        info!(records = store.len(), "session opened");
        Self {
            store,
            cache: ChartCache::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    /// Validate criteria, filter the store, and fetch chart data (memoized).
    pub fn apply(&mut self, criteria: &FilterCriteria) -> Result<View, StoreError> {
        self.store.validate(criteria)?;
        let records = filter(self.store.records(), criteria);
        let charts = self.cache.get_or_compute(&records, criteria);
        debug!(
            matched = records.len(),
            min_year = criteria.year_range.min,
            max_year = criteria.year_range.max,
            courts = criteria.courts.len(),
            cache_hits = self.cache.hits(),
            "applied filter criteria"
        );
        Ok(View {
            criteria: criteria.clone(),
            records,
            charts,
        })
    }
}
