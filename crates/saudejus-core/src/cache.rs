//! Memoized chart data, keyed by a content hash of the filtered view.
//!
//! The record store is static for a session, so identical
//! `(filtered records, criteria)` pairs always produce identical charts.
//! [`ChartCache`] is a plain owned map; each session holds its own. It holds at
//! most [`DEFAULT_CACHE_CAPACITY`] views and evicts the oldest entry first.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    CaseRecord, CourtOutcomeMatrix, FilterCriteria, YearlyCount, court_outcome_matrix,
    yearly_counts,
};

/// SHA-256 over a canonical encoding of records and criteria.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a filtered view together with the criteria that produced it.
    ///
    /// Integers are little-endian, strings are length-prefixed, floats hash their bit pattern.
    pub fn of(records: &[CaseRecord], criteria: &FilterCriteria) -> Self {
        let mut hasher = Sha256::new();

        hasher.update((records.len() as u64).to_le_bytes());
        for r in records {
            hasher.update(r.decision_year().to_le_bytes());
            update_str(&mut hasher, r.request_type());
            update_str(&mut hasher, r.court());
            hasher.update(r.claim_value().to_bits().to_le_bytes());
            hasher.update([r.outcome() as u8]);
            update_str(&mut hasher, r.legal_basis());
        }

        hasher.update(criteria.year_range.min.to_le_bytes());
        hasher.update(criteria.year_range.max.to_le_bytes());
        hasher.update((criteria.courts.len() as u64).to_le_bytes());
        for court in &criteria.courts {
            update_str(&mut hasher, court);
        }

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

fn update_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({self})")
    }
}

/// Everything the two charts need for one filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub record_count: usize,
    pub yearly: YearlyCount,
    pub matrix: CourtOutcomeMatrix,
}

impl ChartData {
    pub fn compute(records: &[CaseRecord]) -> Self {
        Self {
            record_count: records.len(),
            yearly: yearly_counts(records),
            matrix: court_outcome_matrix(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Views kept per session before the oldest is evicted.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Per-session memo of computed chart data.
#[derive(Debug)]
pub struct ChartCache {
    entries: HashMap<ContentHash, Arc<ChartData>>,
    order: VecDeque<ContentHash>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for ChartCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` views (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Return cached chart data for this view, computing it on first sight.
    pub fn get_or_compute(
        &mut self,
        records: &[CaseRecord],
        criteria: &FilterCriteria,
    ) -> Arc<ChartData> {
        let key = ContentHash::of(records, criteria);
        if let Some(data) = self.entries.get(&key) {
            self.hits += 1;
            debug!(key = %key, "chart cache hit");
            return Arc::clone(data);
        }

        self.misses += 1;
        debug!(key = %key, records = records.len(), "chart cache miss");
        let data = Arc::new(ChartData::compute(records));
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(key = %oldest, "chart cache evicted oldest view");
            }
        }
        self.entries.insert(key, Arc::clone(&data));
        self.order.push_back(key);
        data
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::case;
    use crate::{YearRange, filter};

    fn records() -> Vec<CaseRecord> {
        vec![
            case(2020, "TJSP", "Procedente"),
            case(2021, "TJRJ", "Improcedente"),
            case(2021, "TJSP", "Procedente"),
        ]
    }

    fn all_courts(min: i32, max: i32) -> FilterCriteria {
        FilterCriteria::new(YearRange::new(min, max), ["Tjsp", "Tjrj"])
    }

    #[test]
    fn hash_is_deterministic() {
        let r = records();
        let c = all_courts(2020, 2021);
        assert_eq!(ContentHash::of(&r, &c), ContentHash::of(&r, &c));
        assert_eq!(ContentHash::of(&r, &c).to_string().len(), 64);
    }

    #[test]
    fn hash_depends_on_records_and_criteria() {
        let r = records();
        let c = all_courts(2020, 2021);
        let base = ContentHash::of(&r, &c);
        assert_ne!(base, ContentHash::of(&r[..2], &c));
        assert_ne!(base, ContentHash::of(&r, &all_courts(2020, 2022)));
    }

    #[test]
    fn length_prefix_separates_adjacent_strings() {
        let a = FilterCriteria::new(YearRange::new(2020, 2020), ["Ab", "C"]);
        let b = FilterCriteria::new(YearRange::new(2020, 2020), ["A", "Bc"]);
        assert_ne!(ContentHash::of(&[], &a), ContentHash::of(&[], &b));
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let r = records();
        let c = all_courts(2020, 2021);
        let view = filter(&r, &c);
        let mut cache = ChartCache::new();

        let first = cache.get_or_compute(&view, &c);
        let second = cache.get_or_compute(&view, &c);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(first.record_count, 3);
        assert_eq!(first.yearly.get(2021), Some(2));
    }

    #[test]
    fn new_criteria_is_a_miss() {
        let r = records();
        let mut cache = ChartCache::new();
        for (min, max) in [(2020, 2021), (2021, 2021), (2020, 2021)] {
            let c = all_courts(min, max);
            cache.get_or_compute(&filter(&r, &c), &c);
        }
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.hits(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_evicts_oldest_view() {
        let r = records();
        let mut cache = ChartCache::with_capacity(2);
        for (min, max) in [(2020, 2020), (2021, 2021), (2020, 2021)] {
            let c = all_courts(min, max);
            cache.get_or_compute(&filter(&r, &c), &c);
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 3);

        // Most recent survives, first one was evicted.
        let newest = all_courts(2020, 2021);
        cache.get_or_compute(&filter(&r, &newest), &newest);
        assert_eq!(cache.hits(), 1);
        let oldest = all_courts(2020, 2020);
        cache.get_or_compute(&filter(&r, &oldest), &oldest);
        assert_eq!(cache.misses(), 4);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_still_holds_one_view() {
        assert_eq!(ChartCache::with_capacity(0).capacity(), 1);
        assert_eq!(ChartCache::new().capacity(), DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn empty_view_has_empty_charts() {
        let data = ChartData::compute(&[]);
        assert!(data.is_empty());
        assert!(data.yearly.is_empty());
        assert!(data.matrix.is_empty());
    }
}
