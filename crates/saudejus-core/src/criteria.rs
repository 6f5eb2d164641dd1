//! User-selected filter criteria: an inclusive year range and a court set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::CaseRecord;

/// Inclusive `[min, max]` range of decision years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// An inverted range (`min > max`) contains nothing.
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Filter criteria rebuilt on every interaction.
///
/// Court names are compared verbatim against already-normalized records;
/// an empty court set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub year_range: YearRange,
    pub courts: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(year_range: YearRange, courts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            year_range,
            courts: courts.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a record passes both the year and the court predicate.
    pub fn matches(&self, record: &CaseRecord) -> bool {
        self.year_range.contains(record.decision_year()) && self.courts.contains(record.court())
    }
}
