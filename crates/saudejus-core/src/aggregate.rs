//! Aggregations feeding the two dashboard charts.
//!
//! Both are plain `group by + count` over an already-filtered slice:
//! decisions per year for the time series, and granted/denied per court for
//! the stacked bars. Outputs cover exactly the keys present in the input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{CaseRecord, Outcome};

// ── Decisions per year ──

/// Count of decisions per year, keyed only by years present (no zero-fill).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct YearlyCount(BTreeMap<i32, usize>);

/// One point of the yearly line series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearPoint {
    pub year: i32,
    pub count: usize,
}

impl YearlyCount {
    pub fn get(&self, year: i32) -> Option<usize> {
        self.0.get(&year).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts; equals the number of aggregated records.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.0.iter().map(|(&y, &c)| (y, c))
    }

    /// Line series sorted ascending by year.
    pub fn series(&self) -> Vec<YearPoint> {
        self.iter()
            .map(|(year, count)| YearPoint { year, count })
            .collect()
    }
}

/// Group records by decision year and count each group.
pub fn yearly_counts(records: &[CaseRecord]) -> YearlyCount {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.decision_year()).or_insert(0) += 1;
    }
    YearlyCount(counts)
}

// ── Outcomes per court ──

/// Granted and denied counts for one court. Both are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub granted: usize,
    pub denied: usize,
}

impl OutcomeCounts {
    pub fn new(granted: usize, denied: usize) -> Self {
        Self { granted, denied }
    }

    pub fn total(&self) -> usize {
        self.granted + self.denied
    }

    /// Share of granted decisions, `None` when there are no decisions.
    pub fn grant_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.granted as f64 / n as f64),
        }
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Granted => self.granted += 1,
            Outcome::Denied => self.denied += 1,
        }
    }
}

/// Court → outcome counts, covering exactly the courts present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CourtOutcomeMatrix(BTreeMap<String, OutcomeCounts>);

/// One stacked bar: a court with its granted and denied counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourtBar {
    pub court: String,
    pub granted: usize,
    pub denied: usize,
    pub grant_rate: Option<f64>,
}

impl CourtOutcomeMatrix {
    pub fn get(&self, court: &str) -> Option<OutcomeCounts> {
        self.0.get(court).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of granted + denied over all courts.
    pub fn total(&self) -> usize {
        self.0.values().map(OutcomeCounts::total).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, OutcomeCounts)> + '_ {
        self.0.iter().map(|(c, &o)| (c.as_str(), o))
    }

    /// Stacked-bar series, courts in alphabetical order.
    pub fn bars(&self) -> Vec<CourtBar> {
        self.iter()
            .map(|(court, counts)| CourtBar {
                court: court.to_string(),
                granted: counts.granted,
                denied: counts.denied,
                grant_rate: counts.grant_rate(),
            })
            .collect()
    }
}

/// Group records by `(court, outcome)` and reshape into court → counts.
///
/// A court seen with only one outcome reports 0 for the other.
pub fn court_outcome_matrix(records: &[CaseRecord]) -> CourtOutcomeMatrix {
    let mut matrix: BTreeMap<String, OutcomeCounts> = BTreeMap::new();
    for r in records {
        matrix
            .entry(r.court().to_string())
            .or_default()
            .record(r.outcome());
    }
    CourtOutcomeMatrix(matrix)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::record::tests::case;
    use crate::{FilterCriteria, RawCaseRecord, YearRange, filter};

    #[test]
    fn missing_outcome_is_zero_not_absent() {
        let matrix = court_outcome_matrix(&[case(2020, "Tjsp", "Granted")]);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get("Tjsp"), Some(OutcomeCounts::new(1, 0)));

        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["Tjsp"]["denied"], 0);
    }

    #[test]
    fn empty_input_gives_empty_views() {
        assert!(yearly_counts(&[]).is_empty());
        assert!(court_outcome_matrix(&[]).is_empty());
    }

    #[test]
    fn end_to_end_scenario() {
        let records = vec![
            case(2020, "Tjsp", "Granted"),
            case(2020, "Tjsp", "Denied"),
            case(2021, "Tjrj", "Granted"),
        ];
        let criteria = FilterCriteria::new(YearRange::new(2020, 2021), ["Tjsp", "Tjrj"]);
        let filtered = filter(&records, &criteria);

        let yearly = yearly_counts(&filtered);
        assert_eq!(yearly.len(), 2);
        assert_eq!(yearly.get(2020), Some(2));
        assert_eq!(yearly.get(2021), Some(1));

        let matrix = court_outcome_matrix(&filtered);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.get("Tjsp"), Some(OutcomeCounts::new(1, 1)));
        assert_eq!(matrix.get("Tjrj"), Some(OutcomeCounts::new(1, 0)));
    }

    #[test]
    fn raw_spellings_aggregate_together() {
        let records = vec![
            case(2020, " tjsp ", "Procedente"),
            case(2020, "TJSP", "Improcedente"),
            case(2021, "TjSp", "Procedente"),
        ];
        let matrix = court_outcome_matrix(&records);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get("Tjsp"), Some(OutcomeCounts::new(2, 1)));
    }

    #[test]
    fn series_sorted_by_year_without_gaps_filled() {
        let records = vec![
            case(2023, "Tjsp", "Granted"),
            case(2019, "Tjsp", "Granted"),
            case(2023, "Tjrj", "Denied"),
        ];
        let series = yearly_counts(&records).series();
        assert_eq!(
            series,
            vec![
                YearPoint { year: 2019, count: 1 },
                YearPoint { year: 2023, count: 2 },
            ]
        );
    }

    #[test]
    fn bars_sorted_alphabetically_with_rate() {
        let records = vec![
            case(2020, "Tjsp", "Granted"),
            case(2020, "Tjdf", "Denied"),
            case(2020, "Tjsp", "Denied"),
            case(2020, "Tjsp", "Granted"),
        ];
        let bars = court_outcome_matrix(&records).bars();
        let courts: Vec<&str> = bars.iter().map(|b| b.court.as_str()).collect();
        assert_eq!(courts, vec!["Tjdf", "Tjsp"]);
        assert_eq!(bars[0].grant_rate, Some(0.0));
        let rate = bars[1].grant_rate.unwrap();
        assert!((rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn grant_rate_none_for_zero_total() {
        assert_eq!(OutcomeCounts::default().grant_rate(), None);
    }

    proptest! {
        /// Property: yearly counts and matrix cells both add up to the filtered size
        #[test]
        fn counts_are_conserved(
            rows in proptest::collection::vec((2016i32..=2024, 0usize..4, any::<bool>()), 0..60),
            min in 2015i32..=2025,
            max in 2015i32..=2025,
        ) {
            const COURTS: [&str; 4] = ["TJSP", "tjrj", " Tjmg", "TJDF "];
            let records: Vec<CaseRecord> = rows
                .into_iter()
                .map(|(year, court, granted)| {
                    CaseRecord::try_from(RawCaseRecord::new(
                        year,
                        "Tratamento",
                        COURTS[court],
                        0.0,
                        if granted { "Procedente" } else { "Improcedente" },
                        "Tema 106 STJ",
                    ))
                    .unwrap()
                })
                .collect();
            let criteria = FilterCriteria::new(
                YearRange::new(min, max),
                ["Tjsp", "Tjrj", "Tjmg"],
            );
            let filtered = filter(&records, &criteria);

            prop_assert_eq!(yearly_counts(&filtered).total(), filtered.len());
            prop_assert_eq!(court_outcome_matrix(&filtered).total(), filtered.len());
        }
    }
}
