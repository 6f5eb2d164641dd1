//! Case records and label normalization.
//!
//! A [`RawCaseRecord`] is whatever the ingestion boundary hands us: court and
//! outcome strings in any spelling (`" tjsp "`, `"TJSP"`, `"improcedente"`).
//! [`CaseRecord`] is the validated form. It can only be built through
//! `CaseRecord::try_from(raw)`, which normalizes the categorical fields once so
//! that every later grouping sees a single key per real-world value.
//!
//! # Normalization conventions
//!
//! - Court and outcome: trimmed, first character upper-cased, rest lower-cased
//!   (`"TJSP"` → `"Tjsp"`).
//! - Request type and legal basis: trimmed only. Legal citations such as
//!   `"Art. 196 CF"` carry meaningful capitals.
//! - Outcome: closed set, Portuguese labels are canonical.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Earliest plausible decision year: the 1988 Constitution (Art. 196) founds the right to health.
pub const MIN_DECISION_YEAR: i32 = 1988;

/// Trim and capitalize a categorical label: first character upper-case, the rest lower-case.
pub fn normalize_label(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Latest plausible decision year (next calendar year, to tolerate clock skew at year end).
pub fn max_decision_year() -> i32 {
    chrono::Utc::now().year() + 1
}

// ── Outcome ──

/// Judgment outcome. Closed: every record is either granted or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "Procedente")]
    Granted,
    #[serde(rename = "Improcedente")]
    Denied,
}

impl Outcome {
    /// Canonical normalized label as stored in the case table.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Granted => "Procedente",
            Outcome::Denied => "Improcedente",
        }
    }

    /// Legend label used by the court comparison chart.
    pub fn display_label(self) -> &'static str {
        match self {
            Outcome::Granted => "Deferido (Procedente)",
            Outcome::Denied => "Indeferido (Improcedente)",
        }
    }
}

impl FromStr for Outcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "Procedente" | "Granted" => Ok(Outcome::Granted),
            "Improcedente" | "Denied" => Ok(Outcome::Denied),
            _ => Err(CoreError::UnrecognizedOutcome(s.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Raw record ──

/// A case record as it arrives from a loader, before normalization.
///
/// Accepts both snake_case field names and the column names of the
/// original spreadsheet export (`AnoDecisao`, `Tribunal`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCaseRecord {
    #[serde(alias = "AnoDecisao")]
    pub decision_year: i32,
    #[serde(alias = "TipoPedido")]
    pub request_type: String,
    #[serde(alias = "Tribunal")]
    pub court: String,
    #[serde(alias = "ValorCausa")]
    pub claim_value: f64,
    #[serde(alias = "ResultadoJulgamento")]
    pub outcome: String,
    #[serde(alias = "FundamentoLegal")]
    pub legal_basis: String,
}

impl RawCaseRecord {
    pub fn new(
        decision_year: i32,
        request_type: impl Into<String>,
        court: impl Into<String>,
        claim_value: f64,
        outcome: impl Into<String>,
        legal_basis: impl Into<String>,
    ) -> Self {
        Self {
            decision_year,
            request_type: request_type.into(),
            court: court.into(),
            claim_value,
            outcome: outcome.into(),
            legal_basis: legal_basis.into(),
        }
    }
}

// ── Normalized record ──

/// One judicial decision, normalized and validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCaseRecord")]
pub struct CaseRecord {
    decision_year: i32,
    request_type: String,
    court: String,
    claim_value: f64,
    outcome: Outcome,
    legal_basis: String,
}

impl CaseRecord {
    pub fn decision_year(&self) -> i32 {
        self.decision_year
    }

    pub fn request_type(&self) -> &str {
        &self.request_type
    }

    pub fn court(&self) -> &str {
        &self.court
    }

    pub fn claim_value(&self) -> f64 {
        self.claim_value
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn legal_basis(&self) -> &str {
        &self.legal_basis
    }
}

impl TryFrom<RawCaseRecord> for CaseRecord {
    type Error = CoreError;

    fn try_from(raw: RawCaseRecord) -> Result<Self, Self::Error> {
        let max = max_decision_year();
        if !(MIN_DECISION_YEAR..=max).contains(&raw.decision_year) {
            return Err(CoreError::YearOutOfRange {
                year: raw.decision_year,
                min: MIN_DECISION_YEAR,
                max,
            });
        }
        if !raw.claim_value.is_finite() || raw.claim_value < 0.0 {
            return Err(CoreError::InvalidClaimValue(raw.claim_value));
        }
        let court = normalize_label(&raw.court);
        if court.is_empty() {
            return Err(CoreError::EmptyCourt);
        }
        let outcome = raw.outcome.parse()?;

        Ok(Self {
            decision_year: raw.decision_year,
            request_type: raw.request_type.trim().to_string(),
            court,
            claim_value: raw.claim_value,
            outcome,
            legal_basis: raw.legal_basis.trim().to_string(),
        })
    }
}

impl From<&CaseRecord> for RawCaseRecord {
    fn from(record: &CaseRecord) -> Self {
        Self {
            decision_year: record.decision_year,
            request_type: record.request_type.clone(),
            court: record.court.clone(),
            claim_value: record.claim_value,
            outcome: record.outcome.label().to_string(),
            legal_basis: record.legal_basis.clone(),
        }
    }
}
