pub mod aggregate;
pub mod cache;
pub mod criteria;
mod error;
pub mod filter;
pub mod record;
pub mod schema;

pub use aggregate::{
    CourtBar, CourtOutcomeMatrix, OutcomeCounts, YearPoint, YearlyCount, court_outcome_matrix,
    yearly_counts,
};
pub use cache::{ChartCache, ChartData, ContentHash, DEFAULT_CACHE_CAPACITY};
pub use criteria::{FilterCriteria, YearRange};
pub use error::CoreError;
pub use filter::filter;
pub use record::{CaseRecord, Outcome, RawCaseRecord, normalize_label};
pub use schema::cases;
