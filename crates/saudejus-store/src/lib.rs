//! Record store and per-session analysis: JSON/Parquet ingestion, DataFusion (unified query).

mod error;
pub use error::StoreError;

mod fixture;
mod session;
mod store;
pub use session::{Session, View};
pub use store::RecordStore;

#[cfg(feature = "parquet")]
mod parquet_io;
#[cfg(feature = "parquet")]
pub use parquet_io::{read_parquet, write_parquet};

#[cfg(feature = "datafusion")]
mod fusion;
#[cfg(feature = "datafusion")]
pub use fusion::FusionStore;
