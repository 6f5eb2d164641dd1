//! DataFusion SQL over the record store.
//!
//! `FusionStore` registers the normalized case table as an in-memory
//! DataFusion table named `cases`, so ad-hoc questions beyond the two
//! dashboard charts can be asked in SQL.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use datafusion::common::ScalarValue;
use datafusion::datasource::memory::MemTable;
use datafusion::error::DataFusionError;
use datafusion::logical_expr::Volatility;
use datafusion::prelude::SessionContext;
use saudejus_core::Outcome;
use tracing::info;

use crate::{RecordStore, StoreError};

/// Name under which the case table is registered.
pub const CASES_TABLE: &str = "cases";

/// SQL query layer over one record store snapshot.
///
/// Registers `cases` and the `outcome_label()` scalar UDF.
pub struct FusionStore {
    ctx: SessionContext,
}

impl FusionStore {
    pub fn new(store: &RecordStore) -> Result<Self, StoreError> {
        let ctx = SessionContext::new();

        let batch = store.to_record_batch()?;
        let table = MemTable::try_new(batch.schema(), vec![vec![batch]])?;
        ctx.register_table(CASES_TABLE, Arc::new(table))
            .map_err(|e| StoreError::Other(format!("register {CASES_TABLE}: {e}")))?;

        ctx.register_udf(outcome_label_udf());

        info!(rows = store.len(), "DataFusion context ready with cases table");
        Ok(Self { ctx })
    }

    /// Execute a SQL query and collect all result batches.
    pub async fn query(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        let df = self.ctx.sql(sql).await?;
        let batches = df.collect().await?;
        Ok(batches)
    }

    /// Access the underlying `SessionContext` for advanced use.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }
}

// ── UDFs ──

/// Maps canonical outcome labels to the chart legend labels.
fn outcome_label_udf() -> datafusion::logical_expr::ScalarUDF {
    datafusion::logical_expr::create_udf(
        "outcome_label",
        vec![DataType::Utf8],
        DataType::Utf8,
        Volatility::Immutable,
        Arc::new(|args: &[datafusion::logical_expr::ColumnarValue]| {
            use datafusion::logical_expr::ColumnarValue;

            match &args[0] {
                ColumnarValue::Array(array) => {
                    let input = array
                        .as_any()
                        .downcast_ref::<StringArray>()
                        .ok_or_else(|| {
                            DataFusionError::Internal("outcome_label: expected Utf8 array".into())
                        })?;
                    let result: StringArray =
                        input.iter().map(|opt| opt.map(map_outcome_label)).collect();
                    Ok(ColumnarValue::Array(Arc::new(result) as ArrayRef))
                }
                ColumnarValue::Scalar(ScalarValue::Utf8(value)) => {
                    let mapped = value.as_deref().map(map_outcome_label).map(str::to_string);
                    Ok(ColumnarValue::Scalar(ScalarValue::Utf8(mapped)))
                }
                ColumnarValue::Scalar(other) => Err(DataFusionError::Internal(format!(
                    "outcome_label: expected Utf8 scalar, got {}",
                    other.data_type()
                ))),
            }
        }),
    )
}

fn map_outcome_label(label: &str) -> &str {
    match label.parse::<Outcome>() {
        Ok(outcome) => outcome.display_label(),
        Err(_) => label,
    }
}
