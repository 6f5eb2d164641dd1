/// Arrow schema and conversions for the case record table.
pub mod cases {
    use std::sync::Arc;

    use arrow::array::{
        Array, ArrayRef, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
    };
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;

    use crate::{CaseRecord, CoreError, RawCaseRecord};

    /// Schema for normalized case records, one row per decision.
    pub fn case_record_schema() -> Schema {
        Schema::new(vec![
            Field::new("decision_year", DataType::Int32, false),
            Field::new("request_type", DataType::Utf8, false),
            Field::new("court", DataType::Utf8, false),
            Field::new("claim_value", DataType::Float64, false),
            Field::new("outcome", DataType::Utf8, false),
            Field::new("legal_basis", DataType::Utf8, false),
        ])
    }

    /// Build a single RecordBatch from records, in the given order.
    pub fn to_record_batch(records: &[CaseRecord]) -> Result<RecordBatch, CoreError> {
        let years: Int32Array = records.iter().map(|r| Some(r.decision_year())).collect();
        let request_types: StringArray = records.iter().map(|r| Some(r.request_type())).collect();
        let courts: StringArray = records.iter().map(|r| Some(r.court())).collect();
        let values: Float64Array = records.iter().map(|r| Some(r.claim_value())).collect();
        let outcomes: StringArray = records.iter().map(|r| Some(r.outcome().label())).collect();
        let bases: StringArray = records.iter().map(|r| Some(r.legal_basis())).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(years),
            Arc::new(request_types),
            Arc::new(courts),
            Arc::new(values),
            Arc::new(outcomes),
            Arc::new(bases),
        ];
        Ok(RecordBatch::try_new(
            Arc::new(case_record_schema()),
            columns,
        )?)
    }

    /// Read raw (not yet normalized) records out of a batch with the case columns.
    ///
    /// Accepts `Utf8` or `LargeUtf8` strings and `Int32` or `Int64` years, since
    /// Parquet writers differ on both. Extra columns are ignored.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<RawCaseRecord>, CoreError> {
        let years = column(batch, "decision_year")?;
        let request_types = column(batch, "request_type")?;
        let courts = column(batch, "court")?;
        let values = column(batch, "claim_value")?;
        let outcomes = column(batch, "outcome")?;
        let bases = column(batch, "legal_basis")?;

        (0..batch.num_rows())
            .map(|row| {
                Ok(RawCaseRecord {
                    decision_year: get_year(years, "decision_year", row)?,
                    request_type: get_str(request_types, "request_type", row)?,
                    court: get_str(courts, "court", row)?,
                    claim_value: get_f64(values, "claim_value", row)?,
                    outcome: get_str(outcomes, "outcome", row)?,
                    legal_basis: get_str(bases, "legal_basis", row)?,
                })
            })
            .collect()
    }

    // ── Helpers ──

    fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, CoreError> {
        batch
            .column_by_name(name)
            .ok_or_else(|| column_error(name, "missing"))
    }

    fn column_error(name: &str, reason: impl Into<String>) -> CoreError {
        CoreError::Column {
            column: name.to_string(),
            reason: reason.into(),
        }
    }

    fn check_null(col: &dyn Array, name: &str, row: usize) -> Result<(), CoreError> {
        if col.is_null(row) {
            return Err(column_error(name, format!("null at row {row}")));
        }
        Ok(())
    }

    fn get_str(col: &ArrayRef, name: &str, row: usize) -> Result<String, CoreError> {
        check_null(col.as_ref(), name, row)?;
        if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
            return Ok(arr.value(row).to_string());
        }
        if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
            return Ok(arr.value(row).to_string());
        }
        Err(column_error(
            name,
            format!("expected string, got {}", col.data_type()),
        ))
    }

    fn get_year(col: &ArrayRef, name: &str, row: usize) -> Result<i32, CoreError> {
        check_null(col.as_ref(), name, row)?;
        if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
            return Ok(arr.value(row));
        }
        if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
            return i32::try_from(arr.value(row))
                .map_err(|_| column_error(name, format!("year out of i32 range at row {row}")));
        }
        Err(column_error(
            name,
            format!("expected integer, got {}", col.data_type()),
        ))
    }

    fn get_f64(col: &ArrayRef, name: &str, row: usize) -> Result<f64, CoreError> {
        check_null(col.as_ref(), name, row)?;
        col.as_any()
            .downcast_ref::<Float64Array>()
            .map(|arr| arr.value(row))
            .ok_or_else(|| {
                column_error(name, format!("expected Float64, got {}", col.data_type()))
            })
    }
}
