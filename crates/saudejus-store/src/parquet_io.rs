//! Parquet ingestion and export for the case table.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::info;

use crate::StoreError;

/// Read all record batches from a Parquet file.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Write one record batch to a new Parquet file, replacing any existing file.
pub fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<(), StoreError> {
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    info!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordStore;
    use tempfile::TempDir;

    #[test]
    fn missing_file_errors() {
        let result = read_parquet(Path::new("/nonexistent/cases.parquet"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn store_survives_parquet_export() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cases.parquet");
        let store = RecordStore::simulated().unwrap();

        write_parquet(&path, &store.to_record_batch().unwrap()).unwrap();
        assert!(path.exists());

        let reopened = RecordStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 17);
        assert_eq!(reopened.records(), store.records());
        assert_eq!(reopened.courts(), store.courts());
    }
}
