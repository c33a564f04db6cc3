// src/pipeline/dummy.rs

//! Storage probe that writes a tiny known table end to end.

use std::sync::Arc;

use arrow_array::{Float64Array, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema};

use crate::error::Result;
use crate::storage::DataStore;
use crate::tabular;

/// Write a three-row sample table through the full storage path.
///
/// Useful for checking bucket credentials and local permissions before
/// kicking off a long scrape.
pub async fn run_dummy(store: &DataStore) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt32, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("value", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(UInt32Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec!["Alice", "Bob", "Charlie"])),
            Arc::new(Float64Array::from(vec![10.5, 20.3, 30.7])),
        ],
    )?;

    store
        .write_table("sample.parquet", &tabular::to_parquet_bytes(&batch)?)
        .await?;
    log::info!("Sample table written to sample.parquet");
    Ok(())
}
