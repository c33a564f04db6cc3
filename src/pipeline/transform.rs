// src/pipeline/transform.rs

//! Transform pipeline: cleaned tables in, analysis tables out.

use crate::error::Result;
use crate::models::RecordKind;
use crate::storage::DataStore;
use crate::tabular;
use crate::transform;

/// Build the long-format results table and the per-fight totals table
/// from the cleaned Parquet files.
pub async fn run_transform(store: &DataStore) -> Result<()> {
    let events =
        tabular::events_from(&tabular::read_batches(store.read_clean(RecordKind::Events).await?)?)?;
    let fighters = tabular::fighters_from(&tabular::read_batches(
        store.read_clean(RecordKind::Fighters).await?,
    )?)?;
    let results = tabular::results_from(&tabular::read_batches(
        store.read_clean(RecordKind::Results).await?,
    )?)?;
    let rounds =
        tabular::rounds_from(&tabular::read_batches(store.read_clean(RecordKind::Rounds).await?)?)?;

    let long = transform::long_form(&events, &fighters, &results)?;
    let totals = transform::per_fight_totals(&events, &results, &rounds)?;

    let out = store.files().transformed.clone();
    store
        .write_table(&out.results, &tabular::to_parquet_bytes(&long)?)
        .await?;
    store
        .write_table(&out.fights, &tabular::to_parquet_bytes(&totals)?)
        .await?;

    log::info!(
        "Transformed tables written: {} fighter-fight rows, {} fight totals",
        long.num_rows(),
        totals.num_rows()
    );
    Ok(())
}
