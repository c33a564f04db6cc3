// src/pipeline/clean.rs

//! Cleaning pipeline: raw JSON documents in, typed Parquet tables out.

use crate::clean::{self, ResultsContext, RoundsContext};
use crate::error::Result;
use crate::models::{Config, RecordKind};
use crate::storage::DataStore;
use crate::tabular;

/// Clean all four raw documents and write one Parquet table each.
///
/// Events and fighters are cleaned first so that results can be checked
/// against them, and results before rounds for the same reason. Bad
/// rows are dropped and summarized in the log, never fatal.
pub async fn run_clean(config: &Config, store: &DataStore) -> Result<()> {
    let raw_events = store.read_raw(RecordKind::Events).await?;
    let raw_fighters = store.read_raw(RecordKind::Fighters).await?;
    let raw_results = store.read_raw(RecordKind::Results).await?;
    let raw_rounds = store.read_raw(RecordKind::Rounds).await?;

    let events = clean::events::clean(&raw_events);
    events.report.log_summary();

    let fighters = clean::fighters::clean(&raw_fighters);
    fighters.report.log_summary();

    let results = clean::results::clean(
        &raw_results,
        &ResultsContext {
            events: &events.rows,
            fighters: &fighters.rows,
            max_rounds: config.cleaning.max_rounds,
        },
    );
    results.report.log_summary();

    let rounds = clean::rounds::clean(
        &raw_rounds,
        &RoundsContext {
            results: &results.rows,
            fighters: &fighters.rows,
            max_rounds: config.cleaning.max_rounds,
        },
    );
    rounds.report.log_summary();

    let events_bytes = tabular::to_parquet_bytes(&tabular::events_batch(&events.rows)?)?;
    store.write_clean(RecordKind::Events, &events_bytes).await?;
    let fighters_bytes = tabular::to_parquet_bytes(&tabular::fighters_batch(&fighters.rows)?)?;
    store
        .write_clean(RecordKind::Fighters, &fighters_bytes)
        .await?;
    let results_bytes = tabular::to_parquet_bytes(&tabular::results_batch(&results.rows)?)?;
    store
        .write_clean(RecordKind::Results, &results_bytes)
        .await?;
    let rounds_bytes = tabular::to_parquet_bytes(&tabular::rounds_batch(&rounds.rows)?)?;
    store.write_clean(RecordKind::Rounds, &rounds_bytes).await?;

    log::info!(
        "Cleaned tables written: {} events, {} fighters, {} results, {} rounds",
        events.rows.len(),
        fighters.rows.len(),
        results.rows.len(),
        rounds.rows.len()
    );
    Ok(())
}
