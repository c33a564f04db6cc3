// src/tabular.rs

//! Arrow schemas and Parquet encoding for the cleaned tables.
//!
//! Each cleaned record type maps to one fixed schema. Encoding the same
//! rows twice produces byte-identical Parquet files, which keeps reruns
//! of the pipeline from churning storage.

use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float64Array, RecordBatch, StringArray,
    UInt32Array,
};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use chrono::NaiveDate;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::properties::WriterProperties;

use crate::error::{AppError, Result};
use crate::models::{Event, Fighter, FightResult, RoundStat};

/// Days since the Unix epoch, the unit of Arrow's `Date32` type.
pub fn date32(date: NaiveDate) -> i32 {
    date.signed_duration_since(NaiveDate::default()).num_days() as i32
}

/// Inverse of [`date32`].
pub fn date_from_days(days: i32) -> NaiveDate {
    NaiveDate::default() + chrono::Duration::days(i64::from(days))
}

/// Build the events table.
pub fn events_batch(events: &[Event]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("event_id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("location", DataType::Utf8, false),
        Field::new("city", DataType::Utf8, false),
        Field::new("state", DataType::Utf8, true),
        Field::new("country", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            events.iter().map(|e| e.event_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            events.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(Date32Array::from(
            events.iter().map(|e| date32(e.date)).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            events.iter().map(|e| e.location.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            events.iter().map(|e| e.city.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            events.iter().map(|e| e.state.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            events.iter().map(|e| e.country.as_deref()).collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build the fighters table.
pub fn fighters_batch(fighters: &[Fighter]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("fighter_id", DataType::Utf8, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("nickname", DataType::Utf8, true),
        Field::new("height_cm", DataType::Float64, true),
        Field::new("reach_cm", DataType::Float64, true),
        Field::new("stance", DataType::Utf8, true),
        Field::new("date_of_birth", DataType::Date32, true),
        Field::new("record", DataType::Utf8, false),
        Field::new("wins", DataType::UInt32, true),
        Field::new("losses", DataType::UInt32, true),
        Field::new("draws", DataType::UInt32, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            fighters.iter().map(|f| f.fighter_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            fighters.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            fighters.iter().map(|f| f.nickname.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            fighters.iter().map(|f| f.height_cm).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            fighters.iter().map(|f| f.reach_cm).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            fighters.iter().map(|f| f.stance.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(Date32Array::from(
            fighters
                .iter()
                .map(|f| f.date_of_birth.map(date32))
                .collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            fighters.iter().map(|f| f.record.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            fighters.iter().map(|f| f.wins).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            fighters.iter().map(|f| f.losses).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            fighters.iter().map(|f| f.draws).collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build the fight results table. The method is stored as its code.
pub fn results_batch(results: &[FightResult]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("fight_id", DataType::Utf8, false),
        Field::new("event_id", DataType::Utf8, false),
        Field::new("fighter_a_id", DataType::Utf8, false),
        Field::new("fighter_b_id", DataType::Utf8, false),
        Field::new("winner_id", DataType::Utf8, true),
        Field::new("method", DataType::Utf8, false),
        Field::new("method_detail", DataType::Utf8, true),
        Field::new("round_ended", DataType::UInt32, false),
        Field::new("time_ended_secs", DataType::UInt32, false),
        Field::new("fight_duration_secs", DataType::UInt32, false),
        Field::new("weight_class", DataType::Utf8, false),
        Field::new("title_fight", DataType::Boolean, false),
        Field::new("perf_bonus", DataType::Boolean, false),
        Field::new("fight_of_the_night", DataType::Boolean, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            results.iter().map(|r| r.fight_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.event_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.fighter_a_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.fighter_b_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.winner_id.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.method.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.method_detail.as_deref()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            results.iter().map(|r| r.round_ended).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            results.iter().map(|r| r.time_ended_secs).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            results.iter().map(|r| r.fight_duration_secs).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            results.iter().map(|r| r.weight_class.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            results.iter().map(|r| r.title_fight).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            results.iter().map(|r| r.perf_bonus).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            results.iter().map(|r| r.fight_of_the_night).collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Build the per-round statistics table.
pub fn rounds_batch(rounds: &[RoundStat]) -> Result<RecordBatch> {
    let mut fields = vec![
        Field::new("fight_id", DataType::Utf8, false),
        Field::new("round_number", DataType::UInt32, false),
        Field::new("fighter_id", DataType::Utf8, false),
        Field::new("knockdowns", DataType::UInt32, false),
        Field::new("sig_strikes_landed", DataType::UInt32, false),
        Field::new("sig_strikes_attempted", DataType::UInt32, false),
        Field::new("sig_strike_pct", DataType::Float64, true),
        Field::new("total_strikes_landed", DataType::UInt32, false),
        Field::new("total_strikes_attempted", DataType::UInt32, false),
        Field::new("takedowns_landed", DataType::UInt32, false),
        Field::new("takedowns_attempted", DataType::UInt32, false),
        Field::new("takedown_pct", DataType::Float64, true),
        Field::new("submission_attempts", DataType::UInt32, false),
        Field::new("reversals", DataType::UInt32, false),
        Field::new("control_secs", DataType::UInt32, true),
    ];
    for target in ["head", "body", "leg", "distance", "clinch", "ground"] {
        fields.push(Field::new(format!("{target}_landed"), DataType::UInt32, true));
        fields.push(Field::new(format!("{target}_attempted"), DataType::UInt32, true));
    }
    let schema = Arc::new(Schema::new(fields));

    let required = |values: Vec<u32>| -> ArrayRef { Arc::new(UInt32Array::from(values)) };
    let optional = |values: Vec<Option<u32>>| -> ArrayRef { Arc::new(UInt32Array::from(values)) };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rounds.iter().map(|r| r.fight_id.as_str()).collect::<Vec<_>>(),
        )),
        required(rounds.iter().map(|r| r.round_number).collect()),
        Arc::new(StringArray::from(
            rounds.iter().map(|r| r.fighter_id.as_str()).collect::<Vec<_>>(),
        )),
        required(rounds.iter().map(|r| r.knockdowns).collect()),
        required(rounds.iter().map(|r| r.sig_strikes_landed).collect()),
        required(rounds.iter().map(|r| r.sig_strikes_attempted).collect()),
        Arc::new(Float64Array::from(
            rounds.iter().map(|r| r.sig_strike_pct).collect::<Vec<_>>(),
        )),
        required(rounds.iter().map(|r| r.total_strikes_landed).collect()),
        required(rounds.iter().map(|r| r.total_strikes_attempted).collect()),
        required(rounds.iter().map(|r| r.takedowns_landed).collect()),
        required(rounds.iter().map(|r| r.takedowns_attempted).collect()),
        Arc::new(Float64Array::from(
            rounds.iter().map(|r| r.takedown_pct).collect::<Vec<_>>(),
        )),
        required(rounds.iter().map(|r| r.submission_attempts).collect()),
        required(rounds.iter().map(|r| r.reversals).collect()),
        optional(rounds.iter().map(|r| r.control_secs).collect()),
        optional(rounds.iter().map(|r| r.head_landed).collect()),
        optional(rounds.iter().map(|r| r.head_attempted).collect()),
        optional(rounds.iter().map(|r| r.body_landed).collect()),
        optional(rounds.iter().map(|r| r.body_attempted).collect()),
        optional(rounds.iter().map(|r| r.leg_landed).collect()),
        optional(rounds.iter().map(|r| r.leg_attempted).collect()),
        optional(rounds.iter().map(|r| r.distance_landed).collect()),
        optional(rounds.iter().map(|r| r.distance_attempted).collect()),
        optional(rounds.iter().map(|r| r.clinch_landed).collect()),
        optional(rounds.iter().map(|r| r.clinch_attempted).collect()),
        optional(rounds.iter().map(|r| r.ground_landed).collect()),
        optional(rounds.iter().map(|r| r.ground_attempted).collect()),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Encode one batch as a complete Parquet file in memory.
pub fn to_parquet_bytes(batch: &RecordBatch) -> Result<Vec<u8>> {
    let properties = WriterProperties::builder()
        .set_created_by("ufc-pipeline".to_string())
        .build();
    let mut buffer = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buffer, batch.schema(), Some(properties))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(buffer)
}

/// Decode every batch from an in-memory Parquet file.
pub fn read_batches(bytes: Vec<u8>) -> Result<Vec<RecordBatch>> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes))?.build()?;
    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }
    Ok(batches)
}

/// Borrow a named column downcast to its concrete array type.
pub fn column<'a, A: Array + 'static>(batch: &'a RecordBatch, name: &str) -> Result<&'a A> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| AppError::validation(format!("table has no column '{name}'")))?;
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| AppError::validation(format!("column '{name}' has an unexpected type")))
}

fn opt_str(array: &StringArray, row: usize) -> Option<String> {
    (!array.is_null(row)).then(|| array.value(row).to_string())
}

fn opt_u32(array: &UInt32Array, row: usize) -> Option<u32> {
    (!array.is_null(row)).then(|| array.value(row))
}

fn opt_f64(array: &Float64Array, row: usize) -> Option<f64> {
    (!array.is_null(row)).then(|| array.value(row))
}

fn opt_date(array: &Date32Array, row: usize) -> Option<NaiveDate> {
    (!array.is_null(row)).then(|| date_from_days(array.value(row)))
}

/// Decode event rows written by [`events_batch`].
pub fn events_from(batches: &[RecordBatch]) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for batch in batches {
        let event_id: &StringArray = column(batch, "event_id")?;
        let name: &StringArray = column(batch, "name")?;
        let date: &Date32Array = column(batch, "date")?;
        let location: &StringArray = column(batch, "location")?;
        let city: &StringArray = column(batch, "city")?;
        let state: &StringArray = column(batch, "state")?;
        let country: &StringArray = column(batch, "country")?;

        for row in 0..batch.num_rows() {
            events.push(Event {
                event_id: event_id.value(row).to_string(),
                name: name.value(row).to_string(),
                date: date_from_days(date.value(row)),
                location: location.value(row).to_string(),
                city: city.value(row).to_string(),
                state: opt_str(state, row),
                country: opt_str(country, row),
            });
        }
    }
    Ok(events)
}

/// Decode fighter rows written by [`fighters_batch`].
pub fn fighters_from(batches: &[RecordBatch]) -> Result<Vec<Fighter>> {
    let mut fighters = Vec::new();
    for batch in batches {
        let fighter_id: &StringArray = column(batch, "fighter_id")?;
        let name: &StringArray = column(batch, "name")?;
        let nickname: &StringArray = column(batch, "nickname")?;
        let height_cm: &Float64Array = column(batch, "height_cm")?;
        let reach_cm: &Float64Array = column(batch, "reach_cm")?;
        let stance: &StringArray = column(batch, "stance")?;
        let date_of_birth: &Date32Array = column(batch, "date_of_birth")?;
        let record: &StringArray = column(batch, "record")?;
        let wins: &UInt32Array = column(batch, "wins")?;
        let losses: &UInt32Array = column(batch, "losses")?;
        let draws: &UInt32Array = column(batch, "draws")?;

        for row in 0..batch.num_rows() {
            fighters.push(Fighter {
                fighter_id: fighter_id.value(row).to_string(),
                name: name.value(row).to_string(),
                nickname: opt_str(nickname, row),
                height_cm: opt_f64(height_cm, row),
                reach_cm: opt_f64(reach_cm, row),
                stance: opt_str(stance, row),
                date_of_birth: opt_date(date_of_birth, row),
                record: record.value(row).to_string(),
                wins: opt_u32(wins, row),
                losses: opt_u32(losses, row),
                draws: opt_u32(draws, row),
            });
        }
    }
    Ok(fighters)
}

/// Decode fight result rows written by [`results_batch`].
pub fn results_from(batches: &[RecordBatch]) -> Result<Vec<FightResult>> {
    let mut results = Vec::new();
    for batch in batches {
        let fight_id: &StringArray = column(batch, "fight_id")?;
        let event_id: &StringArray = column(batch, "event_id")?;
        let fighter_a_id: &StringArray = column(batch, "fighter_a_id")?;
        let fighter_b_id: &StringArray = column(batch, "fighter_b_id")?;
        let winner_id: &StringArray = column(batch, "winner_id")?;
        let method: &StringArray = column(batch, "method")?;
        let method_detail: &StringArray = column(batch, "method_detail")?;
        let round_ended: &UInt32Array = column(batch, "round_ended")?;
        let time_ended_secs: &UInt32Array = column(batch, "time_ended_secs")?;
        let fight_duration_secs: &UInt32Array = column(batch, "fight_duration_secs")?;
        let weight_class: &StringArray = column(batch, "weight_class")?;
        let title_fight: &BooleanArray = column(batch, "title_fight")?;
        let perf_bonus: &BooleanArray = column(batch, "perf_bonus")?;
        let fight_of_the_night: &BooleanArray = column(batch, "fight_of_the_night")?;

        for row in 0..batch.num_rows() {
            results.push(FightResult {
                fight_id: fight_id.value(row).to_string(),
                event_id: event_id.value(row).to_string(),
                fighter_a_id: fighter_a_id.value(row).to_string(),
                fighter_b_id: fighter_b_id.value(row).to_string(),
                winner_id: opt_str(winner_id, row),
                method: crate::models::MethodKind::parse(method.value(row)),
                method_detail: opt_str(method_detail, row),
                round_ended: round_ended.value(row),
                time_ended_secs: time_ended_secs.value(row),
                fight_duration_secs: fight_duration_secs.value(row),
                weight_class: weight_class.value(row).to_string(),
                title_fight: title_fight.value(row),
                perf_bonus: perf_bonus.value(row),
                fight_of_the_night: fight_of_the_night.value(row),
            });
        }
    }
    Ok(results)
}

/// Decode round statistic rows written by [`rounds_batch`].
pub fn rounds_from(batches: &[RecordBatch]) -> Result<Vec<RoundStat>> {
    let mut rounds = Vec::new();
    for batch in batches {
        let fight_id: &StringArray = column(batch, "fight_id")?;
        let round_number: &UInt32Array = column(batch, "round_number")?;
        let fighter_id: &StringArray = column(batch, "fighter_id")?;
        let knockdowns: &UInt32Array = column(batch, "knockdowns")?;
        let sig_landed: &UInt32Array = column(batch, "sig_strikes_landed")?;
        let sig_attempted: &UInt32Array = column(batch, "sig_strikes_attempted")?;
        let sig_pct: &Float64Array = column(batch, "sig_strike_pct")?;
        let total_landed: &UInt32Array = column(batch, "total_strikes_landed")?;
        let total_attempted: &UInt32Array = column(batch, "total_strikes_attempted")?;
        let td_landed: &UInt32Array = column(batch, "takedowns_landed")?;
        let td_attempted: &UInt32Array = column(batch, "takedowns_attempted")?;
        let td_pct: &Float64Array = column(batch, "takedown_pct")?;
        let sub_attempts: &UInt32Array = column(batch, "submission_attempts")?;
        let reversals: &UInt32Array = column(batch, "reversals")?;
        let control: &UInt32Array = column(batch, "control_secs")?;
        let head_l: &UInt32Array = column(batch, "head_landed")?;
        let head_a: &UInt32Array = column(batch, "head_attempted")?;
        let body_l: &UInt32Array = column(batch, "body_landed")?;
        let body_a: &UInt32Array = column(batch, "body_attempted")?;
        let leg_l: &UInt32Array = column(batch, "leg_landed")?;
        let leg_a: &UInt32Array = column(batch, "leg_attempted")?;
        let distance_l: &UInt32Array = column(batch, "distance_landed")?;
        let distance_a: &UInt32Array = column(batch, "distance_attempted")?;
        let clinch_l: &UInt32Array = column(batch, "clinch_landed")?;
        let clinch_a: &UInt32Array = column(batch, "clinch_attempted")?;
        let ground_l: &UInt32Array = column(batch, "ground_landed")?;
        let ground_a: &UInt32Array = column(batch, "ground_attempted")?;

        for row in 0..batch.num_rows() {
            rounds.push(RoundStat {
                fight_id: fight_id.value(row).to_string(),
                round_number: round_number.value(row),
                fighter_id: fighter_id.value(row).to_string(),
                knockdowns: knockdowns.value(row),
                sig_strikes_landed: sig_landed.value(row),
                sig_strikes_attempted: sig_attempted.value(row),
                sig_strike_pct: opt_f64(sig_pct, row),
                total_strikes_landed: total_landed.value(row),
                total_strikes_attempted: total_attempted.value(row),
                takedowns_landed: td_landed.value(row),
                takedowns_attempted: td_attempted.value(row),
                takedown_pct: opt_f64(td_pct, row),
                submission_attempts: sub_attempts.value(row),
                reversals: reversals.value(row),
                control_secs: opt_u32(control, row),
                head_landed: opt_u32(head_l, row),
                head_attempted: opt_u32(head_a, row),
                body_landed: opt_u32(body_l, row),
                body_attempted: opt_u32(body_a, row),
                leg_landed: opt_u32(leg_l, row),
                leg_attempted: opt_u32(leg_a, row),
                distance_landed: opt_u32(distance_l, row),
                distance_attempted: opt_u32(distance_a, row),
                clinch_landed: opt_u32(clinch_l, row),
                clinch_attempted: opt_u32(clinch_a, row),
                ground_landed: opt_u32(ground_l, row),
                ground_attempted: opt_u32(ground_a, row),
            });
        }
    }
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MethodKind;

    fn sample_events() -> Vec<Event> {
        vec![
            Event {
                event_id: "aaaa111122223333".to_string(),
                name: "UFC 300".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 4, 13).unwrap(),
                location: "Las Vegas, Nevada, USA".to_string(),
                city: "Las Vegas".to_string(),
                state: Some("Nevada".to_string()),
                country: Some("USA".to_string()),
            },
            Event {
                event_id: "bbbb444455556666".to_string(),
                name: "UFC Fight Night".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
                location: "Paris".to_string(),
                city: "Paris".to_string(),
                state: None,
                country: None,
            },
        ]
    }

    #[test]
    fn date32_counts_days_from_the_epoch() {
        assert_eq!(date32(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(date32(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        assert_eq!(date32(NaiveDate::from_ymd_opt(1971, 1, 1).unwrap()), 365);
    }

    #[test]
    fn date_from_days_inverts_date32() {
        for date in [
            NaiveDate::from_ymd_opt(1969, 7, 19).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 13).unwrap(),
        ] {
            assert_eq!(date_from_days(date32(date)), date);
        }
    }

    #[test]
    fn decoders_reconstruct_the_encoded_rows() {
        let events = sample_events();
        let bytes = to_parquet_bytes(&events_batch(&events).unwrap()).unwrap();
        let decoded = events_from(&read_batches(bytes).unwrap()).unwrap();
        assert_eq!(decoded, events);
    }

    #[test]
    fn events_survive_a_parquet_round_trip() {
        let events = sample_events();
        let batch = events_batch(&events).unwrap();
        let bytes = to_parquet_bytes(&batch).unwrap();

        let batches = read_batches(bytes).unwrap();
        assert_eq!(batches.len(), 1);
        let read = &batches[0];
        assert_eq!(read.num_rows(), 2);

        let ids: &StringArray = column(read, "event_id").unwrap();
        assert_eq!(ids.value(0), "aaaa111122223333");
        let dates: &Date32Array = column(read, "date").unwrap();
        assert_eq!(dates.value(0), date32(events[0].date));
        let states: &StringArray = column(read, "state").unwrap();
        assert_eq!(states.value(0), "Nevada");
        assert!(states.is_null(1));
    }

    #[test]
    fn encoding_is_byte_identical_across_runs() {
        let events = sample_events();
        let first = to_parquet_bytes(&events_batch(&events).unwrap()).unwrap();
        let second = to_parquet_bytes(&events_batch(&events).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn writer_stamps_the_application_name() {
        let bytes = to_parquet_bytes(&events_batch(&sample_events()).unwrap()).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(bytes)).unwrap();
        assert_eq!(
            builder.metadata().file_metadata().created_by(),
            Some("ufc-pipeline")
        );
    }

    #[test]
    fn fighter_nulls_round_trip() {
        let fighters = vec![Fighter {
            fighter_id: "cccc777788889999".to_string(),
            name: "Jon Jones".to_string(),
            nickname: Some("Bones".to_string()),
            height_cm: Some(193.04),
            reach_cm: None,
            stance: Some("Orthodox".to_string()),
            date_of_birth: None,
            record: "27-1-0".to_string(),
            wins: Some(27),
            losses: Some(1),
            draws: Some(0),
        }];

        let bytes = to_parquet_bytes(&fighters_batch(&fighters).unwrap()).unwrap();
        let batches = read_batches(bytes).unwrap();
        let read = &batches[0];

        let heights: &Float64Array = column(read, "height_cm").unwrap();
        assert_eq!(heights.value(0), 193.04);
        let reaches: &Float64Array = column(read, "reach_cm").unwrap();
        assert!(reaches.is_null(0));
        let births: &Date32Array = column(read, "date_of_birth").unwrap();
        assert!(births.is_null(0));
    }

    #[test]
    fn results_store_the_method_code() {
        let results = vec![FightResult {
            fight_id: "ffff000011112222".to_string(),
            event_id: "aaaa111122223333".to_string(),
            fighter_a_id: "cccc777788889999".to_string(),
            fighter_b_id: "dddd000011112222".to_string(),
            winner_id: None,
            method: MethodKind::DecisionMajority,
            method_detail: None,
            round_ended: 3,
            time_ended_secs: 300,
            fight_duration_secs: 900,
            weight_class: "Heavyweight".to_string(),
            title_fight: true,
            perf_bonus: false,
            fight_of_the_night: false,
        }];

        let batch = results_batch(&results).unwrap();
        let methods: &StringArray = column(&batch, "method").unwrap();
        assert_eq!(methods.value(0), "DECISION_MAJORITY");
        let winners: &StringArray = column(&batch, "winner_id").unwrap();
        assert!(winners.is_null(0));
    }

    #[test]
    fn rounds_table_has_the_full_column_set() {
        let batch = rounds_batch(&[]).unwrap();
        assert_eq!(batch.num_columns(), 27);
        assert_eq!(batch.num_rows(), 0);
        assert!(batch.schema().column_with_name("ground_attempted").is_some());
    }

    #[test]
    fn missing_column_is_reported() {
        let batch = events_batch(&sample_events()).unwrap();
        let missing = column::<StringArray>(&batch, "no_such_column");
        assert!(missing.is_err());
    }
}
