// src/transform/results.rs

//! Long-format fight results, one row per fighter per fight.

use std::collections::HashMap;
use std::sync::Arc;

use arrow_array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float64Array, RecordBatch, StringArray,
    UInt32Array,
};
use arrow_schema::{DataType, Field, Schema};
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Event, Fighter, FightResult, MethodKind};
use crate::tabular::date32;

struct LongRow<'a> {
    result: &'a FightResult,
    fighter_id: &'a str,
    opponent_id: &'a str,
    corner: &'static str,
    outcome: &'static str,
    event_date: Option<NaiveDate>,
    fighter: Option<&'a Fighter>,
}

/// Reshape results into one row per fighter, left-joining the event date
/// and the fighter's attributes onto each row. An event or fighter id with
/// no match leaves the joined columns null; the row itself is kept.
pub fn long_form(
    events: &[Event],
    fighters: &[Fighter],
    results: &[FightResult],
) -> Result<RecordBatch> {
    let events_by_id: HashMap<&str, &Event> =
        events.iter().map(|e| (e.event_id.as_str(), e)).collect();
    let fighters_by_id: HashMap<&str, &Fighter> =
        fighters.iter().map(|f| (f.fighter_id.as_str(), f)).collect();

    let mut rows = Vec::with_capacity(results.len() * 2);
    for result in results {
        let event_date = events_by_id.get(result.event_id.as_str()).map(|e| e.date);

        for (fighter_id, opponent_id, corner) in [
            (result.fighter_a_id.as_str(), result.fighter_b_id.as_str(), "a"),
            (result.fighter_b_id.as_str(), result.fighter_a_id.as_str(), "b"),
        ] {
            rows.push(LongRow {
                result,
                fighter_id,
                opponent_id,
                corner,
                outcome: outcome_for(result, fighter_id),
                event_date,
                fighter: fighters_by_id.get(fighter_id).copied(),
            });
        }
    }

    build_batch(&rows)
}

fn outcome_for(result: &FightResult, fighter_id: &str) -> &'static str {
    match result.winner_id.as_deref() {
        Some(winner) if winner == fighter_id => "win",
        Some(_) => "loss",
        None if result.method == MethodKind::Nc => "nc",
        None => "draw",
    }
}

fn build_batch(rows: &[LongRow<'_>]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("fight_id", DataType::Utf8, false),
        Field::new("event_id", DataType::Utf8, false),
        Field::new("fighter_id", DataType::Utf8, false),
        Field::new("opponent_id", DataType::Utf8, false),
        Field::new("corner", DataType::Utf8, false),
        Field::new("outcome", DataType::Utf8, false),
        Field::new("event_date", DataType::Date32, true),
        Field::new("weight_class", DataType::Utf8, false),
        Field::new("method", DataType::Utf8, false),
        Field::new("round_ended", DataType::UInt32, false),
        Field::new("time_ended_secs", DataType::UInt32, false),
        Field::new("fight_duration_secs", DataType::UInt32, false),
        Field::new("title_fight", DataType::Boolean, false),
        Field::new("fighter_name", DataType::Utf8, true),
        Field::new("height_cm", DataType::Float64, true),
        Field::new("reach_cm", DataType::Float64, true),
        Field::new("stance", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.result.fight_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.result.event_id.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.fighter_id).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.opponent_id).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.corner).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.outcome).collect::<Vec<_>>(),
        )),
        Arc::new(Date32Array::from(
            rows.iter().map(|r| r.event_date.map(date32)).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.result.weight_class.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.result.method.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.result.round_ended).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.result.time_ended_secs).collect::<Vec<_>>(),
        )),
        Arc::new(UInt32Array::from(
            rows.iter().map(|r| r.result.fight_duration_secs).collect::<Vec<_>>(),
        )),
        Arc::new(BooleanArray::from(
            rows.iter().map(|r| r.result.title_fight).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.fighter.map(|f| f.name.as_str())).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.fighter.and_then(|f| f.height_cm)).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.fighter.and_then(|f| f.reach_cm)).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter()
                .map(|r| r.fighter.and_then(|f| f.stance.as_deref()))
                .collect::<Vec<_>>(),
        )),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}
