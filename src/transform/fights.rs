// src/transform/fights.rs

//! Per-fight totals folded from the round statistics.

use std::collections::HashMap;
use std::sync::Arc;

use arrow_array::{Array, ArrayRef, Date32Array, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema};
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Event, FightResult, RoundStat};
use crate::tabular::date32;

/// Accumulated statistics for one fighter over one fight.
///
/// Counter columns sum plainly. Optional columns stay `None` until a
/// round actually reports them, so a fight where control time was never
/// displayed keeps a null total instead of a misleading zero.
#[derive(Debug, Default)]
struct Totals {
    rounds_fought: u32,
    knockdowns: u32,
    sig_strikes_landed: u32,
    sig_strikes_attempted: u32,
    total_strikes_landed: u32,
    total_strikes_attempted: u32,
    takedowns_landed: u32,
    takedowns_attempted: u32,
    submission_attempts: u32,
    reversals: u32,
    control_secs: Option<u32>,
    head_landed: Option<u32>,
    head_attempted: Option<u32>,
    body_landed: Option<u32>,
    body_attempted: Option<u32>,
    leg_landed: Option<u32>,
    leg_attempted: Option<u32>,
    distance_landed: Option<u32>,
    distance_attempted: Option<u32>,
    clinch_landed: Option<u32>,
    clinch_attempted: Option<u32>,
    ground_landed: Option<u32>,
    ground_attempted: Option<u32>,
}

impl Totals {
    fn add(&mut self, stat: &RoundStat) {
        self.rounds_fought += 1;
        self.knockdowns += stat.knockdowns;
        self.sig_strikes_landed += stat.sig_strikes_landed;
        self.sig_strikes_attempted += stat.sig_strikes_attempted;
        self.total_strikes_landed += stat.total_strikes_landed;
        self.total_strikes_attempted += stat.total_strikes_attempted;
        self.takedowns_landed += stat.takedowns_landed;
        self.takedowns_attempted += stat.takedowns_attempted;
        self.submission_attempts += stat.submission_attempts;
        self.reversals += stat.reversals;
        add_opt(&mut self.control_secs, stat.control_secs);
        add_opt(&mut self.head_landed, stat.head_landed);
        add_opt(&mut self.head_attempted, stat.head_attempted);
        add_opt(&mut self.body_landed, stat.body_landed);
        add_opt(&mut self.body_attempted, stat.body_attempted);
        add_opt(&mut self.leg_landed, stat.leg_landed);
        add_opt(&mut self.leg_attempted, stat.leg_attempted);
        add_opt(&mut self.distance_landed, stat.distance_landed);
        add_opt(&mut self.distance_attempted, stat.distance_attempted);
        add_opt(&mut self.clinch_landed, stat.clinch_landed);
        add_opt(&mut self.clinch_attempted, stat.clinch_attempted);
        add_opt(&mut self.ground_landed, stat.ground_landed);
        add_opt(&mut self.ground_attempted, stat.ground_attempted);
    }
}

fn add_opt(total: &mut Option<u32>, value: Option<u32>) {
    if let Some(v) = value {
        *total = Some(total.unwrap_or(0) + v);
    }
}

struct FightRow<'a> {
    fight_id: &'a str,
    fighter_id: &'a str,
    event_id: Option<&'a str>,
    event_date: Option<NaiveDate>,
    totals: &'a Totals,
}

/// Fold round statistics into one row per fighter per fight, left-joining
/// the event id and date through the results table. A fight with no
/// results row keeps its totals; the event columns stay null.
pub fn per_fight_totals(
    events: &[Event],
    results: &[FightResult],
    rounds: &[RoundStat],
) -> Result<RecordBatch> {
    let events_by_id: HashMap<&str, &Event> =
        events.iter().map(|e| (e.event_id.as_str(), e)).collect();
    let results_by_id: HashMap<&str, &FightResult> =
        results.iter().map(|r| (r.fight_id.as_str(), r)).collect();

    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Totals> = HashMap::new();
    for stat in rounds {
        let key = (stat.fight_id.clone(), stat.fighter_id.clone());
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().add(stat);
    }

    let mut rows = Vec::with_capacity(order.len());
    for key in &order {
        let (fight_id, fighter_id) = key;
        let result = results_by_id.get(fight_id.as_str()).copied();
        let event = result.and_then(|r| events_by_id.get(r.event_id.as_str()).copied());
        rows.push(FightRow {
            fight_id,
            fighter_id,
            event_id: result.map(|r| r.event_id.as_str()),
            event_date: event.map(|e| e.date),
            totals: &groups[key],
        });
    }

    build_batch(&rows)
}

fn build_batch(rows: &[FightRow<'_>]) -> Result<RecordBatch> {
    let mut fields = vec![
        Field::new("fight_id", DataType::Utf8, false),
        Field::new("fighter_id", DataType::Utf8, false),
        Field::new("event_id", DataType::Utf8, true),
        Field::new("event_date", DataType::Date32, true),
        Field::new("rounds_fought", DataType::UInt32, false),
        Field::new("knockdowns", DataType::UInt32, false),
        Field::new("sig_strikes_landed", DataType::UInt32, false),
        Field::new("sig_strikes_attempted", DataType::UInt32, false),
        Field::new("total_strikes_landed", DataType::UInt32, false),
        Field::new("total_strikes_attempted", DataType::UInt32, false),
        Field::new("takedowns_landed", DataType::UInt32, false),
        Field::new("takedowns_attempted", DataType::UInt32, false),
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
            rows.iter().map(|r| r.fight_id).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.fighter_id).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.event_id).collect::<Vec<_>>(),
        )),
        Arc::new(Date32Array::from(
            rows.iter().map(|r| r.event_date.map(date32)).collect::<Vec<_>>(),
        )),
        required(rows.iter().map(|r| r.totals.rounds_fought).collect()),
        required(rows.iter().map(|r| r.totals.knockdowns).collect()),
        required(rows.iter().map(|r| r.totals.sig_strikes_landed).collect()),
        required(rows.iter().map(|r| r.totals.sig_strikes_attempted).collect()),
        required(rows.iter().map(|r| r.totals.total_strikes_landed).collect()),
        required(rows.iter().map(|r| r.totals.total_strikes_attempted).collect()),
        required(rows.iter().map(|r| r.totals.takedowns_landed).collect()),
        required(rows.iter().map(|r| r.totals.takedowns_attempted).collect()),
        required(rows.iter().map(|r| r.totals.submission_attempts).collect()),
        required(rows.iter().map(|r| r.totals.reversals).collect()),
        optional(rows.iter().map(|r| r.totals.control_secs).collect()),
        optional(rows.iter().map(|r| r.totals.head_landed).collect()),
        optional(rows.iter().map(|r| r.totals.head_attempted).collect()),
        optional(rows.iter().map(|r| r.totals.body_landed).collect()),
        optional(rows.iter().map(|r| r.totals.body_attempted).collect()),
        optional(rows.iter().map(|r| r.totals.leg_landed).collect()),
        optional(rows.iter().map(|r| r.totals.leg_attempted).collect()),
        optional(rows.iter().map(|r| r.totals.distance_landed).collect()),
        optional(rows.iter().map(|r| r.totals.distance_attempted).collect()),
        optional(rows.iter().map(|r| r.totals.clinch_landed).collect()),
        optional(rows.iter().map(|r| r.totals.clinch_attempted).collect()),
        optional(rows.iter().map(|r| r.totals.ground_landed).collect()),
        optional(rows.iter().map(|r| r.totals.ground_attempted).collect()),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}
