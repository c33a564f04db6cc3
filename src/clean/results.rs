// src/clean/results.rs

//! Cleaner for raw fight results.
//!
//! Results reference events and fighters cleaned in the same run; a row
//! whose references cannot be resolved is rejected rather than emitted
//! with dangling identifiers.

use std::collections::HashSet;

use serde_json::Value;

use crate::clean::fields::{self, FieldError};
use crate::clean::{CleanOutcome, RejectionReport};
use crate::models::{Event, Fighter, FightResult, MethodKind, RawResult, RecordKind};
use crate::utils::detail_id;

/// Reference tables and limits for cleaning results.
pub struct ResultsContext<'a> {
    pub events: &'a [Event],
    pub fighters: &'a [Fighter],
    pub max_rounds: u32,
}

/// Clean every raw result, preserving input order.
pub fn clean(raws: &[Value], context: &ResultsContext<'_>) -> CleanOutcome<FightResult> {
    let event_ids: HashSet<&str> = context.events.iter().map(|e| e.event_id.as_str()).collect();
    let fighter_ids: HashSet<&str> = context
        .fighters
        .iter()
        .map(|f| f.fighter_id.as_str())
        .collect();

    let mut rows = Vec::new();
    let mut report = RejectionReport::new(RecordKind::Results);

    for (index, value) in raws.iter().enumerate() {
        match serde_json::from_value::<RawResult>(value.clone()) {
            Ok(raw) => match clean_row(&raw, context, &event_ids, &fighter_ids) {
                Ok(result) => rows.push(result),
                Err(e) => report.reject(index, e.to_string()),
            },
            Err(e) => report.reject(index, format!("malformed record: {e}")),
        }
    }

    CleanOutcome { rows, report }
}

fn clean_row(
    raw: &RawResult,
    context: &ResultsContext<'_>,
    event_ids: &HashSet<&str>,
    fighter_ids: &HashSet<&str>,
) -> Result<FightResult, FieldError> {
    let fight_id = detail_id(&raw.fight_url)
        .ok_or_else(|| FieldError::new("fight_url", "no fight id in url"))?;

    let event_id = raw
        .event_url
        .as_deref()
        .and_then(detail_id)
        .ok_or_else(|| FieldError::new("event_url", "no event id in url"))?;
    if !event_ids.contains(event_id.as_str()) {
        return Err(FieldError::new("event_url", "unresolved event reference"));
    }

    if raw.fighters_urls.len() != 2 {
        return Err(FieldError::new(
            "fighters_urls",
            format!("expected 2 fighter urls, got {}", raw.fighters_urls.len()),
        ));
    }
    let fighter_a_id = detail_id(&raw.fighters_urls[0])
        .filter(|id| fighter_ids.contains(id.as_str()))
        .ok_or_else(|| FieldError::new("fighters_urls", "unresolved fighter reference"))?;
    let fighter_b_id = detail_id(&raw.fighters_urls[1])
        .filter(|id| fighter_ids.contains(id.as_str()))
        .ok_or_else(|| FieldError::new("fighters_urls", "unresolved fighter reference"))?;
    if fighter_a_id == fighter_b_id {
        return Err(FieldError::new("fighters_urls", "duplicate fighter reference"));
    }

    let round_ended = fields::parse_count("round", Some(&raw.round))?;
    if round_ended == 0 || round_ended > context.max_rounds {
        return Err(FieldError::new(
            "round",
            format!(
                "round {} outside 1..={}",
                round_ended, context.max_rounds
            ),
        ));
    }
    let time_ended_secs = fields::parse_duration("time", &raw.time)?;
    // Completed rounds are five minutes each on every modern card.
    let fight_duration_secs = (round_ended - 1) * 300 + time_ended_secs;

    let (method_code, method_detail) = fields::split_method(&raw.method);
    let method = MethodKind::parse(&method_code);
    if method == MethodKind::Other && !method_code.is_empty() {
        log::warn!("Unrecognized method '{}' mapped to OTHER", method_code);
    }

    // The outcome flag belongs to the first listed fighter.
    let winner_id = match raw.winner.trim().to_lowercase().as_str() {
        "win" => Some(fighter_a_id.clone()),
        _ => None,
    };

    Ok(FightResult {
        fight_id,
        event_id,
        fighter_a_id,
        fighter_b_id,
        winner_id,
        method,
        method_detail,
        round_ended,
        time_ended_secs,
        fight_duration_secs,
        weight_class: raw.weight_class.clone(),
        title_fight: raw.title_fight,
        perf_bonus: raw.perf_bonus,
        fight_of_the_night: raw.fight_of_the_night,
    })
}
