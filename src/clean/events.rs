// src/clean/events.rs

//! Cleaner for raw event records.

use serde_json::Value;

use crate::clean::fields::{self, FieldError};
use crate::clean::{CleanOutcome, RejectionReport};
use crate::models::{Event, RawEvent, RecordKind};
use crate::utils::detail_id;

/// Clean every raw event, preserving input order. A row that fails any
/// coercion is rejected on its own and recorded in the report.
pub fn clean(raws: &[Value]) -> CleanOutcome<Event> {
    let mut rows = Vec::new();
    let mut report = RejectionReport::new(RecordKind::Events);

    for (index, value) in raws.iter().enumerate() {
        match serde_json::from_value::<RawEvent>(value.clone()) {
            Ok(raw) => match clean_row(&raw) {
                Ok(event) => rows.push(event),
                Err(e) => report.reject(index, e.to_string()),
            },
            Err(e) => report.reject(index, format!("malformed record: {e}")),
        }
    }

    CleanOutcome { rows, report }
}

fn clean_row(raw: &RawEvent) -> Result<Event, FieldError> {
    let event_id = detail_id(&raw.event_url)
        .ok_or_else(|| FieldError::new("event_url", "no event id in url"))?;
    let date = fields::parse_event_date("date", &raw.date)?;
    let (city, state, country) = fields::split_location(&raw.location);

    Ok(Event {
        event_id,
        name: raw.event.clone(),
        date,
        location: raw.location.clone(),
        city,
        state,
        country,
    })
}
