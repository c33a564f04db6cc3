// src/clean/fighters.rs

//! Cleaner for raw fighter profiles.

use serde_json::Value;

use crate::clean::fields::{self, FieldError};
use crate::clean::{CleanOutcome, RejectionReport};
use crate::models::{Fighter, RawFighter, RecordKind};
use crate::utils::detail_id;

/// Clean every raw fighter profile, preserving input order.
///
/// Height, reach, stance and date of birth are attributes the site often
/// leaves unknown; they stay `None` without rejecting the row. A profile
/// without a resolvable identifier or name is rejected.
pub fn clean(raws: &[Value]) -> CleanOutcome<Fighter> {
    let mut rows = Vec::new();
    let mut report = RejectionReport::new(RecordKind::Fighters);

    for (index, value) in raws.iter().enumerate() {
        match serde_json::from_value::<RawFighter>(value.clone()) {
            Ok(raw) => match clean_row(&raw) {
                Ok(fighter) => rows.push(fighter),
                Err(e) => report.reject(index, e.to_string()),
            },
            Err(e) => report.reject(index, format!("malformed record: {e}")),
        }
    }

    CleanOutcome { rows, report }
}

fn clean_row(raw: &RawFighter) -> Result<Fighter, FieldError> {
    let fighter_id = raw
        .fighter_url
        .as_deref()
        .and_then(detail_id)
        .ok_or_else(|| FieldError::new("fighter_url", "no fighter id in url"))?;
    if raw.full_name.trim().is_empty() {
        return Err(FieldError::new("full_name", "value is missing"));
    }

    let date_of_birth = raw
        .date_of_birth
        .as_deref()
        .map(|dob| fields::parse_birth_date("date_of_birth", dob))
        .transpose()?;
    let height_cm = raw.height.as_deref().and_then(fields::parse_height_cm);
    let reach_cm = raw.reach.as_deref().and_then(fields::parse_reach_cm);
    let counts = fields::parse_record(&raw.record);

    Ok(Fighter {
        fighter_id,
        name: raw.full_name.trim().to_string(),
        nickname: raw.nickname.clone(),
        height_cm,
        reach_cm,
        stance: raw.stance.clone(),
        date_of_birth,
        record: raw.record.clone(),
        wins: counts.map(|(w, _, _)| w),
        losses: counts.map(|(_, l, _)| l),
        draws: counts.map(|(_, _, d)| d),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_fighter() -> Value {
        serde_json::json!({
            "full_name": "Charles Oliveira",
            "fighter_url": "http://ufcstats.com/fighter-details/d0f3959b4a9747e6",
            "nickname": "Do Bronx",
            "height": "5' 10\"",
            "reach": "74\"",
            "stance": "Orthodox",
            "date_of_birth": "Oct 17, 1989",
            "record": "34-9-0 (1 NC)",
        })
    }

    #[test]
    fn cleans_a_full_profile() {
        let outcome = clean(&[raw_fighter()]);
        assert!(outcome.report.is_empty());

        let fighter = &outcome.rows[0];
        assert_eq!(fighter.fighter_id, "d0f3959b4a9747e6");
        assert_eq!(fighter.name, "Charles Oliveira");
        assert!((fighter.height_cm.unwrap() - 177.8).abs() < 1e-9);
        assert!((fighter.reach_cm.unwrap() - 187.96).abs() < 1e-9);
        assert_eq!(
            fighter.date_of_birth,
            Some(NaiveDate::from_ymd_opt(1989, 10, 17).unwrap())
        );
        assert_eq!(fighter.record, "34-9-0 (1 NC)");
        assert_eq!(fighter.wins, Some(34));
        assert_eq!(fighter.losses, Some(9));
        assert_eq!(fighter.draws, Some(0));
    }

    #[test]
    fn unknown_attributes_stay_none_without_rejection() {
        let raw = serde_json::json!({
            "full_name": "Mystery Fighter",
            "fighter_url": "http://ufcstats.com/fighter-details/aaaa111122223333",
            "record": "1-0-0",
        });
        let outcome = clean(&[raw]);
        assert!(outcome.report.is_empty());

        let fighter = &outcome.rows[0];
        assert_eq!(fighter.height_cm, None);
        assert_eq!(fighter.reach_cm, None);
        assert_eq!(fighter.stance, None);
        assert_eq!(fighter.date_of_birth, None);
        assert_eq!(fighter.nickname, None);
    }

    #[test]
    fn missing_profile_url_rejects_the_row() {
        let raw = serde_json::json!({
            "full_name": "No Url",
            "record": "0-0-0",
        });
        let outcome = clean(&[raw]);
        assert!(outcome.rows.is_empty());
        assert!(
            outcome.report.rejections()[0]
                .reason
                .contains("no fighter id")
        );
    }

    #[test]
    fn unparsable_birth_date_rejects_the_row() {
        let mut value = raw_fighter();
        value["date_of_birth"] = Value::String("17 October 1989".to_string());
        let outcome = clean(&[value]);
        assert!(outcome.rows.is_empty());
        assert_eq!(outcome.report.len(), 1);
    }

    #[test]
    fn unparsable_record_string_keeps_the_row() {
        let mut value = raw_fighter();
        value["record"] = Value::String("unbeaten".to_string());
        let outcome = clean(&[value]);
        assert!(outcome.report.is_empty());
        assert_eq!(outcome.rows[0].wins, None);
        assert_eq!(outcome.rows[0].record, "unbeaten");
    }
}
