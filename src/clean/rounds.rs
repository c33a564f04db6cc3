// src/clean/rounds.rs

//! Cleaner for raw per-round statistics.
//!
//! Round rows are only kept when their fight and fighter survived the
//! results and fighters cleaners, so every emitted row joins cleanly.

use std::collections::HashSet;

use serde_json::Value;

use crate::clean::fields::{self, FieldError};
use crate::clean::{CleanOutcome, RejectionReport};
use crate::models::{Fighter, FightResult, RawRound, RecordKind, RoundStat};
use crate::utils::detail_id;

/// Reference tables and limits for cleaning round statistics.
pub struct RoundsContext<'a> {
    pub results: &'a [FightResult],
    pub fighters: &'a [Fighter],
    pub max_rounds: u32,
}

/// Clean every raw round row, preserving input order.
pub fn clean(raws: &[Value], context: &RoundsContext<'_>) -> CleanOutcome<RoundStat> {
    let fight_ids: HashSet<&str> = context.results.iter().map(|r| r.fight_id.as_str()).collect();
    let fighter_ids: HashSet<&str> = context
        .fighters
        .iter()
        .map(|f| f.fighter_id.as_str())
        .collect();

    let mut rows = Vec::new();
    let mut report = RejectionReport::new(RecordKind::Rounds);

    for (index, value) in raws.iter().enumerate() {
        match serde_json::from_value::<RawRound>(value.clone()) {
            Ok(raw) => match clean_row(&raw, context, &fight_ids, &fighter_ids) {
                Ok(stat) => rows.push(stat),
                Err(e) => report.reject(index, e.to_string()),
            },
            Err(e) => report.reject(index, format!("malformed record: {e}")),
        }
    }

    CleanOutcome { rows, report }
}

fn clean_row(
    raw: &RawRound,
    context: &RoundsContext<'_>,
    fight_ids: &HashSet<&str>,
    fighter_ids: &HashSet<&str>,
) -> Result<RoundStat, FieldError> {
    let fight_id = detail_id(&raw.fight_url)
        .filter(|id| fight_ids.contains(id.as_str()))
        .ok_or_else(|| FieldError::new("fight_url", "unresolved fight reference"))?;
    let fighter_id = detail_id(&raw.fighter)
        .filter(|id| fighter_ids.contains(id.as_str()))
        .ok_or_else(|| FieldError::new("fighter", "unresolved fighter reference"))?;

    if raw.round == 0 || raw.round > context.max_rounds {
        return Err(FieldError::new(
            "round",
            format!("round {} outside 1..={}", raw.round, context.max_rounds),
        ));
    }

    let knockdowns = fields::parse_count("kd", raw.kd.as_deref())?;
    let (sig_strikes_landed, sig_strikes_attempted) =
        fields::parse_fraction("sig_str", raw.sig_str.as_deref())?;
    let (total_strikes_landed, total_strikes_attempted) =
        fields::parse_fraction("total_str", raw.total_str.as_deref())?;
    let (takedowns_landed, takedowns_attempted) = fields::parse_fraction("td", raw.td.as_deref())?;
    let submission_attempts = fields::parse_count("sub_att", raw.sub_att.as_deref())?;
    let reversals = fields::parse_count("rev", raw.rev.as_deref())?;

    let head = fields::parse_optional_fraction("head", raw.head.as_deref())?;
    let body = fields::parse_optional_fraction("body", raw.body.as_deref())?;
    let leg = fields::parse_optional_fraction("leg", raw.leg.as_deref())?;
    let distance = fields::parse_optional_fraction("distance", raw.distance.as_deref())?;
    let clinch = fields::parse_optional_fraction("clinch", raw.clinch.as_deref())?;
    let ground = fields::parse_optional_fraction("ground", raw.ground.as_deref())?;

    Ok(RoundStat {
        fight_id,
        round_number: raw.round,
        fighter_id,
        knockdowns,
        sig_strikes_landed,
        sig_strikes_attempted,
        sig_strike_pct: fields::parse_percent(raw.sig_str_pct.as_deref()),
        total_strikes_landed,
        total_strikes_attempted,
        takedowns_landed,
        takedowns_attempted,
        takedown_pct: fields::parse_percent(raw.td_pct.as_deref()),
        submission_attempts,
        reversals,
        control_secs: fields::parse_control("ctrl", raw.ctrl.as_deref())?,
        head_landed: head.map(|(l, _)| l),
        head_attempted: head.map(|(_, a)| a),
        body_landed: body.map(|(l, _)| l),
        body_attempted: body.map(|(_, a)| a),
        leg_landed: leg.map(|(l, _)| l),
        leg_attempted: leg.map(|(_, a)| a),
        distance_landed: distance.map(|(l, _)| l),
        distance_attempted: distance.map(|(_, a)| a),
        clinch_landed: clinch.map(|(l, _)| l),
        clinch_attempted: clinch.map(|(_, a)| a),
        ground_landed: ground.map(|(l, _)| l),
        ground_attempted: ground.map(|(_, a)| a),
    })
}
