// src/clean/fields.rs

//! Field-level coercions from display strings to typed values.
//!
//! Each helper either produces a typed value, a `None` for attributes the
//! site legitimately leaves blank ("--", "---"), or a [`FieldError`] that
//! rejects the single row it came from. Nothing in here aborts a run.

use std::fmt;

use chrono::NaiveDate;
use regex::Regex;

/// A single field of a single row failed typed coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::new(field, "value is missing")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

fn tidy(value: &str) -> String {
    value.replace('\u{a0}', " ").trim().to_string()
}

fn is_blank(value: &str) -> bool {
    value.is_empty() || value.chars().all(|c| c == '-')
}

/// Parse an event listing date such as "March 30, 2024".
pub fn parse_event_date(field: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    let value = tidy(value);
    NaiveDate::parse_from_str(&value, "%B %d, %Y")
        .map_err(|_| FieldError::new(field, format!("expected 'Month day, year', got '{value}'")))
}

/// Parse a profile birth date such as "Oct 17, 1989".
pub fn parse_birth_date(field: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    let value = tidy(value);
    NaiveDate::parse_from_str(&value, "%b %d, %Y")
        .map_err(|_| FieldError::new(field, format!("expected 'Mon day, year', got '{value}'")))
}

/// Parse a clock duration ("M:SS", or "H:MM:SS") into seconds.
pub fn parse_duration(field: &'static str, value: &str) -> Result<u32, FieldError> {
    let value = tidy(value);
    let parts: Vec<&str> = value.split(':').collect();
    let numbers: Result<Vec<u32>, _> = parts.iter().map(|p| p.trim().parse::<u32>()).collect();
    match (parts.len(), numbers) {
        (2, Ok(n)) => Ok(n[0] * 60 + n[1]),
        (3, Ok(n)) => Ok(n[0] * 3600 + n[1] * 60 + n[2]),
        _ => Err(FieldError::new(
            field,
            format!("expected a clock duration, got '{value}'"),
        )),
    }
}

/// Parse a control-time cell; "--" means the site did not track it.
pub fn parse_control(field: &'static str, value: Option<&str>) -> Result<Option<u32>, FieldError> {
    match value {
        None => Ok(None),
        Some(v) if is_blank(&tidy(v)) => Ok(None),
        Some(v) => parse_duration(field, v).map(Some),
    }
}

/// Parse a required non-negative count such as knockdowns.
pub fn parse_count(field: &'static str, value: Option<&str>) -> Result<u32, FieldError> {
    let value = tidy(value.ok_or_else(|| FieldError::missing(field))?);
    value
        .parse::<u32>()
        .map_err(|_| FieldError::new(field, format!("expected a count, got '{value}'")))
}

/// Parse a required "landed of attempted" pair.
pub fn parse_fraction(
    field: &'static str,
    value: Option<&str>,
) -> Result<(u32, u32), FieldError> {
    let value = tidy(value.ok_or_else(|| FieldError::missing(field))?);
    let invalid = || FieldError::new(field, format!("expected 'landed of attempted', got '{value}'"));

    let (landed, attempted) = value.split_once(" of ").ok_or_else(|| invalid())?;
    let landed = landed.trim().parse::<u32>().map_err(|_| invalid())?;
    let attempted = attempted.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((landed, attempted))
}

/// Like [`parse_fraction`], but the whole field may be absent.
pub fn parse_optional_fraction(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<(u32, u32)>, FieldError> {
    match value {
        None => Ok(None),
        Some(v) => parse_fraction(field, Some(v)).map(Some),
    }
}

/// Parse a percentage cell ("41%"). Placeholders and anything unparsable
/// come back as `None`; accuracy columns are advisory on the site.
pub fn parse_percent(value: Option<&str>) -> Option<f64> {
    let value = tidy(value?);
    if is_blank(&value) {
        return None;
    }
    value.trim_end_matches('%').trim().parse::<f64>().ok()
}

/// Convert a height like `5' 10"` to centimeters.
pub fn parse_height_cm(value: &str) -> Option<f64> {
    let caps = Regex::new(r#"(\d+)'\s*(\d+)"#).ok()?.captures(value)?;
    let feet: f64 = caps.get(1)?.as_str().parse().ok()?;
    let inches: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(feet * 30.48 + inches * 2.54)
}

/// Convert a reach like `74"` to centimeters.
pub fn parse_reach_cm(value: &str) -> Option<f64> {
    let value = tidy(value);
    let inches: f64 = value.trim_end_matches('"').trim().parse().ok()?;
    Some(inches * 2.54)
}

/// Split "city[, state], country" into its components.
pub fn split_location(value: &str) -> (String, Option<String>, Option<String>) {
    let parts: Vec<String> = value.split(',').map(|p| tidy(p)).collect();
    match parts.len() {
        0 => (String::new(), None, None),
        1 => (parts[0].clone(), None, None),
        2 => (parts[0].clone(), None, Some(parts[1].clone())),
        _ => (
            parts[0].clone(),
            Some(parts[1].clone()),
            Some(parts[parts.len() - 1].clone()),
        ),
    }
}

/// Split a raw method cell into the short code and the optional detail
/// line, e.g. "SUB\nRear Naked Choke".
pub fn split_method(value: &str) -> (String, Option<String>) {
    let mut lines = value.split('\n').map(str::trim).filter(|l| !l.is_empty());
    let method = lines.next().unwrap_or_default().to_string();
    let detail = lines.next().map(str::to_string);
    (method, detail)
}

/// Parse "wins-losses-draws" out of a record string, ignoring any
/// no-contest suffix such as "(1 NC)".
pub fn parse_record(value: &str) -> Option<(u32, u32, u32)> {
    let value = tidy(value);
    let core = value.split_whitespace().next()?;
    let mut parts = core.split('-');
    let wins = parts.next()?.parse().ok()?;
    let losses = parts.next()?.parse().ok()?;
    let draws = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((wins, losses, draws))
}
