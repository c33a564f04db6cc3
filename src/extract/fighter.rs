// src/extract/fighter.rs

//! Extractor for a fighter profile page.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::extract::{clean_text, parse_selector};
use crate::models::RawFighter;

/// Extract the single profile record of a fighter page.
///
/// Attributes the page marks as unknown ("--") come back as `None`. The
/// career statistics boxes reuse the same list markup as the vitals and
/// are ignored here.
pub fn fighter(html: &str) -> Result<RawFighter> {
    let document = Html::parse_document(html);

    let name_sel = parse_selector("span.b-content__title-highlight")?;
    let Some(name_elem) = document.select(&name_sel).next() else {
        return Err(AppError::parse("fighter profile", "title highlight not found"));
    };
    let full_name = clean_text(&name_elem);

    let record_sel = parse_selector("span.b-content__title-record")?;
    let record = document
        .select(&record_sel)
        .next()
        .map(|el| {
            clean_text(&el)
                .trim_start_matches("Record:")
                .trim()
                .to_string()
        })
        .unwrap_or_default();

    let nickname_sel = parse_selector("p.b-content__Nickname")?;
    let nickname = document
        .select(&nickname_sel)
        .next()
        .map(|el| clean_text(&el).trim_matches('"').trim().to_string())
        .filter(|text| !text.is_empty());

    let item_sel = parse_selector("li.b-list__box-list-item")?;
    let title_sel = parse_selector("i.b-list__box-item-title")?;

    let mut height = None;
    let mut reach = None;
    let mut stance = None;
    let mut date_of_birth = None;

    for item in document.select(&item_sel) {
        let Some(title_elem) = item.select(&title_sel).next() else {
            continue;
        };
        let title = clean_text(&title_elem);
        if title.is_empty() {
            continue;
        }

        let value = clean_text(&item).replacen(&title, "", 1).trim().to_string();
        let value = Some(value).filter(|v| !v.is_empty() && v != "--");

        match title.to_lowercase() {
            t if t.starts_with("height") => height = value,
            t if t.starts_with("reach") => reach = value,
            t if t.starts_with("stance") => stance = value,
            t if t.starts_with("dob") => date_of_birth = value,
            _ => {}
        }
    }

    Ok(RawFighter {
        full_name,
        fighter_url: None,
        nickname,
        height,
        reach,
        stance,
        date_of_birth,
        record,
    })
}
