// src/extract/event.rs

//! Extractor for the completed-events listing page.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::extract::{clean_text, parse_selector};
use crate::models::RawEvent;

/// Extract one record per completed event, preserving listing order.
///
/// The listing also shows the next upcoming event in a differently styled
/// row; only rows carrying the completed-event link style are emitted.
pub fn events(html: &str) -> Result<Vec<RawEvent>> {
    let document = Html::parse_document(html);

    let table_sel = parse_selector("table.b-statistics__table-events")?;
    let Some(table) = document.select(&table_sel).next() else {
        return Err(AppError::parse("events listing", "statistics table not found"));
    };

    let row_sel = parse_selector("tr.b-statistics__table-row")?;
    let link_sel = parse_selector("a.b-link.b-link_style_black")?;
    let date_sel = parse_selector("span.b-statistics__date")?;
    let location_sel = parse_selector("td.b-statistics__table-col_style_big-top-padding")?;

    let mut events = Vec::new();
    for row in table.select(&row_sel) {
        // Spacer rows and the upcoming-event row have no completed-event link.
        let Some(link) = row.select(&link_sel).next() else {
            continue;
        };

        let event = clean_text(&link);
        if event.is_empty() {
            continue;
        }

        let event_url = link
            .value()
            .attr("href")
            .map(|href| href.trim().to_string())
            .unwrap_or_default();
        let date = row
            .select(&date_sel)
            .next()
            .map(|el| clean_text(&el))
            .unwrap_or_default();
        let location = row
            .select(&location_sel)
            .next()
            .map(|el| clean_text(&el))
            .unwrap_or_default();

        events.push(RawEvent {
            event,
            event_url,
            date,
            location,
        });
    }

    Ok(events)
}
