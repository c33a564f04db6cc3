// src/extract/mod.rs

//! Pure HTML extractors, one per record kind.
//!
//! Each extractor takes a full page as a string and produces raw records
//! that mirror what the markup displayed. Extractors never fetch anything
//! and never interpret field contents; a page can be re-extracted any
//! number of times with identical output.
//!
//! A document whose structural markers are missing (the listing table, the
//! profile title, the round sections) fails with a parse error. A row that
//! is merely missing sub-fields is still emitted, with the affected fields
//! empty or `None`, so one damaged row never discards its neighbours.

mod event;
mod fighter;
mod result;
mod round;

pub use event::events;
pub use fighter::fighter;
pub use result::results;
pub use round::rounds;

use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::RecordKind;

/// Extract a page's records for `kind` as untyped JSON values.
///
/// Dynamic dispatch over the typed extractors, for callers that carry the
/// kind as data. A fighter profile page yields a single record.
pub fn records(html: &str, kind: RecordKind) -> Result<Vec<serde_json::Value>> {
    match kind {
        RecordKind::Events => to_values(&events(html)?),
        RecordKind::Results => to_values(&results(html)?),
        RecordKind::Fighters => to_values(&[fighter(html)?]),
        RecordKind::Rounds => to_values(&rounds(html)?),
    }
}

fn to_values<T: Serialize>(records: &[T]) -> Result<Vec<serde_json::Value>> {
    records.iter().map(|r| Ok(serde_json::to_value(r)?)).collect()
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collapse an element's text to single-spaced form.
fn clean_text(el: &ElementRef) -> String {
    el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text of each matching child, in document order.
///
/// Table cells on ufcstats wrap one value per `<p>`; keeping empty entries
/// preserves positional alignment between the two fighters of a fight.
fn lines(el: &ElementRef, para_sel: &Selector) -> Vec<String> {
    el.select(para_sel).map(|p| clean_text(&p)).collect()
}

/// First non-empty line of a cell, or the cell's own text as fallback.
fn first_line(el: &ElementRef, para_sel: &Selector) -> String {
    lines(el, para_sel)
        .into_iter()
        .find(|line| !line.is_empty())
        .unwrap_or_else(|| clean_text(el))
}

/// Every href under the element, in document order.
fn hrefs(el: &ElementRef, link_sel: &Selector) -> Vec<String> {
    el.select(link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn parse_selector_rejects_invalid_css() {
        assert!(parse_selector("td.b-fight-details__table-col").is_ok());
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn clean_text_collapses_whitespace() {
        let html = Html::parse_fragment("<div>  March   30,\n 2024 </div>");
        let div = html.select(&parse_selector("div").unwrap()).next().unwrap();
        assert_eq!(clean_text(&div), "March 30, 2024");
    }

    #[test]
    fn lines_keep_positional_alignment() {
        // Bare table elements are dropped by the HTML5 tree builder, so the
        // cell has to live inside a real table.
        let html = Html::parse_fragment(
            "<table><tbody><tr><td><p>20 of 53</p><p></p><p>18 of 40</p></td></tr></tbody></table>",
        );
        let para = parse_selector("p").unwrap();
        let td = html.select(&parse_selector("td").unwrap()).next().unwrap();
        assert_eq!(lines(&td, &para), vec!["20 of 53", "", "18 of 40"]);
        assert_eq!(first_line(&td, &para), "20 of 53");
    }

    #[test]
    fn records_dispatches_on_kind() {
        let listing = r#"
<table class="b-statistics__table-events"><tbody>
  <tr class="b-statistics__table-row">
    <td class="b-statistics__table-col">
      <a href="http://ufcstats.com/event-details/aaf79f22cb0e4ae2" class="b-link b-link_style_black">UFC 299</a>
      <span class="b-statistics__date">March 09, 2024</span>
    </td>
    <td class="b-statistics__table-col b-statistics__table-col_style_big-top-padding">Miami, Florida, USA</td>
  </tr>
</tbody></table>
"#;
        let values = records(listing, crate::models::RecordKind::Events).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["event"], "UFC 299");
        assert_eq!(values[0]["date"], "March 09, 2024");

        // The same markup lacks every structural marker of a fight page.
        assert!(records(listing, crate::models::RecordKind::Rounds).is_err());
    }
}
