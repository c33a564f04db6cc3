// src/extract/round.rs

//! Extractor for the per-round statistics of a fight detail page.
//!
//! A fight page carries two per-round tables inside collapsible sections:
//! the general statistics (knockdowns, strikes, takedowns, control) and the
//! significant-strikes breakdown (head, body, leg, distance, clinch,
//! ground). Both list one table row per round with two values per cell,
//! one for each fighter. The extractor merges the tables into one record
//! per fighter per round, interleaved round by round with the first listed
//! fighter first.

use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::extract::{clean_text, hrefs, lines, parse_selector};
use crate::models::RawRound;

/// Headers mapped to the per-fighter values of each cell.
type StatRow = HashMap<String, Vec<String>>;

struct StatTable {
    rows: Vec<StatRow>,
}

/// Extract interleaved per-round records for both fighters of a fight.
///
/// Pages that state round statistics are not available produce an empty
/// set; pages without the round sections at all are a parse error. The
/// `fight_url` field is provisionally filled from the page's own event
/// backlink and overwritten by the scraper with the URL it fetched.
pub fn rounds(html: &str) -> Result<Vec<RawRound>> {
    let document = Html::parse_document(html);

    let section_sel = parse_selector("section.b-fight-details__section.js-fight-section")?;
    let sections: Vec<_> = document.select(&section_sel).collect();
    if sections.is_empty() {
        if page_text(&document).contains("not currently available") {
            return Ok(Vec::new());
        }
        return Err(AppError::parse("fight rounds", "round sections not found"));
    }
    if sections
        .iter()
        .any(|s| clean_text(s).to_lowercase().contains("not currently available"))
    {
        return Ok(Vec::new());
    }

    let table_sel = parse_selector("table")?;
    let thead_sel = parse_selector("thead")?;
    let th_sel = parse_selector("th")?;
    let tbody_sel = parse_selector("tbody")?;
    let tr_sel = parse_selector("tr")?;
    let td_sel = parse_selector("td")?;
    let link_sel = parse_selector("a")?;
    let para_sel = parse_selector("p")?;

    let mut tables = Vec::new();
    for section in &sections {
        let Some(table) = section.select(&table_sel).next() else {
            continue;
        };
        tables.push(read_stat_table(
            &table, &thead_sel, &th_sel, &tbody_sel, &tr_sel, &td_sel, &link_sel, &para_sel,
        ));
    }

    let Some(general) = tables.first() else {
        return Ok(Vec::new());
    };
    let strikes = tables.get(1);

    // Event backlink; only a placeholder until the scraper attaches the
    // URL it actually fetched.
    let backlink_sel = parse_selector("a.b-link")?;
    let fight_url = document
        .select(&backlink_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or("")
        .trim()
        .to_string();

    let mut rounds = Vec::new();
    for (index, row) in general.rows.iter().enumerate() {
        let round = (index + 1) as u32;
        let strike_row = strikes.and_then(|table| table.rows.get(index));

        for slot in 0..2 {
            let fighter = slot_value(row, "fighter", slot).unwrap_or_default();
            rounds.push(RawRound {
                round,
                fight_url: fight_url.clone(),
                fighter,
                kd: slot_value(row, "kd", slot),
                sig_str: slot_value(row, "sig_str", slot),
                sig_str_pct: slot_value(row, "sig_str_pct", slot),
                total_str: slot_value(row, "total_str", slot),
                td: slot_value(row, "td", slot),
                td_pct: slot_value(row, "td_pct", slot),
                sub_att: slot_value(row, "sub_att", slot),
                rev: slot_value(row, "rev", slot),
                ctrl: slot_value(row, "ctrl", slot),
                head: strike_value(strike_row, "head", slot),
                body: strike_value(strike_row, "body", slot),
                leg: strike_value(strike_row, "leg", slot),
                distance: strike_value(strike_row, "distance", slot),
                clinch: strike_value(strike_row, "clinch", slot),
                ground: strike_value(strike_row, "ground", slot),
            });
        }
    }

    Ok(rounds)
}

#[allow(clippy::too_many_arguments)]
fn read_stat_table(
    table: &ElementRef,
    thead_sel: &Selector,
    th_sel: &Selector,
    tbody_sel: &Selector,
    tr_sel: &Selector,
    td_sel: &Selector,
    link_sel: &Selector,
    para_sel: &Selector,
) -> StatTable {
    let mut headers: Vec<String> = table
        .select(thead_sel)
        .next()
        .map(|thead| {
            thead
                .select(th_sel)
                .map(|th| normalize_header(&clean_text(&th)))
                .collect()
        })
        .unwrap_or_default();
    dedupe_td_headers(&mut headers);

    let mut rows = Vec::new();
    if let Some(tbody) = table.select(tbody_sel).next() {
        for tr in tbody.select(tr_sel) {
            let cells: Vec<_> = tr.select(td_sel).collect();
            if cells.is_empty() {
                continue;
            }

            let mut row = StatRow::new();
            for (header, cell) in headers.iter().zip(cells.iter()) {
                let values = if header == "fighter" {
                    hrefs(cell, link_sel)
                } else {
                    lines(cell, para_sel)
                };
                row.insert(header.clone(), values);
            }
            rows.push(row);
        }
    }

    StatTable { rows }
}

/// Lowercase a column header and squeeze it into snake_case,
/// e.g. "Sig. str. %" becomes "sig_str_pct".
fn normalize_header(text: &str) -> String {
    text.to_lowercase()
        .replace('.', "")
        .replace('%', "pct")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// The takedown count and accuracy columns can normalize to the same name;
/// when that happens the first of the adjacent pair is the count.
fn dedupe_td_headers(headers: &mut [String]) {
    for i in 0..headers.len().saturating_sub(1) {
        if headers[i] == "td_pct" && headers[i + 1] == "td_pct" {
            headers[i] = "td".to_string();
        }
    }
}

fn slot_value(row: &StatRow, key: &str, slot: usize) -> Option<String> {
    row.get(key)
        .and_then(|values| values.get(slot))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn strike_value(row: Option<&StatRow>, key: &str, slot: usize) -> Option<String> {
    row.and_then(|r| slot_value(r, key, slot))
}

fn page_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIGHT_PAGE: &str = r#"
<html><body>
<a class="b-link" href="http://ufcstats.com/event-details/06b7e95eb1a4a8d0">UFC Fight Night</a>
<section class="b-fight-details__section js-fight-section">
  <table class="b-fight-details__table js-fight-table">
    <thead class="b-fight-details__table-head">
      <tr><th>Fighter</th><th>KD</th><th>Sig. str.</th><th>Sig. str. %</th><th>Total str.</th><th>Td %</th><th>Td %</th><th>Sub. att</th><th>Rev.</th><th>Ctrl</th></tr>
    </thead>
    <tbody>
      <tr>
        <td><p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">Amanda Ribas</a></p><p><a href="http://ufcstats.com/fighter-details/bbbb444455556666">Rose Namajunas</a></p></td>
        <td><p>0</p><p>0</p></td>
        <td><p>20 of 53</p><p>18 of 40</p></td>
        <td><p>37%</p><p>45%</p></td>
        <td><p>26 of 60</p><p>30 of 52</p></td>
        <td><p>0 of 1</p><p>1 of 1</p></td>
        <td><p>0%</p><p>100%</p></td>
        <td><p>0</p><p>1</p></td>
        <td><p>0</p><p>0</p></td>
        <td><p>0:24</p><p>1:35</p></td>
      </tr>
      <tr>
        <td><p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">Amanda Ribas</a></p><p><a href="http://ufcstats.com/fighter-details/bbbb444455556666">Rose Namajunas</a></p></td>
        <td><p>1</p><p>0</p></td>
        <td><p>25 of 47</p><p>21 of 44</p></td>
        <td><p>53%</p><p>47%</p></td>
        <td><p>31 of 55</p><p>29 of 50</p></td>
        <td><p>1 of 2</p><p>0 of 0</p></td>
        <td><p>50%</p><p>---</p></td>
        <td><p>1</p><p>0</p></td>
        <td><p>0</p><p>1</p></td>
        <td><p>2:11</p><p>--</p></td>
      </tr>
    </tbody>
  </table>
</section>
<section class="b-fight-details__section js-fight-section">
  <table class="b-fight-details__table js-fight-table">
    <thead class="b-fight-details__table-head">
      <tr><th>Fighter</th><th>Sig. str</th><th>Sig. str. %</th><th>Head</th><th>Body</th><th>Leg</th><th>Distance</th><th>Clinch</th><th>Ground</th></tr>
    </thead>
    <tbody>
      <tr>
        <td><p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">Amanda Ribas</a></p><p><a href="http://ufcstats.com/fighter-details/bbbb444455556666">Rose Namajunas</a></p></td>
        <td><p>20 of 53</p><p>18 of 40</p></td>
        <td><p>37%</p><p>45%</p></td>
        <td><p>9 of 31</p><p>10 of 27</p></td>
        <td><p>6 of 13</p><p>4 of 7</p></td>
        <td><p>5 of 9</p><p>4 of 6</p></td>
        <td><p>17 of 49</p><p>15 of 36</p></td>
        <td><p>2 of 3</p><p>2 of 3</p></td>
        <td><p>1 of 1</p><p>1 of 1</p></td>
      </tr>
      <tr>
        <td><p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">Amanda Ribas</a></p><p><a href="http://ufcstats.com/fighter-details/bbbb444455556666">Rose Namajunas</a></p></td>
        <td><p>25 of 47</p><p>21 of 44</p></td>
        <td><p>53%</p><p>47%</p></td>
        <td><p>12 of 28</p><p>11 of 29</p></td>
        <td><p>7 of 11</p><p>5 of 8</p></td>
        <td><p>6 of 8</p><p>5 of 7</p></td>
        <td><p>20 of 40</p><p>17 of 38</p></td>
        <td><p>3 of 4</p><p>3 of 4</p></td>
        <td><p>2 of 3</p><p>1 of 2</p></td>
      </tr>
    </tbody>
  </table>
</section>
</body></html>
"#;

    #[test]
    fn interleaves_fighters_round_by_round() {
        let records = rounds(FIGHT_PAGE).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].round, 1);
        assert_eq!(
            records[0].fighter,
            "http://ufcstats.com/fighter-details/aaaa111122223333"
        );
        assert_eq!(records[1].round, 1);
        assert_eq!(
            records[1].fighter,
            "http://ufcstats.com/fighter-details/bbbb444455556666"
        );
        assert_eq!(records[2].round, 2);
        assert_eq!(
            records[2].fighter,
            "http://ufcstats.com/fighter-details/aaaa111122223333"
        );
        assert_eq!(records[3].round, 2);
    }

    #[test]
    fn merges_general_and_breakdown_tables() {
        let records = rounds(FIGHT_PAGE).unwrap();
        assert_eq!(records[0].sig_str.as_deref(), Some("20 of 53"));
        assert_eq!(records[0].total_str.as_deref(), Some("26 of 60"));
        assert_eq!(records[0].head.as_deref(), Some("9 of 31"));
        assert_eq!(records[0].ground.as_deref(), Some("1 of 1"));
        assert_eq!(records[1].sig_str.as_deref(), Some("18 of 40"));
        assert_eq!(records[1].head.as_deref(), Some("10 of 27"));
        assert_eq!(records[2].kd.as_deref(), Some("1"));
        // The duplicated takedown header resolves to count then accuracy.
        assert_eq!(records[2].td.as_deref(), Some("1 of 2"));
        assert_eq!(records[2].td_pct.as_deref(), Some("50%"));
        assert_eq!(records[3].ctrl.as_deref(), Some("--"));
    }

    #[test]
    fn keeps_placeholder_values_verbatim() {
        let records = rounds(FIGHT_PAGE).unwrap();
        assert_eq!(records[3].td_pct.as_deref(), Some("---"));
        assert_eq!(records[3].ctrl.as_deref(), Some("--"));
    }

    #[test]
    fn attaches_event_backlink_as_provisional_fight_url() {
        let records = rounds(FIGHT_PAGE).unwrap();
        assert!(
            records
                .iter()
                .all(|r| r.fight_url == "http://ufcstats.com/event-details/06b7e95eb1a4a8d0")
        );
    }

    #[test]
    fn unavailable_stats_page_yields_no_records() {
        let html = r#"
<section class="b-fight-details__section js-fight-section">
  <p class="b-fight-details__collapse-link_tot">Round-by-round stats not currently available.</p>
</section>"#;
        assert!(rounds(html).unwrap().is_empty());
    }

    #[test]
    fn missing_sections_are_a_parse_error() {
        let err = rounds("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(err.to_string().contains("fight rounds"));
    }

    #[test]
    fn breakdown_table_may_be_absent() {
        let html = r#"
<section class="b-fight-details__section js-fight-section">
  <table>
    <thead><tr><th>Fighter</th><th>KD</th></tr></thead>
    <tbody><tr>
      <td><p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">A</a></p><p><a href="http://ufcstats.com/fighter-details/bbbb444455556666">B</a></p></td>
      <td><p>0</p><p>2</p></td>
    </tr></tbody>
  </table>
</section>"#;
        let records = rounds(html).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kd.as_deref(), Some("0"));
        assert_eq!(records[1].kd.as_deref(), Some("2"));
        assert_eq!(records[0].head, None);
        assert_eq!(records[0].sig_str, None);
    }

    #[test]
    fn header_normalization_handles_site_forms() {
        assert_eq!(normalize_header("Sig. str. %"), "sig_str_pct");
        assert_eq!(normalize_header("Total str."), "total_str");
        assert_eq!(normalize_header("Sub. att"), "sub_att");
        assert_eq!(normalize_header("Td %"), "td_pct");
        assert_eq!(normalize_header("KD"), "kd");
    }

    #[test]
    fn adjacent_takedown_headers_get_distinct_names() {
        let mut headers = vec![
            "fighter".to_string(),
            "td_pct".to_string(),
            "td_pct".to_string(),
        ];
        dedupe_td_headers(&mut headers);
        assert_eq!(headers, vec!["fighter", "td", "td_pct"]);
    }
}
