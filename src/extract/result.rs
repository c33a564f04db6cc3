// src/extract/result.rs

//! Extractor for the fight table of an event detail page.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::extract::{clean_text, first_line, hrefs, lines, parse_selector};
use crate::models::RawResult;

/// Extract one record per fight row, preserving table order.
///
/// Rows with damaged cells are still emitted; the affected fields stay
/// empty so the cleaning stage can decide what to do with them.
pub fn results(html: &str) -> Result<Vec<RawResult>> {
    let document = Html::parse_document(html);

    let table_sel = parse_selector("table.b-fight-details__table")?;
    if document.select(&table_sel).next().is_none() {
        return Err(AppError::parse("event results", "fight table not found"));
    }

    let row_sel = parse_selector(
        "tr.b-fight-details__table-row.b-fight-details__table-row__hover.js-fight-details-click",
    )?;
    let cell_sel = parse_selector("td.b-fight-details__table-col")?;
    let flag_sel = parse_selector("a.b-flag")?;
    let link_sel = parse_selector("a")?;
    let img_sel = parse_selector("img")?;
    let para_sel = parse_selector("p")?;

    let mut results = Vec::new();
    for row in document.select(&row_sel) {
        let cells: Vec<_> = row.select(&cell_sel).collect();

        let fight_url = row
            .value()
            .attr("data-link")
            .map(|href| href.trim().to_string())
            .unwrap_or_default();
        let winner = cells
            .first()
            .and_then(|cell| cell.select(&flag_sel).next())
            .map(|flag| clean_text(&flag))
            .unwrap_or_default();
        let fighters_urls = cells
            .get(1)
            .map(|cell| hrefs(cell, &link_sel))
            .unwrap_or_default();
        let weight_class = cells
            .get(6)
            .map(|cell| first_line(cell, &para_sel))
            .unwrap_or_default();
        let method = cells
            .get(7)
            .map(|cell| {
                lines(cell, &para_sel)
                    .into_iter()
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();
        let round = cells
            .get(8)
            .map(|cell| first_line(cell, &para_sel))
            .unwrap_or_default();
        let time = cells
            .get(9)
            .map(|cell| first_line(cell, &para_sel))
            .unwrap_or_default();

        // Bonus and belt icons can sit in any cell of the row.
        let icon_srcs: Vec<&str> = row
            .select(&img_sel)
            .filter_map(|img| img.value().attr("src"))
            .collect();
        let has_icon = |name: &str| icon_srcs.iter().any(|src| src.ends_with(name));

        results.push(RawResult {
            fight_url,
            event_url: None,
            winner,
            fighters_urls,
            weight_class,
            method,
            round,
            time,
            title_fight: has_icon("belt.png"),
            perf_bonus: has_icon("perf.png"),
            fight_of_the_night: has_icon("fight.png"),
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT_PAGE: &str = r##"
<html><body>
<table class="b-fight-details__table">
  <thead><tr class="b-fight-details__table-row"><th>W/L</th><th>Fighter</th><th>Kd</th><th>Str</th><th>Td</th><th>Sub</th><th>Weight class</th><th>Method</th><th>Round</th><th>Time</th></tr></thead>
  <tbody>
    <tr class="b-fight-details__table-row b-fight-details__table-row__hover js-fight-details-click"
        data-link="http://ufcstats.com/fight-details/bec3154a11df3299">
      <td class="b-fight-details__table-col"><p><a class="b-flag" href="#"><i class="b-flag__inner"><i class="b-flag__text">win</i></i></a></p></td>
      <td class="b-fight-details__table-col">
        <p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">Amanda Ribas</a></p>
        <p><a href="http://ufcstats.com/fighter-details/bbbb444455556666">Rose Namajunas</a></p>
      </td>
      <td class="b-fight-details__table-col"><p>0</p><p>1</p></td>
      <td class="b-fight-details__table-col"><p>47</p><p>62</p></td>
      <td class="b-fight-details__table-col"><p>0</p><p>2</p></td>
      <td class="b-fight-details__table-col"><p>0</p><p>0</p></td>
      <td class="b-fight-details__table-col"><p>Flyweight</p><p><img src="/images/perf.png"></p></td>
      <td class="b-fight-details__table-col"><p>SUB</p><p>Rear Naked Choke</p></td>
      <td class="b-fight-details__table-col"><p>2</p></td>
      <td class="b-fight-details__table-col"><p>4:45</p></td>
    </tr>
    <tr class="b-fight-details__table-row b-fight-details__table-row__hover js-fight-details-click"
        data-link="http://ufcstats.com/fight-details/1b2c3d4e5f607182">
      <td class="b-fight-details__table-col"><p><a class="b-flag" href="#"><i class="b-flag__inner"><i class="b-flag__text">draw</i></i></a></p></td>
      <td class="b-fight-details__table-col">
        <p><a href="http://ufcstats.com/fighter-details/cccc777788889999">Chris Gutierrez</a></p>
        <p><a href="http://ufcstats.com/fighter-details/dddd000011112222">Alateng Heili</a></p>
      </td>
      <td class="b-fight-details__table-col"><p>0</p><p>0</p></td>
      <td class="b-fight-details__table-col"><p>55</p><p>54</p></td>
      <td class="b-fight-details__table-col"><p>0</p><p>3</p></td>
      <td class="b-fight-details__table-col"><p>0</p><p>0</p></td>
      <td class="b-fight-details__table-col"><p>Bantamweight <img src="/images/belt.png"></p></td>
      <td class="b-fight-details__table-col"><p>S-DEC</p></td>
      <td class="b-fight-details__table-col"><p>3</p></td>
      <td class="b-fight-details__table-col"><p>5:00</p></td>
    </tr>
  </tbody>
</table>
</body></html>
"##;

    #[test]
    fn extracts_fight_rows_in_order() {
        let records = results(EVENT_PAGE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].fight_url,
            "http://ufcstats.com/fight-details/bec3154a11df3299"
        );
        assert_eq!(records[0].winner, "win");
        assert_eq!(
            records[0].fighters_urls,
            vec![
                "http://ufcstats.com/fighter-details/aaaa111122223333",
                "http://ufcstats.com/fighter-details/bbbb444455556666",
            ]
        );
        assert_eq!(records[0].weight_class, "Flyweight");
        assert_eq!(records[0].method, "SUB\nRear Naked Choke");
        assert_eq!(records[0].round, "2");
        assert_eq!(records[0].time, "4:45");
    }

    #[test]
    fn reads_draw_flag_and_single_line_method() {
        let records = results(EVENT_PAGE).unwrap();
        assert_eq!(records[1].winner, "draw");
        assert_eq!(records[1].method, "S-DEC");
        assert_eq!(records[1].round, "3");
        assert_eq!(records[1].time, "5:00");
    }

    #[test]
    fn detects_bonus_icons() {
        let records = results(EVENT_PAGE).unwrap();
        assert!(records[0].perf_bonus);
        assert!(!records[0].title_fight);
        assert!(records[1].title_fight);
        assert!(!records[1].perf_bonus);
    }

    #[test]
    fn event_url_left_for_the_scraper_to_attach() {
        let records = results(EVENT_PAGE).unwrap();
        assert!(records.iter().all(|r| r.event_url.is_none()));
    }

    #[test]
    fn damaged_row_is_emitted_with_empty_fields() {
        let html = r#"
<table class="b-fight-details__table"><tbody>
  <tr class="b-fight-details__table-row b-fight-details__table-row__hover js-fight-details-click">
    <td class="b-fight-details__table-col"></td>
    <td class="b-fight-details__table-col"><p><a href="http://ufcstats.com/fighter-details/aaaa111122223333">A</a></p></td>
  </tr>
</tbody></table>"#;
        let records = results(html).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].fight_url.is_empty());
        assert!(records[0].winner.is_empty());
        assert_eq!(records[0].fighters_urls.len(), 1);
        assert!(records[0].method.is_empty());
    }

    #[test]
    fn missing_fight_table_is_a_parse_error() {
        assert!(results("<html><body></body></html>").is_err());
    }
}
