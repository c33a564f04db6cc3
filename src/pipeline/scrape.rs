// src/pipeline/scrape.rs

//! Scraping pipeline: walk ufcstats.com and persist the raw documents.

use crate::error::{AppError, Result};
use crate::extract;
use crate::models::{Config, RecordKind};
use crate::scrape::{self, Scraper};
use crate::storage::DataStore;

/// Scrape the site and write one raw JSON document per record kind.
///
/// With `recent` set, only the first listing page is visited instead of
/// the whole history, so reruns pick up new cards without re-walking
/// every event since 1993.
pub async fn run_scrape(config: &Config, store: &DataStore, recent: bool) -> Result<()> {
    let scraper = Scraper::new(&config.scraper)?;
    let listing_url = if recent {
        config.event_urls.one.clone()
    } else {
        config.event_urls.all.clone()
    };

    log::info!("Scraping events listing from {listing_url}");
    let listing = scraper
        .fetch_batch(&[listing_url], "events listing", |html, _| {
            extract::events(html)
        })
        .await;
    if listing.records.is_empty() && listing.failures > 0 {
        return Err(AppError::parse(
            "events listing",
            "no events could be scraped",
        ));
    }
    let events = listing.records;
    log::info!("Found {} completed events", events.len());

    // Results rows get backlinked to the event page they came from.
    let event_pages = scrape::event_urls(&events);
    let results_outcome = scraper
        .fetch_batch(&event_pages, "event page", |html, url| {
            let mut rows = extract::results(html)?;
            for row in &mut rows {
                row.event_url = Some(url.to_string());
            }
            Ok(rows)
        })
        .await;
    let results = results_outcome.records;
    log::info!(
        "Scraped {} fight results ({} event pages failed)",
        results.len(),
        results_outcome.failures
    );

    // Round rows get keyed by the fight page we actually fetched.
    let fight_pages = scrape::fight_urls(&results);
    let rounds_outcome = scraper
        .fetch_batch(&fight_pages, "fight page", |html, url| {
            let mut rows = extract::rounds(html)?;
            for row in &mut rows {
                row.fight_url = url.to_string();
            }
            Ok(rows)
        })
        .await;
    let rounds = rounds_outcome.records;
    log::info!(
        "Scraped {} round rows ({} fight pages failed)",
        rounds.len(),
        rounds_outcome.failures
    );

    let fighter_pages = scrape::fighter_urls(&results);
    let fighters_outcome = scraper
        .fetch_batch(&fighter_pages, "fighter page", |html, url| {
            let mut profile = extract::fighter(html)?;
            profile.fighter_url = Some(url.to_string());
            Ok(vec![profile])
        })
        .await;
    let fighters = fighters_outcome.records;
    log::info!(
        "Scraped {} fighter profiles ({} fighter pages failed)",
        fighters.len(),
        fighters_outcome.failures
    );

    store.write_raw(RecordKind::Events, &events).await?;
    store.write_raw(RecordKind::Results, &results).await?;
    store.write_raw(RecordKind::Rounds, &rounds).await?;
    store.write_raw(RecordKind::Fighters, &fighters).await?;

    log::info!(
        "Scrape finished: {} events, {} results, {} rounds, {} fighters",
        events.len(),
        results.len(),
        rounds.len(),
        fighters.len()
    );
    Ok(())
}
