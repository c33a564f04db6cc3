// src/scrape/mod.rs

//! Concurrent page fetching for ufcstats.com.
//!
//! The scraper walks the site in waves: the completed-events listing,
//! then every event page, then every fight and fighter page harvested
//! from the results. Each wave goes through [`Scraper::fetch_batch`],
//! which bounds concurrency, paces requests and keeps going when a
//! single page fails.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::error::Result;
use crate::models::{RawEvent, RawResult, ScraperConfig};
use crate::utils::http;

/// Records recovered from one wave plus the number of pages that failed.
#[derive(Debug)]
pub struct BatchOutcome<T> {
    pub records: Vec<T>,
    pub failures: usize,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: 0,
        }
    }
}

/// Bounded-concurrency page fetcher.
pub struct Scraper {
    client: Client,
    delay: Duration,
    concurrency: usize,
}

impl Scraper {
    /// Build a scraper from the configured user agent, timeout and pacing.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            delay: Duration::from_millis(config.request_delay_ms),
            concurrency: config.max_concurrent.max(1),
        })
    }

    /// Fetch every url, parse each page, and concatenate the records in
    /// url order. A page that fails to download or parse is logged and
    /// counted; the rest of the batch still completes.
    pub async fn fetch_batch<T, F>(&self, urls: &[String], context: &str, parse: F) -> BatchOutcome<T>
    where
        F: Fn(&str, &str) -> Result<Vec<T>>,
    {
        let parse = &parse;
        let mut outcome = BatchOutcome::<T>::default();

        let mut pages = stream::iter(urls)
            .map(|url| async move {
                let result = self.fetch_page(url, parse).await;
                (url, result)
            })
            .buffered(self.concurrency);

        while let Some((url, result)) = pages.next().await {
            match result {
                Ok(records) => outcome.records.extend(records),
                Err(error) => {
                    outcome.failures += 1;
                    log::warn!("Failed to fetch {context} {url}: {error}");
                }
            }

            if self.delay.as_millis() > 0 {
                tokio::time::sleep(self.delay).await;
            }
        }

        outcome
    }

    async fn fetch_page<T, F>(&self, url: &str, parse: &F) -> Result<Vec<T>>
    where
        F: Fn(&str, &str) -> Result<Vec<T>>,
    {
        // Harvested hrefs are third-party input; a malformed one fails
        // here, before any request goes out.
        let target = url::Url::parse(url)?;
        let html = http::fetch_text(&self.client, target.as_str()).await?;
        parse(&html, url)
    }
}

/// Event pages to visit, in listing order. Duplicates collapse to the
/// first appearance.
pub fn event_urls(events: &[RawEvent]) -> Vec<String> {
    dedup_in_order(events.iter().map(|e| e.event_url.as_str()))
}

/// Fight detail pages harvested from results, first appearance winning.
pub fn fight_urls(results: &[RawResult]) -> Vec<String> {
    dedup_in_order(results.iter().map(|r| r.fight_url.as_str()))
}

/// Fighter profile pages harvested from results. A fighter who appears
/// on several cards is fetched once.
pub fn fighter_urls(results: &[RawResult]) -> Vec<String> {
    dedup_in_order(
        results
            .iter()
            .flat_map(|r| r.fighters_urls.iter().map(String::as_str)),
    )
}

fn dedup_in_order<'a>(urls: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for url in urls {
        if url.is_empty() {
            continue;
        }
        if seen.insert(url) {
            ordered.push(url.to_string());
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_event(url: &str) -> RawEvent {
        RawEvent {
            event: "UFC Test Night".to_string(),
            event_url: url.to_string(),
            date: "March 23, 2024".to_string(),
            location: "Las Vegas, Nevada, USA".to_string(),
        }
    }

    fn raw_result(fight: &str, a: &str, b: &str) -> RawResult {
        RawResult {
            fight_url: fight.to_string(),
            event_url: None,
            winner: "win".to_string(),
            fighters_urls: vec![a.to_string(), b.to_string()],
            weight_class: "Lightweight".to_string(),
            method: "U-DEC".to_string(),
            round: "3".to_string(),
            time: "5:00".to_string(),
            title_fight: false,
            perf_bonus: false,
            fight_of_the_night: false,
        }
    }

    #[test]
    fn event_urls_keep_listing_order() {
        let events = vec![
            raw_event("http://ufcstats.com/event-details/aaa"),
            raw_event("http://ufcstats.com/event-details/bbb"),
            raw_event("http://ufcstats.com/event-details/aaa"),
        ];

        assert_eq!(
            event_urls(&events),
            vec![
                "http://ufcstats.com/event-details/aaa".to_string(),
                "http://ufcstats.com/event-details/bbb".to_string(),
            ]
        );
    }

    #[test]
    fn empty_urls_are_skipped() {
        let mut event = raw_event("");
        event.event = "Broken row".to_string();
        assert!(event_urls(&[event]).is_empty());
    }

    #[test]
    fn fighter_urls_dedup_across_fights() {
        let results = vec![
            raw_result("f1", "http://ufcstats.com/fighter-details/x", "http://ufcstats.com/fighter-details/y"),
            raw_result("f2", "http://ufcstats.com/fighter-details/y", "http://ufcstats.com/fighter-details/z"),
        ];

        assert_eq!(
            fighter_urls(&results),
            vec![
                "http://ufcstats.com/fighter-details/x".to_string(),
                "http://ufcstats.com/fighter-details/y".to_string(),
                "http://ufcstats.com/fighter-details/z".to_string(),
            ]
        );
    }

    #[test]
    fn fight_urls_collapse_rematch_rows() {
        let results = vec![
            raw_result("http://ufcstats.com/fight-details/one", "a", "b"),
            raw_result("http://ufcstats.com/fight-details/one", "a", "b"),
            raw_result("http://ufcstats.com/fight-details/two", "c", "d"),
        ];

        assert_eq!(fight_urls(&results).len(), 2);
    }

    #[tokio::test]
    async fn malformed_url_counts_as_a_failure() {
        let scraper = Scraper::new(&ScraperConfig {
            request_delay_ms: 0,
            ..ScraperConfig::default()
        })
        .unwrap();

        // Fails at URL parsing, so nothing is fetched.
        let outcome = scraper
            .fetch_batch(&["not a url".to_string()], "events listing", |_, _| {
                Ok(Vec::<RawEvent>::new())
            })
            .await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.failures, 1);
    }
}
