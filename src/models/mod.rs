// src/models/mod.rs

//! Domain models for the pipeline application.
//!
//! Types are grouped by lifecycle stage: raw rows as scraped, cleaned
//! records after coercion, and the runtime configuration.

mod clean;
mod config;
mod raw;

// Re-export all public types
pub use clean::{Event, Fighter, FightResult, MethodKind, RoundStat};
pub use config::{
    CleaningConfig, Config, EventUrls, GcsConfig, KindPaths, OutputFiles, ScraperConfig,
    TransformedPaths,
};
pub use raw::{RawEvent, RawFighter, RawResult, RawRound, RecordKind};
