// src/clean/mod.rs

//! Cleaning stage: raw scraped records in, typed tables out.
//!
//! Each cleaner is a pure function over the full raw document. Rows
//! that cannot be coerced are dropped and reported instead of aborting
//! the run, and reference tables are threaded so results only point at
//! cleaned events and fighters, and rounds only at cleaned fights.
//! Cleaning the same raw input twice yields identical tables.

pub mod events;
pub mod fields;
pub mod fighters;
pub mod report;
pub mod results;
pub mod rounds;

pub use report::{Rejection, RejectionReport};
pub use results::ResultsContext;
pub use rounds::RoundsContext;

/// Rows that survived cleaning plus the rejections that did not.
pub struct CleanOutcome<T> {
    pub rows: Vec<T>,
    pub report: RejectionReport,
}
