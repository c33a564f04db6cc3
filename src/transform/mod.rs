// src/transform/mod.rs

//! Derived tables built from the cleaned Parquet files.
//!
//! The cleaned tables stay close to the page layout. Analysis wants
//! fighter-centric rows, so this stage reshapes results into one row
//! per fighter per fight and folds the round statistics into per-fight
//! totals, joining event dates and fighter attributes along the way.

pub mod fights;
pub mod results;

pub use fights::per_fight_totals;
pub use results::long_form;
