// src/lib.rs

//! UFC fight statistics pipeline library.

pub mod clean;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod scrape;
pub mod storage;
pub mod tabular;
pub mod transform;
pub mod utils;
