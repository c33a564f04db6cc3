// src/pipeline/mod.rs

//! Pipeline entry points, one per CLI subcommand.
//!
//! - `run_scrape`: walk ufcstats.com and persist raw JSON documents
//! - `run_clean`: coerce the raw documents into typed Parquet tables
//! - `run_transform`: reshape the cleaned tables for analysis
//! - `run_dummy`: probe the storage path with a small known table
//!
//! Every stage reads its input from storage and writes its output back,
//! so a stage can be rerun on its own once its inputs exist.

pub mod clean;
pub mod dummy;
pub mod scrape;
pub mod transform;

pub use clean::run_clean;
pub use dummy::run_dummy;
pub use scrape::run_scrape;
pub use transform::run_transform;
