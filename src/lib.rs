//! confdocs: deterministic extraction of configuration-key descriptions from
//! a documentation corpus.
//!
//! The pipeline is a synchronous batch: select corpus files, scan them for
//! term occurrences, run format-aware extractors under a shared code-context
//! mask, filter candidates through a conservative quality bar, then rank and
//! deduplicate into a bounded result list per key. Every kept description is
//! a literal excerpt citing its file and line.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod output;
pub mod quality;
pub mod rank;
pub mod scan;
pub mod terms;

pub use config::ScanConfig;
pub use engine::Engine;
pub use output::Artifact;
