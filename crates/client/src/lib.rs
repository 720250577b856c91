//! HTTP index client for schemdex.
//!
//! This crate fetches the remote archive index document and normalizes it
//! into `schemdex-core` records: display-name cleanup, derived
//! download/preview URLs, and lenient per-element parsing.

pub mod index;

pub use index::{IndexClient, IndexConfig, IndexError, parse_document};
