//! Core types and shared functionality for schemdex.
//!
//! This crate provides:
//! - The in-memory catalog cache with single-flight index loading
//! - The deterministic query engine (filter, facet counts, sort, paginate)
//! - The `CatalogService` façade consumed by presentation layers
//! - Configuration structures
//! - Unified error types
//!
//! The HTTP side lives in `schemdex-client`; this crate only sees it through
//! the [`IndexSource`] trait.

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod record;

pub use catalog::{CatalogCache, CatalogService, CatalogSnapshot, IndexSource};
pub use config::AppConfig;
pub use error::Error;
pub use query::{FacetCount, FacetField, QueryCriteria, QueryResult, SortMode};
pub use record::{Dimensions, Record};
