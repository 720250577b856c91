//! In-memory catalog cache and service façade.
//!
//! This module owns the single mutable piece of shared state in the crate:
//! the cached catalog snapshot. It provides:
//!
//! - Single-flight index loading (one fetch per cold cache, shared by all
//!   concurrent callers)
//! - Atomic snapshot replacement on refresh
//! - The [`CatalogService`] façade composing cache + query engine

pub mod cache;
pub mod service;
pub mod snapshot;
pub mod source;

pub use cache::CatalogCache;
pub use service::CatalogService;
pub use snapshot::CatalogSnapshot;
pub use source::IndexSource;
