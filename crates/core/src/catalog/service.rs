//! Catalog service façade.

use std::sync::Arc;

use super::cache::CatalogCache;
use super::snapshot::CatalogSnapshot;
use super::source::IndexSource;
use crate::config::AppConfig;
use crate::error::Error;
use crate::query::{self, QueryCriteria, QueryResult};

/// The entry point consumed by the presentation layer.
///
/// Composes the single-flight cache with the query engine behind an async
/// [`search`](CatalogService::search). Clones are cheap and share one cache,
/// so a handle can be passed freely between concurrent callers.
#[derive(Clone)]
pub struct CatalogService {
    cache: Arc<CatalogCache>,
    config: AppConfig,
}

impl CatalogService {
    pub fn new(source: Arc<dyn IndexSource>, config: AppConfig) -> Self {
        Self { cache: Arc::new(CatalogCache::new(source)), config }
    }

    /// Run one query against the catalog, loading the index on a cold cache.
    ///
    /// Suspends only while a load is in flight; against a warm cache this is
    /// synchronous CPU work.
    pub async fn search(&self, criteria: &QueryCriteria) -> Result<QueryResult, Error> {
        let snapshot = self.cache.ensure_loaded().await?;
        Ok(query::run(snapshot.records(), criteria))
    }

    /// Drop the cached snapshot and fetch a fresh index.
    ///
    /// Searches issued after this completes observe the refreshed snapshot.
    pub async fn refresh(&self) -> Result<CatalogSnapshot, Error> {
        self.cache.invalidate();
        self.cache.ensure_loaded().await
    }

    /// Drop the cached snapshot without refetching. The next `search` loads.
    pub fn clear_cache(&self) {
        self.cache.invalidate();
    }

    /// Non-blocking peek at the currently cached snapshot.
    pub fn cached_snapshot(&self) -> Option<CatalogSnapshot> {
        self.cache.snapshot()
    }

    /// Criteria seeded from the configured defaults (page size, sort mode,
    /// facet dimension) for the given query text.
    pub fn default_criteria(&self, text: impl Into<String>) -> QueryCriteria {
        QueryCriteria {
            text: text.into(),
            facet: None,
            facet_field: self.config.facet_field,
            sort: self.config.sort,
            page: 1,
            page_size: self.config.page_size,
        }
    }
}
