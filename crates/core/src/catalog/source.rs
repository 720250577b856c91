//! Index source seam between the cache and the HTTP layer.

use async_trait::async_trait;

use crate::error::Error;
use crate::record::Record;

/// Supplies the parsed records for one full index load.
///
/// Implemented by the reqwest-backed `IndexClient` in `schemdex-client` and
/// by in-memory fakes in tests. The cache decides *when* a load happens; the
/// source only decides *how*.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetch and parse the whole remote index.
    ///
    /// A document that decodes to zero usable entries is a valid, empty
    /// outcome; transport failures are the only error path.
    async fn load_index(&self) -> Result<Vec<Record>, Error>;
}
