//! Read-only content store interface.

use async_trait::async_trait;

use estate_core::{Listing, Result};

use crate::query_builder::CompiledQuery;

/// Read-only query interface to the content store holding listings.
///
/// Both calls of one search share the same [`CompiledQuery`]; callers may run
/// them concurrently and in either order.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run the windowed listing query.
    async fn fetch_listings(&self, query: &CompiledQuery) -> Result<Vec<Listing>>;

    /// Run the count query (same predicate, no window).
    async fn count_listings(&self, query: &CompiledQuery) -> Result<u64>;

    /// Store name for logging.
    fn name(&self) -> &str;
}
