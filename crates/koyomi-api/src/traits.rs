//! The seam between the calendar and whatever serves the catalog.

use std::future::Future;

use koyomi_core::CatalogEntry;

/// One page of the releasing-anime listing, unfiltered.
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,
    pub has_next: bool,
}

/// A remote catalog of currently releasing anime.
///
/// Futures are not required to be `Send`; in the browser they run on the
/// single-threaded event loop.
pub trait CatalogSource {
    type Error: std::error::Error + 'static;

    /// Fetch one page (1-based) of the listing, in popularity order.
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<CatalogPage, Self::Error>>;

    /// Look up a single title. `None` if the catalog has no such ID.
    fn fetch_by_id(
        &self,
        id: u64,
    ) -> impl Future<Output = Result<Option<CatalogEntry>, Self::Error>>;

    /// Look up several titles at once. Unknown IDs are skipped.
    fn fetch_batch_by_ids(
        &self,
        ids: &[u64],
    ) -> impl Future<Output = Result<Vec<CatalogEntry>, Self::Error>>;
}
