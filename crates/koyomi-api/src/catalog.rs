use koyomi_core::CatalogEntry;

use crate::traits::{CatalogPage, CatalogSource};

/// Fetch every page of the releasing listing and keep the entries worth
/// scheduling: those with a next episode and a score of at least `min_score`.
///
/// Source order is preserved. The first failing page aborts the whole fetch.
pub async fn fetch_catalog<S: CatalogSource>(
    source: &S,
    min_score: u32,
) -> Result<Vec<CatalogEntry>, S::Error> {
    let mut all = Vec::new();
    let mut page = 1;
    loop {
        let CatalogPage { entries, has_next } = source.fetch_page(page).await?;
        let fetched = entries.len();
        all.extend(entries.into_iter().filter(|e| e.is_schedulable(min_score)));
        tracing::debug!(page, fetched, kept = all.len(), has_next, "catalog page");

        if !has_next {
            break;
        }
        if fetched == 0 {
            tracing::warn!(page, "empty page reported more results, stopping");
            break;
        }
        page += 1;
    }
    tracing::info!(entries = all.len(), pages = page, "catalog loaded");
    Ok(all)
}
