mod entry;
mod preferences;

pub use entry::{CatalogEntry, CoverImage, EntryTitle, NextAiring};
pub use preferences::{CustomLinkMap, WatchingSet};

#[cfg(test)]
pub(crate) use entry::sample;
