pub mod anilist;
pub mod catalog;
pub mod traits;

pub use anilist::{AniListClient, AniListError};
pub use catalog::fetch_catalog;
pub use traits::{CatalogPage, CatalogSource};
